//! Online scheduler and KPI evaluation.
//!
//! # Algorithm
//!
//! `OnlineScheduler` advances a discrete clock over `1..=T_max`, revealing
//! jobs at their release slot and letting a [`SelectionPolicy`](crate::dispatching::SelectionPolicy)
//! choose which one occupies the resource. It only ever sees the past and
//! present, which is what makes it online.
//!
//! # KPI
//!
//! `ScheduleKpi` summarizes a run: profit split, completion rate,
//! utilization, and preemption count.
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 3
//! - Baruah et al. (1992), "On the Competitiveness of On-Line Real-Time Task Scheduling"

mod kpi;
mod online;

pub use kpi::ScheduleKpi;
pub use online::OnlineScheduler;
