//! Single-resource deadline scheduling with rewards and penalties.
//!
//! Jobs arrive over discrete time, need a number of unit slots on one
//! preemptible resource before their deadline, earn a reward when they
//! finish in time and cost a penalty when they do not. This crate simulates
//! online dispatching policies against such workloads and computes the
//! offline optimum they are measured against.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Job`, `JobState`, `Instance`, `ScheduleResult`
//! - **`validation`**: Input integrity checks (duplicate IDs, empty work, inverted windows)
//! - **`dispatching`**: `SelectionPolicy` trait, EDF-family rules, `PolicyRegistry`
//! - **`scheduler`**: Slot-by-slot online simulator and KPIs
//! - **`offline`**: Time-indexed 0–1 model, solver contract, `good_lp` backend
//! - **`experiment`**: Online-versus-offline comparisons and sweeps
//! - **`generator`**: Seeded random instances
//! - **`config`**: JSON experiment configuration
//!
//! # Example
//!
//! ```
//! use u_deadline::dispatching::{PolicyConfig, PolicyRegistry};
//! use u_deadline::experiment::compare_policies;
//! use u_deadline::models::{Instance, Job};
//! use u_deadline::offline::{MicroLpSolver, OfflineOptions};
//!
//! let jobs = vec![
//!     Job::new(1, 3, 1, 4).with_reward(10).with_penalty(2),
//!     Job::new(2, 1, 2, 2).with_reward(1).with_penalty(1),
//! ];
//! let instance = Instance::with_default_horizon("demo", jobs).unwrap();
//! let registry = PolicyRegistry::with_defaults(&PolicyConfig::default());
//!
//! let report = compare_policies(&instance, &registry, &MicroLpSolver::new(), &OfflineOptions::default()).unwrap();
//! assert_eq!(report.offline_profit(), 11);
//! ```
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems"
//! - Liu & Layland (1973), "Scheduling Algorithms for Multiprogramming in a Hard-Real-Time Environment"
//! - Baruah et al. (1992), "On the Competitiveness of On-Line Real-Time Task Scheduling"

pub mod config;
pub mod dispatching;
pub mod error;
pub mod experiment;
pub mod generator;
pub mod models;
pub mod offline;
pub mod scheduler;
pub mod validation;

pub use error::ScheduleError;
