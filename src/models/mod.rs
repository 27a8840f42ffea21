//! Scheduling domain models.
//!
//! Provides the data types for single-resource deadline scheduling with
//! rewards and penalties, shared by the online simulator and the offline
//! optimum.
//!
//! # Domain Mappings
//!
//! | u-deadline | Real-time systems | Cloud batch | Manufacturing |
//! |------------|-------------------|-------------|---------------|
//! | Job | Task instance | Batch request | Rush order |
//! | Slot | Scheduler tick | Billing quantum | Shift hour |
//! | Reward | Value density | SLA credit | Order margin |
//! | Penalty | Miss cost | SLA refund | Late fee |

mod instance;
mod job;
mod result;

pub use instance::Instance;
pub use job::{Job, JobId, JobState};
pub use result::ScheduleResult;
