//! Problem instance model.
//!
//! An instance bundles a validated job set with the scheduling horizon.
//! It is built once and read-only afterwards; every scheduler run copies
//! the job state it needs.

use serde::{Deserialize, Serialize};

use super::{Job, JobId, JobState};
use crate::error::ScheduleError;
use crate::validation::validate_jobs;

/// A validated scheduling instance.
///
/// Slots `1..=horizon` are schedulable. The horizon is normally the
/// largest deadline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawInstance")]
pub struct Instance {
    /// Instance name.
    pub name: String,
    /// Jobs in input order.
    jobs: Vec<Job>,
    /// Last schedulable slot (T_max).
    pub horizon: u32,
    /// Previously known offline profit supplied with the input.
    ///
    /// Carried through for comparison only; never used in computation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub baseline_profit: Option<i64>,
}

/// Unvalidated serialized form of an [`Instance`].
#[derive(Debug, Deserialize)]
struct RawInstance {
    #[serde(default)]
    name: String,
    jobs: Vec<Job>,
    #[serde(default)]
    horizon: Option<u32>,
    #[serde(default)]
    baseline_profit: Option<i64>,
}

impl TryFrom<RawInstance> for Instance {
    type Error = ScheduleError;

    fn try_from(raw: RawInstance) -> Result<Self, Self::Error> {
        let instance = match raw.horizon {
            Some(horizon) => Instance::new(raw.name, raw.jobs, horizon)?,
            None => Instance::with_default_horizon(raw.name, raw.jobs)?,
        };
        Ok(instance.with_baseline_profit(raw.baseline_profit))
    }
}

impl Instance {
    /// Creates a validated instance with an explicit horizon.
    pub fn new(
        name: impl Into<String>,
        jobs: Vec<Job>,
        horizon: u32,
    ) -> Result<Self, ScheduleError> {
        validate_jobs(&jobs)?;
        Ok(Self {
            name: name.into(),
            jobs,
            horizon,
            baseline_profit: None,
        })
    }

    /// Creates a validated instance whose horizon is the largest deadline
    /// (0 when there are no jobs).
    pub fn with_default_horizon(
        name: impl Into<String>,
        jobs: Vec<Job>,
    ) -> Result<Self, ScheduleError> {
        let horizon = jobs.iter().map(|j| j.deadline).max().unwrap_or(0);
        Self::new(name, jobs, horizon)
    }

    /// Attaches an externally known offline profit.
    pub fn with_baseline_profit(mut self, baseline_profit: Option<i64>) -> Self {
        self.baseline_profit = baseline_profit;
        self
    }

    /// Jobs in input order.
    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    /// Looks up a job by ID.
    pub fn job(&self, id: JobId) -> Option<&Job> {
        self.jobs.iter().find(|j| j.id == id)
    }

    /// Number of jobs.
    pub fn job_count(&self) -> usize {
        self.jobs.len()
    }

    /// Whether the instance has no jobs.
    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// Sum of all penalties: the profit of completing nothing, negated.
    pub fn total_penalty(&self) -> i64 {
        self.jobs.iter().map(|j| j.penalty).sum()
    }

    /// Fresh per-run job state, one entry per job in input order.
    pub fn initial_states(&self) -> Vec<JobState> {
        self.jobs.iter().copied().map(JobState::new).collect()
    }
}
