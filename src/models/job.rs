//! Job model.
//!
//! A job is a unit of preemptible work that must receive `processing_time`
//! unit slots inside its window `[release_time, deadline]` to earn its reward.
//! Missing the deadline costs the penalty instead.
//!
//! # Reference
//! Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 3.2

use serde::{Deserialize, Serialize};

/// Stable job identifier.
pub type JobId = u32;

/// A job to be scheduled on the single resource.
///
/// # Time Representation
/// Time is discrete. Slots are numbered from 1; a job may run in any slot
/// `t` with `release_time <= t <= deadline`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    /// Unique job identifier.
    pub id: JobId,
    /// Total number of slots the job needs.
    pub processing_time: u32,
    /// Earliest slot in which the job may run.
    pub release_time: u32,
    /// Latest slot in which the job may run.
    pub deadline: u32,
    /// Earned iff the job completes by its deadline.
    pub reward: i64,
    /// Deducted iff the job does not complete by its deadline.
    pub penalty: i64,
}

impl Job {
    /// Creates a job with zero reward and penalty.
    pub fn new(id: JobId, processing_time: u32, release_time: u32, deadline: u32) -> Self {
        Self {
            id,
            processing_time,
            release_time,
            deadline,
            reward: 0,
            penalty: 0,
        }
    }

    /// Sets the completion reward.
    pub fn with_reward(mut self, reward: i64) -> Self {
        self.reward = reward;
        self
    }

    /// Sets the miss penalty.
    pub fn with_penalty(mut self, penalty: i64) -> Self {
        self.penalty = penalty;
        self
    }

    /// Number of slots in `[release_time, deadline]`.
    #[inline]
    pub fn window_len(&self) -> u32 {
        self.deadline
            .checked_sub(self.release_time)
            .map_or(0, |span| span.saturating_add(1))
    }

    /// Whether the window is long enough to fit the processing time.
    #[inline]
    pub fn can_ever_complete(&self) -> bool {
        self.window_len() >= self.processing_time
    }

    /// Difference between completing and failing: `reward + penalty`.
    ///
    /// Saturates; validated instances keep the sum of all swings in range.
    #[inline]
    pub fn profit_swing(&self) -> i64 {
        self.reward.saturating_add(self.penalty)
    }

    /// Window clipped to the schedulable slots `1..=horizon`.
    ///
    /// Returns `None` when no slot of the window lies within the horizon.
    pub fn effective_window(&self, horizon: u32) -> Option<(u32, u32)> {
        let start = self.release_time.max(1);
        let end = self.deadline.min(horizon);
        (start <= end).then_some((start, end))
    }
}

/// Per-run simulation state of a job.
///
/// Each scheduler run owns its own `JobState` values; the instance a run was
/// created from is never touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JobState {
    /// The immutable job description.
    pub job: Job,
    /// Slots still needed for completion.
    pub remaining_processing: u32,
}

impl JobState {
    /// Fresh state with the full processing requirement outstanding.
    pub fn new(job: Job) -> Self {
        Self {
            job,
            remaining_processing: job.processing_time,
        }
    }

    /// Job identifier.
    #[inline]
    pub fn id(&self) -> JobId {
        self.job.id
    }

    /// Whether every required slot has been executed.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.remaining_processing == 0
    }

    /// Whether the job may still occupy slot `t`.
    #[inline]
    pub fn is_eligible(&self, t: u32) -> bool {
        self.remaining_processing > 0 && self.job.deadline >= t
    }

    /// Whether the remaining work still fits before the deadline when
    /// started at slot `t`.
    #[inline]
    pub fn fits_from(&self, t: u32) -> bool {
        u64::from(t) + u64::from(self.remaining_processing) <= u64::from(self.job.deadline) + 1
    }

    /// Slots left until (and including) the deadline, counted from `t`.
    #[inline]
    pub fn slack_slots(&self, t: u32) -> u32 {
        self.job
            .deadline
            .checked_sub(t)
            .map_or(0, |span| span.saturating_add(1))
    }
}
