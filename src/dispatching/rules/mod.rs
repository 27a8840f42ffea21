//! Built-in selection policies.
//!
//! # Policies
//!
//! - **EDF**: earliest deadline first
//! - **Profit-aware EDF**: weighted trade-off between profit potential and deadline
//! - **Threshold EDF**: profit density plus an urgency term that grows near the deadline
//! - **Preemptive EDF**: value per remaining slot and per slack slot, restricted to
//!   jobs that can still finish
//!
//! # Tie-breaking
//! Every policy is deterministic: equal scores resolve to the smallest job ID.
//!
//! # References
//! - Liu & Layland (1973), EDF optimality for feasible task sets
//! - Koren & Shasha (1995), "D-over: An Optimal On-line Scheduling Algorithm for Overloaded Uniprocessor Real-Time Systems"

use serde::{Deserialize, Serialize};

use super::{select_max, DispatchContext, PolicyScore, SelectionPolicy};
use crate::models::{JobId, JobState};

/// Earliest Deadline First.
///
/// Runs the eligible job with the smallest deadline; equal deadlines go to
/// the smallest ID.
///
/// # Reference
/// Liu & Layland (1973): optimal on a single preemptive resource whenever
/// every job can meet its deadline.
#[derive(Debug, Clone, Copy, Default)]
pub struct Edf;

impl SelectionPolicy for Edf {
    fn name(&self) -> &'static str {
        "EDF"
    }

    fn select(&self, _ctx: &DispatchContext, eligible: &[JobState]) -> Option<JobId> {
        eligible
            .iter()
            .min_by_key(|s| (s.job.deadline, s.id()))
            .map(JobState::id)
    }

    fn description(&self) -> &'static str {
        "Earliest Deadline First"
    }
}

/// Profit-aware EDF.
///
/// Score = `w_profit · (reward + penalty) − w_deadline · deadline`.
/// The first term favours jobs with a large swing between completing and
/// failing; the second favours early deadlines.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProfitAwareEdf {
    /// Weight on profit potential.
    pub w_profit: f64,
    /// Weight on urgency.
    pub w_deadline: f64,
}

impl Default for ProfitAwareEdf {
    fn default() -> Self {
        Self {
            w_profit: 1.0,
            w_deadline: 0.1,
        }
    }
}

impl ProfitAwareEdf {
    /// Creates the policy with explicit weights.
    pub fn new(w_profit: f64, w_deadline: f64) -> Self {
        Self {
            w_profit,
            w_deadline,
        }
    }

    fn score(&self, state: &JobState) -> PolicyScore {
        self.w_profit * state.job.profit_swing() as f64
            - self.w_deadline * state.job.deadline as f64
    }
}

impl SelectionPolicy for ProfitAwareEdf {
    fn name(&self) -> &'static str {
        "Profit-Aware EDF"
    }

    fn select(&self, _ctx: &DispatchContext, eligible: &[JobState]) -> Option<JobId> {
        select_max(eligible, |s| self.score(s))
    }

    fn description(&self) -> &'static str {
        "Weighted profit potential minus weighted deadline"
    }
}

/// Threshold-weighted EDF.
///
/// Score = `(reward + penalty) / processing_time + urgency_weight / (deadline − t + 1)`.
/// The urgency term reaches `urgency_weight` in the deadline slot, so jobs
/// about to expire overtake denser work only when the weight is large enough.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdEdf {
    /// Weight on the urgency term.
    pub urgency_weight: f64,
}

impl Default for ThresholdEdf {
    fn default() -> Self {
        Self {
            urgency_weight: 1.0,
        }
    }
}

impl ThresholdEdf {
    /// Creates the policy with an explicit urgency weight.
    pub fn new(urgency_weight: f64) -> Self {
        Self { urgency_weight }
    }

    fn score(&self, state: &JobState, t: u32) -> PolicyScore {
        let density = state.job.profit_swing() as f64 / state.job.processing_time as f64;
        let urgency = self.urgency_weight / state.slack_slots(t) as f64;
        density + urgency
    }
}

impl SelectionPolicy for ThresholdEdf {
    fn name(&self) -> &'static str {
        "Threshold EDF"
    }

    fn select(&self, ctx: &DispatchContext, eligible: &[JobState]) -> Option<JobId> {
        select_max(eligible, |s| self.score(s, ctx.current_time))
    }

    fn description(&self) -> &'static str {
        "Profit density plus deadline urgency"
    }
}

/// Preemptive replacement EDF.
///
/// Candidates are eligible jobs whose remaining work still fits before the
/// deadline, plus the running job even if it no longer fits. Score =
/// `(reward + penalty) / ((deadline − t + 1) · remaining)`. Picking a
/// different job than the running one preempts it; the switch itself is free.
#[derive(Debug, Clone, Copy, Default)]
pub struct PreemptiveEdf;

impl PreemptiveEdf {
    fn score(state: &JobState, t: u32) -> PolicyScore {
        let denominator = state.slack_slots(t) as f64 * state.remaining_processing as f64;
        state.job.profit_swing() as f64 / denominator
    }
}

impl SelectionPolicy for PreemptiveEdf {
    fn name(&self) -> &'static str {
        "Preemptive EDF"
    }

    fn select(&self, ctx: &DispatchContext, eligible: &[JobState]) -> Option<JobId> {
        let t = ctx.current_time;
        let candidates = eligible
            .iter()
            .filter(|s| s.fits_from(t) || ctx.running == Some(s.id()));
        select_max(candidates, |s| Self::score(s, t))
    }

    fn description(&self) -> &'static str {
        "Value per remaining and slack slot among jobs that can still finish"
    }
}
