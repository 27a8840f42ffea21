//! Online selection policies.
//!
//! A policy decides, at one slot, which eligible job occupies the resource.
//! Policies see only the jobs revealed so far and the job that ran in the
//! previous slot; they never mutate state. The caller applies the decision.
//!
//! # Usage
//!
//! ```
//! use u_deadline::dispatching::{DispatchContext, SelectionPolicy};
//! use u_deadline::dispatching::rules;
//! use u_deadline::models::{Job, JobState};
//!
//! let eligible = vec![
//!     JobState::new(Job::new(1, 2, 1, 9)),
//!     JobState::new(Job::new(2, 1, 1, 4)),
//! ];
//! let ctx = DispatchContext::at_time(1);
//! assert_eq!(rules::Edf.select(&ctx, &eligible), Some(2));
//! ```
//!
//! # References
//!
//! - Liu & Layland (1973), "Scheduling Algorithms for Multiprogramming in a Hard-Real-Time Environment"
//! - Baruah et al. (1992), "On the Competitiveness of On-Line Real-Time Task Scheduling"

mod context;
mod registry;
pub mod rules;

pub use context::DispatchContext;
pub use registry::{PolicyConfig, PolicyKind, PolicyRegistry};

use crate::models::{JobId, JobState};
use std::fmt::Debug;

/// Score computed by a maximizing policy.
///
/// **Higher score = higher priority.**
pub type PolicyScore = f64;

/// Scores closer than this are treated as equal.
pub const SCORE_EPSILON: f64 = 1e-9;

/// A policy that picks the job to run in the current slot.
///
/// `eligible` holds only jobs that are released, unfinished, and whose
/// deadline is not yet past. Returning `None` idles the resource.
pub trait SelectionPolicy: Send + Sync + Debug {
    /// Policy name (e.g., "EDF").
    fn name(&self) -> &'static str;

    /// Selects the job to run at `ctx.current_time`.
    fn select(&self, ctx: &DispatchContext, eligible: &[JobState]) -> Option<JobId>;

    /// Policy description.
    fn description(&self) -> &'static str {
        self.name()
    }
}

/// Returns the job with the highest score.
///
/// Scores within [`SCORE_EPSILON`] tie; ties go to the smallest job ID, so
/// the outcome does not depend on the order of `candidates`.
pub fn select_max<'a, I, F>(candidates: I, mut score: F) -> Option<JobId>
where
    I: IntoIterator<Item = &'a JobState>,
    F: FnMut(&JobState) -> PolicyScore,
{
    let mut best: Option<(PolicyScore, JobId)> = None;

    for state in candidates {
        let s = score(state);
        let id = state.id();
        best = match best {
            None => Some((s, id)),
            Some((best_score, best_id)) => {
                let replace = if (s - best_score).abs() > SCORE_EPSILON {
                    s > best_score
                } else {
                    id < best_id
                };
                if replace {
                    Some((s, id))
                } else {
                    Some((best_score, best_id))
                }
            }
        };
    }

    best.map(|(_, id)| id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Job;

    fn state(id: JobId) -> JobState {
        JobState::new(Job::new(id, 1, 1, 5))
    }

    #[test]
    fn test_select_max_highest_wins() {
        let states = vec![state(1), state(2), state(3)];
        let picked = select_max(&states, |s| s.id() as f64 * if s.id() == 2 { 10.0 } else { 1.0 });
        assert_eq!(picked, Some(2));
    }

    #[test]
    fn test_select_max_tie_goes_to_smallest_id() {
        let forward = vec![state(4), state(2), state(9)];
        let backward = vec![state(9), state(2), state(4)];

        assert_eq!(select_max(&forward, |_| 1.0), Some(2));
        assert_eq!(select_max(&backward, |_| 1.0), Some(2));
    }

    #[test]
    fn test_select_max_epsilon_tie() {
        let states = vec![state(5), state(3)];
        let picked = select_max(&states, |s| if s.id() == 5 { 1.0 + 1e-12 } else { 1.0 });
        assert_eq!(picked, Some(3));
    }

    #[test]
    fn test_select_max_empty() {
        let states: Vec<JobState> = Vec::new();
        assert_eq!(select_max(&states, |_| 0.0), None);
    }
}
