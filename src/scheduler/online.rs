//! Discrete-time online scheduler.
//!
//! # Algorithm
//!
//! For every slot `t = 1..=T_max`:
//! 1. Admit jobs with `release_time == t`.
//! 2. Ask the policy to pick among the eligible active jobs.
//! 3. Run the picked job for one slot.
//! 4. Retire jobs that finished or whose deadline is behind `t`.
//!
//! After the last slot a job is completed iff no work remains.
//!
//! # Complexity
//! O(T_max · (n + cost of the policy)) where n = number of jobs.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use tracing::{debug, trace, warn};

use crate::dispatching::{DispatchContext, SelectionPolicy};
use crate::models::{Instance, JobId, JobState, ScheduleResult};

/// Slot-by-slot simulator driven by a [`SelectionPolicy`].
///
/// Each run works on its own copy of the job state, so one scheduler (or one
/// instance) can serve any number of runs, including concurrent ones.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use u_deadline::dispatching::rules::Edf;
/// use u_deadline::models::{Instance, Job};
/// use u_deadline::scheduler::OnlineScheduler;
///
/// let jobs = vec![
///     Job::new(1, 2, 1, 3).with_reward(5).with_penalty(1),
///     Job::new(2, 1, 1, 1).with_reward(2).with_penalty(4),
/// ];
/// let instance = Instance::with_default_horizon("demo", jobs).unwrap();
///
/// let result = OnlineScheduler::new(Arc::new(Edf)).run(&instance);
/// assert_eq!(result.job_at(1), Some(2));
/// assert_eq!(result.total_profit, 7);
/// ```
#[derive(Debug, Clone)]
pub struct OnlineScheduler {
    policy: Arc<dyn SelectionPolicy>,
}

impl OnlineScheduler {
    /// Creates a scheduler for the given policy.
    pub fn new(policy: Arc<dyn SelectionPolicy>) -> Self {
        Self { policy }
    }

    /// The policy driving this scheduler.
    pub fn policy(&self) -> &dyn SelectionPolicy {
        self.policy.as_ref()
    }

    /// Simulates the instance over its own horizon.
    pub fn run(&self, instance: &Instance) -> ScheduleResult {
        self.run_with_horizon(instance, instance.horizon)
    }

    /// Simulates the instance over slots `1..=horizon`.
    ///
    /// Jobs released after `horizon` are never admitted and end up failed.
    pub fn run_with_horizon(&self, instance: &Instance, horizon: u32) -> ScheduleResult {
        let mut states = instance.initial_states();
        let mut active: Vec<usize> = Vec::new();
        let mut eligible: Vec<JobState> = Vec::new();
        let mut slots: BTreeMap<u32, JobId> = BTreeMap::new();
        let mut running: Option<JobId> = None;

        debug!(
            policy = self.policy.name(),
            instance = %instance.name,
            jobs = states.len(),
            horizon,
            "online run started"
        );

        for t in 1..=horizon {
            // Admission
            active.extend(
                states
                    .iter()
                    .enumerate()
                    .filter(|(_, s)| s.job.release_time == t)
                    .map(|(idx, _)| idx),
            );

            // Selection
            eligible.clear();
            eligible.extend(active.iter().map(|&idx| states[idx]).filter(|s| s.is_eligible(t)));
            let ctx = DispatchContext::at_time(t).with_running(running);
            let selected = self.policy.select(&ctx, &eligible);

            // Execution
            if let Some(id) = selected {
                match active
                    .iter()
                    .copied()
                    .find(|&idx| states[idx].id() == id && states[idx].is_eligible(t))
                {
                    Some(idx) => {
                        states[idx].remaining_processing -= 1;
                        slots.insert(t, id);
                        if running.is_some_and(|r| r != id) {
                            trace!(t, from = ?running, to = id, "preempted");
                        }
                        running = Some(id);
                        trace!(
                            t,
                            job = id,
                            remaining = states[idx].remaining_processing,
                            "executed"
                        );
                    }
                    None => {
                        warn!(
                            t,
                            job = id,
                            policy = self.policy.name(),
                            "policy selected an ineligible job; slot left idle"
                        );
                    }
                }
            }

            // Retirement
            active.retain(|&idx| states[idx].is_eligible(t));
            if running.is_some_and(|r| !active.iter().any(|&idx| states[idx].id() == r)) {
                running = None;
            }
        }

        let completed: BTreeSet<JobId> = states
            .iter()
            .filter(|s| s.is_complete())
            .map(JobState::id)
            .collect();
        let result = ScheduleResult::from_completion(instance.jobs(), slots, completed);

        debug!(
            policy = self.policy.name(),
            completed = result.completed.len(),
            failed = result.failed.len(),
            profit = result.total_profit,
            "online run finished"
        );

        result
    }
}
