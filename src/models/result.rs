//! Schedule result model.
//!
//! Uniform output of both the online simulator and the offline optimum:
//! which job occupies each slot, which jobs completed, which failed, and the
//! resulting profit.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use super::{Job, JobId};

/// Outcome of one scheduling run.
///
/// # Invariants
/// - `completed` and `failed` are disjoint and together hold every job ID.
/// - `total_profit == Σ reward(completed) − Σ penalty(failed)`.
/// - Each slot maps to at most one job (enforced by the map itself).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleResult {
    /// Slot → job occupying it. Idle slots are absent.
    pub slots: BTreeMap<u32, JobId>,
    /// Jobs fully processed by their deadline.
    pub completed: BTreeSet<JobId>,
    /// Jobs not fully processed by their deadline.
    pub failed: BTreeSet<JobId>,
    /// `Σ reward(completed) − Σ penalty(failed)`.
    pub total_profit: i64,
    /// Set only when an exact solver proved the schedule optimal.
    pub proven_optimal: bool,
}

impl ScheduleResult {
    /// Builds a result from a slot assignment and the completed set.
    ///
    /// Every job not in `completed` is failed; the profit is derived from
    /// the two sets.
    pub fn from_completion(
        jobs: &[Job],
        slots: BTreeMap<u32, JobId>,
        completed: BTreeSet<JobId>,
    ) -> Self {
        let failed: BTreeSet<JobId> = jobs
            .iter()
            .map(|j| j.id)
            .filter(|id| !completed.contains(id))
            .collect();

        let mut result = Self {
            slots,
            completed,
            failed,
            total_profit: 0,
            proven_optimal: false,
        };
        result.total_profit = result.recompute_profit(jobs);
        result
    }

    /// The "complete nothing" result: empty schedule, every job failed.
    pub fn nothing_completed(jobs: &[Job]) -> Self {
        Self::from_completion(jobs, BTreeMap::new(), BTreeSet::new())
    }

    /// Marks the result as proven optimal.
    pub fn with_proven_optimal(mut self, proven_optimal: bool) -> Self {
        self.proven_optimal = proven_optimal;
        self
    }

    /// Job occupying `slot`, if any.
    pub fn job_at(&self, slot: u32) -> Option<JobId> {
        self.slots.get(&slot).copied()
    }

    /// Number of occupied slots.
    pub fn busy_slots(&self) -> usize {
        self.slots.len()
    }

    /// Whether `id` completed.
    pub fn is_completed(&self, id: JobId) -> bool {
        self.completed.contains(&id)
    }

    /// Slots assigned to `id`, ascending.
    pub fn slots_of(&self, id: JobId) -> Vec<u32> {
        self.slots
            .iter()
            .filter(|(_, &job)| job == id)
            .map(|(&slot, _)| slot)
            .collect()
    }

    /// Recomputes `Σ reward(completed) − Σ penalty(failed)` from `jobs`.
    pub fn recompute_profit(&self, jobs: &[Job]) -> i64 {
        jobs.iter()
            .map(|j| {
                if self.completed.contains(&j.id) {
                    j.reward
                } else if self.failed.contains(&j.id) {
                    -j.penalty
                } else {
                    0
                }
            })
            .sum()
    }

    /// Whether `completed ∪ failed` is exactly the job set and the two are
    /// disjoint.
    pub fn partitions(&self, jobs: &[Job]) -> bool {
        self.completed.is_disjoint(&self.failed)
            && self.completed.len() + self.failed.len() == jobs.len()
            && jobs
                .iter()
                .all(|j| self.completed.contains(&j.id) || self.failed.contains(&j.id))
    }
}
