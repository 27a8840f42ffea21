//! Schedule quality metrics (KPIs).
//!
//! Computes profit and resource indicators from a finished run and its
//! instance.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Total Profit | Σ reward(completed) − Σ penalty(failed) |
//! | Earned Reward | Σ reward(completed) |
//! | Incurred Penalty | Σ penalty(failed) |
//! | Completion Rate | completed / jobs |
//! | Utilization | busy slots / horizon |
//! | Preemptions | times a job resumes after another job ran in between |
//!
//! # Reference
//! Pinedo (2016), "Scheduling", Ch. 1.2: Performance Measures

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::models::{Instance, JobId, ScheduleResult};

/// Schedule performance indicators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleKpi {
    /// Net profit.
    pub total_profit: i64,
    /// Reward collected from completed jobs.
    pub earned_reward: i64,
    /// Penalty paid for failed jobs.
    pub incurred_penalty: i64,
    /// Number of completed jobs.
    pub completed_count: usize,
    /// Number of failed jobs.
    pub failed_count: usize,
    /// Fraction of jobs completed (0.0..1.0). 1.0 for an empty instance.
    pub completion_rate: f64,
    /// Occupied slots.
    pub busy_slots: usize,
    /// Busy slots over the horizon (0.0..1.0).
    pub utilization: f64,
    /// Number of resumptions after an interruption.
    pub preemptions: usize,
}

impl ScheduleKpi {
    /// Computes KPIs from a result and the instance it was produced from,
    /// over the instance horizon.
    pub fn calculate(result: &ScheduleResult, instance: &Instance) -> Self {
        Self::calculate_with_horizon(result, instance, instance.horizon)
    }

    /// Computes KPIs with utilization measured over slots `1..=horizon`.
    ///
    /// Use this for results of
    /// [`OnlineScheduler::run_with_horizon`](crate::scheduler::OnlineScheduler::run_with_horizon).
    pub fn calculate_with_horizon(
        result: &ScheduleResult,
        instance: &Instance,
        horizon: u32,
    ) -> Self {
        let mut earned_reward = 0;
        let mut incurred_penalty = 0;
        for job in instance.jobs() {
            if result.completed.contains(&job.id) {
                earned_reward += job.reward;
            } else {
                incurred_penalty += job.penalty;
            }
        }

        let job_count = instance.job_count();
        let completion_rate = if job_count == 0 {
            1.0
        } else {
            result.completed.len() as f64 / job_count as f64
        };

        let busy_slots = result.busy_slots();
        let utilization = if horizon == 0 {
            0.0
        } else {
            busy_slots as f64 / horizon as f64
        };

        Self {
            total_profit: result.total_profit,
            earned_reward,
            incurred_penalty,
            completed_count: result.completed.len(),
            failed_count: result.failed.len(),
            completion_rate,
            busy_slots,
            utilization,
            preemptions: count_preemptions(result),
        }
    }
}

/// Counts resumptions: a job that ran before, was interrupted by another
/// job, and runs again. Idle gaps alone do not count.
fn count_preemptions(result: &ScheduleResult) -> usize {
    let mut started: HashSet<JobId> = HashSet::new();
    let mut previous: Option<JobId> = None;
    let mut preemptions = 0;

    for &id in result.slots.values() {
        if previous != Some(id) {
            if !started.insert(id) {
                preemptions += 1;
            }
            previous = Some(id);
        }
    }

    preemptions
}
