//! Online-versus-offline comparison experiments.
//!
//! Runs the offline optimum and every registered policy on the same
//! instance and reports each policy's profit relative to the optimum.
//!
//! # Competitive Ratio
//!
//! `ratio = online_profit / offline_profit`. Profits can be negative, so the
//! ratio is not confined to `[0, 1]`; it is `None` when the offline profit
//! is 0.
//!
//! # Reference
//! Borodin & El-Yaniv (1998), "Online Computation and Competitive Analysis", Ch. 1

use std::panic;
use std::thread;

use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::Serialize;
use tracing::{debug, info};

use crate::dispatching::PolicyRegistry;
use crate::error::ScheduleError;
use crate::generator::InstanceGenerator;
use crate::models::{Instance, ScheduleResult};
use crate::offline::{solve_offline_with, BinarySolver, OfflineOptions, SolveStatus};
use crate::scheduler::{OnlineScheduler, ScheduleKpi};

/// One policy's run on an instance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PolicyOutcome {
    /// Registry name.
    pub name: String,
    /// The schedule.
    pub result: ScheduleResult,
    /// Metrics of the schedule.
    pub kpi: ScheduleKpi,
    /// `online / offline` profit; `None` when the offline profit is 0.
    pub ratio: Option<f64>,
}

/// The offline optimum's run on an instance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OfflineSummary {
    /// The schedule.
    pub result: ScheduleResult,
    /// Metrics of the schedule.
    pub kpi: ScheduleKpi,
    /// Solver status.
    pub status: SolveStatus,
    /// Time spent in the solver.
    pub elapsed_ms: u64,
    /// Model size.
    pub variable_count: usize,
    /// Model size.
    pub constraint_count: usize,
}

/// Full comparison on one instance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonReport {
    /// Instance name.
    pub instance_name: String,
    /// Number of jobs.
    pub job_count: usize,
    /// T_max.
    pub horizon: u32,
    /// Externally supplied offline profit, echoed unchanged.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub baseline_profit: Option<i64>,
    /// Offline optimum.
    pub offline: OfflineSummary,
    /// Policies in registry order.
    pub policies: Vec<PolicyOutcome>,
}

impl ComparisonReport {
    /// Offline profit.
    pub fn offline_profit(&self) -> i64 {
        self.offline.result.total_profit
    }

    /// Outcome of the named policy.
    pub fn policy(&self, name: &str) -> Option<&PolicyOutcome> {
        self.policies.iter().find(|p| p.name == name)
    }

    /// One human-readable line per run.
    pub fn summary_lines(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(self.policies.len() + 2);
        lines.push(format!(
            "{}: {} jobs, horizon {}",
            self.instance_name, self.job_count, self.horizon
        ));

        let optimality = if self.offline.result.proven_optimal {
            "optimal"
        } else {
            "not proven optimal"
        };
        let baseline = self
            .baseline_profit
            .map(|b| format!(", baseline {b}"))
            .unwrap_or_default();
        lines.push(format!(
            "  {:<18} profit {:>8}  ({optimality}{baseline})",
            "offline",
            self.offline_profit()
        ));

        for p in &self.policies {
            let ratio = p
                .ratio
                .map(|r| format!("{r:.3}"))
                .unwrap_or_else(|| "n/a".to_string());
            lines.push(format!(
                "  {:<18} profit {:>8}  ratio {ratio}",
                p.name, p.result.total_profit
            ));
        }
        lines
    }
}

/// `online / offline`, or `None` when the offline profit is 0.
pub fn competitive_ratio(online: i64, offline: i64) -> Option<f64> {
    (offline != 0).then(|| online as f64 / offline as f64)
}

/// Runs every registered policy on the instance, one thread per policy.
///
/// Results are returned in registry order. Runs share nothing mutable; each
/// works on its own copy of the job state.
pub fn run_policies(
    instance: &Instance,
    registry: &PolicyRegistry,
) -> Vec<(String, ScheduleResult)> {
    thread::scope(|scope| {
        let handles: Vec<_> = registry
            .iter()
            .map(|(name, policy)| {
                let scheduler = OnlineScheduler::new(policy.clone());
                let name = name.to_string();
                scope.spawn(move || {
                    let result = scheduler.run(instance);
                    (name, result)
                })
            })
            .collect();

        handles
            .into_iter()
            .map(|handle| match handle.join() {
                Ok(run) => run,
                Err(payload) => panic::resume_unwind(payload),
            })
            .collect()
    })
}

/// Compares the offline optimum with every registered policy.
pub fn compare_policies<S: BinarySolver + ?Sized>(
    instance: &Instance,
    registry: &PolicyRegistry,
    solver: &S,
    options: &OfflineOptions,
) -> Result<ComparisonReport, ScheduleError> {
    debug!(
        instance = %instance.name,
        jobs = instance.job_count(),
        policies = registry.len(),
        "comparison started"
    );

    let offline = solve_offline_with(instance, solver, options)?;
    let offline_profit = offline.result.total_profit;

    let policies: Vec<PolicyOutcome> = run_policies(instance, registry)
        .into_iter()
        .map(|(name, result)| PolicyOutcome {
            ratio: competitive_ratio(result.total_profit, offline_profit),
            kpi: ScheduleKpi::calculate(&result, instance),
            name,
            result,
        })
        .collect();

    for p in &policies {
        info!(
            instance = %instance.name,
            policy = %p.name,
            profit = p.result.total_profit,
            offline = offline_profit,
            ratio = ?p.ratio,
            "policy evaluated"
        );
    }

    Ok(ComparisonReport {
        instance_name: instance.name.clone(),
        job_count: instance.job_count(),
        horizon: instance.horizon,
        baseline_profit: instance.baseline_profit,
        offline: OfflineSummary {
            kpi: ScheduleKpi::calculate(&offline.result, instance),
            result: offline.result,
            status: offline.status,
            elapsed_ms: offline.elapsed.as_millis() as u64,
            variable_count: offline.variable_count,
            constraint_count: offline.constraint_count,
        },
        policies,
    })
}

/// Generates one instance per entry of `job_counts` and compares each.
///
/// All instances draw from a single RNG stream seeded with `seed`, so a
/// sweep is reproducible as a whole.
pub fn sweep<S: BinarySolver + ?Sized>(
    generator: &InstanceGenerator,
    job_counts: &[usize],
    seed: u64,
    registry: &PolicyRegistry,
    solver: &S,
    options: &OfflineOptions,
) -> Result<Vec<ComparisonReport>, ScheduleError> {
    let mut rng = SmallRng::seed_from_u64(seed);
    job_counts
        .iter()
        .map(|&n| {
            let instance = generator.generate(n, &mut rng)?;
            compare_policies(&instance, registry, solver, options)
        })
        .collect()
}
