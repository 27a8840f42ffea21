//! Solver integration contract.
//!
//! The offline builder hands a [`BinaryModel`] to a [`BinarySolver`] and gets
//! back a status plus a 0/1 assignment. Search internals stay behind this
//! trait.
//!
//! [`MicroLpSolver`] is the bundled implementation, backed by `good_lp` with
//! the pure-Rust `microlp` branch-and-bound engine.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use good_lp::{
    constraint, microlp, variable, Expression, ProblemVariables, ResolutionError, Solution,
    SolverModel, Variable,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use super::model::{BinaryModel, Sense, VarId};

/// Final status reported by a solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SolveStatus {
    /// The assignment is provably optimal.
    Optimal,
    /// A valid assignment was found but not proven optimal.
    Feasible,
    /// The solver proved that no assignment satisfies the constraints.
    Infeasible,
    /// No usable answer (e.g. the time limit expired first).
    Unknown,
}

impl SolveStatus {
    /// Whether the solution carries a usable assignment.
    pub fn has_assignment(&self) -> bool {
        matches!(self, SolveStatus::Optimal | SolveStatus::Feasible)
    }
}

/// Solver answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinarySolution {
    /// Outcome.
    pub status: SolveStatus,
    /// Value per variable, indexed by [`VarId`]. Empty without an assignment.
    pub values: Vec<bool>,
    /// Objective value (offset included), when an assignment exists.
    pub objective_value: Option<i64>,
}

impl BinarySolution {
    /// Solution with an assignment; the objective is evaluated on `model`.
    pub fn with_values(status: SolveStatus, values: Vec<bool>, model: &BinaryModel) -> Self {
        let objective_value = Some(model.evaluate(&values));
        Self {
            status,
            values,
            objective_value,
        }
    }

    /// Solution without an assignment.
    pub fn without_values(status: SolveStatus) -> Self {
        Self {
            status,
            values: Vec::new(),
            objective_value: None,
        }
    }

    /// Value of `var`; `false` when there is no assignment.
    pub fn value(&self, var: VarId) -> bool {
        self.values.get(var.0).copied().unwrap_or(false)
    }
}

/// Solver invocation settings.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SolverConfig {
    /// Wall-clock cap on the solve call.
    pub time_limit: Option<Duration>,
}

impl SolverConfig {
    /// Sets the time limit.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }
}

/// Failure inside a solver backend.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SolverError {
    /// The backend reported an error.
    #[error("solver backend error: {0}")]
    Backend(String),
    /// The solve worker stopped without answering.
    #[error("solver worker stopped without a result")]
    Disconnected,
    /// Too many earlier time-limited solves are still running.
    #[error("{running} solve workers still running (limit {limit})")]
    Saturated {
        /// Workers alive when the solve was requested.
        running: usize,
        /// Configured cap.
        limit: usize,
    },
}

/// An exact (or anytime) 0–1 optimization engine.
///
/// `solve` is one blocking call. Implementations honour
/// `config.time_limit` by returning [`SolveStatus::Feasible`] or
/// [`SolveStatus::Unknown`] when the limit expires.
pub trait BinarySolver: Send + Sync {
    /// Solver name.
    fn name(&self) -> &'static str;

    /// Maximizes `model`.
    fn solve(
        &self,
        model: &BinaryModel,
        config: &SolverConfig,
    ) -> Result<BinarySolution, SolverError>;
}

/// Default cap on concurrently running time-limited solve workers.
pub const DEFAULT_MAX_WORKERS: usize = 4;

/// `good_lp` + `microlp` branch-and-bound solver.
///
/// microlp has no native time limit. With a limit set, the solve runs on a
/// worker thread and the caller stops waiting when the limit expires. The
/// worker cannot be cancelled: it keeps running on its copy of the model
/// until microlp finishes, and its late answer is dropped.
///
/// Workers left behind by expired limits count against `max_workers`
/// (shared by clones of the solver). Once the cap is reached, further
/// time-limited solves fail with [`SolverError::Saturated`] instead of
/// spawning another thread. Solves without a limit run inline and are not
/// capped.
#[derive(Debug, Clone)]
pub struct MicroLpSolver {
    running: Arc<AtomicUsize>,
    max_workers: usize,
}

impl Default for MicroLpSolver {
    fn default() -> Self {
        Self {
            running: Arc::new(AtomicUsize::new(0)),
            max_workers: DEFAULT_MAX_WORKERS,
        }
    }
}

impl MicroLpSolver {
    /// Creates the solver with [`DEFAULT_MAX_WORKERS`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the cap on running time-limited workers.
    pub fn with_max_workers(mut self, max_workers: usize) -> Self {
        self.max_workers = max_workers;
        self
    }

    /// Time-limited workers currently alive, including abandoned ones.
    pub fn running_workers(&self) -> usize {
        self.running.load(Ordering::Acquire)
    }

    fn reserve_worker(&self) -> Result<WorkerSlot, SolverError> {
        self.running
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| {
                (n < self.max_workers).then_some(n + 1)
            })
            .map(|_| WorkerSlot(Arc::clone(&self.running)))
            .map_err(|running| SolverError::Saturated {
                running,
                limit: self.max_workers,
            })
    }
}

/// Releases a worker reservation when dropped.
struct WorkerSlot(Arc<AtomicUsize>);

impl Drop for WorkerSlot {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::AcqRel);
    }
}

impl BinarySolver for MicroLpSolver {
    fn name(&self) -> &'static str {
        "microlp"
    }

    fn solve(
        &self,
        model: &BinaryModel,
        config: &SolverConfig,
    ) -> Result<BinarySolution, SolverError> {
        let Some(limit) = config.time_limit else {
            return solve_blocking(model);
        };

        let slot = self.reserve_worker().inspect_err(|e| {
            warn!(error = %e, "microlp worker cap reached");
        })?;

        let (tx, rx) = mpsc::channel();
        let owned = model.clone();
        thread::Builder::new()
            .name("microlp-solve".into())
            .spawn(move || {
                let answer = solve_blocking(&owned);
                // The slot is free before the answer can be received.
                drop(slot);
                let _ = tx.send(answer);
            })
            .map_err(|e| SolverError::Backend(e.to_string()))?;

        match rx.recv_timeout(limit) {
            Ok(answer) => answer,
            Err(RecvTimeoutError::Timeout) => {
                debug!(
                    limit_ms = limit.as_millis() as u64,
                    running = self.running_workers(),
                    "microlp time limit expired; worker left running"
                );
                Ok(BinarySolution::without_values(SolveStatus::Unknown))
            }
            Err(RecvTimeoutError::Disconnected) => Err(SolverError::Disconnected),
        }
    }
}

fn linear_expression(terms: &[(VarId, i64)], vars: &[Variable]) -> Expression {
    terms.iter().fold(Expression::from(0.0), |acc, &(var, coeff)| {
        acc + vars[var.0] * (coeff as f64)
    })
}

fn solve_blocking(model: &BinaryModel) -> Result<BinarySolution, SolverError> {
    let mut problem_vars = ProblemVariables::new();
    let vars: Vec<Variable> = model
        .variables
        .iter()
        .map(|v| problem_vars.add(variable().binary().name(v.name.clone())))
        .collect();

    let objective = linear_expression(&model.objective, &vars);
    let mut problem = problem_vars.maximise(objective).using(microlp);

    for c in &model.constraints {
        let lhs = linear_expression(&c.terms, &vars);
        let rhs = c.rhs as f64;
        problem = problem.with(match c.sense {
            Sense::LessEq => constraint!(lhs <= rhs),
            Sense::Equal => constraint!(lhs == rhs),
        });
    }

    match problem.solve() {
        Ok(solution) => {
            let values = vars.iter().map(|&v| solution.value(v) > 0.5).collect();
            Ok(BinarySolution::with_values(SolveStatus::Optimal, values, model))
        }
        Err(ResolutionError::Infeasible) => {
            Ok(BinarySolution::without_values(SolveStatus::Infeasible))
        }
        Err(e) => Err(SolverError::Backend(e.to_string())),
    }
}
