//! Time-indexed offline formulation.
//!
//! Builds the 0–1 model of the single-resource profit problem, hands it to a
//! [`BinarySolver`], and decodes the answer into a [`ScheduleResult`].
//!
//! # Formulation
//!
//! - `x[j,t]` for every slot `t` of job `j`'s window clipped to `1..=T_max`
//! - `y[j]` = job `j` completes
//! - capacity: `Σ_j x[j,t] <= 1` per slot
//! - completion link: `Σ_t x[j,t] = p_j · y[j]`
//! - optional demand-bound cuts over every slot interval `[a,b]`
//! - maximize `Σ_j (w_j + l_j) · y[j]`, reported with offset `−Σ_j l_j`
//!
//! # Reference
//! - Sousa & Wolsey (1992), "A time indexed formulation of non-preemptive single machine scheduling problems"
//! - Baruah, Rosier & Howell (1990), processor demand criterion

use std::collections::{BTreeMap, BTreeSet};
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use super::model::{BinaryModel, ConstraintKind, LinearConstraint, Sense, VarId, VarKind};
use super::solver::{BinarySolver, MicroLpSolver, SolveStatus, SolverConfig};
use crate::error::ScheduleError;
use crate::models::{Instance, Job, JobId, ScheduleResult};

/// Caller-facing options for the offline solve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OfflineOptions {
    /// Emit the O(T_max²) demand-bound cuts.
    pub add_interval_cuts: bool,
    /// Wall-clock cap on the solve, in seconds.
    ///
    /// When it expires the result falls back to completing nothing. With
    /// [`MicroLpSolver`] the abandoned search keeps running in the background
    /// until it finishes; see its docs for the worker cap.
    pub time_limit_seconds: Option<f64>,
}

impl Default for OfflineOptions {
    fn default() -> Self {
        Self {
            add_interval_cuts: true,
            time_limit_seconds: None,
        }
    }
}

impl OfflineOptions {
    /// Solver settings derived from these options.
    ///
    /// Negative or non-finite limits are ignored.
    pub fn solver_config(&self) -> SolverConfig {
        SolverConfig {
            time_limit: self
                .time_limit_seconds
                .and_then(|s| Duration::try_from_secs_f64(s).ok()),
        }
    }
}

/// Decoded offline answer with solver diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct OfflineSolution {
    /// The schedule.
    pub result: ScheduleResult,
    /// Status reported by the solver.
    pub status: SolveStatus,
    /// Objective value (true profit), when the solver produced an assignment.
    pub objective_value: Option<i64>,
    /// Time spent inside the solver.
    pub elapsed: Duration,
    /// Model size.
    pub variable_count: usize,
    /// Model size.
    pub constraint_count: usize,
}

/// The built model plus the variable lookups needed to decode it.
#[derive(Debug, Clone)]
pub struct TimeIndexedModel {
    /// The solver-facing model.
    pub model: BinaryModel,
    slot_vars: BTreeMap<(JobId, u32), VarId>,
    completion_vars: BTreeMap<JobId, VarId>,
}

impl TimeIndexedModel {
    /// `x[job, slot]`, if the slot lies in the job's window.
    pub fn slot_var(&self, job: JobId, slot: u32) -> Option<VarId> {
        self.slot_vars.get(&(job, slot)).copied()
    }

    /// `y[job]`.
    pub fn completion_var(&self, job: JobId) -> Option<VarId> {
        self.completion_vars.get(&job).copied()
    }

    /// Number of `x` variables.
    pub fn slot_var_count(&self) -> usize {
        self.slot_vars.len()
    }

    /// Decodes a 0/1 assignment into a result.
    pub fn decode(&self, jobs: &[Job], values: &[bool]) -> ScheduleResult {
        let is_set = |var: VarId| values.get(var.0).copied().unwrap_or(false);

        let slots: BTreeMap<u32, JobId> = self
            .slot_vars
            .iter()
            .filter(|(_, &var)| is_set(var))
            .map(|(&(job, slot), _)| (slot, job))
            .collect();
        let completed: BTreeSet<JobId> = self
            .completion_vars
            .iter()
            .filter(|(_, &var)| is_set(var))
            .map(|(&job, _)| job)
            .collect();

        ScheduleResult::from_completion(jobs, slots, completed)
    }

    /// Encodes the completed part of a result as a 0/1 assignment.
    ///
    /// Slots of failed jobs are left out so the completion links hold. Any
    /// schedule produced by a correct scheduler encodes to a feasible point;
    /// the cuts must accept it too.
    pub fn encode(&self, result: &ScheduleResult) -> Vec<bool> {
        let mut values = vec![false; self.model.variable_count()];
        for (&slot, &job) in &result.slots {
            if !result.completed.contains(&job) {
                continue;
            }
            if let Some(var) = self.slot_var(job, slot) {
                values[var.0] = true;
            }
        }
        for &job in &result.completed {
            if let Some(var) = self.completion_var(job) {
                values[var.0] = true;
            }
        }
        values
    }
}

/// Builds the time-indexed 0–1 model from a job set.
///
/// Jobs are expected to have passed [`validate_jobs`](crate::validation::validate_jobs);
/// [`OfflineModelBuilder::from_instance`] guarantees it.
///
/// # Example
/// ```
/// use u_deadline::models::{Instance, Job};
/// use u_deadline::offline::{MicroLpSolver, OfflineModelBuilder, SolverConfig};
///
/// let jobs = vec![
///     Job::new(1, 2, 1, 2).with_reward(5).with_penalty(1),
///     Job::new(2, 1, 1, 2).with_reward(3).with_penalty(3),
/// ];
/// let instance = Instance::with_default_horizon("pair", jobs).unwrap();
/// let builder = OfflineModelBuilder::from_instance(&instance);
///
/// let solution = builder.solve(&MicroLpSolver::new(), &SolverConfig::default()).unwrap();
/// assert_eq!(solution.result.total_profit, 2);
/// ```
#[derive(Debug, Clone)]
pub struct OfflineModelBuilder<'a> {
    jobs: &'a [Job],
    horizon: u32,
    add_interval_cuts: bool,
}

impl<'a> OfflineModelBuilder<'a> {
    /// Creates a builder over slots `1..=horizon`. Cuts are enabled.
    pub fn new(jobs: &'a [Job], horizon: u32) -> Self {
        Self {
            jobs,
            horizon,
            add_interval_cuts: true,
        }
    }

    /// Creates a builder for a validated instance.
    pub fn from_instance(instance: &'a Instance) -> Self {
        Self::new(instance.jobs(), instance.horizon)
    }

    /// Enables or disables the demand-bound cuts.
    pub fn with_interval_cuts(mut self, enabled: bool) -> Self {
        self.add_interval_cuts = enabled;
        self
    }

    /// Builds the model.
    ///
    /// Creates:
    /// - `x[j,t]` only inside each job's effective window
    /// - one `y[j]` per job
    /// - one capacity constraint per slot that has any `x`
    /// - one completion link per job (or `y[j] = 0` for an empty window)
    /// - demand-bound cuts, if enabled
    pub fn build(&self) -> TimeIndexedModel {
        let mut model = BinaryModel::new("offline-profit");
        let mut slot_vars = BTreeMap::new();
        let mut completion_vars = BTreeMap::new();
        let mut per_slot: BTreeMap<u32, Vec<VarId>> = BTreeMap::new();

        for job in self.jobs {
            let y = model.add_variable(
                format!("y_{}", job.id),
                VarKind::Completion { job: job.id },
            );
            completion_vars.insert(job.id, y);

            let mut window_terms = Vec::new();
            if let Some((start, end)) = job.effective_window(self.horizon) {
                for slot in start..=end {
                    let x = model.add_variable(
                        format!("x_{}_{}", job.id, slot),
                        VarKind::Slot { job: job.id, slot },
                    );
                    slot_vars.insert((job.id, slot), x);
                    per_slot.entry(slot).or_default().push(x);
                    window_terms.push((x, 1));
                }
            }

            if window_terms.is_empty() {
                model.add_constraint(LinearConstraint {
                    kind: ConstraintKind::EmptyWindow { job: job.id },
                    terms: vec![(y, 1)],
                    sense: Sense::Equal,
                    rhs: 0,
                });
            } else {
                window_terms.push((y, -i64::from(job.processing_time)));
                model.add_constraint(LinearConstraint {
                    kind: ConstraintKind::CompletionLink { job: job.id },
                    terms: window_terms,
                    sense: Sense::Equal,
                    rhs: 0,
                });
            }
        }

        for (&slot, vars) in &per_slot {
            model.add_constraint(LinearConstraint {
                kind: ConstraintKind::Capacity { slot },
                terms: vars.iter().map(|&x| (x, 1)).collect(),
                sense: Sense::LessEq,
                rhs: 1,
            });
        }

        if self.add_interval_cuts {
            let added = self.add_demand_bound_cuts(&mut model, &completion_vars);
            debug!(cuts = added, horizon = self.horizon, "demand-bound cuts added");
        }

        model.objective = self
            .jobs
            .iter()
            .map(|job| (completion_vars[&job.id], job.profit_swing()))
            .collect();
        model.objective_offset = -self.jobs.iter().map(|j| j.penalty).sum::<i64>();

        TimeIndexedModel {
            model,
            slot_vars,
            completion_vars,
        }
    }

    /// Adds `Σ_j m_j(a,b) · y[j] <= b − a + 1` for every `1 <= a <= b <= T_max`,
    /// where `m_j(a,b)` is the work job `j` cannot place outside `[a,b]`.
    ///
    /// Cuts whose coefficients cannot exceed the capacity are implied by the
    /// bounds on `y` and are skipped. Returns the number of cuts added.
    fn add_demand_bound_cuts(
        &self,
        model: &mut BinaryModel,
        completion_vars: &BTreeMap<JobId, VarId>,
    ) -> usize {
        let mut added = 0;

        for a in 1..=self.horizon {
            for b in a..=self.horizon {
                let capacity = i64::from(b - a + 1);
                let terms: Vec<(VarId, i64)> = self
                    .jobs
                    .iter()
                    .filter_map(|job| {
                        let demand = mandatory_work(job, self.horizon, a, b);
                        (demand > 0).then(|| (completion_vars[&job.id], demand))
                    })
                    .collect();

                let total: i64 = terms.iter().map(|(_, c)| c).sum();
                if total <= capacity {
                    continue;
                }

                model.add_constraint(LinearConstraint {
                    kind: ConstraintKind::DemandBound { start: a, end: b },
                    terms,
                    sense: Sense::LessEq,
                    rhs: capacity,
                });
                added += 1;
            }
        }

        added
    }

    /// Builds, solves, and decodes.
    ///
    /// # Status handling
    /// - `Optimal` / `Feasible`: decoded; `proven_optimal` only for `Optimal`
    /// - `Infeasible`: [`ScheduleError::SolverInconsistency`] (the all-zero
    ///   assignment is always feasible)
    /// - `Unknown` or a solver error: the "complete nothing" result
    pub fn solve<S: BinarySolver + ?Sized>(
        &self,
        solver: &S,
        config: &SolverConfig,
    ) -> Result<OfflineSolution, ScheduleError> {
        if self.jobs.is_empty() {
            return Ok(OfflineSolution {
                result: ScheduleResult::default().with_proven_optimal(true),
                status: SolveStatus::Optimal,
                objective_value: Some(0),
                elapsed: Duration::ZERO,
                variable_count: 0,
                constraint_count: 0,
            });
        }

        let built = self.build();
        let variable_count = built.model.variable_count();
        let constraint_count = built.model.constraint_count();

        let started = Instant::now();
        let answer = solver.solve(&built.model, config);
        let elapsed = started.elapsed();

        let fallback = |status: SolveStatus| OfflineSolution {
            result: ScheduleResult::nothing_completed(self.jobs),
            status,
            objective_value: None,
            elapsed,
            variable_count,
            constraint_count,
        };

        let solution = match answer {
            Ok(solution) => solution,
            Err(e) => {
                warn!(
                    solver = solver.name(),
                    error = %e,
                    "offline solve failed; completing nothing"
                );
                return Ok(fallback(SolveStatus::Unknown));
            }
        };

        match solution.status {
            SolveStatus::Optimal | SolveStatus::Feasible => {
                if !built.model.is_satisfied_by(&solution.values) {
                    error!(solver = solver.name(), "solver assignment violates the model");
                    return Err(ScheduleError::SolverInconsistency(format!(
                        "{} returned an assignment that violates the model",
                        solver.name()
                    )));
                }

                let proven = solution.status == SolveStatus::Optimal;
                let result = built
                    .decode(self.jobs, &solution.values)
                    .with_proven_optimal(proven);
                let objective_value = Some(built.model.evaluate(&solution.values));
                debug_assert_eq!(objective_value, Some(result.total_profit));

                info!(
                    solver = solver.name(),
                    status = ?solution.status,
                    profit = result.total_profit,
                    completed = result.completed.len(),
                    variables = variable_count,
                    constraints = constraint_count,
                    elapsed_ms = elapsed.as_millis() as u64,
                    "offline solve finished"
                );

                Ok(OfflineSolution {
                    result,
                    status: solution.status,
                    objective_value,
                    elapsed,
                    variable_count,
                    constraint_count,
                })
            }
            SolveStatus::Infeasible => {
                error!(solver = solver.name(), "solver reported the offline model infeasible");
                Err(ScheduleError::SolverInconsistency(format!(
                    "{} reported INFEASIBLE for a model with a feasible all-zero assignment",
                    solver.name()
                )))
            }
            SolveStatus::Unknown => {
                warn!(
                    solver = solver.name(),
                    elapsed_ms = elapsed.as_millis() as u64,
                    "offline solve returned no answer; completing nothing"
                );
                Ok(fallback(SolveStatus::Unknown))
            }
        }
    }
}

/// Slots of `[a, b]` that a completed `job` must occupy: its processing time
/// minus the part of its effective window outside the interval.
fn mandatory_work(job: &Job, horizon: u32, a: u32, b: u32) -> i64 {
    let Some((start, end)) = job.effective_window(horizon) else {
        return 0;
    };
    let window = i64::from(end - start + 1);
    let lo = start.max(a);
    let hi = end.min(b);
    let overlap = if lo <= hi { i64::from(hi - lo + 1) } else { 0 };

    (i64::from(job.processing_time) - (window - overlap)).max(0)
}

/// Solves an instance with the bundled [`MicroLpSolver`].
pub fn solve_offline(
    instance: &Instance,
    options: &OfflineOptions,
) -> Result<ScheduleResult, ScheduleError> {
    solve_offline_with(instance, &MicroLpSolver::new(), options).map(|s| s.result)
}

/// Solves an instance with the given solver.
pub fn solve_offline_with<S: BinarySolver + ?Sized>(
    instance: &Instance,
    solver: &S,
    options: &OfflineOptions,
) -> Result<OfflineSolution, ScheduleError> {
    OfflineModelBuilder::from_instance(instance)
        .with_interval_cuts(options.add_interval_cuts)
        .solve(solver, &options.solver_config())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatching::{PolicyConfig, PolicyKind};
    use crate::generator::InstanceGenerator;
    use crate::offline::solver::{BinarySolution, SolverError};
    use crate::scheduler::OnlineScheduler;
    use proptest::prelude::*;

    fn job(id: JobId, r: u32, d: u32, p: u32, w: i64, l: i64) -> Job {
        Job::new(id, p, r, d).with_reward(w).with_penalty(l)
    }

    fn reference_instance() -> Instance {
        let jobs = vec![
            job(1, 1, 9, 4, 10, 10),
            job(2, 3, 5, 2, 10, 15),
            job(3, 2, 7, 5, 10, 5),
            job(4, 6, 7, 2, 1, 100),
            job(5, 2, 3, 1, 3, 1),
        ];
        Instance::new("reference", jobs, 10).unwrap()
    }

    /// Returns a fixed status without an assignment.
    struct FixedStatus(SolveStatus);

    impl BinarySolver for FixedStatus {
        fn name(&self) -> &'static str {
            "fixed"
        }

        fn solve(
            &self,
            _model: &BinaryModel,
            _config: &SolverConfig,
        ) -> Result<BinarySolution, SolverError> {
            Ok(BinarySolution::without_values(self.0))
        }
    }

    struct Broken;

    impl BinarySolver for Broken {
        fn name(&self) -> &'static str {
            "broken"
        }

        fn solve(
            &self,
            _model: &BinaryModel,
            _config: &SolverConfig,
        ) -> Result<BinarySolution, SolverError> {
            Err(SolverError::Backend("license expired".into()))
        }
    }

    /// Sets every variable to 1, which breaks capacity.
    struct AllOnes;

    impl BinarySolver for AllOnes {
        fn name(&self) -> &'static str {
            "all-ones"
        }

        fn solve(
            &self,
            model: &BinaryModel,
            _config: &SolverConfig,
        ) -> Result<BinarySolution, SolverError> {
            let values = vec![true; model.variable_count()];
            Ok(BinarySolution::with_values(SolveStatus::Feasible, values, model))
        }
    }

    /// Reports the all-zero assignment as feasible.
    struct AllZeros;

    impl BinarySolver for AllZeros {
        fn name(&self) -> &'static str {
            "all-zeros"
        }

        fn solve(
            &self,
            model: &BinaryModel,
            _config: &SolverConfig,
        ) -> Result<BinarySolution, SolverError> {
            let values = vec![false; model.variable_count()];
            Ok(BinarySolution::with_values(SolveStatus::Feasible, values, model))
        }
    }

    #[test]
    fn test_build_sizes() {
        let instance = reference_instance();
        let built = OfflineModelBuilder::from_instance(&instance)
            .with_interval_cuts(false)
            .build();

        // Windows: 9 + 3 + 6 + 2 + 2 slots, plus 5 completion variables.
        assert_eq!(built.slot_var_count(), 22);
        assert_eq!(built.model.variable_count(), 27);
        // Slots 1..=9 carry variables, slot 10 none.
        assert_eq!(
            built.model.count_constraints(|k| matches!(k, ConstraintKind::Capacity { .. })),
            9
        );
        assert_eq!(
            built.model.count_constraints(|k| matches!(k, ConstraintKind::CompletionLink { .. })),
            5
        );
        assert_eq!(built.model.constraint_count(), 14);
        assert_eq!(built.model.objective_offset, -131);
        assert!(built.slot_var(4, 5).is_none());
        assert!(built.slot_var(4, 6).is_some());
    }

    #[test]
    fn test_build_with_cuts() {
        let instance = reference_instance();
        let built = OfflineModelBuilder::from_instance(&instance).build();

        let cuts = built
            .model
            .count_constraints(|k| matches!(k, ConstraintKind::DemandBound { .. }));
        assert!(cuts > 0);

        // [3,7]: job 2 needs 2, job 3 needs 4, job 4 needs 2 → 8 > 5.
        let cut = built
            .model
            .constraints
            .iter()
            .find(|c| c.kind == ConstraintKind::DemandBound { start: 3, end: 7 })
            .unwrap();
        assert_eq!(cut.rhs, 5);
        let coeffs: Vec<i64> = cut.terms.iter().map(|(_, c)| *c).collect();
        assert_eq!(coeffs, vec![2, 4, 2]);
    }

    #[test]
    fn test_empty_window_forces_failure() {
        let jobs = vec![job(1, 12, 15, 1, 10, 4), job(2, 1, 3, 1, 1, 1)];
        let instance = Instance::new("late", jobs, 10).unwrap();
        let built = OfflineModelBuilder::from_instance(&instance).build();

        assert_eq!(
            built.model.count_constraints(|k| *k == ConstraintKind::EmptyWindow { job: 1 }),
            1
        );
        assert!(built.slot_var(1, 10).is_none());

        let result = solve_offline(&instance, &OfflineOptions::default()).unwrap();
        assert_eq!(result.failed, BTreeSet::from([1]));
        assert_eq!(result.total_profit, 1 - 4);
    }

    #[test]
    fn test_mandatory_work() {
        let long = job(1, 1, 10, 2, 0, 0);
        assert_eq!(mandatory_work(&long, 10, 1, 2), 0);
        assert_eq!(mandatory_work(&long, 10, 1, 9), 1);
        assert_eq!(mandatory_work(&long, 10, 1, 10), 2);

        let tight = job(2, 3, 5, 3, 0, 0);
        assert_eq!(mandatory_work(&tight, 10, 4, 4), 1);
        assert_eq!(mandatory_work(&tight, 10, 6, 9), 0);
    }

    #[test]
    fn test_reference_optimum() {
        let instance = reference_instance();
        let result = solve_offline(&instance, &OfflineOptions::default()).unwrap();

        assert_eq!(result.total_profit, 19);
        assert_eq!(result.completed, BTreeSet::from([1, 2, 4, 5]));
        assert_eq!(result.failed, BTreeSet::from([3]));
        assert!(result.proven_optimal);
        assert_eq!(result.busy_slots(), 9);
    }

    #[test]
    fn test_cuts_do_not_change_optimum() {
        let instance = reference_instance();
        let with_cuts = solve_offline(&instance, &OfflineOptions::default()).unwrap();
        let without_cuts = solve_offline(
            &instance,
            &OfflineOptions {
                add_interval_cuts: false,
                ..Default::default()
            },
        )
        .unwrap();

        assert_eq!(with_cuts.total_profit, without_cuts.total_profit);
    }

    #[test]
    fn test_cuts_keep_nested_windows_feasible() {
        // Job 2 fills [1,2]; job 1 fits later in its wide window.
        // A cut charging job 1 min(p, overlap) = 2 slots of [1,2] would
        // wrongly forbid completing both.
        let jobs = vec![job(1, 1, 10, 2, 5, 5), job(2, 1, 2, 2, 5, 5)];
        let instance = Instance::new("nested", jobs, 10).unwrap();

        for cuts in [true, false] {
            let options = OfflineOptions {
                add_interval_cuts: cuts,
                ..Default::default()
            };
            let result = solve_offline(&instance, &options).unwrap();
            assert_eq!(result.total_profit, 10, "cuts = {cuts}");
        }
    }

    #[test]
    fn test_zero_jobs_skips_solver() {
        let instance = Instance::with_default_horizon("empty", Vec::new()).unwrap();
        let solution = solve_offline_with(&instance, &Broken, &OfflineOptions::default()).unwrap();

        assert_eq!(solution.result.total_profit, 0);
        assert!(solution.result.slots.is_empty());
        assert!(solution.result.proven_optimal);
        assert_eq!(solution.status, SolveStatus::Optimal);
    }

    #[test]
    fn test_unknown_falls_back_to_nothing() {
        let instance = reference_instance();
        let solution = solve_offline_with(
            &instance,
            &FixedStatus(SolveStatus::Unknown),
            &OfflineOptions::default(),
        )
        .unwrap();

        assert_eq!(solution.status, SolveStatus::Unknown);
        assert_eq!(solution.result.total_profit, -instance.total_penalty());
        assert!(solution.result.completed.is_empty());
        assert_eq!(solution.result.failed.len(), 5);
        assert!(!solution.result.proven_optimal);
        assert!(solution.objective_value.is_none());
    }

    #[test]
    fn test_solver_error_falls_back_to_nothing() {
        let instance = reference_instance();
        let solution = solve_offline_with(&instance, &Broken, &OfflineOptions::default()).unwrap();

        assert_eq!(solution.status, SolveStatus::Unknown);
        assert_eq!(solution.result.total_profit, -131);
    }

    #[test]
    fn test_infeasible_is_inconsistency() {
        let instance = reference_instance();
        let err = solve_offline_with(
            &instance,
            &FixedStatus(SolveStatus::Infeasible),
            &OfflineOptions::default(),
        )
        .unwrap_err();

        assert!(matches!(err, ScheduleError::SolverInconsistency(_)));
    }

    #[test]
    fn test_invalid_assignment_is_inconsistency() {
        let instance = reference_instance();
        let err = solve_offline_with(&instance, &AllOnes, &OfflineOptions::default()).unwrap_err();
        assert!(matches!(err, ScheduleError::SolverInconsistency(_)));
    }

    #[test]
    fn test_feasible_is_not_proven_optimal() {
        let instance = reference_instance();
        let solution =
            solve_offline_with(&instance, &AllZeros, &OfflineOptions::default()).unwrap();

        assert_eq!(solution.status, SolveStatus::Feasible);
        assert!(!solution.result.proven_optimal);
        assert_eq!(solution.objective_value, Some(-131));
        assert_eq!(solution.result.total_profit, -131);
    }

    #[test]
    fn test_time_limit_option() {
        let options = OfflineOptions {
            add_interval_cuts: true,
            time_limit_seconds: Some(30.0),
        };
        assert_eq!(options.solver_config().time_limit, Some(Duration::from_secs(30)));

        let result = solve_offline(&reference_instance(), &options).unwrap();
        assert_eq!(result.total_profit, 19);

        let negative = OfflineOptions {
            time_limit_seconds: Some(-1.0),
            ..Default::default()
        };
        assert_eq!(negative.solver_config().time_limit, None);
    }

    #[test]
    fn test_expired_time_limit_completes_nothing() {
        let instance = InstanceGenerator::new(50).generate_seeded(50, 5).unwrap();
        let options = OfflineOptions {
            add_interval_cuts: true,
            time_limit_seconds: Some(1e-9),
        };
        let solution = solve_offline_with(&instance, &MicroLpSolver::new(), &options).unwrap();

        assert_eq!(solution.status, SolveStatus::Unknown);
        assert_eq!(solution.result.total_profit, -instance.total_penalty());
        assert!(solution.result.completed.is_empty());
        assert!(solution.result.slots.is_empty());
        assert!(!solution.result.proven_optimal);
        assert!(solution.objective_value.is_none());
    }

    #[test]
    fn test_saturated_solver_completes_nothing() {
        let instance = reference_instance();
        let solver = MicroLpSolver::new().with_max_workers(0);
        let options = OfflineOptions {
            time_limit_seconds: Some(30.0),
            ..Default::default()
        };
        let solution = solve_offline_with(&instance, &solver, &options).unwrap();

        assert_eq!(solution.status, SolveStatus::Unknown);
        assert_eq!(solution.result.total_profit, -131);
    }

    #[test]
    fn test_last_representable_deadline_is_clipped() {
        let jobs = vec![job(1, 1, u32::MAX, 2, 3, 0), job(2, 2, u32::MAX, 1, 1, 1)];
        let instance = Instance::new("open-ended", jobs, 5).unwrap();
        let built = OfflineModelBuilder::from_instance(&instance).build();

        assert_eq!(built.slot_var_count(), 5 + 4);
        let result = solve_offline(&instance, &OfflineOptions::default()).unwrap();
        assert_eq!(result.total_profit, 4);
    }

    #[test]
    fn test_options_json_defaults() {
        let options: OfflineOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options, OfflineOptions::default());
    }

    fn arb_jobs() -> impl Strategy<Value = Vec<Job>> {
        prop::collection::vec((1u32..=6, 0u32..=4, 1u32..=3, 0i64..=30, 0i64..=30), 0..6)
            .prop_map(|raw| {
                raw.into_iter()
                    .enumerate()
                    .map(|(i, (r, span, p, w, l))| job(i as JobId + 1, r, r + span, p, w, l))
                    .collect()
            })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn prop_online_schedules_satisfy_cut_model(jobs in arb_jobs()) {
            let instance = Instance::with_default_horizon("prop", jobs).unwrap();
            let built = OfflineModelBuilder::from_instance(&instance).build();

            for kind in PolicyKind::all() {
                let policy = kind.build(&PolicyConfig::default());
                let online = OnlineScheduler::new(policy).run(&instance);
                let values = built.encode(&online);
                prop_assert!(built.model.is_satisfied_by(&values), "{} schedule rejected", kind);
                prop_assert_eq!(built.model.evaluate(&values), online.total_profit);
            }
        }

        #[test]
        fn prop_offline_dominates_online(jobs in arb_jobs()) {
            let instance = Instance::with_default_horizon("prop", jobs).unwrap();
            let with_cuts = solve_offline(&instance, &OfflineOptions::default()).unwrap();
            let without_cuts = solve_offline(
                &instance,
                &OfflineOptions { add_interval_cuts: false, ..Default::default() },
            )
            .unwrap();

            prop_assert_eq!(with_cuts.total_profit, without_cuts.total_profit);
            prop_assert!(with_cuts.partitions(instance.jobs()));
            prop_assert_eq!(with_cuts.total_profit, with_cuts.recompute_profit(instance.jobs()));

            let mut per_slot = BTreeMap::new();
            for (&slot, &id) in &with_cuts.slots {
                prop_assert!(per_slot.insert(slot, id).is_none());
                let job = instance.job(id).unwrap();
                prop_assert!(slot >= job.release_time && slot <= job.deadline);
            }

            for kind in PolicyKind::all() {
                let policy = kind.build(&PolicyConfig::default());
                let online = OnlineScheduler::new(policy).run(&instance);
                prop_assert!(with_cuts.total_profit >= online.total_profit);
            }
        }
    }
}
