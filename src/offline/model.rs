//! Solver-agnostic 0–1 linear model.
//!
//! A `BinaryModel` is plain data: binary variables, integer linear
//! constraints, and a maximization objective. Any [`BinarySolver`](super::BinarySolver)
//! can consume it; the offline builder produces it.

use serde::{Deserialize, Serialize};

use crate::models::JobId;

/// Index of a variable inside its [`BinaryModel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VarId(pub usize);

/// Meaning of a binary variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VarKind {
    /// `x[job, slot]`: the job occupies the slot.
    Slot {
        /// Job.
        job: JobId,
        /// Slot.
        slot: u32,
    },
    /// `y[job]`: the job is fully processed.
    Completion {
        /// Job.
        job: JobId,
    },
}

/// A binary decision variable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BinaryVar {
    /// Display name, e.g. `x_3_7`.
    pub name: String,
    /// Role in the formulation.
    pub kind: VarKind,
}

/// Relation between a constraint's left-hand side and its right-hand side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sense {
    /// `lhs <= rhs`
    LessEq,
    /// `lhs == rhs`
    Equal,
}

/// Origin of a constraint in the formulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConstraintKind {
    /// At most one job per slot.
    Capacity {
        /// Slot.
        slot: u32,
    },
    /// `Σ_t x[j,t] = p_j · y[j]`.
    CompletionLink {
        /// Job.
        job: JobId,
    },
    /// `y[j] = 0` for a job with no schedulable slot.
    EmptyWindow {
        /// Job.
        job: JobId,
    },
    /// Demand-bound cut over slots `[start, end]`.
    DemandBound {
        /// First slot.
        start: u32,
        /// Last slot.
        end: u32,
    },
}

/// `Σ coeff · var (sense) rhs`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinearConstraint {
    /// Origin in the formulation.
    pub kind: ConstraintKind,
    /// `(variable, coefficient)` pairs.
    pub terms: Vec<(VarId, i64)>,
    /// Relation.
    pub sense: Sense,
    /// Right-hand side.
    pub rhs: i64,
}

impl LinearConstraint {
    /// Left-hand side under a 0/1 assignment.
    pub fn lhs(&self, values: &[bool]) -> i64 {
        self.terms
            .iter()
            .filter(|(var, _)| values[var.0])
            .map(|(_, coeff)| coeff)
            .sum()
    }

    /// Whether the assignment satisfies this constraint.
    pub fn is_satisfied_by(&self, values: &[bool]) -> bool {
        let lhs = self.lhs(values);
        match self.sense {
            Sense::LessEq => lhs <= self.rhs,
            Sense::Equal => lhs == self.rhs,
        }
    }
}

/// A 0–1 maximization model.
///
/// The reported objective is `Σ coeff · var + objective_offset`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BinaryModel {
    /// Model name.
    pub name: String,
    /// Decision variables; `VarId(i)` refers to `variables[i]`.
    pub variables: Vec<BinaryVar>,
    /// Constraints.
    pub constraints: Vec<LinearConstraint>,
    /// Objective `(variable, coefficient)` pairs, maximized.
    pub objective: Vec<(VarId, i64)>,
    /// Constant added to the objective when reporting.
    pub objective_offset: i64,
}

impl BinaryModel {
    /// Creates an empty model.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Adds a variable and returns its ID.
    pub fn add_variable(&mut self, name: impl Into<String>, kind: VarKind) -> VarId {
        let id = VarId(self.variables.len());
        self.variables.push(BinaryVar {
            name: name.into(),
            kind,
        });
        id
    }

    /// Adds a constraint.
    pub fn add_constraint(&mut self, constraint: LinearConstraint) {
        self.constraints.push(constraint);
    }

    /// Number of variables.
    pub fn variable_count(&self) -> usize {
        self.variables.len()
    }

    /// Number of constraints.
    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }

    /// Number of constraints matching `predicate`.
    pub fn count_constraints(&self, predicate: impl Fn(&ConstraintKind) -> bool) -> usize {
        self.constraints.iter().filter(|c| predicate(&c.kind)).count()
    }

    /// Objective value (offset included) under a 0/1 assignment.
    pub fn evaluate(&self, values: &[bool]) -> i64 {
        let raw: i64 = self
            .objective
            .iter()
            .filter(|(var, _)| values[var.0])
            .map(|(_, coeff)| coeff)
            .sum();
        raw + self.objective_offset
    }

    /// Whether the assignment has the right length and satisfies every
    /// constraint.
    pub fn is_satisfied_by(&self, values: &[bool]) -> bool {
        values.len() == self.variables.len()
            && self.constraints.iter().all(|c| c.is_satisfied_by(values))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny_model() -> BinaryModel {
        let mut model = BinaryModel::new("tiny");
        let a = model.add_variable("a", VarKind::Completion { job: 1 });
        let b = model.add_variable("b", VarKind::Completion { job: 2 });
        model.add_constraint(LinearConstraint {
            kind: ConstraintKind::Capacity { slot: 1 },
            terms: vec![(a, 1), (b, 1)],
            sense: Sense::LessEq,
            rhs: 1,
        });
        model.objective = vec![(a, 3), (b, 5)];
        model.objective_offset = -4;
        model
    }

    #[test]
    fn test_counts() {
        let model = tiny_model();
        assert_eq!(model.variable_count(), 2);
        assert_eq!(model.constraint_count(), 1);
        assert_eq!(
            model.count_constraints(|k| matches!(k, ConstraintKind::Capacity { .. })),
            1
        );
        assert_eq!(
            model.count_constraints(|k| matches!(k, ConstraintKind::DemandBound { .. })),
            0
        );
    }

    #[test]
    fn test_evaluate_and_feasibility() {
        let model = tiny_model();
        assert_eq!(model.evaluate(&[false, false]), -4);
        assert_eq!(model.evaluate(&[false, true]), 1);
        assert!(model.is_satisfied_by(&[false, true]));
        assert!(!model.is_satisfied_by(&[true, true]));
        assert!(!model.is_satisfied_by(&[true]));
    }
}
