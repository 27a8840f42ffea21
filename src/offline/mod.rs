//! Offline optimum via a time-indexed 0–1 model.
//!
//! The offline scheduler sees every job up front. Its answer is the
//! benchmark each online policy is compared against.
//!
//! # Architecture
//!
//! ```text
//! Instance ──► OfflineModelBuilder ──► BinaryModel ──► BinarySolver
//!                     ▲                                     │
//!                     └──── decode ◄── BinarySolution ◄─────┘
//! ```
//!
//! `BinaryModel` is solver-agnostic plain data. `MicroLpSolver` is the
//! bundled exact backend; any other engine plugs in through [`BinarySolver`].
//!
//! # Reference
//! - Sousa & Wolsey (1992), "A time indexed formulation of non-preemptive single machine scheduling problems"
//! - Wolsey (1998), "Integer Programming", Ch. 7

mod builder;
mod model;
mod solver;

pub use builder::{
    solve_offline, solve_offline_with, OfflineModelBuilder, OfflineOptions, OfflineSolution,
    TimeIndexedModel,
};
pub use model::{BinaryModel, BinaryVar, ConstraintKind, LinearConstraint, Sense, VarId, VarKind};
pub use solver::{
    BinarySolution, BinarySolver, MicroLpSolver, SolveStatus, SolverConfig, SolverError,
    DEFAULT_MAX_WORKERS,
};
