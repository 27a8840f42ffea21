//! Crate-level error type.

use thiserror::Error;

use crate::validation::ValidationError;

/// Errors surfaced by instance construction and the offline solver path.
///
/// Online simulation has no failure mode once an [`Instance`](crate::models::Instance)
/// exists; every error here is raised before a run starts or by the offline
/// model's consistency check.
#[derive(Error, Debug)]
pub enum ScheduleError {
    /// The job set is malformed. Holds every detected problem.
    #[error("invalid instance: {}", join_messages(.0))]
    Validation(Vec<ValidationError>),

    /// The solver reported an outcome the formulation rules out.
    #[error("solver inconsistency: {0}")]
    SolverInconsistency(String),

    /// Experiment configuration could not be read or parsed.
    #[error("configuration error: {0}")]
    Config(String),
}

impl From<Vec<ValidationError>> for ScheduleError {
    fn from(errors: Vec<ValidationError>) -> Self {
        ScheduleError::Validation(errors)
    }
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Job;
    use crate::validation::validate_jobs;

    #[test]
    fn test_validation_display_lists_all() {
        let errors = validate_jobs(&[Job::new(4, 0, 2, 1)]).unwrap_err();
        let err = ScheduleError::from(errors);
        let text = err.to_string();

        assert!(text.starts_with("invalid instance: "));
        assert!(text.contains("zero processing time"));
        assert!(text.contains("after deadline"));
    }

    #[test]
    fn test_inconsistency_display() {
        let err = ScheduleError::SolverInconsistency("status INFEASIBLE".into());
        assert_eq!(err.to_string(), "solver inconsistency: status INFEASIBLE");
    }
}
