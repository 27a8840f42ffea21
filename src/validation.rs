//! Input validation for scheduling instances.
//!
//! Checks the static integrity of a job set before any simulation or model
//! construction starts. Detects:
//! - Duplicate job IDs
//! - Non-positive processing times
//! - Release times before slot 1
//! - Windows whose release time lies after the deadline
//! - Negative rewards or penalties
//! - Rewards and penalties whose total does not fit in an `i64`
//!
//! Jobs whose window is shorter than their processing time are valid input.
//! They can never complete and are reported as failed by every scheduler.

use std::collections::HashSet;
use std::fmt;

use crate::models::{Job, JobId};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Offending job.
    pub job_id: JobId,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two jobs share the same ID.
    DuplicateId,
    /// A job requires zero slots.
    NonPositiveProcessingTime,
    /// A job is released at slot 0; slots start at 1.
    ZeroReleaseTime,
    /// A job's release time is after its deadline.
    InvertedWindow,
    /// A job has a negative reward.
    NegativeReward,
    /// A job has a negative penalty.
    NegativePenalty,
    /// `Σ (reward + penalty)` over the job set exceeds `i64::MAX`.
    ProfitOverflow,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, job_id: JobId, message: impl Into<String>) -> Self {
        Self {
            kind,
            job_id,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Validates a job set.
///
/// Checks:
/// 1. No duplicate job IDs
/// 2. `processing_time > 0`
/// 3. `release_time >= 1`
/// 4. `release_time <= deadline`
/// 5. `reward >= 0` and `penalty >= 0`
/// 6. `Σ (reward + penalty)` fits in an `i64`, so every profit sum does too
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_jobs(jobs: &[Job]) -> ValidationResult {
    let mut errors = Vec::new();
    let mut ids = HashSet::new();
    let mut swing_total: Option<i64> = Some(0);

    for job in jobs {
        if !ids.insert(job.id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                job.id,
                format!("Duplicate job ID: {}", job.id),
            ));
        }

        if job.processing_time == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonPositiveProcessingTime,
                job.id,
                format!("Job {} has zero processing time", job.id),
            ));
        }

        if job.release_time == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::ZeroReleaseTime,
                job.id,
                format!("Job {} is released at slot 0 (slots start at 1)", job.id),
            ));
        }

        if job.release_time > job.deadline {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvertedWindow,
                job.id,
                format!(
                    "Job {} has release time {} after deadline {}",
                    job.id, job.release_time, job.deadline
                ),
            ));
        }

        if job.reward < 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NegativeReward,
                job.id,
                format!("Job {} has negative reward {}", job.id, job.reward),
            ));
        }

        if job.penalty < 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NegativePenalty,
                job.id,
                format!("Job {} has negative penalty {}", job.id, job.penalty),
            ));
        }

        if swing_total.is_some() {
            swing_total = swing_total
                .and_then(|total| total.checked_add(job.reward))
                .and_then(|total| total.checked_add(job.penalty));
            if swing_total.is_none() {
                errors.push(ValidationError::new(
                    ValidationErrorKind::ProfitOverflow,
                    job.id,
                    format!("Rewards and penalties overflow i64 at job {}", job.id),
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_jobs() -> Vec<Job> {
        vec![
            Job::new(1, 4, 1, 9).with_reward(10).with_penalty(10),
            Job::new(2, 2, 3, 5).with_reward(10).with_penalty(15),
            Job::new(3, 5, 2, 7).with_reward(10).with_penalty(5),
        ]
    }

    #[test]
    fn test_valid_input() {
        assert!(validate_jobs(&sample_jobs()).is_ok());
        assert!(validate_jobs(&[]).is_ok());
    }

    #[test]
    fn test_duplicate_id() {
        let mut jobs = sample_jobs();
        jobs.push(Job::new(2, 1, 1, 1));

        let errors = validate_jobs(&jobs).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::DuplicateId);
        assert_eq!(errors[0].job_id, 2);
    }

    #[test]
    fn test_zero_processing_time() {
        let errors = validate_jobs(&[Job::new(1, 0, 1, 3)]).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::NonPositiveProcessingTime));
    }

    #[test]
    fn test_zero_release_time() {
        let errors = validate_jobs(&[Job::new(1, 1, 0, 3)]).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::ZeroReleaseTime));
    }

    #[test]
    fn test_inverted_window() {
        let errors = validate_jobs(&[Job::new(1, 1, 5, 4)]).unwrap_err();
        assert!(errors.iter().any(|e| {
            e.kind == ValidationErrorKind::InvertedWindow && e.message.contains("after deadline")
        }));
    }

    #[test]
    fn test_negative_values() {
        let errors =
            validate_jobs(&[Job::new(1, 1, 1, 3).with_reward(-1).with_penalty(-2)]).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::NegativeReward));
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::NegativePenalty));
    }

    #[test]
    fn test_short_window_is_valid() {
        // Window of 2 slots for 3 units of work: never completes, still valid.
        assert!(validate_jobs(&[Job::new(1, 3, 4, 5)]).is_ok());
    }

    #[test]
    fn test_profit_overflow() {
        let single = [Job::new(1, 1, 1, 3).with_reward(i64::MAX).with_penalty(1)];
        let errors = validate_jobs(&single).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::ProfitOverflow);

        let pair = [
            Job::new(1, 1, 1, 3).with_penalty(i64::MAX),
            Job::new(2, 1, 1, 3).with_penalty(i64::MAX),
            Job::new(3, 1, 1, 3).with_penalty(i64::MAX),
        ];
        let errors = validate_jobs(&pair).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].job_id, 2);

        let at_limit = [
            Job::new(1, 1, 1, 3).with_reward(i64::MAX - 1),
            Job::new(2, 1, 1, 3).with_penalty(1),
        ];
        assert!(validate_jobs(&at_limit).is_ok());
    }

    #[test]
    fn test_last_representable_deadline_is_valid() {
        assert!(validate_jobs(&[Job::new(1, 2, 1, u32::MAX)]).is_ok());
    }

    #[test]
    fn test_multiple_errors() {
        let jobs = vec![Job::new(1, 0, 0, 3), Job::new(1, 1, 6, 2)];

        let errors = validate_jobs(&jobs).unwrap_err();
        assert!(errors.len() >= 4);
    }
}
