//! Error types for the intake engine.

/// Top-level error type for the intake engine.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Navigation error: {0}")]
    Navigation(#[from] NavigationError),

    #[error("Submission error: {0}")]
    Submission(#[from] SubmissionError),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// A single failing field within a step validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Field name (snake_case, e.g. `"age"`, `"signs_image"`).
    pub field: &'static str,
    /// Human-readable reason the field failed.
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Step validation failure: every currently-failing field, not just the first.
///
/// User-correctable, never a system fault. The cursor does not move when
/// this is returned.
#[derive(Debug, Clone, thiserror::Error)]
#[error("step {step} has invalid fields: {}", field_list(.failures))]
pub struct ValidationError {
    /// 1-based index of the step that failed.
    pub step: u8,
    /// All failing fields with reasons. Never empty.
    pub failures: Vec<FieldError>,
}

impl ValidationError {
    /// Field names of all failures, in rule order.
    pub fn fields(&self) -> Vec<&'static str> {
        self.failures.iter().map(|f| f.field).collect()
    }

    /// Whether a specific field is among the failures.
    pub fn has_field(&self, field: &str) -> bool {
        self.failures.iter().any(|f| f.field == field)
    }
}

fn field_list(failures: &[FieldError]) -> String {
    failures
        .iter()
        .map(|f| f.field)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Cursor navigation errors (programmer error, not user-facing).
#[derive(Debug, thiserror::Error)]
pub enum NavigationError {
    #[error("Step {step} out of range 1..={max}")]
    OutOfRange { step: u8, max: u8 },
}

/// Submission errors from the external analysis collaborator.
///
/// Always recoverable: the intake record is preserved unchanged and a manual
/// retry rebuilds a fresh envelope from it.
#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    #[error("Transport failure: {reason}")]
    Transport { reason: String },

    #[error("Submission rejected by analysis service: {message}")]
    Rejected { message: String },

    #[error("Session credential rejected (unauthenticated)")]
    Unauthenticated,

    #[error("Invalid response from analysis service: {reason}")]
    InvalidResponse { reason: String },
}

/// Session state machine errors.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Operation {operation} not allowed in phase {phase}")]
    InvalidPhase { phase: String, operation: &'static str },

    #[error("Cannot transition from {from} to {to}")]
    InvalidTransition { from: String, to: String },

    #[error("Analysis run was cancelled before completion")]
    AnalysisInterrupted,
}

/// Result type alias for the intake engine.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_lists_all_fields() {
        let err = ValidationError {
            step: 1,
            failures: vec![
                FieldError::new("age", "required"),
                FieldError::new("gender", "required"),
            ],
        };
        assert_eq!(err.fields(), vec!["age", "gender"]);
        assert!(err.has_field("age"));
        assert!(!err.has_field("sleep_hours"));
        let msg = err.to_string();
        assert!(msg.contains("age, gender"), "got: {msg}");
    }

    #[test]
    fn errors_convert_into_top_level() {
        let err: Error = NavigationError::OutOfRange { step: 9, max: 5 }.into();
        assert!(matches!(err, Error::Navigation(_)));

        let err: Error = SubmissionError::Unauthenticated.into();
        assert!(matches!(err, Error::Submission(_)));
    }
}
