use std::fmt;

use thiserror::Error;

use crate::domain::{FieldErrors, RepresentativeId};

/// Errors reported by backend collaborators (search, safety check, commit).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    InternalError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Session expired")]
    SessionExpired,
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Stable machine-readable code for each [`LifecycleError`] variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ValidationFailed,
    DuplicateAssociation,
    UnlinkBlocked,
    NetworkFailure,
    CommitInvariantViolation,
    InvalidState,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCode::ValidationFailed => write!(f, "VALIDATION_FAILED"),
            ErrorCode::DuplicateAssociation => write!(f, "DUPLICATE_ASSOCIATION"),
            ErrorCode::UnlinkBlocked => write!(f, "UNLINK_BLOCKED"),
            ErrorCode::NetworkFailure => write!(f, "NETWORK_FAILURE"),
            ErrorCode::CommitInvariantViolation => write!(f, "COMMIT_INVARIANT_VIOLATION"),
            ErrorCode::InvalidState => write!(f, "INVALID_STATE"),
        }
    }
}

/// Outcome of a rejected representative lifecycle operation.
///
/// Every variant leaves the draft list exactly as it was before the
/// operation was attempted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LifecycleError {
    #[error("{} representative field(s) are invalid", .0.len())]
    ValidationFailed(FieldErrors),

    #[error("Representative {0} is already associated with this student")]
    DuplicateAssociation(RepresentativeId),

    #[error("{0}")]
    UnlinkBlocked(String),

    #[error("Network failure: {0}")]
    NetworkFailure(String),

    #[error("A student must keep at least one representative")]
    CommitInvariantViolation,

    #[error("Invalid state: {0}")]
    InvalidState(String),
}

impl LifecycleError {
    pub fn code(&self) -> ErrorCode {
        match self {
            LifecycleError::ValidationFailed(_) => ErrorCode::ValidationFailed,
            LifecycleError::DuplicateAssociation(_) => ErrorCode::DuplicateAssociation,
            LifecycleError::UnlinkBlocked(_) => ErrorCode::UnlinkBlocked,
            LifecycleError::NetworkFailure(_) => ErrorCode::NetworkFailure,
            LifecycleError::CommitInvariantViolation => ErrorCode::CommitInvariantViolation,
            LifecycleError::InvalidState(_) => ErrorCode::InvalidState,
        }
    }

    /// Errors the controller recovers from inline, without a blocking alert.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            LifecycleError::ValidationFailed(_) | LifecycleError::DuplicateAssociation(_)
        )
    }
}

pub type LifecycleResult<T> = Result<T, LifecycleError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RepresentativeField;

    #[test]
    fn test_error_codes_use_upper_snake_names() {
        let mut errors = FieldErrors::default();
        errors.insert(RepresentativeField::Email, "Email is required");

        assert_eq!(
            LifecycleError::ValidationFailed(errors).code().to_string(),
            "VALIDATION_FAILED"
        );
        assert_eq!(
            LifecycleError::CommitInvariantViolation.code().to_string(),
            "COMMIT_INVARIANT_VIOLATION"
        );
        assert_eq!(
            LifecycleError::UnlinkBlocked("busy".into()).code().to_string(),
            "UNLINK_BLOCKED"
        );
    }

    #[test]
    fn test_unlink_blocked_displays_backend_message_verbatim() {
        let err = LifecycleError::UnlinkBlocked("Responsible for 2 active enrollments".into());
        assert_eq!(err.to_string(), "Responsible for 2 active enrollments");
        assert!(!err.is_local());
    }

    #[test]
    fn test_duplicate_and_validation_are_local() {
        let id = RepresentativeId::new();
        assert!(LifecycleError::DuplicateAssociation(id).is_local());
        assert!(LifecycleError::ValidationFailed(FieldErrors::default()).is_local());
        assert!(!LifecycleError::NetworkFailure("timeout".into()).is_local());
    }
}
