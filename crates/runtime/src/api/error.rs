//! Failures an operation can end in.

use dominion_core::{BlockedByEffect, ErrorSeverity, GameError, Rejection, ValidationFailure};
use thiserror::Error;

use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, OperationError>;

/// Message shown for every persistence failure; the cause is only logged.
pub const GENERIC_FAILURE: &str = "The operation could not be completed. Please try again.";

#[derive(Debug, Error)]
pub enum OperationError {
    #[error(transparent)]
    Invalid(#[from] ValidationFailure),

    #[error(transparent)]
    Blocked(#[from] BlockedByEffect),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl OperationError {
    /// Text safe to show the player.
    pub fn user_message(&self) -> String {
        match self {
            Self::Repository(_) => GENERIC_FAILURE.to_owned(),
            other => other.to_string(),
        }
    }
}

impl From<Rejection> for OperationError {
    fn from(rejection: Rejection) -> Self {
        match rejection {
            Rejection::Invalid(err) => Self::Invalid(err),
            Rejection::Blocked(err) => Self::Blocked(err),
        }
    }
}

impl GameError for OperationError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Invalid(err) => err.severity(),
            Self::Blocked(err) => err.severity(),
            Self::Repository(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Invalid(err) => err.error_code(),
            Self::Blocked(err) => err.error_code(),
            Self::Repository(err) => err.error_code(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn persistence_failures_hide_their_cause() {
        let err = OperationError::from(RepositoryError::CommitFailed("disk full".into()));
        assert_eq!(err.user_message(), GENERIC_FAILURE);
        assert!(err.severity().is_internal());
        assert_eq!(err.error_code(), "STORE_COMMIT_FAILED");
    }

    #[test]
    fn rejections_keep_their_message() {
        let err = OperationError::from(Rejection::Invalid(ValidationFailure::SelfTarget));
        assert_eq!(err.user_message(), "You cannot target yourself");
        assert_eq!(err.error_code(), "VALIDATION_SELF_TARGET");
    }
}
