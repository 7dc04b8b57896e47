//! Error types raised by repository implementations.

use dominion_core::{ActorId, ErrorSeverity, GameError};
use thiserror::Error;

/// Errors surfaced by repository implementations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("store lock was poisoned")]
    LockPoisoned,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("actor {0} does not exist")]
    UnknownActor(ActorId),

    #[error("update would leave actor {0} with negative or overflowing resources")]
    InvalidDelta(ActorId),

    #[error("transaction could not be committed: {0}")]
    CommitFailed(String),
}

impl GameError for RepositoryError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::LockPoisoned => ErrorSeverity::Fatal,
            _ => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::LockPoisoned => "STORE_LOCK_POISONED",
            Self::Io(_) => "STORE_IO",
            Self::Serialization(_) => "STORE_SERIALIZATION",
            Self::UnknownActor(_) => "STORE_UNKNOWN_ACTOR",
            Self::InvalidDelta(_) => "STORE_INVALID_DELTA",
            Self::CommitFailed(_) => "STORE_COMMIT_FAILED",
        }
    }
}

pub type Result<T> = std::result::Result<T, RepositoryError>;
