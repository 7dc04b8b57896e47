//! Common error infrastructure for dominion-core.
//!
//! Domain-specific errors ([`ValidationFailure`](crate::operation::ValidationFailure),
//! [`BlockedByEffect`](crate::operation::BlockedByEffect)) live next to the rules
//! that raise them; this module holds the classification they share.

use crate::state::ActorId;

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: the same request may succeed later (a shield expires).
/// - **Validation**: the request itself is wrong and must change.
/// - **Internal**: storage or state inconsistency; needs investigation.
/// - **Fatal**: the game cannot continue.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    Recoverable,
    Validation,
    Internal,
    Fatal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error indicates a bug or a storage failure.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Who was involved when an error was raised.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ErrorContext {
    pub actor: Option<ActorId>,
    pub target: Option<ActorId>,
    /// Operation name (`attack`, `spy`, `purchase_effect`, ...).
    pub operation: Option<&'static str>,
    pub message: Option<&'static str>,
}

impl ErrorContext {
    #[must_use]
    pub const fn new(operation: &'static str) -> Self {
        Self {
            actor: None,
            target: None,
            operation: Some(operation),
            message: None,
        }
    }

    #[must_use]
    pub const fn with_actor(mut self, actor: ActorId) -> Self {
        self.actor = Some(actor);
        self
    }

    #[must_use]
    pub const fn with_target(mut self, target: ActorId) -> Self {
        self.target = Some(target);
        self
    }

    #[must_use]
    pub const fn with_message(mut self, message: &'static str) -> Self {
        self.message = Some(message);
        self
    }
}

/// Common trait for all dominion errors.
///
/// - Use `#[derive(thiserror::Error)]` for the `Display`/`Error` impls.
/// - Classify severity by recoverability, not by impact.
/// - Error codes are stable identifiers for logs and tests.
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    fn context(&self) -> Option<&ErrorContext> {
        None
    }

    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
