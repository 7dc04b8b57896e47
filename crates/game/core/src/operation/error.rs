//! Operation rejections.
//!
//! Errors raised before any combat resolution happens. None of them implies a
//! state change except [`BlockedByEffect::Jammed`], whose cost the caller
//! still charges.

use crate::combat::SpyCost;
use crate::error::{ErrorSeverity, GameError};
use crate::state::EffectKind;

// ============================================================================
// Validation Failures
// ============================================================================

/// Invalid requests. No transaction is opened and nothing is charged.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ValidationFailure {
    #[error("Your empire could not be found")]
    ActorNotFound,

    #[error("Target not found")]
    TargetNotFound,

    #[error("You cannot target yourself")]
    SelfTarget,

    #[error("Not enough {unit}: {available} available, {required} required")]
    InsufficientUnits {
        unit: String,
        required: u64,
        available: u64,
    },

    #[error("Invalid number of attack turns: {requested} (allowed 1 to {max})")]
    InvalidTurns { requested: u64, max: u64 },

    #[error("Not enough attack turns: {available} available, {required} required")]
    InsufficientTurns { required: u64, available: u64 },

    #[error("Not enough credits: {available} available, {required} required")]
    InsufficientCredits { required: u64, available: u64 },

    #[error("{} cannot be purchased", .0.label())]
    NotPurchasable(EffectKind),

    #[error("{} is not available", .0.label())]
    EffectUnavailable(EffectKind),

    #[error("{} is locked while {} is active", .requested.label(), .lock.label())]
    SafehouseLocked {
        requested: EffectKind,
        lock: EffectKind,
    },

    #[error("{} cannot be active together with {}", .requested.label(), .active.label())]
    ConflictingEffect {
        requested: EffectKind,
        active: EffectKind,
    },

    #[error("{} is not active", .0.label())]
    EffectNotActive(EffectKind),
}

impl GameError for ValidationFailure {
    fn severity(&self) -> ErrorSeverity {
        use ValidationFailure::*;
        match self {
            ActorNotFound | TargetNotFound | SelfTarget | InvalidTurns { .. } => {
                ErrorSeverity::Validation
            }
            NotPurchasable(_) | EffectUnavailable(_) | EffectNotActive(_) => {
                ErrorSeverity::Validation
            }
            InsufficientUnits { .. } | InsufficientTurns { .. } | InsufficientCredits { .. } => {
                ErrorSeverity::Recoverable
            }
            SafehouseLocked { .. } | ConflictingEffect { .. } => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        use ValidationFailure::*;
        match self {
            ActorNotFound => "VALIDATION_ACTOR_NOT_FOUND",
            TargetNotFound => "VALIDATION_TARGET_NOT_FOUND",
            SelfTarget => "VALIDATION_SELF_TARGET",
            InsufficientUnits { .. } => "VALIDATION_INSUFFICIENT_UNITS",
            InvalidTurns { .. } => "VALIDATION_INVALID_TURNS",
            InsufficientTurns { .. } => "VALIDATION_INSUFFICIENT_TURNS",
            InsufficientCredits { .. } => "VALIDATION_INSUFFICIENT_CREDITS",
            NotPurchasable(_) => "VALIDATION_NOT_PURCHASABLE",
            EffectUnavailable(_) => "VALIDATION_EFFECT_UNAVAILABLE",
            SafehouseLocked { .. } => "VALIDATION_SAFEHOUSE_LOCKED",
            ConflictingEffect { .. } => "VALIDATION_CONFLICTING_EFFECT",
            EffectNotActive(_) => "VALIDATION_EFFECT_NOT_ACTIVE",
        }
    }
}

// ============================================================================
// Blocking Effects
// ============================================================================

/// A defender effect stopped the operation.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BlockedByEffect {
    /// Nothing is charged.
    #[error("{target} is protected by a Peace Shield")]
    PeaceShield { target: String },

    /// The mission cost is still charged; no report is written.
    #[error(
        "Infiltration critical failure: signal jamming around {target} exposed your spies"
    )]
    Jammed { target: String, cost: SpyCost },
}

impl BlockedByEffect {
    pub const fn effect(&self) -> EffectKind {
        match self {
            Self::PeaceShield { .. } => EffectKind::PeaceShield,
            Self::Jammed { .. } => EffectKind::Jamming,
        }
    }

    /// What the attacker still pays for the attempt.
    pub const fn cost(&self) -> Option<SpyCost> {
        match self {
            Self::PeaceShield { .. } => None,
            Self::Jammed { cost, .. } => Some(*cost),
        }
    }
}

impl GameError for BlockedByEffect {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::PeaceShield { .. } => "BLOCKED_PEACE_SHIELD",
            Self::Jammed { .. } => "BLOCKED_JAMMED",
        }
    }
}

/// Either kind of pre-resolution rejection.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Rejection {
    #[error(transparent)]
    Invalid(#[from] ValidationFailure),

    #[error(transparent)]
    Blocked(#[from] BlockedByEffect),
}

impl GameError for Rejection {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Invalid(err) => err.severity(),
            Self::Blocked(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Invalid(err) => err.error_code(),
            Self::Blocked(err) => err.error_code(),
        }
    }
}
