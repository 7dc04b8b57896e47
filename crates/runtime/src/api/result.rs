//! The uniform response every operation returns.

use dominion_core::{
    ActorId, BattleOutcome, EffectKind, GameError, IntelSnapshot, ReportId, SpyCost, SpyOutcome,
    Timestamp,
};
use serde::{Deserialize, Serialize};

use super::error::OperationError;

/// Effect change made by a purchase, termination or direct add/remove.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EffectChange {
    pub owner: ActorId,
    pub kind: EffectKind,
    /// `None` when the effect was removed.
    pub expires_at: Option<Timestamp>,
    pub credits_spent: u64,
    /// Effect deleted alongside this one.
    pub removed: Option<EffectKind>,
    /// Cooldown started by this change.
    pub cooldown: Option<(EffectKind, Timestamp)>,
}

/// Payload of a result.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum OperationData {
    #[default]
    None,
    Battle {
        report: ReportId,
        outcome: BattleOutcome,
    },
    Spy {
        report: ReportId,
        outcome: SpyOutcome,
        intel: Option<IntelSnapshot>,
    },
    /// A jammed mission: what was charged.
    Jammed { cost: SpyCost },
    Effect(EffectChange),
}

/// Success flag, player-facing message and data payload.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OperationResult {
    pub success: bool,
    pub message: String,
    pub data: OperationData,
    /// Stable code of the failure, if any.
    pub error_code: Option<String>,
}

impl OperationResult {
    pub fn ok(message: impl Into<String>, data: OperationData) -> Self {
        Self {
            success: true,
            message: message.into(),
            data,
            error_code: None,
        }
    }

    /// A failure that still carries data (a jammed mission's cost).
    pub fn failed(message: impl Into<String>, data: OperationData, code: &str) -> Self {
        Self {
            success: false,
            message: message.into(),
            data,
            error_code: Some(code.to_owned()),
        }
    }

    pub fn from_error(err: &OperationError) -> Self {
        Self::failed(err.user_message(), OperationData::None, err.error_code())
    }

    pub fn report_id(&self) -> Option<ReportId> {
        match &self.data {
            OperationData::Battle { report, .. } | OperationData::Spy { report, .. } => {
                Some(*report)
            }
            _ => None,
        }
    }
}
