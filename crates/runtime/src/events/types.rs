//! Event payloads for each topic.

use dominion_core::{
    ActorId, BattleKind, CombatResult, EffectKind, ReportId, SpyCost, SpyMission, Timestamp,
};
use serde::{Deserialize, Serialize};

/// Battle outcomes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CombatEvent {
    BattleResolved {
        report: ReportId,
        attacker: ActorId,
        defender: ActorId,
        kind: BattleKind,
        result: CombatResult,
        credits_plundered: u64,
        prestige_gained: u64,
    },

    /// Stopped by the defender's peace shield; nothing was spent.
    AttackBlocked {
        attacker: ActorId,
        defender: ActorId,
    },
}

/// Spy mission outcomes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EspionageEvent {
    MissionResolved {
        report: ReportId,
        attacker: ActorId,
        defender: ActorId,
        mission: SpyMission,
        success: bool,
    },

    /// Caught by jamming. The cost was charged and no report exists.
    MissionJammed {
        attacker: ActorId,
        defender: ActorId,
        cost: SpyCost,
    },
}

/// Effect lifecycle changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EffectEvent {
    Applied {
        owner: ActorId,
        kind: EffectKind,
        expires_at: Timestamp,
    },
    Removed {
        owner: ActorId,
        kind: EffectKind,
    },
    Purged {
        count: usize,
    },
}
