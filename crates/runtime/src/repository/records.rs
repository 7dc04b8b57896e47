//! Persisted rows written by the operation services.
//!
//! Reports are immutable once inserted; the store only ever appends them.

use std::collections::BTreeMap;

use dominion_core::{
    ActorId, ActorSnapshot, AllianceId, AllianceStructureLevels, ArmoryLoadout, BattleOutcome,
    EdictKind, EffectKind, EffectRecord, IntelSnapshot, PowerBreakdown, ReportId, SpyOutcome,
    Timestamp, WarId,
};
use serde::{Deserialize, Serialize};

/// One resolved battle.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BattleReport {
    pub id: ReportId,
    pub attacker: ActorId,
    pub defender: ActorId,
    pub attacker_name: String,
    pub defender_name: String,
    pub created_at: Timestamp,
    pub outcome: BattleOutcome,
    pub attacker_offense: PowerBreakdown,
    pub defender_defense: PowerBreakdown,
}

/// One resolved spy mission. Jammed attempts never produce a report.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpyReport {
    pub id: ReportId,
    pub attacker: ActorId,
    pub defender: ActorId,
    pub attacker_name: String,
    pub defender_name: String,
    pub created_at: Timestamp,
    pub outcome: SpyOutcome,
    pub attacker_spy: PowerBreakdown,
    pub defender_sentry: PowerBreakdown,
    /// Present only for successful intel missions.
    pub intel: Option<IntelSnapshot>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub recipient: ActorId,
    pub title: String,
    pub body: String,
    pub created_at: Timestamp,
    pub report: Option<ReportId>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct War {
    pub id: WarId,
    pub aggressor: AllianceId,
    pub defender: AllianceId,
    pub active: bool,
}

impl War {
    /// True for an active war between `a` and `b`, in either direction.
    pub fn between(&self, a: AllianceId, b: AllianceId) -> bool {
        self.active
            && ((self.aggressor == a && self.defender == b)
                || (self.aggressor == b && self.defender == a))
    }
}

/// Link between a war and a battle fought in it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WarBattleLog {
    pub war: WarId,
    pub report: ReportId,
    pub attacking_alliance: AllianceId,
    pub prestige_gained: u64,
    pub units_killed: u64,
    pub created_at: Timestamp,
}

/// Every row the store holds. Also the on-disk format of
/// [`FileSnapshotRepository`](crate::repository::FileSnapshotRepository).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreSnapshot {
    pub actors: BTreeMap<ActorId, ActorSnapshot>,
    pub alliances: BTreeMap<AllianceId, AllianceStructureLevels>,
    pub edicts: BTreeMap<ActorId, Vec<EdictKind>>,
    pub armories: BTreeMap<ActorId, ArmoryLoadout>,
    /// At most one row per `(owner, kind)`; rows may be soft-expired.
    pub effects: BTreeMap<ActorId, BTreeMap<EffectKind, EffectRecord>>,
    pub battle_reports: Vec<BattleReport>,
    pub spy_reports: Vec<SpyReport>,
    pub notifications: Vec<Notification>,
    pub wars: Vec<War>,
    pub war_logs: Vec<WarBattleLog>,
    pub last_report_id: u64,
}

impl StoreSnapshot {
    pub(crate) fn next_report_id(&mut self) -> ReportId {
        self.last_report_id += 1;
        ReportId(self.last_report_id)
    }
}
