//! Repository contracts for the operation services.

use dominion_core::{
    ActiveEffects, ActorDelta, ActorId, ActorSnapshot, AllianceId, AllianceStructureLevels,
    ArmoryLoadout, EdictKind, EffectKind, EffectRecord, ReportId, Timestamp,
};

use super::error::Result;
use super::records::{BattleReport, Notification, SpyReport, War, WarBattleLog};

/// A store that hands out transactions and read views.
///
/// Only one write transaction is open at a time; `begin` blocks until the
/// previous one commits or rolls back. Reads inside a transaction observe
/// its own uncommitted writes.
pub trait GameStore: Send + Sync {
    fn begin(&self) -> Result<Box<dyn StoreTransaction + '_>>;

    /// Read-only view of the committed state for lookups.
    ///
    /// Views never wait for the writer gate. Drop a view before committing
    /// on the same thread.
    fn view(&self) -> Result<Box<dyn StoreReader + '_>>;
}

/// Keyed reads shared by views and transactions.
pub trait StoreReader {
    fn actor(&self, id: ActorId) -> Result<Option<ActorSnapshot>>;

    fn actor_by_name(&self, name: &str) -> Result<Option<ActorSnapshot>>;

    /// Empty levels for unknown alliances.
    fn alliance_structures(&self, alliance: AllianceId) -> Result<AllianceStructureLevels>;

    fn edicts(&self, owner: ActorId) -> Result<Vec<EdictKind>>;

    fn armory(&self, owner: ActorId) -> Result<ArmoryLoadout>;

    /// Raw effect rows of `owner`, including soft-expired ones.
    fn effect_rows(&self, owner: ActorId) -> Result<Vec<EffectRecord>>;

    /// An active war between the two alliances, if any.
    fn war_between(&self, a: AllianceId, b: AllianceId) -> Result<Option<War>>;

    /// Effects of `owner` active at `now`.
    fn active_effects(&self, owner: ActorId, now: Timestamp) -> Result<ActiveEffects> {
        Ok(ActiveEffects::from_records(self.effect_rows(owner)?, now))
    }
}

/// One atomic unit of work.
///
/// Dropping a transaction without calling [`commit`](Self::commit) discards
/// every write made through it.
pub trait StoreTransaction: StoreReader {
    /// Applies a relative update and returns the fresh snapshot.
    fn apply_delta(&mut self, id: ActorId, delta: &ActorDelta) -> Result<ActorSnapshot>;

    /// Inserts or replaces the `(owner, kind)` row.
    fn upsert_effect(&mut self, record: EffectRecord) -> Result<()>;

    /// Deletes the `(owner, kind)` row; returns whether one existed.
    fn remove_effect(&mut self, owner: ActorId, kind: EffectKind) -> Result<bool>;

    /// Physically deletes rows expired at `now`; returns how many.
    fn purge_expired(&mut self, now: Timestamp) -> Result<usize>;

    /// Stores the report and returns its id; pending ids are assigned here.
    fn insert_battle_report(&mut self, report: BattleReport) -> Result<ReportId>;

    fn insert_spy_report(&mut self, report: SpyReport) -> Result<ReportId>;

    fn insert_notification(&mut self, notification: Notification) -> Result<()>;

    fn insert_war_log(&mut self, log: WarBattleLog) -> Result<()>;

    fn commit(self: Box<Self>) -> Result<()>;
}
