//! In-memory transactional store.

use std::sync::{Mutex, MutexGuard, RwLock, RwLockReadGuard};

use dominion_core::{
    ActorDelta, ActorId, ActorSnapshot, AllianceId, AllianceStructureLevels, ArmoryLoadout,
    EdictKind, EffectKind, EffectRecord, ReportId, Timestamp,
};

use crate::repository::records::{
    BattleReport, Notification, SpyReport, StoreSnapshot, War, WarBattleLog,
};
use crate::repository::{GameStore, RepositoryError, Result, StoreReader, StoreTransaction};

/// In-memory implementation of [`GameStore`] for tests and local runs.
///
/// Writers are serialized by a gate held for the whole transaction, so two
/// operations by the same attacker can never both pass validation on the
/// same turn balance. Each transaction works on a private copy that replaces
/// the committed state on [`commit`](StoreTransaction::commit). Views skip
/// the gate and read the committed state directly.
#[derive(Default)]
pub struct InMemoryStore {
    state: RwLock<StoreSnapshot>,
    gate: Mutex<()>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_snapshot(snapshot: StoreSnapshot) -> Self {
        Self {
            state: RwLock::new(snapshot),
            gate: Mutex::new(()),
        }
    }

    /// Copy of the committed state.
    pub fn snapshot(&self) -> Result<StoreSnapshot> {
        self.read(|state| state.clone())
    }

    /// Replaces the committed state, e.g. after loading a save.
    pub fn restore(&self, snapshot: StoreSnapshot) -> Result<()> {
        self.seed(|state| *state = snapshot)
    }

    // ===== seeding =====

    pub fn insert_actor(&self, actor: ActorSnapshot) -> Result<()> {
        self.seed(|state| {
            state.actors.insert(actor.id, actor);
        })
    }

    pub fn set_alliance_structures(
        &self,
        alliance: AllianceId,
        levels: AllianceStructureLevels,
    ) -> Result<()> {
        self.seed(|state| {
            state.alliances.insert(alliance, levels);
        })
    }

    pub fn enact_edict(&self, owner: ActorId, edict: EdictKind) -> Result<()> {
        self.seed(|state| {
            let edicts = state.edicts.entry(owner).or_default();
            if !edicts.contains(&edict) {
                edicts.push(edict);
            }
        })
    }

    pub fn set_armory(&self, owner: ActorId, loadout: ArmoryLoadout) -> Result<()> {
        self.seed(|state| {
            state.armories.insert(owner, loadout);
        })
    }

    pub fn declare_war(&self, war: War) -> Result<()> {
        self.seed(|state| state.wars.push(war))
    }

    // ===== committed reads =====

    pub fn actor(&self, id: ActorId) -> Result<Option<ActorSnapshot>> {
        self.read(|state| state.actors.get(&id).cloned())
    }

    /// Physical effect rows of `owner`, soft-expired ones included.
    pub fn effect_rows(&self, owner: ActorId) -> Result<Vec<EffectRecord>> {
        self.read(|state| rows_of(state, owner))
    }

    pub fn battle_reports(&self) -> Result<Vec<BattleReport>> {
        self.read(|state| state.battle_reports.clone())
    }

    pub fn spy_reports(&self) -> Result<Vec<SpyReport>> {
        self.read(|state| state.spy_reports.clone())
    }

    pub fn notifications_for(&self, recipient: ActorId) -> Result<Vec<Notification>> {
        self.read(|state| {
            state
                .notifications
                .iter()
                .filter(|n| n.recipient == recipient)
                .cloned()
                .collect()
        })
    }

    pub fn war_logs(&self) -> Result<Vec<WarBattleLog>> {
        self.read(|state| state.war_logs.clone())
    }

    /// Writes outside a transaction; waits for any open transaction first.
    fn seed<T>(&self, f: impl FnOnce(&mut StoreSnapshot) -> T) -> Result<T> {
        let _gate = self.gate.lock().map_err(|_| RepositoryError::LockPoisoned)?;
        self.write(f)
    }

    fn read<T>(&self, f: impl FnOnce(&StoreSnapshot) -> T) -> Result<T> {
        let state = self.state.read().map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(f(&state))
    }

    fn write<T>(&self, f: impl FnOnce(&mut StoreSnapshot) -> T) -> Result<T> {
        let mut state = self
            .state
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(f(&mut state))
    }
}

impl GameStore for InMemoryStore {
    fn begin(&self) -> Result<Box<dyn StoreTransaction + '_>> {
        let gate = self.gate.lock().map_err(|_| RepositoryError::LockPoisoned)?;
        let working = self.snapshot()?;
        tracing::trace!("store transaction opened");
        Ok(Box::new(MemoryTransaction {
            store: self,
            _gate: gate,
            working,
            committed: false,
        }))
    }

    fn view(&self) -> Result<Box<dyn StoreReader + '_>> {
        let state = self.state.read().map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(Box::new(MemoryView { state }))
    }
}

/// Committed-state reads over [`InMemoryStore`].
pub struct MemoryView<'a> {
    state: RwLockReadGuard<'a, StoreSnapshot>,
}

/// A transaction over [`InMemoryStore`].
pub struct MemoryTransaction<'a> {
    store: &'a InMemoryStore,
    _gate: MutexGuard<'a, ()>,
    working: StoreSnapshot,
    committed: bool,
}

impl StoreReader for StoreSnapshot {
    fn actor(&self, id: ActorId) -> Result<Option<ActorSnapshot>> {
        Ok(self.actors.get(&id).cloned())
    }

    fn actor_by_name(&self, name: &str) -> Result<Option<ActorSnapshot>> {
        Ok(self
            .actors
            .values()
            .find(|actor| actor.character_name.eq_ignore_ascii_case(name))
            .cloned())
    }

    fn alliance_structures(&self, alliance: AllianceId) -> Result<AllianceStructureLevels> {
        Ok(self
            .alliances
            .get(&alliance)
            .cloned()
            .unwrap_or_default())
    }

    fn edicts(&self, owner: ActorId) -> Result<Vec<EdictKind>> {
        Ok(self.edicts.get(&owner).cloned().unwrap_or_default())
    }

    fn armory(&self, owner: ActorId) -> Result<ArmoryLoadout> {
        Ok(self.armories.get(&owner).cloned().unwrap_or_default())
    }

    fn effect_rows(&self, owner: ActorId) -> Result<Vec<EffectRecord>> {
        Ok(rows_of(self, owner))
    }

    fn war_between(&self, a: AllianceId, b: AllianceId) -> Result<Option<War>> {
        Ok(self.wars.iter().find(|war| war.between(a, b)).copied())
    }
}

impl StoreReader for MemoryView<'_> {
    fn actor(&self, id: ActorId) -> Result<Option<ActorSnapshot>> {
        self.state.actor(id)
    }

    fn actor_by_name(&self, name: &str) -> Result<Option<ActorSnapshot>> {
        self.state.actor_by_name(name)
    }

    fn alliance_structures(&self, alliance: AllianceId) -> Result<AllianceStructureLevels> {
        self.state.alliance_structures(alliance)
    }

    fn edicts(&self, owner: ActorId) -> Result<Vec<EdictKind>> {
        self.state.edicts(owner)
    }

    fn armory(&self, owner: ActorId) -> Result<ArmoryLoadout> {
        self.state.armory(owner)
    }

    fn effect_rows(&self, owner: ActorId) -> Result<Vec<EffectRecord>> {
        self.state.effect_rows(owner)
    }

    fn war_between(&self, a: AllianceId, b: AllianceId) -> Result<Option<War>> {
        self.state.war_between(a, b)
    }
}

impl StoreReader for MemoryTransaction<'_> {
    fn actor(&self, id: ActorId) -> Result<Option<ActorSnapshot>> {
        self.working.actor(id)
    }

    fn actor_by_name(&self, name: &str) -> Result<Option<ActorSnapshot>> {
        self.working.actor_by_name(name)
    }

    fn alliance_structures(&self, alliance: AllianceId) -> Result<AllianceStructureLevels> {
        self.working.alliance_structures(alliance)
    }

    fn edicts(&self, owner: ActorId) -> Result<Vec<EdictKind>> {
        self.working.edicts(owner)
    }

    fn armory(&self, owner: ActorId) -> Result<ArmoryLoadout> {
        self.working.armory(owner)
    }

    fn effect_rows(&self, owner: ActorId) -> Result<Vec<EffectRecord>> {
        self.working.effect_rows(owner)
    }

    fn war_between(&self, a: AllianceId, b: AllianceId) -> Result<Option<War>> {
        self.working.war_between(a, b)
    }
}

impl StoreTransaction for MemoryTransaction<'_> {
    fn apply_delta(&mut self, id: ActorId, delta: &ActorDelta) -> Result<ActorSnapshot> {
        let actor = self
            .working
            .actors
            .get_mut(&id)
            .ok_or(RepositoryError::UnknownActor(id))?;
        if delta.is_empty() {
            return Ok(actor.clone());
        }
        let updated = actor
            .applying(delta)
            .ok_or(RepositoryError::InvalidDelta(id))?;
        *actor = updated.clone();
        Ok(updated)
    }

    fn upsert_effect(&mut self, record: EffectRecord) -> Result<()> {
        self.working
            .effects
            .entry(record.owner)
            .or_default()
            .insert(record.kind, record);
        Ok(())
    }

    fn remove_effect(&mut self, owner: ActorId, kind: EffectKind) -> Result<bool> {
        Ok(self
            .working
            .effects
            .get_mut(&owner)
            .and_then(|rows| rows.remove(&kind))
            .is_some())
    }

    fn purge_expired(&mut self, now: Timestamp) -> Result<usize> {
        let mut purged = 0;
        for rows in self.working.effects.values_mut() {
            let before = rows.len();
            rows.retain(|_, record| record.is_active(now));
            purged += before - rows.len();
        }
        self.working.effects.retain(|_, rows| !rows.is_empty());
        Ok(purged)
    }

    fn insert_battle_report(&mut self, mut report: BattleReport) -> Result<ReportId> {
        if report.id.is_pending() {
            report.id = self.working.next_report_id();
        }
        let id = report.id;
        self.working.battle_reports.push(report);
        Ok(id)
    }

    fn insert_spy_report(&mut self, mut report: SpyReport) -> Result<ReportId> {
        if report.id.is_pending() {
            report.id = self.working.next_report_id();
        }
        let id = report.id;
        self.working.spy_reports.push(report);
        Ok(id)
    }

    fn insert_notification(&mut self, notification: Notification) -> Result<()> {
        self.working.notifications.push(notification);
        Ok(())
    }

    fn insert_war_log(&mut self, log: WarBattleLog) -> Result<()> {
        self.working.war_logs.push(log);
        Ok(())
    }

    fn commit(mut self: Box<Self>) -> Result<()> {
        let working = std::mem::take(&mut self.working);
        self.store.write(|state| *state = working)?;
        self.committed = true;
        tracing::trace!("store transaction committed");
        Ok(())
    }
}

impl Drop for MemoryTransaction<'_> {
    fn drop(&mut self) {
        if !self.committed {
            tracing::debug!("store transaction rolled back");
        }
    }
}

fn rows_of(state: &StoreSnapshot, owner: ActorId) -> Vec<EffectRecord> {
    state
        .effects
        .get(&owner)
        .map(|rows| rows.values().cloned().collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use dominion_core::Resources;

    use super::*;

    fn seeded() -> InMemoryStore {
        let store = InMemoryStore::new();
        store
            .insert_actor(ActorSnapshot::new(ActorId(1), "Ariadne").with_resources(Resources {
                credits: 100,
                attack_turns: 3,
                ..Resources::default()
            }))
            .expect("seed");
        store
    }

    #[test]
    fn dropped_transactions_roll_back() {
        let store = seeded();
        {
            let mut tx = store.begin().expect("begin");
            tx.apply_delta(
                ActorId(1),
                &ActorDelta {
                    credits: -50,
                    ..ActorDelta::default()
                },
            )
            .expect("apply");
            assert_eq!(tx.actor(ActorId(1)).expect("read").map(|a| a.resources.credits), Some(50));
        }
        let actor = store.actor(ActorId(1)).expect("read").expect("exists");
        assert_eq!(actor.resources.credits, 100);
    }

    #[test]
    fn commits_are_visible() {
        let store = seeded();
        let mut tx = store.begin().expect("begin");
        tx.apply_delta(
            ActorId(1),
            &ActorDelta {
                attack_turns: -3,
                ..ActorDelta::default()
            },
        )
        .expect("apply");
        tx.commit().expect("commit");
        let actor = store.actor(ActorId(1)).expect("read").expect("exists");
        assert_eq!(actor.resources.attack_turns, 0);
    }

    #[test]
    fn negative_balances_are_refused() {
        let store = seeded();
        let mut tx = store.begin().expect("begin");
        let err = tx
            .apply_delta(
                ActorId(1),
                &ActorDelta {
                    attack_turns: -4,
                    ..ActorDelta::default()
                },
            )
            .unwrap_err();
        assert!(matches!(err, RepositoryError::InvalidDelta(ActorId(1))));
    }

    #[test]
    fn views_read_committed_state_while_a_writer_is_open() {
        let store = seeded();
        let mut tx = store.begin().expect("begin");
        tx.apply_delta(
            ActorId(1),
            &ActorDelta {
                credits: -50,
                ..ActorDelta::default()
            },
        )
        .expect("apply");

        {
            let view = store.view().expect("view");
            let actor = view.actor(ActorId(1)).expect("read").expect("exists");
            assert_eq!(actor.resources.credits, 100);
        }

        tx.commit().expect("commit");
        let view = store.view().expect("view");
        let actor = view.actor_by_name("ariadne").expect("read").expect("exists");
        assert_eq!(actor.resources.credits, 50);
    }

    #[test]
    fn empty_deltas_leave_the_actor_untouched() {
        let store = seeded();
        let mut tx = store.begin().expect("begin");
        let actor = tx
            .apply_delta(ActorId(1), &ActorDelta::default())
            .expect("apply");
        assert_eq!(actor.resources.credits, 100);
        assert!(matches!(
            tx.apply_delta(ActorId(9), &ActorDelta::default()),
            Err(RepositoryError::UnknownActor(ActorId(9)))
        ));
    }

    #[test]
    fn purge_removes_only_expired_rows() {
        let store = seeded();
        let mut tx = store.begin().expect("begin");
        tx.upsert_effect(EffectRecord::new(ActorId(1), EffectKind::Jamming, Timestamp(10)))
            .expect("upsert");
        tx.upsert_effect(EffectRecord::new(ActorId(1), EffectKind::PeaceShield, Timestamp(30)))
            .expect("upsert");
        assert_eq!(tx.purge_expired(Timestamp(20)).expect("purge"), 1);
        tx.commit().expect("commit");

        let rows = store.effect_rows(ActorId(1)).expect("rows");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].kind, EffectKind::PeaceShield);
    }

    #[test]
    fn notifications_are_per_recipient() {
        let store = seeded();
        let mut tx = store.begin().expect("begin");
        tx.insert_notification(Notification {
            recipient: ActorId(1),
            title: "hello".into(),
            body: String::new(),
            created_at: Timestamp(0),
            report: None,
        })
        .expect("insert");
        tx.commit().expect("commit");
        assert_eq!(store.notifications_for(ActorId(1)).expect("read").len(), 1);
        assert!(store.notifications_for(ActorId(2)).expect("read").is_empty());
    }
}
