use std::collections::HashMap;
use std::convert::Infallible;

use crate::env::ModifierSources;
use crate::state::{
    ActiveEffects, ActorId, AllianceId, AllianceStructureLevels, ArmoryLoadout, EdictKind,
    EffectRecord, Timestamp,
};

/// Pre-fetched modifier sources held in memory.
///
/// Used by tests and tools that already hold every row; expiry is still
/// evaluated against the `now` passed to [`ModifierSources::active_effects`].
#[derive(Clone, Debug, Default)]
pub struct SnapshotSources {
    alliances: HashMap<AllianceId, AllianceStructureLevels>,
    edicts: HashMap<ActorId, Vec<EdictKind>>,
    armories: HashMap<ActorId, ArmoryLoadout>,
    effects: HashMap<ActorId, Vec<EffectRecord>>,
}

impl SnapshotSources {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_alliance(mut self, alliance: AllianceId, levels: AllianceStructureLevels) -> Self {
        self.alliances.insert(alliance, levels);
        self
    }

    #[must_use]
    pub fn with_edict(mut self, owner: ActorId, edict: EdictKind) -> Self {
        self.edicts.entry(owner).or_default().push(edict);
        self
    }

    #[must_use]
    pub fn with_armory(mut self, owner: ActorId, loadout: ArmoryLoadout) -> Self {
        self.armories.insert(owner, loadout);
        self
    }

    #[must_use]
    pub fn with_effect(mut self, record: EffectRecord) -> Self {
        self.effects.entry(record.owner).or_default().push(record);
        self
    }
}

impl ModifierSources for SnapshotSources {
    type Error = Infallible;

    fn alliance_structures(
        &self,
        alliance: AllianceId,
    ) -> Result<AllianceStructureLevels, Self::Error> {
        Ok(self.alliances.get(&alliance).cloned().unwrap_or_default())
    }

    fn active_edicts(&self, owner: ActorId) -> Result<Vec<EdictKind>, Self::Error> {
        Ok(self.edicts.get(&owner).cloned().unwrap_or_default())
    }

    fn armory(&self, owner: ActorId) -> Result<ArmoryLoadout, Self::Error> {
        Ok(self.armories.get(&owner).cloned().unwrap_or_default())
    }

    fn active_effects(
        &self,
        owner: ActorId,
        now: Timestamp,
    ) -> Result<ActiveEffects, Self::Error> {
        let records = self.effects.get(&owner).cloned().unwrap_or_default();
        Ok(ActiveEffects::from_records(records, now))
    }
}
