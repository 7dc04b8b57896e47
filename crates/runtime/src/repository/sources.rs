//! Modifier lookups served from a store reader.

use dominion_core::{
    ActiveEffects, ActorId, AllianceId, AllianceStructureLevels, ArmoryLoadout, EdictKind,
    ModifierSources, Timestamp,
};

use super::{RepositoryError, StoreReader};

/// Adapts a [`StoreReader`] to [`ModifierSources`].
///
/// Inside an operation the reader is the open transaction, so power is
/// computed from the same rows the operation is about to write.
pub struct TxSources<'a, R: ?Sized> {
    tx: &'a R,
}

impl<'a, R: StoreReader + ?Sized> TxSources<'a, R> {
    pub fn new(tx: &'a R) -> Self {
        Self { tx }
    }
}

impl<R: StoreReader + ?Sized> ModifierSources for TxSources<'_, R> {
    type Error = RepositoryError;

    fn alliance_structures(
        &self,
        alliance: AllianceId,
    ) -> Result<AllianceStructureLevels, Self::Error> {
        self.tx.alliance_structures(alliance)
    }

    fn active_edicts(&self, owner: ActorId) -> Result<Vec<EdictKind>, Self::Error> {
        self.tx.edicts(owner)
    }

    fn armory(&self, owner: ActorId) -> Result<ArmoryLoadout, Self::Error> {
        self.tx.armory(owner)
    }

    fn active_effects(
        &self,
        owner: ActorId,
        now: Timestamp,
    ) -> Result<ActiveEffects, Self::Error> {
        self.tx.active_effects(owner, now)
    }
}
