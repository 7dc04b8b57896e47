use crate::state::{
    ActiveEffects, ActorId, AllianceId, AllianceStructureLevels, ArmoryLoadout, EdictKind,
    Timestamp,
};

/// Keyed lookups of the modifier sources that are not part of an
/// [`ActorSnapshot`](crate::state::ActorSnapshot).
///
/// Implementations must return empty values (never an error) for owners that
/// have nothing stored; errors are reserved for storage failures.
pub trait ModifierSources {
    type Error;

    /// Structure levels of `alliance`; empty for unknown alliances.
    fn alliance_structures(
        &self,
        alliance: AllianceId,
    ) -> Result<AllianceStructureLevels, Self::Error>;

    /// Edicts currently enacted by `owner`.
    fn active_edicts(&self, owner: ActorId) -> Result<Vec<EdictKind>, Self::Error>;

    /// Generals and item stacks equipped by `owner`.
    fn armory(&self, owner: ActorId) -> Result<ArmoryLoadout, Self::Error>;

    /// Effects of `owner` active at `now`; soft-expired rows are excluded.
    fn active_effects(&self, owner: ActorId, now: Timestamp)
    -> Result<ActiveEffects, Self::Error>;
}
