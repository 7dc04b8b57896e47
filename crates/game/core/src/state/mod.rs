//! Snapshot and record types read by the power and combat rules.
//!
//! Everything here is a value type: runtime layers fetch these from storage,
//! hand them to the pure rules, and persist the resulting deltas.
pub mod actor;
pub mod alliance;
pub mod armory;
pub mod edict;
pub mod effect;
pub mod ids;
pub mod structures;

pub use actor::{ActorDelta, ActorSnapshot, Resources, StatKind, StatPoints, gain, loss};
pub use alliance::{AllianceStructureKind, AllianceStructureLevels};
pub use armory::{ArmoryLoadout, ArmoryStack};
pub use edict::EdictKind;
pub use effect::{ActiveEffects, EffectKind, EffectRecord};
pub use ids::{ActorId, AllianceId, ReportId, Timestamp, WarId};
pub use structures::{StructureKind, StructureLevels};
