//! Deterministic combat and power rules for the dominion game.
//!
//! `dominion-core` defines the canonical rules (power aggregation, combat
//! resolution, operation validation and effect rules) as pure functions over
//! value snapshots. It performs no I/O and never reads the clock; the runtime
//! fetches snapshots, calls into these rules, and persists the resulting
//! deltas.
pub mod combat;
pub mod config;
pub mod env;
pub mod error;
pub mod operation;
pub mod power;
pub mod state;
pub mod stats;

pub use combat::{
    BattleKind, BattleOutcome, BattleSetup, CasualtyParams, CasualtyRoll, CombatResult, Force,
    IntelSnapshot, SpyCost, SpyMission, SpyOutcome, SpySetup, resolve_battle, resolve_spy,
};
pub use config::GameConfig;
pub use env::{ModifierSources, SnapshotSources};
pub use error::{ErrorContext, ErrorSeverity, GameError};
pub use operation::{
    AttackPlan, BlockedByEffect, PurchasePlan, Rejection, SpyPlan, TerminationPlan,
    ValidationFailure, plan_purchase, plan_termination, sabotage_block, validate_attack,
    validate_spy,
};
pub use power::{IncomeBreakdown, PowerBreakdown, PowerCalculator, PowerProfile, net_worth};
pub use state::{
    ActiveEffects, ActorDelta, ActorId, ActorSnapshot, AllianceId, AllianceStructureKind,
    AllianceStructureLevels, ArmoryLoadout, ArmoryStack, EdictKind, EffectKind, EffectRecord,
    ReportId, Resources, StatKind, StatPoints, StructureKind, StructureLevels, Timestamp, WarId,
    gain, loss,
};
pub use stats::{BonusFamily, Modifier, ModifierKind, ModifierSource, ModifierStack};
