//! Combat resolution.
//!
//! Pure functions over two [`Force`]s and the operation type. Battles and spy
//! missions share one ratio-driven casualty algorithm ([`casualties`]); they
//! differ in their tuning scope, whether stalemates exist, and what the
//! winner takes home.
//!
//! Randomness enters only through a [`CasualtyRoll`] drawn by the caller, so
//! every rule here is deterministic for a given roll.

pub mod battle;
pub mod casualties;
pub mod espionage;
pub mod params;
pub mod result;

pub use battle::{BattleKind, BattleOutcome, BattleSetup, resolve_battle};
pub use casualties::{Casualties, CasualtyRoll, Force, power_ratio, resolve_casualties};
pub use espionage::{IntelSnapshot, SpyCost, SpyMission, SpyOutcome, SpySetup, resolve_spy};
pub use params::CasualtyParams;
pub use result::{CombatResult, Side};
