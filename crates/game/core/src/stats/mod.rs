//! Modifier system shared by every power output.
//!
//! # Stack order
//!
//! ```text
//! [ Base (units × per-unit constant) ]
//!      ↓
//! [ Flat (structure levels, armory items, flat edicts) ]
//!      ↓
//! [ %Sum (stats, edicts, effects, generals, alliance %) ]
//!      ↓
//! [ Synergy (applied once to the %Sum) ]
//!      ↓
//! [ Final = (base + flat) × (1 + effective %) ]
//! ```

pub mod bonus;

pub use bonus::{
    BonusFamily, Modifier, ModifierKind, ModifierSource, ModifierStack, ResolvedStack,
};
