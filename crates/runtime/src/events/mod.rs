//! Topic-based event bus for runtime events.
//!
//! Events are published after a transaction commits and are best-effort:
//! persisted notifications and reports remain the record of what happened.

mod bus;
mod types;

pub use bus::{Event, EventBus, Topic};
pub use types::{CombatEvent, EffectEvent, EspionageEvent};
