//! Power aggregation.
//!
//! [`PowerCalculator`] turns an [`ActorSnapshot`](crate::state::ActorSnapshot)
//! plus its keyed modifier sources into four families of numbers: income per
//! turn, offense, defense and espionage (spy / sentry). It has no knowledge of
//! how those numbers are used in combat.

mod breakdown;
mod calculator;
mod networth;

pub use breakdown::{IncomeBreakdown, PowerBreakdown, PowerProfile};
pub use calculator::{ActorModifiers, PowerCalculator};
pub use networth::net_worth;
