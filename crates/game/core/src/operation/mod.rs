//! Operation rules that run before and around combat resolution.
//!
//! Validation is separated from resolution so that rejected requests never
//! reach the power calculator and never open a write.

mod error;
mod purchase;
mod validation;

pub use error::{BlockedByEffect, Rejection, ValidationFailure};
pub use purchase::{PurchasePlan, TerminationPlan, plan_purchase, plan_termination, sabotage_block};
pub use validation::{AttackPlan, SpyPlan, validate_attack, validate_spy};
