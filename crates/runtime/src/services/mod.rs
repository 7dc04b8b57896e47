//! Operation services.
//!
//! Each call runs validate, resolve and persist inside one store transaction
//! and reports back with an [`OperationResult`](crate::api::OperationResult).
//! Events go out only after the transaction commits.

mod attack;
mod context;
mod effects;
mod spy;

pub use attack::AttackService;
pub use context::{ServiceContext, TargetRef};
pub use effects::EffectService;
pub use spy::SpyService;
