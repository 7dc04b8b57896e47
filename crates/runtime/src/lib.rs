//! Runtime orchestration for the dominion combat rules.
//!
//! This crate wires the pure rules of `dominion-core` to storage, time and
//! randomness. Consumers build a [`Dominion`] and call its operations; every
//! call runs inside one store transaction and answers with an
//! [`OperationResult`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the facade and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`services`] runs attacks, spy missions and effect purchases
//! - [`events`] provides topic-based event bus for flexible event routing
//! - [`repository`] holds the transactional store and snapshot files
//! - [`clock`] supplies the current time
pub mod api;
pub mod clock;
pub mod events;
pub mod repository;
pub mod runtime;
pub mod services;

pub use api::{EffectChange, OperationData, OperationError, OperationResult, Result};
pub use clock::{Clock, FixedClock, SystemClock};
pub use events::{CombatEvent, EffectEvent, EspionageEvent, Event, EventBus, Topic};
pub use repository::{
    BattleReport, FileSnapshotRepository, GameStore, InMemoryStore, MemoryTransaction,
    MemoryView, Notification, RepositoryError, SpyReport, StoreReader, StoreSnapshot,
    StoreTransaction, TxSources, War, WarBattleLog,
};
pub use runtime::{Dominion, DominionBuilder, RuntimeConfig};
pub use services::{AttackService, EffectService, ServiceContext, SpyService, TargetRef};
