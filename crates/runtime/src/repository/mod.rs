//! Repository layer for mutable game data.
//!
//! Repositories hold the rows operations read and write: actors, modifier
//! sources, effect rows, reports, notifications and war logs. Balance
//! constants are configuration, not repository data.

mod error;
mod file;
mod memory;
mod records;
mod sources;
mod traits;

pub use error::{RepositoryError, Result};
pub use file::FileSnapshotRepository;
pub use memory::{InMemoryStore, MemoryTransaction, MemoryView};
pub use records::{
    BattleReport, Notification, SpyReport, StoreSnapshot, War, WarBattleLog,
};
pub use sources::TxSources;
pub use traits::{GameStore, StoreReader, StoreTransaction};
