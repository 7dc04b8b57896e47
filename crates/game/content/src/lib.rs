//! Balance data and loaders.
//!
//! The standard tuning ships as `data/balance.toml`. Loaders flatten nested
//! TOML tables into the dotted keys read by [`dominion_core::GameConfig`].
//!
//! Content is consumed by the runtime and never appears in game state.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, LoadResult};

/// The bundled balance file.
pub const STANDARD_BALANCE: &str = include_str!("../data/balance.toml");
