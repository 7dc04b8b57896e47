//! Simulation settings read from the environment.
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

/// Settings of one simulation run.
#[derive(Clone, Debug, Default)]
pub struct SimConfig {
    /// Balance file merged over the standard tuning.
    pub balance_path: Option<PathBuf>,
    /// Seed for casualty rolls; entropy when unset.
    pub seed: Option<u64>,
    /// Directory the final world snapshot is saved to.
    pub save_dir: Option<PathBuf>,
}

impl SimConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `DOMINION_BALANCE` - TOML balance file (default: bundled balance)
    /// - `DOMINION_SEED` - Casualty roll seed (default: random)
    /// - `DOMINION_SAVE_DIR` - Save the world here after the run (default: no save)
    pub fn from_env() -> Self {
        Self {
            balance_path: env::var_os("DOMINION_BALANCE").map(PathBuf::from),
            seed: read_env("DOMINION_SEED"),
            save_dir: env::var_os("DOMINION_SAVE_DIR").map(PathBuf::from),
        }
    }
}

fn read_env<T: FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|value| value.trim().parse().ok())
}
