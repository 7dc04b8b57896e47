//! Balance configuration loader.
//!
//! ```toml
//! [combat]
//! wipeout_ratio = 10
//!
//! [structures.fortification]
//! per_level = 100
//! ```
//!
//! becomes `combat.wipeout_ratio = 10.0` and
//! `structures.fortification.per_level = 100.0`.

use std::path::Path;

use anyhow::{Context, bail};
use dominion_core::GameConfig;
use toml::{Table, Value};

use crate::loaders::{LoadResult, read_file};

/// Loader for balance configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads `path` and merges it over [`GameConfig::standard`].
    ///
    /// Keys absent from the file keep their standard value.
    pub fn load(path: &Path) -> LoadResult<GameConfig> {
        let content = read_file(path)?;
        let overrides = Self::parse(&content)
            .with_context(|| format!("Failed to load balance file {}", path.display()))?;

        let mut config = GameConfig::standard();
        config.merge(&overrides);
        Ok(config)
    }

    /// Parses TOML into a configuration holding only the keys it defines.
    pub fn parse(content: &str) -> LoadResult<GameConfig> {
        let table: Table = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse balance TOML: {}", e))?;

        let mut config = GameConfig::empty();
        flatten("", &table, &mut config)?;
        Ok(config)
    }

    /// The bundled balance file, parsed.
    pub fn bundled() -> LoadResult<GameConfig> {
        Self::parse(crate::STANDARD_BALANCE)
    }
}

fn flatten(prefix: &str, table: &Table, config: &mut GameConfig) -> LoadResult<()> {
    for (name, value) in table {
        let key = if prefix.is_empty() {
            name.clone()
        } else {
            format!("{prefix}.{name}")
        };

        match value {
            Value::Table(nested) => flatten(&key, nested, config)?,
            Value::Integer(number) => config.set(key, *number as f64),
            Value::Float(number) if number.is_finite() => config.set(key, *number),
            Value::Boolean(flag) => config.set(key, if *flag { 1.0 } else { 0.0 }),
            Value::Float(_) => bail!("Balance key {key} is not a finite number"),
            other => bail!("Balance key {key} must be numeric, found {}", other.type_str()),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_tables_become_dotted_keys() {
        let config = ConfigLoader::parse(
            r#"
            [combat]
            wipeout_ratio = 8
            stalemate_band = 0.05

            [alliance_structures.warlords_throne]
            per_level = 0.2
            "#,
        )
        .expect("valid toml");

        assert_eq!(config.len(), 3);
        assert_eq!(config.get("combat.wipeout_ratio", 0.0), 8.0);
        assert_eq!(config.get("combat.stalemate_band", 0.0), 0.05);
        assert_eq!(
            config.get("alliance_structures.warlords_throne.per_level", 0.0),
            0.2
        );
    }

    #[test]
    fn strings_are_rejected() {
        let err = ConfigLoader::parse("[combat]\nwipeout_ratio = \"ten\"\n").unwrap_err();
        assert!(err.to_string().contains("combat.wipeout_ratio"));
    }

    #[test]
    fn bundled_balance_matches_the_standard_tuning() {
        let bundled = ConfigLoader::bundled().expect("bundled balance parses");
        let standard = GameConfig::standard();
        for (key, value) in standard.iter() {
            assert_eq!(bundled.get(key, f64::NAN), value, "{key}");
        }
        assert_eq!(bundled.len(), standard.len());
    }
}
