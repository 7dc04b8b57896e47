//! Empire structures and their per-level bonuses.
use std::collections::BTreeMap;
use std::str::FromStr;

use crate::config::GameConfig;
use crate::stats::{BonusFamily, Modifier, ModifierKind, ModifierSource};

/// Structures an empire can build. Each level adds `per_level` of its bonus.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(strum::Display, strum::EnumString, strum::EnumIter, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum StructureKind {
    Fortification,
    OffenseUpgrade,
    DefenseUpgrade,
    SpyUpgrade,
    SentryUpgrade,
    EconomyUpgrade,
    Population,
    AccountingFirm,
    /// Reduces the casualties of a winning side; not part of any power family.
    NaniteForge,
}

impl StructureKind {
    /// The family and stacking kind this structure feeds, if any.
    pub const fn bonus(self) -> Option<(BonusFamily, ModifierKind)> {
        use BonusFamily as F;
        use ModifierKind as K;
        match self {
            Self::Fortification | Self::DefenseUpgrade => Some((F::Defense, K::Flat)),
            Self::OffenseUpgrade => Some((F::Offense, K::Flat)),
            Self::SpyUpgrade => Some((F::Spy, K::Flat)),
            Self::SentryUpgrade => Some((F::Sentry, K::Flat)),
            Self::EconomyUpgrade => Some((F::Income, K::Flat)),
            Self::Population => Some((F::Citizens, K::Flat)),
            Self::AccountingFirm => Some((F::Income, K::Percent)),
            Self::NaniteForge => None,
        }
    }

    pub fn per_level(self, config: &GameConfig) -> f64 {
        let key: &'static str = self.into();
        config.get(&format!("structures.{key}.per_level"), 0.0)
    }
}

/// Structure levels of one empire. Missing structures are level zero.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StructureLevels {
    levels: BTreeMap<StructureKind, u32>,
}

impl StructureLevels {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds levels from storage keys; unknown keys are skipped.
    pub fn from_keyed<'a>(entries: impl IntoIterator<Item = (&'a str, u32)>) -> Self {
        let levels = entries
            .into_iter()
            .filter_map(|(key, level)| StructureKind::from_str(key).ok().map(|k| (k, level)))
            .collect();
        Self { levels }
    }

    pub fn level(&self, kind: StructureKind) -> u32 {
        self.levels.get(&kind).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn with(mut self, kind: StructureKind, level: u32) -> Self {
        self.set(kind, level);
        self
    }

    pub fn set(&mut self, kind: StructureKind, level: u32) {
        if level == 0 {
            self.levels.remove(&kind);
        } else {
            self.levels.insert(kind, level);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (StructureKind, u32)> + '_ {
        self.levels.iter().map(|(k, v)| (*k, *v))
    }

    pub fn total_levels(&self) -> u64 {
        self.levels.values().map(|v| u64::from(*v)).sum()
    }

    /// Modifiers contributed by every built structure.
    pub fn modifiers(&self, config: &GameConfig) -> Vec<Modifier> {
        self.iter()
            .filter_map(|(kind, level)| {
                let (family, modifier_kind) = kind.bonus()?;
                Some(Modifier {
                    source: ModifierSource::Structure(kind),
                    family,
                    kind: modifier_kind,
                    magnitude: kind.per_level(config) * f64::from(level),
                })
            })
            .collect()
    }

    /// Winner casualty reduction granted by the nanite forge.
    pub fn casualty_reduction(&self, config: &GameConfig) -> f64 {
        let kind = StructureKind::NaniteForge;
        kind.per_level(config) * f64::from(self.level(kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_storage_keys_are_ignored() {
        let levels = StructureLevels::from_keyed([("fortification", 3), ("moon_laser", 9)]);
        assert_eq!(levels.level(StructureKind::Fortification), 3);
        assert_eq!(levels.total_levels(), 3);
    }

    #[test]
    fn flat_and_percent_structures_map_to_families() {
        let config = GameConfig::standard();
        let levels = StructureLevels::new()
            .with(StructureKind::Fortification, 2)
            .with(StructureKind::AccountingFirm, 3)
            .with(StructureKind::NaniteForge, 5);

        let modifiers = levels.modifiers(&config);
        assert_eq!(modifiers.len(), 2);

        let fort = modifiers
            .iter()
            .find(|m| m.source == ModifierSource::Structure(StructureKind::Fortification))
            .expect("fortification modifier");
        assert_eq!(fort.family, BonusFamily::Defense);
        assert_eq!(fort.kind, ModifierKind::Flat);
        assert_eq!(fort.magnitude, 200.0);

        let firm = modifiers
            .iter()
            .find(|m| m.family == BonusFamily::Income)
            .expect("accounting firm modifier");
        assert_eq!(firm.kind, ModifierKind::Percent);
        assert!((firm.magnitude - 0.15).abs() < 1e-12);

        assert!((levels.casualty_reduction(&config) - 0.10).abs() < 1e-12);
    }

    #[test]
    fn missing_constants_contribute_zero() {
        let levels = StructureLevels::new().with(StructureKind::Fortification, 10);
        let modifiers = levels.modifiers(&GameConfig::empty());
        assert!(modifiers.iter().all(|m| m.magnitude == 0.0));
    }
}
