//! Alliance structures: shared bonuses plus the synergy multiplier.
use std::collections::BTreeMap;
use std::str::FromStr;

use crate::config::GameConfig;
use crate::stats::{BonusFamily, Modifier, ModifierKind, ModifierSource};

/// Structures owned by an alliance and shared by every member.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(strum::Display, strum::EnumString, strum::EnumIter, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum AllianceStructureKind {
    CommandNexus,
    GalacticResearchHub,
    CitadelShield,
    OrbitalTrainingGrounds,
    EspionageNetwork,
    PopulationHabitat,
    /// Synergy structure: multiplies the percentage sum of every family.
    WarlordsThrone,
}

impl AllianceStructureKind {
    /// Families this structure feeds and how.
    pub fn bonuses(self) -> &'static [(BonusFamily, ModifierKind)] {
        use BonusFamily as F;
        use ModifierKind as K;
        match self {
            Self::CommandNexus | Self::GalacticResearchHub => &[(F::Income, K::Percent)],
            Self::CitadelShield => &[(F::Defense, K::Percent)],
            Self::OrbitalTrainingGrounds => &[(F::Offense, K::Percent)],
            Self::EspionageNetwork => &[(F::Spy, K::Percent), (F::Sentry, K::Percent)],
            Self::PopulationHabitat => &[(F::Citizens, K::Flat)],
            Self::WarlordsThrone => &[
                (F::Income, K::Synergy),
                (F::Citizens, K::Synergy),
                (F::Offense, K::Synergy),
                (F::Defense, K::Synergy),
                (F::Spy, K::Synergy),
                (F::Sentry, K::Synergy),
            ],
        }
    }

    pub fn per_level(self, config: &GameConfig) -> f64 {
        let key: &'static str = self.into();
        config.get(&format!("alliance_structures.{key}.per_level"), 0.0)
    }
}

/// Structure levels of one alliance.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AllianceStructureLevels {
    levels: BTreeMap<AllianceStructureKind, u32>,
}

impl AllianceStructureLevels {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds levels from storage keys; unknown keys are skipped.
    pub fn from_keyed<'a>(entries: impl IntoIterator<Item = (&'a str, u32)>) -> Self {
        let levels = entries
            .into_iter()
            .filter_map(|(key, level)| {
                AllianceStructureKind::from_str(key)
                    .ok()
                    .map(|k| (k, level))
            })
            .collect();
        Self { levels }
    }

    pub fn level(&self, kind: AllianceStructureKind) -> u32 {
        self.levels.get(&kind).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn with(mut self, kind: AllianceStructureKind, level: u32) -> Self {
        self.set(kind, level);
        self
    }

    pub fn set(&mut self, kind: AllianceStructureKind, level: u32) {
        if level == 0 {
            self.levels.remove(&kind);
        } else {
            self.levels.insert(kind, level);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (AllianceStructureKind, u32)> + '_ {
        self.levels.iter().map(|(k, v)| (*k, *v))
    }

    /// `base_per_level × level` for every structure and family it feeds.
    pub fn modifiers(&self, config: &GameConfig) -> Vec<Modifier> {
        let mut out = Vec::new();
        for (kind, level) in self.iter() {
            let magnitude = kind.per_level(config) * f64::from(level);
            for (family, modifier_kind) in kind.bonuses() {
                out.push(Modifier {
                    source: ModifierSource::AllianceStructure(kind),
                    family: *family,
                    kind: *modifier_kind,
                    magnitude,
                });
            }
        }
        out
    }
}
