//! Empire-wide edicts. Magnitudes are data-driven per family.
use strum::IntoEnumIterator;

use crate::config::GameConfig;
use crate::stats::{BonusFamily, Modifier, ModifierSource};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(strum::Display, strum::EnumString, strum::EnumIter, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum EdictKind {
    MartialLaw,
    FortressDoctrine,
    FreeMarket,
    ShadowNetwork,
    PopulationBoom,
}

impl EdictKind {
    /// Reads `edicts.<key>.<family suffix>` for every family; zero entries are dropped.
    pub fn modifiers(self, config: &GameConfig) -> Vec<Modifier> {
        let key: &'static str = self.into();
        BonusFamily::iter()
            .filter_map(|family| {
                let magnitude = config.get(&format!("edicts.{key}.{}", family.config_suffix()), 0.0);
                (magnitude != 0.0).then_some(Modifier {
                    source: ModifierSource::Edict(self),
                    family,
                    kind: family.data_kind(),
                    magnitude,
                })
            })
            .collect()
    }
}
