//! Generals and armory items equipped by an empire.
use crate::config::GameConfig;
use crate::stats::{BonusFamily, Modifier, ModifierSource};

/// A stack of identical armory items serving one unit type.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArmoryStack {
    /// Config key under `armory.items.<key>.power`.
    pub key: String,
    /// Which unit type carries it (offense → soldiers, defense → guards, ...).
    pub family: BonusFamily,
    pub quantity: u64,
}

impl ArmoryStack {
    pub fn new(key: impl Into<String>, family: BonusFamily, quantity: u64) -> Self {
        Self {
            key: key.into(),
            family,
            quantity,
        }
    }

    pub fn power(&self, config: &GameConfig) -> f64 {
        config.get(&format!("armory.items.{}.power", self.key), 0.0)
    }
}

/// Equipped generals and item stacks.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArmoryLoadout {
    pub generals: u32,
    pub stacks: Vec<ArmoryStack>,
}

impl ArmoryLoadout {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_generals(mut self, generals: u32) -> Self {
        self.generals = generals;
        self
    }

    #[must_use]
    pub fn with_stack(mut self, stack: ArmoryStack) -> Self {
        self.stacks.push(stack);
        self
    }

    /// Flat item power for `family` when `units` units can carry items.
    ///
    /// Each unit carries at most one item and the strongest items are handed
    /// out first.
    pub fn item_power(&self, family: BonusFamily, units: u64, config: &GameConfig) -> f64 {
        let mut stacks: Vec<(f64, u64)> = self
            .stacks
            .iter()
            .filter(|s| s.family == family)
            .map(|s| (s.power(config), s.quantity))
            .filter(|(power, quantity)| *power > 0.0 && *quantity > 0)
            .collect();
        stacks.sort_by(|a, b| b.0.total_cmp(&a.0));

        let mut unarmed = units;
        let mut total = 0.0;
        for (power, quantity) in stacks {
            if unarmed == 0 {
                break;
            }
            let armed = quantity.min(unarmed);
            total += power * armed as f64;
            unarmed -= armed;
        }
        total
    }

    /// Offense percentage from generals, capped by `armory.general.max`.
    pub fn general_bonus(&self, config: &GameConfig) -> f64 {
        let cap = config.get_u64("armory.general.max", u64::MAX);
        let generals = u64::from(self.generals).min(cap);
        generals as f64 * config.get("armory.general.offense_pct", 0.0)
    }

    /// Modifiers for one family given how many units of that family exist.
    pub fn modifiers(&self, family: BonusFamily, units: u64, config: &GameConfig) -> Vec<Modifier> {
        let mut out = vec![Modifier::flat(
            ModifierSource::Armory,
            family,
            self.item_power(family, units, config),
        )];
        if family == BonusFamily::Offense {
            out.push(Modifier::percent(
                ModifierSource::Armory,
                family,
                self.general_bonus(config),
            ));
        }
        out
    }
}
