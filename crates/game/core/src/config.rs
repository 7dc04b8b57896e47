//! Balance configuration as a flat map of dotted keys.
//!
//! Every per-level constant, ratio threshold and casualty floor is looked up
//! through [`GameConfig::get`] with an explicit fallback. Modifier constants
//! fall back to zero, so an incomplete configuration weakens bonuses but never
//! makes an operation unresolvable.
use std::collections::BTreeMap;

/// Game configuration constants and tunable parameters.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct GameConfig {
    values: BTreeMap<String, f64>,
}

impl GameConfig {
    // ===== structural fallbacks used when a key is absent =====
    pub const DEFAULT_UNIT_POWER: f64 = 1.0;
    pub const DEFAULT_WIPEOUT_RATIO: f64 = 10.0;
    pub const DEFAULT_STALEMATE_BAND: f64 = 0.02;
    pub const DEFAULT_MAX_ATTACK_TURNS: u64 = 10;
    pub const DEFAULT_SAFEHOUSE_COOLDOWN_SECS: u64 = 3600;

    /// Configuration with no keys at all; every lookup returns its fallback.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The standard tuning shipped with the game.
    pub fn standard() -> Self {
        let mut config = Self::empty();
        for &(key, value) in STANDARD_VALUES {
            config.set(key, value);
        }
        config
    }

    /// Builds a configuration from `(key, value)` pairs.
    pub fn from_pairs<K: Into<String>>(pairs: impl IntoIterator<Item = (K, f64)>) -> Self {
        let mut config = Self::empty();
        for (key, value) in pairs {
            config.set(key, value);
        }
        config
    }

    /// Looks up `key`, returning `default` when it is absent or not finite.
    pub fn get(&self, key: &str, default: f64) -> f64 {
        match self.values.get(key) {
            Some(value) if value.is_finite() => *value,
            _ => default,
        }
    }

    /// Integer lookup; negative or fractional values are truncated toward zero.
    pub fn get_u64(&self, key: &str, default: u64) -> u64 {
        match self.values.get(key) {
            Some(value) if value.is_finite() && *value >= 0.0 => *value as u64,
            _ => default,
        }
    }

    pub fn set(&mut self, key: impl Into<String>, value: f64) {
        self.values.insert(key.into(), value);
    }

    /// Overlays `other` on top of this configuration (other wins).
    pub fn merge(&mut self, other: &GameConfig) {
        for (key, value) in &other.values {
            self.values.insert(key.clone(), *value);
        }
    }

    /// Builder-style [`GameConfig::set`].
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: f64) -> Self {
        self.set(key, value);
        self
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

/// The standard tuning. Mirrored by `data/balance.toml` in `dominion-content`.
const STANDARD_VALUES: &[(&str, f64)] = &[
    // units
    ("units.soldier.power", 1.0),
    ("units.guard.power", 1.0),
    ("units.spy.power", 1.0),
    ("units.sentry.power", 1.0),
    ("units.worker.income", 50.0),
    // income
    ("income.base_credits", 5000.0),
    ("income.base_citizens", 1.0),
    ("income.bank_interest_rate", 0.0),
    // structures (per level)
    ("structures.fortification.per_level", 100.0),
    ("structures.offense_upgrade.per_level", 100.0),
    ("structures.defense_upgrade.per_level", 100.0),
    ("structures.spy_upgrade.per_level", 50.0),
    ("structures.sentry_upgrade.per_level", 50.0),
    ("structures.economy_upgrade.per_level", 1000.0),
    ("structures.population.per_level", 1.0),
    ("structures.accounting_firm.per_level", 0.05),
    ("structures.nanite_forge.per_level", 0.02),
    // alliance structures (per level)
    ("alliance_structures.command_nexus.per_level", 0.05),
    ("alliance_structures.galactic_research_hub.per_level", 0.10),
    ("alliance_structures.citadel_shield.per_level", 0.05),
    ("alliance_structures.orbital_training_grounds.per_level", 0.05),
    ("alliance_structures.espionage_network.per_level", 0.05),
    ("alliance_structures.population_habitat.per_level", 5.0),
    ("alliance_structures.warlords_throne.per_level", 0.15),
    // stat points
    ("stats.strength.pct_per_point", 0.01),
    ("stats.constitution.pct_per_point", 0.01),
    ("stats.wealth.pct_per_point", 0.01),
    ("stats.dexterity.pct_per_point", 0.01),
    // edicts
    ("edicts.martial_law.offense_pct", 0.10),
    ("edicts.martial_law.income_pct", -0.05),
    ("edicts.fortress_doctrine.defense_pct", 0.10),
    ("edicts.free_market.income_pct", 0.10),
    ("edicts.shadow_network.spy_pct", 0.10),
    ("edicts.shadow_network.sentry_pct", 0.10),
    ("edicts.population_boom.citizens_flat", 3.0),
    // armory
    ("armory.general.offense_pct", 0.05),
    ("armory.general.max", 10.0),
    ("armory.items.pulse_rifle.power", 2.0),
    ("armory.items.plasma_lance.power", 5.0),
    ("armory.items.aegis_plate.power", 2.0),
    ("armory.items.bastion_array.power", 5.0),
    ("armory.items.cloak_module.power", 3.0),
    ("armory.items.motion_scanner.power", 3.0),
    // timed effects
    ("effects.void_offense_boost.offense_pct", 0.10),
    ("effects.void_offense_boost.cost", 25000.0),
    ("effects.void_offense_boost.duration_secs", 86400.0),
    ("effects.high_risk_protocol.income_pct", 0.50),
    ("effects.high_risk_protocol.casualty_reduction", 0.25),
    ("effects.high_risk_protocol.cost", 50000.0),
    ("effects.high_risk_protocol.duration_secs", 86400.0),
    ("effects.peace_shield.cost", 100000.0),
    ("effects.peace_shield.duration_secs", 43200.0),
    ("effects.jamming.cost", 20000.0),
    ("effects.jamming.duration_secs", 21600.0),
    ("effects.safehouse_cooldown.duration_secs", 3600.0),
    // combat
    ("combat.max_attack_turns", 10.0),
    ("combat.wipeout_ratio", 10.0),
    ("combat.stalemate_band", 0.02),
    ("combat.stalemate_loss_rate", 0.03),
    ("combat.winner_loss_rate", 0.05),
    ("combat.winner_min_losses", 1.0),
    ("combat.loser_loss_rate", 0.10),
    ("combat.casualty_variance", 0.10),
    ("combat.max_casualty_reduction", 0.90),
    ("combat.plunder.credit_pct", 0.10),
    ("combat.plunder.prestige_pct", 0.01),
    ("combat.conquer.credit_pct", 0.025),
    ("combat.conquer.prestige_pct", 0.05),
    // espionage
    ("espionage.turn_cost", 1.0),
    ("espionage.wipeout_ratio", 10.0),
    ("espionage.winner_loss_rate", 0.05),
    ("espionage.winner_min_losses", 1.0),
    ("espionage.loser_loss_rate", 0.10),
    ("espionage.casualty_variance", 0.10),
    ("espionage.max_casualty_reduction", 0.90),
    ("espionage.intel.credit_cost", 0.0),
    ("espionage.sabotage.credit_cost", 10000.0),
    ("espionage.sabotage.credit_destroy_pct", 0.05),
    ("espionage.sabotage.block_secs", 3600.0),
    // net worth
    ("networth.per_unit", 5.0),
    ("networth.per_structure_level", 500.0),
    ("networth.credit_divisor", 100.0),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_returns_default() {
        let config = GameConfig::empty();
        assert_eq!(config.get("structures.fortification.per_level", 0.0), 0.0);
        assert_eq!(config.get_u64("combat.max_attack_turns", 7), 7);
    }

    #[test]
    fn non_finite_values_fall_back() {
        let config = GameConfig::empty()
            .with("a", f64::NAN)
            .with("b", -3.0)
            .with("c", 4.9);
        assert_eq!(config.get("a", 1.5), 1.5);
        assert_eq!(config.get_u64("b", 2), 2);
        assert_eq!(config.get_u64("c", 0), 4);
    }

    #[test]
    fn merge_overrides_existing_keys() {
        let mut base = GameConfig::standard();
        let overrides = GameConfig::from_pairs([("combat.wipeout_ratio", 5.0)]);
        base.merge(&overrides);
        assert_eq!(base.get("combat.wipeout_ratio", 0.0), 5.0);
        assert_eq!(base.get("units.soldier.power", 0.0), 1.0);
    }

    #[test]
    fn standard_tuning_carries_structural_constants() {
        let config = GameConfig::standard();
        assert!(!config.is_empty());
        assert_eq!(
            config.get("combat.wipeout_ratio", f64::NAN),
            GameConfig::DEFAULT_WIPEOUT_RATIO
        );
        assert_eq!(config.get("units.soldier.power", 0.0), 1.0);
    }

    #[test]
    fn standard_synergy_matches_throne_rate() {
        let config = GameConfig::standard();
        let throne = config.get("alliance_structures.warlords_throne.per_level", 0.0);
        assert!((throne * 4.0 - 0.60).abs() < 1e-9);
    }
}
