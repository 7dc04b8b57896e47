//! Modifier stacking following the power pipeline order:
//! Base → Flat → %Sum → Synergy → Final
//!
//! Every output of the power calculator (income, citizens, offense, defense,
//! spy, sentry) folds its modifiers through the same stack so the order is
//! identical everywhere.

use crate::state::{AllianceStructureKind, EdictKind, EffectKind, StatKind, StructureKind};

/// The output a modifier contributes to.
///
/// Percentage bonuses only stack with other bonuses of the same family, and a
/// synergy multiplier scales the percentage sum of each family separately.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(strum::Display, strum::EnumIter, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum BonusFamily {
    /// Credits per turn.
    Income,
    /// Untrained citizens per turn.
    Citizens,
    /// Attack power.
    Offense,
    /// Defense power.
    Defense,
    /// Espionage power of spies.
    Spy,
    /// Counter-espionage power of sentries.
    Sentry,
}

impl BonusFamily {
    /// Config suffix used by data-driven sources such as edicts.
    pub const fn config_suffix(self) -> &'static str {
        match self {
            Self::Income => "income_pct",
            Self::Citizens => "citizens_flat",
            Self::Offense => "offense_pct",
            Self::Defense => "defense_pct",
            Self::Spy => "spy_pct",
            Self::Sentry => "sentry_pct",
        }
    }

    /// Citizens are the only family whose data-driven bonus is flat.
    pub const fn data_kind(self) -> ModifierKind {
        match self {
            Self::Citizens => ModifierKind::Flat,
            _ => ModifierKind::Percent,
        }
    }
}

/// How a modifier's magnitude is applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ModifierKind {
    /// Added to the base value before any percentage (e.g. +100 defense).
    Flat,
    /// Summed with every other percentage of the family (0.05 = +5%).
    Percent,
    /// Scales the percentage sum once: `sum × (1 + rate)`.
    Synergy,
}

/// Where a modifier came from. Kept for breakdown auditing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ModifierSource {
    Structure(StructureKind),
    AllianceStructure(AllianceStructureKind),
    Stat(StatKind),
    Edict(EdictKind),
    Armory,
    Effect(EffectKind),
}

impl ModifierSource {
    pub const fn is_alliance(self) -> bool {
        matches!(self, Self::AllianceStructure(_))
    }
}

/// A single `(source, kind, magnitude)` contribution to one family.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Modifier {
    pub source: ModifierSource,
    pub family: BonusFamily,
    pub kind: ModifierKind,
    pub magnitude: f64,
}

impl Modifier {
    pub const fn flat(source: ModifierSource, family: BonusFamily, magnitude: f64) -> Self {
        Self {
            source,
            family,
            kind: ModifierKind::Flat,
            magnitude,
        }
    }

    pub const fn percent(source: ModifierSource, family: BonusFamily, magnitude: f64) -> Self {
        Self {
            source,
            family,
            kind: ModifierKind::Percent,
            magnitude,
        }
    }

    pub const fn synergy(source: ModifierSource, family: BonusFamily, rate: f64) -> Self {
        Self {
            source,
            family,
            kind: ModifierKind::Synergy,
            magnitude: rate,
        }
    }
}

/// The modifiers of one family, folded in pipeline order.
///
/// # Example
/// ```
/// # use dominion_core::stats::{BonusFamily, Modifier, ModifierSource, ModifierStack};
/// # use dominion_core::state::AllianceStructureKind as A;
/// let mut stack = ModifierStack::new(BonusFamily::Income);
/// stack.add(Modifier::percent(ModifierSource::AllianceStructure(A::CommandNexus), BonusFamily::Income, 0.05));
/// stack.add(Modifier::percent(ModifierSource::AllianceStructure(A::GalacticResearchHub), BonusFamily::Income, 0.10));
/// stack.add(Modifier::synergy(ModifierSource::AllianceStructure(A::WarlordsThrone), BonusFamily::Income, 0.60));
///
/// let resolved = stack.resolve(1000.0);
/// // (0.05 + 0.10) × 1.6 = 0.24
/// assert!((resolved.effective_percent - 0.24).abs() < 1e-9);
/// assert!((resolved.total - 1240.0).abs() < 1e-9);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ModifierStack {
    family: BonusFamily,
    modifiers: Vec<Modifier>,
}

impl ModifierStack {
    pub fn new(family: BonusFamily) -> Self {
        Self {
            family,
            modifiers: Vec::new(),
        }
    }

    /// Adds a modifier; modifiers of another family or with zero magnitude are ignored.
    pub fn add(&mut self, modifier: Modifier) {
        if modifier.family == self.family && modifier.magnitude != 0.0 {
            self.modifiers.push(modifier);
        }
    }

    pub fn extend(&mut self, modifiers: impl IntoIterator<Item = Modifier>) {
        for modifier in modifiers {
            self.add(modifier);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Modifier> {
        self.modifiers.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.modifiers.is_empty()
    }

    pub fn len(&self) -> usize {
        self.modifiers.len()
    }

    fn sum_where(&self, kind: ModifierKind, pred: impl Fn(&ModifierSource) -> bool) -> f64 {
        self.modifiers
            .iter()
            .filter(|m| m.kind == kind && pred(&m.source))
            .map(|m| m.magnitude)
            .sum()
    }

    pub fn flat_sum(&self) -> f64 {
        self.sum_where(ModifierKind::Flat, |_| true)
    }

    pub fn percent_sum(&self) -> f64 {
        self.sum_where(ModifierKind::Percent, |_| true)
    }

    /// Combined synergy rate. Several synergy sources add their rates; the
    /// result is still applied exactly once.
    pub fn synergy_rate(&self) -> f64 {
        self.sum_where(ModifierKind::Synergy, |_| true)
    }

    pub fn synergy_multiplier(&self) -> f64 {
        1.0 + self.synergy_rate()
    }

    /// Flat contribution of the sources matching `pred`.
    pub fn flat_from(&self, pred: impl Fn(&ModifierSource) -> bool) -> f64 {
        self.sum_where(ModifierKind::Flat, pred)
    }

    /// Percentage contribution of the sources matching `pred`, after synergy.
    ///
    /// Synergy is linear over the sum, so per-source shares add up to the
    /// effective percentage.
    pub fn percent_from(&self, pred: impl Fn(&ModifierSource) -> bool) -> f64 {
        self.sum_where(ModifierKind::Percent, pred) * self.synergy_multiplier()
    }

    /// Folds the stack over `base`.
    ///
    /// # Formula
    ///
    /// ```text
    /// effective = percent_sum × (1 + synergy_rate)
    /// total     = max(0, (base + flat_sum) × (1 + effective))
    /// ```
    pub fn resolve(&self, base: f64) -> ResolvedStack {
        let flat = self.flat_sum();
        let percent_sum = self.percent_sum();
        let synergy_multiplier = self.synergy_multiplier();
        let effective_percent = percent_sum * synergy_multiplier;
        let total = ((base + flat) * (1.0 + effective_percent)).max(0.0);

        ResolvedStack {
            base,
            flat,
            percent_sum,
            synergy_multiplier,
            effective_percent,
            total,
        }
    }
}

/// Result of folding a [`ModifierStack`]; all fields unrounded.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResolvedStack {
    pub base: f64,
    pub flat: f64,
    pub percent_sum: f64,
    pub synergy_multiplier: f64,
    pub effective_percent: f64,
    pub total: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::AllianceStructureKind as A;

    fn alliance(kind: A) -> ModifierSource {
        ModifierSource::AllianceStructure(kind)
    }

    #[test]
    fn synergy_applies_once_to_summed_percentages() {
        let mut stack = ModifierStack::new(BonusFamily::Income);
        stack.add(Modifier::percent(alliance(A::CommandNexus), BonusFamily::Income, 0.05));
        stack.add(Modifier::percent(
            alliance(A::GalacticResearchHub),
            BonusFamily::Income,
            0.10,
        ));
        stack.add(Modifier::synergy(alliance(A::WarlordsThrone), BonusFamily::Income, 0.60));

        let resolved = stack.resolve(100.0);
        assert!((resolved.effective_percent - 0.24).abs() < 1e-9);
        assert!((resolved.synergy_multiplier - 1.6).abs() < 1e-9);
        assert!((resolved.total - 124.0).abs() < 1e-9);
    }

    #[test]
    fn synergy_without_percentages_changes_nothing() {
        let mut stack = ModifierStack::new(BonusFamily::Offense);
        stack.add(Modifier::synergy(alliance(A::WarlordsThrone), BonusFamily::Offense, 0.60));
        stack.add(Modifier::flat(ModifierSource::Armory, BonusFamily::Offense, 50.0));

        let resolved = stack.resolve(100.0);
        assert_eq!(resolved.effective_percent, 0.0);
        assert_eq!(resolved.total, 150.0);
    }

    #[test]
    fn foreign_family_and_zero_modifiers_are_ignored() {
        let mut stack = ModifierStack::new(BonusFamily::Defense);
        stack.add(Modifier::percent(ModifierSource::Armory, BonusFamily::Offense, 0.5));
        stack.add(Modifier::percent(ModifierSource::Armory, BonusFamily::Defense, 0.0));
        assert!(stack.is_empty());
    }

    #[test]
    fn negative_percent_never_drives_total_below_zero() {
        let mut stack = ModifierStack::new(BonusFamily::Income);
        stack.add(Modifier::percent(
            ModifierSource::Edict(EdictKind::MartialLaw),
            BonusFamily::Income,
            -1.5,
        ));
        assert_eq!(stack.resolve(1000.0).total, 0.0);
    }

    #[test]
    fn per_source_shares_sum_to_effective_percent() {
        let mut stack = ModifierStack::new(BonusFamily::Income);
        stack.add(Modifier::percent(
            ModifierSource::Stat(StatKind::Wealth),
            BonusFamily::Income,
            0.10,
        ));
        stack.add(Modifier::percent(alliance(A::CommandNexus), BonusFamily::Income, 0.05));
        stack.add(Modifier::synergy(alliance(A::WarlordsThrone), BonusFamily::Income, 0.30));

        let alliance_share = stack.percent_from(|s| s.is_alliance());
        let other_share = stack.percent_from(|s| !s.is_alliance());
        let resolved = stack.resolve(0.0);
        assert!((alliance_share + other_share - resolved.effective_percent).abs() < 1e-12);
        assert!((alliance_share - 0.065).abs() < 1e-12);
    }
}
