//! Folds every modifier source into income, offense, defense, spy and sentry.
use crate::config::GameConfig;
use crate::env::ModifierSources;
use crate::state::{ActiveEffects, ActorSnapshot, StatKind, StructureKind, Timestamp};
use crate::stats::{BonusFamily, Modifier, ModifierSource, ModifierStack};

use super::breakdown::{IncomeBreakdown, PowerBreakdown, PowerProfile};

/// Every modifier that applies to one actor, gathered once.
#[derive(Clone, Debug, Default)]
pub struct ActorModifiers {
    modifiers: Vec<Modifier>,
    effects: ActiveEffects,
}

impl ActorModifiers {
    pub fn iter(&self) -> impl Iterator<Item = &Modifier> {
        self.modifiers.iter()
    }

    /// Effects that were active when the modifiers were gathered.
    pub fn effects(&self) -> &ActiveEffects {
        &self.effects
    }

    fn stack(&self, family: BonusFamily) -> ModifierStack {
        let mut stack = ModifierStack::new(family);
        stack.extend(self.modifiers.iter().copied());
        stack
    }
}

/// Pure power pipeline over pre-fetched snapshots and keyed source lookups.
///
/// The calculator never touches storage directly and knows nothing about
/// combat; it only turns an actor into numbers.
pub struct PowerCalculator<'a, S: ModifierSources + ?Sized> {
    config: &'a GameConfig,
    sources: &'a S,
    now: Timestamp,
}

impl<'a, S: ModifierSources + ?Sized> PowerCalculator<'a, S> {
    pub fn new(config: &'a GameConfig, sources: &'a S, now: Timestamp) -> Self {
        Self {
            config,
            sources,
            now,
        }
    }

    pub fn config(&self) -> &GameConfig {
        self.config
    }

    /// Gathers the modifiers of every source for `actor`.
    ///
    /// Actors without an alliance get no alliance modifiers; unknown
    /// structures and lapsed effects contribute nothing.
    pub fn modifiers(&self, actor: &ActorSnapshot) -> Result<ActorModifiers, S::Error> {
        let config = self.config;
        let mut modifiers = actor.structures.modifiers(config);

        if let Some(alliance) = actor.alliance {
            modifiers.extend(self.sources.alliance_structures(alliance)?.modifiers(config));
        }

        for (stat, family) in STAT_FAMILIES {
            let key: &'static str = (*stat).into();
            let per_point = config.get(&format!("stats.{key}.pct_per_point"), 0.0);
            modifiers.push(Modifier::percent(
                ModifierSource::Stat(*stat),
                *family,
                per_point * f64::from(actor.stats.points(*stat)),
            ));
        }

        for edict in self.sources.active_edicts(actor.id)? {
            modifiers.extend(edict.modifiers(config));
        }

        let armory = self.sources.armory(actor.id)?;
        let resources = &actor.resources;
        for (family, units) in [
            (BonusFamily::Offense, resources.soldiers),
            (BonusFamily::Defense, resources.guards),
            (BonusFamily::Spy, resources.spies),
            (BonusFamily::Sentry, resources.sentries),
        ] {
            modifiers.extend(armory.modifiers(family, units, config));
        }

        let effects = self.sources.active_effects(actor.id, self.now)?;
        modifiers.extend(effects.modifiers(config));

        Ok(ActorModifiers { modifiers, effects })
    }

    /// Income and citizen growth per turn.
    pub fn income_per_turn(&self, actor: &ActorSnapshot) -> Result<IncomeBreakdown, S::Error> {
        let modifiers = self.modifiers(actor)?;
        Ok(self.income_from(actor, &modifiers))
    }

    pub fn offense_power(&self, actor: &ActorSnapshot) -> Result<PowerBreakdown, S::Error> {
        let modifiers = self.modifiers(actor)?;
        Ok(self.power_from(actor, BonusFamily::Offense, &modifiers))
    }

    pub fn defense_power(&self, actor: &ActorSnapshot) -> Result<PowerBreakdown, S::Error> {
        let modifiers = self.modifiers(actor)?;
        Ok(self.power_from(actor, BonusFamily::Defense, &modifiers))
    }

    /// Espionage power of the actor's spies.
    pub fn spy_power(&self, actor: &ActorSnapshot) -> Result<PowerBreakdown, S::Error> {
        let modifiers = self.modifiers(actor)?;
        Ok(self.power_from(actor, BonusFamily::Spy, &modifiers))
    }

    /// Counter-espionage power of the actor's sentries.
    pub fn sentry_power(&self, actor: &ActorSnapshot) -> Result<PowerBreakdown, S::Error> {
        let modifiers = self.modifiers(actor)?;
        Ok(self.power_from(actor, BonusFamily::Sentry, &modifiers))
    }

    /// All outputs with a single round of source lookups.
    pub fn profile(&self, actor: &ActorSnapshot) -> Result<PowerProfile, S::Error> {
        let modifiers = self.modifiers(actor)?;
        Ok(PowerProfile {
            income: self.income_from(actor, &modifiers),
            offense: self.power_from(actor, BonusFamily::Offense, &modifiers),
            defense: self.power_from(actor, BonusFamily::Defense, &modifiers),
            spy: self.power_from(actor, BonusFamily::Spy, &modifiers),
            sentry: self.power_from(actor, BonusFamily::Sentry, &modifiers),
        })
    }

    /// Casualty reduction the actor enjoys when it wins: active effects plus
    /// the nanite forge, capped at `<scope>.max_casualty_reduction`.
    pub fn casualty_reduction(
        &self,
        actor: &ActorSnapshot,
        modifiers: &ActorModifiers,
        scope: &str,
    ) -> f64 {
        let cap = self
            .config
            .get(&format!("{scope}.max_casualty_reduction"), 1.0)
            .clamp(0.0, 1.0);
        let reduction = modifiers.effects().casualty_reduction(self.config)
            + actor.structures.casualty_reduction(self.config);
        reduction.clamp(0.0, cap)
    }

    /// Folds one combat family from already gathered modifiers.
    pub fn power_from(
        &self,
        actor: &ActorSnapshot,
        family: BonusFamily,
        modifiers: &ActorModifiers,
    ) -> PowerBreakdown {
        let resources = &actor.resources;
        let (units, unit_key) = match family {
            BonusFamily::Offense => (resources.soldiers, "soldier"),
            BonusFamily::Defense => (resources.guards, "guard"),
            BonusFamily::Spy => (resources.spies, "spy"),
            BonusFamily::Sentry => (resources.sentries, "sentry"),
            BonusFamily::Income | BonusFamily::Citizens => (0, "none"),
        };
        let power_per_unit = self.config.get(
            &format!("units.{unit_key}.power"),
            GameConfig::DEFAULT_UNIT_POWER,
        );
        let base_power = units as f64 * power_per_unit;

        let stack = modifiers.stack(family);
        let resolved = stack.resolve(base_power);

        PowerBreakdown {
            family,
            units,
            power_per_unit,
            base_power,
            structure_flat: stack.flat_from(|s| matches!(s, ModifierSource::Structure(_))),
            armory_flat: stack.flat_from(|s| matches!(s, ModifierSource::Armory)),
            edict_flat: stack.flat_from(|s| matches!(s, ModifierSource::Edict(_))),
            stat_bonus_pct: stack.percent_from(|s| matches!(s, ModifierSource::Stat(_))),
            edict_bonus_pct: stack.percent_from(|s| matches!(s, ModifierSource::Edict(_))),
            effect_bonus_pct: stack.percent_from(|s| matches!(s, ModifierSource::Effect(_))),
            armory_bonus_pct: stack.percent_from(|s| matches!(s, ModifierSource::Armory)),
            alliance_bonus_pct: stack.percent_from(|s| s.is_alliance()),
            synergy_multiplier: resolved.synergy_multiplier,
            total_bonus_pct: resolved.effective_percent,
            total_power: resolved.total.floor() as u64,
        }
    }

    /// Folds income and citizens from already gathered modifiers.
    pub fn income_from(&self, actor: &ActorSnapshot, modifiers: &ActorModifiers) -> IncomeBreakdown {
        let config = self.config;
        let resources = &actor.resources;

        let base_credits = config.get("income.base_credits", 0.0);
        let worker_income = resources.workers as f64 * config.get("units.worker.income", 0.0);
        let credits = modifiers.stack(BonusFamily::Income);
        let resolved = credits.resolve(base_credits + worker_income);

        let interest_rate = config.get("income.bank_interest_rate", 0.0).max(0.0);
        let interest = (resources.banked_credits as f64 * interest_rate).floor() as u64;

        let citizens = modifiers.stack(BonusFamily::Citizens);
        let base_citizens = config.get_u64("income.base_citizens", 0);
        let resolved_citizens = citizens.resolve(base_citizens as f64);
        let whole = |value: f64| value.max(0.0).floor() as u64;

        IncomeBreakdown {
            base_credits,
            workers: resources.workers,
            worker_income,
            economy_flat: credits.flat_from(|s| matches!(s, ModifierSource::Structure(_))),
            wealth_bonus_pct: credits
                .percent_from(|s| matches!(s, ModifierSource::Stat(StatKind::Wealth))),
            accounting_firm_bonus_pct: credits.percent_from(|s| {
                matches!(s, ModifierSource::Structure(StructureKind::AccountingFirm))
            }),
            edict_credit_bonus_pct: credits.percent_from(|s| matches!(s, ModifierSource::Edict(_))),
            effect_credit_bonus_pct: credits
                .percent_from(|s| matches!(s, ModifierSource::Effect(_))),
            alliance_credit_bonus_pct: credits.percent_from(|s| s.is_alliance()),
            synergy_multiplier: resolved.synergy_multiplier,
            total_credit_bonus_pct: resolved.effective_percent,
            interest,
            total_credit_income: (resolved.total.round() as u64).saturating_add(interest),

            base_citizens,
            structure_citizen_bonus: whole(
                citizens.flat_from(|s| matches!(s, ModifierSource::Structure(_))),
            ),
            edict_citizen_bonus: whole(citizens.flat_from(|s| matches!(s, ModifierSource::Edict(_)))),
            alliance_citizen_bonus: whole(citizens.flat_from(|s| s.is_alliance())),
            total_citizens: whole(resolved_citizens.total),
        }
    }
}

/// Which family each stat feeds.
const STAT_FAMILIES: &[(StatKind, BonusFamily)] = &[
    (StatKind::Strength, BonusFamily::Offense),
    (StatKind::Constitution, BonusFamily::Defense),
    (StatKind::Wealth, BonusFamily::Income),
    (StatKind::Dexterity, BonusFamily::Spy),
    (StatKind::Dexterity, BonusFamily::Sentry),
];
