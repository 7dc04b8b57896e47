//! Espionage: spies against sentries.
use crate::config::GameConfig;
use crate::power::PowerProfile;
use crate::state::{ActorDelta, ActorSnapshot, loss};

use super::casualties::{CasualtyRoll, Force, resolve_casualties};
use super::params::CasualtyParams;
use super::result::CombatResult;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(strum::Display, strum::EnumString, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum SpyMission {
    /// Gathers an intel snapshot of the target.
    Intel,
    /// Destroys part of the target's on-hand credits.
    Sabotage,
}

impl SpyMission {
    pub fn key(self) -> &'static str {
        self.into()
    }

    /// Turns and credits a mission costs up front.
    pub fn cost(self, config: &GameConfig) -> SpyCost {
        SpyCost {
            turns: config.get_u64("espionage.turn_cost", 1),
            credits: config.get_u64(&format!("espionage.{}.credit_cost", self.key()), 0),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpyCost {
    pub turns: u64,
    pub credits: u64,
}

impl SpyCost {
    pub fn delta(self) -> ActorDelta {
        ActorDelta {
            credits: loss(self.credits),
            attack_turns: loss(self.turns),
            ..ActorDelta::default()
        }
    }
}

/// What a successful intel mission reveals.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IntelSnapshot {
    pub credits: u64,
    pub workers: u64,
    pub soldiers: u64,
    pub guards: u64,
    pub spies: u64,
    pub sentries: u64,
    pub offense_power: u64,
    pub defense_power: u64,
    pub spy_power: u64,
    pub sentry_power: u64,
    pub income_per_turn: u64,
    pub structure_levels: u64,
}

impl IntelSnapshot {
    pub fn capture(target: &ActorSnapshot, profile: &PowerProfile) -> Self {
        let resources = &target.resources;
        Self {
            credits: resources.credits,
            workers: resources.workers,
            soldiers: resources.soldiers,
            guards: resources.guards,
            spies: resources.spies,
            sentries: resources.sentries,
            offense_power: profile.offense.total_power,
            defense_power: profile.defense.total_power,
            spy_power: profile.spy.total_power,
            sentry_power: profile.sentry.total_power,
            income_per_turn: profile.income.total_credit_income,
            structure_levels: target.structures.total_levels(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpySetup {
    pub mission: SpyMission,
    pub cost: SpyCost,
    pub attacker: Force,
    pub defender: Force,
    pub defender_credits: u64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpyOutcome {
    pub mission: SpyMission,
    pub result: CombatResult,
    pub ratio: f64,
    pub cost: SpyCost,
    pub attacker_power: u64,
    pub defender_power: u64,
    pub spies_lost: u64,
    pub sentries_lost: u64,
    pub credits_destroyed: u64,
    /// Sentries the defender had before losses.
    pub defender_total_sentries: u64,
}

impl SpyOutcome {
    pub fn success(&self) -> bool {
        self.result.attacker_won()
    }

    /// Attacker update: spies lost plus the mission cost.
    pub fn attacker_delta(&self) -> ActorDelta {
        ActorDelta {
            spies: loss(self.spies_lost),
            ..self.cost.delta()
        }
    }

    pub fn defender_delta(&self) -> ActorDelta {
        ActorDelta {
            credits: loss(self.credits_destroyed),
            sentries: loss(self.sentries_lost),
            ..ActorDelta::default()
        }
    }
}

/// Resolves a spy mission. Ties go to the defender; there is no stalemate.
pub fn resolve_spy(setup: &SpySetup, config: &GameConfig, roll: CasualtyRoll) -> SpyOutcome {
    let params = CasualtyParams::espionage(config);
    let casualties = resolve_casualties(&setup.attacker, &setup.defender, &params, roll);

    let credits_destroyed = match setup.mission {
        SpyMission::Sabotage if casualties.result.attacker_won() => {
            let pct = config
                .get("espionage.sabotage.credit_destroy_pct", 0.0)
                .clamp(0.0, 1.0);
            ((setup.defender_credits as f64 * pct).floor() as u64).min(setup.defender_credits)
        }
        _ => 0,
    };

    SpyOutcome {
        mission: setup.mission,
        result: casualties.result,
        ratio: casualties.ratio,
        cost: setup.cost,
        attacker_power: setup.attacker.power,
        defender_power: setup.defender.power,
        spies_lost: casualties.attacker_losses,
        sentries_lost: casualties.defender_losses,
        credits_destroyed,
        defender_total_sentries: setup.defender.units,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup(mission: SpyMission, spy: u64, sentry: u64) -> SpySetup {
        let config = GameConfig::standard();
        SpySetup {
            mission,
            cost: mission.cost(&config),
            attacker: Force::new(spy, spy),
            defender: Force::new(sentry, sentry),
            defender_credits: 200_000,
        }
    }

    #[test]
    fn mission_costs_come_from_config() {
        let config = GameConfig::standard();
        assert_eq!(
            SpyMission::Sabotage.cost(&config),
            SpyCost {
                turns: 1,
                credits: 10_000
            }
        );
        assert_eq!(SpyMission::Intel.cost(&config).credits, 0);
    }

    #[test]
    fn successful_sabotage_destroys_credits() {
        let config = GameConfig::standard();
        let outcome = resolve_spy(
            &setup(SpyMission::Sabotage, 50, 10),
            &config,
            CasualtyRoll::NEUTRAL,
        );
        assert!(outcome.success());
        assert_eq!(outcome.credits_destroyed, 10_000);
        assert_eq!(outcome.defender_delta().credits, -10_000);
        assert_eq!(outcome.defender_total_sentries, 10);
    }

    #[test]
    fn equal_spy_power_fails() {
        let config = GameConfig::standard();
        let outcome = resolve_spy(
            &setup(SpyMission::Sabotage, 30, 30),
            &config,
            CasualtyRoll::NEUTRAL,
        );
        assert_eq!(outcome.result, CombatResult::DefenderVictory);
        assert_eq!(outcome.credits_destroyed, 0);
        assert!(outcome.spies_lost >= 1);
    }

    #[test]
    fn attacker_delta_includes_mission_cost() {
        let config = GameConfig::standard();
        let outcome = resolve_spy(
            &setup(SpyMission::Intel, 50, 10),
            &config,
            CasualtyRoll::NEUTRAL,
        );
        let delta = outcome.attacker_delta();
        assert_eq!(delta.attack_turns, -1);
        assert_eq!(delta.credits, 0);
        assert_eq!(delta.spies, -(outcome.spies_lost as i64));
    }
}
