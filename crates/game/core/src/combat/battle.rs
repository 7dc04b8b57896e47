//! Battles: soldiers against guards.
use crate::config::GameConfig;
use crate::state::{ActorDelta, gain, loss};

use super::casualties::{CasualtyRoll, Force, resolve_casualties};
use super::params::CasualtyParams;
use super::result::CombatResult;

/// Battle variants. Plunder takes more credits; conquer takes more prestige.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(strum::Display, strum::EnumString, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum BattleKind {
    Plunder,
    Conquer,
}

impl BattleKind {
    pub fn key(self) -> &'static str {
        self.into()
    }

    /// Share of the defender's on-hand credits taken at full turns.
    pub fn credit_pct(self, config: &GameConfig) -> f64 {
        config
            .get(&format!("combat.{}.credit_pct", self.key()), 0.0)
            .clamp(0.0, 1.0)
    }

    /// Share of the defender's net worth gained as prestige at full turns.
    pub fn prestige_pct(self, config: &GameConfig) -> f64 {
        config
            .get(&format!("combat.{}.prestige_pct", self.key()), 0.0)
            .max(0.0)
    }
}

/// Inputs for one battle, all captured before resolution.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BattleSetup {
    pub kind: BattleKind,
    pub turns: u64,
    pub max_turns: u64,
    pub attacker: Force,
    pub defender: Force,
    pub defender_credits: u64,
    pub defender_net_worth: u64,
}

/// Everything a battle decided. Losses and loot are final and non-negative.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleOutcome {
    pub kind: BattleKind,
    pub result: CombatResult,
    pub ratio: f64,
    pub turns_used: u64,
    pub attacker_power: u64,
    pub defender_power: u64,
    pub attacker_losses: u64,
    pub defender_losses: u64,
    pub credits_plundered: u64,
    pub prestige_gained: u64,
    /// Guards the defender had before losses.
    pub defender_total_guards: u64,
}

impl BattleOutcome {
    /// Attacker update: soldiers lost, turns spent, loot gained.
    pub fn attacker_delta(&self) -> ActorDelta {
        ActorDelta {
            credits: gain(self.credits_plundered),
            soldiers: loss(self.attacker_losses),
            attack_turns: loss(self.turns_used),
            war_prestige: gain(self.prestige_gained),
            ..ActorDelta::default()
        }
    }

    /// Defender update: guards lost, credits taken.
    pub fn defender_delta(&self) -> ActorDelta {
        ActorDelta {
            credits: loss(self.credits_plundered),
            guards: loss(self.defender_losses),
            ..ActorDelta::default()
        }
    }
}

/// Resolves a battle.
///
/// Loot is only taken on an attacker victory and scales with
/// `turns / max_turns`. Plundered credits never exceed the defender's
/// on-hand credits.
pub fn resolve_battle(setup: &BattleSetup, config: &GameConfig, roll: CasualtyRoll) -> BattleOutcome {
    let params = CasualtyParams::battle(config);
    let casualties = resolve_casualties(&setup.attacker, &setup.defender, &params, roll);

    let turn_share = if setup.max_turns == 0 {
        0.0
    } else {
        (setup.turns.min(setup.max_turns) as f64 / setup.max_turns as f64).clamp(0.0, 1.0)
    };

    let (credits_plundered, prestige_gained) = if casualties.result.attacker_won() {
        let credits = (setup.defender_credits as f64 * setup.kind.credit_pct(config) * turn_share)
            .floor() as u64;
        let prestige = (setup.defender_net_worth as f64
            * setup.kind.prestige_pct(config)
            * turn_share)
            .floor() as u64;
        (credits.min(setup.defender_credits), prestige)
    } else {
        (0, 0)
    };

    BattleOutcome {
        kind: setup.kind,
        result: casualties.result,
        ratio: casualties.ratio,
        turns_used: setup.turns,
        attacker_power: setup.attacker.power,
        defender_power: setup.defender.power,
        attacker_losses: casualties.attacker_losses,
        defender_losses: casualties.defender_losses,
        credits_plundered,
        prestige_gained,
        defender_total_guards: setup.defender.units,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup(kind: BattleKind, attack: u64, defense: u64, turns: u64) -> BattleSetup {
        BattleSetup {
            kind,
            turns,
            max_turns: 10,
            attacker: Force::new(attack, attack),
            defender: Force::new(defense, defense),
            defender_credits: 100_000,
            defender_net_worth: 20_000,
        }
    }

    #[test]
    fn five_hundred_soldiers_overrun_one_hundred_guards() {
        let config = GameConfig::standard();
        let outcome = resolve_battle(
            &setup(BattleKind::Plunder, 500, 100, 10),
            &config,
            CasualtyRoll::NEUTRAL,
        );
        assert_eq!(outcome.result, CombatResult::AttackerVictory);
        assert!(outcome.attacker_losses > 0);
        assert!(outcome.attacker_losses < outcome.defender_losses);
        assert!(outcome.defender_losses <= 100);
        assert_eq!(outcome.defender_total_guards, 100);
        assert_eq!(outcome.credits_plundered, 10_000);
        assert_eq!(outcome.prestige_gained, 200);
    }

    #[test]
    fn loot_scales_with_turns() {
        let config = GameConfig::standard();
        let outcome = resolve_battle(
            &setup(BattleKind::Conquer, 500, 100, 4),
            &config,
            CasualtyRoll::NEUTRAL,
        );
        // 100k × 2.5% × 0.4
        assert_eq!(outcome.credits_plundered, 1_000);
        // 20k × 5% × 0.4
        assert_eq!(outcome.prestige_gained, 400);
    }

    #[test]
    fn failed_attacks_take_nothing() {
        let config = GameConfig::standard();
        let outcome = resolve_battle(
            &setup(BattleKind::Plunder, 100, 500, 10),
            &config,
            CasualtyRoll::NEUTRAL,
        );
        assert_eq!(outcome.result, CombatResult::DefenderVictory);
        assert_eq!(outcome.credits_plundered, 0);
        assert_eq!(outcome.prestige_gained, 0);
        assert!(outcome.attacker_losses >= 1);
    }

    #[test]
    fn deltas_mirror_the_outcome() {
        let config = GameConfig::standard();
        let outcome = resolve_battle(
            &setup(BattleKind::Plunder, 500, 100, 3),
            &config,
            CasualtyRoll::NEUTRAL,
        );
        let attacker = outcome.attacker_delta();
        let defender = outcome.defender_delta();
        assert_eq!(attacker.attack_turns, -3);
        assert_eq!(attacker.credits, -defender.credits);
        assert_eq!(defender.guards, -(outcome.defender_losses as i64));
    }
}
