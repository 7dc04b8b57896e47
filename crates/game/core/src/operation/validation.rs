//! Pre-resolution checks for attacks and spy missions.
//!
//! Checks run in a fixed order and the first failure wins:
//!
//! 1. target exists
//! 2. not targeting yourself
//! 3. enough units
//! 4. valid and sufficient turns
//! 5. enough credits (spy missions)
//! 6. peace shield on the target
//! 7. jamming on the target (spy missions)

use crate::combat::{BattleKind, SpyCost, SpyMission};
use crate::config::GameConfig;
use crate::state::{ActiveEffects, ActorSnapshot, EffectKind};

use super::error::{BlockedByEffect, Rejection, ValidationFailure};

/// A validated attack, ready to resolve.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AttackPlan {
    pub kind: BattleKind,
    pub turns: u64,
    pub max_turns: u64,
}

/// A validated spy mission, ready to resolve.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpyPlan {
    pub mission: SpyMission,
    pub cost: SpyCost,
}

pub fn validate_attack(
    attacker: &ActorSnapshot,
    target: Option<&ActorSnapshot>,
    target_effects: &ActiveEffects,
    kind: BattleKind,
    turns: u64,
    config: &GameConfig,
) -> Result<AttackPlan, Rejection> {
    let target = check_target(attacker, target)?;

    let soldiers = attacker.resources.soldiers;
    if soldiers == 0 {
        return Err(ValidationFailure::InsufficientUnits {
            unit: "soldiers".into(),
            required: 1,
            available: soldiers,
        }
        .into());
    }

    let max_turns = config.get_u64("combat.max_attack_turns", GameConfig::DEFAULT_MAX_ATTACK_TURNS);
    if turns == 0 || turns > max_turns {
        return Err(ValidationFailure::InvalidTurns {
            requested: turns,
            max: max_turns,
        }
        .into());
    }
    check_turns(attacker, turns)?;

    check_peace_shield(target, target_effects)?;

    Ok(AttackPlan {
        kind,
        turns,
        max_turns,
    })
}

pub fn validate_spy(
    attacker: &ActorSnapshot,
    target: Option<&ActorSnapshot>,
    target_effects: &ActiveEffects,
    mission: SpyMission,
    config: &GameConfig,
) -> Result<SpyPlan, Rejection> {
    let target = check_target(attacker, target)?;

    let spies = attacker.resources.spies;
    if spies == 0 {
        return Err(ValidationFailure::InsufficientUnits {
            unit: "spies".into(),
            required: 1,
            available: spies,
        }
        .into());
    }

    let cost = mission.cost(config);
    check_turns(attacker, cost.turns)?;

    let credits = attacker.resources.credits;
    if credits < cost.credits {
        return Err(ValidationFailure::InsufficientCredits {
            required: cost.credits,
            available: credits,
        }
        .into());
    }

    check_peace_shield(target, target_effects)?;

    if target_effects.has(EffectKind::Jamming) {
        return Err(BlockedByEffect::Jammed {
            target: target.character_name.clone(),
            cost,
        }
        .into());
    }

    Ok(SpyPlan { mission, cost })
}

fn check_target<'a>(
    attacker: &ActorSnapshot,
    target: Option<&'a ActorSnapshot>,
) -> Result<&'a ActorSnapshot, ValidationFailure> {
    let target = target.ok_or(ValidationFailure::TargetNotFound)?;
    if target.id == attacker.id {
        return Err(ValidationFailure::SelfTarget);
    }
    Ok(target)
}

fn check_turns(attacker: &ActorSnapshot, required: u64) -> Result<(), ValidationFailure> {
    let available = attacker.resources.attack_turns;
    if available < required {
        return Err(ValidationFailure::InsufficientTurns {
            required,
            available,
        });
    }
    Ok(())
}

fn check_peace_shield(
    target: &ActorSnapshot,
    target_effects: &ActiveEffects,
) -> Result<(), BlockedByEffect> {
    if target_effects.has(EffectKind::PeaceShield) {
        return Err(BlockedByEffect::PeaceShield {
            target: target.character_name.clone(),
        });
    }
    Ok(())
}
