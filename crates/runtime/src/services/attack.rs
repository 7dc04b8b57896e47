//! Battles between two empires.

use std::sync::Arc;

use dominion_core::{
    ActiveEffects, ActorId, BattleKind, BattleOutcome, BattleSetup, BlockedByEffect, BonusFamily,
    CasualtyParams, CombatResult, ErrorContext, Force, PowerCalculator, Rejection, ReportId,
    ValidationFailure, net_worth, resolve_battle, validate_attack,
};

use crate::api::{OperationData, OperationResult, Result};
use crate::events::CombatEvent;
use crate::repository::{BattleReport, Notification, TxSources, WarBattleLog};

use super::{ServiceContext, TargetRef};

/// Resolves attacks: soldiers against guards.
pub struct AttackService {
    ctx: Arc<ServiceContext>,
}

impl AttackService {
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// Attacks `target` spending `turns` attack turns.
    ///
    /// Never panics or errors: every failure, including a store that cannot
    /// commit, comes back as an unsuccessful [`OperationResult`] with nothing
    /// persisted.
    pub fn attack(
        &self,
        attacker: ActorId,
        target: impl Into<TargetRef>,
        kind: BattleKind,
        turns: u64,
    ) -> OperationResult {
        let target = target.into();
        let context = ErrorContext::new("attack").with_actor(attacker);
        match self.try_attack(attacker, &target, kind, turns) {
            Ok(result) => result,
            Err(err) => self.ctx.fail(&context, err),
        }
    }

    fn try_attack(
        &self,
        attacker_id: ActorId,
        target: &TargetRef,
        kind: BattleKind,
        turns: u64,
    ) -> Result<OperationResult> {
        let config = self.ctx.config.as_ref();
        let now = self.ctx.clock.now();
        let mut tx = self.ctx.store.begin()?;

        let attacker = tx
            .actor(attacker_id)?
            .ok_or(ValidationFailure::ActorNotFound)?;
        let defender = target.resolve(&*tx)?;
        let defender_effects = match &defender {
            Some(defender) => tx.active_effects(defender.id, now)?,
            None => ActiveEffects::none(),
        };

        let plan = match validate_attack(
            &attacker,
            defender.as_ref(),
            &defender_effects,
            kind,
            turns,
            config,
        ) {
            Ok(plan) => plan,
            Err(rejection) => {
                if let (Rejection::Blocked(BlockedByEffect::PeaceShield { .. }), Some(defender)) =
                    (&rejection, &defender)
                {
                    self.ctx.events.publish(CombatEvent::AttackBlocked {
                        attacker: attacker.id,
                        defender: defender.id,
                    });
                }
                return Err(rejection.into());
            }
        };
        let Some(defender) = defender else {
            return Err(ValidationFailure::TargetNotFound.into());
        };

        let (offense, defense, attacker_reduction, defender_reduction) = {
            let sources = TxSources::new(&*tx);
            let calc = PowerCalculator::new(config, &sources, now);
            let attacker_mods = calc.modifiers(&attacker)?;
            let defender_mods = calc.modifiers(&defender)?;
            (
                calc.power_from(&attacker, BonusFamily::Offense, &attacker_mods),
                calc.power_from(&defender, BonusFamily::Defense, &defender_mods),
                calc.casualty_reduction(&attacker, &attacker_mods, "combat"),
                calc.casualty_reduction(&defender, &defender_mods, "combat"),
            )
        };

        let setup = BattleSetup {
            kind: plan.kind,
            turns: plan.turns,
            max_turns: plan.max_turns,
            attacker: Force::new(offense.total_power, offense.units)
                .with_casualty_reduction(attacker_reduction),
            defender: Force::new(defense.total_power, defense.units)
                .with_casualty_reduction(defender_reduction),
            defender_credits: defender.resources.credits,
            defender_net_worth: net_worth(&defender, config),
        };
        let roll = self.ctx.roll(CasualtyParams::battle(config).casualty_variance);
        let outcome = resolve_battle(&setup, config, roll);

        tx.apply_delta(attacker.id, &outcome.attacker_delta())?;
        tx.apply_delta(defender.id, &outcome.defender_delta())?;

        let report = tx.insert_battle_report(BattleReport {
            id: ReportId::PENDING,
            attacker: attacker.id,
            defender: defender.id,
            attacker_name: attacker.character_name.clone(),
            defender_name: defender.character_name.clone(),
            created_at: now,
            outcome,
            attacker_offense: offense,
            defender_defense: defense,
        })?;

        tx.insert_notification(Notification {
            recipient: defender.id,
            title: format!("You were attacked by {}", attacker.character_name),
            body: defender_summary(&outcome, &attacker.character_name),
            created_at: now,
            report: Some(report),
        })?;

        if let (Some(ours), Some(theirs)) = (attacker.alliance, defender.alliance)
            && ours != theirs
            && let Some(war) = tx.war_between(ours, theirs)?
        {
            tx.insert_war_log(WarBattleLog {
                war: war.id,
                report,
                attacking_alliance: ours,
                prestige_gained: outcome.prestige_gained,
                units_killed: outcome.defender_losses,
                created_at: now,
            })?;
        }

        tx.commit()?;

        tracing::info!(
            attacker = %attacker.id,
            defender = %defender.id,
            kind = %outcome.kind,
            result = %outcome.result,
            ratio = outcome.ratio,
            attacker_losses = outcome.attacker_losses,
            defender_losses = outcome.defender_losses,
            credits = outcome.credits_plundered,
            "battle resolved"
        );
        self.ctx.events.publish(CombatEvent::BattleResolved {
            report,
            attacker: attacker.id,
            defender: defender.id,
            kind: outcome.kind,
            result: outcome.result,
            credits_plundered: outcome.credits_plundered,
            prestige_gained: outcome.prestige_gained,
        });

        Ok(OperationResult::ok(
            attacker_summary(&outcome, &defender.character_name),
            OperationData::Battle { report, outcome },
        ))
    }
}

fn attacker_summary(outcome: &BattleOutcome, defender: &str) -> String {
    match outcome.result {
        CombatResult::AttackerVictory => format!(
            "Victory against {defender}! You plundered {} credits and gained {} prestige, losing {} soldiers.",
            outcome.credits_plundered, outcome.prestige_gained, outcome.attacker_losses
        ),
        CombatResult::DefenderVictory => format!(
            "Defeat. {defender}'s defenses held and you lost {} soldiers.",
            outcome.attacker_losses
        ),
        CombatResult::Stalemate => format!(
            "Stalemate against {defender}. You lost {} soldiers.",
            outcome.attacker_losses
        ),
    }
}

fn defender_summary(outcome: &BattleOutcome, attacker: &str) -> String {
    match outcome.result {
        CombatResult::AttackerVictory => format!(
            "{attacker} broke through, killing {} of your {} guards and taking {} credits.",
            outcome.defender_losses, outcome.defender_total_guards, outcome.credits_plundered
        ),
        CombatResult::DefenderVictory => format!(
            "Your guards repelled {attacker}. You lost {} of {} guards.",
            outcome.defender_losses, outcome.defender_total_guards
        ),
        CombatResult::Stalemate => format!(
            "The battle against {attacker} ended in a stalemate. You lost {} guards.",
            outcome.defender_losses
        ),
    }
}
