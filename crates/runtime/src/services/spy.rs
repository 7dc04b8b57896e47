//! Espionage: spies against sentries.

use std::sync::Arc;

use dominion_core::{
    ActiveEffects, ActorId, ActorSnapshot, BlockedByEffect, BonusFamily, CasualtyParams,
    EffectKind, ErrorContext, Force, GameError, IntelSnapshot, PowerCalculator, Rejection,
    ReportId, SpyMission, SpyOutcome, SpySetup, Timestamp, ValidationFailure, resolve_spy,
    sabotage_block, validate_spy,
};

use crate::api::{OperationData, OperationResult, Result};
use crate::events::{EffectEvent, EspionageEvent};
use crate::repository::{Notification, SpyReport, StoreTransaction, TxSources};

use super::{ServiceContext, TargetRef};

/// Resolves spy missions.
pub struct SpyService {
    ctx: Arc<ServiceContext>,
}

impl SpyService {
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// Sends spies on `mission` against `target`.
    ///
    /// A target under signal jamming still costs the attacker the mission's
    /// turns and credits; the result is a failure and no report is written.
    pub fn spy(
        &self,
        attacker: ActorId,
        target: impl Into<TargetRef>,
        mission: SpyMission,
    ) -> OperationResult {
        let target = target.into();
        let context = ErrorContext::new("spy").with_actor(attacker);
        match self.try_spy(attacker, &target, mission) {
            Ok(result) => result,
            Err(err) => self.ctx.fail(&context, err),
        }
    }

    fn try_spy(
        &self,
        attacker_id: ActorId,
        target: &TargetRef,
        mission: SpyMission,
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

        let plan = match validate_spy(
            &attacker,
            defender.as_ref(),
            &defender_effects,
            mission,
            config,
        ) {
            Ok(plan) => plan,
            Err(Rejection::Blocked(blocked @ BlockedByEffect::Jammed { .. })) => {
                return self.charge_jammed(tx, &attacker, defender.as_ref(), blocked);
            }
            Err(rejection) => return Err(rejection.into()),
        };
        let Some(defender) = defender else {
            return Err(ValidationFailure::TargetNotFound.into());
        };

        let (spy, sentry, attacker_reduction, defender_reduction, intel_profile) = {
            let sources = TxSources::new(&*tx);
            let calc = PowerCalculator::new(config, &sources, now);
            let attacker_mods = calc.modifiers(&attacker)?;
            let defender_mods = calc.modifiers(&defender)?;
            let profile = match mission {
                SpyMission::Intel => Some(calc.profile(&defender)?),
                SpyMission::Sabotage => None,
            };
            (
                calc.power_from(&attacker, BonusFamily::Spy, &attacker_mods),
                calc.power_from(&defender, BonusFamily::Sentry, &defender_mods),
                calc.casualty_reduction(&attacker, &attacker_mods, "espionage"),
                calc.casualty_reduction(&defender, &defender_mods, "espionage"),
                profile,
            )
        };

        let setup = SpySetup {
            mission: plan.mission,
            cost: plan.cost,
            attacker: Force::new(spy.total_power, spy.units)
                .with_casualty_reduction(attacker_reduction),
            defender: Force::new(sentry.total_power, sentry.units)
                .with_casualty_reduction(defender_reduction),
            defender_credits: defender.resources.credits,
        };
        let roll = self.ctx.roll(CasualtyParams::espionage(config).casualty_variance);
        let outcome = resolve_spy(&setup, config, roll);

        // Intel describes the target as the spies found it, before losses.
        let intel = intel_profile
            .filter(|_| outcome.success())
            .map(|profile| IntelSnapshot::capture(&defender, &profile));

        tx.apply_delta(attacker.id, &outcome.attacker_delta())?;
        tx.apply_delta(defender.id, &outcome.defender_delta())?;

        let report = tx.insert_spy_report(SpyReport {
            id: ReportId::PENDING,
            attacker: attacker.id,
            defender: defender.id,
            attacker_name: attacker.character_name.clone(),
            defender_name: defender.character_name.clone(),
            created_at: now,
            outcome,
            attacker_spy: spy,
            defender_sentry: sentry,
            intel,
        })?;

        let block = if mission == SpyMission::Sabotage && outcome.success() {
            self.apply_sabotage_block(&mut *tx, &attacker, &defender, report, now)?
        } else {
            None
        };

        tx.insert_notification(Notification {
            recipient: defender.id,
            title: defender_title(&outcome, &attacker.character_name),
            body: defender_body(&outcome),
            created_at: now,
            report: Some(report),
        })?;

        tx.commit()?;

        tracing::info!(
            attacker = %attacker.id,
            defender = %defender.id,
            mission = %outcome.mission,
            result = %outcome.result,
            ratio = outcome.ratio,
            spies_lost = outcome.spies_lost,
            sentries_lost = outcome.sentries_lost,
            "spy mission resolved"
        );
        self.ctx.events.publish(EspionageEvent::MissionResolved {
            report,
            attacker: attacker.id,
            defender: defender.id,
            mission: outcome.mission,
            success: outcome.success(),
        });
        if let Some(expires_at) = block {
            self.ctx.events.publish(EffectEvent::Applied {
                owner: defender.id,
                kind: EffectKind::SafehouseBlock,
                expires_at,
            });
        }

        Ok(OperationResult::ok(
            attacker_summary(&outcome, &defender.character_name),
            OperationData::Spy {
                report,
                outcome,
                intel,
            },
        ))
    }

    /// Charges a jammed mission and commits only that charge.
    fn charge_jammed(
        &self,
        mut tx: Box<dyn StoreTransaction + '_>,
        attacker: &ActorSnapshot,
        defender: Option<&ActorSnapshot>,
        blocked: BlockedByEffect,
    ) -> Result<OperationResult> {
        let cost = blocked.cost().unwrap_or_default();
        tx.apply_delta(attacker.id, &cost.delta())?;
        tx.commit()?;

        tracing::info!(
            attacker = %attacker.id,
            turns = cost.turns,
            credits = cost.credits,
            "spy mission jammed"
        );
        if let Some(defender) = defender {
            self.ctx.events.publish(EspionageEvent::MissionJammed {
                attacker: attacker.id,
                defender: defender.id,
                cost,
            });
        }

        Ok(OperationResult::failed(
            blocked.to_string(),
            OperationData::Jammed { cost },
            blocked.error_code(),
        ))
    }

    /// Locks the victim out of protection purchases. Returns the new expiry.
    fn apply_sabotage_block(
        &self,
        tx: &mut dyn StoreTransaction,
        attacker: &ActorSnapshot,
        defender: &ActorSnapshot,
        report: ReportId,
        now: Timestamp,
    ) -> Result<Option<Timestamp>> {
        let Some(record) = sabotage_block(defender.id, &self.ctx.config, now) else {
            return Ok(None);
        };

        let current = tx
            .active_effects(defender.id, now)?
            .get(EffectKind::SafehouseBlock)
            .map(|active| active.expires_at);
        if current.is_some_and(|expires_at| expires_at >= record.expires_at) {
            return Ok(None);
        }

        let metadata = serde_json::json!({
            "source": "sabotage",
            "attacker": attacker.id,
            "report": report,
        });
        let expires_at = record.expires_at;
        tx.upsert_effect(record.with_metadata(metadata.to_string()))?;
        Ok(Some(expires_at))
    }
}

fn attacker_summary(outcome: &SpyOutcome, defender: &str) -> String {
    match (outcome.mission, outcome.success()) {
        (SpyMission::Intel, true) => format!(
            "Your spies slipped past {defender}'s sentries and returned with intelligence."
        ),
        (SpyMission::Sabotage, true) => format!(
            "Sabotage against {defender} succeeded: {} credits destroyed.",
            outcome.credits_destroyed
        ),
        (_, false) => format!(
            "Your spies were caught by {defender}'s sentries. {} spies lost.",
            outcome.spies_lost
        ),
    }
}

fn defender_title(outcome: &SpyOutcome, attacker: &str) -> String {
    if outcome.success() {
        format!("Spies from {attacker} infiltrated your empire")
    } else {
        format!("Your sentries caught spies from {attacker}")
    }
}

fn defender_body(outcome: &SpyOutcome) -> String {
    format!(
        "{} of your {} sentries fell. {} credits were destroyed.",
        outcome.sentries_lost, outcome.defender_total_sentries, outcome.credits_destroyed
    )
}
