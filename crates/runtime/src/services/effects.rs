//! Timed effect lifecycle: purchases, early termination, direct upkeep.
//!
//! Rows are soft-expired. Every read here goes through [`ActiveEffects`], so
//! a row past its expiry behaves exactly like a deleted one even before
//! [`EffectService::purge_expired`] removes it.

use std::sync::Arc;

use dominion_core::{
    ActiveEffects, ActorDelta, ActorId, EffectKind, EffectRecord, ErrorContext, ValidationFailure,
    loss, plan_purchase, plan_termination,
};

use crate::api::{EffectChange, OperationData, OperationResult, Result};
use crate::events::EffectEvent;
use crate::repository::RepositoryError;

use super::ServiceContext;

pub struct EffectService {
    ctx: Arc<ServiceContext>,
}

impl EffectService {
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// Buys `kind` for `buyer`.
    ///
    /// Buying high risk protocol deletes an active peace shield in the same
    /// transaction. Buying an effect that is already active extends it.
    pub fn purchase(&self, buyer: ActorId, kind: EffectKind) -> OperationResult {
        let context = ErrorContext::new("purchase_effect").with_actor(buyer);
        match self.try_purchase(buyer, kind) {
            Ok(result) => result,
            Err(err) => self.ctx.fail(&context, err),
        }
    }

    fn try_purchase(&self, buyer_id: ActorId, kind: EffectKind) -> Result<OperationResult> {
        let now = self.ctx.clock.now();
        let mut tx = self.ctx.store.begin()?;

        let buyer = tx.actor(buyer_id)?.ok_or(ValidationFailure::ActorNotFound)?;
        let effects = tx.active_effects(buyer.id, now)?;
        let plan = plan_purchase(&buyer, kind, &effects, &self.ctx.config, now)?;

        tx.apply_delta(
            buyer.id,
            &ActorDelta {
                credits: loss(plan.cost),
                ..ActorDelta::default()
            },
        )?;
        if let Some(replaced) = plan.replaces {
            tx.remove_effect(buyer.id, replaced)?;
        }
        tx.upsert_effect(plan.record(buyer.id))?;
        tx.commit()?;

        tracing::info!(
            owner = %buyer.id,
            effect = %kind,
            cost = plan.cost,
            expires_at = %plan.expires_at,
            "effect purchased"
        );
        if let Some(replaced) = plan.replaces {
            self.ctx.events.publish(EffectEvent::Removed {
                owner: buyer.id,
                kind: replaced,
            });
        }
        self.ctx.events.publish(EffectEvent::Applied {
            owner: buyer.id,
            kind,
            expires_at: plan.expires_at,
        });

        let message = match plan.replaces {
            Some(replaced) => format!(
                "{} activated. Your {} has been dropped.",
                kind.label(),
                replaced.label()
            ),
            None => format!("{} activated.", kind.label()),
        };
        Ok(OperationResult::ok(
            message,
            OperationData::Effect(EffectChange {
                owner: buyer.id,
                kind,
                expires_at: Some(plan.expires_at),
                credits_spent: plan.cost,
                removed: plan.replaces,
                cooldown: None,
            }),
        ))
    }

    /// Ends high risk protocol early and starts the safehouse cooldown.
    ///
    /// Letting the protocol run out naturally never starts a cooldown.
    pub fn terminate_high_risk_protocol(&self, owner: ActorId) -> OperationResult {
        let context = ErrorContext::new("terminate_effect").with_actor(owner);
        match self.try_terminate(owner) {
            Ok(result) => result,
            Err(err) => self.ctx.fail(&context, err),
        }
    }

    fn try_terminate(&self, owner_id: ActorId) -> Result<OperationResult> {
        let now = self.ctx.clock.now();
        let mut tx = self.ctx.store.begin()?;

        let owner = tx.actor(owner_id)?.ok_or(ValidationFailure::ActorNotFound)?;
        let effects = tx.active_effects(owner.id, now)?;
        let plan = plan_termination(owner.id, &effects, &self.ctx.config, now)?;

        tx.remove_effect(owner.id, plan.removes)?;
        let cooldown = plan.cooldown;
        tx.upsert_effect(cooldown.clone())?;
        tx.commit()?;

        tracing::info!(
            owner = %owner.id,
            effect = %plan.removes,
            cooldown_until = %cooldown.expires_at,
            "effect terminated early"
        );
        self.ctx.events.publish(EffectEvent::Removed {
            owner: owner.id,
            kind: plan.removes,
        });
        self.ctx.events.publish(EffectEvent::Applied {
            owner: owner.id,
            kind: cooldown.kind,
            expires_at: cooldown.expires_at,
        });

        Ok(OperationResult::ok(
            format!(
                "{} ended. {} is active.",
                plan.removes.label(),
                cooldown.kind.label()
            ),
            OperationData::Effect(EffectChange {
                owner: owner.id,
                kind: plan.removes,
                expires_at: None,
                credits_spent: 0,
                removed: Some(plan.removes),
                cooldown: Some((cooldown.kind, cooldown.expires_at)),
            }),
        ))
    }

    // ===== direct effect access =====

    /// Effects of `owner` active now, read from committed state.
    pub fn active_effects(&self, owner: ActorId) -> Result<ActiveEffects> {
        let now = self.ctx.clock.now();
        let view = self.ctx.store.view()?;
        Ok(view.active_effects(owner, now)?)
    }

    /// The `kind` row of `owner`, only while it is active.
    pub fn active_effect(&self, owner: ActorId, kind: EffectKind) -> Result<Option<EffectRecord>> {
        Ok(self.active_effects(owner)?.get(kind).cloned())
    }

    /// Sets `kind` on `owner` to expire `duration_secs` from now, replacing
    /// any existing row.
    pub fn add_effect(
        &self,
        owner: ActorId,
        kind: EffectKind,
        duration_secs: u64,
        metadata: Option<String>,
    ) -> Result<EffectRecord> {
        let now = self.ctx.clock.now();
        let mut tx = self.ctx.store.begin()?;
        if tx.actor(owner)?.is_none() {
            return Err(RepositoryError::UnknownActor(owner).into());
        }

        let mut record = EffectRecord::new(owner, kind, now.plus_secs(duration_secs));
        if let Some(metadata) = metadata {
            record = record.with_metadata(metadata);
        }
        tx.upsert_effect(record.clone())?;
        tx.commit()?;

        tracing::debug!(owner = %owner, effect = %kind, expires_at = %record.expires_at, "effect added");
        self.ctx.events.publish(EffectEvent::Applied {
            owner,
            kind,
            expires_at: record.expires_at,
        });
        Ok(record)
    }

    /// Deletes the `kind` row of `owner`. Returns whether a row existed.
    pub fn remove_effect(&self, owner: ActorId, kind: EffectKind) -> Result<bool> {
        let mut tx = self.ctx.store.begin()?;
        let removed = tx.remove_effect(owner, kind)?;
        tx.commit()?;

        if removed {
            tracing::debug!(owner = %owner, effect = %kind, "effect removed");
            self.ctx.events.publish(EffectEvent::Removed { owner, kind });
        }
        Ok(removed)
    }

    /// Physically deletes every soft-expired row.
    pub fn purge_expired(&self) -> Result<usize> {
        let now = self.ctx.clock.now();
        let mut tx = self.ctx.store.begin()?;
        let count = tx.purge_expired(now)?;
        tx.commit()?;

        if count > 0 {
            tracing::debug!(count, "expired effects purged");
            self.ctx.events.publish(EffectEvent::Purged { count });
        }
        Ok(count)
    }
}
