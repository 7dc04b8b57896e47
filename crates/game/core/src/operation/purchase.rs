//! Effect purchase and termination rules.
use crate::config::GameConfig;
use crate::state::{ActiveEffects, ActorId, ActorSnapshot, EffectKind, EffectRecord, Timestamp};

use super::error::ValidationFailure;

/// Cooldowns that lock out protection purchases.
const SAFEHOUSE_LOCKS: [EffectKind; 2] = [EffectKind::SafehouseCooldown, EffectKind::SafehouseBlock];

/// A validated purchase.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PurchasePlan {
    pub kind: EffectKind,
    pub cost: u64,
    /// New expiry; extends an active effect from its current expiry.
    pub expires_at: Timestamp,
    /// Effect deleted in the same transaction.
    pub replaces: Option<EffectKind>,
}

impl PurchasePlan {
    pub fn record(&self, owner: ActorId) -> EffectRecord {
        EffectRecord::new(owner, self.kind, self.expires_at)
    }
}

/// Checks a purchase of `kind` by `buyer` at `now`.
///
/// Order: purchasable, configured, safehouse locks, conflicts, credits.
pub fn plan_purchase(
    buyer: &ActorSnapshot,
    kind: EffectKind,
    effects: &ActiveEffects,
    config: &GameConfig,
    now: Timestamp,
) -> Result<PurchasePlan, ValidationFailure> {
    if !kind.is_purchasable() {
        return Err(ValidationFailure::NotPurchasable(kind));
    }

    let duration = kind.duration_secs(config);
    if duration == 0 {
        return Err(ValidationFailure::EffectUnavailable(kind));
    }

    if kind.is_safehouse_gated()
        && let Some(lock) = SAFEHOUSE_LOCKS.into_iter().find(|lock| effects.has(*lock))
    {
        return Err(ValidationFailure::SafehouseLocked {
            requested: kind,
            lock,
        });
    }

    if kind == EffectKind::PeaceShield && effects.has(EffectKind::HighRiskProtocol) {
        return Err(ValidationFailure::ConflictingEffect {
            requested: kind,
            active: EffectKind::HighRiskProtocol,
        });
    }

    let cost = kind.cost(config);
    let available = buyer.resources.credits;
    if available < cost {
        return Err(ValidationFailure::InsufficientCredits {
            required: cost,
            available,
        });
    }

    let start = effects.get(kind).map_or(now, |active| active.expires_at.max(now));
    let replaces = (kind == EffectKind::HighRiskProtocol && effects.has(EffectKind::PeaceShield))
        .then_some(EffectKind::PeaceShield);

    Ok(PurchasePlan {
        kind,
        cost,
        expires_at: start.plus_secs(duration),
        replaces,
    })
}

/// Ending high risk protocol early.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TerminationPlan {
    pub removes: EffectKind,
    pub cooldown: EffectRecord,
}

pub fn plan_termination(
    owner: ActorId,
    effects: &ActiveEffects,
    config: &GameConfig,
    now: Timestamp,
) -> Result<TerminationPlan, ValidationFailure> {
    let kind = EffectKind::HighRiskProtocol;
    if !effects.has(kind) {
        return Err(ValidationFailure::EffectNotActive(kind));
    }

    let cooldown = EffectKind::SafehouseCooldown;
    Ok(TerminationPlan {
        removes: kind,
        cooldown: EffectRecord::new(owner, cooldown, now.plus_secs(cooldown.duration_secs(config))),
    })
}

/// Block applied to the victim of a successful sabotage.
pub fn sabotage_block(victim: ActorId, config: &GameConfig, now: Timestamp) -> Option<EffectRecord> {
    let secs = config.get_u64("espionage.sabotage.block_secs", 0);
    (secs > 0).then(|| EffectRecord::new(victim, EffectKind::SafehouseBlock, now.plus_secs(secs)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Resources;

    const NOW: Timestamp = Timestamp(10_000);
    const OWNER: ActorId = ActorId(1);

    fn buyer(credits: u64) -> ActorSnapshot {
        ActorSnapshot::new(OWNER, "Ariadne").with_resources(Resources {
            credits,
            ..Resources::default()
        })
    }

    fn active(kinds: &[(EffectKind, i64)]) -> ActiveEffects {
        ActiveEffects::from_records(
            kinds
                .iter()
                .map(|(kind, expires)| EffectRecord::new(OWNER, *kind, Timestamp(*expires))),
            NOW,
        )
    }

    #[test]
    fn high_risk_protocol_replaces_peace_shield() {
        let config = GameConfig::standard();
        let plan = plan_purchase(
            &buyer(1_000_000),
            EffectKind::HighRiskProtocol,
            &active(&[(EffectKind::PeaceShield, 20_000)]),
            &config,
            NOW,
        )
        .expect("allowed");
        assert_eq!(plan.replaces, Some(EffectKind::PeaceShield));
        assert_eq!(plan.cost, 50_000);
        assert_eq!(plan.expires_at, NOW.plus_secs(86_400));
    }

    #[test]
    fn peace_shield_conflicts_with_high_risk_protocol() {
        let err = plan_purchase(
            &buyer(1_000_000),
            EffectKind::PeaceShield,
            &active(&[(EffectKind::HighRiskProtocol, 20_000)]),
            &GameConfig::standard(),
            NOW,
        )
        .unwrap_err();
        assert_eq!(
            err,
            ValidationFailure::ConflictingEffect {
                requested: EffectKind::PeaceShield,
                active: EffectKind::HighRiskProtocol,
            }
        );
    }

    #[test]
    fn safehouse_locks_gate_protection_only() {
        let config = GameConfig::standard();
        let locked = active(&[(EffectKind::SafehouseCooldown, 12_000)]);
        let err = plan_purchase(&buyer(1_000_000), EffectKind::PeaceShield, &locked, &config, NOW)
            .unwrap_err();
        assert!(matches!(err, ValidationFailure::SafehouseLocked { .. }));

        plan_purchase(&buyer(1_000_000), EffectKind::Jamming, &locked, &config, NOW)
            .expect("jamming is not gated");
    }

    #[test]
    fn expired_locks_do_not_gate() {
        let plan = plan_purchase(
            &buyer(1_000_000),
            EffectKind::HighRiskProtocol,
            &active(&[(EffectKind::SafehouseBlock, NOW.0)]),
            &GameConfig::standard(),
            NOW,
        );
        assert!(plan.is_ok());
    }

    #[test]
    fn repurchase_extends_from_current_expiry() {
        let plan = plan_purchase(
            &buyer(1_000_000),
            EffectKind::Jamming,
            &active(&[(EffectKind::Jamming, 15_000)]),
            &GameConfig::standard(),
            NOW,
        )
        .expect("allowed");
        assert_eq!(plan.expires_at, Timestamp(15_000 + 21_600));
    }

    #[test]
    fn cooldowns_cannot_be_bought() {
        let err = plan_purchase(
            &buyer(1_000_000),
            EffectKind::SafehouseCooldown,
            &ActiveEffects::none(),
            &GameConfig::standard(),
            NOW,
        )
        .unwrap_err();
        assert_eq!(err, ValidationFailure::NotPurchasable(EffectKind::SafehouseCooldown));
    }

    #[test]
    fn purchases_need_credits() {
        let err = plan_purchase(
            &buyer(10),
            EffectKind::VoidOffenseBoost,
            &ActiveEffects::none(),
            &GameConfig::standard(),
            NOW,
        )
        .unwrap_err();
        assert!(matches!(err, ValidationFailure::InsufficientCredits { .. }));
    }

    #[test]
    fn termination_starts_a_one_hour_cooldown() {
        let plan = plan_termination(
            OWNER,
            &active(&[(EffectKind::HighRiskProtocol, 50_000)]),
            &GameConfig::empty(),
            NOW,
        )
        .expect("active");
        assert_eq!(plan.cooldown.kind, EffectKind::SafehouseCooldown);
        assert_eq!(plan.cooldown.expires_at, NOW.plus_secs(3_600));
    }

    #[test]
    fn terminating_a_lapsed_protocol_fails() {
        let err = plan_termination(
            OWNER,
            &active(&[(EffectKind::HighRiskProtocol, NOW.0 - 1)]),
            &GameConfig::standard(),
            NOW,
        )
        .unwrap_err();
        assert_eq!(err, ValidationFailure::EffectNotActive(EffectKind::HighRiskProtocol));
    }
}
