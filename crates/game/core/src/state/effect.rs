//! Timed effects (buffs, debuffs, protections and cooldowns).
//!
//! # Soft expiry
//!
//! Effect rows store `expires_at` and are never swept by a scheduler. A row
//! whose `expires_at <= now` is *expired-but-present*: storage may still hold
//! it, but every reader must treat it as absent. [`ActiveEffects`] is the only
//! view the power and validation rules consume, and it filters on expiry when
//! it is built.

use crate::config::GameConfig;
use crate::state::{ActorId, Timestamp};
use crate::stats::{BonusFamily, Modifier, ModifierSource};

/// Types of timed effects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(strum::Display, strum::EnumString, strum::EnumIter, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum EffectKind {
    // ========================================================================
    // Protections
    // ========================================================================
    /// Blocks every hostile operation against the owner.
    PeaceShield,

    /// Blocks espionage against the owner; the attempt still costs the spy.
    Jamming,

    // ========================================================================
    // Buffs
    // ========================================================================
    /// Income boost plus reduced casualties when winning; excludes peace shield.
    HighRiskProtocol,

    /// Offense percentage boost.
    VoidOffenseBoost,

    // ========================================================================
    // Cooldowns
    // ========================================================================
    /// Applied when high risk protocol is ended early.
    SafehouseCooldown,

    /// Applied to the victim of a successful sabotage.
    SafehouseBlock,
}

impl EffectKind {
    /// Effects a player can buy directly.
    pub const fn is_purchasable(self) -> bool {
        matches!(
            self,
            Self::PeaceShield | Self::Jamming | Self::HighRiskProtocol | Self::VoidOffenseBoost
        )
    }

    /// Protection buffs gated by safehouse cooldowns.
    pub const fn is_safehouse_gated(self) -> bool {
        matches!(self, Self::PeaceShield | Self::HighRiskProtocol)
    }

    /// Storage / config key (`peace_shield`, ...).
    pub fn key(self) -> &'static str {
        self.into()
    }

    pub fn cost(self, config: &GameConfig) -> u64 {
        config.get_u64(&format!("effects.{}.cost", self.key()), 0)
    }

    pub fn duration_secs(self, config: &GameConfig) -> u64 {
        let default = match self {
            Self::SafehouseCooldown => GameConfig::DEFAULT_SAFEHOUSE_COOLDOWN_SECS,
            _ => 0,
        };
        config.get_u64(&format!("effects.{}.duration_secs", self.key()), default)
    }

    /// Display name used in player-facing messages.
    pub const fn label(self) -> &'static str {
        match self {
            Self::PeaceShield => "Peace Shield",
            Self::Jamming => "Signal Jamming",
            Self::HighRiskProtocol => "High Risk Protocol",
            Self::VoidOffenseBoost => "Void Offense Boost",
            Self::SafehouseCooldown => "Safehouse Cooldown",
            Self::SafehouseBlock => "Safehouse Block",
        }
    }
}

/// A stored effect row. At most one row exists per `(owner, kind)`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectRecord {
    pub owner: ActorId,
    pub kind: EffectKind,
    /// Instant at which this effect stops applying.
    pub expires_at: Timestamp,
    /// Free-form JSON payload (e.g. who applied a block).
    pub metadata: Option<String>,
}

impl EffectRecord {
    pub fn new(owner: ActorId, kind: EffectKind, expires_at: Timestamp) -> Self {
        Self {
            owner,
            kind,
            expires_at,
            metadata: None,
        }
    }

    #[must_use]
    pub fn with_metadata(mut self, metadata: impl Into<String>) -> Self {
        self.metadata = Some(metadata.into());
        self
    }

    /// Active strictly before `expires_at`.
    #[inline]
    pub fn is_active(&self, now: Timestamp) -> bool {
        self.expires_at > now
    }
}

/// The effects of one owner that are active at a given instant.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ActiveEffects {
    effects: Vec<EffectRecord>,
}

impl ActiveEffects {
    pub fn none() -> Self {
        Self::default()
    }

    /// Keeps only the rows active at `now`.
    pub fn from_records(records: impl IntoIterator<Item = EffectRecord>, now: Timestamp) -> Self {
        Self {
            effects: records.into_iter().filter(|r| r.is_active(now)).collect(),
        }
    }

    pub fn has(&self, kind: EffectKind) -> bool {
        self.effects.iter().any(|e| e.kind == kind)
    }

    pub fn get(&self, kind: EffectKind) -> Option<&EffectRecord> {
        self.effects.iter().find(|e| e.kind == kind)
    }

    pub fn iter(&self) -> impl Iterator<Item = &EffectRecord> {
        self.effects.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    /// Power modifiers granted by active buffs.
    pub fn modifiers(&self, config: &GameConfig) -> Vec<Modifier> {
        let mut out = Vec::new();
        for effect in &self.effects {
            let source = ModifierSource::Effect(effect.kind);
            match effect.kind {
                EffectKind::VoidOffenseBoost => out.push(Modifier::percent(
                    source,
                    BonusFamily::Offense,
                    config.get("effects.void_offense_boost.offense_pct", 0.0),
                )),
                EffectKind::HighRiskProtocol => out.push(Modifier::percent(
                    source,
                    BonusFamily::Income,
                    config.get("effects.high_risk_protocol.income_pct", 0.0),
                )),
                _ => {}
            }
        }
        out
    }

    /// Casualty reduction applied to the owner's losses when it wins.
    pub fn casualty_reduction(&self, config: &GameConfig) -> f64 {
        if self.has(EffectKind::HighRiskProtocol) {
            config.get("effects.high_risk_protocol.casualty_reduction", 0.0)
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OWNER: ActorId = ActorId(7);

    #[test]
    fn expired_rows_are_absent() {
        let now = Timestamp(1_000);
        let effects = ActiveEffects::from_records(
            [
                EffectRecord::new(OWNER, EffectKind::PeaceShield, Timestamp(999)),
                EffectRecord::new(OWNER, EffectKind::Jamming, Timestamp(1_000)),
                EffectRecord::new(OWNER, EffectKind::VoidOffenseBoost, Timestamp(1_001)),
            ],
            now,
        );
        assert!(!effects.has(EffectKind::PeaceShield));
        assert!(!effects.has(EffectKind::Jamming));
        assert!(effects.has(EffectKind::VoidOffenseBoost));
    }

    #[test]
    fn high_risk_protocol_boosts_income_and_reduces_casualties() {
        let config = GameConfig::standard();
        let effects = ActiveEffects::from_records(
            [EffectRecord::new(OWNER, EffectKind::HighRiskProtocol, Timestamp(10))],
            Timestamp(0),
        );
        let modifiers = effects.modifiers(&config);
        assert_eq!(modifiers.len(), 1);
        assert_eq!(modifiers[0].family, BonusFamily::Income);
        assert!((effects.casualty_reduction(&config) - 0.25).abs() < 1e-12);
    }

    #[test]
    fn keys_are_snake_case() {
        assert_eq!(EffectKind::HighRiskProtocol.key(), "high_risk_protocol");
        assert_eq!(EffectKind::SafehouseCooldown.to_string(), "safehouse_cooldown");
    }

    #[test]
    fn cooldown_duration_defaults_to_one_hour() {
        assert_eq!(
            EffectKind::SafehouseCooldown.duration_secs(&GameConfig::empty()),
            3600
        );
    }
}
