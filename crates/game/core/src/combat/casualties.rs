//! Ratio-scaled casualties.
//!
//! # Algorithm
//!
//! ```text
//! ratio        = max(a, d) / max(1, min(a, d))
//! loser rate   = 1                                  if ratio >= wipeout
//!              = lerp(loser_loss_rate, 1, (ratio - 1) / (wipeout - 1)) × roll
//! winner rate  = winner_loss_rate × roll / ratio
//! ```
//!
//! Loser losses round up and are at least one whenever the loser committed a
//! unit. Winner losses round down, are raised to `winner_min_losses` while the
//! loser fielded any power, and finally shrink by the winner's casualty
//! reduction. For a fixed roll winner losses never grow with the ratio.
use rand::Rng;

use super::params::CasualtyParams;
use super::result::{CombatResult, Side};

/// Multiplicative jitter applied to loss rates.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CasualtyRoll(f64);

impl CasualtyRoll {
    pub const NEUTRAL: Self = Self(1.0);

    /// Wraps a factor; negative or non-finite factors become neutral.
    pub fn new(factor: f64) -> Self {
        if factor.is_finite() && factor >= 0.0 {
            Self(factor)
        } else {
            Self::NEUTRAL
        }
    }

    /// Draws a factor uniformly from `[1 - variance, 1 + variance]`.
    pub fn draw<R: Rng + ?Sized>(rng: &mut R, variance: f64) -> Self {
        let variance = variance.clamp(0.0, 1.0);
        if variance == 0.0 {
            return Self::NEUTRAL;
        }
        Self(rng.gen_range((1.0 - variance)..=(1.0 + variance)))
    }

    pub fn factor(self) -> f64 {
        self.0
    }
}

impl Default for CasualtyRoll {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

/// The committed side of an operation.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Force {
    pub power: u64,
    /// Units at risk (soldiers, guards, spies or sentries).
    pub units: u64,
    /// Share of its losses this side avoids when it wins, already capped.
    pub casualty_reduction: f64,
}

impl Force {
    pub fn new(power: u64, units: u64) -> Self {
        Self {
            power,
            units,
            casualty_reduction: 0.0,
        }
    }

    #[must_use]
    pub fn with_casualty_reduction(mut self, reduction: f64) -> Self {
        self.casualty_reduction = reduction;
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Casualties {
    pub result: CombatResult,
    pub ratio: f64,
    pub attacker_losses: u64,
    pub defender_losses: u64,
}

/// `max / max(1, min)` of two powers.
pub fn power_ratio(a: u64, b: u64) -> f64 {
    let (high, low) = if a >= b { (a, b) } else { (b, a) };
    high as f64 / low.max(1) as f64
}

/// Classifies the outcome: stalemate inside the band, ties to the defender.
pub fn classify(attacker: u64, defender: u64, stalemate_band: Option<f64>) -> CombatResult {
    if let Some(band) = stalemate_band {
        let high = attacker.max(defender);
        let gap = attacker.abs_diff(defender);
        if high == 0 || gap as f64 / high as f64 <= band {
            return CombatResult::Stalemate;
        }
    }
    if attacker > defender {
        CombatResult::AttackerVictory
    } else {
        CombatResult::DefenderVictory
    }
}

/// Resolves losses for both sides.
pub fn resolve_casualties(
    attacker: &Force,
    defender: &Force,
    params: &CasualtyParams,
    roll: CasualtyRoll,
) -> Casualties {
    let ratio = power_ratio(attacker.power, defender.power);
    let result = classify(attacker.power, defender.power, params.stalemate_band);

    let (attacker_losses, defender_losses) = match result.winner() {
        None => (
            stalemate_losses(attacker.units, params, roll),
            stalemate_losses(defender.units, params, roll),
        ),
        Some(Side::Attacker) => (
            winner_losses(attacker, defender.power, ratio, params, roll),
            loser_losses(defender.units, ratio, params, roll),
        ),
        Some(Side::Defender) => (
            loser_losses(attacker.units, ratio, params, roll),
            winner_losses(defender, attacker.power, ratio, params, roll),
        ),
    };

    Casualties {
        result,
        ratio,
        attacker_losses,
        defender_losses,
    }
}

/// Loss rate of the losing side at `ratio`, before rounding.
pub fn loser_rate(ratio: f64, params: &CasualtyParams, roll: CasualtyRoll) -> f64 {
    let ratio = ratio.max(1.0);
    if ratio >= params.wipeout_ratio {
        return 1.0;
    }
    let span = params.wipeout_ratio - 1.0;
    let progress = if span > 0.0 { (ratio - 1.0) / span } else { 1.0 };
    let base = params.loser_loss_rate + (1.0 - params.loser_loss_rate) * progress;
    (base * roll.factor()).clamp(0.0, 1.0)
}

/// Loss rate of the winning side at `ratio`, before the floor and reductions.
pub fn winner_rate(ratio: f64, params: &CasualtyParams, roll: CasualtyRoll) -> f64 {
    (params.winner_loss_rate * roll.factor() / ratio.max(1.0)).clamp(0.0, 1.0)
}

fn loser_losses(units: u64, ratio: f64, params: &CasualtyParams, roll: CasualtyRoll) -> u64 {
    if units == 0 {
        return 0;
    }
    let losses = (units as f64 * loser_rate(ratio, params, roll)).ceil() as u64;
    losses.clamp(1, units)
}

fn winner_losses(
    winner: &Force,
    loser_power: u64,
    ratio: f64,
    params: &CasualtyParams,
    roll: CasualtyRoll,
) -> u64 {
    if winner.units == 0 {
        return 0;
    }
    let mut losses = (winner.units as f64 * winner_rate(ratio, params, roll)).floor() as u64;
    if loser_power > 0 {
        losses = losses.max(params.winner_min_losses);
    }
    let losses = losses.min(winner.units);

    let reduction = winner
        .casualty_reduction
        .clamp(0.0, params.max_casualty_reduction);
    let avoided = (losses as f64 * reduction).ceil() as u64;
    losses.saturating_sub(avoided)
}

fn stalemate_losses(units: u64, params: &CasualtyParams, roll: CasualtyRoll) -> u64 {
    if units == 0 || params.stalemate_loss_rate == 0.0 {
        return 0;
    }
    let rate = (params.stalemate_loss_rate * roll.factor()).clamp(0.0, 1.0);
    ((units as f64 * rate).ceil() as u64).clamp(1, units)
}
