//! Breakdown records returned by the power calculator.
//!
//! Every record carries the final scalar plus the named contributions that
//! produced it, so reports and presenters can show where a number came from.
//! Percentage fields are unrounded and already include the synergy share.
use crate::stats::BonusFamily;

/// Offense, defense, spy or sentry power of one actor.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PowerBreakdown {
    pub family: BonusFamily,
    /// Units committed (soldiers, guards, spies or sentries).
    pub units: u64,
    pub power_per_unit: f64,
    pub base_power: f64,
    pub structure_flat: f64,
    pub armory_flat: f64,
    pub edict_flat: f64,
    pub stat_bonus_pct: f64,
    pub edict_bonus_pct: f64,
    pub effect_bonus_pct: f64,
    pub armory_bonus_pct: f64,
    pub alliance_bonus_pct: f64,
    pub synergy_multiplier: f64,
    pub total_bonus_pct: f64,
    /// Final power, floored.
    pub total_power: u64,
}

/// Per-turn income of one actor.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IncomeBreakdown {
    pub base_credits: f64,
    pub workers: u64,
    pub worker_income: f64,
    pub economy_flat: f64,
    pub wealth_bonus_pct: f64,
    pub accounting_firm_bonus_pct: f64,
    pub edict_credit_bonus_pct: f64,
    pub effect_credit_bonus_pct: f64,
    pub alliance_credit_bonus_pct: f64,
    pub synergy_multiplier: f64,
    pub total_credit_bonus_pct: f64,
    /// Interest on banked credits; added after the percentage fold.
    pub interest: u64,
    /// Credits per turn, rounded.
    pub total_credit_income: u64,

    pub base_citizens: u64,
    pub structure_citizen_bonus: u64,
    pub edict_citizen_bonus: u64,
    pub alliance_citizen_bonus: u64,
    pub total_citizens: u64,
}

/// Every output of the calculator for one actor.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PowerProfile {
    pub income: IncomeBreakdown,
    pub offense: PowerBreakdown,
    pub defense: PowerBreakdown,
    pub spy: PowerBreakdown,
    pub sentry: PowerBreakdown,
}
