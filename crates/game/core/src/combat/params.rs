use crate::config::GameConfig;

/// Casualty tuning for one operation family (`combat.*` or `espionage.*`).
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CasualtyParams {
    /// Ratio at or above which the loser loses every committed unit.
    pub wipeout_ratio: f64,
    /// Relative power gap treated as a stalemate; `None` disables stalemates.
    pub stalemate_band: Option<f64>,
    /// Share of units each side loses in a stalemate.
    pub stalemate_loss_rate: f64,
    /// Winner loss rate at ratio 1; divided by the ratio above that.
    pub winner_loss_rate: f64,
    /// Losses the winner takes at least while the loser fielded any power.
    pub winner_min_losses: u64,
    /// Loser loss rate at ratio 1; grows linearly to 100% at the wipeout ratio.
    pub loser_loss_rate: f64,
    /// Half-width of the casualty jitter window.
    pub casualty_variance: f64,
    /// Upper bound for the winner's casualty reduction.
    pub max_casualty_reduction: f64,
}

impl CasualtyParams {
    /// Battle tuning; battles may end in a stalemate.
    pub fn battle(config: &GameConfig) -> Self {
        let band = config.get("combat.stalemate_band", GameConfig::DEFAULT_STALEMATE_BAND);
        Self {
            stalemate_band: Some(band.max(0.0)),
            stalemate_loss_rate: unit_rate(config.get("combat.stalemate_loss_rate", 0.0)),
            ..Self::scoped(config, "combat")
        }
    }

    /// Espionage tuning; ties go to the defender and there is no stalemate.
    pub fn espionage(config: &GameConfig) -> Self {
        Self::scoped(config, "espionage")
    }

    fn scoped(config: &GameConfig, scope: &str) -> Self {
        let key = |name: &str| format!("{scope}.{name}");
        Self {
            wipeout_ratio: config
                .get(&key("wipeout_ratio"), GameConfig::DEFAULT_WIPEOUT_RATIO)
                .max(1.0),
            stalemate_band: None,
            stalemate_loss_rate: 0.0,
            winner_loss_rate: unit_rate(config.get(&key("winner_loss_rate"), 0.0)),
            winner_min_losses: config.get_u64(&key("winner_min_losses"), 0),
            loser_loss_rate: unit_rate(config.get(&key("loser_loss_rate"), 0.0)),
            casualty_variance: unit_rate(config.get(&key("casualty_variance"), 0.0)),
            max_casualty_reduction: unit_rate(config.get(&key("max_casualty_reduction"), 1.0)),
        }
    }
}

fn unit_rate(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_structural_defaults() {
        let params = CasualtyParams::battle(&GameConfig::empty());
        assert_eq!(params.wipeout_ratio, GameConfig::DEFAULT_WIPEOUT_RATIO);
        assert_eq!(params.stalemate_band, Some(GameConfig::DEFAULT_STALEMATE_BAND));
        assert_eq!(params.winner_loss_rate, 0.0);
        assert_eq!(params.max_casualty_reduction, 1.0);
    }

    #[test]
    fn espionage_has_no_stalemate() {
        let params = CasualtyParams::espionage(&GameConfig::standard());
        assert_eq!(params.stalemate_band, None);
        assert_eq!(params.winner_min_losses, 1);
    }

    #[test]
    fn rates_are_clamped() {
        let config = GameConfig::from_pairs([
            ("combat.loser_loss_rate", 3.0),
            ("combat.wipeout_ratio", 0.2),
        ]);
        let params = CasualtyParams::battle(&config);
        assert_eq!(params.loser_loss_rate, 1.0);
        assert_eq!(params.wipeout_ratio, 1.0);
    }
}
