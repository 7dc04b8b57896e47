//! Outcome classification shared by battles and espionage.

/// One side of an operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(strum::Display, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum Side {
    Attacker,
    Defender,
}

/// Result of comparing two powers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(strum::Display, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum CombatResult {
    AttackerVictory,
    DefenderVictory,
    /// Powers within the stalemate band. Battles only.
    Stalemate,
}

impl CombatResult {
    pub const fn winner(self) -> Option<Side> {
        match self {
            Self::AttackerVictory => Some(Side::Attacker),
            Self::DefenderVictory => Some(Side::Defender),
            Self::Stalemate => None,
        }
    }

    pub const fn attacker_won(self) -> bool {
        matches!(self, Self::AttackerVictory)
    }
}
