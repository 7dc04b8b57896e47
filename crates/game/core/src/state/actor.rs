//! Actor snapshots and the relative deltas applied to them.
use crate::state::{ActorId, AllianceId, StructureLevels};

/// Stat points players assign on level-up.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(strum::Display, strum::EnumString, strum::EnumIter, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum StatKind {
    /// Offense percentage.
    Strength,
    /// Defense percentage.
    Constitution,
    /// Income percentage.
    Wealth,
    /// Spy and sentry percentage.
    Dexterity,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatPoints {
    pub level: u32,
    pub strength: u32,
    pub constitution: u32,
    pub wealth: u32,
    pub dexterity: u32,
}

impl StatPoints {
    pub fn points(&self, stat: StatKind) -> u32 {
        match stat {
            StatKind::Strength => self.strength,
            StatKind::Constitution => self.constitution,
            StatKind::Wealth => self.wealth,
            StatKind::Dexterity => self.dexterity,
        }
    }
}

/// Resource and unit counts of an empire.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Resources {
    pub credits: u64,
    pub banked_credits: u64,
    pub untrained_citizens: u64,
    pub workers: u64,
    pub soldiers: u64,
    pub guards: u64,
    pub spies: u64,
    pub sentries: u64,
    pub attack_turns: u64,
    pub war_prestige: u64,
}

impl Resources {
    pub fn total_units(&self) -> u64 {
        self.untrained_citizens
            .saturating_add(self.workers)
            .saturating_add(self.soldiers)
            .saturating_add(self.guards)
            .saturating_add(self.spies)
            .saturating_add(self.sentries)
    }

    /// Applies a relative update, or `None` if any field would go negative
    /// or overflow.
    pub fn checked_apply(&self, delta: &ActorDelta) -> Option<Resources> {
        fn shift(value: u64, by: i64) -> Option<u64> {
            if by >= 0 {
                value.checked_add(by as u64)
            } else {
                value.checked_sub(by.unsigned_abs())
            }
        }

        Some(Resources {
            credits: shift(self.credits, delta.credits)?,
            banked_credits: self.banked_credits,
            untrained_citizens: self.untrained_citizens,
            workers: self.workers,
            soldiers: shift(self.soldiers, delta.soldiers)?,
            guards: shift(self.guards, delta.guards)?,
            spies: shift(self.spies, delta.spies)?,
            sentries: shift(self.sentries, delta.sentries)?,
            attack_turns: shift(self.attack_turns, delta.attack_turns)?,
            war_prestige: shift(self.war_prestige, delta.war_prestige)?,
        })
    }
}

/// Immutable view of an empire read at the start of an operation.
///
/// Snapshots are never mutated in place; after persisting a delta callers
/// re-fetch a fresh snapshot.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActorSnapshot {
    pub id: ActorId,
    pub character_name: String,
    pub alliance: Option<AllianceId>,
    pub resources: Resources,
    pub stats: StatPoints,
    pub structures: StructureLevels,
}

impl ActorSnapshot {
    pub fn new(id: ActorId, character_name: impl Into<String>) -> Self {
        Self {
            id,
            character_name: character_name.into(),
            alliance: None,
            resources: Resources::default(),
            stats: StatPoints::default(),
            structures: StructureLevels::default(),
        }
    }

    #[must_use]
    pub fn with_alliance(mut self, alliance: AllianceId) -> Self {
        self.alliance = Some(alliance);
        self
    }

    #[must_use]
    pub fn with_resources(mut self, resources: Resources) -> Self {
        self.resources = resources;
        self
    }

    #[must_use]
    pub fn with_stats(mut self, stats: StatPoints) -> Self {
        self.stats = stats;
        self
    }

    #[must_use]
    pub fn with_structures(mut self, structures: StructureLevels) -> Self {
        self.structures = structures;
        self
    }

    /// New snapshot carrying the resources after `delta`.
    pub fn applying(&self, delta: &ActorDelta) -> Option<ActorSnapshot> {
        let resources = self.resources.checked_apply(delta)?;
        Some(ActorSnapshot {
            resources,
            ..self.clone()
        })
    }
}

/// Signed relative update of an actor's resources.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActorDelta {
    pub credits: i64,
    pub soldiers: i64,
    pub guards: i64,
    pub spies: i64,
    pub sentries: i64,
    pub attack_turns: i64,
    pub war_prestige: i64,
}

impl ActorDelta {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Converts an unsigned amount into a negative delta component.
pub fn loss(amount: u64) -> i64 {
    -(i64::try_from(amount).unwrap_or(i64::MAX))
}

/// Converts an unsigned amount into a positive delta component.
pub fn gain(amount: u64) -> i64 {
    i64::try_from(amount).unwrap_or(i64::MAX)
}
