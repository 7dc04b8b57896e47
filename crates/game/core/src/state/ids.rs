use core::fmt;

/// Unique identifier for a player empire.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActorId(pub u64);

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Unique identifier for an alliance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AllianceId(pub u64);

impl fmt::Display for AllianceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "alliance#{}", self.0)
    }
}

/// Unique identifier for a war between two alliances.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WarId(pub u64);

/// Identifier of a persisted battle or spy report.
///
/// Reports are built before the store assigns their id; [`ReportId::PENDING`]
/// marks a report that has not been written yet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReportId(pub u64);

impl ReportId {
    pub const PENDING: Self = Self(0);

    #[inline]
    pub const fn is_pending(self) -> bool {
        self.0 == Self::PENDING.0
    }
}

impl fmt::Display for ReportId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "report#{}", self.0)
    }
}

/// Wall-clock instant in unix seconds.
///
/// The core never reads the clock itself; every time-dependent rule takes a
/// `Timestamp` supplied by the caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Timestamp(pub i64);

impl Timestamp {
    pub const EPOCH: Self = Self(0);

    pub const fn from_unix(secs: i64) -> Self {
        Self(secs)
    }

    pub const fn as_unix(self) -> i64 {
        self.0
    }

    /// Returns the instant `secs` seconds later, saturating on overflow.
    pub const fn plus_secs(self, secs: u64) -> Self {
        let secs = if secs > i64::MAX as u64 {
            i64::MAX
        } else {
            secs as i64
        };
        Self(self.0.saturating_add(secs))
    }

    /// Seconds remaining until `later`, zero if it already passed.
    pub const fn secs_until(self, later: Timestamp) -> u64 {
        if later.0 > self.0 {
            (later.0 - self.0) as u64
        } else {
            0
        }
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plus_secs_saturates() {
        let t = Timestamp(i64::MAX - 5);
        assert_eq!(t.plus_secs(10), Timestamp(i64::MAX));
        assert_eq!(Timestamp(100).plus_secs(60), Timestamp(160));
    }

    #[test]
    fn secs_until_never_negative() {
        assert_eq!(Timestamp(100).secs_until(Timestamp(160)), 60);
        assert_eq!(Timestamp(200).secs_until(Timestamp(160)), 0);
    }
}
