//! Points in time as plain millisecond counts.
//!
//! Every value the picker produces or consumes is an [`Instant`]: a signed
//! count of milliseconds since the Unix epoch. Calendar fields are derived on
//! demand by a [`Calendar`](crate::calendar::Calendar), which owns the zone
//! interpretation.

use std::fmt;

/// A point in time, in milliseconds since `1970-01-01T00:00:00Z`.
///
/// Negative values are instants before the epoch.
///
/// # Examples
///
/// ```
/// use chronogrid::Instant;
///
/// let t = Instant::from_millis(1_704_067_200_000);
/// assert_eq!(t.millis(), 1_704_067_200_000);
/// assert!(Instant::EPOCH < t);
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct Instant(pub i64);

impl Instant {
    /// The Unix epoch.
    pub const EPOCH: Self = Self(0);

    /// Creates an instant from milliseconds since the epoch.
    pub const fn from_millis(millis: i64) -> Self {
        Self(millis)
    }

    /// Returns the raw millisecond count.
    pub const fn millis(self) -> i64 {
        self.0
    }

    /// Adds a millisecond delta, returning `None` on overflow.
    pub fn checked_add_millis(self, delta: i64) -> Option<Self> {
        self.0.checked_add(delta).map(Self)
    }
}

impl From<i64> for Instant {
    fn from(millis: i64) -> Self {
        Self(millis)
    }
}

impl From<Instant> for i64 {
    fn from(instant: Instant) -> Self {
        instant.0
    }
}

impl fmt::Display for Instant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checked_add_overflow() {
        assert_eq!(
            Instant(10).checked_add_millis(-20),
            Some(Instant::from_millis(-10))
        );
        assert_eq!(Instant(i64::MAX).checked_add_millis(1), None);
    }

    #[test]
    fn test_conversions() {
        let t: Instant = 42.into();
        assert_eq!(i64::from(t), 42);
        assert_eq!(t.to_string(), "42ms");
    }
}
