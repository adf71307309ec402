//! The five zoom levels of the picker.

use std::{fmt, str::FromStr};

use crate::{
    calendar::TimeUnit,
    error::{Error, Result},
};

/// Length of one cell in the hour grid, in minutes.
pub const MINUTE_STEP: u32 = 5;

/// The page a grid shows. Cells are the next finer unit.
///
/// Ordering runs coarse to fine, so `Granularity::Decade < Granularity::Hour`.
///
/// | Granularity | Cells | Grid |
/// |---|---|---|
/// | `Decade` | years | 2×5 |
/// | `Year` | months | 3×4 |
/// | `Month` | days | 6×7 |
/// | `Day` | hours | 6×4 |
/// | `Hour` | 5-minute steps | 3×4 |
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Granularity {
    /// Ten years, one cell per year.
    Decade,
    /// One year, one cell per month.
    Year,
    /// One month, one cell per day.
    Month,
    /// One day, one cell per hour.
    Day,
    /// One hour, one cell per five minutes.
    Hour,
}

impl Granularity {
    /// All granularities, coarse to fine.
    pub const ALL: [Granularity; 5] = [
        Granularity::Decade,
        Granularity::Year,
        Granularity::Month,
        Granularity::Day,
        Granularity::Hour,
    ];

    /// The next finer granularity, if any.
    pub fn finer(self) -> Option<Self> {
        Self::ALL.get(self.index() + 1).copied()
    }

    /// The next coarser granularity, if any.
    pub fn coarser(self) -> Option<Self> {
        self.index().checked_sub(1).map(|idx| Self::ALL[idx])
    }

    fn index(self) -> usize {
        self as usize
    }

    /// The semantic name accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            Granularity::Decade => "decade",
            Granularity::Year => "year",
            Granularity::Month => "month",
            Granularity::Day => "day",
            Granularity::Hour => "hour",
        }
    }

    /// The older view name, which names the cells rather than the page.
    pub fn legacy_view_name(self) -> &'static str {
        match self {
            Granularity::Decade => "year",
            Granularity::Year => "month",
            Granularity::Month => "day",
            Granularity::Day => "hour",
            Granularity::Hour => "minute",
        }
    }

    /// Converts an older view name (`"year"` shows years, ...).
    pub fn from_legacy_view(name: &str) -> Result<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "year" => Ok(Granularity::Decade),
            "month" => Ok(Granularity::Year),
            "day" => Ok(Granularity::Month),
            "hour" => Ok(Granularity::Day),
            "minute" => Ok(Granularity::Hour),
            _ => Err(Error::UnknownLegacyView(name.to_string())),
        }
    }

    /// The unit each cell spans.
    pub fn cell_unit(self) -> TimeUnit {
        match self {
            Granularity::Decade => TimeUnit::Year,
            Granularity::Year => TimeUnit::Month,
            Granularity::Month => TimeUnit::Day,
            Granularity::Day => TimeUnit::Hour,
            Granularity::Hour => TimeUnit::Step(MINUTE_STEP),
        }
    }

    /// The span of one page, as `(unit, count)`.
    pub fn page(self) -> (TimeUnit, i64) {
        match self {
            Granularity::Decade => (TimeUnit::Year, 10),
            Granularity::Year => (TimeUnit::Year, 1),
            Granularity::Month => (TimeUnit::Month, 1),
            Granularity::Day => (TimeUnit::Day, 1),
            Granularity::Hour => (TimeUnit::Hour, 1),
        }
    }

    /// Grid shape as `(rows, columns)`.
    pub fn dimensions(self) -> (usize, usize) {
        match self {
            Granularity::Decade => (2, 5),
            Granularity::Year => (3, 4),
            Granularity::Month => (6, 7),
            Granularity::Day => (6, 4),
            Granularity::Hour => (3, 4),
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Granularity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|granularity| granularity.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::UnknownGranularity(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_is_coarse_to_fine() {
        assert!(Granularity::Decade < Granularity::Year);
        assert!(Granularity::Day < Granularity::Hour);
        assert_eq!(Granularity::Decade.coarser(), None);
        assert_eq!(Granularity::Decade.finer(), Some(Granularity::Year));
        assert_eq!(Granularity::Hour.finer(), None);
        assert_eq!(Granularity::Hour.coarser(), Some(Granularity::Day));
    }

    #[test]
    fn test_parse_semantic_names() {
        assert_eq!("Decade".parse(), Ok(Granularity::Decade));
        assert_eq!(" hour ".parse(), Ok(Granularity::Hour));
        assert_eq!(
            "minute".parse::<Granularity>(),
            Err(Error::UnknownGranularity("minute".to_string()))
        );
    }

    #[test]
    fn test_legacy_names_shift_by_one() {
        for granularity in Granularity::ALL {
            assert_eq!(
                Granularity::from_legacy_view(granularity.legacy_view_name()),
                Ok(granularity)
            );
        }
        assert_eq!(Granularity::from_legacy_view("year"), Ok(Granularity::Decade));
        assert!(Granularity::from_legacy_view("decade").is_err());
    }

    #[test]
    fn test_grid_sizes() {
        let cells: Vec<usize> = Granularity::ALL
            .iter()
            .map(|g| {
                let (rows, columns) = g.dimensions();
                rows * columns
            })
            .collect();
        assert_eq!(cells, vec![10, 12, 42, 24, 12]);
    }
}
