//! # Calendar Arithmetic
//!
//! Deterministic helpers that every granularity provider builds on: start and
//! end of a unit, shifting by whole units, unit comparison, and label
//! formatting.
//!
//! ## Zones
//!
//! A [`Calendar`] interprets instants in exactly one [`Zone`]. All civil
//! fields (year, month, day, ...) are derived in that zone and converted back
//! through it, so a picker never mixes interpretations.
//!
//! ## Totality
//!
//! None of the operations fail. Instants beyond the range chrono can
//! represent are clamped to that range, and shifts that would leave it
//! return the input unchanged (with a `warn!` event).
//!
//! ## Daylight saving
//!
//! Arithmetic happens on the wall clock. Shifting by hours, minutes or steps
//! moves the clock hands, so a day always has the hours `0..24` and the
//! repeated hour of a fall-back transition is visited once, at its earlier
//! occurrence. A wall-clock time skipped by a spring-forward transition
//! resolves one hour further in the direction of travel: forward for
//! [`Calendar::from_civil`] and positive shifts, backward for negative ones.
//!
//! ```
//! use chronogrid::calendar::{Calendar, TimeUnit, Zone};
//!
//! let calendar = Calendar::new(Zone::Utc, chrono::Weekday::Sun);
//! let jan_31 = calendar.instant_at(2024, 1, 31, 9, 30).unwrap();
//! let feb = calendar.add(jan_31, TimeUnit::Month, 1);
//! assert_eq!(feb, calendar.instant_at(2024, 2, 29, 9, 30).unwrap());
//! ```

use std::str::FromStr;

use chrono::{
    DateTime, Datelike, Days, FixedOffset, Local, LocalResult, Months, NaiveDate, NaiveDateTime,
    NaiveTime, TimeDelta, TimeZone, Timelike, Utc, Weekday,
};
use chrono_tz::Tz;
use tracing::warn;

use crate::{
    Instant,
    error::{Error, Result},
    labels::{LabelFormatter, LabelPattern},
};

const MILLIS_PER_MINUTE: i64 = 60_000;
const MILLIS_PER_HOUR: i64 = 60 * MILLIS_PER_MINUTE;

/// The zone in which instants are turned into calendar fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Zone {
    /// Coordinated universal time.
    Utc,
    /// The operating system's local zone, including its DST rules.
    #[default]
    Local,
    /// A constant offset from UTC.
    Fixed(FixedOffset),
    /// An IANA zone such as `America/New_York`, including its DST rules.
    Named(Tz),
}

impl Zone {
    /// Creates a fixed zone `hours` east of UTC.
    pub fn east_hours(hours: i32) -> Option<Self> {
        hours
            .checked_mul(3_600)
            .and_then(FixedOffset::east_opt)
            .map(Zone::Fixed)
    }
}

impl FromStr for Zone {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "utc" | "z" => return Ok(Zone::Utc),
            "local" => return Ok(Zone::Local),
            _ => {}
        }
        parse_offset(trimmed)
            .map(Zone::Fixed)
            .or_else(|| trimmed.parse::<Tz>().ok().map(Zone::Named))
            .ok_or_else(|| Error::InvalidZone(s.to_string()))
    }
}

/// Parses `+HH:MM`, `-HHMM` or `+HH`.
fn parse_offset(text: &str) -> Option<FixedOffset> {
    if !text.is_ascii() {
        return None;
    }
    let (sign, rest) = match text.as_bytes().first()? {
        b'+' => (1, &text[1..]),
        b'-' => (-1, &text[1..]),
        _ => return None,
    };
    let (hours, minutes) = match rest.split_once(':') {
        Some(parts) => parts,
        None if rest.len() == 4 => rest.split_at(2),
        None if (1..=2).contains(&rest.len()) => (rest, "0"),
        None => return None,
    };
    let all_digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(hours) || !all_digits(minutes) {
        return None;
    }
    let hours: i32 = hours.parse().ok()?;
    let minutes: i32 = minutes.parse().ok()?;
    if hours > 23 || minutes > 59 {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3_600 + minutes * 60))
}

/// Calendar units understood by [`Calendar`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeUnit {
    /// A calendar year.
    Year,
    /// A calendar month.
    Month,
    /// A calendar day.
    Day,
    /// One hour.
    Hour,
    /// One minute.
    Minute,
    /// A run of minutes aligned to the start of the hour, e.g. `Step(5)`.
    ///
    /// Lengths outside `1..=60` are clamped into that range.
    Step(u32),
}

fn step_len(minutes: u32) -> u32 {
    minutes.clamp(1, 60)
}

/// Converts instants to calendar fields and performs unit arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Calendar {
    zone: Zone,
    first_weekday: Weekday,
}

impl Default for Calendar {
    fn default() -> Self {
        Self::new(Zone::Local, Weekday::Sun)
    }
}

impl Calendar {
    /// Creates a calendar for `zone` whose weeks start on `first_weekday`.
    pub const fn new(zone: Zone, first_weekday: Weekday) -> Self {
        Self {
            zone,
            first_weekday,
        }
    }

    /// A UTC calendar with Sunday-first weeks.
    pub const fn utc() -> Self {
        Self::new(Zone::Utc, Weekday::Sun)
    }

    /// Returns the zone interpretation.
    pub fn zone(&self) -> Zone {
        self.zone
    }

    /// Returns the first day of the week.
    pub fn first_weekday(&self) -> Weekday {
        self.first_weekday
    }

    /// Returns the wall-clock fields of `instant` in this calendar's zone.
    pub fn civil(&self, instant: Instant) -> NaiveDateTime {
        let utc = DateTime::<Utc>::from_timestamp_millis(instant.millis()).unwrap_or(
            if instant.millis() < 0 {
                DateTime::<Utc>::MIN_UTC
            } else {
                DateTime::<Utc>::MAX_UTC
            },
        );
        match self.zone {
            Zone::Utc => utc.naive_utc(),
            Zone::Local => utc.with_timezone(&Local).naive_local(),
            Zone::Fixed(offset) => utc.with_timezone(&offset).naive_local(),
            Zone::Named(tz) => utc.with_timezone(&tz).naive_local(),
        }
    }

    /// Returns the instant at which this zone's wall clock shows `civil`.
    pub fn from_civil(&self, civil: NaiveDateTime) -> Instant {
        self.resolve(civil, Gap::Forward)
    }

    fn resolve(&self, civil: NaiveDateTime, gap: Gap) -> Instant {
        match self.zone {
            Zone::Utc => Instant(civil.and_utc().timestamp_millis()),
            Zone::Local => resolve_wall_clock(&Local, civil, gap),
            Zone::Fixed(offset) => resolve_wall_clock(&offset, civil, gap),
            Zone::Named(tz) => resolve_wall_clock(&tz, civil, gap),
        }
    }

    /// Builds an instant from wall-clock fields, or `None` for an invalid date.
    pub fn instant_at(
        &self,
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
    ) -> Option<Instant> {
        let date = NaiveDate::from_ymd_opt(year, month, day)?;
        let time = NaiveTime::from_hms_opt(hour, minute, 0)?;
        Some(self.from_civil(date.and_time(time)))
    }

    /// Returns the first instant of the `unit` containing `instant`.
    pub fn start_of(&self, instant: Instant, unit: TimeUnit) -> Instant {
        self.from_civil(truncate(self.civil(instant), unit))
    }

    /// Returns the last millisecond of the `unit` containing `instant`.
    pub fn end_of(&self, instant: Instant, unit: TimeUnit) -> Instant {
        let next = self.add(self.start_of(instant, unit), unit, 1);
        Instant(next.millis().saturating_sub(1))
    }

    /// Shifts `instant` by `amount` units (negative amounts move backwards).
    ///
    /// Months and years keep the day of month where possible and otherwise
    /// clamp to the month's last day. Days keep the wall-clock time. Hours,
    /// minutes and steps move the wall clock, so in a DST zone they may cover
    /// more or less elapsed time than their nominal length.
    pub fn add(&self, instant: Instant, unit: TimeUnit, amount: i64) -> Instant {
        if amount == 0 {
            return instant;
        }
        let shifted = match unit {
            TimeUnit::Year => amount
                .checked_mul(12)
                .and_then(|months| self.add_months(instant, months)),
            TimeUnit::Month => self.add_months(instant, amount),
            TimeUnit::Day => self.add_days(instant, amount),
            TimeUnit::Hour => self.add_wall_clock(instant, amount, MILLIS_PER_HOUR),
            TimeUnit::Minute => self.add_wall_clock(instant, amount, MILLIS_PER_MINUTE),
            TimeUnit::Step(minutes) => self.add_wall_clock(
                instant,
                amount,
                i64::from(step_len(minutes)) * MILLIS_PER_MINUTE,
            ),
        };
        shifted.unwrap_or_else(|| {
            warn!(%instant, ?unit, amount, "shift leaves the calendar range, keeping instant");
            instant
        })
    }

    /// Returns true when both instants fall in the same `unit`.
    pub fn is_same(&self, a: Instant, b: Instant, unit: TimeUnit) -> bool {
        self.start_of(a, unit) == self.start_of(b, unit)
    }

    /// Returns midnight January 1 of the decade containing `instant`.
    ///
    /// Decades start on years divisible by ten, counting down for negative
    /// years (-5 belongs to the decade starting at -10).
    pub fn decade_start(&self, instant: Instant) -> Instant {
        let civil = self.civil(instant);
        let decade = civil.year().div_euclid(10) * 10;
        let date = NaiveDate::from_ymd_opt(decade, 1, 1).unwrap_or_else(|| first_of_year(civil.date()));
        self.from_civil(midnight(date))
    }

    /// Returns the calendar year of `instant`.
    pub fn year_of(&self, instant: Instant) -> i32 {
        self.civil(instant).year()
    }

    /// Returns how many days `weekday` sits after the first day of the week.
    pub fn weekday_offset(&self, weekday: Weekday) -> u32 {
        (weekday.num_days_from_sunday() + 7 - self.first_weekday.num_days_from_sunday()) % 7
    }

    /// Returns the start of the week (at midnight) containing `instant`.
    pub fn start_of_week(&self, instant: Instant) -> Instant {
        let day = self.start_of(instant, TimeUnit::Day);
        let offset = self.weekday_offset(self.civil(day).weekday());
        self.add(day, TimeUnit::Day, -i64::from(offset))
    }

    /// Returns the seven weekdays in display order.
    pub fn weekdays(&self) -> [Weekday; 7] {
        let mut days = [self.first_weekday; 7];
        for idx in 1..days.len() {
            days[idx] = days[idx - 1].succ();
        }
        days
    }

    /// Formats `instant` with `labels` in this calendar's zone.
    pub fn format(
        &self,
        instant: Instant,
        pattern: LabelPattern,
        labels: &dyn LabelFormatter,
    ) -> String {
        labels.format(&self.civil(instant), pattern)
    }

    fn add_months(&self, instant: Instant, months: i64) -> Option<Instant> {
        let civil = self.civil(instant);
        let count = Months::new(u32::try_from(months.unsigned_abs()).ok()?);
        let shifted = if months >= 0 {
            civil.checked_add_months(count)
        } else {
            civil.checked_sub_months(count)
        }?;
        Some(self.resolve(shifted, Gap::toward(months)))
    }

    fn add_days(&self, instant: Instant, days: i64) -> Option<Instant> {
        let civil = self.civil(instant);
        let count = Days::new(days.unsigned_abs());
        let shifted = if days >= 0 {
            civil.checked_add_days(count)
        } else {
            civil.checked_sub_days(count)
        }?;
        Some(self.resolve(shifted, Gap::toward(days)))
    }

    fn add_wall_clock(&self, instant: Instant, amount: i64, unit_millis: i64) -> Option<Instant> {
        let delta = amount
            .checked_mul(unit_millis)
            .and_then(TimeDelta::try_milliseconds)?;
        let shifted = self.civil(instant).checked_add_signed(delta)?;
        let resolved = self.resolve(shifted, Gap::toward(amount));
        DateTime::<Utc>::from_timestamp_millis(resolved.millis()).map(|_| resolved)
    }
}

/// Which side of a DST gap a skipped wall-clock time lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Gap {
    Forward,
    Backward,
}

impl Gap {
    fn toward(amount: i64) -> Self {
        if amount < 0 { Gap::Backward } else { Gap::Forward }
    }
}

fn resolve_wall_clock<Z: TimeZone>(tz: &Z, civil: NaiveDateTime, gap: Gap) -> Instant {
    let skip = match gap {
        Gap::Forward => TimeDelta::hours(1),
        Gap::Backward => TimeDelta::hours(-1),
    };
    let millis = match tz.from_local_datetime(&civil) {
        LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => dt.timestamp_millis(),
        LocalResult::None => civil
            .checked_add_signed(skip)
            .and_then(|moved| tz.from_local_datetime(&moved).earliest())
            .map(|dt| dt.timestamp_millis())
            .unwrap_or_else(|| civil.and_utc().timestamp_millis()),
    };
    Instant(millis)
}

fn truncate(civil: NaiveDateTime, unit: TimeUnit) -> NaiveDateTime {
    let date = civil.date();
    let hour = civil.hour();
    let minute = civil.minute();
    match unit {
        TimeUnit::Year => midnight(first_of_year(date)),
        TimeUnit::Month => midnight(date.with_day(1).unwrap_or(date)),
        TimeUnit::Day => midnight(date),
        TimeUnit::Hour => at_time(date, hour, 0),
        TimeUnit::Minute => at_time(date, hour, minute),
        TimeUnit::Step(minutes) => at_time(date, hour, minute - minute % step_len(minutes)),
    }
}

fn first_of_year(date: NaiveDate) -> NaiveDate {
    date.with_ordinal(1).unwrap_or(date)
}

fn midnight(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

fn at_time(date: NaiveDate, hour: u32, minute: u32) -> NaiveDateTime {
    date.and_time(NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> Instant {
        Calendar::utc()
            .instant_at(year, month, day, hour, minute)
            .expect("valid test date")
    }

    #[test]
    fn test_start_of_units() {
        let cal = Calendar::utc();
        let t = Instant(at(2024, 7, 18, 13, 47).millis() + 31_250);

        assert_eq!(cal.start_of(t, TimeUnit::Year), at(2024, 1, 1, 0, 0));
        assert_eq!(cal.start_of(t, TimeUnit::Month), at(2024, 7, 1, 0, 0));
        assert_eq!(cal.start_of(t, TimeUnit::Day), at(2024, 7, 18, 0, 0));
        assert_eq!(cal.start_of(t, TimeUnit::Hour), at(2024, 7, 18, 13, 0));
        assert_eq!(cal.start_of(t, TimeUnit::Minute), at(2024, 7, 18, 13, 47));
        assert_eq!(cal.start_of(t, TimeUnit::Step(5)), at(2024, 7, 18, 13, 45));
    }

    #[test]
    fn test_end_of_month_is_leap_aware() {
        let cal = Calendar::utc();
        let leap = cal.end_of(at(2024, 2, 10, 0, 0), TimeUnit::Month);
        assert_eq!(leap, Instant(at(2024, 3, 1, 0, 0).millis() - 1));

        let common = cal.end_of(at(2023, 2, 10, 0, 0), TimeUnit::Month);
        assert_eq!(common, Instant(at(2023, 3, 1, 0, 0).millis() - 1));
    }

    #[test]
    fn test_month_shift_clamps_day() {
        let cal = Calendar::utc();
        assert_eq!(
            cal.add(at(2023, 1, 31, 8, 0), TimeUnit::Month, 1),
            at(2023, 2, 28, 8, 0)
        );
        assert_eq!(
            cal.add(at(2024, 3, 31, 8, 0), TimeUnit::Month, -1),
            at(2024, 2, 29, 8, 0)
        );
        assert_eq!(
            cal.add(at(2024, 2, 29, 0, 0), TimeUnit::Year, 1),
            at(2025, 2, 28, 0, 0)
        );
    }

    #[test]
    fn test_clock_units() {
        let cal = Calendar::utc();
        assert_eq!(
            cal.add(at(2024, 12, 31, 23, 0), TimeUnit::Hour, 1),
            at(2025, 1, 1, 0, 0)
        );
        assert_eq!(
            cal.add(at(2024, 1, 1, 0, 0), TimeUnit::Step(5), -1),
            at(2023, 12, 31, 23, 55)
        );
        assert_eq!(
            cal.add(at(2024, 1, 1, 0, 0), TimeUnit::Day, -1),
            at(2023, 12, 31, 0, 0)
        );
    }

    #[test]
    fn test_overflowing_shift_keeps_instant() {
        let cal = Calendar::utc();
        let t = at(2024, 1, 1, 0, 0);
        assert_eq!(cal.add(t, TimeUnit::Hour, i64::MAX), t);
        assert_eq!(cal.add(t, TimeUnit::Year, i64::MIN), t);
    }

    #[test]
    fn test_decade_start_floors_negative_years() {
        let cal = Calendar::utc();
        assert_eq!(cal.decade_start(at(2024, 6, 1, 12, 0)), at(2020, 1, 1, 0, 0));
        assert_eq!(cal.decade_start(at(2030, 1, 1, 0, 0)), at(2030, 1, 1, 0, 0));
        assert_eq!(cal.decade_start(at(-5, 6, 1, 0, 0)), at(-10, 1, 1, 0, 0));
    }

    #[test]
    fn test_is_same() {
        let cal = Calendar::utc();
        assert!(cal.is_same(at(2024, 5, 1, 0, 0), at(2024, 5, 31, 23, 59), TimeUnit::Month));
        assert!(!cal.is_same(at(2024, 5, 1, 10, 4), at(2024, 5, 1, 10, 5), TimeUnit::Step(5)));
    }

    #[test]
    fn test_fixed_offset_zone() {
        let zone = Zone::east_hours(9).expect("valid offset");
        let cal = Calendar::new(zone, Weekday::Sun);
        // 2024-01-01T00:00 at +09:00 is 2023-12-31T15:00Z.
        let midnight = cal.instant_at(2024, 1, 1, 0, 0).expect("valid date");
        assert_eq!(midnight, at(2023, 12, 31, 15, 0));
        assert_eq!(cal.start_of(at(2023, 12, 31, 20, 0), TimeUnit::Day), midnight);
    }

    #[test]
    fn test_week_alignment() {
        let sunday_first = Calendar::utc();
        // 2024-05-01 is a Wednesday.
        let wednesday = at(2024, 5, 1, 15, 0);
        assert_eq!(sunday_first.start_of_week(wednesday), at(2024, 4, 28, 0, 0));

        let monday_first = Calendar::new(Zone::Utc, Weekday::Mon);
        assert_eq!(monday_first.start_of_week(wednesday), at(2024, 4, 29, 0, 0));
        assert_eq!(monday_first.weekdays()[6], Weekday::Sun);
    }

    #[test]
    fn test_zone_parsing() {
        assert_eq!("UTC".parse::<Zone>(), Ok(Zone::Utc));
        assert_eq!("local".parse::<Zone>(), Ok(Zone::Local));
        assert_eq!(
            "+05:30".parse::<Zone>(),
            Ok(Zone::Fixed(
                FixedOffset::east_opt(5 * 3_600 + 30 * 60).expect("valid offset")
            ))
        );
        assert_eq!(
            "-0800".parse::<Zone>(),
            Ok(Zone::Fixed(FixedOffset::west_opt(8 * 3_600).expect("valid offset")))
        );
        assert!(matches!("mars".parse::<Zone>(), Err(Error::InvalidZone(_))));
        assert!("+25:00".parse::<Zone>().is_err());
    }

    fn new_york() -> Calendar {
        Calendar::new(Zone::Named(chrono_tz::America::New_York), Weekday::Sun)
    }

    #[test]
    fn test_hour_shifts_follow_the_wall_clock_across_fall_back() {
        let cal = new_york();
        let one_am = cal.instant_at(2024, 11, 3, 1, 0).expect("valid date");
        // 01:00 is repeated; the earlier occurrence is still daylight time.
        assert_eq!(one_am, at(2024, 11, 3, 5, 0));

        let two_am = cal.add(one_am, TimeUnit::Hour, 1);
        assert_eq!(two_am, cal.instant_at(2024, 11, 3, 2, 0).expect("valid date"));
        assert_eq!(cal.add(two_am, TimeUnit::Hour, -1), one_am);

        let repeated = Instant(one_am.millis() + 3_600_000 + 30 * 60_000);
        assert_eq!(cal.start_of(repeated, TimeUnit::Hour), one_am);
        assert_eq!(cal.add(one_am, TimeUnit::Step(5), 12), two_am);
    }

    #[test]
    fn test_spring_forward_gap_resolves_toward_travel() {
        let cal = new_york();
        let one_am = cal.instant_at(2024, 3, 10, 1, 0).expect("valid date");
        let three_am = cal.instant_at(2024, 3, 10, 3, 0).expect("valid date");
        assert_eq!(cal.instant_at(2024, 3, 10, 2, 0), Some(three_am));
        assert_eq!(three_am.millis() - one_am.millis(), 3_600_000);

        assert_eq!(cal.add(one_am, TimeUnit::Hour, 1), three_am);
        assert_eq!(cal.add(three_am, TimeUnit::Hour, -1), one_am);
        assert_eq!(
            cal.add(three_am, TimeUnit::Step(5), -1),
            cal.instant_at(2024, 3, 10, 1, 55).expect("valid date")
        );
    }

    #[test]
    fn test_named_zone_parsing() {
        assert_eq!(
            "America/New_York".parse::<Zone>(),
            Ok(Zone::Named(chrono_tz::America::New_York))
        );
        assert_eq!(Zone::from_str("utc"), Ok(Zone::Utc));
        assert!("Mars/Olympus_Mons".parse::<Zone>().is_err());
    }
}
