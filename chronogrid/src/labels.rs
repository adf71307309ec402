//! Label formatting hook.
//!
//! Every user-visible string in a [`ViewModel`](crate::ViewModel) comes from a
//! [`LabelFormatter`]. The picker ships [`EnglishLabels`]; hosts that need a
//! different language implement the trait and pass it through
//! [`PickerConfig`](crate::PickerConfig).

use chrono::{Datelike, NaiveDateTime, Weekday};

/// The shapes of text the providers ask for.
///
/// Examples show the output of [`EnglishLabels`] for 2024-01-05 13:05.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LabelPattern {
    /// `2024`
    Year,
    /// `Jan`
    MonthShort,
    /// `Jan 2024`
    MonthYear,
    /// `5`
    DayOfMonth,
    /// `Jan 5, 2024`
    MediumDate,
    /// `Fri, Jan 5, 2024`
    WeekdayDate,
    /// `1:05 PM`
    Time,
    /// `Jan 5, 2024 1:05 PM`
    MediumDateTime,
    /// `January 5, 2024 1:05 PM`
    LongDateTime,
}

/// Produces display and accessibility strings for the picker.
pub trait LabelFormatter: Send + Sync {
    /// Formats wall-clock fields with `pattern`.
    fn format(&self, civil: &NaiveDateTime, pattern: LabelPattern) -> String;

    /// Short weekday column header.
    fn weekday(&self, weekday: Weekday) -> String;

    /// Label for the ten years `first_year..=last_year`.
    fn decade(&self, first_year: i32, last_year: i32) -> String {
        format!("{first_year}-{last_year}")
    }

    /// Accessible label for a navigation control leading to `range`.
    fn go_to(&self, range: &str) -> String {
        format!("Go to {range}")
    }
}

/// US English labels.
#[derive(Debug, Default, Clone, Copy)]
pub struct EnglishLabels;

impl LabelFormatter for EnglishLabels {
    fn format(&self, civil: &NaiveDateTime, pattern: LabelPattern) -> String {
        let year = civil.year();
        match pattern {
            LabelPattern::Year => year.to_string(),
            LabelPattern::MonthShort => civil.format("%b").to_string(),
            LabelPattern::MonthYear => format!("{} {year}", civil.format("%b")),
            LabelPattern::DayOfMonth => civil.day().to_string(),
            LabelPattern::MediumDate => format!("{}, {year}", civil.format("%b %-d")),
            LabelPattern::WeekdayDate => format!("{}, {year}", civil.format("%a, %b %-d")),
            LabelPattern::Time => civil.format("%-I:%M %p").to_string(),
            LabelPattern::MediumDateTime => {
                format!("{}, {year} {}", civil.format("%b %-d"), civil.format("%-I:%M %p"))
            }
            LabelPattern::LongDateTime => {
                format!("{}, {year} {}", civil.format("%B %-d"), civil.format("%-I:%M %p"))
            }
        }
    }

    fn weekday(&self, weekday: Weekday) -> String {
        let label = match weekday {
            Weekday::Sun => "Su",
            Weekday::Mon => "Mo",
            Weekday::Tue => "Tu",
            Weekday::Wed => "We",
            Weekday::Thu => "Th",
            Weekday::Fri => "Fr",
            Weekday::Sat => "Sa",
        };
        label.to_string()
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn civil(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 5)
            .and_then(|date| date.and_hms_opt(hour, minute, 0))
            .expect("valid test date")
    }

    #[test]
    fn test_english_patterns() {
        let labels = EnglishLabels;
        let t = civil(13, 5);
        assert_eq!(labels.format(&t, LabelPattern::Year), "2024");
        assert_eq!(labels.format(&t, LabelPattern::MonthShort), "Jan");
        assert_eq!(labels.format(&t, LabelPattern::MonthYear), "Jan 2024");
        assert_eq!(labels.format(&t, LabelPattern::DayOfMonth), "5");
        assert_eq!(labels.format(&t, LabelPattern::MediumDate), "Jan 5, 2024");
        assert_eq!(labels.format(&t, LabelPattern::WeekdayDate), "Fri, Jan 5, 2024");
        assert_eq!(labels.format(&t, LabelPattern::Time), "1:05 PM");
        assert_eq!(
            labels.format(&t, LabelPattern::MediumDateTime),
            "Jan 5, 2024 1:05 PM"
        );
        assert_eq!(
            labels.format(&t, LabelPattern::LongDateTime),
            "January 5, 2024 1:05 PM"
        );
    }

    #[test]
    fn test_midnight_is_twelve_am() {
        assert_eq!(EnglishLabels.format(&civil(0, 0), LabelPattern::Time), "12:00 AM");
    }

    #[test]
    fn test_default_hooks() {
        let labels = EnglishLabels;
        assert_eq!(labels.decade(2020, 2029), "2020-2029");
        assert_eq!(labels.go_to("2010-2019"), "Go to 2010-2019");
        assert_eq!(labels.weekday(Weekday::Wed), "We");
    }
}
