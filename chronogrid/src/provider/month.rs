use crate::{
    Granularity, Instant,
    calendar::{Calendar, TimeUnit},
    labels::LabelPattern,
};

use super::{ComputeContext, GranularityProvider};

/// Six weeks of days around one month, 42 cells.
///
/// The grid opens on the first weekday at or before the 1st; days of the
/// neighbouring months are flagged `is_out_of_range`.
#[derive(Debug, Default, Clone, Copy)]
pub struct MonthProvider;

impl GranularityProvider for MonthProvider {
    fn granularity(&self) -> Granularity {
        Granularity::Month
    }

    fn page_label(&self, ctx: &ComputeContext<'_>, page_start: Instant) -> String {
        ctx.calendar.format(page_start, LabelPattern::MonthYear, ctx.labels)
    }

    fn cell_text(&self, ctx: &ComputeContext<'_>, cell: Instant) -> (String, String) {
        (
            ctx.calendar.format(cell, LabelPattern::DayOfMonth, ctx.labels),
            ctx.calendar.format(cell, LabelPattern::MediumDate, ctx.labels),
        )
    }

    fn first_cell(&self, calendar: &Calendar, page_start: Instant) -> Instant {
        calendar.start_of_week(page_start)
    }

    fn column_headers(&self, ctx: &ComputeContext<'_>) -> Option<Vec<String>> {
        Some(
            ctx.calendar
                .weekdays()
                .into_iter()
                .map(|weekday| ctx.labels.weekday(weekday))
                .collect(),
        )
    }

    fn is_out_of_range(&self, calendar: &Calendar, page_start: Instant, cell: Instant) -> bool {
        !calendar.is_same(page_start, cell, TimeUnit::Month)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Weekday;

    use super::*;
    use crate::{
        calendar::Zone,
        labels::EnglishLabels,
        provider::test_support::{CALENDAR, at, ctx},
    };

    #[test]
    fn test_month_page() {
        let anchor = at(2024, 1, 17, 9, 30);
        let view = MonthProvider.compute(&ctx(at(2024, 1, 5, 0, 0)), anchor, None);

        assert_eq!(view.label, "Jan 2024");
        assert_eq!(view.active_instant, at(2024, 1, 17, 0, 0));
        assert_eq!(view.left_nav.accessible_label, "Go to Dec 2023");
        assert_eq!(view.right_nav.target, at(2024, 2, 1, 0, 0));
        assert_eq!(view.right_nav.accessible_label, "Go to Feb 2024");
        let up = view.up_nav.as_ref().expect("month grid has a parent");
        assert_eq!(up.target, at(2024, 1, 1, 0, 0));
        assert_eq!(up.accessible_label, "Go to 2024");

        assert_eq!(
            view.column_headers.as_deref(),
            Some(&["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"].map(String::from)[..])
        );
        assert_eq!(view.cells().count(), 42);

        // 2024-01-01 is a Monday, so the grid opens on Sunday 2023-12-31.
        let first = &view.grid[0][0];
        assert_eq!(first.instant, at(2023, 12, 31, 0, 0));
        assert_eq!(first.display_text, "31");
        assert!(first.is_out_of_range);
        assert_eq!(view.grid[0][1].accessible_label, "Jan 1, 2024");
        assert!(!view.grid[0][1].is_out_of_range);
        assert_eq!(view.grid[5][6].instant, at(2024, 2, 10, 0, 0));
        assert!(view.grid[5][6].is_out_of_range);

        let today = view.cells().find(|cell| cell.is_today).expect("now is shown");
        assert_eq!(today.display_text, "5");
    }

    #[test]
    fn test_first_weekday_shifts_grid() {
        let calendar = Calendar::new(Zone::Utc, Weekday::Mon);
        let ctx = ComputeContext {
            calendar: &calendar,
            labels: &EnglishLabels,
            now: at(2024, 1, 1, 0, 0),
        };
        let view = MonthProvider.compute(&ctx, at(2024, 1, 17, 0, 0), None);
        assert_eq!(view.grid[0][0].instant, at(2024, 1, 1, 0, 0));
        let headers = view.column_headers.expect("month grid has headers");
        assert_eq!(headers.first().map(String::as_str), Some("Mo"));
        assert_eq!(headers.last().map(String::as_str), Some("Su"));
    }

    #[test]
    fn test_right_from_month_end_crosses_page() {
        let jan_31 = at(2024, 1, 31, 18, 0);
        let next = MonthProvider.move_right(&CALENDAR, jan_31);
        assert_eq!(next, at(2024, 2, 1, 0, 0));

        let view = MonthProvider.compute(&ctx(jan_31), next, None);
        assert_eq!(view.label, "Feb 2024");
        assert_eq!(view.active_instant, next);
    }

    #[test]
    fn test_month_navigation() {
        let jan_31 = at(2024, 1, 31, 18, 0);
        assert_eq!(MonthProvider.move_up(&CALENDAR, jan_31), at(2024, 1, 24, 0, 0));
        assert_eq!(MonthProvider.move_down(&CALENDAR, jan_31), at(2024, 2, 7, 0, 0));
        assert_eq!(MonthProvider.page_down(&CALENDAR, jan_31), at(2024, 2, 29, 0, 0));
        assert_eq!(MonthProvider.page_up(&CALENDAR, jan_31), at(2023, 12, 31, 0, 0));
        assert_eq!(MonthProvider.go_home(&CALENDAR, jan_31), at(2024, 1, 1, 0, 0));
        assert_eq!(
            MonthProvider.go_end(&CALENDAR, at(2024, 2, 3, 0, 0)),
            at(2024, 2, 29, 0, 0)
        );
    }

    #[test]
    fn test_selection_outside_page_is_not_marked() {
        let view = MonthProvider.compute(
            &ctx(at(2024, 1, 1, 0, 0)),
            at(2024, 3, 10, 0, 0),
            Some(at(2024, 5, 1, 12, 0)),
        );
        assert!(view.selected_cell().is_none());
    }
}
