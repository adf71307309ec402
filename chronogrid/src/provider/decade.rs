use crate::{
    Granularity, Instant,
    calendar::Calendar,
    labels::LabelPattern,
};

use super::{ComputeContext, GranularityProvider};

/// Ten years in a 2×5 grid, starting at a year divisible by ten.
#[derive(Debug, Default, Clone, Copy)]
pub struct DecadeProvider;

impl GranularityProvider for DecadeProvider {
    fn granularity(&self) -> Granularity {
        Granularity::Decade
    }

    fn page_start(&self, calendar: &Calendar, instant: Instant) -> Instant {
        calendar.decade_start(instant)
    }

    fn page_label(&self, ctx: &ComputeContext<'_>, page_start: Instant) -> String {
        let first = ctx.calendar.year_of(page_start);
        ctx.labels.decade(first, first + 9)
    }

    fn cell_text(&self, ctx: &ComputeContext<'_>, cell: Instant) -> (String, String) {
        let year = ctx.calendar.format(cell, LabelPattern::Year, ctx.labels);
        (year.clone(), year)
    }
}
