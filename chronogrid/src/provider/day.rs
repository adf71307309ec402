use crate::{
    Granularity, Instant,
    calendar::{Calendar, TimeUnit},
    labels::LabelPattern,
};

use super::{ComputeContext, GranularityProvider};

/// The 24 hours of one day in a 6×4 grid.
///
/// Hours are counted on the wall clock. A spring-forward day has only 23, so
/// its last cell is the following midnight, marked out of range.
#[derive(Debug, Default, Clone, Copy)]
pub struct DayProvider;

impl GranularityProvider for DayProvider {
    fn granularity(&self) -> Granularity {
        Granularity::Day
    }

    fn page_label(&self, ctx: &ComputeContext<'_>, page_start: Instant) -> String {
        ctx.calendar.format(page_start, LabelPattern::WeekdayDate, ctx.labels)
    }

    fn cell_text(&self, ctx: &ComputeContext<'_>, cell: Instant) -> (String, String) {
        (
            ctx.calendar.format(cell, LabelPattern::Time, ctx.labels),
            ctx.calendar.format(cell, LabelPattern::LongDateTime, ctx.labels),
        )
    }

    fn is_out_of_range(&self, calendar: &Calendar, page_start: Instant, cell: Instant) -> bool {
        !calendar.is_same(page_start, cell, TimeUnit::Day)
    }
}
