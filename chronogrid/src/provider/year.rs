use crate::{Granularity, Instant, labels::LabelPattern};

use super::{ComputeContext, GranularityProvider};

/// Twelve months in a 3×4 grid.
#[derive(Debug, Default, Clone, Copy)]
pub struct YearProvider;

impl GranularityProvider for YearProvider {
    fn granularity(&self) -> Granularity {
        Granularity::Year
    }

    fn page_label(&self, ctx: &ComputeContext<'_>, page_start: Instant) -> String {
        ctx.calendar.format(page_start, LabelPattern::Year, ctx.labels)
    }

    fn cell_text(&self, ctx: &ComputeContext<'_>, cell: Instant) -> (String, String) {
        (
            ctx.calendar.format(cell, LabelPattern::MonthShort, ctx.labels),
            ctx.calendar.format(cell, LabelPattern::MonthYear, ctx.labels),
        )
    }
}
