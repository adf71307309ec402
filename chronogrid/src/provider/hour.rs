use crate::{Granularity, Instant, labels::LabelPattern};

use super::{ComputeContext, GranularityProvider};

/// One hour in twelve 5-minute steps, 3×4.
///
/// The active cell is the latest step at or before the anchor.
#[derive(Debug, Default, Clone, Copy)]
pub struct HourProvider;

impl GranularityProvider for HourProvider {
    fn granularity(&self) -> Granularity {
        Granularity::Hour
    }

    fn page_label(&self, ctx: &ComputeContext<'_>, page_start: Instant) -> String {
        ctx.calendar.format(page_start, LabelPattern::MediumDateTime, ctx.labels)
    }

    fn cell_text(&self, ctx: &ComputeContext<'_>, cell: Instant) -> (String, String) {
        (
            ctx.calendar.format(cell, LabelPattern::Time, ctx.labels),
            ctx.calendar.format(cell, LabelPattern::LongDateTime, ctx.labels),
        )
    }
}
