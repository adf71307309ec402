//! # Granularity Providers
//!
//! One [`GranularityProvider`] per [`Granularity`]. A provider is stateless:
//! given a calendar and an anchor it computes the [`ViewModel`] for the page
//! containing the anchor, and it answers where each navigation key leads.
//!
//! The trait's default methods hold the shared page and grid logic; each
//! provider only supplies its labels and, for the month grid, the week
//! alignment. Providers are looked up through [`provider_for`].
//!
//! ## Normalization
//!
//! Every operation first snaps the anchor to the active cell
//! ([`GranularityProvider::active_instant`]), so moves compose:
//! `move_right(move_left(t)) == active_instant(t)`.

mod day;
mod decade;
mod hour;
mod month;
mod year;

pub use day::DayProvider;
pub use decade::DecadeProvider;
pub use hour::HourProvider;
pub use month::MonthProvider;
pub use year::YearProvider;

use crate::{
    Granularity, Instant,
    calendar::Calendar,
    labels::LabelFormatter,
    view_model::{Cell, NavTarget, ViewModel},
};

/// Inputs shared by one `compute` call.
#[derive(Clone, Copy)]
pub struct ComputeContext<'a> {
    /// Zone and week configuration.
    pub calendar: &'a Calendar,
    /// Text source.
    pub labels: &'a dyn LabelFormatter,
    /// The current instant, read once for the whole grid.
    pub now: Instant,
}

/// Computes one granularity's view model and navigation targets.
pub trait GranularityProvider: Send + Sync {
    /// The granularity this provider renders.
    fn granularity(&self) -> Granularity;

    /// Heading for the page starting at `page_start`.
    fn page_label(&self, ctx: &ComputeContext<'_>, page_start: Instant) -> String;

    /// Visible text and accessible label of the cell starting at `cell`.
    fn cell_text(&self, ctx: &ComputeContext<'_>, cell: Instant) -> (String, String);

    /// Start of the page containing `instant`.
    fn page_start(&self, calendar: &Calendar, instant: Instant) -> Instant {
        let (unit, _) = self.granularity().page();
        calendar.start_of(instant, unit)
    }

    /// Instant of the top-left cell for the page starting at `page_start`.
    fn first_cell(&self, _calendar: &Calendar, page_start: Instant) -> Instant {
        page_start
    }

    /// Column headers, if the grid has any.
    fn column_headers(&self, _ctx: &ComputeContext<'_>) -> Option<Vec<String>> {
        None
    }

    /// Whether `cell` lies outside the page starting at `page_start`.
    fn is_out_of_range(&self, _calendar: &Calendar, _page_start: Instant, _cell: Instant) -> bool {
        false
    }

    /// The cell after `cell` in reading order.
    ///
    /// Each cell is placed from its predecessor, so a unit that a DST
    /// transition skips or repeats on the wall clock is shown once.
    fn next_cell(&self, calendar: &Calendar, cell: Instant) -> Instant {
        let unit = self.granularity().cell_unit();
        self.active_instant(calendar, calendar.add(cell, unit, 1))
    }

    /// The cell `anchor` falls in.
    fn active_instant(&self, calendar: &Calendar, anchor: Instant) -> Instant {
        calendar.start_of(anchor, self.granularity().cell_unit())
    }

    /// Builds the page containing `anchor`, marking `selected` if it is shown.
    fn compute(
        &self,
        ctx: &ComputeContext<'_>,
        anchor: Instant,
        selected: Option<Instant>,
    ) -> ViewModel {
        let calendar = ctx.calendar;
        let granularity = self.granularity();
        let (page_unit, page_len) = granularity.page();

        let active = self.active_instant(calendar, anchor);
        let start = self.page_start(calendar, active);
        let nav_to = |target: Instant| NavTarget {
            target,
            accessible_label: ctx.labels.go_to(&self.page_label(ctx, target)),
        };
        let left_nav = nav_to(self.page_start(calendar, calendar.add(start, page_unit, -page_len)));
        let right_nav = nav_to(self.page_start(calendar, calendar.add(start, page_unit, page_len)));
        let up_nav = granularity.coarser().map(|coarser| {
            let parent = provider_for(coarser);
            let parent_start = parent.page_start(calendar, start);
            NavTarget {
                target: start,
                accessible_label: ctx.labels.go_to(&parent.page_label(ctx, parent_start)),
            }
        });

        let (rows, columns) = granularity.dimensions();
        let today = self.active_instant(calendar, ctx.now);
        let selected = selected.map(|value| self.active_instant(calendar, value));
        let mut instants = std::iter::successors(Some(self.first_cell(calendar, start)), |&cell| {
            Some(self.next_cell(calendar, cell))
        });
        let grid = (0..rows)
            .map(|_| {
                instants
                    .by_ref()
                    .take(columns)
                    .map(|instant| {
                        let (display_text, accessible_label) = self.cell_text(ctx, instant);
                        Cell {
                            display_text,
                            accessible_label,
                            instant,
                            is_active: instant == active,
                            is_selected: selected == Some(instant),
                            is_today: instant == today,
                            is_out_of_range: self.is_out_of_range(calendar, start, instant),
                        }
                    })
                    .collect()
            })
            .collect();

        ViewModel {
            granularity,
            label: self.page_label(ctx, start),
            active_instant: active,
            left_nav,
            right_nav,
            up_nav,
            column_headers: self.column_headers(ctx),
            grid,
        }
    }

    /// One cell back.
    fn move_left(&self, calendar: &Calendar, anchor: Instant) -> Instant {
        self.shift_cells(calendar, anchor, -1)
    }

    /// One cell forward.
    fn move_right(&self, calendar: &Calendar, anchor: Instant) -> Instant {
        self.shift_cells(calendar, anchor, 1)
    }

    /// One row back.
    fn move_up(&self, calendar: &Calendar, anchor: Instant) -> Instant {
        let (_, columns) = self.granularity().dimensions();
        self.shift_cells(calendar, anchor, -(columns as i64))
    }

    /// One row forward.
    fn move_down(&self, calendar: &Calendar, anchor: Instant) -> Instant {
        let (_, columns) = self.granularity().dimensions();
        self.shift_cells(calendar, anchor, columns as i64)
    }

    /// One page back, keeping the position within the page where possible.
    fn page_up(&self, calendar: &Calendar, anchor: Instant) -> Instant {
        let (unit, len) = self.granularity().page();
        calendar.add(self.active_instant(calendar, anchor), unit, -len)
    }

    /// One page forward, keeping the position within the page where possible.
    fn page_down(&self, calendar: &Calendar, anchor: Instant) -> Instant {
        let (unit, len) = self.granularity().page();
        calendar.add(self.active_instant(calendar, anchor), unit, len)
    }

    /// First cell of the page.
    fn go_home(&self, calendar: &Calendar, anchor: Instant) -> Instant {
        self.page_start(calendar, self.active_instant(calendar, anchor))
    }

    /// Last cell of the page.
    fn go_end(&self, calendar: &Calendar, anchor: Instant) -> Instant {
        let (unit, len) = self.granularity().page();
        let start = self.page_start(calendar, self.active_instant(calendar, anchor));
        let last_millisecond = Instant(calendar.add(start, unit, len).millis().saturating_sub(1));
        self.active_instant(calendar, last_millisecond)
    }

    /// Moves `cells` cell units from the active cell.
    fn shift_cells(&self, calendar: &Calendar, anchor: Instant, cells: i64) -> Instant {
        let active = self.active_instant(calendar, anchor);
        calendar.add(active, self.granularity().cell_unit(), cells)
    }
}

static PROVIDERS: [&dyn GranularityProvider; 5] = [
    &DecadeProvider,
    &YearProvider,
    &MonthProvider,
    &DayProvider,
    &HourProvider,
];

/// Returns the provider for `granularity`.
pub fn provider_for(granularity: Granularity) -> &'static dyn GranularityProvider {
    PROVIDERS[granularity as usize]
}

/// Computes the view model for `granularity`.
#[tracing::instrument(level = "trace", skip(ctx))]
pub fn compute_view(
    ctx: &ComputeContext<'_>,
    granularity: Granularity,
    anchor: Instant,
    selected: Option<Instant>,
) -> ViewModel {
    provider_for(granularity).compute(ctx, anchor, selected)
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::{Instant, calendar::Calendar, labels::EnglishLabels};

    use super::ComputeContext;

    pub(crate) static CALENDAR: Calendar = Calendar::utc();

    pub(crate) fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> Instant {
        CALENDAR
            .instant_at(year, month, day, hour, minute)
            .expect("valid test date")
    }

    pub(crate) fn ctx(now: Instant) -> ComputeContext<'static> {
        ComputeContext {
            calendar: &CALENDAR,
            labels: &EnglishLabels,
            now,
        }
    }
}
