//! The immutable presentation model handed to adapters.
//!
//! A [`ViewModel`] is everything a renderer needs to draw one page of the
//! picker: the heading, three navigation targets, optional weekday headers
//! and a rectangular grid of [`Cell`]s. It carries no behaviour; adapters
//! send gestures back to the [`DateTimePicker`](crate::DateTimePicker) using
//! the instants stored here.

use crate::{Granularity, Instant};

/// A navigation control's destination.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct NavTarget {
    /// Anchor of the page this control leads to.
    pub target: Instant,
    /// Screen-reader text, e.g. `"Go to 2010-2019"`.
    pub accessible_label: String,
}

/// One selectable unit in the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Cell {
    /// Short visible text.
    pub display_text: String,
    /// Full screen-reader text.
    pub accessible_label: String,
    /// Start of the unit this cell represents.
    pub instant: Instant,
    /// Holds keyboard focus.
    pub is_active: bool,
    /// Contains the committed value.
    pub is_selected: bool,
    /// Contains the current time.
    pub is_today: bool,
    /// Lies outside the displayed page (leading and trailing month days).
    pub is_out_of_range: bool,
}

/// One page of the picker.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ViewModel {
    /// Which grid this is.
    pub granularity: Granularity,
    /// Heading describing the displayed range.
    pub label: String,
    /// Instant of the active cell.
    pub active_instant: Instant,
    /// Previous page.
    pub left_nav: NavTarget,
    /// Next page.
    pub right_nav: NavTarget,
    /// Coarser page, absent at the top.
    pub up_nav: Option<NavTarget>,
    /// Weekday headers, month grid only.
    pub column_headers: Option<Vec<String>>,
    /// Rows of cells.
    pub grid: Vec<Vec<Cell>>,
}

impl ViewModel {
    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.grid.len()
    }

    /// Number of columns in the first row.
    pub fn columns(&self) -> usize {
        self.grid.first().map_or(0, Vec::len)
    }

    /// Iterates cells row by row.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.grid.iter().flatten()
    }

    /// The cell holding keyboard focus.
    pub fn active_cell(&self) -> Option<&Cell> {
        self.cells().find(|cell| cell.is_active)
    }

    /// The cell containing the committed value, if it is on this page.
    pub fn selected_cell(&self) -> Option<&Cell> {
        self.cells().find(|cell| cell.is_selected)
    }
}
