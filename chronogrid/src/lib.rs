//! # chronogrid
//!
//! The view-model engine and navigation state machine behind a calendar
//! date/time picker. chronogrid draws nothing: it turns an instant into an
//! immutable [`ViewModel`] describing one page of the picker, and turns user
//! gestures into the next page. Rendering, focus handling and form binding
//! belong to the adapter.
//!
//! # Granularities
//!
//! The picker zooms through five grids, coarse to fine:
//!
//! | [`Granularity`] | Cells | Grid |
//! |---|---|---|
//! | `Decade` | years | 2×5 |
//! | `Year` | months | 3×4 |
//! | `Month` | days | 6×7 |
//! | `Day` | hours | 6×4 |
//! | `Hour` | 5-minute steps | 3×4 |
//!
//! Each grid is computed by a stateless [`GranularityProvider`]. The
//! [`DateTimePicker`] keeps track of which grid is on display and moves
//! between them: activating a cell drills down, the up button ascends, and
//! activating a cell at the finest configured grid commits the value.
//!
//! # Example
//!
//! ```
//! use chronogrid::{
//!     DateTimePicker, FixedClock, Granularity, Instant, Lateral, PickerChange, PickerConfig,
//!     Zone,
//! };
//!
//! // 2024-01-05T13:20Z
//! let now = Instant::from_millis(1_704_460_800_000);
//! let mut picker = DateTimePicker::new(
//!     PickerConfig::default()
//!         .zone(Zone::Utc)
//!         .start_granularity(Granularity::Year)
//!         .min_granularity(Granularity::Year)
//!         .clock(FixedClock(now)),
//! );
//! picker.on_change(|change: PickerChange| println!("picked {:?}", change.value));
//!
//! let view = picker.view_model();
//! assert_eq!(view.label, "2024");
//! assert_eq!(view.left_nav.accessible_label, "Go to 2023");
//!
//! picker.on_lateral_navigate(Lateral::Right);
//! let march = picker.view_model().grid[0][2].instant;
//! picker.on_cell_activate(march);
//! assert_eq!(picker.value(), Some(march));
//! ```
//!
//! # Time zones
//!
//! Instants are plain milliseconds since the epoch. A picker reads them in
//! one [`Zone`] (UTC, the system local zone, or a fixed offset) chosen at
//! construction.
//!
//! # Logging
//!
//! Transitions, commits and notifications are reported through `tracing` at
//! `debug` level. The library never installs a subscriber.
#![deny(missing_docs, clippy::unwrap_used)]

pub mod calendar;
pub mod callback;
pub mod clock;
pub mod error;
pub mod granularity;
mod instant;
pub mod key;
pub mod labels;
pub mod picker;
pub mod provider;
pub mod view_model;

pub use chrono::Weekday;

pub use crate::{
    calendar::{Calendar, TimeUnit, Zone},
    callback::{Callback, CallbackWith},
    clock::{Clock, FixedClock, SystemClock},
    error::{Error, Result},
    granularity::Granularity,
    instant::Instant,
    key::{KeyResponse, PickerKey},
    labels::{EnglishLabels, LabelFormatter, LabelPattern},
    picker::{
        DateTimePicker, Direction, GranularityBounds, Lateral, NavigationState, PageDirection,
        PickerChange, PickerConfig, PickerState,
    },
    provider::{ComputeContext, GranularityProvider, compute_view, provider_for},
    view_model::{Cell, NavTarget, ViewModel},
};
