//! # Navigation Controller
//!
//! [`DateTimePicker`] owns the navigation state of one picker: which grid is
//! shown, where it is anchored, and the committed value. Every gesture from
//! the adapter (cell activation, the three navigation buttons, keys, external
//! value writes) maps to one method here, runs to completion, and leaves a
//! fresh [`ViewModel`] behind.
//!
//! ## Granularity bounds
//!
//! A picker moves between a coarsest (`max`) and a finest (`min`) granularity.
//! Activating a cell at `min` commits the value and returns to the start
//! granularity; activating anywhere else drills one level finer. Ascending
//! stops at `max`.
//!
//! ## Usage
//!
//! ```
//! use chronogrid::{DateTimePicker, FixedClock, Granularity, Instant, PickerConfig, Zone};
//!
//! let now = Instant::from_millis(1_704_460_800_000); // 2024-01-05T13:20Z
//! let mut picker = DateTimePicker::new(
//!     PickerConfig::default()
//!         .zone(Zone::Utc)
//!         .min_granularity(Granularity::Day)
//!         .clock(FixedClock(now)),
//! );
//! assert_eq!(picker.granularity(), Granularity::Month);
//!
//! let today = picker.view_model().active_instant;
//! picker.on_cell_activate(today);
//! assert_eq!(picker.granularity(), Granularity::Day);
//! ```

use std::{fmt, sync::Arc};

use chrono::Weekday;
use derive_setters::Setters;
use parking_lot::RwLock;
use tracing::debug;

use crate::{
    Granularity, Instant,
    calendar::{Calendar, Zone},
    callback::{Callback, CallbackWith},
    clock::{Clock, SystemClock},
    key::{KeyResponse, PickerKey},
    labels::{EnglishLabels, LabelFormatter},
    provider::{ComputeContext, compute_view, provider_for},
    view_model::ViewModel,
};

/// Construction options for [`DateTimePicker`].
#[derive(Clone, Setters)]
pub struct PickerConfig {
    /// Finest granularity; activating a cell here commits a value.
    pub min_granularity: Granularity,
    /// Granularity shown first and after each commit.
    pub start_granularity: Granularity,
    /// Coarsest granularity reachable by ascending.
    pub max_granularity: Granularity,
    /// Initial anchor when there is no value.
    #[setters(strip_option, into)]
    pub start_instant: Option<Instant>,
    /// Initially committed value.
    #[setters(strip_option, into)]
    pub value: Option<Instant>,
    /// Zone used to read instants.
    pub zone: Zone,
    /// First column of the month grid.
    pub first_weekday: Weekday,
    /// Source of "now".
    #[setters(skip)]
    pub clock: Arc<dyn Clock>,
    /// Source of every label.
    #[setters(skip)]
    pub labels: Arc<dyn LabelFormatter>,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            min_granularity: Granularity::Hour,
            start_granularity: Granularity::Month,
            max_granularity: Granularity::Decade,
            start_instant: None,
            value: None,
            zone: Zone::Local,
            first_weekday: Weekday::Sun,
            clock: Arc::new(SystemClock),
            labels: Arc::new(EnglishLabels),
        }
    }
}

impl PickerConfig {
    /// Sets the clock.
    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Sets a clock shared with other components.
    pub fn clock_shared(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Sets the label formatter.
    pub fn labels(mut self, labels: impl LabelFormatter + 'static) -> Self {
        self.labels = Arc::new(labels);
        self
    }

    /// Sets a label formatter shared with other components.
    pub fn labels_shared(mut self, labels: Arc<dyn LabelFormatter>) -> Self {
        self.labels = labels;
        self
    }
}

impl fmt::Debug for PickerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PickerConfig")
            .field("min_granularity", &self.min_granularity)
            .field("start_granularity", &self.start_granularity)
            .field("max_granularity", &self.max_granularity)
            .field("start_instant", &self.start_instant)
            .field("value", &self.value)
            .field("zone", &self.zone)
            .field("first_weekday", &self.first_weekday)
            .finish_non_exhaustive()
    }
}

/// Normalized granularity range of a picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GranularityBounds {
    min: Granularity,
    start: Granularity,
    max: Granularity,
}

impl GranularityBounds {
    /// Normalizes the configured range.
    ///
    /// A `min` coarser than `max` is swapped with it, and `start` is clamped
    /// into `max..=min`.
    pub fn new(min: Granularity, start: Granularity, max: Granularity) -> Self {
        let (min, max) = if min < max {
            debug!(%min, %max, "minimum granularity is coarser than maximum, swapping");
            (max, min)
        } else {
            (min, max)
        };
        let clamped = start.clamp(max, min);
        if clamped != start {
            debug!(%start, %clamped, "start granularity clamped into bounds");
        }
        Self {
            min,
            start: clamped,
            max,
        }
    }

    /// Finest granularity.
    pub fn min(&self) -> Granularity {
        self.min
    }

    /// Start granularity.
    pub fn start(&self) -> Granularity {
        self.start
    }

    /// Coarsest granularity.
    pub fn max(&self) -> Granularity {
        self.max
    }

    /// Whether `granularity` lies within the bounds.
    pub fn contains(&self, granularity: Granularity) -> bool {
        (self.max..=self.min).contains(&granularity)
    }
}

/// Where the picker currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationState {
    /// Grid on display.
    pub granularity: Granularity,
    /// Instant the grid is computed around.
    pub anchor: Instant,
    /// Committed value.
    pub committed: Option<Instant>,
}

/// Payload of a value change notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PickerChange {
    /// The new value, `None` when cleared.
    pub value: Option<Instant>,
}

/// Arrow-key directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Previous cell.
    Left,
    /// Next cell.
    Right,
    /// Previous row.
    Up,
    /// Next row.
    Down,
}

/// The left and right navigation buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lateral {
    /// Previous page.
    Left,
    /// Next page.
    Right,
}

/// Page keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageDirection {
    /// Previous page.
    Up,
    /// Next page.
    Down,
}

/// The navigation state machine of a date/time picker.
pub struct DateTimePicker {
    calendar: Calendar,
    clock: Arc<dyn Clock>,
    labels: Arc<dyn LabelFormatter>,
    bounds: GranularityBounds,
    state: NavigationState,
    view: Arc<ViewModel>,
    change_listeners: Vec<CallbackWith<PickerChange>>,
    touch_listeners: Vec<Callback>,
}

impl DateTimePicker {
    /// Creates a picker and computes its first view.
    ///
    /// The first anchor is the committed value, else the start instant, else
    /// the clock's current time.
    pub fn new(config: PickerConfig) -> Self {
        let PickerConfig {
            min_granularity,
            start_granularity,
            max_granularity,
            start_instant,
            value,
            zone,
            first_weekday,
            clock,
            labels,
        } = config;

        let calendar = Calendar::new(zone, first_weekday);
        let bounds = GranularityBounds::new(min_granularity, start_granularity, max_granularity);
        let now = clock.now();
        let state = NavigationState {
            granularity: bounds.start(),
            anchor: value.or(start_instant).unwrap_or(now),
            committed: value,
        };
        let view = Arc::new(build_view(&calendar, labels.as_ref(), now, &bounds, &state));
        debug!(granularity = %state.granularity, anchor = %state.anchor, "picker created");

        Self {
            calendar,
            clock,
            labels,
            bounds,
            state,
            view,
            change_listeners: Vec::new(),
            touch_listeners: Vec::new(),
        }
    }

    /// The current view model.
    pub fn view_model(&self) -> Arc<ViewModel> {
        Arc::clone(&self.view)
    }

    /// The grid on display.
    pub fn granularity(&self) -> Granularity {
        self.state.granularity
    }

    /// The committed value.
    pub fn value(&self) -> Option<Instant> {
        self.state.committed
    }

    /// The full navigation state.
    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    /// The normalized granularity range.
    pub fn bounds(&self) -> &GranularityBounds {
        &self.bounds
    }

    /// The calendar instants are read in.
    pub fn calendar(&self) -> &Calendar {
        &self.calendar
    }

    /// Recomputes the view against the clock, e.g. after midnight passes.
    pub fn refresh(&mut self) {
        self.view = Arc::new(build_view(
            &self.calendar,
            self.labels.as_ref(),
            self.clock.now(),
            &self.bounds,
            &self.state,
        ));
    }

    /// Handles a click on the cell starting at `instant`.
    ///
    /// At the minimum granularity this commits the value and returns to the
    /// start granularity; otherwise it shows the next finer grid.
    pub fn on_cell_activate(&mut self, instant: Instant) {
        let current = self.state.granularity;
        let cell = provider_for(current).active_instant(&self.calendar, instant);

        if current >= self.bounds.min() {
            let changed = self.state.committed != Some(cell);
            self.state.committed = Some(cell);
            debug!(value = %cell, changed, "value committed");
            self.show(self.bounds.start(), cell);
            if changed {
                self.emit_change();
            }
        } else if let Some(finer) = current.finer() {
            self.show(finer, cell);
        }
        self.emit_touch();
    }

    /// Shows the next coarser grid. Does nothing at the maximum granularity.
    pub fn on_ascend(&mut self) {
        if self.state.granularity <= self.bounds.max() {
            debug!(granularity = %self.state.granularity, "already at maximum granularity");
            return;
        }
        let Some(coarser) = self.state.granularity.coarser() else {
            return;
        };
        let target = self
            .view
            .up_nav
            .as_ref()
            .map_or(self.view.active_instant, |up| up.target);
        self.show(coarser, target);
    }

    /// Shows the previous or next page.
    pub fn on_lateral_navigate(&mut self, lateral: Lateral) {
        let target = match lateral {
            Lateral::Left => self.view.left_nav.target,
            Lateral::Right => self.view.right_nav.target,
        };
        self.show(self.state.granularity, target);
        self.emit_touch();
    }

    /// Moves the active cell by one cell or one row.
    pub fn on_directional_move(&mut self, direction: Direction) {
        let provider = provider_for(self.state.granularity);
        let from = self.view.active_instant;
        let target = match direction {
            Direction::Left => provider.move_left(&self.calendar, from),
            Direction::Right => provider.move_right(&self.calendar, from),
            Direction::Up => provider.move_up(&self.calendar, from),
            Direction::Down => provider.move_down(&self.calendar, from),
        };
        self.show(self.state.granularity, target);
    }

    /// Moves the active cell by one page.
    pub fn on_page(&mut self, direction: PageDirection) {
        let provider = provider_for(self.state.granularity);
        let from = self.view.active_instant;
        let target = match direction {
            PageDirection::Up => provider.page_up(&self.calendar, from),
            PageDirection::Down => provider.page_down(&self.calendar, from),
        };
        self.show(self.state.granularity, target);
    }

    /// Moves the active cell to the first cell of the page.
    pub fn on_home(&mut self) {
        let target = provider_for(self.state.granularity).go_home(&self.calendar, self.view.active_instant);
        self.show(self.state.granularity, target);
    }

    /// Moves the active cell to the last cell of the page.
    pub fn on_end(&mut self) {
        let target = provider_for(self.state.granularity).go_end(&self.calendar, self.view.active_instant);
        self.show(self.state.granularity, target);
    }

    /// Applies a key press and tells the adapter what to do next.
    pub fn handle_key(&mut self, key: PickerKey) -> KeyResponse {
        match key {
            PickerKey::Enter | PickerKey::Space => {
                self.on_cell_activate(self.view.active_instant);
                return KeyResponse::ACTIVATED;
            }
            PickerKey::PageUp => self.on_page(PageDirection::Up),
            PickerKey::PageDown => self.on_page(PageDirection::Down),
            PickerKey::Home => self.on_home(),
            PickerKey::End => self.on_end(),
            PickerKey::ArrowLeft => self.on_directional_move(Direction::Left),
            PickerKey::ArrowRight => self.on_directional_move(Direction::Right),
            PickerKey::ArrowUp => self.on_directional_move(Direction::Up),
            PickerKey::ArrowDown => self.on_directional_move(Direction::Down),
        }
        KeyResponse::NAVIGATED
    }

    /// Applies a DOM `keyCode`; unknown codes are ignored.
    pub fn handle_key_code(&mut self, code: u32) -> KeyResponse {
        PickerKey::from_key_code(code).map_or(KeyResponse::IGNORED, |key| self.handle_key(key))
    }

    /// Writes the value from outside, e.g. from a bound form control.
    ///
    /// An unchanged value is ignored. Otherwise the current grid is
    /// recomputed around the value (or around now when cleared) and change
    /// listeners are notified.
    pub fn set_value(&mut self, value: Option<Instant>) {
        if self.state.committed == value {
            return;
        }
        self.state.committed = value;
        debug!(value = ?value, "value set");
        let anchor = value.unwrap_or_else(|| self.clock.now());
        self.show(self.state.granularity, anchor);
        self.emit_change();
    }

    /// Registers a value change listener and returns its handle.
    pub fn on_change(
        &mut self,
        listener: impl Into<CallbackWith<PickerChange>>,
    ) -> CallbackWith<PickerChange> {
        let listener = listener.into();
        self.change_listeners.push(listener.clone());
        listener
    }

    /// Registers a touch listener and returns its handle.
    ///
    /// Touch fires on cell activation and on the left/right buttons.
    pub fn on_touch(&mut self, listener: impl Into<Callback>) -> Callback {
        let listener = listener.into();
        self.touch_listeners.push(listener.clone());
        listener
    }

    /// Removes a change listener. Returns whether it was registered.
    pub fn remove_change_listener(&mut self, listener: &CallbackWith<PickerChange>) -> bool {
        let before = self.change_listeners.len();
        self.change_listeners.retain(|registered| registered != listener);
        before != self.change_listeners.len()
    }

    /// Removes a touch listener. Returns whether it was registered.
    pub fn remove_touch_listener(&mut self, listener: &Callback) -> bool {
        let before = self.touch_listeners.len();
        self.touch_listeners.retain(|registered| registered != listener);
        before != self.touch_listeners.len()
    }

    fn show(&mut self, granularity: Granularity, anchor: Instant) {
        let from = self.state.granularity;
        if from != granularity {
            debug!(%from, to = %granularity, %anchor, "granularity transition");
        }
        self.state.granularity = granularity;
        self.state.anchor = anchor;
        self.refresh();
    }

    fn emit_change(&self) {
        let change = PickerChange {
            value: self.state.committed,
        };
        debug!(value = ?change.value, listeners = self.change_listeners.len(), "emitting change");
        for listener in &self.change_listeners {
            listener.call(change);
        }
    }

    fn emit_touch(&self) {
        for listener in &self.touch_listeners {
            listener.call();
        }
    }
}

impl fmt::Debug for DateTimePicker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DateTimePicker")
            .field("calendar", &self.calendar)
            .field("bounds", &self.bounds)
            .field("state", &self.state)
            .field("change_listeners", &self.change_listeners.len())
            .field("touch_listeners", &self.touch_listeners.len())
            .finish_non_exhaustive()
    }
}

fn build_view(
    calendar: &Calendar,
    labels: &dyn LabelFormatter,
    now: Instant,
    bounds: &GranularityBounds,
    state: &NavigationState,
) -> ViewModel {
    let ctx = ComputeContext {
        calendar,
        labels,
        now,
    };
    let mut view = compute_view(&ctx, state.granularity, state.anchor, state.committed);
    if state.granularity <= bounds.max() {
        view.up_nav = None;
    }
    view
}

/// Cloneable handle to a picker shared between event handlers.
///
/// Listeners run while the write lock is held, so they must not call back
/// into the same handle.
#[derive(Clone)]
pub struct PickerState {
    inner: Arc<RwLock<DateTimePicker>>,
}

impl PickerState {
    /// Wraps a picker.
    pub fn new(picker: DateTimePicker) -> Self {
        Self {
            inner: Arc::new(RwLock::new(picker)),
        }
    }

    /// Runs `f` with shared access.
    pub fn with<R>(&self, f: impl FnOnce(&DateTimePicker) -> R) -> R {
        let guard = self.inner.read();
        f(&guard)
    }

    /// Runs `f` with exclusive access.
    pub fn with_mut<R>(&self, f: impl FnOnce(&mut DateTimePicker) -> R) -> R {
        let mut guard = self.inner.write();
        f(&mut guard)
    }

    /// The current view model.
    pub fn view_model(&self) -> Arc<ViewModel> {
        self.with(DateTimePicker::view_model)
    }
}

impl From<DateTimePicker> for PickerState {
    fn from(picker: DateTimePicker) -> Self {
        Self::new(picker)
    }
}

impl fmt::Debug for PickerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.with(|picker| f.debug_tuple("PickerState").field(picker).finish())
    }
}
