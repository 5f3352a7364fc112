//! Search controller - the state machine behind the fuzzy search widget.
//!
//! The controller owns the query, the current results, the selection and
//! the focus state. Host UI events (typing, arrow keys, Enter, focus, blur,
//! row clicks) are forwarded to it; rendering reads its state through
//! [`SearchView`](super::view::SearchView).
//!
//! Blur is deferred: the dropdown stays visible for `blur_delay` after the
//! input loses focus, so a click on a row that caused the blur still lands
//! on the row. Deferred work fires from [`SearchController::tick`].

use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::Serialize;

use super::hotkey::{GlobalHotkeyBinding, HotkeyRegistry, GLOBAL_HOTKEY};
use super::key_path::{to_value, value_kind, KeyPath};
use super::matcher::{FuzzyMatcher, MatchResult};
use super::timer::{Clock, DeferredTimer, SystemClock};
use crate::error::{ExpatError, ExpatResult};

/// Default cap on visible results.
pub const DEFAULT_MAX_RESULTS: usize = 5;

/// Delay between blur and hiding the dropdown.
pub const DEFAULT_BLUR_DELAY: Duration = Duration::from_millis(100);

/// Delay before focus is re-asserted after clear or hotkey.
pub const DEFAULT_FOCUS_DELAY: Duration = Duration::from_millis(100);

/// Callback invoked with every selected item.
pub type SelectCallback<T> = Box<dyn FnMut(&T)>;

/// Visible state of the widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchState {
    /// Dropdown hidden.
    Idle,
    /// Focused, nothing to show.
    Focused,
    /// Focused with a visible dropdown.
    FocusedWithResults,
}

/// Selection movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// Keys the search input reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchKey {
    ArrowUp,
    ArrowDown,
    Enter,
    Other,
}

/// What a key press did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome<T> {
    /// Consumed; the host must suppress the default action.
    Handled,
    /// Consumed and an item was selected.
    Selected(T),
    /// Not ours; let the input handle it.
    Ignored,
}

/// Options for a search widget.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOptions {
    /// Key paths whose string values are matched against the query.
    pub match_keys: Vec<String>,
    /// Key path of the unique string key of each item.
    pub key_by: String,
    pub max_results: usize,
    pub use_global_hotkey: bool,
    pub hotkey: char,
    pub loading: bool,
    pub blur_delay: Duration,
    pub focus_delay: Duration,
}

impl SearchOptions {
    pub fn new<S: Into<String>>(match_keys: impl IntoIterator<Item = S>, key_by: &str) -> Self {
        Self {
            match_keys: match_keys.into_iter().map(Into::into).collect(),
            key_by: key_by.to_string(),
            ..Self::default()
        }
    }

    pub fn max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    pub fn use_global_hotkey(mut self, enabled: bool) -> Self {
        self.use_global_hotkey = enabled;
        self
    }

    pub fn loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            match_keys: Vec::new(),
            key_by: String::new(),
            max_results: DEFAULT_MAX_RESULTS,
            use_global_hotkey: false,
            hotkey: GLOBAL_HOTKEY,
            loading: false,
            blur_delay: DEFAULT_BLUR_DELAY,
            focus_delay: DEFAULT_FOCUS_DELAY,
        }
    }
}

/// State machine for one search widget.
pub struct SearchController<T> {
    matcher: FuzzyMatcher<T>,
    key_by: KeyPath,
    max_results: usize,
    loading: bool,

    // Interaction state
    query: String,
    results: Vec<MatchResult<T>>,
    selected: Option<usize>,
    focused: bool,
    input_focused: bool,

    // Deferred work
    blur_timer: DeferredTimer,
    focus_timer: DeferredTimer,
    blur_delay: Duration,
    focus_delay: Duration,
    clock: Arc<dyn Clock>,

    hotkey: GlobalHotkeyBinding,
    on_select: Option<SelectCallback<T>>,
}

impl<T: Serialize + Clone> SearchController<T> {
    /// Create a controller, binding the hotkey on the process-wide registry
    /// when `use_global_hotkey` is set.
    pub fn new(list: Vec<T>, options: SearchOptions) -> ExpatResult<Self> {
        Self::with_registry(list, options, HotkeyRegistry::global())
    }

    /// Create a controller whose hotkey lives on `registry`.
    pub fn with_registry(
        list: Vec<T>,
        options: SearchOptions,
        registry: &HotkeyRegistry,
    ) -> ExpatResult<Self> {
        let key_by = KeyPath::parse(&options.key_by)?;
        let keys = KeyPath::parse_all(&options.match_keys)?;
        let matcher = FuzzyMatcher::new(list, keys)?;

        let mut hotkey = GlobalHotkeyBinding::new(options.hotkey);
        hotkey.set_enabled(options.use_global_hotkey, registry);

        Ok(Self {
            matcher,
            key_by,
            max_results: options.max_results,
            loading: options.loading,
            query: String::new(),
            results: Vec::new(),
            selected: None,
            focused: false,
            input_focused: false,
            blur_timer: DeferredTimer::new(),
            focus_timer: DeferredTimer::new(),
            blur_delay: options.blur_delay,
            focus_delay: options.focus_delay,
            clock: Arc::new(SystemClock),
            hotkey,
            on_select: None,
        })
    }

    /// Use `clock` for deferred focus and blur.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Register the callback invoked on every selection.
    pub fn on_select_item<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&T) + 'static,
    {
        self.on_select = Some(Box::new(callback));
        self
    }

    // --- Accessors ---

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Current results, already capped at `max_results`.
    pub fn results(&self) -> &[MatchResult<T>] {
        &self.results
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_result(&self) -> Option<&MatchResult<T>> {
        self.selected.and_then(|index| self.results.get(index))
    }

    /// Whether the dropdown may be shown (the delayed focus state).
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Whether the text input itself holds focus.
    pub fn is_input_focused(&self) -> bool {
        self.input_focused
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn max_results(&self) -> usize {
        self.max_results
    }

    pub fn key_by(&self) -> &KeyPath {
        &self.key_by
    }

    pub fn matcher(&self) -> &FuzzyMatcher<T> {
        &self.matcher
    }

    pub fn hotkey_enabled(&self) -> bool {
        self.hotkey.is_enabled()
    }

    pub fn state(&self) -> SearchState {
        if !self.focused {
            SearchState::Idle
        } else if self.results.is_empty() {
            SearchState::Focused
        } else {
            SearchState::FocusedWithResults
        }
    }

    pub fn dropdown_visible(&self) -> bool {
        self.state() == SearchState::FocusedWithResults
    }

    pub fn has_pending_timers(&self) -> bool {
        self.blur_timer.is_pending() || self.focus_timer.is_pending()
    }

    /// Earliest pending deadline, for hosts that schedule their own wake-ups.
    pub fn next_deadline(&self) -> Option<Instant> {
        [self.blur_timer.deadline(), self.focus_timer.deadline()]
            .into_iter()
            .flatten()
            .min()
    }

    /// The unique key of a result, read through `key_by`.
    pub fn result_key(&self, result: &MatchResult<T>) -> ExpatResult<&str> {
        match self.matcher.value(result.index) {
            Some(value) => self.key_by.string_in(value),
            None => Err(ExpatError::KeyNotString {
                key_path: self.key_by.as_str().to_string(),
                found: value_kind(None),
            }),
        }
    }

    // --- Configuration changes ---

    /// Replace the source list. Rebuilds the index and re-runs the query.
    pub fn set_list(&mut self, list: Vec<T>) -> ExpatResult<()> {
        self.matcher.set_items(list)?;
        self.rematch();
        Ok(())
    }

    /// Replace the match keys. Rebuilds the index and re-runs the query.
    pub fn set_match_keys<S: AsRef<str>>(&mut self, keys: &[S]) -> ExpatResult<()> {
        self.matcher.set_keys(KeyPath::parse_all(keys)?);
        self.rematch();
        Ok(())
    }

    pub fn set_max_results(&mut self, max_results: usize) {
        if self.max_results != max_results {
            self.max_results = max_results;
            self.rematch();
        }
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    /// Install or remove the hotkey binding. Idempotent.
    pub fn set_use_global_hotkey(&mut self, enabled: bool, registry: &HotkeyRegistry) {
        self.hotkey.set_enabled(enabled, registry);
        tracing::debug!(enabled, key = %self.hotkey.key(), "search hotkey toggled");
    }

    // --- Events ---

    /// Text changed in the input.
    pub fn query_changed(&mut self, text: impl Into<String>) {
        self.query = text.into();
        self.selected = Some(0);
        self.rematch();
    }

    /// The input gained focus.
    pub fn focus(&mut self) {
        self.input_focused = true;
        self.focused = true;
        self.blur_timer.cancel();
    }

    /// Focus the input and re-assert focus once `focus_delay` has passed.
    pub fn request_focus(&mut self) {
        self.focus();
        self.focus_timer.schedule(self.clock.now(), self.focus_delay);
    }

    /// The input lost focus. The dropdown hides after `blur_delay`.
    pub fn blur(&mut self) {
        self.input_focused = false;
        self.focus_timer.cancel();
        self.blur_timer.schedule(self.clock.now(), self.blur_delay);
    }

    /// Move the selection, wrapping at both ends of the visible results.
    pub fn navigate(&mut self, direction: Direction) {
        let visible = self.results.len().min(self.max_results);
        if visible == 0 {
            return;
        }

        self.selected = Some(match (direction, self.selected) {
            (Direction::Down, Some(index)) if index + 1 < visible => index + 1,
            (Direction::Down, _) => 0,
            (Direction::Up, Some(index)) if index > 0 && index < visible => index - 1,
            (Direction::Up, _) => visible - 1,
        });
    }

    /// Select the highlighted result. Does nothing without a selection.
    pub fn select_current(&mut self) -> ExpatResult<Option<T>> {
        let Some(item) = self.selected_result().map(|result| result.item.clone()) else {
            return Ok(None);
        };

        self.select(&item)?;
        Ok(Some(item))
    }

    /// A result row was clicked.
    pub fn click_row(&mut self, index: usize) -> ExpatResult<Option<T>> {
        let Some(item) = self.results.get(index).map(|result| result.item.clone()) else {
            return Ok(None);
        };

        self.select(&item)?;
        Ok(Some(item))
    }

    /// Hand `item` to the select callback, re-point the selection at it and
    /// drop input focus.
    pub fn select(&mut self, item: &T) -> ExpatResult<()> {
        let value = to_value(item)?;
        let key = self.key_by.string_in(&value)?.to_string();

        if let Some(callback) = self.on_select.as_mut() {
            callback(item);
        }

        let mut recovered = None;
        for (position, result) in self.results.iter().enumerate() {
            if self.result_key(result)? == key {
                recovered = Some(position);
                break;
            }
        }
        self.selected = recovered;

        tracing::debug!(%key, selected = ?self.selected, "search item selected");

        self.blur();
        Ok(())
    }

    /// Empty the query and take focus back.
    pub fn clear(&mut self) {
        self.query.clear();
        self.rematch();
        self.request_focus();
    }

    /// Key press in the input.
    pub fn handle_key(&mut self, key: SearchKey) -> ExpatResult<KeyOutcome<T>> {
        match key {
            SearchKey::ArrowUp => {
                self.navigate(Direction::Up);
                Ok(KeyOutcome::Handled)
            }
            SearchKey::ArrowDown => {
                self.navigate(Direction::Down);
                Ok(KeyOutcome::Handled)
            }
            SearchKey::Enter => Ok(match self.select_current()? {
                Some(item) => KeyOutcome::Selected(item),
                None => KeyOutcome::Handled,
            }),
            SearchKey::Other => Ok(KeyOutcome::Ignored),
        }
    }

    /// Run due deferred work and pending hotkey triggers. Returns whether
    /// anything observable changed.
    pub fn tick(&mut self) -> bool {
        let mut changed = false;

        if self.hotkey.take_triggered() {
            tracing::debug!("search focused by hotkey");
            changed |= !self.input_focused || !self.focused;
            self.request_focus();
        }

        let now = self.clock.now();
        if self.focus_timer.fire_if_due(now) {
            changed |= !self.focused;
            self.focused = true;
        }
        if self.blur_timer.fire_if_due(now) {
            changed |= self.focused;
            self.focused = false;
        }

        changed
    }

    /// Cancel deferred work and release the hotkey.
    pub fn dispose(&mut self) {
        self.blur_timer.cancel();
        self.focus_timer.cancel();
        self.hotkey.disable();
    }

    fn rematch(&mut self) {
        self.results = self.matcher.search_capped(&self.query, self.max_results);
        self.results_changed();
    }

    fn results_changed(&mut self) {
        // An empty result set clears the selection instead of leaving a stale index
        self.selected = if self.results.is_empty() { None } else { Some(0) };
    }
}

impl<T> Drop for SearchController<T> {
    fn drop(&mut self) {
        self.blur_timer.cancel();
        self.focus_timer.cancel();
        self.hotkey.disable();
    }
}

impl<T> std::fmt::Debug for SearchController<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchController")
            .field("key_by", &self.key_by)
            .field("query", &self.query)
            .field("results", &self.results.len())
            .field("selected", &self.selected)
            .field("focused", &self.focused)
            .field("input_focused", &self.input_focused)
            .finish_non_exhaustive()
    }
}
