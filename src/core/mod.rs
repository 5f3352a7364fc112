//! Core search widget - platform-agnostic state and rendering model.
//!
//! Nothing in here depends on a UI framework:
//! - Key paths into serialized items
//! - Fuzzy matcher and its index
//! - Cancelable deferred timers
//! - Document-level hotkey bindings
//! - The search controller state machine
//! - The render model frontends draw from

pub mod hotkey;
pub mod key_path;
pub mod matcher;
pub mod search;
pub mod timer;
pub mod view;

pub use hotkey::{FocusTarget, GlobalHotkeyBinding, HotkeyOutcome, HotkeyRegistry, KeyEvent};
pub use key_path::KeyPath;
pub use matcher::{FuzzyMatcher, MatchResult};
pub use search::{
    Direction, KeyOutcome, SearchController, SearchKey, SearchOptions, SearchState,
};
pub use timer::{Clock, DeferredTimer, ManualClock, SystemClock};
pub use view::{Adornment, Formatted, ResultRow, RowContent, SearchView};
