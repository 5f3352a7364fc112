//! Expat Tax - tax year editor with a keyboard-driven fuzzy search widget.
//!
//! # Architecture
//!
//! The library is organized into these main modules:
//!
//! - [`core`] - Fuzzy matcher, search controller, hotkey registry and view model
//! - [`tax`] - Countries, fiscal years, tax year drafts and the calculator flow
//! - [`config`] - Configuration loading and management
//! - [`logging`] - Tracing subscriber setup
//!
//! The iced frontend in `ui` is built with the `iced-ui` feature.
//!
//! # Example
//!
//! ```ignore
//! use expat_tax::core::{SearchController, SearchOptions, SearchKey};
//!
//! let mut search = SearchController::new(countries, SearchOptions::new(["countryName"], "countryName"))?;
//! search.focus();
//! search.query_changed("Ch");
//! search.handle_key(SearchKey::Enter)?;
//! ```

// Public modules
pub mod config;
pub mod core;
pub mod logging;
pub mod tax;

#[cfg(feature = "iced-ui")]
pub mod ui;

// Internal modules
mod error;

// Re-export commonly used types for convenience
pub use config::Config;
pub use core::search::{SearchController, SearchOptions};
pub use core::view::SearchView;
pub use error::{ExpatError, ExpatResult};
pub use tax::{Country, TaxCalculator, TaxYear};
