//! iced frontend for the tax year editor.
//!
//! Draws [`SearchView`](crate::core::view::SearchView) with iced widgets and
//! forwards iced events to the search controller.

pub mod app;
pub mod style;
pub mod theme;
pub mod widgets;

pub use app::TaxYearApp;
pub use theme::SearchTheme;
pub use widgets::{search_box, SearchMapper};
