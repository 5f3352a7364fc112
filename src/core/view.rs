//! Render model of the search widget.
//!
//! [`SearchView`] is what a frontend needs to draw the widget: the input
//! text, the trailing adornment and, when visible, the dropdown rows. It is
//! derived from a [`SearchController`] and holds no state of its own.

use serde::Serialize;

use super::search::SearchController;
use crate::error::ExpatResult;

/// Output of a caller's result formatter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Formatted<R> {
    /// Plain text. Rendered with a bold ghost copy so bolding on selection
    /// does not shift the layout.
    Text(String),
    /// Arbitrary frontend content.
    Rich(R),
}

impl<R> From<String> for Formatted<R> {
    fn from(text: String) -> Self {
        Formatted::Text(text)
    }
}

impl<R> From<&str> for Formatted<R> {
    fn from(text: &str) -> Self {
        Formatted::Text(text.to_string())
    }
}

/// What sits at the end of the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Adornment {
    /// Loading indicator.
    Spinner,
    /// "×" button that clears the query.
    ClearButton,
    /// Nothing.
    Hidden,
}

/// Content of one dropdown row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowContent<R> {
    Text {
        text: String,
        /// Zero-height bold copy that reserves the bold width.
        ghost: String,
    },
    Rich(R),
}

/// One dropdown row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRow<R> {
    /// Position in the visible list; pass to `click_row`.
    pub index: usize,
    pub key: String,
    pub selected: bool,
    pub content: RowContent<R>,
}

impl<R> ResultRow<R> {
    /// Plain text of the row, if it has any.
    pub fn text(&self) -> Option<&str> {
        match &self.content {
            RowContent::Text { text, .. } => Some(text),
            RowContent::Rich(_) => None,
        }
    }
}

/// Everything needed to draw the widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchView<R> {
    pub query: String,
    pub placeholder: String,
    pub adornment: Adornment,
    /// `None` while the dropdown is hidden.
    pub dropdown: Option<Vec<ResultRow<R>>>,
}

impl<R> SearchView<R> {
    /// Build the view of `controller`, formatting rows with `format`.
    ///
    /// Fails when a visible result's `key_by` value is not a string.
    pub fn render<T, F>(
        controller: &SearchController<T>,
        placeholder: &str,
        mut format: F,
    ) -> ExpatResult<Self>
    where
        T: Serialize + Clone,
        F: FnMut(&T) -> Formatted<R>,
    {
        let adornment = if controller.is_loading() {
            Adornment::Spinner
        } else if !controller.query().is_empty() {
            Adornment::ClearButton
        } else {
            Adornment::Hidden
        };

        let dropdown = if controller.dropdown_visible() {
            let rows = controller
                .results()
                .iter()
                .take(controller.max_results())
                .enumerate()
                .map(|(index, result)| -> ExpatResult<ResultRow<R>> {
                    let key = controller.result_key(result)?.to_string();
                    let content = match format(&result.item) {
                        Formatted::Text(text) => RowContent::Text {
                            ghost: text.clone(),
                            text,
                        },
                        Formatted::Rich(rich) => RowContent::Rich(rich),
                    };
                    Ok(ResultRow {
                        index,
                        key,
                        selected: controller.selected_index() == Some(index),
                        content,
                    })
                })
                .collect::<ExpatResult<Vec<_>>>()?;
            Some(rows)
        } else {
            None
        };

        Ok(Self {
            query: controller.query().to_string(),
            placeholder: placeholder.to_string(),
            adornment,
            dropdown,
        })
    }

    pub fn dropdown_visible(&self) -> bool {
        self.dropdown.is_some()
    }

    /// The highlighted row, if any.
    pub fn selected_row(&self) -> Option<&ResultRow<R>> {
        self.dropdown.as_ref()?.iter().find(|row| row.selected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::hotkey::HotkeyRegistry;
    use crate::core::search::SearchOptions;
    use serde::Serialize;

    #[derive(Debug, Clone, Serialize)]
    struct Place {
        name: String,
        code: u32,
    }

    fn places() -> Vec<Place> {
        ["Canada", "China", "Chile", "Chad", "Cyprus", "Czechia", "Colombia"]
            .iter()
            .enumerate()
            .map(|(i, name)| Place {
                name: name.to_string(),
                code: i as u32,
            })
            .collect()
    }

    fn search(key_by: &str) -> SearchController<Place> {
        SearchController::with_registry(
            places(),
            SearchOptions::new(["name"], key_by),
            &HotkeyRegistry::new(),
        )
        .unwrap()
    }

    fn text_of(place: &Place) -> Formatted<()> {
        Formatted::Text(place.name.clone())
    }

    #[test]
    fn test_adornment_states() {
        let mut controller = search("name");
        let view = SearchView::render(&controller, "Search...", text_of).unwrap();
        assert_eq!(view.adornment, Adornment::Hidden);

        controller.query_changed("ch");
        let view = SearchView::render(&controller, "Search...", text_of).unwrap();
        assert_eq!(view.adornment, Adornment::ClearButton);

        controller.set_loading(true);
        let view = SearchView::render(&controller, "Search...", text_of).unwrap();
        assert_eq!(view.adornment, Adornment::Spinner);
    }

    #[test]
    fn test_dropdown_needs_focus_and_results() {
        let mut controller = search("name");
        controller.query_changed("ch");
        let view = SearchView::render(&controller, "", text_of).unwrap();
        assert!(!view.dropdown_visible());

        controller.focus();
        let view = SearchView::render(&controller, "", text_of).unwrap();
        assert!(view.dropdown_visible());

        controller.query_changed("qqq");
        let view = SearchView::render(&controller, "", text_of).unwrap();
        assert!(!view.dropdown_visible());
    }

    #[test]
    fn test_rows_capped_and_highlighted() {
        let mut controller = search("name");
        controller.focus();
        controller.query_changed("c");
        controller.handle_key(crate::core::search::SearchKey::ArrowDown).unwrap();

        let view = SearchView::render(&controller, "", text_of).unwrap();
        let rows = view.dropdown.as_ref().unwrap();
        assert_eq!(rows.len(), 5);
        assert_eq!(rows.iter().filter(|r| r.selected).count(), 1);
        assert_eq!(view.selected_row().map(|r| r.index), Some(1));
    }

    #[test]
    fn test_text_rows_carry_ghost() {
        let mut controller = search("name");
        controller.focus();
        controller.query_changed("chil");

        let view = SearchView::render(&controller, "", text_of).unwrap();
        let row = &view.dropdown.unwrap()[0];
        assert_eq!(row.key, "Chile");
        assert_eq!(
            row.content,
            RowContent::Text {
                text: "Chile".to_string(),
                ghost: "Chile".to_string(),
            }
        );
    }

    #[test]
    fn test_rich_rows_have_no_text() {
        let mut controller = search("name");
        controller.focus();
        controller.query_changed("chil");

        let view = SearchView::render(&controller, "", |p: &Place| Formatted::Rich(p.code)).unwrap();
        let row = &view.dropdown.unwrap()[0];
        assert_eq!(row.text(), None);
        assert_eq!(row.content, RowContent::Rich(2));
    }

    #[test]
    fn test_non_string_key_fails_render() {
        let mut controller = search("code");
        controller.focus();
        controller.query_changed("ch");

        let err = SearchView::render(&controller, "", text_of).unwrap_err();
        assert!(err.to_string().contains("keyBy is code"));
    }

    #[test]
    fn test_duplicate_keys_render() {
        let mut list = places();
        list.push(Place {
            name: "Chile".to_string(),
            code: 99,
        });
        let mut controller = SearchController::with_registry(
            list,
            SearchOptions::new(["name"], "name"),
            &HotkeyRegistry::new(),
        )
        .unwrap();
        controller.focus();
        controller.query_changed("chile");

        let view = SearchView::render(&controller, "", text_of).unwrap();
        let rows = view.dropdown.unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.key == "Chile"));
    }
}
