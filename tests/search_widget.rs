//! End-to-end behaviour of the search widget, driven the way a host UI drives it.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;

use expat_tax::core::{
    FocusTarget, Formatted, HotkeyOutcome, HotkeyRegistry, KeyEvent, KeyOutcome, ManualClock,
    SearchController, SearchKey, SearchOptions, SearchState, SearchView,
};
use expat_tax::tax::{countries, fiscal_years, Country, TaxCalculator, TaxYearDraft};

#[derive(Debug, Clone, PartialEq, Serialize)]
struct Named {
    name: String,
}

fn named(names: &[&str]) -> Vec<Named> {
    names
        .iter()
        .map(|name| Named {
            name: name.to_string(),
        })
        .collect()
}

fn names(controller: &SearchController<Named>) -> Vec<&str> {
    controller
        .results()
        .iter()
        .map(|r| r.item.name.as_str())
        .collect()
}

/// Controller over `list` on its own registry and clock, recording selections.
fn widget(
    list: Vec<Named>,
    options: SearchOptions,
    registry: &HotkeyRegistry,
) -> (SearchController<Named>, Arc<ManualClock>, Rc<RefCell<Vec<String>>>) {
    let clock = Arc::new(ManualClock::new());
    let selected = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&selected);

    let controller = SearchController::with_registry(list, options, registry)
        .unwrap()
        .with_clock(clock.clone())
        .on_select_item(move |item: &Named| sink.borrow_mut().push(item.name.clone()));

    (controller, clock, selected)
}

#[test]
fn typing_ranks_prefix_matches() {
    let registry = HotkeyRegistry::new();
    let (mut search, _, _) = widget(
        named(&["Canada", "China", "Chile"]),
        SearchOptions::new(["name"], "name"),
        &registry,
    );

    search.focus();
    search.query_changed("Ch");

    assert_eq!(names(&search), vec!["China", "Chile"]);
    assert_eq!(search.selected_index(), Some(0));
    assert_eq!(search.state(), SearchState::FocusedWithResults);
}

#[test]
fn results_never_exceed_max_results() {
    let registry = HotkeyRegistry::new();
    let list = countries().unwrap();
    let options = SearchOptions::new(["country_name", "iso"], "country_name").max_results(3);
    let mut search = SearchController::with_registry(list, options, &registry).unwrap();

    for query in ["", "a", "e", "an", "united", "zz", "  ", "ñ"] {
        search.query_changed(query);
        assert!(search.results().len() <= 3, "query {:?}", query);
    }
}

#[test]
fn arrow_keys_wrap_around_visible_results() {
    let registry = HotkeyRegistry::new();
    let (mut search, _, _) = widget(
        named(&["Chad", "Chile", "China", "Czechia"]),
        SearchOptions::new(["name"], "name"),
        &registry,
    );
    search.focus();
    search.query_changed("c");
    let n = search.results().len();
    assert_eq!(n, 4);

    for k in 1..=9 {
        assert_eq!(search.handle_key(SearchKey::ArrowDown).unwrap(), KeyOutcome::Handled);
        assert_eq!(search.selected_index(), Some(k % n));
    }
    for _ in 0..9 {
        search.handle_key(SearchKey::ArrowUp).unwrap();
    }
    assert_eq!(search.selected_index(), Some(0));
}

#[test]
fn enter_selects_highlighted_result() {
    let registry = HotkeyRegistry::new();
    let (mut search, _, selected) = widget(
        named(&["Canada", "China", "Chile"]),
        SearchOptions::new(["name"], "name"),
        &registry,
    );
    search.focus();
    search.query_changed("Ch");
    search.handle_key(SearchKey::ArrowDown).unwrap();

    let outcome = search.handle_key(SearchKey::Enter).unwrap();
    assert_eq!(
        outcome,
        KeyOutcome::Selected(Named {
            name: "Chile".to_string()
        })
    );
    assert_eq!(*selected.borrow(), vec!["Chile"]);
    assert_eq!(search.selected_index(), Some(1));
    assert!(!search.is_input_focused());
}

#[test]
fn enter_without_selection_does_nothing() {
    let registry = HotkeyRegistry::new();
    let (mut search, _, selected) = widget(
        named(&["Canada", "China"]),
        SearchOptions::new(["name"], "name"),
        &registry,
    );
    search.focus();
    search.query_changed("zzz");

    assert_eq!(search.selected_index(), None);
    assert_eq!(search.handle_key(SearchKey::Enter).unwrap(), KeyOutcome::Handled);
    assert!(selected.borrow().is_empty());
}

#[test]
fn click_shortly_after_blur_still_selects() {
    let registry = HotkeyRegistry::new();
    let (mut search, clock, selected) = widget(
        named(&["Canada", "China", "Chile"]),
        SearchOptions::new(["name"], "name"),
        &registry,
    );
    search.focus();
    search.query_changed("Ch");

    // Pressing on a row blurs the input before the click arrives
    search.blur();
    clock.advance(Duration::from_millis(50));
    search.tick();
    assert!(search.dropdown_visible());

    let view = SearchView::render(&search, "Search...", |n: &Named| -> Formatted<()> {
        Formatted::Text(n.name.clone())
    })
    .unwrap();
    let row = &view.dropdown.unwrap()[1];
    assert_eq!(row.text(), Some("Chile"));

    search.click_row(row.index).unwrap();
    assert_eq!(*selected.borrow(), vec!["Chile"]);

    clock.advance(Duration::from_millis(100));
    assert!(search.tick());
    assert_eq!(search.state(), SearchState::Idle);
}

#[test]
fn dropdown_hides_after_blur_delay() {
    let registry = HotkeyRegistry::new();
    let (mut search, clock, _) = widget(
        named(&["Canada", "China"]),
        SearchOptions::new(["name"], "name"),
        &registry,
    );
    search.focus();
    search.query_changed("c");
    search.blur();

    clock.advance(Duration::from_millis(99));
    assert!(!search.tick());
    assert!(search.dropdown_visible());

    clock.advance(Duration::from_millis(1));
    assert!(search.tick());
    assert!(!search.dropdown_visible());
    assert!(!search.has_pending_timers());
}

#[test]
fn clear_empties_query_and_keeps_focus() {
    let registry = HotkeyRegistry::new();
    let (mut search, clock, _) = widget(
        named(&["Canada", "China"]),
        SearchOptions::new(["name"], "name"),
        &registry,
    );
    search.focus();
    search.query_changed("chi");

    search.clear();
    assert_eq!(search.query(), "");
    assert!(search.results().is_empty());
    assert!(search.is_focused());

    clock.advance(Duration::from_millis(200));
    search.tick();
    assert!(search.is_focused());
    assert!(search.is_input_focused());
}

#[test]
fn slash_focuses_search_unless_typing_elsewhere() {
    let registry = HotkeyRegistry::new();
    let (mut search, clock, _) = widget(
        named(&["Canada"]),
        SearchOptions::new(["name"], "name").use_global_hotkey(true),
        &registry,
    );
    assert!(!search.is_focused());

    // Another text field has focus: the slash is typed there
    let outcome = registry.dispatch(KeyEvent::new('/', FocusTarget::TextArea));
    assert_eq!(outcome, HotkeyOutcome::Ignored);
    assert!(!search.tick());
    assert!(!search.is_focused());

    let outcome = registry.dispatch(KeyEvent::new('/', FocusTarget::Nothing));
    assert_eq!(outcome, HotkeyOutcome::Intercepted);
    assert!(search.tick());
    assert!(search.is_input_focused());

    clock.advance(Duration::from_millis(100));
    search.tick();
    assert!(search.is_focused());
}

#[test]
fn disposed_widget_releases_hotkey() {
    let registry = HotkeyRegistry::new();
    let (mut search, _, _) = widget(
        named(&["Canada"]),
        SearchOptions::new(["name"], "name").use_global_hotkey(true),
        &registry,
    );
    assert_eq!(registry.binding_count(), 1);

    search.dispose();
    assert_eq!(registry.binding_count(), 0);
    assert_eq!(
        registry.dispatch(KeyEvent::new('/', FocusTarget::Nothing)),
        HotkeyOutcome::Ignored
    );
}

#[test]
fn country_picker_feeds_tax_year() {
    let registry = HotkeyRegistry::new();
    let table = fiscal_years().unwrap();
    let mut search = SearchController::with_registry(
        countries().unwrap(),
        SearchOptions::new(["country_name", "iso"], "country_name"),
        &registry,
    )
    .unwrap();

    search.focus();
    search.query_changed("United Kingdom");
    let country: Country = match search.handle_key(SearchKey::Enter).unwrap() {
        KeyOutcome::Selected(country) => country,
        other => panic!("expected a selection, got {:?}", other),
    };
    assert_eq!(country.iso, "GB");

    let mut draft = TaxYearDraft::new();
    draft.set_country(Some(&country), &table);
    draft.set_year(2020);
    assert!(draft.set_taxable_income("50000"));
    assert!(draft.set_tax_paid("7500"));

    let tax_year = draft.validate().unwrap();
    assert_eq!(tax_year.id, "GB-2020-4-6");
    assert_eq!(tax_year.currency_code, "GBP");
    assert_eq!(tax_year.interval.num_days(), 365);

    let mut calculator = TaxCalculator::new();
    assert!(!calculator.can_calculate());
    calculator.add_tax_year(tax_year);
    assert!(calculator.can_calculate());
}
