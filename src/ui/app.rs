//! Tax year editor application using iced.

use std::fmt;
use std::time::Duration;

use super::style;
use super::theme::SearchTheme;
use super::widgets::{search_box, SearchMapper};
use crate::config::Config;
use crate::core::hotkey::{FocusTarget, HotkeyOutcome, HotkeyRegistry, KeyEvent};
use crate::core::search::{KeyOutcome, SearchController, SearchKey};
use crate::core::view::{Formatted, SearchView};
use crate::error::{ExpatError, ExpatResult};
use crate::tax::{
    countries, fiscal_years, month_names, year_options, Country, FiscalYearTable, Stage,
    TaxCalculator, TaxYear, TaxYearDraft,
};

use iced::event::{self, Event};
use iced::font::Weight;
use iced::keyboard::{self, key::Named, Key};
use iced::widget::{button, column, container, pick_list, row, text, text_input, Column, Space};
use iced::{mouse, time, Alignment, Element, Font, Length, Subscription, Task};

/// How often deferred focus and blur are checked while pending.
const TICK_INTERVAL: Duration = Duration::from_millis(16);

const BOLD: Font = Font {
    weight: Weight::Bold,
    ..Font::DEFAULT
};

/// A month in the fiscal year picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthOption {
    pub number: u32,
    pub name: &'static str,
}

impl fmt::Display for MonthOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// The tax year editor state.
pub struct TaxYearApp {
    // Configuration
    config: Config,
    theme: SearchTheme,

    // Country search
    registry: HotkeyRegistry,
    search: SearchController<Country>,
    input_id: text_input::Id,

    // Editor state
    fiscal_years: FiscalYearTable,
    country: Option<Country>,
    draft: TaxYearDraft,
    months: Vec<MonthOption>,
    years: Vec<i32>,
    error: Option<String>,

    calculator: TaxCalculator,
}

/// Messages that the application can handle.
#[derive(Debug, Clone)]
pub enum Message {
    // Country search
    SearchChanged(String),
    SearchSubmit,
    SearchClear,
    RowClicked(usize),
    SelectNext,
    SelectPrevious,
    ClearCountry,

    // Document-level input
    HotkeyPressed(char),
    PointerPressed,
    EscapePressed,
    Tick,

    // Editor fields
    FiscalDayChanged(String),
    FiscalMonthSelected(MonthOption),
    ResetFiscalYear,
    YearSelected(i32),
    TaxableIncomeChanged(String),
    TaxPaidChanged(String),
    AddTaxYear,
    RemoveTaxYear(usize),

    // Stages
    Calculate,
    EditTaxYears,
}

impl TaxYearApp {
    /// Create the application from `config`, using the process-wide hotkey registry.
    pub fn new(config: Config) -> ExpatResult<(Self, Task<Message>)> {
        let theme = SearchTheme::by_name(&config.appearance.theme);
        let registry = HotkeyRegistry::global().clone();

        let list = countries()?;
        tracing::info!("Loaded {} countries", list.len());

        let options = config.search.to_options(["country_name", "iso"], "country_name");
        let mut search = SearchController::with_registry(list, options, &registry)?;

        let today = chrono::Local::now().date_naive();
        let months = (1u32..)
            .zip(month_names())
            .map(|(number, name)| MonthOption { number, name })
            .collect();

        // Focus the input on startup
        search.focus();
        let input_id = text_input::Id::unique();
        let task = text_input::focus(input_id.clone());

        let app = Self {
            config,
            theme,
            registry,
            search,
            input_id,
            fiscal_years: fiscal_years()?,
            country: None,
            draft: TaxYearDraft::new(),
            months,
            years: year_options(today),
            error: None,
            calculator: TaxCalculator::new(),
        };

        Ok((app, task))
    }

    /// Update the application state based on a message.
    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::SearchChanged(query) => {
                if !self.search.is_input_focused() {
                    self.search.focus();
                }
                self.search.query_changed(query);
                Task::none()
            }

            Message::SearchSubmit => self.search_key(SearchKey::Enter),

            Message::SelectNext => self.search_key(SearchKey::ArrowDown),

            Message::SelectPrevious => self.search_key(SearchKey::ArrowUp),

            Message::RowClicked(index) => {
                let selected = self.search.click_row(index);
                match self.report(selected) {
                    Some(Some(country)) => self.choose_country(country),
                    _ => Task::none(),
                }
            }

            Message::SearchClear => {
                self.search.clear();
                text_input::focus(self.input_id.clone())
            }

            Message::ClearCountry => {
                self.country = None;
                self.draft.set_country(None, &self.fiscal_years);
                self.search.clear();
                text_input::focus(self.input_id.clone())
            }

            Message::HotkeyPressed(key) => {
                // Keys typed into a text field never get here
                let event = KeyEvent::new(key, FocusTarget::Nothing);
                if self.registry.dispatch(event) == HotkeyOutcome::Intercepted {
                    self.search.tick();
                    return text_input::focus(self.input_id.clone());
                }
                Task::none()
            }

            Message::PointerPressed | Message::EscapePressed => {
                self.leave_search();
                Task::none()
            }

            Message::Tick => {
                if self.search.tick() && self.search.is_input_focused() {
                    return text_input::focus(self.input_id.clone());
                }
                Task::none()
            }

            Message::FiscalDayChanged(input) => {
                self.leave_search();
                self.draft.set_fiscal_day(&input);
                Task::none()
            }

            Message::FiscalMonthSelected(month) => {
                self.leave_search();
                self.draft.set_fiscal_month(month.number);
                Task::none()
            }

            Message::ResetFiscalYear => {
                self.draft.reset_fiscal_year(&self.fiscal_years);
                Task::none()
            }

            Message::YearSelected(year) => {
                self.leave_search();
                self.draft.set_year(year);
                Task::none()
            }

            Message::TaxableIncomeChanged(input) => {
                self.leave_search();
                self.draft.set_taxable_income(&input);
                Task::none()
            }

            Message::TaxPaidChanged(input) => {
                self.leave_search();
                self.draft.set_tax_paid(&input);
                Task::none()
            }

            Message::AddTaxYear => {
                match self.draft.validate() {
                    Ok(tax_year) => {
                        self.calculator.add_tax_year(tax_year);
                        self.error = None;
                        self.draft = TaxYearDraft::new();
                        self.country = None;
                        self.search.clear();
                        return text_input::focus(self.input_id.clone());
                    }
                    Err(e) => self.error = Some(ExpatError::from(e).to_string()),
                }
                Task::none()
            }

            Message::RemoveTaxYear(index) => {
                self.calculator.remove_tax_year(index);
                Task::none()
            }

            Message::Calculate => {
                self.calculator.set_stage(Stage::Result);
                Task::none()
            }

            Message::EditTaxYears => {
                self.calculator.set_stage(Stage::Input);
                Task::none()
            }
        }
    }

    /// Create the view for the application.
    pub fn view(&self) -> Element<'_, Message> {
        let content = match self.calculator.stage() {
            Stage::Input => self.input_stage(),
            Stage::Result => self.result_stage(),
        };

        container(content.padding(20).spacing(16))
            .style(|_| style::main_container(&self.theme))
            .width(Length::Fixed(self.config.appearance.window_width as f32))
            .height(Length::Fill)
            .into()
    }

    /// Handle subscriptions (keyboard, pointer and pending timers).
    pub fn subscription(&self) -> Subscription<Message> {
        let keys = keyboard::on_key_press(|key, _modifiers| match key.as_ref() {
            Key::Named(Named::Escape) => Some(Message::EscapePressed),
            Key::Named(Named::ArrowUp) => Some(Message::SelectPrevious),
            Key::Named(Named::ArrowDown) => Some(Message::SelectNext),
            Key::Character(c) => c.chars().next().map(Message::HotkeyPressed),
            _ => None,
        });

        // Clicks no widget captured land on the document and blur the search
        let pointer = event::listen_with(|event, status, _window| match (event, status) {
            (Event::Mouse(mouse::Event::ButtonPressed(_)), event::Status::Ignored) => {
                Some(Message::PointerPressed)
            }
            _ => None,
        });

        let mut subscriptions = vec![keys, pointer];
        if self.search.has_pending_timers() {
            subscriptions.push(time::every(TICK_INTERVAL).map(|_| Message::Tick));
        }

        Subscription::batch(subscriptions)
    }

    // --- Private methods ---

    fn search_key(&mut self, key: SearchKey) -> Task<Message> {
        if !self.search.is_input_focused() {
            return Task::none();
        }

        let outcome = self.search.handle_key(key);
        match self.report(outcome) {
            Some(KeyOutcome::Selected(country)) => self.choose_country(country),
            _ => Task::none(),
        }
    }

    fn choose_country(&mut self, country: Country) -> Task<Message> {
        tracing::info!(iso = %country.iso, "Country selected");
        self.draft.set_country(Some(&country), &self.fiscal_years);
        self.country = Some(country);
        Task::none()
    }

    fn leave_search(&mut self) {
        if self.search.is_input_focused() {
            self.search.blur();
        }
    }

    /// Keep the value, or log the error and show it in the editor.
    fn report<V>(&mut self, result: ExpatResult<V>) -> Option<V> {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::error!("Search failed: {}", e);
                self.error = Some(e.to_string());
                None
            }
        }
    }

    fn input_stage(&self) -> Column<'_, Message> {
        let can_calculate = self.calculator.can_calculate();
        let calculate = button(text("Calculate ›"))
            .padding([8, 16])
            .on_press_maybe(can_calculate.then_some(Message::Calculate))
            .style(|_, status| style::action_button(&self.theme, status));

        column![
            text("Tax years:").size(28).font(BOLD),
            self.tax_years_list(true),
            self.editor(),
            calculate,
        ]
    }

    fn result_stage(&self) -> Column<'_, Message> {
        let back = button(text("‹ Edit tax years"))
            .padding([8, 16])
            .on_press(Message::EditTaxYears)
            .style(|_, status| style::action_button(&self.theme, status));

        column![
            text("Results").size(28).font(BOLD),
            self.tax_years_list(false),
            back,
        ]
    }

    fn tax_years_list(&self, removable: bool) -> Element<'_, Message> {
        if self.calculator.tax_years().is_empty() {
            return text("No tax years yet").color(self.theme.subtext).into();
        }

        let rows: Vec<Element<Message>> = self
            .calculator
            .tax_years()
            .iter()
            .enumerate()
            .map(|(index, tax_year)| self.tax_year_row(index, tax_year, removable))
            .collect();

        container(Column::with_children(rows).spacing(4))
            .padding(8)
            .width(Length::Fill)
            .style(|_| style::card(&self.theme))
            .into()
    }

    fn tax_year_row<'a>(
        &'a self,
        index: usize,
        tax_year: &'a TaxYear,
        removable: bool,
    ) -> Element<'a, Message> {
        let interval = tax_year.interval;
        let summary = column![
            text(tax_year.id.as_str()).font(BOLD),
            text(format!(
                "{} to {} · income {} {} · tax paid {} {}",
                interval.start,
                interval.end,
                tax_year.taxable_income,
                tax_year.currency_code,
                tax_year.tax_paid,
                tax_year.currency_code,
            ))
            .size(13)
            .color(self.theme.subtext),
        ]
        .spacing(2);

        let mut line = row![summary, Space::with_width(Length::Fill)].align_y(Alignment::Center);
        if removable {
            line = line.push(
                button(text("×"))
                    .on_press(Message::RemoveTaxYear(index))
                    .style(|_, status| style::clear_button(&self.theme, status)),
            );
        }
        line.into()
    }

    fn editor(&self) -> Element<'_, Message> {
        let mut form = column![text("Add a tax year").size(20).font(BOLD), text("Country").font(BOLD)]
            .spacing(8);

        form = match &self.country {
            Some(country) => form.push(
                row![
                    text(country.country_name.as_str()),
                    button(text("×"))
                        .on_press(Message::ClearCountry)
                        .style(|_, status| style::clear_button(&self.theme, status)),
                ]
                .spacing(8)
                .align_y(Alignment::Center),
            ),
            None => form.push(self.country_search()),
        };

        if self.country.is_some() {
            form = form.push(text("Fiscal year").font(BOLD)).push(self.fiscal_year_fields());
        }

        if let (Some(country), Some(_)) = (&self.country, self.draft.year) {
            form = form
                .push(text("Taxable income").font(BOLD))
                .push(self.amount_field(
                    &country.symbol,
                    self.draft.taxable_income,
                    Message::TaxableIncomeChanged,
                ))
                .push(text("Tax paid").font(BOLD))
                .push(self.amount_field(&country.symbol, self.draft.tax_paid, Message::TaxPaidChanged));
        }

        if let Some(error) = &self.error {
            form = form.push(text(error.as_str()).size(13).color(self.theme.error));
        }

        form = form.push(
            button(text("Add tax year"))
                .padding([8, 16])
                .on_press(Message::AddTaxYear)
                .style(|_, status| style::action_button(&self.theme, status)),
        );

        container(form)
            .padding(16)
            .width(Length::Fill)
            .style(|_| style::card(&self.theme))
            .into()
    }

    fn country_search(&self) -> Element<'_, Message> {
        let view = SearchView::<Element<'_, Message>>::render(
            &self.search,
            &self.config.search.placeholder,
            |country: &Country| Formatted::Text(country.country_name.clone()),
        );

        match view {
            Ok(view) => search_box(
                view,
                &self.theme,
                SearchMapper {
                    input_id: self.input_id.clone(),
                    on_input: Box::new(Message::SearchChanged),
                    on_submit: Message::SearchSubmit,
                    on_clear: Message::SearchClear,
                    on_row: Box::new(Message::RowClicked),
                },
            ),
            Err(e) => text(e.to_string()).color(self.theme.error).into(),
        }
    }

    fn fiscal_year_fields(&self) -> Element<'_, Message> {
        let day = self.draft.fiscal_day.map(|d| d.to_string()).unwrap_or_default();
        let month = self
            .draft
            .fiscal_month
            .and_then(|m| m.checked_sub(1))
            .and_then(|i| self.months.get(i as usize).copied());

        row![
            text_input("Start day", &day)
                .on_input(Message::FiscalDayChanged)
                .width(Length::Fixed(90.0))
                .padding(8)
                .style(|_, status| style::search_input(
                    &self.theme,
                    status == text_input::Status::Focused
                )),
            pick_list(&self.months[..], month, Message::FiscalMonthSelected)
                .placeholder("Start month"),
            pick_list(&self.years[..], self.draft.year, Message::YearSelected).placeholder("Year"),
            button(text("↺"))
                .on_press(Message::ResetFiscalYear)
                .style(|_, status| style::clear_button(&self.theme, status)),
        ]
        .spacing(8)
        .align_y(Alignment::Center)
        .into()
    }

    fn amount_field(
        &self,
        symbol: &str,
        amount: Option<u64>,
        on_input: fn(String) -> Message,
    ) -> Element<'_, Message> {
        let value = amount.map(|a| a.to_string()).unwrap_or_default();

        row![
            text(symbol.to_string()).color(self.theme.subtext),
            text_input("0", &value)
                .on_input(on_input)
                .padding(8)
                .style(|_, status| style::search_input(
                    &self.theme,
                    status == text_input::Status::Focused
                )),
        ]
        .spacing(8)
        .align_y(Alignment::Center)
        .into()
    }
}
