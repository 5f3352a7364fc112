//! Tax years and the draft the editor builds them from.
//!
//! A draft collects the editor's fields one at a time. Once a country, a
//! year and a fiscal year start are known, the draft derives the tax year
//! interval (start date plus one year) and an id; `validate` turns a
//! complete draft into a [`TaxYear`].

use chrono::{Datelike, Month, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::fiscal_year::{FiscalYear, FiscalYearTable};

/// Number of past years offered by the year picker.
const YEARS_BACK: i32 = 20;

/// A country as the editor's country search sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    pub country_name: String,
    /// ISO 3166-1 alpha-2 code.
    pub iso: String,
    /// ISO 4217 currency code.
    pub currency: String,
    pub symbol: String,
}

impl Country {
    pub fn new(country_name: &str, iso: &str, currency: &str, symbol: &str) -> Self {
        Self {
            country_name: country_name.to_string(),
            iso: iso.to_string(),
            currency: currency.to_string(),
            symbol: symbol.to_string(),
        }
    }
}

/// The dates a tax year covers: `start` inclusive, `end` exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxYearInterval {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl TaxYearInterval {
    /// The tax year starting on the fiscal year start in `year`. `None` when
    /// that day does not exist (31 April, say).
    pub fn starting(year: i32, fiscal_year: FiscalYear) -> Option<Self> {
        let start = NaiveDate::from_ymd_opt(year, fiscal_year.month, fiscal_year.day)?;
        let end = start.checked_add_months(Months::new(12))?;
        Some(Self { start, end })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date < self.end
    }

    pub fn num_days(&self) -> i64 {
        (self.end - self.start).num_days()
    }
}

/// A complete, validated tax year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxYear {
    pub id: String,
    pub country_code: String,
    pub currency_code: String,
    pub taxable_income: u64,
    pub tax_paid: u64,
    pub interval: TaxYearInterval,
}

/// Why a draft is not a valid tax year yet.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaxYearError {
    #[error("taxable income must be a positive amount")]
    MissingTaxableIncome,

    #[error("country code must have 2 characters (got {0:?})")]
    InvalidCountryCode(Option<String>),

    #[error("currency code must have 3 characters (got {0:?})")]
    InvalidCurrencyCode(Option<String>),

    #[error("a year and a valid fiscal year start are required")]
    MissingInterval,
}

/// How a form field reacts to new input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldUpdate<V> {
    /// Input was emptied; the field becomes unset.
    Clear,
    Set(V),
    /// Input rejected; the field keeps its value.
    Reject,
}

impl<V> FieldUpdate<V> {
    /// Apply to `field`. Returns whether the input was accepted.
    pub fn apply(self, field: &mut Option<V>) -> bool {
        match self {
            FieldUpdate::Clear => {
                *field = None;
                true
            }
            FieldUpdate::Set(value) => {
                *field = Some(value);
                true
            }
            FieldUpdate::Reject => false,
        }
    }
}

fn is_digits(input: &str) -> bool {
    !input.is_empty() && input.bytes().all(|b| b.is_ascii_digit())
}

/// Fiscal year start day: empty, or a number from 1 to 31.
pub fn parse_fiscal_day(input: &str) -> FieldUpdate<u32> {
    if input.is_empty() {
        return FieldUpdate::Clear;
    }
    if !is_digits(input) {
        return FieldUpdate::Reject;
    }
    match input.parse::<u32>() {
        Ok(day) if (1..=31).contains(&day) => FieldUpdate::Set(day),
        _ => FieldUpdate::Reject,
    }
}

/// Money amount: empty, or a whole number of at least 1.
pub fn parse_amount(input: &str) -> FieldUpdate<u64> {
    if input.is_empty() {
        return FieldUpdate::Clear;
    }
    if !is_digits(input) {
        return FieldUpdate::Reject;
    }
    match input.parse::<u64>() {
        Ok(amount) if amount >= 1 => FieldUpdate::Set(amount),
        _ => FieldUpdate::Reject,
    }
}

/// Years offered by the year picker: the last twenty years and this one.
pub fn year_options(today: NaiveDate) -> Vec<i32> {
    let current = today.year();
    (current - YEARS_BACK..=current).collect()
}

/// English month names, January first.
pub fn month_names() -> Vec<&'static str> {
    (1..=12u8)
        .filter_map(|number| Month::try_from(number).ok())
        .map(|month| month.name())
        .collect()
}

/// Editor state for a tax year that is being entered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaxYearDraft {
    pub country_code: Option<String>,
    pub currency_code: Option<String>,
    pub year: Option<i32>,
    pub fiscal_day: Option<u32>,
    pub fiscal_month: Option<u32>,
    pub taxable_income: Option<u64>,
    pub tax_paid: Option<u64>,
}

impl TaxYearDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pick (or drop) the country. The fiscal year start follows the
    /// country's entry in `table`.
    pub fn set_country(&mut self, country: Option<&Country>, table: &FiscalYearTable) {
        self.country_code = country.map(|c| c.iso.clone());
        self.currency_code = country.map(|c| c.currency.clone());
        self.reset_fiscal_year(table);
    }

    /// Restore the fiscal year start of the current country.
    pub fn reset_fiscal_year(&mut self, table: &FiscalYearTable) {
        let fiscal_year = table.lookup(self.country_code.as_deref());
        self.fiscal_day = Some(fiscal_year.day);
        self.fiscal_month = Some(fiscal_year.month);
    }

    pub fn set_fiscal_day(&mut self, input: &str) -> bool {
        parse_fiscal_day(input).apply(&mut self.fiscal_day)
    }

    pub fn set_fiscal_month(&mut self, month: u32) {
        self.fiscal_month = Some(month);
    }

    pub fn set_year(&mut self, year: i32) {
        self.year = Some(year);
    }

    pub fn set_taxable_income(&mut self, input: &str) -> bool {
        parse_amount(input).apply(&mut self.taxable_income)
    }

    pub fn set_tax_paid(&mut self, input: &str) -> bool {
        parse_amount(input).apply(&mut self.tax_paid)
    }

    pub fn fiscal_year(&self) -> Option<FiscalYear> {
        Some(FiscalYear {
            day: self.fiscal_day?,
            month: self.fiscal_month?,
        })
    }

    /// `"{country}-{year}-{month}-{day}"`, once all four are known.
    pub fn id(&self) -> Option<String> {
        let country = self.country_code.as_deref().filter(|c| !c.is_empty())?;
        let year = self.year?;
        let fiscal_year = self.fiscal_year()?;
        Some(format!(
            "{}-{}-{}-{}",
            country, year, fiscal_year.month, fiscal_year.day
        ))
    }

    pub fn interval(&self) -> Option<TaxYearInterval> {
        TaxYearInterval::starting(self.year?, self.fiscal_year()?)
    }

    /// Turn the draft into a tax year. Tax paid defaults to zero.
    pub fn validate(&self) -> Result<TaxYear, TaxYearError> {
        let taxable_income = self
            .taxable_income
            .filter(|income| *income > 0)
            .ok_or(TaxYearError::MissingTaxableIncome)?;

        let country_code = self
            .country_code
            .clone()
            .filter(|code| code.chars().count() == 2)
            .ok_or_else(|| TaxYearError::InvalidCountryCode(self.country_code.clone()))?;

        let currency_code = self
            .currency_code
            .clone()
            .filter(|code| code.chars().count() == 3)
            .ok_or_else(|| TaxYearError::InvalidCurrencyCode(self.currency_code.clone()))?;

        let interval = self.interval().ok_or(TaxYearError::MissingInterval)?;
        let id = self.id().ok_or(TaxYearError::MissingInterval)?;

        Ok(TaxYear {
            id,
            country_code,
            currency_code,
            taxable_income,
            tax_paid: self.tax_paid.unwrap_or(0),
            interval,
        })
    }
}
