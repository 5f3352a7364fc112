//! Tax-year bookkeeping for the calculator's input stage.
//!
//! - [`fiscal_year`] - fiscal year starts per country
//! - [`tax_year`] - tax year drafts, validation and interval derivation
//! - [`calculator`] - the list of entered tax years and the wizard stage
//! - [`countries`] - bundled country and fiscal year data

pub mod calculator;
pub mod countries;
pub mod fiscal_year;
pub mod tax_year;

pub use calculator::{Stage, TaxCalculator, TaxYears};
pub use countries::{countries, fiscal_years};
pub use fiscal_year::{FiscalYear, FiscalYearEntry, FiscalYearTable, DEFAULT_FISCAL_YEAR};
pub use tax_year::{
    month_names, parse_amount, parse_fiscal_day, year_options, Country, FieldUpdate, TaxYear,
    TaxYearDraft, TaxYearError, TaxYearInterval,
};
