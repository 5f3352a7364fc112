//! Fiscal year start dates per country.

use serde::{Deserialize, Serialize};

use crate::error::ExpatResult;

/// Start of a fiscal year, as a day and month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FiscalYear {
    pub day: u32,
    pub month: u32,
}

/// Calendar-year fiscal year, used when a country has no entry.
pub const DEFAULT_FISCAL_YEAR: FiscalYear = FiscalYear { day: 1, month: 1 };

impl Default for FiscalYear {
    fn default() -> Self {
        DEFAULT_FISCAL_YEAR
    }
}

/// One row of a fiscal year table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FiscalYearEntry {
    pub country_code: String,
    pub day: u32,
    pub month: u32,
}

impl FiscalYearEntry {
    pub fn fiscal_year(&self) -> FiscalYear {
        FiscalYear {
            day: self.day,
            month: self.month,
        }
    }
}

/// Fiscal year starts keyed by ISO country code. The data itself comes from
/// the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FiscalYearTable {
    entries: Vec<FiscalYearEntry>,
}

impl FiscalYearTable {
    pub fn new(entries: Vec<FiscalYearEntry>) -> Self {
        Self { entries }
    }

    /// Parse a JSON array of `{ "countryCode", "day", "month" }` objects.
    pub fn from_json(json: &str) -> ExpatResult<Self> {
        Ok(Self::new(serde_json::from_str(json)?))
    }

    /// Fiscal year of `country_code`, or the calendar year when unknown.
    pub fn lookup(&self, country_code: Option<&str>) -> FiscalYear {
        let Some(code) = country_code.filter(|c| !c.is_empty()) else {
            return DEFAULT_FISCAL_YEAR;
        };

        self.entries
            .iter()
            .find(|entry| entry.country_code == code)
            .map(FiscalYearEntry::fiscal_year)
            .unwrap_or(DEFAULT_FISCAL_YEAR)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
