//! Bundled country and fiscal year data.

use super::fiscal_year::FiscalYearTable;
use super::tax_year::Country;
use crate::error::ExpatResult;

const COUNTRIES_JSON: &str = include_str!("../../data/countries.json");
const FISCAL_YEARS_JSON: &str = include_str!("../../data/fiscal_years.json");

/// Bundled countries, sorted by name.
pub fn countries() -> ExpatResult<Vec<Country>> {
    let mut countries: Vec<Country> = serde_json::from_str(COUNTRIES_JSON)?;
    countries.sort_by(|a, b| a.country_name.cmp(&b.country_name));
    Ok(countries)
}

/// Bundled fiscal year starts. Countries without an entry use the calendar year.
pub fn fiscal_years() -> ExpatResult<FiscalYearTable> {
    FiscalYearTable::from_json(FISCAL_YEARS_JSON)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tax::fiscal_year::{FiscalYear, DEFAULT_FISCAL_YEAR};

    #[test]
    fn test_bundled_countries() {
        let countries = countries().unwrap();
        assert!(countries.len() > 30);
        assert!(countries
            .windows(2)
            .all(|pair| pair[0].country_name <= pair[1].country_name));
        assert!(countries
            .iter()
            .all(|c| c.iso.len() == 2 && c.currency.len() == 3));
    }

    #[test]
    fn test_bundled_fiscal_years() {
        let table = fiscal_years().unwrap();
        assert_eq!(table.lookup(Some("GB")), FiscalYear { day: 6, month: 4 });
        assert_eq!(table.lookup(Some("US")), DEFAULT_FISCAL_YEAR);
    }
}
