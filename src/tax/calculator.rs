//! The calculator wizard: collected tax years and the current stage.

use serde::{Deserialize, Serialize};

use super::tax_year::TaxYear;

/// Wizard stages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Stage {
    /// Entering tax years.
    #[default]
    Input,
    /// Showing results.
    Result,
}

/// Tax years entered so far, in entry order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaxYears {
    years: Vec<TaxYear>,
}

impl TaxYears {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, tax_year: TaxYear) {
        tracing::debug!(id = %tax_year.id, "tax year added");
        self.years.push(tax_year);
    }

    /// Remove the tax year at `index`, if there is one.
    pub fn remove(&mut self, index: usize) -> Option<TaxYear> {
        (index < self.years.len()).then(|| self.years.remove(index))
    }

    pub fn get(&self, index: usize) -> Option<&TaxYear> {
        self.years.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TaxYear> {
        self.years.iter()
    }

    pub fn len(&self) -> usize {
        self.years.len()
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }
}

/// Wizard state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaxCalculator {
    stage: Stage,
    tax_years: TaxYears,
}

impl TaxCalculator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn tax_years(&self) -> &TaxYears {
        &self.tax_years
    }

    pub fn add_tax_year(&mut self, tax_year: TaxYear) {
        self.tax_years.add(tax_year);
    }

    /// Remove a tax year. Dropping the last one sends the wizard back to input.
    pub fn remove_tax_year(&mut self, index: usize) -> Option<TaxYear> {
        let removed = self.tax_years.remove(index);
        if self.tax_years.is_empty() {
            self.stage = Stage::Input;
        }
        removed
    }

    /// Results need at least one tax year.
    pub fn can_calculate(&self) -> bool {
        !self.tax_years.is_empty()
    }

    /// Move to `stage`. Returns false when results were requested without
    /// any tax years.
    pub fn set_stage(&mut self, stage: Stage) -> bool {
        if stage == Stage::Result && !self.can_calculate() {
            return false;
        }
        self.stage = stage;
        true
    }
}
