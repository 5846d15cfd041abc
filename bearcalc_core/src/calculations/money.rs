//! # Purchasing Power & Currency
//!
//! Inflation adjustment over a built-in CPI table, and conversion at a
//! user-supplied exchange rate (no live rates are fetched).

use serde::{Deserialize, Serialize};

use super::{Calculation, Report};
use crate::errors::{require_finite, CalcError, CalcResult};
use crate::form::FormState;
use crate::format::{currency, fixed, percent, ReportLine, SENTINEL};
use crate::registry::CalculatorId;

/// U.S. CPI-U annual averages (1982-84 = 100).
pub const CPI_U: [(i32, f64); 14] = [
    (2010, 218.056),
    (2011, 224.939),
    (2012, 229.594),
    (2013, 232.957),
    (2014, 236.736),
    (2015, 237.017),
    (2016, 240.007),
    (2017, 245.120),
    (2018, 251.107),
    (2019, 255.657),
    (2020, 258.811),
    (2021, 270.970),
    (2022, 292.655),
    (2023, 304.702),
];

/// CPI for a whole year, if the table covers it.
pub fn cpi_for_year(year: f64) -> Option<f64> {
    CPI_U
        .iter()
        .find(|(y, _)| f64::from(*y) == year)
        .map(|(_, cpi)| *cpi)
}

// ============================================================================
// Inflation
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InflationInput {
    pub amount: f64,
    pub start_year: f64,
    pub end_year: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InflationResult {
    /// `amount` expressed in end-year dollars
    pub adjusted_value: f64,
    /// Cumulative inflation between the two years (%)
    pub total_inflation: f64,
}

impl Calculation for InflationInput {
    type Output = InflationResult;
    const ID: CalculatorId = CalculatorId::Inflation;

    fn from_form(form: &FormState) -> Self {
        InflationInput {
            amount: form.number("amount"),
            start_year: form.integer("start_year"),
            end_year: form.integer("end_year"),
        }
    }

    fn validate(&self) -> CalcResult<()> {
        require_finite("amount", self.amount)?;
        for (field, year) in [("start_year", self.start_year), ("end_year", self.end_year)] {
            if cpi_for_year(year).is_none() {
                return Err(CalcError::invalid_input(field, year.to_string(), "No CPI data for this year (2010-2023)"));
            }
        }
        Ok(())
    }

    fn compute(&self) -> InflationResult {
        match (cpi_for_year(self.start_year), cpi_for_year(self.end_year)) {
            (Some(start), Some(end)) => InflationResult {
                adjusted_value: self.amount * (end / start),
                total_inflation: (end - start) / start * 100.0,
            },
            _ => InflationResult::default(),
        }
    }
}

impl Report for InflationResult {
    fn report(&self, sym: &str) -> Vec<ReportLine> {
        vec![
            ReportLine::new("Adjusted Value", currency(self.adjusted_value, sym)),
            ReportLine::new("Cumulative Inflation", percent(self.total_inflation, 2)),
        ]
    }
}

// ============================================================================
// Currency
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrencyInput {
    pub amount: f64,
    /// ISO code, display only
    pub from_currency: String,
    /// ISO code, display only
    pub to_currency: String,
    /// Units of `to_currency` per unit of `from_currency`
    pub exchange_rate: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CurrencyResult {
    pub converted_amount: f64,
    pub to_currency: String,
}

impl Calculation for CurrencyInput {
    type Output = CurrencyResult;
    const ID: CalculatorId = CalculatorId::Currency;

    fn from_form(form: &FormState) -> Self {
        CurrencyInput {
            amount: form.number("amount"),
            from_currency: form.text("from_currency").trim().to_ascii_uppercase(),
            to_currency: form.text("to_currency").trim().to_ascii_uppercase(),
            exchange_rate: form.number("exchange_rate"),
        }
    }

    fn validate(&self) -> CalcResult<()> {
        require_finite("amount", self.amount)?;
        require_finite("exchange_rate", self.exchange_rate)?;
        Ok(())
    }

    fn compute(&self) -> CurrencyResult {
        CurrencyResult {
            converted_amount: self.amount * self.exchange_rate,
            to_currency: self.to_currency.clone(),
        }
    }
}

impl Report for CurrencyResult {
    fn report(&self, _sym: &str) -> Vec<ReportLine> {
        let value = if self.to_currency.is_empty() {
            fixed(self.converted_amount, 2)
        } else {
            format!("{} {}", fixed(self.converted_amount, 2), self.to_currency)
        };
        let value = if self.converted_amount.is_finite() { value } else { SENTINEL.to_string() };
        vec![ReportLine::new("Converted Amount", value)]
    }
}
