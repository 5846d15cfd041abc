//! # Unit Converter
//!
//! Length, mass and volume conversion through the factor tables in
//! [`crate::units`].

use serde::{Deserialize, Serialize};

use super::{Calculation, Report};
use crate::errors::{require_finite, CalcError, CalcResult};
use crate::form::FormState;
use crate::format::{trimmed, ReportLine, SENTINEL};
use crate::registry::CalculatorId;
use crate::units::{convert, UnitCategory};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitConverterInput {
    /// Inferred from `from_unit` when not given
    pub category: Option<UnitCategory>,
    pub from_unit: String,
    pub to_unit: String,
    pub value: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UnitConverterResult {
    pub converted: f64,
    pub from_unit: String,
    pub to_unit: String,
}

impl Calculation for UnitConverterInput {
    type Output = UnitConverterResult;
    const ID: CalculatorId = CalculatorId::UnitConverter;

    fn from_form(form: &FormState) -> Self {
        let from_unit = form.text("from_unit").trim().to_ascii_lowercase();
        let to_unit = form.text("to_unit").trim().to_ascii_lowercase();
        let category = UnitCategory::parse(form.text("category")).or_else(|| UnitCategory::of_unit(&from_unit));
        UnitConverterInput {
            category,
            from_unit,
            to_unit,
            value: form.number("value"),
        }
    }

    fn validate(&self) -> CalcResult<()> {
        let category = self
            .category
            .ok_or_else(|| CalcError::invalid_input("category", "", "Expected length, mass or volume"))?;
        require_finite("value", self.value)?;
        convert(category, self.value, &self.from_unit, &self.to_unit)?;
        Ok(())
    }

    fn compute(&self) -> UnitConverterResult {
        let converted = self
            .category
            .ok_or_else(|| CalcError::invalid_input("category", "", "Expected length, mass or volume"))
            .and_then(|category| convert(category, self.value, &self.from_unit, &self.to_unit));
        match converted {
            Ok(converted) => UnitConverterResult {
                converted,
                from_unit: self.from_unit.clone(),
                to_unit: self.to_unit.clone(),
            },
            Err(_) => UnitConverterResult::default(),
        }
    }
}

impl Report for UnitConverterResult {
    fn report(&self, _sym: &str) -> Vec<ReportLine> {
        let value = if self.to_unit.is_empty() {
            SENTINEL.to_string()
        } else {
            format!("{} {}", trimmed(self.converted, 6), self.to_unit)
        };
        vec![ReportLine::new("Result", value)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meter_to_foot() {
        let form = FormState::new()
            .with("category", "length")
            .with("from_unit", "meter")
            .with("to_unit", "foot")
            .with("value", "1");
        let result = UnitConverterInput::from_form(&form).calculate().unwrap();
        assert!((result.converted - 3.28084).abs() < 1e-5);
        assert_eq!(result.report("$")[0].value, "3.28084 foot");
    }

    #[test]
    fn test_category_inferred_from_unit() {
        let form = FormState::new()
            .with("from_unit", "Gallon-US")
            .with("to_unit", "liter")
            .with("value", "2");
        let input = UnitConverterInput::from_form(&form);
        assert_eq!(input.category, Some(UnitCategory::Volume));
        assert!((input.calculate().unwrap().converted - 7.57082).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_unit() {
        let input = UnitConverterInput {
            category: Some(UnitCategory::Length),
            from_unit: "meter".into(),
            to_unit: "parsec".into(),
            value: 1.0,
        };
        match input.calculate() {
            Err(CalcError::UnknownUnit { unit, .. }) => assert_eq!(unit, "parsec"),
            other => panic!("unexpected: {:?}", other),
        }
        assert_eq!(input.evaluate().report("$")[0].value, SENTINEL);
    }

    #[test]
    fn test_large_values_group_thousands() {
        let input = UnitConverterInput {
            category: Some(UnitCategory::Length),
            from_unit: "mile".into(),
            to_unit: "meter".into(),
            value: 1.0,
        };
        assert_eq!(input.calculate().unwrap().report("$")[0].value, "1,609.34 meter");
    }
}
