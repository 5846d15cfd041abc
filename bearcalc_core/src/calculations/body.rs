//! # Body Measurement Calculators
//!
//! BMI and U.S. Navy body fat. Both accept metric or imperial inputs and
//! convert through the unit newtypes before applying the shared formulas.

use serde::{Deserialize, Serialize};

use super::{Calculation, Report};
use crate::equations::{body_mass_index, navy_body_fat, BmiCategory, Sex};
use crate::errors::{require_finite, require_positive, CalcError, CalcResult};
use crate::form::FormState;
use crate::format::{positive_or_sentinel, ReportLine, SENTINEL};
use crate::registry::CalculatorId;
use crate::units::{Centimeters, Feet, Inches, Kilograms, Pounds, UnitSystem};

pub(crate) fn require_unit_system(system: Option<UnitSystem>) -> CalcResult<UnitSystem> {
    system.ok_or_else(|| CalcError::invalid_input("unit_system", "", "Expected 'metric' or 'imperial'"))
}

pub(crate) fn require_sex(sex: Option<Sex>) -> CalcResult<Sex> {
    sex.ok_or_else(|| CalcError::invalid_input("sex", "", "Expected 'male' or 'female'"))
}

// ============================================================================
// BMI
// ============================================================================

/// BMI inputs for both unit systems; only the selected system's fields are read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BmiInput {
    pub unit_system: Option<UnitSystem>,
    pub height_feet: f64,
    pub height_inches: f64,
    pub height_cm: f64,
    pub weight_lbs: f64,
    pub weight_kg: f64,
}

impl BmiInput {
    /// Height in centimeters for the selected unit system.
    pub fn height(&self) -> Centimeters {
        match self.unit_system.unwrap_or_default() {
            UnitSystem::Metric => Centimeters(self.height_cm),
            UnitSystem::Imperial => (Inches::from(Feet(self.height_feet)) + Inches(self.height_inches)).into(),
        }
    }

    /// Weight in kilograms for the selected unit system.
    pub fn weight(&self) -> Kilograms {
        match self.unit_system.unwrap_or_default() {
            UnitSystem::Metric => Kilograms(self.weight_kg),
            UnitSystem::Imperial => Pounds(self.weight_lbs).into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BmiResult {
    /// Rounded to one decimal
    pub bmi: f64,
    pub category: BmiCategory,
}

impl Calculation for BmiInput {
    type Output = BmiResult;
    const ID: CalculatorId = CalculatorId::Bmi;

    fn from_form(form: &FormState) -> Self {
        BmiInput {
            unit_system: UnitSystem::parse(form.text("unit_system")),
            height_feet: form.number("height_feet"),
            height_inches: form.number("height_inches"),
            height_cm: form.number("height_cm"),
            weight_lbs: form.number("weight_lbs"),
            weight_kg: form.number("weight_kg"),
        }
    }

    fn validate(&self) -> CalcResult<()> {
        match require_unit_system(self.unit_system)? {
            UnitSystem::Metric => {
                require_positive("height_cm", self.height_cm)?;
                require_positive("weight_kg", self.weight_kg)?;
            }
            UnitSystem::Imperial => {
                require_finite("height_feet", self.height_feet)?;
                require_finite("height_inches", self.height_inches)?;
                require_positive("height_feet", self.height().value())?;
                require_positive("weight_lbs", self.weight_lbs)?;
            }
        }
        Ok(())
    }

    fn compute(&self) -> BmiResult {
        let bmi = body_mass_index(self.weight().value(), self.height().value());
        // Banded on the raw value; only the shown figure is rounded
        BmiResult {
            bmi: (bmi * 10.0).round() / 10.0,
            category: BmiCategory::from_bmi(bmi),
        }
    }
}

impl Report for BmiResult {
    fn report(&self, _sym: &str) -> Vec<ReportLine> {
        vec![
            ReportLine::new("Your BMI", positive_or_sentinel(self.bmi, 1)),
            ReportLine::new("Category", self.category.label()),
        ]
    }
}

// ============================================================================
// Body Fat
// ============================================================================

/// Navy-method measurements, in inches (imperial) or centimeters (metric).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BodyFatInput {
    pub unit_system: Option<UnitSystem>,
    pub sex: Option<Sex>,
    pub height: f64,
    pub waist: f64,
    pub neck: f64,
    /// Read for females only
    pub hip: f64,
}

impl BodyFatInput {
    fn inches(&self, value: f64) -> f64 {
        match self.unit_system.unwrap_or_default() {
            UnitSystem::Metric => Inches::from(Centimeters(value)).value(),
            UnitSystem::Imperial => value,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BodyFatResult {
    /// Body fat (%)
    pub body_fat: f64,
}

impl Calculation for BodyFatInput {
    type Output = BodyFatResult;
    const ID: CalculatorId = CalculatorId::BodyFat;

    fn from_form(form: &FormState) -> Self {
        BodyFatInput {
            unit_system: UnitSystem::parse(form.text("unit_system")),
            sex: Sex::parse(form.text("sex")),
            height: form.number("height"),
            waist: form.number("waist"),
            neck: form.number("neck"),
            hip: form.number("hip"),
        }
    }

    fn validate(&self) -> CalcResult<()> {
        require_unit_system(self.unit_system)?;
        let sex = require_sex(self.sex)?;
        require_positive("height", self.height)?;
        require_positive("waist", self.waist)?;
        require_positive("neck", self.neck)?;

        let circumference = match sex {
            Sex::Male => self.waist - self.neck,
            Sex::Female => {
                require_positive("hip", self.hip)?;
                self.waist + self.hip - self.neck
            }
        };
        if circumference <= 0.0 {
            return Err(CalcError::invalid_input(
                "neck",
                self.neck.to_string(),
                "Neck must be smaller than the waist measurement",
            ));
        }
        Ok(())
    }

    fn compute(&self) -> BodyFatResult {
        BodyFatResult {
            body_fat: navy_body_fat(
                self.sex.unwrap_or_default(),
                self.inches(self.height),
                self.inches(self.waist),
                self.inches(self.neck),
                self.inches(self.hip),
            ),
        }
    }
}

impl Report for BodyFatResult {
    fn report(&self, _sym: &str) -> Vec<ReportLine> {
        let value = if self.body_fat > 0.0 && self.body_fat.is_finite() {
            format!("{:.1}%", self.body_fat)
        } else {
            SENTINEL.to_string()
        };
        vec![ReportLine::new("Estimated Body Fat", value)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn imperial_bmi() -> BmiInput {
        BmiInput {
            unit_system: Some(UnitSystem::Imperial),
            height_feet: 5.0,
            height_inches: 10.0,
            height_cm: f64::NAN,
            weight_lbs: 160.0,
            weight_kg: f64::NAN,
        }
    }

    #[test]
    fn test_bmi_imperial() {
        // 70 in = 177.8 cm, 160 lb = 72.57 kg
        let result = imperial_bmi().calculate().unwrap();
        assert_eq!(result.bmi, 23.0);
        assert_eq!(result.category, BmiCategory::NormalWeight);
    }

    #[test]
    fn test_bmi_metric() {
        let input = BmiInput {
            unit_system: Some(UnitSystem::Metric),
            height_feet: f64::NAN,
            height_inches: f64::NAN,
            height_cm: 178.0,
            weight_kg: 72.0,
            weight_lbs: f64::NAN,
        };
        let result = input.calculate().unwrap();
        assert_eq!(result.bmi, 22.7);
        assert_eq!(result.report("$")[1].value, "Normal weight");
    }

    #[test]
    fn test_bmi_category_at_boundaries() {
        // 100 cm tall makes BMI equal to the weight in kg
        for (kg, category) in [
            (18.5, BmiCategory::NormalWeight),
            (25.0, BmiCategory::Overweight),
            (30.0, BmiCategory::Obesity),
        ] {
            let input = BmiInput {
                unit_system: Some(UnitSystem::Metric),
                height_feet: 0.0,
                height_inches: 0.0,
                height_cm: 100.0,
                weight_lbs: 0.0,
                weight_kg: kg,
            };
            assert_eq!(input.calculate().unwrap().category, category);
        }
    }

    #[test]
    fn test_bmi_category_just_below_boundaries() {
        for (kg, category) in [
            (18.46, BmiCategory::Underweight),
            (24.96, BmiCategory::NormalWeight),
            (29.96, BmiCategory::Overweight),
        ] {
            let input = BmiInput {
                unit_system: Some(UnitSystem::Metric),
                height_feet: 0.0,
                height_inches: 0.0,
                height_cm: 100.0,
                weight_lbs: 0.0,
                weight_kg: kg,
            };
            let result = input.calculate().unwrap();
            assert_eq!(result.category, category, "{} kg", kg);
            assert!((result.bmi - (kg * 10.0f64).round() / 10.0).abs() < 1e-9);
        }

        // 170 cm, 53.35 kg: raw 18.46, shown as 18.5
        let form = FormState::new()
            .with("unit_system", "metric")
            .with("height_cm", "170")
            .with("weight_kg", "53.35");
        let result = BmiInput::from_form(&form).calculate().unwrap();
        assert!((result.bmi - 18.5).abs() < 1e-9);
        assert_eq!(result.category, BmiCategory::Underweight);
    }

    #[test]
    fn test_bmi_invalid_is_not_available() {
        let mut input = imperial_bmi();
        input.weight_lbs = 0.0;
        assert!(input.calculate().is_err());
        let result = input.evaluate();
        assert_eq!(result.bmi, 0.0);
        assert_eq!(result.category, BmiCategory::NotAvailable);
        let lines = result.report("$");
        assert_eq!(lines[0].value, SENTINEL);
        assert_eq!(lines[1].value, "N/A");
    }

    #[test]
    fn test_bmi_missing_inches_rejected() {
        let mut input = imperial_bmi();
        input.height_inches = f64::NAN;
        match input.calculate() {
            Err(CalcError::InvalidInput { field, .. }) => assert_eq!(field, "height_inches"),
            other => panic!("unexpected: {:?}", other),
        }
    }

    fn male_body_fat() -> BodyFatInput {
        BodyFatInput {
            unit_system: Some(UnitSystem::Imperial),
            sex: Some(Sex::Male),
            height: 70.0,
            waist: 35.0,
            neck: 15.0,
            hip: 40.0,
        }
    }

    #[test]
    fn test_body_fat_male() {
        let result = male_body_fat().calculate().unwrap();
        assert!((result.body_fat - 19.43).abs() < 0.01);
        assert_eq!(result.report("$")[0].value, "19.4%");
    }

    #[test]
    fn test_body_fat_metric_matches_imperial() {
        let imperial = male_body_fat().calculate().unwrap();
        let metric = BodyFatInput {
            unit_system: Some(UnitSystem::Metric),
            sex: Some(Sex::Male),
            height: 70.0 * 2.54,
            waist: 35.0 * 2.54,
            neck: 15.0 * 2.54,
            hip: 40.0 * 2.54,
        }
        .calculate()
        .unwrap();
        assert!((imperial.body_fat - metric.body_fat).abs() < 1e-9);
    }

    #[test]
    fn test_body_fat_log_argument_guard() {
        let mut input = male_body_fat();
        input.neck = 35.0;
        assert!(input.calculate().is_err());
        let result = input.evaluate();
        assert!(!result.body_fat.is_nan());
        assert_eq!(result.report("$")[0].value, SENTINEL);
    }

    #[test]
    fn test_body_fat_female_needs_hip() {
        let mut input = male_body_fat();
        input.sex = Some(Sex::Female);
        input.hip = f64::NAN;
        match input.calculate() {
            Err(CalcError::InvalidInput { field, .. }) => assert_eq!(field, "hip"),
            other => panic!("unexpected: {:?}", other),
        }
        input.hip = 40.0;
        assert!(input.calculate().unwrap().body_fat > 0.0);
    }
}
