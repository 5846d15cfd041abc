//! # Energy & Nutrition Calculators
//!
//! Basal metabolic rate, maintenance calories, macronutrient split and
//! daily water intake.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::body::{require_sex, require_unit_system};
use super::{Calculation, Report};
use crate::equations::{mifflin_st_jeor, Sex};
use crate::errors::{require_non_negative, require_positive, CalcError, CalcResult};
use crate::form::FormState;
use crate::format::{fixed, positive_or_sentinel, ReportLine, SENTINEL};
use crate::registry::CalculatorId;
use crate::units::{FluidOunces, Kilograms, Milliliters, Pounds, UnitSystem};

/// kcal per gram of protein or carbohydrate
pub const KCAL_PER_GRAM_PROTEIN_CARBS: f64 = 4.0;
/// kcal per gram of fat
pub const KCAL_PER_GRAM_FAT: f64 = 9.0;

/// Base water intake per pound of body weight (oz)
const WATER_OZ_PER_LB: f64 = 2.0 / 3.0;
/// Extra water per 30 minutes of exercise (oz)
const WATER_OZ_PER_30_MIN: f64 = 12.0;

// ============================================================================
// BMR
// ============================================================================

/// Mifflin–St Jeor inputs (metric).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BmrInput {
    /// Whole years
    pub age: f64,
    pub sex: Option<Sex>,
    pub height_cm: f64,
    pub weight_kg: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BmrResult {
    /// kcal/day
    pub bmr: f64,
}

impl Calculation for BmrInput {
    type Output = BmrResult;
    const ID: CalculatorId = CalculatorId::Bmr;

    fn from_form(form: &FormState) -> Self {
        BmrInput {
            age: form.integer("age"),
            sex: Sex::parse(form.text("sex")),
            height_cm: form.number("height_cm"),
            weight_kg: form.number("weight_kg"),
        }
    }

    fn validate(&self) -> CalcResult<()> {
        require_positive("age", self.age)?;
        require_sex(self.sex)?;
        require_positive("height_cm", self.height_cm)?;
        require_positive("weight_kg", self.weight_kg)?;
        Ok(())
    }

    fn compute(&self) -> BmrResult {
        BmrResult {
            bmr: mifflin_st_jeor(self.sex.unwrap_or_default(), self.weight_kg, self.height_cm, self.age),
        }
    }
}

impl Report for BmrResult {
    fn report(&self, _sym: &str) -> Vec<ReportLine> {
        vec![ReportLine::new("Basal Metabolic Rate (kcal/day)", positive_or_sentinel(self.bmr, 0))]
    }
}

// ============================================================================
// Calorie Intake
// ============================================================================

/// Activity multiplier applied to BMR.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActivityLevel {
    Sedentary,
    #[default]
    Light,
    Moderate,
    Active,
    VeryActive,
}

impl ActivityLevel {
    pub const ALL: [ActivityLevel; 5] = [
        ActivityLevel::Sedentary,
        ActivityLevel::Light,
        ActivityLevel::Moderate,
        ActivityLevel::Active,
        ActivityLevel::VeryActive,
    ];

    pub fn parse(value: &str) -> Option<Self> {
        let normalized = value.trim().to_ascii_lowercase().replace(['_', ' '], "-");
        match normalized.as_str() {
            "sedentary" => Some(ActivityLevel::Sedentary),
            "light" => Some(ActivityLevel::Light),
            "moderate" => Some(ActivityLevel::Moderate),
            "active" => Some(ActivityLevel::Active),
            "very-active" | "veryactive" => Some(ActivityLevel::VeryActive),
            _ => None,
        }
    }

    pub fn multiplier(&self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::Light => 1.375,
            ActivityLevel::Moderate => 1.55,
            ActivityLevel::Active => 1.725,
            ActivityLevel::VeryActive => 1.9,
        }
    }
}

impl fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ActivityLevel::Sedentary => "sedentary",
            ActivityLevel::Light => "light",
            ActivityLevel::Moderate => "moderate",
            ActivityLevel::Active => "active",
            ActivityLevel::VeryActive => "very-active",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalorieIntakeInput {
    #[serde(flatten)]
    pub bmr: BmrInput,
    pub activity: Option<ActivityLevel>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CalorieIntakeResult {
    pub bmr: f64,
    /// kcal/day to maintain current weight
    pub maintenance_calories: f64,
}

impl Calculation for CalorieIntakeInput {
    type Output = CalorieIntakeResult;
    const ID: CalculatorId = CalculatorId::CalorieIntake;

    fn from_form(form: &FormState) -> Self {
        CalorieIntakeInput {
            bmr: BmrInput::from_form(form),
            activity: ActivityLevel::parse(form.text("activity")),
        }
    }

    fn validate(&self) -> CalcResult<()> {
        self.bmr.validate()?;
        if self.activity.is_none() {
            return Err(CalcError::invalid_input(
                "activity",
                "",
                "Expected sedentary, light, moderate, active or very-active",
            ));
        }
        Ok(())
    }

    fn compute(&self) -> CalorieIntakeResult {
        let bmr = self.bmr.compute().bmr;
        CalorieIntakeResult {
            bmr,
            maintenance_calories: bmr * self.activity.unwrap_or_default().multiplier(),
        }
    }
}

impl Report for CalorieIntakeResult {
    fn report(&self, _sym: &str) -> Vec<ReportLine> {
        vec![
            ReportLine::new("Maintenance Calories (kcal/day)", positive_or_sentinel(self.maintenance_calories, 0)),
            ReportLine::new("Basal Metabolic Rate (kcal/day)", positive_or_sentinel(self.bmr, 0)),
        ]
    }
}

// ============================================================================
// Macros
// ============================================================================

/// Protein / carbohydrate / fat split of daily calories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DietPlan {
    #[default]
    Balanced,
    LowCarb,
    HighProtein,
}

impl DietPlan {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().replace(['_', ' '], "-").as_str() {
            "balanced" => Some(DietPlan::Balanced),
            "low-carb" => Some(DietPlan::LowCarb),
            "high-protein" => Some(DietPlan::HighProtein),
            _ => None,
        }
    }

    /// Calorie fractions `(protein, carbs, fat)`; they sum to 1.
    pub fn split(&self) -> (f64, f64, f64) {
        match self {
            DietPlan::Balanced => (0.30, 0.40, 0.30),
            DietPlan::LowCarb => (0.40, 0.20, 0.40),
            DietPlan::HighProtein => (0.50, 0.25, 0.25),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MacrosInput {
    /// Daily calories (kcal)
    pub calories: f64,
    pub plan: Option<DietPlan>,
}

/// Daily grams of each macronutrient.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MacrosResult {
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

impl Calculation for MacrosInput {
    type Output = MacrosResult;
    const ID: CalculatorId = CalculatorId::Macros;

    fn from_form(form: &FormState) -> Self {
        MacrosInput {
            calories: form.number("calories"),
            plan: DietPlan::parse(form.text("plan")),
        }
    }

    fn validate(&self) -> CalcResult<()> {
        require_positive("calories", self.calories)?;
        if self.plan.is_none() {
            return Err(CalcError::invalid_input("plan", "", "Expected balanced, low-carb or high-protein"));
        }
        Ok(())
    }

    fn compute(&self) -> MacrosResult {
        let (protein, carbs, fat) = self.plan.unwrap_or_default().split();
        MacrosResult {
            protein: self.calories * protein / KCAL_PER_GRAM_PROTEIN_CARBS,
            carbs: self.calories * carbs / KCAL_PER_GRAM_PROTEIN_CARBS,
            fat: self.calories * fat / KCAL_PER_GRAM_FAT,
        }
    }
}

impl Report for MacrosResult {
    fn report(&self, _sym: &str) -> Vec<ReportLine> {
        let grams = |v: f64| {
            if v > 0.0 {
                format!("{} g", fixed(v, 0))
            } else {
                SENTINEL.to_string()
            }
        };
        vec![
            ReportLine::new("Protein", grams(self.protein)),
            ReportLine::new("Carbohydrates", grams(self.carbs)),
            ReportLine::new("Fat", grams(self.fat)),
        ]
    }
}

// ============================================================================
// Water Intake
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaterIntakeInput {
    pub unit_system: Option<UnitSystem>,
    /// lb (imperial) or kg (metric)
    pub weight: f64,
    /// Daily exercise (minutes)
    pub activity_minutes: f64,
}

/// Recommended intake in fl oz (imperial) or ml (metric).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WaterIntakeResult {
    pub intake: f64,
    pub unit_system: UnitSystem,
}

impl Calculation for WaterIntakeInput {
    type Output = WaterIntakeResult;
    const ID: CalculatorId = CalculatorId::WaterIntake;

    fn from_form(form: &FormState) -> Self {
        WaterIntakeInput {
            unit_system: UnitSystem::parse(form.text("unit_system")),
            weight: form.number("weight"),
            activity_minutes: form.number("activity_minutes"),
        }
    }

    fn validate(&self) -> CalcResult<()> {
        require_unit_system(self.unit_system)?;
        require_positive("weight", self.weight)?;
        require_non_negative("activity_minutes", self.activity_minutes)?;
        Ok(())
    }

    fn compute(&self) -> WaterIntakeResult {
        let unit_system = self.unit_system.unwrap_or_default();
        let weight = match unit_system {
            UnitSystem::Metric => Pounds::from(Kilograms(self.weight)),
            UnitSystem::Imperial => Pounds(self.weight),
        };
        let ounces = FluidOunces(
            weight.value() * WATER_OZ_PER_LB + self.activity_minutes / 30.0 * WATER_OZ_PER_30_MIN,
        );
        let intake = match unit_system {
            UnitSystem::Metric => Milliliters::from(ounces).value(),
            UnitSystem::Imperial => ounces.value(),
        };
        WaterIntakeResult { intake, unit_system }
    }
}

impl Report for WaterIntakeResult {
    fn report(&self, _sym: &str) -> Vec<ReportLine> {
        let value = if self.intake > 0.0 {
            let unit = match self.unit_system {
                UnitSystem::Metric => "ml",
                UnitSystem::Imperial => "oz",
            };
            format!("{} {}", fixed(self.intake, 0), unit)
        } else {
            SENTINEL.to_string()
        };
        vec![ReportLine::new("Recommended Daily Intake", value)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bmr_input() -> BmrInput {
        BmrInput {
            age: 30.0,
            sex: Some(Sex::Male),
            height_cm: 180.0,
            weight_kg: 80.0,
        }
    }

    #[test]
    fn test_bmr() {
        let result = bmr_input().calculate().unwrap();
        assert_eq!(result.bmr, 1780.0);
        assert_eq!(result.report("$")[0].value, "1,780");
    }

    #[test]
    fn test_bmr_guards() {
        let mut input = bmr_input();
        input.age = 0.0;
        assert!(input.calculate().is_err());
        assert_eq!(input.evaluate().report("$")[0].value, SENTINEL);
        input.age = 30.0;
        input.sex = None;
        assert!(input.calculate().is_err());
    }

    #[test]
    fn test_calorie_intake_multipliers() {
        for (level, expected) in [
            (ActivityLevel::Sedentary, 2136.0),
            (ActivityLevel::Light, 2447.5),
            (ActivityLevel::Moderate, 2759.0),
            (ActivityLevel::Active, 3070.5),
            (ActivityLevel::VeryActive, 3382.0),
        ] {
            let input = CalorieIntakeInput {
                bmr: bmr_input(),
                activity: Some(level),
            };
            let result = input.calculate().unwrap();
            assert!((result.maintenance_calories - expected).abs() < 1e-9, "{level}");
        }
    }

    #[test]
    fn test_activity_parse_variants() {
        assert_eq!(ActivityLevel::parse("veryActive"), Some(ActivityLevel::VeryActive));
        assert_eq!(ActivityLevel::parse("very_active"), Some(ActivityLevel::VeryActive));
        for level in ActivityLevel::ALL {
            assert_eq!(ActivityLevel::parse(&level.to_string()), Some(level));
        }
        assert_eq!(ActivityLevel::parse("couch"), None);
    }

    #[test]
    fn test_calorie_intake_reuses_bmr_guards() {
        let mut bmr = bmr_input();
        bmr.weight_kg = -80.0;
        let input = CalorieIntakeInput {
            bmr,
            activity: Some(ActivityLevel::Light),
        };
        assert!(input.calculate().is_err());
        assert_eq!(input.evaluate(), CalorieIntakeResult::default());
    }

    #[test]
    fn test_macros_balanced() {
        let result = MacrosInput {
            calories: 2000.0,
            plan: Some(DietPlan::Balanced),
        }
        .calculate()
        .unwrap();
        assert!((result.protein - 150.0).abs() < 1e-9);
        assert!((result.carbs - 200.0).abs() < 1e-9);
        assert!((result.fat - 600.0 / 9.0).abs() < 1e-9);
        assert_eq!(result.report("$")[2].value, "67 g");
    }

    #[test]
    fn test_macro_splits_sum_to_one() {
        for plan in [DietPlan::Balanced, DietPlan::LowCarb, DietPlan::HighProtein] {
            let (p, c, f) = plan.split();
            assert!((p + c + f - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_water_imperial() {
        let result = WaterIntakeInput {
            unit_system: Some(UnitSystem::Imperial),
            weight: 150.0,
            activity_minutes: 30.0,
        }
        .calculate()
        .unwrap();
        assert!((result.intake - 112.0).abs() < 1e-9);
        assert_eq!(result.report("$")[0].value, "112 oz");
    }

    #[test]
    fn test_water_metric_in_ml() {
        let result = WaterIntakeInput {
            unit_system: Some(UnitSystem::Metric),
            weight: 70.0,
            activity_minutes: 0.0,
        }
        .calculate()
        .unwrap();
        let expected = 70.0 * 2.20462 * 2.0 / 3.0 * 29.5735;
        assert!((result.intake - expected).abs() < 1e-6);
        assert!(result.report("$")[0].value.ends_with(" ml"));
    }
}
