//! # Body Composition & Energy Formulas
//!
//! ## References
//!
//! - Mifflin MD, St Jeor ST et al. (1990), resting energy expenditure
//! - Hodgdon & Beckett (1984), U.S. Navy circumference method
//! - WHO adult BMI classification

use std::fmt;

use serde::{Deserialize, Serialize};

/// Biological sex, as used by the sex-specific formulas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    #[default]
    Male,
    Female,
}

impl Sex {
    /// Parse the form value (`male` / `female`), case-insensitive.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "male" | "m" => Some(Sex::Male),
            "female" | "f" => Some(Sex::Female),
            _ => None,
        }
    }
}

/// Basal metabolic rate in kcal/day (Mifflin–St Jeor).
///
/// # Formula
/// ```text
/// BMR = 10·w + 6.25·h − 5·a + 5      (male)
/// BMR = 10·w + 6.25·h − 5·a − 161    (female)
/// ```
///
/// # Arguments
/// * `weight_kg` - Body weight in kilograms
/// * `height_cm` - Height in centimeters
/// * `age_years` - Age in whole years
#[inline]
pub fn mifflin_st_jeor(sex: Sex, weight_kg: f64, height_cm: f64, age_years: f64) -> f64 {
    let base = 10.0 * weight_kg + 6.25 * height_cm - 5.0 * age_years;
    match sex {
        Sex::Male => base + 5.0,
        Sex::Female => base - 161.0,
    }
}

/// Body fat percentage by the U.S. Navy circumference method.
///
/// All measurements in inches. `hip_in` is only read for females.
///
/// # Formulas
/// ```text
/// male:   86.010·log10(waist − neck) − 70.041·log10(h) + 36.76
/// female: 163.205·log10(waist + hip − neck) − 97.684·log10(h) − 78.387
/// ```
#[inline]
pub fn navy_body_fat(sex: Sex, height_in: f64, waist_in: f64, neck_in: f64, hip_in: f64) -> f64 {
    match sex {
        Sex::Male => 86.010 * (waist_in - neck_in).log10() - 70.041 * height_in.log10() + 36.76,
        Sex::Female => {
            163.205 * (waist_in + hip_in - neck_in).log10() - 97.684 * height_in.log10() - 78.387
        }
    }
}

/// Body mass index `kg / m²`.
#[inline]
pub fn body_mass_index(weight_kg: f64, height_cm: f64) -> f64 {
    let height_m = height_cm / 100.0;
    weight_kg / (height_m * height_m)
}

/// Adult BMI category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BmiCategory {
    Underweight,
    #[serde(rename = "Normal weight")]
    NormalWeight,
    Overweight,
    Obesity,
    /// No valid measurement
    #[default]
    #[serde(rename = "N/A")]
    NotAvailable,
}

impl BmiCategory {
    /// Band a BMI value.
    ///
    /// - `bmi < 18.5` → Underweight
    /// - `18.5 ≤ bmi < 25` → Normal weight
    /// - `25 ≤ bmi < 30` → Overweight
    /// - `bmi ≥ 30` → Obesity
    pub fn from_bmi(bmi: f64) -> Self {
        if !bmi.is_finite() || bmi <= 0.0 {
            BmiCategory::NotAvailable
        } else if bmi < 18.5 {
            BmiCategory::Underweight
        } else if bmi < 25.0 {
            BmiCategory::NormalWeight
        } else if bmi < 30.0 {
            BmiCategory::Overweight
        } else {
            BmiCategory::Obesity
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::NormalWeight => "Normal weight",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::Obesity => "Obesity",
            BmiCategory::NotAvailable => "N/A",
        }
    }
}

impl fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mifflin_st_jeor() {
        // 80 kg, 180 cm, 30 y: 800 + 1125 − 150 = 1775 before the sex offset
        assert_eq!(mifflin_st_jeor(Sex::Male, 80.0, 180.0, 30.0), 1780.0);
        assert_eq!(mifflin_st_jeor(Sex::Female, 80.0, 180.0, 30.0), 1614.0);
    }

    #[test]
    fn test_navy_male() {
        // 70 in tall, 35 in waist, 15 in neck
        let bf = navy_body_fat(Sex::Male, 70.0, 35.0, 15.0, 0.0);
        assert!((bf - 19.43).abs() < 0.01, "got {bf}");
    }

    #[test]
    fn test_navy_female_uses_hip() {
        let without = navy_body_fat(Sex::Female, 65.0, 30.0, 13.0, 36.0);
        let wider = navy_body_fat(Sex::Female, 65.0, 30.0, 13.0, 40.0);
        assert!(wider > without);
    }

    #[test]
    fn test_bmi_value() {
        // 72 kg at 178 cm
        let bmi = body_mass_index(72.0, 178.0);
        assert!((bmi - 22.724).abs() < 0.001);
    }

    #[test]
    fn test_bmi_boundaries() {
        assert_eq!(BmiCategory::from_bmi(18.49), BmiCategory::Underweight);
        assert_eq!(BmiCategory::from_bmi(18.5), BmiCategory::NormalWeight);
        assert_eq!(BmiCategory::from_bmi(24.99), BmiCategory::NormalWeight);
        assert_eq!(BmiCategory::from_bmi(25.0), BmiCategory::Overweight);
        assert_eq!(BmiCategory::from_bmi(29.99), BmiCategory::Overweight);
        assert_eq!(BmiCategory::from_bmi(30.0), BmiCategory::Obesity);
        assert_eq!(BmiCategory::from_bmi(f64::NAN), BmiCategory::NotAvailable);
        assert_eq!(BmiCategory::from_bmi(0.0), BmiCategory::NotAvailable);
    }

    #[test]
    fn test_category_serializes_as_label() {
        let json = serde_json::to_string(&BmiCategory::NormalWeight).unwrap();
        assert_eq!(json, "\"Normal weight\"");
        assert_eq!(BmiCategory::NotAvailable.to_string(), "N/A");
    }

    #[test]
    fn test_sex_parse() {
        assert_eq!(Sex::parse("Female"), Some(Sex::Female));
        assert_eq!(Sex::parse("x"), None);
    }
}
