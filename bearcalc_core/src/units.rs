//! # Unit Types
//!
//! Type-safe wrappers for the handful of units the calculators mix
//! internally, plus the lookup tables behind the general-purpose unit
//! converter.
//!
//! Every hard-coded conversion constant lives here. Calculators never
//! re-derive them.
//!
//! ## Example
//!
//! ```rust
//! use bearcalc_core::units::{Centimeters, Feet, Inches};
//!
//! let height = Feet(5.0) + Feet::from(Inches(10.0));
//! let cm: Centimeters = Inches::from(height).into();
//! assert!((cm.0 - 177.8).abs() < 1e-9);
//! ```

use std::fmt;
use std::ops::{Add, Div, Mul, Sub};

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

// ============================================================================
// Conversion Constants
// ============================================================================

/// Centimeters per inch (exact)
pub const CM_PER_INCH: f64 = 2.54;

/// Inches per foot
pub const INCHES_PER_FOOT: f64 = 12.0;

/// Kilograms per pound
pub const KG_PER_LB: f64 = 0.453592;

/// Pounds per kilogram.
///
/// Not the exact reciprocal of [`KG_PER_LB`]; each is the rounded value the
/// matching calculator has always used.
pub const LB_PER_KG: f64 = 2.20462;

/// Milliliters per US fluid ounce
pub const ML_PER_FL_OZ: f64 = 29.5735;

/// Cubic feet per cubic yard
pub const CUBIC_FEET_PER_CUBIC_YARD: f64 = 27.0;

// ============================================================================
// Length Units
// ============================================================================

/// Length in feet
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Feet(pub f64);

/// Length in inches
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inches(pub f64);

/// Length in centimeters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Centimeters(pub f64);

impl From<Feet> for Inches {
    fn from(ft: Feet) -> Self {
        Inches(ft.0 * INCHES_PER_FOOT)
    }
}

impl From<Inches> for Feet {
    fn from(inches: Inches) -> Self {
        Feet(inches.0 / INCHES_PER_FOOT)
    }
}

impl From<Inches> for Centimeters {
    fn from(inches: Inches) -> Self {
        Centimeters(inches.0 * CM_PER_INCH)
    }
}

impl From<Centimeters> for Inches {
    fn from(cm: Centimeters) -> Self {
        Inches(cm.0 / CM_PER_INCH)
    }
}

// ============================================================================
// Mass Units
// ============================================================================

/// Mass in pounds
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pounds(pub f64);

/// Mass in kilograms
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kilograms(pub f64);

impl From<Pounds> for Kilograms {
    fn from(lb: Pounds) -> Self {
        Kilograms(lb.0 * KG_PER_LB)
    }
}

impl From<Kilograms> for Pounds {
    fn from(kg: Kilograms) -> Self {
        Pounds(kg.0 * LB_PER_KG)
    }
}

// ============================================================================
// Liquid Volume Units
// ============================================================================

/// Volume in US fluid ounces
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FluidOunces(pub f64);

/// Volume in milliliters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Milliliters(pub f64);

impl From<FluidOunces> for Milliliters {
    fn from(oz: FluidOunces) -> Self {
        Milliliters(oz.0 * ML_PER_FL_OZ)
    }
}

impl From<Milliliters> for FluidOunces {
    fn from(ml: Milliliters) -> Self {
        FluidOunces(ml.0 / ML_PER_FL_OZ)
    }
}

// ============================================================================
// Arithmetic Implementations (macro to reduce boilerplate)
// ============================================================================

macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl $type {
            /// Get the raw f64 value
            pub fn value(self) -> f64 {
                self.0
            }
        }
    };
}

impl_arithmetic!(Feet);
impl_arithmetic!(Inches);
impl_arithmetic!(Centimeters);
impl_arithmetic!(Pounds);
impl_arithmetic!(Kilograms);
impl_arithmetic!(FluidOunces);
impl_arithmetic!(Milliliters);

// ============================================================================
// Unit System Toggle
// ============================================================================

/// Metric / imperial toggle used by the body-measurement calculators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    Metric,
    #[default]
    Imperial,
}

impl UnitSystem {
    /// Parse the form value (`metric` / `imperial`), case-insensitive.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "metric" => Some(UnitSystem::Metric),
            "imperial" => Some(UnitSystem::Imperial),
            _ => None,
        }
    }
}

// ============================================================================
// General Unit Converter Tables
// ============================================================================

/// Quantity families supported by the unit converter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitCategory {
    #[default]
    Length,
    Mass,
    Volume,
}

/// Base unit: meter
const LENGTH_UNITS: &[(&str, f64)] = &[
    ("meter", 1.0),
    ("kilometer", 1000.0),
    ("centimeter", 0.01),
    ("millimeter", 0.001),
    ("inch", 0.0254),
    ("foot", 0.3048),
    ("yard", 0.9144),
    ("mile", 1609.34),
];

/// Base unit: gram
const MASS_UNITS: &[(&str, f64)] = &[
    ("gram", 1.0),
    ("kilogram", 1000.0),
    ("milligram", 0.001),
    ("pound", 453.592),
    ("ounce", 28.3495),
];

/// Base unit: liter
const VOLUME_UNITS: &[(&str, f64)] = &[
    ("liter", 1.0),
    ("milliliter", 0.001),
    ("cubic-meter", 1000.0),
    ("gallon-us", 3.78541),
    ("quart-us", 0.946353),
    ("pint-us", 0.473176),
    ("cup-us", 0.24),
];

impl UnitCategory {
    /// All categories in display order
    pub const ALL: [UnitCategory; 3] = [UnitCategory::Length, UnitCategory::Mass, UnitCategory::Volume];

    /// Parse a category name, case-insensitive.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "length" => Some(UnitCategory::Length),
            "mass" => Some(UnitCategory::Mass),
            "volume" => Some(UnitCategory::Volume),
            _ => None,
        }
    }

    /// `(unit name, factor to base unit)` pairs, in display order.
    pub fn units(&self) -> &'static [(&'static str, f64)] {
        match self {
            UnitCategory::Length => LENGTH_UNITS,
            UnitCategory::Mass => MASS_UNITS,
            UnitCategory::Volume => VOLUME_UNITS,
        }
    }

    /// Unit names, in display order.
    pub fn unit_names(&self) -> impl Iterator<Item = &'static str> {
        self.units().iter().map(|(name, _)| *name)
    }

    /// Factor converting one `unit` into the category's base unit.
    pub fn factor(&self, unit: &str) -> Option<f64> {
        self.units()
            .iter()
            .find(|(name, _)| *name == unit)
            .map(|(_, factor)| *factor)
    }

    /// Category that contains `unit`, if any.
    pub fn of_unit(unit: &str) -> Option<UnitCategory> {
        Self::ALL.into_iter().find(|c| c.factor(unit).is_some())
    }

    /// The two units selected when switching to this category.
    pub fn default_pair(&self) -> (&'static str, &'static str) {
        let units = self.units();
        let from = units[0].0;
        let to = units.get(1).map(|u| u.0).unwrap_or(from);
        (from, to)
    }
}

impl fmt::Display for UnitCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            UnitCategory::Length => "length",
            UnitCategory::Mass => "mass",
            UnitCategory::Volume => "volume",
        };
        f.write_str(name)
    }
}

/// Convert `value` from one unit to another within `category`.
///
/// `value × factor(from) / factor(to)`
pub fn convert(category: UnitCategory, value: f64, from: &str, to: &str) -> CalcResult<f64> {
    let from_factor = category
        .factor(from)
        .ok_or_else(|| CalcError::unknown_unit(category.to_string(), from))?;
    let to_factor = category
        .factor(to)
        .ok_or_else(|| CalcError::unknown_unit(category.to_string(), to))?;
    Ok(value * from_factor / to_factor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_feet_to_inches() {
        let inches: Inches = Feet(10.0).into();
        assert_eq!(inches.0, 120.0);
    }

    #[test]
    fn test_inches_to_centimeters() {
        let cm: Centimeters = Inches(10.0).into();
        assert!((cm.0 - 25.4).abs() < 1e-12);
    }

    #[test]
    fn test_mass_constants_match_calculators() {
        let kg: Kilograms = Pounds(160.0).into();
        assert!((kg.0 - 72.57472).abs() < 1e-9);
        let lb: Pounds = Kilograms(1.0).into();
        assert_eq!(lb.0, 2.20462);
        // The two rounded constants agree to five significant digits
        assert!((KG_PER_LB * LB_PER_KG - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_fluid_ounces_to_ml() {
        let ml: Milliliters = FluidOunces(8.0).into();
        assert!((ml.0 - 236.588).abs() < 1e-9);
    }

    #[test]
    fn test_arithmetic() {
        let a = Feet(10.0);
        let b = Feet(5.0);
        assert_eq!((a + b).0, 15.0);
        assert_eq!((a - b).0, 5.0);
        assert_eq!((a * 2.0).0, 20.0);
        assert_eq!((a / 2.0).value(), 5.0);
    }

    #[test]
    fn test_serialization() {
        let ft = Feet(12.5);
        let json = serde_json::to_string(&ft).unwrap();
        assert_eq!(json, "12.5");
        let system = serde_json::to_string(&UnitSystem::Metric).unwrap();
        assert_eq!(system, "\"metric\"");
    }

    #[test]
    fn test_meter_to_foot() {
        let ft = convert(UnitCategory::Length, 1.0, "meter", "foot").unwrap();
        assert!((ft - 3.280839895).abs() < 1e-6);
    }

    #[test]
    fn test_unknown_unit_rejected() {
        let err = convert(UnitCategory::Mass, 1.0, "gram", "stone").unwrap_err();
        assert_eq!(err.error_code(), "UNKNOWN_UNIT");
        // Units do not leak across categories
        assert!(convert(UnitCategory::Mass, 1.0, "meter", "gram").is_err());
    }

    #[test]
    fn test_default_pair_and_lookup() {
        assert_eq!(UnitCategory::Length.default_pair(), ("meter", "kilometer"));
        assert_eq!(UnitCategory::of_unit("cup-us"), Some(UnitCategory::Volume));
        assert_eq!(UnitCategory::of_unit("furlong"), None);
        assert_eq!(UnitCategory::parse("MASS"), Some(UnitCategory::Mass));
    }

    #[test]
    fn test_every_pair_round_trips() {
        for category in UnitCategory::ALL {
            for from in category.unit_names() {
                for to in category.unit_names() {
                    let there = convert(category, 123.456, from, to).unwrap();
                    let back = convert(category, there, to, from).unwrap();
                    assert!((back - 123.456).abs() < 1e-9, "{category}: {from} -> {to}");
                }
            }
        }
    }

    proptest! {
        #[test]
        fn prop_round_trip_within_tolerance(value in -1.0e6f64..1.0e6, cat in 0usize..3, i in 0usize..8, j in 0usize..8) {
            let category = UnitCategory::ALL[cat];
            let units = category.units();
            let from = units[i % units.len()].0;
            let to = units[j % units.len()].0;
            let there = convert(category, value, from, to).unwrap();
            let back = convert(category, there, to, from).unwrap();
            prop_assert!((back - value).abs() <= 1e-9 * value.abs().max(1.0));
        }
    }
}
