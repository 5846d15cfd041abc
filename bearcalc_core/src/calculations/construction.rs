//! # Construction Calculators
//!
//! Material estimates for concrete pours and paint jobs, and roof pitch.
//!
//! ## Units
//!
//! Concrete dimensions mix feet (plan dimensions, column height) and inches
//! (slab thickness, column diameter); volumes are reported in cubic yards,
//! the unit ready-mix is ordered in.

use std::f64::consts::PI;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Calculation, Report};
use crate::errors::{require_finite, require_non_zero, require_positive, CalcError, CalcResult};
use crate::form::FormState;
use crate::format::{fixed, positive_or_sentinel, trimmed, ReportLine, SENTINEL};
use crate::registry::CalculatorId;
use crate::units::{Feet, Inches, CUBIC_FEET_PER_CUBIC_YARD};

// ============================================================================
// Concrete Volume
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConcreteShape {
    #[default]
    Slab,
    Column,
}

impl ConcreteShape {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "slab" => Some(ConcreteShape::Slab),
            "column" => Some(ConcreteShape::Column),
            _ => None,
        }
    }
}

impl fmt::Display for ConcreteShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConcreteShape::Slab => write!(f, "slab"),
            ConcreteShape::Column => write!(f, "column"),
        }
    }
}

/// Slab (length × width × thickness) or round column (diameter × height).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConcreteVolumeInput {
    pub shape: Option<ConcreteShape>,
    pub length: Feet,
    pub width: Feet,
    pub thickness: Inches,
    pub diameter: Inches,
    pub height: Feet,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConcreteVolumeResult {
    pub cubic_yards: f64,
    pub cubic_feet: f64,
}

impl Calculation for ConcreteVolumeInput {
    type Output = ConcreteVolumeResult;
    const ID: CalculatorId = CalculatorId::ConcreteVolume;

    fn from_form(form: &FormState) -> Self {
        ConcreteVolumeInput {
            shape: ConcreteShape::parse(form.text("shape")),
            length: Feet(form.number("length_ft")),
            width: Feet(form.number("width_ft")),
            thickness: Inches(form.number("thickness_in")),
            diameter: Inches(form.number("diameter_in")),
            height: Feet(form.number("height_ft")),
        }
    }

    fn validate(&self) -> CalcResult<()> {
        let shape = self
            .shape
            .ok_or_else(|| CalcError::invalid_input("shape", "", "Expected 'slab' or 'column'"))?;
        match shape {
            ConcreteShape::Slab => {
                require_positive("length_ft", self.length.value())?;
                require_positive("width_ft", self.width.value())?;
                require_positive("thickness_in", self.thickness.value())?;
            }
            ConcreteShape::Column => {
                require_positive("diameter_in", self.diameter.value())?;
                require_positive("height_ft", self.height.value())?;
            }
        }
        Ok(())
    }

    fn compute(&self) -> ConcreteVolumeResult {
        let cubic_feet = match self.shape.unwrap_or_default() {
            ConcreteShape::Slab => {
                self.length.value() * self.width.value() * Feet::from(self.thickness).value()
            }
            ConcreteShape::Column => {
                let radius = Feet::from(self.diameter).value() / 2.0;
                PI * radius * radius * self.height.value()
            }
        };
        ConcreteVolumeResult {
            cubic_yards: cubic_feet / CUBIC_FEET_PER_CUBIC_YARD,
            cubic_feet,
        }
    }
}

impl Report for ConcreteVolumeResult {
    fn report(&self, _sym: &str) -> Vec<ReportLine> {
        vec![
            ReportLine::new("Concrete Needed (cubic yards)", positive_or_sentinel(self.cubic_yards, 2)),
            ReportLine::new("Cubic Feet", positive_or_sentinel(self.cubic_feet, 2)),
        ]
    }
}

// ============================================================================
// Paint Coverage
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaintCoverageInput {
    /// Wall area (sq ft)
    pub total_area: f64,
    /// Whole number of coats
    pub coats: f64,
    /// sq ft one gallon covers
    pub coverage_per_gallon: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaintCoverageResult {
    pub gallons: f64,
    /// Whole one-gallon cans to buy
    pub cans: f64,
}

impl Calculation for PaintCoverageInput {
    type Output = PaintCoverageResult;
    const ID: CalculatorId = CalculatorId::PaintCoverage;

    fn from_form(form: &FormState) -> Self {
        PaintCoverageInput {
            total_area: form.number("total_area"),
            coats: form.integer("coats"),
            coverage_per_gallon: form.number("coverage_per_gallon"),
        }
    }

    fn validate(&self) -> CalcResult<()> {
        require_positive("total_area", self.total_area)?;
        require_positive("coats", self.coats)?;
        require_positive("coverage_per_gallon", self.coverage_per_gallon)?;
        Ok(())
    }

    fn compute(&self) -> PaintCoverageResult {
        let gallons = self.total_area * self.coats / self.coverage_per_gallon;
        PaintCoverageResult {
            gallons,
            cans: gallons.ceil(),
        }
    }
}

impl Report for PaintCoverageResult {
    fn report(&self, _sym: &str) -> Vec<ReportLine> {
        let cans = if self.cans > 0.0 {
            fixed(self.cans, 0)
        } else {
            SENTINEL.to_string()
        };
        vec![
            ReportLine::new("Paint Needed (gallons)", positive_or_sentinel(self.gallons, 2)),
            ReportLine::new("Gallon Cans to Buy", cans),
        ]
    }
}

// ============================================================================
// Roof Pitch
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoofPitchInput {
    pub rise: f64,
    pub run: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoofPitchResult {
    /// `rise:run` as entered
    pub pitch: String,
    /// Roof angle (degrees)
    pub angle: f64,
    /// Rise per 12 units of run
    pub pitch_per_12: f64,
}

impl Calculation for RoofPitchInput {
    type Output = RoofPitchResult;
    const ID: CalculatorId = CalculatorId::RoofPitch;

    fn from_form(form: &FormState) -> Self {
        RoofPitchInput {
            rise: form.number("rise"),
            run: form.number("run"),
        }
    }

    fn validate(&self) -> CalcResult<()> {
        require_finite("rise", self.rise)?;
        require_non_zero("run", self.run)?;
        Ok(())
    }

    fn compute(&self) -> RoofPitchResult {
        let slope = self.rise / self.run;
        RoofPitchResult {
            pitch: format!("{}:{}", self.rise, self.run),
            angle: slope.atan().to_degrees(),
            pitch_per_12: slope * 12.0,
        }
    }
}

impl Report for RoofPitchResult {
    fn report(&self, _sym: &str) -> Vec<ReportLine> {
        if self.pitch.is_empty() {
            return vec![
                ReportLine::new("Roof Pitch", "N/A"),
                ReportLine::new("Angle", SENTINEL),
                ReportLine::new("Pitch per 12", SENTINEL),
            ];
        }
        vec![
            ReportLine::new("Roof Pitch", self.pitch.clone()),
            ReportLine::new("Angle", format!("{}°", fixed(self.angle, 2))),
            ReportLine::new("Pitch per 12", format!("{}/12", trimmed(self.pitch_per_12, 2))),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slab() -> ConcreteVolumeInput {
        ConcreteVolumeInput {
            shape: Some(ConcreteShape::Slab),
            length: Feet(20.0),
            width: Feet(10.0),
            thickness: Inches(4.0),
            diameter: Inches(12.0),
            height: Feet(8.0),
        }
    }

    #[test]
    fn test_slab_volume() {
        let result = slab().calculate().unwrap();
        assert!((result.cubic_feet - 200.0 / 3.0).abs() < 1e-9);
        assert!((result.cubic_yards - 2.469).abs() < 0.001);
        assert_eq!(result.report("$")[0].value, "2.47");
    }

    #[test]
    fn test_column_volume() {
        let mut input = slab();
        input.shape = Some(ConcreteShape::Column);
        let result = input.calculate().unwrap();
        // r = 0.5 ft, h = 8 ft
        assert!((result.cubic_feet - 2.0 * PI).abs() < 1e-9);
        assert!((result.cubic_yards - 0.233).abs() < 0.001);
    }

    #[test]
    fn test_concrete_guards() {
        let mut input = slab();
        input.thickness = Inches(f64::NAN);
        assert!(input.calculate().is_err());
        assert_eq!(input.evaluate().report("$")[0].value, SENTINEL);

        // column ignores slab fields
        input.shape = Some(ConcreteShape::Column);
        assert!(input.calculate().is_ok());

        input.shape = None;
        assert!(input.calculate().is_err());
    }

    #[test]
    fn test_paint_coverage() {
        let result = PaintCoverageInput {
            total_area: 400.0,
            coats: 2.0,
            coverage_per_gallon: 350.0,
        }
        .calculate()
        .unwrap();
        assert!((result.gallons - 800.0 / 350.0).abs() < 1e-12);
        assert_eq!(result.cans, 3.0);
        assert_eq!(result.report("$")[0].value, "2.29");
    }

    #[test]
    fn test_paint_zero_coats() {
        let input = PaintCoverageInput {
            total_area: 400.0,
            coats: 0.0,
            coverage_per_gallon: 350.0,
        };
        assert!(input.calculate().is_err());
        assert_eq!(input.evaluate(), PaintCoverageResult::default());
    }

    #[test]
    fn test_roof_pitch() {
        let result = RoofPitchInput { rise: 6.0, run: 12.0 }.calculate().unwrap();
        assert_eq!(result.pitch, "6:12");
        assert!((result.angle - 26.565).abs() < 0.001);
        assert_eq!(result.pitch_per_12, 6.0);
        let lines = result.report("$");
        assert_eq!(lines[1].value, "26.57°");
        assert_eq!(lines[2].value, "6/12");
    }

    #[test]
    fn test_roof_zero_run() {
        let input = RoofPitchInput { rise: 6.0, run: 0.0 };
        assert!(input.calculate().is_err());
        assert_eq!(input.evaluate().report("$")[0].value, "N/A");
    }
}
