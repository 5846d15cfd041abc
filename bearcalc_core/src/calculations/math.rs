//! # Math & Statistics Calculators
//!
//! Standard score, grade point average and the three everyday percentage
//! questions.

use serde::{Deserialize, Serialize};

use super::{Calculation, Report};
use crate::errors::{require_finite, require_non_zero, CalcResult};
use crate::form::{parse_number, FormState};
use crate::format::{fixed, trimmed, ReportLine, SENTINEL};
use crate::registry::CalculatorId;

/// Letter grades on the 4.0 scale.
pub const GRADE_POINTS: [(&str, f64); 11] = [
    ("A", 4.0),
    ("A-", 3.7),
    ("B+", 3.3),
    ("B", 3.0),
    ("B-", 2.7),
    ("C+", 2.3),
    ("C", 2.0),
    ("C-", 1.7),
    ("D+", 1.3),
    ("D", 1.0),
    ("F", 0.0),
];

/// Grade points for a letter grade, case-insensitive.
pub fn grade_points(grade: &str) -> Option<f64> {
    let grade = grade.trim().to_ascii_uppercase();
    GRADE_POINTS
        .iter()
        .find(|(letter, _)| *letter == grade)
        .map(|(_, points)| *points)
}

// ============================================================================
// Z-Score
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZScoreInput {
    pub raw_score: f64,
    pub mean: f64,
    pub std_dev: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ZScoreResult {
    /// `None` when the inputs do not define a score
    pub z_score: Option<f64>,
}

impl Calculation for ZScoreInput {
    type Output = ZScoreResult;
    const ID: CalculatorId = CalculatorId::ZScore;

    fn from_form(form: &FormState) -> Self {
        ZScoreInput {
            raw_score: form.number("raw_score"),
            mean: form.number("mean"),
            std_dev: form.number("std_dev"),
        }
    }

    fn validate(&self) -> CalcResult<()> {
        require_finite("raw_score", self.raw_score)?;
        require_finite("mean", self.mean)?;
        require_non_zero("std_dev", self.std_dev)?;
        Ok(())
    }

    fn compute(&self) -> ZScoreResult {
        ZScoreResult {
            z_score: Some((self.raw_score - self.mean) / self.std_dev),
        }
    }
}

impl Report for ZScoreResult {
    fn report(&self, _sym: &str) -> Vec<ReportLine> {
        match self.z_score {
            Some(z) => {
                let z = fixed(z, 4);
                vec![
                    ReportLine::new("Z-Score", z.clone()),
                    ReportLine::new("Interpretation", format!("{z} standard deviations from the mean")),
                ]
            }
            None => vec![ReportLine::new("Z-Score", SENTINEL)],
        }
    }
}

// ============================================================================
// GPA
// ============================================================================

/// One course line. Unreadable credits or unknown grades are kept here and
/// skipped when averaging.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub name: String,
    pub credits: f64,
    pub grade: String,
}

impl Course {
    /// Parse `name:credits:grade` or `credits:grade`.
    pub fn parse(entry: &str) -> Option<Self> {
        let mut parts = entry.rsplitn(3, ':');
        let grade = parts.next()?.trim();
        let credits = parts.next()?;
        let name = parts.next().unwrap_or("").trim();
        Some(Course {
            name: name.to_string(),
            credits: parse_number(credits),
            grade: grade.to_ascii_uppercase(),
        })
    }

    /// Weighted points and credits, if the course counts toward the GPA.
    pub fn weighted(&self) -> Option<(f64, f64)> {
        let points = grade_points(&self.grade)?;
        if self.credits.is_finite() && self.credits > 0.0 {
            Some((points * self.credits, self.credits))
        } else {
            None
        }
    }
}

/// Parse a `;`-separated course list.
pub fn parse_courses(list: &str) -> Vec<Course> {
    list.split(';')
        .filter(|entry| !entry.trim().is_empty())
        .filter_map(Course::parse)
        .collect()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GpaInput {
    pub courses: Vec<Course>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GpaResult {
    pub gpa: f64,
    pub total_credits: f64,
    /// Courses that counted toward the average
    pub courses_counted: usize,
}

impl Calculation for GpaInput {
    type Output = GpaResult;
    const ID: CalculatorId = CalculatorId::Gpa;

    fn from_form(form: &FormState) -> Self {
        GpaInput {
            courses: parse_courses(form.text("courses")),
        }
    }

    // Invalid courses are skipped rather than rejected
    fn validate(&self) -> CalcResult<()> {
        Ok(())
    }

    fn compute(&self) -> GpaResult {
        let (points, credits, counted) = self
            .courses
            .iter()
            .filter_map(Course::weighted)
            .fold((0.0, 0.0, 0usize), |(p, c, n), (points, credits)| (p + points, c + credits, n + 1));

        GpaResult {
            gpa: if credits > 0.0 { points / credits } else { 0.0 },
            total_credits: credits,
            courses_counted: counted,
        }
    }
}

impl Report for GpaResult {
    fn report(&self, _sym: &str) -> Vec<ReportLine> {
        vec![
            ReportLine::new("Your GPA", fixed(self.gpa, 2)),
            ReportLine::new("Credits Counted", trimmed(self.total_credits, 2)),
        ]
    }
}

// ============================================================================
// Percentage
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PercentageInput {
    pub value_a: f64,
    pub value_b: f64,
}

/// Non-finite answers (division by zero) are kept as-is and shown as `—`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PercentageResult {
    /// A% of B
    pub percent_of: f64,
    /// A as a percentage of B
    pub ratio_percent: f64,
    /// Change from A to B (%)
    pub change_percent: f64,
}

impl Default for PercentageResult {
    fn default() -> Self {
        PercentageResult {
            percent_of: f64::NAN,
            ratio_percent: f64::NAN,
            change_percent: f64::NAN,
        }
    }
}

impl Calculation for PercentageInput {
    type Output = PercentageResult;
    const ID: CalculatorId = CalculatorId::Percentage;

    fn from_form(form: &FormState) -> Self {
        PercentageInput {
            value_a: form.number("value_a"),
            value_b: form.number("value_b"),
        }
    }

    fn validate(&self) -> CalcResult<()> {
        require_finite("value_a", self.value_a)?;
        require_finite("value_b", self.value_b)?;
        Ok(())
    }

    fn compute(&self) -> PercentageResult {
        let (a, b) = (self.value_a, self.value_b);
        PercentageResult {
            percent_of: a / 100.0 * b,
            ratio_percent: a / b * 100.0,
            change_percent: (b - a) / a * 100.0,
        }
    }
}

impl Report for PercentageResult {
    fn report(&self, _sym: &str) -> Vec<ReportLine> {
        let ratio = if self.ratio_percent.is_finite() {
            format!("{}%", trimmed(self.ratio_percent, 4))
        } else {
            SENTINEL.to_string()
        };
        let change = if self.change_percent.is_finite() {
            format!("{}%", trimmed(self.change_percent, 4))
        } else {
            SENTINEL.to_string()
        };
        vec![
            ReportLine::new("A% of B", trimmed(self.percent_of, 4)),
            ReportLine::new("A is what % of B", ratio),
            ReportLine::new("% change from A to B", change),
        ]
    }
}
