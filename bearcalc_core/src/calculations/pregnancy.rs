//! # Pregnancy Due Date
//!
//! Naegele's rule: first day of the last menstrual period (LMP) plus seven
//! days, minus three months, plus one year. Month steps use calendar
//! arithmetic that clamps to the last day of a shorter month.

use chrono::{Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use super::{Calculation, Report};
use crate::errors::{CalcError, CalcResult};
use crate::form::FormState;
use crate::format::{ReportLine, SENTINEL};
use crate::registry::CalculatorId;

/// Full-term pregnancy length counted from the LMP.
pub const GESTATION_DAYS: i64 = 280;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PregnancyInput {
    /// First day of the last menstrual period
    pub lmp_date: Option<NaiveDate>,
    /// Date gestational age is measured at
    pub as_of: Option<NaiveDate>,
}

/// Completed weeks plus remaining days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GestationalAge {
    pub weeks: i64,
    pub days: i64,
}

impl GestationalAge {
    pub fn from_days(total: i64) -> Self {
        GestationalAge {
            weeks: total / 7,
            days: total % 7,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PregnancyResult {
    pub due_date: Option<NaiveDate>,
    /// `None` without a reference date or when it precedes the LMP
    pub gestational_age: Option<GestationalAge>,
    /// Days from the reference date until the due date
    pub days_remaining: Option<i64>,
}

/// Due date by Naegele's rule.
pub fn naegele_due_date(lmp: NaiveDate) -> Option<NaiveDate> {
    lmp.checked_add_days(Days::new(7))?
        .checked_sub_months(Months::new(3))?
        .checked_add_months(Months::new(12))
}

impl Calculation for PregnancyInput {
    type Output = PregnancyResult;
    const ID: CalculatorId = CalculatorId::PregnancyDueDate;

    fn from_form(form: &FormState) -> Self {
        PregnancyInput {
            lmp_date: form.date("lmp_date"),
            as_of: form.date("as_of"),
        }
    }

    fn validate(&self) -> CalcResult<()> {
        let lmp = self
            .lmp_date
            .ok_or_else(|| CalcError::invalid_input("lmp_date", "", "Expected a date (YYYY-MM-DD)"))?;
        if naegele_due_date(lmp).is_none() {
            return Err(CalcError::calculation_failed(Self::ID.slug(), "Due date is out of range"));
        }
        Ok(())
    }

    fn compute(&self) -> PregnancyResult {
        let Some(lmp) = self.lmp_date else {
            return PregnancyResult::default();
        };
        let due_date = naegele_due_date(lmp);
        let elapsed = self
            .as_of
            .map(|as_of| (as_of - lmp).num_days())
            .filter(|days| *days >= 0);

        PregnancyResult {
            due_date,
            gestational_age: elapsed.map(GestationalAge::from_days),
            days_remaining: match (due_date, self.as_of) {
                (Some(due), Some(as_of)) => Some((due - as_of).num_days()),
                _ => None,
            },
        }
    }
}

impl Report for PregnancyResult {
    fn report(&self, _sym: &str) -> Vec<ReportLine> {
        let due = self
            .due_date
            .map(|d| d.format("%B %-d, %Y").to_string())
            .unwrap_or_else(|| SENTINEL.to_string());
        let age = self
            .gestational_age
            .map(|age| format!("{} weeks, {} days", age.weeks, age.days))
            .unwrap_or_else(|| SENTINEL.to_string());
        let remaining = match self.days_remaining {
            Some(days) if days >= 0 => format!("{days} days"),
            _ => SENTINEL.to_string(),
        };
        vec![
            ReportLine::new("Estimated Due Date", due),
            ReportLine::new("Gestational Age", age),
            ReportLine::new("Days Until Due Date", remaining),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_naegele_is_280_days_for_regular_months() {
        let lmp = date(2025, 1, 1);
        let due = naegele_due_date(lmp).unwrap();
        assert_eq!(due, date(2025, 10, 8));
        assert_eq!((due - lmp).num_days(), GESTATION_DAYS);
    }

    #[test]
    fn test_naegele_clamps_short_months() {
        // May 24 + 7 = May 31; three months back clamps to Feb 28
        assert_eq!(naegele_due_date(date(2025, 5, 24)), Some(date(2026, 2, 28)));
    }

    #[test]
    fn test_gestational_age() {
        let input = PregnancyInput {
            lmp_date: Some(date(2025, 1, 1)),
            as_of: Some(date(2025, 3, 15)),
        };
        let result = input.calculate().unwrap();
        // 73 days
        assert_eq!(result.gestational_age, Some(GestationalAge { weeks: 10, days: 3 }));
        assert_eq!(result.days_remaining, Some(207));
        let lines = result.report("$");
        assert_eq!(lines[0].value, "October 8, 2025");
        assert_eq!(lines[1].value, "10 weeks, 3 days");
    }

    #[test]
    fn test_reference_before_lmp_has_no_age() {
        let input = PregnancyInput {
            lmp_date: Some(date(2025, 6, 1)),
            as_of: Some(date(2025, 5, 1)),
        };
        let result = input.calculate().unwrap();
        assert_eq!(result.gestational_age, None);
        assert!(result.due_date.is_some());
    }

    #[test]
    fn test_due_date_out_of_range() {
        let input = PregnancyInput {
            lmp_date: Some(NaiveDate::MAX),
            as_of: None,
        };
        match input.calculate() {
            Err(CalcError::CalculationFailed { calculation_type, .. }) => {
                assert_eq!(calculation_type, "pregnancy-due-date-calculator")
            }
            other => panic!("unexpected: {:?}", other),
        }
        assert_eq!(input.evaluate(), PregnancyResult::default());
    }

    #[test]
    fn test_missing_lmp() {
        let input = PregnancyInput::from_form(&FormState::new().with("lmp_date", "soon"));
        assert!(input.calculate().is_err());
        let result = input.evaluate();
        assert_eq!(result, PregnancyResult::default());
        assert_eq!(result.report("$")[0].value, SENTINEL);
    }
}
