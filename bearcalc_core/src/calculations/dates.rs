//! # Date & Time Calculators
//!
//! Calendar arithmetic with [`chrono`] dates (no time zones involved) and a
//! single-shift time card.

use std::fmt;

use chrono::{Days, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use super::{Calculation, Report};
use crate::errors::{require_finite, CalcError, CalcResult};
use crate::form::FormState;
use crate::format::{fixed, ReportLine, SENTINEL};
use crate::registry::CalculatorId;

fn require_date(field: &str, date: Option<NaiveDate>) -> CalcResult<NaiveDate> {
    date.ok_or_else(|| CalcError::invalid_input(field, "", "Expected a date (YYYY-MM-DD)"))
}

fn require_time(field: &str, time: Option<NaiveTime>) -> CalcResult<NaiveTime> {
    time.ok_or_else(|| CalcError::invalid_input(field, "", "Expected a time (HH:MM)"))
}

// ============================================================================
// Date Calculator
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DateMode {
    /// Days between two dates
    #[default]
    Duration,
    /// Date plus or minus a number of days
    AddSubtract,
}

impl DateMode {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "duration" => Some(DateMode::Duration),
            "add-subtract" | "add_subtract" | "add" => Some(DateMode::AddSubtract),
            _ => None,
        }
    }
}

impl fmt::Display for DateMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateMode::Duration => write!(f, "duration"),
            DateMode::AddSubtract => write!(f, "add-subtract"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateOperation {
    #[default]
    Add,
    Subtract,
}

impl DateOperation {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "add" | "+" => Some(DateOperation::Add),
            "subtract" | "sub" | "-" => Some(DateOperation::Subtract),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DateInput {
    pub mode: Option<DateMode>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub from_date: Option<NaiveDate>,
    /// Whole days
    pub days: f64,
    pub operation: Option<DateOperation>,
}

impl DateInput {
    /// `from_date` shifted by `days`, if representable.
    pub fn shifted(&self) -> Option<NaiveDate> {
        let from = self.from_date?;
        if !self.days.is_finite() || self.days.abs() > u32::MAX as f64 {
            return None;
        }
        let subtract = (self.operation? == DateOperation::Subtract) != (self.days < 0.0);
        let days = Days::new(self.days.abs() as u64);
        if subtract {
            from.checked_sub_days(days)
        } else {
            from.checked_add_days(days)
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DateResult {
    pub mode: DateMode,
    /// Absolute day difference (duration mode)
    pub days_between: Option<i64>,
    /// Shifted date (add/subtract mode)
    pub result_date: Option<NaiveDate>,
}

impl Calculation for DateInput {
    type Output = DateResult;
    const ID: CalculatorId = CalculatorId::Date;

    fn from_form(form: &FormState) -> Self {
        DateInput {
            mode: DateMode::parse(form.text("mode")),
            start_date: form.date("start_date"),
            end_date: form.date("end_date"),
            from_date: form.date("from_date"),
            days: form.integer("days"),
            operation: DateOperation::parse(form.text("operation")),
        }
    }

    fn validate(&self) -> CalcResult<()> {
        let mode = self
            .mode
            .ok_or_else(|| CalcError::invalid_input("mode", "", "Expected 'duration' or 'add-subtract'"))?;
        match mode {
            DateMode::Duration => {
                require_date("start_date", self.start_date)?;
                require_date("end_date", self.end_date)?;
            }
            DateMode::AddSubtract => {
                require_date("from_date", self.from_date)?;
                require_finite("days", self.days)?;
                if self.operation.is_none() {
                    return Err(CalcError::invalid_input("operation", "", "Expected 'add' or 'subtract'"));
                }
                if self.shifted().is_none() {
                    return Err(CalcError::calculation_failed(Self::ID.slug(), "Resulting date is out of range"));
                }
            }
        }
        Ok(())
    }

    fn compute(&self) -> DateResult {
        let mode = self.mode.unwrap_or_default();
        match mode {
            DateMode::Duration => DateResult {
                mode,
                days_between: match (self.start_date, self.end_date) {
                    (Some(start), Some(end)) => Some((end - start).num_days().abs()),
                    _ => None,
                },
                result_date: None,
            },
            DateMode::AddSubtract => DateResult {
                mode,
                days_between: None,
                result_date: self.shifted(),
            },
        }
    }
}

impl Report for DateResult {
    fn report(&self, _sym: &str) -> Vec<ReportLine> {
        match self.mode {
            DateMode::Duration => {
                let value = self
                    .days_between
                    .map(|days| format!("{} days", fixed(days as f64, 0)))
                    .unwrap_or_else(|| SENTINEL.to_string());
                vec![ReportLine::new("Duration", value)]
            }
            DateMode::AddSubtract => {
                let value = self
                    .result_date
                    .map(|d| d.format("%B %-d, %Y").to_string())
                    .unwrap_or_else(|| SENTINEL.to_string());
                vec![ReportLine::new("Resulting Date", value)]
            }
        }
    }
}

// ============================================================================
// Time Card
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeCardInput {
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    /// Unpaid break; 0 when not entered
    pub break_minutes: f64,
}

impl TimeCardInput {
    /// Worked minutes, if the shift is well-formed.
    pub fn worked_minutes(&self) -> Option<f64> {
        let (start, end) = (self.start_time?, self.end_time?);
        if end < start {
            return None;
        }
        let minutes = (end - start).num_minutes() as f64 - self.break_minutes;
        (minutes >= 0.0).then_some(minutes)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeCardResult {
    pub decimal_hours: f64,
    /// `HH:MM`
    pub hhmm: String,
}

impl Default for TimeCardResult {
    fn default() -> Self {
        TimeCardResult {
            decimal_hours: 0.0,
            hhmm: "00:00".to_string(),
        }
    }
}

impl Calculation for TimeCardInput {
    type Output = TimeCardResult;
    const ID: CalculatorId = CalculatorId::TimeCard;

    fn from_form(form: &FormState) -> Self {
        let break_minutes = form.integer("break_minutes");
        TimeCardInput {
            start_time: form.time("start_time"),
            end_time: form.time("end_time"),
            break_minutes: if break_minutes.is_nan() { 0.0 } else { break_minutes },
        }
    }

    fn validate(&self) -> CalcResult<()> {
        let start = require_time("start_time", self.start_time)?;
        let end = require_time("end_time", self.end_time)?;
        require_finite("break_minutes", self.break_minutes)?;
        if end < start {
            return Err(CalcError::invalid_input("end_time", end.format("%H:%M").to_string(), "End time is before start time"));
        }
        if self.worked_minutes().is_none() {
            return Err(CalcError::invalid_input(
                "break_minutes",
                self.break_minutes.to_string(),
                "Break is longer than the shift",
            ));
        }
        Ok(())
    }

    fn compute(&self) -> TimeCardResult {
        let Some(minutes) = self.worked_minutes() else {
            return TimeCardResult::default();
        };
        let hours = (minutes / 60.0).floor();
        let remainder = (minutes % 60.0).round();
        TimeCardResult {
            decimal_hours: minutes / 60.0,
            hhmm: format!("{:02}:{:02}", hours as i64, remainder as i64),
        }
    }
}

impl Report for TimeCardResult {
    fn report(&self, _sym: &str) -> Vec<ReportLine> {
        vec![
            ReportLine::new("Total Hours (decimal)", fixed(self.decimal_hours, 2)),
            ReportLine::new("Total Hours (HH:MM)", self.hhmm.clone()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    fn duration(start: Option<NaiveDate>, end: Option<NaiveDate>) -> DateInput {
        DateInput {
            mode: Some(DateMode::Duration),
            start_date: start,
            end_date: end,
            from_date: None,
            days: f64::NAN,
            operation: None,
        }
    }

    #[test]
    fn test_duration_is_absolute() {
        let forward = duration(date(2024, 1, 1), date(2024, 12, 31)).calculate().unwrap();
        assert_eq!(forward.days_between, Some(365));
        let backward = duration(date(2024, 12, 31), date(2024, 1, 1)).calculate().unwrap();
        assert_eq!(backward.days_between, Some(365));
        assert_eq!(forward.report("$")[0].value, "365 days");
    }

    #[test]
    fn test_duration_ignores_add_fields() {
        // add/subtract fields may be garbage in duration mode
        assert!(duration(date(2024, 1, 1), date(2024, 1, 2)).calculate().is_ok());
        assert!(duration(None, date(2024, 1, 2)).calculate().is_err());
    }

    fn shift(days: f64, operation: DateOperation) -> DateInput {
        DateInput {
            mode: Some(DateMode::AddSubtract),
            start_date: None,
            end_date: None,
            from_date: date(2025, 1, 31),
            days,
            operation: Some(operation),
        }
    }

    #[test]
    fn test_add_and_subtract_days() {
        let added = shift(30.0, DateOperation::Add).calculate().unwrap();
        assert_eq!(added.result_date, date(2025, 3, 2));
        assert_eq!(added.report("$")[0].value, "March 2, 2025");

        let subtracted = shift(31.0, DateOperation::Subtract).calculate().unwrap();
        assert_eq!(subtracted.result_date, date(2024, 12, 31));

        // negative days flip the operation
        let flipped = shift(-31.0, DateOperation::Add).calculate().unwrap();
        assert_eq!(flipped.result_date, date(2024, 12, 31));
    }

    #[test]
    fn test_add_out_of_range() {
        let input = shift(1e12, DateOperation::Add);
        match input.calculate() {
            Err(err) => assert_eq!(err.error_code(), "CALCULATION_FAILED"),
            Ok(result) => panic!("unexpected: {:?}", result),
        }
        assert_eq!(input.evaluate().result_date, None);
    }

    fn card(start: &str, end: &str, break_minutes: &str) -> TimeCardInput {
        let form = FormState::new()
            .with("start_time", start)
            .with("end_time", end)
            .with("break_minutes", break_minutes);
        TimeCardInput::from_form(&form)
    }

    #[test]
    fn test_time_card() {
        let result = card("09:00", "17:00", "30").calculate().unwrap();
        assert_eq!(result.decimal_hours, 7.5);
        assert_eq!(result.hhmm, "07:30");
        assert_eq!(result.report("$")[0].value, "7.50");
    }

    #[test]
    fn test_time_card_break_optional() {
        let result = card("08:15", "12:00", "").calculate().unwrap();
        assert_eq!(result.hhmm, "03:45");
        assert_eq!(result.decimal_hours, 3.75);
    }

    #[test]
    fn test_time_card_end_before_start_is_zero() {
        let input = card("17:00", "09:00", "0");
        assert!(input.calculate().is_err());
        assert_eq!(input.evaluate(), TimeCardResult::default());
    }

    #[test]
    fn test_time_card_break_longer_than_shift_is_zero() {
        let input = card("09:00", "09:20", "30");
        match input.calculate() {
            Err(CalcError::InvalidInput { field, .. }) => assert_eq!(field, "break_minutes"),
            other => panic!("unexpected: {:?}", other),
        }
        assert_eq!(input.evaluate().hhmm, "00:00");
    }
}
