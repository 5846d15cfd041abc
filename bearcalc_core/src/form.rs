//! # Form State
//!
//! Every calculator is driven by a flat set of string-typed inputs, exactly
//! as typed into a form. [`FormState`] holds those strings and applies the
//! loose numeric parsing the calculators expect: a value like `"12.5%"`
//! reads as 12.5, `"abc"` reads as NaN, and the calculator's own guards
//! decide what NaN means.
//!
//! ## Example
//!
//! ```rust
//! use bearcalc_core::form::FormState;
//!
//! let form = FormState::new()
//!     .with("bill", "50")
//!     .with("people", "3 friends");
//!
//! assert_eq!(form.number("bill"), 50.0);
//! assert_eq!(form.integer("people"), 3.0);
//! assert!(form.number("tip_percent").is_nan());
//! ```

use std::collections::BTreeMap;

use chrono::{Months, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::registry::CalculatorDescriptor;

/// Default token resolved to the reference date.
pub const TODAY: &str = "today";

/// Default token resolved to one month after the reference date.
pub const TODAY_PLUS_ONE_MONTH: &str = "today+1m";

/// String key/value inputs for one calculator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormState {
    values: BTreeMap<String, String>,
}

impl FormState {
    /// Create an empty form.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a form with every field default declared by `descriptor`.
    ///
    /// Date tokens (`today`, `today+1m`) resolve against `today`.
    pub fn with_defaults(descriptor: &CalculatorDescriptor, today: NaiveDate) -> Self {
        let mut form = Self::new();
        for field in descriptor.fields {
            form.set(field.key, resolve_date_token(field.default, today));
        }
        form
    }

    /// Builder-style [`FormState::set`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Set a field, replacing any previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// Apply a `key=value` assignment.
    pub fn assign(&mut self, assignment: &str) -> CalcResult<()> {
        let (key, value) = assignment.split_once('=').ok_or_else(|| {
            CalcError::invalid_input("assignment", assignment, "Expected key=value")
        })?;
        let key = key.trim();
        if key.is_empty() {
            return Err(CalcError::invalid_input("assignment", assignment, "Field name is empty"));
        }
        self.set(key, value.trim());
        Ok(())
    }

    /// Raw string value, if present.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Raw string value, or `""` when absent.
    pub fn text(&self, key: &str) -> &str {
        self.get(key).unwrap_or("")
    }

    /// Field as a float, NaN when absent or unparseable.
    pub fn number(&self, key: &str) -> f64 {
        parse_number(self.text(key))
    }

    /// Field as a float, `0.0` when absent or unparseable (optional inputs).
    pub fn number_or_zero(&self, key: &str) -> f64 {
        let value = self.number(key);
        if value.is_nan() {
            0.0
        } else {
            value
        }
    }

    /// Field as a whole number (truncated toward zero), NaN when unparseable.
    pub fn integer(&self, key: &str) -> f64 {
        parse_integer(self.text(key))
    }

    /// Field as an ISO `YYYY-MM-DD` date.
    pub fn date(&self, key: &str) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.text(key).trim(), "%Y-%m-%d").ok()
    }

    /// Field as a 24-hour `HH:MM` time.
    pub fn time(&self, key: &str) -> Option<NaiveTime> {
        NaiveTime::parse_from_str(self.text(key).trim(), "%H:%M").ok()
    }

    /// Iterate over `(key, value)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

fn resolve_date_token(default: &str, today: NaiveDate) -> String {
    match default {
        TODAY => today.format("%Y-%m-%d").to_string(),
        TODAY_PLUS_ONE_MONTH => today
            .checked_add_months(Months::new(1))
            .unwrap_or(today)
            .format("%Y-%m-%d")
            .to_string(),
        other => other.to_string(),
    }
}

/// Parse the longest leading decimal number in `input`.
///
/// Leading whitespace is skipped; an optional sign, digits, one decimal
/// point and an exponent are accepted; trailing text is ignored. Returns NaN
/// when no digits are found.
///
/// ```rust
/// use bearcalc_core::form::parse_number;
///
/// assert_eq!(parse_number(" 6.5 %"), 6.5);
/// assert_eq!(parse_number("-.5"), -0.5);
/// assert_eq!(parse_number("1e3x"), 1000.0);
/// assert!(parse_number("$100").is_nan());
/// ```
pub fn parse_number(input: &str) -> f64 {
    let s = input.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }
    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - digits_start;
    if end < bytes.len() && bytes[end] == b'.' {
        end += 1;
        let frac_start = end;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
        digits += end - frac_start;
    }
    if digits == 0 {
        return f64::NAN;
    }

    // Exponent only counts when followed by at least one digit
    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+') | Some(b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse().unwrap_or(f64::NAN)
}

/// Parse the leading whole number in `input` (fractional part dropped).
pub fn parse_integer(input: &str) -> f64 {
    let value = parse_number(input);
    if value.is_finite() {
        value.trunc()
    } else {
        f64::NAN
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry;

    #[test]
    fn test_parse_number_prefixes() {
        assert_eq!(parse_number("42"), 42.0);
        assert_eq!(parse_number("  3.25kg"), 3.25);
        assert_eq!(parse_number("+7"), 7.0);
        assert_eq!(parse_number("5."), 5.0);
        assert_eq!(parse_number(".75"), 0.75);
        assert_eq!(parse_number("2e"), 2.0);
        assert_eq!(parse_number("2e-2"), 0.02);
        assert_eq!(parse_number("1,000"), 1.0);
    }

    #[test]
    fn test_parse_number_rejects() {
        assert!(parse_number("").is_nan());
        assert!(parse_number("   ").is_nan());
        assert!(parse_number("-").is_nan());
        assert!(parse_number(".").is_nan());
        assert!(parse_number("abc").is_nan());
    }

    #[test]
    fn test_parse_integer_truncates() {
        assert_eq!(parse_integer("30.9"), 30.0);
        assert_eq!(parse_integer("-2.5"), -2.0);
        assert!(parse_integer("x").is_nan());
    }

    #[test]
    fn test_assign() {
        let mut form = FormState::new();
        form.assign("interest_rate = 6.5").unwrap();
        assert_eq!(form.number("interest_rate"), 6.5);
        form.assign("note=a=b").unwrap();
        assert_eq!(form.text("note"), "a=b");
        assert!(form.assign("no-equals").is_err());
        assert!(form.assign("=5").is_err());
    }

    #[test]
    fn test_optional_numbers() {
        let form = FormState::new().with("down_payment", "");
        assert_eq!(form.number_or_zero("down_payment"), 0.0);
        assert_eq!(form.number_or_zero("missing"), 0.0);
    }

    #[test]
    fn test_dates_and_times() {
        let form = FormState::new()
            .with("start", "2024-02-29")
            .with("clock_in", "09:30")
            .with("bad", "29/02/2024");
        assert_eq!(form.date("start"), NaiveDate::from_ymd_opt(2024, 2, 29));
        assert_eq!(form.time("clock_in"), NaiveTime::from_hms_opt(9, 30, 0));
        assert_eq!(form.date("bad"), None);
    }

    #[test]
    fn test_with_defaults_resolves_date_tokens() {
        let today = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();
        let descriptor = registry::find("date-calculator").unwrap();
        let form = FormState::with_defaults(descriptor, today);
        assert_eq!(form.text("start_date"), "2025-01-31");
        // Month arithmetic clamps to the last day of February
        assert_eq!(form.text("end_date"), "2025-02-28");
    }

    #[test]
    fn test_with_defaults_seeds_every_field() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        for descriptor in registry::all() {
            let form = FormState::with_defaults(descriptor, today);
            for field in descriptor.fields {
                assert!(form.get(field.key).is_some(), "{}: {}", descriptor.id, field.key);
            }
        }
    }
}
