//! # Display Formatting
//!
//! Results are plain numbers; this module turns them into the strings a
//! reader sees. Zeroed or undefined values render as [`SENTINEL`] rather
//! than `0` or `NaN`, and unreachable targets render as [`INFINITE`].

use serde::{Deserialize, Serialize};

/// Shown in place of a zeroed or undefined result.
pub const SENTINEL: &str = "—";

/// Shown for never-reached results (payoff never happens, target never met).
pub const INFINITE: &str = "∞";

/// One labelled line of a calculator report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportLine {
    pub label: String,
    pub value: String,
}

impl ReportLine {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Group the integer digits of an already-formatted number with commas.
fn group_thousands(formatted: &str) -> String {
    let (sign, unsigned) = match formatted.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", formatted),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match frac_part {
        Some(f) => format!("{sign}{grouped}.{f}"),
        None => format!("{sign}{grouped}"),
    }
}

/// Fixed-decimal number with thousands separators: `1234.5` → `1,234.50`.
pub fn fixed(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return SENTINEL.to_string();
    }
    let rounded = format!("{:.*}", decimals, value);
    // "-0.00" reads as noise
    let rounded = if rounded.starts_with('-') && rounded[1..].chars().all(|c| c == '0' || c == '.') {
        rounded[1..].to_string()
    } else {
        rounded
    };
    group_thousands(&rounded)
}

/// Number with up to `max_decimals` fractional digits, trailing zeros trimmed.
///
/// `0.3048` with 6 → `0.3048`; `1609.34` with 0 → `1,609`.
pub fn trimmed(value: f64, max_decimals: usize) -> String {
    if !value.is_finite() {
        return SENTINEL.to_string();
    }
    let fixed = fixed(value, max_decimals);
    if fixed.contains('.') {
        fixed.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        fixed
    }
}

/// Currency amount: `1896.2` → `$1,896.20`, `-5` → `-$5.00`.
pub fn currency(value: f64, symbol: &str) -> String {
    if !value.is_finite() {
        return SENTINEL.to_string();
    }
    let body = fixed(value.abs(), 2);
    if value < 0.0 && body != "0.00" {
        format!("-{symbol}{body}")
    } else {
        format!("{symbol}{body}")
    }
}

/// Currency, or the sentinel when the value is not positive.
pub fn currency_or_sentinel(value: f64, symbol: &str) -> String {
    if value > 0.0 {
        currency(value, symbol)
    } else {
        SENTINEL.to_string()
    }
}

/// Fixed decimals, or the sentinel when the value is not positive.
pub fn positive_or_sentinel(value: f64, decimals: usize) -> String {
    if value > 0.0 && value.is_finite() {
        fixed(value, decimals)
    } else {
        SENTINEL.to_string()
    }
}

/// Fixed decimals, with `∞` for infinity.
pub fn fixed_or_infinite(value: f64, decimals: usize) -> String {
    if value.is_infinite() && value > 0.0 {
        INFINITE.to_string()
    } else {
        fixed(value, decimals)
    }
}

/// Percentage with a `%` suffix.
pub fn percent(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return SENTINEL.to_string();
    }
    format!("{}%", fixed(value, decimals))
}

/// Round to `digits` significant digits (as a calculator display would).
pub fn round_significant(value: f64, digits: i32) -> f64 {
    if value == 0.0 || !value.is_finite() {
        return value;
    }
    let magnitude = value.abs().log10().floor() as i32;
    let places = digits - 1 - magnitude;
    let scaled = if places >= 0 {
        let factor = 10f64.powi(places);
        (value * factor).round() / factor
    } else {
        let factor = 10f64.powi(-places);
        (value / factor).round() * factor
    };
    if scaled.is_finite() {
        return scaled;
    }
    // Very small magnitudes overflow the scale; format-and-parse instead
    format!("{:.*e}", (digits - 1).max(0) as usize, value)
        .parse()
        .unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_grouping() {
        assert_eq!(fixed(1234.5, 2), "1,234.50");
        assert_eq!(fixed(1234567.0, 0), "1,234,567");
        assert_eq!(fixed(999.0, 0), "999");
        assert_eq!(fixed(-1234.5, 1), "-1,234.5");
        assert_eq!(fixed(-0.001, 2), "0.00");
        assert_eq!(fixed(f64::NAN, 2), SENTINEL);
    }

    #[test]
    fn test_trimmed() {
        assert_eq!(trimmed(0.3048, 6), "0.3048");
        assert_eq!(trimmed(3.280839895013123, 6), "3.28084");
        assert_eq!(trimmed(2.0, 4), "2");
        assert_eq!(trimmed(1609.34, 0), "1,609");
    }

    #[test]
    fn test_currency() {
        assert_eq!(currency(1896.204, "$"), "$1,896.20");
        assert_eq!(currency(-5.0, "$"), "-$5.00");
        assert_eq!(currency(0.0, "€"), "€0.00");
        assert_eq!(currency(-0.001, "$"), "$0.00");
        assert_eq!(currency(f64::INFINITY, "$"), SENTINEL);
    }

    #[test]
    fn test_sentinels() {
        assert_eq!(currency_or_sentinel(0.0, "$"), SENTINEL);
        assert_eq!(positive_or_sentinel(-1.0, 1), SENTINEL);
        assert_eq!(positive_or_sentinel(19.429, 1), "19.4");
        assert_eq!(fixed_or_infinite(f64::INFINITY, 1), INFINITE);
        assert_eq!(fixed_or_infinite(12.567, 1), "12.6");
        assert_eq!(percent(50.0, 2), "50.00%");
    }

    #[test]
    fn test_round_significant() {
        assert_eq!(round_significant(0.1 + 0.2, 15), 0.3);
        assert_eq!(round_significant(1.0 / 3.0, 3), 0.333);
        assert_eq!(round_significant(123456.0, 2), 120000.0);
        assert_eq!(round_significant(0.0, 15), 0.0);
        assert!(round_significant(f64::NAN, 15).is_nan());
    }
}
