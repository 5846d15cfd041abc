//! # Standard / Scientific Keypad
//!
//! A pocket-calculator state machine. Binary operators chain left to right
//! (`2 + 3 × 4 =` gives 20), unary functions act on the displayed value,
//! and every computed result is rounded to 15 significant digits before it
//! is shown. Trigonometric functions take degrees.
//!
//! ## Key sequences
//!
//! A sequence is whitespace-separated keys. Named keys (`sin`, `sqrt`,
//! `clear`, ...) must stand alone; digits and single-character keys may run
//! together:
//!
//! ```rust
//! use bearcalc_core::calculations::Keypad;
//!
//! let mut keypad = Keypad::new();
//! keypad.press_sequence("12+7=").unwrap();
//! assert_eq!(keypad.display(), "19");
//!
//! keypad.press_sequence("C 9 sqrt").unwrap();
//! assert_eq!(keypad.display(), "3");
//! ```

use std::f64::consts::{E, PI};

use serde::{Deserialize, Serialize};

use super::{Calculation, Report};
use crate::errors::{CalcError, CalcResult};
use crate::form::{parse_number, FormState};
use crate::format::{round_significant, ReportLine};
use crate::registry::CalculatorId;

/// Significant digits kept on the display
pub const DISPLAY_PRECISION: i32 = 15;

/// Shown when a function has no finite result (√−1, log 0, ...)
pub const ERROR_DISPLAY: &str = "Error";

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
    /// xʸ
    Power,
}

impl Operator {
    pub fn apply(&self, first: f64, second: f64) -> f64 {
        match self {
            Operator::Add => first + second,
            Operator::Subtract => first - second,
            Operator::Multiply => first * second,
            Operator::Divide => first / second,
            Operator::Power => first.powf(second),
        }
    }
}

/// Unary functions and constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Function {
    Sqrt,
    Square,
    Sin,
    Cos,
    Tan,
    Log,
    Ln,
    Pi,
    E,
}

impl Function {
    pub fn apply(&self, value: f64) -> f64 {
        match self {
            Function::Sqrt => value.sqrt(),
            Function::Square => value * value,
            Function::Sin => value.to_radians().sin(),
            Function::Cos => value.to_radians().cos(),
            Function::Tan => value.to_radians().tan(),
            Function::Log => value.log10(),
            Function::Ln => value.ln(),
            Function::Pi => PI,
            Function::E => E,
        }
    }
}

/// One key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Key {
    Digit(u8),
    Decimal,
    Operator(Operator),
    Equals,
    Clear,
    ToggleSign,
    Percent,
    Function(Function),
}

impl Key {
    /// Parse a single key name or symbol.
    pub fn parse(token: &str) -> Option<Self> {
        let lower = token.trim().to_lowercase();
        let key = match lower.as_str() {
            d if d.len() == 1 && d.as_bytes()[0].is_ascii_digit() => Key::Digit(d.as_bytes()[0] - b'0'),
            "." => Key::Decimal,
            "+" => Key::Operator(Operator::Add),
            "-" | "−" => Key::Operator(Operator::Subtract),
            "*" | "×" | "x" => Key::Operator(Operator::Multiply),
            "/" | "÷" => Key::Operator(Operator::Divide),
            "^" | "xʸ" | "pow" => Key::Operator(Operator::Power),
            "=" => Key::Equals,
            "c" | "ac" | "clear" => Key::Clear,
            "±" | "+/-" | "neg" => Key::ToggleSign,
            "%" => Key::Percent,
            "√" | "sqrt" => Key::Function(Function::Sqrt),
            "x²" | "sq" | "square" => Key::Function(Function::Square),
            "sin" => Key::Function(Function::Sin),
            "cos" => Key::Function(Function::Cos),
            "tan" => Key::Function(Function::Tan),
            "log" => Key::Function(Function::Log),
            "ln" => Key::Function(Function::Ln),
            "π" | "pi" => Key::Function(Function::Pi),
            "e" => Key::Function(Function::E),
            _ => return None,
        };
        Some(key)
    }
}

/// Split a key sequence into keys.
pub fn tokenize(sequence: &str) -> CalcResult<Vec<Key>> {
    let mut keys = Vec::new();
    for word in sequence.split_whitespace() {
        if let Some(key) = Key::parse(word) {
            keys.push(key);
            continue;
        }
        let mut buf = [0u8; 4];
        for ch in word.chars() {
            let key = Key::parse(ch.encode_utf8(&mut buf))
                .ok_or_else(|| CalcError::invalid_input("keys", word, format!("Unknown key '{ch}'")))?;
            keys.push(key);
        }
    }
    Ok(keys)
}

/// Format a number the way the display shows it.
///
/// Shortest round-trip digits; exponent form outside `[1e-6, 1e21)`;
/// `-0` shows as `0`.
fn format_display(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        let text = if value > 0.0 { "Infinity" } else { "-Infinity" };
        return text.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }
    let magnitude = value.abs();
    if magnitude >= 1e21 || magnitude < 1e-6 {
        let formatted = format!("{value:e}");
        match formatted.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => format!("{mantissa}e+{exponent}"),
            _ => formatted,
        }
    } else {
        value.to_string()
    }
}

/// Calculator keypad state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keypad {
    display: String,
    first_operand: Option<f64>,
    operator: Option<Operator>,
    waiting_for_operand: bool,
}

impl Default for Keypad {
    fn default() -> Self {
        Keypad {
            display: "0".to_string(),
            first_operand: None,
            operator: None,
            waiting_for_operand: false,
        }
    }
}

impl Keypad {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current display text.
    pub fn display(&self) -> &str {
        &self.display
    }

    /// Numeric value of the display (NaN for `Error`).
    pub fn value(&self) -> f64 {
        match self.display.as_str() {
            "Infinity" => f64::INFINITY,
            "-Infinity" => f64::NEG_INFINITY,
            text => parse_number(text),
        }
    }

    /// Operator waiting for its second operand, if any.
    pub fn pending_operator(&self) -> Option<Operator> {
        self.operator
    }

    fn show_result(&mut self, value: f64) {
        self.display = format_display(round_significant(value, DISPLAY_PRECISION));
    }

    pub fn press(&mut self, key: Key) {
        match key {
            Key::Digit(d) => {
                let digit = char::from(b'0' + d.min(9));
                if self.waiting_for_operand {
                    self.display = digit.to_string();
                    self.waiting_for_operand = false;
                } else if self.display == "0" {
                    self.display = digit.to_string();
                } else {
                    self.display.push(digit);
                }
            }
            Key::Decimal => {
                if self.waiting_for_operand {
                    self.display = "0.".to_string();
                    self.waiting_for_operand = false;
                } else if !self.display.contains('.') {
                    self.display.push('.');
                }
            }
            Key::Operator(next) => {
                let input = self.value();
                match (self.operator, self.first_operand) {
                    (Some(op), Some(first)) if !self.waiting_for_operand => {
                        let result = op.apply(first, input);
                        self.show_result(result);
                        self.first_operand = Some(result);
                    }
                    _ => self.first_operand = Some(input),
                }
                self.waiting_for_operand = true;
                self.operator = Some(next);
            }
            Key::Equals => {
                if let (Some(op), Some(first)) = (self.operator, self.first_operand) {
                    let result = op.apply(first, self.value());
                    self.show_result(result);
                    self.first_operand = None;
                    self.operator = None;
                    self.waiting_for_operand = true;
                }
            }
            Key::Clear => *self = Keypad::default(),
            Key::ToggleSign => self.display = format_display(-self.value()),
            Key::Percent => self.display = format_display(self.value() / 100.0),
            Key::Function(function) => {
                let result = function.apply(self.value());
                if result.is_finite() {
                    self.show_result(result);
                } else {
                    self.display = ERROR_DISPLAY.to_string();
                }
                self.waiting_for_operand = true;
            }
        }
    }

    pub fn press_all(&mut self, keys: &[Key]) {
        for key in keys {
            self.press(*key);
        }
    }

    /// Tokenize and replay a key sequence.
    pub fn press_sequence(&mut self, sequence: &str) -> CalcResult<()> {
        let keys = tokenize(sequence)?;
        tracing::trace!(keys = keys.len(), "replaying key sequence");
        self.press_all(&keys);
        Ok(())
    }
}

// ============================================================================
// Calculator entry
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeypadInput {
    /// Key sequence, replayed from a cleared keypad
    pub keys: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeypadResult {
    pub display: String,
    /// `None` when the display is not a finite number
    pub value: Option<f64>,
}

impl Default for KeypadResult {
    fn default() -> Self {
        KeypadResult {
            display: "0".to_string(),
            value: Some(0.0),
        }
    }
}

impl Calculation for KeypadInput {
    type Output = KeypadResult;
    const ID: CalculatorId = CalculatorId::Scientific;

    fn from_form(form: &FormState) -> Self {
        KeypadInput {
            keys: form.text("keys").to_string(),
        }
    }

    fn validate(&self) -> CalcResult<()> {
        tokenize(&self.keys).map(|_| ())
    }

    fn compute(&self) -> KeypadResult {
        let mut keypad = Keypad::new();
        if let Ok(keys) = tokenize(&self.keys) {
            keypad.press_all(&keys);
        }
        let value = keypad.value();
        KeypadResult {
            display: keypad.display().to_string(),
            value: value.is_finite().then_some(value),
        }
    }
}

impl Report for KeypadResult {
    fn report(&self, _sym: &str) -> Vec<ReportLine> {
        vec![ReportLine::new("Display", self.display.clone())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(sequence: &str) -> String {
        let mut keypad = Keypad::new();
        keypad.press_sequence(sequence).unwrap();
        keypad.display().to_string()
    }

    #[test]
    fn test_basic_arithmetic() {
        assert_eq!(run("1 2 + 7 ="), "19");
        assert_eq!(run("12+7="), "19");
        assert_eq!(run("9 ÷ 4 ="), "2.25");
        assert_eq!(run("3 - 5 ="), "-2");
        assert_eq!(run("2 ^ 10 ="), "1024");
    }

    #[test]
    fn test_rounds_to_fifteen_digits() {
        assert_eq!(run("0.1 + 0.2 ="), "0.3");
        assert_eq!(run("pi"), "3.14159265358979");
        assert_eq!(run("45 tan"), "1");
    }

    #[test]
    fn test_operators_chain_left_to_right() {
        assert_eq!(run("2 + 3 * 4 ="), "20");
        // intermediate result shows when the next operator is pressed
        assert_eq!(run("2 + 3 *"), "5");
    }

    #[test]
    fn test_digit_after_equals_starts_fresh() {
        assert_eq!(run("2 + 2 = 7"), "7");
        assert_eq!(run("2 + 2 = ."), "0.");
    }

    #[test]
    fn test_decimal_point_once() {
        assert_eq!(run("1 . . 5"), "1.5");
        assert_eq!(run("0 0 7"), "7");
    }

    #[test]
    fn test_sign_and_percent() {
        assert_eq!(run("5 neg"), "-5");
        assert_eq!(run("0 ±"), "0");
        assert_eq!(run("5 %"), "0.05");
    }

    #[test]
    fn test_scientific_functions() {
        assert_eq!(run("9 sqrt"), "3");
        assert_eq!(run("1.5 x²"), "2.25");
        assert_eq!(run("90 sin"), "1");
        assert_eq!(run("60 cos"), "0.5");
        assert_eq!(run("1000 log"), "3");
        assert_eq!(run("e ln"), "1");
    }

    #[test]
    fn test_function_applies_to_second_operand() {
        assert_eq!(run("2 + 9 sqrt ="), "5");
    }

    #[test]
    fn test_non_finite_function_shows_error() {
        assert_eq!(run("1 neg sqrt"), ERROR_DISPLAY);
        assert_eq!(run("0 log"), ERROR_DISPLAY);
        // next digit replaces the error
        assert_eq!(run("0 ln 4"), "4");
    }

    #[test]
    fn test_division_by_zero() {
        assert_eq!(run("1 / 0 ="), "Infinity");
        let mut keypad = Keypad::new();
        keypad.press_sequence("1 / 0 =").unwrap();
        assert!(keypad.value().is_infinite());
    }

    #[test]
    fn test_large_results_use_exponent() {
        assert_eq!(format_display(1e21), "1e+21");
        assert_eq!(format_display(1.5e-7), "1.5e-7");
        assert_eq!(format_display(123456.0), "123456");
        assert_eq!(format_display(-0.0), "0");
    }

    #[test]
    fn test_clear_resets() {
        let mut keypad = Keypad::new();
        keypad.press_sequence("7 +").unwrap();
        assert_eq!(keypad.pending_operator(), Some(Operator::Add));
        keypad.press(Key::Clear);
        assert_eq!(keypad, Keypad::default());
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(tokenize("2 + banana").is_err());
        let input = KeypadInput { keys: "2 ? 3".into() };
        assert!(input.calculate().is_err());
        assert_eq!(input.evaluate().display, "0");
    }

    #[test]
    fn test_keypad_calculation() {
        let result = KeypadInput { keys: "6 * 7 =".into() }.calculate().unwrap();
        assert_eq!(result.display, "42");
        assert_eq!(result.value, Some(42.0));
        assert_eq!(KeypadInput { keys: String::new() }.calculate().unwrap(), KeypadResult::default());
    }
}
