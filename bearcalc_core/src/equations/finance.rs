//! # Time-Value-of-Money Formulas
//!
//! Closed-form annuity, future value and period-solving equations shared by
//! the loan, savings and payoff calculators.
//!
//! ## Notation
//!
//! - `P` = Principal / present value
//! - `r` = Periodic interest rate (e.g. annual % / 100 / 12)
//! - `n` = Number of periods
//! - `PMT` = Level payment or contribution per period
//! - `F` = Target future value
//!
//! None of these functions validate their arguments. Callers run their
//! input guards first; outside those guards the functions may return NaN or
//! infinity.

/// Level payment that amortizes `principal` over `periods` at `rate`.
///
/// # Formula
/// ```text
/// PMT = P · r(1+r)ⁿ / ((1+r)ⁿ − 1)
/// ```
///
/// At `r = 0` the formula is 0/0; the limit `P / n` is returned instead.
#[inline]
pub fn amortized_payment(principal: f64, rate: f64, periods: f64) -> f64 {
    if rate == 0.0 {
        return principal / periods;
    }
    let growth = (1.0 + rate).powf(periods);
    principal * (rate * growth) / (growth - 1.0)
}

/// Future value of a single deposit compounded for `periods`.
///
/// # Formula
/// ```text
/// FV = P(1+r)ⁿ
/// ```
#[inline]
pub fn future_value_lump_sum(principal: f64, rate: f64, periods: f64) -> f64 {
    principal * (1.0 + rate).powf(periods)
}

/// Future value of a level contribution made at the end of every period.
///
/// # Formula
/// ```text
/// FV = PMT((1+r)ⁿ − 1) / r
/// ```
///
/// At `r = 0` the limit `PMT · n` is returned.
#[inline]
pub fn future_value_annuity(payment: f64, rate: f64, periods: f64) -> f64 {
    if rate == 0.0 {
        return payment * periods;
    }
    payment * ((1.0 + rate).powf(periods) - 1.0) / rate
}

/// Number of periods needed to pay off `balance` with level `payment`.
///
/// # Formula (NPER with FV = 0)
/// ```text
/// N = −ln(1 − P·r/PMT) / ln(1+r)
/// ```
///
/// Returns `f64::INFINITY` when the payment never covers the interest
/// (`PMT ≤ P·r`). At `r = 0` the limit `P / PMT` is returned.
#[inline]
pub fn payoff_periods(balance: f64, rate: f64, payment: f64) -> f64 {
    if payment <= balance * rate {
        return f64::INFINITY;
    }
    if rate == 0.0 {
        return balance / payment;
    }
    -(1.0 - balance * rate / payment).ln() / (1.0 + rate).ln()
}

/// Periods for savings `present` plus contributions `payment` to reach `target`.
///
/// Solves `PV(1+r)ⁿ + PMT((1+r)ⁿ − 1)/r = F` for `n`:
///
/// ```text
/// n = ln((PMT + F·r) / (PMT + PV·r)) / ln(1+r)
/// ```
///
/// - `PMT ≤ 0` → `f64::INFINITY` (never reached by saving)
/// - `r = 0` → `(F − PV) / PMT`
/// - Already reached → 0
#[inline]
pub fn periods_to_target(present: f64, payment: f64, target: f64, rate: f64) -> f64 {
    if payment <= 0.0 {
        return f64::INFINITY;
    }
    let periods = if rate == 0.0 {
        (target - present) / payment
    } else {
        let numerator = payment + target * rate;
        let denominator = payment + present * rate;
        if numerator <= 0.0 || denominator <= 0.0 {
            return f64::INFINITY;
        }
        (numerator / denominator).ln() / (1.0 + rate).ln()
    };
    if periods > 0.0 {
        periods
    } else {
        0.0
    }
}

/// Convert an annual percentage (e.g. `6.5`) to a monthly decimal rate.
#[inline]
pub fn monthly_rate(annual_percent: f64) -> f64 {
    annual_percent / 100.0 / 12.0
}
