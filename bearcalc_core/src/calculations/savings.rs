//! # Savings & Investing Calculators
//!
//! Growth of savings under monthly compounding, years to financial
//! independence, and dollar-cost averaging.

use serde::{Deserialize, Serialize};

use super::{Calculation, Report};
use crate::equations::{future_value_annuity, future_value_lump_sum, monthly_rate, periods_to_target};
use crate::errors::{require_finite, require_positive, CalcError, CalcResult};
use crate::form::{parse_number, FormState};
use crate::format::{currency, currency_or_sentinel, fixed, fixed_or_infinite, ReportLine, SENTINEL};
use crate::registry::CalculatorId;

/// Multiple of annual expenses that funds retirement (4% rule).
pub const FIRE_MULTIPLE: f64 = 25.0;

// ============================================================================
// Compound Interest
// ============================================================================

/// Input parameters for compound growth with monthly contributions.
///
/// Missing numbers read as zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompoundInterestInput {
    pub initial_investment: f64,
    pub monthly_contribution: f64,
    /// Whole years
    pub years: f64,
    /// Annual rate (%), compounded monthly
    pub annual_rate: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompoundInterestResult {
    pub future_value: f64,
    pub total_invested: f64,
    pub total_interest: f64,
}

impl Calculation for CompoundInterestInput {
    type Output = CompoundInterestResult;
    const ID: CalculatorId = CalculatorId::CompoundInterest;

    fn from_form(form: &FormState) -> Self {
        let years = form.integer("years");
        CompoundInterestInput {
            initial_investment: form.number_or_zero("initial_investment"),
            monthly_contribution: form.number_or_zero("monthly_contribution"),
            years: if years.is_nan() { 0.0 } else { years },
            annual_rate: form.number_or_zero("annual_rate"),
        }
    }

    fn validate(&self) -> CalcResult<()> {
        require_finite("initial_investment", self.initial_investment)?;
        require_finite("monthly_contribution", self.monthly_contribution)?;
        require_finite("years", self.years)?;
        require_finite("annual_rate", self.annual_rate)?;
        Ok(())
    }

    fn compute(&self) -> CompoundInterestResult {
        let principal = self.initial_investment;
        if self.years <= 0.0 {
            return CompoundInterestResult {
                future_value: principal,
                total_invested: principal,
                total_interest: 0.0,
            };
        }

        let rate = monthly_rate(self.annual_rate);
        let n = self.years * 12.0;
        let future_value = future_value_lump_sum(principal, rate, n)
            + future_value_annuity(self.monthly_contribution, rate, n);
        let total_invested = principal + self.monthly_contribution * n;

        CompoundInterestResult {
            future_value: future_value.max(0.0),
            total_invested: total_invested.max(0.0),
            total_interest: (future_value - total_invested).max(0.0),
        }
    }
}

impl Report for CompoundInterestResult {
    fn report(&self, sym: &str) -> Vec<ReportLine> {
        vec![
            ReportLine::new("Future Value", currency(self.future_value, sym)),
            ReportLine::new("Total Invested", currency(self.total_invested, sym)),
            ReportLine::new("Total Interest Earned", currency(self.total_interest, sym)),
        ]
    }
}

// ============================================================================
// Retirement Savings
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetirementInput {
    pub current_age: f64,
    pub retirement_age: f64,
    pub current_savings: f64,
    pub monthly_contribution: f64,
    /// Annual return (%), compounded monthly
    pub annual_rate: f64,
}

impl RetirementInput {
    pub fn years_to_retire(&self) -> f64 {
        self.retirement_age - self.current_age
    }
}

/// Projected balance at retirement.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RetirementResult {
    pub projected_savings: f64,
    pub total_contribution: f64,
    pub total_interest: f64,
}

impl Calculation for RetirementInput {
    type Output = RetirementResult;
    const ID: CalculatorId = CalculatorId::RetirementSavings;

    fn from_form(form: &FormState) -> Self {
        RetirementInput {
            current_age: form.integer("current_age"),
            retirement_age: form.integer("retirement_age"),
            current_savings: form.number("current_savings"),
            monthly_contribution: form.number("monthly_contribution"),
            annual_rate: form.number("annual_rate"),
        }
    }

    fn validate(&self) -> CalcResult<()> {
        require_finite("current_age", self.current_age)?;
        require_finite("retirement_age", self.retirement_age)?;
        require_finite("current_savings", self.current_savings)?;
        require_finite("monthly_contribution", self.monthly_contribution)?;
        require_finite("annual_rate", self.annual_rate)?;
        if self.retirement_age <= self.current_age {
            return Err(CalcError::invalid_input(
                "retirement_age",
                self.retirement_age.to_string(),
                "Retirement age must be after current age",
            ));
        }
        Ok(())
    }

    fn compute(&self) -> RetirementResult {
        let rate = monthly_rate(self.annual_rate);
        let n = self.years_to_retire() * 12.0;
        let projected_savings = future_value_lump_sum(self.current_savings, rate, n)
            + future_value_annuity(self.monthly_contribution, rate, n);
        let total_contribution = self.current_savings + self.monthly_contribution * n;

        RetirementResult {
            projected_savings,
            total_contribution,
            total_interest: projected_savings - total_contribution,
        }
    }
}

impl Report for RetirementResult {
    fn report(&self, sym: &str) -> Vec<ReportLine> {
        vec![
            ReportLine::new("Projected Savings at Retirement", currency(self.projected_savings, sym)),
            ReportLine::new("Total Contributions", currency(self.total_contribution, sym)),
            ReportLine::new("Total Interest Earned", currency(self.total_interest, sym)),
        ]
    }
}

// ============================================================================
// FIRE
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FireInput {
    pub annual_income: f64,
    pub annual_expenses: f64,
    pub current_savings: f64,
    /// Expected annual return (%), compounded yearly
    pub annual_return: f64,
}

impl FireInput {
    /// Yearly amount saved toward the target.
    pub fn annual_savings(&self) -> f64 {
        self.annual_income - self.annual_expenses
    }
}

/// FIRE target and time to reach it.
///
/// `years_to_fire` is infinite when nothing is saved each year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FireResult {
    pub fire_number: f64,
    pub years_to_fire: f64,
}

impl Default for FireResult {
    fn default() -> Self {
        FireResult {
            fire_number: 0.0,
            years_to_fire: f64::INFINITY,
        }
    }
}

impl Calculation for FireInput {
    type Output = FireResult;
    const ID: CalculatorId = CalculatorId::Fire;

    fn from_form(form: &FormState) -> Self {
        FireInput {
            annual_income: form.number("annual_income"),
            annual_expenses: form.number("annual_expenses"),
            current_savings: form.number("current_savings"),
            annual_return: form.number("annual_return"),
        }
    }

    fn validate(&self) -> CalcResult<()> {
        require_finite("annual_income", self.annual_income)?;
        require_positive("annual_expenses", self.annual_expenses)?;
        require_finite("current_savings", self.current_savings)?;
        require_finite("annual_return", self.annual_return)?;
        Ok(())
    }

    fn compute(&self) -> FireResult {
        let fire_number = self.annual_expenses * FIRE_MULTIPLE;
        FireResult {
            fire_number,
            years_to_fire: periods_to_target(
                self.current_savings,
                self.annual_savings(),
                fire_number,
                self.annual_return / 100.0,
            ),
        }
    }
}

impl Report for FireResult {
    fn report(&self, sym: &str) -> Vec<ReportLine> {
        let years = if self.fire_number > 0.0 {
            fixed_or_infinite(self.years_to_fire, 1)
        } else {
            SENTINEL.to_string()
        };
        vec![
            ReportLine::new("Your FIRE Number", currency_or_sentinel(self.fire_number, sym)),
            ReportLine::new("Years to FIRE", years),
        ]
    }
}

// ============================================================================
// Crypto DCA
// ============================================================================

/// Dollar-cost averaging: a fixed amount bought at each listed price.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CryptoDcaInput {
    /// Amount spent per purchase
    pub investment_amount: f64,
    /// Purchase prices; non-positive entries are ignored
    pub prices: Vec<f64>,
}

impl CryptoDcaInput {
    /// Parse a comma-separated price list, dropping unreadable and non-positive entries.
    pub fn parse_prices(list: &str) -> Vec<f64> {
        list.split(',')
            .map(parse_number)
            .filter(|p| p.is_finite() && *p > 0.0)
            .collect()
    }

    fn valid_prices(&self) -> impl Iterator<Item = f64> + '_ {
        self.prices.iter().copied().filter(|p| p.is_finite() && *p > 0.0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CryptoDcaResult {
    pub total_invested: f64,
    pub total_tokens: f64,
    pub average_cost: f64,
    pub number_of_investments: usize,
}

impl Calculation for CryptoDcaInput {
    type Output = CryptoDcaResult;
    const ID: CalculatorId = CalculatorId::CryptoDca;

    fn from_form(form: &FormState) -> Self {
        CryptoDcaInput {
            investment_amount: form.number("investment_amount"),
            prices: Self::parse_prices(form.text("prices")),
        }
    }

    fn validate(&self) -> CalcResult<()> {
        require_positive("investment_amount", self.investment_amount)?;
        if self.valid_prices().next().is_none() {
            return Err(CalcError::invalid_input("prices", "", "At least one positive price is required"));
        }
        Ok(())
    }

    fn compute(&self) -> CryptoDcaResult {
        let amount = self.investment_amount;
        let (count, total_tokens) = self
            .valid_prices()
            .fold((0usize, 0.0), |(count, tokens), price| (count + 1, tokens + amount / price));
        let total_invested = amount * count as f64;

        CryptoDcaResult {
            total_invested,
            total_tokens,
            average_cost: total_invested / total_tokens,
            number_of_investments: count,
        }
    }
}

impl Report for CryptoDcaResult {
    fn report(&self, sym: &str) -> Vec<ReportLine> {
        let tokens = if self.total_tokens > 0.0 {
            fixed(self.total_tokens, 6)
        } else {
            SENTINEL.to_string()
        };
        vec![
            ReportLine::new("Average Cost per Token", currency_or_sentinel(self.average_cost, sym)),
            ReportLine::new("Total Invested", currency(self.total_invested, sym)),
            ReportLine::new("Total Tokens Acquired", tokens),
            ReportLine::new("Number of Purchases", self.number_of_investments.to_string()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compound_interest_defaults() {
        let input = CompoundInterestInput {
            initial_investment: 10_000.0,
            monthly_contribution: 500.0,
            years: 10.0,
            annual_rate: 8.0,
        };
        let result = input.calculate().unwrap();
        assert!((result.future_value - 113_669.42).abs() < 0.01, "got {}", result.future_value);
        assert_eq!(result.total_invested, 70_000.0);
        assert!((result.total_interest - (result.future_value - 70_000.0)).abs() < 1e-6);
    }

    #[test]
    fn test_compound_interest_zero_years_keeps_principal() {
        let input = CompoundInterestInput {
            initial_investment: 2_500.0,
            monthly_contribution: 100.0,
            years: 0.0,
            annual_rate: 5.0,
        };
        let result = input.calculate().unwrap();
        assert_eq!(result.future_value, 2_500.0);
        assert_eq!(result.total_invested, 2_500.0);
        assert_eq!(result.total_interest, 0.0);
    }

    #[test]
    fn test_compound_interest_missing_fields_read_as_zero() {
        let form = FormState::new().with("initial_investment", "1000").with("years", "2");
        let input = CompoundInterestInput::from_form(&form);
        assert_eq!(input.monthly_contribution, 0.0);
        assert_eq!(input.annual_rate, 0.0);
        let result = input.calculate().unwrap();
        assert!((result.future_value - 1_000.0).abs() < 1e-9);
    }

    #[test]
    fn test_retirement_projection() {
        let input = RetirementInput {
            current_age: 30.0,
            retirement_age: 65.0,
            current_savings: 50_000.0,
            monthly_contribution: 500.0,
            annual_rate: 7.0,
        };
        let result = input.calculate().unwrap();
        assert_eq!(result.total_contribution, 50_000.0 + 500.0 * 420.0);
        assert!(result.projected_savings > result.total_contribution);
        assert!((result.total_interest - (result.projected_savings - result.total_contribution)).abs() < 1e-6);
    }

    #[test]
    fn test_retirement_zero_rate_is_contributions() {
        let input = RetirementInput {
            current_age: 40.0,
            retirement_age: 41.0,
            current_savings: 1_000.0,
            monthly_contribution: 100.0,
            annual_rate: 0.0,
        };
        let result = input.calculate().unwrap();
        assert!((result.projected_savings - 2_200.0).abs() < 1e-9);
        assert_eq!(result.total_interest, 0.0);
    }

    #[test]
    fn test_retirement_age_guard() {
        let input = RetirementInput {
            current_age: 65.0,
            retirement_age: 65.0,
            current_savings: 1.0,
            monthly_contribution: 1.0,
            annual_rate: 5.0,
        };
        assert!(input.calculate().is_err());
        assert_eq!(input.evaluate(), RetirementResult::default());
    }

    fn fire() -> FireInput {
        FireInput {
            annual_income: 80_000.0,
            annual_expenses: 40_000.0,
            current_savings: 100_000.0,
            annual_return: 7.0,
        }
    }

    #[test]
    fn test_fire_years() {
        let result = fire().calculate().unwrap();
        assert_eq!(result.fire_number, 1_000_000.0);
        assert!((result.years_to_fire - 12.57).abs() < 0.01, "got {}", result.years_to_fire);
        assert_eq!(result.report("$")[1].value, "12.6");
    }

    #[test]
    fn test_fire_no_savings_is_infinite() {
        let mut input = fire();
        input.annual_income = 40_000.0;
        let result = input.calculate().unwrap();
        assert!(result.years_to_fire.is_infinite());
        assert_eq!(result.report("$")[1].value, "∞");
    }

    #[test]
    fn test_fire_already_reached() {
        let mut input = fire();
        input.current_savings = 2_000_000.0;
        assert_eq!(input.calculate().unwrap().years_to_fire, 0.0);
    }

    #[test]
    fn test_fire_zero_expenses_rejected() {
        let mut input = fire();
        input.annual_expenses = 0.0;
        assert!(input.calculate().is_err());
        let result = input.evaluate();
        assert_eq!(result.fire_number, 0.0);
        assert!(result.years_to_fire.is_infinite());
        assert_eq!(result.report("$")[0].value, SENTINEL);
    }

    #[test]
    fn test_crypto_dca() {
        let form = FormState::new()
            .with("investment_amount", "100")
            .with("prices", "40000, 42000, 38000, 45000, 50000");
        let result = CryptoDcaInput::from_form(&form).calculate().unwrap();
        assert_eq!(result.number_of_investments, 5);
        assert_eq!(result.total_invested, 500.0);
        let tokens = 100.0 / 40_000.0 + 100.0 / 42_000.0 + 100.0 / 38_000.0 + 100.0 / 45_000.0 + 100.0 / 50_000.0;
        assert!((result.total_tokens - tokens).abs() < 1e-12);
        assert!((result.average_cost - 500.0 / tokens).abs() < 1e-6);
    }

    #[test]
    fn test_crypto_dca_drops_bad_prices() {
        assert_eq!(CryptoDcaInput::parse_prices("100, abc, -5, 0, 200"), vec![100.0, 200.0]);
        let input = CryptoDcaInput {
            investment_amount: 50.0,
            prices: CryptoDcaInput::parse_prices("x, y"),
        };
        assert!(input.calculate().is_err());
        assert_eq!(input.evaluate().number_of_investments, 0);
    }
}
