//! # Loan Calculators
//!
//! Level-payment loans (mortgage, personal loan, car loan) and revolving
//! credit payoff. All rates are entered as annual percentages and converted
//! to monthly decimal rates.
//!
//! ## Example
//!
//! ```rust
//! use bearcalc_core::calculations::{Calculation, LoanRepaymentInput};
//!
//! let input = LoanRepaymentInput {
//!     loan_amount: 12_000.0,
//!     interest_rate: 0.0,
//!     loan_term_years: 4.0,
//! };
//! let result = input.calculate().unwrap();
//! assert!((result.monthly_payment - 250.0).abs() < 1e-9);
//! ```

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};

use super::{Calculation, Report};
use crate::equations::{amortized_payment, monthly_rate, payoff_periods};
use crate::errors::{require_finite, require_non_negative, require_positive, CalcError, CalcResult};
use crate::form::FormState;
use crate::format::{currency, currency_or_sentinel, ReportLine, INFINITE, SENTINEL};
use crate::registry::CalculatorId;

// ============================================================================
// Mortgage
// ============================================================================

/// Input parameters for a fixed-rate mortgage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MortgageInput {
    /// Amount financed ($)
    pub home_price: f64,
    /// Annual interest rate (%)
    pub interest_rate: f64,
    /// Term in whole years
    pub loan_term_years: f64,
    /// Annual property taxes ($), 0 when not entered
    pub property_taxes: f64,
    /// Annual homeowner's insurance ($), 0 when not entered
    pub home_insurance: f64,
}

/// Monthly mortgage payment breakdown.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MortgageResult {
    /// Principal & interest + taxes + insurance
    pub total_monthly: f64,
    pub principal_and_interest: f64,
    pub monthly_taxes: f64,
    pub monthly_insurance: f64,
}

impl Calculation for MortgageInput {
    type Output = MortgageResult;
    const ID: CalculatorId = CalculatorId::Mortgage;

    fn from_form(form: &FormState) -> Self {
        MortgageInput {
            home_price: form.number("home_price"),
            interest_rate: form.number("interest_rate"),
            loan_term_years: form.integer("loan_term_years"),
            property_taxes: form.number_or_zero("property_taxes"),
            home_insurance: form.number_or_zero("home_insurance"),
        }
    }

    fn validate(&self) -> CalcResult<()> {
        require_positive("home_price", self.home_price)?;
        require_non_negative("interest_rate", self.interest_rate)?;
        require_positive("loan_term_years", self.loan_term_years)?;
        require_finite("property_taxes", self.property_taxes)?;
        require_finite("home_insurance", self.home_insurance)?;
        Ok(())
    }

    fn compute(&self) -> MortgageResult {
        let n = self.loan_term_years * 12.0;
        let p_and_i = amortized_payment(self.home_price, monthly_rate(self.interest_rate), n).max(0.0);
        let monthly_taxes = (self.property_taxes / 12.0).max(0.0);
        let monthly_insurance = (self.home_insurance / 12.0).max(0.0);

        MortgageResult {
            total_monthly: p_and_i + monthly_taxes + monthly_insurance,
            principal_and_interest: p_and_i,
            monthly_taxes,
            monthly_insurance,
        }
    }
}

impl Report for MortgageResult {
    fn report(&self, sym: &str) -> Vec<ReportLine> {
        vec![
            ReportLine::new("Estimated Monthly Payment", currency(self.total_monthly, sym)),
            ReportLine::new("Principal & Interest", currency(self.principal_and_interest, sym)),
            ReportLine::new("Property Taxes", currency(self.monthly_taxes, sym)),
            ReportLine::new("Home Insurance", currency(self.monthly_insurance, sym)),
        ]
    }
}

// ============================================================================
// Loan Repayment
// ============================================================================

/// Input parameters for an amortized personal loan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanRepaymentInput {
    pub loan_amount: f64,
    /// Annual interest rate (%)
    pub interest_rate: f64,
    pub loan_term_years: f64,
}

/// Level payment and lifetime totals.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoanRepaymentResult {
    pub monthly_payment: f64,
    pub total_payment: f64,
    pub total_interest: f64,
}

impl Calculation for LoanRepaymentInput {
    type Output = LoanRepaymentResult;
    const ID: CalculatorId = CalculatorId::LoanRepayment;

    fn from_form(form: &FormState) -> Self {
        LoanRepaymentInput {
            loan_amount: form.number("loan_amount"),
            interest_rate: form.number("interest_rate"),
            loan_term_years: form.integer("loan_term_years"),
        }
    }

    fn validate(&self) -> CalcResult<()> {
        require_positive("loan_amount", self.loan_amount)?;
        require_non_negative("interest_rate", self.interest_rate)?;
        require_positive("loan_term_years", self.loan_term_years)?;
        Ok(())
    }

    fn compute(&self) -> LoanRepaymentResult {
        let n = self.loan_term_years * 12.0;
        let monthly_payment = amortized_payment(self.loan_amount, monthly_rate(self.interest_rate), n);
        let total_payment = monthly_payment * n;

        LoanRepaymentResult {
            monthly_payment: monthly_payment.max(0.0),
            total_payment: total_payment.max(0.0),
            total_interest: (total_payment - self.loan_amount).max(0.0),
        }
    }
}

impl Report for LoanRepaymentResult {
    fn report(&self, sym: &str) -> Vec<ReportLine> {
        vec![
            ReportLine::new("Monthly Payment", currency(self.monthly_payment, sym)),
            ReportLine::new("Total Payment", currency(self.total_payment, sym)),
            ReportLine::new("Total Interest", currency(self.total_interest, sym)),
        ]
    }
}

// ============================================================================
// Car Loan
// ============================================================================

/// Input parameters for a car loan with an optional down payment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarLoanInput {
    pub car_price: f64,
    /// 0 when not entered
    pub down_payment: f64,
    /// Annual interest rate (%)
    pub interest_rate: f64,
    pub loan_term_years: f64,
}

impl CarLoanInput {
    /// Amount financed: price less down payment
    pub fn principal(&self) -> f64 {
        self.car_price - self.down_payment
    }
}

/// Car loan payment and total cost.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CarLoanResult {
    pub monthly_payment: f64,
    /// All monthly payments plus the down payment
    pub total_cost: f64,
    pub total_interest: f64,
}

impl Calculation for CarLoanInput {
    type Output = CarLoanResult;
    const ID: CalculatorId = CalculatorId::CarLoan;

    fn from_form(form: &FormState) -> Self {
        CarLoanInput {
            car_price: form.number("car_price"),
            down_payment: form.number_or_zero("down_payment"),
            interest_rate: form.number("interest_rate"),
            loan_term_years: form.integer("loan_term_years"),
        }
    }

    fn validate(&self) -> CalcResult<()> {
        require_finite("car_price", self.car_price)?;
        require_finite("down_payment", self.down_payment)?;
        if !(self.principal() > 0.0) {
            return Err(CalcError::invalid_input(
                "down_payment",
                self.down_payment.to_string(),
                "Down payment must be less than the car price",
            ));
        }
        require_non_negative("interest_rate", self.interest_rate)?;
        require_positive("loan_term_years", self.loan_term_years)?;
        Ok(())
    }

    fn compute(&self) -> CarLoanResult {
        let principal = self.principal();
        let n = self.loan_term_years * 12.0;
        let monthly_payment = amortized_payment(principal, monthly_rate(self.interest_rate), n);
        let payments = monthly_payment * n;

        CarLoanResult {
            monthly_payment,
            total_cost: payments + self.down_payment,
            total_interest: (payments - principal).max(0.0),
        }
    }
}

impl Report for CarLoanResult {
    fn report(&self, sym: &str) -> Vec<ReportLine> {
        vec![
            ReportLine::new("Monthly Payment", currency(self.monthly_payment, sym)),
            ReportLine::new("Total Cost of Car", currency(self.total_cost, sym)),
            ReportLine::new("Total Interest", currency(self.total_interest, sym)),
        ]
    }
}

// ============================================================================
// Credit Card Payoff
// ============================================================================

/// Input parameters for paying off a card balance with a fixed payment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreditCardPayoffInput {
    pub balance: f64,
    /// Annual percentage rate (%)
    pub apr: f64,
    pub monthly_payment: f64,
    /// Month the payments start counting from
    pub as_of: Option<NaiveDate>,
}

/// Payoff horizon.
///
/// When the payment never covers the monthly interest, `months_to_payoff`
/// and `total_interest` are `f64::INFINITY` and there is no payoff date.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreditCardPayoffResult {
    /// Whole months, rounded up
    pub months_to_payoff: f64,
    /// Interest over the exact (fractional) payoff period
    pub total_interest: f64,
    pub payoff_date: Option<NaiveDate>,
}

impl CreditCardPayoffResult {
    /// Payment does not cover the interest; the balance never clears.
    pub fn is_never_payable(&self) -> bool {
        self.months_to_payoff.is_infinite()
    }
}

impl Calculation for CreditCardPayoffInput {
    type Output = CreditCardPayoffResult;
    const ID: CalculatorId = CalculatorId::CreditCardPayoff;

    fn from_form(form: &FormState) -> Self {
        CreditCardPayoffInput {
            balance: form.number("balance"),
            apr: form.number("apr"),
            monthly_payment: form.number("monthly_payment"),
            as_of: form.date("as_of"),
        }
    }

    fn validate(&self) -> CalcResult<()> {
        require_positive("balance", self.balance)?;
        require_non_negative("apr", self.apr)?;
        require_positive("monthly_payment", self.monthly_payment)?;
        Ok(())
    }

    fn compute(&self) -> CreditCardPayoffResult {
        let rate = monthly_rate(self.apr);
        let exact = payoff_periods(self.balance, rate, self.monthly_payment);
        if exact.is_infinite() {
            return CreditCardPayoffResult {
                months_to_payoff: f64::INFINITY,
                total_interest: f64::INFINITY,
                payoff_date: None,
            };
        }

        let months = exact.ceil();
        let payoff_date = self
            .as_of
            .and_then(|start| start.checked_add_months(Months::new(months as u32)));

        CreditCardPayoffResult {
            months_to_payoff: months,
            total_interest: self.monthly_payment * exact - self.balance,
            payoff_date,
        }
    }
}

impl Report for CreditCardPayoffResult {
    fn report(&self, sym: &str) -> Vec<ReportLine> {
        if self.is_never_payable() {
            return vec![
                ReportLine::new("Months to Payoff", INFINITE),
                ReportLine::new("Total Interest", "Not paying down principal"),
                ReportLine::new("Payoff Date", "Never at this rate"),
            ];
        }
        let months = if self.months_to_payoff > 0.0 {
            format!("{} months", self.months_to_payoff)
        } else {
            SENTINEL.to_string()
        };
        vec![
            ReportLine::new("Months to Payoff", months),
            ReportLine::new("Total Interest", currency_or_sentinel(self.total_interest, sym)),
            ReportLine::new(
                "Payoff Date",
                self.payoff_date
                    .map(|d| d.format("%B %Y").to_string())
                    .unwrap_or_else(|| SENTINEL.to_string()),
            ),
        ]
    }
}
