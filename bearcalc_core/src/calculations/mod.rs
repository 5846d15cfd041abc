//! # Calculators
//!
//! Every calculator follows the same pattern:
//!
//! - `*Input` - Input parameters (JSON-serializable, built from a [`FormState`])
//! - `*Result` - Calculation results (JSON-serializable, `Default` = zeroed)
//! - [`Calculation`] - `validate` + `compute`, giving a strict
//!   [`Calculation::calculate`] and a lenient [`Calculation::evaluate`]
//!
//! ## Strict vs. lenient
//!
//! `calculate` reports the first rejected field as a [`CalcError`].
//! `evaluate` never fails: rejected input yields the zeroed result, which
//! reports render as `—`.
//!
//! ## Available Calculators
//!
//! - [`loans`] - Mortgage, loan repayment, car loan, credit card payoff
//! - [`savings`] - Compound interest, retirement, FIRE, crypto DCA
//! - [`business`] - ROI, profit margin, break-even, sales tax, tip, hourly rate
//! - [`money`] - Inflation, currency conversion
//! - [`body`] - BMI, body fat
//! - [`nutrition`] - BMR, calorie intake, macros, water intake
//! - [`pregnancy`] - Due date
//! - [`construction`] - Concrete volume, paint coverage, roof pitch
//! - [`utilities`] - Voltage drop, fire hydrant flow
//! - [`math`] - Z-score, GPA, percentage
//! - [`keypad`] - Standard/scientific keypad
//! - [`conversion`] - Unit converter
//! - [`dates`] - Date arithmetic, time card

pub mod body;
pub mod business;
pub mod construction;
pub mod conversion;
pub mod dates;
pub mod keypad;
pub mod loans;
pub mod math;
pub mod money;
pub mod nutrition;
pub mod pregnancy;
pub mod savings;
pub mod utilities;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::form::FormState;
use crate::format::ReportLine;
use crate::registry::CalculatorId;

pub use body::{BmiInput, BmiResult, BodyFatInput, BodyFatResult};
pub use business::{
    BreakEvenInput, BreakEvenResult, HourlyRateInput, HourlyRateResult, ProfitMarginInput,
    ProfitMarginResult, RoiInput, RoiResult, SalesTaxInput, SalesTaxResult, TipInput, TipResult,
};
pub use construction::{
    ConcreteVolumeInput, ConcreteVolumeResult, PaintCoverageInput, PaintCoverageResult,
    RoofPitchInput, RoofPitchResult,
};
pub use conversion::{UnitConverterInput, UnitConverterResult};
pub use dates::{DateInput, DateResult, TimeCardInput, TimeCardResult};
pub use keypad::{Keypad, KeypadInput, KeypadResult};
pub use loans::{
    CarLoanInput, CarLoanResult, CreditCardPayoffInput, CreditCardPayoffResult,
    LoanRepaymentInput, LoanRepaymentResult, MortgageInput, MortgageResult,
};
pub use math::{GpaInput, GpaResult, PercentageInput, PercentageResult, ZScoreInput, ZScoreResult};
pub use money::{CurrencyInput, CurrencyResult, InflationInput, InflationResult};
pub use nutrition::{
    BmrInput, BmrResult, CalorieIntakeInput, CalorieIntakeResult, MacrosInput, MacrosResult,
    WaterIntakeInput, WaterIntakeResult,
};
pub use pregnancy::{PregnancyInput, PregnancyResult};
pub use savings::{
    CompoundInterestInput, CompoundInterestResult, CryptoDcaInput, CryptoDcaResult, FireInput,
    FireResult, RetirementInput, RetirementResult,
};
pub use utilities::{HydrantFlowInput, HydrantFlowResult, VoltageDropInput, VoltageDropResult};

/// Render a result as labelled display lines.
///
/// The first line is the headline figure.
pub trait Report {
    fn report(&self, currency_symbol: &str) -> Vec<ReportLine>;
}

/// A single calculator: typed input with a pure formula behind it.
pub trait Calculation: Sized {
    /// Result type; `Default` is the zeroed/sentinel result.
    type Output: Default + Serialize + Report;

    /// Registry entry this input belongs to.
    const ID: CalculatorId;

    /// Build the typed input from string form fields.
    fn from_form(form: &FormState) -> Self;

    /// Check parse results and domain guards.
    fn validate(&self) -> CalcResult<()>;

    /// Evaluate the formula. Only meaningful after `validate` succeeds.
    fn compute(&self) -> Self::Output;

    /// Strict evaluation: the first rejected input is returned as an error.
    fn calculate(&self) -> CalcResult<Self::Output> {
        self.validate()?;
        Ok(self.compute())
    }

    /// Lenient evaluation: rejected input yields the zeroed result.
    fn evaluate(&self) -> Self::Output {
        match self.validate() {
            Ok(()) => self.compute(),
            Err(err) => {
                tracing::debug!(
                    calculator = Self::ID.slug(),
                    code = err.error_code(),
                    error = %err,
                    "input rejected, returning zeroed result"
                );
                Self::Output::default()
            }
        }
    }
}

/// Result of running any calculator through [`CalculationItem`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Evaluation {
    /// Calculator slug
    pub calculator: CalculatorId,
    /// Result struct as JSON (non-finite numbers become `null`)
    pub result: serde_json::Value,
    /// Human-readable lines, headline first
    pub report: Vec<ReportLine>,
}

impl Evaluation {
    fn new<T: Serialize + Report>(calculator: CalculatorId, output: &T, currency_symbol: &str) -> CalcResult<Self> {
        Ok(Evaluation {
            calculator,
            result: serde_json::to_value(output)?,
            report: output.report(currency_symbol),
        })
    }

    /// Headline line of the report, if any.
    pub fn headline(&self) -> Option<&ReportLine> {
        self.report.first()
    }
}

macro_rules! calculation_items {
    ($( $variant:ident($input:ty) => $slug:literal ),* $(,)?) => {
        /// Enum wrapper for every calculator input.
        ///
        /// Serializes with a `"calculator"` tag holding the slug, so a whole
        /// calculation round-trips through a single JSON object.
        #[derive(Debug, Clone, Serialize, Deserialize)]
        #[serde(tag = "calculator")]
        pub enum CalculationItem {
            $(
                #[serde(rename = $slug)]
                $variant($input),
            )*
        }

        impl CalculationItem {
            /// Calculator this input belongs to
            pub fn id(&self) -> CalculatorId {
                match self {
                    $( CalculationItem::$variant(_) => CalculatorId::$variant, )*
                }
            }

            /// Build the typed input for `id` from string form fields.
            pub fn from_form(id: CalculatorId, form: &FormState) -> Self {
                match id {
                    $( CalculatorId::$variant => CalculationItem::$variant(<$input>::from_form(form)), )*
                }
            }

            /// Lenient evaluation (zeroed result on rejected input).
            pub fn evaluate(&self, currency_symbol: &str) -> CalcResult<Evaluation> {
                match self {
                    $( CalculationItem::$variant(input) => {
                        Evaluation::new(self.id(), &input.evaluate(), currency_symbol)
                    } )*
                }
            }

            /// Strict evaluation (rejected input is an error).
            pub fn calculate(&self, currency_symbol: &str) -> CalcResult<Evaluation> {
                match self {
                    $( CalculationItem::$variant(input) => {
                        Evaluation::new(self.id(), &input.calculate()?, currency_symbol)
                    } )*
                }
            }
        }

        #[cfg(test)]
        mod id_consistency {
            use super::*;

            #[test]
            fn test_slugs_match_registry() {
                $(
                    assert_eq!(CalculatorId::$variant.slug(), $slug);
                    assert_eq!(<$input as Calculation>::ID, CalculatorId::$variant);
                )*
            }
        }
    };
}

calculation_items! {
    Mortgage(MortgageInput) => "mortgage-calculator",
    LoanRepayment(LoanRepaymentInput) => "loan-repayment-calculator",
    CarLoan(CarLoanInput) => "car-loan-calculator",
    CreditCardPayoff(CreditCardPayoffInput) => "credit-card-payoff-calculator",
    CompoundInterest(CompoundInterestInput) => "compound-interest-calculator",
    RetirementSavings(RetirementInput) => "retirement-savings-calculator",
    Fire(FireInput) => "fire-calculator",
    Roi(RoiInput) => "roi-calculator",
    ProfitMargin(ProfitMarginInput) => "profit-margin-calculator",
    BreakEven(BreakEvenInput) => "break-even-calculator",
    SalesTax(SalesTaxInput) => "sales-tax-calculator",
    Tip(TipInput) => "tip-calculator",
    HourlyRate(HourlyRateInput) => "hourly-rate-calculator",
    Inflation(InflationInput) => "inflation-calculator",
    CryptoDca(CryptoDcaInput) => "crypto-dca-calculator",
    Currency(CurrencyInput) => "currency-converter",
    Percentage(PercentageInput) => "percentage-calculator",
    Bmi(BmiInput) => "bmi-calculator",
    Bmr(BmrInput) => "bmr-calculator",
    BodyFat(BodyFatInput) => "body-fat-calculator",
    CalorieIntake(CalorieIntakeInput) => "calorie-intake-calculator",
    Macros(MacrosInput) => "macros-calculator",
    WaterIntake(WaterIntakeInput) => "water-intake-calculator",
    PregnancyDueDate(PregnancyInput) => "pregnancy-due-date-calculator",
    ConcreteVolume(ConcreteVolumeInput) => "concrete-volume-calculator",
    PaintCoverage(PaintCoverageInput) => "paint-coverage-calculator",
    RoofPitch(RoofPitchInput) => "roof-pitch-calculator",
    VoltageDrop(VoltageDropInput) => "voltage-drop-calculator",
    HydrantFlow(HydrantFlowInput) => "fire-hydrant-flow-calculator",
    ZScore(ZScoreInput) => "z-score-calculator",
    Gpa(GpaInput) => "gpa-calculator",
    Scientific(KeypadInput) => "scientific-calculator",
    UnitConverter(UnitConverterInput) => "unit-converter",
    Date(DateInput) => "date-calculator",
    TimeCard(TimeCardInput) => "time-card-calculator",
}

impl CalculationItem {
    /// Like [`CalculationItem::from_form`], but every field the registry
    /// declares for `id` must be present in `form`.
    pub fn try_from_form(id: CalculatorId, form: &FormState) -> CalcResult<Self> {
        if let Some(field) = id.descriptor().fields.iter().find(|f| form.get(f.key).is_none()) {
            return Err(CalcError::missing_field(field.key));
        }
        Ok(Self::from_form(id, form))
    }
}
