//! # Business & Everyday Money Calculators
//!
//! Small ratio formulas: return on investment, gross margin, break-even
//! volume, sales tax, tips and salary-to-hourly conversion.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Calculation, Report};
use crate::errors::{require_finite, require_non_negative, require_non_zero, require_positive, CalcError, CalcResult};
use crate::form::FormState;
use crate::format::{currency, currency_or_sentinel, fixed, percent, ReportLine, SENTINEL};
use crate::registry::CalculatorId;

// ============================================================================
// ROI
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoiInput {
    pub initial_investment: f64,
    pub final_value: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoiResult {
    /// Return on investment (%)
    pub roi: f64,
    pub net_profit: f64,
}

impl Calculation for RoiInput {
    type Output = RoiResult;
    const ID: CalculatorId = CalculatorId::Roi;

    fn from_form(form: &FormState) -> Self {
        RoiInput {
            initial_investment: form.number("initial_investment"),
            final_value: form.number("final_value"),
        }
    }

    fn validate(&self) -> CalcResult<()> {
        require_non_zero("initial_investment", self.initial_investment)?;
        require_finite("final_value", self.final_value)?;
        Ok(())
    }

    fn compute(&self) -> RoiResult {
        let net_profit = self.final_value - self.initial_investment;
        RoiResult {
            roi: net_profit / self.initial_investment * 100.0,
            net_profit,
        }
    }
}

impl Report for RoiResult {
    fn report(&self, sym: &str) -> Vec<ReportLine> {
        vec![
            ReportLine::new("Return on Investment", percent(self.roi, 2)),
            ReportLine::new("Net Profit", currency(self.net_profit, sym)),
        ]
    }
}

// ============================================================================
// Profit Margin
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfitMarginInput {
    pub revenue: f64,
    /// Cost of goods sold
    pub cogs: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfitMarginResult {
    pub gross_profit: f64,
    /// Gross margin (%)
    pub margin: f64,
}

impl Calculation for ProfitMarginInput {
    type Output = ProfitMarginResult;
    const ID: CalculatorId = CalculatorId::ProfitMargin;

    fn from_form(form: &FormState) -> Self {
        ProfitMarginInput {
            revenue: form.number("revenue"),
            cogs: form.number("cogs"),
        }
    }

    fn validate(&self) -> CalcResult<()> {
        require_non_zero("revenue", self.revenue)?;
        require_finite("cogs", self.cogs)?;
        Ok(())
    }

    fn compute(&self) -> ProfitMarginResult {
        let gross_profit = self.revenue - self.cogs;
        ProfitMarginResult {
            gross_profit,
            margin: gross_profit / self.revenue * 100.0,
        }
    }
}

impl Report for ProfitMarginResult {
    fn report(&self, sym: &str) -> Vec<ReportLine> {
        vec![
            ReportLine::new("Gross Profit Margin", percent(self.margin, 2)),
            ReportLine::new("Gross Profit", currency(self.gross_profit, sym)),
        ]
    }
}

// ============================================================================
// Break-Even
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreakEvenInput {
    pub fixed_costs: f64,
    /// Variable cost per unit
    pub variable_cost: f64,
    pub price_per_unit: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BreakEvenResult {
    /// Units to sell before profit (fractional)
    pub units: f64,
    pub revenue: f64,
}

impl Calculation for BreakEvenInput {
    type Output = BreakEvenResult;
    const ID: CalculatorId = CalculatorId::BreakEven;

    fn from_form(form: &FormState) -> Self {
        BreakEvenInput {
            fixed_costs: form.number("fixed_costs"),
            variable_cost: form.number("variable_cost"),
            price_per_unit: form.number("price_per_unit"),
        }
    }

    fn validate(&self) -> CalcResult<()> {
        require_finite("fixed_costs", self.fixed_costs)?;
        require_finite("variable_cost", self.variable_cost)?;
        require_finite("price_per_unit", self.price_per_unit)?;
        if self.price_per_unit <= self.variable_cost {
            return Err(CalcError::invalid_input(
                "price_per_unit",
                self.price_per_unit.to_string(),
                "Price must exceed the variable cost per unit",
            ));
        }
        Ok(())
    }

    fn compute(&self) -> BreakEvenResult {
        let units = self.fixed_costs / (self.price_per_unit - self.variable_cost);
        BreakEvenResult {
            units,
            revenue: units * self.price_per_unit,
        }
    }
}

impl Report for BreakEvenResult {
    fn report(&self, sym: &str) -> Vec<ReportLine> {
        let units = if self.units > 0.0 {
            format!("{} units", fixed(self.units.ceil(), 0))
        } else {
            SENTINEL.to_string()
        };
        vec![
            ReportLine::new("Break-Even Point", units),
            ReportLine::new("Break-Even Revenue", currency_or_sentinel(self.revenue, sym)),
        ]
    }
}

// ============================================================================
// Sales Tax
// ============================================================================

/// Whether tax is added to a net price or backed out of a gross one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaxMode {
    #[default]
    Add,
    Remove,
}

impl TaxMode {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "add" => Some(TaxMode::Add),
            "remove" | "subtract" => Some(TaxMode::Remove),
            _ => None,
        }
    }
}

impl fmt::Display for TaxMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaxMode::Add => write!(f, "add"),
            TaxMode::Remove => write!(f, "remove"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesTaxInput {
    pub amount: f64,
    /// Tax rate (%)
    pub tax_rate: f64,
    /// `None` when the form value is not a known mode
    pub mode: Option<TaxMode>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SalesTaxResult {
    pub mode: TaxMode,
    /// Price including tax (add) or before tax (remove)
    pub final_amount: f64,
    pub tax_amount: f64,
}

impl Calculation for SalesTaxInput {
    type Output = SalesTaxResult;
    const ID: CalculatorId = CalculatorId::SalesTax;

    fn from_form(form: &FormState) -> Self {
        SalesTaxInput {
            amount: form.number("amount"),
            tax_rate: form.number("tax_rate"),
            mode: TaxMode::parse(form.text("mode")),
        }
    }

    fn validate(&self) -> CalcResult<()> {
        require_finite("amount", self.amount)?;
        require_non_negative("tax_rate", self.tax_rate)?;
        if self.mode.is_none() {
            return Err(CalcError::invalid_input("mode", "", "Expected 'add' or 'remove'"));
        }
        Ok(())
    }

    fn compute(&self) -> SalesTaxResult {
        let rate = self.tax_rate / 100.0;
        let mode = self.mode.unwrap_or_default();
        let (final_amount, tax_amount) = match mode {
            TaxMode::Add => {
                let tax = self.amount * rate;
                (self.amount + tax, tax)
            }
            TaxMode::Remove => {
                let net = self.amount / (1.0 + rate);
                (net, self.amount - net)
            }
        };
        SalesTaxResult {
            mode,
            final_amount,
            tax_amount,
        }
    }
}

impl Report for SalesTaxResult {
    fn report(&self, sym: &str) -> Vec<ReportLine> {
        let headline = match self.mode {
            TaxMode::Add => "Total Amount",
            TaxMode::Remove => "Price Before Tax",
        };
        vec![
            ReportLine::new(headline, currency(self.final_amount, sym)),
            ReportLine::new("Sales Tax", currency(self.tax_amount, sym)),
        ]
    }
}

// ============================================================================
// Tip
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TipInput {
    pub bill: f64,
    /// Tip (%)
    pub tip_percent: f64,
    /// Whole number of people splitting the bill
    pub people: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TipResult {
    pub tip_amount: f64,
    pub total: f64,
    pub per_person: f64,
}

impl Calculation for TipInput {
    type Output = TipResult;
    const ID: CalculatorId = CalculatorId::Tip;

    fn from_form(form: &FormState) -> Self {
        TipInput {
            bill: form.number("bill"),
            tip_percent: form.number("tip_percent"),
            people: form.integer("people"),
        }
    }

    fn validate(&self) -> CalcResult<()> {
        require_non_negative("bill", self.bill)?;
        require_non_negative("tip_percent", self.tip_percent)?;
        require_positive("people", self.people)?;
        Ok(())
    }

    fn compute(&self) -> TipResult {
        let tip_amount = self.bill * self.tip_percent / 100.0;
        let total = self.bill + tip_amount;
        TipResult {
            tip_amount,
            total,
            per_person: total / self.people,
        }
    }
}

impl Report for TipResult {
    fn report(&self, sym: &str) -> Vec<ReportLine> {
        vec![
            ReportLine::new("Total per Person", currency(self.per_person, sym)),
            ReportLine::new("Tip Amount", currency(self.tip_amount, sym)),
            ReportLine::new("Total Bill", currency(self.total, sym)),
        ]
    }
}

// ============================================================================
// Hourly Rate
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HourlyRateInput {
    /// Annual salary
    pub salary: f64,
    pub hours_per_week: f64,
    pub weeks_per_year: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HourlyRateResult {
    pub hourly_rate: f64,
    pub total_hours: f64,
}

impl Calculation for HourlyRateInput {
    type Output = HourlyRateResult;
    const ID: CalculatorId = CalculatorId::HourlyRate;

    fn from_form(form: &FormState) -> Self {
        HourlyRateInput {
            salary: form.number("salary"),
            hours_per_week: form.number("hours_per_week"),
            weeks_per_year: form.number("weeks_per_year"),
        }
    }

    fn validate(&self) -> CalcResult<()> {
        require_finite("salary", self.salary)?;
        require_positive("hours_per_week", self.hours_per_week)?;
        require_positive("weeks_per_year", self.weeks_per_year)?;
        Ok(())
    }

    fn compute(&self) -> HourlyRateResult {
        let total_hours = self.hours_per_week * self.weeks_per_year;
        HourlyRateResult {
            hourly_rate: self.salary / total_hours,
            total_hours,
        }
    }
}

impl Report for HourlyRateResult {
    fn report(&self, sym: &str) -> Vec<ReportLine> {
        let hours = if self.total_hours > 0.0 {
            fixed(self.total_hours, 0)
        } else {
            SENTINEL.to_string()
        };
        vec![
            ReportLine::new("Equivalent Hourly Rate", currency_or_sentinel(self.hourly_rate, sym)),
            ReportLine::new("Hours Worked per Year", hours),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roi() {
        let result = RoiInput {
            initial_investment: 10_000.0,
            final_value: 15_000.0,
        }
        .calculate()
        .unwrap();
        assert_eq!(result.roi, 50.0);
        assert_eq!(result.net_profit, 5_000.0);
        assert_eq!(result.report("$")[0].value, "50.00%");
    }

    #[test]
    fn test_roi_zero_initial() {
        let input = RoiInput {
            initial_investment: 0.0,
            final_value: 100.0,
        };
        assert!(input.calculate().is_err());
        assert_eq!(input.evaluate(), RoiResult::default());
    }

    #[test]
    fn test_profit_margin() {
        let result = ProfitMarginInput {
            revenue: 500_000.0,
            cogs: 300_000.0,
        }
        .calculate()
        .unwrap();
        assert_eq!(result.gross_profit, 200_000.0);
        assert_eq!(result.margin, 40.0);
    }

    #[test]
    fn test_break_even() {
        let result = BreakEvenInput {
            fixed_costs: 10_000.0,
            variable_cost: 20.0,
            price_per_unit: 50.0,
        }
        .calculate()
        .unwrap();
        assert!((result.units - 333.333).abs() < 0.001);
        assert!((result.revenue - 16_666.67).abs() < 0.01);
        assert_eq!(result.report("$")[0].value, "334 units");
    }

    #[test]
    fn test_break_even_price_not_above_cost() {
        let input = BreakEvenInput {
            fixed_costs: 10_000.0,
            variable_cost: 50.0,
            price_per_unit: 50.0,
        };
        assert!(input.calculate().is_err());
        assert_eq!(input.evaluate().report("$")[0].value, SENTINEL);
    }

    #[test]
    fn test_sales_tax_add_and_remove() {
        let add = SalesTaxInput {
            amount: 100.0,
            tax_rate: 8.5,
            mode: Some(TaxMode::Add),
        }
        .calculate()
        .unwrap();
        assert!((add.final_amount - 108.5).abs() < 1e-9);
        assert!((add.tax_amount - 8.5).abs() < 1e-9);

        let remove = SalesTaxInput {
            amount: 108.5,
            tax_rate: 8.5,
            mode: Some(TaxMode::Remove),
        }
        .calculate()
        .unwrap();
        assert!((remove.final_amount - 100.0).abs() < 1e-9);
        assert!((remove.tax_amount - 8.5).abs() < 1e-9);
        assert_eq!(remove.report("$")[0].label, "Price Before Tax");
    }

    #[test]
    fn test_sales_tax_unknown_mode() {
        let form = FormState::new().with("amount", "10").with("tax_rate", "5").with("mode", "double");
        let input = SalesTaxInput::from_form(&form);
        assert_eq!(input.mode, None);
        assert!(input.calculate().is_err());
    }

    #[test]
    fn test_tip_split() {
        let result = TipInput {
            bill: 50.0,
            tip_percent: 18.0,
            people: 2.0,
        }
        .calculate()
        .unwrap();
        assert!((result.tip_amount - 9.0).abs() < 1e-9);
        assert!((result.total - 59.0).abs() < 1e-9);
        assert!((result.per_person - 29.5).abs() < 1e-9);
    }

    #[test]
    fn test_tip_guards() {
        for (bill, tip, people) in [(-1.0, 18.0, 1.0), (50.0, -5.0, 1.0), (50.0, 18.0, 0.0)] {
            let input = TipInput {
                bill,
                tip_percent: tip,
                people,
            };
            assert!(input.calculate().is_err());
            assert_eq!(input.evaluate(), TipResult::default());
        }
    }

    #[test]
    fn test_hourly_rate() {
        let result = HourlyRateInput {
            salary: 100_000.0,
            hours_per_week: 35.0,
            weeks_per_year: 48.0,
        }
        .calculate()
        .unwrap();
        assert_eq!(result.total_hours, 1_680.0);
        assert_eq!(result.report("$")[0].value, "$59.52");
    }

    #[test]
    fn test_hourly_rate_zero_hours() {
        let input = HourlyRateInput {
            salary: 100_000.0,
            hours_per_week: 0.0,
            weeks_per_year: 48.0,
        };
        assert_eq!(input.evaluate().report("$")[0].value, SENTINEL);
    }
}
