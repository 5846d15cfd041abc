//! # Calculator Registry
//!
//! Static catalog of every calculator: slug, title, category, explanation,
//! FAQ and the input fields with their defaults.
//!
//! ## Architecture
//!
//! - [`CalculatorId`] is the type-safe identity; it serializes as the slug
//! - [`CalculatorDescriptor`] holds the display metadata, all `'static`
//! - Slug lookup goes through a lazily built index
//!
//! ## Usage
//!
//! ```rust
//! use bearcalc_core::registry::{self, Category};
//!
//! let tip = registry::find("tip-calculator").unwrap();
//! assert_eq!(tip.category, Category::Finance);
//!
//! let hits = registry::search("loan");
//! assert!(hits.iter().any(|d| d.id.slug() == "car-loan-calculator"));
//! ```

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::errors::CalcError;

// ============================================================================
// Calculator Identity
// ============================================================================

macro_rules! calculator_ids {
    ($( $(#[$meta:meta])* $variant:ident => $slug:literal ),* $(,)?) => {
        /// Every calculator in the catalog.
        ///
        /// Declaration order is registry order.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum CalculatorId {
            $(
                $(#[$meta])*
                #[serde(rename = $slug)]
                $variant,
            )*
        }

        impl CalculatorId {
            /// All calculators in registry order
            pub const ALL: &'static [CalculatorId] = &[$( CalculatorId::$variant, )*];

            /// URL-style slug, e.g. `mortgage-calculator`
            pub fn slug(&self) -> &'static str {
                match self {
                    $( CalculatorId::$variant => $slug, )*
                }
            }
        }
    };
}

calculator_ids! {
    Mortgage => "mortgage-calculator",
    LoanRepayment => "loan-repayment-calculator",
    CarLoan => "car-loan-calculator",
    CreditCardPayoff => "credit-card-payoff-calculator",
    CompoundInterest => "compound-interest-calculator",
    RetirementSavings => "retirement-savings-calculator",
    /// Financial Independence, Retire Early
    Fire => "fire-calculator",
    Roi => "roi-calculator",
    ProfitMargin => "profit-margin-calculator",
    BreakEven => "break-even-calculator",
    SalesTax => "sales-tax-calculator",
    Tip => "tip-calculator",
    HourlyRate => "hourly-rate-calculator",
    Inflation => "inflation-calculator",
    /// Dollar-cost averaging
    CryptoDca => "crypto-dca-calculator",
    Currency => "currency-converter",
    Percentage => "percentage-calculator",
    Bmi => "bmi-calculator",
    Bmr => "bmr-calculator",
    BodyFat => "body-fat-calculator",
    CalorieIntake => "calorie-intake-calculator",
    Macros => "macros-calculator",
    WaterIntake => "water-intake-calculator",
    PregnancyDueDate => "pregnancy-due-date-calculator",
    ZScore => "z-score-calculator",
    Gpa => "gpa-calculator",
    /// Standard/scientific keypad
    Scientific => "scientific-calculator",
    UnitConverter => "unit-converter",
    ConcreteVolume => "concrete-volume-calculator",
    PaintCoverage => "paint-coverage-calculator",
    RoofPitch => "roof-pitch-calculator",
    VoltageDrop => "voltage-drop-calculator",
    HydrantFlow => "fire-hydrant-flow-calculator",
    Date => "date-calculator",
    TimeCard => "time-card-calculator",
}

impl CalculatorId {
    /// Registry entry for this calculator
    pub fn descriptor(&self) -> &'static CalculatorDescriptor {
        // CALCULATORS is declared in enum order (checked in tests)
        &CALCULATORS[*self as usize]
    }
}

impl fmt::Display for CalculatorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for CalculatorId {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        find(s).map(|d| d.id).ok_or_else(|| CalcError::UnknownCalculator {
            slug: s.trim().to_string(),
        })
    }
}

// ============================================================================
// Categories
// ============================================================================

/// Catalog sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Finance,
    HealthFitness,
    MathStatistics,
    ConstructionEngineering,
    EverydayLife,
}

impl Category {
    /// All categories in display order
    pub const ALL: [Category; 5] = [
        Category::Finance,
        Category::HealthFitness,
        Category::MathStatistics,
        Category::ConstructionEngineering,
        Category::EverydayLife,
    ];

    /// Display name for the category
    pub fn display_name(&self) -> &'static str {
        match self {
            Category::Finance => "Finance",
            Category::HealthFitness => "Health & Fitness",
            Category::MathStatistics => "Math & Statistics",
            Category::ConstructionEngineering => "Construction & Engineering",
            Category::EverydayLife => "Everyday Life",
        }
    }

    /// Sort order for listings (lower = earlier)
    pub fn sort_order(&self) -> u8 {
        match self {
            Category::Finance => 1,
            Category::HealthFitness => 2,
            Category::MathStatistics => 3,
            Category::ConstructionEngineering => 4,
            Category::EverydayLife => 5,
        }
    }

    /// Short command-line name
    pub fn key(&self) -> &'static str {
        match self {
            Category::Finance => "finance",
            Category::HealthFitness => "health",
            Category::MathStatistics => "math",
            Category::ConstructionEngineering => "construction",
            Category::EverydayLife => "everyday",
        }
    }

    /// Accepts the short key or the display name, case-insensitive.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        Category::ALL.into_iter().find(|c| {
            c.key().eq_ignore_ascii_case(value) || c.display_name().eq_ignore_ascii_case(value)
        })
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

// ============================================================================
// Descriptor
// ============================================================================

/// How a form field is parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "options", rename_all = "lowercase")]
pub enum FieldKind {
    Number,
    /// Whole number; fractions are truncated
    Integer,
    /// One of a fixed set of values
    Choice(&'static [&'static str]),
    Text,
    /// `YYYY-MM-DD`
    Date,
    /// 24-hour `HH:MM`
    Time,
}

/// One input field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FieldSpec {
    /// Form key
    pub key: &'static str,
    pub label: &'static str,
    /// Unit suffix (may be empty)
    pub unit: &'static str,
    pub kind: FieldKind,
    /// Default value; `today` / `today+1m` resolve to dates
    pub default: &'static str,
}

impl FieldSpec {
    const fn new(key: &'static str, label: &'static str, unit: &'static str, kind: FieldKind, default: &'static str) -> Self {
        Self { key, label, unit, kind, default }
    }
}

const fn number(key: &'static str, label: &'static str, unit: &'static str, default: &'static str) -> FieldSpec {
    FieldSpec::new(key, label, unit, FieldKind::Number, default)
}

const fn integer(key: &'static str, label: &'static str, unit: &'static str, default: &'static str) -> FieldSpec {
    FieldSpec::new(key, label, unit, FieldKind::Integer, default)
}

const fn choice(key: &'static str, label: &'static str, options: &'static [&'static str], default: &'static str) -> FieldSpec {
    FieldSpec::new(key, label, "", FieldKind::Choice(options), default)
}

const fn text(key: &'static str, label: &'static str, default: &'static str) -> FieldSpec {
    FieldSpec::new(key, label, "", FieldKind::Text, default)
}

const fn date(key: &'static str, label: &'static str, default: &'static str) -> FieldSpec {
    FieldSpec::new(key, label, "", FieldKind::Date, default)
}

const fn time(key: &'static str, label: &'static str, default: &'static str) -> FieldSpec {
    FieldSpec::new(key, label, "", FieldKind::Time, default)
}

/// Frequently asked question shown under a calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Faq {
    pub question: &'static str,
    pub answer: &'static str,
}

/// Complete metadata for one calculator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CalculatorDescriptor {
    pub id: CalculatorId,
    pub title: &'static str,
    /// One-line summary used in listings and search
    pub description: &'static str,
    pub category: Category,
    /// Icon reference name
    pub icon: &'static str,
    /// How the result is worked out
    pub explanation: &'static str,
    pub faq: &'static [Faq],
    pub fields: &'static [FieldSpec],
}

impl CalculatorDescriptor {
    /// Field by form key
    pub fn field(&self, key: &str) -> Option<&'static FieldSpec> {
        self.fields.iter().find(|f| f.key == key)
    }
}

// ============================================================================
// Shared option lists
// ============================================================================

const UNIT_SYSTEMS: &[&str] = &["imperial", "metric"];
const SEXES: &[&str] = &["male", "female"];
const ACTIVITY_LEVELS: &[&str] = &["sedentary", "light", "moderate", "active", "very-active"];

// ============================================================================
// Catalog
// ============================================================================

static CALCULATORS: [CalculatorDescriptor; 35] = [
    // -------------------------------------------------------------------------
    // Finance
    // -------------------------------------------------------------------------
    CalculatorDescriptor {
        id: CalculatorId::Mortgage,
        title: "Mortgage Calculator",
        description: "Estimate your monthly mortgage payment including taxes and insurance.",
        category: Category::Finance,
        icon: "house",
        explanation: "Principal and interest use the standard amortization formula \
            M = P·r(1+r)^n / ((1+r)^n − 1), where r is the monthly rate and n the number of \
            monthly payments. Annual property taxes and home insurance are divided by twelve \
            and added on top.",
        faq: &[
            Faq {
                question: "Does the payment include PMI?",
                answer: "No. Private mortgage insurance depends on your lender and down payment; add it to the insurance field if you pay it.",
            },
            Faq {
                question: "What happens at a 0% rate?",
                answer: "The loan is simply divided into equal monthly installments.",
            },
        ],
        fields: &[
            number("home_price", "Home Price", "$", "300000"),
            number("interest_rate", "Interest Rate", "%", "6.5"),
            integer("loan_term_years", "Loan Term", "years", "30"),
            number("property_taxes", "Annual Property Taxes", "$", "4000"),
            number("home_insurance", "Annual Home Insurance", "$", "1500"),
        ],
    },
    CalculatorDescriptor {
        id: CalculatorId::LoanRepayment,
        title: "Loan Repayment Calculator",
        description: "Find the monthly payment and total interest on a personal loan.",
        category: Category::Finance,
        icon: "loan",
        explanation: "The monthly payment comes from the amortization formula for a fixed-rate \
            loan. Total payment is the monthly payment times the number of months, and total \
            interest is what remains after subtracting the amount borrowed.",
        faq: &[],
        fields: &[
            number("loan_amount", "Loan Amount", "$", "25000"),
            number("interest_rate", "Interest Rate", "%", "7.5"),
            integer("loan_term_years", "Loan Term", "years", "5"),
        ],
    },
    CalculatorDescriptor {
        id: CalculatorId::CarLoan,
        title: "Car Loan Calculator",
        description: "Work out your auto loan payment after the down payment.",
        category: Category::Finance,
        icon: "car",
        explanation: "The amount financed is the car price minus the down payment. The monthly \
            payment is amortized over the loan term, and the total cost adds the down payment \
            back to everything paid to the lender.",
        faq: &[Faq {
            question: "Are sales tax and fees included?",
            answer: "No. Add them to the car price if they are rolled into the loan.",
        }],
        fields: &[
            number("car_price", "Car Price", "$", "35000"),
            number("down_payment", "Down Payment", "$", "5000"),
            number("interest_rate", "Interest Rate", "%", "7.5"),
            integer("loan_term_years", "Loan Term", "years", "5"),
        ],
    },
    CalculatorDescriptor {
        id: CalculatorId::CreditCardPayoff,
        title: "Credit Card Payoff Calculator",
        description: "See how long a fixed monthly payment takes to clear a card balance.",
        category: Category::Finance,
        icon: "credit-card",
        explanation: "The number of months solves the amortization formula for n: \
            n = −ln(1 − B·r/P) / ln(1 + r), with B the balance, r the monthly rate and P the \
            payment. If the payment does not exceed the monthly interest, the balance never \
            goes down.",
        faq: &[Faq {
            question: "Why does it say the balance is never paid off?",
            answer: "Your payment is less than or equal to the interest charged each month, so none of it reaches the principal.",
        }],
        fields: &[
            number("balance", "Card Balance", "$", "10000"),
            number("apr", "Interest Rate (APR)", "%", "19.99"),
            number("monthly_payment", "Monthly Payment", "$", "300"),
            date("as_of", "Starting From", "today"),
        ],
    },
    CalculatorDescriptor {
        id: CalculatorId::CompoundInterest,
        title: "Compound Interest Calculator",
        description: "Project the growth of an investment with monthly contributions.",
        category: Category::Finance,
        icon: "chart-pie",
        explanation: "Interest compounds monthly. The starting amount grows as P(1 + r)^n and each \
            monthly contribution is added as an annuity, PMT((1 + r)^n − 1)/r. Total interest is \
            the future value minus everything you put in.",
        faq: &[],
        fields: &[
            number("initial_investment", "Initial Investment", "$", "10000"),
            number("monthly_contribution", "Monthly Contribution", "$", "500"),
            integer("years", "Investment Period", "years", "10"),
            number("annual_rate", "Annual Interest Rate", "%", "8"),
        ],
    },
    CalculatorDescriptor {
        id: CalculatorId::RetirementSavings,
        title: "Retirement Savings Calculator",
        description: "Estimate your nest egg at retirement.",
        category: Category::Finance,
        icon: "retirement",
        explanation: "Your current savings and monthly contributions compound monthly until \
            your retirement age. The projection assumes a constant rate of return and does not \
            adjust for inflation.",
        faq: &[Faq {
            question: "Is this in today's dollars?",
            answer: "No. Use the inflation calculator to see what the projected amount is worth today.",
        }],
        fields: &[
            integer("current_age", "Current Age", "years", "30"),
            integer("retirement_age", "Retirement Age", "years", "65"),
            number("current_savings", "Current Savings", "$", "50000"),
            number("monthly_contribution", "Monthly Contribution", "$", "500"),
            number("annual_rate", "Expected Annual Return", "%", "7"),
        ],
    },
    CalculatorDescriptor {
        id: CalculatorId::Fire,
        title: "FIRE Calculator",
        description: "Find your financial independence number and how soon you can reach it.",
        category: Category::Finance,
        icon: "fire",
        explanation: "Your FIRE number is 25 times your annual expenses, which is the 4% rule. \
            Years to FIRE solves the future value of your savings plus yearly contributions \
            for time at your expected return.",
        faq: &[
            Faq {
                question: "What is the 4% rule?",
                answer: "A portfolio of 25 times your annual spending has historically supported 4% withdrawals for thirty years or more.",
            },
            Faq {
                question: "Why is the time infinite?",
                answer: "You spend as much as or more than you earn, so nothing is added to your savings each year.",
            },
        ],
        fields: &[
            number("annual_income", "Annual Income (after tax)", "$", "80000"),
            number("annual_expenses", "Annual Expenses", "$", "40000"),
            number("current_savings", "Current Savings", "$", "100000"),
            number("annual_return", "Expected Annual Return", "%", "7"),
        ],
    },
    CalculatorDescriptor {
        id: CalculatorId::Roi,
        title: "ROI Calculator",
        description: "Measure the return on an investment as a percentage.",
        category: Category::Finance,
        icon: "roi",
        explanation: "ROI = (final value − initial investment) / initial investment × 100.",
        faq: &[],
        fields: &[
            number("initial_investment", "Initial Investment", "$", "10000"),
            number("final_value", "Final Value", "$", "15000"),
        ],
    },
    CalculatorDescriptor {
        id: CalculatorId::ProfitMargin,
        title: "Profit Margin Calculator",
        description: "Calculate gross profit and gross margin from revenue and costs.",
        category: Category::Finance,
        icon: "business",
        explanation: "Gross profit is revenue minus cost of goods sold. Gross margin expresses \
            that profit as a share of revenue.",
        faq: &[],
        fields: &[
            number("revenue", "Revenue", "$", "500000"),
            number("cogs", "Cost of Goods Sold", "$", "300000"),
        ],
    },
    CalculatorDescriptor {
        id: CalculatorId::BreakEven,
        title: "Break-Even Calculator",
        description: "Find how many units you must sell to cover your costs.",
        category: Category::Finance,
        icon: "break-even",
        explanation: "Each unit contributes its price minus its variable cost. Dividing fixed \
            costs by that contribution margin gives the break-even volume.",
        faq: &[],
        fields: &[
            number("fixed_costs", "Fixed Costs", "$", "10000"),
            number("variable_cost", "Variable Cost per Unit", "$", "20"),
            number("price_per_unit", "Price per Unit", "$", "50"),
        ],
    },
    CalculatorDescriptor {
        id: CalculatorId::SalesTax,
        title: "Sales Tax Calculator",
        description: "Add sales tax to a price or back it out of a total.",
        category: Category::Finance,
        icon: "sales-tax",
        explanation: "Adding tax multiplies the price by (1 + rate). Removing tax divides a \
            tax-inclusive total by (1 + rate) to recover the pre-tax price.",
        faq: &[],
        fields: &[
            number("amount", "Amount", "$", "100"),
            number("tax_rate", "Tax Rate", "%", "8.5"),
            choice("mode", "Mode", &["add", "remove"], "add"),
        ],
    },
    CalculatorDescriptor {
        id: CalculatorId::Tip,
        title: "Tip Calculator",
        description: "Work out the tip and split the bill.",
        category: Category::Finance,
        icon: "tip",
        explanation: "The tip is the bill times the tip percentage. The total is divided evenly \
            between everyone at the table.",
        faq: &[],
        fields: &[
            number("bill", "Bill Amount", "$", "50"),
            number("tip_percent", "Tip", "%", "18"),
            integer("people", "Number of People", "", "1"),
        ],
    },
    CalculatorDescriptor {
        id: CalculatorId::HourlyRate,
        title: "Hourly Rate Calculator",
        description: "Convert an annual salary into an hourly wage.",
        category: Category::Finance,
        icon: "business",
        explanation: "Hourly rate = annual salary / (hours per week × weeks per year).",
        faq: &[],
        fields: &[
            number("salary", "Annual Salary", "$", "100000"),
            number("hours_per_week", "Hours per Week", "h", "35"),
            number("weeks_per_year", "Weeks Worked per Year", "", "48"),
        ],
    },
    CalculatorDescriptor {
        id: CalculatorId::Inflation,
        title: "Inflation Calculator",
        description: "See what an amount of money is worth in another year.",
        category: Category::Finance,
        icon: "inflation",
        explanation: "The amount is scaled by the ratio of annual average CPI-U values for the \
            two years. Data covers 2010 through 2023.",
        faq: &[],
        fields: &[
            number("amount", "Amount", "$", "100"),
            integer("start_year", "Start Year", "", "2010"),
            integer("end_year", "End Year", "", "2023"),
        ],
    },
    CalculatorDescriptor {
        id: CalculatorId::CryptoDca,
        title: "Crypto DCA Calculator",
        description: "Average cost of buying a fixed amount at each price.",
        category: Category::Finance,
        icon: "crypto",
        explanation: "Dollar-cost averaging buys the same dollar amount at every price. Tokens \
            bought are amount / price per purchase, and the average cost is the total invested \
            divided by the tokens accumulated.",
        faq: &[Faq {
            question: "How do I enter prices?",
            answer: "As a comma-separated list, one price per purchase. Blank or non-positive entries are ignored.",
        }],
        fields: &[
            number("investment_amount", "Amount per Purchase", "$", "100"),
            text("prices", "Prices", "40000, 42000, 38000, 45000, 50000"),
        ],
    },
    CalculatorDescriptor {
        id: CalculatorId::Currency,
        title: "Currency Converter",
        description: "Convert between currencies at a rate you supply.",
        category: Category::Finance,
        icon: "currency",
        explanation: "The converted amount is the amount times the exchange rate. Rates are not \
            fetched; enter the current rate for the pair.",
        faq: &[],
        fields: &[
            number("amount", "Amount", "", "100"),
            text("from_currency", "From", "USD"),
            text("to_currency", "To", "EUR"),
            number("exchange_rate", "Exchange Rate", "", "0.93"),
        ],
    },
    CalculatorDescriptor {
        id: CalculatorId::Percentage,
        title: "Percentage Calculator",
        description: "Answer the three everyday percentage questions at once.",
        category: Category::Finance,
        icon: "calculator",
        explanation: "A% of B = A / 100 × B. A as a percentage of B = A / B × 100. The change \
            from A to B = (B − A) / A × 100.",
        faq: &[],
        fields: &[number("value_a", "Value A", "", "15"), number("value_b", "Value B", "", "100")],
    },
    // -------------------------------------------------------------------------
    // Health & Fitness
    // -------------------------------------------------------------------------
    CalculatorDescriptor {
        id: CalculatorId::Bmi,
        title: "BMI Calculator",
        description: "Body mass index from your height and weight.",
        category: Category::HealthFitness,
        icon: "scale",
        explanation: "BMI = weight (kg) / height (m)². Below 18.5 is underweight, 18.5 to under \
            25 is normal weight, 25 to under 30 is overweight and 30 or more is obesity.",
        faq: &[Faq {
            question: "Is BMI accurate for athletes?",
            answer: "BMI does not distinguish muscle from fat, so muscular people can read as overweight.",
        }],
        fields: &[
            choice("unit_system", "Units", UNIT_SYSTEMS, "imperial"),
            number("height_feet", "Height", "ft", "5"),
            number("height_inches", "Height", "in", "10"),
            number("height_cm", "Height", "cm", "178"),
            number("weight_lbs", "Weight", "lb", "160"),
            number("weight_kg", "Weight", "kg", "72"),
        ],
    },
    CalculatorDescriptor {
        id: CalculatorId::Bmr,
        title: "BMR Calculator",
        description: "Calories your body burns at rest.",
        category: Category::HealthFitness,
        icon: "bmr",
        explanation: "Uses the Mifflin-St Jeor equation: 10 × weight (kg) + 6.25 × height (cm) \
            − 5 × age, plus 5 for men or minus 161 for women.",
        faq: &[],
        fields: &[
            integer("age", "Age", "years", "30"),
            choice("sex", "Sex", SEXES, "male"),
            number("height_cm", "Height", "cm", "180"),
            number("weight_kg", "Weight", "kg", "80"),
        ],
    },
    CalculatorDescriptor {
        id: CalculatorId::BodyFat,
        title: "Body Fat Calculator",
        description: "Estimate body fat percentage with the U.S. Navy method.",
        category: Category::HealthFitness,
        icon: "body-fat",
        explanation: "The Navy method uses circumference measurements in inches. Men: \
            86.010·log10(waist − neck) − 70.041·log10(height) + 36.76. Women: \
            163.205·log10(waist + hip − neck) − 97.684·log10(height) − 78.387.",
        faq: &[Faq {
            question: "Where should I measure?",
            answer: "Waist at the navel, neck just below the larynx and, for women, hips at the widest point.",
        }],
        fields: &[
            choice("unit_system", "Units", UNIT_SYSTEMS, "imperial"),
            choice("sex", "Sex", SEXES, "male"),
            number("height", "Height", "in/cm", "70"),
            number("waist", "Waist", "in/cm", "35"),
            number("neck", "Neck", "in/cm", "15"),
            number("hip", "Hip (women)", "in/cm", "40"),
        ],
    },
    CalculatorDescriptor {
        id: CalculatorId::CalorieIntake,
        title: "Calorie Intake Calculator",
        description: "Daily calories to maintain your current weight.",
        category: Category::HealthFitness,
        icon: "calorie",
        explanation: "Maintenance calories are your BMR times an activity multiplier: 1.2 \
            sedentary, 1.375 light, 1.55 moderate, 1.725 active and 1.9 very active.",
        faq: &[],
        fields: &[
            integer("age", "Age", "years", "30"),
            choice("sex", "Sex", SEXES, "male"),
            number("height_cm", "Height", "cm", "180"),
            number("weight_kg", "Weight", "kg", "80"),
            choice("activity", "Activity Level", ACTIVITY_LEVELS, "light"),
        ],
    },
    CalculatorDescriptor {
        id: CalculatorId::Macros,
        title: "Macros Calculator",
        description: "Split daily calories into protein, carbs and fat.",
        category: Category::HealthFitness,
        icon: "macros",
        explanation: "Each plan assigns a share of calories to protein, carbs and fat. Grams \
            follow from 4 kcal per gram of protein or carbs and 9 kcal per gram of fat.",
        faq: &[],
        fields: &[
            number("calories", "Daily Calories", "kcal", "2000"),
            choice("plan", "Diet Plan", &["balanced", "low-carb", "high-protein"], "balanced"),
        ],
    },
    CalculatorDescriptor {
        id: CalculatorId::WaterIntake,
        title: "Water Intake Calculator",
        description: "How much water to drink each day.",
        category: Category::HealthFitness,
        icon: "water",
        explanation: "Two thirds of an ounce per pound of body weight, plus 12 ounces for every \
            30 minutes of exercise. Metric results are shown in milliliters.",
        faq: &[],
        fields: &[
            choice("unit_system", "Units", UNIT_SYSTEMS, "imperial"),
            number("weight", "Weight", "lb/kg", "160"),
            number("activity_minutes", "Daily Exercise", "min", "30"),
        ],
    },
    CalculatorDescriptor {
        id: CalculatorId::PregnancyDueDate,
        title: "Pregnancy Due Date Calculator",
        description: "Estimate your due date from your last period.",
        category: Category::HealthFitness,
        icon: "pregnancy",
        explanation: "Naegele's rule: add seven days to the first day of your last menstrual \
            period, subtract three months and add one year. Gestational age counts weeks and \
            days since that date.",
        faq: &[Faq {
            question: "How accurate is the due date?",
            answer: "Only a small share of babies arrive on the due date; most arrive within two weeks either side.",
        }],
        fields: &[date("lmp_date", "First Day of Last Period", "today"), date("as_of", "Today", "today")],
    },
    // -------------------------------------------------------------------------
    // Math & Statistics
    // -------------------------------------------------------------------------
    CalculatorDescriptor {
        id: CalculatorId::ZScore,
        title: "Z-Score Calculator",
        description: "How many standard deviations a value is from the mean.",
        category: Category::MathStatistics,
        icon: "education",
        explanation: "z = (x − μ) / σ. A standard deviation of zero leaves the score undefined.",
        faq: &[],
        fields: &[
            number("raw_score", "Raw Score (x)", "", "80"),
            number("mean", "Mean (μ)", "", "70"),
            number("std_dev", "Standard Deviation (σ)", "", "5"),
        ],
    },
    CalculatorDescriptor {
        id: CalculatorId::Gpa,
        title: "GPA Calculator",
        description: "Credit-weighted grade point average on the 4.0 scale.",
        category: Category::MathStatistics,
        icon: "education",
        explanation: "Each course's grade points are multiplied by its credits. The GPA is the \
            sum of those products divided by the total credits.",
        faq: &[Faq {
            question: "How do I enter courses?",
            answer: "Separate courses with ';' and write each as name:credits:grade, for example Biology:3:A-.",
        }],
        fields: &[text("courses", "Courses", "Biology 101:3:A; History 205:3:B+; Math 300:4:A-")],
    },
    CalculatorDescriptor {
        id: CalculatorId::Scientific,
        title: "Scientific Calculator",
        description: "Standard and scientific keypad with trigonometry and logarithms.",
        category: Category::MathStatistics,
        icon: "calculator",
        explanation: "Keys are applied in order like a handheld calculator. Operators chain left \
            to right, trigonometric functions work in degrees and results are rounded to 15 \
            significant digits.",
        faq: &[],
        fields: &[text("keys", "Key Sequence", "")],
    },
    CalculatorDescriptor {
        id: CalculatorId::UnitConverter,
        title: "Unit Converter",
        description: "Convert length, mass and volume units.",
        category: Category::MathStatistics,
        icon: "tools",
        explanation: "Each unit has a factor to a base unit (meter, kilogram or liter). The value \
            is converted to the base unit and then into the target unit.",
        faq: &[],
        fields: &[
            choice("category", "Category", &["length", "mass", "volume"], "length"),
            text("from_unit", "From", "meter"),
            text("to_unit", "To", "foot"),
            number("value", "Value", "", "1"),
        ],
    },
    // -------------------------------------------------------------------------
    // Construction & Engineering
    // -------------------------------------------------------------------------
    CalculatorDescriptor {
        id: CalculatorId::ConcreteVolume,
        title: "Concrete Volume Calculator",
        description: "Cubic yards of concrete for a slab or round column.",
        category: Category::ConstructionEngineering,
        icon: "concrete",
        explanation: "A slab is length × width × thickness; a column is π × (diameter / 2)² × \
            height. Volumes are computed in cubic feet and divided by 27 for cubic yards.",
        faq: &[Faq {
            question: "Should I order extra?",
            answer: "Most contractors add 5 to 10 percent for spillage and uneven subgrade.",
        }],
        fields: &[
            choice("shape", "Shape", &["slab", "column"], "slab"),
            number("length_ft", "Length", "ft", "20"),
            number("width_ft", "Width", "ft", "10"),
            number("thickness_in", "Thickness", "in", "4"),
            number("diameter_in", "Diameter", "in", "12"),
            number("height_ft", "Height", "ft", "8"),
        ],
    },
    CalculatorDescriptor {
        id: CalculatorId::PaintCoverage,
        title: "Paint Coverage Calculator",
        description: "Gallons of paint for a wall area.",
        category: Category::ConstructionEngineering,
        icon: "paint",
        explanation: "Gallons = area × coats / coverage per gallon. Cans to buy rounds that up \
            to whole gallons.",
        faq: &[],
        fields: &[
            number("total_area", "Total Area", "sq ft", "400"),
            integer("coats", "Number of Coats", "", "2"),
            number("coverage_per_gallon", "Coverage per Gallon", "sq ft", "350"),
        ],
    },
    CalculatorDescriptor {
        id: CalculatorId::RoofPitch,
        title: "Roof Pitch Calculator",
        description: "Roof pitch and angle from rise and run.",
        category: Category::ConstructionEngineering,
        icon: "roof-pitch",
        explanation: "Pitch is written rise:run and normalized to inches of rise per 12 inches \
            of run. The angle is atan(rise / run) in degrees.",
        faq: &[],
        fields: &[number("rise", "Rise", "in", "6"), number("run", "Run", "in", "12")],
    },
    CalculatorDescriptor {
        id: CalculatorId::VoltageDrop,
        title: "Voltage Drop Calculator",
        description: "Voltage lost over a single-phase copper or aluminum run.",
        category: Category::ConstructionEngineering,
        icon: "voltage-drop",
        explanation: "VD = 2 × K × I × L / CM, where K is the conductor resistivity (12.9 for \
            copper, 21.2 for aluminum), I the current, L the one-way length in feet and CM the \
            wire area in circular mils.",
        faq: &[Faq {
            question: "How much drop is acceptable?",
            answer: "A common guideline is no more than 3% on a branch circuit and 5% in total.",
        }],
        fields: &[
            choice("material", "Conductor", &["copper", "aluminum"], "copper"),
            choice("wire_size", "Wire Size (AWG)", &["14", "12", "10", "8", "6", "4", "2"], "12"),
            number("voltage", "Voltage", "V", "120"),
            number("current", "Current", "A", "15"),
            number("distance_ft", "One-Way Distance", "ft", "100"),
        ],
    },
    CalculatorDescriptor {
        id: CalculatorId::HydrantFlow,
        title: "Fire Hydrant Flow Calculator",
        description: "Flow rate from a pitot gauge reading.",
        category: Category::ConstructionEngineering,
        icon: "fire-hydrant",
        explanation: "Q = 29.84 × c × d² × √p, with c the outlet coefficient, d the outlet \
            diameter in inches and p the pitot pressure in psi.",
        faq: &[],
        fields: &[
            number("pitot_pressure", "Pitot Pressure", "psi", "65"),
            number("nozzle_diameter", "Outlet Diameter", "in", "2.5"),
            number("coefficient", "Discharge Coefficient", "", "0.9"),
        ],
    },
    // -------------------------------------------------------------------------
    // Everyday Life
    // -------------------------------------------------------------------------
    CalculatorDescriptor {
        id: CalculatorId::Date,
        title: "Date Calculator",
        description: "Days between two dates, or a date plus or minus days.",
        category: Category::EverydayLife,
        icon: "calendar",
        explanation: "Duration mode counts the calendar days between two dates regardless of \
            order. Add/subtract mode moves a date forward or back by a number of days.",
        faq: &[],
        fields: &[
            choice("mode", "Mode", &["duration", "add-subtract"], "duration"),
            date("start_date", "Start Date", "today"),
            date("end_date", "End Date", "today+1m"),
            date("from_date", "From Date", "today"),
            integer("days", "Days", "", "30"),
            choice("operation", "Operation", &["add", "subtract"], "add"),
        ],
    },
    CalculatorDescriptor {
        id: CalculatorId::TimeCard,
        title: "Time Card Calculator",
        description: "Hours worked in a shift, minus breaks.",
        category: Category::EverydayLife,
        icon: "time-card",
        explanation: "Worked time is the end time minus the start time minus the break, shown \
            both as decimal hours and as hours:minutes.",
        faq: &[],
        fields: &[
            time("start_time", "Start Time", "09:00"),
            time("end_time", "End Time", "17:00"),
            integer("break_minutes", "Break", "min", "30"),
        ],
    },
];

static INDEX: Lazy<HashMap<&'static str, &'static CalculatorDescriptor>> = Lazy::new(|| {
    let index: HashMap<_, _> = CALCULATORS.iter().map(|d| (d.id.slug(), d)).collect();
    tracing::trace!(calculators = index.len(), "calculator index built");
    index
});

// ============================================================================
// Lookup
// ============================================================================

/// Every calculator in registry order.
pub fn all() -> &'static [CalculatorDescriptor] {
    &CALCULATORS
}

/// Look up a calculator by slug.
pub fn find(slug: &str) -> Option<&'static CalculatorDescriptor> {
    INDEX.get(slug.trim()).copied()
}

/// Case-insensitive substring match on title or description.
///
/// A blank query returns every calculator.
pub fn search(query: &str) -> Vec<&'static CalculatorDescriptor> {
    let query = query.trim().to_lowercase();
    CALCULATORS
        .iter()
        .filter(|d| {
            query.is_empty()
                || d.title.to_lowercase().contains(&query)
                || d.description.to_lowercase().contains(&query)
        })
        .collect()
}

/// Group calculators by category in display order, dropping empty groups.
pub fn by_category<'a, I>(descriptors: I) -> Vec<(Category, Vec<&'a CalculatorDescriptor>)>
where
    I: IntoIterator<Item = &'a CalculatorDescriptor>,
{
    let descriptors: Vec<_> = descriptors.into_iter().collect();
    let mut categories = Category::ALL;
    categories.sort_by_key(Category::sort_order);
    categories
        .into_iter()
        .filter_map(|category| {
            let members: Vec<&'a CalculatorDescriptor> =
                descriptors.iter().copied().filter(|d| d.category == category).collect();
            (!members.is_empty()).then_some((category, members))
        })
        .collect()
}
