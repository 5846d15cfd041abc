//! # bearcalc_core - Everyday Calculator Engine
//!
//! `bearcalc_core` holds the formulas behind a catalog of single-purpose
//! calculators: loans and savings, health and fitness, construction and
//! engineering, math and everyday time/date arithmetic. All inputs and
//! outputs are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Each calculator is a pure function of its inputs
//! - **JSON-First**: All inputs and results implement Serialize/Deserialize
//! - **Lenient or strict**: Bad input gives a zeroed result, or a structured error on request
//!
//! ## Quick Start
//!
//! ```rust
//! use bearcalc_core::calculations::CalculationItem;
//! use bearcalc_core::form::FormState;
//! use bearcalc_core::registry::CalculatorId;
//!
//! let form = FormState::new()
//!     .with("loan_amount", "25000")
//!     .with("interest_rate", "7.5")
//!     .with("loan_term_years", "5");
//!
//! let item = CalculationItem::from_form(CalculatorId::LoanRepayment, &form);
//! let evaluation = item.calculate("$").unwrap();
//! assert_eq!(evaluation.headline().unwrap().value, "$500.95");
//! ```
//!
//! ## Modules
//!
//! - [`registry`] - Calculator catalog, categories, field definitions
//! - [`form`] - String form state and loose numeric parsing
//! - [`calculations`] - Every calculator's input, result and formula
//! - [`equations`] - Formulas shared between calculators
//! - [`units`] - Type-safe unit wrappers and converter tables
//! - [`format`] - Display formatting and report lines
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod equations;
pub mod errors;
pub mod form;
pub mod format;
pub mod registry;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{Calculation, CalculationItem, Evaluation, Report};
pub use errors::{CalcError, CalcResult};
pub use form::FormState;
pub use format::ReportLine;
pub use registry::{CalculatorDescriptor, CalculatorId, Category};
