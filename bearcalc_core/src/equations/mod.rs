//! # Shared Formulas
//!
//! Formulas used by more than one calculator live here, so each is written
//! and tested exactly once.
//!
//! ## Modules
//!
//! - [`finance`] - Annuity payment, future value, NPER-style period solving
//! - [`health`] - BMI banding, Mifflin–St Jeor BMR, Navy body fat

pub mod finance;
pub mod health;

pub use finance::{
    amortized_payment,
    future_value_annuity,
    future_value_lump_sum,
    monthly_rate,
    payoff_periods,
    periods_to_target,
};

pub use health::{
    body_mass_index,
    mifflin_st_jeor,
    navy_body_fat,
    BmiCategory,
    Sex,
};
