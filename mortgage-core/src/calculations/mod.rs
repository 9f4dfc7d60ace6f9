//! Payment calculations for the mortgage calculator.
//!
//! [`amortization`] holds the pure closed-form computation; [`calculator`]
//! wraps it in a live session that recomputes as inputs change.

pub mod amortization;
pub mod calculator;
pub mod common;

pub use amortization::compute;
pub use calculator::MortgageCalculator;
