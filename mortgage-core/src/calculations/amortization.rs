//! Closed-form fixed-rate mortgage payment.
//!
//! | Quantity | Formula |
//! |----------|---------|
//! | principal `P` | home price - down payment (minimum 0) |
//! | monthly rate `r` | annual rate % / 100 / 12 |
//! | payment count `n` | term years × 12, rounded to a whole payment |
//! | monthly P&I | `P / n` when `r = 0`, else `P·r·(1+r)^n / ((1+r)^n - 1)` |
//! | monthly tax / insurance | annual amount / 12 |
//! | monthly HOA | as entered |
//! | total monthly | P&I + tax + insurance + HOA |
//! | total payments | monthly P&I × n |
//! | total interest | total payments - `P` |
//!
//! The computation is total: a zero-length term yields a breakdown with no
//! principal-and-interest component, and arithmetic saturates at the decimal
//! range instead of panicking.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use mortgage_core::{LoanInputs, compute};
//!
//! let breakdown = compute(&LoanInputs {
//!     home_price: dec!(360000),
//!     down_payment: dec!(0),
//!     annual_interest_rate: dec!(0),
//!     loan_term_years: dec!(30),
//!     annual_property_tax: dec!(0),
//!     annual_insurance: dec!(0),
//!     monthly_hoa: dec!(0),
//! });
//!
//! assert_eq!(breakdown.monthly_principal_and_interest, dec!(1000.00));
//! assert_eq!(breakdown.total_interest, dec!(0));
//! ```

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, MathematicalOps, RoundingStrategy};

use crate::calculations::common::{MONTHS_PER_YEAR, monthly_share, non_negative, round_half_up};
use crate::models::{LoanInputs, PaymentBreakdown};

/// Computes the monthly payment breakdown for `inputs`.
///
/// Identical inputs always produce identical output.
pub fn compute(inputs: &LoanInputs) -> PaymentBreakdown {
    let principal = loan_principal(inputs.home_price, inputs.down_payment);
    let rate = monthly_rate(inputs.annual_interest_rate);
    let payment_count = payment_count(inputs.loan_term_years);

    let exact_payment = monthly_principal_and_interest(principal, rate, payment_count);
    let monthly_principal_and_interest = round_half_up(exact_payment);

    let monthly_tax = monthly_share(inputs.annual_property_tax);
    let monthly_insurance = monthly_share(inputs.annual_insurance);
    let monthly_hoa = inputs.monthly_hoa;

    let total_monthly_payment = monthly_principal_and_interest
        .saturating_add(monthly_tax)
        .saturating_add(monthly_insurance)
        .saturating_add(monthly_hoa);

    let (total_payments, total_interest) = if payment_count == 0 {
        (Decimal::ZERO, Decimal::ZERO)
    } else {
        let total = round_half_up(exact_payment.saturating_mul(Decimal::from(payment_count)));
        (total, total.saturating_sub(principal))
    };

    tracing::debug!(
        %principal,
        payment_count,
        %monthly_principal_and_interest,
        %total_monthly_payment,
        "computed payment breakdown"
    );

    PaymentBreakdown {
        principal,
        payment_count,
        monthly_principal_and_interest,
        monthly_tax,
        monthly_insurance,
        monthly_hoa,
        total_monthly_payment,
        total_interest,
        total_payments,
    }
}

/// Amount financed, floored at zero when the down payment covers the price.
fn loan_principal(
    home_price: Decimal,
    down_payment: Decimal,
) -> Decimal {
    non_negative(home_price.saturating_sub(down_payment))
}

/// Converts an annual percentage rate to a monthly fraction.
fn monthly_rate(annual_rate_percent: Decimal) -> Decimal {
    annual_rate_percent / Decimal::from(100 * MONTHS_PER_YEAR)
}

/// Number of monthly payments, rounded to the nearest whole payment.
fn payment_count(term_years: Decimal) -> u64 {
    let months = term_years
        .saturating_mul(Decimal::from(MONTHS_PER_YEAR))
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    if months <= Decimal::ZERO {
        0
    } else {
        months.to_u64().unwrap_or(u64::MAX)
    }
}

/// Unrounded monthly principal-and-interest payment.
fn monthly_principal_and_interest(
    principal: Decimal,
    rate: Decimal,
    payment_count: u64,
) -> Decimal {
    if payment_count == 0 {
        return Decimal::ZERO;
    }
    let n = Decimal::from(payment_count);
    if rate.is_zero() {
        return principal / n;
    }

    match Decimal::ONE.saturating_add(rate).checked_powu(payment_count) {
        // (1+r)^n / ((1+r)^n - 1); a zero denominator means r is too small
        // to register over n periods, which is the zero-rate case.
        Some(growth) => match growth.checked_div(growth.saturating_sub(Decimal::ONE)) {
            Some(ratio) => principal.saturating_mul(rate).saturating_mul(ratio),
            None => principal / n,
        },
        // Growth beyond the decimal range: the ratio above is 1 to within
        // precision.
        None => principal.saturating_mul(rate),
    }
}
