use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Monthly cost components and loan totals derived from [`LoanInputs`].
///
/// Computed values are rounded to cents; the HOA fee is carried as entered.
/// `total_monthly_payment` is the exact sum of the four monthly components.
///
/// [`LoanInputs`]: super::LoanInputs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentBreakdown {
    /// Amount financed (home price minus down payment, never below zero).
    pub principal: Decimal,

    /// Number of monthly payments in the schedule.
    pub payment_count: u64,

    pub monthly_principal_and_interest: Decimal,
    pub monthly_tax: Decimal,
    pub monthly_insurance: Decimal,
    pub monthly_hoa: Decimal,
    pub total_monthly_payment: Decimal,

    /// Interest paid over the life of the loan.
    pub total_interest: Decimal,

    /// Sum of every principal-and-interest payment.
    pub total_payments: Decimal,
}

/// One labelled slice of the monthly payment, for charting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartSegment {
    pub label: &'static str,
    pub value: Decimal,
}

impl PaymentBreakdown {
    /// Returns `false` for the degenerate zero-term breakdown.
    pub fn has_schedule(&self) -> bool {
        self.payment_count > 0
    }

    /// The monthly components in display order, omitting any that are zero.
    pub fn chart_segments(&self) -> Vec<ChartSegment> {
        [
            ("Principal & Interest", self.monthly_principal_and_interest),
            ("Property Taxes", self.monthly_tax),
            ("Insurance", self.monthly_insurance),
            ("HOA Fees", self.monthly_hoa),
        ]
        .into_iter()
        .filter(|(_, value)| *value > Decimal::ZERO)
        .map(|(label, value)| ChartSegment { label, value })
        .collect()
    }
}
