//! CSV output of computed payment breakdowns, one row per scenario.

use std::io::Write;

use mortgage_core::PaymentBreakdown;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::loader::LoanScenario;

/// A scenario name alongside its breakdown, flattened for CSV output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BreakdownRow {
    pub name: String,
    pub principal: Decimal,
    pub payment_count: u64,
    pub monthly_principal_and_interest: Decimal,
    pub monthly_tax: Decimal,
    pub monthly_insurance: Decimal,
    pub monthly_hoa: Decimal,
    pub total_monthly_payment: Decimal,
    pub total_interest: Decimal,
    pub total_payments: Decimal,
}

impl BreakdownRow {
    pub fn new(
        scenario: &LoanScenario,
        breakdown: &PaymentBreakdown,
    ) -> Self {
        Self {
            name: scenario.name.clone(),
            principal: breakdown.principal,
            payment_count: breakdown.payment_count,
            monthly_principal_and_interest: breakdown.monthly_principal_and_interest,
            monthly_tax: breakdown.monthly_tax,
            monthly_insurance: breakdown.monthly_insurance,
            monthly_hoa: breakdown.monthly_hoa,
            total_monthly_payment: breakdown.total_monthly_payment,
            total_interest: breakdown.total_interest,
            total_payments: breakdown.total_payments,
        }
    }
}

/// Writes [`BreakdownRow`]s as CSV with a header row.
pub struct BreakdownWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> BreakdownWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: csv::WriterBuilder::new().from_writer(writer),
        }
    }

    pub fn write_row(
        &mut self,
        row: &BreakdownRow,
    ) -> Result<(), csv::Error> {
        self.writer.serialize(row)
    }

    /// Computes and writes every scenario, returning the number written.
    pub fn write_scenarios(
        &mut self,
        scenarios: &[LoanScenario],
    ) -> Result<usize, csv::Error> {
        for scenario in scenarios {
            let breakdown = mortgage_core::compute(&scenario.inputs);
            self.write_row(&BreakdownRow::new(scenario, &breakdown))?;
        }
        self.writer.flush()?;
        Ok(scenarios.len())
    }

    /// Flushes and returns the underlying writer.
    pub fn into_inner(self) -> Result<W, csv::Error> {
        self.writer
            .into_inner()
            .map_err(|e| csv::Error::from(e.into_error()))
    }
}
