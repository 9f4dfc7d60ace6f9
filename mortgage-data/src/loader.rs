//! CSV loader for batches of loan scenarios.
//!
//! ## CSV Format
//!
//! Columns are matched by header name, so order does not matter. Header names
//! are case-sensitive.
//!
//! | Column          | Required | Type    | Notes                                  |
//! |-----------------|----------|---------|----------------------------------------|
//! | `name`          | no       | string  | Defaults to `scenario <row>`           |
//! | `home_price`    | yes      | decimal | e.g. `400000`                          |
//! | `down_payment`  | yes      | decimal |                                        |
//! | `interest_rate` | yes      | decimal | Annual percent, e.g. `6.5`             |
//! | `loan_term`     | yes      | decimal | Years                                  |
//! | `property_tax`  | no       | decimal | Annual; empty cell or missing column → 0 |
//! | `insurance`     | no       | decimal | Annual; empty cell or missing column → 0 |
//! | `hoa`           | no       | decimal | Monthly; empty cell or missing column → 0 |
//!
//! ### Example
//!
//! ```csv
//! name,home_price,down_payment,interest_rate,loan_term,property_tax,insurance,hoa
//! starter,400000,80000,6.5,30,5000,1200,0
//! condo,250000,25000,6.875,15,,900,325
//! ```

use std::io::Read;

use mortgage_core::LoanInputs;
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when loading scenario data.
#[derive(Debug, Error)]
pub enum ScenarioLoaderError {
    /// The CSV was structurally invalid, a required column was missing or a
    /// cell could not be read as a number.
    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    /// A cell held a negative amount. `row` is 1-based (header excluded).
    #[error("negative {column} on row {row}")]
    NegativeAmount { column: &'static str, row: usize },
}

/// A single row of the scenario CSV, exactly as laid out in the file.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ScenarioRecord {
    #[serde(default)]
    pub name: Option<String>,
    pub home_price: Decimal,
    pub down_payment: Decimal,
    pub interest_rate: Decimal,
    pub loan_term: Decimal,
    #[serde(default)]
    pub property_tax: Option<Decimal>,
    #[serde(default)]
    pub insurance: Option<Decimal>,
    #[serde(default)]
    pub hoa: Option<Decimal>,
}

/// A named set of calculator inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoanScenario {
    pub name: String,
    pub inputs: LoanInputs,
}

impl ScenarioRecord {
    /// Converts the row into calculator inputs. `row` is 1-based and used for
    /// the default name and error messages.
    fn into_scenario(
        self,
        row: usize,
    ) -> Result<LoanScenario, ScenarioLoaderError> {
        let amounts = [
            ("home_price", Some(self.home_price)),
            ("down_payment", Some(self.down_payment)),
            ("interest_rate", Some(self.interest_rate)),
            ("loan_term", Some(self.loan_term)),
            ("property_tax", self.property_tax),
            ("insurance", self.insurance),
            ("hoa", self.hoa),
        ];
        if let Some((column, _)) = amounts
            .iter()
            .find(|(_, value)| value.is_some_and(|v| v < Decimal::ZERO))
        {
            return Err(ScenarioLoaderError::NegativeAmount {
                column: *column,
                row,
            });
        }

        let name = self
            .name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| format!("scenario {row}"));

        Ok(LoanScenario {
            name,
            inputs: LoanInputs {
                home_price: self.home_price,
                down_payment: self.down_payment,
                annual_interest_rate: self.interest_rate,
                loan_term_years: self.loan_term,
                annual_property_tax: self.property_tax.unwrap_or_default(),
                annual_insurance: self.insurance.unwrap_or_default(),
                monthly_hoa: self.hoa.unwrap_or_default(),
            },
        })
    }
}

/// Loader for loan scenarios from CSV files.
pub struct ScenarioLoader;

impl ScenarioLoader {
    /// Parse scenarios from a CSV reader, in file order.
    ///
    /// The reader can be any type that implements `Read`, such as a file or
    /// a byte slice.
    ///
    /// # Errors
    ///
    /// * [`ScenarioLoaderError::Csv`] if the CSV is structurally invalid or a
    ///   required field cannot be deserialised.
    /// * [`ScenarioLoaderError::NegativeAmount`] if any amount is negative.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<LoanScenario>, ScenarioLoaderError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .flexible(false)
            .from_reader(reader);

        let scenarios = csv_reader
            .deserialize::<ScenarioRecord>()
            .enumerate()
            .map(|(idx, result)| result?.into_scenario(idx + 1))
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(count = scenarios.len(), "parsed loan scenarios");
        Ok(scenarios)
    }
}
