use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a string cannot be parsed as a non-negative amount.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseAmountError {
    #[error("amount is empty")]
    Empty,

    #[error("invalid amount '{0}'")]
    Invalid(String),

    #[error("amount '{0}' is negative")]
    Negative(String),
}

/// Normalizes input for decimal parsing: trims whitespace, drops a leading
/// dollar sign and removes commas (thousands separator).
fn normalize_amount_input(s: &str) -> String {
    let trimmed = s.trim();
    trimmed
        .strip_prefix('$')
        .unwrap_or(trimmed)
        .trim_start()
        .replace(',', "")
}

/// Parses a string into a non-negative [`Decimal`].
///
/// Handles comma as thousands separator (e.g. `"1,234.56"`) and an optional
/// leading `$`. Empty input is an error here; callers that want the lenient
/// calculator behaviour use [`LoanForm::to_inputs`].
pub fn parse_amount(s: &str) -> Result<Decimal, ParseAmountError> {
    let normalized = normalize_amount_input(s);
    if normalized.is_empty() {
        return Err(ParseAmountError::Empty);
    }
    let value: Decimal = normalized
        .parse()
        .map_err(|_| ParseAmountError::Invalid(s.to_string()))?;
    if value.is_sign_negative() && !value.is_zero() {
        return Err(ParseAmountError::Negative(s.to_string()));
    }
    Ok(value)
}

/// Numeric inputs to the amortization calculator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanInputs {
    pub home_price: Decimal,
    pub down_payment: Decimal,

    /// Annual interest rate in percent (6.5 means 6.5%).
    pub annual_interest_rate: Decimal,

    /// Loan term in years.
    pub loan_term_years: Decimal,

    pub annual_property_tax: Decimal,
    pub annual_insurance: Decimal,

    /// Homeowners'-association fee, already monthly.
    pub monthly_hoa: Decimal,
}

/// Identifies one of the calculator's text inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoanField {
    HomePrice,
    DownPayment,
    InterestRate,
    LoanTerm,
    PropertyTax,
    Insurance,
    Hoa,
}

impl LoanField {
    pub fn all() -> &'static [LoanField] {
        &[
            LoanField::HomePrice,
            LoanField::DownPayment,
            LoanField::InterestRate,
            LoanField::LoanTerm,
            LoanField::PropertyTax,
            LoanField::Insurance,
            LoanField::Hoa,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HomePrice => "home_price",
            Self::DownPayment => "down_payment",
            Self::InterestRate => "interest_rate",
            Self::LoanTerm => "loan_term",
            Self::PropertyTax => "property_tax",
            Self::Insurance => "insurance",
            Self::Hoa => "hoa",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::HomePrice => "Home Price",
            Self::DownPayment => "Down Payment",
            Self::InterestRate => "Interest Rate (%)",
            Self::LoanTerm => "Loan Term (years)",
            Self::PropertyTax => "Annual Property Tax",
            Self::Insurance => "Annual Home Insurance",
            Self::Hoa => "Monthly HOA Fees",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::all().iter().copied().find(|f| f.as_str() == s)
    }
}

/// Calculator inputs exactly as typed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoanForm {
    pub home_price: String,
    pub down_payment: String,
    pub interest_rate: String,
    pub loan_term: String,
    pub property_tax: String,
    pub insurance: String,
    pub hoa: String,
}

impl Default for LoanForm {
    fn default() -> Self {
        Self {
            home_price: "400000".to_string(),
            down_payment: "80000".to_string(),
            interest_rate: "6.5".to_string(),
            loan_term: "30".to_string(),
            property_tax: "5000".to_string(),
            insurance: "1200".to_string(),
            hoa: "0".to_string(),
        }
    }
}

impl LoanForm {
    /// A form with every input blank.
    pub fn empty() -> Self {
        Self {
            home_price: String::new(),
            down_payment: String::new(),
            interest_rate: String::new(),
            loan_term: String::new(),
            property_tax: String::new(),
            insurance: String::new(),
            hoa: String::new(),
        }
    }

    pub fn get(
        &self,
        field: LoanField,
    ) -> &str {
        match field {
            LoanField::HomePrice => &self.home_price,
            LoanField::DownPayment => &self.down_payment,
            LoanField::InterestRate => &self.interest_rate,
            LoanField::LoanTerm => &self.loan_term,
            LoanField::PropertyTax => &self.property_tax,
            LoanField::Insurance => &self.insurance,
            LoanField::Hoa => &self.hoa,
        }
    }

    pub fn set(
        &mut self,
        field: LoanField,
        value: impl Into<String>,
    ) {
        let slot = match field {
            LoanField::HomePrice => &mut self.home_price,
            LoanField::DownPayment => &mut self.down_payment,
            LoanField::InterestRate => &mut self.interest_rate,
            LoanField::LoanTerm => &mut self.loan_term,
            LoanField::PropertyTax => &mut self.property_tax,
            LoanField::Insurance => &mut self.insurance,
            LoanField::Hoa => &mut self.hoa,
        };
        *slot = value.into();
    }

    /// Parses every input, coercing anything unusable to zero.
    ///
    /// Empty, malformed and negative text all become `0`. Malformed and
    /// negative inputs are logged at `warn` level with distinct messages. Use [`LoanForm::coerced_fields`] to find out
    /// which inputs were affected.
    pub fn to_inputs(&self) -> LoanInputs {
        let amount = |field: LoanField| {
            let raw = self.get(field);
            parse_amount(raw).unwrap_or_else(|e| {
                match e {
                    ParseAmountError::Empty => {}
                    ParseAmountError::Negative(_) => {
                        tracing::warn!(field = field.as_str(), input = %raw, "clamped negative amount to zero");
                    }
                    ParseAmountError::Invalid(_) => {
                        tracing::warn!(field = field.as_str(), input = %raw, "unreadable amount treated as zero");
                    }
                }
                Decimal::ZERO
            })
        };

        LoanInputs {
            home_price: amount(LoanField::HomePrice),
            down_payment: amount(LoanField::DownPayment),
            annual_interest_rate: amount(LoanField::InterestRate),
            loan_term_years: amount(LoanField::LoanTerm),
            annual_property_tax: amount(LoanField::PropertyTax),
            annual_insurance: amount(LoanField::Insurance),
            monthly_hoa: amount(LoanField::Hoa),
        }
    }

    /// Fields whose text did not parse as a non-negative amount and were
    /// therefore treated as zero by [`LoanForm::to_inputs`].
    pub fn coerced_fields(&self) -> Vec<LoanField> {
        LoanField::all()
            .iter()
            .copied()
            .filter(|f| parse_amount(self.get(*f)).is_err())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    // =========================================================================
    // parse_amount tests
    // =========================================================================

    #[test]
    fn parse_amount_accepts_comma_thousands_separator() {
        assert_eq!(parse_amount("1,234.56").unwrap(), dec!(1234.56));
        assert_eq!(parse_amount("1,234,567.89").unwrap(), dec!(1234567.89));
    }

    #[test]
    fn parse_amount_accepts_dollar_prefix_and_whitespace() {
        assert_eq!(parse_amount("  $400,000 ").unwrap(), dec!(400000));
        assert_eq!(parse_amount("$ 12.5").unwrap(), dec!(12.5));
    }

    #[test]
    fn parse_amount_rejects_empty() {
        assert_eq!(parse_amount("   "), Err(ParseAmountError::Empty));
    }

    #[test]
    fn parse_amount_rejects_garbage() {
        assert_eq!(
            parse_amount("abc"),
            Err(ParseAmountError::Invalid("abc".to_string()))
        );
    }

    #[test]
    fn parse_amount_rejects_negative() {
        assert_eq!(
            parse_amount("-5"),
            Err(ParseAmountError::Negative("-5".to_string()))
        );
    }

    #[test]
    fn parse_amount_allows_negative_zero() {
        assert_eq!(parse_amount("-0").unwrap(), Decimal::ZERO);
    }

    // =========================================================================
    // LoanForm tests
    // =========================================================================

    #[test]
    fn default_form_matches_calculator_presets() {
        let inputs = LoanForm::default().to_inputs();

        assert_eq!(inputs.home_price, dec!(400000));
        assert_eq!(inputs.down_payment, dec!(80000));
        assert_eq!(inputs.annual_interest_rate, dec!(6.5));
        assert_eq!(inputs.loan_term_years, dec!(30));
        assert_eq!(inputs.annual_property_tax, dec!(5000));
        assert_eq!(inputs.annual_insurance, dec!(1200));
        assert_eq!(inputs.monthly_hoa, dec!(0));
    }

    #[test]
    fn malformed_text_is_coerced_to_zero() {
        let mut form = LoanForm::default();
        form.set(LoanField::PropertyTax, "lots");
        form.set(LoanField::Hoa, "-25");

        let inputs = form.to_inputs();

        assert_eq!(inputs.annual_property_tax, Decimal::ZERO);
        assert_eq!(inputs.monthly_hoa, Decimal::ZERO);
        assert_eq!(
            form.coerced_fields(),
            vec![LoanField::PropertyTax, LoanField::Hoa]
        );
    }

    /// Captures `warn` output while `f` runs.
    fn captured_warnings(f: impl FnOnce()) -> String {
        use std::io;
        use std::sync::{Arc, Mutex};

        #[derive(Clone, Default)]
        struct Buffer(Arc<Mutex<Vec<u8>>>);

        impl io::Write for Buffer {
            fn write(
                &mut self,
                buf: &[u8],
            ) -> io::Result<usize> {
                self.0.lock().unwrap().extend_from_slice(buf);
                Ok(buf.len())
            }

            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let buffer = Buffer::default();
        let writer = buffer.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        tracing::subscriber::with_default(subscriber, f);

        let bytes = buffer.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn negative_text_is_logged_as_clamped() {
        let mut form = LoanForm::default();
        form.set(LoanField::InterestRate, "-1");

        let mut inputs = None;
        let logs = captured_warnings(|| inputs = Some(form.to_inputs()));

        assert_eq!(inputs.unwrap().annual_interest_rate, Decimal::ZERO);
        assert!(logs.contains("clamped negative amount to zero"), "{logs}");
        assert!(logs.contains("interest_rate"), "{logs}");
        assert!(!logs.contains("unreadable"), "{logs}");
    }

    #[test]
    fn malformed_text_is_logged_as_unreadable() {
        let mut form = LoanForm::default();
        form.set(LoanField::Insurance, "lots");
        form.set(LoanField::Hoa, "");

        let logs = captured_warnings(|| {
            form.to_inputs();
        });

        assert!(logs.contains("unreadable amount treated as zero"), "{logs}");
        assert!(!logs.contains("clamped"), "{logs}");
        assert_eq!(logs.lines().count(), 1, "{logs}");
    }

    #[test]
    fn empty_form_reports_every_field_coerced() {
        let form = LoanForm::empty();

        assert_eq!(form.coerced_fields(), LoanField::all().to_vec());
        assert_eq!(form.to_inputs().home_price, Decimal::ZERO);
    }

    #[test]
    fn set_then_get_returns_raw_text() {
        let mut form = LoanForm::empty();
        form.set(LoanField::InterestRate, " 7.25 ");

        assert_eq!(form.get(LoanField::InterestRate), " 7.25 ");
        assert_eq!(form.to_inputs().annual_interest_rate, dec!(7.25));
    }

    #[test]
    fn loan_field_codes_round_trip() {
        for field in LoanField::all() {
            assert_eq!(LoanField::parse(field.as_str()), Some(*field));
        }
    }
}
