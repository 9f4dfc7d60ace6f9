use std::fmt;

use serde::{Deserialize, Serialize};

use super::options::{CoApplicant, CreditScoreBand, EmploymentType, LoanPurpose, LoanType};

/// The kind of value a field holds, which decides its format check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Free text; only the required check applies.
    Text,
    Email,
    Phone,
    /// Non-negative decimal amount.
    Amount,
    /// One code from a closed option set.
    Choice,
}

/// Identifies one field of the loan application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldId {
    // Personal information
    FirstName,
    LastName,
    Email,
    Phone,

    // Loan details
    LoanType,
    HomePrice,
    DownPayment,
    LoanPurpose,

    // Income and employment
    AnnualIncome,
    EmploymentType,
    Employer,
    YearsEmployed,

    // Review and submit
    CreditScore,
    MonthlyDebts,
    HasCoApplicant,
}

impl FieldId {
    pub fn all() -> &'static [FieldId] {
        &[
            FieldId::FirstName,
            FieldId::LastName,
            FieldId::Email,
            FieldId::Phone,
            FieldId::LoanType,
            FieldId::HomePrice,
            FieldId::DownPayment,
            FieldId::LoanPurpose,
            FieldId::AnnualIncome,
            FieldId::EmploymentType,
            FieldId::Employer,
            FieldId::YearsEmployed,
            FieldId::CreditScore,
            FieldId::MonthlyDebts,
            FieldId::HasCoApplicant,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FirstName => "first_name",
            Self::LastName => "last_name",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::LoanType => "loan_type",
            Self::HomePrice => "home_price",
            Self::DownPayment => "down_payment",
            Self::LoanPurpose => "loan_purpose",
            Self::AnnualIncome => "annual_income",
            Self::EmploymentType => "employment_type",
            Self::Employer => "employer",
            Self::YearsEmployed => "years_employed",
            Self::CreditScore => "credit_score",
            Self::MonthlyDebts => "monthly_debts",
            Self::HasCoApplicant => "has_co_applicant",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::all().iter().copied().find(|f| f.as_str() == s)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::FirstName => "First Name",
            Self::LastName => "Last Name",
            Self::Email => "Email Address",
            Self::Phone => "Phone Number",
            Self::LoanType => "Loan Type",
            Self::HomePrice => "Home Price",
            Self::DownPayment => "Down Payment",
            Self::LoanPurpose => "Loan Purpose",
            Self::AnnualIncome => "Annual Income",
            Self::EmploymentType => "Employment Type",
            Self::Employer => "Employer Name",
            Self::YearsEmployed => "Years with Current Employer",
            Self::CreditScore => "Estimated Credit Score",
            Self::MonthlyDebts => "Monthly Debt Payments",
            Self::HasCoApplicant => "Co-applicant",
        }
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            Self::FirstName | Self::LastName | Self::Employer => FieldKind::Text,
            Self::Email => FieldKind::Email,
            Self::Phone => FieldKind::Phone,
            Self::HomePrice
            | Self::DownPayment
            | Self::AnnualIncome
            | Self::YearsEmployed
            | Self::MonthlyDebts => FieldKind::Amount,
            Self::LoanType
            | Self::LoanPurpose
            | Self::EmploymentType
            | Self::CreditScore
            | Self::HasCoApplicant => FieldKind::Choice,
        }
    }

    /// `(code, label)` pairs for [`FieldKind::Choice`] fields; empty otherwise.
    pub fn options(&self) -> Vec<(&'static str, &'static str)> {
        match self {
            Self::LoanType => LoanType::all()
                .iter()
                .map(|o| (o.as_str(), o.label()))
                .collect(),
            Self::LoanPurpose => LoanPurpose::all()
                .iter()
                .map(|o| (o.as_str(), o.label()))
                .collect(),
            Self::EmploymentType => EmploymentType::all()
                .iter()
                .map(|o| (o.as_str(), o.label()))
                .collect(),
            Self::CreditScore => CreditScoreBand::all()
                .iter()
                .map(|o| (o.as_str(), o.label()))
                .collect(),
            Self::HasCoApplicant => CoApplicant::all()
                .iter()
                .map(|o| (o.as_str(), o.label()))
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Human label for a stored option code, if this field is a choice and
    /// the code is one of its options.
    pub fn option_label(
        &self,
        code: &str,
    ) -> Option<&'static str> {
        self.options()
            .into_iter()
            .find(|(c, _)| *c == code)
            .map(|(_, label)| label)
    }
}

impl fmt::Display for FieldId {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Every answer collected by the application wizard, as entered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationRecord {
    // Personal information
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,

    // Loan details
    pub loan_type: String,
    pub home_price: String,
    pub down_payment: String,
    pub loan_purpose: String,

    // Income and employment
    pub annual_income: String,
    pub employment_type: String,
    pub employer: String,
    pub years_employed: String,

    // Review and submit
    pub credit_score: String,
    pub monthly_debts: String,
    pub has_co_applicant: String,
}

impl ApplicationRecord {
    pub fn get(
        &self,
        field: FieldId,
    ) -> &str {
        match field {
            FieldId::FirstName => &self.first_name,
            FieldId::LastName => &self.last_name,
            FieldId::Email => &self.email,
            FieldId::Phone => &self.phone,
            FieldId::LoanType => &self.loan_type,
            FieldId::HomePrice => &self.home_price,
            FieldId::DownPayment => &self.down_payment,
            FieldId::LoanPurpose => &self.loan_purpose,
            FieldId::AnnualIncome => &self.annual_income,
            FieldId::EmploymentType => &self.employment_type,
            FieldId::Employer => &self.employer,
            FieldId::YearsEmployed => &self.years_employed,
            FieldId::CreditScore => &self.credit_score,
            FieldId::MonthlyDebts => &self.monthly_debts,
            FieldId::HasCoApplicant => &self.has_co_applicant,
        }
    }

    pub fn set(
        &mut self,
        field: FieldId,
        value: impl Into<String>,
    ) {
        let slot = match field {
            FieldId::FirstName => &mut self.first_name,
            FieldId::LastName => &mut self.last_name,
            FieldId::Email => &mut self.email,
            FieldId::Phone => &mut self.phone,
            FieldId::LoanType => &mut self.loan_type,
            FieldId::HomePrice => &mut self.home_price,
            FieldId::DownPayment => &mut self.down_payment,
            FieldId::LoanPurpose => &mut self.loan_purpose,
            FieldId::AnnualIncome => &mut self.annual_income,
            FieldId::EmploymentType => &mut self.employment_type,
            FieldId::Employer => &mut self.employer,
            FieldId::YearsEmployed => &mut self.years_employed,
            FieldId::CreditScore => &mut self.credit_score,
            FieldId::MonthlyDebts => &mut self.monthly_debts,
            FieldId::HasCoApplicant => &mut self.has_co_applicant,
        };
        *slot = value.into();
    }

    /// True when every field holds a non-blank value.
    pub fn is_complete(&self) -> bool {
        FieldId::all()
            .iter()
            .all(|f| !self.get(*f).trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn field_codes_round_trip() {
        for field in FieldId::all() {
            assert_eq!(FieldId::parse(field.as_str()), Some(*field));
        }
    }

    #[test]
    fn set_then_get_every_field() {
        let mut record = ApplicationRecord::default();
        for field in FieldId::all() {
            record.set(*field, field.as_str());
        }

        for field in FieldId::all() {
            assert_eq!(record.get(*field), field.as_str());
        }
        assert!(record.is_complete());
    }

    #[test]
    fn blank_field_makes_record_incomplete() {
        let mut record = ApplicationRecord::default();
        for field in FieldId::all() {
            record.set(*field, "x");
        }
        record.set(FieldId::Employer, "   ");

        assert!(!record.is_complete());
    }

    #[test]
    fn choice_fields_expose_their_options() {
        let codes: Vec<_> = FieldId::LoanPurpose
            .options()
            .into_iter()
            .map(|(code, _)| code)
            .collect();

        assert_eq!(codes, vec!["purchase", "refinance", "cashout"]);
        assert!(FieldId::Employer.options().is_empty());
    }

    #[test]
    fn option_label_resolves_known_codes_only() {
        assert_eq!(FieldId::LoanType.option_label("fha"), Some("FHA"));
        assert_eq!(FieldId::LoanType.option_label("FHA"), None);
        assert_eq!(FieldId::Email.option_label("fha"), None);
    }

    #[test]
    fn kinds_cover_format_checked_fields() {
        assert_eq!(FieldId::Email.kind(), FieldKind::Email);
        assert_eq!(FieldId::Phone.kind(), FieldKind::Phone);
        assert_eq!(FieldId::YearsEmployed.kind(), FieldKind::Amount);
        assert_eq!(FieldId::HasCoApplicant.kind(), FieldKind::Choice);
        assert_eq!(FieldId::Employer.kind(), FieldKind::Text);
    }
}
