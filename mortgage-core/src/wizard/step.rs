use serde::{Deserialize, Serialize};

use crate::models::FieldId;

/// The wizard's fixed, ordered steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum WizardStep {
    PersonalInfo,
    LoanDetails,
    IncomeEmployment,
    ReviewSubmit,
}

impl WizardStep {
    pub const COUNT: usize = 4;

    pub fn all() -> &'static [WizardStep] {
        &[
            WizardStep::PersonalInfo,
            WizardStep::LoanDetails,
            WizardStep::IncomeEmployment,
            WizardStep::ReviewSubmit,
        ]
    }

    pub fn first() -> Self {
        Self::PersonalInfo
    }

    pub fn last() -> Self {
        Self::ReviewSubmit
    }

    /// Zero-based position in the sequence.
    pub fn index(&self) -> usize {
        match self {
            Self::PersonalInfo => 0,
            Self::LoanDetails => 1,
            Self::IncomeEmployment => 2,
            Self::ReviewSubmit => 3,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::all().get(index).copied()
    }

    /// The following step, or `None` on the last one.
    pub fn next(&self) -> Option<Self> {
        Self::from_index(self.index() + 1)
    }

    /// The preceding step, or `None` on the first one.
    pub fn previous(&self) -> Option<Self> {
        self.index().checked_sub(1).and_then(Self::from_index)
    }

    pub fn is_last(&self) -> bool {
        *self == Self::last()
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::PersonalInfo => "Personal Information",
            Self::LoanDetails => "Loan Details",
            Self::IncomeEmployment => "Income & Employment",
            Self::ReviewSubmit => "Review & Submit",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::PersonalInfo => "Tell us about yourself",
            Self::LoanDetails => "What type of loan do you need?",
            Self::IncomeEmployment => "Help us understand your financial situation",
            Self::ReviewSubmit => "Review your information and submit",
        }
    }

    /// Fields collected (and required) on this step, in display order.
    pub fn fields(&self) -> &'static [FieldId] {
        match self {
            Self::PersonalInfo => &[
                FieldId::FirstName,
                FieldId::LastName,
                FieldId::Email,
                FieldId::Phone,
            ],
            Self::LoanDetails => &[
                FieldId::LoanType,
                FieldId::HomePrice,
                FieldId::DownPayment,
                FieldId::LoanPurpose,
            ],
            Self::IncomeEmployment => &[
                FieldId::AnnualIncome,
                FieldId::EmploymentType,
                FieldId::Employer,
                FieldId::YearsEmployed,
            ],
            Self::ReviewSubmit => &[
                FieldId::CreditScore,
                FieldId::MonthlyDebts,
                FieldId::HasCoApplicant,
            ],
        }
    }

    /// The step that collects `field`.
    pub fn of_field(field: FieldId) -> Self {
        Self::all()
            .iter()
            .copied()
            .find(|step| step.fields().contains(&field))
            .unwrap_or(Self::ReviewSubmit)
    }
}
