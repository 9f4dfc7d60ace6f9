//! Closed option sets offered by the enumerated application fields.
//!
//! Each set round-trips through the short lowercase code stored in the
//! [`ApplicationRecord`](super::ApplicationRecord).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoanType {
    Conventional,
    Fha,
    Va,
    Usda,
    Jumbo,
}

impl LoanType {
    pub fn all() -> &'static [LoanType] {
        &[
            LoanType::Conventional,
            LoanType::Fha,
            LoanType::Va,
            LoanType::Usda,
            LoanType::Jumbo,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Conventional => "conventional",
            Self::Fha => "fha",
            Self::Va => "va",
            Self::Usda => "usda",
            Self::Jumbo => "jumbo",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Conventional => "Conventional",
            Self::Fha => "FHA",
            Self::Va => "VA",
            Self::Usda => "USDA",
            Self::Jumbo => "Jumbo",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::all().iter().copied().find(|t| t.as_str() == s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoanPurpose {
    Purchase,
    Refinance,
    #[serde(rename = "cashout")]
    CashOutRefinance,
}

impl LoanPurpose {
    pub fn all() -> &'static [LoanPurpose] {
        &[
            LoanPurpose::Purchase,
            LoanPurpose::Refinance,
            LoanPurpose::CashOutRefinance,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Purchase => "purchase",
            Self::Refinance => "refinance",
            Self::CashOutRefinance => "cashout",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Purchase => "Purchase",
            Self::Refinance => "Refinance",
            Self::CashOutRefinance => "Cash-out Refinance",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::all().iter().copied().find(|p| p.as_str() == s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmploymentType {
    FullTime,
    PartTime,
    SelfEmployed,
    Contractor,
    Retired,
}

impl EmploymentType {
    pub fn all() -> &'static [EmploymentType] {
        &[
            EmploymentType::FullTime,
            EmploymentType::PartTime,
            EmploymentType::SelfEmployed,
            EmploymentType::Contractor,
            EmploymentType::Retired,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FullTime => "fulltime",
            Self::PartTime => "parttime",
            Self::SelfEmployed => "selfemployed",
            Self::Contractor => "contractor",
            Self::Retired => "retired",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::FullTime => "Full-time Employee",
            Self::PartTime => "Part-time Employee",
            Self::SelfEmployed => "Self-employed",
            Self::Contractor => "Contractor",
            Self::Retired => "Retired",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::all().iter().copied().find(|e| e.as_str() == s)
    }
}

/// Self-reported credit score band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CreditScoreBand {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl CreditScoreBand {
    pub fn all() -> &'static [CreditScoreBand] {
        &[
            CreditScoreBand::Excellent,
            CreditScoreBand::Good,
            CreditScoreBand::Fair,
            CreditScoreBand::Poor,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Excellent => "excellent",
            Self::Good => "good",
            Self::Fair => "fair",
            Self::Poor => "poor",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Excellent => "Excellent (740+)",
            Self::Good => "Good (670-739)",
            Self::Fair => "Fair (580-669)",
            Self::Poor => "Poor (below 580)",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::all().iter().copied().find(|b| b.as_str() == s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoApplicant {
    No,
    Yes,
}

impl CoApplicant {
    pub fn all() -> &'static [CoApplicant] {
        &[CoApplicant::No, CoApplicant::Yes]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::No => "no",
            Self::Yes => "yes",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::No => "No",
            Self::Yes => "Yes",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::all().iter().copied().find(|c| c.as_str() == s)
    }
}
