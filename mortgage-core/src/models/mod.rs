mod application;
mod loan_inputs;
mod options;
mod payment_breakdown;

pub use application::{ApplicationRecord, FieldId, FieldKind};
pub use loan_inputs::{LoanField, LoanForm, LoanInputs, ParseAmountError, parse_amount};
pub use options::{CoApplicant, CreditScoreBand, EmploymentType, LoanPurpose, LoanType};
pub use payment_breakdown::{ChartSegment, PaymentBreakdown};
