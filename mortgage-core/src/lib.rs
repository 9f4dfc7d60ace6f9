pub mod calculations;
pub mod intake;
pub mod models;
pub mod wizard;

pub use calculations::{MortgageCalculator, compute};
pub use intake::{ApplicationIntake, IntakeError, IntakeReceipt};
pub use models::*;
pub use wizard::{FieldError, SubmitError, Transition, WizardAction, WizardState, WizardStep};
