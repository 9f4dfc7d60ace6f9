//! Four-step loan application wizard.
//!
//! The wizard walks a fixed sequence of [`WizardStep`]s. Each step gates the
//! next on per-field validation of its own fields; answers accumulate in one
//! [`ApplicationRecord`](crate::ApplicationRecord) that is handed back whole on
//! a successful submit.

mod state;
mod step;
mod validation;

pub use state::{SubmitError, Transition, WizardAction, WizardState};
pub use step::WizardStep;
pub use validation::{FieldError, ValidationErrors, validate_field, validate_step};
