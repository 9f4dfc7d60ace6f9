use thiserror::Error;
use tracing::{debug, info};

use crate::models::{ApplicationRecord, FieldId};

use super::step::WizardStep;
use super::validation::{FieldError, ValidationErrors, validate_step};

/// An input event for [`WizardState::apply`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardAction {
    FieldChange(FieldId, String),
    Next,
    Previous,
    Submit,
}

/// What an action did to the wizard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// A field value was stored.
    Edited(FieldId),

    /// The current step changed. `from == to` when already at the end the
    /// move points toward.
    Moved { from: WizardStep, to: WizardStep },

    /// Validation failed; the wizard now shows `step` with its errors.
    Blocked { step: WizardStep, errors: usize },

    /// The application was complete and valid and has been handed back.
    Submitted(ApplicationRecord),

    /// The action has no effect in the current state.
    Ignored,
}

/// Why a submit attempt was refused.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SubmitError {
    #[error("submit is only available on the final step (currently on {})", .current.title())]
    NotAtFinalStep { current: WizardStep },

    #[error("{count} field(s) on {} need attention", .step.title())]
    Invalid { step: WizardStep, count: usize },

    #[error("application has already been submitted")]
    AlreadySubmitted,
}

/// The wizard's state: current step, collected answers and the current
/// step's field errors.
#[derive(Debug, Clone)]
pub struct WizardState {
    step: WizardStep,
    record: ApplicationRecord,
    errors: ValidationErrors,
    submitted: bool,
}

impl Default for WizardState {
    fn default() -> Self {
        Self::new()
    }
}

impl WizardState {
    /// A fresh wizard on the first step with an empty record.
    pub fn new() -> Self {
        Self {
            step: WizardStep::first(),
            record: ApplicationRecord::default(),
            errors: ValidationErrors::new(),
            submitted: false,
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn record(&self) -> &ApplicationRecord {
        &self.record
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn error(
        &self,
        field: FieldId,
    ) -> Option<FieldError> {
        self.errors.get(&field).copied()
    }

    /// True once a submit has succeeded; every later action is ignored.
    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    /// Share of the steps reached, counting the current one.
    pub fn progress_percent(&self) -> u8 {
        ((self.step.index() + 1) * 100 / WizardStep::COUNT) as u8
    }

    /// Dispatches `action` to the matching transition.
    pub fn apply(
        &mut self,
        action: WizardAction,
    ) -> Transition {
        if self.submitted {
            debug!(?action, "wizard already submitted; ignoring action");
            return Transition::Ignored;
        }

        match action {
            WizardAction::FieldChange(field, value) => {
                self.set_field(field, value);
                Transition::Edited(field)
            }
            WizardAction::Next => {
                let from = self.step;
                if self.next() {
                    Transition::Moved {
                        from,
                        to: self.step,
                    }
                } else {
                    Transition::Blocked {
                        step: self.step,
                        errors: self.errors.len(),
                    }
                }
            }
            WizardAction::Previous => {
                let from = self.step;
                self.previous();
                Transition::Moved {
                    from,
                    to: self.step,
                }
            }
            WizardAction::Submit => match self.submit() {
                Ok(record) => Transition::Submitted(record),
                Err(SubmitError::Invalid { step, count }) => {
                    Transition::Blocked {
                        step,
                        errors: count,
                    }
                }
                Err(SubmitError::NotAtFinalStep { .. } | SubmitError::AlreadySubmitted) => {
                    Transition::Ignored
                }
            },
        }
    }

    /// Stores `value` for `field` and clears that field's error, leaving
    /// other errors in place.
    pub fn set_field(
        &mut self,
        field: FieldId,
        value: impl Into<String>,
    ) {
        if self.submitted {
            return;
        }
        self.record.set(field, value);
        if self.errors.remove(&field).is_some() {
            debug!(%field, "cleared field error");
        }
    }

    /// Validates the current step and, if it passes, moves to the next one.
    ///
    /// Returns `false` when validation failed; the errors are then available
    /// through [`WizardState::errors`] and the step is unchanged.
    pub fn next(&mut self) -> bool {
        if self.submitted || !self.validate_current() {
            return false;
        }
        if let Some(next) = self.step.next() {
            debug!(from = self.step.title(), to = next.title(), "advancing wizard");
            self.step = next;
        }
        true
    }

    /// Moves back one step. Entered values and errors are kept.
    pub fn previous(&mut self) {
        if self.submitted {
            return;
        }
        if let Some(previous) = self.step.previous() {
            debug!(from = self.step.title(), to = previous.title(), "moving wizard back");
            self.step = previous;
        }
    }

    /// Validates the final step, then every earlier one, and hands back the
    /// completed record.
    ///
    /// If an earlier step no longer validates (a field was edited after the
    /// step was passed), the wizard returns to that step with its errors.
    /// On success the wizard becomes terminal and gives up its record.
    ///
    /// # Errors
    ///
    /// Returns [`SubmitError`] if:
    /// - the wizard is not on the final step
    /// - any step has field errors
    /// - the application was already submitted
    pub fn submit(&mut self) -> Result<ApplicationRecord, SubmitError> {
        if self.submitted {
            return Err(SubmitError::AlreadySubmitted);
        }
        if !self.step.is_last() {
            return Err(SubmitError::NotAtFinalStep { current: self.step });
        }
        if !self.validate_current() {
            return Err(SubmitError::Invalid {
                step: self.step,
                count: self.errors.len(),
            });
        }

        for step in WizardStep::all().iter().copied().filter(|s| !s.is_last()) {
            let errors = validate_step(step, &self.record);
            if !errors.is_empty() {
                debug!(step = step.title(), errors = errors.len(), "earlier step failed on submit");
                let count = errors.len();
                self.step = step;
                self.errors = errors;
                return Err(SubmitError::Invalid { step, count });
            }
        }

        self.submitted = true;
        self.errors.clear();
        info!(loan_type = %self.record.loan_type, "loan application submitted");
        Ok(std::mem::take(&mut self.record))
    }

    /// Replaces the error map with the current step's validation result.
    fn validate_current(&mut self) -> bool {
        self.errors = validate_step(self.step, &self.record);
        if !self.errors.is_empty() {
            debug!(step = self.step.title(), errors = self.errors.len(), "step failed validation");
        }
        self.errors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn fill(
        wizard: &mut WizardState,
        values: &[(FieldId, &str)],
    ) {
        for (field, value) in values {
            wizard.set_field(*field, *value);
        }
    }

    const PERSONAL: &[(FieldId, &str)] = &[
        (FieldId::FirstName, "Jane"),
        (FieldId::LastName, "Doe"),
        (FieldId::Email, "jane@example.com"),
        (FieldId::Phone, "(555) 123-4567"),
    ];

    const LOAN: &[(FieldId, &str)] = &[
        (FieldId::LoanType, "conventional"),
        (FieldId::HomePrice, "450000"),
        (FieldId::DownPayment, "90000"),
        (FieldId::LoanPurpose, "purchase"),
    ];

    const INCOME: &[(FieldId, &str)] = &[
        (FieldId::AnnualIncome, "125000"),
        (FieldId::EmploymentType, "fulltime"),
        (FieldId::Employer, "Acme Corp"),
        (FieldId::YearsEmployed, "4.5"),
    ];

    const REVIEW: &[(FieldId, &str)] = &[
        (FieldId::CreditScore, "good"),
        (FieldId::MonthlyDebts, "650"),
        (FieldId::HasCoApplicant, "no"),
    ];

    fn wizard_at_review() -> WizardState {
        let mut wizard = WizardState::new();
        for values in [PERSONAL, LOAN, INCOME] {
            fill(&mut wizard, values);
            assert!(wizard.next());
        }
        wizard
    }

    // =========================================================================
    // next tests
    // =========================================================================

    #[test]
    fn next_with_empty_step_blocks_with_four_errors() {
        let mut wizard = WizardState::new();

        assert!(!wizard.next());

        assert_eq!(wizard.step(), WizardStep::PersonalInfo);
        assert_eq!(wizard.errors().len(), 4);
        assert_eq!(wizard.error(FieldId::Phone), Some(FieldError::Required));
    }

    #[test]
    fn next_with_bad_email_reports_only_email() {
        let mut wizard = WizardState::new();
        fill(&mut wizard, PERSONAL);
        wizard.set_field(FieldId::Email, "abc");

        assert!(!wizard.next());

        assert_eq!(wizard.step(), WizardStep::PersonalInfo);
        assert_eq!(
            wizard.errors().iter().collect::<Vec<_>>(),
            vec![(&FieldId::Email, &FieldError::InvalidEmail)]
        );

        wizard.set_field(FieldId::Email, "abc@example.com");
        assert!(wizard.next());
        assert_eq!(wizard.step(), WizardStep::LoanDetails);
        assert!(wizard.errors().is_empty());
    }

    #[test]
    fn next_on_final_step_never_moves_past_it() {
        let mut wizard = wizard_at_review();
        fill(&mut wizard, REVIEW);

        assert!(wizard.next());

        assert_eq!(wizard.step(), WizardStep::ReviewSubmit);
        assert!(!wizard.is_submitted());
    }

    // =========================================================================
    // set_field tests
    // =========================================================================

    #[test]
    fn set_field_clears_only_that_fields_error() {
        let mut wizard = WizardState::new();
        wizard.next();
        assert_eq!(wizard.errors().len(), 4);

        wizard.set_field(FieldId::FirstName, "J");

        assert_eq!(wizard.error(FieldId::FirstName), None);
        assert_eq!(wizard.errors().len(), 3);
        assert_eq!(wizard.error(FieldId::LastName), Some(FieldError::Required));
    }

    // =========================================================================
    // previous tests
    // =========================================================================

    #[test]
    fn previous_keeps_entered_values() {
        let mut wizard = WizardState::new();
        for values in [PERSONAL, LOAN] {
            fill(&mut wizard, values);
            wizard.next();
        }
        assert_eq!(wizard.step(), WizardStep::IncomeEmployment);
        wizard.set_field(FieldId::Employer, "Acme Corp");

        wizard.previous();

        assert_eq!(wizard.step(), WizardStep::LoanDetails);
        assert_eq!(wizard.record().employer, "Acme Corp");
        assert_eq!(wizard.record().home_price, "450000");
    }

    #[test]
    fn previous_keeps_errors_and_stops_at_first_step() {
        let mut wizard = WizardState::new();
        fill(&mut wizard, PERSONAL);
        wizard.next();
        wizard.next();
        assert_eq!(wizard.errors().len(), 4);

        wizard.previous();
        wizard.previous();

        assert_eq!(wizard.step(), WizardStep::PersonalInfo);
        assert_eq!(wizard.errors().len(), 4);
    }

    // =========================================================================
    // submit tests
    // =========================================================================

    #[test]
    fn submit_returns_complete_record() {
        let mut wizard = wizard_at_review();
        fill(&mut wizard, REVIEW);

        let record = wizard.submit().unwrap();

        assert!(record.is_complete());
        assert_eq!(record.first_name, "Jane");
        assert_eq!(record.has_co_applicant, "no");
        assert!(wizard.errors().is_empty());
        assert!(wizard.is_submitted());
    }

    #[test]
    fn submit_before_final_step_is_refused() {
        let mut wizard = WizardState::new();
        fill(&mut wizard, PERSONAL);

        assert_eq!(
            wizard.submit(),
            Err(SubmitError::NotAtFinalStep {
                current: WizardStep::PersonalInfo
            })
        );
        assert!(wizard.errors().is_empty());
    }

    #[test]
    fn submit_with_missing_review_fields_blocks() {
        let mut wizard = wizard_at_review();
        wizard.set_field(FieldId::CreditScore, "excellent");

        assert_eq!(
            wizard.submit(),
            Err(SubmitError::Invalid {
                step: WizardStep::ReviewSubmit,
                count: 2
            })
        );
        assert_eq!(wizard.step(), WizardStep::ReviewSubmit);
    }

    #[test]
    fn submit_returns_to_earlier_step_that_no_longer_validates() {
        let mut wizard = wizard_at_review();
        fill(&mut wizard, REVIEW);
        wizard.set_field(FieldId::Phone, "555");

        assert_eq!(
            wizard.submit(),
            Err(SubmitError::Invalid {
                step: WizardStep::PersonalInfo,
                count: 1
            })
        );
        assert_eq!(wizard.step(), WizardStep::PersonalInfo);
        assert_eq!(wizard.error(FieldId::Phone), Some(FieldError::InvalidPhone));
    }

    #[test]
    fn actions_after_submit_are_ignored() {
        let mut wizard = wizard_at_review();
        fill(&mut wizard, REVIEW);
        wizard.submit().unwrap();

        assert_eq!(wizard.apply(WizardAction::Previous), Transition::Ignored);
        assert_eq!(
            wizard.apply(WizardAction::FieldChange(FieldId::FirstName, "X".into())),
            Transition::Ignored
        );
        assert_eq!(wizard.submit(), Err(SubmitError::AlreadySubmitted));
    }

    // =========================================================================
    // apply tests
    // =========================================================================

    #[test]
    fn apply_reports_each_transition() {
        let mut wizard = WizardState::new();

        assert_eq!(
            wizard.apply(WizardAction::Next),
            Transition::Blocked {
                step: WizardStep::PersonalInfo,
                errors: 4
            }
        );
        for (field, value) in PERSONAL {
            assert_eq!(
                wizard.apply(WizardAction::FieldChange(*field, value.to_string())),
                Transition::Edited(*field)
            );
        }
        assert_eq!(
            wizard.apply(WizardAction::Next),
            Transition::Moved {
                from: WizardStep::PersonalInfo,
                to: WizardStep::LoanDetails
            }
        );
        assert_eq!(
            wizard.apply(WizardAction::Submit),
            Transition::Ignored
        );
        assert_eq!(
            wizard.apply(WizardAction::Previous),
            Transition::Moved {
                from: WizardStep::LoanDetails,
                to: WizardStep::PersonalInfo
            }
        );
    }

    #[test]
    fn progress_tracks_current_step() {
        let mut wizard = WizardState::new();
        assert_eq!(wizard.progress_percent(), 25);

        fill(&mut wizard, PERSONAL);
        wizard.next();
        assert_eq!(wizard.progress_percent(), 50);

        let wizard = wizard_at_review();
        assert_eq!(wizard.progress_percent(), 100);
    }
}
