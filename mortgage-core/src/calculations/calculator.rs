use crate::calculations::amortization::compute;
use crate::models::{LoanField, LoanForm, PaymentBreakdown};

/// A live calculator session.
///
/// Owns the text form and keeps its [`PaymentBreakdown`] in step with it:
/// every edit recomputes, so the breakdown always reflects the current form.
#[derive(Debug, Clone)]
pub struct MortgageCalculator {
    form: LoanForm,
    breakdown: PaymentBreakdown,
}

impl Default for MortgageCalculator {
    fn default() -> Self {
        Self::new(LoanForm::default())
    }
}

impl MortgageCalculator {
    pub fn new(form: LoanForm) -> Self {
        let breakdown = compute(&form.to_inputs());
        Self { form, breakdown }
    }

    pub fn form(&self) -> &LoanForm {
        &self.form
    }

    pub fn breakdown(&self) -> &PaymentBreakdown {
        &self.breakdown
    }

    /// Inputs currently treated as zero because their text is unusable.
    pub fn coerced_fields(&self) -> Vec<LoanField> {
        self.form.coerced_fields()
    }

    /// Stores the new text for `field` and recomputes.
    pub fn set_field(
        &mut self,
        field: LoanField,
        value: impl Into<String>,
    ) -> &PaymentBreakdown {
        self.form.set(field, value);
        tracing::debug!(field = field.as_str(), value = %self.form.get(field), "calculator input changed");
        self.recompute()
    }

    /// Recomputes from the current form. Calling this repeatedly without
    /// edits yields the same breakdown every time.
    pub fn recompute(&mut self) -> &PaymentBreakdown {
        self.breakdown = compute(&self.form.to_inputs());
        &self.breakdown
    }
}
