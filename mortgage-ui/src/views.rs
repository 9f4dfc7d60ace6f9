//! Plain-text rendering of calculator results and wizard screens.
//!
//! Everything here returns a `String` so the interactive loop and the tests
//! share one code path.

use std::fmt::Write;

use mortgage_core::{
    ApplicationRecord, FieldId, FieldKind, LoanField, LoanInputs, PaymentBreakdown, WizardState,
    WizardStep,
};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::utils::{format_percent, format_usd};

const PROGRESS_WIDTH: usize = 20;

/// Share of `total` taken by `value`, as a percentage with one decimal.
/// Zero when the share cannot be represented.
fn share_of(
    value: Decimal,
    total: Decimal,
) -> Decimal {
    value
        .checked_div(total)
        .and_then(|fraction| fraction.checked_mul(Decimal::ONE_HUNDRED))
        .unwrap_or_default()
        .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
}

/// The payment breakdown table shown by `mortgage calc`.
///
/// `coerced` lists the inputs that could not be read and were treated as
/// zero; each gets a note under the table.
pub fn render_breakdown(
    inputs: &LoanInputs,
    breakdown: &PaymentBreakdown,
    coerced: &[LoanField],
) -> String {
    let mut out = String::new();
    let row = |out: &mut String, label: &str, value: String| {
        let _ = writeln!(out, "  {label:<24}{value:>16}");
    };

    let _ = writeln!(out, "Monthly Payment Breakdown");
    let _ = writeln!(out, "{}", "-".repeat(42));
    row(&mut out, "Home Price", format_usd(inputs.home_price));
    row(&mut out, "Down Payment", format_usd(inputs.down_payment));
    row(&mut out, "Loan Amount", format_usd(breakdown.principal));
    row(
        &mut out,
        "Interest Rate",
        format_percent(inputs.annual_interest_rate),
    );
    let _ = writeln!(out);

    row(
        &mut out,
        "Principal & Interest",
        format_usd(breakdown.monthly_principal_and_interest),
    );
    row(&mut out, "Property Taxes", format_usd(breakdown.monthly_tax));
    row(&mut out, "Insurance", format_usd(breakdown.monthly_insurance));
    row(&mut out, "HOA Fees", format_usd(breakdown.monthly_hoa));
    row(
        &mut out,
        "Total Monthly Payment",
        format_usd(breakdown.total_monthly_payment),
    );
    let _ = writeln!(out);

    if breakdown.has_schedule() {
        row(
            &mut out,
            "Number of Payments",
            breakdown.payment_count.to_string(),
        );
        row(&mut out, "Total of Payments", format_usd(breakdown.total_payments));
        row(&mut out, "Total Interest", format_usd(breakdown.total_interest));
    } else {
        let _ = writeln!(out, "  No payment schedule: the loan term is zero.");
    }

    let segments = breakdown.chart_segments();
    if !segments.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Payment Composition");
        for segment in segments {
            let share = share_of(segment.value, breakdown.total_monthly_payment);
            let _ = writeln!(out, "  {:<24}{:>15}%", segment.label, share);
        }
    }

    for field in coerced {
        let _ = writeln!(
            out,
            "note: {} could not be read as an amount and was treated as 0",
            field.label()
        );
    }

    out
}

/// `Step 2 of 4: Loan Details` with a progress bar and the step description.
pub fn render_step_header(state: &WizardState) -> String {
    let step = state.step();
    let percent = usize::from(state.progress_percent());
    let filled = PROGRESS_WIDTH * percent / 100;

    format!(
        "\nStep {} of {}: {}\n[{}{}] {}%\n{}\n",
        step.index() + 1,
        WizardStep::COUNT,
        step.title(),
        "#".repeat(filled),
        ".".repeat(PROGRESS_WIDTH - filled),
        percent,
        step.description()
    )
}

/// The prompt for one field, listing choice codes and the current value.
pub fn render_field_prompt(
    field: FieldId,
    current: &str,
) -> String {
    let mut out = String::new();
    if field.kind() == FieldKind::Choice {
        let options: Vec<String> = field
            .options()
            .into_iter()
            .map(|(code, label)| format!("{code} = {label}"))
            .collect();
        let _ = writeln!(out, "  options: {}", options.join(", "));
    }

    if current.is_empty() {
        let _ = write!(out, "{}: ", field.label());
    } else {
        let _ = write!(out, "{} [{}]: ", field.label(), current);
    }
    out
}

/// Field errors for the current step, one per line, in form order.
pub fn render_errors(state: &WizardState) -> String {
    state
        .errors()
        .iter()
        .map(|(field, error)| format!("  ! {}: {}\n", field.label(), error))
        .collect()
}

fn display_value(
    field: FieldId,
    value: &str,
) -> String {
    match field.kind() {
        FieldKind::Choice => field.option_label(value).unwrap_or(value).to_string(),
        _ => value.to_string(),
    }
}

/// Every answer grouped by step, with choice codes shown as their labels.
pub fn render_review(record: &ApplicationRecord) -> String {
    let mut out = String::new();
    for step in WizardStep::all() {
        let _ = writeln!(out, "{}", step.title());
        for field in step.fields() {
            let _ = writeln!(
                out,
                "  {:<30}{}",
                field.label(),
                display_value(*field, record.get(*field))
            );
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use mortgage_core::{LoanForm, compute};
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    // =========================================================================
    // Breakdown
    // =========================================================================

    #[test]
    fn breakdown_shows_components_and_totals() {
        let inputs = LoanForm::default().to_inputs();
        let breakdown = compute(&inputs);

        let text = render_breakdown(&inputs, &breakdown, &[]);

        assert!(text.contains("$320,000.00"));
        assert!(text.contains("6.5%"));
        assert!(text.contains("$2,022.62"));
        assert!(text.contains("$416.67"));
        assert!(text.contains("$2,539.29"));
        assert!(text.contains("$408,142.36"));
        assert!(text.contains("360"));
        assert!(!text.contains("note:"));
    }

    #[test]
    fn composition_omits_zero_components() {
        let inputs = LoanForm::default().to_inputs();
        let breakdown = compute(&inputs);

        let text = render_breakdown(&inputs, &breakdown, &[]);
        let composition = text.split("Payment Composition").nth(1).unwrap();

        assert!(composition.contains("Principal & Interest"));
        assert!(composition.contains("79.7%"));
        assert!(!composition.contains("HOA Fees"));
    }

    #[test]
    fn zero_term_has_no_schedule() {
        let mut form = LoanForm::default();
        form.loan_term = "0".to_string();
        let inputs = form.to_inputs();

        let text = render_breakdown(&inputs, &compute(&inputs), &[]);

        assert!(text.contains("No payment schedule"));
        assert!(!text.contains("Total Interest"));
    }

    #[test]
    fn coerced_fields_are_noted() {
        let mut form = LoanForm::default();
        form.property_tax = "lots".to_string();
        let inputs = form.to_inputs();

        let text = render_breakdown(&inputs, &compute(&inputs), &form.coerced_fields());

        assert!(text.contains("note: Annual Property Tax could not be read"));
    }

    #[test]
    fn breakdown_renders_amounts_near_decimal_max() {
        let mut form = LoanForm::default();
        form.property_tax = "10000000000000000000000000000".to_string();
        form.hoa = Decimal::MAX.to_string();
        let inputs = form.to_inputs();
        let breakdown = compute(&inputs);

        let text = render_breakdown(&inputs, &breakdown, &form.coerced_fields());

        assert!(form.coerced_fields().is_empty());
        assert!(text.contains("Payment Composition"));
        assert!(text.contains("Property Taxes"));
    }

    #[test]
    fn share_of_large_values_does_not_overflow() {
        assert_eq!(share_of(Decimal::MAX, Decimal::MAX), dec!(100));
        assert_eq!(share_of(Decimal::MAX, dec!(0.5)), dec!(0));
    }

    #[test]
    fn share_of_zero_total_is_zero() {
        assert_eq!(share_of(dec!(10), dec!(0)), dec!(0));
        assert_eq!(share_of(dec!(1), dec!(3)), dec!(33.3));
    }

    // =========================================================================
    // Wizard screens
    // =========================================================================

    #[test]
    fn step_header_shows_position_and_progress() {
        let state = WizardState::new();

        let text = render_step_header(&state);

        assert!(text.contains("Step 1 of 4: Personal Information"));
        assert!(text.contains("[#####...............] 25%"));
    }

    #[test]
    fn choice_prompt_lists_codes() {
        let text = render_field_prompt(FieldId::HasCoApplicant, "");

        assert_eq!(
            text,
            "  options: no = No, yes = Yes\nCo-applicant: "
        );
    }

    #[test]
    fn prompt_shows_current_value() {
        assert_eq!(
            render_field_prompt(FieldId::FirstName, "Jane"),
            "First Name [Jane]: "
        );
    }

    #[test]
    fn errors_are_listed_in_form_order() {
        let mut state = WizardState::new();
        state.next();

        let text = render_errors(&state);

        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "  ! First Name: This field is required");
        assert_eq!(lines[3], "  ! Phone Number: This field is required");
    }

    #[test]
    fn review_uses_option_labels() {
        let mut record = ApplicationRecord::default();
        record.first_name = "Jane".to_string();
        record.loan_type = "fha".to_string();

        let text = render_review(&record);

        assert!(text.contains("Personal Information"));
        assert!(text.contains("Jane"));
        assert!(text.contains("FHA"));
        assert!(text.contains("Review & Submit"));
        assert!(text.contains("Estimated Credit Score"));
    }
}
