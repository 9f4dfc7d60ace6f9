//! The two front-end flows: the payment calculator and the interactive
//! application wizard.

use std::io::{self, BufRead, Write};
use std::sync::Mutex;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use mortgage_core::{
    ApplicationIntake, ApplicationRecord, ChartSegment, IntakeError, IntakeReceipt, LoanField,
    LoanForm, LoanInputs, MortgageCalculator, PaymentBreakdown, Transition, WizardAction,
    WizardState,
};
use serde::Serialize;
use tracing::info;

use crate::views;

// ─── calculator ──────────────────────────────────────────────────────────────

/// JSON shape printed by `mortgage calc --json`.
#[derive(Debug, Serialize)]
pub struct CalcReport<'a> {
    pub inputs: LoanInputs,
    pub breakdown: &'a PaymentBreakdown,
    pub chart: Vec<ChartSegment>,
    /// Inputs that could not be read and were treated as zero.
    pub coerced_fields: Vec<&'static str>,
}

/// Starts a calculator session from the configured form, then applies
/// command-line overrides on top of it.
pub fn build_calculator<'a>(
    form: LoanForm,
    overrides: impl IntoIterator<Item = (LoanField, Option<&'a str>)>,
) -> MortgageCalculator {
    let mut calculator = MortgageCalculator::new(form);
    for (field, value) in overrides {
        if let Some(value) = value {
            calculator.set_field(field, value);
        }
    }
    calculator
}

/// Renders the calculator's current breakdown as a table or JSON.
pub fn render_calc(
    calculator: &MortgageCalculator,
    json: bool,
) -> Result<String> {
    let coerced = calculator.coerced_fields();
    let inputs = calculator.form().to_inputs();
    let breakdown = calculator.breakdown();

    if json {
        let report = CalcReport {
            inputs,
            breakdown,
            chart: breakdown.chart_segments(),
            coerced_fields: coerced.iter().map(LoanField::as_str).collect(),
        };
        serde_json::to_string_pretty(&report).context("Failed to serialize breakdown")
    } else {
        Ok(views::render_breakdown(&inputs, breakdown, &coerced))
    }
}

// ─── intake ──────────────────────────────────────────────────────────────────

/// Intake that prints each accepted application as pretty JSON.
pub struct JsonIntake<W> {
    out: Mutex<W>,
}

pub type StdoutIntake = JsonIntake<io::Stdout>;

impl<W: Write + Send> JsonIntake<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
            .into_inner()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl StdoutIntake {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

#[async_trait]
impl<W: Write + Send> ApplicationIntake for JsonIntake<W> {
    async fn submit(
        &self,
        record: &ApplicationRecord,
    ) -> Result<IntakeReceipt, IntakeError> {
        let received_at = Utc::now();
        let reference = format!("APP-{}", received_at.format("%Y%m%d-%H%M%S"));

        let mut out = self
            .out
            .lock()
            .map_err(|_| IntakeError::Unavailable("output lock poisoned".to_string()))?;
        serde_json::to_writer_pretty(&mut *out, record)
            .map_err(|e| IntakeError::Unavailable(e.to_string()))?;
        writeln!(out).map_err(|e| IntakeError::Unavailable(e.to_string()))?;

        Ok(IntakeReceipt {
            reference,
            received_at,
        })
    }
}

// ─── wizard ──────────────────────────────────────────────────────────────────

/// How an interactive wizard session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardOutcome {
    Submitted(IntakeReceipt),
    /// The user typed `:quit`.
    Quit,
    /// Input ran out before the application was submitted.
    Abandoned,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Next,
    Back,
    Submit,
    Quit,
}

enum Line {
    Command(Command),
    UnknownCommand(String),
    Value(String),
    Blank,
}

impl Line {
    fn classify(raw: &str) -> Self {
        let text = raw.trim();
        match text {
            "" => Self::Blank,
            ":next" | ":n" => Self::Command(Command::Next),
            ":back" | ":b" => Self::Command(Command::Back),
            ":submit" | ":s" => Self::Command(Command::Submit),
            ":quit" | ":q" => Self::Command(Command::Quit),
            _ if text.starts_with(':') => Self::UnknownCommand(text.to_string()),
            _ => Self::Value(text.to_string()),
        }
    }
}

/// Reads one line; `None` at end of input.
fn read_line<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}

/// Prompts every field of the current step. A blank answer keeps the
/// current value. Finishing the step yields [`Command::Next`].
fn fill_step<R: BufRead, W: Write>(
    wizard: &mut WizardState,
    input: &mut R,
    output: &mut W,
) -> Result<Option<Command>> {
    let fields = wizard.step().fields();
    let mut idx = 0;
    while idx < fields.len() {
        let field = fields[idx];
        write!(
            output,
            "{}",
            views::render_field_prompt(field, wizard.record().get(field))
        )?;
        output.flush()?;

        let Some(raw) = read_line(input)? else {
            return Ok(None);
        };
        match Line::classify(&raw) {
            Line::Command(command) => return Ok(Some(command)),
            Line::UnknownCommand(text) => {
                writeln!(output, "  unknown command {text}; use :next, :back, :submit or :quit")?;
                continue;
            }
            Line::Value(value) => {
                wizard.apply(WizardAction::FieldChange(field, value));
            }
            Line::Blank => {}
        }
        idx += 1;
    }
    Ok(Some(Command::Next))
}

/// Waits for a command on the review step.
fn confirm_review<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> Result<Option<Command>> {
    loop {
        write!(output, "Type :submit to send your application or :back to make changes: ")?;
        output.flush()?;
        let Some(raw) = read_line(input)? else {
            return Ok(None);
        };
        if let Line::Command(command) = Line::classify(&raw) {
            return Ok(Some(command));
        }
    }
}

/// Runs the application wizard over a line-oriented terminal.
///
/// Each step prompts its fields in order, then tries to advance. Field
/// errors are printed and the step is prompted again with the entered
/// values as defaults. On a successful submit the record goes to `intake`.
///
/// # Errors
///
/// Fails on I/O errors or if the intake rejects the application.
pub async fn run_wizard<R, W>(
    mut input: R,
    mut output: W,
    intake: &dyn ApplicationIntake,
) -> Result<WizardOutcome>
where
    R: BufRead,
    W: Write,
{
    let mut wizard = WizardState::new();
    writeln!(
        output,
        "Loan application. Press enter to keep a value; :back, :next, :submit and :quit are available at any prompt."
    )?;

    loop {
        write!(output, "{}", views::render_step_header(&wizard))?;

        let command = match fill_step(&mut wizard, &mut input, &mut output)? {
            Some(Command::Next) if wizard.step().is_last() => {
                write!(output, "\n{}", views::render_review(wizard.record()))?;
                confirm_review(&mut input, &mut output)?
            }
            other => other,
        };

        let Some(command) = command else {
            info!(step = wizard.step().title(), "input ended before submit");
            return Ok(WizardOutcome::Abandoned);
        };

        let transition = match command {
            Command::Quit => return Ok(WizardOutcome::Quit),
            Command::Back => wizard.apply(WizardAction::Previous),
            Command::Next => wizard.apply(WizardAction::Next),
            Command::Submit => wizard.apply(WizardAction::Submit),
        };

        match transition {
            Transition::Submitted(record) => {
                let receipt = intake
                    .submit(&record)
                    .await
                    .context("Application could not be submitted")?;
                writeln!(
                    output,
                    "Application submitted. Your reference is {}.",
                    receipt.reference
                )?;
                return Ok(WizardOutcome::Submitted(receipt));
            }
            Transition::Blocked { errors, .. } => {
                writeln!(output, "Please fix {errors} field(s):")?;
                write!(output, "{}", views::render_errors(&wizard))?;
            }
            Transition::Ignored if command == Command::Submit => {
                writeln!(output, "  finish the remaining steps before submitting")?;
            }
            _ => {}
        }
    }
}
