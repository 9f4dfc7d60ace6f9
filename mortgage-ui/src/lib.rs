pub mod app;
pub mod logging;
pub mod settings;
pub mod utils;
pub mod views;

pub use app::{JsonIntake, StdoutIntake, WizardOutcome, build_calculator, render_calc, run_wizard};
pub use settings::{LoggingSettings, Settings, SettingsError};
