use std::path::PathBuf;

use mortgage_core::MortgageCalculator;
use mortgage_ui::{Settings, render_calc};
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn test_settings_fixture_loads() {
    let settings = Settings::load(&fixture_path("settings.toml")).unwrap();

    assert_eq!(settings.calculator.home_price, "525,000");
    assert_eq!(settings.calculator.hoa, "75");
    assert_eq!(settings.logging.level, "mortgage_core=debug,warn");
    assert_eq!(settings.logging.file, None);
    assert!(!settings.logging.console);
}

#[test]
fn test_configured_defaults_drive_the_calculator() {
    let settings = Settings::load(&fixture_path("settings.toml")).unwrap();

    let calculator = MortgageCalculator::new(settings.calculator);
    let breakdown = calculator.breakdown();

    assert!(calculator.coerced_fields().is_empty());
    assert_eq!(breakdown.principal, dec!(420000));
    assert_eq!(breakdown.monthly_tax, dec!(525));
    assert_eq!(breakdown.monthly_insurance, dec!(125));
    assert_eq!(breakdown.monthly_hoa, dec!(75));
    assert_eq!(
        breakdown.total_monthly_payment,
        breakdown.monthly_principal_and_interest + dec!(725)
    );

    let table = render_calc(&calculator, false).unwrap();
    assert!(table.contains("$525,000.00"));
    assert!(table.contains("6.125%"));
}

#[test]
fn test_settings_written_to_disk_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mortgage.toml");
    let mut settings = Settings::default();
    settings.calculator.interest_rate = "5.75".to_string();
    settings.logging.file = Some(PathBuf::from("mortgage.log"));

    std::fs::write(&path, toml::to_string(&settings).unwrap()).unwrap();

    assert_eq!(Settings::load(&path).unwrap(), settings);
}
