//! Integration tests for Settings loading from a project directory.
//!
//! These tests pass explicit file locations to `load_from` where a global
//! config on the test machine could interfere.

use std::fs;

use tempfile::TempDir;

use factlogic::application::services::RecommendationService;
use factlogic::config::{local_config_path, OutputFormat, Settings};
use factlogic::domain::VariableStore;

#[test]
fn given_local_config_when_load_then_overrides_defaults() {
    // Arrange
    let project = TempDir::new().unwrap();
    let local = local_config_path(project.path());
    fs::write(&local, "format = \"toml\"\nshow_tree = true\n").unwrap();

    // Act
    let settings = Settings::load_from(None, Some(local.as_path())).expect("load settings");

    // Assert
    assert_eq!(settings.format, OutputFormat::Toml);
    assert!(settings.show_tree);
}

#[test]
fn given_global_and_local_config_when_load_then_local_wins() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let global = temp.path().join("global.toml");
    let local = temp.path().join("local.toml");
    fs::write(&global, "format = \"toml\"\nshow_tree = true\n").unwrap();
    fs::write(&local, "format = \"facts\"\n").unwrap();

    // Act
    let settings = Settings::load_from(Some(global.as_path()), Some(local.as_path())).unwrap();

    // Assert: local replaces format, global still supplies show_tree
    assert_eq!(settings.format, OutputFormat::Facts);
    assert!(settings.show_tree);
}

#[test]
fn given_missing_config_files_when_load_then_defaults() {
    let temp = TempDir::new().unwrap();
    let global = temp.path().join("a.toml");
    let local = temp.path().join("b.toml");

    let settings = Settings::load_from(Some(global.as_path()), Some(local.as_path())).unwrap();

    assert_eq!(settings, Settings::default());
}

#[test]
fn given_invalid_format_when_load_then_config_error() {
    let temp = TempDir::new().unwrap();
    let local = temp.path().join("local.toml");
    fs::write(&local, "format = \"yaml\"\n").unwrap();

    let err = Settings::load_from(None, Some(local.as_path())).unwrap_err();

    assert!(err.to_string().starts_with("config error"));
}

#[test]
fn given_recommendation_table_when_load_then_service_maps_final_value() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let local = temp.path().join("local.toml");
    fs::write(
        &local,
        r#"
[recommendation]
variable = "b"
default = "No recommendation"

[[recommendation.rules]]
value = 1
label = "Approve"

[[recommendation.rules]]
value = 0
label = "Reject"
"#,
    )
    .unwrap();

    // Act
    let settings = Settings::load_from(None, Some(local.as_path())).unwrap();
    let service = RecommendationService::new(settings.recommendation);

    // Assert
    let approve = VariableStore::from([("b".to_string(), 1.0)]);
    let other = VariableStore::from([("b".to_string(), 3.0)]);
    assert_eq!(service.variable(), Some("b"));
    assert_eq!(service.recommend(&approve).as_deref(), Some("Approve"));
    assert_eq!(service.recommend(&other).as_deref(), Some("No recommendation"));
}

#[test]
fn given_template_when_written_as_local_config_then_loads_as_defaults() {
    let project = TempDir::new().unwrap();
    let local = local_config_path(project.path());
    fs::write(&local, Settings::template()).unwrap();

    let settings = Settings::load_from(None, Some(local.as_path())).unwrap();

    assert_eq!(settings, Settings::default());
}
