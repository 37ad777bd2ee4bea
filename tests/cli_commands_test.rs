//! Tests for command dispatch through the parsed CLI

use std::fs;
use std::path::Path;

use clap::Parser;
use tempfile::TempDir;

use factlogic::cli::{execute_command, Cli, CliError};
use factlogic::exitcode;

fn parse(dir: &Path, args: &[&str]) -> Cli {
    let mut argv = vec!["factlogic", "-C", dir.to_str().unwrap()];
    argv.extend_from_slice(args);
    Cli::try_parse_from(argv).unwrap()
}

#[test]
fn given_valid_inputs_when_run_command_then_succeeds() {
    // Arrange
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("data.txt"), "a=5\n").unwrap();
    fs::write(temp.path().join("logic.txt"), "if a==5\n  b=1\n").unwrap();
    let data = temp.path().join("data.txt");
    let logic = temp.path().join("logic.txt");
    let cli = parse(
        temp.path(),
        &["run", data.to_str().unwrap(), logic.to_str().unwrap(), "--set", "a=5"],
    );

    // Act / Assert
    execute_command(&cli).unwrap();
}

#[test]
fn given_malformed_set_when_run_command_then_usage_error() {
    let temp = TempDir::new().unwrap();
    let cli = parse(temp.path(), &["run", "d.txt", "l.txt", "--set", "oops"]);

    let err = execute_command(&cli).unwrap_err();

    assert!(matches!(err, CliError::InvalidArgs(_)));
    assert_eq!(err.exit_code(), exitcode::USAGE);
}

#[test]
fn given_missing_input_when_facts_command_then_noinput() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("missing.txt");
    let cli = parse(temp.path(), &["facts", missing.to_str().unwrap()]);

    let err = execute_command(&cli).unwrap_err();

    assert_eq!(err.exit_code(), exitcode::NOINPUT);
}

#[test]
fn given_broken_program_when_check_command_then_check_failed() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let logic = temp.path().join("logic.txt");
    fs::write(&logic, "if a\n  b=1\nif c=2\n").unwrap();
    let cli = parse(temp.path(), &["check", logic.to_str().unwrap()]);

    // Act
    let err = execute_command(&cli).unwrap_err();

    // Assert
    assert!(matches!(err, CliError::CheckFailed(2)));
    assert_eq!(err.exit_code(), exitcode::DATAERR);
}

#[test]
fn given_no_local_config_when_config_init_then_writes_template_once() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let cli = parse(temp.path(), &["config", "init"]);

    // Act
    execute_command(&cli).unwrap();
    let second = execute_command(&cli);

    // Assert
    let written = fs::read_to_string(temp.path().join(".factlogic.toml")).unwrap();
    assert!(written.starts_with("# factlogic configuration"));
    assert!(matches!(second, Err(CliError::InvalidArgs(_))));
}
