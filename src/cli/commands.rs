//! Command dispatch: one function per subcommand.

use std::io;
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use clap_complete::generate;
use itertools::Itertools;
use tracing::{debug, instrument};

use crate::application::{ApplicationError, IoResultExt};
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{self, OutputFormat, Settings};
use crate::domain::{facts, Forest, VariableStore};
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::InfraError;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let project_dir = match &cli.project_dir {
        Some(dir) => config::expand_path(dir),
        None => std::env::current_dir().map_err(|e| InfraError::io("resolve cwd", e))?,
    };
    debug!("project_dir: {}", project_dir.display());

    let Some(command) = &cli.command else {
        Cli::command()
            .print_help()
            .map_err(|e| InfraError::io("print help", e))?;
        return Ok(());
    };

    match command {
        Commands::Run {
            data,
            logic,
            set,
            format,
            tree,
        } => cmd_run(&container(&project_dir)?, data, logic, set, *format, *tree),
        Commands::Tree { logic } => cmd_tree(&container(&project_dir)?, logic),
        Commands::Check { logic } => cmd_check(&container(&project_dir)?, logic),
        Commands::Facts { data } => cmd_facts(&container(&project_dir)?, data),
        Commands::Config { command } => cmd_config(command, &project_dir),
        Commands::Completion { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
    }
}

fn container(project_dir: &Path) -> CliResult<ServiceContainer> {
    let settings = Settings::load(Some(project_dir))?;
    Ok(ServiceContainer::new(settings))
}

/// Parse `--set name=value` arguments into a context store.
pub fn parse_overrides(set: &[String]) -> CliResult<VariableStore> {
    set.iter()
        .map(|s| {
            facts::parse_assignment(s)
                .map_err(|e| CliError::InvalidArgs(format!("--set {s}: {e}")))
        })
        .collect()
}

#[instrument(skip(container))]
fn cmd_run(
    container: &ServiceContainer,
    data: &Path,
    logic: &Path,
    set: &[String],
    format: Option<OutputFormat>,
    tree: bool,
) -> CliResult<()> {
    let context = parse_overrides(set)?;
    let result = container.interpreter.run(data, logic, &context)?;

    if tree || container.settings.show_tree {
        print_forest(&result.forest);
    }

    let format = format.unwrap_or(container.settings.format);
    print!("{}", render_variables(&result.variables, format)?);

    if let Some(label) = container.recommendation.recommend(&result.variables) {
        let variable = container.recommendation.variable().unwrap_or_default();
        output::header(&format!("Recommendation ({variable}): {label}"));
    }
    Ok(())
}

/// Render the final store in the requested format.
pub fn render_variables(variables: &VariableStore, format: OutputFormat) -> CliResult<String> {
    match format {
        OutputFormat::Facts => Ok(facts::serialize(variables)),
        OutputFormat::Toml => toml::to_string(variables).map_err(|e| {
            ApplicationError::OperationFailed {
                context: "render variables as toml".to_string(),
                source: Box::new(e),
            }
            .into()
        }),
    }
}

#[instrument(skip(container))]
fn cmd_tree(container: &ServiceContainer, logic: &Path) -> CliResult<()> {
    let forest = container.interpreter.parse_program(logic)?;
    if forest.is_empty() {
        output::warning(&format!("{} contains no statements", logic.display()));
        return Ok(());
    }
    print_forest(&forest);
    Ok(())
}

fn print_forest(forest: &Forest) {
    output::header(&format!(
        "{} statements, {} top-level, depth {}",
        forest.len(),
        forest.roots().len(),
        forest.depth()
    ));
    for tree in forest.to_trees() {
        print!("{tree}");
    }
}

#[instrument(skip(container))]
fn cmd_check(container: &ServiceContainer, logic: &Path) -> CliResult<()> {
    let problems = container.interpreter.check(logic)?;
    if problems.is_empty() {
        output::success(&format!("{}: ok", logic.display()));
        return Ok(());
    }
    for problem in &problems {
        output::failure(problem);
    }
    Err(CliError::CheckFailed(problems.len()))
}

#[instrument(skip(container))]
fn cmd_facts(container: &ServiceContainer, data: &Path) -> CliResult<()> {
    let variables = container.interpreter.load_facts(data)?;
    print!("{}", facts::serialize(&variables));
    Ok(())
}

fn cmd_config(command: &ConfigCommands, project_dir: &Path) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let settings = Settings::load(Some(project_dir))?;
            print!("{}", settings.to_toml()?);
            Ok(())
        }
        ConfigCommands::Path => {
            let local = config::local_config_path(project_dir);
            let paths = [
                ("global", config::global_config_path()),
                ("local", Some(local)),
            ];
            let lines = paths
                .iter()
                .map(|(label, path)| match path {
                    Some(p) => format!("{label}: {}{}", p.display(), exists_marker(p)),
                    None => format!("{label}: <unavailable>"),
                })
                .join("\n");
            output::info(&lines);
            Ok(())
        }
        ConfigCommands::Init { global } => {
            let target: PathBuf = if *global {
                config::global_config_path().ok_or_else(|| {
                    CliError::from(ApplicationError::Config {
                        message: "cannot determine global config directory".to_string(),
                    })
                })?
            } else {
                config::local_config_path(project_dir)
            };
            if target.exists() {
                return Err(CliError::InvalidArgs(format!(
                    "config already exists: {}",
                    target.display()
                )));
            }
            let container = ServiceContainer::new(Settings::default());
            container
                .fs
                .ensure_parent(&target)
                .with_path_context("create config directory", &target)?;
            container
                .fs
                .write(&target, &Settings::template())
                .with_path_context("write config", &target)?;
            output::action("Created", &target.display());
            Ok(())
        }
    }
}

fn exists_marker(path: &Path) -> &'static str {
    if path.exists() {
        ""
    } else {
        " (not found)"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_valid_overrides_when_parsing_then_builds_context() {
        let context = parse_overrides(&["a=1".to_string(), "b = 2.5".to_string()]).unwrap();
        assert_eq!(context.get("a"), Some(&1.0));
        assert_eq!(context.get("b"), Some(&2.5));
    }

    #[test]
    fn given_malformed_override_when_parsing_then_invalid_args() {
        let err = parse_overrides(&["a".to_string()]).unwrap_err();
        assert!(matches!(err, CliError::InvalidArgs(_)));
        assert_eq!(err.exit_code(), crate::exitcode::USAGE);
    }

    #[test]
    fn given_store_when_rendering_toml_then_one_key_per_variable() {
        let vars = VariableStore::from([("a".to_string(), 5.0), ("b".to_string(), 1.5)]);
        let text = render_variables(&vars, OutputFormat::Toml).unwrap();
        assert!(text.contains("a = 5.0"));
        assert!(text.contains("b = 1.5"));
    }
}
