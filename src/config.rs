//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/factlogic/factlogic.toml`
//! 3. Local config: `<project_dir>/.factlogic.toml`
//! 4. Environment variables: `FACTLOGIC_*` prefix

use std::fmt;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use config::{Config, ConfigError, Environment, File, FileFormat};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;

/// How the final variable store is printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `name=value` lines, readable as a fact file
    #[default]
    Facts,
    /// TOML table
    Toml,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Facts => write!(f, "facts"),
            Self::Toml => write!(f, "toml"),
        }
    }
}

/// One entry of the recommendation table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendationRule {
    /// Final value of the watched variable
    pub value: f64,
    /// Text shown for that value
    pub label: String,
}

/// Maps the final value of one variable to a human-readable recommendation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct RecommendationConfig {
    /// Variable whose final value selects the rule
    pub variable: String,
    /// Label used when no rule matches
    pub default: Option<String>,
    pub rules: Vec<RecommendationRule>,
}

/// Unified configuration for factlogic.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Output format for the final store (default: facts)
    pub format: OutputFormat,
    /// Print the parsed program tree before the results
    pub show_tree: bool,
    /// Optional recommendation table
    pub recommendation: Option<RecommendationConfig>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            format: OutputFormat::Facts,
            show_tree: false,
            recommendation: None,
        }
    }
}

/// Get the XDG config directory for factlogic.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "factlogic").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("factlogic.toml"))
}

/// Get the path to the local config file in a project directory.
pub fn local_config_path(project_dir: &Path) -> PathBuf {
    project_dir.join(".factlogic.toml")
}

/// Expand `~` and `$VAR` in a user-supplied path.
pub fn expand_path(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    shellexpand::full(raw.as_ref())
        .map(|s| PathBuf::from(s.as_ref()))
        .unwrap_or_else(|_| path.to_path_buf())
}

impl Settings {
    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `project_dir` - Optional project directory for local config
    pub fn load(project_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        let local = project_dir.map(local_config_path);
        Self::load_from(global_config_path().as_deref(), local.as_deref())
    }

    /// Load settings from explicit config file locations.
    ///
    /// Missing files are skipped. Environment variables are applied last and
    /// replace values from either file.
    pub fn load_from(global: Option<&Path>, local: Option<&Path>) -> Result<Self, ApplicationError> {
        let defaults = Settings::default();
        let mut builder = Config::builder()
            .set_default("format", defaults.format.to_string())
            .map_err(config_err)?
            .set_default("show_tree", defaults.show_tree)
            .map_err(config_err)?;

        for path in [global, local].into_iter().flatten() {
            let path = expand_path(path);
            if path.exists() {
                builder = builder.add_source(File::from(path).format(FileFormat::Toml));
            }
        }

        builder = builder.add_source(
            Environment::with_prefix("FACTLOGIC")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().map_err(config_err)?;
        config.try_deserialize().map_err(config_err)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# factlogic configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/factlogic/factlogic.toml
#   Local:  <project_dir>/.factlogic.toml
#   Env:    FACTLOGIC_* environment variables (e.g. FACTLOGIC_FORMAT=toml)

# Output format of the final variables: "facts" or "toml"
# format = "facts"

# Print the parsed program tree before the results
# show_tree = false

# Map the final value of one variable to a recommendation
# [recommendation]
# variable = "risk"
# default = "No recommendation"
#
# [[recommendation.rules]]
# value = 0
# label = "Approve"
#
# [[recommendation.rules]]
# value = 1
# label = "Review manually"
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_no_config_files_when_loading_then_uses_defaults() {
        let settings = Settings::load_from(None, None).expect("load defaults");
        assert_eq!(settings.format, OutputFormat::Facts);
        assert!(!settings.show_tree);
        assert!(settings.recommendation.is_none());
    }

    #[test]
    fn given_template_when_parsed_then_is_valid_toml() {
        let parsed: Settings = toml::from_str(&Settings::template()).expect("template parses");
        assert_eq!(parsed, Settings::default());
    }

    #[test]
    fn given_settings_when_serialized_then_roundtrips() {
        let settings = Settings {
            format: OutputFormat::Toml,
            show_tree: true,
            recommendation: Some(RecommendationConfig {
                variable: "b".into(),
                default: None,
                rules: vec![RecommendationRule {
                    value: 1.0,
                    label: "yes".into(),
                }],
            }),
        };
        let text = settings.to_toml().unwrap();
        let back: Settings = toml::from_str(&text).unwrap();
        assert_eq!(back, settings);
    }

    #[test]
    fn given_tilde_path_when_expanding_then_resolves_home() {
        let home = std::env::var("HOME").expect("HOME should be set");
        let expanded = expand_path(Path::new("~/x.toml"));
        assert!(expanded.to_string_lossy().starts_with(&home));
    }
}
