//! Fact files: `name=number` lines seeding the variable store.

use tracing::{debug, instrument};

use crate::domain::entities::{parse_number, VariableStore};
use crate::domain::error::{DomainError, DomainResult};

/// Parse fact lines into a fresh store.
///
/// Blank lines are skipped. Each remaining line is split on its first `=`;
/// both sides are trimmed. A repeated name keeps the value of its last line.
///
/// # Errors
/// - [`DomainError::DataFormat`] for a line without `=` or with an empty name
/// - [`DomainError::ValueParse`] for a value that is not a number
#[instrument(level = "debug", skip(text))]
pub fn load(text: &str) -> DomainResult<VariableStore> {
    let mut variables = VariableStore::new();

    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        let (name, value) = line
            .split_once('=')
            .map(|(n, v)| (n.trim(), v.trim()))
            .filter(|(n, _)| !n.is_empty())
            .ok_or_else(|| DomainError::DataFormat {
                line: line_no,
                content: raw.to_string(),
            })?;

        let value = parse_number(value)
            .ok_or_else(|| DomainError::value_parse(value).at_line(line_no))?;

        if variables.insert(name.to_string(), value).is_some() {
            debug!("line {}: '{}' overrides earlier value", line_no, name);
        }
    }

    debug!("loaded {} facts", variables.len());
    Ok(variables)
}

/// Render a store in the format [`load`] reads, one fact per line in key order.
pub fn serialize(variables: &VariableStore) -> String {
    let mut out = String::new();
    for (name, value) in variables {
        out.push_str(&format!("{name}={value}\n"));
    }
    out
}

/// Parse a single `name=value` assignment, as given on the command line.
pub fn parse_assignment(text: &str) -> DomainResult<(String, f64)> {
    let store = load(text)?;
    match store.into_iter().next() {
        Some(pair) if !text.contains('\n') => Ok(pair),
        _ => Err(DomainError::DataFormat {
            line: 1,
            content: text.to_string(),
        }),
    }
}
