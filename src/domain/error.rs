//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors raised while loading facts, parsing conditions or executing a program.
///
/// None of them are recovered internally; the store may be partially mutated
/// when one surfaces from [`crate::domain::execute`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("line {line}: expected `name=value`, found {content:?}")]
    DataFormat { line: usize, content: String },

    #[error("{}cannot parse {token:?} as a number", line_prefix(.line))]
    ValueParse { token: String, line: Option<usize> },

    #[error(
        "{}no comparison operator (==, >=, <=, >, <) in condition {condition:?}",
        line_prefix(.line)
    )]
    ConditionSyntax {
        condition: String,
        line: Option<usize>,
    },
}

fn line_prefix(line: &Option<usize>) -> String {
    line.map(|l| format!("line {l}: ")).unwrap_or_default()
}

impl DomainError {
    pub fn value_parse(token: impl Into<String>) -> Self {
        Self::ValueParse {
            token: token.into(),
            line: None,
        }
    }

    pub fn condition_syntax(condition: impl Into<String>) -> Self {
        Self::ConditionSyntax {
            condition: condition.into(),
            line: None,
        }
    }

    /// Attach a source line, keeping one that is already set.
    pub fn at_line(self, at: usize) -> Self {
        match self {
            Self::ValueParse { token, line } => Self::ValueParse {
                token,
                line: line.or(Some(at)),
            },
            Self::ConditionSyntax { condition, line } => Self::ConditionSyntax {
                condition,
                line: line.or(Some(at)),
            },
            other => other,
        }
    }

    /// Source line the error refers to, if known.
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::DataFormat { line, .. } => Some(*line),
            Self::ValueParse { line, .. } | Self::ConditionSyntax { line, .. } => *line,
        }
    }
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
