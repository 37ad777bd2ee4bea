//! Domain entities: core data structures

use std::collections::BTreeMap;
use std::fmt;

use crate::domain::error::{DomainError, DomainResult};

/// Mapping from fact name to value, the only state a run mutates.
pub type VariableStore = BTreeMap<String, f64>;

/// One side of a comparison or the right-hand side of an assignment.
///
/// Nothing is looked up at parse time: a variable stored under the exact token
/// text wins over the token's numeric reading.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    /// Token that also reads as a number.
    Literal { token: String, value: f64 },
    Reference(String),
}

impl Operand {
    /// Classify a trimmed token.
    ///
    /// Fails only for an empty token.
    pub fn parse(token: &str) -> DomainResult<Self> {
        let token = token.trim();
        if token.is_empty() {
            return Err(DomainError::value_parse(token));
        }
        Ok(match parse_number(token) {
            Some(value) => Self::Literal {
                token: token.to_string(),
                value,
            },
            None => Self::Reference(token.to_string()),
        })
    }

    /// Text of the token as written.
    pub fn token(&self) -> &str {
        match self {
            Self::Literal { token, .. } | Self::Reference(token) => token,
        }
    }

    /// Resolve against the store at evaluation time: variable first, then number.
    pub fn resolve(&self, variables: &VariableStore) -> DomainResult<f64> {
        if let Some(value) = variables.get(self.token()) {
            return Ok(*value);
        }
        match self {
            Self::Literal { value, .. } => Ok(*value),
            Self::Reference(name) => Err(DomainError::value_parse(name.as_str())),
        }
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token())
    }
}

/// Parse a finite numeric literal.
///
/// `inf`, `-nan` and other non-finite spellings that `f64::from_str` accepts
/// are rejected, so every loaded value serializes back to a loadable one.
pub fn parse_number(token: &str) -> Option<f64> {
    token
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Comparison operators understood by `if` conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Eq,
    Ge,
    Le,
    Gt,
    Lt,
}

impl Comparison {
    /// Search order for conditions: two-character operators come first so that
    /// `x>=5` is never split at `>`.
    pub const SEARCH_ORDER: [Comparison; 5] = [
        Comparison::Eq,
        Comparison::Ge,
        Comparison::Le,
        Comparison::Gt,
        Comparison::Lt,
    ];

    pub fn symbol(self) -> &'static str {
        match self {
            Self::Eq => "==",
            Self::Ge => ">=",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Lt => "<",
        }
    }

    pub fn apply(self, left: f64, right: f64) -> bool {
        match self {
            Self::Eq => left == right,
            Self::Ge => left >= right,
            Self::Le => left <= right,
            Self::Gt => left > right,
            Self::Lt => left < right,
        }
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A parsed `if` condition. Never stored beyond a single evaluation or check.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub operator: Comparison,
    pub left: Operand,
    pub right: Operand,
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.left, self.operator, self.right)
    }
}

/// Shape of a single program line.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement<'a> {
    /// `if <condition>`; holds the raw condition text.
    If(&'a str),
    /// `else`, trailing text ignored.
    Else,
    /// `<target>=<value>`; the value is kept raw and parsed on execution.
    Assign { target: &'a str, value: &'a str },
    /// Anything else. Executed as a no-op.
    Other,
}

impl<'a> Statement<'a> {
    pub fn classify(text: &'a str) -> Self {
        if let Some(condition) = strip_keyword(text, "if") {
            return Self::If(condition);
        }
        if strip_keyword(text, "else").is_some() {
            return Self::Else;
        }
        match text.split_once('=') {
            Some((target, value)) => Self::Assign {
                target: target.trim(),
                value: value.trim(),
            },
            None => Self::Other,
        }
    }

    pub fn is_else(&self) -> bool {
        matches!(self, Self::Else)
    }
}

/// Strip a leading keyword that stands as a whole word.
///
/// `if x>1` and `if(x>1)` match `if`; `iffy=1` does not.
fn strip_keyword<'a>(text: &'a str, keyword: &str) -> Option<&'a str> {
    let rest = text.strip_prefix(keyword)?;
    match rest.chars().next() {
        Some(c) if c.is_alphanumeric() || c == '_' => None,
        _ => Some(rest.trim()),
    }
}
