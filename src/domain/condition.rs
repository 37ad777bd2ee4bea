//! Comparison conditions of `if` lines.

use tracing::trace;

use crate::domain::entities::{Comparison, Condition, Operand, VariableStore};
use crate::domain::error::{DomainError, DomainResult};

impl Condition {
    /// Split condition text at the first operator found in [`Comparison::SEARCH_ORDER`].
    ///
    /// # Errors
    /// - [`DomainError::ConditionSyntax`] when no operator is present
    /// - [`DomainError::ValueParse`] when a side is empty
    pub fn parse(text: &str) -> DomainResult<Self> {
        let (operator, pos) = Comparison::SEARCH_ORDER
            .iter()
            .find_map(|&op| text.find(op.symbol()).map(|pos| (op, pos)))
            .ok_or_else(|| DomainError::condition_syntax(text.trim()))?;

        let left = Operand::parse(&text[..pos])?;
        let right = Operand::parse(&text[pos + operator.symbol().len()..])?;
        Ok(Self {
            operator,
            left,
            right,
        })
    }

    pub fn evaluate(&self, variables: &VariableStore) -> DomainResult<bool> {
        let left = self.left.resolve(variables)?;
        let right = self.right.resolve(variables)?;
        let result = self.operator.apply(left, right);
        trace!("{} => {} {} {} => {}", self, left, self.operator, right, result);
        Ok(result)
    }
}

/// Parse and evaluate a condition in one step.
pub fn evaluate(condition: &str, variables: &VariableStore) -> DomainResult<bool> {
    Condition::parse(condition)?.evaluate(variables)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_ge_condition_when_parsing_then_not_split_at_gt() {
        let cond = Condition::parse("x>=5").unwrap();
        assert_eq!(cond.operator, Comparison::Ge);
        assert_eq!(cond.left, Operand::Reference("x".into()));
        assert_eq!(cond.right, Operand::Literal { token: "5".into(), value: 5.0 });
    }

    #[test]
    fn given_le_condition_when_parsing_then_not_split_at_lt() {
        let cond = Condition::parse("x <= y").unwrap();
        assert_eq!(cond.operator, Comparison::Le);
        assert_eq!(cond.right, Operand::Reference("y".into()));
    }

    #[test]
    fn given_single_equals_when_parsing_then_syntax_error() {
        assert_eq!(
            Condition::parse("a = 5"),
            Err(DomainError::condition_syntax("a = 5"))
        );
    }

    #[test]
    fn given_missing_right_side_when_parsing_then_value_error() {
        assert!(matches!(
            Condition::parse("a=="),
            Err(DomainError::ValueParse { .. })
        ));
    }

    #[test]
    fn given_negative_literal_when_evaluating_then_compares_numerically() {
        let mut vars = VariableStore::new();
        vars.insert("t".into(), -3.0);
        assert!(evaluate("t < -2", &vars).unwrap());
        assert!(!evaluate("t>-2", &vars).unwrap());
    }
}
