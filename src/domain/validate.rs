//! Static checks of a parsed program, without executing it.

use crate::domain::arena::Forest;
use crate::domain::entities::{Condition, Operand, Statement};
use crate::domain::error::DomainError;

/// Collect every syntax problem in `forest`, in document order.
///
/// Operand references are not resolved: whether a name exists depends on the
/// facts of a particular run.
pub fn check(forest: &Forest) -> Vec<DomainError> {
    let mut problems = Vec::new();
    for (_, node) in forest.iter() {
        let result = match Statement::classify(&node.text) {
            Statement::If(cond) => Condition::parse(cond).map(|_| ()),
            Statement::Assign { target, .. } if target.is_empty() => {
                Err(DomainError::DataFormat {
                    line: node.line,
                    content: node.text.clone(),
                })
            }
            Statement::Assign { value, .. } => Operand::parse(value).map(|_| ()),
            Statement::Else | Statement::Other => Ok(()),
        };
        if let Err(e) = result {
            problems.push(e.at_line(node.line));
        }
    }
    problems
}
