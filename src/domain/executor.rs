//! Forest execution against a shared variable store.

use generational_arena::Index;
use tracing::{debug, instrument, trace, warn};

use crate::domain::arena::Forest;
use crate::domain::condition;
use crate::domain::entities::{Operand, Statement, VariableStore};
use crate::domain::error::{DomainError, DomainResult};

/// Sibling sequence being walked and the position within it.
struct Frame<'f> {
    siblings: &'f [Index],
    pos: usize,
}

/// Run every node of `forest` in document order, mutating `variables`.
///
/// An `if` consumes an immediately following `else` sibling: exactly one of
/// the two blocks runs. An `else` with no `if` before it is skipped. Nested
/// blocks are walked with an explicit frame stack instead of recursion.
///
/// On error the store keeps every assignment made before the failing line.
#[instrument(level = "debug", skip_all, fields(nodes = forest.len()))]
pub fn execute(forest: &Forest, variables: &mut VariableStore) -> DomainResult<()> {
    let mut stack = vec![Frame {
        siblings: forest.roots(),
        pos: 0,
    }];

    while let Some(frame) = stack.last_mut() {
        let Some(&idx) = frame.siblings.get(frame.pos) else {
            stack.pop();
            continue;
        };
        let siblings = frame.siblings;
        let pos = frame.pos;
        let Some(node) = forest.get_node(idx) else {
            frame.pos += 1;
            continue;
        };

        match Statement::classify(&node.text) {
            Statement::Assign { target, .. } if target.is_empty() => {
                return Err(DomainError::DataFormat {
                    line: node.line,
                    content: node.text.clone(),
                });
            }
            Statement::Assign { target, value } => {
                assign(target, value, variables).map_err(|e| e.at_line(node.line))?;
                frame.pos += 1;
            }
            Statement::If(cond) => {
                let taken =
                    condition::evaluate(cond, variables).map_err(|e| e.at_line(node.line))?;
                let else_node = siblings
                    .get(pos + 1)
                    .and_then(|&next| forest.get_node(next))
                    .filter(|n| Statement::classify(&n.text).is_else());
                debug!(line = node.line, taken, has_else = else_node.is_some(), "if {}", cond);

                frame.pos += if else_node.is_some() { 2 } else { 1 };
                let block = if taken {
                    Some(node.children.as_slice())
                } else {
                    else_node.map(|n| n.children.as_slice())
                };
                if let Some(siblings) = block {
                    stack.push(Frame { siblings, pos: 0 });
                }
            }
            Statement::Else => {
                trace!(line = node.line, "else without preceding if, skipped");
                frame.pos += 1;
            }
            Statement::Other => {
                warn!(line = node.line, "unrecognized statement ignored: {}", node.text);
                frame.pos += 1;
            }
        }
    }

    Ok(())
}

fn assign(target: &str, value: &str, variables: &mut VariableStore) -> DomainResult<()> {
    let resolved = Operand::parse(value)?.resolve(variables)?;
    trace!("{} = {}", target, resolved);
    variables.insert(target.to_string(), resolved);
    Ok(())
}
