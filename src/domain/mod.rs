//! Domain layer: the interpreter
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).
//!
//! Pipeline: program text → [`comments`] → [`builder`] → [`executor`], which
//! evaluates each `if` through [`condition`]. [`facts`] seeds the store first.

pub mod arena;
pub mod builder;
pub mod comments;
pub mod condition;
pub mod entities;
pub mod error;
pub mod executor;
pub mod facts;
pub mod validate;

pub use arena::{Forest, ProgramNode};
pub use builder::TreeBuilder;
pub use entities::*;
pub use error::{DomainError, DomainResult};
pub use executor::execute;

/// Strip comments from program text and build its forest, keeping source line numbers.
pub fn parse_program(text: &str) -> Forest {
    TreeBuilder::build_numbered(
        text.lines()
            .enumerate()
            .filter_map(|(i, line)| comments::strip_line(line).map(|code| (i + 1, code))),
    )
}

/// One complete run: load facts, apply `context` on top, execute the program.
///
/// `context` holds auxiliary values supplied by the caller; they override facts
/// of the same name.
pub fn run(data: &str, logic: &str, context: &VariableStore) -> DomainResult<VariableStore> {
    let mut variables = facts::load(data)?;
    variables.extend(context.iter().map(|(k, v)| (k.clone(), *v)));
    let forest = parse_program(logic);
    execute(&forest, &mut variables)?;
    Ok(variables)
}
