//! factlogic: run indentation-structured `if`/`else` programs over named numeric facts
//!
//! Layers, innermost first:
//! - [`domain`]: fact loading, comment stripping, tree building, condition evaluation, execution
//! - [`application`]: file-backed services on top of the domain
//! - [`infrastructure`]: filesystem boundary and service wiring
//! - [`cli`]: argument parsing, command dispatch, terminal output

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;

pub use domain::{run, VariableStore};
