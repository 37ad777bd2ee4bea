//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on I/O boundary traits (FileSystem)
//! but are themselves concrete structs, not traits.

mod interpreter;
mod recommendation;

pub use interpreter::{InterpreterService, RunOutput};
pub use recommendation::RecommendationService;
