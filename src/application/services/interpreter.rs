//! Interpreter service
//!
//! Reads fact and program files, runs the interpreter and returns the final store.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::{ApplicationResult, DomainResultExt, IoResultExt};
use crate::domain::{self, facts, validate, DomainError, Forest, VariableStore};
use crate::infrastructure::traits::FileSystem;

/// Output from one run.
#[derive(Debug)]
pub struct RunOutput {
    /// Final variable store (facts, context overrides, assignments)
    pub variables: VariableStore,
    /// Parsed program, for inspection
    pub forest: Forest,
}

/// Service for running programs over fact files.
pub struct InterpreterService {
    fs: Arc<dyn FileSystem>,
}

impl InterpreterService {
    /// Create a new interpreter service.
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }

    /// Run the program in `logic` over the facts in `data`.
    ///
    /// `context` values are applied after the facts are loaded and override them.
    #[instrument(level = "debug", skip(self, context))]
    pub fn run(
        &self,
        data: &Path,
        logic: &Path,
        context: &VariableStore,
    ) -> ApplicationResult<RunOutput> {
        let mut variables = self.load_facts(data)?;
        for (name, value) in context {
            debug!("context override: {}={}", name, value);
            variables.insert(name.clone(), *value);
        }

        let forest = self.parse_program(logic)?;
        debug!(
            "run: {} facts, {} program nodes, depth {}",
            variables.len(),
            forest.len(),
            forest.depth()
        );

        domain::execute(&forest, &mut variables).in_file(logic)?;
        Ok(RunOutput { variables, forest })
    }

    /// Load and validate a fact file.
    pub fn load_facts(&self, data: &Path) -> ApplicationResult<VariableStore> {
        let text = self
            .fs
            .read_to_string(data)
            .with_path_context("read facts", data)?;
        facts::load(&text).in_file(data)
    }

    /// Parse a program file into its forest.
    pub fn parse_program(&self, logic: &Path) -> ApplicationResult<Forest> {
        let text = self
            .fs
            .read_to_string(logic)
            .with_path_context("read program", logic)?;
        Ok(domain::parse_program(&text))
    }

    /// Statically check a program file; returns all problems found.
    pub fn check(&self, logic: &Path) -> ApplicationResult<Vec<DomainError>> {
        let forest = self.parse_program(logic)?;
        let problems = validate::check(&forest);
        debug!("check: {} problems in {}", problems.len(), logic.display());
        Ok(problems)
    }
}
