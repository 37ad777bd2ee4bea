//! Error conversion helpers for common I/O and parse operations
//!
//! Provides extension traits for cleaner error handling with path context.

use std::io;
use std::path::Path;

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::DomainResult;

/// Extension trait for converting `io::Result` to `ApplicationResult` with context.
pub trait IoResultExt<T> {
    /// Add path context to an I/O error.
    ///
    /// A missing file becomes [`ApplicationError::InputNotFound`].
    ///
    /// # Example
    /// ```ignore
    /// fs.read_to_string(&path)
    ///     .with_path_context("read facts", &path)?;
    /// ```
    fn with_path_context(self, action: &str, path: &Path) -> ApplicationResult<T>;
}

impl<T> IoResultExt<T> for io::Result<T> {
    fn with_path_context(self, action: &str, path: &Path) -> ApplicationResult<T> {
        self.map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => ApplicationError::InputNotFound(path.to_path_buf()),
            _ => ApplicationError::OperationFailed {
                context: format!("{}: {}", action, path.display()),
                source: Box::new(e),
            },
        })
    }
}

/// Extension trait tagging interpreter errors with the file they came from.
pub trait DomainResultExt<T> {
    fn in_file(self, path: &Path) -> ApplicationResult<T>;
}

impl<T> DomainResultExt<T> for DomainResult<T> {
    fn in_file(self, path: &Path) -> ApplicationResult<T> {
        self.map_err(|source| ApplicationError::Program {
            path: path.to_path_buf(),
            source,
        })
    }
}
