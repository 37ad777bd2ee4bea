//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::sync::Arc;

use crate::application::services::{InterpreterService, RecommendationService};
use crate::config::Settings;
use crate::infrastructure::traits::{FileSystem, RealFileSystem};

/// Container holding all application services.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Filesystem abstraction
    pub fs: Arc<dyn FileSystem>,

    pub interpreter: InterpreterService,
    pub recommendation: RecommendationService,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings) -> Self {
        Self::with_deps(settings, Arc::new(RealFileSystem))
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(settings: Settings, fs: Arc<dyn FileSystem>) -> Self {
        let interpreter = InterpreterService::new(Arc::clone(&fs));
        let recommendation = RecommendationService::new(settings.recommendation.clone());
        let settings = Arc::new(settings);

        Self {
            settings,
            fs,
            interpreter,
            recommendation,
        }
    }
}
