//! Application state for the Absence Engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::ConfigLoader;
use crate::processing::GridParser;

/// Shared application state.
///
/// Holds the loaded configuration and a grid parser built from it.
#[derive(Clone)]
pub struct AppState {
    config: Arc<ConfigLoader>,
    parser: Arc<GridParser>,
}

impl AppState {
    /// Creates a new application state with the given configuration loader.
    pub fn new(config: ConfigLoader) -> Self {
        let parser = GridParser::new(config.parser());
        Self {
            config: Arc::new(config),
            parser: Arc::new(parser),
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns the configured grid parser.
    pub fn parser(&self) -> &GridParser {
        &self.parser
    }
}
