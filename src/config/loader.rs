//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading engine
//! configuration from YAML files.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{
    EngineConfig, FieldPlan, FieldsConfig, ParserConfig, SourceConfig, SyncConfig,
};

/// Loads and provides access to engine configuration.
///
/// # Directory Structure
///
/// ```text
/// config/csp/
/// ├── sync.yaml     # Sources to sync (required)
/// ├── parser.yaml   # Grid parser settings (optional)
/// └── fields.yaml   # Field plan overrides (optional)
/// ```
///
/// # Example
///
/// ```no_run
/// use absence_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/csp").unwrap();
/// for source in loader.sources() {
///     println!("{} -> {}", source.name, source.output.display());
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: EngineConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if `sync.yaml` is missing, if any present file is not
    /// valid YAML, or if the sources are inconsistent (duplicate names or
    /// output paths).
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let sync = Self::load_yaml::<SyncConfig>(&path.join("sync.yaml"))?;
        let parser = Self::load_optional_yaml::<ParserConfig>(&path.join("parser.yaml"))?
            .unwrap_or_default();
        let fields = Self::load_optional_yaml::<FieldsConfig>(&path.join("fields.yaml"))?
            .unwrap_or_default()
            .into_plan();

        Self::check_sources(&sync.sources)?;

        Ok(Self {
            config: EngineConfig::new(sync, parser, fields),
        })
    }

    /// Wraps an already-built configuration.
    pub fn from_config(config: EngineConfig) -> EngineResult<Self> {
        Self::check_sources(&config.sync().sources)?;
        Ok(Self { config })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Loads a YAML file that may be absent.
    fn load_optional_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<Option<T>> {
        if !path.exists() {
            return Ok(None);
        }
        Self::load_yaml(path).map(Some)
    }

    fn check_sources(sources: &[SourceConfig]) -> EngineResult<()> {
        let mut names = HashSet::new();
        let mut outputs = HashSet::new();

        for source in sources {
            if source.name.trim().is_empty() {
                return Err(EngineError::InvalidConfig {
                    message: "source name must not be empty".to_string(),
                });
            }
            if !names.insert(source.name.as_str()) {
                return Err(EngineError::InvalidConfig {
                    message: format!("duplicate source name '{}'", source.name),
                });
            }
            let paths = std::iter::once(&source.output).chain(source.summary_output.as_ref());
            for output in paths {
                if !outputs.insert(output.as_path()) {
                    return Err(EngineError::InvalidConfig {
                        message: format!(
                            "output '{}' is written by more than one source",
                            output.display()
                        ),
                    });
                }
            }
        }

        Ok(())
    }

    /// Returns the underlying engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the configured sync sources.
    pub fn sources(&self) -> &[SourceConfig] {
        &self.config.sync().sources
    }

    /// Gets a source by name.
    pub fn get_source(&self, name: &str) -> Option<&SourceConfig> {
        self.sources().iter().find(|s| s.name == name)
    }

    /// Returns the grid parser settings.
    pub fn parser(&self) -> &ParserConfig {
        self.config.parser()
    }

    /// Returns the field plan.
    pub fn field_plan(&self) -> &FieldPlan {
        self.config.fields()
    }

    /// Returns the size of per-employee recent-absence lists.
    pub fn recent_limit(&self) -> usize {
        self.config.sync().recent_limit
    }
}
