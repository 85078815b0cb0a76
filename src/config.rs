//! Configuration System
//!
//! Layered engine configuration: built-in defaults, the user's global `config.toml`,
//! workspace files under `config/`, then `METANOME__*` environment overrides.
//! Sections cover algorithm discovery, result output, scoped files and logging.

use crate::logging::LoggingConfig;
use crate::receiver::ResultFormat;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;
pub use sources::global_file::global_config_path;

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub algorithms: AlgorithmsConfig,

    #[serde(default)]
    pub results: ResultsConfig,

    #[serde(default)]
    pub files: FilesConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where algorithm libraries are discovered
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlgorithmsConfig {
    #[serde(default = "default_algorithms_directory")]
    pub directory: PathBuf,
}

fn default_algorithms_directory() -> PathBuf {
    PathBuf::from("algorithms")
}

impl Default for AlgorithmsConfig {
    fn default() -> Self {
        Self {
            directory: default_algorithms_directory(),
        }
    }
}

/// Result printer settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultsConfig {
    #[serde(default = "default_results_directory")]
    pub directory: PathBuf,

    /// File name prefix; the result kind suffix is appended
    #[serde(default = "default_prefix")]
    pub prefix: String,

    #[serde(default)]
    pub format: ResultFormat,
}

fn default_results_directory() -> PathBuf {
    PathBuf::from("results")
}

fn default_prefix() -> String {
    "metanome".to_string()
}

impl Default for ResultsConfig {
    fn default() -> Self {
        Self {
            directory: default_results_directory(),
            prefix: default_prefix(),
            format: ResultFormat::default(),
        }
    }
}

/// Scoped file generator settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilesConfig {
    /// Directory for scoped files; system temp directory when unset
    #[serde(default)]
    pub temp_directory: Option<PathBuf>,

    #[serde(default = "default_prefix")]
    pub prefix: String,
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            temp_directory: None,
            prefix: default_prefix(),
        }
    }
}

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    Algorithms(String),
    Results(String),
    Files(String),
    Logging(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Algorithms(msg) => write!(f, "algorithms: {}", msg),
            ValidationError::Results(msg) => write!(f, "results: {}", msg),
            ValidationError::Files(msg) => write!(f, "files: {}", msg),
            ValidationError::Logging(msg) => write!(f, "logging: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

fn is_valid_prefix(prefix: &str) -> bool {
    !prefix.is_empty() && !prefix.contains(['/', '\\'])
}

impl EngineConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.algorithms.directory.as_os_str().is_empty() {
            errors.push(ValidationError::Algorithms(
                "directory cannot be empty".to_string(),
            ));
        }
        if self.results.directory.as_os_str().is_empty() {
            errors.push(ValidationError::Results(
                "directory cannot be empty".to_string(),
            ));
        }
        if !is_valid_prefix(&self.results.prefix) {
            errors.push(ValidationError::Results(format!(
                "invalid prefix '{}'",
                self.results.prefix
            )));
        }
        if !is_valid_prefix(&self.files.prefix) {
            errors.push(ValidationError::Files(format!(
                "invalid prefix '{}'",
                self.files.prefix
            )));
        }
        if let Err(e) = self.logging.validate() {
            errors.push(ValidationError::Logging(e));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Resolve relative directories against `workspace_root`
    pub fn resolve_paths(mut self, workspace_root: &std::path::Path) -> Self {
        let resolve = |path: &mut PathBuf| {
            if path.is_relative() {
                *path = workspace_root.join(&*path);
            }
        };
        resolve(&mut self.algorithms.directory);
        resolve(&mut self.results.directory);
        if let Some(temp_directory) = self.files.temp_directory.as_mut() {
            resolve(temp_directory);
        }
        if let Some(file) = self.logging.file.as_mut() {
            resolve(file);
        }
        self
    }
}
