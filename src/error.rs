//! Error types for the Metanome algorithm execution engine.
//!
//! Loading, configuration and execution failures are kept in separate enums so
//! callers can tell a bad plugin reference from bad input from a crashing plugin.

use crate::configuration::{Arity, ConfigurationKind};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Errors raised while resolving and instantiating an algorithm
#[derive(Debug, Error)]
pub enum AlgorithmLoadingError {
    #[error("Algorithm artifact not found: {identifier} (searched {searched:?})")]
    NotFound {
        identifier: String,
        searched: Vec<PathBuf>,
    },

    #[error("Failed to load algorithm library {path:?}: {message}")]
    Library { path: PathBuf, message: String },

    #[error("Missing export in algorithm library: {0}")]
    MissingExport(String),

    #[error("Algorithm ABI version mismatch: expected {expected}, actual {actual}")]
    AbiVersionMismatch { expected: u32, actual: u32 },

    #[error("No algorithm implementation found in {0}")]
    NoAlgorithm(String),

    #[error("Multiple algorithm implementations found in {identifier}: {candidates:?}")]
    AmbiguousAlgorithm {
        identifier: String,
        candidates: Vec<String>,
    },

    #[error("Failed to instantiate algorithm {name}: {message}")]
    Instantiation { name: String, message: String },

    #[error("Algorithm search path error: {0}")]
    SearchPath(#[from] std::io::Error),
}

/// Errors raised while handing configuration values to an algorithm
#[derive(Debug, Error)]
pub enum AlgorithmConfigurationError {
    #[error("Unknown configuration identifier: {0}")]
    UnknownIdentifier(String),

    #[error("Configuration {identifier} expects {expected} value(s), got {actual}")]
    ArityMismatch {
        identifier: String,
        expected: Arity,
        actual: usize,
    },

    #[error("Configuration {identifier} expects {expected} values, got {actual}")]
    KindMismatch {
        identifier: String,
        expected: ConfigurationKind,
        actual: ConfigurationKind,
    },

    #[error("Duplicate configuration requirement: {0}")]
    DuplicateRequirement(String),

    #[error("Configuration rejected: {0}")]
    Rejected(String),
}

/// Signals that a result could not be handed to the result sink
#[derive(Debug, Error)]
pub enum CouldNotReceiveResultError {
    #[error("Result receiver is closed")]
    Closed,

    #[error("Result receiver I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Result rejected: {0}")]
    Rejected(String),
}

/// Errors raised by an algorithm's own logic
#[derive(Debug, Error)]
pub enum AlgorithmExecutionError {
    #[error("Algorithm failed: {0}")]
    Failed(String),

    #[error("Algorithm panicked: {0}")]
    Panicked(String),

    #[error("Algorithm is missing required configuration: {0}")]
    MissingConfiguration(String),

    #[error(transparent)]
    CouldNotReceiveResult(#[from] CouldNotReceiveResultError),

    #[error(transparent)]
    InputGeneration(#[from] InputGenerationError),

    #[error(transparent)]
    InputIteration(#[from] InputIterationError),

    #[error(transparent)]
    FileCreation(#[from] FileCreationError),

    #[error("Algorithm I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors surfaced by [`crate::executor::AlgorithmExecutor`]
#[derive(Debug, Error)]
pub enum ExecutorError {
    #[error(transparent)]
    Loading(#[from] AlgorithmLoadingError),

    #[error(transparent)]
    Configuration(#[from] AlgorithmConfigurationError),

    #[error("Execution failed after {elapsed:?}: {source}")]
    Execution {
        elapsed: Duration,
        #[source]
        source: AlgorithmExecutionError,
    },

    #[error("Executor is closed; no further algorithms can run")]
    Closed,
}

impl ExecutorError {
    /// Elapsed time of the attempt, present only for execution failures
    pub fn elapsed(&self) -> Option<Duration> {
        match self {
            ExecutorError::Execution { elapsed, .. } => Some(*elapsed),
            _ => None,
        }
    }
}

/// Errors raised while creating a relational input
#[derive(Debug, Error)]
pub enum InputGenerationError {
    #[error("Input file not found: {0:?}")]
    FileNotFound(PathBuf),

    #[error("Input generation I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Input generation failed: {0}")]
    Failed(String),
}

/// Errors raised while iterating a relational input
#[derive(Debug, Error)]
pub enum InputIterationError {
    #[error("Row {row} has {actual} columns, expected {expected}")]
    ColumnCountMismatch {
        row: u64,
        expected: usize,
        actual: usize,
    },

    #[error("No more rows in relation {0}")]
    Exhausted(String),

    #[error("Malformed input: {0}")]
    Malformed(String),
}

impl From<csv::Error> for InputIterationError {
    fn from(err: csv::Error) -> Self {
        InputIterationError::Malformed(err.to_string())
    }
}

/// Errors raised by scoped file generators
#[derive(Debug, Error)]
pub enum FileCreationError {
    #[error("File generator is closed")]
    Closed,

    #[error("Could not create temporary file: {0}")]
    Io(#[from] std::io::Error),
}

/// Rejected progress updates
#[derive(Debug, Error, PartialEq)]
pub enum ProgressError {
    #[error("Progress must be within [0, 1], got {0}")]
    OutOfRange(f32),
}

/// Errors of the surrounding application layer (configuration, logging, CLI)
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error(transparent)]
    Executor(#[from] ExecutorError),

    #[error(transparent)]
    Loading(#[from] AlgorithmLoadingError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}
