//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::{ApiError, ExecutorError};

/// Map domain errors to a string for CLI output.
/// Execution failures include how long the algorithm ran before failing.
pub fn map_error(e: &ApiError) -> String {
    match e {
        ApiError::Executor(ExecutorError::Execution { elapsed, source }) => format!(
            "Algorithm execution failed after {} ms: {}",
            elapsed.as_millis(),
            source
        ),
        ApiError::Executor(ExecutorError::Configuration(source)) => {
            format!("Algorithm configuration rejected: {}", source)
        }
        other => other.to_string(),
    }
}
