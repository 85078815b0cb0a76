//! Relational input contracts
//!
//! Algorithms receive generators rather than open inputs so they can iterate a
//! relation as many times as they need. CSV files are the built-in source.

mod csv_file;

pub use csv_file::{CsvFile, CsvFileGenerator, DEFAULT_QUOTE, DEFAULT_SEPARATOR};

use crate::error::{InputGenerationError, InputIterationError};
use std::fs::File;
use std::path::{Path, PathBuf};

/// Row iterator over one relation
pub trait RelationalInput: Send {
    fn has_next(&self) -> bool;

    /// Next row; fails when the row width differs from the established column count
    fn next(&mut self) -> Result<Vec<String>, InputIterationError>;

    fn number_of_columns(&self) -> usize;

    fn relation_name(&self) -> &str;

    fn column_names(&self) -> &[String];

    fn close(&mut self) -> Result<(), InputIterationError>;
}

/// Produces fresh iterators over the same relation
pub trait RelationalInputGenerator: Send + Sync {
    fn generate_new_copy(&self) -> Result<Box<dyn RelationalInput>, InputGenerationError>;

    /// Human-readable source description for logs
    fn describe(&self) -> String;
}

/// Produces fresh handles to an input file
pub trait FileInputGenerator: Send + Sync {
    fn input_file(&self) -> &Path;

    fn generate_new_copy(&self) -> Result<File, InputGenerationError>;
}

/// [`FileInputGenerator`] over a path on disk
#[derive(Debug, Clone)]
pub struct DefaultFileInputGenerator {
    path: PathBuf,
}

impl DefaultFileInputGenerator {
    /// Fails when `path` is not an existing file
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, InputGenerationError> {
        let path = path.into();
        if !path.is_file() {
            return Err(InputGenerationError::FileNotFound(path));
        }
        Ok(Self { path })
    }
}

impl FileInputGenerator for DefaultFileInputGenerator {
    fn input_file(&self) -> &Path {
        &self.path
    }

    fn generate_new_copy(&self) -> Result<File, InputGenerationError> {
        Ok(File::open(&self.path)?)
    }
}
