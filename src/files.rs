//! Scoped file generation
//!
//! Algorithms ask a [`FileGenerator`] for scratch files. Every file handed out stays
//! on disk until the generator is closed, which the executor does on its own close.

use crate::error::FileCreationError;
use parking_lot::Mutex;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use tempfile::{Builder, TempPath};
use tracing::{debug, warn};

/// Hands out files whose lifetime is bound to the generator
pub trait FileGenerator: Send + Sync {
    fn temporary_file(&self) -> Result<ScopedFile, FileCreationError>;

    /// Delete every file handed out so far; further requests fail
    fn close(&self) -> io::Result<()>;
}

/// A writable file owned by a generator
#[derive(Debug)]
pub struct ScopedFile {
    file: File,
    path: PathBuf,
}

impl ScopedFile {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn file(&mut self) -> &mut File {
        &mut self.file
    }

    pub fn into_file(self) -> File {
        self.file
    }
}

/// [`FileGenerator`] backed by `tempfile`
pub struct TempFileGenerator {
    directory: Option<PathBuf>,
    prefix: String,
    state: Mutex<GeneratorState>,
}

#[derive(Default)]
struct GeneratorState {
    files: Vec<TempPath>,
    closed: bool,
}

impl TempFileGenerator {
    /// Files go to the system temp directory
    pub fn new() -> Self {
        Self::with_options(None, "metanome")
    }

    pub fn with_options(directory: Option<PathBuf>, prefix: impl Into<String>) -> Self {
        Self {
            directory,
            prefix: prefix.into(),
            state: Mutex::new(GeneratorState::default()),
        }
    }

    /// Number of files currently held
    pub fn outstanding(&self) -> usize {
        self.state.lock().files.len()
    }
}

impl Default for TempFileGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl FileGenerator for TempFileGenerator {
    fn temporary_file(&self) -> Result<ScopedFile, FileCreationError> {
        let mut state = self.state.lock();
        if state.closed {
            return Err(FileCreationError::Closed);
        }

        let mut builder = Builder::new();
        builder.prefix(&self.prefix);
        let named = match &self.directory {
            Some(directory) => {
                std::fs::create_dir_all(directory)?;
                builder.tempfile_in(directory)?
            }
            None => builder.tempfile()?,
        };
        let (file, temp_path) = named.into_parts();
        let path = temp_path.to_path_buf();
        debug!(path = %path.display(), "Created scoped file");

        state.files.push(temp_path);
        Ok(ScopedFile { file, path })
    }

    fn close(&self) -> io::Result<()> {
        let mut state = self.state.lock();
        state.closed = true;

        let mut first_error = None;
        for temp_path in state.files.drain(..) {
            let path = temp_path.to_path_buf();
            match temp_path.close() {
                Ok(()) => debug!(path = %path.display(), "Removed scoped file"),
                // Already deleted by the algorithm.
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Failed to remove scoped file");
                    first_error.get_or_insert(e);
                }
            }
        }
        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}
