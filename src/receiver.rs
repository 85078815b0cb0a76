//! Result sinks shared across executions.
//!
//! A sink accepts every [`DependencyResult`] variant and is closed exactly once
//! by its owner. Results delivered after close are refused.

use crate::error::CouldNotReceiveResultError;
use crate::results::{DependencyResult, ResultKind};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Receives results of any kind
pub trait OmniscientResultReceiver: Send + Sync {
    fn receive_result(&self, result: DependencyResult) -> Result<(), CouldNotReceiveResultError>;
}

/// Result sink with a terminal close
pub trait CloseableOmniscientResultReceiver: OmniscientResultReceiver {
    fn close(&self) -> io::Result<()>;
}

/// In-memory sink; pollers drain new results with [`ResultCache::fetch_new_results`]
#[derive(Default)]
pub struct ResultCache {
    state: Mutex<CacheState>,
}

#[derive(Default)]
struct CacheState {
    results: Vec<DependencyResult>,
    fetched: usize,
    closed: bool,
}

impl ResultCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Results received since the previous fetch
    pub fn fetch_new_results(&self) -> Vec<DependencyResult> {
        let mut state = self.state.lock();
        let fresh = state.results[state.fetched..].to_vec();
        let total = state.results.len();
        state.fetched = total;
        fresh
    }

    /// Every result received so far
    pub fn results(&self) -> Vec<DependencyResult> {
        self.state.lock().results.clone()
    }

    pub fn count(&self, kind: ResultKind) -> usize {
        self.state
            .lock()
            .results
            .iter()
            .filter(|r| r.kind() == kind)
            .count()
    }

    pub fn is_closed(&self) -> bool {
        self.state.lock().closed
    }
}

impl OmniscientResultReceiver for ResultCache {
    fn receive_result(&self, result: DependencyResult) -> Result<(), CouldNotReceiveResultError> {
        let mut state = self.state.lock();
        if state.closed {
            return Err(CouldNotReceiveResultError::Closed);
        }
        state.results.push(result);
        Ok(())
    }
}

impl CloseableOmniscientResultReceiver for ResultCache {
    fn close(&self) -> io::Result<()> {
        self.state.lock().closed = true;
        Ok(())
    }
}

/// Line format written by [`ResultPrinter`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultFormat {
    #[default]
    Text,
    Json,
}

/// Writes results to one file per result kind: `<directory>/<prefix>_<suffix>`
///
/// Files are created lazily on the first result of their kind.
pub struct ResultPrinter {
    directory: PathBuf,
    prefix: String,
    format: ResultFormat,
    state: Mutex<PrinterState>,
}

#[derive(Default)]
struct PrinterState {
    writers: HashMap<ResultKind, BufWriter<File>>,
    closed: bool,
}

impl ResultPrinter {
    pub fn new(directory: impl Into<PathBuf>, prefix: impl Into<String>, format: ResultFormat) -> Self {
        Self {
            directory: directory.into(),
            prefix: prefix.into(),
            format,
            state: Mutex::new(PrinterState::default()),
        }
    }

    /// Path of the file holding results of `kind`
    pub fn output_path(&self, kind: ResultKind) -> PathBuf {
        self.directory
            .join(format!("{}_{}", self.prefix, kind.file_suffix()))
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    fn open_writer(&self, kind: ResultKind) -> io::Result<BufWriter<File>> {
        std::fs::create_dir_all(&self.directory)?;
        let path = self.output_path(kind);
        debug!(path = %path.display(), kind = %kind, "Opening result file");
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&path)?;
        Ok(BufWriter::new(file))
    }

    fn render(&self, result: &DependencyResult) -> Result<String, CouldNotReceiveResultError> {
        match self.format {
            ResultFormat::Text => Ok(result.to_string()),
            ResultFormat::Json => serde_json::to_string(result)
                .map_err(|e| CouldNotReceiveResultError::Rejected(e.to_string())),
        }
    }
}

impl OmniscientResultReceiver for ResultPrinter {
    fn receive_result(&self, result: DependencyResult) -> Result<(), CouldNotReceiveResultError> {
        let line = self.render(&result)?;
        let mut state = self.state.lock();
        if state.closed {
            return Err(CouldNotReceiveResultError::Closed);
        }
        let kind = result.kind();
        if !state.writers.contains_key(&kind) {
            let writer = self.open_writer(kind)?;
            state.writers.insert(kind, writer);
        }
        if let Some(writer) = state.writers.get_mut(&kind) {
            writeln!(writer, "{}", line)?;
        }
        Ok(())
    }
}

impl CloseableOmniscientResultReceiver for ResultPrinter {
    fn close(&self) -> io::Result<()> {
        let mut state = self.state.lock();
        if state.closed {
            return Ok(());
        }
        state.closed = true;

        let mut first_error = None;
        for (kind, mut writer) in state.writers.drain() {
            if let Err(e) = writer.flush() {
                warn!(kind = %kind, error = %e, "Failed to flush result file");
                first_error.get_or_insert(e);
            }
        }
        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}
