//! Algorithm execution
//!
//! [`AlgorithmExecutor`] owns one execution session: it loads a fresh algorithm
//! per call, injects configuration, wires result capabilities, progress and
//! scratch files, then runs and times the algorithm. Closing the executor closes
//! the shared result sink and releases every scoped file.

use std::io;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, error, info, warn};

use crate::capability::{self, SharedSink};
use crate::configuration::ConfigurationValue;
use crate::error::{AlgorithmExecutionError, ExecutorError};
use crate::files::FileGenerator;
use crate::injector::ConfigurationInjector;
use crate::loader::{panic_message, AlgorithmLoader};
use crate::progress::ProgressCache;

pub struct AlgorithmExecutor {
    loader: Box<dyn AlgorithmLoader>,
    injector: ConfigurationInjector,
    result_receiver: SharedSink,
    progress_cache: Arc<ProgressCache>,
    file_generator: Arc<dyn FileGenerator>,
    executions: u64,
    closed: bool,
}

impl AlgorithmExecutor {
    pub fn new(
        loader: Box<dyn AlgorithmLoader>,
        result_receiver: SharedSink,
        progress_cache: Arc<ProgressCache>,
        file_generator: Arc<dyn FileGenerator>,
    ) -> Self {
        Self {
            loader,
            injector: ConfigurationInjector::new(),
            result_receiver,
            progress_cache,
            file_generator,
            executions: 0,
            closed: false,
        }
    }

    /// Shared cache pollers read progress from
    pub fn progress_cache(&self) -> Arc<ProgressCache> {
        Arc::clone(&self.progress_cache)
    }

    pub fn loader(&self) -> &dyn AlgorithmLoader {
        self.loader.as_ref()
    }

    /// Number of `execute` calls that reached the algorithm's entry point
    pub fn executions(&self) -> u64 {
        self.executions
    }

    /// Run `identifier`, tracking progress under the identifier itself
    pub fn execute_algorithm_with_values(
        &mut self,
        identifier: &str,
        values: &[ConfigurationValue],
    ) -> Result<Duration, ExecutorError> {
        self.execute_algorithm_with_key(identifier, identifier, values)
    }

    /// Run `identifier`, tracking progress under `key`
    ///
    /// Returns the time spent in the algorithm's entry point. On an execution
    /// failure the elapsed time is carried by the error. Fails with
    /// [`ExecutorError::Closed`] once the executor has been closed.
    pub fn execute_algorithm_with_key(
        &mut self,
        key: &str,
        identifier: &str,
        values: &[ConfigurationValue],
    ) -> Result<Duration, ExecutorError> {
        if self.closed {
            warn!(identifier, key, "Execution requested on a closed executor");
            return Err(ExecutorError::Closed);
        }
        let mut loaded = self.loader.load(identifier)?;
        let algorithm = loaded.algorithm_mut();

        let applied = self.injector.apply(&mut *algorithm, values)?;
        debug!(identifier, applied, supplied = values.len(), "Configuration injected");

        let wired = capability::wire_all(&mut *algorithm, &self.result_receiver);
        if wired.is_empty() {
            warn!(identifier, "Algorithm implements no result capability");
        }
        self.progress_cache.reset(key);
        if let Some(progress_estimating) = algorithm.as_progress_estimating_algorithm() {
            progress_estimating.set_progress_receiver(Arc::new(self.progress_cache.handle(key)));
        }
        if let Some(temp_file_algorithm) = algorithm.as_temp_file_algorithm() {
            temp_file_algorithm.set_temp_file_generator(Arc::clone(&self.file_generator));
        }

        info!(identifier, key, capabilities = ?wired, "Executing algorithm");
        self.executions += 1;
        let start = Instant::now();
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| algorithm.execute()));
        let elapsed = start.elapsed();

        let outcome = match outcome {
            Ok(result) => result,
            Err(payload) => Err(AlgorithmExecutionError::Panicked(panic_message(
                payload.as_ref(),
            ))),
        };
        match outcome {
            Ok(()) => {
                info!(identifier, elapsed_ms = elapsed.as_millis() as u64, "Algorithm finished");
                Ok(elapsed)
            }
            Err(source) => {
                error!(identifier, elapsed_ms = elapsed.as_millis() as u64, error = %source, "Algorithm failed");
                Err(ExecutorError::Execution { elapsed, source })
            }
        }
    }

    /// Close the result sink and release all scoped files
    ///
    /// Both steps are attempted; the first failure is returned. Calling this
    /// again after it succeeded or failed is a no-op.
    pub fn close(&mut self) -> io::Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;

        let receiver_result = self.result_receiver.close();
        if let Err(e) = &receiver_result {
            error!(error = %e, "Failed to close result receiver");
        }
        let files_result = self.file_generator.close();
        if let Err(e) = &files_result {
            error!(error = %e, "Failed to release scoped files");
        }
        debug!(executions = self.executions, "Executor closed");
        receiver_result.and(files_result)
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

impl Drop for AlgorithmExecutor {
    fn drop(&mut self) {
        if !self.closed {
            if let Err(e) = self.close() {
                warn!(error = %e, "Executor dropped without close; cleanup failed");
            }
        }
    }
}
