//! Algorithms loaded from real dynamic libraries
//!
//! The fixture crates under `tests/fixtures/` are built once per test run into
//! the integration test scratch directory, then copied into a per-test search
//! directory under the name the loader resolves.

use super::test_utils::RecordingSink;
use metanome::configuration::ConfigurationValue;
use metanome::error::{AlgorithmExecutionError, AlgorithmLoadingError, ExecutorError};
use metanome::executor::AlgorithmExecutor;
use metanome::files::TempFileGenerator;
use metanome::loader::{AlgorithmLoader, DylibAlgorithmLoader, ALGORITHM_ABI_VERSION};
use metanome::progress::ProgressCache;
use metanome::results::DependencyResult;
use std::env::consts::{DLL_PREFIX, DLL_SUFFIX};
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::{Arc, OnceLock};
use tempfile::TempDir;

const FIXTURE_PACKAGES: &[&str] = &[
    "fixture-fd-plugin",
    "fixture-ambiguous-plugin",
    "fixture-stale-plugin",
    "fixture-bare-plugin",
];

fn library_file(name: &str) -> String {
    format!("{}{}{}", DLL_PREFIX, name, DLL_SUFFIX)
}

/// Directory holding the built fixture libraries
fn fixture_libraries() -> &'static Path {
    static BUILT: OnceLock<PathBuf> = OnceLock::new();
    BUILT.get_or_init(|| {
        let target_dir = Path::new(env!("CARGO_TARGET_TMPDIR")).join("fixture-plugins");
        let mut command = Command::new(env!("CARGO"));
        command
            .arg("build")
            .arg("--manifest-path")
            .arg(Path::new(env!("CARGO_MANIFEST_DIR")).join("Cargo.toml"))
            .arg("--target-dir")
            .arg(&target_dir);
        for package in FIXTURE_PACKAGES {
            command.args(["--package", package]);
        }
        // Same profile as the host so both sides agree on every shared type.
        let profile = if cfg!(debug_assertions) {
            "debug"
        } else {
            command.arg("--release");
            "release"
        };
        let status = command.status().expect("failed to spawn cargo");
        assert!(status.success(), "fixture libraries failed to build");
        target_dir.join(profile)
    })
}

/// Search directory containing only the named fixture library
fn search_dir_with(name: &str) -> TempDir {
    let dir = TempDir::new().unwrap();
    let file = library_file(name);
    std::fs::copy(fixture_libraries().join(&file), dir.path().join(&file)).unwrap();
    dir
}

fn executor(search_dir: &Path, sink: &Arc<RecordingSink>) -> AlgorithmExecutor {
    AlgorithmExecutor::new(
        Box::new(DylibAlgorithmLoader::new(search_dir)),
        sink.clone(),
        ProgressCache::shared(),
        Arc::new(TempFileGenerator::new()),
    )
}

#[test]
fn test_library_algorithm_runs_and_delivers_results() {
    let dir = search_dir_with("fixture_fd_plugin");
    let loader = DylibAlgorithmLoader::new(dir.path());
    assert_eq!(loader.available_algorithms().unwrap(), vec!["fixture_fd_plugin"]);

    let sink = RecordingSink::new();
    let mut executor = executor(dir.path(), &sink);
    let values = [ConfigurationValue::text("pathToOutputFile", ["out"])];

    executor
        .execute_algorithm_with_values("fixture_fd_plugin.jar", &values)
        .unwrap();
    // A second run reuses the mapped library.
    executor
        .execute_algorithm_with_values("fixture_fd_plugin", &values)
        .unwrap();
    executor.close().unwrap();

    let rendered: Vec<String> = sink
        .results()
        .iter()
        .map(|result| match result {
            DependencyResult::FunctionalDependency(fd) => fd.to_string(),
            other => panic!("unexpected result {:?}", other),
        })
        .collect();
    assert_eq!(rendered, vec!["[plugin.a, plugin.b]->plugin.c"; 2]);
    assert_eq!(sink.close_count(), 1);
}

#[test]
fn test_library_configuration_is_checked_against_its_requirements() {
    let dir = search_dir_with("fixture_fd_plugin");
    let sink = RecordingSink::new();
    let mut executor = executor(dir.path(), &sink);

    let values = [ConfigurationValue::text("pathToOutputFile", ["a", "b"])];
    assert!(matches!(
        executor.execute_algorithm_with_values("fixture_fd_plugin", &values),
        Err(ExecutorError::Configuration(_))
    ));
    assert!(sink.results().is_empty());
}

#[test]
fn test_execution_error_from_library_outlives_executor_and_loader() {
    let dir = search_dir_with("fixture_fd_plugin");
    let sink = RecordingSink::new();
    let mut executor = executor(dir.path(), &sink);

    let values = [
        ConfigurationValue::text("pathToOutputFile", ["out"]),
        ConfigurationValue::text("failWith", ["io"]),
    ];
    let err = executor
        .execute_algorithm_with_values("fixture_fd_plugin", &values)
        .unwrap_err();
    assert_eq!(sink.results().len(), 1);

    executor.close().unwrap();
    drop(executor);

    let message = err.to_string();
    assert!(message.contains("fixture plugin io failure"), "{}", message);
    match &err {
        ExecutorError::Execution {
            source: AlgorithmExecutionError::Io(io_error),
            ..
        } => assert_eq!(io_error.kind(), io::ErrorKind::Other),
        other => panic!("expected an I/O execution error, got {}", other),
    }
    drop(err);
}

#[test]
fn test_library_for_another_abi_version_is_rejected() {
    let dir = search_dir_with("fixture_stale_plugin");
    let loader = DylibAlgorithmLoader::new(dir.path());
    match loader.load("fixture_stale_plugin") {
        Err(AlgorithmLoadingError::AbiVersionMismatch { expected, actual }) => {
            assert_eq!(expected, ALGORITHM_ABI_VERSION);
            assert_eq!(actual, ALGORITHM_ABI_VERSION + 1);
        }
        other => panic!("expected an ABI mismatch, got {:?}", other),
    }
}

#[test]
fn test_library_without_entries_export_is_rejected() {
    let dir = search_dir_with("fixture_bare_plugin");
    let sink = RecordingSink::new();
    let mut executor = executor(dir.path(), &sink);

    assert!(matches!(
        executor.execute_algorithm_with_values("fixture_bare_plugin", &[]),
        Err(ExecutorError::Loading(AlgorithmLoadingError::MissingExport(_)))
    ));
    assert_eq!(executor.executions(), 0);
}

#[test]
fn test_library_with_two_algorithms_is_ambiguous() {
    let dir = search_dir_with("fixture_ambiguous_plugin");
    let loader = DylibAlgorithmLoader::new(dir.path());
    match loader.load("fixture_ambiguous_plugin") {
        Err(AlgorithmLoadingError::AmbiguousAlgorithm { candidates, .. }) => {
            assert_eq!(candidates.len(), 2);
            assert!(candidates[0].ends_with("FirstAlgorithm"));
            assert!(candidates[1].ends_with("SecondAlgorithm"));
        }
        other => panic!("expected an ambiguous library, got {:?}", other),
    }
}
