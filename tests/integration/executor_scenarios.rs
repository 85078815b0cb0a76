//! End-to-end executor behavior with the example algorithms

use super::test_utils::{example_loader, RecordingSink};
use metanome::configuration::ConfigurationValue;
use metanome::error::{
    AlgorithmConfigurationError, AlgorithmExecutionError, AlgorithmLoadingError,
    CouldNotReceiveResultError, ExecutorError,
};
use metanome::executor::AlgorithmExecutor;
use metanome::files::TempFileGenerator;
use metanome::loader::DylibAlgorithmLoader;
use metanome::progress::ProgressCache;
use metanome::results::{DependencyResult, ResultKind};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

fn executor(sink: &Arc<RecordingSink>) -> AlgorithmExecutor {
    AlgorithmExecutor::new(
        Box::new(example_loader()),
        sink.clone(),
        ProgressCache::shared(),
        Arc::new(TempFileGenerator::new()),
    )
}

#[test]
fn test_fd_algorithm_delivers_one_tagged_result() {
    let sink = RecordingSink::new();
    let mut executor = executor(&sink);

    let values = [ConfigurationValue::text("pathToOutputFile", ["path/to/file"])];
    let elapsed = executor
        .execute_algorithm_with_values("example_fd_algorithm", &values)
        .unwrap();
    assert!(elapsed >= Duration::ZERO);

    let results = sink.results();
    assert_eq!(results.len(), 1);
    match &results[0] {
        DependencyResult::FunctionalDependency(fd) => {
            assert_eq!(fd.to_string(), "[table1.column1, table1.column2]->table1.column5");
        }
        other => panic!("expected a functional dependency, got {:?}", other),
    }
    executor.close().unwrap();
}

#[test]
fn test_jar_suffix_resolves_to_the_same_algorithm() {
    let sink = RecordingSink::new();
    let mut executor = executor(&sink);
    let values = [ConfigurationValue::text("pathToOutputFile", ["out"])];
    executor
        .execute_algorithm_with_values("example_fd_algorithm.jar", &values)
        .unwrap();
    assert_eq!(sink.kinds(), vec![ResultKind::FunctionalDependency]);
}

#[test]
fn test_ucc_algorithm_reports_full_progress() {
    let sink = RecordingSink::new();
    let mut executor = executor(&sink);

    let values = [ConfigurationValue::text(
        "pathToInputFile",
        ["path/to/file1", "path/to/file2"],
    )];
    executor
        .execute_algorithm_with_values("example_ucc_algorithm", &values)
        .unwrap();

    assert_eq!(sink.kinds(), vec![ResultKind::UniqueColumnCombination]);
    assert_eq!(
        executor.progress_cache().get_progress("example_ucc_algorithm"),
        Some(1.0)
    );
}

#[test]
fn test_progress_is_tracked_under_the_execution_key() {
    let sink = RecordingSink::new();
    let mut executor = executor(&sink);
    let cache = executor.progress_cache();
    let values = [ConfigurationValue::text("pathToInputFile", ["a"])];

    executor
        .execute_algorithm_with_key("execution-7", "example_ucc_algorithm", &values)
        .unwrap();
    assert_eq!(cache.get_progress("execution-7"), Some(1.0));
    assert_eq!(cache.get_progress("example_ucc_algorithm"), None);
}

#[test]
fn test_holistic_algorithm_delivers_both_variants() {
    let sink = RecordingSink::new();
    let mut executor = executor(&sink);

    executor
        .execute_algorithm_with_values("example_holistic_algorithm", &[])
        .unwrap();

    let mut kinds = sink.kinds();
    kinds.sort();
    assert_eq!(
        kinds,
        vec![
            ResultKind::FunctionalDependency,
            ResultKind::UniqueColumnCombination
        ]
    );
}

#[test]
fn test_close_without_execute_closes_the_sink() {
    let sink = RecordingSink::new();
    let mut executor = executor(&sink);
    executor.close().unwrap();
    assert_eq!(sink.close_count(), 1);
}

#[test]
fn test_close_happens_exactly_once_after_many_executions() {
    let sink = RecordingSink::new();
    let mut executor = executor(&sink);
    let values = [ConfigurationValue::text("pathToOutputFile", ["out"])];

    for _ in 0..3 {
        executor
            .execute_algorithm_with_values("example_fd_algorithm", &values)
            .unwrap();
    }
    executor
        .execute_algorithm_with_values("failing_algorithm", &[])
        .unwrap_err();

    executor.close().unwrap();
    executor.close().unwrap();
    drop(executor);

    assert_eq!(sink.results().len(), 3);
    assert_eq!(sink.close_count(), 1);
}

#[test]
fn test_unknown_identifier_is_a_configuration_error_and_nothing_runs() {
    let sink = RecordingSink::new();
    let mut executor = executor(&sink);

    let values = [ConfigurationValue::text("pathToNowhere", ["x"])];
    let err = executor
        .execute_algorithm_with_values("example_fd_algorithm", &values)
        .unwrap_err();
    assert!(matches!(
        err,
        ExecutorError::Configuration(AlgorithmConfigurationError::UnknownIdentifier(ref id))
            if id == "pathToNowhere"
    ));
    assert!(sink.results().is_empty());
    assert_eq!(executor.executions(), 0);
}

#[test]
fn test_arity_mismatch_is_a_configuration_error() {
    let sink = RecordingSink::new();
    let mut executor = executor(&sink);

    let values = [ConfigurationValue::text("pathToOutputFile", ["a", "b"])];
    let err = executor
        .execute_algorithm_with_values("example_fd_algorithm", &values)
        .unwrap_err();
    assert!(matches!(
        err,
        ExecutorError::Configuration(AlgorithmConfigurationError::ArityMismatch { actual: 2, .. })
    ));
    assert!(err.elapsed().is_none());
    assert!(sink.results().is_empty());
}

#[test]
fn test_values_of_unsupported_kinds_are_inert() {
    let sink = RecordingSink::new();
    let mut executor = executor(&sink);

    let values = [
        ConfigurationValue::integer("maxDepth", [3]),
        ConfigurationValue::boolean("nullEqualsNull", [true]),
        ConfigurationValue::text("pathToOutputFile", ["out"]),
    ];
    executor
        .execute_algorithm_with_values("example_fd_algorithm", &values)
        .unwrap();
    assert_eq!(sink.results().len(), 1);
}

#[test]
fn test_missing_artifact_is_a_loading_error() {
    let dir = TempDir::new().unwrap();
    let sink = RecordingSink::new();
    let mut executor = AlgorithmExecutor::new(
        Box::new(DylibAlgorithmLoader::new(dir.path())),
        sink.clone(),
        ProgressCache::shared(),
        Arc::new(TempFileGenerator::new()),
    );

    // The value would be rejected by any algorithm; loading must fail first.
    let values = [ConfigurationValue::text("bogus", ["x"])];
    let err = executor
        .execute_algorithm_with_values("example_fd_algorithm.jar", &values)
        .unwrap_err();
    assert!(matches!(
        err,
        ExecutorError::Loading(AlgorithmLoadingError::NotFound { .. })
    ));

    executor.close().unwrap();
    assert_eq!(sink.close_count(), 1);
}

#[test]
fn test_unknown_catalog_identifier_is_a_loading_error() {
    let sink = RecordingSink::new();
    let mut executor = executor(&sink);
    assert!(matches!(
        executor.execute_algorithm_with_values("no_such_algorithm", &[]),
        Err(ExecutorError::Loading(_))
    ));
}

#[test]
fn test_execution_failure_keeps_elapsed_time() {
    let sink = RecordingSink::new();
    let mut executor = executor(&sink);

    let err = executor
        .execute_algorithm_with_values("failing_algorithm", &[])
        .unwrap_err();
    match err {
        ExecutorError::Execution { elapsed, source } => {
            assert!(elapsed.as_millis() >= 5);
            assert!(matches!(source, AlgorithmExecutionError::Failed(_)));
        }
        other => panic!("expected an execution error, got {}", other),
    }
}

#[test]
fn test_delivery_failures_only_fail_algorithms_that_propagate_them() {
    let sink = RecordingSink::refusing();
    let mut executor = executor(&sink);

    executor
        .execute_algorithm_with_values("example_holistic_algorithm", &[])
        .unwrap();

    let values = [ConfigurationValue::text("pathToOutputFile", ["out"])];
    let err = executor
        .execute_algorithm_with_values("example_fd_algorithm", &values)
        .unwrap_err();
    assert!(matches!(
        err,
        ExecutorError::Execution {
            source: AlgorithmExecutionError::CouldNotReceiveResult(
                CouldNotReceiveResultError::Rejected(_)
            ),
            ..
        }
    ));
}
