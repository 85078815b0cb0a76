//! Relational inputs from CSV files injected into an inclusion dependency algorithm

use super::test_utils::{example_loader, RecordingSink};
use metanome::configuration::ConfigurationValue;
use metanome::error::{AlgorithmConfigurationError, AlgorithmExecutionError, ExecutorError};
use metanome::executor::AlgorithmExecutor;
use metanome::files::TempFileGenerator;
use metanome::input::{CsvFileGenerator, RelationalInputGenerator};
use metanome::progress::ProgressCache;
use metanome::results::DependencyResult;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

fn write_csv(dir: &Path, name: &str, contents: &str) -> Arc<dyn RelationalInputGenerator> {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    Arc::new(CsvFileGenerator::new(path).unwrap())
}

fn executor(sink: &Arc<RecordingSink>) -> AlgorithmExecutor {
    AlgorithmExecutor::new(
        Box::new(example_loader()),
        sink.clone(),
        ProgressCache::shared(),
        Arc::new(TempFileGenerator::new()),
    )
}

#[test]
fn test_inclusion_dependencies_between_two_csv_tables() {
    let dir = TempDir::new().unwrap();
    let orders = write_csv(dir.path(), "orders.csv", "customer,item\nada,pen\ngrace,ink\n");
    let customers = write_csv(
        dir.path(),
        "customers.csv",
        "customer,item\nada,pen\ngrace,paper\nalan,ink\n",
    );

    let sink = RecordingSink::new();
    let mut executor = executor(&sink);
    let values = [
        ConfigurationValue::text("tableName", ["orders"]),
        ConfigurationValue::relational_input("input", [orders, customers]),
    ];
    executor
        .execute_algorithm_with_values("example_ind_algorithm", &values)
        .unwrap();

    let rendered: Vec<String> = sink
        .results()
        .iter()
        .map(|result| match result {
            DependencyResult::InclusionDependency(ind) => ind.to_string(),
            other => panic!("unexpected result {:?}", other),
        })
        .collect();
    assert_eq!(
        rendered,
        vec![
            "[orders.csv.customer][=[customers.csv.customer]",
            "[orders.csv.item][=[customers.csv.item]",
        ]
    );
}

#[test]
fn test_one_relational_input_violates_declared_arity() {
    let dir = TempDir::new().unwrap();
    let only = write_csv(dir.path(), "only.csv", "a\n1\n");

    let sink = RecordingSink::new();
    let mut executor = executor(&sink);
    let values = [ConfigurationValue::relational_input("input", [only])];
    assert!(matches!(
        executor.execute_algorithm_with_values("example_ind_algorithm", &values),
        Err(ExecutorError::Configuration(
            AlgorithmConfigurationError::ArityMismatch { actual: 1, .. }
        ))
    ));
}

#[test]
fn test_ragged_csv_surfaces_as_an_execution_error() {
    let dir = TempDir::new().unwrap();
    let ragged = write_csv(dir.path(), "ragged.csv", "a,b\n1,2\n3\n");
    let fine = write_csv(dir.path(), "fine.csv", "a,b\n1,2\n");

    let sink = RecordingSink::new();
    let mut executor = executor(&sink);
    let values = [ConfigurationValue::relational_input("input", [ragged, fine])];
    match executor.execute_algorithm_with_values("example_ind_algorithm", &values) {
        Err(ExecutorError::Execution {
            source: AlgorithmExecutionError::InputIteration(_),
            ..
        }) => {}
        other => panic!("expected an input iteration failure, got {:?}", other),
    }
    assert!(sink.results().is_empty());
}
