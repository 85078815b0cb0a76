//! Progress polling from outside the executing thread

use super::test_utils::{example_loader, RecordingSink};
use metanome::configuration::ConfigurationValue;
use metanome::executor::AlgorithmExecutor;
use metanome::files::TempFileGenerator;
use metanome::progress::ProgressCache;
use std::sync::Arc;
use std::thread;

#[test]
fn test_poller_observes_progress_of_a_background_execution() {
    let cache = ProgressCache::shared();
    let sink = RecordingSink::new();
    let mut executor = AlgorithmExecutor::new(
        Box::new(example_loader()),
        sink.clone(),
        Arc::clone(&cache),
        Arc::new(TempFileGenerator::new()),
    );

    assert_eq!(cache.get_progress("background"), None);

    let worker = thread::spawn(move || {
        let values = [ConfigurationValue::text("pathToInputFile", ["table.csv"])];
        let elapsed = executor.execute_algorithm_with_key("background", "example_ucc_algorithm", &values);
        executor.close().map(|_| elapsed)
    });

    let mut observed = Vec::new();
    while !worker.is_finished() {
        if let Some(progress) = cache.get_progress("background") {
            observed.push(progress);
        }
        thread::yield_now();
    }
    worker.join().unwrap().unwrap().unwrap();

    assert!(observed.iter().all(|p| (0.0..=1.0).contains(p)));
    assert!(observed.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(cache.get_progress("background"), Some(1.0));
    assert_eq!(sink.close_count(), 1);
}

#[test]
fn test_last_progress_persists_until_the_key_is_reused() {
    let cache = ProgressCache::shared();
    let sink = RecordingSink::new();
    let mut executor = AlgorithmExecutor::new(
        Box::new(example_loader()),
        sink,
        Arc::clone(&cache),
        Arc::new(TempFileGenerator::new()),
    );

    let values = [ConfigurationValue::text("pathToInputFile", ["a"])];
    executor
        .execute_algorithm_with_key("job", "example_ucc_algorithm", &values)
        .unwrap();
    assert_eq!(cache.get_progress("job"), Some(1.0));

    // A rerun under the same key starts from zero; this one fails before reporting more.
    executor
        .execute_algorithm_with_key("job", "example_ucc_algorithm", &[])
        .unwrap_err();
    assert_eq!(cache.get_progress("job"), Some(0.0));
}
