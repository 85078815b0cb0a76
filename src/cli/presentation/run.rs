//! Run presentation: execution time, progress and written result files.

use crate::cli::route::RunSummary;
use serde_json::json;

pub fn format_run_summary_text(summary: &RunSummary) -> String {
    let mut output = format!(
        "Executed {} in {} ms",
        summary.algorithm,
        summary.elapsed.as_millis()
    );
    if let Some(progress) = summary.progress {
        output.push_str(&format!(" (progress {:.0}%)", progress * 100.0));
    }
    if summary.outputs.is_empty() {
        output.push_str("\nNo results were produced.");
    } else {
        output.push_str("\nResults:");
        for (kind, path) in &summary.outputs {
            output.push_str(&format!("\n  {:<28} {}", kind.as_str(), path.display()));
        }
    }
    output
}

pub fn format_run_summary_json(summary: &RunSummary) -> String {
    let outputs: Vec<_> = summary
        .outputs
        .iter()
        .map(|(kind, path)| json!({ "kind": kind, "path": path }))
        .collect();
    let out = json!({
        "algorithm": summary.algorithm,
        "key": summary.key,
        "elapsed_ms": summary.elapsed.as_millis() as u64,
        "progress": summary.progress,
        "outputs": outputs,
    });
    serde_json::to_string_pretty(&out).unwrap_or_else(|_| "{}".to_string())
}
