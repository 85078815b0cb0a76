//! Algorithm presentation: directory listing and declared requirements.

use crate::configuration::ConfigurationRequirement;
use comfy_table::Table;
use serde_json::json;
use std::path::Path;

pub fn format_algorithm_list_text(algorithms: &[String], directory: &Path) -> String {
    if algorithms.is_empty() {
        return format!("No algorithms found in {}", directory.display());
    }
    let mut output = format!("Algorithms in {}:\n", directory.display());
    for name in algorithms {
        output.push_str(&format!("  {}\n", name));
    }
    output.push_str(&format!("\nTotal: {} algorithm(s)", algorithms.len()));
    output
}

pub fn format_algorithm_list_json(algorithms: &[String]) -> String {
    let out = json!({ "algorithms": algorithms, "total": algorithms.len() });
    serde_json::to_string_pretty(&out).unwrap_or_else(|_| "{}".to_string())
}

pub fn format_requirements_text(algorithm: &str, requirements: &[ConfigurationRequirement]) -> String {
    if requirements.is_empty() {
        return format!("{} declares no configuration requirements.", algorithm);
    }
    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.set_header(vec!["Identifier", "Kind", "Values"]);
    for requirement in requirements {
        table.add_row(vec![
            requirement.identifier.clone(),
            requirement.kind.to_string(),
            requirement.arity.to_string(),
        ]);
    }
    format!("Requirements of {}:\n{}", algorithm, table)
}

pub fn format_requirements_json(algorithm: &str, requirements: &[ConfigurationRequirement]) -> String {
    let out = json!({ "algorithm": algorithm, "requirements": requirements });
    serde_json::to_string_pretty(&out).unwrap_or_else(|_| "{}".to_string())
}
