//! CLI domain: parse, route, help, output, and presentation only.
//! Execution itself lives in the executor; the route table only wires it up.

mod help;
mod output;
mod parse;
mod presentation;
mod route;

pub use help::command_name;
pub use output::map_error;
pub use parse::{parse_assignment, Assignment, Cli, Commands};
pub use presentation::{
    format_algorithm_list_json, format_algorithm_list_text, format_requirements_json,
    format_requirements_text, format_run_summary_json, format_run_summary_text,
};
pub use route::{CsvDialect, RunContext, RunSummary};
