//! CLI presentation: text and json formatters per command family.

mod algorithm;
mod run;

pub use algorithm::{
    format_algorithm_list_json, format_algorithm_list_text, format_requirements_json,
    format_requirements_text,
};
pub use run::{format_run_summary_json, format_run_summary_text};
