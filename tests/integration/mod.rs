//! Integration tests for the Metanome algorithm host


mod csv_inclusion;
mod dylib_plugins;
mod executor_scenarios;
mod progress_observability;
