//! CLI parse: clap types for Metanome. No behavior beyond argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Metanome CLI - run data profiling algorithms
#[derive(Parser, Debug)]
#[command(name = "metanome")]
#[command(about = "Load, configure and execute data profiling algorithms")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root directory
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Directory holding algorithm libraries (overrides configuration)
    #[arg(long)]
    pub algorithms: Option<PathBuf>,

    /// Disable logging
    #[arg(long, short)]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long, short)]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Execute an algorithm and write its results
    Run {
        /// Algorithm identifier, e.g. example_fd_algorithm
        algorithm: String,

        /// Progress key (defaults to the algorithm identifier)
        #[arg(long)]
        key: Option<String>,

        /// Text values: --string id=value[,value...]
        #[arg(long = "string", value_name = "ID=VALUES", value_parser = parse_assignment)]
        strings: Vec<Assignment>,

        /// Boolean values: --bool id=true[,false...]
        #[arg(long = "bool", value_name = "ID=VALUES", value_parser = parse_assignment)]
        booleans: Vec<Assignment>,

        /// Integer values: --int id=7[,8...]
        #[arg(long = "int", value_name = "ID=VALUES", value_parser = parse_assignment)]
        integers: Vec<Assignment>,

        /// CSV relational inputs: --csv id=path.csv[,path.csv...]
        #[arg(long = "csv", value_name = "ID=PATHS", value_parser = parse_assignment)]
        csv_inputs: Vec<Assignment>,

        /// File inputs: --file id=path[,path...]
        #[arg(long = "file", value_name = "ID=PATHS", value_parser = parse_assignment)]
        file_inputs: Vec<Assignment>,

        /// CSV field separator
        #[arg(long, default_value_t = ',')]
        separator: char,

        /// CSV quote character
        #[arg(long, default_value_t = '"')]
        quote: char,

        /// CSV files have no header line
        #[arg(long)]
        no_header: bool,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// List algorithms in the algorithm directory
    List {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Show the configuration requirements an algorithm declares
    Requirements {
        /// Algorithm identifier
        algorithm: String,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
}

/// `identifier=value[,value...]` as given on the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub identifier: String,
    pub values: Vec<String>,
}

/// Parse `identifier=v1,v2`; an empty right-hand side yields no values
pub fn parse_assignment(raw: &str) -> Result<Assignment, String> {
    let (identifier, values) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected IDENTIFIER=VALUES, got '{}'", raw))?;
    let identifier = identifier.trim();
    if identifier.is_empty() {
        return Err(format!("missing identifier in '{}'", raw));
    }
    let values = if values.is_empty() {
        Vec::new()
    } else {
        values.split(',').map(|v| v.trim().to_string()).collect()
    };
    Ok(Assignment {
        identifier: identifier.to_string(),
        values,
    })
}
