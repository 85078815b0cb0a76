//! CLI route: run context and the single dispatch table for commands.

use crate::cli::command_name;
use crate::cli::parse::{Assignment, Commands};
use crate::cli::presentation::{
    format_algorithm_list_json, format_algorithm_list_text, format_requirements_json,
    format_requirements_text, format_run_summary_json, format_run_summary_text,
};
use crate::config::{ConfigLoader, EngineConfig};
use crate::configuration::ConfigurationValue;
use crate::error::ApiError;
use crate::executor::AlgorithmExecutor;
use crate::files::TempFileGenerator;
use crate::input::{
    CsvFileGenerator, DefaultFileInputGenerator, FileInputGenerator, RelationalInputGenerator,
};
use crate::loader::{AlgorithmLoader, DylibAlgorithmLoader};
use crate::progress::ProgressCache;
use crate::receiver::ResultPrinter;
use crate::results::ResultKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Everything `metanome run` reports back
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub algorithm: String,
    pub key: String,
    pub elapsed: Duration,
    pub progress: Option<f32>,
    /// Result files written, by kind
    pub outputs: Vec<(ResultKind, PathBuf)>,
}

/// CSV dialect applied to every `--csv` input of one run
#[derive(Debug, Clone, Copy)]
pub struct CsvDialect {
    pub separator: u8,
    pub quote: u8,
    pub has_header: bool,
}

/// Runtime context for CLI execution: resolved configuration and the algorithm loader.
pub struct RunContext {
    workspace_root: PathBuf,
    config: EngineConfig,
    loader: Arc<dyn AlgorithmLoader>,
}

impl RunContext {
    /// Load and validate configuration, then open the algorithm directory.
    pub fn new(
        workspace_root: PathBuf,
        config_path: Option<PathBuf>,
        algorithms_dir: Option<PathBuf>,
    ) -> Result<Self, ApiError> {
        let mut config = match config_path {
            Some(ref path) => ConfigLoader::load_from_file(path)?,
            None => ConfigLoader::load(&workspace_root)?,
        };
        if let Some(dir) = algorithms_dir {
            config.algorithms.directory = dir;
        }
        config.validate().map_err(|errors| {
            let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            ApiError::ConfigError(format!(
                "Configuration validation failed:\n{}",
                messages.join("\n")
            ))
        })?;
        let config = config.resolve_paths(&workspace_root);

        let loader = Arc::new(DylibAlgorithmLoader::new(&config.algorithms.directory));
        Ok(Self::from_parts(workspace_root, config, loader))
    }

    /// Context over an already resolved configuration and any loader
    pub fn from_parts(
        workspace_root: PathBuf,
        config: EngineConfig,
        loader: Arc<dyn AlgorithmLoader>,
    ) -> Self {
        Self {
            workspace_root,
            config,
            loader,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Run one command and return its rendered output
    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        let start = Instant::now();
        debug!(command = command_name(command), "Dispatching command");
        let output = match command {
            Commands::Run {
                algorithm,
                key,
                strings,
                booleans,
                integers,
                csv_inputs,
                file_inputs,
                separator,
                quote,
                no_header,
                format,
            } => {
                let dialect = CsvDialect {
                    separator: ascii_byte("separator", *separator)?,
                    quote: ascii_byte("quote", *quote)?,
                    has_header: !no_header,
                };
                let mut values = Vec::new();
                values.extend(strings.iter().map(text_value));
                for assignment in booleans {
                    values.push(boolean_value(assignment)?);
                }
                for assignment in integers {
                    values.push(integer_value(assignment)?);
                }
                for assignment in csv_inputs {
                    values.push(self.csv_value(assignment, dialect)?);
                }
                for assignment in file_inputs {
                    values.push(self.file_value(assignment)?);
                }
                let key = key.as_deref().unwrap_or(algorithm.as_str());
                let summary = self.run_algorithm(algorithm, key, &values)?;
                match parse_format(format)? {
                    OutputFormat::Text => format_run_summary_text(&summary),
                    OutputFormat::Json => format_run_summary_json(&summary),
                }
            }
            Commands::List { format } => {
                let algorithms = self.loader.available_algorithms()?;
                match parse_format(format)? {
                    OutputFormat::Text => format_algorithm_list_text(
                        &algorithms,
                        &self.config.algorithms.directory,
                    ),
                    OutputFormat::Json => format_algorithm_list_json(&algorithms),
                }
            }
            Commands::Requirements { algorithm, format } => {
                let loaded = self.loader.load(algorithm)?;
                let requirements = loaded.algorithm().configuration_requirements();
                match parse_format(format)? {
                    OutputFormat::Text => format_requirements_text(algorithm, &requirements),
                    OutputFormat::Json => format_requirements_json(algorithm, &requirements),
                }
            }
        };
        info!(
            command = command_name(command),
            duration_ms = start.elapsed().as_millis() as u64,
            "Command completed"
        );
        Ok(output)
    }

    /// Execute `identifier` once with a fresh executor, printing results to files
    pub fn run_algorithm(
        &self,
        identifier: &str,
        key: &str,
        values: &[ConfigurationValue],
    ) -> Result<RunSummary, ApiError> {
        let results = &self.config.results;
        let prefix = format!(
            "{}_{}",
            results.prefix,
            chrono::Utc::now().format("%Y-%m-%d_%H%M%S")
        );
        let printer = Arc::new(ResultPrinter::new(&results.directory, prefix, results.format));
        let files = Arc::new(TempFileGenerator::with_options(
            self.config.files.temp_directory.clone(),
            self.config.files.prefix.clone(),
        ));
        let progress = ProgressCache::shared();

        let mut executor = AlgorithmExecutor::new(
            Box::new(Arc::clone(&self.loader)),
            printer.clone(),
            Arc::clone(&progress),
            files,
        );
        let outcome = executor.execute_algorithm_with_key(key, identifier, values);
        let closed = executor.close();
        let elapsed = outcome?;
        closed?;

        let outputs = ResultKind::ALL
            .iter()
            .map(|kind| (*kind, printer.output_path(*kind)))
            .filter(|(_, path)| path.is_file())
            .collect();
        Ok(RunSummary {
            algorithm: identifier.to_string(),
            key: key.to_string(),
            elapsed,
            progress: progress.get_progress(key),
            outputs,
        })
    }

    fn resolve(&self, path: &str) -> PathBuf {
        let path = Path::new(path);
        if path.is_relative() {
            self.workspace_root.join(path)
        } else {
            path.to_path_buf()
        }
    }

    fn csv_value(
        &self,
        assignment: &Assignment,
        dialect: CsvDialect,
    ) -> Result<ConfigurationValue, ApiError> {
        let mut generators: Vec<Arc<dyn RelationalInputGenerator>> = Vec::new();
        for path in &assignment.values {
            let generator = CsvFileGenerator::new(self.resolve(path))
                .map_err(|e| ApiError::InvalidArgument(e.to_string()))?
                .with_separator(dialect.separator)
                .with_quote(dialect.quote)
                .with_header(dialect.has_header);
            generators.push(Arc::new(generator));
        }
        Ok(ConfigurationValue::relational_input(
            &assignment.identifier,
            generators,
        ))
    }

    fn file_value(&self, assignment: &Assignment) -> Result<ConfigurationValue, ApiError> {
        let mut generators: Vec<Arc<dyn FileInputGenerator>> = Vec::new();
        for path in &assignment.values {
            let generator = DefaultFileInputGenerator::new(self.resolve(path))
                .map_err(|e| ApiError::InvalidArgument(e.to_string()))?;
            generators.push(Arc::new(generator));
        }
        Ok(ConfigurationValue::file_input(&assignment.identifier, generators))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
}

fn parse_format(format: &str) -> Result<OutputFormat, ApiError> {
    match format {
        "text" => Ok(OutputFormat::Text),
        "json" => Ok(OutputFormat::Json),
        other => Err(ApiError::InvalidArgument(format!(
            "Invalid format: {} (must be 'text' or 'json')",
            other
        ))),
    }
}

fn ascii_byte(name: &str, c: char) -> Result<u8, ApiError> {
    if c.is_ascii() {
        Ok(c as u8)
    } else {
        Err(ApiError::InvalidArgument(format!(
            "CSV {} must be a single ASCII character, got '{}'",
            name, c
        )))
    }
}

fn text_value(assignment: &Assignment) -> ConfigurationValue {
    ConfigurationValue::text(&assignment.identifier, assignment.values.iter().cloned())
}

fn boolean_value(assignment: &Assignment) -> Result<ConfigurationValue, ApiError> {
    let values = assignment
        .values
        .iter()
        .map(|v| {
            v.parse::<bool>().map_err(|_| {
                ApiError::InvalidArgument(format!(
                    "'{}' is not a boolean (for {})",
                    v, assignment.identifier
                ))
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(ConfigurationValue::boolean(&assignment.identifier, values))
}

fn integer_value(assignment: &Assignment) -> Result<ConfigurationValue, ApiError> {
    let values = assignment
        .values
        .iter()
        .map(|v| {
            v.parse::<i64>().map_err(|_| {
                ApiError::InvalidArgument(format!(
                    "'{}' is not an integer (for {})",
                    v, assignment.identifier
                ))
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(ConfigurationValue::integer(&assignment.identifier, values))
}
