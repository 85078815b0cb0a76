//! Metanome: a host for data profiling algorithms
//!
//! Algorithms are loaded by identifier, configured from typed values, wired to a
//! shared result sink through the result capabilities they implement, and executed
//! with timing, progress tracking and scoped scratch files.

pub mod algorithm;
pub mod capability;
pub mod cli;
pub mod config;
pub mod configuration;
pub mod error;
pub mod executor;
pub mod files;
pub mod injector;
pub mod input;
pub mod loader;
pub mod logging;
pub mod progress;
pub mod receiver;
pub mod results;
pub mod types;

pub use algorithm::Algorithm;
pub use configuration::{Arity, ConfigurationKind, ConfigurationRequirement, ConfigurationValue};
pub use executor::AlgorithmExecutor;
pub use loader::{AlgorithmLoader, CatalogAlgorithmLoader, DylibAlgorithmLoader};
pub use results::{DependencyResult, ResultKind};
