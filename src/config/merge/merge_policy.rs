//! Merge rules: defaults, override order, conflict handling.

use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    Config::builder()
        .set_default("algorithms.directory", "algorithms")?
        .set_default("results.directory", "results")?
        .set_default("results.prefix", "metanome")?
        .set_default("results.format", "text")?
        .set_default("files.prefix", "metanome")
}
