//! Environment source: `METANOME__RESULTS__PREFIX=run1` sets `results.prefix`

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::Environment;

pub fn add_to_builder(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
    builder.add_source(
        Environment::with_prefix("METANOME")
            .prefix_separator("__")
            .separator("__"),
    )
}
