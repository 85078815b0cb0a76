//! Entry point for loading [`EngineConfig`]

use super::merge::merge_policy;
use super::sources::{environment, global_file, workspace_file};
use super::EngineConfig;
use crate::error::ApiError;
use config::File;
use std::path::Path;
use tracing::debug;

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for `workspace_root`
    ///
    /// Sources in increasing precedence: defaults, global config, workspace
    /// `config/config.toml`, workspace `config/{METANOME_ENV}.toml`, environment.
    pub fn load(workspace_root: &Path) -> Result<EngineConfig, ApiError> {
        let global = global_file::global_config_path();
        Self::load_with_global(workspace_root, global.as_deref())
    }

    /// Like [`ConfigLoader::load`] with an explicit global config file
    pub fn load_with_global(
        workspace_root: &Path,
        global_config: Option<&Path>,
    ) -> Result<EngineConfig, ApiError> {
        let mut builder = merge_policy::builder_with_defaults()?;
        if let Some(path) = global_config {
            builder = global_file::add_to_builder(builder, path)?;
        }
        builder = workspace_file::add_to_builder(builder, workspace_root)?;
        builder = environment::add_to_builder(builder);

        let config: EngineConfig = builder.build()?.try_deserialize()?;
        debug!(workspace = %workspace_root.display(), "Configuration loaded");
        Ok(config)
    }

    /// Load a single TOML file over the defaults, without environment overrides
    pub fn load_from_file(path: &Path) -> Result<EngineConfig, ApiError> {
        let config = merge_policy::builder_with_defaults()?
            .add_source(File::from(path).required(true))
            .build()?;
        debug!(file = %path.display(), "Configuration loaded");
        Ok(config.try_deserialize()?)
    }
}
