//! In-process algorithm catalog.

use std::collections::BTreeMap;

use tracing::debug;

use crate::algorithm::Algorithm;
use crate::error::AlgorithmLoadingError;
use crate::loader::{
    artifact_stem, instantiate, select_entry, AlgorithmEntry, AlgorithmLoader, LoadedAlgorithm,
};

/// Loader over algorithms compiled into the host
///
/// Each identifier names an artifact holding any number of entries; loading
/// follows the same exactly-one rule as dynamic libraries.
#[derive(Debug, Default)]
pub struct CatalogAlgorithmLoader {
    artifacts: BTreeMap<String, Vec<AlgorithmEntry>>,
}

impl CatalogAlgorithmLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `entry` to the artifact named `identifier`
    pub fn register(&mut self, identifier: impl Into<String>, entry: AlgorithmEntry) -> &mut Self {
        self.artifacts
            .entry(identifier.into())
            .or_default()
            .push(entry);
        self
    }

    /// Builder-style registration of one algorithm type
    pub fn with<A: Algorithm + Default + 'static>(mut self, identifier: impl Into<String>) -> Self {
        self.register(identifier, AlgorithmEntry::of::<A>());
        self
    }

    /// Declare an artifact with exactly these entries (possibly none)
    pub fn register_artifact(
        &mut self,
        identifier: impl Into<String>,
        entries: Vec<AlgorithmEntry>,
    ) -> &mut Self {
        self.artifacts.insert(identifier.into(), entries);
        self
    }

    fn lookup(&self, identifier: &str) -> Option<&[AlgorithmEntry]> {
        self.artifacts
            .get(identifier)
            .or_else(|| self.artifacts.get(artifact_stem(identifier)))
            .map(Vec::as_slice)
    }
}

impl AlgorithmLoader for CatalogAlgorithmLoader {
    fn load(&self, identifier: &str) -> Result<LoadedAlgorithm, AlgorithmLoadingError> {
        let entries = self
            .lookup(identifier)
            .ok_or_else(|| AlgorithmLoadingError::NotFound {
                identifier: identifier.to_string(),
                searched: Vec::new(),
            })?;
        let entry = select_entry(identifier, entries)?;
        let algorithm = instantiate(&entry)?;
        debug!(identifier, algorithm = entry.name, "Loaded catalog algorithm");
        Ok(LoadedAlgorithm::new(entry.name, algorithm))
    }

    fn available_algorithms(&self) -> Result<Vec<String>, AlgorithmLoadingError> {
        Ok(self.artifacts.keys().cloned().collect())
    }
}
