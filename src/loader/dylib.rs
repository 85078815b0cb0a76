//! Dynamic library algorithm loader.
//!
//! Libraries are never unloaded once opened. Values created by plugin code, such as
//! an execution error carrying a boxed payload, keep pointing into the library after
//! the algorithm and even the loader that produced them are gone.

use std::collections::BTreeMap;
use std::env::consts::{DLL_EXTENSION, DLL_PREFIX, DLL_SUFFIX};
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use libloading::Library;
use parking_lot::{const_mutex, Mutex};
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::error::AlgorithmLoadingError;
use crate::loader::{
    artifact_stem, instantiate, panic_message, select_entry, AlgorithmEntry, AlgorithmLoader,
    LoadedAlgorithm, ABI_VERSION_SYMBOL, ALGORITHM_ABI_VERSION, ENTRIES_SYMBOL,
};

/// Every library opened by this process, keyed by canonical path
static OPEN_LIBRARIES: Mutex<BTreeMap<PathBuf, Arc<Library>>> = const_mutex(BTreeMap::new());

/// Open `path`, or reuse the mapping from an earlier load of the same file
fn open_library(path: &Path) -> Result<Arc<Library>, AlgorithmLoadingError> {
    let key = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
    let mut libraries = OPEN_LIBRARIES.lock();
    if let Some(library) = libraries.get(&key) {
        return Ok(Arc::clone(library));
    }

    // SAFETY: algorithm libraries are trusted host extensions built against this
    // crate; the ABI version export guards against mismatched trait layouts.
    let library = unsafe { Library::new(path) }.map_err(|e| AlgorithmLoadingError::Library {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    debug!(path = %key.display(), "Algorithm library mapped");
    let library = Arc::new(library);
    libraries.insert(key, Arc::clone(&library));
    Ok(library)
}

/// Loads algorithms from shared libraries in one search directory
#[derive(Debug, Clone)]
pub struct DylibAlgorithmLoader {
    search_dir: PathBuf,
    abi_version: u32,
}

impl DylibAlgorithmLoader {
    pub fn new(search_dir: impl Into<PathBuf>) -> Self {
        Self {
            search_dir: search_dir.into(),
            abi_version: ALGORITHM_ABI_VERSION,
        }
    }

    pub fn search_dir(&self) -> &Path {
        &self.search_dir
    }

    /// Paths tried for `identifier`, in order
    pub fn candidate_paths(&self, identifier: &str) -> Vec<PathBuf> {
        let stem = artifact_stem(identifier);
        let mut candidates = vec![
            self.search_dir.join(identifier),
            self.search_dir
                .join(format!("{}{}{}", DLL_PREFIX, stem, DLL_SUFFIX)),
            self.search_dir.join(format!("{}{}", stem, DLL_SUFFIX)),
        ];
        candidates.dedup();
        candidates
    }

    /// First existing candidate file
    pub fn resolve(&self, identifier: &str) -> Result<PathBuf, AlgorithmLoadingError> {
        let candidates = self.candidate_paths(identifier);
        candidates
            .iter()
            .find(|path| path.is_file())
            .cloned()
            .ok_or_else(|| AlgorithmLoadingError::NotFound {
                identifier: identifier.to_string(),
                searched: candidates,
            })
    }

    unsafe fn read_entries(
        &self,
        library: &Library,
    ) -> Result<Vec<AlgorithmEntry>, AlgorithmLoadingError> {
        let version = **library
            .get::<*const u32>(ABI_VERSION_SYMBOL)
            .map_err(|e| AlgorithmLoadingError::MissingExport(e.to_string()))?;
        if version != self.abi_version {
            return Err(AlgorithmLoadingError::AbiVersionMismatch {
                expected: self.abi_version,
                actual: version,
            });
        }

        let entries_fn = *library
            .get::<fn() -> Vec<AlgorithmEntry>>(ENTRIES_SYMBOL)
            .map_err(|e| AlgorithmLoadingError::MissingExport(e.to_string()))?;
        panic::catch_unwind(AssertUnwindSafe(entries_fn)).map_err(|payload| {
            AlgorithmLoadingError::Instantiation {
                name: "metanome_algorithm_entries".to_string(),
                message: panic_message(payload.as_ref()),
            }
        })
    }
}

impl AlgorithmLoader for DylibAlgorithmLoader {
    fn load(&self, identifier: &str) -> Result<LoadedAlgorithm, AlgorithmLoadingError> {
        let path = self.resolve(identifier)?;
        debug!(identifier, path = %path.display(), "Loading algorithm library");

        let library = open_library(&path)?;
        let entries = unsafe { self.read_entries(&library)? };
        let entry = select_entry(identifier, &entries)?;
        let algorithm = instantiate(&entry)?;

        info!(identifier, algorithm = entry.name, "Algorithm loaded");
        Ok(LoadedAlgorithm::from_library(entry.name, algorithm, library))
    }

    fn available_algorithms(&self) -> Result<Vec<String>, AlgorithmLoadingError> {
        if !self.search_dir.is_dir() {
            debug!(dir = %self.search_dir.display(), "Algorithm directory does not exist");
            return Ok(Vec::new());
        }

        let mut found = Vec::new();
        for entry in WalkDir::new(&self.search_dir).min_depth(1).max_depth(1) {
            let entry = entry.map_err(std::io::Error::from)?;
            let path = entry.path();
            if !entry.file_type().is_file()
                || path.extension().and_then(|e| e.to_str()) != Some(DLL_EXTENSION)
            {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                found.push(stem.strip_prefix(DLL_PREFIX).unwrap_or(stem).to_string());
            }
        }
        found.sort();
        Ok(found)
    }
}
