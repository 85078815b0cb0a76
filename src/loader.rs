//! Algorithm loading
//!
//! A loader resolves an identifier to an artifact, finds exactly one algorithm
//! entry in it and instantiates that entry. Artifacts are either dynamic libraries
//! built with [`export_algorithms!`](crate::export_algorithms) or in-process catalogs.

mod catalog;
mod dylib;

pub use catalog::CatalogAlgorithmLoader;
pub use dylib::DylibAlgorithmLoader;

use crate::algorithm::Algorithm;
use crate::error::AlgorithmLoadingError;
use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use tracing::debug;

/// Bumped whenever the algorithm traits change shape
pub const ALGORITHM_ABI_VERSION: u32 = 1;

pub(crate) const ABI_VERSION_SYMBOL: &[u8] = b"METANOME_ALGORITHM_ABI_VERSION\0";
pub(crate) const ENTRIES_SYMBOL: &[u8] = b"metanome_algorithm_entries\0";

/// Archive suffixes accepted on identifiers and stripped before lookup
const ARTIFACT_SUFFIXES: &[&str] = &[".jar"];

/// Resolves identifiers to live algorithm instances
pub trait AlgorithmLoader: Send + Sync {
    fn load(&self, identifier: &str) -> Result<LoadedAlgorithm, AlgorithmLoadingError>;

    /// Identifiers this loader can currently resolve, sorted
    fn available_algorithms(&self) -> Result<Vec<String>, AlgorithmLoadingError>;
}

impl<L: AlgorithmLoader + ?Sized> AlgorithmLoader for Arc<L> {
    fn load(&self, identifier: &str) -> Result<LoadedAlgorithm, AlgorithmLoadingError> {
        (**self).load(identifier)
    }

    fn available_algorithms(&self) -> Result<Vec<String>, AlgorithmLoadingError> {
        (**self).available_algorithms()
    }
}

/// One instantiable algorithm inside an artifact
#[derive(Clone, Copy)]
pub struct AlgorithmEntry {
    pub name: &'static str,
    pub create: fn() -> Box<dyn Algorithm>,
}

impl AlgorithmEntry {
    pub fn of<A: Algorithm + Default + 'static>() -> Self {
        Self {
            name: std::any::type_name::<A>(),
            create: create_default::<A>,
        }
    }
}

impl fmt::Debug for AlgorithmEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AlgorithmEntry")
            .field("name", &self.name)
            .finish()
    }
}

fn create_default<A: Algorithm + Default + 'static>() -> Box<dyn Algorithm> {
    Box::new(A::default())
}

/// A fresh algorithm instance plus a handle on the library it came from
pub struct LoadedAlgorithm {
    name: String,
    algorithm: Box<dyn Algorithm>,
    _library: Option<Arc<libloading::Library>>,
}

impl LoadedAlgorithm {
    pub fn new(name: impl Into<String>, algorithm: Box<dyn Algorithm>) -> Self {
        Self {
            name: name.into(),
            algorithm,
            _library: None,
        }
    }

    pub(crate) fn from_library(
        name: impl Into<String>,
        algorithm: Box<dyn Algorithm>,
        library: Arc<libloading::Library>,
    ) -> Self {
        Self {
            name: name.into(),
            algorithm,
            _library: Some(library),
        }
    }

    /// Type name of the instantiated entry
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn algorithm(&self) -> &dyn Algorithm {
        self.algorithm.as_ref()
    }

    pub fn algorithm_mut(&mut self) -> &mut dyn Algorithm {
        self.algorithm.as_mut()
    }
}

impl fmt::Debug for LoadedAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadedAlgorithm")
            .field("name", &self.name)
            .field("dynamic", &self._library.is_some())
            .finish()
    }
}

/// Identifier with a known archive suffix removed
pub fn artifact_stem(identifier: &str) -> &str {
    ARTIFACT_SUFFIXES
        .iter()
        .find_map(|suffix| identifier.strip_suffix(suffix))
        .unwrap_or(identifier)
}

/// Exactly one entry must be eligible
pub fn select_entry(
    identifier: &str,
    entries: &[AlgorithmEntry],
) -> Result<AlgorithmEntry, AlgorithmLoadingError> {
    match entries {
        [] => Err(AlgorithmLoadingError::NoAlgorithm(identifier.to_string())),
        [entry] => Ok(*entry),
        many => Err(AlgorithmLoadingError::AmbiguousAlgorithm {
            identifier: identifier.to_string(),
            candidates: many.iter().map(|e| e.name.to_string()).collect(),
        }),
    }
}

/// Run the entry's factory; a panicking factory is an instantiation failure
pub fn instantiate(entry: &AlgorithmEntry) -> Result<Box<dyn Algorithm>, AlgorithmLoadingError> {
    debug!(algorithm = entry.name, "Instantiating algorithm");
    let create = entry.create;
    panic::catch_unwind(AssertUnwindSafe(create)).map_err(|payload| {
        AlgorithmLoadingError::Instantiation {
            name: entry.name.to_string(),
            message: panic_message(payload.as_ref()),
        }
    })
}

pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

/// Export algorithm types from a `cdylib`/`dylib` crate
///
/// ```ignore
/// metanome::export_algorithms!(MyFdAlgorithm);
/// ```
///
/// Each type must implement `Algorithm + Default`.
#[macro_export]
macro_rules! export_algorithms {
    ($($algorithm:ty),+ $(,)?) => {
        #[no_mangle]
        pub static METANOME_ALGORITHM_ABI_VERSION: u32 = $crate::loader::ALGORITHM_ABI_VERSION;

        #[no_mangle]
        pub fn metanome_algorithm_entries() -> ::std::vec::Vec<$crate::loader::AlgorithmEntry> {
            ::std::vec![$($crate::loader::AlgorithmEntry::of::<$algorithm>()),+]
        }
    };
}
