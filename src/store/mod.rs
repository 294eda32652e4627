//! File-backed collection store
//!
//! A [`FileStore`] owns the file lifecycle of one resource kind:
//!
//! - `loader` - seed-then-persist logic behind [`FileStore::import_json`]
//! - `io` - decode/encode of the whole collection against a path
//!
//! The collection itself always belongs to the caller.

mod io;
mod loader;

use crate::config::{InitParams, StoreConfig};
use crate::error::Error;
use crate::language::{LanguageCode, LanguageResolver};
use crate::storage::{JsonStorage, StorageBackend};

use log::debug;
use serde::{Serialize, de::DeserializeOwned};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

/// Where the items returned by an import came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportSource {
    /// Store is transient; nothing was read
    Transient,
    /// Read from the existing persistent data file
    Persistent,
    /// Read from the seed file because no data file existed yet
    Seed,
}

/// Outcome of [`FileStore::import_with_report`]
#[derive(Debug)]
pub struct ImportReport<T> {
    /// Imported items (empty on every failure path)
    pub items: Vec<T>,

    /// Which file the items were read from
    pub source: ImportSource,

    /// Set when the seed file could not be read or decoded, or when seeding
    /// could not create or write the persistent file
    pub seed_error: Option<Error>,
}

impl<T> ImportReport<T> {
    /// True if the persistent file is known to exist after this import
    pub fn persisted(&self) -> bool {
        match self.source {
            ImportSource::Transient => false,
            ImportSource::Persistent => true,
            ImportSource::Seed => self.seed_error.is_none(),
        }
    }
}

/// Typed collection store backed by a data file and a seed file
///
/// # Example
///
/// ```rust,no_run
/// use seedstore::{FileStore, StoreConfig};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize, Deserialize)]
/// struct Company {
///     id: u32,
///     name: String,
/// }
///
/// let config = StoreConfig::builder("companies")
///     .base_dir("/srv/app")
///     .build()?;
/// let store: FileStore<Company> = FileStore::new(config);
///
/// let mut companies = store.import_json();
/// companies.push(Company { id: 2, name: "Globex".into() });
/// store.export_json(&companies);
/// # Ok::<(), seedstore::Error>(())
/// ```
///
/// # Type Parameters
///
/// * `T`: Element type of the collection
/// * `S`: Storage backend (defaults to [`JsonStorage`])
#[derive(Debug)]
pub struct FileStore<T, S: StorageBackend = JsonStorage> {
    data_path: PathBuf,
    seed_path: PathBuf,
    persistent: bool,
    storage: S,
    language: LanguageResolver,
    _items: PhantomData<fn() -> T>,
}

impl<T, S> FileStore<T, S>
where
    T: Serialize + DeserializeOwned,
    S: StorageBackend,
{
    /// Create a store from its configuration
    ///
    /// Paths are resolved once here. Nothing is read or created until the
    /// first import or export.
    pub fn new(config: StoreConfig<S>) -> Self {
        let data_path = config.data_path();
        let seed_path = config.seed_path();
        debug!(
            "FileStore::new(): data={}, seed={}, persistent={}",
            data_path.display(),
            seed_path.display(),
            config.persistent
        );

        Self {
            data_path,
            seed_path,
            persistent: config.persistent,
            storage: config.storage,
            language: LanguageResolver::new(config.language_param),
            _items: PhantomData,
        }
    }

    /// Path of the persistent data file
    pub fn data_path(&self) -> &Path {
        &self.data_path
    }

    /// Path of the seed file
    pub fn seed_path(&self) -> &Path {
        &self.seed_path
    }

    /// Whether this store reads and writes files at all
    pub fn is_persistent(&self) -> bool {
        self.persistent
    }

    /// Resolve the language this store answers in
    ///
    /// See [`LanguageResolver`] for the precedence chain. The first result is
    /// cached on the store and returned by every later call until
    /// [`reset_language_code`](Self::reset_language_code).
    pub fn set_language_code(
        &self,
        requested: Option<&str>,
        params: &dyn InitParams,
    ) -> LanguageCode {
        self.language.resolve(requested, params)
    }

    /// Cached language, if one has been resolved
    pub fn language_code(&self) -> Option<LanguageCode> {
        self.language.current()
    }

    /// Clear the cached language
    pub fn reset_language_code(&self) {
        self.language.reset();
    }
}
