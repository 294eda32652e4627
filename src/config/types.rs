//! Core configuration types for seedstore

use std::path::{Component, Path, PathBuf};

use log::warn;

use super::params::{InitParams, parse_flag};
use crate::error::{Error, Result};
use crate::storage::{JsonStorage, StorageBackend};

/// Default file stem of the persistent data file
pub const DEFAULT_DATA_STEM: &str = "data";

/// Default file stem of the seed template file
pub const DEFAULT_SEED_STEM: &str = "seed";

/// Init parameter carrying the per-service default language tag
pub const DEFAULT_LANGUAGE_PARAM: &str = "languageCode";

/// Init parameter selecting persistent (`true`) or transient (`false`) mode
pub const PERSISTENT_PARAM: &str = "persistent";

/// Init parameter carrying the base directory for store files
pub const BASE_DIR_PARAM: &str = "baseDir";

/// Configuration for one file-backed store
///
/// Files live at `{base_dir}/{prefix}/{data_stem}.{ext}` and
/// `{base_dir}/{prefix}/{seed_stem}.{ext}`, where `ext` comes from the
/// storage backend.
#[derive(Debug, Clone)]
pub struct StoreConfig<S: StorageBackend = JsonStorage> {
    /// Base directory all store files are resolved against
    pub base_dir: PathBuf,

    /// Resource prefix (e.g. "companies"), a relative path under `base_dir`
    pub prefix: String,

    /// File stem of the persistent data file
    pub data_stem: String,

    /// File stem of the seed template file
    pub seed_stem: String,

    /// When false the store never touches the filesystem
    pub persistent: bool,

    /// Name of the init parameter holding the service default language
    pub language_param: String,

    /// Storage backend implementation
    pub storage: S,
}

impl<S: StorageBackend> StoreConfig<S> {
    /// Directory holding both files of this store
    pub fn resource_dir(&self) -> PathBuf {
        self.base_dir.join(&self.prefix)
    }

    /// Get the full path to the persistent data file
    pub fn data_path(&self) -> PathBuf {
        self.resource_dir()
            .join(format!("{}.{}", self.data_stem, self.storage.extension()))
    }

    /// Get the full path to the seed file
    pub fn seed_path(&self) -> PathBuf {
        self.resource_dir()
            .join(format!("{}.{}", self.seed_stem, self.storage.extension()))
    }
}

impl StoreConfig<JsonStorage> {
    /// Create a new builder for StoreConfig
    ///
    /// # Example
    /// ```rust
    /// use seedstore::StoreConfig;
    ///
    /// let config = StoreConfig::builder("companies")
    ///     .base_dir("/srv/app")
    ///     .build()
    ///     .unwrap();
    ///
    /// assert!(config.data_path().ends_with("companies/data.json"));
    /// ```
    pub fn builder(prefix: impl Into<String>) -> StoreConfigBuilder {
        StoreConfigBuilder::new(prefix)
    }
}

/// Builder for creating StoreConfig with a fluent API
#[derive(Debug, Clone)]
pub struct StoreConfigBuilder<S: StorageBackend = JsonStorage> {
    base_dir: Option<PathBuf>,
    prefix: String,
    data_stem: String,
    seed_stem: String,
    persistent: bool,
    language_param: String,
    storage: S,
}

impl StoreConfigBuilder<JsonStorage> {
    /// Create a new builder for the given resource prefix
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            base_dir: None,
            prefix: prefix.into(),
            data_stem: DEFAULT_DATA_STEM.into(),
            seed_stem: DEFAULT_SEED_STEM.into(),
            persistent: true,
            language_param: DEFAULT_LANGUAGE_PARAM.into(),
            storage: JsonStorage::new(),
        }
    }

    /// Use compact JSON (no pretty printing)
    #[must_use]
    pub fn compact_json(mut self) -> Self {
        self.storage = JsonStorage::compact();
        self
    }
}

impl<S: StorageBackend> StoreConfigBuilder<S> {
    /// Set the base directory
    ///
    /// Supports `~` expansion for home directory.
    #[must_use]
    pub fn base_dir(mut self, path: impl Into<PathBuf>) -> Self {
        let path: PathBuf = path.into();
        let expanded = if path.starts_with("~") {
            if let Some(home) = dirs::home_dir() {
                home.join(path.strip_prefix("~").unwrap_or(&path))
            } else {
                path
            }
        } else {
            path
        };
        self.base_dir = Some(expanded);
        self
    }

    /// Select persistent or transient mode (default: persistent)
    #[must_use]
    pub fn persistent(mut self, persistent: bool) -> Self {
        self.persistent = persistent;
        self
    }

    /// Shorthand for `persistent(false)`
    #[must_use]
    pub fn transient(self) -> Self {
        self.persistent(false)
    }

    /// Set the data file stem (default: "data")
    #[must_use]
    pub fn data_file(mut self, stem: impl Into<String>) -> Self {
        self.data_stem = stem.into();
        self
    }

    /// Set the seed file stem (default: "seed")
    #[must_use]
    pub fn seed_file(mut self, stem: impl Into<String>) -> Self {
        self.seed_stem = stem.into();
        self
    }

    /// Set the init parameter name holding the default language
    #[must_use]
    pub fn language_param(mut self, name: impl Into<String>) -> Self {
        self.language_param = name.into();
        self
    }

    /// Apply `persistent` and `baseDir` init parameters
    ///
    /// Parameters that are not set leave the builder unchanged. An
    /// unparseable `persistent` value is logged and ignored.
    #[must_use]
    pub fn from_init_params(mut self, params: &dyn InitParams) -> Self {
        if let Some(raw) = params.init_param(PERSISTENT_PARAM) {
            match parse_flag(&raw) {
                Some(flag) => self.persistent = flag,
                None => warn!(
                    "from_init_params(): ignoring invalid {PERSISTENT_PARAM} value '{raw}'"
                ),
            }
        }
        if let Some(dir) = params.init_param(BASE_DIR_PARAM) {
            if !dir.trim().is_empty() {
                self = self.base_dir(dir.trim());
            }
        }
        self
    }

    /// Swap the storage backend, keeping all other options
    pub fn with_storage<S2: StorageBackend>(self, storage: S2) -> StoreConfigBuilder<S2> {
        StoreConfigBuilder {
            base_dir: self.base_dir,
            prefix: self.prefix,
            data_stem: self.data_stem,
            seed_stem: self.seed_stem,
            persistent: self.persistent,
            language_param: self.language_param,
            storage,
        }
    }

    /// Build the StoreConfig
    ///
    /// If `base_dir` is not set, uses the current directory.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the prefix is empty, absolute or contains a
    /// `..` component, or if a file stem is empty or contains a separator.
    pub fn build(self) -> Result<StoreConfig<S>> {
        validate_prefix(&self.prefix)?;
        validate_stem("data", &self.data_stem)?;
        validate_stem("seed", &self.seed_stem)?;
        if self.data_stem == self.seed_stem {
            return Err(Error::Config(format!(
                "data and seed files must differ (both '{}')",
                self.data_stem
            )));
        }

        Ok(StoreConfig {
            base_dir: self.base_dir.unwrap_or_else(|| PathBuf::from(".")),
            prefix: self.prefix,
            data_stem: self.data_stem,
            seed_stem: self.seed_stem,
            persistent: self.persistent,
            language_param: self.language_param,
            storage: self.storage,
        })
    }
}

fn validate_prefix(prefix: &str) -> Result<()> {
    let trimmed = prefix.trim_matches('/');
    if trimmed.is_empty() {
        return Err(Error::Config("store prefix must not be empty".into()));
    }
    let path = Path::new(prefix);
    let escapes = path
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
    if escapes {
        return Err(Error::Config(format!(
            "store prefix '{prefix}' must be a relative path without '..'"
        )));
    }
    Ok(())
}

fn validate_stem(kind: &str, stem: &str) -> Result<()> {
    if stem.is_empty() {
        return Err(Error::Config(format!("{kind} file stem must not be empty")));
    }
    if stem.contains(['/', '\\']) || stem == "." || stem == ".." {
        return Err(Error::Config(format!(
            "{kind} file stem '{stem}' must be a plain file name"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_builder_defaults() {
        let config = StoreConfig::builder("companies").build().unwrap();

        assert!(config.persistent);
        assert_eq!(config.base_dir, PathBuf::from("."));
        assert_eq!(config.language_param, DEFAULT_LANGUAGE_PARAM);
        assert_eq!(
            config.data_path(),
            PathBuf::from("./companies/data.json")
        );
        assert_eq!(
            config.seed_path(),
            PathBuf::from("./companies/seed.json")
        );
    }

    #[test]
    fn test_builder_with_options() {
        let config = StoreConfig::builder("api/addressbooks")
            .base_dir("/srv/app")
            .data_file("books")
            .seed_file("books.seed")
            .language_param("lang")
            .transient()
            .build()
            .unwrap();

        assert!(!config.persistent);
        assert_eq!(config.language_param, "lang");
        assert_eq!(
            config.data_path(),
            PathBuf::from("/srv/app/api/addressbooks/books.json")
        );
        assert_eq!(
            config.seed_path(),
            PathBuf::from("/srv/app/api/addressbooks/books.seed.json")
        );
    }

    #[test]
    fn test_builder_rejects_bad_paths() {
        assert!(StoreConfig::builder("").build().is_err());
        assert!(StoreConfig::builder("../etc").build().is_err());
        assert!(StoreConfig::builder("/abs").build().is_err());
        assert!(StoreConfig::builder("ok").data_file("a/b").build().is_err());
        assert!(StoreConfig::builder("ok").seed_file("").build().is_err());
        assert!(
            StoreConfig::builder("ok")
                .data_file("same")
                .seed_file("same")
                .build()
                .is_err()
        );
    }

    #[test]
    fn test_from_init_params() {
        let params: HashMap<String, String> = [
            (PERSISTENT_PARAM.to_string(), "false".to_string()),
            (BASE_DIR_PARAM.to_string(), "/var/lib/svc".to_string()),
        ]
        .into();

        let config = StoreConfig::builder("companies")
            .from_init_params(&params)
            .build()
            .unwrap();

        assert!(!config.persistent);
        assert_eq!(config.base_dir, PathBuf::from("/var/lib/svc"));
    }

    #[test]
    fn test_from_init_params_ignores_invalid_flag() {
        let params: HashMap<String, String> =
            [(PERSISTENT_PARAM.to_string(), "sometimes".to_string())].into();

        let config = StoreConfig::builder("companies")
            .from_init_params(&params)
            .build()
            .unwrap();

        assert!(config.persistent);
    }

    #[test]
    fn test_compact_json_builder() {
        let config = StoreConfig::builder("companies")
            .compact_json()
            .build()
            .unwrap();
        let text = config.storage.serialize(&vec![1, 2]).unwrap();
        assert_eq!(text, "[1,2]");
    }
}
