//! # seedstore - file-backed typed collections
//!
//! A small persistence helper for service backends that keep a resource
//! collection in memory and mirror it to a file.
//!
//! ## Features
//!
//! - **Seed on first run**: if the data file is missing, the seed file is
//!   loaded and written out as the new data file
//! - **Graceful degradation**: missing or broken files yield an empty
//!   collection instead of an error
//! - **Transient mode**: a store that never touches the filesystem
//! - **Pluggable format**: JSON by default, YAML with the `yaml` feature
//! - **Language resolution**: explicit tag, then service default, then
//!   [`LanguageCode::default()`], cached per store
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use seedstore::{FileStore, StoreConfig};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize)]
//! struct Company {
//!     id: u32,
//!     name: String,
//! }
//!
//! # fn example() -> seedstore::Result<()> {
//! // Files: /srv/app/companies/data.json and /srv/app/companies/seed.json
//! let config = StoreConfig::builder("companies")
//!     .base_dir("/srv/app")
//!     .build()?;
//! let store: FileStore<Company> = FileStore::new(config);
//!
//! let mut companies = store.import_json();
//! companies.push(Company { id: 42, name: "Acme".into() });
//! store.export_json(&companies);
//! # Ok(())
//! # }
//! ```
//!
//! ## Language Resolution
//!
//! ```rust
//! use seedstore::{FileStore, LanguageCode, StoreConfig};
//! use std::collections::HashMap;
//!
//! let store: FileStore<u32> = FileStore::new(
//!     StoreConfig::builder("companies").transient().build().unwrap(),
//! );
//! let params: HashMap<String, String> =
//!     [("languageCode".to_string(), "DE".to_string())].into();
//!
//! // No explicit tag: the service default applies
//! assert_eq!(store.set_language_code(None, &params), LanguageCode::DE);
//! // Sticky until reset
//! assert_eq!(store.set_language_code(Some("FR"), &params), LanguageCode::DE);
//! ```
//!
//! ## Errors
//!
//! `import_json` and `export_json` never fail; problems are logged through
//! the [`log`] facade. The `try_*` methods and [`FileStore::import_with_report`]
//! return the underlying [`Error`] for callers that want to react to it.

mod error;
mod language;
mod store;
mod sync;

pub mod config;
pub mod storage;

pub use config::{EnvParams, InitParams, NoParams, StoreConfig, StoreConfigBuilder};
pub use error::{Error, Result};
pub use language::{LanguageCode, LanguageResolver};
pub use storage::{JsonStorage, StorageBackend};
pub use store::{FileStore, ImportReport, ImportSource};

#[cfg(feature = "yaml")]
pub use storage::YamlStorage;

/// Store using the default pretty-printed JSON backend
pub type JsonFileStore<T> = FileStore<T, JsonStorage>;

/// Store using the YAML backend (requires `yaml` feature)
#[cfg(feature = "yaml")]
pub type YamlFileStore<T> = FileStore<T, YamlStorage>;
