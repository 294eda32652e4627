//! Storage backend trait and implementations

use crate::error::{Error, Result, create_dir, create_file, open_file};
use log::warn;
use serde::{Serialize, de::DeserializeOwned};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

/// Trait for storage backend implementations
///
/// Keeps the file lifecycle of a store independent of the on-disk format.
pub trait StorageBackend: Clone + Send + Sync {
    /// File extension for this storage format (e.g., "json", "yaml")
    fn extension(&self) -> &str;

    /// Serialize data to string
    fn serialize<T: Serialize>(&self, data: &T) -> Result<String>;

    /// Deserialize data from string
    fn deserialize<T: DeserializeOwned>(&self, content: &str) -> Result<T>;

    /// Read and deserialize from file
    ///
    /// The file is read through a buffered stream that is closed before this
    /// returns, whether decoding succeeds or not.
    fn read<T: DeserializeOwned>(&self, path: &Path) -> Result<T> {
        let mut reader = BufReader::new(open_file(path)?);
        let mut content = String::new();
        reader.read_to_string(&mut content).map_err(|e| {
            if e.kind() == std::io::ErrorKind::InvalidData {
                Error::Parse {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                }
            } else {
                Error::FileRead {
                    path: path.to_path_buf(),
                    source: e,
                }
            }
        })?;
        drop(reader);

        self.deserialize(&content).map_err(|e| Error::Parse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Serialize and write to file, truncating any existing content
    ///
    /// Missing parent directories are created. There is no temp-file rename:
    /// concurrent writers race and the last one wins.
    fn write<T: Serialize>(&self, path: &Path, data: &T) -> Result<()> {
        let content = self.serialize(data)?;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                create_dir(parent)?;
            }
        }

        let mut writer = BufWriter::new(create_file(path)?);
        writer
            .write_all(content.as_bytes())
            .and_then(|()| writer.flush())
            .map_err(|e| Error::FileWrite {
                path: path.to_path_buf(),
                source: e,
            })?;

        // Errors on close after a successful flush only get logged
        let file = writer.into_inner().map_err(|e| Error::FileWrite {
            path: path.to_path_buf(),
            source: e.into_error(),
        })?;
        if let Err(e) = file.sync_all() {
            warn!("write({}): error while closing file: {e}", path.display());
        }
        Ok(())
    }
}

// =============================================================================
// JSON Storage Implementation
// =============================================================================

/// JSON storage backend (default)
#[derive(Clone, Debug)]
pub struct JsonStorage {
    /// Pretty print JSON output
    pretty: bool,
}

impl JsonStorage {
    /// Create a new JSON storage backend with pretty printing enabled
    #[must_use]
    pub fn new() -> Self {
        Self { pretty: true }
    }

    /// Create a compact JSON storage (no pretty printing)
    #[must_use]
    pub fn compact() -> Self {
        Self { pretty: false }
    }
}

impl Default for JsonStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl StorageBackend for JsonStorage {
    fn extension(&self) -> &str {
        "json"
    }

    fn serialize<T: Serialize>(&self, data: &T) -> Result<String> {
        if self.pretty {
            serde_json::to_string_pretty(data).map_err(Error::from)
        } else {
            serde_json::to_string(data).map_err(Error::from)
        }
    }

    fn deserialize<T: DeserializeOwned>(&self, content: &str) -> Result<T> {
        serde_json::from_str(content).map_err(Error::from)
    }
}

// =============================================================================
// YAML Storage Implementation
// =============================================================================

/// YAML storage backend
#[cfg(feature = "yaml")]
#[derive(Clone, Debug, Default)]
pub struct YamlStorage;

#[cfg(feature = "yaml")]
impl YamlStorage {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[cfg(feature = "yaml")]
impl StorageBackend for YamlStorage {
    fn extension(&self) -> &str {
        "yaml"
    }

    fn serialize<T: Serialize>(&self, data: &T) -> Result<String> {
        serde_yaml::to_string(data).map_err(|e| Error::Format(e.to_string()))
    }

    fn deserialize<T: DeserializeOwned>(&self, content: &str) -> Result<T> {
        serde_yaml::from_str(content).map_err(|e| Error::Format(e.to_string()))
    }
}

// =============================================================================
// Tests
// =============================================================================
