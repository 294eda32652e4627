//! Reader and writer for a store's collection

use crate::error::{Error, Result};
use crate::storage::StorageBackend;
use crate::store::FileStore;

use log::{debug, error, info, warn};
use serde::{Serialize, de::DeserializeOwned};
use std::path::Path;

impl<T, S> FileStore<T, S>
where
    T: Serialize + DeserializeOwned,
    S: StorageBackend,
{
    /// Decode the collection stored at `path`
    ///
    /// Returns an empty collection if the store is transient, the file is
    /// missing or unreadable, or its content does not decode. Each of those
    /// is logged, none is raised.
    pub fn import_json_from(&self, path: impl AsRef<Path>) -> Vec<T> {
        let path = path.as_ref();
        match self.try_import_json_from(path) {
            Ok(items) => items,
            Err(e @ Error::PathNotFound(_)) => {
                warn!("import_json({}): {e}", file_name(path));
                Vec::new()
            }
            Err(e @ Error::FileRead { .. }) => {
                warn!("import_json({}): file is not readable: {e}", file_name(path));
                Vec::new()
            }
            Err(e) => {
                error!("import_json({}): {e}", file_name(path));
                Vec::new()
            }
        }
    }

    /// Decode the collection stored at `path`, reporting failures
    ///
    /// A transient store returns `Ok` with an empty collection without
    /// looking at `path`.
    ///
    /// # Errors
    ///
    /// * `Error::PathNotFound` - `path` does not exist
    /// * `Error::FileRead` - `path` exists but cannot be opened or read
    /// * `Error::Parse` - the content is not a list of `T`
    pub fn try_import_json_from(&self, path: impl AsRef<Path>) -> Result<Vec<T>> {
        if !self.persistent {
            return Ok(Vec::new());
        }

        let path = path.as_ref();
        info!("import_json({}): importing data", file_name(path));

        if !path.exists() {
            return Err(Error::PathNotFound(path.to_path_buf()));
        }

        let items: Vec<T> = self.storage.read(path)?;
        info!(
            "import_json({}): {} objects imported",
            file_name(path),
            items.len()
        );
        Ok(items)
    }

    /// Write `items` to the persistent data file, replacing its content
    ///
    /// Does nothing for a transient store. Failures are logged and not
    /// returned; use [`try_export_json`](Self::try_export_json) to see them.
    pub fn export_json(&self, items: &[T]) {
        if let Err(e) = self.try_export_json(items) {
            error!("export_json({}): {e}", file_name(&self.data_path));
        }
    }

    /// Write `items` to the persistent data file, reporting failures
    ///
    /// Missing parent directories are created. A transient store returns
    /// `Ok(())` without touching the filesystem.
    ///
    /// # Errors
    ///
    /// * `Error::DirectoryCreate` - the data file's directory cannot be created
    /// * `Error::FileWrite` - the data file cannot be opened or written
    /// * `Error::Serialize` / `Error::Format` - `items` cannot be encoded
    pub fn try_export_json(&self, items: &[T]) -> Result<()> {
        if !self.persistent {
            debug!("export_json(): transient store, skipping");
            return Ok(());
        }

        info!(
            "export_json({}): exporting {} objects",
            file_name(&self.data_path),
            items.len()
        );
        self.storage.write(&self.data_path, &items)
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use crate::config::StoreConfig;
    use crate::store::FileStore;
    use serde::{Deserialize, Serialize};
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Company {
        id: u32,
        name: String,
    }

    fn store(dir: &TempDir) -> FileStore<Company> {
        FileStore::new(
            StoreConfig::builder("companies")
                .base_dir(dir.path())
                .build()
                .unwrap(),
        )
    }

    #[test]
    fn test_import_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);

        let err = store.try_import_json_from(store.data_path()).unwrap_err();
        assert!(err.is_not_found());
        assert!(store.import_json_from(store.data_path()).is_empty());
    }

    #[test]
    fn test_import_zero_elements() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        std::fs::create_dir_all(dir.path().join("companies")).unwrap();
        std::fs::write(store.data_path(), "[]").unwrap();

        let items = store.try_import_json_from(store.data_path()).unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn test_import_malformed_degrades_to_empty() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        std::fs::create_dir_all(dir.path().join("companies")).unwrap();
        std::fs::write(store.data_path(), "{\"not\": \"a list\"}").unwrap();

        assert!(matches!(
            store.try_import_json_from(store.data_path()),
            Err(crate::Error::Parse { .. })
        ));
        assert!(store.import_json_from(store.data_path()).is_empty());
    }

    #[test]
    fn test_export_then_import() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        let items = vec![Company {
            id: 7,
            name: "Initech".into(),
        }];

        store.try_export_json(&items).unwrap();

        let content = std::fs::read_to_string(store.data_path()).unwrap();
        assert!(content.contains('\n'), "export should be pretty-printed");
        assert_eq!(store.import_json_from(store.data_path()), items);
    }

    #[test]
    fn test_export_to_unwritable_target_is_swallowed() {
        let dir = TempDir::new().unwrap();
        // A directory where the data file should be makes the open fail
        std::fs::create_dir_all(dir.path().join("companies/data.json")).unwrap();
        let store = store(&dir);

        let err = store.try_export_json(&[]).unwrap_err();
        assert!(matches!(err, crate::Error::FileWrite { .. }));
        store.export_json(&[]);
    }
}
