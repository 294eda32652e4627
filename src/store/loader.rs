//! Seed-then-persist lifecycle

use crate::error::Error;
use crate::storage::StorageBackend;
use crate::store::{FileStore, ImportReport, ImportSource};

use log::{error, info, warn};
use serde::{Serialize, de::DeserializeOwned};

impl<T, S> FileStore<T, S>
where
    T: Serialize + DeserializeOwned,
    S: StorageBackend,
{
    /// Load the collection, seeding the data file on first run
    ///
    /// - transient store: empty collection, no filesystem access
    /// - data file exists: its content
    /// - otherwise: the seed file's content, which is then written out as the
    ///   new data file so later imports read persisted state
    ///
    /// Never fails. A broken or missing file yields an empty collection, and
    /// a failed seed write still returns the seed items. A seed that exists
    /// but cannot be read or decoded leaves the data file uncreated, so the
    /// next import tries the seed again.
    pub fn import_json(&self) -> Vec<T> {
        self.import_with_report().items
    }

    /// Same lifecycle as [`import_json`](Self::import_json), also telling
    /// where the items came from and whether seeding persisted them.
    pub fn import_with_report(&self) -> ImportReport<T> {
        if !self.persistent {
            return ImportReport {
                items: Vec::new(),
                source: ImportSource::Transient,
                seed_error: None,
            };
        }

        if self.data_path.exists() {
            info!(
                "import_json(): persistent data in {} exists",
                self.data_path.display()
            );
            let items = self.import_json_from(&self.data_path);
            info!("import_json(): imported {} objects", items.len());
            return ImportReport {
                items,
                source: ImportSource::Persistent,
                seed_error: None,
            };
        }

        info!(
            "import_json(): persistent data in {} is missing, seeding from {}",
            self.data_path.display(),
            self.seed_path.display()
        );
        let (items, seed_error) = match self.try_import_json_from(&self.seed_path) {
            Ok(items) => {
                let seed_error = self.persist_seed(&items);
                (items, seed_error)
            }
            Err(Error::PathNotFound(_)) => {
                warn!(
                    "import_json(): seed file {} does not exist",
                    self.seed_path.display()
                );
                let items = Vec::new();
                let seed_error = self.persist_seed(&items);
                (items, seed_error)
            }
            // A broken seed must not be locked in as an empty data file
            Err(e) => {
                error!("import_json(): not seeding, {e}");
                (Vec::new(), Some(e))
            }
        };
        info!("import_json(): imported {} objects", items.len());

        ImportReport {
            items,
            source: ImportSource::Seed,
            seed_error,
        }
    }

    /// Create the data file from freshly seeded items
    fn persist_seed(&self, items: &[T]) -> Option<Error> {
        match self.try_export_json(items) {
            Ok(()) => None,
            Err(e) => {
                error!(
                    "import_json(): could not create {}: {e}",
                    self.data_path.display()
                );
                Some(e)
            }
        }
    }
}
