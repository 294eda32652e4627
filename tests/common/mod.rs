//! Common test utilities for seedstore integration tests
//!
//! Provides shared record types, a temp-dir fixture and file helpers.

#![allow(dead_code)]

use seedstore::{FileStore, StoreConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

// =============================================================================
// Test Records
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Company {
    pub id: u32,
    pub name: String,
}

impl Company {
    pub fn new(id: u32, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Address {
    pub street: String,
    pub city: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zip: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

pub const ACME_SEED: &str = r#"[{"id":1,"name":"Acme"}]"#;

// =============================================================================
// Fixture
// =============================================================================

/// Temp directory acting as the service's base dir
pub struct TestFixture {
    pub temp_dir: TempDir,
}

impl TestFixture {
    pub fn new() -> Self {
        let _ = env_logger::builder().is_test(true).try_init();
        Self {
            temp_dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    pub fn base_dir(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn resource_dir(&self, prefix: &str) -> PathBuf {
        self.base_dir().join(prefix)
    }

    /// Persistent store for `prefix` under the fixture's base dir
    pub fn store<T>(&self, prefix: &str) -> FileStore<T>
    where
        T: Serialize + serde::de::DeserializeOwned,
    {
        FileStore::new(
            StoreConfig::builder(prefix)
                .base_dir(self.base_dir())
                .build()
                .expect("valid store config"),
        )
    }

    /// Transient store for `prefix` under the fixture's base dir
    pub fn transient_store<T>(&self, prefix: &str) -> FileStore<T>
    where
        T: Serialize + serde::de::DeserializeOwned,
    {
        FileStore::new(
            StoreConfig::builder(prefix)
                .base_dir(self.base_dir())
                .transient()
                .build()
                .expect("valid store config"),
        )
    }

    /// Write the seed file for `prefix`
    pub fn write_seed(&self, prefix: &str, content: &str) -> PathBuf {
        self.write_file(prefix, "seed.json", content)
    }

    /// Write the data file for `prefix`
    pub fn write_data(&self, prefix: &str, content: &str) -> PathBuf {
        self.write_file(prefix, "data.json", content)
    }

    pub fn write_file(&self, prefix: &str, name: &str, content: &str) -> PathBuf {
        let dir = self.resource_dir(prefix);
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    pub fn read_json(&self, path: &Path) -> serde_json::Value {
        let content = std::fs::read_to_string(path).unwrap();
        serde_json::from_str(&content).unwrap()
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}
