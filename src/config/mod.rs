//! Store configuration
//!
//! - `StoreConfig` - Paths, mode and storage backend for one resource kind
//! - `StoreConfigBuilder` - Fluent builder with validation
//! - `InitParams` - Key/value init parameters supplied by the hosting process

mod params;
mod types;

pub use params::{EnvParams, InitParams, NoParams, parse_flag};
pub use types::{
    BASE_DIR_PARAM, DEFAULT_DATA_STEM, DEFAULT_LANGUAGE_PARAM, DEFAULT_SEED_STEM, PERSISTENT_PARAM,
    StoreConfig, StoreConfigBuilder,
};
