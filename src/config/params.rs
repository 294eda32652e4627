//! Init parameter sources
//!
//! A hosting process hands configuration to a store as plain string
//! parameters. These are looked up by name when a store is configured and
//! when a language is resolved.

use std::collections::HashMap;

/// Source of named initialization parameters
pub trait InitParams: Send + Sync {
    /// Look up a parameter by name. Returns None if it is not set.
    fn init_param(&self, name: &str) -> Option<String>;
}

impl InitParams for HashMap<String, String> {
    fn init_param(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

impl InitParams for HashMap<&'static str, &'static str> {
    fn init_param(&self, name: &str) -> Option<String> {
        self.get(name).map(|v| (*v).to_string())
    }
}

/// Parameter source with nothing set
#[derive(Debug, Clone, Copy, Default)]
pub struct NoParams;

impl InitParams for NoParams {
    fn init_param(&self, _name: &str) -> Option<String> {
        None
    }
}

/// Reads parameters from process environment variables
///
/// The variable name is `{PREFIX}_{NAME}`, upper-cased, with `.` and `-`
/// replaced by `_`. Without a prefix it is just `{NAME}`.
#[derive(Debug, Clone, Default)]
pub struct EnvParams {
    prefix: Option<String>,
}

impl EnvParams {
    #[must_use]
    pub fn new() -> Self {
        Self { prefix: None }
    }

    #[must_use]
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: Some(prefix.into()),
        }
    }

    /// Get the environment variable name for a parameter
    #[must_use]
    pub fn var_name(&self, name: &str) -> String {
        let key = name.replace(['.', '-'], "_").to_uppercase();
        match &self.prefix {
            Some(prefix) => format!("{}_{}", prefix.to_uppercase(), key),
            None => key,
        }
    }
}

impl InitParams for EnvParams {
    fn init_param(&self, name: &str) -> Option<String> {
        std::env::var(self.var_name(name)).ok()
    }
}

/// Parse a boolean flag the way init parameters usually spell them
///
/// Accepts `true/false`, `yes/no`, `on/off` and `1/0`, case-insensitively.
#[must_use]
pub fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}
