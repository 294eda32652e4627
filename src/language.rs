//! Supported language codes and layered language resolution

use crate::config::{DEFAULT_LANGUAGE_PARAM, InitParams};
use crate::error::Error;
use crate::sync::RwLockExt;

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::RwLock;

/// Closed set of locale tags a service can answer in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum LanguageCode {
    DE,
    #[default]
    EN,
    ES,
    FR,
    IT,
    NL,
    PT,
    RU,
    JA,
    ZH,
}

impl LanguageCode {
    /// Every supported code
    pub const ALL: [LanguageCode; 10] = [
        LanguageCode::DE,
        LanguageCode::EN,
        LanguageCode::ES,
        LanguageCode::FR,
        LanguageCode::IT,
        LanguageCode::NL,
        LanguageCode::PT,
        LanguageCode::RU,
        LanguageCode::JA,
        LanguageCode::ZH,
    ];

    /// Upper-case tag of this code
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            LanguageCode::DE => "DE",
            LanguageCode::EN => "EN",
            LanguageCode::ES => "ES",
            LanguageCode::FR => "FR",
            LanguageCode::IT => "IT",
            LanguageCode::NL => "NL",
            LanguageCode::PT => "PT",
            LanguageCode::RU => "RU",
            LanguageCode::JA => "JA",
            LanguageCode::ZH => "ZH",
        }
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LanguageCode {
    type Err = Error;

    /// Parse a tag, ignoring surrounding whitespace and case
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim();
        LanguageCode::ALL
            .into_iter()
            .find(|code| code.as_str().eq_ignore_ascii_case(tag))
            .ok_or_else(|| Error::InvalidLanguageCode(s.to_string()))
    }
}

impl TryFrom<String> for LanguageCode {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<LanguageCode> for String {
    fn from(code: LanguageCode) -> Self {
        code.as_str().to_string()
    }
}

/// Resolves and caches the effective language of one store
///
/// Precedence, highest first:
/// 1. the explicit candidate passed to [`resolve`](Self::resolve)
/// 2. the init parameter named by `param_name`
/// 3. [`LanguageCode::default()`]
///
/// The first resolved value is sticky: later calls return it unchanged until
/// [`reset`](Self::reset) clears the cache.
#[derive(Debug)]
pub struct LanguageResolver {
    param_name: String,
    cached: RwLock<Option<LanguageCode>>,
}

impl LanguageResolver {
    pub fn new(param_name: impl Into<String>) -> Self {
        Self {
            param_name: param_name.into(),
            cached: RwLock::new(None),
        }
    }

    /// Name of the init parameter consulted for the service default
    pub fn param_name(&self) -> &str {
        &self.param_name
    }

    /// Currently cached code, without resolving
    pub fn current(&self) -> Option<LanguageCode> {
        *self.cached.read_recovered()
    }

    /// Forget the cached code so the next `resolve` derives it again
    pub fn reset(&self) {
        *self.cached.write_recovered() = None;
    }

    /// Resolve the effective language, caching the result
    pub fn resolve(&self, requested: Option<&str>, params: &dyn InitParams) -> LanguageCode {
        if let Some(code) = self.current() {
            debug!("set_language_code(): keeping cached language {code}");
            return code;
        }

        // No lock is held here: `params` is caller code and may read this cache
        let code = parse_candidate(requested, "requested")
            .or_else(|| {
                let configured = params.init_param(&self.param_name);
                parse_candidate(configured.as_deref(), &self.param_name)
            })
            .unwrap_or_default();

        let mut cached = self.cached.write_recovered();
        // Another caller may have resolved first; the earlier result wins
        if let Some(existing) = *cached {
            return existing;
        }

        debug!("set_language_code(): resolved language {code}");
        *cached = Some(code);
        code
    }
}

impl Default for LanguageResolver {
    fn default() -> Self {
        Self::new(DEFAULT_LANGUAGE_PARAM)
    }
}

/// Parse one precedence tier. Blank candidates count as absent.
fn parse_candidate(candidate: Option<&str>, source: &str) -> Option<LanguageCode> {
    let raw = candidate?;
    if raw.trim().is_empty() {
        return None;
    }
    match raw.parse() {
        Ok(code) => Some(code),
        Err(e) => {
            warn!("set_language_code(): {e} from {source}, falling back");
            None
        }
    }
}
