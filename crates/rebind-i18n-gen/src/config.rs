//! Generation pass configuration, loadable from TOML or JSON.
//!
//! ```toml
//! # rebind.toml
//! locales = ["az_Cyrl_AZ", "az", "en"]
//! workers = 4
//! selector_fallback = "same_locale_default"
//! fail_on_missing = true
//! ```
//!
//! ```rust,ignore
//! let config = GenerationConfig::from_toml_file("rebind.toml")?;
//! ```
//!
//! Every field has a default, so a file only names what it changes.

use std::path::Path;

use rebind_i18n::{LocaleTag, LookupConfig, SelectorFallback};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Locales to bind every interface for.
    pub locales: Vec<String>,
    /// Worker threads; interfaces are distributed across them.
    pub workers: usize,
    pub selector_fallback: SelectorFallback,
    /// Fail an interface when a required key is missing everywhere. When
    /// off, the method is bound as absent and a warning is logged.
    pub fail_on_missing: bool,
    /// Emit one artifact per effective locale instead of one per request.
    pub reuse_equivalent_artifacts: bool,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            locales: vec!["default".into()],
            workers: 1,
            selector_fallback: SelectorFallback::default(),
            fail_on_missing: true,
            reuse_equivalent_artifacts: true,
        }
    }
}

impl GenerationConfig {
    /// Load from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(ConfigError::Toml)
    }

    /// Load from a TOML file on disk.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(s).map_err(ConfigError::Json)
    }

    /// Load from a JSON file on disk.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }

    /// Returns a list of validation errors. An empty list means the config
    /// is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.workers == 0 {
            errors.push("workers must be > 0".into());
        }
        if self.locales.is_empty() {
            errors.push("locales must not be empty".into());
        }

        let mut seen: Vec<LocaleTag> = Vec::new();
        for raw in &self.locales {
            match LocaleTag::parse(raw) {
                Ok(tag) if seen.contains(&tag) => {
                    errors.push(format!("locale '{raw}' is listed more than once"));
                }
                Ok(tag) => seen.push(tag),
                Err(err) => errors.push(format!("locales: {err}")),
            }
        }

        errors
    }

    /// Parsed locales, in configured order. Fails on the first malformed tag.
    pub fn parsed_locales(&self) -> rebind_i18n::Result<Vec<LocaleTag>> {
        self.locales.iter().map(|raw| LocaleTag::parse(raw)).collect()
    }

    #[must_use]
    pub fn lookup_config(&self) -> LookupConfig {
        LookupConfig::default().with_selector_fallback(self.selector_fallback)
    }
}
