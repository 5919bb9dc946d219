//! Configuration for Skein.
//!
//! Configuration is optional. When present it is a YAML file:
//!
//! ```yaml
//! language:
//!   default: python
//!   extensions:
//!     py3: python
//! output:
//!   pretty: true
//! ```
//!
//! Every field has a default, so an empty file (or no file) is valid.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::Language;

/// Name of the configuration file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "skein.yaml";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkeinConfig {
    /// Language selection
    pub language: LanguageConfig,
    /// Output formatting
    pub output: OutputConfig,
}

/// Language selection section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LanguageConfig {
    /// Language used when a file's extension is not recognized
    pub default: Language,
    /// Additional extension to language mappings (extension without the dot)
    pub extensions: BTreeMap<String, Language>,
}

/// Output formatting section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Pretty-print JSON output
    pub pretty: bool,
}

impl SkeinConfig {
    /// Load configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the file cannot be read or is not valid YAML.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML text. Blank text yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the text is not valid configuration YAML.
    pub fn from_yaml(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|e| Error::Config(e.to_string()))
    }

    /// Resolve configuration for the command line.
    ///
    /// An explicit path must exist. Without one, `skein.yaml` in `dir` is used
    /// if present, otherwise the defaults.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the chosen file cannot be loaded.
    pub fn discover(explicit: Option<&Path>, dir: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        let candidate: PathBuf = dir.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            tracing::debug!(path = %candidate.display(), "Loading configuration");
            Self::load(&candidate)
        } else {
            Ok(Self::default())
        }
    }

    /// Choose the language for a file path.
    ///
    /// Configured extension mappings win over the built-in table; unknown or
    /// missing extensions fall back to the configured default.
    #[must_use]
    pub fn language_for(&self, path: &Path) -> Language {
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase());

        ext.as_deref()
            .and_then(|ext| {
                self.language
                    .extensions
                    .get(ext)
                    .copied()
                    .or_else(|| Language::from_extension(ext))
            })
            .unwrap_or(self.language.default)
    }
}
