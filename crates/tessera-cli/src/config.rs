//! CLI configuration, read from RON.
//!
//! ```ron
//! (
//!     export: (
//!         placeholder: "[TO BE FILLED]",
//!         include_header: true,
//!         page_lines: Some(60),
//!     ),
//!     generation: (
//!         request_id: "FA301625Q0050",
//!         counterparty_id: "gunn-construction-llc",
//!     ),
//! )
//! ```
//!
//! Every field is optional; a missing file means all defaults.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use tessera_doc::export::{ExportOptions, PLACEHOLDER};

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct TesseraConfig {
    pub export: ExportConfig,
    pub generation: GenerationConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub placeholder: String,
    pub include_header: bool,
    pub page_lines: Option<usize>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            placeholder: PLACEHOLDER.to_string(),
            include_header: true,
            page_lines: None,
        }
    }
}

impl ExportConfig {
    pub fn options(&self) -> ExportOptions {
        ExportOptions {
            placeholder: self.placeholder.clone(),
            include_header: self.include_header,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub request_id: String,
    pub counterparty_id: String,
}

/// `$XDG_CONFIG_HOME/tessera/config.ron`, if a config dir exists.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("tessera").join("config.ron"))
}

impl TesseraConfig {
    pub fn from_ron(content: &str) -> Result<Self> {
        ron::from_str(content).context("invalid RON config")
    }

    /// Load from `path`, or from the default location when `path` is None.
    ///
    /// An explicit path must exist; the default location may be absent.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (path, explicit) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => match default_config_path() {
                Some(p) => (p, false),
                None => return Ok(Self::default()),
            },
        };

        if !explicit && !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config = Self::from_ron(&content)
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }
}
