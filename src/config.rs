//! Pipeline configuration.
//!
//! Loaded from TOML by the caller before a run and never mutated by it:
//!
//! ```toml
//! theme = "dark"
//!
//! [diagrams]
//! aliases = ["mermaid", "plantuml"]
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::error::{ConfigError, Result};

/// Theme used when the configuration does not name one.
pub const DEFAULT_THEME: &str = "dark";

/// Configuration for a whole pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Theme class stamped on `<html>` and `<body>`
    pub theme: Option<String>,
    /// Diagram background wrapping; the pass is skipped when absent
    pub diagrams: Option<DiagramOptions>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            theme: Some(DEFAULT_THEME.to_string()),
            diagrams: None,
        }
    }
}

impl PipelineConfig {
    /// Parse configuration from TOML text.
    pub fn from_toml_str(input: &str) -> Result<Self> {
        let config: Self = toml::from_str(input).map_err(|e| ConfigError::Toml(e.to_string()))?;
        Ok(config)
    }

    /// Read and parse a TOML configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Set the theme.
    #[must_use]
    pub fn with_theme(mut self, theme: impl Into<String>) -> Self {
        self.theme = Some(theme.into());
        self
    }

    /// Enable diagram background wrapping for these alt texts.
    #[must_use]
    pub fn with_diagram_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.diagrams = Some(DiagramOptions {
            aliases: Some(aliases.into_iter().map(Into::into).collect()),
        });
        self
    }

    /// Options for the theme class pass.
    pub fn theme_options(&self) -> ThemeOptions {
        ThemeOptions {
            theme: self.theme.clone(),
        }
    }
}

/// Options for the diagram background pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DiagramOptions {
    /// Image alt texts that identify diagrams
    pub aliases: Option<Vec<String>>,
}

/// Options for the theme class pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ThemeOptions {
    pub theme: Option<String>,
}
