// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Analyses configuration

use crate::{AnalysisError, Result};
use serde::{Deserialize, Serialize};

/// Default required prefix for property set and property names
pub const DEFAULT_CONFORMANCE_PREFIX: &str = "Pset_";

/// Default size of the density ranking
pub const DEFAULT_TOP_K: usize = 10;

/// Default quantity used as the object volume
pub const DEFAULT_VOLUME_QUANTITY: &str = "NetVolume";

/// Physical encoding of the report
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RenderMode {
    /// Nested JSON tree, for machine parsing
    #[default]
    Structured,
    /// Indented human-readable lines
    FlatText,
}

impl RenderMode {
    /// Content type label handed to the extended-data store
    pub fn content_type(&self) -> &'static str {
        match self {
            RenderMode::Structured => "application/json",
            RenderMode::FlatText => "text/plain",
        }
    }

    /// File extension for the stored report
    pub fn extension(&self) -> &'static str {
        match self {
            RenderMode::Structured => "json",
            RenderMode::FlatText => "txt",
        }
    }
}

/// Options for one analyses pass
///
/// Passed explicitly to every call; nothing is kept in global state.
///
/// # Example
///
/// ```ignore
/// use ifc_analyses::{AnalysesConfig, RenderMode};
///
/// let config = AnalysesConfig::flat_text()
///     .with_conformance_prefix("NL_")
///     .with_top_k(5);
/// assert_eq!(config.render_mode, RenderMode::FlatText);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysesConfig {
    /// Report encoding
    pub render_mode: RenderMode,
    /// Required name prefix for conforming property sets and properties
    pub conformance_prefix: String,
    /// Number of objects in the density ranking
    pub top_k: usize,
    /// Name of the quantity read as object volume
    pub volume_quantity: String,
}

impl Default for AnalysesConfig {
    fn default() -> Self {
        Self {
            render_mode: RenderMode::default(),
            conformance_prefix: DEFAULT_CONFORMANCE_PREFIX.to_string(),
            top_k: DEFAULT_TOP_K,
            volume_quantity: DEFAULT_VOLUME_QUANTITY.to_string(),
        }
    }
}

impl AnalysesConfig {
    /// Default options with structured output
    pub fn structured() -> Self {
        Self::default()
    }

    /// Default options with flat-text output
    pub fn flat_text() -> Self {
        Self::default().with_render_mode(RenderMode::FlatText)
    }

    /// Set the render mode
    pub fn with_render_mode(mut self, mode: RenderMode) -> Self {
        self.render_mode = mode;
        self
    }

    /// Set the conformance prefix
    pub fn with_conformance_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.conformance_prefix = prefix.into();
        self
    }

    /// Set the ranking size
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Set the volume quantity name
    pub fn with_volume_quantity(mut self, name: impl Into<String>) -> Self {
        self.volume_quantity = name.into();
        self
    }

    /// Read options from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| AnalysisError::config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the options can drive an analyses pass
    ///
    /// An empty conformance prefix is allowed (everything conforms) and so is
    /// a ranking size of zero.
    pub fn validate(&self) -> Result<()> {
        if self.volume_quantity.trim().is_empty() {
            return Err(AnalysisError::config("volume quantity name is empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AnalysesConfig::default();
        assert_eq!(config.render_mode, RenderMode::Structured);
        assert_eq!(config.conformance_prefix, "Pset_");
        assert_eq!(config.top_k, 10);
        assert_eq!(config.volume_quantity, "NetVolume");
    }

    #[test]
    fn test_builder() {
        let config = AnalysesConfig::flat_text()
            .with_conformance_prefix("NL_")
            .with_top_k(3)
            .with_volume_quantity("GrossVolume");
        assert_eq!(config.render_mode, RenderMode::FlatText);
        assert_eq!(config.conformance_prefix, "NL_");
        assert_eq!(config.top_k, 3);
        assert_eq!(config.volume_quantity, "GrossVolume");
    }

    #[test]
    fn test_from_json_partial() {
        let config =
            AnalysesConfig::from_json(r#"{"render_mode": "flat-text", "top_k": 5}"#).unwrap();
        assert_eq!(config.render_mode, RenderMode::FlatText);
        assert_eq!(config.top_k, 5);
        assert_eq!(config.conformance_prefix, "Pset_");
    }

    #[test]
    fn test_from_json_rejects_unknown_fields() {
        let err = AnalysesConfig::from_json(r#"{"output": "json"}"#).unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidConfig(_)));
    }

    #[test]
    fn test_empty_volume_quantity_is_rejected() {
        assert!(AnalysesConfig::default().validate().is_ok());
        assert!(AnalysesConfig::default().with_conformance_prefix("").validate().is_ok());

        let err = AnalysesConfig::from_json(r#"{"volume_quantity": " "}"#).unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidConfig(_)));
    }

    #[test]
    fn test_content_types() {
        assert_eq!(RenderMode::Structured.content_type(), "application/json");
        assert_eq!(RenderMode::FlatText.content_type(), "text/plain");
    }
}
