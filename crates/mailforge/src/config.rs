//! Composer configuration types.

use mailforge_mime::text::DEFAULT_WRAP_COLUMN;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Settings applied to a [`MessageBuilder`](crate::MessageBuilder) when it
/// is created and every time it is reset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComposerConfig {
    /// Column at which plain-text bodies are soft-wrapped.
    pub wrap_column: usize,
    /// Extra arguments handed to the transport unchanged (e.g. `-fsender@example.com`).
    pub extra_params: Option<String>,
    /// Emit a closing `--boundary--` delimiter after the last multipart part.
    pub close_multipart: bool,
}

impl Default for ComposerConfig {
    fn default() -> Self {
        Self {
            wrap_column: DEFAULT_WRAP_COLUMN,
            extra_params: None,
            close_multipart: false,
        }
    }
}

impl ComposerConfig {
    /// Creates a configuration builder.
    #[must_use]
    pub fn builder() -> ComposerConfigBuilder {
        ComposerConfigBuilder::default()
    }

    /// Parses and validates a configuration from JSON.
    ///
    /// Missing fields take their default values.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or the configuration is invalid.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if `wrap_column` is zero.
    pub fn validate(&self) -> Result<()> {
        if self.wrap_column == 0 {
            return Err(Error::InvalidConfig(
                "wrap_column must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Builder for composer configuration.
#[derive(Debug, Clone, Default)]
pub struct ComposerConfigBuilder {
    config: ComposerConfig,
}

impl ComposerConfigBuilder {
    /// Sets the soft-wrap column.
    #[must_use]
    pub const fn wrap_column(mut self, column: usize) -> Self {
        self.config.wrap_column = column;
        self
    }

    /// Sets the extra transport parameters.
    #[must_use]
    pub fn extra_params(mut self, params: impl Into<String>) -> Self {
        self.config.extra_params = Some(params.into());
        self
    }

    /// Enables or disables the closing multipart delimiter.
    #[must_use]
    pub const fn close_multipart(mut self, close: bool) -> Self {
        self.config.close_multipart = close;
        self
    }

    /// Builds and validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn build(self) -> Result<ComposerConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::redundant_clone,
    clippy::manual_string_new,
    clippy::needless_collect,
    clippy::unreadable_literal,
    clippy::used_underscore_items,
    clippy::similar_names
)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ComposerConfig::default();
        assert_eq!(config.wrap_column, 78);
        assert!(config.extra_params.is_none());
        assert!(!config.close_multipart);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = ComposerConfig::builder()
            .wrap_column(60)
            .extra_params("-fbounce@example.com")
            .close_multipart(true)
            .build()
            .unwrap();

        assert_eq!(config.wrap_column, 60);
        assert_eq!(config.extra_params.as_deref(), Some("-fbounce@example.com"));
        assert!(config.close_multipart);
    }

    #[test]
    fn test_builder_rejects_zero_wrap() {
        let err = ComposerConfig::builder().wrap_column(0).build().unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_from_json_partial() {
        let config = ComposerConfig::from_json(r#"{ "wrap_column": 40 }"#).unwrap();
        assert_eq!(config.wrap_column, 40);
        assert!(!config.close_multipart);
    }

    #[test]
    fn test_from_json_invalid() {
        assert!(matches!(
            ComposerConfig::from_json(r#"{ "wrap_column": 0 }"#),
            Err(Error::InvalidConfig(_))
        ));
        assert!(matches!(
            ComposerConfig::from_json("not json"),
            Err(Error::Json(_))
        ));
    }
}
