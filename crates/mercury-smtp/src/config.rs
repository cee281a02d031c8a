//! Validator configuration.

use crate::error::{Error, Result};
use crate::validation::grammar::{LINE_ENDING, MAX_COMMAND_LENGTH};

/// Smallest recipient limit RFC 5321 section 4.5.3.1.8 allows a server to
/// enforce. Suitable for [`ValidatorConfig::max_recipients`].
pub const DEFAULT_MAX_RECIPIENTS: usize = 100;

/// Settings used to build the per-command validation chains.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ValidatorConfig {
    /// Maximum command line length in octets, CRLF included.
    pub max_line_length: usize,
    /// Recipients required before DATA.
    pub min_recipients: usize,
    /// Recipients allowed per transaction (`None`, the default, for no limit).
    pub max_recipients: Option<usize>,
    /// Accept the null reverse-path `MAIL FROM:<>`.
    pub allow_null_sender: bool,
    /// Run line length and character checks on every command.
    pub strict_line_checks: bool,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            max_line_length: MAX_COMMAND_LENGTH,
            min_recipients: 1,
            max_recipients: None,
            allow_null_sender: true,
            strict_line_checks: false,
        }
    }
}

impl ValidatorConfig {
    /// Creates a configuration builder.
    #[must_use]
    pub fn builder() -> ValidatorConfigBuilder {
        ValidatorConfigBuilder::new()
    }

    /// Checks the settings for consistency.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] describing the first bad setting.
    pub fn validate(&self) -> Result<()> {
        if self.max_line_length <= LINE_ENDING.len() {
            return Err(Error::InvalidConfig(format!(
                "max_line_length must exceed {}, got {}",
                LINE_ENDING.len(),
                self.max_line_length
            )));
        }
        if self.min_recipients == 0 {
            return Err(Error::InvalidConfig(
                "min_recipients must be at least 1".into(),
            ));
        }
        if let Some(max) = self.max_recipients
            && max < self.min_recipients
        {
            return Err(Error::InvalidConfig(format!(
                "max_recipients ({max}) is below min_recipients ({})",
                self.min_recipients
            )));
        }
        Ok(())
    }
}

/// Builder for [`ValidatorConfig`].
#[derive(Debug, Clone, Default)]
pub struct ValidatorConfigBuilder {
    config: ValidatorConfig,
}

impl ValidatorConfigBuilder {
    /// Creates a builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum line length (CRLF included).
    #[must_use]
    pub const fn max_line_length(mut self, length: usize) -> Self {
        self.config.max_line_length = length;
        self
    }

    /// Sets the recipients required before DATA.
    #[must_use]
    pub const fn min_recipients(mut self, count: usize) -> Self {
        self.config.min_recipients = count;
        self
    }

    /// Sets the recipient limit per transaction.
    #[must_use]
    pub const fn max_recipients(mut self, limit: Option<usize>) -> Self {
        self.config.max_recipients = limit;
        self
    }

    /// Sets whether `MAIL FROM:<>` is accepted.
    #[must_use]
    pub const fn allow_null_sender(mut self, allow: bool) -> Self {
        self.config.allow_null_sender = allow;
        self
    }

    /// Sets whether every chain checks line length and characters.
    #[must_use]
    pub const fn strict_line_checks(mut self, strict: bool) -> Self {
        self.config.strict_line_checks = strict;
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if the settings are inconsistent.
    pub fn build(self) -> Result<ValidatorConfig> {
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
        let config = ValidatorConfig::default();
        assert_eq!(config.max_line_length, 512);
        assert_eq!(config.min_recipients, 1);
        assert_eq!(config.max_recipients, None);
        assert!(config.allow_null_sender);
        assert!(!config.strict_line_checks);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = ValidatorConfig::builder()
            .max_line_length(1000)
            .min_recipients(2)
            .max_recipients(Some(DEFAULT_MAX_RECIPIENTS))
            .allow_null_sender(false)
            .strict_line_checks(true)
            .build()
            .unwrap();

        assert_eq!(config.max_line_length, 1000);
        assert_eq!(config.min_recipients, 2);
        assert_eq!(config.max_recipients, Some(100));
        assert!(!config.allow_null_sender);
        assert!(config.strict_line_checks);
    }

    #[test]
    fn test_builder_rejects_bad_values() {
        assert!(matches!(
            ValidatorConfig::builder().max_line_length(2).build(),
            Err(Error::InvalidConfig(_))
        ));
        assert!(ValidatorConfig::builder().min_recipients(0).build().is_err());
        assert!(
            ValidatorConfig::builder()
                .min_recipients(5)
                .max_recipients(Some(3))
                .build()
                .is_err()
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_partial() {
        let config: ValidatorConfig =
            serde_json::from_str(r#"{"max_recipients": 50, "strict_line_checks": true}"#)
                .unwrap();
        assert_eq!(config.max_recipients, Some(50));
        assert!(config.strict_line_checks);
        assert_eq!(config.max_line_length, 512);
    }
}
