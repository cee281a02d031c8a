//! Error types for the validation core.
//!
//! These errors describe programming and configuration mistakes. Bad input
//! from an SMTP client is never an [`Error`]; it is reported through a
//! failed [`ValidationResult`](crate::validation::ValidationResult).

/// Result type alias for construction and parsing operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building validators or parsing command lines.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An argument violated a construction contract.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A validation step was given a malformed regular expression.
    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// Validator configuration was rejected.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The command line was blank.
    #[error("Empty command line")]
    EmptyCommand,

    /// The command verb is not an SMTP command.
    #[error("Unrecognized command: {0}")]
    UnknownCommand(String),

    /// The command line could not be tokenized.
    #[error("Syntax error: {0}")]
    Syntax(String),
}

impl Error {
    /// Creates an invalid argument error.
    #[must_use]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Returns true if this error came from parsing a client command line.
    #[must_use]
    pub const fn is_parse_error(&self) -> bool {
        matches!(
            self,
            Self::EmptyCommand | Self::UnknownCommand(_) | Self::Syntax(_)
        )
    }
}
