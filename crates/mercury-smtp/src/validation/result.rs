//! Validation outcomes.

use crate::command::CommandType;
use crate::error::{Error, Result};
use crate::session::SessionState;
use crate::types::{Reply, ReplyCode};

/// Why a command was rejected.
///
/// The `Display` text of each variant is the message placed in a
/// [`ValidationResult`]. Messages are written to be usable as the text of an
/// SMTP reply line.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    /// No command was supplied.
    #[error("Command cannot be null")]
    NullCommand,
    /// No session context was supplied.
    #[error("Session context cannot be null")]
    NullSession,
    /// No chain is registered for the command type.
    #[error("Unsupported command type: {0}")]
    UnsupportedCommand(CommandType),
    /// A chain received a command of another type.
    #[error("Invalid command type: expected {expected} but got {actual}")]
    WrongCommandType {
        /// Type the chain was built for.
        expected: CommandType,
        /// Type of the command received.
        actual: CommandType,
    },
    /// Command line is malformed.
    #[error("Invalid command syntax: {0}")]
    InvalidSyntax(String),
    /// Command is not allowed in the session's state.
    #[error("Command not valid in current state: {0}")]
    InvalidState(SessionState),
    /// Command arrived out of sequence.
    #[error("Command issued out of sequence")]
    SequenceError,
    /// A required parameter is absent or empty.
    #[error("Missing required parameter: {0}")]
    MissingParameter(String),
    /// A parameter does not match its expected format.
    #[error("Invalid parameter format: {0}")]
    InvalidParameterFormat(String),
    /// A parameter is not a valid bracketed address.
    #[error("Invalid email address format: {0}")]
    InvalidEmailAddress(String),
    /// A parameter is not a valid domain.
    #[error("Invalid domain format: {0}")]
    InvalidDomain(String),
    /// HELO/EHLO without a domain.
    #[error("HELO command requires a domain parameter")]
    MissingDomain,
    /// Command line exceeds the line limit (CRLF included).
    #[error("Command exceeds maximum length of {0} octets")]
    CommandTooLong(usize),
    /// More parameters than allowed.
    #[error("Too many parameters provided")]
    TooManyParameters,
    /// Fewer parameters than required.
    #[error("Too few parameters provided")]
    TooFewParameters,
    /// Characters outside the allowed set, each listed once.
    #[error("Command contains illegal characters: {0}")]
    IllegalCharacters(String),
    /// DATA without any recorded recipient.
    #[error("No recipients specified before DATA command")]
    NoRecipients,
    /// DATA with fewer recipients than required.
    #[error("At least {required} recipient(s) required, but only {found} found")]
    InsufficientRecipients {
        /// Minimum recipients.
        required: usize,
        /// Recipients recorded.
        found: usize,
    },
    /// RCPT past the recipient limit.
    #[error("Too many recipients (maximum {0})")]
    TooManyRecipients(usize),
    /// Free-form failure.
    #[error("{0}")]
    Other(String),
}

impl Rejection {
    /// Returns the category of this rejection.
    #[must_use]
    pub const fn kind(&self) -> FailureKind {
        match self {
            Self::NullCommand | Self::NullSession | Self::WrongCommandType { .. } => {
                FailureKind::Internal
            }
            Self::UnsupportedCommand(_) => FailureKind::NotImplemented,
            Self::InvalidSyntax(_)
            | Self::CommandTooLong(_)
            | Self::IllegalCharacters(_)
            | Self::Other(_) => FailureKind::Syntax,
            Self::MissingParameter(_)
            | Self::InvalidParameterFormat(_)
            | Self::InvalidEmailAddress(_)
            | Self::InvalidDomain(_)
            | Self::MissingDomain
            | Self::TooManyParameters
            | Self::TooFewParameters => FailureKind::Parameter,
            Self::InvalidState(_)
            | Self::SequenceError
            | Self::NoRecipients
            | Self::InsufficientRecipients { .. } => FailureKind::Sequence,
            Self::TooManyRecipients(_) => FailureKind::TooManyRecipients,
        }
    }
}

/// Failure category, used to pick a reply code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// Command line syntax (500).
    Syntax,
    /// Parameter count or syntax (501).
    Parameter,
    /// No validation chain for the command (502).
    NotImplemented,
    /// Command out of sequence (503).
    Sequence,
    /// Recipient limit reached (452).
    TooManyRecipients,
    /// Server-side programming error (451).
    Internal,
}

impl FailureKind {
    /// Returns the reply code a handler would normally send.
    #[must_use]
    pub const fn reply_code(self) -> ReplyCode {
        match self {
            Self::Syntax => ReplyCode::SYNTAX_ERROR,
            Self::Parameter => ReplyCode::PARAMETER_ERROR,
            Self::NotImplemented => ReplyCode::NOT_IMPLEMENTED,
            Self::Sequence => ReplyCode::BAD_SEQUENCE,
            Self::TooManyRecipients => ReplyCode::INSUFFICIENT_STORAGE,
            Self::Internal => ReplyCode::LOCAL_ERROR,
        }
    }
}

/// Outcome of validating one command.
///
/// A valid result has no errors; an invalid one has at least one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    errors: Vec<String>,
    kind: Option<FailureKind>,
}

impl ValidationResult {
    /// Creates a passing result.
    #[must_use]
    pub const fn success() -> Self {
        Self {
            errors: Vec::new(),
            kind: None,
        }
    }

    /// Creates a failing result with one message.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if the message is blank.
    pub fn failure(message: impl Into<String>) -> Result<Self> {
        let message = non_blank(message.into())?;
        Ok(Rejection::Other(message).into())
    }

    /// Creates a failing result with several messages, in order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if the list is empty or any message
    /// is blank.
    pub fn failures<I, S>(messages: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let errors = messages
            .into_iter()
            .map(|message| non_blank(message.into()))
            .collect::<Result<Vec<_>>>()?;

        if errors.is_empty() {
            return Err(Error::invalid_argument(
                "Error messages list cannot be empty",
            ));
        }

        Ok(Self {
            errors,
            kind: Some(FailureKind::Syntax),
        })
    }

    /// Creates a failing result from a catalogued rejection.
    #[must_use]
    pub fn rejected(rejection: &Rejection) -> Self {
        Self {
            errors: vec![rejection.to_string()],
            kind: Some(rejection.kind()),
        }
    }

    /// Command syntax failure.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `details` is blank.
    pub fn invalid_syntax(details: &str) -> Result<Self> {
        Ok(Rejection::InvalidSyntax(non_blank(details.into())?).into())
    }

    /// Command not allowed in `state`.
    #[must_use]
    pub fn invalid_state(state: SessionState) -> Self {
        Rejection::InvalidState(state).into()
    }

    /// Required parameter missing.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `name` is blank.
    pub fn missing_parameter(name: &str) -> Result<Self> {
        Ok(Rejection::MissingParameter(non_blank(name.into())?).into())
    }

    /// Parameter format failure.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `details` is blank.
    pub fn invalid_parameter_format(details: &str) -> Result<Self> {
        Ok(Rejection::InvalidParameterFormat(non_blank(details.into())?).into())
    }

    /// Email address failure.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `address` is blank.
    pub fn invalid_email_address(address: &str) -> Result<Self> {
        Ok(Rejection::InvalidEmailAddress(non_blank(address.into())?).into())
    }

    /// Domain failure.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `domain` is blank.
    pub fn invalid_domain(domain: &str) -> Result<Self> {
        Ok(Rejection::InvalidDomain(non_blank(domain.into())?).into())
    }

    /// Line length failure.
    #[must_use]
    pub fn command_too_long(max_length: usize) -> Self {
        Rejection::CommandTooLong(max_length).into()
    }

    /// Too many parameters.
    #[must_use]
    pub fn too_many_parameters() -> Self {
        Rejection::TooManyParameters.into()
    }

    /// Too few parameters.
    #[must_use]
    pub fn too_few_parameters() -> Self {
        Rejection::TooFewParameters.into()
    }

    /// Illegal characters, listed once each.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `characters` is empty.
    pub fn illegal_characters(characters: &str) -> Result<Self> {
        // Whitespace is a legitimate offender here, so only emptiness is rejected.
        if characters.is_empty() {
            return Err(Error::invalid_argument("Illegal character list cannot be empty"));
        }
        Ok(Rejection::IllegalCharacters(characters.to_string()).into())
    }

    /// Out-of-sequence command.
    #[must_use]
    pub fn sequence_error() -> Self {
        Rejection::SequenceError.into()
    }

    /// Missing command at the dispatcher.
    #[must_use]
    pub fn null_command() -> Self {
        Rejection::NullCommand.into()
    }

    /// Missing session context at the dispatcher.
    #[must_use]
    pub fn null_session() -> Self {
        Rejection::NullSession.into()
    }

    /// Returns true if the command passed validation.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the error messages (empty when valid).
    #[must_use]
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Returns the failure category (`None` when valid).
    #[must_use]
    pub const fn kind(&self) -> Option<FailureKind> {
        self.kind
    }

    /// Returns the reply a handler would send for this failure.
    ///
    /// Returns `None` for a valid result; the success reply depends on the
    /// command's execution and is not known here.
    #[must_use]
    pub fn reply(&self) -> Option<Reply> {
        self.kind
            .map(|kind| Reply::new(kind.reply_code(), self.errors.clone()))
    }
}

impl From<Rejection> for ValidationResult {
    fn from(rejection: Rejection) -> Self {
        Self::rejected(&rejection)
    }
}

fn non_blank(message: String) -> Result<String> {
    if message.trim().is_empty() {
        return Err(Error::invalid_argument("Error message cannot be null or empty"));
    }
    Ok(message)
}
