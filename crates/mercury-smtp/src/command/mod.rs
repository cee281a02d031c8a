//! SMTP command model.
//!
//! A [`Command`] is the parser's output: a verb plus its ordered parameter
//! list. Commands carry no behavior; validation and execution live elsewhere.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// SMTP command verb (RFC 5321 section 4.1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CommandType {
    /// HELO - Simple greeting
    Helo,
    /// EHLO - Extended greeting
    Ehlo,
    /// MAIL - Start mail transaction
    Mail,
    /// RCPT - Add recipient
    Rcpt,
    /// DATA - Begin message data
    Data,
    /// RSET - Reset transaction
    Rset,
    /// VRFY - Verify address
    Vrfy,
    /// EXPN - Expand mailing list
    Expn,
    /// HELP - Request help
    Help,
    /// NOOP - No operation
    Noop,
    /// QUIT - Close connection
    Quit,
}

impl CommandType {
    /// Every command type, in protocol order.
    pub const ALL: [Self; 11] = [
        Self::Helo,
        Self::Ehlo,
        Self::Mail,
        Self::Rcpt,
        Self::Data,
        Self::Rset,
        Self::Vrfy,
        Self::Expn,
        Self::Help,
        Self::Noop,
        Self::Quit,
    ];

    /// Returns the command verb as sent on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Helo => "HELO",
            Self::Ehlo => "EHLO",
            Self::Mail => "MAIL",
            Self::Rcpt => "RCPT",
            Self::Data => "DATA",
            Self::Rset => "RSET",
            Self::Vrfy => "VRFY",
            Self::Expn => "EXPN",
            Self::Help => "HELP",
            Self::Noop => "NOOP",
            Self::Quit => "QUIT",
        }
    }

    /// Returns a human-readable description of the command.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Helo => "Initial server greeting",
            Self::Ehlo => "Extended initial server greeting",
            Self::Mail => "Initiate mail transaction",
            Self::Rcpt => "Specify message recipient",
            Self::Data => "Begin message content transfer",
            Self::Rset => "Reset current mail transaction",
            Self::Vrfy => "Verify email address",
            Self::Expn => "Expand mailing list",
            Self::Help => "Request help information",
            Self::Noop => "No operation",
            Self::Quit => "Terminate SMTP session",
        }
    }
}

impl fmt::Display for CommandType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CommandType {
    type Err = Error;

    /// Parses a verb case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|ty| ty.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::UnknownCommand(s.to_string()))
    }
}

/// A parsed SMTP command.
///
/// Immutable after construction. The raw text is the verb and parameters
/// joined by single spaces, so `Command::new(CommandType::Mail, ["FROM:<a@b>"])`
/// renders as `MAIL FROM:<a@b>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Command {
    command_type: CommandType,
    parameters: Vec<String>,
    raw: String,
}

impl Command {
    /// Creates a command from its type and parameters.
    ///
    /// Empty parameters are allowed; the validator decides whether they are
    /// acceptable.
    pub fn new<I, S>(command_type: CommandType, parameters: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let parameters: Vec<String> = parameters.into_iter().map(Into::into).collect();
        let raw = std::iter::once(command_type.as_str())
            .chain(parameters.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ");

        Self {
            command_type,
            parameters,
            raw,
        }
    }

    /// Creates a command without parameters.
    #[must_use]
    pub fn bare(command_type: CommandType) -> Self {
        Self::new(command_type, std::iter::empty::<String>())
    }

    /// Returns the command type.
    #[must_use]
    pub const fn command_type(&self) -> CommandType {
        self.command_type
    }

    /// Returns the parameters.
    #[must_use]
    pub fn parameters(&self) -> &[String] {
        &self.parameters
    }

    /// Returns the parameter at `index`, if present.
    #[must_use]
    pub fn parameter(&self, index: usize) -> Option<&str> {
        self.parameters.get(index).map(String::as_str)
    }

    /// Returns the number of parameters.
    #[must_use]
    pub fn parameter_count(&self) -> usize {
        self.parameters.len()
    }

    /// Returns the command line without the trailing CRLF.
    #[must_use]
    pub fn raw_text(&self) -> &str {
        &self.raw
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::redundant_clone, clippy::manual_string_new, clippy::needless_collect, clippy::unreadable_literal, clippy::used_underscore_items, clippy::similar_names)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_text_joins_parameters() {
        let cmd = Command::new(CommandType::Mail, ["FROM:<sender@example.com>"]);
        assert_eq!(cmd.raw_text(), "MAIL FROM:<sender@example.com>");
        assert_eq!(cmd.to_string(), "MAIL FROM:<sender@example.com>");
    }

    #[test]
    fn test_bare_command() {
        let cmd = Command::bare(CommandType::Data);
        assert_eq!(cmd.raw_text(), "DATA");
        assert!(cmd.parameters().is_empty());
        assert_eq!(cmd.parameter_count(), 0);
    }

    #[test]
    fn test_empty_parameter_is_kept() {
        let cmd = Command::new(CommandType::Helo, [""]);
        assert_eq!(cmd.parameter_count(), 1);
        assert_eq!(cmd.parameter(0), Some(""));
        assert_eq!(cmd.raw_text(), "HELO ");
    }

    #[test]
    fn test_multiple_parameters() {
        let cmd = Command::new(CommandType::Helo, ["example.com", "extra"]);
        assert_eq!(cmd.raw_text(), "HELO example.com extra");
        assert_eq!(cmd.parameter(1), Some("extra"));
        assert_eq!(cmd.parameter(2), None);
    }

    #[test]
    fn test_parameters_are_a_snapshot() {
        let cmd = Command::new(CommandType::Helo, ["example.com"]);
        let mut copy = cmd.parameters().to_vec();
        copy[0] = "evil.example".to_string();
        assert_eq!(cmd.parameter(0), Some("example.com"));
    }

    #[test]
    fn test_command_type_from_str() {
        assert_eq!("HELO".parse::<CommandType>().unwrap(), CommandType::Helo);
        assert_eq!("ehlo".parse::<CommandType>().unwrap(), CommandType::Ehlo);
        assert_eq!("RcPt".parse::<CommandType>().unwrap(), CommandType::Rcpt);
        assert!("STARTTLS".parse::<CommandType>().is_err());
        assert!("".parse::<CommandType>().is_err());
    }

    #[test]
    fn test_command_type_metadata() {
        assert_eq!(CommandType::Quit.as_str(), "QUIT");
        assert_eq!(CommandType::Quit.description(), "Terminate SMTP session");
        assert_eq!(CommandType::Expn.description(), "Expand mailing list");
        assert_eq!(CommandType::ALL.len(), 11);
        for ty in CommandType::ALL {
            assert_eq!(ty.to_string().parse::<CommandType>().unwrap(), ty);
        }
    }
}
