//! SMTP command line parser.

use crate::command::{Command, CommandType};
use crate::error::{Error, Result};

/// Parses a client command line into a [`Command`].
///
/// The line may carry its CRLF (or bare LF) terminator. The verb is matched
/// case-insensitively and the remaining whitespace-separated tokens become
/// parameters:
/// - `MAIL FROM:<user@example.com>` → `MAIL` with one parameter
/// - `DATA` → `DATA` with no parameters
///
/// No sequencing or parameter syntax is checked here.
///
/// # Errors
///
/// Returns an error if the line is blank, contains a NUL byte, or does not
/// start with a known verb.
pub fn parse_command(line: &str) -> Result<Command> {
    let line = strip_line_ending(line);

    if line.contains('\0') {
        return Err(Error::Syntax("NUL byte in command line".into()));
    }

    let mut tokens = line.split_ascii_whitespace();
    let verb = tokens.next().ok_or(Error::EmptyCommand)?;
    let command_type: CommandType = verb.parse()?;

    Ok(Command::new(command_type, tokens))
}

/// Removes a single trailing CRLF or LF.
fn strip_line_ending(line: &str) -> &str {
    line.strip_suffix("\r\n")
        .or_else(|| line.strip_suffix('\n'))
        .unwrap_or(line)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::redundant_clone, clippy::manual_string_new, clippy::needless_collect, clippy::unreadable_literal, clippy::used_underscore_items, clippy::similar_names)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_helo() {
        let cmd = parse_command("HELO client.example.com\r\n").unwrap();
        assert_eq!(cmd.command_type(), CommandType::Helo);
        assert_eq!(cmd.parameters(), ["client.example.com"]);
    }

    #[test]
    fn test_parse_lowercase_verb() {
        let cmd = parse_command("mail FROM:<sender@example.com>").unwrap();
        assert_eq!(cmd.command_type(), CommandType::Mail);
        assert_eq!(cmd.raw_text(), "MAIL FROM:<sender@example.com>");
    }

    #[test]
    fn test_parse_bare_lf() {
        let cmd = parse_command("QUIT\n").unwrap();
        assert_eq!(cmd.command_type(), CommandType::Quit);
        assert!(cmd.parameters().is_empty());
    }

    #[test]
    fn test_parse_collapses_whitespace() {
        let cmd = parse_command("RCPT   TO:<a@example.com>\t extra").unwrap();
        assert_eq!(cmd.parameters(), ["TO:<a@example.com>", "extra"]);
    }

    #[test]
    fn test_parse_space_after_colon_splits() {
        let cmd = parse_command("MAIL FROM: <sender@example.com>").unwrap();
        assert_eq!(cmd.parameter_count(), 2);
    }

    #[test]
    fn test_parse_error_empty() {
        assert!(matches!(parse_command(""), Err(Error::EmptyCommand)));
        assert!(matches!(parse_command("   \r\n"), Err(Error::EmptyCommand)));
    }

    #[test]
    fn test_parse_error_unknown_verb() {
        assert!(matches!(
            parse_command("STARTTLS"),
            Err(Error::UnknownCommand(verb)) if verb == "STARTTLS"
        ));
    }

    #[test]
    fn test_parse_error_nul() {
        assert!(matches!(parse_command("HELO a\0b"), Err(Error::Syntax(_))));
    }
}
