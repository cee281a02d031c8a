//! RFC 5321 grammar fragments used by the parameter steps.
//!
//! Fragments are unanchored; the `*_pattern` functions anchor them for use
//! with [`regex::Regex`].

/// Dot-atom local part (RFC 5321 `Dot-string`).
pub const LOCAL_PART: &str = r"[A-Za-z0-9!#$%&'*+\-/=?^_`{|}~]+(?:\.[A-Za-z0-9!#$%&'*+\-/=?^_`{|}~]+)*";

/// Domain name: dot-separated labels of letters, digits and inner hyphens.
pub const DOMAIN_NAME: &str =
    r"[A-Za-z0-9](?:[A-Za-z0-9\-]*[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9\-]*[A-Za-z0-9])?)*";

/// Address literal: `[192.0.2.1]` or `[IPv6:2001:db8::1]`.
pub const ADDRESS_LITERAL: &str =
    r"\[(?:(?:[0-9]{1,3}\.){3}[0-9]{1,3}|IPv6:[0-9A-Fa-f:.]+)\]";

/// Human-readable description of the MAIL parameter format.
pub const MAIL_FROM_DESCRIPTION: &str = "FROM:<email@example.com> format";

/// Human-readable description of the RCPT parameter format.
pub const RCPT_TO_DESCRIPTION: &str = "TO:<email@example.com> format";

/// Characters accepted by the allowed-characters step.
pub const ALLOWED_COMMAND_CHARS: &str = concat!(
    "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789",
    " <>.@:=-",
    "!#$%&'*+/?^_`{|}~[]",
);

/// CRLF, counted against the line limit.
pub const LINE_ENDING: &str = "\r\n";

/// Maximum command line length including CRLF (RFC 5321 section 4.5.3.1.4).
pub const MAX_COMMAND_LENGTH: usize = 512;

fn domain() -> String {
    format!("(?:{DOMAIN_NAME}|{ADDRESS_LITERAL})")
}

fn mailbox() -> String {
    format!("{LOCAL_PART}@{}", domain())
}

/// Anchored pattern for a HELO/EHLO domain argument.
#[must_use]
pub fn domain_pattern() -> String {
    format!("^{}$", domain())
}

/// Anchored pattern for a bracketed address, e.g. `<user@example.com>`.
#[must_use]
pub fn email_pattern() -> String {
    format!("^<{}>$", mailbox())
}

/// Anchored pattern for the MAIL parameter.
///
/// With `allow_null` the null reverse-path `FROM:<>` is accepted.
#[must_use]
pub fn mail_from_pattern(allow_null: bool) -> String {
    let quantifier = if allow_null { "?" } else { "" };
    format!("^(?i:FROM):<(?:{}){quantifier}>$", mailbox())
}

/// Anchored pattern for the RCPT parameter.
///
/// The unqualified `postmaster` recipient is always accepted.
#[must_use]
pub fn rcpt_to_pattern() -> String {
    format!("^(?i:TO):<(?:{}|(?i:postmaster))>$", mailbox())
}
