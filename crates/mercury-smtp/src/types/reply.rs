//! Server replies for rejected and accepted commands.

use std::fmt;

/// Reply the server writes back for one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    /// Three-digit reply code.
    pub code: ReplyCode,
    /// Text lines; several lines make a multi-line reply.
    pub message: Vec<String>,
}

impl Reply {
    /// Creates a reply from a code and its text lines.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)] // Vec is not const-compatible
    pub fn new(code: ReplyCode, message: Vec<String>) -> Self {
        Self { code, message }
    }

    /// Creates a one-line reply.
    #[must_use]
    pub fn single(code: ReplyCode, text: impl Into<String>) -> Self {
        Self::new(code, vec![text.into()])
    }

    /// Creates a one-line reply with the code's standard text.
    #[must_use]
    pub fn standard(code: ReplyCode) -> Self {
        Self::single(code, code.standard_text())
    }

    /// Returns the reply class.
    #[must_use]
    pub const fn class(&self) -> ReplyClass {
        self.code.class()
    }

    /// Renders the reply in wire format.
    ///
    /// Every line but the last carries `-` after the code:
    /// `501-First\r\n501 Last\r\n`. A reply with no text is the bare code.
    #[must_use]
    pub fn to_wire(&self) -> String {
        let Some((last, init)) = self.message.split_last() else {
            return format!("{}\r\n", self.code);
        };

        let mut out = String::new();
        for line in init {
            out.push_str(&format!("{}-{line}\r\n", self.code));
        }
        out.push_str(&format!("{} {last}\r\n", self.code));
        out
    }
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.code, self.message.join(" "))
    }
}

/// First digit of a reply code (RFC 5321 section 4.2.1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReplyClass {
    /// 2yz: the command was accepted.
    PositiveCompletion,
    /// 3yz: accepted, more input expected (DATA).
    PositiveIntermediate,
    /// 4yz: rejected for now; the client may retry.
    TransientNegative,
    /// 5yz: rejected; retrying the same command will fail again.
    PermanentNegative,
}

/// Three-digit SMTP reply code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ReplyCode(u16);

impl ReplyCode {
    /// 220 Service ready
    pub const SERVICE_READY: Self = Self(220);
    /// 221 Service closing transmission channel
    pub const CLOSING: Self = Self(221);
    /// 250 Requested mail action okay, completed
    pub const OK: Self = Self(250);
    /// 354 Start mail input
    pub const START_DATA: Self = Self(354);
    /// 451 Local error in processing
    pub const LOCAL_ERROR: Self = Self(451);
    /// 452 Insufficient system storage (also: too many recipients)
    pub const INSUFFICIENT_STORAGE: Self = Self(452);
    /// 500 Syntax error, command unrecognized
    pub const SYNTAX_ERROR: Self = Self(500);
    /// 501 Syntax error in parameters or arguments
    pub const PARAMETER_ERROR: Self = Self(501);
    /// 502 Command not implemented
    pub const NOT_IMPLEMENTED: Self = Self(502);
    /// 503 Bad sequence of commands
    pub const BAD_SEQUENCE: Self = Self(503);

    /// Creates a reply code, or `None` outside `200..=599`.
    #[must_use]
    pub const fn new(code: u16) -> Option<Self> {
        if code >= 200 && code <= 599 {
            Some(Self(code))
        } else {
            None
        }
    }

    /// Returns the numeric code.
    #[must_use]
    pub const fn as_u16(self) -> u16 {
        self.0
    }

    /// Returns the reply class.
    #[must_use]
    pub const fn class(self) -> ReplyClass {
        match self.0 / 100 {
            2 => ReplyClass::PositiveCompletion,
            3 => ReplyClass::PositiveIntermediate,
            4 => ReplyClass::TransientNegative,
            _ => ReplyClass::PermanentNegative,
        }
    }

    /// Returns true for 4yz and 5yz codes.
    #[must_use]
    pub const fn is_negative(self) -> bool {
        matches!(
            self.class(),
            ReplyClass::TransientNegative | ReplyClass::PermanentNegative
        )
    }

    /// Returns the usual text for this code.
    #[must_use]
    pub const fn standard_text(self) -> &'static str {
        match self.0 {
            220 => "Service ready",
            221 => "Service closing transmission channel",
            250 => "OK",
            354 => "Start mail input; end with <CRLF>.<CRLF>",
            451 => "Requested action aborted: local error in processing",
            452 => "Requested action not taken: insufficient system storage",
            500 => "Syntax error, command unrecognized",
            501 => "Syntax error in parameters or arguments",
            502 => "Command not implemented",
            503 => "Bad sequence of commands",
            _ => "",
        }
    }
}

impl fmt::Display for ReplyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
