//! Per-connection session state.
//!
//! A [`SessionContext`] is created when a connection is accepted and dropped
//! when it closes. The validation core only reads it; the execution layer
//! changes the state after a command has been validated and executed.
//!
//! A context is owned by a single connection task. It carries no locking;
//! callers that share one across tasks must serialize access themselves.

use std::collections::HashMap;
use std::fmt;

/// Attribute key holding the accumulated recipient list.
pub const RECIPIENTS_KEY: &str = "RECIPIENTS";

/// Attribute key holding the reverse-path of the current transaction.
pub const SENDER_KEY: &str = "SENDER";

/// Protocol phase of an SMTP dialogue.
///
/// ```text
/// CONNECT ─ HELO/EHLO ─→ HELO ─ MAIL ─→ MAIL ─ RCPT ─→ RCPT ─ DATA ─→ DATA
///                         ↑                                           │
///                         └──────────── RSET / end of data ───────────┘
/// ```
///
/// `QUIT` is terminal; the connection closes after the transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SessionState {
    /// Connection accepted, greeting sent.
    #[default]
    Connect,
    /// Client identified with HELO/EHLO.
    Helo,
    /// MAIL FROM accepted.
    Mail,
    /// At least one RCPT TO accepted.
    Rcpt,
    /// Message content is being transferred.
    Data,
    /// QUIT accepted.
    Quit,
}

impl SessionState {
    /// Every session state.
    pub const ALL: [Self; 6] = [
        Self::Connect,
        Self::Helo,
        Self::Mail,
        Self::Rcpt,
        Self::Data,
        Self::Quit,
    ];

    /// Returns the state name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Connect => "CONNECT",
            Self::Helo => "HELO",
            Self::Mail => "MAIL",
            Self::Rcpt => "RCPT",
            Self::Data => "DATA",
            Self::Quit => "QUIT",
        }
    }

    /// Returns true once a mail transaction has started.
    #[must_use]
    pub const fn in_transaction(self) -> bool {
        matches!(self, Self::Mail | Self::Rcpt | Self::Data)
    }

    /// Returns true if the session is closing.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Quit)
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Value stored in the session attribute map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeValue {
    /// A single string (e.g. the sender).
    Text(String),
    /// An ordered collection (e.g. the recipients).
    List(Vec<String>),
}

impl AttributeValue {
    /// Returns the text value, if this is `Text`.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::List(_) => None,
        }
    }

    /// Returns the list value, if this is `List`.
    #[must_use]
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::List(items) => Some(items),
            Self::Text(_) => None,
        }
    }
}

/// Mutable state of one SMTP connection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionContext {
    state: SessionState,
    attributes: HashMap<String, AttributeValue>,
}

impl SessionContext {
    /// Creates a context in the `CONNECT` state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a context in the given state.
    #[must_use]
    pub fn with_state(state: SessionState) -> Self {
        Self {
            state,
            attributes: HashMap::new(),
        }
    }

    /// Returns the current protocol state.
    #[must_use]
    pub const fn state(&self) -> SessionState {
        self.state
    }

    /// Moves the session to a new protocol state.
    pub fn set_state(&mut self, state: SessionState) {
        tracing::trace!(from = %self.state, to = %state, "Session state change");
        self.state = state;
    }

    /// Returns an attribute, or `None` if unset.
    #[must_use]
    pub fn attribute(&self, key: &str) -> Option<&AttributeValue> {
        self.attributes.get(key)
    }

    /// Sets an attribute. `None` removes it.
    pub fn set_attribute(&mut self, key: impl Into<String>, value: Option<AttributeValue>) {
        let key = key.into();
        match value {
            Some(value) => {
                self.attributes.insert(key, value);
            }
            None => {
                self.attributes.remove(&key);
            }
        }
    }

    /// Returns the transaction's reverse-path, if recorded.
    #[must_use]
    pub fn sender(&self) -> Option<&str> {
        self.attribute(SENDER_KEY).and_then(AttributeValue::as_text)
    }

    /// Records the transaction's reverse-path.
    pub fn set_sender(&mut self, sender: impl Into<String>) {
        self.set_attribute(SENDER_KEY, Some(AttributeValue::Text(sender.into())));
    }

    /// Returns the recorded recipients (empty if none).
    #[must_use]
    pub fn recipients(&self) -> &[String] {
        self.attribute(RECIPIENTS_KEY)
            .and_then(AttributeValue::as_list)
            .unwrap_or_default()
    }

    /// Appends a recipient to the transaction.
    ///
    /// A recipient attribute of the wrong shape is replaced by a fresh list.
    pub fn add_recipient(&mut self, recipient: impl Into<String>) {
        let recipient = recipient.into();
        match self.attributes.get_mut(RECIPIENTS_KEY) {
            Some(AttributeValue::List(items)) => items.push(recipient),
            _ => {
                self.attributes.insert(
                    RECIPIENTS_KEY.to_string(),
                    AttributeValue::List(vec![recipient]),
                );
            }
        }
    }

    /// Clears the transaction (RSET, or a new MAIL).
    ///
    /// All attributes are dropped and the state returns to `HELO`.
    pub fn reset(&mut self) {
        tracing::debug!(state = %self.state, "Resetting session transaction");
        self.attributes.clear();
        self.state = SessionState::Helo;
    }
}
