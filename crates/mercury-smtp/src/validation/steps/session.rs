//! Steps that consult the session context.

use crate::command::Command;
use crate::error::{Error, Result};
use crate::session::{AttributeValue, SessionContext, SessionState};
use crate::validation::{Rejection, ValidationResult, ValidationStep};

/// Fails unless the session is in one of the allowed states.
///
/// A step built with no allowed states rejects every state.
#[derive(Debug, Clone)]
pub struct StateValidationStep {
    allowed: Vec<SessionState>,
}

impl StateValidationStep {
    /// Creates a step accepting the given states.
    ///
    /// Duplicates are dropped; the first occurrence keeps its position.
    #[must_use]
    pub fn new(allowed: impl IntoIterator<Item = SessionState>) -> Self {
        let mut unique = Vec::new();
        for state in allowed {
            if !unique.contains(&state) {
                unique.push(state);
            }
        }
        Self { allowed: unique }
    }

    /// Returns the allowed states.
    #[must_use]
    pub fn allowed(&self) -> &[SessionState] {
        &self.allowed
    }
}

impl ValidationStep for StateValidationStep {
    fn check(&self, _command: &Command, context: &SessionContext) -> ValidationResult {
        let state = context.state();
        if !self.allowed.contains(&state) {
            return ValidationResult::invalid_state(state);
        }
        ValidationResult::success()
    }
}

fn require_key(key: &str) -> Result<String> {
    if key.trim().is_empty() {
        return Err(Error::invalid_argument(
            "Recipients attribute key cannot be empty",
        ));
    }
    Ok(key.to_string())
}

/// Requires a minimum number of recipients recorded in the session.
///
/// The recipients are read from a list attribute. An attribute that is
/// missing, or is not a list, counts as no recipients.
#[derive(Debug, Clone)]
pub struct RecipientCountValidationStep {
    key: String,
    min: usize,
}

impl RecipientCountValidationStep {
    /// Creates a step reading `key` and requiring `min` recipients.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is blank or `min` is zero.
    pub fn new(key: &str, min: usize) -> Result<Self> {
        if min < 1 {
            return Err(Error::invalid_argument(
                "Minimum recipient count must be at least 1",
            ));
        }
        Ok(Self {
            key: require_key(key)?,
            min,
        })
    }
}

impl ValidationStep for RecipientCountValidationStep {
    fn check(&self, _command: &Command, context: &SessionContext) -> ValidationResult {
        match context.attribute(&self.key) {
            None => Rejection::NoRecipients.into(),
            Some(AttributeValue::List(recipients)) if recipients.len() < self.min => {
                Rejection::InsufficientRecipients {
                    required: self.min,
                    found: recipients.len(),
                }
                .into()
            }
            Some(AttributeValue::List(_)) => ValidationResult::success(),
            Some(AttributeValue::Text(_)) => {
                tracing::warn!(key = %self.key, "Recipients attribute is not a list");
                Rejection::NoRecipients.into()
            }
        }
    }
}

/// Rejects further recipients once a limit is reached.
#[derive(Debug, Clone)]
pub struct RecipientLimitValidationStep {
    key: String,
    max: usize,
}

impl RecipientLimitValidationStep {
    /// Creates a step reading `key` and allowing at most `max` recipients.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is blank or `max` is zero.
    pub fn new(key: &str, max: usize) -> Result<Self> {
        if max < 1 {
            return Err(Error::invalid_argument(
                "Maximum recipient count must be at least 1",
            ));
        }
        Ok(Self {
            key: require_key(key)?,
            max,
        })
    }
}

impl ValidationStep for RecipientLimitValidationStep {
    fn check(&self, _command: &Command, context: &SessionContext) -> ValidationResult {
        let count = context
            .attribute(&self.key)
            .and_then(AttributeValue::as_list)
            .map_or(0, <[String]>::len);

        if count >= self.max {
            return Rejection::TooManyRecipients(self.max).into();
        }
        ValidationResult::success()
    }
}
