//! Steps that inspect the command itself.

use std::collections::BTreeSet;

use crate::command::{Command, CommandType};
use crate::session::SessionContext;
use crate::validation::grammar::{ALLOWED_COMMAND_CHARS, LINE_ENDING, MAX_COMMAND_LENGTH};
use crate::validation::{Rejection, ValidationResult, ValidationStep};

/// Fails unless the command has the expected type.
#[derive(Debug, Clone, Copy)]
pub struct CommandTypeValidationStep {
    expected: CommandType,
}

impl CommandTypeValidationStep {
    /// Creates a step accepting only `expected`.
    #[must_use]
    pub const fn new(expected: CommandType) -> Self {
        Self { expected }
    }
}

impl ValidationStep for CommandTypeValidationStep {
    fn check(&self, command: &Command, _context: &SessionContext) -> ValidationResult {
        if command.command_type() != self.expected {
            return Rejection::WrongCommandType {
                expected: self.expected,
                actual: command.command_type(),
            }
            .into();
        }
        ValidationResult::success()
    }
}

/// Checks the number of parameters.
///
/// Fewer than `expected` always fails. More than `expected` fails only in
/// exact mode.
#[derive(Debug, Clone, Copy)]
pub struct ParameterCountValidationStep {
    expected: usize,
    exact: bool,
}

impl ParameterCountValidationStep {
    /// Requires exactly `expected` parameters.
    #[must_use]
    pub const fn exactly(expected: usize) -> Self {
        Self::new(expected, true)
    }

    /// Requires at least `expected` parameters.
    #[must_use]
    pub const fn at_least(expected: usize) -> Self {
        Self::new(expected, false)
    }

    /// Creates a step with an explicit match mode.
    #[must_use]
    pub const fn new(expected: usize, exact: bool) -> Self {
        Self { expected, exact }
    }
}

impl ValidationStep for ParameterCountValidationStep {
    fn check(&self, command: &Command, _context: &SessionContext) -> ValidationResult {
        let count = command.parameter_count();
        if count < self.expected {
            return ValidationResult::too_few_parameters();
        }
        if self.exact && count > self.expected {
            return ValidationResult::too_many_parameters();
        }
        ValidationResult::success()
    }
}

/// Fails if the command line, with its CRLF, exceeds the limit.
///
/// Length is counted in octets, as on the wire.
#[derive(Debug, Clone, Copy)]
pub struct MaxLineLengthValidationStep {
    max_length: usize,
}

impl MaxLineLengthValidationStep {
    /// Creates a step with a custom limit.
    #[must_use]
    pub const fn new(max_length: usize) -> Self {
        Self { max_length }
    }
}

impl Default for MaxLineLengthValidationStep {
    fn default() -> Self {
        Self::new(MAX_COMMAND_LENGTH)
    }
}

impl ValidationStep for MaxLineLengthValidationStep {
    fn check(&self, command: &Command, _context: &SessionContext) -> ValidationResult {
        let total = command.raw_text().len() + LINE_ENDING.len();
        if total > self.max_length {
            return ValidationResult::command_too_long(self.max_length);
        }
        ValidationResult::success()
    }
}

/// Fails if the command line contains characters outside an allow-list.
///
/// Each offending character is reported once, in order of first occurrence.
#[derive(Debug, Clone)]
pub struct AllowedCharactersValidationStep {
    allowed: BTreeSet<char>,
}

impl AllowedCharactersValidationStep {
    /// Creates a step accepting only the characters in `allowed`.
    #[must_use]
    pub fn new(allowed: &str) -> Self {
        Self {
            allowed: allowed.chars().collect(),
        }
    }
}

impl Default for AllowedCharactersValidationStep {
    fn default() -> Self {
        Self::new(ALLOWED_COMMAND_CHARS)
    }
}

impl ValidationStep for AllowedCharactersValidationStep {
    fn check(&self, command: &Command, _context: &SessionContext) -> ValidationResult {
        let mut illegal = String::new();
        for c in command.raw_text().chars() {
            if !self.allowed.contains(&c) && !illegal.contains(c) {
                illegal.push(c);
            }
        }

        if illegal.is_empty() {
            ValidationResult::success()
        } else {
            Rejection::IllegalCharacters(illegal).into()
        }
    }
}
