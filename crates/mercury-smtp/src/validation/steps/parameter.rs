//! Steps that check the syntax of a single parameter.
//!
//! Each step assumes the parameter count was checked earlier in the chain,
//! but still reports an out-of-range index as a missing parameter.

use regex::Regex;

use crate::command::Command;
use crate::error::{Error, Result};
use crate::session::SessionContext;
use crate::validation::grammar;
use crate::validation::{Rejection, ValidationResult, ValidationStep};

/// Returns the parameter at `index` unless it is absent or empty.
fn present(command: &Command, index: usize) -> Option<&str> {
    command.parameter(index).filter(|p| !p.is_empty())
}

/// Matches one parameter against a regular expression.
#[derive(Debug, Clone)]
pub struct ParameterPatternValidationStep {
    pattern: Regex,
    description: String,
    index: usize,
}

impl ParameterPatternValidationStep {
    /// Creates a step checking the parameter at `index`.
    ///
    /// `description` names the expected format in failure messages; a blank
    /// description falls back to "parameter format".
    ///
    /// # Errors
    ///
    /// Returns an error if the pattern is empty or does not compile.
    pub fn new(pattern: &str, description: &str, index: usize) -> Result<Self> {
        if pattern.is_empty() {
            return Err(Error::invalid_argument("Pattern string cannot be empty"));
        }

        let description = if description.trim().is_empty() {
            "parameter format".to_string()
        } else {
            description.to_string()
        };

        Ok(Self {
            pattern: Regex::new(pattern)?,
            description,
            index,
        })
    }
}

impl ValidationStep for ParameterPatternValidationStep {
    fn check(&self, command: &Command, _context: &SessionContext) -> ValidationResult {
        let Some(parameter) = present(command, self.index) else {
            return Rejection::MissingParameter(format!("Parameter at index {}", self.index))
                .into();
        };

        if !self.pattern.is_match(parameter) {
            return Rejection::InvalidParameterFormat(self.description.clone()).into();
        }
        ValidationResult::success()
    }
}

/// Checks that a parameter is a domain name or address literal.
#[derive(Debug, Clone)]
pub struct DomainParameterValidationStep {
    pattern: Regex,
    index: usize,
}

impl DomainParameterValidationStep {
    /// Creates a step checking the parameter at `index`.
    ///
    /// # Errors
    ///
    /// Returns an error if the domain grammar fails to compile.
    pub fn new(index: usize) -> Result<Self> {
        Ok(Self {
            pattern: Regex::new(&grammar::domain_pattern())?,
            index,
        })
    }
}

impl ValidationStep for DomainParameterValidationStep {
    fn check(&self, command: &Command, _context: &SessionContext) -> ValidationResult {
        let Some(domain) = present(command, self.index) else {
            return Rejection::MissingDomain.into();
        };

        if !self.pattern.is_match(domain) {
            return Rejection::InvalidDomain(domain.to_string()).into();
        }
        ValidationResult::success()
    }
}

/// Checks that a parameter is a bracketed address, e.g. `<user@example.com>`.
#[derive(Debug, Clone)]
pub struct EmailParameterValidationStep {
    pattern: Regex,
    index: usize,
}

impl EmailParameterValidationStep {
    /// Creates a step checking the parameter at `index`.
    ///
    /// # Errors
    ///
    /// Returns an error if the address grammar fails to compile.
    pub fn new(index: usize) -> Result<Self> {
        Ok(Self {
            pattern: Regex::new(&grammar::email_pattern())?,
            index,
        })
    }
}

impl ValidationStep for EmailParameterValidationStep {
    fn check(&self, command: &Command, _context: &SessionContext) -> ValidationResult {
        let Some(address) = present(command, self.index) else {
            return Rejection::MissingParameter("Email Address".into()).into();
        };

        if !self.pattern.is_match(address) {
            return Rejection::InvalidEmailAddress(address.to_string()).into();
        }
        ValidationResult::success()
    }
}
