//! Command validator dispatcher.

use std::collections::HashMap;

use crate::command::{Command, CommandType};
use crate::config::ValidatorConfig;
use crate::error::Result;
use crate::session::SessionContext;
use crate::validation::{Rejection, ValidationChain, ValidationResult, chains};

/// Routes each command to the validation chain for its type.
///
/// All chains are built when the validator is created. A validator holds no
/// per-session data and can be shared by every session.
///
/// # Example
///
/// ```ignore
/// use mercury_smtp::{CommandValidator, SessionContext, parse_command};
///
/// let validator = CommandValidator::new()?;
/// let context = SessionContext::new();
/// let command = parse_command("HELO client.example.com\r\n")?;
///
/// let result = validator.validate(Some(&command), Some(&context));
/// assert!(result.is_valid());
/// ```
#[derive(Debug)]
pub struct CommandValidator {
    chains: HashMap<CommandType, ValidationChain>,
    config: ValidatorConfig,
}

impl CommandValidator {
    /// Creates a validator with the default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if a chain cannot be built.
    pub fn new() -> Result<Self> {
        Self::with_config(ValidatorConfig::default())
    }

    /// Creates a validator with a custom configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is inconsistent or a chain
    /// cannot be built.
    pub fn with_config(config: ValidatorConfig) -> Result<Self> {
        config.validate()?;
        let chains: HashMap<_, _> = chains::canonical(&config)?.into_iter().collect();
        tracing::info!(chains = chains.len(), "Command validator ready");
        Ok(Self { chains, config })
    }

    /// Returns the configuration the chains were built from.
    #[must_use]
    pub const fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Installs a chain for a command type, replacing any existing one.
    pub fn register(&mut self, command_type: CommandType, chain: ValidationChain) {
        tracing::debug!(%command_type, steps = chain.len(), "Registering validation chain");
        self.chains.insert(command_type, chain);
    }

    /// Returns true if a chain is registered for the command type.
    #[must_use]
    pub fn has_chain(&self, command_type: CommandType) -> bool {
        self.chains.contains_key(&command_type)
    }

    /// Validates a command against the current session.
    ///
    /// Missing inputs and command types without a chain produce a failed
    /// result; this method never panics on client input.
    #[must_use]
    pub fn validate(
        &self,
        command: Option<&Command>,
        context: Option<&SessionContext>,
    ) -> ValidationResult {
        let Some(command) = command else {
            tracing::warn!("Validation requested without a command");
            return ValidationResult::null_command();
        };
        let Some(context) = context else {
            tracing::warn!(command = %command.command_type(), "Validation requested without a session");
            return ValidationResult::null_session();
        };

        let command_type = command.command_type();
        let Some(chain) = self.chains.get(&command_type) else {
            tracing::warn!(%command_type, "No validation chain for command");
            return Rejection::UnsupportedCommand(command_type).into();
        };

        let result = chain.validate(command, context);
        if result.is_valid() {
            tracing::debug!(%command_type, state = %context.state(), "Command accepted");
        } else {
            tracing::debug!(
                %command_type,
                state = %context.state(),
                errors = ?result.errors(),
                "Command rejected"
            );
        }
        result
    }
}
