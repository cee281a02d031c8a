//! Canonical validation chain for each SMTP command.
//!
//! | Command   | Steps                                                        |
//! |-----------|--------------------------------------------------------------|
//! | HELO/EHLO | type, state ∈ {CONNECT, HELO}, 1 param, domain               |
//! | MAIL      | type, state = HELO, 1 param, `FROM:<addr>`                   |
//! | RCPT      | type, state ∈ {MAIL, RCPT}, 1 param, `TO:<addr>`             |
//! | DATA      | type, state = RCPT, 0 params, recipients recorded            |
//! | RSET      | type, state ∈ {HELO, MAIL, RCPT, DATA}, 0 params             |
//! | QUIT/NOOP | type, state ∈ {CONNECT, HELO, MAIL, RCPT, DATA}, 0 params    |
//!
//! Cheap checks come first so parameter syntax is only examined on commands
//! that are in sequence and have the right shape. With
//! [`ValidatorConfig::strict_line_checks`] the line length and character
//! checks run right after the type check, and a configured
//! [`ValidatorConfig::max_recipients`] appends a recipient limit to RCPT.

use crate::command::CommandType;
use crate::config::ValidatorConfig;
use crate::error::Result;
use crate::session::{RECIPIENTS_KEY, SessionState};
use crate::validation::ValidationChain;
use crate::validation::grammar;
use crate::validation::steps::{
    AllowedCharactersValidationStep, CommandTypeValidationStep, DomainParameterValidationStep,
    MaxLineLengthValidationStep, ParameterCountValidationStep, ParameterPatternValidationStep,
    RecipientCountValidationStep, RecipientLimitValidationStep, StateValidationStep,
};

/// States in which HELO and EHLO are accepted.
pub const HELO_STATES: &[SessionState] = &[SessionState::Connect, SessionState::Helo];

/// States in which MAIL is accepted.
pub const MAIL_STATES: &[SessionState] = &[SessionState::Helo];

/// States in which RCPT is accepted.
pub const RCPT_STATES: &[SessionState] = &[SessionState::Mail, SessionState::Rcpt];

/// States in which DATA is accepted.
pub const DATA_STATES: &[SessionState] = &[SessionState::Rcpt];

/// States in which RSET is accepted.
pub const RSET_STATES: &[SessionState] = &[
    SessionState::Helo,
    SessionState::Mail,
    SessionState::Rcpt,
    SessionState::Data,
];

/// States in which QUIT and NOOP are accepted.
pub const ANY_OPEN_STATES: &[SessionState] = &[
    SessionState::Connect,
    SessionState::Helo,
    SessionState::Mail,
    SessionState::Rcpt,
    SessionState::Data,
];

/// Starts a chain with the type check, the optional line checks and the
/// state check.
fn head(
    command_type: CommandType,
    states: &[SessionState],
    config: &ValidatorConfig,
) -> ValidationChain {
    let strict = config.strict_line_checks;
    ValidationChain::new()
        .then(CommandTypeValidationStep::new(command_type))
        .then_some(strict.then(|| MaxLineLengthValidationStep::new(config.max_line_length)))
        .then_some(strict.then(AllowedCharactersValidationStep::default))
        .then(StateValidationStep::new(states.iter().copied()))
}

/// Builds the HELO or EHLO chain.
///
/// # Errors
///
/// Returns an error if the domain grammar fails to compile.
pub fn greeting(command_type: CommandType, config: &ValidatorConfig) -> Result<ValidationChain> {
    tracing::debug!(%command_type, "Building validation chain");
    Ok(head(command_type, HELO_STATES, config)
        .then(ParameterCountValidationStep::exactly(1))
        .then(DomainParameterValidationStep::new(0)?))
}

/// Builds the MAIL chain.
///
/// # Errors
///
/// Returns an error if the reverse-path grammar fails to compile.
pub fn mail(config: &ValidatorConfig) -> Result<ValidationChain> {
    tracing::debug!(command_type = %CommandType::Mail, "Building validation chain");
    Ok(head(CommandType::Mail, MAIL_STATES, config)
        .then(ParameterCountValidationStep::exactly(1))
        .then(ParameterPatternValidationStep::new(
            &grammar::mail_from_pattern(config.allow_null_sender),
            grammar::MAIL_FROM_DESCRIPTION,
            0,
        )?))
}

/// Builds the RCPT chain.
///
/// # Errors
///
/// Returns an error if the forward-path grammar fails to compile or the
/// recipient limit is zero.
pub fn rcpt(config: &ValidatorConfig) -> Result<ValidationChain> {
    tracing::debug!(command_type = %CommandType::Rcpt, "Building validation chain");
    let limit = config
        .max_recipients
        .map(|max| RecipientLimitValidationStep::new(RECIPIENTS_KEY, max))
        .transpose()?;

    Ok(head(CommandType::Rcpt, RCPT_STATES, config)
        .then(ParameterCountValidationStep::exactly(1))
        .then(ParameterPatternValidationStep::new(
            &grammar::rcpt_to_pattern(),
            grammar::RCPT_TO_DESCRIPTION,
            0,
        )?)
        .then_some(limit))
}

/// Builds the DATA chain.
///
/// # Errors
///
/// Returns an error if the minimum recipient count is zero.
pub fn data(config: &ValidatorConfig) -> Result<ValidationChain> {
    tracing::debug!(command_type = %CommandType::Data, "Building validation chain");
    Ok(head(CommandType::Data, DATA_STATES, config)
        .then(ParameterCountValidationStep::exactly(0))
        .then(RecipientCountValidationStep::new(
            RECIPIENTS_KEY,
            config.min_recipients,
        )?))
}

/// Builds a chain for a command that takes no parameters.
#[must_use]
pub fn bare(
    command_type: CommandType,
    states: &[SessionState],
    config: &ValidatorConfig,
) -> ValidationChain {
    tracing::debug!(%command_type, "Building validation chain");
    head(command_type, states, config).then(ParameterCountValidationStep::exactly(0))
}

/// Builds every canonical chain.
///
/// VRFY, EXPN and HELP have no canonical chain.
///
/// # Errors
///
/// Returns an error if any chain cannot be built.
pub fn canonical(config: &ValidatorConfig) -> Result<Vec<(CommandType, ValidationChain)>> {
    Ok(vec![
        (CommandType::Helo, greeting(CommandType::Helo, config)?),
        (CommandType::Ehlo, greeting(CommandType::Ehlo, config)?),
        (CommandType::Mail, mail(config)?),
        (CommandType::Rcpt, rcpt(config)?),
        (CommandType::Data, data(config)?),
        (CommandType::Rset, bare(CommandType::Rset, RSET_STATES, config)),
        (CommandType::Quit, bare(CommandType::Quit, ANY_OPEN_STATES, config)),
        (CommandType::Noop, bare(CommandType::Noop, ANY_OPEN_STATES, config)),
    ])
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::redundant_clone, clippy::manual_string_new, clippy::needless_collect, clippy::unreadable_literal, clippy::used_underscore_items, clippy::similar_names)]
mod tests {
    use super::*;
    use crate::command::Command;
    use crate::session::SessionContext;

    fn config() -> ValidatorConfig {
        ValidatorConfig::default()
    }

    #[test]
    fn test_chain_lengths() {
        let chains = canonical(&config()).unwrap();
        let lengths: Vec<_> = chains.iter().map(|(ty, c)| (*ty, c.len())).collect();
        assert_eq!(
            lengths,
            vec![
                (CommandType::Helo, 4),
                (CommandType::Ehlo, 4),
                (CommandType::Mail, 4),
                (CommandType::Rcpt, 4),
                (CommandType::Data, 4),
                (CommandType::Rset, 3),
                (CommandType::Quit, 3),
                (CommandType::Noop, 3),
            ]
        );
    }

    #[test]
    fn test_strict_adds_line_checks() {
        let strict = ValidatorConfig::builder()
            .strict_line_checks(true)
            .max_recipients(None)
            .build()
            .unwrap();
        assert_eq!(greeting(CommandType::Helo, &strict).unwrap().len(), 6);
        assert_eq!(rcpt(&strict).unwrap().len(), 6);
    }

    #[test]
    fn test_recipient_limit_is_opt_in() {
        let limited = ValidatorConfig::builder()
            .max_recipients(Some(10))
            .build()
            .unwrap();
        assert_eq!(rcpt(&limited).unwrap().len(), 5);
        assert_eq!(rcpt(&config()).unwrap().len(), 4);
    }

    #[test]
    fn test_type_checked_before_state() {
        let chain = greeting(CommandType::Ehlo, &config()).unwrap();
        let cmd = Command::new(CommandType::Helo, ["example.com"]);
        let ctx = SessionContext::with_state(SessionState::Quit);
        assert_eq!(
            chain.validate(&cmd, &ctx).errors(),
            ["Invalid command type: expected EHLO but got HELO"]
        );
    }

    #[test]
    fn test_state_checked_before_count() {
        let chain = mail(&config()).unwrap();
        let cmd = Command::bare(CommandType::Mail);
        let ctx = SessionContext::with_state(SessionState::Connect);
        assert_eq!(
            chain.validate(&cmd, &ctx).errors(),
            ["Command not valid in current state: CONNECT"]
        );
    }

    #[test]
    fn test_count_checked_before_pattern() {
        let chain = rcpt(&config()).unwrap();
        let cmd = Command::new(CommandType::Rcpt, ["TO:", "<a@example.com>"]);
        let ctx = SessionContext::with_state(SessionState::Mail);
        assert_eq!(
            chain.validate(&cmd, &ctx).errors(),
            ["Too many parameters provided"]
        );
    }

    #[test]
    fn test_strict_line_checks_reject_control_characters() {
        let strict = ValidatorConfig::builder()
            .strict_line_checks(true)
            .build()
            .unwrap();
        let chain = bare(CommandType::Noop, ANY_OPEN_STATES, &strict);
        let cmd = Command::new(CommandType::Noop, ["\u{1b}[2J"]);
        let result = chain.validate(&cmd, &SessionContext::new());
        assert_eq!(
            result.errors(),
            ["Command contains illegal characters: \u{1b}"]
        );
    }

    #[test]
    fn test_null_sender_setting() {
        let cmd = Command::new(CommandType::Mail, ["FROM:<>"]);
        let ctx = SessionContext::with_state(SessionState::Helo);

        assert!(mail(&config()).unwrap().validate(&cmd, &ctx).is_valid());

        let strict = ValidatorConfig::builder()
            .allow_null_sender(false)
            .build()
            .unwrap();
        assert!(!mail(&strict).unwrap().validate(&cmd, &ctx).is_valid());
    }
}
