//! Property-based tests for command parsing and validation.
//!
//! Verifies that:
//! 1. Arbitrary client lines never panic the parser or validator
//! 2. Validation is idempotent for an unchanged session
//! 3. Well-formed paths are accepted in the right state

use proptest::prelude::*;

use mercury_smtp::{
    Command, CommandType, CommandValidator, SessionContext, SessionState, parse_command,
};

fn validator() -> CommandValidator {
    CommandValidator::new().expect("default validator builds")
}

fn state_strategy() -> impl Strategy<Value = SessionState> {
    prop::sample::select(SessionState::ALL.to_vec())
}

fn command_type_strategy() -> impl Strategy<Value = CommandType> {
    prop::sample::select(CommandType::ALL.to_vec())
}

/// Parameters drawn from everything a client could send on one line.
fn parameter_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[^\r\n ]{0,40}", 0..4)
}

fn hostname_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z0-9]{1,20}(\\.[a-z0-9]{1,20}){1,3}").expect("valid regex")
}

fn local_part_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z0-9_+-]{1,20}(\\.[a-zA-Z0-9_+-]{1,10}){0,2}")
        .expect("valid regex")
}

fn session(state: SessionState, recipients: usize) -> SessionContext {
    let mut ctx = SessionContext::with_state(state);
    for i in 0..recipients {
        ctx.add_recipient(format!("user{i}@example.com"));
    }
    ctx
}

proptest! {
    #[test]
    fn arbitrary_lines_never_panic(line in "\\PC{0,600}", state in state_strategy()) {
        let v = validator();
        if let Ok(command) = parse_command(&line) {
            let _ = v.validate(Some(&command), Some(&SessionContext::with_state(state)));
        }
    }

    #[test]
    fn arbitrary_commands_fail_with_messages(
        ty in command_type_strategy(),
        params in parameter_strategy(),
        state in state_strategy(),
        recipients in 0usize..3,
    ) {
        let v = validator();
        let cmd = Command::new(ty, params);
        let result = v.validate(Some(&cmd), Some(&session(state, recipients)));

        prop_assert_eq!(result.is_valid(), result.kind().is_none());
        prop_assert!(result.errors().iter().all(|e| !e.trim().is_empty()));
        if !result.is_valid() {
            prop_assert!(result.reply().is_some());
        }
    }

    #[test]
    fn validation_is_idempotent(
        ty in command_type_strategy(),
        params in parameter_strategy(),
        state in state_strategy(),
        recipients in 0usize..3,
    ) {
        let v = validator();
        let cmd = Command::new(ty, params);
        let ctx = session(state, recipients);
        prop_assert_eq!(
            v.validate(Some(&cmd), Some(&ctx)),
            v.validate(Some(&cmd), Some(&ctx))
        );
    }

    #[test]
    fn well_formed_paths_accepted(
        local in local_part_strategy(),
        host in hostname_strategy(),
    ) {
        let v = validator();

        let helo = Command::new(CommandType::Helo, [host.clone()]);
        prop_assert!(v.validate(Some(&helo), Some(&session(SessionState::Connect, 0))).is_valid());

        let mail = Command::new(CommandType::Mail, [format!("FROM:<{local}@{host}>")]);
        prop_assert!(v.validate(Some(&mail), Some(&session(SessionState::Helo, 0))).is_valid());

        let rcpt = Command::new(CommandType::Rcpt, [format!("TO:<{local}@{host}>")]);
        prop_assert!(v.validate(Some(&rcpt), Some(&session(SessionState::Mail, 0))).is_valid());
    }

    #[test]
    fn commands_outside_allowed_states_rejected(params in parameter_strategy()) {
        let v = validator();
        let cmd = Command::new(CommandType::Data, params);
        for state in [SessionState::Connect, SessionState::Helo, SessionState::Mail, SessionState::Quit] {
            prop_assert!(!v.validate(Some(&cmd), Some(&session(state, 1))).is_valid());
        }
    }
}
