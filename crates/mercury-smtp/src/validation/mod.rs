//! Command validation pipeline.
//!
//! A [`ValidationChain`] is an ordered list of [`ValidationStep`]s. Steps run
//! in order and the first failure ends the run; later steps never see a
//! command an earlier step rejected.
//!
//! ```ignore
//! use mercury_smtp::validation::ValidationChain;
//! use mercury_smtp::validation::steps::*;
//!
//! let chain = ValidationChain::new()
//!     .then(CommandTypeValidationStep::new(CommandType::Helo))
//!     .then(StateValidationStep::new([SessionState::Connect, SessionState::Helo]))
//!     .then(ParameterCountValidationStep::exactly(1))
//!     .then(DomainParameterValidationStep::new(0)?);
//!
//! let result = chain.validate(&command, &context);
//! ```
//!
//! Chains hold configuration only, never per-session data, so one chain can
//! serve every connection at once.

pub mod chains;
pub mod grammar;
mod result;
pub mod steps;

use std::fmt;

use crate::command::Command;
use crate::session::SessionContext;

pub use result::{FailureKind, Rejection, ValidationResult};

/// One check in a validation chain.
///
/// Implementations must be pure: no I/O, no blocking, no mutation of the
/// session.
pub trait ValidationStep: fmt::Debug + Send + Sync {
    /// Runs this step's check against a command and its session.
    fn check(&self, command: &Command, context: &SessionContext) -> ValidationResult;
}

/// Ordered, fail-fast sequence of validation steps.
#[derive(Debug, Default)]
pub struct ValidationChain {
    steps: Vec<Box<dyn ValidationStep>>,
}

impl ValidationChain {
    /// Creates an empty chain. An empty chain accepts everything.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a step and returns the chain.
    #[must_use]
    pub fn then(mut self, step: impl ValidationStep + 'static) -> Self {
        self.steps.push(Box::new(step));
        self
    }

    /// Appends a step if one is given.
    #[must_use]
    pub fn then_some(self, step: Option<impl ValidationStep + 'static>) -> Self {
        match step {
            Some(step) => self.then(step),
            None => self,
        }
    }

    /// Runs the steps in order, returning the first failure or success.
    #[must_use]
    pub fn validate(&self, command: &Command, context: &SessionContext) -> ValidationResult {
        self.steps
            .iter()
            .map(|step| step.check(command, context))
            .find(|result| !result.is_valid())
            .unwrap_or_else(ValidationResult::success)
    }

    /// Returns the number of steps.
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Returns true if the chain has no steps.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::redundant_clone, clippy::manual_string_new, clippy::needless_collect, clippy::unreadable_literal, clippy::used_underscore_items, clippy::similar_names)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::command::CommandType;

    /// Counts invocations and returns a fixed outcome.
    #[derive(Debug)]
    struct Probe {
        calls: Arc<AtomicUsize>,
        pass: bool,
        label: &'static str,
    }

    impl Probe {
        fn new(pass: bool, label: &'static str) -> (Self, Arc<AtomicUsize>) {
            let calls = Arc::new(AtomicUsize::new(0));
            (
                Self {
                    calls: Arc::clone(&calls),
                    pass,
                    label,
                },
                calls,
            )
        }
    }

    impl ValidationStep for Probe {
        fn check(&self, _command: &Command, _context: &SessionContext) -> ValidationResult {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.pass {
                ValidationResult::success()
            } else {
                ValidationResult::failure(self.label).unwrap()
            }
        }
    }

    fn noop() -> Command {
        Command::bare(CommandType::Noop)
    }

    #[test]
    fn test_empty_chain_passes() {
        let chain = ValidationChain::new();
        assert!(chain.is_empty());
        assert!(chain.validate(&noop(), &SessionContext::new()).is_valid());
    }

    #[test]
    fn test_all_steps_run_when_passing() {
        let (a, a_calls) = Probe::new(true, "a");
        let (b, b_calls) = Probe::new(true, "b");
        let chain = ValidationChain::new().then(a).then(b);

        assert_eq!(chain.len(), 2);
        assert!(chain.validate(&noop(), &SessionContext::new()).is_valid());
        assert_eq!(a_calls.load(Ordering::SeqCst), 1);
        assert_eq!(b_calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_first_failure_stops_chain() {
        let (first, first_calls) = Probe::new(false, "first failed");
        let (second, second_calls) = Probe::new(false, "second failed");
        let chain = ValidationChain::new().then(first).then(second);

        let result = chain.validate(&noop(), &SessionContext::new());

        assert_eq!(result.errors(), ["first failed"]);
        assert_eq!(first_calls.load(Ordering::SeqCst), 1);
        assert_eq!(second_calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_failure_in_middle_skips_tail() {
        let (a, _) = Probe::new(true, "a");
        let (b, _) = Probe::new(false, "b failed");
        let (c, c_calls) = Probe::new(true, "c");
        let chain = ValidationChain::new().then(a).then(b).then(c);

        let result = chain.validate(&noop(), &SessionContext::new());

        assert_eq!(result.errors(), ["b failed"]);
        assert_eq!(c_calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_then_some() {
        let (a, a_calls) = Probe::new(true, "a");
        let chain = ValidationChain::new()
            .then_some(Some(a))
            .then_some(None::<Probe>);
        assert_eq!(chain.len(), 1);
        assert!(chain.validate(&noop(), &SessionContext::new()).is_valid());
        assert_eq!(a_calls.load(Ordering::SeqCst), 1);
    }
}
