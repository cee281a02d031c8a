//! # mercury-smtp
//!
//! Command validation and session state core for an RFC 5321 SMTP server.
//!
//! ## Features
//!
//! - **Fail-fast validation chains**: each command type has an ordered list
//!   of checks; the first failure is reported
//! - **Protocol sequencing**: commands are checked against the session state
//!   (`CONNECT` → `HELO` → `MAIL` → `RCPT` → `DATA`)
//! - **Parameter grammar**: domains, `FROM:<...>` and `TO:<...>` paths
//! - **Reply mapping**: every failure carries the SMTP reply code a server
//!   would send
//!
//! The crate performs no I/O. A server reads a line, parses it, validates it
//! and only then executes it, updating the session itself.
//!
//! ## Quick Start
//!
//! ```ignore
//! use mercury_smtp::{CommandValidator, SessionContext, SessionState, parse_command};
//!
//! let validator = CommandValidator::new()?;
//! let mut session = SessionContext::new();
//!
//! let command = parse_command("HELO client.example.com\r\n")?;
//! let result = validator.validate(Some(&command), Some(&session));
//!
//! if result.is_valid() {
//!     session.set_state(SessionState::Helo);
//! } else if let Some(reply) = result.reply() {
//!     stream.write_all(reply.to_wire().as_bytes())?;
//! }
//! ```
//!
//! ## Session States
//!
//! ```text
//! ┌─────────┐  HELO/EHLO  ┌──────┐  MAIL  ┌──────┐  RCPT  ┌──────┐  DATA  ┌──────┐
//! │ CONNECT │ ──────────→ │ HELO │ ─────→ │ MAIL │ ─────→ │ RCPT │ ─────→ │ DATA │
//! └─────────┘             └──────┘        └──────┘        └──────┘        └──────┘
//!                            ↑                 RSET (from any transaction state)
//!                            └──────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`command`]: SMTP command model
//! - [`parser`]: Command line parser
//! - [`session`]: Per-connection session state
//! - [`validation`]: Validation steps, chains and results
//! - [`types`]: Reply types

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod command;
pub mod config;
mod error;
pub mod parser;
pub mod session;
pub mod types;
pub mod validation;
mod validator;

pub use command::{Command, CommandType};
pub use config::{ValidatorConfig, ValidatorConfigBuilder};
pub use error::{Error, Result};
pub use parser::parse_command;
pub use session::{AttributeValue, SessionContext, SessionState};
pub use types::{Reply, ReplyClass, ReplyCode};
pub use validation::{FailureKind, Rejection, ValidationChain, ValidationResult, ValidationStep};
pub use validator::CommandValidator;

/// SMTP version the validation rules follow.
pub const SMTP_VERSION: &str = "SMTP (RFC 5321)";
