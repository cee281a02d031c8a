//! Reusable validation steps.

mod command;
mod parameter;
mod session;

pub use command::{
    AllowedCharactersValidationStep, CommandTypeValidationStep, MaxLineLengthValidationStep,
    ParameterCountValidationStep,
};
pub use parameter::{
    DomainParameterValidationStep, EmailParameterValidationStep, ParameterPatternValidationStep,
};
pub use session::{
    RecipientCountValidationStep, RecipientLimitValidationStep, StateValidationStep,
};
