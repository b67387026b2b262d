//! Violations found while validating a definition.

use thiserror::Error;

/// A problem with the shape of a state machine definition.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum DefinitionViolation {
    #[error("State '{state}' has no handler")]
    UnhandledState { state: String },

    #[error("State '{state}' is registered more than once")]
    DuplicateState { state: String },

    #[error("State '{state}' registers event '{event}' more than once")]
    DuplicateEvent { state: String, event: String },

    #[error("Custom check failed: {message}")]
    CustomCheckFailed { message: String },
}
