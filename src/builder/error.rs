//! Build errors for state machine definitions.

use crate::validation::DefinitionViolation;
use thiserror::Error;

/// Errors that can occur when building a state machine definition.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Initial state not specified. Call .initial(state) before .build()")]
    MissingInitialState,

    #[error("Initial context not specified. Call .context(value) before .build()")]
    MissingInitialContext,

    #[error("Invalid definition: {}", summarize(.violations))]
    InvalidDefinition { violations: Vec<DefinitionViolation> },
}

fn summarize(violations: &[DefinitionViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
