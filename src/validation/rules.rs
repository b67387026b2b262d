//! Definition rules checked with `Validation`, accumulating every violation.

use crate::core::State;
use crate::validation::outline::{DefinitionOutline, HandlerShape};
use crate::validation::violations::DefinitionViolation;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Type alias for a custom definition check.
pub type DefinitionCheck<S> = Box<
    dyn Fn(&DefinitionOutline<S>) -> Validation<(), NonEmptyVec<DefinitionViolation>>
        + Send
        + Sync,
>;

/// Structural rules every definition must satisfy, plus optional custom
/// checks.
///
/// The structural rules are:
/// - every state listed by `State::all()` has exactly one handler
/// - an active state registers each event kind at most once
pub struct DefinitionRules<S: State> {
    required_checks: Vec<DefinitionCheck<S>>,
}

impl<S: State> DefinitionRules<S> {
    pub fn new() -> Self {
        Self {
            required_checks: Vec::new(),
        }
    }

    /// Add a custom check.
    pub fn require<F>(mut self, check: F) -> Self
    where
        F: Fn(&DefinitionOutline<S>) -> Validation<(), NonEmptyVec<DefinitionViolation>>
            + Send
            + Sync
            + 'static,
    {
        self.required_checks.push(Box::new(check));
        self
    }

    /// Add a custom check from a predicate and the message reported when it
    /// fails.
    pub fn require_pred<F>(mut self, predicate: F, error_msg: String) -> Self
    where
        F: Fn(&DefinitionOutline<S>) -> bool + Send + Sync + 'static,
    {
        let check = move |outline: &DefinitionOutline<S>| {
            if predicate(outline) {
                Validation::success(())
            } else {
                Validation::fail(DefinitionViolation::CustomCheckFailed {
                    message: error_msg.clone(),
                })
            }
        };
        self.required_checks.push(Box::new(check));
        self
    }

    /// Check the outline against every rule, collecting all violations.
    pub fn enforce(
        &self,
        outline: &DefinitionOutline<S>,
    ) -> Validation<(), NonEmptyVec<DefinitionViolation>> {
        let mut checks: Vec<Validation<(), NonEmptyVec<DefinitionViolation>>> = Vec::new();

        for state in S::all() {
            let check = match outline.registrations(&state) {
                0 => Validation::fail(DefinitionViolation::UnhandledState {
                    state: state.name().to_string(),
                }),
                1 => Validation::success(()),
                _ => Validation::fail(DefinitionViolation::DuplicateState {
                    state: state.name().to_string(),
                }),
            };
            checks.push(check);
        }

        for entry in &outline.entries {
            if let HandlerShape::Active(kinds) = &entry.shape {
                for (position, kind) in kinds.iter().enumerate() {
                    if kinds[..position].contains(kind) {
                        checks.push(Validation::fail(DefinitionViolation::DuplicateEvent {
                            state: entry.state.name().to_string(),
                            event: kind.clone(),
                        }));
                    }
                }
            }
        }

        for check_fn in &self.required_checks {
            checks.push(check_fn(outline));
        }

        Validation::all_vec(checks).map(|_| ())
    }
}

impl<S: State> Default for DefinitionRules<S> {
    fn default() -> Self {
        Self::new()
    }
}
