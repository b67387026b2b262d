//! Immutable state machine definitions.

use crate::core::{Event, State};
use crate::effects::StateHandler;
use std::fmt;

/// Declarative table of a machine's states and their handlers.
///
/// A definition holds no run state. Any number of drivers may execute the
/// same definition, usually shared behind an `Arc`.
pub struct StateMachineDefinition<S: State, E: Event, C> {
    initial: S,
    initial_context: C,
    states: Vec<(S, StateHandler<S, E, C>)>,
}

impl<S: State, E: Event, C> StateMachineDefinition<S, E, C> {
    /// Assemble a definition without validating it.
    ///
    /// Prefer [`DefinitionBuilder`](crate::builder::DefinitionBuilder), which
    /// checks that every state has exactly one handler.
    pub fn from_parts(
        initial: S,
        initial_context: C,
        states: Vec<(S, StateHandler<S, E, C>)>,
    ) -> Self {
        Self {
            initial,
            initial_context,
            states,
        }
    }

    pub fn initial(&self) -> &S {
        &self.initial
    }

    pub fn initial_context(&self) -> &C {
        &self.initial_context
    }

    pub fn handler(&self, state: &S) -> Option<&StateHandler<S, E, C>> {
        self.states
            .iter()
            .find(|(registered, _)| registered == state)
            .map(|(_, handler)| handler)
    }

    pub fn is_passive(&self, state: &S) -> bool {
        self.handler(state).is_some_and(StateHandler::is_passive)
    }

    /// Registered states, in registration order.
    pub fn states(&self) -> impl Iterator<Item = &S> + '_ {
        self.states.iter().map(|(state, _)| state)
    }
}

impl<S: State, E: Event, C: fmt::Debug> fmt::Debug for StateMachineDefinition<S, E, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateMachineDefinition")
            .field("initial", &self.initial)
            .field("initial_context", &self.initial_context)
            .field("states", &self.states)
            .finish()
    }
}
