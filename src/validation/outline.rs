//! Handler-free view of a definition, inspected by validation checks.

use crate::core::{Event, State};
use crate::effects::StateHandler;

/// How one registered state reacts.
#[derive(Clone, Debug, PartialEq)]
pub enum HandlerShape {
    Passive,
    /// Accepted event kinds, rendered for diagnostics, in registration order.
    Active(Vec<String>),
}

#[derive(Clone, Debug)]
pub struct OutlineEntry<S: State> {
    pub state: S,
    pub shape: HandlerShape,
}

/// The states of a definition and how each reacts, without the handlers.
#[derive(Clone, Debug)]
pub struct DefinitionOutline<S: State> {
    pub initial: S,
    pub entries: Vec<OutlineEntry<S>>,
}

impl<S: State> DefinitionOutline<S> {
    pub fn from_handlers<E: Event, C>(initial: &S, states: &[(S, StateHandler<S, E, C>)]) -> Self {
        let entries = states
            .iter()
            .map(|(state, handler)| OutlineEntry {
                state: state.clone(),
                shape: match handler {
                    StateHandler::Passive(_) => HandlerShape::Passive,
                    StateHandler::Active(handlers) => HandlerShape::Active(
                        handlers.kinds().map(|kind| format!("{kind:?}")).collect(),
                    ),
                },
            })
            .collect();

        Self {
            initial: initial.clone(),
            entries,
        }
    }

    /// Number of registrations for `state`.
    pub fn registrations(&self, state: &S) -> usize {
        self.entries.iter().filter(|entry| entry.state == *state).count()
    }

    pub fn shape_of(&self, state: &S) -> Option<&HandlerShape> {
        self.entries
            .iter()
            .find(|entry| entry.state == *state)
            .map(|entry| &entry.shape)
    }
}
