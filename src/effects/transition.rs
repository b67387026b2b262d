//! Transitions and the handlers that produce them.

use crate::core::{Event, State};
use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// The `(state, context)` pair a handler returns.
///
/// The driver replaces its held pair with this value wholesale; there is
/// no partial merge.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transition<S, C> {
    pub state: S,
    pub context: C,
}

impl<S: State, C> Transition<S, C> {
    pub fn new(state: S, context: C) -> Self {
        Self { state, context }
    }
}

/// Future resolved by every handler.
pub type HandlerFuture<S, C> = BoxFuture<'static, Transition<S, C>>;

/// Entry effect of a passive state. Invoked with the context the state was
/// entered with.
pub type PassiveHandler<S, C> = Arc<dyn Fn(C) -> HandlerFuture<S, C> + Send + Sync>;

/// Handler for one event kind of an active state.
pub type EventHandler<S, E, C> = Arc<dyn Fn(C, E) -> HandlerFuture<S, C> + Send + Sync>;

/// Event handlers of an active state, keyed by event kind.
pub struct ActiveHandlers<S, E: Event, C> {
    handlers: Vec<(E::Kind, EventHandler<S, E, C>)>,
}

impl<S, E: Event, C> ActiveHandlers<S, E, C> {
    pub(crate) fn new(handlers: Vec<(E::Kind, EventHandler<S, E, C>)>) -> Self {
        Self { handlers }
    }

    /// Handler registered for `kind`, if the state accepts it.
    pub fn get(&self, kind: E::Kind) -> Option<&EventHandler<S, E, C>> {
        self.handlers
            .iter()
            .find(|(accepted, _)| *accepted == kind)
            .map(|(_, handler)| handler)
    }

    pub fn accepts(&self, kind: E::Kind) -> bool {
        self.get(kind).is_some()
    }

    /// Accepted event kinds, in registration order.
    pub fn kinds(&self) -> impl Iterator<Item = E::Kind> + '_ {
        self.handlers.iter().map(|(kind, _)| *kind)
    }
}

impl<S, E: Event, C> Clone for ActiveHandlers<S, E, C> {
    fn clone(&self) -> Self {
        Self {
            handlers: self
                .handlers
                .iter()
                .map(|(kind, handler)| (*kind, Arc::clone(handler)))
                .collect(),
        }
    }
}

/// How a state reacts: on entry, or to events. Never both.
pub enum StateHandler<S, E: Event, C> {
    /// Runs automatically when the state is entered.
    Passive(PassiveHandler<S, C>),
    /// Waits for one of the registered event kinds.
    Active(ActiveHandlers<S, E, C>),
}

impl<S, E: Event, C> StateHandler<S, E, C> {
    pub fn is_passive(&self) -> bool {
        matches!(self, Self::Passive(_))
    }
}

impl<S, E: Event, C> Clone for StateHandler<S, E, C> {
    fn clone(&self) -> Self {
        match self {
            Self::Passive(handler) => Self::Passive(Arc::clone(handler)),
            Self::Active(handlers) => Self::Active(handlers.clone()),
        }
    }
}

impl<S, E: Event, C> fmt::Debug for StateHandler<S, E, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Passive(_) => f.write_str("Passive"),
            Self::Active(handlers) => f
                .debug_tuple("Active")
                .field(&handlers.kinds().collect::<Vec<_>>())
                .finish(),
        }
    }
}
