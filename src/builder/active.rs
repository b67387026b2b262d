//! Builder for the event handlers of an active state.

use crate::core::{Event, State};
use crate::effects::{ActiveHandlers, EventHandler, Transition};
use futures::FutureExt;
use std::future::Future;
use std::sync::Arc;

/// Collects the event handlers of one active state.
pub struct ActiveStateBuilder<S: State, E: Event, C> {
    handlers: Vec<(E::Kind, EventHandler<S, E, C>)>,
}

impl<S, E, C> ActiveStateBuilder<S, E, C>
where
    S: State,
    E: Event,
    C: Send + 'static,
{
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    /// Handle `kind` with an asynchronous handler.
    pub fn on<F, Fut>(mut self, kind: E::Kind, handler: F) -> Self
    where
        F: Fn(C, E) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Transition<S, C>> + Send + 'static,
    {
        let handler: EventHandler<S, E, C> =
            Arc::new(move |context, event| handler(context, event).boxed());
        self.handlers.push((kind, handler));
        self
    }

    /// Handle `kind` with a synchronous handler.
    pub fn on_sync<F>(mut self, kind: E::Kind, handler: F) -> Self
    where
        F: Fn(C, E) -> Transition<S, C> + Send + Sync + 'static,
    {
        let handler: EventHandler<S, E, C> = Arc::new(move |context, event| {
            futures::future::ready(handler(context, event)).boxed()
        });
        self.handlers.push((kind, handler));
        self
    }

    pub(crate) fn build(self) -> ActiveHandlers<S, E, C> {
        ActiveHandlers::new(self.handlers)
    }
}

impl<S, E, C> Default for ActiveStateBuilder<S, E, C>
where
    S: State,
    E: Event,
    C: Send + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}
