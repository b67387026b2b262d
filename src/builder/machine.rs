//! Builder for constructing state machine definitions.

use crate::builder::active::ActiveStateBuilder;
use crate::builder::definition::StateMachineDefinition;
use crate::builder::error::BuildError;
use crate::core::{Event, State};
use crate::effects::{PassiveHandler, StateHandler, Transition};
use crate::validation::{DefinitionOutline, DefinitionRules};
use futures::FutureExt;
use std::future::Future;
use std::sync::Arc;
use stillwater::validation::Validation;

/// Builder for state machine definitions with a fluent API.
pub struct DefinitionBuilder<S: State, E: Event, C> {
    initial: Option<S>,
    initial_context: Option<C>,
    states: Vec<(S, StateHandler<S, E, C>)>,
    rules: DefinitionRules<S>,
}

impl<S, E, C> DefinitionBuilder<S, E, C>
where
    S: State,
    E: Event,
    C: Send + 'static,
{
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            initial: None,
            initial_context: None,
            states: Vec::new(),
            rules: DefinitionRules::new(),
        }
    }

    /// Set the initial state (required).
    pub fn initial(mut self, state: S) -> Self {
        self.initial = Some(state);
        self
    }

    /// Set the initial context (required).
    pub fn context(mut self, context: C) -> Self {
        self.initial_context = Some(context);
        self
    }

    /// Register an asynchronous passive state.
    pub fn passive<F, Fut>(mut self, state: S, effect: F) -> Self
    where
        F: Fn(C) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Transition<S, C>> + Send + 'static,
    {
        let handler: PassiveHandler<S, C> = Arc::new(move |context| effect(context).boxed());
        self.states.push((state, StateHandler::Passive(handler)));
        self
    }

    /// Register a synchronous passive state.
    pub fn passive_sync<F>(mut self, state: S, effect: F) -> Self
    where
        F: Fn(C) -> Transition<S, C> + Send + Sync + 'static,
    {
        let handler: PassiveHandler<S, C> =
            Arc::new(move |context| futures::future::ready(effect(context)).boxed());
        self.states.push((state, StateHandler::Passive(handler)));
        self
    }

    /// Register a prebuilt passive handler.
    pub fn passive_handler(mut self, state: S, handler: PassiveHandler<S, C>) -> Self {
        self.states.push((state, StateHandler::Passive(handler)));
        self
    }

    /// Register an active state and its event handlers.
    pub fn active(mut self, state: S, handlers: ActiveStateBuilder<S, E, C>) -> Self {
        self.states
            .push((state, StateHandler::Active(handlers.build())));
        self
    }

    /// Replace the rules checked by [`build`](Self::build).
    ///
    /// The structural rules always apply; custom rules are added on top.
    pub fn rules(mut self, rules: DefinitionRules<S>) -> Self {
        self.rules = rules;
        self
    }

    /// Build the definition.
    ///
    /// Every violation of the definition rules is reported at once.
    pub fn build(self) -> Result<StateMachineDefinition<S, E, C>, BuildError> {
        let initial = self.initial.ok_or(BuildError::MissingInitialState)?;
        let initial_context = self
            .initial_context
            .ok_or(BuildError::MissingInitialContext)?;

        let outline = DefinitionOutline::from_handlers(&initial, &self.states);
        if let Validation::Failure(errors) = self.rules.enforce(&outline) {
            return Err(BuildError::InvalidDefinition {
                violations: errors.iter().cloned().collect(),
            });
        }

        Ok(StateMachineDefinition::from_parts(
            initial,
            initial_context,
            self.states,
        ))
    }
}

impl<S, E, C> Default for DefinitionBuilder<S, E, C>
where
    S: State,
    E: Event,
    C: Send + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}
