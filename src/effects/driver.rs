//! Runtime driver executing a state machine definition.
//!
//! The driver owns the `(state, context)` pair of one machine instance.
//! Passive states are run on entry, events are routed to the handlers of
//! active states, and every result is applied only if the driver is still
//! in the epoch the result was computed against.

use crate::builder::StateMachineDefinition;
use crate::core::{Event, State, StateHistory, StateTransition};
use crate::effects::transition::{StateHandler, Transition};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::watch;
use tracing::{debug, warn};
use uuid::Uuid;

/// Run state held by a driver.
///
/// `epoch` advances on every applied transition; an effect computed
/// against an older epoch is discarded when it resolves.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DriverRunState<S, C> {
    pub state: S,
    pub context: C,
    pub epoch: u64,
}

/// What happened to a dispatched event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The handler's transition was applied and entry effects ran.
    Applied,
    /// The current state does not accept this kind of event.
    Ignored,
    /// The handler resolved after the driver had moved on.
    Stale,
}

/// Errors reported by the driver to its caller.
#[derive(Debug, Error, PartialEq)]
pub enum DriverError {
    #[error("Cannot dispatch '{event}' while in passive state '{state}'")]
    PassiveState { state: String, event: String },

    #[error("No handler registered for state '{state}'")]
    MissingHandler { state: String },
}

struct Slot<S: State, C> {
    run: DriverRunState<S, C>,
    history: StateHistory<S>,
}

/// A state that was just applied and may need its entry effect run.
struct Entered<S, C> {
    state: S,
    context: C,
    epoch: u64,
    changed: bool,
}

struct Inner<S: State, E: Event, C> {
    id: Uuid,
    definition: Arc<StateMachineDefinition<S, E, C>>,
    slot: watch::Sender<Slot<S, C>>,
}

/// Executes one instance of a state machine definition.
///
/// Cloning a driver yields another handle to the same instance; separate
/// instances never share run state, even when built from one definition.
pub struct Driver<S: State, E: Event, C> {
    inner: Arc<Inner<S, E, C>>,
}

impl<S: State, E: Event, C> Clone for Driver<S, E, C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S, E, C> Driver<S, E, C>
where
    S: State,
    E: Event,
    C: Clone + Send + Sync + 'static,
{
    /// Create a driver holding the definition's initial state and context.
    ///
    /// No entry effect runs until [`Driver::start`] is awaited.
    pub fn new(definition: Arc<StateMachineDefinition<S, E, C>>) -> Self {
        Self::with_history_limit(definition, crate::core::DEFAULT_HISTORY_LIMIT)
    }

    pub fn with_history_limit(
        definition: Arc<StateMachineDefinition<S, E, C>>,
        history_limit: usize,
    ) -> Self {
        let run = DriverRunState {
            state: definition.initial().clone(),
            context: definition.initial_context().clone(),
            epoch: 0,
        };
        let (slot, _) = watch::channel(Slot {
            run,
            history: StateHistory::with_limit(history_limit),
        });

        Self {
            inner: Arc::new(Inner {
                id: Uuid::new_v4(),
                definition,
                slot,
            }),
        }
    }

    /// Create a driver and run the initial state's entry chain.
    pub async fn launch(
        definition: Arc<StateMachineDefinition<S, E, C>>,
    ) -> Result<Self, DriverError> {
        let driver = Self::new(definition);
        driver.start().await?;
        Ok(driver)
    }

    /// Run the entry effect of the current state if it is passive.
    pub async fn start(&self) -> Result<(), DriverError> {
        let entered = {
            let slot = self.inner.slot.borrow();
            Entered {
                state: slot.run.state.clone(),
                context: slot.run.context.clone(),
                epoch: slot.run.epoch,
                changed: true,
            }
        };
        self.enter(entered).await
    }

    pub fn id(&self) -> Uuid {
        self.inner.id
    }

    pub fn definition(&self) -> &StateMachineDefinition<S, E, C> {
        &self.inner.definition
    }

    /// Current `(state, context)` snapshot.
    pub fn current(&self) -> (S, C) {
        let slot = self.inner.slot.borrow();
        (slot.run.state.clone(), slot.run.context.clone())
    }

    pub fn state(&self) -> S {
        self.inner.slot.borrow().run.state.clone()
    }

    pub fn context(&self) -> C {
        self.inner.slot.borrow().run.context.clone()
    }

    pub fn epoch(&self) -> u64 {
        self.inner.slot.borrow().run.epoch
    }

    pub fn run_state(&self) -> DriverRunState<S, C> {
        self.inner.slot.borrow().run.clone()
    }

    /// Applied transitions, oldest first.
    pub fn history(&self) -> StateHistory<S> {
        self.inner.slot.borrow().history.clone()
    }

    /// Watch for applied transitions.
    pub fn subscribe(&self) -> DriverWatch<S, C> {
        DriverWatch {
            rx: self.inner.slot.subscribe(),
        }
    }

    /// Dispatch an event to the current state.
    ///
    /// Resolves once the handler's transition and any passive states it
    /// leads into have been applied, or discarded as stale.
    pub async fn dispatch(&self, event: E) -> Result<DispatchOutcome, DriverError> {
        let (state, context, epoch) = {
            let slot = self.inner.slot.borrow();
            (
                slot.run.state.clone(),
                slot.run.context.clone(),
                slot.run.epoch,
            )
        };

        let handler = match self.handler_for(&state)? {
            StateHandler::Passive(_) => {
                warn!(
                    driver = %self.inner.id,
                    state = state.name(),
                    event = ?event.kind(),
                    "event dispatched to a passive state"
                );
                return Err(DriverError::PassiveState {
                    state: state.name().to_string(),
                    event: format!("{:?}", event.kind()),
                });
            }
            StateHandler::Active(handlers) => match handlers.get(event.kind()) {
                Some(handler) => Arc::clone(handler),
                None => {
                    warn!(
                        driver = %self.inner.id,
                        state = state.name(),
                        event = ?event.kind(),
                        "cannot transition with this event in the current state"
                    );
                    return Ok(DispatchOutcome::Ignored);
                }
            },
        };

        let transition = handler(context, event).await;
        match self.apply(epoch, transition) {
            Some(entered) => {
                self.enter(entered).await?;
                Ok(DispatchOutcome::Applied)
            }
            None => Ok(DispatchOutcome::Stale),
        }
    }

    /// Return to the initial state and context.
    ///
    /// Every effect still in flight becomes stale. The initial state's
    /// entry chain runs again.
    pub async fn restart(&self) -> Result<(), DriverError> {
        let definition = &self.inner.definition;
        let mut entered = None;
        self.inner.slot.send_modify(|slot| {
            entered = Some(Self::replace(
                slot,
                Transition::new(
                    definition.initial().clone(),
                    definition.initial_context().clone(),
                ),
            ));
        });

        match entered {
            Some(mut entered) => {
                entered.changed = true;
                self.enter(entered).await
            }
            None => Ok(()),
        }
    }

    /// Make every in-flight effect stale without changing state or context.
    pub fn invalidate(&self) {
        self.inner.slot.send_modify(|slot| slot.run.epoch += 1);
        debug!(driver = %self.inner.id, "in-flight effects invalidated");
    }

    fn handler_for(&self, state: &S) -> Result<&StateHandler<S, E, C>, DriverError> {
        self.inner
            .definition
            .handler(state)
            .ok_or_else(|| DriverError::MissingHandler {
                state: state.name().to_string(),
            })
    }

    /// Run passive entry effects until an active state, a terminal passive
    /// state, or a stale result stops the chain.
    async fn enter(&self, mut entered: Entered<S, C>) -> Result<(), DriverError> {
        loop {
            if !entered.changed {
                return Ok(());
            }

            let effect = match self.handler_for(&entered.state)? {
                StateHandler::Active(_) => return Ok(()),
                StateHandler::Passive(effect) => Arc::clone(effect),
            };

            let transition = effect(entered.context).await;
            match self.apply(entered.epoch, transition) {
                Some(next) => entered = next,
                None => return Ok(()),
            }
        }
    }

    /// Replace the run state if it is still at `epoch`.
    fn apply(&self, epoch: u64, transition: Transition<S, C>) -> Option<Entered<S, C>> {
        let mut entered = None;
        self.inner.slot.send_if_modified(|slot| {
            if slot.run.epoch != epoch {
                return false;
            }
            entered = Some(Self::replace(slot, transition));
            true
        });

        match &entered {
            Some(applied) => debug!(
                driver = %self.inner.id,
                state = applied.state.name(),
                epoch = applied.epoch,
                "transition applied"
            ),
            None => debug!(
                driver = %self.inner.id,
                epoch,
                "stale transition discarded"
            ),
        }
        entered
    }

    fn replace(slot: &mut Slot<S, C>, transition: Transition<S, C>) -> Entered<S, C> {
        let Transition { state, context } = transition;
        let from = std::mem::replace(&mut slot.run.state, state.clone());
        let changed = from != state;

        slot.run.context = context.clone();
        slot.run.epoch += 1;
        slot.history = slot.history.record(StateTransition {
            from,
            to: state.clone(),
            timestamp: Utc::now(),
            epoch: slot.run.epoch,
        });

        Entered {
            state,
            context,
            epoch: slot.run.epoch,
            changed,
        }
    }
}

/// Receiver side of a driver's run state.
pub struct DriverWatch<S: State, C> {
    rx: watch::Receiver<Slot<S, C>>,
}

impl<S: State, C: Clone> DriverWatch<S, C> {
    /// Wait for the next applied transition.
    ///
    /// Returns `false` once the driver has been dropped.
    pub async fn changed(&mut self) -> bool {
        self.rx.changed().await.is_ok()
    }

    pub fn current(&self) -> DriverRunState<S, C> {
        self.rx.borrow().run.clone()
    }
}
