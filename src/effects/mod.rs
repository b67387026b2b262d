//! Effectful execution of state machine definitions.
//!
//! This module is the imperative shell around the declarative state table:
//!
//! - **Transitions**: the `(state, context)` pairs handlers resolve to
//! - **Handlers**: passive entry effects and active event handlers
//! - **Driver**: holds the run state, runs entry effects, routes events and
//!   discards results that resolve after the machine has moved on

mod driver;
mod transition;

pub use driver::{DispatchOutcome, Driver, DriverError, DriverRunState, DriverWatch};
pub use transition::{
    ActiveHandlers, EventHandler, HandlerFuture, PassiveHandler, StateHandler, Transition,
};
