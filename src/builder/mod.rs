//! Builder API for state machine definitions.
//!
//! This module provides fluent builders and macros for declaring the state
//! table of a machine: which states are passive, which are active, and what
//! each handler does.

pub mod active;
pub mod definition;
pub mod error;
pub mod machine;
pub mod macros;

pub use active::ActiveStateBuilder;
pub use definition::StateMachineDefinition;
pub use error::BuildError;
pub use machine::DefinitionBuilder;

use crate::core::State;
use crate::effects::{PassiveHandler, Transition};
use futures::FutureExt;
use std::sync::Arc;
use std::time::Duration;

/// Passive handler that moves straight to `state`, keeping the context.
///
/// # Example
///
/// ```
/// use polybasic::builder::goto;
/// use polybasic::state_enum;
///
/// state_enum! {
///     enum Step {
///         First => "first",
///         Second => "second",
///     }
/// }
///
/// let handler = goto::<Step, u8>(Step::Second);
/// let transition = futures::executor::block_on(handler(7));
/// assert_eq!(transition.state, Step::Second);
/// assert_eq!(transition.context, 7);
/// ```
pub fn goto<S, C>(state: S) -> PassiveHandler<S, C>
where
    S: State,
    C: Send + 'static,
{
    Arc::new(move |context: C| {
        futures::future::ready(Transition::new(state.clone(), context)).boxed()
    })
}

/// Passive handler that waits for `delay`, then moves to `state` keeping
/// the context.
pub fn after<S, C>(delay: Duration, state: S) -> PassiveHandler<S, C>
where
    S: State,
    C: Send + 'static,
{
    Arc::new(move |context: C| {
        let state = state.clone();
        async move {
            tokio::time::sleep(delay).await;
            Transition::new(state, context)
        }
        .boxed()
    })
}
