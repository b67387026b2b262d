//! Core state machine types.
//!
//! This module contains the pure vocabulary shared by every machine:
//! - States via the `State` trait
//! - Events via the `Event` trait and its closed kind tag
//! - Immutable, epoch-stamped transition history
//!
//! Nothing in this module performs I/O.

mod event;
mod history;
mod state;

pub use event::Event;
pub use history::{StateHistory, StateTransition, DEFAULT_HISTORY_LIMIT};
pub use state::State;
