//! Polybasic: a vocabulary flashcard game built on an async state machine
//! driver.
//!
//! Every screen of the game is a state machine definition: a table of
//! states, each either *passive* (an effect that runs on entry and
//! computes the next state by itself) or *active* (a set of handlers for
//! the events it accepts). A [`Driver`] executes one instance of a
//! definition. Results that resolve after the driver has moved on are
//! discarded.
//!
//! # Core Concepts
//!
//! - **State / Event**: closed vocabularies via the [`State`] and [`Event`] traits
//! - **Definition**: an immutable state table, shared between drivers
//! - **Driver**: per-instance run state with epoch-based stale discard
//! - **App / Game machines**: language selection and loading, then the
//!   question/answer cycle
//! - **Session**: the two machines wired together for one player
//!
//! # Example
//!
//! ```rust
//! use polybasic::config::GameConfig;
//! use polybasic::game::{self, GameDriver, GameState};
//! use polybasic::random::SeededRandom;
//! use std::sync::Arc;
//!
//! let definition = game::definition(850, &GameConfig::default(), Arc::new(SeededRandom::new(1)))
//!     .expect("valid definition");
//!
//! let driver = futures::executor::block_on(GameDriver::launch(Arc::new(definition)))
//!     .expect("game starts");
//!
//! let (state, context) = driver.current();
//! assert_eq!(state, GameState::WaitingForAnswer);
//! assert_eq!(context.option_word_indexes.len(), 3);
//! assert!(context
//!     .option_word_indexes
//!     .contains(&context.current_word_index.unwrap()));
//! ```

pub mod app;
pub mod builder;
pub mod config;
pub mod core;
pub mod effects;
pub mod game;
pub mod random;
pub mod session;
pub mod validation;

// Re-export commonly used types
pub use builder::{ActiveStateBuilder, BuildError, DefinitionBuilder, StateMachineDefinition};
pub use config::{ConfigError, GameConfig, PolybasicConfig};
pub use self::core::{Event, State, StateHistory, StateTransition};
pub use effects::{DispatchOutcome, Driver, DriverError, DriverRunState, Transition};
pub use random::{RandomSource, SeededRandom, ThreadRandom};
pub use session::{RoundView, Session, SessionError};
