//! Core State trait for state machine states.
//!
//! Every machine state implements this trait, which provides pure methods
//! for inspecting state properties and enumerating the closed set of states
//! a definition must cover.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Trait for state machine states.
///
/// All methods are pure. States are small immutable values naming the
/// current position of a machine; the data travelling with them lives in
/// the machine's context.
///
/// # Required Traits
///
/// - `Clone`: the driver hands out snapshots of the current state
/// - `PartialEq`: the driver compares states to decide whether to re-enter
/// - `Debug`: for diagnostics
/// - `Serialize` + `Deserialize`: snapshots and history are serializable
///
/// # Example
///
/// ```rust
/// use polybasic::core::State;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
/// enum DoorState {
///     Closed,
///     Opening,
///     Open,
/// }
///
/// impl State for DoorState {
///     fn name(&self) -> &str {
///         match self {
///             Self::Closed => "closed",
///             Self::Opening => "opening",
///             Self::Open => "open",
///         }
///     }
///
///     fn all() -> Vec<Self> {
///         vec![Self::Closed, Self::Opening, Self::Open]
///     }
/// }
///
/// assert_eq!(DoorState::all().len(), 3);
/// assert_eq!(DoorState::Opening.name(), "opening");
/// ```
pub trait State:
    Clone + PartialEq + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync + 'static
{
    /// Get the state's name for display/logging.
    fn name(&self) -> &str;

    /// Every state of the machine.
    ///
    /// Definitions are validated against this list: each state returned here
    /// must have a handler.
    fn all() -> Vec<Self>
    where
        Self: Sized;

    /// Check if this is a final (terminal) state.
    ///
    /// Default implementation returns `false`.
    fn is_final(&self) -> bool {
        false
    }

    /// Check if this is an error state.
    ///
    /// Default implementation returns `false`.
    fn is_error(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
    enum TestState {
        Idle,
        Loading,
        Ready,
        Broken,
    }

    impl State for TestState {
        fn name(&self) -> &str {
            match self {
                Self::Idle => "idle",
                Self::Loading => "loading",
                Self::Ready => "ready",
                Self::Broken => "broken",
            }
        }

        fn all() -> Vec<Self> {
            vec![Self::Idle, Self::Loading, Self::Ready, Self::Broken]
        }

        fn is_final(&self) -> bool {
            matches!(self, Self::Ready | Self::Broken)
        }

        fn is_error(&self) -> bool {
            matches!(self, Self::Broken)
        }
    }

    #[test]
    fn state_name_returns_correct_value() {
        assert_eq!(TestState::Idle.name(), "idle");
        assert_eq!(TestState::Loading.name(), "loading");
        assert_eq!(TestState::Ready.name(), "ready");
        assert_eq!(TestState::Broken.name(), "broken");
    }

    #[test]
    fn all_lists_every_state_once() {
        let all = TestState::all();
        assert_eq!(all.len(), 4);
        for state in &all {
            assert_eq!(all.iter().filter(|s| *s == state).count(), 1);
        }
    }

    #[test]
    fn final_and_error_flags() {
        assert!(!TestState::Idle.is_final());
        assert!(TestState::Ready.is_final());
        assert!(!TestState::Ready.is_error());
        assert!(TestState::Broken.is_final());
        assert!(TestState::Broken.is_error());
    }

    #[test]
    fn state_serializes_correctly() {
        let state = TestState::Loading;
        let json = serde_json::to_string(&state).unwrap();
        let deserialized: TestState = serde_json::from_str(&json).unwrap();
        assert_eq!(state, deserialized);
    }
}
