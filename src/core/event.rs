//! Event trait for events accepted by active states.

use std::fmt::Debug;

/// An event dispatched to a state machine.
///
/// Every event carries a tag from a closed enumeration of event kinds.
/// Active states register their handlers by kind, so the driver can decide
/// whether an event is accepted without inspecting its payload.
///
/// # Example
///
/// ```rust
/// use polybasic::core::Event;
///
/// #[derive(Clone, Debug)]
/// enum DoorEvent {
///     Push { force: u32 },
///     Lock,
/// }
///
/// #[derive(Clone, Copy, Debug, PartialEq)]
/// enum DoorEventKind {
///     Push,
///     Lock,
/// }
///
/// impl Event for DoorEvent {
///     type Kind = DoorEventKind;
///
///     fn kind(&self) -> DoorEventKind {
///         match self {
///             Self::Push { .. } => DoorEventKind::Push,
///             Self::Lock => DoorEventKind::Lock,
///         }
///     }
/// }
///
/// assert_eq!(DoorEvent::Push { force: 3 }.kind(), DoorEventKind::Push);
/// ```
pub trait Event: Clone + Debug + Send + Sync + 'static {
    /// Tag identifying the kind of this event.
    type Kind: Copy + PartialEq + Debug + Send + Sync + 'static;

    /// The event's kind tag.
    fn kind(&self) -> Self::Kind;
}
