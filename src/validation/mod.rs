//! Validation of state machine definitions.
//!
//! Definitions are checked with Stillwater's `Validation` type so that a
//! broken definition reports every problem at once instead of the first.
//!
//! # Example
//!
//! ```rust
//! use polybasic::state_enum;
//! use polybasic::validation::{DefinitionOutline, DefinitionRules, HandlerShape, OutlineEntry};
//!
//! state_enum! {
//!     enum Light {
//!         Red => "red",
//!         Green => "green",
//!     }
//! }
//!
//! let outline = DefinitionOutline {
//!     initial: Light::Red,
//!     entries: vec![OutlineEntry { state: Light::Red, shape: HandlerShape::Passive }],
//! };
//!
//! // Green has no handler.
//! assert!(DefinitionRules::new().enforce(&outline).is_failure());
//! ```

pub mod outline;
pub mod rules;
pub mod violations;

pub use outline::{DefinitionOutline, HandlerShape, OutlineEntry};
pub use rules::{DefinitionCheck, DefinitionRules};
pub use violations::DefinitionViolation;
