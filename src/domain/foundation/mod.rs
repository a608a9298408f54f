//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, errors, and the state machine trait
//! that form the vocabulary of the Hookline domain.

mod errors;
mod ids;
mod state_machine;
mod timestamp;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{HookId, ProjectId};
pub use state_machine::{InvalidTransition, StateMachine};
pub use timestamp::Timestamp;
