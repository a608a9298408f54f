//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors, state machine)
//! - `project` - Content project aggregate, hooks, output and workflow transitions

pub mod foundation;
pub mod project;
