//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `ai` - Content collaborators (Gemini, mock)
//! - `http` - REST API
//! - `storage` - Project repositories

pub mod ai;
pub mod http;
pub mod storage;

pub use ai::{GeminiCollaborator, GeminiConfig, MockCollaborator};
pub use storage::InMemoryProjectRepository;
