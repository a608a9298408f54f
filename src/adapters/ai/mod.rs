//! Content Collaborator Adapters.
//!
//! Implementations of the ContentCollaborator port.
//!
//! ## Available Adapters
//!
//! - `GeminiCollaborator` - Google Gemini `generateContent` in JSON mode
//! - `MockCollaborator` - Scripted responses for tests and offline runs

mod gemini_collaborator;
mod mock_collaborator;

pub use gemini_collaborator::{GeminiCollaborator, GeminiConfig};
pub use mock_collaborator::{MockCall, MockCollaborator};
