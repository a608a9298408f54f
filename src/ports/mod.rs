//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `ProjectRepository` - Server-side project registry
//! - `ContentCollaborator` - Generative service for chat, hooks and content
//! - `ProjectObserver` - Synchronous change listener for the client store

mod content_collaborator;
mod project_observer;
mod project_repository;

pub use content_collaborator::{
    ChatReply, ChatRequest, CollaboratorError, ContentCollaborator, ProviderInfo,
};
pub use project_observer::ProjectObserver;
pub use project_repository::ProjectRepository;
