//! Storage Adapters
//!
//! Implementations of the ProjectRepository port.
//!
//! ## Available Adapters
//!
//! - **InMemoryProjectRepository** - Per-project locked map in process memory
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::InMemoryProjectRepository;
//!
//! let repo = Arc::new(InMemoryProjectRepository::new());
//! let project = repo.create().await?;
//! ```

mod in_memory_project_repository;

pub use in_memory_project_repository::InMemoryProjectRepository;
