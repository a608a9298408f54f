//! Project repository port.
//!
//! Defines the contract for the server-side registry of projects.
//!
//! # Design
//!
//! - **Transition-based writes**: callers never hand back a whole project.
//!   They submit [`ProjectEvent`]s and the repository runs the state
//!   machine against its own copy.
//! - **Per-project serialization**: two writes to the same id never
//!   interleave; writes to different ids may run in parallel.

use async_trait::async_trait;

use crate::domain::foundation::ProjectId;
use crate::domain::project::{Project, ProjectError, ProjectEvent};

/// Repository port for Project aggregates.
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Create and store a fresh project in `Inputting`.
    async fn create(&self) -> Result<Project, ProjectError>;

    /// Fetch a snapshot of a project.
    ///
    /// # Errors
    ///
    /// - `ProjectNotFound` if the id is unknown
    async fn get(&self, id: &ProjectId) -> Result<Project, ProjectError>;

    /// Apply a batch of events as one unit.
    ///
    /// Events run in order against a working copy. The copy is committed
    /// only if every event succeeds, otherwise the stored project is left
    /// as it was and the first error is returned.
    ///
    /// # Errors
    ///
    /// - `ProjectNotFound` if the id is unknown
    /// - any transition error from the state machine
    async fn apply_all(
        &self,
        id: &ProjectId,
        events: Vec<ProjectEvent>,
    ) -> Result<Project, ProjectError>;

    /// Apply a single event.
    async fn apply(&self, id: &ProjectId, event: ProjectEvent) -> Result<Project, ProjectError> {
        self.apply_all(id, vec![event]).await
    }

    /// Check if a project exists.
    async fn exists(&self, id: &ProjectId) -> Result<bool, ProjectError>;

    /// Number of stored projects.
    async fn count(&self) -> Result<usize, ProjectError>;
}
