//! In-Memory Project Repository Adapter
//!
//! Stores projects in process memory. Each project sits in its own slot
//! behind a mutex, so writes to one project are serialized while writes to
//! different projects only contend on the brief map lookup.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::debug;

use crate::domain::foundation::ProjectId;
use crate::domain::project::{Project, ProjectError, ProjectEvent};
use crate::ports::ProjectRepository;

type Slot = Arc<Mutex<Project>>;

/// In-memory project registry.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProjectRepository {
    projects: Arc<RwLock<HashMap<ProjectId, Slot>>>,
}

impl InMemoryProjectRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all stored projects (useful for tests)
    pub async fn clear(&self) {
        self.projects.write().await.clear();
    }

    async fn slot(&self, id: &ProjectId) -> Result<Slot, ProjectError> {
        self.projects
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or(ProjectError::ProjectNotFound(*id))
    }
}

#[async_trait]
impl ProjectRepository for InMemoryProjectRepository {
    async fn create(&self) -> Result<Project, ProjectError> {
        let project = Project::new(ProjectId::new());
        let mut projects = self.projects.write().await;
        projects.insert(project.id(), Arc::new(Mutex::new(project.clone())));
        debug!(project_id = %project.id(), "Project created");
        Ok(project)
    }

    async fn get(&self, id: &ProjectId) -> Result<Project, ProjectError> {
        let slot = self.slot(id).await?;
        let project = slot.lock().await;
        Ok(project.clone())
    }

    async fn apply_all(
        &self,
        id: &ProjectId,
        events: Vec<ProjectEvent>,
    ) -> Result<Project, ProjectError> {
        let slot = self.slot(id).await?;
        let mut stored = slot.lock().await;

        let mut working = stored.clone();
        for event in events {
            let name = event.name();
            working = working.apply(event).map_err(|e| {
                debug!(project_id = %id, event = name, error = %e, "Event rejected");
                e
            })?;
        }

        *stored = working.clone();
        Ok(working)
    }

    async fn exists(&self, id: &ProjectId) -> Result<bool, ProjectError> {
        Ok(self.projects.read().await.contains_key(id))
    }

    async fn count(&self) -> Result<usize, ProjectError> {
        Ok(self.projects.read().await.len())
    }
}
