//! CreateProjectHandler - Command handler for starting a new project.

use std::sync::Arc;

use tracing::info;

use crate::domain::project::{Project, ProjectError};
use crate::ports::ProjectRepository;

/// Handler for creating projects.
pub struct CreateProjectHandler {
    repository: Arc<dyn ProjectRepository>,
}

impl CreateProjectHandler {
    pub fn new(repository: Arc<dyn ProjectRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self) -> Result<Project, ProjectError> {
        let project = self.repository.create().await?;
        info!(project_id = %project.id(), "Project started");
        Ok(project)
    }
}
