//! GetProjectHandler - Query handler for retrieving a project snapshot.

use std::sync::Arc;

use crate::domain::foundation::ProjectId;
use crate::domain::project::{Project, ProjectError};
use crate::ports::ProjectRepository;

/// Query to get a project by ID.
#[derive(Debug, Clone)]
pub struct GetProjectQuery {
    pub project_id: ProjectId,
}

/// Handler for retrieving projects.
pub struct GetProjectHandler {
    repository: Arc<dyn ProjectRepository>,
}

impl GetProjectHandler {
    pub fn new(repository: Arc<dyn ProjectRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, query: GetProjectQuery) -> Result<Project, ProjectError> {
        self.repository.get(&query.project_id).await
    }
}
