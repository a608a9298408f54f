//! ApplyProjectEventHandler - Generic command handler for workflow events.
//!
//! Used for the user-driven transitions that need no collaborator call:
//! appending messages, merging inputs, confirming hooks, agent progress and
//! edit re-entry.

use std::sync::Arc;

use tracing::debug;

use crate::domain::foundation::ProjectId;
use crate::domain::project::{Project, ProjectError, ProjectEvent};
use crate::ports::ProjectRepository;

/// Command to apply one event to a stored project.
#[derive(Debug, Clone)]
pub struct ApplyProjectEventCommand {
    pub project_id: ProjectId,
    pub event: ProjectEvent,
}

/// Handler for applying events.
pub struct ApplyProjectEventHandler {
    repository: Arc<dyn ProjectRepository>,
}

impl ApplyProjectEventHandler {
    pub fn new(repository: Arc<dyn ProjectRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: ApplyProjectEventCommand) -> Result<Project, ProjectError> {
        let name = cmd.event.name();
        let project = self.repository.apply(&cmd.project_id, cmd.event).await?;
        debug!(project_id = %cmd.project_id, event = name, status = %project.status(), "Event applied");
        Ok(project)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemoryProjectRepository;
    use crate::domain::project::{AgentState, AgentStatus, ErrorKind, ProjectStatus};

    #[tokio::test]
    async fn applies_agent_updates() {
        let repo = Arc::new(InMemoryProjectRepository::new());
        let id = repo.create().await.unwrap().id();
        let handler = ApplyProjectEventHandler::new(repo);

        handler
            .handle(ApplyProjectEventCommand {
                project_id: id,
                event: ProjectEvent::UpdateAgents(AgentStatus::roster(AgentState::Pending)),
            })
            .await
            .unwrap();
        let project = handler
            .handle(ApplyProjectEventCommand {
                project_id: id,
                event: ProjectEvent::UpdateAgentStatus {
                    name: "B-Roll Scout".to_string(),
                    status: AgentState::Working,
                    task: Some("Searching stock libraries".to_string()),
                },
            })
            .await
            .unwrap();

        let scout = project
            .agents()
            .unwrap()
            .iter()
            .find(|a| a.name == "B-Roll Scout")
            .unwrap();
        assert_eq!(scout.status, AgentState::Working);
    }

    #[tokio::test]
    async fn rejected_event_surfaces_error() {
        let repo = Arc::new(InMemoryProjectRepository::new());
        let id = repo.create().await.unwrap().id();
        let handler = ApplyProjectEventHandler::new(repo.clone());

        let err = handler
            .handle(ApplyProjectEventCommand {
                project_id: id,
                event: ProjectEvent::ForceStatus(ProjectStatus::Complete),
            })
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::InvalidState);
        assert_eq!(repo.get(&id).await.unwrap().status(), ProjectStatus::Inputting);
    }
}
