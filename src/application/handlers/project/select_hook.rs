//! SelectHookHandler - Command handler for picking a hook.

use std::sync::Arc;

use tracing::info;

use crate::domain::foundation::{HookId, ProjectId};
use crate::domain::project::{Project, ProjectError, ProjectEvent};
use crate::ports::ProjectRepository;

/// Command to select a hook in the project's current stage.
#[derive(Debug, Clone)]
pub struct SelectHookCommand {
    pub project_id: ProjectId,
    pub hook_id: HookId,
}

/// Handler for hook selection.
pub struct SelectHookHandler {
    repository: Arc<dyn ProjectRepository>,
}

impl SelectHookHandler {
    pub fn new(repository: Arc<dyn ProjectRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: SelectHookCommand) -> Result<Project, ProjectError> {
        let project = self
            .repository
            .apply(&cmd.project_id, ProjectEvent::SelectHook(cmd.hook_id.clone()))
            .await?;

        info!(
            project_id = %cmd.project_id,
            hook_id = %cmd.hook_id,
            status = %project.status(),
            "Hook selected"
        );
        Ok(project)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemoryProjectRepository;
    use crate::domain::project::{ErrorKind, HookCandidate, ProjectStatus};

    async fn with_hooks() -> (Arc<InMemoryProjectRepository>, ProjectId) {
        let repo = Arc::new(InMemoryProjectRepository::new());
        let id = repo.create().await.unwrap().id();
        repo.apply(
            &id,
            ProjectEvent::ReceiveHooks(vec![
                HookCandidate::new("a", "question", "Why?"),
                HookCandidate::new("b", "bold", "Stop"),
            ]),
        )
        .await
        .unwrap();
        (repo, id)
    }

    #[tokio::test]
    async fn selecting_moves_single_flow_to_generating() {
        let (repo, id) = with_hooks().await;
        let handler = SelectHookHandler::new(repo);

        let project = handler
            .handle(SelectHookCommand {
                project_id: id,
                hook_id: HookId::new("b").unwrap(),
            })
            .await
            .unwrap();

        assert_eq!(project.status(), ProjectStatus::Generating);
        assert_eq!(project.selected_hook().unwrap().rank, 2);
    }

    #[tokio::test]
    async fn unknown_hook_is_not_found() {
        let (repo, id) = with_hooks().await;
        let handler = SelectHookHandler::new(repo);

        let err = handler
            .handle(SelectHookCommand {
                project_id: id,
                hook_id: HookId::new("zzz").unwrap(),
            })
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::NotFound);
    }
}
