//! GenerateContentHandler - Command handler for producing the content package.
//!
//! With a project id the project must be `Generating`; the hook choice and
//! brief come from the project. Agent progress is published before the
//! collaborator is called. If the call fails the project stays in
//! `Generating` with its agents as they were, and the error is returned.

use std::sync::Arc;

use tracing::{error, info};

use crate::domain::foundation::ProjectId;
use crate::domain::project::{
    AgentState, AgentStatus, ContentOutput, HookChoice, Project, ProjectError, ProjectEvent,
    ProjectStatus, UserInputs,
};
use crate::ports::{ContentCollaborator, ProjectRepository};

/// Command to generate content.
#[derive(Debug, Clone, Default)]
pub struct GenerateContentCommand {
    pub project_id: Option<ProjectId>,
    /// Brief, merged over the project's own inputs when an id is given.
    pub inputs: UserInputs,
    /// Required when no project id is given; ignored otherwise.
    pub choice: Option<HookChoice>,
}

/// Result of content generation.
#[derive(Debug, Clone)]
pub struct ContentOutcome {
    pub output: ContentOutput,
    pub project: Option<Project>,
}

/// Handler for content generation.
pub struct GenerateContentHandler {
    repository: Arc<dyn ProjectRepository>,
    collaborator: Arc<dyn ContentCollaborator>,
}

impl GenerateContentHandler {
    pub fn new(
        repository: Arc<dyn ProjectRepository>,
        collaborator: Arc<dyn ContentCollaborator>,
    ) -> Self {
        Self {
            repository,
            collaborator,
        }
    }

    pub async fn handle(&self, cmd: GenerateContentCommand) -> Result<ContentOutcome, ProjectError> {
        match cmd.project_id {
            Some(id) => self.generate_for_project(id, cmd.inputs).await,
            None => self.generate_stateless(cmd.inputs, cmd.choice).await,
        }
    }

    async fn generate_for_project(
        &self,
        id: ProjectId,
        inputs: UserInputs,
    ) -> Result<ContentOutcome, ProjectError> {
        let project = self.repository.get(&id).await?;
        if project.status() != ProjectStatus::Generating {
            return Err(ProjectError::invalid_state(format!(
                "Content can only be generated while generating, project is {}",
                project.status()
            )));
        }
        let choice = project
            .hook_choice()
            .ok_or_else(|| ProjectError::invalid_state("Hook selection is incomplete"))?;
        let inputs = project.inputs().merged(inputs);
        require_topic(&inputs)?;

        self.repository
            .apply(
                &id,
                ProjectEvent::UpdateAgents(AgentStatus::roster(AgentState::Working)),
            )
            .await?;

        let output = self
            .collaborator
            .generate_content(&inputs, &choice)
            .await
            .map_err(|e| {
                error!(project_id = %id, error = %e, "Content generation failed");
                ProjectError::from(e)
            })?;

        let project = self
            .repository
            .apply(&id, ProjectEvent::ReceiveOutput(output))
            .await?;
        let output = project
            .output()
            .cloned()
            .ok_or_else(|| ProjectError::infrastructure("Output missing after commit"))?;

        info!(
            project_id = %id,
            script_lines = output.script.len(),
            frames = output.storyboard.len(),
            "Content generated"
        );
        Ok(ContentOutcome {
            output,
            project: Some(project),
        })
    }

    async fn generate_stateless(
        &self,
        inputs: UserInputs,
        choice: Option<HookChoice>,
    ) -> Result<ContentOutcome, ProjectError> {
        require_topic(&inputs)?;
        let choice = choice.ok_or_else(|| {
            ProjectError::invalid_input("selectedHook", "Inputs and selected hook are required")
        })?;

        let output = self
            .collaborator
            .generate_content(&inputs, &choice)
            .await
            .map_err(|e| {
                error!(error = %e, "Content generation failed");
                ProjectError::from(e)
            })?;

        Ok(ContentOutcome {
            output: output.normalized(),
            project: None,
        })
    }
}

fn require_topic(inputs: &UserInputs) -> Result<(), ProjectError> {
    if inputs.has_topic() {
        Ok(())
    } else {
        Err(ProjectError::invalid_input(
            "topic",
            "Topic is required to generate content",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::{MockCall, MockCollaborator};
    use crate::adapters::storage::InMemoryProjectRepository;
    use crate::domain::foundation::HookId;
    use crate::domain::project::{normalize_candidates, ErrorKind, HookCandidate, HookSet, ScriptLine};
    use crate::ports::CollaboratorError;

    fn setup(
        collaborator: MockCollaborator,
    ) -> (Arc<InMemoryProjectRepository>, Arc<MockCollaborator>, GenerateContentHandler) {
        let repo = Arc::new(InMemoryProjectRepository::new());
        let collaborator = Arc::new(collaborator);
        let handler = GenerateContentHandler::new(repo.clone(), collaborator.clone());
        (repo, collaborator, handler)
    }

    async fn generating_project(repo: &InMemoryProjectRepository) -> ProjectId {
        let id = repo.create().await.unwrap().id();
        repo.apply_all(
            &id,
            vec![
                ProjectEvent::MergeInputs(UserInputs::with_topic("tea")),
                ProjectEvent::ReceiveHooks(vec![HookCandidate::new("a", "bold", "Stop")]),
                ProjectEvent::SelectHook(HookId::new("a").unwrap()),
            ],
        )
        .await
        .unwrap();
        id
    }

    fn lines(numbers: &[u32]) -> ContentOutput {
        ContentOutput {
            script: numbers
                .iter()
                .map(|n| ScriptLine {
                    line_number: *n,
                    speaker: None,
                    text: n.to_string(),
                    timing: None,
                    notes: None,
                })
                .collect(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn completes_project_with_normalized_output() {
        let (repo, collaborator, handler) = setup(MockCollaborator::new().with_output(lines(&[2, 1])));
        let id = generating_project(&repo).await;

        let outcome = handler
            .handle(GenerateContentCommand {
                project_id: Some(id),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(outcome.output.script[0].line_number, 1);
        let project = repo.get(&id).await.unwrap();
        assert_eq!(project.status(), ProjectStatus::Complete);
        assert!(project.agents().is_none());
        assert!(matches!(
            collaborator.get_calls()[0],
            MockCall::GenerateContent { choice: HookChoice::Single { .. }, .. }
        ));
    }

    #[tokio::test]
    async fn failure_leaves_project_generating_with_agents() {
        let (repo, _, handler) =
            setup(MockCollaborator::new().with_content_error(CollaboratorError::timeout(60)));
        let id = generating_project(&repo).await;

        let err = handler
            .handle(GenerateContentCommand {
                project_id: Some(id),
                ..Default::default()
            })
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::CollaboratorFailure);
        let project = repo.get(&id).await.unwrap();
        assert_eq!(project.status(), ProjectStatus::Generating);
        assert!(project.output().is_none());
        assert_eq!(project.agents().unwrap().len(), 6);
    }

    #[tokio::test]
    async fn project_not_generating_is_invalid_state() {
        let (repo, collaborator, handler) = setup(MockCollaborator::new());
        let id = repo.create().await.unwrap().id();

        let err = handler
            .handle(GenerateContentCommand {
                project_id: Some(id),
                inputs: UserInputs::with_topic("tea"),
                ..Default::default()
            })
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::InvalidState);
        assert_eq!(collaborator.call_count(), 0);
    }

    #[tokio::test]
    async fn stateless_generation_requires_choice() {
        let (_, _, handler) = setup(MockCollaborator::new());

        let err = handler
            .handle(GenerateContentCommand {
                inputs: UserInputs::with_topic("tea"),
                ..Default::default()
            })
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[tokio::test]
    async fn stateless_generation_returns_output() {
        let (repo, _, handler) = setup(MockCollaborator::new());
        let hook = match normalize_candidates(vec![HookCandidate::new("a", "bold", "Stop")]).unwrap() {
            HookSet::Single { mut hooks } => hooks.remove(0),
            _ => unreachable!(),
        };

        let outcome = handler
            .handle(GenerateContentCommand {
                project_id: None,
                inputs: UserInputs::with_topic("tea"),
                choice: Some(HookChoice::Single { hook }),
            })
            .await
            .unwrap();

        assert!(!outcome.output.script.is_empty());
        assert!(outcome.project.is_none());
        assert_eq!(repo.count().await.unwrap(), 0);
    }
}
