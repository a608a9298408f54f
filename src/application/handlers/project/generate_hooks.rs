//! GenerateHooksHandler - Command handler for hook generation.
//!
//! A collaborator failure, an empty list or a malformed list degrades to an
//! empty result with `fallback` set. The project is only touched when a
//! usable hook set arrived.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::foundation::ProjectId;
use crate::domain::project::{
    normalize_candidates, FlowMode, Hook, HookCandidate, HookSet, Project, ProjectError,
    ProjectEvent, UserInputs,
};
use crate::ports::{ContentCollaborator, ProjectRepository};

/// Command to generate hooks.
#[derive(Debug, Clone, Default)]
pub struct GenerateHooksCommand {
    pub project_id: Option<ProjectId>,
    /// Brief, merged over the project's own inputs when an id is given.
    pub inputs: UserInputs,
    pub mode: FlowMode,
}

/// Result of hook generation.
#[derive(Debug, Clone)]
pub struct HooksOutcome {
    /// Normalized hooks; channel lists are concatenated text, verbal, visual.
    pub hooks: Vec<Hook>,
    pub fallback: bool,
    pub project: Option<Project>,
}

/// Handler for hook generation.
pub struct GenerateHooksHandler {
    repository: Arc<dyn ProjectRepository>,
    collaborator: Arc<dyn ContentCollaborator>,
}

impl GenerateHooksHandler {
    pub fn new(
        repository: Arc<dyn ProjectRepository>,
        collaborator: Arc<dyn ContentCollaborator>,
    ) -> Self {
        Self {
            repository,
            collaborator,
        }
    }

    pub async fn handle(&self, cmd: GenerateHooksCommand) -> Result<HooksOutcome, ProjectError> {
        let existing = match cmd.project_id {
            Some(id) => Some(self.repository.get(&id).await?),
            None => None,
        };
        let inputs = match &existing {
            Some(project) => project.inputs().merged(cmd.inputs),
            None => cmd.inputs,
        };

        if !inputs.has_topic() {
            return Err(ProjectError::invalid_input(
                "topic",
                "Topic is required to generate hooks",
            ));
        }

        let candidates = match self.collaborator.generate_hooks(&inputs, cmd.mode).await {
            Ok(candidates) if !candidates.is_empty() => candidates,
            Ok(_) => {
                warn!(project_id = ?cmd.project_id, "Collaborator returned no hooks");
                return Ok(Self::fallback(existing));
            }
            Err(e) => {
                warn!(project_id = ?cmd.project_id, error = %e, "Hook generation failed");
                return Ok(Self::fallback(existing));
            }
        };

        match cmd.project_id {
            Some(id) => self.commit(id, candidates, existing).await,
            None => match normalize_candidates(candidates) {
                Ok(set) => Ok(HooksOutcome {
                    hooks: flatten(&set),
                    fallback: false,
                    project: None,
                }),
                Err(e) => {
                    warn!(error = %e, "Collaborator returned malformed hooks");
                    Ok(Self::fallback(None))
                }
            },
        }
    }

    async fn commit(
        &self,
        id: ProjectId,
        candidates: Vec<HookCandidate>,
        existing: Option<Project>,
    ) -> Result<HooksOutcome, ProjectError> {
        match self
            .repository
            .apply(&id, ProjectEvent::ReceiveHooks(candidates))
            .await
        {
            Ok(project) => {
                let hooks = project.hooks().map(flatten).unwrap_or_default();
                info!(
                    project_id = %id,
                    hooks = hooks.len(),
                    status = %project.status(),
                    "Hooks received"
                );
                Ok(HooksOutcome {
                    hooks,
                    fallback: false,
                    project: Some(project),
                })
            }
            Err(ProjectError::InvalidInput { message, .. }) => {
                warn!(project_id = %id, reason = %message, "Collaborator returned malformed hooks");
                Ok(Self::fallback(existing))
            }
            Err(e) => Err(e),
        }
    }

    fn fallback(project: Option<Project>) -> HooksOutcome {
        HooksOutcome {
            hooks: Vec::new(),
            fallback: true,
            project,
        }
    }
}

fn flatten(set: &HookSet) -> Vec<Hook> {
    set.iter().cloned().collect()
}
