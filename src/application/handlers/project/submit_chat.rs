//! SubmitChatHandler - Command handler for one conversational turn.
//!
//! With a project id the turn is recorded: the user message, the assistant
//! reply and any extracted inputs are committed together. Without an id the
//! handler only relays to the collaborator.
//!
//! A collaborator failure is not an error for the caller. The creator gets a
//! fixed apology and nothing is committed.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::foundation::ProjectId;
use crate::domain::project::{ChatMessage, Project, ProjectError, ProjectEvent, UserInputs};
use crate::ports::{ChatRequest, ContentCollaborator, ProjectRepository};

/// Reply shown when the collaborator cannot answer.
pub const CHAT_APOLOGY: &str =
    "I apologize, but I'm having trouble processing your message. Please try again.";

/// Command to submit a chat message.
#[derive(Debug, Clone, Default)]
pub struct SubmitChatCommand {
    pub project_id: Option<ProjectId>,
    pub message: String,
    /// Prior transcript, used only when no project id is given.
    pub messages: Vec<ChatMessage>,
    /// Brief so far, merged over the project's own inputs when an id is given.
    pub inputs: UserInputs,
}

/// Result of a chat turn.
#[derive(Debug, Clone)]
pub struct ChatOutcome {
    pub reply: String,
    pub extracted_inputs: Option<UserInputs>,
    pub ready_for_hooks: bool,
    /// True when the reply is the apology fallback.
    pub fallback: bool,
    pub project: Option<Project>,
}

/// Handler for chat turns.
pub struct SubmitChatHandler {
    repository: Arc<dyn ProjectRepository>,
    collaborator: Arc<dyn ContentCollaborator>,
}

impl SubmitChatHandler {
    pub fn new(
        repository: Arc<dyn ProjectRepository>,
        collaborator: Arc<dyn ContentCollaborator>,
    ) -> Self {
        Self {
            repository,
            collaborator,
        }
    }

    pub async fn handle(&self, cmd: SubmitChatCommand) -> Result<ChatOutcome, ProjectError> {
        if cmd.message.trim().is_empty() {
            return Err(ProjectError::invalid_input("message", "Message is required"));
        }

        let existing = match cmd.project_id {
            Some(id) => Some(self.repository.get(&id).await?),
            None => None,
        };

        let request = match &existing {
            Some(project) => ChatRequest::new(cmd.message.clone())
                .with_history(project.messages().to_vec())
                .with_inputs(project.inputs().merged(cmd.inputs)),
            None => ChatRequest::new(cmd.message.clone())
                .with_history(cmd.messages)
                .with_inputs(cmd.inputs),
        };

        let reply = match self.collaborator.chat(request).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!(project_id = ?cmd.project_id, error = %e, "Chat failed, sending apology");
                return Ok(ChatOutcome {
                    reply: CHAT_APOLOGY.to_string(),
                    extracted_inputs: None,
                    ready_for_hooks: false,
                    fallback: true,
                    project: existing,
                });
            }
        };

        let project = match cmd.project_id {
            Some(id) => {
                let mut events = vec![
                    ProjectEvent::AppendMessage(ChatMessage::user(cmd.message)),
                    ProjectEvent::AppendMessage(ChatMessage::assistant(reply.reply.clone())),
                ];
                if let Some(extracted) = &reply.extracted_inputs {
                    events.push(ProjectEvent::MergeInputs(extracted.clone()));
                }
                let project = self.repository.apply_all(&id, events).await?;
                info!(
                    project_id = %id,
                    messages = project.messages().len(),
                    ready_for_hooks = reply.ready_for_hooks,
                    "Chat turn recorded"
                );
                Some(project)
            }
            None => None,
        };

        Ok(ChatOutcome {
            reply: reply.reply,
            extracted_inputs: reply.extracted_inputs,
            ready_for_hooks: reply.ready_for_hooks,
            fallback: false,
            project,
        })
    }
}
