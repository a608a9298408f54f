//! Workflow events accepted by [`Project::apply`](super::Project::apply).

use serde::{Deserialize, Serialize};

use crate::domain::foundation::HookId;

use super::{AgentState, AgentStatus, ChatMessage, ContentOutput, HookCandidate, ProjectStatus, UserInputs};

/// A single mutation request against a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum ProjectEvent {
    AppendMessage(ChatMessage),
    MergeInputs(UserInputs),
    ReceiveHooks(Vec<HookCandidate>),
    SelectHook(HookId),
    ConfirmHooks,
    ReceiveOutput(ContentOutput),
    UpdateAgents(Vec<AgentStatus>),
    UpdateAgentStatus {
        name: String,
        status: AgentState,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        task: Option<String>,
    },
    ForceStatus(ProjectStatus),
}

impl ProjectEvent {
    /// Event name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            ProjectEvent::AppendMessage(_) => "append_message",
            ProjectEvent::MergeInputs(_) => "merge_inputs",
            ProjectEvent::ReceiveHooks(_) => "receive_hooks",
            ProjectEvent::SelectHook(_) => "select_hook",
            ProjectEvent::ConfirmHooks => "confirm_hooks",
            ProjectEvent::ReceiveOutput(_) => "receive_output",
            ProjectEvent::UpdateAgents(_) => "update_agents",
            ProjectEvent::UpdateAgentStatus { .. } => "update_agent_status",
            ProjectEvent::ForceStatus(_) => "force_status",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn events_are_adjacently_tagged() {
        let event: ProjectEvent =
            serde_json::from_value(json!({"type": "select_hook", "payload": "hook-1"})).unwrap();
        assert_eq!(event, ProjectEvent::SelectHook(HookId::new("hook-1").unwrap()));
        assert_eq!(event.name(), "select_hook");
    }

    #[test]
    fn unit_event_needs_no_payload() {
        let event: ProjectEvent = serde_json::from_value(json!({"type": "confirm_hooks"})).unwrap();
        assert_eq!(event, ProjectEvent::ConfirmHooks);
    }

    #[test]
    fn agent_status_event_parses_optional_task() {
        let event: ProjectEvent = serde_json::from_value(json!({
            "type": "update_agent_status",
            "payload": {"name": "Caption Writer", "status": "working"}
        }))
        .unwrap();

        assert_eq!(
            event,
            ProjectEvent::UpdateAgentStatus {
                name: "Caption Writer".to_string(),
                status: AgentState::Working,
                task: None,
            }
        );
    }
}
