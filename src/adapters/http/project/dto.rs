//! HTTP DTOs for project endpoints.
//!
//! Request bodies use the camelCase wire shape of the web client. Projects
//! are returned in their own serialized form.

use serde::{Deserialize, Serialize};

use crate::domain::project::{
    normalize_candidates, AgentState, AgentStatus, ChatMessage, ContentOutput, FlowMode, Hook,
    HookCandidate, HookChannel, HookChoice, HookSet, MessageRole, Project, ProjectError,
    ProjectStatus, UserInputs,
};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Request for one chat turn.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequestBody {
    #[serde(default)]
    pub project_id: Option<String>,
    pub message: String,
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
    #[serde(default)]
    pub inputs: UserInputs,
}

/// Request for hook generation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateHooksRequest {
    #[serde(default)]
    pub project_id: Option<String>,
    #[serde(default)]
    pub inputs: UserInputs,
    #[serde(default)]
    pub mode: FlowMode,
}

/// Channel picks sent by a client that holds its own state.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SelectedHooksBody {
    #[serde(default)]
    pub text: Option<HookCandidate>,
    #[serde(default)]
    pub verbal: Option<HookCandidate>,
    #[serde(default)]
    pub visual: Option<HookCandidate>,
}

/// Request for content generation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    #[serde(default)]
    pub project_id: Option<String>,
    #[serde(default)]
    pub inputs: UserInputs,
    #[serde(default)]
    pub selected_hook: Option<HookCandidate>,
    #[serde(default)]
    pub selected_hooks: Option<SelectedHooksBody>,
}

impl GenerateContentRequest {
    /// Builds the hook choice from the client's picks.
    ///
    /// A complete set of channel picks wins over a single hook. Each pick is
    /// normalized on its own, so missing rank and recommendation are filled
    /// the way received hooks are and ids may repeat across channels.
    pub fn hook_choice(&self) -> Result<Option<HookChoice>, ProjectError> {
        if let Some(picks) = &self.selected_hooks {
            if let (Some(text), Some(verbal), Some(visual)) =
                (&picks.text, &picks.verbal, &picks.visual)
            {
                return Ok(Some(HookChoice::Channels {
                    text: normalize_pick(text, Some(HookChannel::Text))?,
                    verbal: normalize_pick(verbal, Some(HookChannel::Verbal))?,
                    visual: normalize_pick(visual, Some(HookChannel::Visual))?,
                }));
            }
        }

        match &self.selected_hook {
            Some(hook) if hook.channel.is_some() => Err(ProjectError::invalid_input(
                "selectedHook",
                "A single hook must not carry a channel",
            )),
            Some(hook) => Ok(Some(HookChoice::Single {
                hook: normalize_pick(hook, None)?,
            })),
            None => Ok(None),
        }
    }
}

fn normalize_pick(
    pick: &HookCandidate,
    channel: Option<HookChannel>,
) -> Result<Hook, ProjectError> {
    let mut candidate = pick.clone();
    candidate.channel = None;

    match normalize_candidates(vec![candidate])? {
        HookSet::Single { hooks } => {
            let mut hook = hooks
                .into_iter()
                .next()
                .ok_or_else(|| ProjectError::invalid_input("selectedHook", "Hook is missing"))?;
            hook.channel = channel;
            Ok(hook)
        }
        HookSet::Channels { .. } => Err(ProjectError::invalid_input(
            "selectedHook",
            "Unexpected channel on hook",
        )),
    }
}

/// Request to pick a hook for the current stage.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectHookRequest {
    pub hook_id: String,
}

/// Request to append a message to the transcript.
#[derive(Debug, Clone, Deserialize)]
pub struct AppendMessageRequest {
    pub role: MessageRole,
    pub content: String,
}

/// Request to replace the agent roster.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateAgentsRequest {
    pub agents: Vec<AgentStatus>,
}

/// Request to patch one agent.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateAgentStatusRequest {
    pub status: AgentState,
    #[serde(default)]
    pub task: Option<String>,
}

/// Request to move a project to a status directly.
#[derive(Debug, Clone, Deserialize)]
pub struct ForceStatusRequest {
    pub status: ProjectStatus,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Response for a chat turn.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub response: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extracted_inputs: Option<UserInputs>,
    pub ready_for_hooks: bool,
    pub fallback: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<Project>,
}

/// Response for hook generation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HooksResponse {
    pub hooks: Vec<Hook>,
    pub fallback: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<Project>,
}

/// Response for content generation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentResponse {
    pub output: ContentOutput,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<Project>,
}

/// Standard error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new("BAD_REQUEST", message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new("INTERNAL_ERROR", message)
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::project::ErrorKind;

    #[test]
    fn chat_request_defaults_optional_fields() {
        let req: ChatRequestBody = serde_json::from_str(r#"{"message": "hi"}"#).unwrap();
        assert!(req.project_id.is_none());
        assert!(req.messages.is_empty());
        assert!(req.inputs.is_empty());
    }

    #[test]
    fn generate_hooks_request_reads_mode() {
        let req: GenerateHooksRequest =
            serde_json::from_str(r#"{"inputs": {"topic": "tea"}, "mode": "channels"}"#).unwrap();
        assert_eq!(req.mode, FlowMode::Channels);
        assert!(req.inputs.has_topic());
    }

    #[test]
    fn single_pick_becomes_single_choice() {
        let req: GenerateContentRequest = serde_json::from_str(
            r#"{"inputs": {"topic": "tea"}, "selectedHook": {"id": "a", "type": "bold", "text": "Stop"}}"#,
        )
        .unwrap();

        match req.hook_choice().unwrap() {
            Some(HookChoice::Single { hook }) => {
                assert_eq!(hook.content, "Stop");
                assert_eq!(hook.rank, 1);
            }
            other => panic!("unexpected choice {:?}", other),
        }
    }

    #[test]
    fn complete_channel_picks_become_channel_choice() {
        let req: GenerateContentRequest = serde_json::from_str(
            r#"{
                "selectedHook": {"id": "ignored", "type": "bold", "content": "x"},
                "selectedHooks": {
                    "text": {"id": "t", "type": "bold", "content": "T"},
                    "verbal": {"id": "v", "type": "story", "content": "V"},
                    "visual": {"id": "s", "type": "reveal", "content": "S"}
                }
            }"#,
        )
        .unwrap();

        assert!(matches!(
            req.hook_choice().unwrap(),
            Some(HookChoice::Channels { .. })
        ));
    }

    #[test]
    fn channel_picks_may_share_an_id() {
        let req: GenerateContentRequest = serde_json::from_str(
            r#"{
                "selectedHooks": {
                    "text": {"id": "1", "type": "bold", "content": "T"},
                    "verbal": {"id": "1", "type": "story", "content": "V"},
                    "visual": {"id": "1", "type": "reveal", "content": "S", "rank": 2}
                }
            }"#,
        )
        .unwrap();

        match req.hook_choice().unwrap() {
            Some(HookChoice::Channels { text, verbal, visual }) => {
                assert_eq!(text.channel, Some(HookChannel::Text));
                assert_eq!(verbal.content, "V");
                assert_eq!(visual.channel, Some(HookChannel::Visual));
                assert_eq!(visual.rank, 2);
                assert!(!visual.is_recommended);
            }
            other => panic!("unexpected choice {:?}", other),
        }
    }

    #[test]
    fn missing_picks_yield_no_choice() {
        let req: GenerateContentRequest = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(req.hook_choice().unwrap(), None);
    }

    #[test]
    fn zero_rank_pick_is_invalid() {
        let req: GenerateContentRequest = serde_json::from_str(
            r#"{"selectedHook": {"id": "a", "type": "bold", "content": "x", "rank": 0}}"#,
        )
        .unwrap();
        assert_eq!(req.hook_choice().unwrap_err().kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn error_response_omits_empty_details() {
        let json = serde_json::to_value(ErrorResponse::bad_request("nope")).unwrap();
        assert_eq!(json["code"], "BAD_REQUEST");
        assert!(json.get("details").is_none());
    }
}
