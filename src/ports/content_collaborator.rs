//! Content Collaborator Port - Interface for the generative service.
//!
//! The collaborator holds the conversation with the creator, proposes hooks
//! and writes the final content package. It never touches projects; the
//! application handlers decide what to commit.
//!
//! # Example
//!
//! ```ignore
//! let reply = collaborator
//!     .chat(ChatRequest::new("A video about sourdough").with_inputs(inputs))
//!     .await?;
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::project::{
    ChatMessage, ContentOutput, FlowMode, HookCandidate, HookChoice, ProjectError, UserInputs,
};

/// Port for the generative collaborator.
#[async_trait]
pub trait ContentCollaborator: Send + Sync {
    /// One conversational turn.
    async fn chat(&self, request: ChatRequest) -> Result<ChatReply, CollaboratorError>;

    /// Propose hook candidates for the brief.
    ///
    /// In [`FlowMode::Channels`] every candidate carries a channel.
    async fn generate_hooks(
        &self,
        inputs: &UserInputs,
        mode: FlowMode,
    ) -> Result<Vec<HookCandidate>, CollaboratorError>;

    /// Produce the content package for the brief and chosen hook(s).
    async fn generate_content(
        &self,
        inputs: &UserInputs,
        choice: &HookChoice,
    ) -> Result<ContentOutput, CollaboratorError>;

    /// Provider name and model, for logs.
    fn provider_info(&self) -> ProviderInfo;
}

/// One chat turn sent to the collaborator.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatRequest {
    /// The new user message.
    pub message: String,
    /// Prior transcript, oldest first.
    pub history: Vec<ChatMessage>,
    /// Brief gathered so far.
    pub inputs: UserInputs,
}

impl ChatRequest {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            history: Vec::new(),
            inputs: UserInputs::default(),
        }
    }

    pub fn with_history(mut self, history: Vec<ChatMessage>) -> Self {
        self.history = history;
        self
    }

    pub fn with_inputs(mut self, inputs: UserInputs) -> Self {
        self.inputs = inputs;
        self
    }
}

/// The collaborator's answer to a chat turn.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatReply {
    /// Assistant message shown to the creator.
    #[serde(alias = "response")]
    pub reply: String,
    /// Brief fields picked up from the conversation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extracted_inputs: Option<UserInputs>,
    /// True once the brief is rich enough to propose hooks.
    #[serde(default)]
    pub ready_for_hooks: bool,
}

impl ChatReply {
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            ..Self::default()
        }
    }

    pub fn with_extracted(mut self, inputs: UserInputs) -> Self {
        self.extracted_inputs = Some(inputs);
        self
    }

    pub fn ready(mut self) -> Self {
        self.ready_for_hooks = true;
        self
    }
}

/// Provider information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderInfo {
    /// Provider name (e.g., "gemini", "mock").
    pub name: String,
    /// Model identifier.
    pub model: String,
}

impl ProviderInfo {
    pub fn new(name: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            model: model.into(),
        }
    }
}

/// Collaborator errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CollaboratorError {
    /// Service is unavailable.
    #[error("collaborator unavailable: {message}")]
    Unavailable {
        /// Error details.
        message: String,
    },

    /// Request timed out.
    #[error("request timed out after {timeout_secs}s")]
    Timeout {
        /// Configured timeout.
        timeout_secs: u64,
    },

    /// Rate limited by the provider.
    #[error("rate limited: retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds until retry is allowed.
        retry_after_secs: u32,
    },

    /// Response could not be parsed into the expected shape.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// API key rejected.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Network error during request.
    #[error("network error: {0}")]
    Network(String),
}

impl CollaboratorError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    pub fn timeout(timeout_secs: u64) -> Self {
        Self::Timeout { timeout_secs }
    }

    pub fn rate_limited(retry_after_secs: u32) -> Self {
        Self::RateLimited { retry_after_secs }
    }

    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::InvalidResponse(message.into())
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Whether a caller might reasonably try again.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Unavailable { .. } | Self::Timeout { .. } | Self::RateLimited { .. } | Self::Network(_)
        )
    }
}

impl From<CollaboratorError> for ProjectError {
    fn from(err: CollaboratorError) -> Self {
        ProjectError::CollaboratorFailure(err.to_string())
    }
}
