//! Gemini Collaborator - Implementation of ContentCollaborator for Google's Gemini API.
//!
//! Every operation is a single `generateContent` call with JSON response mode
//! enabled. The model is told the exact JSON shape to return and the reply is
//! parsed with serde into domain types.
//!
//! # Configuration
//!
//! ```ignore
//! let config = GeminiConfig::new(api_key)
//!     .with_model("gemini-2.5-flash")
//!     .with_timeout(Duration::from_secs(60));
//!
//! let collaborator = GeminiCollaborator::new(config)?;
//! ```

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

use crate::domain::project::{
    ChatMessage, ContentOutput, FlowMode, Hook, HookCandidate, HookChoice, MessageRole, UserInputs,
};
use crate::ports::{ChatReply, ChatRequest, CollaboratorError, ContentCollaborator, ProviderInfo};

/// Configuration for the Gemini collaborator.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API key for authentication.
    api_key: Secret<String>,
    /// Model to use (e.g., "gemini-2.5-flash").
    pub model: String,
    /// Base URL for the API.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
    /// Sampling temperature.
    pub temperature: f32,
}

impl GeminiConfig {
    /// Creates a new configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model: "gemini-2.5-flash".to_string(),
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            timeout: Duration::from_secs(60),
            temperature: 0.8,
        }
    }

    /// Sets the model to use.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

const CHAT_INSTRUCTIONS: &str = "You are a creative director helping a creator plan a short-form video. \
Ask one focused question at a time about topic, audience, platform, goal, tone, duration and style. \
Respond with JSON: {\"response\": string, \"extractedInputs\": object with any of topic, audience, platform, goal, tone, duration, style, keyPoints, \"readyForHooks\": boolean}. \
Set readyForHooks to true once topic, audience and platform are known.";

const SINGLE_HOOKS_INSTRUCTIONS: &str = "You write scroll-stopping opening hooks for short-form video. \
Respond with JSON: {\"hooks\": [{\"id\": string, \"type\": string, \"content\": string, \"preview\": string, \"rank\": integer starting at 1, \"isRecommended\": boolean}]}. \
Return five hooks ranked best first.";

const CHANNEL_HOOKS_INSTRUCTIONS: &str = "You write opening hooks for short-form video across three channels. \
Respond with JSON: {\"hooks\": [{\"id\": string, \"channel\": \"text\" | \"verbal\" | \"visual\", \"type\": string, \"content\": string, \"rank\": integer starting at 1 within its channel, \"isRecommended\": boolean, \
\"emotionalTrigger\": string (verbal only), \"retentionTrigger\": string (verbal only), \
\"sceneDescription\": string (visual only), \"fiyGuide\": string (visual only), \"genAiPrompt\": string (visual only)}]}. \
Return three hooks per channel.";

const CONTENT_INSTRUCTIONS: &str = "You are a video production team. Write the full production package for the brief and hook(s). \
Respond with JSON: {\"script\": [{\"lineNumber\", \"speaker\", \"text\", \"timing\", \"notes\"}], \
\"storyboard\": [{\"frameNumber\", \"shotType\", \"description\", \"duration\", \"visualNotes\"}], \
\"techSpecs\": {\"aspectRatio\", \"resolution\", \"frameRate\", \"duration\", \"audioFormat\", \"exportFormat\", \"platforms\"}, \
\"bRoll\": [{\"id\", \"timestamp\", \"description\", \"source\", \"keywords\"}], \
\"captions\": [{\"id\", \"timestamp\", \"text\", \"style\"}]}.";

/// Gemini API collaborator.
pub struct GeminiCollaborator {
    config: GeminiConfig,
    client: Client,
}

impl GeminiCollaborator {
    /// Creates a new Gemini collaborator with the given configuration.
    pub fn new(config: GeminiConfig) -> Result<Self, CollaboratorError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| CollaboratorError::unavailable(format!("HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    fn generate_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }

    fn build_request(&self, instructions: &str, contents: Vec<GeminiContent>) -> GeminiRequest {
        GeminiRequest {
            system_instruction: GeminiContent::text(None, instructions),
            contents,
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
                temperature: self.config.temperature,
            },
        }
    }

    /// Sends a request and parses the model's JSON answer into `T`.
    async fn generate<T: DeserializeOwned>(
        &self,
        request: &GeminiRequest,
    ) -> Result<T, CollaboratorError> {
        let response = self
            .client
            .post(self.generate_url())
            .header("x-goog-api-key", self.config.api_key())
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    CollaboratorError::timeout(self.config.timeout.as_secs())
                } else if e.is_connect() {
                    CollaboratorError::network(format!("Connection failed: {}", e))
                } else {
                    CollaboratorError::network(e.to_string())
                }
            })?;

        let response = Self::handle_response_status(response).await?;
        let body: GeminiResponse = response
            .json()
            .await
            .map_err(|e| CollaboratorError::invalid_response(format!("Failed to parse response: {}", e)))?;

        let text = body.text().ok_or_else(|| {
            CollaboratorError::invalid_response("Response contained no candidate text")
        })?;
        debug!(model = %self.config.model, chars = text.len(), "Gemini response received");

        parse_json_answer(&text)
    }

    /// Parses the API response status and handles errors.
    async fn handle_response_status(response: Response) -> Result<Response, CollaboratorError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let retry_after = response
            .headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u32>().ok());
        let error_body = response.text().await.unwrap_or_default();
        warn!(status = %status, "Gemini request failed");

        match status.as_u16() {
            401 | 403 => Err(CollaboratorError::AuthenticationFailed),
            429 => Err(CollaboratorError::rate_limited(retry_after.unwrap_or(60))),
            400 => Err(CollaboratorError::invalid_response(format!(
                "Request rejected: {}",
                error_body
            ))),
            500..=599 => Err(CollaboratorError::unavailable(format!(
                "Server error {}: {}",
                status, error_body
            ))),
            _ => Err(CollaboratorError::network(format!(
                "Unexpected status {}: {}",
                status, error_body
            ))),
        }
    }
}

#[async_trait]
impl ContentCollaborator for GeminiCollaborator {
    async fn chat(&self, request: ChatRequest) -> Result<ChatReply, CollaboratorError> {
        let mut contents: Vec<GeminiContent> = request.history.iter().map(GeminiContent::from).collect();
        contents.push(GeminiContent::text(
            Some("user"),
            format!(
                "Known so far: {}\n\n{}",
                inputs_json(&request.inputs),
                request.message
            ),
        ));

        let reply: ChatReply = self
            .generate(&self.build_request(CHAT_INSTRUCTIONS, contents))
            .await?;
        if reply.reply.trim().is_empty() {
            return Err(CollaboratorError::invalid_response("Empty chat reply"));
        }
        Ok(reply)
    }

    async fn generate_hooks(
        &self,
        inputs: &UserInputs,
        mode: FlowMode,
    ) -> Result<Vec<HookCandidate>, CollaboratorError> {
        let instructions = match mode {
            FlowMode::Single => SINGLE_HOOKS_INSTRUCTIONS,
            FlowMode::Channels => CHANNEL_HOOKS_INSTRUCTIONS,
        };
        let prompt = format!("Creative brief: {}", inputs_json(inputs));

        let envelope: HooksEnvelope = self
            .generate(&self.build_request(instructions, vec![GeminiContent::text(Some("user"), prompt)]))
            .await?;
        Ok(envelope.hooks)
    }

    async fn generate_content(
        &self,
        inputs: &UserInputs,
        choice: &HookChoice,
    ) -> Result<ContentOutput, CollaboratorError> {
        let prompt = format!(
            "Creative brief: {}\n\n{}",
            inputs_json(inputs),
            describe_choice(choice)
        );

        let envelope: ContentEnvelope = self
            .generate(&self.build_request(
                CONTENT_INSTRUCTIONS,
                vec![GeminiContent::text(Some("user"), prompt)],
            ))
            .await?;
        Ok(envelope.into_output())
    }

    fn provider_info(&self) -> ProviderInfo {
        ProviderInfo::new("gemini", self.config.model.clone())
    }
}

fn inputs_json(inputs: &UserInputs) -> String {
    serde_json::to_string(inputs).unwrap_or_else(|_| "{}".to_string())
}

fn describe_hook(label: &str, hook: &Hook) -> String {
    format!("{} hook ({}): {}", label, hook.hook_type, hook.content)
}

fn describe_choice(choice: &HookChoice) -> String {
    match choice {
        HookChoice::Single { hook } => describe_hook("Opening", hook),
        HookChoice::Channels {
            text,
            verbal,
            visual,
        } => [
            describe_hook("On-screen text", text),
            describe_hook("Spoken", verbal),
            describe_hook("Visual", visual),
        ]
        .join("\n"),
    }
}

/// Strips an optional markdown fence and parses the JSON body.
fn parse_json_answer<T: DeserializeOwned>(text: &str) -> Result<T, CollaboratorError> {
    let trimmed = text.trim();
    let body = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.trim_end().strip_suffix("```"))
        .unwrap_or(trimmed);

    serde_json::from_str(body.trim())
        .map_err(|e| CollaboratorError::invalid_response(format!("Model returned invalid JSON: {}", e)))
}

// Gemini API types

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    system_instruction: GeminiContent,
    contents: Vec<GeminiContent>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
    temperature: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

impl GeminiContent {
    fn text(role: Option<&str>, text: impl Into<String>) -> Self {
        Self {
            role: role.map(str::to_string),
            parts: vec![GeminiPart {
                text: Some(text.into()),
            }],
        }
    }
}

impl From<&ChatMessage> for GeminiContent {
    fn from(message: &ChatMessage) -> Self {
        let role = match message.role {
            MessageRole::User => "user",
            MessageRole::Assistant => "model",
        };
        GeminiContent::text(Some(role), message.content.clone())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct GeminiPart {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiContent>,
}

impl GeminiResponse {
    /// Concatenated text of the first candidate.
    fn text(self) -> Option<String> {
        let content = self.candidates.into_iter().next()?.content?;
        let text: String = content.parts.into_iter().filter_map(|p| p.text).collect();
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

#[derive(Debug, Deserialize)]
struct HooksEnvelope {
    #[serde(default)]
    hooks: Vec<HookCandidate>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ContentEnvelope {
    Wrapped { output: ContentOutput },
    Bare(ContentOutput),
}

impl ContentEnvelope {
    fn into_output(self) -> ContentOutput {
        match self {
            ContentEnvelope::Wrapped { output } | ContentEnvelope::Bare(output) => output,
        }
    }
}
