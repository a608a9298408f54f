//! Mock Content Collaborator for testing and offline development.
//!
//! Provides a configurable implementation of the ContentCollaborator port,
//! allowing tests and local runs to work without calling a real model.
//!
//! # Features
//!
//! - Pre-configured replies, hook lists and outputs (consumed in order)
//! - Deterministic sample data once the queues run dry
//! - Error injection for fallback testing
//! - Call tracking for verification
//!
//! # Example
//!
//! ```ignore
//! let collaborator = MockCollaborator::new()
//!     .with_chat_reply(ChatReply::new("Who is your audience?"))
//!     .with_hooks_error(CollaboratorError::timeout(30));
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::time::sleep;

use crate::domain::project::{
    BRollItem, Caption, ContentOutput, FlowMode, HookCandidate, HookChannel, HookChoice,
    HookDetails, ScriptLine, StoryboardFrame, TechSpecs, UserInputs,
};
use crate::ports::{ChatReply, ChatRequest, CollaboratorError, ContentCollaborator, ProviderInfo};

/// A recorded call.
#[derive(Debug, Clone, PartialEq)]
pub enum MockCall {
    Chat(ChatRequest),
    GenerateHooks { inputs: UserInputs, mode: FlowMode },
    GenerateContent { inputs: UserInputs, choice: HookChoice },
}

/// Mock collaborator.
#[derive(Debug, Clone, Default)]
pub struct MockCollaborator {
    chat_replies: Arc<Mutex<VecDeque<Result<ChatReply, CollaboratorError>>>>,
    hook_lists: Arc<Mutex<VecDeque<Result<Vec<HookCandidate>, CollaboratorError>>>>,
    outputs: Arc<Mutex<VecDeque<Result<ContentOutput, CollaboratorError>>>>,
    delay: Duration,
    calls: Arc<Mutex<Vec<MockCall>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MockCollaborator {
    /// Creates a mock with empty queues.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a chat reply.
    pub fn with_chat_reply(self, reply: ChatReply) -> Self {
        lock(&self.chat_replies).push_back(Ok(reply));
        self
    }

    /// Queues a chat failure.
    pub fn with_chat_error(self, error: CollaboratorError) -> Self {
        lock(&self.chat_replies).push_back(Err(error));
        self
    }

    /// Queues a hook candidate list.
    pub fn with_hooks(self, hooks: Vec<HookCandidate>) -> Self {
        lock(&self.hook_lists).push_back(Ok(hooks));
        self
    }

    /// Queues a hook generation failure.
    pub fn with_hooks_error(self, error: CollaboratorError) -> Self {
        lock(&self.hook_lists).push_back(Err(error));
        self
    }

    /// Queues a content package.
    pub fn with_output(self, output: ContentOutput) -> Self {
        lock(&self.outputs).push_back(Ok(output));
        self
    }

    /// Queues a content generation failure.
    pub fn with_content_error(self, error: CollaboratorError) -> Self {
        lock(&self.outputs).push_back(Err(error));
        self
    }

    /// Sets simulated latency per request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Returns the number of calls made.
    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    /// Returns all recorded calls.
    pub fn get_calls(&self) -> Vec<MockCall> {
        lock(&self.calls).clone()
    }

    /// Clears the call history.
    pub fn clear_calls(&self) {
        lock(&self.calls).clear();
    }

    async fn record(&self, call: MockCall) {
        lock(&self.calls).push(call);
        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }
    }
}

#[async_trait]
impl ContentCollaborator for MockCollaborator {
    async fn chat(&self, request: ChatRequest) -> Result<ChatReply, CollaboratorError> {
        let ready = request.inputs.has_topic();
        self.record(MockCall::Chat(request)).await;

        let next = lock(&self.chat_replies).pop_front();
        next.unwrap_or_else(|| {
            let reply = if ready {
                ChatReply::new("Sounds great. I have enough to suggest some hooks.").ready()
            } else {
                ChatReply::new("What is your video about?")
            };
            Ok(reply)
        })
    }

    async fn generate_hooks(
        &self,
        inputs: &UserInputs,
        mode: FlowMode,
    ) -> Result<Vec<HookCandidate>, CollaboratorError> {
        self.record(MockCall::GenerateHooks {
            inputs: inputs.clone(),
            mode,
        })
        .await;

        let next = lock(&self.hook_lists).pop_front();
        next.unwrap_or_else(|| Ok(sample_hooks(inputs, mode)))
    }

    async fn generate_content(
        &self,
        inputs: &UserInputs,
        choice: &HookChoice,
    ) -> Result<ContentOutput, CollaboratorError> {
        self.record(MockCall::GenerateContent {
            inputs: inputs.clone(),
            choice: choice.clone(),
        })
        .await;

        let next = lock(&self.outputs).pop_front();
        next.unwrap_or_else(|| Ok(sample_output(inputs, choice)))
    }

    fn provider_info(&self) -> ProviderInfo {
        ProviderInfo::new("mock", "mock-collaborator-1")
    }
}

fn topic_of(inputs: &UserInputs) -> &str {
    inputs.topic.as_deref().unwrap_or("your topic")
}

fn sample_hooks(inputs: &UserInputs, mode: FlowMode) -> Vec<HookCandidate> {
    let topic = topic_of(inputs);
    match mode {
        FlowMode::Single => vec![
            HookCandidate::new("hook-1", "question", format!("What nobody tells you about {}", topic))
                .with_rank(1),
            HookCandidate::new("hook-2", "statistic", format!("9 out of 10 people get {} wrong", topic))
                .with_rank(2),
            HookCandidate::new("hook-3", "story", format!("I spent a year on {}. Here's what happened", topic))
                .with_rank(3),
        ],
        FlowMode::Channels => vec![
            HookCandidate::new("text-1", "bold_claim", format!("{}: YOU'RE DOING IT WRONG", topic.to_uppercase()))
                .with_channel(HookChannel::Text),
            HookCandidate::new("text-2", "question", format!("Is {} worth it?", topic))
                .with_channel(HookChannel::Text),
            HookCandidate::new("verbal-1", "shared_emotion", format!("We've all struggled with {}", topic))
                .with_channel(HookChannel::Verbal)
                .with_details(HookDetails {
                    emotional_trigger: Some("empathy".to_string()),
                    retention_trigger: Some("promise of a fix".to_string()),
                    ..HookDetails::default()
                }),
            HookCandidate::new("visual-1", "reveal", format!("Slow push-in on {}", topic))
                .with_channel(HookChannel::Visual)
                .with_details(HookDetails {
                    scene_description: Some("Close-up, shallow depth of field".to_string()),
                    fiy_guide: Some("Phone on a stack of books, walk the camera forward".to_string()),
                    gen_ai_prompt: Some(format!("cinematic macro shot of {}, soft light", topic)),
                    ..HookDetails::default()
                }),
        ],
    }
}

fn sample_output(inputs: &UserInputs, choice: &HookChoice) -> ContentOutput {
    let opener = match choice {
        HookChoice::Single { hook } => hook.content.clone(),
        HookChoice::Channels { verbal, .. } => verbal.content.clone(),
    };
    let topic = topic_of(inputs);

    ContentOutput {
        script: vec![
            ScriptLine {
                line_number: 1,
                speaker: Some("Host".to_string()),
                text: opener,
                timing: Some("0:00-0:03".to_string()),
                notes: None,
            },
            ScriptLine {
                line_number: 2,
                speaker: Some("Host".to_string()),
                text: format!("Here are three things to know about {}.", topic),
                timing: Some("0:03-0:15".to_string()),
                notes: None,
            },
        ],
        storyboard: vec![StoryboardFrame {
            frame_number: 1,
            shot_type: "close-up".to_string(),
            description: format!("Host introduces {}", topic),
            duration: Some("3s".to_string()),
            visual_notes: None,
        }],
        tech_specs: TechSpecs {
            aspect_ratio: "9:16".to_string(),
            resolution: "1080x1920".to_string(),
            frame_rate: "30fps".to_string(),
            duration: inputs.duration.clone().unwrap_or_else(|| "30s".to_string()),
            audio_format: Some("AAC 48kHz".to_string()),
            export_format: Some("MP4 (H.264)".to_string()),
            platforms: inputs.platform.clone().into_iter().collect(),
        },
        b_roll: vec![BRollItem {
            id: "broll-1".to_string(),
            timestamp: Some("0:05".to_string()),
            description: format!("Detail shots of {}", topic),
            source: Some("stock".to_string()),
            keywords: vec![topic.to_string()],
        }],
        captions: vec![Caption {
            id: "caption-1".to_string(),
            timestamp: "0:00".to_string(),
            text: topic.to_string(),
            style: Some("bold".to_string()),
        }],
    }
}
