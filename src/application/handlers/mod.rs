//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod project;

pub use project::{
    ApplyProjectEventCommand, ApplyProjectEventHandler, ChatOutcome, ContentOutcome,
    CreateProjectHandler, GenerateContentCommand, GenerateContentHandler, GenerateHooksCommand,
    GenerateHooksHandler, GetProjectHandler, GetProjectQuery, HooksOutcome, SelectHookCommand,
    SelectHookHandler, SubmitChatCommand, SubmitChatHandler, CHAT_APOLOGY,
};
