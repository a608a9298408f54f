//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! The server side runs the workflow handlers against a repository; the
//! client side holds one project in a [`ProjectStore`].

pub mod handlers;
pub mod store;

pub use handlers::{
    ApplyProjectEventCommand, ApplyProjectEventHandler, ChatOutcome, ContentOutcome,
    CreateProjectHandler, GenerateContentCommand, GenerateContentHandler, GenerateHooksCommand,
    GenerateHooksHandler, GetProjectHandler, GetProjectQuery, HooksOutcome, SelectHookCommand,
    SelectHookHandler, SubmitChatCommand, SubmitChatHandler, CHAT_APOLOGY,
};
pub use store::{ProjectStore, SubscriptionId};
