//! Project command and query handlers.

mod apply_event;
mod create_project;
mod generate_content;
mod generate_hooks;
mod get_project;
mod select_hook;
mod submit_chat;

pub use apply_event::{ApplyProjectEventCommand, ApplyProjectEventHandler};
pub use create_project::CreateProjectHandler;
pub use generate_content::{ContentOutcome, GenerateContentCommand, GenerateContentHandler};
pub use generate_hooks::{GenerateHooksCommand, GenerateHooksHandler, HooksOutcome};
pub use get_project::{GetProjectHandler, GetProjectQuery};
pub use select_hook::{SelectHookCommand, SelectHookHandler};
pub use submit_chat::{ChatOutcome, SubmitChatCommand, SubmitChatHandler, CHAT_APOLOGY};
