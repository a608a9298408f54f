//! Project module - the content-creation workflow.
//!
//! A project walks from input gathering through hook selection (single
//! list or text/verbal/visual channels) to a generated content package.
//! All mutation goes through [`Project::apply`] or the transition methods
//! it dispatches to.

mod agent;
mod aggregate;
mod errors;
mod events;
mod hook;
mod inputs;
mod machine;
mod message;
mod output;
mod status;

pub use agent::{AgentState, AgentStatus, DEFAULT_AGENTS};
pub use aggregate::Project;
pub use errors::{ErrorKind, ProjectError};
pub use events::ProjectEvent;
pub use hook::{
    normalize_candidates, ChannelSelections, FlowMode, Hook, HookCandidate, HookChannel,
    HookChoice, HookDetails, HookSet,
};
pub use inputs::UserInputs;
pub use message::{ChatMessage, MessageRole};
pub use output::{BRollItem, Caption, ContentOutput, ScriptLine, StoryboardFrame, TechSpecs};
pub use status::ProjectStatus;
