//! HTTP adapter for project endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    AppendMessageRequest, ChatRequestBody, ChatResponse, ContentResponse, ErrorResponse,
    ForceStatusRequest, GenerateContentRequest, GenerateHooksRequest, HooksResponse,
    SelectHookRequest, SelectedHooksBody, UpdateAgentStatusRequest, UpdateAgentsRequest,
};
pub use handlers::{ProjectApiError, ProjectAppState};
pub use routes::project_router;
