//! Route configuration for project endpoints.
//!
//! Configures Axum router with project-related routes.

use axum::routing::{get, patch, post, put};
use axum::Router;

use super::handlers::{
    append_message, chat, confirm_hooks, create_project, force_status, generate_content,
    generate_hooks, get_project, merge_inputs, select_hook, update_agent_status, update_agents,
    ProjectAppState,
};

/// Creates the project router with all endpoints.
///
/// Routes:
/// - `POST /api/projects` - Create a project
/// - `GET /api/projects/:id` - Get a project
/// - `POST /api/chat` - One conversational turn
/// - `POST /api/generate-hooks` - Generate ranked hooks
/// - `POST /api/generate-content` - Generate the content package
/// - `POST /api/projects/:id/select-hook` - Pick a hook
/// - `POST /api/projects/:id/confirm-hooks` - Confirm the channel overview
/// - `POST /api/projects/:id/messages` - Append a message
/// - `PATCH /api/projects/:id/inputs` - Merge inputs
/// - `PUT /api/projects/:id/agents` - Replace agents
/// - `PATCH /api/projects/:id/agents/:name` - Patch one agent
/// - `POST /api/projects/:id/status` - Force a status
pub fn project_router() -> Router<ProjectAppState> {
    Router::new()
        .route("/api/projects", post(create_project))
        .route("/api/projects/:id", get(get_project))
        .route("/api/chat", post(chat))
        .route("/api/generate-hooks", post(generate_hooks))
        .route("/api/generate-content", post(generate_content))
        .route("/api/projects/:id/select-hook", post(select_hook))
        .route("/api/projects/:id/confirm-hooks", post(confirm_hooks))
        .route("/api/projects/:id/messages", post(append_message))
        .route("/api/projects/:id/inputs", patch(merge_inputs))
        .route("/api/projects/:id/agents", put(update_agents))
        .route("/api/projects/:id/agents/:name", patch(update_agent_status))
        .route("/api/projects/:id/status", post(force_status))
}
