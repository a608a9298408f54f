//! HTTP handlers for project endpoints.
//!
//! These handlers connect Axum routes to the workflow handlers of the
//! application layer.

use std::sync::Arc;

use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tracing::error;

use crate::application::handlers::project::{
    ApplyProjectEventCommand, ApplyProjectEventHandler, CreateProjectHandler,
    GenerateContentCommand, GenerateContentHandler, GenerateHooksCommand, GenerateHooksHandler,
    GetProjectHandler, GetProjectQuery, SelectHookCommand, SelectHookHandler, SubmitChatCommand,
    SubmitChatHandler,
};
use crate::domain::foundation::{HookId, ProjectId};
use crate::domain::project::{ChatMessage, ErrorKind, ProjectError, ProjectEvent, UserInputs};
use crate::ports::{ContentCollaborator, ProjectRepository};

use super::dto::{
    AppendMessageRequest, ChatRequestBody, ChatResponse, ContentResponse, ErrorResponse,
    ForceStatusRequest, GenerateContentRequest, GenerateHooksRequest, HooksResponse,
    SelectHookRequest, UpdateAgentStatusRequest, UpdateAgentsRequest,
};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state containing all dependencies.
#[derive(Clone)]
pub struct ProjectAppState {
    pub repository: Arc<dyn ProjectRepository>,
    pub collaborator: Arc<dyn ContentCollaborator>,
}

impl ProjectAppState {
    pub fn new(
        repository: Arc<dyn ProjectRepository>,
        collaborator: Arc<dyn ContentCollaborator>,
    ) -> Self {
        Self {
            repository,
            collaborator,
        }
    }

    pub fn create_project_handler(&self) -> CreateProjectHandler {
        CreateProjectHandler::new(self.repository.clone())
    }

    pub fn get_project_handler(&self) -> GetProjectHandler {
        GetProjectHandler::new(self.repository.clone())
    }

    pub fn apply_event_handler(&self) -> ApplyProjectEventHandler {
        ApplyProjectEventHandler::new(self.repository.clone())
    }

    pub fn select_hook_handler(&self) -> SelectHookHandler {
        SelectHookHandler::new(self.repository.clone())
    }

    pub fn submit_chat_handler(&self) -> SubmitChatHandler {
        SubmitChatHandler::new(self.repository.clone(), self.collaborator.clone())
    }

    pub fn generate_hooks_handler(&self) -> GenerateHooksHandler {
        GenerateHooksHandler::new(self.repository.clone(), self.collaborator.clone())
    }

    pub fn generate_content_handler(&self) -> GenerateContentHandler {
        GenerateContentHandler::new(self.repository.clone(), self.collaborator.clone())
    }

    async fn apply(&self, id: &str, event: ProjectEvent) -> Result<Response, ProjectApiError> {
        let cmd = ApplyProjectEventCommand {
            project_id: parse_project_id(id)?,
            event,
        };
        let project = self.apply_event_handler().handle(cmd).await?;
        Ok((StatusCode::OK, Json(project)).into_response())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Project endpoints
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/projects - Create a new project
pub async fn create_project(
    State(state): State<ProjectAppState>,
) -> Result<impl IntoResponse, ProjectApiError> {
    let project = state.create_project_handler().handle().await?;
    Ok((StatusCode::CREATED, Json(project)))
}

/// GET /api/projects/:id - Get a project
pub async fn get_project(
    State(state): State<ProjectAppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ProjectApiError> {
    let query = GetProjectQuery {
        project_id: parse_project_id(&id)?,
    };
    let project = state.get_project_handler().handle(query).await?;
    Ok((StatusCode::OK, Json(project)))
}

/// POST /api/projects/:id/select-hook - Pick a hook for the current stage
pub async fn select_hook(
    State(state): State<ProjectAppState>,
    Path(id): Path<String>,
    Json(request): Json<SelectHookRequest>,
) -> Result<impl IntoResponse, ProjectApiError> {
    let cmd = SelectHookCommand {
        project_id: parse_project_id(&id)?,
        hook_id: HookId::new(request.hook_id).map_err(ProjectError::from)?,
    };
    let project = state.select_hook_handler().handle(cmd).await?;
    Ok((StatusCode::OK, Json(project)))
}

/// POST /api/projects/:id/confirm-hooks - Confirm the channel overview
pub async fn confirm_hooks(
    State(state): State<ProjectAppState>,
    Path(id): Path<String>,
) -> Result<Response, ProjectApiError> {
    state.apply(&id, ProjectEvent::ConfirmHooks).await
}

/// POST /api/projects/:id/messages - Append a transcript message
pub async fn append_message(
    State(state): State<ProjectAppState>,
    Path(id): Path<String>,
    Json(request): Json<AppendMessageRequest>,
) -> Result<Response, ProjectApiError> {
    let message = ChatMessage::new(request.role, request.content);
    state.apply(&id, ProjectEvent::AppendMessage(message)).await
}

/// PATCH /api/projects/:id/inputs - Merge partial inputs
pub async fn merge_inputs(
    State(state): State<ProjectAppState>,
    Path(id): Path<String>,
    Json(inputs): Json<UserInputs>,
) -> Result<Response, ProjectApiError> {
    state.apply(&id, ProjectEvent::MergeInputs(inputs)).await
}

/// PUT /api/projects/:id/agents - Replace the agent roster
pub async fn update_agents(
    State(state): State<ProjectAppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateAgentsRequest>,
) -> Result<Response, ProjectApiError> {
    state
        .apply(&id, ProjectEvent::UpdateAgents(request.agents))
        .await
}

/// PATCH /api/projects/:id/agents/:name - Patch one agent
pub async fn update_agent_status(
    State(state): State<ProjectAppState>,
    Path((id, name)): Path<(String, String)>,
    Json(request): Json<UpdateAgentStatusRequest>,
) -> Result<Response, ProjectApiError> {
    let event = ProjectEvent::UpdateAgentStatus {
        name,
        status: request.status,
        task: request.task,
    };
    state.apply(&id, event).await
}

/// POST /api/projects/:id/status - Move a project to an earlier stage for editing
pub async fn force_status(
    State(state): State<ProjectAppState>,
    Path(id): Path<String>,
    Json(request): Json<ForceStatusRequest>,
) -> Result<Response, ProjectApiError> {
    state
        .apply(&id, ProjectEvent::ForceStatus(request.status))
        .await
}

// ════════════════════════════════════════════════════════════════════════════════
// Collaborator endpoints
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/chat - One conversational turn
pub async fn chat(
    State(state): State<ProjectAppState>,
    Json(request): Json<ChatRequestBody>,
) -> Result<impl IntoResponse, ProjectApiError> {
    let cmd = SubmitChatCommand {
        project_id: parse_optional_id(request.project_id.as_deref())?,
        message: request.message,
        messages: request.messages,
        inputs: request.inputs,
    };
    let outcome = state.submit_chat_handler().handle(cmd).await?;

    Ok(Json(ChatResponse {
        response: outcome.reply,
        extracted_inputs: outcome.extracted_inputs,
        ready_for_hooks: outcome.ready_for_hooks,
        fallback: outcome.fallback,
        project: outcome.project,
    }))
}

/// POST /api/generate-hooks - Generate ranked hooks
pub async fn generate_hooks(
    State(state): State<ProjectAppState>,
    Json(request): Json<GenerateHooksRequest>,
) -> Result<impl IntoResponse, ProjectApiError> {
    let cmd = GenerateHooksCommand {
        project_id: parse_optional_id(request.project_id.as_deref())?,
        inputs: request.inputs,
        mode: request.mode,
    };
    let outcome = state.generate_hooks_handler().handle(cmd).await?;

    Ok(Json(HooksResponse {
        hooks: outcome.hooks,
        fallback: outcome.fallback,
        project: outcome.project,
    }))
}

/// POST /api/generate-content - Generate the content package
pub async fn generate_content(
    State(state): State<ProjectAppState>,
    Json(request): Json<GenerateContentRequest>,
) -> Result<impl IntoResponse, ProjectApiError> {
    let project_id = parse_optional_id(request.project_id.as_deref())?;
    let choice = match project_id {
        Some(_) => None,
        None => request.hook_choice()?,
    };
    let cmd = GenerateContentCommand {
        project_id,
        inputs: request.inputs,
        choice,
    };
    let outcome = state.generate_content_handler().handle(cmd).await?;

    Ok(Json(ContentResponse {
        output: outcome.output,
        project: outcome.project,
    }))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts to HTTP responses.
#[derive(Debug)]
pub enum ProjectApiError {
    BadRequest(String),
    Domain(ProjectError),
}

impl From<ProjectError> for ProjectApiError {
    fn from(err: ProjectError) -> Self {
        ProjectApiError::Domain(err)
    }
}

impl IntoResponse for ProjectApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ProjectApiError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, ErrorResponse::bad_request(msg))
            }
            ProjectApiError::Domain(err) => {
                let status = status_for(err.kind());
                if status.is_server_error() {
                    error!(code = %err.code(), error = %err, "Request failed");
                }
                let mut body = ErrorResponse::new(err.code().to_string(), err.message());
                if let ProjectError::InvalidInput { field, .. } = &err {
                    body = body.with_details(json!({ "field": field }));
                }
                (status, body)
            }
        };

        (status, Json(body)).into_response()
    }
}

fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::InvalidInput => StatusCode::BAD_REQUEST,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::InvalidState => StatusCode::CONFLICT,
        ErrorKind::CollaboratorFailure => StatusCode::BAD_GATEWAY,
        ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn parse_project_id(raw: &str) -> Result<ProjectId, ProjectApiError> {
    raw.parse::<ProjectId>()
        .map_err(|_| ProjectApiError::BadRequest("Invalid project ID format".to_string()))
}

fn parse_optional_id(raw: Option<&str>) -> Result<Option<ProjectId>, ProjectApiError> {
    raw.map(parse_project_id).transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_input_maps_to_400() {
        let response =
            ProjectApiError::from(ProjectError::invalid_input("topic", "missing")).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn not_found_maps_to_404() {
        let response = ProjectApiError::from(ProjectError::not_found(ProjectId::new())).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn invalid_state_maps_to_409() {
        let response =
            ProjectApiError::from(ProjectError::invalid_state("not yet")).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn collaborator_failure_maps_to_502() {
        let response = ProjectApiError::from(ProjectError::collaborator("down")).into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn infrastructure_maps_to_500() {
        let response =
            ProjectApiError::from(ProjectError::infrastructure("disk")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn malformed_id_is_bad_request() {
        assert!(matches!(
            parse_project_id("not-a-uuid"),
            Err(ProjectApiError::BadRequest(_))
        ));
        assert_eq!(parse_optional_id(None).unwrap(), None);
    }
}
