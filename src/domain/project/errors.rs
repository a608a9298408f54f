//! Project-specific error types.

use crate::domain::foundation::{
    DomainError, ErrorCode, HookId, InvalidTransition, ProjectId, ValidationError,
};

use super::ProjectStatus;

/// Coarse classification of a [`ProjectError`].
///
/// Adapters map on this rather than on individual variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidInput,
    NotFound,
    InvalidState,
    CollaboratorFailure,
    Internal,
}

/// Project-specific errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectError {
    /// Malformed or missing input.
    InvalidInput { field: String, message: String },
    /// Project id is unknown to the repository.
    ProjectNotFound(ProjectId),
    /// Hook id is not among the current stage's candidates.
    HookNotFound(HookId),
    /// No agent with this name in the current list.
    AgentNotFound(String),
    /// Operation is not permitted in the project's current status.
    InvalidState(String),
    /// The generative collaborator failed or returned garbage.
    CollaboratorFailure(String),
    /// Infrastructure error.
    Infrastructure(String),
}

impl ProjectError {
    pub fn invalid_input(field: impl Into<String>, message: impl Into<String>) -> Self {
        ProjectError::InvalidInput {
            field: field.into(),
            message: message.into(),
        }
    }
    pub fn not_found(id: ProjectId) -> Self {
        ProjectError::ProjectNotFound(id)
    }
    pub fn hook_not_found(id: HookId) -> Self {
        ProjectError::HookNotFound(id)
    }
    pub fn agent_not_found(name: impl Into<String>) -> Self {
        ProjectError::AgentNotFound(name.into())
    }
    pub fn invalid_state(message: impl Into<String>) -> Self {
        ProjectError::InvalidState(message.into())
    }
    pub fn collaborator(message: impl Into<String>) -> Self {
        ProjectError::CollaboratorFailure(message.into())
    }
    pub fn infrastructure(message: impl Into<String>) -> Self {
        ProjectError::Infrastructure(message.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ProjectError::InvalidInput { .. } => ErrorKind::InvalidInput,
            ProjectError::ProjectNotFound(_)
            | ProjectError::HookNotFound(_)
            | ProjectError::AgentNotFound(_) => ErrorKind::NotFound,
            ProjectError::InvalidState(_) => ErrorKind::InvalidState,
            ProjectError::CollaboratorFailure(_) => ErrorKind::CollaboratorFailure,
            ProjectError::Infrastructure(_) => ErrorKind::Internal,
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            ProjectError::InvalidInput { .. } => ErrorCode::ValidationFailed,
            ProjectError::ProjectNotFound(_) => ErrorCode::ProjectNotFound,
            ProjectError::HookNotFound(_) => ErrorCode::HookNotFound,
            ProjectError::AgentNotFound(_) => ErrorCode::AgentNotFound,
            ProjectError::InvalidState(_) => ErrorCode::InvalidStateTransition,
            ProjectError::CollaboratorFailure(_) => ErrorCode::CollaboratorError,
            ProjectError::Infrastructure(_) => ErrorCode::StorageError,
        }
    }

    pub fn message(&self) -> String {
        match self {
            ProjectError::InvalidInput { field, message } => {
                format!("Invalid input for '{}': {}", field, message)
            }
            ProjectError::ProjectNotFound(id) => format!("Project not found: {}", id),
            ProjectError::HookNotFound(id) => format!("Hook not found: {}", id),
            ProjectError::AgentNotFound(name) => format!("Agent not found: {}", name),
            ProjectError::InvalidState(msg) => format!("Invalid state: {}", msg),
            ProjectError::CollaboratorFailure(msg) => format!("Generation failed: {}", msg),
            ProjectError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for ProjectError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ProjectError {}

impl From<ValidationError> for ProjectError {
    fn from(err: ValidationError) -> Self {
        ProjectError::InvalidInput {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}

impl From<InvalidTransition<ProjectStatus>> for ProjectError {
    fn from(err: InvalidTransition<ProjectStatus>) -> Self {
        ProjectError::InvalidState(format!(
            "Cannot move from {} to {}",
            err.from, err.to
        ))
    }
}

impl From<DomainError> for ProjectError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ValidationFailed
            | ErrorCode::EmptyField
            | ErrorCode::OutOfRange
            | ErrorCode::InvalidFormat => ProjectError::InvalidInput {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.message,
            },
            ErrorCode::InvalidStateTransition => ProjectError::InvalidState(err.message),
            ErrorCode::CollaboratorError => ProjectError::CollaboratorFailure(err.message),
            _ => ProjectError::Infrastructure(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_variants_share_a_kind() {
        assert_eq!(ProjectError::not_found(ProjectId::new()).kind(), ErrorKind::NotFound);
        assert_eq!(
            ProjectError::hook_not_found(HookId::new("h1").unwrap()).kind(),
            ErrorKind::NotFound
        );
        assert_eq!(ProjectError::agent_not_found("Hook Engineer").kind(), ErrorKind::NotFound);
    }

    #[test]
    fn codes_are_specific() {
        assert_eq!(
            ProjectError::hook_not_found(HookId::new("h1").unwrap()).code(),
            ErrorCode::HookNotFound
        );
        assert_eq!(
            ProjectError::invalid_state("nope").code(),
            ErrorCode::InvalidStateTransition
        );
    }

    #[test]
    fn validation_error_becomes_invalid_input() {
        let err: ProjectError = ValidationError::empty_field("topic").into();
        assert_eq!(
            err,
            ProjectError::InvalidInput {
                field: "topic".to_string(),
                message: "Field 'topic' cannot be empty".to_string(),
            }
        );
    }

    #[test]
    fn invalid_transition_becomes_invalid_state() {
        let err: ProjectError = InvalidTransition {
            from: ProjectStatus::Inputting,
            to: ProjectStatus::Complete,
        }
        .into();
        assert_eq!(err.kind(), ErrorKind::InvalidState);
        assert!(err.message().contains("inputting"));
    }

    #[test]
    fn domain_error_keeps_field_detail() {
        let err: ProjectError = DomainError::validation("message", "Message is required").into();
        assert!(matches!(err, ProjectError::InvalidInput { ref field, .. } if field == "message"));
    }

    #[test]
    fn display_uses_message() {
        let err = ProjectError::collaborator("timeout");
        assert_eq!(err.to_string(), "Generation failed: timeout");
    }
}
