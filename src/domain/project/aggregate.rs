//! Project aggregate entity.
//!
//! A project is one content-creation workflow instance. Its fields only
//! change through the transitions in `machine.rs`, each of which returns a
//! new value and leaves the original untouched.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ProjectId, Timestamp};

use super::{
    AgentStatus, ChannelSelections, ChatMessage, ContentOutput, FlowMode, Hook, HookChannel,
    HookChoice, HookSet, ProjectError, ProjectStatus, UserInputs,
};

/// Project aggregate.
///
/// # Invariants
///
/// - `updated_at >= created_at`, and `updated_at` never decreases
/// - `messages` only grows
/// - selections exist only while hooks exist, and always point into them
/// - `output` is present exactly when `status` is `Complete`
/// - a channel stage has every earlier channel selected
/// - `Generating` and `Complete` have a full selection for the flow mode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub(super) id: ProjectId,
    pub(super) status: ProjectStatus,
    pub(super) messages: Vec<ChatMessage>,
    pub(super) inputs: UserInputs,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(super) hooks: Option<HookSet>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(super) selected_hook: Option<Hook>,
    #[serde(default)]
    pub(super) selected_hooks: ChannelSelections,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(super) output: Option<ContentOutput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(super) agents: Option<Vec<AgentStatus>>,
    pub(super) created_at: Timestamp,
    pub(super) updated_at: Timestamp,
}

impl Project {
    /// Creates an empty project in `Inputting`.
    pub fn new(id: ProjectId) -> Self {
        let now = Timestamp::now();
        Self {
            id,
            status: ProjectStatus::Inputting,
            messages: Vec::new(),
            inputs: UserInputs::default(),
            hooks: None,
            selected_hook: None,
            selected_hooks: ChannelSelections::default(),
            output: None,
            agents: None,
            created_at: now,
            updated_at: now,
        }
    }

    // Accessors

    pub fn id(&self) -> ProjectId {
        self.id
    }

    pub fn status(&self) -> ProjectStatus {
        self.status
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn inputs(&self) -> &UserInputs {
        &self.inputs
    }

    pub fn hooks(&self) -> Option<&HookSet> {
        self.hooks.as_ref()
    }

    pub fn selected_hook(&self) -> Option<&Hook> {
        self.selected_hook.as_ref()
    }

    pub fn selected_hooks(&self) -> &ChannelSelections {
        &self.selected_hooks
    }

    pub fn output(&self) -> Option<&ContentOutput> {
        self.output.as_ref()
    }

    pub fn agents(&self) -> Option<&[AgentStatus]> {
        self.agents.as_deref()
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    /// Flow mode of the current hook set, if hooks have been received.
    pub fn flow_mode(&self) -> Option<FlowMode> {
        self.hooks.as_ref().map(HookSet::mode)
    }

    /// True when every selection the flow needs has been made.
    pub fn selection_complete(&self) -> bool {
        match self.flow_mode() {
            Some(FlowMode::Single) => self.selected_hook.is_some(),
            Some(FlowMode::Channels) => self.selected_hooks.is_complete(),
            None => false,
        }
    }

    /// The selection content generation runs against, once complete.
    pub fn hook_choice(&self) -> Option<HookChoice> {
        match self.flow_mode()? {
            FlowMode::Single => self
                .selected_hook
                .clone()
                .map(|hook| HookChoice::Single { hook }),
            FlowMode::Channels => {
                let s = &self.selected_hooks;
                Some(HookChoice::Channels {
                    text: s.text.clone()?,
                    verbal: s.verbal.clone()?,
                    visual: s.visual.clone()?,
                })
            }
        }
    }

    /// Checks every structural invariant.
    ///
    /// Transitions preserve these by construction; this is for state that
    /// arrives from outside, such as a server snapshot.
    pub fn check_invariants(&self) -> Result<(), ProjectError> {
        let broken = |msg: &str| Err(ProjectError::invalid_state(msg.to_string()));

        if self.updated_at.is_before(&self.created_at) {
            return broken("updatedAt precedes createdAt");
        }

        match &self.hooks {
            None => {
                if self.selected_hook.is_some() || !self.selected_hooks.is_empty() {
                    return broken("selection present without hooks");
                }
            }
            Some(set) => {
                if let Some(hook) = &self.selected_hook {
                    if set.find(None, &hook.id) != Some(hook) {
                        return broken("selected hook is not in the hook set");
                    }
                }
                for channel in HookChannel::ALL {
                    if let Some(hook) = self.selected_hooks.get(channel) {
                        if set.find(Some(channel), &hook.id) != Some(hook) {
                            return broken("channel selection is not in the hook set");
                        }
                    }
                }
            }
        }

        if self.output.is_some() != (self.status == ProjectStatus::Complete) {
            return broken("output must be present exactly when complete");
        }

        match self.status {
            ProjectStatus::Inputting => {
                if self.hooks.is_some() {
                    return broken("hooks present while inputting");
                }
            }
            ProjectStatus::HookSelection
            | ProjectStatus::HookText
            | ProjectStatus::HookVerbal
            | ProjectStatus::HookVisual
            | ProjectStatus::HookOverview => {
                if self.flow_mode() != self.status.flow_mode() {
                    return broken("hook stage does not match the hook set");
                }
                let required: &[HookChannel] = match self.status {
                    ProjectStatus::HookOverview => &HookChannel::ALL,
                    status => status.channel().map(|c| c.preceding()).unwrap_or(&[]),
                };
                if required.iter().any(|c| self.selected_hooks.get(*c).is_none()) {
                    return broken("earlier channel selection missing");
                }
            }
            ProjectStatus::Generating | ProjectStatus::Complete => {
                if !self.selection_complete() {
                    return broken("generation requires a complete selection");
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_project_starts_empty_in_inputting() {
        let project = Project::new(ProjectId::new());

        assert_eq!(project.status(), ProjectStatus::Inputting);
        assert!(project.messages().is_empty());
        assert!(project.inputs().is_empty());
        assert!(project.hooks().is_none());
        assert!(project.output().is_none());
        assert!(project.agents().is_none());
        assert_eq!(project.created_at(), project.updated_at());
        assert!(project.check_invariants().is_ok());
    }

    #[test]
    fn new_project_has_no_choice() {
        let project = Project::new(ProjectId::new());
        assert!(!project.selection_complete());
        assert!(project.hook_choice().is_none());
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let project = Project::new(ProjectId::new());
        let json = serde_json::to_value(&project).unwrap();

        assert_eq!(json["status"], "inputting");
        assert!(json.get("createdAt").is_some());
        assert!(json.get("updatedAt").is_some());
        assert!(json.get("selectedHooks").is_some());
        assert!(json.get("output").is_none());
    }

    #[test]
    fn round_trips_through_json() {
        let project = Project::new(ProjectId::new());
        let json = serde_json::to_string(&project).unwrap();
        let back: Project = serde_json::from_str(&json).unwrap();
        assert_eq!(back, project);
    }

    #[test]
    fn complete_without_output_breaks_invariants() {
        let mut project = Project::new(ProjectId::new());
        project.status = ProjectStatus::Complete;
        assert!(project.check_invariants().is_err());
    }
}
