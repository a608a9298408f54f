//! Workflow transitions.
//!
//! Each transition takes `&self` and returns either a new project or an
//! error. On error nothing has changed. On success `updated_at` has been
//! bumped.

use tracing::debug;

use crate::domain::foundation::{HookId, StateMachine};

use super::{
    normalize_candidates, AgentState, AgentStatus, ChannelSelections, ChatMessage, ContentOutput,
    FlowMode, HookCandidate, HookChannel, Project, ProjectError, ProjectEvent, ProjectStatus,
    UserInputs,
};

impl Project {
    /// Applies one event, dispatching to the matching transition.
    pub fn apply(&self, event: ProjectEvent) -> Result<Project, ProjectError> {
        match event {
            ProjectEvent::AppendMessage(message) => self.append_message(message),
            ProjectEvent::MergeInputs(partial) => self.merge_inputs(partial),
            ProjectEvent::ReceiveHooks(candidates) => self.receive_hooks(candidates),
            ProjectEvent::SelectHook(id) => self.select_hook(&id),
            ProjectEvent::ConfirmHooks => self.confirm_hooks(),
            ProjectEvent::ReceiveOutput(output) => self.receive_output(output),
            ProjectEvent::UpdateAgents(agents) => self.update_agents(agents),
            ProjectEvent::UpdateAgentStatus { name, status, task } => {
                self.update_agent_status(&name, status, task)
            }
            ProjectEvent::ForceStatus(target) => self.force_status(target),
        }
    }

    /// Appends a transcript entry. Allowed in every status.
    pub fn append_message(&self, message: ChatMessage) -> Result<Project, ProjectError> {
        let mut next = self.clone();
        next.messages.push(message);
        Ok(next.touched())
    }

    /// Shallow-merges a partial brief. Allowed in every status.
    pub fn merge_inputs(&self, partial: UserInputs) -> Result<Project, ProjectError> {
        let mut next = self.clone();
        next.inputs.merge(partial);
        Ok(next.touched())
    }

    /// Replaces the hook set and starts a new selection pass.
    ///
    /// Any previous selections, output and agent progress are discarded.
    pub fn receive_hooks(&self, candidates: Vec<HookCandidate>) -> Result<Project, ProjectError> {
        let set = normalize_candidates(candidates)?;
        let stage = ProjectStatus::first_hook_stage(set.mode());

        let mut next = self.clone();
        next.clear_selections();
        next.output = None;
        next.agents = None;
        next.hooks = Some(set);
        next.status = stage;

        debug!(project_id = %self.id, from = %self.status, to = %stage, "Hooks received");
        Ok(next.touched())
    }

    /// Selects a hook for the current selection stage and advances.
    pub fn select_hook(&self, hook_id: &HookId) -> Result<Project, ProjectError> {
        let hooks = self
            .hooks
            .as_ref()
            .ok_or_else(|| ProjectError::invalid_state("No hooks have been received"))?;

        if !hooks.iter().any(|h| &h.id == hook_id) {
            return Err(ProjectError::hook_not_found(hook_id.clone()));
        }
        if !self.status.is_selection_stage() {
            return Err(ProjectError::invalid_state(format!(
                "Cannot select a hook while {}",
                self.status
            )));
        }

        let channel = self.status.channel();
        let candidates = hooks.candidates(channel).ok_or_else(|| {
            ProjectError::invalid_state(format!(
                "Status {} does not match the {:?} hook set",
                self.status,
                hooks.mode()
            ))
        })?;
        let hook = candidates
            .iter()
            .find(|h| &h.id == hook_id)
            .cloned()
            .ok_or_else(|| ProjectError::hook_not_found(hook_id.clone()))?;

        let mut next = self.clone();
        let target = match channel {
            None => {
                next.selected_hook = Some(hook);
                ProjectStatus::Generating
            }
            Some(channel) => {
                next.selected_hooks.set(channel, Some(hook));
                channel
                    .next()
                    .map(ProjectStatus::for_channel)
                    .unwrap_or(ProjectStatus::HookOverview)
            }
        };
        next.status = self.status.transition_to(target)?;

        debug!(project_id = %self.id, hook_id = %hook_id, to = %next.status, "Hook selected");
        Ok(next.touched())
    }

    /// Confirms the three channel selections and moves to generation.
    pub fn confirm_hooks(&self) -> Result<Project, ProjectError> {
        if self.status != ProjectStatus::HookOverview {
            return Err(ProjectError::invalid_state(format!(
                "Hooks can only be confirmed from {}, not {}",
                ProjectStatus::HookOverview,
                self.status
            )));
        }
        if !self.selected_hooks.is_complete() {
            return Err(ProjectError::invalid_state(
                "Every channel needs a selected hook before confirming",
            ));
        }

        let mut next = self.clone();
        next.status = self.status.transition_to(ProjectStatus::Generating)?;
        Ok(next.touched())
    }

    /// Stores the generated package and completes the project.
    pub fn receive_output(&self, output: ContentOutput) -> Result<Project, ProjectError> {
        if !self.selection_complete() {
            return Err(ProjectError::invalid_state(
                "Output requires a complete hook selection",
            ));
        }

        let mut next = self.clone();
        next.status = self.status.transition_to(ProjectStatus::Complete)?;
        next.output = Some(output.normalized());
        next.agents = None;

        debug!(project_id = %self.id, "Output received");
        Ok(next.touched())
    }

    /// Replaces the agent progress list.
    pub fn update_agents(&self, agents: Vec<AgentStatus>) -> Result<Project, ProjectError> {
        for (i, agent) in agents.iter().enumerate() {
            if agent.name.trim().is_empty() {
                return Err(ProjectError::invalid_input("agents", "Agent name cannot be empty"));
            }
            if agents[..i].iter().any(|a| a.name == agent.name) {
                return Err(ProjectError::invalid_input(
                    "agents",
                    format!("Duplicate agent '{}'", agent.name),
                ));
            }
        }

        let mut next = self.clone();
        next.agents = Some(agents);
        Ok(next.touched())
    }

    /// Patches one agent by name. `task` is replaced, including with `None`.
    pub fn update_agent_status(
        &self,
        name: &str,
        status: AgentState,
        task: Option<String>,
    ) -> Result<Project, ProjectError> {
        let mut next = self.clone();
        let agent = next
            .agents
            .as_mut()
            .and_then(|agents| agents.iter_mut().find(|a| a.name == name))
            .ok_or_else(|| ProjectError::agent_not_found(name))?;

        agent.status = status;
        agent.task = task;
        Ok(next.touched())
    }

    /// Moves to an arbitrary status, used when the user goes back to edit.
    ///
    /// The target's prerequisites must already hold. Data that belongs to
    /// later stages is cleared so the project stays consistent.
    pub fn force_status(&self, target: ProjectStatus) -> Result<Project, ProjectError> {
        let mut next = self.clone();

        match target {
            ProjectStatus::Inputting => {
                next.hooks = None;
                next.clear_selections();
                next.output = None;
                next.agents = None;
            }
            ProjectStatus::HookSelection => {
                self.require_mode(FlowMode::Single, target)?;
                next.output = None;
                next.agents = None;
            }
            ProjectStatus::HookText | ProjectStatus::HookVerbal | ProjectStatus::HookVisual => {
                self.require_mode(FlowMode::Channels, target)?;
                let channel = target
                    .channel()
                    .ok_or_else(|| ProjectError::invalid_state("Not a channel stage"))?;
                self.require_channels(channel.preceding(), target)?;
                for later in channel.following() {
                    next.selected_hooks.set(*later, None);
                }
                next.output = None;
                next.agents = None;
            }
            ProjectStatus::HookOverview => {
                self.require_mode(FlowMode::Channels, target)?;
                self.require_channels(&HookChannel::ALL, target)?;
                next.output = None;
                next.agents = None;
            }
            ProjectStatus::Generating => {
                if !self.selection_complete() {
                    return Err(ProjectError::invalid_state(
                        "Cannot generate without a complete hook selection",
                    ));
                }
                next.output = None;
            }
            ProjectStatus::Complete => {
                if self.output.is_none() {
                    return Err(ProjectError::invalid_state(
                        "Cannot complete a project without output",
                    ));
                }
            }
        }

        next.status = target;
        debug!(project_id = %self.id, from = %self.status, to = %target, "Status forced");
        Ok(next.touched())
    }

    fn require_mode(&self, mode: FlowMode, target: ProjectStatus) -> Result<(), ProjectError> {
        if self.flow_mode() == Some(mode) {
            Ok(())
        } else {
            Err(ProjectError::invalid_state(format!(
                "{} needs a {:?} hook set",
                target, mode
            )))
        }
    }

    fn require_channels(
        &self,
        channels: &[HookChannel],
        target: ProjectStatus,
    ) -> Result<(), ProjectError> {
        match channels.iter().find(|c| self.selected_hooks.get(**c).is_none()) {
            None => Ok(()),
            Some(missing) => Err(ProjectError::invalid_state(format!(
                "{} needs a selected {} hook",
                target, missing
            ))),
        }
    }

    fn clear_selections(&mut self) {
        self.selected_hook = None;
        self.selected_hooks = ChannelSelections::default();
    }

    fn touched(mut self) -> Self {
        self.updated_at = self.updated_at.advance();
        self
    }
}
