//! Project status state machine.
//!
//! The guarded graph covers forward progress only. Hook regeneration and
//! user-driven edits re-enter earlier stages through their own operations.

use crate::domain::foundation::StateMachine;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{FlowMode, HookChannel};

/// Stage of the content-creation workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    /// Conversational input gathering.
    #[default]
    Inputting,

    /// Picking one hook from a single ranked list.
    HookSelection,

    /// Picking the text hook.
    HookText,

    /// Picking the verbal hook.
    HookVerbal,

    /// Picking the visual hook.
    HookVisual,

    /// Reviewing all three channel selections before generation.
    HookOverview,

    /// Waiting for the content package.
    Generating,

    /// Content package delivered.
    Complete,
}

impl ProjectStatus {
    /// Every status, in pipeline order.
    pub const ALL: [ProjectStatus; 8] = [
        ProjectStatus::Inputting,
        ProjectStatus::HookSelection,
        ProjectStatus::HookText,
        ProjectStatus::HookVerbal,
        ProjectStatus::HookVisual,
        ProjectStatus::HookOverview,
        ProjectStatus::Generating,
        ProjectStatus::Complete,
    ];

    /// The first selection stage for a flow mode.
    pub fn first_hook_stage(mode: FlowMode) -> Self {
        match mode {
            FlowMode::Single => ProjectStatus::HookSelection,
            FlowMode::Channels => ProjectStatus::HookText,
        }
    }

    /// The selection stage for a channel.
    pub fn for_channel(channel: HookChannel) -> Self {
        match channel {
            HookChannel::Text => ProjectStatus::HookText,
            HookChannel::Verbal => ProjectStatus::HookVerbal,
            HookChannel::Visual => ProjectStatus::HookVisual,
        }
    }

    /// The channel selected in this stage, if it is a channel stage.
    pub fn channel(&self) -> Option<HookChannel> {
        match self {
            ProjectStatus::HookText => Some(HookChannel::Text),
            ProjectStatus::HookVerbal => Some(HookChannel::Verbal),
            ProjectStatus::HookVisual => Some(HookChannel::Visual),
            _ => None,
        }
    }

    /// Flow mode this status belongs to, for hook stages only.
    pub fn flow_mode(&self) -> Option<FlowMode> {
        match self {
            ProjectStatus::HookSelection => Some(FlowMode::Single),
            ProjectStatus::HookText
            | ProjectStatus::HookVerbal
            | ProjectStatus::HookVisual
            | ProjectStatus::HookOverview => Some(FlowMode::Channels),
            _ => None,
        }
    }

    /// True for statuses in which `select_hook` is accepted.
    pub fn is_selection_stage(&self) -> bool {
        matches!(
            self,
            ProjectStatus::HookSelection
                | ProjectStatus::HookText
                | ProjectStatus::HookVerbal
                | ProjectStatus::HookVisual
        )
    }

    /// Statuses a project passes through in the given flow.
    pub fn pipeline(mode: FlowMode) -> &'static [ProjectStatus] {
        match mode {
            FlowMode::Single => &[
                ProjectStatus::Inputting,
                ProjectStatus::HookSelection,
                ProjectStatus::Generating,
                ProjectStatus::Complete,
            ],
            FlowMode::Channels => &[
                ProjectStatus::Inputting,
                ProjectStatus::HookText,
                ProjectStatus::HookVerbal,
                ProjectStatus::HookVisual,
                ProjectStatus::HookOverview,
                ProjectStatus::Generating,
                ProjectStatus::Complete,
            ],
        }
    }

    /// Human-readable label for progress displays.
    pub fn label(&self) -> &'static str {
        match self {
            ProjectStatus::Inputting => "Gathering Inputs",
            ProjectStatus::HookSelection => "Hook Selection",
            ProjectStatus::HookText => "Text Hook",
            ProjectStatus::HookVerbal => "Verbal Hook",
            ProjectStatus::HookVisual => "Visual Hook",
            ProjectStatus::HookOverview => "Review Hooks",
            ProjectStatus::Generating => "Generating Content",
            ProjectStatus::Complete => "Complete",
        }
    }

    /// Wire name of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Inputting => "inputting",
            ProjectStatus::HookSelection => "hook_selection",
            ProjectStatus::HookText => "hook_text",
            ProjectStatus::HookVerbal => "hook_verbal",
            ProjectStatus::HookVisual => "hook_visual",
            ProjectStatus::HookOverview => "hook_overview",
            ProjectStatus::Generating => "generating",
            ProjectStatus::Complete => "complete",
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl StateMachine for ProjectStatus {
    fn valid_transitions(&self) -> Vec<Self> {
        use ProjectStatus::*;
        match self {
            Inputting => vec![HookSelection, HookText],
            HookSelection => vec![Generating],
            HookText => vec![HookVerbal],
            HookVerbal => vec![HookVisual],
            HookVisual => vec![HookOverview],
            HookOverview => vec![Generating],
            Generating => vec![Complete],
            Complete => vec![],
        }
    }
}
