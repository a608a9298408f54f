//! Progress records for the named generation sub-tasks.

use serde::{Deserialize, Serialize};

/// Progress of one agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AgentState {
    #[default]
    Pending,
    Working,
    Complete,
}

/// A named generation sub-task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentStatus {
    pub name: String,
    pub status: AgentState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task: Option<String>,
}

/// Agents shown while a content package is being produced.
pub const DEFAULT_AGENTS: [&str; 6] = [
    "Script Architect",
    "Hook Engineer",
    "Visual Director",
    "B-Roll Scout",
    "Tech Specialist",
    "Caption Writer",
];

impl AgentStatus {
    pub fn new(name: impl Into<String>, status: AgentState) -> Self {
        Self {
            name: name.into(),
            status,
            task: None,
        }
    }

    pub fn with_task(mut self, task: impl Into<String>) -> Self {
        self.task = Some(task.into());
        self
    }

    /// The default agent roster, all in `state`.
    pub fn roster(state: AgentState) -> Vec<AgentStatus> {
        DEFAULT_AGENTS
            .iter()
            .map(|name| AgentStatus::new(*name, state))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roster_has_six_distinct_agents() {
        let roster = AgentStatus::roster(AgentState::Working);
        assert_eq!(roster.len(), 6);
        assert!(roster.iter().all(|a| a.status == AgentState::Working));
        assert_eq!(roster[0].name, "Script Architect");
    }

    #[test]
    fn task_is_omitted_when_absent() {
        let json = serde_json::to_value(AgentStatus::new("B-Roll Scout", AgentState::Pending)).unwrap();
        assert!(json.get("task").is_none());
        assert_eq!(json["status"], "pending");
    }
}
