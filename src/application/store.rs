//! Project store - the client-side holder of a single project.
//!
//! The store owns exactly one [`Project`] and a list of observers. Every
//! change goes through [`ProjectStore::dispatch`], which runs the state
//! machine and commits only on success. Observers are then notified
//! synchronously, in subscription order, before `dispatch` returns.
//!
//! # Example
//!
//! ```ignore
//! let mut store = ProjectStore::new();
//! let id = store.subscribe(|p: &Project| println!("{}", p.status()));
//! store.merge_inputs(UserInputs::with_topic("sourdough"))?;
//! store.unsubscribe(id);
//! ```

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::domain::foundation::{HookId, ProjectId};
use crate::domain::project::{
    AgentState, AgentStatus, ChatMessage, ContentOutput, HookCandidate, Project, ProjectError,
    ProjectEvent, ProjectStatus, UserInputs,
};
use crate::ports::ProjectObserver;

/// Handle returned by [`ProjectStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Single-project store with synchronous change notification.
pub struct ProjectStore {
    project: Project,
    observers: Vec<(SubscriptionId, Arc<dyn ProjectObserver>)>,
    next_subscription: u64,
}

impl ProjectStore {
    /// Creates a store holding a fresh project.
    pub fn new() -> Self {
        Self {
            project: Project::new(ProjectId::new()),
            observers: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Returns the held project.
    pub fn project(&self) -> &Project {
        &self.project
    }

    /// Replaces the held project with a fresh one and returns it.
    pub fn create(&mut self) -> &Project {
        self.commit(Project::new(ProjectId::new()));
        &self.project
    }

    /// Same as [`create`](Self::create); used when the creator starts over.
    pub fn reset(&mut self) -> &Project {
        self.create()
    }

    /// Returns the held project if its id matches.
    pub fn get(&self, id: &ProjectId) -> Result<&Project, ProjectError> {
        if self.project.id() == *id {
            Ok(&self.project)
        } else {
            Err(ProjectError::not_found(*id))
        }
    }

    /// Applies an event. On error the held project is unchanged and no
    /// observer runs.
    pub fn dispatch(&mut self, event: ProjectEvent) -> Result<&Project, ProjectError> {
        let name = event.name();
        let next = self.project.apply(event)?;
        debug!(project_id = %next.id(), event = name, status = %next.status(), "Store committed");
        self.commit(next);
        Ok(&self.project)
    }

    /// Adopts an authoritative snapshot, typically the server's copy.
    pub fn reconcile(&mut self, project: Project) -> Result<&Project, ProjectError> {
        project.check_invariants()?;
        self.commit(project);
        Ok(&self.project)
    }

    /// Registers an observer.
    pub fn subscribe<O>(&mut self, observer: O) -> SubscriptionId
    where
        O: ProjectObserver + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((id, Arc::new(observer)));
        id
    }

    /// Removes an observer. Returns false if the id was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sid, _)| *sid != id);
        self.observers.len() != before
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    // === Convenience ===

    pub fn append_message(&mut self, message: ChatMessage) -> Result<&Project, ProjectError> {
        self.dispatch(ProjectEvent::AppendMessage(message))
    }

    pub fn merge_inputs(&mut self, partial: UserInputs) -> Result<&Project, ProjectError> {
        self.dispatch(ProjectEvent::MergeInputs(partial))
    }

    pub fn receive_hooks(&mut self, hooks: Vec<HookCandidate>) -> Result<&Project, ProjectError> {
        self.dispatch(ProjectEvent::ReceiveHooks(hooks))
    }

    pub fn select_hook(&mut self, hook_id: HookId) -> Result<&Project, ProjectError> {
        self.dispatch(ProjectEvent::SelectHook(hook_id))
    }

    pub fn confirm_hooks(&mut self) -> Result<&Project, ProjectError> {
        self.dispatch(ProjectEvent::ConfirmHooks)
    }

    pub fn receive_output(&mut self, output: ContentOutput) -> Result<&Project, ProjectError> {
        self.dispatch(ProjectEvent::ReceiveOutput(output))
    }

    pub fn update_agents(&mut self, agents: Vec<AgentStatus>) -> Result<&Project, ProjectError> {
        self.dispatch(ProjectEvent::UpdateAgents(agents))
    }

    pub fn update_agent_status(
        &mut self,
        name: impl Into<String>,
        status: AgentState,
        task: Option<String>,
    ) -> Result<&Project, ProjectError> {
        self.dispatch(ProjectEvent::UpdateAgentStatus {
            name: name.into(),
            status,
            task,
        })
    }

    pub fn force_status(&mut self, target: ProjectStatus) -> Result<&Project, ProjectError> {
        self.dispatch(ProjectEvent::ForceStatus(target))
    }

    fn commit(&mut self, project: Project) {
        self.project = project;
        for (_, observer) in &self.observers {
            observer.on_change(&self.project);
        }
    }
}

impl Default for ProjectStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ProjectStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProjectStore")
            .field("project", &self.project)
            .field("observers", &self.observers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::project::{ErrorKind, HookChannel};
    use std::sync::Mutex;

    fn recorder() -> (Arc<Mutex<Vec<ProjectStatus>>>, impl Fn(&Project) + Send + Sync) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        (seen, move |p: &Project| sink.lock().unwrap().push(p.status()))
    }

    fn hook(id: &str) -> HookId {
        HookId::new(id).unwrap()
    }

    #[test]
    fn starts_with_fresh_project() {
        let store = ProjectStore::new();
        assert_eq!(store.project().status(), ProjectStatus::Inputting);
        assert!(store.project().messages().is_empty());
    }

    #[test]
    fn get_checks_the_id() {
        let store = ProjectStore::new();
        let id = store.project().id();

        assert!(store.get(&id).is_ok());
        let err = store.get(&ProjectId::new()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn create_replaces_project_and_notifies() {
        let mut store = ProjectStore::new();
        let (seen, observer) = recorder();
        store.subscribe(observer);
        store.merge_inputs(UserInputs::with_topic("tea")).unwrap();
        let old = store.project().id();

        let new_id = store.create().id();

        assert_ne!(old, new_id);
        assert!(store.project().inputs().is_empty());
        assert_eq!(seen.lock().unwrap().len(), 2);
    }

    #[test]
    fn observers_run_before_dispatch_returns() {
        let mut store = ProjectStore::new();
        let (seen, observer) = recorder();
        store.subscribe(observer);

        store
            .receive_hooks(vec![HookCandidate::new("a", "bold", "Stop")])
            .unwrap();

        assert_eq!(*seen.lock().unwrap(), vec![ProjectStatus::HookSelection]);
    }

    #[test]
    fn observers_run_in_subscription_order() {
        let mut store = ProjectStore::new();
        let order = Arc::new(Mutex::new(Vec::new()));
        for n in 0..3 {
            let order = order.clone();
            store.subscribe(move |_: &Project| order.lock().unwrap().push(n));
        }

        store.append_message(ChatMessage::user("hi")).unwrap();

        assert_eq!(*order.lock().unwrap(), vec![0, 1, 2]);
    }

    #[test]
    fn failed_dispatch_leaves_project_and_skips_observers() {
        let mut store = ProjectStore::new();
        let (seen, observer) = recorder();
        store.subscribe(observer);
        let before = store.project().clone();

        let err = store.select_hook(hook("missing")).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::InvalidState);
        assert_eq!(store.project(), &before);
        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn unsubscribe_stops_notifications() {
        let mut store = ProjectStore::new();
        let (seen, observer) = recorder();
        let id = store.subscribe(observer);

        assert!(store.unsubscribe(id));
        assert!(!store.unsubscribe(id));
        store.append_message(ChatMessage::user("hi")).unwrap();

        assert!(seen.lock().unwrap().is_empty());
        assert_eq!(store.observer_count(), 0);
    }

    #[test]
    fn walks_the_channel_flow() {
        let mut store = ProjectStore::new();
        store
            .receive_hooks(vec![
                HookCandidate::new("t", "bold", "T").with_channel(HookChannel::Text),
                HookCandidate::new("v", "story", "V").with_channel(HookChannel::Verbal),
                HookCandidate::new("s", "reveal", "S").with_channel(HookChannel::Visual),
            ])
            .unwrap();

        store.select_hook(hook("t")).unwrap();
        store.select_hook(hook("v")).unwrap();
        store.select_hook(hook("s")).unwrap();
        assert_eq!(store.project().status(), ProjectStatus::HookOverview);

        store.confirm_hooks().unwrap();
        store
            .update_agents(AgentStatus::roster(AgentState::Working))
            .unwrap();
        store
            .update_agent_status("Script Architect", AgentState::Complete, None)
            .unwrap();
        store.receive_output(ContentOutput::default()).unwrap();

        assert_eq!(store.project().status(), ProjectStatus::Complete);
        assert!(store.project().agents().is_none());
    }

    #[test]
    fn reconcile_adopts_server_snapshot() {
        let mut store = ProjectStore::new();
        let (seen, observer) = recorder();
        store.subscribe(observer);
        let server = Project::new(ProjectId::new())
            .merge_inputs(UserInputs::with_topic("tea"))
            .unwrap();

        store.reconcile(server.clone()).unwrap();

        assert_eq!(store.project(), &server);
        assert_eq!(seen.lock().unwrap().len(), 1);
    }

    #[test]
    fn force_status_back_to_inputting() {
        let mut store = ProjectStore::new();
        store
            .receive_hooks(vec![HookCandidate::new("a", "bold", "Stop")])
            .unwrap();
        store.select_hook(hook("a")).unwrap();

        store.force_status(ProjectStatus::Inputting).unwrap();

        assert!(store.project().hooks().is_none());
        assert!(store.project().selected_hook().is_none());
    }
}
