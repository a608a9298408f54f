//! Project observer port.
//!
//! Observers are notified synchronously after the client-side store commits
//! a change. They receive the committed project by reference and must not
//! block.

use crate::domain::project::Project;

/// Receives every committed project snapshot.
pub trait ProjectObserver: Send + Sync {
    fn on_change(&self, project: &Project);
}

impl<F> ProjectObserver for F
where
    F: Fn(&Project) + Send + Sync,
{
    fn on_change(&self, project: &Project) {
        self(project)
    }
}
