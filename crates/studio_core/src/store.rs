use tracing::warn;

use crate::{
    command::{self, Outcome, ProjectCommand},
    project::Project,
};

/// Owner of the current project. Readers borrow it; every write goes through
/// [`ProjectStore::dispatch`] or [`ProjectStore::replace`].
#[derive(Debug, Clone)]
pub struct ProjectStore {
    project: Project,
    revision: u64,
}

impl Default for ProjectStore {
    fn default() -> Self {
        Self::new(Project::new())
    }
}

impl ProjectStore {
    pub fn new(project: Project) -> Self {
        Self {
            project,
            revision: 0,
        }
    }

    pub fn project(&self) -> &Project {
        &self.project
    }

    /// Bumped on every accepted change.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn replace(&mut self, project: Project) {
        self.project = project;
        self.revision += 1;
    }

    pub fn dispatch(&mut self, command: ProjectCommand) -> Outcome {
        let label = command.to_string();
        let outcome = command::apply(&mut self.project, command);
        match &outcome {
            Outcome::Changed => self.revision += 1,
            Outcome::Rejected(reason) => warn!(command = %label, %reason, "command rejected"),
            Outcome::Unchanged => {}
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::Rejection, step::Step};

    #[test]
    fn revision_counts_accepted_changes() {
        let mut store = ProjectStore::default();
        assert_eq!(store.revision(), 0);

        store.dispatch(ProjectCommand::Next);
        assert_eq!(store.revision(), 0);

        store.dispatch(ProjectCommand::SelectTemplate("endless-runner".into()));
        store.dispatch(ProjectCommand::Next);
        assert_eq!(store.revision(), 2);
        assert_eq!(store.project().current_step, Step::Assets);
    }

    #[test]
    fn replace_swaps_whole_project() {
        let mut store = ProjectStore::default();
        let mut next = store.project().clone();
        next.name = "Other".into();
        store.replace(next);
        assert_eq!(store.project().name, "Other");
        assert_eq!(store.revision(), 1);
    }

    #[test]
    fn rejection_is_reported() {
        let mut store = ProjectStore::default();
        let outcome = store.dispatch(ProjectCommand::DeleteLevel("1".into()));
        assert_eq!(outcome.rejection(), Some(&Rejection::LastLevel));
    }
}
