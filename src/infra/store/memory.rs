//! In-memory team/task workspace for development, tests, and embedding.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use parking_lot::RwLock;

use crate::core::error::EngineError;
use crate::core::model::{
    MemberId, OwnerId, Project, ProjectId, Task, TaskId, TaskUpdate, Team, TeamId,
};
use crate::core::store::{TaskStore, TeamStore};

#[derive(Default)]
struct WorkspaceState {
    teams: HashMap<TeamId, Team>,
    team_order: Vec<TeamId>,
    projects: HashMap<ProjectId, Project>,
    tasks: HashMap<TaskId, Task>,
    // Insertion order; keeps `active_for_team` listings stable and
    // reproducible, which the rebalance sort relies on for tie-breaks.
    task_order: Vec<TaskId>,
}

/// Shared in-memory workspace implementing both store contracts.
///
/// Cheap to clone; clones share the same underlying state, so one workspace
/// can serve as both the `TeamStore` and the `TaskStore` of an engine.
#[derive(Clone, Default)]
pub struct InMemoryWorkspace {
    inner: Arc<RwLock<WorkspaceState>>,
}

impl InMemoryWorkspace {
    /// Create an empty workspace.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a team.
    pub fn add_team(&self, team: Team) {
        let mut state = self.inner.write();
        state.team_order.push(team.id);
        state.teams.insert(team.id, team);
    }

    /// Register a project under its team.
    pub fn add_project(&self, project: Project) {
        self.inner.write().projects.insert(project.id, project);
    }

    /// Seed a task directly, bypassing engine validation.
    pub fn add_task(&self, task: Task) {
        let mut state = self.inner.write();
        state.task_order.push(task.id);
        state.tasks.insert(task.id, task);
    }
}

impl TeamStore for InMemoryWorkspace {
    fn team(&self, id: &TeamId) -> Option<Team> {
        self.inner.read().teams.get(id).cloned()
    }

    fn team_for_project(&self, project: &ProjectId) -> Option<Team> {
        let state = self.inner.read();
        let project = state.projects.get(project)?;
        state.teams.get(&project.team_id).cloned()
    }

    fn teams_for_owner(&self, owner: &OwnerId) -> Vec<Team> {
        let state = self.inner.read();
        state
            .team_order
            .iter()
            .filter_map(|id| state.teams.get(id))
            .filter(|team| team.owner_id == *owner)
            .cloned()
            .collect()
    }
}

impl TaskStore for InMemoryWorkspace {
    fn get(&self, id: &TaskId) -> Option<Task> {
        self.inner.read().tasks.get(id).cloned()
    }

    fn active_for_team(&self, team: &TeamId) -> Vec<Task> {
        let state = self.inner.read();
        let project_ids: HashSet<ProjectId> = state
            .projects
            .values()
            .filter(|p| p.team_id == *team)
            .map(|p| p.id)
            .collect();
        state
            .task_order
            .iter()
            .filter_map(|id| state.tasks.get(id))
            .filter(|t| t.is_active() && project_ids.contains(&t.project_id))
            .cloned()
            .collect()
    }

    fn insert(&self, task: Task) -> Result<(), EngineError> {
        let mut state = self.inner.write();
        if state.tasks.contains_key(&task.id) {
            return Err(EngineError::Store(format!("duplicate task id: {}", task.id)));
        }
        state.task_order.push(task.id);
        state.tasks.insert(task.id, task);
        Ok(())
    }

    fn apply(&self, id: &TaskId, update: &TaskUpdate) -> Option<Task> {
        use crate::core::model::AssignmentChange;

        let mut state = self.inner.write();
        let task = state.tasks.get_mut(id)?;
        if let Some(title) = &update.title {
            task.title = title.clone();
        }
        if let Some(description) = &update.description {
            task.description = Some(description.clone());
        }
        if let Some(priority) = update.priority {
            task.priority = priority;
        }
        if let Some(status) = update.status {
            task.status = status;
        }
        match update.assignment {
            Some(AssignmentChange::Assign(member)) => task.assigned_member_id = Some(member),
            Some(AssignmentChange::Clear) => task.assigned_member_id = None,
            None => {}
        }
        Some(task.clone())
    }

    fn reassign(&self, id: &TaskId, to: Option<MemberId>) -> Option<Task> {
        let mut state = self.inner.write();
        let task = state.tasks.get_mut(id)?;
        task.assigned_member_id = to;
        Some(task.clone())
    }

    fn remove(&self, id: &TaskId) -> Option<Task> {
        let mut state = self.inner.write();
        state.task_order.retain(|t| t != id);
        state.tasks.remove(id)
    }
}
