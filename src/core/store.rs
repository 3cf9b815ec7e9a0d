//! Store collaborator contracts.
//!
//! The engine receives and returns plain data structures; where tasks are
//! persisted and how teams are looked up is the caller's concern. These
//! traits make the cross-entity joins (project → team, team → active tasks)
//! explicit lookup capabilities instead of ad hoc traversal inside the
//! engine.

use crate::core::error::EngineError;
use crate::core::model::{
    MemberId, OwnerId, ProjectId, Task, TaskId, TaskUpdate, Team, TeamId,
};

/// Supplies teams with their ordered member sequences.
pub trait TeamStore: Send + Sync {
    /// Fetch a team by id.
    fn team(&self, id: &TeamId) -> Option<Team>;

    /// Resolve the team owning the given project.
    fn team_for_project(&self, project: &ProjectId) -> Option<Team>;

    /// All teams belonging to an owner, in a stable order.
    fn teams_for_owner(&self, owner: &OwnerId) -> Vec<Team>;
}

/// Supplies the active task set and accepts task mutations keyed by task id.
pub trait TaskStore: Send + Sync {
    /// Fetch a task by id.
    fn get(&self, id: &TaskId) -> Option<Task>;

    /// Active (`Pending`/`InProgress`) tasks across all of the team's
    /// projects, in a stable order.
    fn active_for_team(&self, team: &TeamId) -> Vec<Task>;

    /// Persist a new task.
    fn insert(&self, task: Task) -> Result<(), EngineError>;

    /// Apply a partial update, returning the updated task if it exists.
    fn apply(&self, id: &TaskId, update: &TaskUpdate) -> Option<Task>;

    /// Change a task's assignment, returning the updated task if it exists.
    fn reassign(&self, id: &TaskId, to: Option<MemberId>) -> Option<Task>;

    /// Remove a task, returning it if it existed.
    fn remove(&self, id: &TaskId) -> Option<Task>;
}
