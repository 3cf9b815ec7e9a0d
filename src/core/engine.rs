//! Caller-facing engine operations with per-team critical sections.
//!
//! Because loads are derived by re-reading the full active-task set, two
//! concurrent operations against the same team could both pass a capacity
//! check that, combined, overshoots it. Every load-mutating operation
//! therefore runs under that team's exclusive lock: load computation,
//! decision, and the resulting task mutation form one atomic step.
//! Operations on different teams proceed fully in parallel. No operation
//! blocks on external I/O inside the critical section.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::core::audit::{AuditEntry, AuditSink};
use crate::core::error::EngineError;
use crate::core::load::compute_loads;
use crate::core::model::{
    AssignmentChange, MemberId, NewTask, OwnerId, ProjectId, Task, TaskId, TaskUpdate, Team,
    TeamId,
};
use crate::core::rebalance::{rebalance, Move};
use crate::core::select::select_assignee;
use crate::core::store::{TaskStore, TeamStore};
use crate::core::validate::{validate_assignment, Outcome};

/// Result of a validated create or update: the written task plus an advisory
/// capacity warning, if the assignee was already at or over capacity.
#[derive(Debug, Clone)]
pub struct AssignmentResult {
    /// The task as persisted.
    pub task: Task,
    /// "Assign anyway?" warning; never blocks the write.
    pub warning: Option<String>,
}

/// Result of one rebalance pass over one team.
#[derive(Debug, Clone)]
pub struct RebalanceReport {
    /// The rebalanced team.
    pub team_id: TeamId,
    /// Moves actually committed to the task store.
    pub moves: Vec<Move>,
    /// Audit entries for the committed moves.
    pub entries: Vec<AuditEntry>,
}

/// Registry of per-team exclusive locks, created on first use.
#[derive(Default)]
pub struct TeamLockRegistry {
    locks: Mutex<HashMap<TeamId, Arc<Mutex<()>>>>,
}

impl TeamLockRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle to the given team's lock. The caller locks the handle for the
    /// duration of its read-decide-write step.
    pub fn handle(&self, team: TeamId) -> Arc<Mutex<()>> {
        Arc::clone(self.locks.lock().entry(team).or_default())
    }
}

/// The capacity-aware assignment and rebalancing engine.
///
/// Generic over its store collaborators; see [`crate::infra::store::memory`]
/// for an in-memory workspace suitable for tests and embedding.
pub struct BalanceEngine<S, T>
where
    S: TeamStore,
    T: TaskStore,
{
    teams: S,
    tasks: T,
    audit: Option<Arc<Mutex<Box<dyn AuditSink>>>>,
    locks: TeamLockRegistry,
}

impl<S, T> BalanceEngine<S, T>
where
    S: TeamStore,
    T: TaskStore,
{
    /// Create an engine over the given stores, with no audit sink attached.
    pub fn new(teams: S, tasks: T) -> Self {
        Self {
            teams,
            tasks,
            audit: None,
            locks: TeamLockRegistry::new(),
        }
    }

    /// Attach an audit sink.
    pub fn with_audit(mut self, audit: Box<dyn AuditSink>) -> Self {
        self.audit = Some(Arc::new(Mutex::new(audit)));
        self
    }

    /// Create a task. Runs the validator when an assignee is requested;
    /// membership violations block the write, capacity warnings do not.
    pub fn create_task(
        &self,
        request: NewTask,
        actor: Option<OwnerId>,
    ) -> Result<AssignmentResult, EngineError> {
        let team = self
            .teams
            .team_for_project(&request.project_id)
            .ok_or_else(|| not_found("project", request.project_id.to_string()))?;
        let lock = self.locks.handle(team.id);
        let _guard = lock.lock();

        let warning = match request.assigned_member_id {
            Some(member_id) => self.check_assignment(&team, &member_id)?,
            None => None,
        };

        let task = request.into_task();
        self.tasks.insert(task.clone())?;

        let assignee_name = task
            .assigned_member_id
            .and_then(|id| team.member(&id))
            .map_or("Unassigned", |m| m.name.as_str());
        self.record(AuditEntry::new(
            format!(
                "Task \"{}\" created and assigned to {assignee_name}",
                task.title
            ),
            actor,
        ));
        tracing::info!(task = %task.id, team = %team.id, "task created");

        Ok(AssignmentResult { task, warning })
    }

    /// Apply a partial update to a task. A present assignment field is
    /// validated against fresh loads before anything is written.
    pub fn update_task(
        &self,
        id: &TaskId,
        update: TaskUpdate,
        actor: Option<OwnerId>,
    ) -> Result<AssignmentResult, EngineError> {
        let task = self
            .tasks
            .get(id)
            .ok_or_else(|| not_found("task", id.to_string()))?;
        let team = self
            .teams
            .team_for_project(&task.project_id)
            .ok_or_else(|| not_found("project", task.project_id.to_string()))?;
        let lock = self.locks.handle(team.id);
        let _guard = lock.lock();

        let warning = match update.assignment {
            Some(AssignmentChange::Assign(member_id)) => {
                self.check_assignment(&team, &member_id)?
            }
            Some(AssignmentChange::Clear) | None => None,
        };

        let updated = self
            .tasks
            .apply(id, &update)
            .ok_or_else(|| not_found("task", id.to_string()))?;
        self.record(AuditEntry::new(
            format!("Task \"{}\" updated.", updated.title),
            actor,
        ));
        tracing::info!(task = %updated.id, team = %team.id, "task updated");

        Ok(AssignmentResult {
            task: updated,
            warning,
        })
    }

    /// Delete a task. Never cascades; an assignee reference simply vanishes
    /// with the task.
    pub fn delete_task(&self, id: &TaskId, actor: Option<OwnerId>) -> Result<Task, EngineError> {
        let task = self
            .tasks
            .get(id)
            .ok_or_else(|| not_found("task", id.to_string()))?;
        // Orphaned tasks (project gone) are still deletable; they just have
        // no team lock to take.
        let lock = self
            .teams
            .team_for_project(&task.project_id)
            .map(|team| self.locks.handle(team.id));
        let _guard = lock.as_ref().map(|l| l.lock());

        let removed = self
            .tasks
            .remove(id)
            .ok_or_else(|| not_found("task", id.to_string()))?;
        self.record(AuditEntry::new(
            format!("Task \"{}\" deleted.", removed.title),
            actor,
        ));
        tracing::info!(task = %removed.id, "task deleted");
        Ok(removed)
    }

    /// Recommend an assignee for a new task in the given project. Performs
    /// no mutation; the caller decides whether to commit.
    pub fn auto_assign(&self, project: &ProjectId) -> Result<Option<MemberId>, EngineError> {
        let team = self
            .teams
            .team_for_project(project)
            .ok_or_else(|| not_found("project", project.to_string()))?;
        let lock = self.locks.handle(team.id);
        let _guard = lock.lock();

        let loads = compute_loads(&team, &self.tasks.active_for_team(&team.id));
        Ok(select_assignee(&team, &loads))
    }

    /// Run one rebalance pass over a team and commit the resulting moves.
    ///
    /// Moves are committed one by one; if the store fails mid-batch, moves
    /// already committed remain committed and the partial report is returned
    /// rather than rolled back.
    pub fn rebalance_team(&self, team_id: &TeamId) -> Result<RebalanceReport, EngineError> {
        let team = self
            .teams
            .team(team_id)
            .ok_or_else(|| not_found("team", team_id.to_string()))?;
        let lock = self.locks.handle(team.id);
        let _guard = lock.lock();

        let tasks = self.tasks.active_for_team(&team.id);
        let pass = rebalance(&team, &tasks);

        let mut report = RebalanceReport {
            team_id: team.id,
            moves: Vec::with_capacity(pass.moves.len()),
            entries: Vec::with_capacity(pass.entries.len()),
        };
        for (mv, entry) in pass.moves.into_iter().zip(pass.entries) {
            if self.tasks.reassign(&mv.task_id, Some(mv.to)).is_none() {
                tracing::error!(
                    task = %mv.task_id,
                    team = %team.id,
                    "task vanished mid-rebalance; keeping already-committed moves"
                );
                break;
            }
            self.record(entry.clone());
            report.entries.push(entry);
            report.moves.push(mv);
        }

        tracing::info!(team = %team.id, moves = report.moves.len(), "rebalance pass complete");
        Ok(report)
    }

    /// Rebalance every team belonging to an owner, each under its own lock.
    /// Teams with no moves are omitted from the result.
    pub fn rebalance_owner(&self, owner: &OwnerId) -> Result<Vec<RebalanceReport>, EngineError> {
        let mut reports = Vec::new();
        for team in self.teams.teams_for_owner(owner) {
            let report = self.rebalance_team(&team.id)?;
            if !report.moves.is_empty() {
                reports.push(report);
            }
        }
        Ok(reports)
    }

    /// Validate a requested assignee with loads recomputed fresh under the
    /// team lock. Returns the advisory warning, if any.
    fn check_assignment(
        &self,
        team: &Team,
        member_id: &MemberId,
    ) -> Result<Option<String>, EngineError> {
        let loads = compute_loads(team, &self.tasks.active_for_team(&team.id));
        match validate_assignment(team, Some(member_id), &loads) {
            Outcome::Accepted => Ok(None),
            Outcome::Warning(msg) => {
                tracing::warn!(member = %member_id, team = %team.id, "{msg}");
                Ok(Some(msg))
            }
            Outcome::Rejected(reason) => {
                tracing::warn!(member = %member_id, team = %team.id, "assignment rejected: {reason}");
                Err(EngineError::MembershipViolation {
                    member: *member_id,
                    team: team.id,
                })
            }
        }
    }

    fn record(&self, entry: AuditEntry) {
        if let Some(sink) = &self.audit {
            sink.lock().record(entry);
        }
    }
}

fn not_found(kind: &'static str, id: String) -> EngineError {
    EngineError::NotFound { kind, id }
}
