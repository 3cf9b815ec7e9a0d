//! Domain records for teams, members, projects, and tasks.
//!
//! External input enters the engine through these types; priorities and
//! statuses are enumerated variants rather than free-form strings, so
//! validation happens once at the boundary.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::util::clock::now_ms;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Generate a fresh random identifier.
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

define_id!(
    /// Identifier of a team member.
    MemberId
);
define_id!(
    /// Identifier of a team.
    TeamId
);
define_id!(
    /// Identifier of a project.
    ProjectId
);
define_id!(
    /// Identifier of a task.
    TaskId
);
define_id!(
    /// Identifier of the account owning teams and projects.
    OwnerId
);

/// Task priority. The derived ordering (`Low < Medium < High`) is load-bearing:
/// the rebalancer relocates strictly lower-priority tasks first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Priority {
    /// Routine work, first to be relocated.
    Low,
    /// Default priority for new tasks.
    Medium,
    /// Pinned: never moved automatically.
    High,
}

impl Default for Priority {
    fn default() -> Self {
        Self::Medium
    }
}

/// Task lifecycle status. Only `Pending` and `InProgress` count toward load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    /// Not started yet.
    Pending,
    /// Actively being worked.
    #[serde(rename = "In Progress")]
    InProgress,
    /// Terminal; invisible to load accounting and rebalancing.
    Done,
}

impl Default for Status {
    fn default() -> Self {
        Self::Pending
    }
}

impl Status {
    /// Whether a task in this status contributes to its assignee's load.
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Pending | Self::InProgress)
    }
}

/// A person with a bounded task-handling capacity, belonging to exactly one team.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Member {
    /// Member identifier.
    pub id: MemberId,
    /// Display name, used in warnings and audit messages.
    pub name: String,
    /// Display-only role description.
    pub role: String,
    /// Maximum concurrent active tasks. The engine never mutates this.
    pub capacity: u32,
}

impl Member {
    /// Create a member with a fresh id.
    pub fn new(name: impl Into<String>, role: impl Into<String>, capacity: u32) -> Self {
        Self {
            id: MemberId::new(),
            name: name.into(),
            role: role.into(),
            capacity,
        }
    }
}

/// An ordered collection of members sharing projects.
///
/// The `members` sequence is the documented, stable iteration order (insertion
/// order). It drives every tie-break in auto-assignment and rebalancing and
/// must be reproducible across calls.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    /// Team identifier.
    pub id: TeamId,
    /// Account owning this team.
    pub owner_id: OwnerId,
    /// Display name.
    pub name: String,
    /// Members in insertion order.
    pub members: Vec<Member>,
}

impl Team {
    /// Create a team with a fresh id.
    pub fn new(owner_id: OwnerId, name: impl Into<String>, members: Vec<Member>) -> Self {
        Self {
            id: TeamId::new(),
            owner_id,
            name: name.into(),
            members,
        }
    }

    /// Look up a member of this team by id.
    pub fn member(&self, id: &MemberId) -> Option<&Member> {
        self.members.iter().find(|m| m.id == *id)
    }
}

/// A grouping of tasks, owned by one team.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    /// Project identifier.
    pub id: ProjectId,
    /// Owning team.
    pub team_id: TeamId,
    /// Display name.
    pub name: String,
}

impl Project {
    /// Create a project with a fresh id.
    pub fn new(team_id: TeamId, name: impl Into<String>) -> Self {
        Self {
            id: ProjectId::new(),
            team_id,
            name: name.into(),
        }
    }
}

/// A unit of work with priority, status, and an optional assigned member.
///
/// The assignment is a reference, not ownership: removing a member orphans the
/// reference but never deletes the task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    /// Task identifier.
    pub id: TaskId,
    /// Display title, used in audit messages.
    pub title: String,
    /// Optional free-form description.
    pub description: Option<String>,
    /// Priority; `High` tasks are pinned against automatic moves.
    pub priority: Priority,
    /// Lifecycle status.
    pub status: Status,
    /// Assigned member, if any. `None` means unassigned.
    pub assigned_member_id: Option<MemberId>,
    /// Project this task belongs to.
    pub project_id: ProjectId,
    /// Creation timestamp in milliseconds since epoch; drives oldest-first ordering.
    pub created_at_ms: u128,
}

impl Task {
    /// Whether this task contributes to its assignee's load.
    pub const fn is_active(&self) -> bool {
        self.status.is_active()
    }
}

/// Request to create a task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTask {
    /// Display title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Project the task belongs to.
    pub project_id: ProjectId,
    /// Requested assignee, validated against the project's team.
    pub assigned_member_id: Option<MemberId>,
    /// Priority; defaults to `Medium` when absent.
    pub priority: Option<Priority>,
    /// Status; defaults to `Pending` when absent.
    pub status: Option<Status>,
}

impl NewTask {
    /// Minimal request: a title within a project, everything else defaulted.
    pub fn titled(title: impl Into<String>, project_id: ProjectId) -> Self {
        Self {
            title: title.into(),
            description: None,
            project_id,
            assigned_member_id: None,
            priority: None,
            status: None,
        }
    }

    /// Materialize the request into a task with a fresh id and timestamp.
    pub fn into_task(self) -> Task {
        Task {
            id: TaskId::new(),
            title: self.title,
            description: self.description,
            priority: self.priority.unwrap_or_default(),
            status: self.status.unwrap_or_default(),
            assigned_member_id: self.assigned_member_id,
            project_id: self.project_id,
            created_at_ms: now_ms(),
        }
    }
}

/// Requested change to a task's assignment field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssignmentChange {
    /// Assign to the given member (validated against the owning team).
    Assign(MemberId),
    /// Clear the assignment; always legal.
    Clear,
}

/// Partial update of a task. Absent fields are left untouched; a present
/// `assignment` field triggers validation before the write.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskUpdate {
    /// New title.
    pub title: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New priority.
    pub priority: Option<Priority>,
    /// New status.
    pub status: Option<Status>,
    /// Assignment change, if the request carried the assignment field.
    pub assignment: Option<AssignmentChange>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_ordering_is_low_medium_high() {
        assert!(Priority::Low < Priority::Medium);
        assert!(Priority::Medium < Priority::High);
    }

    #[test]
    fn done_is_not_active() {
        assert!(Status::Pending.is_active());
        assert!(Status::InProgress.is_active());
        assert!(!Status::Done.is_active());
    }

    #[test]
    fn new_task_defaults() {
        let project = ProjectId::new();
        let task = NewTask::titled("Write report", project).into_task();
        assert_eq!(task.priority, Priority::Medium);
        assert_eq!(task.status, Status::Pending);
        assert!(task.assigned_member_id.is_none());
        assert_eq!(task.project_id, project);
        assert!(task.created_at_ms > 0);
    }

    #[test]
    fn status_wire_format_matches_boundary() {
        let json = serde_json::to_string(&Status::InProgress).unwrap();
        assert_eq!(json, "\"In Progress\"");
        let back: Status = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Status::InProgress);
    }
}
