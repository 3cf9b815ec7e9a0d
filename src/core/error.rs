//! Error types for engine operations.
//!
//! Capacity warnings are deliberately not errors: they travel alongside
//! successful mutations (see [`crate::core::engine::AssignmentResult`]).
//! Unresolved overload after a rebalance is a state observable via
//! [`crate::core::load::compute_loads`], never a raised error.

use thiserror::Error;

use crate::core::model::{MemberId, TeamId};

/// Hard failures produced by engine operations. Each is local to a single
/// operation and never corrupts already-applied state from the same batch.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Proposed assignee is not part of the owning team. Blocks the write.
    #[error("member {member} is not part of team {team}")]
    MembershipViolation {
        /// The rejected assignee.
        member: MemberId,
        /// The team owning the task's project.
        team: TeamId,
    },
    /// Referenced team, project, or task does not exist.
    #[error("{kind} not found: {id}")]
    NotFound {
        /// Entity kind ("team", "project", "task").
        kind: &'static str,
        /// Identifier that failed to resolve.
        id: String,
    },
    /// Backend-specific failure with context.
    #[error("store error: {0}")]
    Store(String),
}

/// Application-facing result using anyhow for higher-level contexts.
pub type AppResult<T> = Result<T, anyhow::Error>;
