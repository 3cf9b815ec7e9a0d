//! Domain model, pure assignment algorithms, engine, and audit trail.

pub mod audit;
pub mod engine;
pub mod error;
pub mod load;
pub mod model;
pub mod rebalance;
pub mod select;
pub mod store;
pub mod validate;

pub use audit::{AuditEntry, AuditSink, InMemoryAuditSink, PostgresAuditSink};
pub use engine::{AssignmentResult, BalanceEngine, RebalanceReport, TeamLockRegistry};
pub use error::{AppResult, EngineError};
pub use load::compute_loads;
pub use model::{
    AssignmentChange, Member, MemberId, NewTask, OwnerId, Priority, Project, ProjectId, Status,
    Task, TaskId, TaskUpdate, Team, TeamId,
};
pub use rebalance::{rebalance, Move, RebalancePass};
pub use select::select_assignee;
pub use store::{TaskStore, TeamStore};
pub use validate::{validate_assignment, Outcome};
