//! # Capacity Balancer
//!
//! A deterministic, capacity-aware assignment and rebalancing engine for
//! work items distributed across bounded teams.
//!
//! This library is the decision layer of a task-management system: it decides
//! where a new task should go, what happens when a manual assignment would
//! exceed a member's capacity, and how an overloaded team is brought back
//! into balance by moving tasks between members while preserving ordering
//! and auditability.
//!
//! ## Core Problem Solved
//!
//! Team workloads drift: members accumulate more active tasks than their
//! declared capacity while idle peers sit under-utilized. Fixing that by hand
//! is error-prone, and fixing it automatically is only safe if the engine
//! honors some hard rules:
//!
//! - **Capacity bounds**: a recipient is only ever filled up to its capacity
//! - **Pinned work**: high-priority tasks are never moved automatically
//! - **Stable ordering**: team insertion order drives every tie-break, so a
//!   pass over the same inputs always produces the same moves
//! - **Idempotence**: a second pass with no task churn is a no-op
//! - **Auditability**: every automatic move leaves an append-only trail
//!
//! ## Key Features
//!
//! - **Derived loads**: a member's load is always recomputed from the
//!   authoritative task set, never cached across calls
//! - **Advisory warnings**: assigning past capacity is allowed but surfaced
//!   as a confirmation-style warning, matching "assign anyway?" product flows
//! - **Greedy rebalancing**: overloaded members drain movable tasks
//!   (lowest priority, oldest first) into peers with spare capacity
//! - **Per-team critical sections**: operations on the same team are
//!   serialized; different teams proceed fully in parallel
//! - **Pluggable stores**: team/task persistence and the audit sink are
//!   trait-shaped collaborators; an in-memory workspace ships for tests and
//!   embedding
//!
//! ## Example
//!
//! ```rust,ignore
//! use capacity_balancer::core::{BalanceEngine, NewTask};
//! use capacity_balancer::core::audit::InMemoryAuditSink;
//! use capacity_balancer::infra::store::memory::InMemoryWorkspace;
//!
//! let ws = InMemoryWorkspace::new();
//! // ... register teams, projects, tasks ...
//! let engine = BalanceEngine::new(ws.clone(), ws.clone())
//!     .with_audit(Box::new(InMemoryAuditSink::new(100)));
//!
//! let created = engine.create_task(NewTask::titled("Write report", project_id), None)?;
//! if let Some(warning) = created.warning {
//!     // surface "assign anyway?" to the caller
//! }
//! let report = engine.rebalance_team(&team_id)?;
//! ```
//!
//! For complete examples, see:
//! - `tests/rebalance_scenarios_test.rs` - Algorithm property tests
//! - `tests/engine_ops_test.rs` - Full engine operation tests

#![deny(warnings)]
#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Domain model, pure assignment algorithms, engine, and audit trail.
pub mod core;
/// Configuration models for the engine and audit backends.
pub mod config;
/// Builders to construct an engine from configuration.
pub mod builders;
/// Infrastructure adapters for team and task stores.
pub mod infra;
/// Shared utilities.
pub mod util;
