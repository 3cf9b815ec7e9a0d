//! Audit trail: append-only record of create/update/delete/reassign events.
//!
//! The engine only writes to the sink; it never reads old entries to make
//! decisions. The in-memory sink keeps a bounded recent window for display.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::core::model::OwnerId;
use crate::util::clock::now_ms;

/// One audit trail entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// Timestamp in milliseconds since epoch.
    pub timestamp_ms: u128,
    /// Human-readable description of the event.
    pub message: String,
    /// Account that triggered the event, when known.
    pub actor: Option<OwnerId>,
}

impl AuditEntry {
    /// Build an entry stamped with the current time.
    pub fn new(message: impl Into<String>, actor: Option<OwnerId>) -> Self {
        Self {
            timestamp_ms: now_ms(),
            message: message.into(),
            actor,
        }
    }
}

/// Audit sink abstraction. Assumed durable and ordered by insertion.
pub trait AuditSink: Send {
    /// Append an entry.
    fn record(&mut self, entry: AuditEntry);
}

/// In-memory audit sink with a bounded recent window, for testing and dev.
pub struct InMemoryAuditSink {
    entries: VecDeque<AuditEntry>,
    max_entries: usize,
}

impl InMemoryAuditSink {
    /// Create a sink retaining at most `max_entries` recent entries.
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(max_entries),
            max_entries,
        }
    }

    /// Snapshot of the retained entries, oldest first.
    pub fn entries(&self) -> Vec<AuditEntry> {
        self.entries.iter().cloned().collect()
    }
}

impl AuditSink for InMemoryAuditSink {
    fn record(&mut self, entry: AuditEntry) {
        if self.entries.len() >= self.max_entries {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }
}

/// Postgres-backed audit sink (schema-only; DB I/O not wired).
pub struct PostgresAuditSink;

impl PostgresAuditSink {
    /// Returns SQL migration statements for the audit trail.
    pub fn migrations() -> &'static [&'static str] {
        &[
            r#"
CREATE TABLE IF NOT EXISTS cb_audit_entries (
    entry_id BIGSERIAL PRIMARY KEY,
    actor_id TEXT,
    message TEXT NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);
CREATE INDEX IF NOT EXISTS idx_cb_audit_entries_actor_created ON cb_audit_entries (actor_id, created_at);
CREATE INDEX IF NOT EXISTS idx_cb_audit_entries_created ON cb_audit_entries (created_at);
"#,
        ]
    }
}

impl AuditSink for PostgresAuditSink {
    fn record(&mut self, _entry: AuditEntry) {
        // Stub: actual DB writes require a runtime + client; left to the integration layer.
    }
}
