//! Configuration models for the engine and audit backends.

pub mod engine;

pub use engine::{AuditBackendConfig, EngineConfig};
