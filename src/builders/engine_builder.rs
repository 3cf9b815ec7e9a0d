//! Construct a balance engine and its audit sink from configuration.

use crate::config::{AuditBackendConfig, EngineConfig};
use crate::core::audit::{AuditSink, InMemoryAuditSink, PostgresAuditSink};
use crate::core::engine::BalanceEngine;
use crate::core::error::EngineError;
use crate::core::store::{TaskStore, TeamStore};

/// Build an engine over the given stores, wiring the audit backend selected
/// by the configuration.
pub fn build_engine<S, T>(
    cfg: &EngineConfig,
    teams: S,
    tasks: T,
) -> Result<BalanceEngine<S, T>, EngineError>
where
    S: TeamStore,
    T: TaskStore,
{
    cfg.validate()
        .map_err(|e| EngineError::Store(format!("config invalid: {e}")))?;

    let sink: Box<dyn AuditSink> = match cfg.audit {
        AuditBackendConfig::InMemory => Box::new(InMemoryAuditSink::new(cfg.audit_window)),
        AuditBackendConfig::Postgres => Box::new(PostgresAuditSink),
    };

    Ok(BalanceEngine::new(teams, tasks).with_audit(sink))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::store::memory::InMemoryWorkspace;

    #[test]
    fn invalid_config_fails_fast() {
        let ws = InMemoryWorkspace::new();
        let cfg = EngineConfig {
            audit_window: 0,
            ..EngineConfig::default()
        };
        assert!(build_engine(&cfg, ws.clone(), ws).is_err());
    }

    #[test]
    fn default_config_builds() {
        let ws = InMemoryWorkspace::new();
        assert!(build_engine(&EngineConfig::default(), ws.clone(), ws).is_ok());
    }
}
