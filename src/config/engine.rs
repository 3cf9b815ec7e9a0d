//! Engine configuration structures.

use serde::{Deserialize, Serialize};

/// Audit backend selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditBackendConfig {
    /// In-memory bounded window for development/testing.
    InMemory,
    /// Postgres audit trail (schema-only sink; I/O wired by the integration layer).
    Postgres,
}

/// Engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Number of recent audit entries retained by the in-memory sink.
    pub audit_window: usize,
    /// Audit backend selection.
    pub audit: AuditBackendConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            audit_window: 100,
            audit: AuditBackendConfig::InMemory,
        }
    }
}

impl EngineConfig {
    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), String> {
        if self.audit_window == 0 {
            return Err("audit_window must be greater than 0".into());
        }
        Ok(())
    }

    /// Parse engine configuration from a JSON string and validate.
    pub fn from_json_str(input: &str) -> Result<Self, String> {
        let cfg: Self = serde_json::from_str(input).map_err(|e| format!("parse error: {e}"))?;
        cfg.validate()?;
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(EngineConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_audit_window_is_rejected() {
        let cfg = EngineConfig {
            audit_window: 0,
            ..EngineConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn parses_and_validates_json() {
        let cfg =
            EngineConfig::from_json_str(r#"{"audit_window": 25, "audit": "postgres"}"#).unwrap();
        assert_eq!(cfg.audit_window, 25);
        assert!(matches!(cfg.audit, AuditBackendConfig::Postgres));

        assert!(EngineConfig::from_json_str(r#"{"audit_window": 0, "audit": "in_memory"}"#)
            .is_err());
    }
}
