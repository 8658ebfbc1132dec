use serde::{Deserialize, Serialize};

/// Per-engine configuration, passed in explicitly rather than read from
/// process globals so concurrent engines (and tests) never share hidden
/// state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Emit warn-level diagnostics when a snapshot record carries keys
    /// outside the expected schema, or none of the known name keys.
    /// Advisory only — drift never blocks processing.
    #[serde(default = "default_log_schema_drift")]
    pub log_schema_drift: bool,
}

fn default_log_schema_drift() -> bool {
    true
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self { log_schema_drift: default_log_schema_drift() }
    }
}
