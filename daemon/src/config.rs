//! Daemon configuration with TOML file support.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tally_governance::GovernanceConfig;

/// Configuration for a tally daemon run.
///
/// Loaded from a TOML file via [`DaemonConfig::from_toml_file`] or built
/// programmatically (e.g. for tests).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DaemonConfig {
    /// Log format: "human" or "json".
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Accounts the access gate treats as administrators.
    #[serde(default)]
    pub admins: Vec<String>,

    /// Starting governance parameters.
    #[serde(default)]
    pub governance: GovernanceConfig,

    /// Genesis state of the in-memory token ledger.
    #[serde(default)]
    pub ledger: LedgerConfig,
}

/// The `[ledger]` table.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// Genesis balances, account -> whole token units.
    #[serde(default)]
    pub balances: BTreeMap<String, u64>,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_log_format() -> String {
    "human".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl DaemonConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string and validate the governance block.
    pub fn from_toml_str(s: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(s).context("parsing daemon config")?;
        config
            .governance
            .validate()
            .context("invalid [governance.params]")?;
        Ok(config)
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> anyhow::Result<String> {
        toml::to_string_pretty(self).context("serializing daemon config")
    }
}
