//! Environment configuration for the MCP server.

use std::path::PathBuf;

use anyhow::{anyhow, Context};
use israeli_bank_core::ConcurrencyPolicy;
use israeli_bank_provider::NodeBridgeConfig;

pub const NODE_ENV: &str = "ISRAELI_BANK_MCP_NODE";
pub const BRIDGE_SCRIPT_ENV: &str = "ISRAELI_BANK_MCP_BRIDGE_SCRIPT";
pub const CHROMIUM_PATH_ENV: &str = "ISRAELI_BANK_MCP_CHROMIUM_PATH";
pub const CONCURRENCY_ENV: &str = "ISRAELI_BANK_MCP_CONCURRENCY";

const DEFAULT_NODE: &str = "node";
const APP_DIR: &str = "israeli-bank-mcp";
const BRIDGE_SCRIPT_FILE: &str = "scraper-bridge.mjs";

/// Startup configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct McpConfig {
    pub node_binary: PathBuf,
    pub bridge_script: PathBuf,
    pub chromium_path: Option<String>,
    pub concurrency: ConcurrencyPolicy,
}

impl McpConfig {
    /// Read the configuration from the process environment.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the configuration through `lookup`. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let node_binary = get(NODE_ENV).map_or_else(|| PathBuf::from(DEFAULT_NODE), PathBuf::from);

        let bridge_script = match get(BRIDGE_SCRIPT_ENV) {
            Some(path) => PathBuf::from(path),
            None => dirs::data_local_dir()
                .map(|dir| dir.join(APP_DIR).join(BRIDGE_SCRIPT_FILE))
                .ok_or_else(|| {
                    anyhow!("Cannot determine a data directory; set {BRIDGE_SCRIPT_ENV}")
                })?,
        };

        let concurrency = match get(CONCURRENCY_ENV) {
            Some(value) => value
                .parse::<ConcurrencyPolicy>()
                .with_context(|| format!("{CONCURRENCY_ENV} must be `per-bank` or `parallel`"))?,
            None => ConcurrencyPolicy::default(),
        };

        Ok(Self {
            node_binary,
            bridge_script,
            chromium_path: get(CHROMIUM_PATH_ENV),
            concurrency,
        })
    }

    pub fn bridge_config(&self) -> NodeBridgeConfig {
        NodeBridgeConfig::new(&self.node_binary, &self.bridge_script)
            .with_executable_path(self.chromium_path.clone())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> anyhow::Result<McpConfig> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        McpConfig::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn explicit_values_are_used() {
        let config = config_from(&[
            (NODE_ENV, "/usr/local/bin/node"),
            (BRIDGE_SCRIPT_ENV, "/opt/bridge.mjs"),
            (CHROMIUM_PATH_ENV, "/usr/bin/chromium"),
            (CONCURRENCY_ENV, "parallel"),
        ])
        .unwrap();

        assert_eq!(config.node_binary, PathBuf::from("/usr/local/bin/node"));
        assert_eq!(config.bridge_script, PathBuf::from("/opt/bridge.mjs"));
        assert_eq!(config.chromium_path.as_deref(), Some("/usr/bin/chromium"));
        assert_eq!(config.concurrency, ConcurrencyPolicy::Parallel);
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let config = config_from(&[
            (NODE_ENV, "  "),
            (BRIDGE_SCRIPT_ENV, "/opt/bridge.mjs"),
            (CHROMIUM_PATH_ENV, ""),
        ])
        .unwrap();

        assert_eq!(config.node_binary, PathBuf::from("node"));
        assert!(config.chromium_path.is_none());
        assert_eq!(config.concurrency, ConcurrencyPolicy::PerBank);
    }

    #[test]
    fn unknown_concurrency_policy_is_an_error() {
        let err = config_from(&[
            (BRIDGE_SCRIPT_ENV, "/opt/bridge.mjs"),
            (CONCURRENCY_ENV, "serial"),
        ])
        .unwrap_err();
        assert!(err.to_string().contains(CONCURRENCY_ENV));
    }

    #[test]
    fn bridge_config_carries_chromium_path() {
        let config = config_from(&[
            (BRIDGE_SCRIPT_ENV, "/opt/bridge.mjs"),
            (CHROMIUM_PATH_ENV, "/usr/bin/chromium"),
        ])
        .unwrap();

        let bridge = config.bridge_config();
        assert_eq!(bridge.script_path, PathBuf::from("/opt/bridge.mjs"));
        assert_eq!(bridge.executable_path.as_deref(), Some("/usr/bin/chromium"));
    }
}
