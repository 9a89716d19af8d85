//! Node.js bridge to the `israeli-bank-scrapers` library.
//!
//! Every operation runs `<node> <script>` once: the request goes to stdin as a
//! single JSON line and the response is the last JSON line on stdout. The
//! child is not killed if the caller stops waiting, so a dispatched scrape
//! always runs to completion.

mod protocol;

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::error::{Result, ScraperError};
use crate::traits::{BankScraper, ScraperFactory};
use crate::types::{CompanyType, ScrapeOutcome, ScraperCredentials, ScraperOptions};
use crate::utils::log_sanitizer::{mask_phone_number, truncate_for_log};

use protocol::{BridgeEnvelope, BridgeRequest};

/// Source of the bridge script, written to disk by [`install_bridge_script`].
pub const BRIDGE_SCRIPT: &str = include_str!("../../bridge/scraper-bridge.mjs");

/// Where and how to run the bridge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeBridgeConfig {
    /// Node.js executable.
    pub node_binary: PathBuf,
    /// Bridge script passed as the first argument.
    pub script_path: PathBuf,
    /// Chromium executable forwarded as the library's `executablePath`.
    pub executable_path: Option<String>,
}

impl NodeBridgeConfig {
    pub fn new(node_binary: impl Into<PathBuf>, script_path: impl Into<PathBuf>) -> Self {
        Self {
            node_binary: node_binary.into(),
            script_path: script_path.into(),
            executable_path: None,
        }
    }

    #[must_use]
    pub fn with_executable_path(mut self, executable_path: Option<String>) -> Self {
        self.executable_path = executable_path;
        self
    }
}

/// Write [`BRIDGE_SCRIPT`] to `path` unless a file is already there.
///
/// Returns `true` when the script was written.
pub async fn install_bridge_script(path: &Path) -> Result<bool> {
    if tokio::fs::try_exists(path).await? {
        return Ok(false);
    }

    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, BRIDGE_SCRIPT).await?;
    log::info!("Installed scraper bridge script at {}", path.display());
    Ok(true)
}

/// [`ScraperFactory`] producing [`NodeBridgeScraper`]s.
#[derive(Debug, Clone)]
pub struct NodeBridgeFactory {
    config: Arc<NodeBridgeConfig>,
}

impl NodeBridgeFactory {
    pub fn new(config: NodeBridgeConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    fn scraper(&self, mut options: ScraperOptions) -> NodeBridgeScraper {
        if options.executable_path.is_none() {
            options.executable_path.clone_from(&self.config.executable_path);
        }

        NodeBridgeScraper {
            config: Arc::clone(&self.config),
            options,
        }
    }
}

impl ScraperFactory for NodeBridgeFactory {
    fn create_scraper(&self, options: ScraperOptions) -> Result<Arc<dyn BankScraper>> {
        Ok(Arc::new(self.scraper(options)))
    }
}

/// One scraper instance backed by the bridge script.
pub struct NodeBridgeScraper {
    config: Arc<NodeBridgeConfig>,
    options: ScraperOptions,
}

impl NodeBridgeScraper {
    async fn invoke(&self, request: BridgeRequest<'_>) -> Result<serde_json::Value> {
        let call_id = uuid::Uuid::new_v4().to_string();
        let op = request.op_name();

        let mut payload = serde_json::to_vec(&BridgeEnvelope {
            id: &call_id,
            request,
        })
        .map_err(|e| ScraperError::ParseError {
            detail: format!("encode {op} request: {e}"),
        })?;
        payload.push(b'\n');

        log::debug!(
            "[bridge {call_id}] {op} for {} via {}",
            self.options.company_id,
            self.config.script_path.display()
        );

        let mut child = Command::new(&self.config.node_binary)
            .arg(&self.config.script_path)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| ScraperError::BridgeSpawn {
                detail: format!("{}: {e}", self.config.node_binary.display()),
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            // An early bridge exit closes stdin; the exit status is reported below.
            if let Err(e) = stdin.write_all(&payload).await {
                log::debug!("[bridge {call_id}] failed to write request: {e}");
            }
        }

        let output = child.wait_with_output().await?;

        let stderr = String::from_utf8_lossy(&output.stderr);
        if !stderr.trim().is_empty() {
            log::debug!("[bridge {call_id}] stderr: {}", truncate_for_log(&stderr));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        match protocol::parse_response(&stdout) {
            Ok(Some(response)) => response.into_result(),
            Ok(None) => Err(ScraperError::BridgeExit {
                status: output.status.to_string(),
            }),
            Err(_) if !output.status.success() => Err(ScraperError::BridgeExit {
                status: output.status.to_string(),
            }),
            Err(e) => {
                log::error!(
                    "[bridge {call_id}] unreadable stdout: {}",
                    truncate_for_log(&stdout)
                );
                Err(e)
            }
        }
    }
}

#[async_trait]
impl BankScraper for NodeBridgeScraper {
    fn company(&self) -> CompanyType {
        self.options.company_id
    }

    async fn scrape(&self, credentials: &ScraperCredentials) -> Result<ScrapeOutcome> {
        let raw = self
            .invoke(BridgeRequest::Scrape {
                options: &self.options,
                credentials,
            })
            .await?;
        ScrapeOutcome::from_value(raw)
    }

    async fn trigger_two_factor_auth(&self, phone_number: &str) -> Result<()> {
        log::info!(
            "Triggering 2FA for {} to {}",
            self.options.company_id,
            mask_phone_number(phone_number)
        );
        self.invoke(BridgeRequest::TriggerTwoFactorAuth {
            options: &self.options,
            phone_number,
        })
        .await?;
        Ok(())
    }

    async fn get_long_term_two_factor_token(&self, otp_code: &str) -> Result<serde_json::Value> {
        self.invoke(BridgeRequest::GetLongTermTwoFactorToken {
            options: &self.options,
            otp_code,
        })
        .await
    }
}
