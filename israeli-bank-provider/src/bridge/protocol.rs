//! Line-oriented JSON protocol spoken with the bridge script.
//!
//! Request (one line on stdin):
//! `{"id": "...", "op": "scrape", "options": {...}, "credentials": {...}}`
//!
//! Response (last non-empty line on stdout):
//! `{"id": "...", "ok": true, "result": ...}` or
//! `{"id": "...", "ok": false, "error": {"name": "...", "message": "..."}}`

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScraperError};
use crate::types::{ScraperCredentials, ScraperOptions};

#[derive(Debug, Serialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub(crate) enum BridgeRequest<'a> {
    Scrape {
        options: &'a ScraperOptions,
        credentials: &'a ScraperCredentials,
    },
    #[serde(rename_all = "camelCase")]
    TriggerTwoFactorAuth {
        options: &'a ScraperOptions,
        phone_number: &'a str,
    },
    #[serde(rename_all = "camelCase")]
    GetLongTermTwoFactorToken {
        options: &'a ScraperOptions,
        otp_code: &'a str,
    },
}

impl BridgeRequest<'_> {
    pub(crate) fn op_name(&self) -> &'static str {
        match self {
            Self::Scrape { .. } => "scrape",
            Self::TriggerTwoFactorAuth { .. } => "triggerTwoFactorAuth",
            Self::GetLongTermTwoFactorToken { .. } => "getLongTermTwoFactorToken",
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct BridgeEnvelope<'a> {
    pub id: &'a str,
    #[serde(flatten)]
    pub request: BridgeRequest<'a>,
}

#[derive(Debug, Deserialize)]
struct BridgeErrorBody {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct BridgeResponse {
    ok: bool,
    #[serde(default)]
    result: serde_json::Value,
    #[serde(default)]
    error: Option<BridgeErrorBody>,
}

impl BridgeResponse {
    /// Collapse the response into the operation's result.
    pub(crate) fn into_result(self) -> Result<serde_json::Value> {
        if self.ok {
            return Ok(self.result);
        }

        let message = self
            .error
            .and_then(|e| e.message.or(e.name))
            .unwrap_or_default();
        Err(ScraperError::BridgeFailed { message })
    }
}

/// Find the response in the bridge's stdout.
///
/// Returns `Ok(None)` when stdout is empty.
pub(crate) fn parse_response(stdout: &str) -> Result<Option<BridgeResponse>> {
    let Some(line) = stdout.lines().map(str::trim).rfind(|l| !l.is_empty()) else {
        return Ok(None);
    };

    serde_json::from_str(line)
        .map(Some)
        .map_err(|e| ScraperError::ParseError {
            detail: e.to_string(),
        })
}
