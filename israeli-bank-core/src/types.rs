//! Request and response value types

use serde::{Deserialize, Serialize};

use israeli_bank_provider::{CompanyType, ScraperCredentials};

use crate::error::CoreError;

/// One entry of the `banks://list` document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BankListEntry {
    pub id: CompanyType,
    pub name: String,
    /// Always present; empty when the catalog declares no login fields.
    pub required_credentials: Vec<String>,
}

/// The `banks://list` document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BankList {
    pub banks: Vec<BankListEntry>,
}

/// A `fetch-transactions` call, as received.
#[derive(Debug, Clone, Default)]
pub struct ScrapeRequest {
    pub bank_id: String,
    pub credentials: ScraperCredentials,
    pub start_date: Option<String>,
    pub combine_installments: Option<bool>,
    pub show_browser: Option<bool>,
}

/// Action requested by a `two-factor-auth` call.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum TwoFactorAction {
    /// Send a one-time code to the phone.
    Trigger,
    /// Exchange a one-time code for the long-term token.
    GetToken,
}

impl TwoFactorAction {
    pub const ALL: [Self; 2] = [Self::Trigger, Self::GetToken];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Trigger => "trigger",
            Self::GetToken => "get-token",
        }
    }
}

impl std::str::FromStr for TwoFactorAction {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "trigger" => Ok(Self::Trigger),
            "get-token" => Ok(Self::GetToken),
            _ => Err(CoreError::InvalidTwoFactorAction),
        }
    }
}

/// A `two-factor-auth` call, as received.
///
/// `action` stays a string so an unknown action is answered with an error
/// envelope rather than a protocol error.
#[derive(Debug, Clone, Default)]
pub struct TwoFactorRequest {
    pub bank_id: String,
    pub phone_number: String,
    pub action: String,
    pub otp_code: Option<String>,
}
