//! MCP tool parameter schemas
//!
//! Defines the input parameter structures for both tools.
//! All structs derive `Debug`, `Deserialize`, and `JsonSchema` as required by rmcp.
//!
//! `bankId` and `action` deserialize as plain strings and only advertise an
//! enum in the schema, so an out-of-range value reaches the handler and is
//! answered with an error payload.

use schemars::{json_schema, JsonSchema, Schema, SchemaGenerator};
use serde::Deserialize;

use israeli_bank_core::types::{ScrapeRequest, TwoFactorAction, TwoFactorRequest};
use israeli_bank_provider::{CompanyType, ScraperCredentials};

fn bank_id_schema(_generator: &mut SchemaGenerator) -> Schema {
    let ids: Vec<&str> = CompanyType::ALL.iter().map(|c| c.as_str()).collect();
    json_schema!({
        "type": "string",
        "enum": ids,
        "description": "Bank identifier, one of the ids listed by banks://list"
    })
}

fn two_factor_action_schema(_generator: &mut SchemaGenerator) -> Schema {
    let actions: Vec<&str> = TwoFactorAction::ALL.iter().map(|a| a.as_str()).collect();
    json_schema!({
        "type": "string",
        "enum": actions,
        "description": "`trigger` sends a code to the phone, `get-token` exchanges a received code for a long-term token"
    })
}

/// Login credentials. Which fields a bank needs is listed in `banks://list`.
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CredentialsParams {
    #[schemars(description = "Username")]
    pub username: Option<String>,

    #[schemars(description = "Password")]
    pub password: String,

    #[schemars(description = "User code (Hapoalim)")]
    pub user_code: Option<String>,

    #[schemars(description = "Israeli ID number")]
    pub id: Option<String>,

    #[schemars(description = "Identification code (Discount, Mercantile)")]
    pub num: Option<String>,

    #[serde(rename = "card6Digits")]
    #[schemars(description = "Last six digits of the card (Isracard, Amex)")]
    pub card6_digits: Option<String>,

    #[serde(rename = "nationalID")]
    #[schemars(description = "National ID (Yahav)")]
    pub national_id: Option<String>,

    #[schemars(description = "Long-term token obtained through two-factor-auth")]
    pub long_term_two_factor_auth_token: Option<String>,
}

impl From<CredentialsParams> for ScraperCredentials {
    fn from(params: CredentialsParams) -> Self {
        Self {
            username: params.username,
            password: Some(params.password),
            user_code: params.user_code,
            id: params.id,
            num: params.num,
            card6_digits: params.card6_digits,
            national_id: params.national_id,
            long_term_two_factor_auth_token: params.long_term_two_factor_auth_token,
        }
    }
}

/// Parameters for `fetch-transactions` tool.
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FetchTransactionsParams {
    #[schemars(schema_with = "bank_id_schema")]
    pub bank_id: String,

    #[schemars(description = "Login credentials for the bank")]
    pub credentials: CredentialsParams,

    /// Earliest transaction date.
    #[schemars(
        description = "Earliest transaction date, ISO 8601 (e.g. 2024-01-31 or 2024-01-31T00:00:00Z). Defaults to now"
    )]
    pub start_date: Option<String>,

    #[schemars(description = "Combine installment transactions into one (default: false)")]
    pub combine_installments: Option<bool>,

    #[schemars(description = "Show the browser window while scraping (default: false)")]
    pub show_browser: Option<bool>,
}

impl From<FetchTransactionsParams> for ScrapeRequest {
    fn from(params: FetchTransactionsParams) -> Self {
        Self {
            bank_id: params.bank_id,
            credentials: params.credentials.into(),
            start_date: params.start_date,
            combine_installments: params.combine_installments,
            show_browser: params.show_browser,
        }
    }
}

/// Parameters for `two-factor-auth` tool.
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TwoFactorAuthParams {
    #[schemars(schema_with = "bank_id_schema")]
    pub bank_id: String,

    #[schemars(description = "Phone number registered with the bank")]
    pub phone_number: String,

    #[schemars(schema_with = "two_factor_action_schema")]
    pub action: String,

    #[schemars(description = "One-time code received by SMS (required for get-token)")]
    pub otp_code: Option<String>,
}

impl From<TwoFactorAuthParams> for TwoFactorRequest {
    fn from(params: TwoFactorAuthParams) -> Self {
        Self {
            bank_id: params.bank_id,
            phone_number: params.phone_number,
            action: params.action,
            otp_code: params.otp_code,
        }
    }
}
