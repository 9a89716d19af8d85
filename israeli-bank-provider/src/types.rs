use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ScraperError;

// ============ Company Types ============

/// Identifies a financial institution supported by the scraping library.
///
/// The serialized form is the library's own `CompanyTypes` value
/// (e.g. `"visaCal"`, `"otsarHahayal"`).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "camelCase")]
pub enum CompanyType {
    Hapoalim,
    Leumi,
    Mizrahi,
    Discount,
    Mercantile,
    OtsarHahayal,
    Max,
    VisaCal,
    Isracard,
    Amex,
    Union,
    Beinleumi,
    Massad,
    Yahav,
    BeyahadBishvilha,
    OneZero,
    Behatsdaa,
    Pagi,
}

impl CompanyType {
    /// Every company known to this build, in catalog order.
    pub const ALL: [Self; 18] = [
        Self::Hapoalim,
        Self::Leumi,
        Self::Mizrahi,
        Self::Discount,
        Self::Mercantile,
        Self::OtsarHahayal,
        Self::Max,
        Self::VisaCal,
        Self::Isracard,
        Self::Amex,
        Self::Union,
        Self::Beinleumi,
        Self::Massad,
        Self::Yahav,
        Self::BeyahadBishvilha,
        Self::OneZero,
        Self::Behatsdaa,
        Self::Pagi,
    ];

    /// Library identifier for this company.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hapoalim => "hapoalim",
            Self::Leumi => "leumi",
            Self::Mizrahi => "mizrahi",
            Self::Discount => "discount",
            Self::Mercantile => "mercantile",
            Self::OtsarHahayal => "otsarHahayal",
            Self::Max => "max",
            Self::VisaCal => "visaCal",
            Self::Isracard => "isracard",
            Self::Amex => "amex",
            Self::Union => "union",
            Self::Beinleumi => "beinleumi",
            Self::Massad => "massad",
            Self::Yahav => "yahav",
            Self::BeyahadBishvilha => "beyahadBishvilha",
            Self::OneZero => "oneZero",
            Self::Behatsdaa => "behatsdaa",
            Self::Pagi => "pagi",
        }
    }
}

impl std::fmt::Display for CompanyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CompanyType {
    type Err = ScraperError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|company| company.as_str() == s)
            .ok_or_else(|| ScraperError::InvalidCompany(s.to_string()))
    }
}

// ============ Catalog Types ============

/// Static metadata describing one supported bank.
///
/// Obtain via [`get_all_bank_metadata()`](crate::get_all_bank_metadata) or a
/// [`BankCatalog`](crate::BankCatalog).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BankMetadata {
    /// Company identifier.
    pub id: CompanyType,
    /// Human-readable bank name.
    pub name: String,
    /// Credential keys the library's login flow reads for this bank.
    pub login_fields: Vec<String>,
}

// ============ Credential Types ============

/// Login credentials passed through to the scraping library.
///
/// Which fields are required depends on the bank; nothing here is enforced.
/// `Debug` never prints values.
#[derive(Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ScraperCredentials {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num: Option<String>,
    #[serde(
        default,
        rename = "card6Digits",
        skip_serializing_if = "Option::is_none"
    )]
    pub card6_digits: Option<String>,
    #[serde(default, rename = "nationalID", skip_serializing_if = "Option::is_none")]
    pub national_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub long_term_two_factor_auth_token: Option<String>,
}

impl ScraperCredentials {
    /// Names of the fields that carry a value, in wire spelling.
    pub fn present_fields(&self) -> Vec<&'static str> {
        [
            ("username", self.username.is_some()),
            ("password", self.password.is_some()),
            ("userCode", self.user_code.is_some()),
            ("id", self.id.is_some()),
            ("num", self.num.is_some()),
            ("card6Digits", self.card6_digits.is_some()),
            ("nationalID", self.national_id.is_some()),
            (
                "longTermTwoFactorAuthToken",
                self.long_term_two_factor_auth_token.is_some(),
            ),
        ]
        .into_iter()
        .filter_map(|(name, present)| present.then_some(name))
        .collect()
    }
}

impl std::fmt::Debug for ScraperCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScraperCredentials")
            .field("fields", &self.present_fields())
            .finish_non_exhaustive()
    }
}

// ============ Scraper Options ============

/// Options a scraper instance is created with.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ScraperOptions {
    /// Bank to scrape.
    pub company_id: CompanyType,
    /// Earliest transaction date to request.
    pub start_date: DateTime<Utc>,
    /// Merge installment transactions into a single entry.
    pub combine_installments: bool,
    /// Run the browser with a visible window.
    pub show_browser: bool,
    /// Chromium executable to launch instead of the bundled one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub executable_path: Option<String>,
}

impl ScraperOptions {
    /// Options with library defaults for everything but company and start date.
    pub fn new(company_id: CompanyType, start_date: DateTime<Utc>) -> Self {
        Self {
            company_id,
            start_date,
            combine_installments: false,
            show_browser: false,
            executable_path: None,
        }
    }
}

// ============ Results ============

/// Outcome of a single scrape as reported by the library.
#[derive(Debug, Clone, PartialEq)]
pub enum ScrapeOutcome {
    /// The complete result object (`success: true`, accounts, ...), untouched.
    Success(serde_json::Value),
    /// The library reported a failure.
    Failure {
        /// Library error type (e.g. `"INVALID_PASSWORD"`), absent when the
        /// library gave none.
        error_type: Option<String>,
        /// Library error message, empty when none was given.
        error_message: String,
    },
}

impl ScrapeOutcome {
    /// Interpret a raw library result object.
    ///
    /// Anything that is not an object with a boolean `success` is a parse error.
    pub fn from_value(value: serde_json::Value) -> Result<Self, ScraperError> {
        let success = value
            .get("success")
            .and_then(serde_json::Value::as_bool)
            .ok_or_else(|| ScraperError::ParseError {
                detail: "scrape result has no boolean `success` field".to_string(),
            })?;

        if success {
            return Ok(Self::Success(value));
        }

        let text = |key: &str| {
            value
                .get(key)
                .and_then(serde_json::Value::as_str)
                .map(str::to_string)
        };

        Ok(Self::Failure {
            error_type: text("errorType"),
            error_message: text("errorMessage").unwrap_or_default(),
        })
    }
}
