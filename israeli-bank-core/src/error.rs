//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

// Re-export library error type
pub use israeli_bank_provider::ScraperError;

/// Wire kind for every failure that is not a collaborator-reported one.
pub const UNKNOWN_ERROR_KIND: &str = "UNKNOWN_ERROR";

/// Message used when a fault carries no message of its own.
pub const UNKNOWN_ERROR_MESSAGE: &str = "Unknown error occurred";

/// Core layer error type
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// Bank identifier outside the registry
    #[error("Invalid bank ID: {0}")]
    InvalidBankId(String),

    /// Unparsable start date
    #[error("Invalid start date: {0}")]
    InvalidStartDate(String),

    /// Unknown 2FA action, or `get-token` without a code
    #[error("Invalid action or missing OTP code")]
    InvalidTwoFactorAction,

    /// Unknown concurrency policy name
    #[error("Invalid concurrency policy: {0}")]
    InvalidConcurrencyPolicy(String),

    /// Scraper error (converting from library)
    #[error("{0}")]
    Scraper(#[from] ScraperError),
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;

/// Why a tool invocation did not produce a success payload.
///
/// On the wire both [`Validation`](Self::Validation) and
/// [`Unknown`](Self::Unknown) carry the `UNKNOWN_ERROR` kind; only
/// [`Collaborator`](Self::Collaborator) forwards a kind of its own.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ToolFailure {
    /// The request was rejected before the collaborator was invoked.
    #[error("{message}")]
    Validation { message: String },

    /// The collaborator ran and reported a failure.
    #[error("{kind}: {message}")]
    Collaborator { kind: String, message: String },

    /// The collaborator could not be driven.
    ///
    /// `expected` is set when the library itself raised the error (a bank
    /// timeout, a site change) rather than this process's environment.
    #[error("{message}")]
    Unknown { message: String, expected: bool },
}

impl ToolFailure {
    /// Error kind as sent to the client.
    pub fn kind(&self) -> &str {
        match self {
            Self::Validation { .. } | Self::Unknown { .. } => UNKNOWN_ERROR_KIND,
            Self::Collaborator { kind, .. } => kind,
        }
    }

    /// Error message as sent to the client.
    pub fn message(&self) -> &str {
        match self {
            Self::Validation { message }
            | Self::Collaborator { message, .. }
            | Self::Unknown { message, .. } => message,
        }
    }

    /// `{ "error": kind, "message": message }`
    pub fn to_payload(&self) -> serde_json::Value {
        serde_json::json!({
            "error": self.kind(),
            "message": self.message(),
        })
    }
}

impl From<CoreError> for ToolFailure {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Scraper(e) => Self::from(e),
            other => Self::Validation {
                message: other.to_string(),
            },
        }
    }
}

impl From<ScraperError> for ToolFailure {
    fn from(err: ScraperError) -> Self {
        match err {
            ScraperError::InvalidCompany(_) => Self::Validation {
                message: err.to_string(),
            },
            other => {
                let expected = other.is_expected();
                let message = other.to_string();
                Self::Unknown {
                    message: if message.trim().is_empty() {
                        UNKNOWN_ERROR_MESSAGE.to_string()
                    } else {
                        message
                    },
                    expected,
                }
            }
        }
    }
}
