use serde::Serialize;
use thiserror::Error;

/// Error type for every scraper collaborator operation.
///
/// These are faults in reaching or talking to the scraping library. A bank
/// rejecting a login is not an error here; it is a
/// [`ScrapeOutcome::Failure`](crate::ScrapeOutcome::Failure).
///
/// The `Display` form of [`BridgeFailed`](Self::BridgeFailed) is the library's
/// own exception message, so callers can forward it unchanged.
#[derive(Error, Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "code")]
pub enum ScraperError {
    /// The bridge process could not be started (missing Node.js, bad path).
    #[error("Failed to start scraper bridge: {detail}")]
    BridgeSpawn {
        /// OS-level error details.
        detail: String,
    },

    /// The library threw while running the operation.
    #[error("{message}")]
    BridgeFailed {
        /// Exception message reported by the bridge.
        message: String,
    },

    /// The bridge exited without producing a response.
    #[error("Scraper bridge exited with status {status} and no response")]
    BridgeExit {
        /// Exit status as reported by the OS.
        status: String,
    },

    /// Reading from or writing to the bridge failed.
    #[error("Scraper bridge I/O error: {detail}")]
    Io {
        /// Error details.
        detail: String,
    },

    /// The bridge produced output that could not be understood.
    #[error("Failed to parse scraper bridge response: {detail}")]
    ParseError {
        /// Details about the parse failure.
        detail: String,
    },

    /// A company identifier outside the catalog.
    #[error("Invalid bank ID: {0}")]
    InvalidCompany(String),
}

impl ScraperError {
    /// Whether the error stems from the request or the bank rather than from
    /// this process's environment. Used for log level selection.
    ///
    /// Returns `true` for `warn`-level errors, `false` for `error`-level.
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(self, Self::BridgeFailed { .. } | Self::InvalidCompany(_))
    }
}

impl From<std::io::Error> for ScraperError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            detail: err.to_string(),
        }
    }
}

/// Result alias for scraper operations.
pub type Result<T> = std::result::Result<T, ScraperError>;
