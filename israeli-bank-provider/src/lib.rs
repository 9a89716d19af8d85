//! # israeli-bank-provider
//!
//! Boundary between Rust and the `israeli-bank-scrapers` Node.js library.
//!
//! ## Contents
//!
//! - [`CompanyType`] and the bank catalog ([`get_all_bank_metadata`],
//!   [`BuiltinBankCatalog`]): which banks exist and which login fields each reads.
//! - [`BankScraper`] / [`ScraperFactory`]: the collaborator interface. A
//!   scraper is created per bank and per set of [`ScraperOptions`] and exposes
//!   `scrape`, `trigger_two_factor_auth` and `get_long_term_two_factor_token`.
//! - [`NodeBridgeFactory`]: the production implementation, running the
//!   embedded bridge script ([`BRIDGE_SCRIPT`]) under Node.js for each call.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use israeli_bank_provider::{
//!     CompanyType, NodeBridgeConfig, NodeBridgeFactory, ScrapeOutcome, ScraperCredentials,
//!     ScraperFactory, ScraperOptions,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let factory = NodeBridgeFactory::new(NodeBridgeConfig::new(
//!         "node",
//!         "/opt/israeli-bank-mcp/scraper-bridge.mjs",
//!     ));
//!
//!     let scraper = factory.create_scraper(ScraperOptions::new(
//!         CompanyType::Leumi,
//!         chrono::Utc::now() - chrono::Duration::days(30),
//!     ))?;
//!
//!     let credentials = ScraperCredentials {
//!         username: Some("user".to_string()),
//!         password: Some("secret".to_string()),
//!         ..Default::default()
//!     };
//!
//!     match scraper.scrape(&credentials).await? {
//!         ScrapeOutcome::Success(result) => println!("{result}"),
//!         ScrapeOutcome::Failure { error_type, error_message } => {
//!             eprintln!("{}: {error_message}", error_type.as_deref().unwrap_or("?"));
//!         }
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Operations return [`Result<T, ScraperError>`](ScraperError). A bank
//! rejecting the login is **not** an error; it is
//! [`ScrapeOutcome::Failure`].

mod bridge;
mod catalog;
mod error;
mod traits;
mod types;
mod utils;

pub use error::{Result, ScraperError};

pub use catalog::{BuiltinBankCatalog, bank_metadata, get_all_bank_metadata};

pub use traits::{BankCatalog, BankScraper, ScraperFactory};

pub use types::{BankMetadata, CompanyType, ScrapeOutcome, ScraperCredentials, ScraperOptions};

pub use bridge::{
    BRIDGE_SCRIPT, NodeBridgeConfig, NodeBridgeFactory, NodeBridgeScraper, install_bridge_script,
};

pub use utils::log_sanitizer;
