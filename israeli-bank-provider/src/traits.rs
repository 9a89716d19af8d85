use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{BankMetadata, CompanyType, ScrapeOutcome, ScraperCredentials, ScraperOptions};

/// One scraper instance, bound to a bank and a set of [`ScraperOptions`].
///
/// Instances carry no session between calls: a `trigger_two_factor_auth`
/// on one instance and a `get_long_term_two_factor_token` on another are
/// unrelated as far as this trait is concerned.
#[async_trait]
pub trait BankScraper: Send + Sync {
    /// Bank this scraper was created for.
    fn company(&self) -> CompanyType;

    /// Log in and fetch transactions.
    ///
    /// A bank-side failure (wrong password, blocked account, ...) is
    /// `Ok(ScrapeOutcome::Failure { .. })`; `Err` means the library could not
    /// be driven at all.
    async fn scrape(&self, credentials: &ScraperCredentials) -> Result<ScrapeOutcome>;

    /// Ask the bank to send a one-time code to `phone_number`.
    ///
    /// Not idempotent: every call dispatches another message.
    async fn trigger_two_factor_auth(&self, phone_number: &str) -> Result<()>;

    /// Exchange a one-time code for the long-term token payload.
    async fn get_long_term_two_factor_token(&self, otp_code: &str) -> Result<serde_json::Value>;
}

/// Creates [`BankScraper`] instances.
pub trait ScraperFactory: Send + Sync {
    fn create_scraper(&self, options: ScraperOptions) -> Result<Arc<dyn BankScraper>>;
}

/// Source of the supported-bank catalog.
pub trait BankCatalog: Send + Sync {
    /// Every company the catalog knows, in display order.
    fn companies(&self) -> Vec<CompanyType>;

    /// Metadata for `company`, `None` when the catalog has none.
    fn metadata(&self, company: CompanyType) -> Option<BankMetadata>;
}
