//! Services backing each remote operation

mod bank_catalog_service;
mod scrape_service;
mod two_factor_service;

pub use bank_catalog_service::BankCatalogService;
pub use scrape_service::ScrapeService;
pub use two_factor_service::{TwoFactorService, TWO_FACTOR_SENT_MESSAGE};

use std::sync::Arc;

use israeli_bank_provider::{BankScraper, ScraperFactory, ScraperOptions};

use crate::concurrency::{BankLocks, ConcurrencyPolicy};
use crate::error::ToolFailure;
use crate::registry::BankRegistry;

/// Service context - holds every dependency
///
/// The entry point builds this once; services share it read-only.
pub struct ServiceContext {
    /// Known banks
    pub registry: Arc<BankRegistry>,
    /// Creates scraper instances
    pub scraper_factory: Arc<dyn ScraperFactory>,
    /// Per-bank call serialization
    pub bank_locks: BankLocks,
}

impl ServiceContext {
    #[must_use]
    pub fn new(
        registry: Arc<BankRegistry>,
        scraper_factory: Arc<dyn ScraperFactory>,
        policy: ConcurrencyPolicy,
    ) -> Self {
        let bank_locks = BankLocks::new(policy, registry.companies());
        Self {
            registry,
            scraper_factory,
            bank_locks,
        }
    }

    /// Create a fresh scraper for one call
    pub(crate) fn create_scraper(
        &self,
        options: ScraperOptions,
    ) -> Result<Arc<dyn BankScraper>, ToolFailure> {
        self.scraper_factory
            .create_scraper(options)
            .map_err(ToolFailure::from)
    }
}

/// Log a failed tool call at the level its cause deserves.
pub(crate) fn log_failure(operation: &str, bank_id: &str, failure: &ToolFailure) {
    match failure {
        ToolFailure::Validation { message } => {
            log::warn!("{operation} rejected for {bank_id}: {message}");
        }
        ToolFailure::Collaborator { kind, message } => {
            log::warn!("{operation} failed for {bank_id}: {kind} {message}");
        }
        ToolFailure::Unknown {
            message,
            expected: true,
        } => {
            log::warn!("{operation} raised for {bank_id}: {message}");
        }
        ToolFailure::Unknown {
            message,
            expected: false,
        } => {
            log::error!("{operation} error for {bank_id}: {message}");
        }
    }
}
