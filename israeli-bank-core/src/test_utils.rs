//! Test helpers
//!
//! Mock collaborators and convenience factories for service tests.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use israeli_bank_provider::{
    BankCatalog, BankMetadata, BankScraper, CompanyType, Result as ScraperResult, ScrapeOutcome,
    ScraperCredentials, ScraperError, ScraperFactory, ScraperOptions,
};

use crate::concurrency::ConcurrencyPolicy;
use crate::registry::BankRegistry;
use crate::services::ServiceContext;

// ===== StaticCatalog =====

/// Catalog with a fixed company list; `None` metadata means "unknown to the catalog".
pub struct StaticCatalog {
    entries: Vec<(CompanyType, Option<Vec<String>>)>,
}

impl StaticCatalog {
    pub fn new(entries: Vec<(CompanyType, Option<Vec<&str>>)>) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|(company, fields)| {
                    (
                        company,
                        fields.map(|f| f.into_iter().map(str::to_string).collect()),
                    )
                })
                .collect(),
        }
    }
}

impl BankCatalog for StaticCatalog {
    fn companies(&self) -> Vec<CompanyType> {
        self.entries.iter().map(|(company, _)| *company).collect()
    }

    fn metadata(&self, company: CompanyType) -> Option<BankMetadata> {
        self.entries
            .iter()
            .find(|(c, _)| *c == company)
            .and_then(|(c, fields)| {
                fields.as_ref().map(|login_fields| BankMetadata {
                    id: *c,
                    name: format!("Test {c}"),
                    login_fields: login_fields.clone(),
                })
            })
    }
}

// ===== MockScraperFactory =====

/// Everything the mock saw, in call order.
#[derive(Debug, Default, Clone)]
pub struct MockCalls {
    pub created: Vec<ScraperOptions>,
    pub scrapes: Vec<(CompanyType, ScraperCredentials)>,
    pub triggers: Vec<(CompanyType, String)>,
    pub token_exchanges: Vec<(CompanyType, String)>,
    /// Highest number of calls in flight at once, per bank.
    pub max_in_flight: Vec<(CompanyType, usize)>,
}

#[derive(Default)]
struct MockState {
    calls: MockCalls,
    in_flight: Vec<(CompanyType, usize)>,
}

struct MockBehavior {
    scrape_result: ScraperResult<ScrapeOutcome>,
    trigger_result: ScraperResult<()>,
    token_result: ScraperResult<serde_json::Value>,
    create_error: Option<ScraperError>,
    delay: Option<Duration>,
}

struct MockShared {
    behavior: MockBehavior,
    state: Mutex<MockState>,
}

impl MockShared {
    #[allow(clippy::unwrap_used)]
    fn record(&self, f: impl FnOnce(&mut MockCalls)) {
        f(&mut self.state.lock().unwrap().calls);
    }

    #[allow(clippy::unwrap_used)]
    fn enter(&self, company: CompanyType) {
        let mut state = self.state.lock().unwrap();
        let current = bump(&mut state.in_flight, company, 1);
        let max = slot(&mut state.calls.max_in_flight, company);
        *max = (*max).max(current);
    }

    #[allow(clippy::unwrap_used)]
    fn leave(&self, company: CompanyType) {
        let mut state = self.state.lock().unwrap();
        bump(&mut state.in_flight, company, -1);
    }

    async fn around<T>(&self, company: CompanyType, result: T) -> T {
        self.enter(company);
        if let Some(delay) = self.behavior.delay {
            tokio::time::sleep(delay).await;
        }
        self.leave(company);
        result
    }
}

fn slot(counts: &mut Vec<(CompanyType, usize)>, company: CompanyType) -> &mut usize {
    let index = match counts.iter().position(|(c, _)| *c == company) {
        Some(index) => index,
        None => {
            counts.push((company, 0));
            counts.len() - 1
        }
    };
    &mut counts[index].1
}

fn bump(counts: &mut Vec<(CompanyType, usize)>, company: CompanyType, delta: isize) -> usize {
    let count = slot(counts, company);
    *count = count.saturating_add_signed(delta);
    *count
}

/// Scraper factory whose scrapers return canned results and record every call.
pub struct MockScraperFactory {
    shared: Arc<MockShared>,
}

impl Default for MockScraperFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl MockScraperFactory {
    pub fn new() -> Self {
        Self::from_behavior(MockBehavior {
            scrape_result: Ok(ScrapeOutcome::Success(
                serde_json::json!({ "success": true, "accounts": [] }),
            )),
            trigger_result: Ok(()),
            token_result: Ok(serde_json::json!({ "longTermTwoFactorAuthToken": "token-123" })),
            create_error: None,
            delay: None,
        })
    }

    fn from_behavior(behavior: MockBehavior) -> Self {
        Self {
            shared: Arc::new(MockShared {
                behavior,
                state: Mutex::new(MockState::default()),
            }),
        }
    }

    #[allow(clippy::panic)]
    fn map_behavior(self, f: impl FnOnce(&mut MockBehavior)) -> Self {
        let mut behavior = match Arc::try_unwrap(self.shared) {
            Ok(shared) => shared.behavior,
            Err(_) => panic!("mock already shared; configure it before use"),
        };
        f(&mut behavior);
        Self::from_behavior(behavior)
    }

    pub fn with_scrape_result(self, result: ScraperResult<ScrapeOutcome>) -> Self {
        self.map_behavior(|b| b.scrape_result = result)
    }

    pub fn with_trigger_result(self, result: ScraperResult<()>) -> Self {
        self.map_behavior(|b| b.trigger_result = result)
    }

    pub fn with_token_result(self, result: ScraperResult<serde_json::Value>) -> Self {
        self.map_behavior(|b| b.token_result = result)
    }

    pub fn with_create_error(self, error: ScraperError) -> Self {
        self.map_behavior(|b| b.create_error = Some(error))
    }

    /// Every collaborator call sleeps this long before answering.
    pub fn with_delay(self, delay: Duration) -> Self {
        self.map_behavior(|b| b.delay = Some(delay))
    }

    #[allow(clippy::unwrap_used)]
    pub fn calls(&self) -> MockCalls {
        self.shared.state.lock().unwrap().calls.clone()
    }

    pub fn max_in_flight(&self, company: CompanyType) -> usize {
        self.calls()
            .max_in_flight
            .iter()
            .find(|(c, _)| *c == company)
            .map_or(0, |(_, n)| *n)
    }
}

impl ScraperFactory for MockScraperFactory {
    fn create_scraper(&self, options: ScraperOptions) -> ScraperResult<Arc<dyn BankScraper>> {
        if let Some(err) = &self.shared.behavior.create_error {
            return Err(err.clone());
        }
        let company = options.company_id;
        self.shared.record(|calls| calls.created.push(options));
        Ok(Arc::new(MockScraper {
            company,
            shared: Arc::clone(&self.shared),
        }))
    }
}

struct MockScraper {
    company: CompanyType,
    shared: Arc<MockShared>,
}

#[async_trait]
impl BankScraper for MockScraper {
    fn company(&self) -> CompanyType {
        self.company
    }

    async fn scrape(&self, credentials: &ScraperCredentials) -> ScraperResult<ScrapeOutcome> {
        self.shared
            .record(|calls| calls.scrapes.push((self.company, credentials.clone())));
        let result = self.shared.behavior.scrape_result.clone();
        self.shared.around(self.company, result).await
    }

    async fn trigger_two_factor_auth(&self, phone_number: &str) -> ScraperResult<()> {
        self.shared
            .record(|calls| calls.triggers.push((self.company, phone_number.to_string())));
        let result = self.shared.behavior.trigger_result.clone();
        self.shared.around(self.company, result).await
    }

    async fn get_long_term_two_factor_token(
        &self,
        otp_code: &str,
    ) -> ScraperResult<serde_json::Value> {
        self.shared
            .record(|calls| calls.token_exchanges.push((self.company, otp_code.to_string())));
        let result = self.shared.behavior.token_result.clone();
        self.shared.around(self.company, result).await
    }
}

// ===== Factory helpers =====

/// Context over the builtin registry and the given mock.
pub fn create_test_context(
    factory: Arc<MockScraperFactory>,
    policy: ConcurrencyPolicy,
) -> Arc<ServiceContext> {
    Arc::new(ServiceContext::new(
        Arc::new(BankRegistry::builtin()),
        factory,
        policy,
    ))
}
