use super::*;

use std::sync::Mutex;

use async_trait::async_trait;
use israeli_bank_core::{BankRegistry, ConcurrencyPolicy};
use israeli_bank_provider::{
    BankScraper, CompanyType, Result as ScraperResult, ScrapeOutcome, ScraperCredentials,
    ScraperError, ScraperFactory, ScraperOptions,
};

/// Calls seen by [`MockScraperFactory`].
#[derive(Debug, Default, Clone)]
pub struct RecordedCalls {
    pub created: Vec<ScraperOptions>,
    pub scrapes: Vec<ScraperCredentials>,
    pub triggers: Vec<String>,
    pub token_exchanges: Vec<String>,
}

/// Scraper factory returning canned results.
pub struct MockScraperFactory {
    pub scrape_result: ScraperResult<ScrapeOutcome>,
    pub trigger_result: ScraperResult<()>,
    pub token_result: ScraperResult<serde_json::Value>,
    calls: Arc<Mutex<RecordedCalls>>,
}

impl Default for MockScraperFactory {
    fn default() -> Self {
        Self {
            scrape_result: Ok(ScrapeOutcome::Success(sample_scrape_result())),
            trigger_result: Ok(()),
            token_result: Ok(serde_json::json!({ "longTermTwoFactorAuthToken": "long-term-token" })),
            calls: Arc::new(Mutex::new(RecordedCalls::default())),
        }
    }
}

impl MockScraperFactory {
    pub fn failing_scrape(error_type: &str, error_message: &str) -> Self {
        Self {
            scrape_result: Ok(ScrapeOutcome::Failure {
                error_type: Some(error_type.to_string()),
                error_message: error_message.to_string(),
            }),
            ..Self::default()
        }
    }

    pub fn untyped_failing_scrape(error_message: &str) -> Self {
        Self {
            scrape_result: Ok(ScrapeOutcome::Failure {
                error_type: None,
                error_message: error_message.to_string(),
            }),
            ..Self::default()
        }
    }

    pub fn faulting_scrape(message: &str) -> Self {
        Self {
            scrape_result: Err(ScraperError::BridgeFailed {
                message: message.to_string(),
            }),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> RecordedCalls {
        self.calls.lock().unwrap().clone()
    }
}

impl ScraperFactory for MockScraperFactory {
    fn create_scraper(&self, options: ScraperOptions) -> ScraperResult<Arc<dyn BankScraper>> {
        let company = options.company_id;
        self.calls.lock().unwrap().created.push(options);
        Ok(Arc::new(MockScraper {
            company,
            scrape_result: self.scrape_result.clone(),
            trigger_result: self.trigger_result.clone(),
            token_result: self.token_result.clone(),
            calls: Arc::clone(&self.calls),
        }))
    }
}

struct MockScraper {
    company: CompanyType,
    scrape_result: ScraperResult<ScrapeOutcome>,
    trigger_result: ScraperResult<()>,
    token_result: ScraperResult<serde_json::Value>,
    calls: Arc<Mutex<RecordedCalls>>,
}

#[async_trait]
impl BankScraper for MockScraper {
    fn company(&self) -> CompanyType {
        self.company
    }

    async fn scrape(&self, credentials: &ScraperCredentials) -> ScraperResult<ScrapeOutcome> {
        self.calls.lock().unwrap().scrapes.push(credentials.clone());
        self.scrape_result.clone()
    }

    async fn trigger_two_factor_auth(&self, phone_number: &str) -> ScraperResult<()> {
        self.calls
            .lock()
            .unwrap()
            .triggers
            .push(phone_number.to_string());
        self.trigger_result.clone()
    }

    async fn get_long_term_two_factor_token(
        &self,
        otp_code: &str,
    ) -> ScraperResult<serde_json::Value> {
        self.calls
            .lock()
            .unwrap()
            .token_exchanges
            .push(otp_code.to_string());
        self.token_result.clone()
    }
}

pub fn sample_scrape_result() -> serde_json::Value {
    serde_json::json!({
        "success": true,
        "accounts": [{
            "accountNumber": "12-345-678901",
            "balance": 1520.75,
            "txns": [{
                "type": "normal",
                "date": "2024-01-10T22:00:00.000Z",
                "processedDate": "2024-01-11T22:00:00.000Z",
                "originalAmount": -120,
                "originalCurrency": "ILS",
                "chargedAmount": -120,
                "description": "SUPER-PHARM",
                "status": "completed"
            }]
        }]
    })
}

pub(super) fn build_server(factory: Arc<MockScraperFactory>) -> IsraeliBankMcp {
    let ctx = Arc::new(ServiceContext::new(
        Arc::new(BankRegistry::builtin()),
        factory,
        ConcurrencyPolicy::PerBank,
    ));
    IsraeliBankMcp::new(&ctx)
}

pub(super) fn result_json(result: &CallToolResult) -> serde_json::Value {
    let text = result
        .content
        .first()
        .and_then(|c| c.raw.as_text())
        .map(|t| t.text.as_str())
        .expect("expected text content in result");
    serde_json::from_str(text).unwrap()
}
