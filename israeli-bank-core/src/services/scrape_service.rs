//! Transaction fetch service

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use israeli_bank_provider::{ScrapeOutcome, ScraperOptions};

use crate::error::{CoreError, CoreResult, ToolFailure, UNKNOWN_ERROR_KIND};
use crate::services::{log_failure, ServiceContext};
use crate::types::ScrapeRequest;

/// Transaction fetch service
pub struct ScrapeService {
    ctx: Arc<ServiceContext>,
}

impl ScrapeService {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// Validate `request`, run one scrape and return the library's result
    /// object unchanged.
    ///
    /// An unknown bank or unparsable start date is rejected before any
    /// scraper is created.
    pub async fn fetch_transactions(
        &self,
        request: ScrapeRequest,
    ) -> Result<serde_json::Value, ToolFailure> {
        let result = self.run(&request).await;
        if let Err(failure) = &result {
            log_failure("fetch-transactions", &request.bank_id, failure);
        }
        result
    }

    async fn run(&self, request: &ScrapeRequest) -> Result<serde_json::Value, ToolFailure> {
        let company = self.ctx.registry.resolve(&request.bank_id)?;
        let start_date = parse_start_date(request.start_date.as_deref())?;

        let options = ScraperOptions {
            combine_installments: request.combine_installments.unwrap_or(false),
            show_browser: request.show_browser.unwrap_or(false),
            ..ScraperOptions::new(company, start_date)
        };

        log::info!(
            "Fetching {company} transactions since {} with fields {:?}",
            start_date.to_rfc3339(),
            request.credentials.present_fields()
        );

        let scraper = self.ctx.create_scraper(options)?;
        let _guard = self.ctx.bank_locks.acquire(company).await;

        match scraper.scrape(&request.credentials).await? {
            ScrapeOutcome::Success(payload) => {
                log::info!("Fetched {company} transactions");
                Ok(payload)
            }
            ScrapeOutcome::Failure {
                error_type,
                error_message,
            } => Err(ToolFailure::Collaborator {
                kind: error_type.unwrap_or_else(|| UNKNOWN_ERROR_KIND.to_string()),
                message: error_message,
            }),
        }
    }
}

/// Date-times without an offset, read as UTC.
const NAIVE_DATE_TIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Parse an optional `startDate`.
///
/// Accepts RFC 3339 timestamps, ISO 8601 date-times without an offset (UTC)
/// and `YYYY-MM-DD` (midnight UTC). Absent or blank means now.
pub fn parse_start_date(raw: Option<&str>) -> CoreResult<DateTime<Utc>> {
    let Some(value) = raw.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(Utc::now());
    };

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
        return Ok(timestamp.with_timezone(&Utc));
    }

    if let Some(local) = NAIVE_DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
    {
        return Ok(local.and_utc());
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(|date| date.and_time(NaiveTime::MIN).and_utc())
        .map_err(|_| CoreError::InvalidStartDate(value.to_string()))
}
