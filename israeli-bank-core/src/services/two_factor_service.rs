//! Two-factor authentication service

use std::sync::Arc;

use chrono::Utc;
use israeli_bank_provider::ScraperOptions;

use crate::error::{CoreError, ToolFailure};
use crate::services::{log_failure, ServiceContext};
use crate::types::{TwoFactorAction, TwoFactorRequest};

/// Acknowledgement message returned after a code was dispatched.
pub const TWO_FACTOR_SENT_MESSAGE: &str = "2FA code sent";

/// Two-factor authentication service
///
/// Each call creates its own scraper; nothing links a `trigger` to a later
/// `get-token`.
pub struct TwoFactorService {
    ctx: Arc<ServiceContext>,
}

impl TwoFactorService {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    pub async fn execute(&self, request: TwoFactorRequest) -> Result<serde_json::Value, ToolFailure> {
        let result = self.run(&request).await;
        if let Err(failure) = &result {
            log_failure("two-factor-auth", &request.bank_id, failure);
        }
        result
    }

    async fn run(&self, request: &TwoFactorRequest) -> Result<serde_json::Value, ToolFailure> {
        let company = self.ctx.registry.resolve(&request.bank_id)?;
        let action: TwoFactorAction = request.action.parse()?;

        let otp_code = match action {
            TwoFactorAction::Trigger => None,
            TwoFactorAction::GetToken => Some(
                request
                    .otp_code
                    .as_deref()
                    .filter(|code| !code.trim().is_empty())
                    .ok_or(CoreError::InvalidTwoFactorAction)?,
            ),
        };

        let scraper = self
            .ctx
            .create_scraper(ScraperOptions::new(company, Utc::now()))?;
        let _guard = self.ctx.bank_locks.acquire(company).await;

        match otp_code {
            None => {
                scraper.trigger_two_factor_auth(&request.phone_number).await?;
                log::info!("Sent {company} 2FA code");
                Ok(serde_json::json!({
                    "success": true,
                    "message": TWO_FACTOR_SENT_MESSAGE,
                }))
            }
            Some(code) => {
                let token = scraper.get_long_term_two_factor_token(code).await?;
                log::info!("Exchanged {company} 2FA code for long-term token");
                Ok(token)
            }
        }
    }
}
