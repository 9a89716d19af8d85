//! MCP Server implementation for Israeli Bank MCP.
//!
//! Exposes the `banks://list` resource and two tools (`fetch-transactions`,
//! `two-factor-auth`) to AI agents.

use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{
        AnnotateAble, CallToolResult, Content, Implementation, ListResourcesResult,
        PaginatedRequestParams, ProtocolVersion, RawResource, ReadResourceRequestParams,
        ReadResourceResult, ResourceContents, ServerCapabilities, ServerInfo,
    },
    service::RequestContext,
    tool, tool_handler, tool_router, ErrorData as McpError, RoleServer, ServerHandler,
};
use std::sync::Arc;

use israeli_bank_core::services::{
    BankCatalogService, ScrapeService, ServiceContext, TwoFactorService,
};
use israeli_bank_core::ToolFailure;

use crate::schemas::{FetchTransactionsParams, TwoFactorAuthParams};

/// URI of the supported-bank list resource.
pub const BANKS_LIST_URI: &str = "banks://list";

const BANKS_LIST_NAME: &str = "banks";

/// Sanitize error messages to prevent sensitive information leakage.
///
/// Logs the full error to stderr but returns a generic message to the client.
fn sanitize_internal_error(error: impl std::fmt::Display, context: &str) -> McpError {
    log::error!("{context} error: {error}");
    McpError::internal_error(
        format!("{context} failed - check server logs for details"),
        None,
    )
}

/// Render a service outcome as a tool result.
///
/// Success payloads go out as-is; failures become an error-flagged
/// `{ "error": kind, "message": message }` document.
fn tool_result(
    outcome: Result<serde_json::Value, ToolFailure>,
    tool_name: &str,
) -> Result<CallToolResult, McpError> {
    let (payload, is_error) = match outcome {
        Ok(payload) => (payload, false),
        Err(failure) => (failure.to_payload(), true),
    };

    let json = serde_json::to_string(&payload)
        .map_err(|e| sanitize_internal_error(e, &format!("Serialize {tool_name} result")))?;

    Ok(if is_error {
        CallToolResult::error(vec![Content::text(json)])
    } else {
        CallToolResult::success(vec![Content::text(json)])
    })
}

/// MCP Server for Israeli Bank MCP.
///
/// Provides AI agents with access to Israeli bank and credit card
/// transactions through the Model Context Protocol.
#[derive(Clone)]
pub struct IsraeliBankMcp {
    /// Supported-bank list.
    catalog_service: Arc<BankCatalogService>,
    /// Transaction fetching.
    scrape_service: Arc<ScrapeService>,
    /// Two-factor authentication.
    two_factor_service: Arc<TwoFactorService>,
    /// Tool router generated by macro.
    tool_router: ToolRouter<Self>,
}

impl IsraeliBankMcp {
    /// Create a new MCP server instance.
    #[must_use]
    pub fn new(ctx: &Arc<ServiceContext>) -> Self {
        Self {
            catalog_service: Arc::new(BankCatalogService::new(Arc::clone(&ctx.registry))),
            scrape_service: Arc::new(ScrapeService::new(Arc::clone(ctx))),
            two_factor_service: Arc::new(TwoFactorService::new(Arc::clone(ctx))),
            tool_router: Self::tool_router(),
        }
    }

    fn banks_list_json(&self) -> Result<String, McpError> {
        serde_json::to_string(&self.catalog_service.list_banks())
            .map_err(|e| sanitize_internal_error(e, "Serialize bank list"))
    }
}

#[tool_router]
impl IsraeliBankMcp {
    /// Fetch transactions from a bank.
    #[tool(
        name = "fetch-transactions",
        description = "Log in to an Israeli bank or credit card company and fetch its accounts and transactions. \
                       See banks://list for the credential fields each bank requires."
    )]
    async fn fetch_transactions(
        &self,
        Parameters(params): Parameters<FetchTransactionsParams>,
    ) -> Result<CallToolResult, McpError> {
        let outcome = self.scrape_service.fetch_transactions(params.into()).await;
        tool_result(outcome, "fetch-transactions")
    }

    /// Trigger or complete two-factor authentication.
    #[tool(
        name = "two-factor-auth",
        description = "Two-factor authentication: `trigger` sends a one-time code to the phone, \
                       `get-token` exchanges the received code for a long-term token to pass as \
                       credentials.longTermTwoFactorAuthToken"
    )]
    async fn two_factor_auth(
        &self,
        Parameters(params): Parameters<TwoFactorAuthParams>,
    ) -> Result<CallToolResult, McpError> {
        let outcome = self.two_factor_service.execute(params.into()).await;
        tool_result(outcome, "two-factor-auth")
    }
}

#[tool_handler]
impl ServerHandler for IsraeliBankMcp {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(
                "Israeli Bank MCP Server - Fetch transactions from Israeli banks and credit card companies. \
                 Read banks://list for supported bank ids and the credentials each requires, \
                 then call fetch-transactions. Banks that use SMS verification need two-factor-auth \
                 (trigger, then get-token) to obtain a long-term token first."
                    .into(),
            ),
        }
    }

    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, McpError> {
        let mut resource = RawResource::new(BANKS_LIST_URI, BANKS_LIST_NAME);
        resource.description = Some("Supported banks and their required credential fields".into());
        resource.mime_type = Some("application/json".into());

        Ok(ListResourcesResult::with_all_items(vec![
            resource.no_annotation()
        ]))
    }

    async fn read_resource(
        &self,
        request: ReadResourceRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, McpError> {
        if request.uri != BANKS_LIST_URI {
            log::warn!("Unknown resource requested: {}", request.uri);
            return Err(McpError::resource_not_found(
                format!("Resource not found: {}", request.uri),
                None,
            ));
        }

        Ok(ReadResourceResult {
            contents: vec![ResourceContents::text(
                self.banks_list_json()?,
                BANKS_LIST_URI,
            )],
        })
    }
}

#[cfg(test)]
#[path = "test_mocks.rs"]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
pub(crate) mod test_mocks;

#[cfg(test)]
#[path = "server_tests.rs"]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests;

#[cfg(test)]
#[path = "client_integration_tests.rs"]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod client_integration_tests;
