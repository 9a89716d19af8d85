//! MCP Server entry point for Israeli Bank MCP
//!
//! Starts the MCP server with stdio transport. Scraping runs in Node.js
//! child processes through the bridge script, which is installed into the
//! local data directory on first start.

mod config;
mod schemas;
mod server;

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use israeli_bank_core::{BankRegistry, ServiceContext};
use israeli_bank_provider::{install_bridge_script, NodeBridgeFactory};
use rmcp::ServiceExt;
use server::IsraeliBankMcp;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::McpConfig;

async fn build_server() -> anyhow::Result<IsraeliBankMcp> {
    let config = McpConfig::from_env()?;

    install_bridge_script(&config.bridge_script)
        .await
        .with_context(|| {
            format!(
                "Failed to install scraper bridge at {}",
                config.bridge_script.display()
            )
        })?;

    tracing::info!(
        "Using {} to run {} ({} concurrency)",
        config.node_binary.display(),
        config.bridge_script.display(),
        config.concurrency
    );

    let registry = Arc::new(BankRegistry::builtin());
    let factory = Arc::new(NodeBridgeFactory::new(config.bridge_config()));
    let ctx = Arc::new(ServiceContext::new(
        Arc::clone(&registry),
        factory,
        config.concurrency,
    ));

    tracing::info!("Bank registry loaded with {} banks", registry.len());
    Ok(IsraeliBankMcp::new(&ctx))
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize tracing to stderr (MCP uses stdout for protocol)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .without_time()
                .with_ansi(false),
        )
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    tracing::info!("Starting Israeli Bank MCP Server");

    let mcp_server = match build_server().await {
        Ok(server) => server,
        Err(e) => {
            tracing::error!("Startup failed: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    // Start serving via stdio
    tracing::info!("Starting MCP server on stdio transport");
    let service = match mcp_server.serve(rmcp::transport::stdio()).await {
        Ok(s) => s,
        Err(e) => {
            tracing::error!("Failed to start MCP server: {}", e);
            return ExitCode::FAILURE;
        }
    };

    // Wait for the server to complete
    if let Err(e) = service.waiting().await {
        tracing::error!("MCP server error: {}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
