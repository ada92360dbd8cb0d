//! Google Search MCP Server
//!
//! Web search via the Google Custom Search JSON API plus webpage content
//! analysis, served over MCP stdio.
//!
//! # Configuration
//! Set `GOOGLE_API_KEY` and `GOOGLE_SEARCH_ENGINE_ID` env vars, or configure
//! them in the platform config directory (`google-search-mcp/config.toml`).

use rmcp::{transport::stdio, ServiceExt};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod config;
mod extractor;
mod fetch;
mod handlers;
mod params;
mod search;
mod server;
mod types;

use config::Config;
use server::GoogleSearchMcpServer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing("google_search_mcp")?;

    tracing::info!("Starting Google Search MCP Server");

    let config = Config::load()?;
    let server = GoogleSearchMcpServer::new(config);
    let service = server.serve(stdio()).await?;

    tracing::info!("Server running, waiting for requests...");

    tokio::select! {
        quit = service.waiting() => {
            quit?;
            tracing::info!("Transport closed");
        }
        _ = shutdown_signal() => {
            tracing::info!("Shutdown signal received");
        }
    }

    tracing::info!("Server shutting down");
    Ok(())
}

/// Logging goes to stderr; stdout carries the MCP protocol. Set
/// `LOG_FORMAT=json` for structured output.
fn init_tracing(crate_name: &str) -> anyhow::Result<()> {
    let directive = format!("{}=info", crate_name);
    let filter = EnvFilter::from_default_env().add_directive(directive.parse()?);

    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(filter);

    if use_json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(false),
            )
            .init();
    }

    Ok(())
}

/// Resolves on SIGINT or, on unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install SIGINT handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}
