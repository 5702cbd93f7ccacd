// Notion MCP Service Main Entry Point
// Speaks the Model Context Protocol over stdio and keeps a small HTTP
// sidecar for health checks. Logs go to stderr so stdout stays a clean
// protocol channel.
use std::sync::Arc;

use actix_web::{web, App, HttpResponse, HttpServer};
use anyhow::Result;
use notion_mcp::{notion::client::API_KEY_ENV, McpServer, NotionConfig, NotionService, ToolManager};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

async fn health() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "notion-mcp"
    }))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    info!("Starting Notion MCP service");

    // .env is a startup-time fallback; the token itself is re-read from the
    // environment on every call.
    dotenv::dotenv().ok();
    let config = NotionConfig::from_env()?;

    if std::env::var(API_KEY_ENV).is_err() {
        warn!("{API_KEY_ENV} environment variable is not set");
        warn!("Please provide it when registering this server with your MCP client");
    }

    let mut tools = ToolManager::new();
    tools.register(Arc::new(NotionService::new(&config)));

    info!(
        services = tools.service_count(),
        "Initialized tool services"
    );

    // Minimal HTTP server for health checks only
    let host = config.host.clone();
    let port = config.service_port;
    let http_handle = tokio::spawn(async move {
        info!("Starting health check server on port {}", port);
        HttpServer::new(move || App::new().route("/health", web::get().to(health)))
            .bind((host.as_str(), port))
            .expect("Failed to bind health check server")
            .run()
            .await
            .expect("Health check server failed");
    });

    // MCP server on stdio (main protocol)
    let server = McpServer::new(tools);
    tokio::spawn(async move {
        match server.run().await {
            Ok(_) => {
                tracing::warn!("MCP server finished");
            }
            Err(e) => {
                tracing::error!("MCP server error: {}", e);
            }
        }
    });

    info!("Notion MCP service running");
    info!("   MCP Protocol: stdio");
    info!("   Health Check: http://{}:{}", config.host, port);
    info!("   Tools: search_notion_pages, get_page_content, get_database_content, get_block_children");

    // Keep the service alive as long as the health server is; the stdio
    // loop may exit early when no client is attached.
    if let Err(e) = http_handle.await {
        tracing::error!("HTTP server task error: {}", e);
    }

    Ok(())
}
