// Notion MCP Service Configuration
use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Current Notion API version sent with every request.
pub const DEFAULT_NOTION_VERSION: &str = "2022-06-28";

const DEFAULT_API_BASE: &str = "https://api.notion.com";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotionConfig {
    pub service_port: u16,
    pub host: String,

    /// Base URL for the Notion REST API (overridable for testing).
    pub api_base: String,
    /// Value of the `Notion-Version` header.
    pub api_version: String,
}

impl NotionConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            service_port: std::env::var("MCP_SERVICE_PORT")
                .unwrap_or_else(|_| "3004".to_string())
                .parse()?,
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),

            api_base: std::env::var("NOTION_API_BASE")
                .unwrap_or_else(|_| DEFAULT_API_BASE.to_string()),
            api_version: std::env::var("NOTION_VERSION")
                .unwrap_or_else(|_| DEFAULT_NOTION_VERSION.to_string()),
        })
    }
}
