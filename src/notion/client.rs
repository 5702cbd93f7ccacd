// Notion HTTP Client Adapter
use serde_json::Value;
use tracing::debug;

use crate::config::NotionConfig;
use crate::errors::{McpError, McpResult};

/// Environment variable holding the integration token.
pub const API_KEY_ENV: &str = "NOTION_API_KEY";

/// Outcome of one Notion API call. Non-2xx responses are not errors at this
/// layer; formatters fold them into their text output.
#[derive(Debug)]
pub enum ApiResponse {
    Success(Value),
    Failure { status: u16, body: String },
}

pub struct NotionClient {
    api_base: String,
    api_version: String,
    client: reqwest::Client,
}

impl NotionClient {
    pub fn new(config: &NotionConfig) -> Self {
        Self {
            api_base: config.api_base.trim_end_matches('/').to_string(),
            api_version: config.api_version.clone(),
            client: reqwest::Client::new(),
        }
    }

    /// Resolve the bearer token from the environment. Re-read on every call
    /// so a token handed to the process after startup is picked up.
    pub fn api_token(&self) -> McpResult<String> {
        std::env::var(API_KEY_ENV).map_err(|_| {
            McpError::Unauthorized(format!(
                "{API_KEY_ENV} environment variable is not set. Please set it before making API calls."
            ))
        })
    }

    pub async fn get(&self, path: &str) -> McpResult<ApiResponse> {
        let token = self.api_token()?;
        let url = format!("{}{}", self.api_base, path);
        debug!(%url, "GET Notion API");

        let response = self
            .client
            .get(&url)
            .header("Authorization", format!("Bearer {token}"))
            .header("Content-Type", "application/json")
            .header("Notion-Version", &self.api_version)
            .send()
            .await?;

        Self::into_api_response(response).await
    }

    pub async fn post(&self, path: &str, payload: &Value) -> McpResult<ApiResponse> {
        let token = self.api_token()?;
        let url = format!("{}{}", self.api_base, path);
        debug!(%url, %payload, "POST Notion API");

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {token}"))
            .header("Content-Type", "application/json")
            .header("Notion-Version", &self.api_version)
            .json(payload)
            .send()
            .await?;

        Self::into_api_response(response).await
    }

    async fn into_api_response(response: reqwest::Response) -> McpResult<ApiResponse> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Ok(ApiResponse::Failure {
                status: status.as_u16(),
                body,
            });
        }
        let body: Value = response.json().await?;
        Ok(ApiResponse::Success(body))
    }
}
