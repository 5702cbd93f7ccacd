// MCP Server - JSON-RPC handler over stdio
use crate::{
    errors::{McpError, McpResult},
    mcp::types::*,
    tools::ToolManager,
};
use anyhow::Result;
use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, error, info};

pub struct McpServer {
    tools: ToolManager,
}

impl McpServer {
    pub fn new(tools: ToolManager) -> Self {
        Self { tools }
    }

    pub async fn run(self) -> Result<()> {
        info!("Notion MCP server starting on stdio");
        info!("{} tool services enabled", self.tools.service_count());

        let stdin = tokio::io::stdin();
        let mut stdout = tokio::io::stdout();
        let mut reader = BufReader::new(stdin);
        let mut line = String::new();

        loop {
            line.clear();
            let n = reader.read_line(&mut line).await?;
            if n == 0 {
                break; // EOF
            }

            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            debug!("received request: {}", line);

            let response = match self.handle_line(line).await {
                Ok(resp) => resp,
                Err(e) => {
                    error!("error handling request: {}", e);
                    Some(error_response(None, McpError::Other(e)))
                }
            };

            // Notifications get no response.
            if let Some(response) = response {
                let response_str = serde_json::to_string(&response)?;
                debug!("sending response: {}", response_str);

                stdout.write_all(response_str.as_bytes()).await?;
                stdout.write_all(b"\n").await?;
                stdout.flush().await?;
            }
        }

        info!("MCP server shutting down");
        Ok(())
    }

    async fn handle_line(&self, request_str: &str) -> Result<Option<JsonRpcResponse>> {
        let request: JsonRpcRequest = serde_json::from_str(request_str)?;

        if request.method.starts_with("notifications/") {
            return Ok(None);
        }

        Ok(Some(self.handle_request(request).await))
    }

    pub async fn handle_request(&self, request: JsonRpcRequest) -> JsonRpcResponse {
        let result = match request.method.as_str() {
            "initialize" => self.initialize(request.params),
            "ping" => Ok(json!({})),
            "tools/list" => self.list_tools(),
            "tools/call" => self.call_tool(request.params).await,

            _ => Err(McpError::ToolNotFound(format!(
                "Unknown method: {}",
                request.method
            ))),
        };

        match result {
            Ok(value) => JsonRpcResponse {
                jsonrpc: "2.0".to_string(),
                id: request.id,
                result: Some(value),
                error: None,
            },
            Err(e) => error_response(request.id, e),
        }
    }

    fn initialize(&self, params: Option<Value>) -> McpResult<Value> {
        info!("initializing MCP connection");

        let client_info = params
            .and_then(|p| p.get("clientInfo").cloned())
            .and_then(|c| serde_json::from_value::<ClientInfo>(c).ok());

        if let Some(info) = &client_info {
            info!("client: {} v{}", info.name, info.version);
        }

        Ok(json!({
            "protocolVersion": "2024-11-05",
            "capabilities": {
                "tools": {
                    "listChanged": false
                },
                "logging": {}
            },
            "serverInfo": {
                "name": "Notion Explorer",
                "version": env!("CARGO_PKG_VERSION")
            }
        }))
    }

    fn list_tools(&self) -> McpResult<Value> {
        let tools = self.tools.list_all_tools();
        Ok(json!({ "tools": tools }))
    }

    async fn call_tool(&self, params: Option<Value>) -> McpResult<Value> {
        let call_request: ToolCallRequest = serde_json::from_value(
            params.ok_or_else(|| McpError::InvalidArguments("Missing params".to_string()))?,
        )?;

        let result = self
            .tools
            .call_tool(&call_request.name, call_request.arguments)
            .await?;

        // Tool results are text; anything structured is stringified.
        let text = match result {
            Value::String(s) => s,
            other => serde_json::to_string(&other)?,
        };

        let tool_result = ToolCallResult::success(text);
        Ok(serde_json::to_value(tool_result)?)
    }
}

fn error_response(id: Option<Value>, error: McpError) -> JsonRpcResponse {
    JsonRpcResponse {
        jsonrpc: "2.0".to_string(),
        id,
        result: None,
        error: Some(error.to_jsonrpc_error()),
    }
}
