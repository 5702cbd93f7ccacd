// Tool Service Trait - Common interface for tool-providing services
use crate::{errors::McpResult, mcp::McpTool};
use async_trait::async_trait;
use serde_json::Value;

#[async_trait]
pub trait ToolService: Send + Sync {
    /// Service identifier (notion, etc.)
    fn id(&self) -> &'static str;

    /// List all tools this service exposes
    fn list_tools(&self) -> Vec<McpTool>;

    /// Call a tool with arguments
    async fn call_tool(&self, tool: &str, args: Value) -> McpResult<Value>;
}
