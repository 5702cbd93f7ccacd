// Notion MCP Service - Model Context Protocol server for the Notion API
// Exposes search, page, database and block-children tools that return
// human-readable text summaries instead of raw JSON.

pub mod config;
pub mod errors;
pub mod mcp;
pub mod notion;
pub mod tools;

pub use config::NotionConfig;
pub use errors::{McpError, McpResult};
pub use mcp::McpServer;
pub use notion::NotionService;
pub use tools::{ToolManager, ToolService};
