// Notion tool service - maps MCP tool calls onto the formatters
use async_trait::async_trait;
use serde_json::{json, Value};

use super::client::NotionClient;
use super::{databases, pages, search};
use crate::config::NotionConfig;
use crate::errors::{McpError, McpResult};
use crate::mcp::McpTool;
use crate::tools::ToolService;

const DEFAULT_PAGE_SIZE: u32 = 10;
const DEFAULT_MAX_PAGES: u32 = 10;

pub struct NotionService {
    client: NotionClient,
}

impl NotionService {
    pub fn new(config: &NotionConfig) -> Self {
        Self {
            client: NotionClient::new(config),
        }
    }
}

#[async_trait]
impl ToolService for NotionService {
    fn id(&self) -> &'static str {
        "notion"
    }

    fn list_tools(&self) -> Vec<McpTool> {
        vec![
            McpTool {
                name: "search_notion_pages".to_string(),
                description: "Search for pages and databases in Notion".to_string(),
                input_schema: Some(json!({
                    "type": "object",
                    "properties": {
                        "query": {
                            "type": "string",
                            "description": "Optional search term to find specific pages/databases"
                        },
                        "filter_type": {
                            "type": "string",
                            "enum": ["page", "database"],
                            "description": "Optional filter to limit results to one object type"
                        },
                        "page_size": {
                            "type": "integer",
                            "description": "Number of results to return (max 100)",
                            "default": 10
                        }
                    }
                })),
            },
            McpTool {
                name: "get_page_content".to_string(),
                description: "Get the content of a specific Notion page".to_string(),
                input_schema: Some(json!({
                    "type": "object",
                    "properties": {
                        "page_id": {
                            "type": "string",
                            "description": "The ID of the Notion page to retrieve"
                        }
                    },
                    "required": ["page_id"]
                })),
            },
            McpTool {
                name: "get_database_content".to_string(),
                description: "Get the structure and entries of a Notion database".to_string(),
                input_schema: Some(json!({
                    "type": "object",
                    "properties": {
                        "database_id": {
                            "type": "string",
                            "description": "The ID of the Notion database to retrieve"
                        },
                        "max_pages": {
                            "type": "integer",
                            "description": "Maximum number of entries to return (max 100)",
                            "default": 10
                        }
                    },
                    "required": ["database_id"]
                })),
            },
            McpTool {
                name: "get_block_children".to_string(),
                description: "Get the child blocks of a specific Notion block".to_string(),
                input_schema: Some(json!({
                    "type": "object",
                    "properties": {
                        "block_id": {
                            "type": "string",
                            "description": "The ID of the Notion block whose children to retrieve"
                        }
                    },
                    "required": ["block_id"]
                })),
            },
        ]
    }

    async fn call_tool(&self, tool: &str, args: Value) -> McpResult<Value> {
        let text = match tool {
            "search_notion_pages" => {
                let query = args.get("query").and_then(Value::as_str);
                let filter_type = args.get("filter_type").and_then(Value::as_str);
                let page_size = arg_u32(&args, "page_size", DEFAULT_PAGE_SIZE);
                search::search_notion_pages(&self.client, query, filter_type, page_size).await?
            }
            "get_page_content" => {
                let page_id = require_str(&args, "page_id")?;
                pages::get_page_content(&self.client, page_id).await?
            }
            "get_database_content" => {
                let database_id = require_str(&args, "database_id")?;
                let max_pages = arg_u32(&args, "max_pages", DEFAULT_MAX_PAGES);
                databases::get_database_content(&self.client, database_id, max_pages).await?
            }
            "get_block_children" => {
                let block_id = require_str(&args, "block_id")?;
                pages::get_block_children(&self.client, block_id).await?
            }
            _ => {
                return Err(McpError::ToolNotFound(format!(
                    "Unknown Notion tool: {tool}"
                )));
            }
        };

        Ok(Value::String(text))
    }
}

fn require_str<'a>(args: &'a Value, key: &str) -> McpResult<&'a str> {
    args.get(key)
        .and_then(Value::as_str)
        .ok_or_else(|| McpError::InvalidArguments(format!("Missing {key}")))
}

/// Read an optional integer argument, saturating oversized values so the
/// formatters' own clamps apply.
fn arg_u32(args: &Value, key: &str, default: u32) -> u32 {
    args.get(key)
        .and_then(Value::as_u64)
        .map(|n| u32::try_from(n).unwrap_or(u32::MAX))
        .unwrap_or(default)
}
