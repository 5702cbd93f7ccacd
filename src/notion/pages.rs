// Page and block-children formatters
use serde::Deserialize;
use serde_json::Value;

use super::blocks::{render_block, Block};
use super::client::{ApiResponse, NotionClient};
use super::types::{parse_property, plain_text};
use crate::errors::McpResult;

#[derive(Debug, Default, Deserialize)]
struct PageMetadata {
    #[serde(default)]
    id: String,
    #[serde(default)]
    url: String,
    #[serde(default)]
    last_edited_time: String,
    #[serde(default)]
    properties: serde_json::Map<String, Value>,
}

/// Fetch a page's metadata and immediate children and compose a text report.
///
/// Only the first page of children is fetched; the API's cursor is ignored.
pub async fn get_page_content(client: &NotionClient, page_id: &str) -> McpResult<String> {
    let page_body = match client.get(&format!("/v1/pages/{page_id}")).await? {
        ApiResponse::Success(body) => body,
        ApiResponse::Failure { status, body } => {
            return Ok(format!("Error retrieving page: {status} - {body}"));
        }
    };

    let blocks_body = match client.get(&format!("/v1/blocks/{page_id}/children")).await? {
        ApiResponse::Success(body) => body,
        ApiResponse::Failure { status, body } => {
            return Ok(format!("Error retrieving page content: {status} - {body}"));
        }
    };

    let page: PageMetadata = serde_json::from_value(page_body).unwrap_or_default();

    let mut output = Vec::new();
    output.push(format!("# {}", page_title(&page)));
    output.push(format!("Page ID: {}", page.id));
    output.push(format!("URL: {}", page.url));
    output.push(format!("Last Edited: {}", page.last_edited_time));
    output.push("\n## Content:\n".to_string());

    for block in result_blocks(&blocks_body) {
        let rendered = render_block(&block, 0);
        if !rendered.is_empty() {
            output.push(rendered);
        }
    }

    Ok(output.join("\n"))
}

/// Fetch and render the immediate children of a block.
pub async fn get_block_children(client: &NotionClient, block_id: &str) -> McpResult<String> {
    let body = match client.get(&format!("/v1/blocks/{block_id}/children")).await? {
        ApiResponse::Success(body) => body,
        ApiResponse::Failure { status, body } => {
            return Ok(format!("Error retrieving block children: {status} - {body}"));
        }
    };

    let blocks = result_blocks(&body);
    if blocks.is_empty() {
        return Ok("This block has no children.".to_string());
    }

    let output: Vec<String> = blocks
        .iter()
        .map(|b| render_block(b, 0))
        .filter(|line| !line.is_empty())
        .collect();

    Ok(output.join("\n"))
}

/// Parse the `results` array of a block-children response, skipping entries
/// that are not JSON objects.
fn result_blocks(body: &Value) -> Vec<Block> {
    body.get("results")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| serde_json::from_value::<Block>(item.clone()).ok())
                .collect()
        })
        .unwrap_or_default()
}

/// Resolve the page title from the `title` property, falling back to `Name`.
fn page_title(page: &PageMetadata) -> String {
    let title_prop = page
        .properties
        .get("title")
        .or_else(|| page.properties.get("Name"));

    if let Some(raw) = title_prop {
        if let Some(runs) = parse_property(raw).title_runs() {
            if !runs.is_empty() {
                return plain_text(runs);
            }
        }
    }
    "Untitled".to_string()
}
