// Workspace search formatter
use serde::Deserialize;
use serde_json::{json, Value};

use super::client::{ApiResponse, NotionClient};
use super::types::{plain_text, RichText};
use crate::errors::McpResult;

#[derive(Debug, Default, Deserialize)]
struct SearchHit {
    id: Option<String>,
    object: Option<String>,
    properties: Option<serde_json::Map<String, Value>>,
    title: Option<Vec<RichText>>,
    url: Option<String>,
    last_edited_time: Option<String>,
}

/// Build the search request payload.
///
/// `page_size` is clamped to 100 and omitted when zero. A `filter_type`
/// other than "page" or "database" is silently dropped. Results always sort
/// by last edit time, newest first.
pub fn build_search_payload(
    query: Option<&str>,
    filter_type: Option<&str>,
    page_size: u32,
) -> Value {
    let mut payload = serde_json::Map::new();

    if let Some(query) = query.filter(|q| !q.is_empty()) {
        payload.insert("query".to_string(), json!(query));
    }

    if page_size > 0 {
        payload.insert("page_size".to_string(), json!(page_size.min(100)));
    }

    if let Some(filter) = filter_type.filter(|f| *f == "page" || *f == "database") {
        payload.insert(
            "filter".to_string(),
            json!({ "value": filter, "property": "object" }),
        );
    }

    payload.insert(
        "sort".to_string(),
        json!({ "direction": "descending", "timestamp": "last_edited_time" }),
    );

    Value::Object(payload)
}

/// Search pages and databases, rendering each hit as a short text block.
pub async fn search_notion_pages(
    client: &NotionClient,
    query: Option<&str>,
    filter_type: Option<&str>,
    page_size: u32,
) -> McpResult<String> {
    let payload = build_search_payload(query, filter_type, page_size);

    let body = match client.post("/v1/search", &payload).await? {
        ApiResponse::Success(body) => body,
        ApiResponse::Failure { status, body } => {
            return Ok(format!("Error: {status} - {body}"));
        }
    };

    let hits = result_hits(&body);
    if hits.is_empty() {
        return Ok("No results found".to_string());
    }

    let output: Vec<String> = hits
        .iter()
        .map(|hit| {
            let id = hit.id.as_deref().unwrap_or("Unknown ID");
            let object = hit.object.as_deref().unwrap_or("unknown");
            let url = hit.url.as_deref().unwrap_or("No URL");
            let last_edited = hit.last_edited_time.as_deref().unwrap_or("Unknown");

            format!(
                "- {} ({object})\n  ID: {id}\n  URL: {url}\n  Last Edited: {last_edited}",
                hit_title(hit, object)
            )
        })
        .collect();

    Ok(output.join("\n\n"))
}

/// Resolve a display title for one hit, by object type.
///
/// Pages carry their title either under `properties.title` or (for
/// workspace-level pages) a top-level `title` array; databases only the
/// latter.
fn hit_title(hit: &SearchHit, object: &str) -> String {
    match object {
        "page" => {
            if let Some(raw) = hit.properties.as_ref().and_then(|p| p.get("title")) {
                let runs: Vec<RichText> = raw
                    .get("title")
                    .and_then(|t| serde_json::from_value(t.clone()).ok())
                    .unwrap_or_default();
                if !runs.is_empty() {
                    return plain_text(&runs);
                }
            } else if let Some(runs) = hit.title.as_ref().filter(|t| !t.is_empty()) {
                return plain_text(runs);
            }
            "Untitled".to_string()
        }
        "database" => match hit.title.as_ref().filter(|t| !t.is_empty()) {
            Some(runs) => plain_text(runs),
            None => "Untitled".to_string(),
        },
        _ => "Untitled".to_string(),
    }
}

fn result_hits(body: &Value) -> Vec<SearchHit> {
    body.get("results")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| serde_json::from_value::<SearchHit>(item.clone()).ok())
                .collect()
        })
        .unwrap_or_default()
}
