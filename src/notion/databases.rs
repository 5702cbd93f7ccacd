// Database formatter: schema listing plus first page of entries
use serde::Deserialize;
use serde_json::{json, Value};

use super::client::{ApiResponse, NotionClient};
use super::types::{parse_property, plain_text, RichText};
use crate::errors::McpResult;

#[derive(Debug, Default, Deserialize)]
struct DatabaseMetadata {
    #[serde(default)]
    id: String,
    #[serde(default)]
    url: String,
    title: Option<Vec<RichText>>,
    #[serde(default)]
    properties: serde_json::Map<String, Value>,
}

#[derive(Debug, Default, Deserialize)]
struct DatabaseEntry {
    #[serde(default)]
    id: String,
    #[serde(default)]
    url: String,
    #[serde(default)]
    properties: serde_json::Map<String, Value>,
}

/// Fetch a database's schema and query its entries, composing a text report.
///
/// Only the first result page is fetched, capped at 100 entries even when
/// `max_pages` asks for more.
pub async fn get_database_content(
    client: &NotionClient,
    database_id: &str,
    max_pages: u32,
) -> McpResult<String> {
    let db_body = match client.get(&format!("/v1/databases/{database_id}")).await? {
        ApiResponse::Success(body) => body,
        ApiResponse::Failure { status, body } => {
            return Ok(format!("Error retrieving database: {status} - {body}"));
        }
    };

    let payload = json!({ "page_size": max_pages.min(100) });
    let query_body = match client
        .post(&format!("/v1/databases/{database_id}/query"), &payload)
        .await?
    {
        ApiResponse::Success(body) => body,
        ApiResponse::Failure { status, body } => {
            return Ok(format!("Error querying database: {status} - {body}"));
        }
    };

    let db: DatabaseMetadata = serde_json::from_value(db_body).unwrap_or_default();

    let mut output = Vec::new();
    output.push(format!("# {}", database_title(&db)));
    output.push(format!("Database ID: {}", db.id));
    output.push(format!("URL: {}", db.url));

    output.push("\n## Database Schema:".to_string());
    for (name, schema) in &db.properties {
        let kind = schema
            .get("type")
            .and_then(Value::as_str)
            .unwrap_or("unknown");
        output.push(format!("- {name}: {kind}"));
    }

    let entries = result_entries(&query_body);
    output.push(format!("\n## Database Entries ({}):", entries.len()));

    for (i, entry) in entries.iter().enumerate() {
        output.push(format!("\n### Entry {}", i + 1));
        output.push(format!("ID: {}", entry.id));
        output.push(format!("URL: {}", entry.url));

        for (name, raw) in &entry.properties {
            output.push(format!("- {name}: {}", parse_property(raw).render()));
        }
    }

    Ok(output.join("\n"))
}

fn database_title(db: &DatabaseMetadata) -> String {
    match &db.title {
        Some(runs) if !runs.is_empty() => plain_text(runs),
        _ => "Untitled Database".to_string(),
    }
}

fn result_entries(body: &Value) -> Vec<DatabaseEntry> {
    body.get("results")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| serde_json::from_value::<DatabaseEntry>(item.clone()).ok())
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_title_defaults_to_untitled_database() {
        assert_eq!(database_title(&DatabaseMetadata::default()), "Untitled Database");

        let db: DatabaseMetadata = serde_json::from_value(json!({"title": []})).unwrap();
        assert_eq!(database_title(&db), "Untitled Database");
    }

    #[test]
    fn title_concatenates_runs() {
        let db: DatabaseMetadata = serde_json::from_value(json!({
            "title": [{"plain_text": "Task "}, {"plain_text": "Tracker"}]
        }))
        .unwrap();
        assert_eq!(database_title(&db), "Task Tracker");
    }
}
