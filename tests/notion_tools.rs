// End-to-end formatter tests against a mock Notion API
use std::sync::{Mutex, PoisonError};

use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use notion_mcp::errors::McpError;
use notion_mcp::notion::client::{NotionClient, API_KEY_ENV};
use notion_mcp::notion::{databases, pages, search};
use notion_mcp::NotionConfig;

// The credential is process-global state, so tests that touch it serialize
// through this lock.
static ENV_LOCK: Mutex<()> = Mutex::new(());

fn client_for(server: &MockServer) -> NotionClient {
    let config = NotionConfig {
        service_port: 0,
        host: "127.0.0.1".to_string(),
        api_base: server.uri(),
        api_version: "2022-06-28".to_string(),
    };
    NotionClient::new(&config)
}

#[tokio::test]
async fn search_with_zero_results_returns_literal() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
    std::env::set_var(API_KEY_ENV, "test-token");

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": []})))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let out = search::search_notion_pages(&client, Some("nothing"), None, 10)
        .await
        .unwrap();
    assert_eq!(out, "No results found");
}

#[tokio::test]
async fn search_clamps_page_size_and_sends_headers() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
    std::env::set_var(API_KEY_ENV, "test-token");

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/search"))
        .and(header("Authorization", "Bearer test-token"))
        .and(header("Notion-Version", "2022-06-28"))
        .and(body_partial_json(json!({
            "page_size": 100,
            "sort": {"direction": "descending", "timestamp": "last_edited_time"}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": []})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let out = search::search_notion_pages(&client, None, Some("bogus"), 500)
        .await
        .unwrap();
    assert_eq!(out, "No results found");
}

#[tokio::test]
async fn search_formats_hits_with_blank_line_separator() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
    std::env::set_var(API_KEY_ENV, "test-token");

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [
                {
                    "id": "p1",
                    "object": "page",
                    "url": "https://notion.so/p1",
                    "last_edited_time": "2024-03-01T10:00:00.000Z",
                    "properties": {
                        "title": {"type": "title", "title": [{"plain_text": "Roadmap"}]}
                    }
                },
                {
                    "id": "d1",
                    "object": "database",
                    "url": "https://notion.so/d1",
                    "last_edited_time": "2024-02-01T10:00:00.000Z",
                    "title": [{"plain_text": "Tasks"}]
                }
            ]
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let out = search::search_notion_pages(&client, Some("t"), None, 10)
        .await
        .unwrap();

    let expected = "- Roadmap (page)\n  ID: p1\n  URL: https://notion.so/p1\n  Last Edited: 2024-03-01T10:00:00.000Z\n\n\
                    - Tasks (database)\n  ID: d1\n  URL: https://notion.so/d1\n  Last Edited: 2024-02-01T10:00:00.000Z";
    assert_eq!(out, expected);
}

#[tokio::test]
async fn page_content_composes_metadata_and_blocks() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
    std::env::set_var(API_KEY_ENV, "test-token");

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/pages/p1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "p1",
            "url": "https://notion.so/p1",
            "last_edited_time": "2024-01-01T00:00:00.000Z",
            "properties": {
                "title": {"type": "title", "title": [{"plain_text": "My Page"}]}
            }
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/blocks/p1/children"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [
                {"type": "heading_1", "heading_1": {"rich_text": [{"plain_text": "Intro"}]}},
                {"type": "to_do", "to_do": {"checked": true, "rich_text": [{"plain_text": "Buy milk"}]}}
            ]
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let out = pages::get_page_content(&client, "p1").await.unwrap();

    let expected = "# My Page\n\
                    Page ID: p1\n\
                    URL: https://notion.so/p1\n\
                    Last Edited: 2024-01-01T00:00:00.000Z\n\
                    \n## Content:\n\n\
                    # Intro\n\
                    ✓ Buy milk";
    assert_eq!(out, expected);
}

#[tokio::test]
async fn page_fetch_failure_becomes_text_output() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
    std::env::set_var(API_KEY_ENV, "test-token");

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/pages/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("page not found"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let out = pages::get_page_content(&client, "missing").await.unwrap();
    assert_eq!(out, "Error retrieving page: 404 - page not found");
}

#[tokio::test]
async fn database_content_lists_schema_and_entries() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
    std::env::set_var(API_KEY_ENV, "test-token");

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/databases/d1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "d1",
            "url": "https://notion.so/d1",
            "title": [{"plain_text": "Tasks"}],
            "properties": {
                "Done": {"type": "checkbox", "checkbox": {}},
                "Name": {"type": "title", "title": {}},
                "Tags": {"type": "multi_select", "multi_select": {}}
            }
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/databases/d1/query"))
        .and(body_partial_json(json!({"page_size": 10})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{
                "id": "e1",
                "url": "https://notion.so/e1",
                "properties": {
                    "Done": {"type": "checkbox", "checkbox": true},
                    "Name": {"type": "title", "title": [{"plain_text": "Write tests"}]},
                    "Tags": {"type": "multi_select", "multi_select": [{"name": "A"}, {"name": "B"}]}
                }
            }]
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let out = databases::get_database_content(&client, "d1", 10)
        .await
        .unwrap();

    let expected = "# Tasks\n\
                    Database ID: d1\n\
                    URL: https://notion.so/d1\n\
                    \n## Database Schema:\n\
                    - Done: checkbox\n\
                    - Name: title\n\
                    - Tags: multi_select\n\
                    \n## Database Entries (1):\n\
                    \n### Entry 1\n\
                    ID: e1\n\
                    URL: https://notion.so/e1\n\
                    - Done: ✓\n\
                    - Name: Write tests\n\
                    - Tags: A, B";
    assert_eq!(out, expected);
}

#[tokio::test]
async fn database_properties_render_in_name_sorted_order() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
    std::env::set_var(API_KEY_ENV, "test-token");

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/databases/d3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "d3",
            "url": "",
            "title": [{"plain_text": "Ordered"}],
            "properties": {
                "Zeta": {"type": "number", "number": {}},
                "Alpha": {"type": "checkbox", "checkbox": {}}
            }
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/databases/d3/query"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": []})))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let out = databases::get_database_content(&client, "d3", 10)
        .await
        .unwrap();

    // Property listings are deterministic: sorted by name, not response order.
    let alpha = out.find("- Alpha: checkbox").unwrap();
    let zeta = out.find("- Zeta: number").unwrap();
    assert!(alpha < zeta);
}

#[tokio::test]
async fn database_query_clamps_max_pages() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
    std::env::set_var(API_KEY_ENV, "test-token");

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/databases/d2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "d2", "url": "", "title": [], "properties": {}
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/databases/d2/query"))
        .and(body_partial_json(json!({"page_size": 100})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": []})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let out = databases::get_database_content(&client, "d2", 500)
        .await
        .unwrap();
    assert!(out.contains("## Database Entries (0):"));
}

#[tokio::test]
async fn block_children_empty_result() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
    std::env::set_var(API_KEY_ENV, "test-token");

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/blocks/b1/children"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": []})))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let out = pages::get_block_children(&client, "b1").await.unwrap();
    assert_eq!(out, "This block has no children.");
}

#[tokio::test]
async fn missing_credential_fails_before_any_network_call() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
    std::env::remove_var(API_KEY_ENV);

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/pages/p1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = pages::get_page_content(&client, "p1").await.unwrap_err();
    assert!(matches!(err, McpError::Unauthorized(_)));
}
