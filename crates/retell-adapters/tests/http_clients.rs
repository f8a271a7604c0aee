//! End-to-end adapter tests against a local HTTP server.

use mockito::Matcher;
use retell_adapters::{Adapter, AdapterError, RetellClient, RetellConfig, build_adapters};
use serde_json::{Value, json};

fn config_for(server: &mockito::Server) -> RetellConfig {
    let url = server.url();
    RetellConfig::from_lookup(|key| match key {
        "RETELL_API_KEY" => Some("key_test".to_string()),
        "RETELL_BASE_URL" => Some(url.clone()),
        _ => None,
    })
    .unwrap()
}

async fn run(server: &mockito::Server, tool: &str, params: Value) -> retell_adapters::Result<Value> {
    let client = RetellClient::from_config(&config_for(server));
    let adapters = build_adapters(client, None);
    let adapter = adapters
        .iter()
        .find(|a| a.tools().iter().any(|t| t.name == tool))
        .unwrap();
    adapter.execute_tool(tool, params).await
}

#[tokio::test]
async fn api_key_is_sent_as_bearer() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/list-voices")
        .match_header("authorization", "Bearer key_test")
        .with_header("content-type", "application/json")
        .with_body(r#"[{"voice_id": "v1", "voice_name": "Ava", "provider": "openai", "extra": 1}]"#)
        .create_async()
        .await;

    let out = run(&server, "list_voices", json!({})).await.unwrap();
    mock.assert_async().await;
    assert_eq!(
        out,
        json!([{"voice_id": "v1", "voice_name": "Ava", "provider": "openai"}])
    );
}

#[tokio::test]
async fn phone_number_path_is_encoded_on_the_wire() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("DELETE", "/delete-phone-number/%2B14155550100")
        .with_status(204)
        .create_async()
        .await;

    let out = run(
        &server,
        "delete_phone_number",
        json!({"phoneNumber": "+14155550100"}),
    )
    .await
    .unwrap();
    mock.assert_async().await;
    assert_eq!(out["success"], true);
}

#[tokio::test]
async fn knowledge_base_is_created_with_multipart_form() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/create-knowledge-base")
        .match_header(
            "content-type",
            Matcher::Regex("^multipart/form-data; boundary=".into()),
        )
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex(r#"name="knowledge_base_name""#.into()),
            Matcher::Regex("Support docs".into()),
            Matcher::Regex(r#"name="enable_auto_refresh""#.into()),
        ]))
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(r#"{"knowledge_base_id": "kb_1", "knowledge_base_name": "Support docs"}"#)
        .create_async()
        .await;

    let out = run(
        &server,
        "create_knowledge_base",
        json!({"name": "Support docs", "enableAutoRefresh": true}),
    )
    .await
    .unwrap();
    mock.assert_async().await;
    assert_eq!(out["knowledge_base_id"], "kb_1");
    assert_eq!(out["name"], "Support docs");
}

#[tokio::test]
async fn error_status_carries_upstream_payload() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/get-agent/agent_1")
        .with_status(404)
        .with_header("content-type", "application/json")
        .with_body(r#"{"message": "agent not found", "code": "not_found"}"#)
        .create_async()
        .await;

    let err = run(&server, "get_agent", json!({"agentId": "agent_1"}))
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(404));
    assert_eq!(
        err.payload(),
        Some(&json!({"message": "agent not found", "code": "not_found"}))
    );
    assert_eq!(err.to_string(), "404 agent not found");
}

#[tokio::test]
async fn list_calls_body_reaches_server() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v2/list-calls")
        .match_body(Matcher::Json(json!({"limit": 10, "sort_order": "ascending"})))
        .with_header("content-type", "application/json")
        .with_body("[]")
        .create_async()
        .await;

    let out = run(
        &server,
        "list_calls",
        json!({"limit": 10, "sortOrder": "ascending"}),
    )
    .await
    .unwrap();
    mock.assert_async().await;
    assert_eq!(out, json!([]));
}

#[tokio::test]
async fn unreachable_upstream_is_an_http_error() {
    let config = RetellConfig::from_lookup(|key| match key {
        "RETELL_API_KEY" => Some("key_test".to_string()),
        "RETELL_BASE_URL" => Some("http://127.0.0.1:9".to_string()),
        _ => None,
    })
    .unwrap();
    let adapters = build_adapters(RetellClient::from_config(&config), None);
    let err = adapters[3]
        .execute_tool("list_voices", json!({}))
        .await
        .unwrap_err();
    assert!(matches!(err, AdapterError::Http { .. }), "{err}");
}
