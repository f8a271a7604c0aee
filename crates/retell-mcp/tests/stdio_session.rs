//! Full MCP sessions over an in-memory duplex stream, backed by the real
//! Retell adapters and a canned upstream.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use retell_adapters::client::{ApiRequest, Transport};
use retell_adapters::{AdapterError, RetellClient, build_adapters};
use retell_mcp::{McpServer, serve};
use serde_json::{Value, json};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

/// Answers every request with the same body and remembers the paths.
struct CannedUpstream {
    body: Value,
    paths: Mutex<Vec<String>>,
}

#[async_trait]
impl Transport for CannedUpstream {
    async fn send(&self, request: ApiRequest) -> retell_adapters::Result<Value> {
        self.paths.lock().unwrap().push(request.path.clone());
        if request.path.starts_with("/get-agent/") {
            return Err(AdapterError::api(
                500,
                Some("Internal Server Error"),
                json!({"message": "boom"}),
            ));
        }
        Ok(self.body.clone())
    }
}

async fn session(upstream: Arc<CannedUpstream>, messages: &[Value]) -> Vec<Value> {
    let adapters = build_adapters(RetellClient::new(upstream), None);
    let server = Arc::new(McpServer::new(adapters));

    let (mut client_in, server_in) = tokio::io::duplex(1 << 16);
    let (server_out, client_out) = tokio::io::duplex(1 << 16);
    let handle = tokio::spawn(serve(server, server_in, server_out, std::future::pending()));

    for message in messages {
        client_in
            .write_all(format!("{message}\n").as_bytes())
            .await
            .unwrap();
    }
    drop(client_in);

    let mut responses = Vec::new();
    let mut lines = BufReader::new(client_out).lines();
    while let Some(line) = lines.next_line().await.unwrap() {
        responses.push(serde_json::from_str::<Value>(&line).unwrap());
    }
    handle.await.unwrap().unwrap();

    responses.sort_by_key(|r| r["id"].as_i64().unwrap_or(-1));
    responses
}

fn upstream(body: Value) -> Arc<CannedUpstream> {
    Arc::new(CannedUpstream {
        body,
        paths: Mutex::new(Vec::new()),
    })
}

#[tokio::test]
async fn handshake_then_list_tools() {
    let responses = session(
        upstream(json!({})),
        &[
            json!({"jsonrpc": "2.0", "id": 1, "method": "initialize", "params": {}}),
            json!({"jsonrpc": "2.0", "method": "notifications/initialized"}),
            json!({"jsonrpc": "2.0", "id": 2, "method": "tools/list"}),
        ],
    )
    .await;

    assert_eq!(responses.len(), 2);
    assert_eq!(responses[0]["result"]["serverInfo"]["name"], "retell-mcp");
    let tools = responses[1]["result"]["tools"].as_array().unwrap();
    assert_eq!(tools.len(), 36);
    assert!(tools.iter().any(|t| t["name"] == "create_phone_call"));
    assert!(tools.iter().any(|t| t["name"] == "list_test_case_definitions"));
}

#[tokio::test]
async fn tool_calls_succeed_and_fail_in_band() {
    let canned = upstream(json!([{"voice_id": "v1", "voice_name": "Ava", "provider": "openai"}]));
    let responses = session(
        canned.clone(),
        &[
            json!({"jsonrpc": "2.0", "id": 1, "method": "tools/call",
                   "params": {"name": "list_voices", "arguments": {}}}),
            json!({"jsonrpc": "2.0", "id": 2, "method": "tools/call",
                   "params": {"name": "get_agent", "arguments": {"agentId": "a1"}}}),
            json!({"jsonrpc": "2.0", "id": 3, "method": "tools/call",
                   "params": {"name": "create_phone_call", "arguments": {"toNumber": "+15559998888"}}}),
            json!({"jsonrpc": "2.0", "id": 4, "method": "tools/call",
                   "params": {"name": "list_test_case_definitions", "arguments": {"llm_id": "llm_1"}}}),
        ],
    )
    .await;

    assert_eq!(responses.len(), 4);
    let text = |i: usize| responses[i]["result"]["content"][0]["text"].as_str().unwrap().to_string();

    assert_eq!(
        serde_json::from_str::<Value>(&text(0)).unwrap(),
        json!([{"voice_id": "v1", "voice_name": "Ava", "provider": "openai"}])
    );
    assert_eq!(text(1), "Error: 500 boom");
    assert!(text(2).starts_with("Error: invalid parameters"), "{}", text(2));
    assert!(text(3).contains("RETELL_UNDOCUMENTED_BEARER_TOKEN"), "{}", text(3));
    assert!(responses.iter().all(|r| r.get("error").is_none()));

    let paths = canned.paths.lock().unwrap().clone();
    assert_eq!(paths.len(), 2, "{paths:?}");
}

#[tokio::test]
async fn protocol_errors_are_rpc_errors() {
    let adapters = build_adapters(RetellClient::new(upstream(json!({}))), None);
    let server = Arc::new(McpServer::new(adapters));
    let input: &[u8] = b"{not json\n{\"jsonrpc\":\"2.0\",\"id\":5,\"method\":\"tools/call\",\"params\":{}}\n";
    let (server_out, client_out) = tokio::io::duplex(1 << 16);

    serve(server, input, server_out, std::future::pending())
        .await
        .unwrap();

    let mut codes = Vec::new();
    let mut lines = BufReader::new(client_out).lines();
    while let Some(line) = lines.next_line().await.unwrap() {
        let response: Value = serde_json::from_str(&line).unwrap();
        codes.push(response["error"]["code"].as_i64().unwrap());
    }
    codes.sort_unstable();
    assert_eq!(codes, [-32700, -32602]);
}
