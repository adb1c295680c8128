//! Integration tests for the HTTP router (handle_mcp, SSE sessions, health checks).

use std::sync::Arc;

use axum::body::{Body, BodyDataStream};
use futures::StreamExt;
use http::Request;
use httpmock::prelude::*;
use serde_json::{json, Value};
use tower::ServiceExt;

use awsnews_client::NewsQueryService;
use awsnews_mcp::McpHandler;
use awsnews_transport_http::{build_router, AppState};

fn make_state(base_url: &str, token: Option<&str>) -> AppState {
    let service = NewsQueryService::from_url_str(base_url).expect("url");
    AppState::new(Arc::new(McpHandler::new(service)), token.map(String::from))
}

fn offline_state(token: Option<&str>) -> AppState {
    make_state("http://127.0.0.1:9/articles", token)
}

fn post_mcp(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/mcp")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("req")
}

async fn body_json(resp: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(resp.into_body(), 64 * 1024)
        .await
        .expect("body");
    serde_json::from_slice(&bytes).expect("json body")
}

#[tokio::test]
async fn health_returns_ok() {
    let app = build_router(offline_state(None));
    let req = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .expect("req");
    let resp = app.oneshot(req).await.expect("resp");
    assert_eq!(resp.status(), 200);
    let v = body_json(resp).await;
    assert_eq!(v["service"], "aws-news-mcp-server");
}

#[tokio::test]
async fn ready_endpoint_returns_ok() {
    let app = build_router(offline_state(None));
    let req = Request::builder()
        .uri("/health/ready")
        .body(Body::empty())
        .expect("req");
    let resp = app.oneshot(req).await.expect("resp");
    assert_eq!(resp.status(), 200);
    assert_eq!(body_json(resp).await["status"], "ready");
}

#[tokio::test]
async fn mcp_parse_error() {
    let app = build_router(offline_state(None));
    let resp = app.oneshot(post_mcp("not json")).await.expect("resp");
    assert_eq!(resp.status(), 200);
    let v = body_json(resp).await;
    assert_eq!(v["error"]["code"], -32700);
    assert!(v["id"].is_null());
}

#[tokio::test]
async fn mcp_notification_returns_no_content() {
    let app = build_router(offline_state(None));
    let resp = app
        .oneshot(post_mcp(
            r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
        ))
        .await
        .expect("resp");
    assert_eq!(resp.status(), 204);
}

#[tokio::test]
async fn mcp_initialize_returns_200() {
    let app = build_router(offline_state(None));
    let resp = app
        .oneshot(post_mcp(r#"{"jsonrpc":"2.0","id":1,"method":"initialize"}"#))
        .await
        .expect("resp");
    assert_eq!(resp.status(), 200);
    assert_eq!(
        resp.headers().get("content-type").expect("ct"),
        "application/json"
    );
    let v = body_json(resp).await;
    assert_eq!(v["jsonrpc"], "2.0");
    assert_eq!(v["result"]["serverInfo"]["name"], "aws-news-mcp-server");
}

#[tokio::test]
async fn mcp_invalid_request_missing_method() {
    let app = build_router(offline_state(None));
    let resp = app
        .oneshot(post_mcp(r#"{"jsonrpc":"2.0","id":5}"#))
        .await
        .expect("resp");
    assert_eq!(resp.status(), 200);
    let v = body_json(resp).await;
    assert_eq!(v["error"]["code"], -32600);
    assert_eq!(v["id"], 5);
}

#[tokio::test]
async fn mcp_auth_required_but_missing() {
    let app = build_router(offline_state(Some("secret")));
    let resp = app
        .oneshot(post_mcp(r#"{"jsonrpc":"2.0","id":1,"method":"initialize"}"#))
        .await
        .expect("resp");
    assert_eq!(resp.status(), 401);
}

#[tokio::test]
async fn mcp_auth_valid_bearer_passes() {
    let app = build_router(offline_state(Some("s3cret")));
    let req = Request::builder()
        .method("POST")
        .uri("/mcp")
        .header("Authorization", "Bearer s3cret")
        .body(Body::from(r#"{"jsonrpc":"2.0","id":2,"method":"initialize"}"#))
        .expect("req");
    let resp = app.oneshot(req).await.expect("resp");
    assert_eq!(resp.status(), 200);
}

#[tokio::test]
async fn health_is_not_behind_auth() {
    let app = build_router(offline_state(Some("s3cret")));
    let req = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .expect("req");
    let resp = app.oneshot(req).await.expect("resp");
    assert_eq!(resp.status(), 200);
}

#[tokio::test]
async fn mcp_tools_call_fetches_news() {
    let upstream = MockServer::start_async().await;
    let mock = upstream
        .mock_async(|when, then| {
            when.method(GET)
                .path("/articles")
                .query_param("search", "dynamodb")
                .query_param("hide_regional_expansions", "false");
            then.status(200).json_body(json!([{"id": "9"}]));
        })
        .await;

    let app = build_router(make_state(&upstream.url("/articles"), None));
    let body = json!({
        "jsonrpc": "2.0",
        "id": 11,
        "method": "tools/call",
        "params": {
            "name": "get_aws_news",
            "arguments": {"topic": "dynamodb", "include_regional_expansions": true}
        }
    });
    let resp = app
        .oneshot(post_mcp(&body.to_string()))
        .await
        .expect("resp");

    mock.assert_async().await;
    assert_eq!(resp.status(), 200);
    let v = body_json(resp).await;
    assert_eq!(v["id"], 11);
    assert_eq!(v["result"]["isError"], false);
    let text = v["result"]["content"][0]["text"].as_str().expect("text");
    let envelope: Value = serde_json::from_str(text).expect("envelope");
    assert_eq!(envelope["include_regional_expansions"], true);
    assert_eq!(envelope["articles"], json!([{"id": "9"}]));
}

fn open_sse(token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri("/sse");
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {token}"));
    }
    builder.body(Body::empty()).expect("req")
}

fn post_message(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("req")
}

/// Reads the next SSE event, returning its `event:` name and `data:` payload.
async fn next_event(stream: &mut BodyDataStream, buf: &mut String) -> (String, String) {
    loop {
        if let Some(end) = buf.find("\n\n") {
            let raw: String = buf.drain(..end + 2).collect();
            let mut name = String::new();
            let mut data = String::new();
            for line in raw.lines() {
                if let Some(v) = line.strip_prefix("event:") {
                    name = v.trim().to_string();
                } else if let Some(v) = line.strip_prefix("data:") {
                    data = v.trim().to_string();
                }
            }
            if !name.is_empty() || !data.is_empty() {
                return (name, data);
            }
            continue;
        }
        let chunk = stream.next().await.expect("stream open").expect("chunk");
        buf.push_str(&String::from_utf8_lossy(&chunk));
    }
}

#[tokio::test]
async fn sse_sends_endpoint_event_first() {
    let state = offline_state(None);
    let app = build_router(state.clone());
    let resp = app.oneshot(open_sse(None)).await.expect("resp");
    assert_eq!(resp.status(), 200);
    assert_eq!(
        resp.headers().get("content-type").expect("ct"),
        "text/event-stream"
    );

    let mut stream = resp.into_body().into_data_stream();
    let mut buf = String::new();
    let (name, data) = next_event(&mut stream, &mut buf).await;
    assert_eq!(name, "endpoint");
    let session_id = data
        .strip_prefix("/messages/?session_id=")
        .expect("endpoint url");
    assert!(state.sessions.sender(session_id).is_some());
    assert_eq!(state.sessions.len(), 1);
}

#[tokio::test]
async fn sse_reply_arrives_as_message_event() {
    let state = offline_state(None);
    let app = build_router(state.clone());
    let resp = app.clone().oneshot(open_sse(None)).await.expect("resp");
    let mut stream = resp.into_body().into_data_stream();
    let mut buf = String::new();
    let (_, endpoint) = next_event(&mut stream, &mut buf).await;

    let accepted = app
        .clone()
        .oneshot(post_message(
            &endpoint,
            r#"{"jsonrpc":"2.0","id":4,"method":"ping"}"#,
        ))
        .await
        .expect("resp");
    assert_eq!(accepted.status(), 202);

    let (name, data) = next_event(&mut stream, &mut buf).await;
    assert_eq!(name, "message");
    let v: Value = serde_json::from_str(&data).expect("json");
    assert_eq!(v["id"], 4);
    assert_eq!(v["result"], json!({}));
}

#[tokio::test]
async fn sse_session_closes_with_the_stream() {
    let state = offline_state(None);
    let app = build_router(state.clone());
    let resp = app.oneshot(open_sse(None)).await.expect("resp");
    let mut stream = resp.into_body().into_data_stream();
    let mut buf = String::new();
    next_event(&mut stream, &mut buf).await;
    assert_eq!(state.sessions.len(), 1);

    drop(stream);
    assert!(state.sessions.is_empty());
}

#[tokio::test]
async fn message_for_unknown_session_is_404() {
    let app = build_router(offline_state(None));
    let resp = app
        .oneshot(post_message(
            "/messages/?session_id=0123456789abcdef0123456789abcdef",
            r#"{"jsonrpc":"2.0","id":1,"method":"ping"}"#,
        ))
        .await
        .expect("resp");
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn message_without_session_id_is_400() {
    let app = build_router(offline_state(None));
    let resp = app
        .oneshot(post_message(
            "/messages/",
            r#"{"jsonrpc":"2.0","id":1,"method":"ping"}"#,
        ))
        .await
        .expect("resp");
    assert_eq!(resp.status(), 400);
}

#[tokio::test]
async fn sse_requires_bearer_when_configured() {
    let state = offline_state(Some("s3cret"));
    let app = build_router(state.clone());

    let denied = app.clone().oneshot(open_sse(None)).await.expect("resp");
    assert_eq!(denied.status(), 401);
    assert!(state.sessions.is_empty());

    let allowed = app.oneshot(open_sse(Some("s3cret"))).await.expect("resp");
    assert_eq!(allowed.status(), 200);
}
