//! Router tests for the chat relay, against stub models and a fake
//! OpenAI-compatible upstream

use async_trait::async_trait;
use axum::body::Body;
use axum::extract::State;
use axum::http::{header, HeaderMap, Method, Request, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use chat_relay::{create_router, AppState, RelayConfig};
use llm::{CompletionModel, CompletionRequest, LlmError};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

/// Completion model that answers every request the same way
struct StubModel {
    reply: Result<String, (u16, String)>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl StubModel {
    fn replying(text: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(text.to_string()),
            requests: Mutex::new(Vec::new()),
        })
    }

    fn failing(status: u16, body: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Err((status, body.to_string())),
            requests: Mutex::new(Vec::new()),
        })
    }

    fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl CompletionModel for StubModel {
    async fn complete(&self, request: CompletionRequest) -> llm::Result<String> {
        self.requests.lock().unwrap().push(request);
        match &self.reply {
            Ok(text) => Ok(text.clone()),
            Err((status, body)) => Err(LlmError::Upstream {
                status: *status,
                body: body.clone(),
            }),
        }
    }

    fn model_name(&self) -> &str {
        "stub"
    }
}

struct TestResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Vec<u8>,
}

impl TestResponse {
    fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap()
    }

    fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

async fn call(app: Router, method: Method, uri: &str, body: &str) -> TestResponse {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::ORIGIN, "http://localhost:5173")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec();

    TestResponse { status, headers, body }
}

#[tokio::test]
async fn test_chat_success() {
    let model = StubModel::replying("Block out two focused hours each morning.");
    let app = create_router(AppState::new(model.clone()));

    let response = call(app, Method::POST, "/chat", r#"{"message":"hello"}"#).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json(), json!({"text": "Block out two focused hours each morning."}));
    assert_eq!(response.header("content-type"), Some("application/json"));
    assert_eq!(response.header("access-control-allow-origin"), Some("*"));

    let requests = model.requests.lock().unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0], CompletionRequest::assistant("hello"));
}

#[tokio::test]
async fn test_edge_function_path() {
    let model = StubModel::replying("Sure.");
    let app = create_router(AppState::new(model.clone()));

    let response = call(app, Method::POST, "/functions/v1/chat", r#"{"message":"hi"}"#).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json()["text"], "Sure.");
    assert_eq!(model.calls(), 1);
}

#[tokio::test]
async fn test_missing_message() {
    let model = StubModel::replying("unused");

    for body in [r#"{}"#, r#"{"message":""}"#, r#"{"message":7}"#, r#"{"text":"hello"}"#] {
        let app = create_router(AppState::new(model.clone()));
        let response = call(app, Method::POST, "/chat", body).await;

        assert_eq!(response.status, StatusCode::BAD_REQUEST, "body: {}", body);
        assert_eq!(
            response.json(),
            json!({"error": "Request body must be JSON with a 'message' string."})
        );
    }

    assert_eq!(model.calls(), 0);
}

#[tokio::test]
async fn test_invalid_json() {
    let model = StubModel::replying("unused");
    let app = create_router(AppState::new(model.clone()));

    let response = call(app, Method::POST, "/chat", "message=hello").await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.json(), json!({"error": "Invalid JSON in request body"}));
    assert_eq!(response.header("access-control-allow-origin"), Some("*"));
    assert_eq!(model.calls(), 0);
}

#[tokio::test]
async fn test_preflight() {
    let model = StubModel::replying("unused");
    let app = create_router(AppState::new(model.clone()));

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/chat")
        .header(header::ORIGIN, "http://localhost:5173")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "authorization, apikey, content-type")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let headers = response.headers();
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    let allowed = headers[header::ACCESS_CONTROL_ALLOW_HEADERS].to_str().unwrap().to_string();
    for name in ["authorization", "x-client-info", "apikey", "content-type"] {
        assert!(allowed.contains(name), "missing {} in {}", name, allowed);
    }

    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert!(body.is_empty());
    assert_eq!(model.calls(), 0);
}

#[tokio::test]
async fn test_options_ignores_body() {
    let model = StubModel::replying("unused");
    let app = create_router(AppState::new(model.clone()));

    let response = call(app, Method::OPTIONS, "/chat", "not json at all").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.is_empty());
    assert_eq!(response.header("access-control-allow-origin"), Some("*"));
    assert_eq!(model.calls(), 0);
}

#[tokio::test]
async fn test_other_methods_not_allowed() {
    let app = create_router(AppState::new(StubModel::replying("unused")));
    let response = call(app, Method::GET, "/chat", "").await;
    assert_eq!(response.status, StatusCode::METHOD_NOT_ALLOWED);

    let app = create_router(AppState::new(StubModel::replying("unused")));
    let response = call(app, Method::PUT, "/chat", r#"{"message":"hello"}"#).await;
    assert_eq!(response.status, StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_missing_api_key() {
    let app = create_router(AppState::unconfigured());
    let response = call(app, Method::POST, "/chat", r#"{"message":"hello"}"#).await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.json(), json!({"error": "OPENAI_API_KEY is not set"}));

    // Input is validated before the key is checked
    let app = create_router(AppState::unconfigured());
    let response = call(app, Method::POST, "/chat", "{}").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_upstream_status_is_mirrored() {
    let upstream_body = r#"{"error":{"message":"Rate limit reached","type":"requests"}}"#;
    let app = create_router(AppState::new(StubModel::failing(429, upstream_body)));

    let response = call(app, Method::POST, "/chat", r#"{"message":"hello"}"#).await;

    assert_eq!(response.status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(response.json(), json!({"error": upstream_body}));
}

#[tokio::test]
async fn test_health() {
    let app = create_router(AppState::unconfigured());
    let response = call(app, Method::GET, "/health", "").await;

    assert_eq!(response.status, StatusCode::OK);
    let body = response.json();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

/// Requests seen by the fake completion API
#[derive(Clone, Default)]
struct Upstream {
    bodies: Arc<Mutex<Vec<Value>>>,
}

async fn completions(State(upstream): State<Upstream>, headers: HeaderMap, Json(body): Json<Value>) -> Response {
    if headers.get("authorization").and_then(|v| v.to_str().ok()) != Some("Bearer sk-test") {
        return (StatusCode::UNAUTHORIZED, r#"{"error":{"message":"Incorrect API key provided"}}"#).into_response();
    }

    upstream.bodies.lock().unwrap().push(body.clone());
    let message = body["messages"][1]["content"].as_str().unwrap_or_default().to_string();

    match message.as_str() {
        "not json" => (StatusCode::OK, "<html>gateway</html>").into_response(),
        "no choices" => Json(json!({"id": "cmpl-1", "choices": []})).into_response(),
        "overloaded" => (StatusCode::SERVICE_UNAVAILABLE, "upstream overloaded").into_response(),
        _ => Json(json!({
            "id": "cmpl-1",
            "object": "chat.completion",
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": format!("Answer to: {}", message)},
                "finish_reason": "stop"
            }],
            "usage": {"prompt_tokens": 50, "completion_tokens": 10, "total_tokens": 60}
        }))
        .into_response(),
    }
}

async fn start_upstream() -> (String, Upstream) {
    let upstream = Upstream::default();
    let app = Router::new()
        .route("/v1/chat/completions", post(completions))
        .with_state(upstream.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}/v1", addr), upstream)
}

fn relay_for(base_url: &str, api_key: &str) -> Router {
    let mut config = RelayConfig::default();
    config.openai.api_key = Some(api_key.to_string());
    config.openai.base_url = base_url.to_string();
    create_router(AppState::from_config(&config).unwrap())
}

#[tokio::test]
async fn test_relay_through_openai_client() {
    let (base_url, upstream) = start_upstream().await;

    let response = call(relay_for(&base_url, "sk-test"), Method::POST, "/chat", r#"{"message":"hello"}"#).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json(), json!({"text": "Answer to: hello"}));

    let bodies = upstream.bodies.lock().unwrap();
    assert_eq!(bodies.len(), 1);
    let sent = &bodies[0];
    assert_eq!(sent["model"], "gpt-3.5-turbo");
    assert_eq!(sent["messages"][0]["role"], "system");
    assert!(sent["messages"][0]["content"].as_str().unwrap().contains("Zest Tasks"));
    assert_eq!(sent["messages"][1], json!({"role": "user", "content": "hello"}));
    assert!((sent["temperature"].as_f64().unwrap() - 0.2).abs() < 1e-6);
    assert!((sent["top_p"].as_f64().unwrap() - 0.9).abs() < 1e-6);
    assert_eq!(sent["max_tokens"], 1000);
}

#[tokio::test]
async fn test_upstream_failures() {
    let (base_url, _) = start_upstream().await;

    let response = call(relay_for(&base_url, "sk-wrong"), Method::POST, "/chat", r#"{"message":"hello"}"#).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        response.json(),
        json!({"error": r#"{"error":{"message":"Incorrect API key provided"}}"#})
    );

    let response = call(relay_for(&base_url, "sk-test"), Method::POST, "/chat", r#"{"message":"overloaded"}"#).await;
    assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(response.json(), json!({"error": "upstream overloaded"}));

    let response = call(relay_for(&base_url, "sk-test"), Method::POST, "/chat", r#"{"message":"not json"}"#).await;
    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.json(), json!({"error": "Invalid JSON from OpenAI API"}));

    let response = call(relay_for(&base_url, "sk-test"), Method::POST, "/chat", r#"{"message":"no choices"}"#).await;
    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.json(), json!({"error": "Invalid response from OpenAI API"}));
}

#[tokio::test]
async fn test_unreachable_upstream() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let base_url = format!("http://{}/v1", addr);
    let response = call(relay_for(&base_url, "sk-test"), Method::POST, "/chat", r#"{"message":"hello"}"#).await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    let error = response.json()["error"].as_str().unwrap().to_string();
    assert!(!error.is_empty());
}
