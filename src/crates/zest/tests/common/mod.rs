//! Common test utilities: an in-process fake of the hosted backend
//!
//! Serves just enough of GoTrue, PostgREST and the chat edge function for
//! the client to be exercised end to end over real HTTP.

#![allow(dead_code)]

use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Map, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use zest::{BackendClient, Session};

pub const ANON_KEY: &str = "test-anon-key";
pub const EMAIL: &str = "sam@example.com";
pub const PASSWORD: &str = "correct horse";
pub const USER_ID: &str = "user-sam";

#[derive(Default)]
pub struct FakeState {
    pub tasks: Vec<Value>,
    pub workflows: Vec<Value>,
    pub chat_messages: Vec<String>,
    /// `Authorization` header of every chat call
    pub chat_authorizations: Vec<String>,
    pub signed_out: Vec<String>,
    /// Bodies and `Prefer` headers of every PATCH received on `tasks`
    pub task_patches: Vec<(Value, Option<String>)>,
    next_id: u64,
}

impl FakeState {
    fn next_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{}-{}", prefix, self.next_id)
    }
}

#[derive(Clone, Default)]
pub struct FakeBackend {
    pub state: Arc<Mutex<FakeState>>,
}

/// A running fake backend and a client pointed at it
pub struct TestBackend {
    pub url: String,
    pub fake: FakeBackend,
    pub client: BackendClient,
}

impl TestBackend {
    pub async fn start() -> Self {
        let fake = FakeBackend::default();
        let app = router(fake.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let url = format!("http://{}", addr);
        let client = BackendClient::new(&url, ANON_KEY, Duration::from_secs(5)).unwrap();

        Self { url, fake, client }
    }

    pub async fn sign_in(&self) -> Session {
        self.client.sign_in_with_password(EMAIL, PASSWORD).await.unwrap()
    }

    pub fn task_rows(&self) -> Vec<Value> {
        self.fake.state.lock().unwrap().tasks.clone()
    }

    pub fn task_patches(&self) -> Vec<(Value, Option<String>)> {
        self.fake.state.lock().unwrap().task_patches.clone()
    }
}

fn router(fake: FakeBackend) -> Router {
    Router::new()
        .route("/auth/v1/token", post(token))
        .route("/auth/v1/signup", post(signup))
        .route("/auth/v1/user", get(user))
        .route("/auth/v1/logout", post(logout))
        .route(
            "/rest/v1/tasks",
            get(select_tasks).post(insert_tasks).patch(update_tasks).delete(delete_tasks),
        )
        .route("/rest/v1/workflows", get(select_workflows).post(insert_workflows))
        .route("/functions/v1/chat", post(chat))
        .with_state(fake)
}

fn error(status: StatusCode, body: Value) -> Response {
    (status, Json(body)).into_response()
}

fn has_api_key(headers: &HeaderMap) -> bool {
    headers.get("apikey").and_then(|v| v.to_str().ok()) == Some(ANON_KEY)
}

/// The user id encoded in a `Bearer token-<user>` header
fn bearer_user(headers: &HeaderMap) -> Option<String> {
    headers
        .get("authorization")?
        .to_str()
        .ok()?
        .strip_prefix("Bearer token-")
        .map(str::to_string)
}

fn authorize(headers: &HeaderMap) -> Result<String, Response> {
    if !has_api_key(headers) {
        return Err(error(
            StatusCode::UNAUTHORIZED,
            json!({"message": "No API key found in request"}),
        ));
    }
    bearer_user(headers).ok_or_else(|| {
        error(
            StatusCode::UNAUTHORIZED,
            json!({"code": "PGRST301", "message": "JWT invalid", "details": null, "hint": null}),
        )
    })
}

fn token_body(user_id: &str) -> Value {
    json!({
        "access_token": format!("token-{}", user_id),
        "token_type": "bearer",
        "expires_in": 3600,
        "refresh_token": format!("refresh-{}", user_id),
        "user": {"id": user_id, "email": EMAIL, "aud": "authenticated"}
    })
}

async fn token(
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
    Json(body): Json<Value>,
) -> Response {
    if !has_api_key(&headers) {
        return error(StatusCode::UNAUTHORIZED, json!({"message": "No API key found in request"}));
    }

    match params.get("grant_type").map(String::as_str) {
        Some("password") => {
            if body["email"] == EMAIL && body["password"] == PASSWORD {
                Json(token_body(USER_ID)).into_response()
            } else {
                error(
                    StatusCode::BAD_REQUEST,
                    json!({"error": "invalid_grant", "error_description": "Invalid login credentials"}),
                )
            }
        }
        Some("refresh_token") => match body["refresh_token"].as_str().and_then(|t| t.strip_prefix("refresh-")) {
            Some(user_id) => Json(token_body(user_id)).into_response(),
            None => error(
                StatusCode::BAD_REQUEST,
                json!({"code": 400, "error_code": "refresh_token_not_found", "msg": "Invalid Refresh Token"}),
            ),
        },
        _ => error(StatusCode::BAD_REQUEST, json!({"msg": "unsupported grant_type"})),
    }
}

async fn signup(Json(body): Json<Value>) -> Response {
    let email = body["email"].as_str().unwrap_or_default();
    if email.starts_with("instant") {
        let mut session = token_body("user-instant");
        session["user"]["email"] = json!(email);
        Json(session).into_response()
    } else {
        Json(json!({"id": "user-pending", "email": email, "confirmation_sent_at": "2025-01-01T00:00:00Z"}))
            .into_response()
    }
}

async fn user(headers: HeaderMap) -> Response {
    match authorize(&headers) {
        Ok(user_id) => Json(json!({"id": user_id, "email": EMAIL})).into_response(),
        Err(response) => response,
    }
}

async fn logout(State(fake): State<FakeBackend>, headers: HeaderMap) -> Response {
    match authorize(&headers) {
        Ok(user_id) => {
            fake.state.lock().unwrap().signed_out.push(user_id);
            StatusCode::NO_CONTENT.into_response()
        }
        Err(response) => response,
    }
}

/// Apply `col=eq.value` filters
fn matches_filters(row: &Value, params: &HashMap<String, String>) -> bool {
    params
        .iter()
        .filter(|(key, _)| key.as_str() != "select")
        .all(|(key, value)| {
            let expected = value.strip_prefix("eq.").unwrap_or(value);
            row[key.as_str()].as_str() == Some(expected)
        })
}

/// Render a task row the way `select=*,workflows(name)` would
fn with_join(state: &FakeState, row: &Value, params: &HashMap<String, String>) -> Value {
    let mut row = row.clone();
    let joined = params
        .get("select")
        .map(|s| s.contains("workflows(name)"))
        .unwrap_or(false);

    if joined {
        let workflow = row["workflow_id"].as_str().and_then(|id| {
            state
                .workflows
                .iter()
                .find(|w| w["id"].as_str() == Some(id))
                .map(|w| json!({"name": w["name"]}))
        });
        row["workflows"] = workflow.unwrap_or(Value::Null);
    }
    row
}

fn as_rows(body: Value) -> Vec<Map<String, Value>> {
    match body {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|v| v.as_object().cloned())
            .collect(),
        Value::Object(map) => vec![map],
        _ => Vec::new(),
    }
}

fn wants_representation(headers: &HeaderMap) -> bool {
    headers.get("prefer").and_then(|v| v.to_str().ok()) == Some("return=representation")
}

async fn select_tasks(
    State(fake): State<FakeBackend>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let user_id = match authorize(&headers) {
        Ok(user_id) => user_id,
        Err(response) => return response,
    };

    let state = fake.state.lock().unwrap();
    let rows: Vec<Value> = state
        .tasks
        .iter()
        .filter(|row| row["user_id"].as_str() == Some(user_id.as_str()))
        .filter(|row| matches_filters(row, &params))
        .map(|row| with_join(&state, row, &params))
        .collect();

    Json(rows).into_response()
}

async fn insert_tasks(
    State(fake): State<FakeBackend>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
    Json(body): Json<Value>,
) -> Response {
    let user_id = match authorize(&headers) {
        Ok(user_id) => user_id,
        Err(response) => return response,
    };

    let mut state = fake.state.lock().unwrap();
    let mut inserted = Vec::new();
    for mut row in as_rows(body) {
        if row.get("user_id").and_then(Value::as_str) != Some(user_id.as_str()) {
            return error(
                StatusCode::FORBIDDEN,
                json!({"code": "42501", "message": "new row violates row-level security policy for table \"tasks\""}),
            );
        }
        let priority = row.get("priority").and_then(Value::as_str).unwrap_or("medium");
        if !["high", "medium", "low"].contains(&priority) {
            return error(
                StatusCode::BAD_REQUEST,
                json!({"code": "22P02", "message": format!("invalid input value for enum task_priority: \"{}\"", priority)}),
            );
        }
        row.insert("id".to_string(), json!(state.next_id("task")));
        row.insert("created_at".to_string(), json!("2025-04-01T00:00:00+00:00"));
        row.insert("updated_at".to_string(), Value::Null);
        state.tasks.push(Value::Object(row.clone()));
        inserted.push(Value::Object(row));
    }

    if wants_representation(&headers) {
        let rows: Vec<Value> = inserted.iter().map(|row| with_join(&state, row, &params)).collect();
        (StatusCode::CREATED, Json(rows)).into_response()
    } else {
        StatusCode::CREATED.into_response()
    }
}

async fn update_tasks(
    State(fake): State<FakeBackend>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
    Json(body): Json<Value>,
) -> Response {
    let user_id = match authorize(&headers) {
        Ok(user_id) => user_id,
        Err(response) => return response,
    };

    let changes = body.as_object().cloned().unwrap_or_default();
    let mut state = fake.state.lock().unwrap();
    let prefer = headers.get("prefer").and_then(|v| v.to_str().ok()).map(str::to_string);
    state.task_patches.push((body.clone(), prefer));
    let mut updated = Vec::new();
    for row in state.tasks.iter_mut() {
        if row["user_id"].as_str() == Some(user_id.as_str()) && matches_filters(row, &params) {
            if let Some(object) = row.as_object_mut() {
                for (key, value) in &changes {
                    object.insert(key.clone(), value.clone());
                }
            }
            updated.push(row.clone());
        }
    }

    if !wants_representation(&headers) {
        return StatusCode::NO_CONTENT.into_response();
    }
    let rows: Vec<Value> = updated.iter().map(|row| with_join(&state, row, &params)).collect();
    Json(rows).into_response()
}

async fn delete_tasks(
    State(fake): State<FakeBackend>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let user_id = match authorize(&headers) {
        Ok(user_id) => user_id,
        Err(response) => return response,
    };

    fake.state
        .lock()
        .unwrap()
        .tasks
        .retain(|row| !(row["user_id"].as_str() == Some(user_id.as_str()) && matches_filters(row, &params)));

    StatusCode::NO_CONTENT.into_response()
}

async fn select_workflows(
    State(fake): State<FakeBackend>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let user_id = match authorize(&headers) {
        Ok(user_id) => user_id,
        Err(response) => return response,
    };

    let state = fake.state.lock().unwrap();
    let rows: Vec<Value> = state
        .workflows
        .iter()
        .filter(|row| row["user_id"].as_str() == Some(user_id.as_str()))
        .filter(|row| matches_filters(row, &params))
        .cloned()
        .collect();

    Json(rows).into_response()
}

async fn insert_workflows(
    State(fake): State<FakeBackend>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if let Err(response) = authorize(&headers) {
        return response;
    }

    let mut state = fake.state.lock().unwrap();
    let mut inserted = Vec::new();
    for mut row in as_rows(body) {
        row.insert("id".to_string(), json!(state.next_id("wf")));
        row.insert("created_at".to_string(), json!("2025-04-01T00:00:00+00:00"));
        state.workflows.push(Value::Object(row.clone()));
        inserted.push(Value::Object(row));
    }

    (StatusCode::CREATED, Json(inserted)).into_response()
}

async fn chat(State(fake): State<FakeBackend>, headers: HeaderMap, Json(body): Json<Value>) -> Response {
    if !has_api_key(&headers) {
        return error(StatusCode::UNAUTHORIZED, json!({"error": "missing apikey"}));
    }

    let authorization = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();

    match body["message"].as_str() {
        Some(message) if !message.is_empty() => {
            let mut state = fake.state.lock().unwrap();
            state.chat_messages.push(message.to_string());
            state.chat_authorizations.push(authorization);
            drop(state);
            if message == "fail" {
                return error(StatusCode::TOO_MANY_REQUESTS, json!({"error": "Rate limit reached"}));
            }
            Json(json!({"text": format!("Try breaking \"{}\" into smaller steps.", message)})).into_response()
        }
        _ => error(
            StatusCode::BAD_REQUEST,
            json!({"error": "Request body must be JSON with a 'message' string."}),
        ),
    }
}
