//! In-process mock of the file API used by client and controller tests

use axum::{
    extract::{Multipart, Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::model::{FileRecord, TagsUpdate};

pub const EMAIL: &str = "user@example.com";
pub const PASSWORD: &str = "secret";
pub const TOKEN: &str = "token-123";
pub const TAKEN_EMAIL: &str = "taken@example.com";
pub const SEEDED_ID: &str = "f0";

#[derive(Debug, Default)]
pub struct MockState {
    pub files: Vec<FileRecord>,
    pub fail_list: bool,
    pub fail_upload: bool,
    pub fail_tags: bool,
    pub fail_delete: bool,
    pub slow_tags: bool,
    pub requests: usize,
    pub next_id: usize,
}

/// One file tagged "beach"
pub fn seeded() -> MockState {
    MockState {
        files: vec![FileRecord {
            id: SEEDED_ID.to_string(),
            original_name: Some("beach.png".to_string()),
            mime_type: Some("image/png".to_string()),
            size: 500 * 1024,
            path: "/uploads/beach.png".to_string(),
            tags: vec!["beach".to_string()],
            views: 0,
            shareable_link: None,
        }],
        next_id: 1,
        ..MockState::default()
    }
}

type Shared = Arc<Mutex<MockState>>;

pub struct MockApi {
    pub base_url: String,
    state: Shared,
}

impl MockApi {
    pub async fn spawn(state: MockState) -> Self {
        let state = Arc::new(Mutex::new(state));
        let app = router(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}", addr),
            state,
        }
    }

    pub fn update(&self, f: impl FnOnce(&mut MockState)) {
        f(&mut self.state.lock().unwrap());
    }

    pub fn requests(&self) -> usize {
        self.state.lock().unwrap().requests
    }

    pub fn file(&self, id: &str) -> Option<FileRecord> {
        self.state
            .lock()
            .unwrap()
            .files
            .iter()
            .find(|f| f.id == id)
            .cloned()
    }

    pub fn file_count(&self) -> usize {
        self.state.lock().unwrap().files.len()
    }
}

fn router(state: Shared) -> Router {
    Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/auth/register", post(register))
        .route("/api/files/list", get(list))
        .route("/api/files/upload", post(upload))
        .route("/api/files/:id/tags", post(update_tags))
        .route("/api/files/:id/share", post(share))
        .route("/api/files/:id", delete(remove))
        .route("/api/files/stats/:id", get(stats))
        .with_state(state)
}

fn error(status: StatusCode, body: Value) -> Response {
    (status, Json(body)).into_response()
}

/// Count the request and check the bearer token
fn authorize(state: &Shared, headers: &HeaderMap) -> Result<(), Response> {
    let mut guard = state.lock().unwrap();
    guard.requests += 1;

    let expected = format!("Bearer {}", TOKEN);
    match headers.get("authorization").and_then(|v| v.to_str().ok()) {
        Some(value) if value == expected => Ok(()),
        _ => Err(error(StatusCode::UNAUTHORIZED, json!({"error": "Unauthorized"}))),
    }
}

fn not_found() -> Response {
    error(StatusCode::NOT_FOUND, json!({"error": "File not found"}))
}

async fn login(State(state): State<Shared>, Json(body): Json<Value>) -> Response {
    state.lock().unwrap().requests += 1;
    if body["email"] == EMAIL && body["password"] == PASSWORD {
        Json(json!({ "token": TOKEN })).into_response()
    } else {
        error(
            StatusCode::UNAUTHORIZED,
            json!({"message": "Invalid email or password"}),
        )
    }
}

async fn register(State(state): State<Shared>, Json(body): Json<Value>) -> Response {
    state.lock().unwrap().requests += 1;
    if body.get("confirmPassword").is_some() {
        return error(StatusCode::BAD_REQUEST, json!({"message": "Unexpected field"}));
    }
    if body["email"] == TAKEN_EMAIL {
        error(StatusCode::BAD_REQUEST, json!({"message": "User already exists"}))
    } else {
        Json(json!({ "token": TOKEN })).into_response()
    }
}

async fn list(State(state): State<Shared>, headers: HeaderMap) -> Response {
    if let Err(resp) = authorize(&state, &headers) {
        return resp;
    }
    let guard = state.lock().unwrap();
    if guard.fail_list {
        return error(StatusCode::INTERNAL_SERVER_ERROR, json!({}));
    }
    Json(guard.files.clone()).into_response()
}

async fn upload(State(state): State<Shared>, headers: HeaderMap, mut multipart: Multipart) -> Response {
    if let Err(resp) = authorize(&state, &headers) {
        return resp;
    }
    if state.lock().unwrap().fail_upload {
        return error(
            StatusCode::BAD_REQUEST,
            json!({"error": "File type not supported by storage", "message": "Bad Request"}),
        );
    }

    while let Ok(Some(field)) = multipart.next_field().await {
        if field.name() != Some("file") {
            continue;
        }
        let name = field.file_name().map(str::to_string);
        let mime = field.content_type().map(str::to_string);
        let Ok(bytes) = field.bytes().await else {
            return error(StatusCode::BAD_REQUEST, json!({"error": "Unreadable upload"}));
        };

        let mut guard = state.lock().unwrap();
        let id = format!("f{}", guard.next_id);
        guard.next_id += 1;
        let record = FileRecord {
            id: id.clone(),
            path: format!("/uploads/{}", name.clone().unwrap_or_default()),
            original_name: name,
            mime_type: mime,
            size: bytes.len() as u64,
            tags: Vec::new(),
            views: 0,
            shareable_link: None,
        };
        guard.files.push(record.clone());
        return Json(record).into_response();
    }

    error(StatusCode::BAD_REQUEST, json!({"error": "No file uploaded"}))
}

async fn update_tags(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<TagsUpdate>,
) -> Response {
    if let Err(resp) = authorize(&state, &headers) {
        return resp;
    }
    let slow = state.lock().unwrap().slow_tags;
    if slow {
        tokio::time::sleep(Duration::from_millis(200)).await;
    }

    let mut guard = state.lock().unwrap();
    if guard.fail_tags {
        return error(
            StatusCode::INTERNAL_SERVER_ERROR,
            json!({"error": "Database unavailable"}),
        );
    }
    match guard.files.iter_mut().find(|f| f.id == id) {
        Some(file) => {
            file.tags = body.tags;
            Json(json!({"message": "Tags updated"})).into_response()
        }
        None => not_found(),
    }
}

async fn remove(State(state): State<Shared>, headers: HeaderMap, Path(id): Path<String>) -> Response {
    if let Err(resp) = authorize(&state, &headers) {
        return resp;
    }
    let mut guard = state.lock().unwrap();
    if guard.fail_delete {
        return error(StatusCode::INTERNAL_SERVER_ERROR, json!({}));
    }
    let before = guard.files.len();
    guard.files.retain(|f| f.id != id);
    if guard.files.len() == before {
        return not_found();
    }
    Json(json!({"message": "File deleted"})).into_response()
}

async fn share(State(state): State<Shared>, headers: HeaderMap, Path(id): Path<String>) -> Response {
    if let Err(resp) = authorize(&state, &headers) {
        return resp;
    }
    let mut guard = state.lock().unwrap();
    match guard.files.iter_mut().find(|f| f.id == id) {
        Some(file) => {
            file.views += 1;
            if file.shareable_link.is_none() {
                file.shareable_link = Some(format!("link-{}", file.id));
            }
            Json(file.clone()).into_response()
        }
        None => not_found(),
    }
}

async fn stats(State(state): State<Shared>, headers: HeaderMap, Path(id): Path<String>) -> Response {
    if let Err(resp) = authorize(&state, &headers) {
        return resp;
    }
    let guard = state.lock().unwrap();
    match guard.files.iter().find(|f| f.id == id) {
        Some(file) => Json(json!({ "views": file.views })).into_response(),
        None => not_found(),
    }
}
