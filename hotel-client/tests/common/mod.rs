// hotel-client/tests/common/mod.rs
// In-memory stand-in for the site API

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{DefaultBodyLimit, Multipart, Path, Query, Request, State};
use axum::http::{Method, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use hotel_client::OneshotHttpClient;
use serde::Deserialize;
use serde_json::{Value, json};

type ApiResult = Result<Json<Value>, (StatusCode, Json<Value>)>;

fn api_error(status: StatusCode, message: &str) -> (StatusCode, Json<Value>) {
    (status, Json(json!({ "error": message })))
}

#[derive(Default)]
struct Inner {
    collections: Mutex<HashMap<String, Vec<Value>>>,
    requests: Mutex<Vec<(Method, String)>>,
    failing_ids: Mutex<HashSet<String>>,
    latency: Mutex<Duration>,
    next_id: AtomicU64,
}

#[derive(Clone, Default)]
pub struct StubApi {
    inner: Arc<Inner>,
}

impl StubApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace a collection's records
    pub fn seed(&self, collection: &str, records: Vec<Value>) -> &Self {
        self.inner
            .collections
            .lock()
            .unwrap()
            .insert(collection.to_string(), records);
        self
    }

    /// Writes (PUT/DELETE) on this id answer 500
    pub fn fail_writes_for(&self, id: &str) {
        self.inner.failing_ids.lock().unwrap().insert(id.to_string());
    }

    /// Delay every request, so concurrent actions overlap
    pub fn set_latency(&self, latency: Duration) {
        *self.inner.latency.lock().unwrap() = latency;
    }

    pub fn record(&self, collection: &str, id: &str) -> Option<Value> {
        self.inner
            .collections
            .lock()
            .unwrap()
            .get(collection)
            .and_then(|records| records.iter().find(|r| r["id"] == id).cloned())
    }

    pub fn records(&self, collection: &str) -> Vec<Value> {
        self.inner
            .collections
            .lock()
            .unwrap()
            .get(collection)
            .cloned()
            .unwrap_or_default()
    }

    pub fn requests(&self) -> Vec<(Method, String)> {
        self.inner.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.inner.requests.lock().unwrap().len()
    }

    /// Requests other than GET
    pub fn write_count(&self) -> usize {
        self.requests()
            .iter()
            .filter(|(m, _)| *m != Method::GET)
            .count()
    }

    pub fn clear_requests(&self) {
        self.inner.requests.lock().unwrap().clear();
    }

    pub fn router(&self) -> Router {
        Router::new()
            .route("/api/upload", post(upload))
            .route("/api/{collection}", get(list).post(create))
            .route(
                "/api/{collection}/{id}",
                get(fetch).put(update).delete(remove),
            )
            .layer(DefaultBodyLimit::max(16 * 1024 * 1024))
            .layer(middleware::from_fn_with_state(self.clone(), record_request))
            .with_state(self.clone())
    }

    pub fn client(&self) -> OneshotHttpClient {
        OneshotHttpClient::new(self.router())
    }
}

async fn record_request(State(stub): State<StubApi>, request: Request, next: Next) -> Response {
    stub.inner.requests.lock().unwrap().push((
        request.method().clone(),
        request.uri().to_string(),
    ));
    let latency = *stub.inner.latency.lock().unwrap();
    if !latency.is_zero() {
        tokio::time::sleep(latency).await;
    }
    next.run(request).await
}

async fn list(State(stub): State<StubApi>, Path(collection): Path<String>) -> Json<Value> {
    Json(Value::Array(stub.records(&collection)))
}

async fn fetch(
    State(stub): State<StubApi>,
    Path((collection, id)): Path<(String, String)>,
) -> ApiResult {
    stub.record(&collection, &id)
        .map(Json)
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, "Not found"))
}

async fn create(
    State(stub): State<StubApi>,
    Path(collection): Path<String>,
    Json(mut body): Json<Value>,
) -> ApiResult {
    let mut collections = stub.inner.collections.lock().unwrap();
    let records = collections.entry(collection).or_default();

    if let Some(title) = body.get("title").and_then(Value::as_str) {
        if records.iter().any(|r| r["title"] == title) {
            return Err(api_error(
                StatusCode::CONFLICT,
                "A banner with this title already exists",
            ));
        }
    }

    let id = format!("gen-{}", stub.inner.next_id.fetch_add(1, Ordering::SeqCst) + 1);
    let next_order = records
        .iter()
        .filter_map(|r| r["order"].as_i64())
        .max()
        .unwrap_or(0)
        + 1;

    let obj = body
        .as_object_mut()
        .ok_or_else(|| api_error(StatusCode::BAD_REQUEST, "Body must be an object"))?;
    obj.insert("id".into(), json!(id));
    obj.entry("order").or_insert(json!(next_order));
    obj.entry("isActive").or_insert(json!(true));

    records.push(body.clone());
    Ok(Json(body))
}

async fn update(
    State(stub): State<StubApi>,
    Path((collection, id)): Path<(String, String)>,
    Json(patch): Json<Value>,
) -> ApiResult {
    if stub.inner.failing_ids.lock().unwrap().contains(&id) {
        return Err(api_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Database unavailable",
        ));
    }
    let mut collections = stub.inner.collections.lock().unwrap();
    let record = collections
        .get_mut(&collection)
        .and_then(|records| records.iter_mut().find(|r| r["id"] == id.as_str()))
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, "Not found"))?;

    if let (Some(target), Some(fields)) = (record.as_object_mut(), patch.as_object()) {
        for (key, value) in fields {
            target.insert(key.clone(), value.clone());
        }
    }
    Ok(Json(record.clone()))
}

async fn remove(
    State(stub): State<StubApi>,
    Path((collection, id)): Path<(String, String)>,
) -> Response {
    if stub.inner.failing_ids.lock().unwrap().contains(&id) {
        return api_error(StatusCode::INTERNAL_SERVER_ERROR, "Database unavailable")
            .into_response();
    }
    let mut collections = stub.inner.collections.lock().unwrap();
    let Some(records) = collections.get_mut(&collection) else {
        return api_error(StatusCode::NOT_FOUND, "Not found").into_response();
    };
    let before = records.len();
    records.retain(|r| r["id"] != id.as_str());
    if records.len() == before {
        return api_error(StatusCode::NOT_FOUND, "Not found").into_response();
    }
    StatusCode::NO_CONTENT.into_response()
}

#[derive(Deserialize)]
struct UploadQuery {
    folder: String,
}

async fn upload(Query(query): Query<UploadQuery>, mut multipart: Multipart) -> ApiResult {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| api_error(StatusCode::BAD_REQUEST, &format!("Multipart error: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field.file_name().unwrap_or("upload").to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| api_error(StatusCode::BAD_REQUEST, &format!("Read error: {e}")))?;
        if bytes.is_empty() {
            return Err(api_error(StatusCode::BAD_REQUEST, "Empty file"));
        }
        if file_name.starts_with("corrupt") {
            return Err(api_error(StatusCode::UNPROCESSABLE_ENTITY, "Invalid image file"));
        }
        return Ok(Json(json!({
            "url": format!("https://cdn.test/{}/{}", query.folder, file_name)
        })));
    }
    Err(api_error(StatusCode::BAD_REQUEST, "No file provided"))
}

/// Banner documents as the API stores them
pub fn banner(id: &str, title: &str, order: i64, is_active: bool) -> Value {
    json!({
        "id": id,
        "title": title,
        "images": [format!("https://cdn.test/hotel/banners/{id}.jpg")],
        "order": order,
        "isActive": is_active
    })
}

pub fn testimonial(id: &str, name: &str, order: i64, is_active: bool) -> Value {
    json!({
        "id": id,
        "name": name,
        "quote": "Wonderful stay",
        "rating": 5,
        "order": order,
        "isActive": is_active
    })
}
