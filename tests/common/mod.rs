//! In-process stand-in for the `/products` REST API.
//!
//! Mirrors what a json-server style backend does: numeric ids, `createdAt`
//! stamped on create, merge-on-PUT, and 404 for unknown ids on GET/PUT.

#![allow(dead_code)]

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Default)]
pub struct StubState {
    pub products: Mutex<Vec<Value>>,
    next_id: AtomicU64,
    /// Every route answers 500 while set.
    pub fail: AtomicBool,
    /// List responses use the `{ "products": [...] }` envelope while set.
    pub wrap_list: AtomicBool,
    pub requests: AtomicU64,
}

impl StubState {
    pub fn product_count(&self) -> usize {
        self.products.lock().unwrap().len()
    }
}

type Shared = Arc<StubState>;

fn id_matches(product: &Value, id: &str) -> bool {
    match &product["id"] {
        Value::Number(n) => n.to_string() == id,
        Value::String(s) => s == id,
        _ => false,
    }
}

fn failing(state: &StubState) -> Option<Response> {
    state.requests.fetch_add(1, Ordering::SeqCst);
    if state.fail.load(Ordering::SeqCst) {
        Some((StatusCode::INTERNAL_SERVER_ERROR, "stub failure").into_response())
    } else {
        None
    }
}

async fn list(State(state): State<Shared>) -> Response {
    if let Some(res) = failing(&state) {
        return res;
    }
    let products = state.products.lock().unwrap().clone();
    if state.wrap_list.load(Ordering::SeqCst) {
        Json(json!({ "products": products })).into_response()
    } else {
        Json(Value::Array(products)).into_response()
    }
}

async fn create(State(state): State<Shared>, Json(mut body): Json<Value>) -> Response {
    if let Some(res) = failing(&state) {
        return res;
    }
    let id = state.next_id.fetch_add(1, Ordering::SeqCst);
    body["id"] = json!(id);
    body["createdAt"] = json!("2024-06-01T12:00:00.000Z");
    state.products.lock().unwrap().push(body.clone());
    (StatusCode::CREATED, Json(body)).into_response()
}

async fn fetch(State(state): State<Shared>, Path(id): Path<String>) -> Response {
    if let Some(res) = failing(&state) {
        return res;
    }
    let products = state.products.lock().unwrap();
    match products.iter().find(|p| id_matches(p, &id)) {
        Some(p) => Json(p.clone()).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn update(
    State(state): State<Shared>,
    Path(id): Path<String>,
    Json(patch): Json<Value>,
) -> Response {
    if let Some(res) = failing(&state) {
        return res;
    }
    let mut products = state.products.lock().unwrap();
    let Some(product) = products.iter_mut().find(|p| id_matches(p, &id)) else {
        return StatusCode::NOT_FOUND.into_response();
    };
    if let (Some(target), Some(fields)) = (product.as_object_mut(), patch.as_object()) {
        for (key, value) in fields {
            if key != "id" && key != "createdAt" {
                target.insert(key.clone(), value.clone());
            }
        }
    }
    Json(product.clone()).into_response()
}

async fn remove(State(state): State<Shared>, Path(id): Path<String>) -> Response {
    if let Some(res) = failing(&state) {
        return res;
    }
    state.products.lock().unwrap().retain(|p| !id_matches(p, &id));
    Json(json!({})).into_response()
}

pub fn router(state: Shared) -> Router {
    Router::new()
        .route("/products", get(list).post(create))
        .route("/products/:id", get(fetch).put(update).delete(remove))
        .with_state(state)
}

/// Serves the stub on an ephemeral port and returns the collection URL.
pub async fn spawn_stub(seed: Vec<Value>) -> (String, Shared) {
    let next_id = seed
        .iter()
        .filter_map(|p| p["id"].as_u64())
        .max()
        .unwrap_or(0)
        + 1;
    let state = Arc::new(StubState {
        products: Mutex::new(seed),
        next_id: AtomicU64::new(next_id),
        ..Default::default()
    });

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = router(state.clone());
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}/products", addr), state)
}

pub fn product_json(id: u64, name: &str, price: f64) -> Value {
    json!({
        "id": id,
        "name": name,
        "category": "Electronics",
        "price": price,
        "description": format!("{} description", name),
        "imageUrl": format!("https://img.example.com/{}.jpg", id),
        "createdAt": format!("2024-03-{:02}T10:00:00.000Z", id.clamp(1, 28)),
    })
}
