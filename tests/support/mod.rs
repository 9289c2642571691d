#![allow(dead_code)]

//! In-memory stand-in for the restaurant backend.
//!
//! Serves the conventional collection/resource routes over a real loopback
//! socket so the client under test exercises its actual HTTP stack. Mirrors
//! the production backend's observable behavior: 2xx with a message body on
//! success, 404 for unknown ids, and a joined person `name` on customers
//! and employees.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde_json::{Map, Value, json};

#[derive(Clone, Default)]
pub struct MockBackend {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Default)]
struct Inner {
    tables: HashMap<String, Vec<Map<String, Value>>>,
    next_id: i64,
    requests: Vec<(String, String)>,
    last_payload: Option<Value>,
    failing: bool,
}

impl MockBackend {
    /// Insert a record, assigning the next id unless the caller set one.
    pub fn seed(&self, resource: &str, mut record: Map<String, Value>) -> i64 {
        let mut inner = self.inner.lock().unwrap();
        let id = record
            .get("id")
            .and_then(Value::as_i64)
            .unwrap_or(inner.next_id + 1);
        inner.next_id = inner.next_id.max(id);
        record.insert("id".to_string(), json!(id));
        inner
            .tables
            .entry(resource.to_string())
            .or_default()
            .push(record);
        id
    }

    /// Insert a record exactly as given, even without an id.
    pub fn seed_raw(&self, resource: &str, record: Map<String, Value>) {
        let mut inner = self.inner.lock().unwrap();
        inner
            .tables
            .entry(resource.to_string())
            .or_default()
            .push(record);
    }

    pub fn records(&self, resource: &str) -> Vec<Map<String, Value>> {
        let inner = self.inner.lock().unwrap();
        inner.tables.get(resource).cloned().unwrap_or_default()
    }

    /// Total requests served so far, any method.
    pub fn request_count(&self) -> usize {
        self.inner.lock().unwrap().requests.len()
    }

    /// Body of the most recent POST or PUT.
    pub fn last_payload(&self) -> Option<Value> {
        self.inner.lock().unwrap().last_payload.clone()
    }

    /// When set, every route answers 500.
    pub fn set_failing(&self, failing: bool) {
        self.inner.lock().unwrap().failing = failing;
    }
}

/// Bind an ephemeral loopback port and serve the mock on it.
pub async fn spawn() -> (String, MockBackend) {
    let backend = MockBackend::default();
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind mock backend");
    let addr = listener.local_addr().expect("mock backend addr");

    let app = router(backend.clone());
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve mock backend");
    });

    (format!("http://{addr}"), backend)
}

fn router(backend: MockBackend) -> Router {
    Router::new()
        .route("/{resource}", get(list).post(create))
        .route(
            "/{resource}/{id}",
            axum::routing::put(update).delete(remove),
        )
        .with_state(backend)
}

async fn list(State(backend): State<MockBackend>, Path(resource): Path<String>) -> Response {
    let inner = &mut *backend.inner.lock().unwrap();
    inner.requests.push(("GET".to_string(), format!("/{resource}")));
    if inner.failing {
        return failure();
    }

    let rows: Vec<Value> = inner
        .tables
        .get(&resource)
        .cloned()
        .unwrap_or_default()
        .into_iter()
        .map(|mut record| {
            if resource == "customers" || resource == "employees" {
                if let Some(name) = joined_person_name(&inner.tables, &record) {
                    record.insert("name".to_string(), name);
                }
            }
            Value::Object(record)
        })
        .collect();

    Json(rows).into_response()
}

async fn create(
    State(backend): State<MockBackend>,
    Path(resource): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    let inner = &mut *backend.inner.lock().unwrap();
    inner.requests.push(("POST".to_string(), format!("/{resource}")));
    if inner.failing {
        return failure();
    }
    inner.last_payload = Some(body.clone());

    let Value::Object(mut record) = body else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"message": "expected an object"})),
        )
            .into_response();
    };

    inner.next_id += 1;
    record.insert("id".to_string(), json!(inner.next_id));
    inner.tables.entry(resource).or_default().push(record);

    (
        StatusCode::CREATED,
        Json(json!({"message": "created successfully"})),
    )
        .into_response()
}

async fn update(
    State(backend): State<MockBackend>,
    Path((resource, id)): Path<(String, i64)>,
    Json(body): Json<Value>,
) -> Response {
    let inner = &mut *backend.inner.lock().unwrap();
    inner
        .requests
        .push(("PUT".to_string(), format!("/{resource}/{id}")));
    if inner.failing {
        return failure();
    }
    inner.last_payload = Some(body.clone());

    let record = inner
        .tables
        .get_mut(&resource)
        .and_then(|table| table.iter_mut().find(|r| r.get("id").and_then(Value::as_i64) == Some(id)));

    match (record, body) {
        (Some(record), Value::Object(fields)) => {
            for (key, value) in fields {
                record.insert(key, value);
            }
            (StatusCode::OK, Json(json!({"message": "updated successfully"}))).into_response()
        }
        (None, _) => not_found(),
        (Some(_), _) => (
            StatusCode::BAD_REQUEST,
            Json(json!({"message": "expected an object"})),
        )
            .into_response(),
    }
}

async fn remove(
    State(backend): State<MockBackend>,
    Path((resource, id)): Path<(String, i64)>,
) -> Response {
    let inner = &mut *backend.inner.lock().unwrap();
    inner
        .requests
        .push(("DELETE".to_string(), format!("/{resource}/{id}")));
    if inner.failing {
        return failure();
    }

    let Some(table) = inner.tables.get_mut(&resource) else {
        return not_found();
    };
    match table
        .iter()
        .position(|r| r.get("id").and_then(Value::as_i64) == Some(id))
    {
        Some(index) => {
            table.remove(index);
            (StatusCode::OK, Json(json!({"message": "deleted successfully"}))).into_response()
        }
        None => not_found(),
    }
}

fn joined_person_name(
    tables: &HashMap<String, Vec<Map<String, Value>>>,
    record: &Map<String, Value>,
) -> Option<Value> {
    let person_id = match record.get("person_id") {
        Some(Value::Number(n)) => n.as_i64()?,
        Some(Value::String(s)) => s.parse().ok()?,
        _ => return None,
    };
    tables
        .get("persons")?
        .iter()
        .find(|p| p.get("id").and_then(Value::as_i64) == Some(person_id))?
        .get("name")
        .cloned()
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(json!({"message": "not found"}))).into_response()
}

fn failure() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({"message": "internal error"})),
    )
        .into_response()
}

/// Object literal helper: `obj(json!({...}))`.
pub fn obj(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("expected a JSON object, got {other}"),
    }
}

pub fn person(name: &str, age: i64, gender: &str, contact: &str) -> Map<String, Value> {
    obj(json!({
        "name": name,
        "age": age,
        "gender": gender,
        "contact": contact,
    }))
}
