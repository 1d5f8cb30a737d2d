//! Common test utilities for swimrec server integration tests
//!
//! Every test builds the full application router on top of an in-memory
//! record store and drives it with `tower::ServiceExt::oneshot`, so no
//! database or network listener is needed.
//!
//! # Example
//!
//! ```no_run
//! mod common;
//! use common::TestApp;
//!
//! #[tokio::test]
//! async fn test_root() {
//!     let app = TestApp::new();
//!     let response = app.get("/").await;
//!     assert_eq!(response.status, 200);
//! }
//! ```

#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;
use uuid::Uuid;

use swimrec_server::{
    api::{create_router, AppState},
    config::{Config, StoreBackend},
    store::{
        DynRecordStore, FindWindow, MemoryRecordStore, NewRecord, Record, RecordChanges,
        RecordFilter, RecordStore, StoreError, StoreResult,
    },
};

/// Base URL produced by the default configuration
pub const BASE_URL: &str = "http://localhost:8000";

/// Response captured from the router
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

/// Application router plus a handle on its store
pub struct TestApp {
    pub router: Router,
    pub store: DynRecordStore,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_store(Arc::new(MemoryRecordStore::new()))
    }

    pub fn with_store(store: DynRecordStore) -> Self {
        let mut config = Config::default();
        config.store.backend = StoreBackend::Memory;

        let router = create_router(AppState::new(store.clone(), &config), &config);
        Self { router, store }
    }

    /// Insert `n` records named `Swimmer 0` .. `Swimmer n-1`
    pub async fn seed(&self, n: usize, stroke: &str) -> Vec<Record> {
        let mut created = Vec::with_capacity(n);
        for i in 0..n {
            created.push(
                self.store
                    .insert(new_record(stroke, "100m", &format!("Swimmer {}", i)))
                    .await
                    .unwrap(),
            );
        }
        created
    }

    pub async fn request(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.request(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
    }

    /// Send `body` as `application/json`
    pub async fn send_json(&self, method: Method, uri: &str, body: Value) -> TestResponse {
        self.request(
            Request::builder()
                .method(method)
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    pub async fn send_empty(&self, method: Method, uri: &str) -> TestResponse {
        self.request(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }
}

pub fn new_record(stroke: &str, distance: &str, name: &str) -> NewRecord {
    NewRecord {
        stroke: stroke.to_string(),
        distance: distance.to_string(),
        time: "00:51.71".to_string(),
        name: name.to_string(),
        gender: "female".to_string(),
        country: "SE".to_string(),
        image_url: "https://img.example.com/swimmer.png".to_string(),
    }
}

/// A complete create body
pub fn record_body() -> Value {
    serde_json::json!({
        "stroke": "butterfly",
        "distance": "100m",
        "time": "00:55.48",
        "name": "Sarah Sjostrom",
        "gender": "female",
        "country": "SE",
        "imageUrl": "https://img.example.com/sjostrom.png"
    })
}

/// Store whose every call fails with the same message
pub struct FailingStore;

fn down<T>() -> StoreResult<T> {
    Err(StoreError::Backend("connection refused".to_string()))
}

#[async_trait]
impl RecordStore for FailingStore {
    async fn count(&self, _: &RecordFilter) -> StoreResult<u64> {
        down()
    }

    async fn find(&self, _: &RecordFilter, _: FindWindow) -> StoreResult<Vec<Record>> {
        down()
    }

    async fn get(&self, _: Uuid) -> StoreResult<Option<Record>> {
        down()
    }

    async fn insert(&self, _: NewRecord) -> StoreResult<Record> {
        down()
    }

    async fn update(&self, _: Uuid, _: RecordChanges) -> StoreResult<Option<Record>> {
        down()
    }

    async fn toggle_favorite(&self, _: Uuid) -> StoreResult<Option<Record>> {
        down()
    }

    async fn delete(&self, _: Uuid) -> StoreResult<bool> {
        down()
    }

    async fn ping(&self) -> StoreResult<()> {
        down()
    }
}
