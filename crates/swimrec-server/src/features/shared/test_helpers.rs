//! Test helpers and fixtures for record tests
//!
//! # Examples
//!
//! ```rust,ignore
//! use swimrec_server::features::shared::test_helpers::*;
//!
//! let store = seeded_store(vec![
//!     TestRecord::new("freestyle", "100m").with_name("Dressel").build(),
//!     TestRecord::new("butterfly", "200m").with_favorite(true).build(),
//! ]);
//! ```

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use std::sync::Arc;
use uuid::Uuid;

use crate::features::shared::{JsonObject, ResourceUrls};
use crate::store::{
    DynRecordStore, FindWindow, MemoryRecordStore, NewRecord, Record, RecordChanges,
    RecordFilter, RecordStore, StoreError, StoreResult,
};

pub const TEST_BASE_URL: &str = "http://localhost:8000";

pub fn test_urls() -> ResourceUrls {
    ResourceUrls::new(TEST_BASE_URL)
}

/// Builder for test records
#[derive(Debug, Clone)]
pub struct TestRecord {
    record: Record,
}

impl TestRecord {
    pub fn new(stroke: &str, distance: &str) -> Self {
        Self {
            record: Record {
                id: Uuid::new_v4(),
                stroke: stroke.to_string(),
                distance: distance.to_string(),
                time: "00:47.02".to_string(),
                name: "Test Swimmer".to_string(),
                gender: "male".to_string(),
                country: "US".to_string(),
                image_url: "https://img.example.com/swimmer.png".to_string(),
                favorite: false,
                created_at: Utc::now(),
            },
        }
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.record.name = name.to_string();
        self
    }

    pub fn with_favorite(mut self, favorite: bool) -> Self {
        self.record.favorite = favorite;
        self
    }

    pub fn build(self) -> Record {
        self.record
    }
}

/// `n` freestyle records named `Swimmer 0` .. `Swimmer n-1`
pub fn numbered_records(n: usize) -> Vec<Record> {
    (0..n)
        .map(|i| {
            TestRecord::new("freestyle", "100m")
                .with_name(&format!("Swimmer {}", i))
                .build()
        })
        .collect()
}

pub fn seeded_store(records: Vec<Record>) -> DynRecordStore {
    Arc::new(MemoryRecordStore::with_records(records))
}

/// A complete, valid create body
pub fn valid_body() -> JsonObject {
    match serde_json::json!({
        "stroke": "freestyle",
        "distance": "50m",
        "time": "00:20.91",
        "name": "Cesar Cielo",
        "gender": "male",
        "country": "BR",
        "imageUrl": "https://img.example.com/cielo.png"
    }) {
        Value::Object(map) => map,
        _ => unreachable!(),
    }
}

/// Store whose every call fails
#[derive(Debug, Default)]
pub struct FailingStore;

fn down<T>() -> StoreResult<T> {
    Err(StoreError::Backend("store unavailable".to_string()))
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
