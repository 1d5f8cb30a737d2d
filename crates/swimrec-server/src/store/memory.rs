//! In-memory record store
//!
//! Keeps records in a vector in insertion order. Used when `STORE_BACKEND`
//! is `memory` and by the HTTP tests.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{
    FindWindow, NewRecord, Record, RecordChanges, RecordFilter, RecordStore, StoreResult,
};

#[derive(Debug, Default)]
pub struct MemoryRecordStore {
    records: RwLock<Vec<Record>>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a store with existing records, keeping their order
    pub fn with_records(records: Vec<Record>) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn count(&self, filter: &RecordFilter) -> StoreResult<u64> {
        let records = self.records.read().await;
        Ok(records.iter().filter(|r| filter.matches(r)).count() as u64)
    }

    async fn find(&self, filter: &RecordFilter, window: FindWindow) -> StoreResult<Vec<Record>> {
        let records = self.records.read().await;
        let matching = records.iter().filter(|r| filter.matches(r)).cloned();

        let found = match window {
            FindWindow::All => matching.collect(),
            FindWindow::Slice { skip, limit } => matching
                .skip(usize::try_from(skip).unwrap_or(usize::MAX))
                .take(usize::try_from(limit).unwrap_or(usize::MAX))
                .collect(),
        };

        Ok(found)
    }

    async fn get(&self, id: Uuid) -> StoreResult<Option<Record>> {
        let records = self.records.read().await;
        Ok(records.iter().find(|r| r.id == id).cloned())
    }

    async fn insert(&self, record: NewRecord) -> StoreResult<Record> {
        let record = Record {
            id: Uuid::new_v4(),
            stroke: record.stroke,
            distance: record.distance,
            time: record.time,
            name: record.name,
            gender: record.gender,
            country: record.country,
            image_url: record.image_url,
            favorite: false,
            created_at: Utc::now(),
        };

        self.records.write().await.push(record.clone());
        Ok(record)
    }

    async fn update(&self, id: Uuid, changes: RecordChanges) -> StoreResult<Option<Record>> {
        let mut records = self.records.write().await;
        Ok(records.iter_mut().find(|r| r.id == id).map(|r| {
            changes.apply(r);
            r.clone()
        }))
    }

    async fn toggle_favorite(&self, id: Uuid) -> StoreResult<Option<Record>> {
        let mut records = self.records.write().await;
        Ok(records.iter_mut().find(|r| r.id == id).map(|r| {
            r.favorite = !r.favorite;
            r.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> StoreResult<bool> {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|r| r.id != id);
        Ok(records.len() != before)
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}
