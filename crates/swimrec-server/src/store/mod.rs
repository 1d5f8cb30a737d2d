//! Record storage
//!
//! The HTTP layer never talks to a database directly. Every feature goes
//! through the [`RecordStore`] trait, which models the single `records`
//! collection:
//!
//! - `count` / `find` take a [`RecordFilter`] of exact-match constraints
//! - `find` takes a [`FindWindow`] (everything, or a skip/limit slice)
//! - single-record operations are keyed by the store-assigned [`Uuid`]
//!
//! Two implementations exist: [`PgRecordStore`] for PostgreSQL and
//! [`MemoryRecordStore`] for local runs and tests. Both return records in
//! insertion order; no other ordering is applied.
//!
//! `count` and `find` are separate round trips. Under concurrent writes the
//! total reported by `count` may not match what `find` returns for the same
//! filter.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

pub mod memory;
pub mod postgres;

pub use memory::MemoryRecordStore;
pub use postgres::PgRecordStore;

/// Errors reported by a record store
#[derive(Debug, Error)]
pub enum StoreError {
    /// SQL query or connection error
    #[error(transparent)]
    Database(#[from] sqlx::Error),

    /// Failure from a non-SQL backend
    #[error("{0}")]
    Backend(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Shared handle to the configured store
pub type DynRecordStore = Arc<dyn RecordStore>;

/// A persisted swim record
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Record {
    pub id: Uuid,
    pub stroke: String,
    pub distance: String,
    #[sqlx(rename = "swim_time")]
    pub time: String,
    pub name: String,
    pub gender: String,
    pub country: String,
    pub image_url: String,
    pub favorite: bool,
    pub created_at: DateTime<Utc>,
}

/// Field values for a record that does not exist yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRecord {
    pub stroke: String,
    pub distance: String,
    pub time: String,
    pub name: String,
    pub gender: String,
    pub country: String,
    pub image_url: String,
}

/// Partial update; `None` leaves the stored value untouched
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordChanges {
    pub stroke: Option<String>,
    pub distance: Option<String>,
    pub time: Option<String>,
    pub name: Option<String>,
    pub gender: Option<String>,
    pub country: Option<String>,
    pub image_url: Option<String>,
    pub favorite: Option<bool>,
}

impl RecordChanges {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    fn apply(self, record: &mut Record) {
        let RecordChanges {
            stroke,
            distance,
            time,
            name,
            gender,
            country,
            image_url,
            favorite,
        } = self;

        if let Some(v) = stroke {
            record.stroke = v;
        }
        if let Some(v) = distance {
            record.distance = v;
        }
        if let Some(v) = time {
            record.time = v;
        }
        if let Some(v) = name {
            record.name = v;
        }
        if let Some(v) = gender {
            record.gender = v;
        }
        if let Some(v) = country {
            record.country = v;
        }
        if let Some(v) = image_url {
            record.image_url = v;
        }
        if let Some(v) = favorite {
            record.favorite = v;
        }
    }
}

/// Exact-match constraints; `None` means "do not filter on this field"
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordFilter {
    pub stroke: Option<String>,
    pub distance: Option<String>,
}

impl RecordFilter {
    /// Build a filter, dropping empty values
    pub fn new(stroke: Option<&str>, distance: Option<&str>) -> Self {
        let keep = |v: Option<&str>| v.filter(|s| !s.is_empty()).map(str::to_string);
        Self {
            stroke: keep(stroke),
            distance: keep(distance),
        }
    }

    pub fn matches(&self, record: &Record) -> bool {
        self.stroke.as_deref().map_or(true, |s| record.stroke == s)
            && self.distance.as_deref().map_or(true, |d| record.distance == d)
    }
}

/// Which slice of the matching records `find` returns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FindWindow {
    All,
    Slice { skip: u64, limit: u64 },
}

/// The storage collaborator behind every records endpoint
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Number of records matching `filter`, independent of any window
    async fn count(&self, filter: &RecordFilter) -> StoreResult<u64>;

    /// Records matching `filter` within `window`, in insertion order
    async fn find(&self, filter: &RecordFilter, window: FindWindow) -> StoreResult<Vec<Record>>;

    async fn get(&self, id: Uuid) -> StoreResult<Option<Record>>;

    /// Persist a new record; `favorite` starts out false
    async fn insert(&self, record: NewRecord) -> StoreResult<Record>;

    /// Apply `changes` and return the updated record, or `None` if `id` is unknown
    async fn update(&self, id: Uuid, changes: RecordChanges) -> StoreResult<Option<Record>>;

    /// Flip `favorite` atomically
    async fn toggle_favorite(&self, id: Uuid) -> StoreResult<Option<Record>>;

    /// Returns `false` when nothing was deleted
    async fn delete(&self, id: Uuid) -> StoreResult<bool>;

    /// Cheap connectivity check used by `/health`
    async fn ping(&self) -> StoreResult<()>;
}
