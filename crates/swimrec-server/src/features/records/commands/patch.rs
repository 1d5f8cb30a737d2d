//! Partial update command (`PATCH`)
//!
//! Like `PUT`, but `favorite` may be changed too and blank strings are
//! skipped instead of rejected.

use crate::features::records::types::{parse_record_id, RecordView};
use crate::features::shared::validation::{lenient_text, optional_bool, FieldError, JsonObject};
use crate::features::shared::ResourceUrls;
use crate::store::{DynRecordStore, RecordChanges, StoreError};

#[derive(Debug, Clone)]
pub struct PatchRecordCommand {
    pub id: String,
    pub body: JsonObject,
}

#[derive(Debug, thiserror::Error)]
pub enum PatchRecordError {
    #[error("Record not found")]
    NotFound,

    #[error("Empty request")]
    EmptyRequest,

    #[error("No valid fields provided for update")]
    NoValidFields,

    #[error(transparent)]
    Field(#[from] FieldError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl PatchRecordCommand {
    pub fn validate(&self) -> Result<RecordChanges, PatchRecordError> {
        let body = &self.body;
        if body.is_empty() {
            return Err(PatchRecordError::EmptyRequest);
        }

        let changes = RecordChanges {
            stroke: lenient_text(body, "stroke")?,
            distance: lenient_text(body, "distance")?,
            time: lenient_text(body, "time")?,
            name: lenient_text(body, "name")?,
            gender: lenient_text(body, "gender")?,
            country: lenient_text(body, "country")?,
            image_url: lenient_text(body, "imageUrl")?,
            favorite: optional_bool(body, "favorite")?,
        };

        if changes.is_empty() {
            return Err(PatchRecordError::NoValidFields);
        }

        Ok(changes)
    }
}

#[tracing::instrument(skip(store, command, urls), fields(id = %command.id))]
pub async fn handle(
    store: DynRecordStore,
    command: PatchRecordCommand,
    urls: &ResourceUrls,
) -> Result<RecordView, PatchRecordError> {
    let id = parse_record_id(&command.id).ok_or(PatchRecordError::NotFound)?;
    let changes = command.validate()?;

    let updated = store
        .update(id, changes)
        .await?
        .ok_or(PatchRecordError::NotFound)?;

    tracing::info!(record_id = %updated.id, "Record patched");

    Ok(RecordView::new(updated, urls))
}
