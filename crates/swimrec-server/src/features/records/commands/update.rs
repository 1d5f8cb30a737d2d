//! Replace record fields command (`PUT`)
//!
//! Only the seven text attributes can be changed here. Each one supplied must
//! be a non-blank string; attributes left out keep their stored value.

use crate::features::records::types::{parse_record_id, RecordView};
use crate::features::shared::validation::{optional_text, FieldError, JsonObject};
use crate::features::shared::ResourceUrls;
use crate::store::{DynRecordStore, RecordChanges, StoreError};

#[derive(Debug, Clone)]
pub struct UpdateRecordCommand {
    pub id: String,
    pub body: JsonObject,
}

/// Errors that can occur when updating a record
#[derive(Debug, thiserror::Error)]
pub enum UpdateRecordError {
    #[error("Empty request")]
    EmptyRequest,

    #[error("No valid fields provided for update")]
    NoValidFields,

    #[error(transparent)]
    Field(#[from] FieldError),

    #[error("Record not found")]
    NotFound,

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl UpdateRecordCommand {
    /// Validates the body and collects the changes to apply
    pub fn validate(&self) -> Result<RecordChanges, UpdateRecordError> {
        let body = &self.body;
        if body.is_empty() {
            return Err(UpdateRecordError::EmptyRequest);
        }

        let changes = RecordChanges {
            stroke: optional_text(body, "stroke")?,
            distance: optional_text(body, "distance")?,
            time: optional_text(body, "time")?,
            name: optional_text(body, "name")?,
            gender: optional_text(body, "gender")?,
            country: optional_text(body, "country")?,
            image_url: optional_text(body, "imageUrl")?,
            favorite: None,
        };

        if changes.is_empty() {
            return Err(UpdateRecordError::NoValidFields);
        }

        Ok(changes)
    }
}

#[tracing::instrument(skip(store, command, urls), fields(id = %command.id))]
pub async fn handle(
    store: DynRecordStore,
    command: UpdateRecordCommand,
    urls: &ResourceUrls,
) -> Result<RecordView, UpdateRecordError> {
    let changes = command.validate()?;
    let id = parse_record_id(&command.id).ok_or(UpdateRecordError::NotFound)?;

    let updated = store
        .update(id, changes)
        .await?
        .ok_or(UpdateRecordError::NotFound)?;

    tracing::info!(record_id = %updated.id, "Record updated");

    Ok(RecordView::new(updated, urls))
}
