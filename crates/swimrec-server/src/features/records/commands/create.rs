//! Create record command
//!
//! Every text attribute is required. They are checked in a fixed order and
//! the first failure is reported. `favorite` and unknown keys in the body are
//! ignored; a new record is never a favorite.

use crate::features::records::types::RecordView;
use crate::features::shared::validation::{required_text, FieldError, JsonObject};
use crate::features::shared::ResourceUrls;
use crate::store::{DynRecordStore, NewRecord, StoreError};

/// Command to create a new record from a JSON body
///
/// # Examples
///
/// ```rust,ignore
/// use swimrec_server::features::records::commands::CreateRecordCommand;
///
/// let command = CreateRecordCommand::new(body);
/// let new_record = command.validate()?;
/// ```
#[derive(Debug, Clone)]
pub struct CreateRecordCommand {
    body: JsonObject,
}

/// Errors that can occur when creating a record
#[derive(Debug, thiserror::Error)]
pub enum CreateRecordError {
    #[error(transparent)]
    Field(#[from] FieldError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl CreateRecordCommand {
    pub fn new(body: JsonObject) -> Self {
        Self { body }
    }

    /// Validates the body and extracts the record fields
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::Required`] for the first of `stroke`, `distance`,
    /// `time`, `name`, `gender`, `country`, `imageUrl` that is missing, not a
    /// string, or blank.
    pub fn validate(&self) -> Result<NewRecord, CreateRecordError> {
        let body = &self.body;
        Ok(NewRecord {
            stroke: required_text(body, "stroke")?,
            distance: required_text(body, "distance")?,
            time: required_text(body, "time")?,
            name: required_text(body, "name")?,
            gender: required_text(body, "gender")?,
            country: required_text(body, "country")?,
            image_url: required_text(body, "imageUrl")?,
        })
    }
}

/// Handler function for creating records
///
/// # Errors
///
/// - Field errors if the body is incomplete
/// - Store errors if the insert fails
#[tracing::instrument(skip(store, command, urls))]
pub async fn handle(
    store: DynRecordStore,
    command: CreateRecordCommand,
    urls: &ResourceUrls,
) -> Result<RecordView, CreateRecordError> {
    let new_record = command.validate()?;

    let created = store.insert(new_record).await?;

    tracing::info!(record_id = %created.id, stroke = %created.stroke, "Record created");

    Ok(RecordView::new(created, urls))
}
