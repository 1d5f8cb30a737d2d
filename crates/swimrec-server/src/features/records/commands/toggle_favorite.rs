//! Toggle favorite command

use crate::features::records::types::{parse_record_id, RecordView};
use crate::features::shared::ResourceUrls;
use crate::store::{DynRecordStore, StoreError};

#[derive(Debug, Clone)]
pub struct ToggleFavoriteCommand {
    pub id: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ToggleFavoriteError {
    #[error("Record not found")]
    NotFound,

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Flip `favorite` on the record and return it
#[tracing::instrument(skip(store, urls))]
pub async fn handle(
    store: DynRecordStore,
    command: ToggleFavoriteCommand,
    urls: &ResourceUrls,
) -> Result<RecordView, ToggleFavoriteError> {
    let id = parse_record_id(&command.id).ok_or(ToggleFavoriteError::NotFound)?;

    let record = store
        .toggle_favorite(id)
        .await?
        .ok_or(ToggleFavoriteError::NotFound)?;

    tracing::info!(record_id = %record.id, favorite = record.favorite, "Favorite toggled");

    Ok(RecordView::new(record, urls))
}
