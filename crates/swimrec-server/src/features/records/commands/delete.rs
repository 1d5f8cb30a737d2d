//! Delete record command

use crate::features::records::types::parse_record_id;
use crate::store::{DynRecordStore, StoreError};

#[derive(Debug, Clone)]
pub struct DeleteRecordCommand {
    pub id: String,
}

#[derive(Debug, thiserror::Error)]
pub enum DeleteRecordError {
    #[error("Record not found")]
    NotFound,

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[tracing::instrument(skip(store))]
pub async fn handle(
    store: DynRecordStore,
    command: DeleteRecordCommand,
) -> Result<(), DeleteRecordError> {
    let id = parse_record_id(&command.id).ok_or(DeleteRecordError::NotFound)?;

    if !store.delete(id).await? {
        return Err(DeleteRecordError::NotFound);
    }

    tracing::info!(record_id = %id, "Record deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::shared::test_helpers::{seeded_store, TestRecord};

    #[tokio::test]
    async fn test_delete_then_missing() {
        let record = TestRecord::new("freestyle", "1500m").build();
        let command = DeleteRecordCommand {
            id: record.id.to_string(),
        };
        let store = seeded_store(vec![record]);

        handle(store.clone(), command.clone()).await.unwrap();
        let err = handle(store, command).await.unwrap_err();
        assert!(matches!(err, DeleteRecordError::NotFound));
    }

    #[tokio::test]
    async fn test_malformed_id() {
        let command = DeleteRecordCommand {
            id: "../etc".to_string(),
        };
        let err = handle(seeded_store(vec![]), command).await.unwrap_err();
        assert!(matches!(err, DeleteRecordError::NotFound));
    }
}
