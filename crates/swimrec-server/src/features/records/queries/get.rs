use crate::features::records::types::{parse_record_id, RecordView};
use crate::features::shared::ResourceUrls;
use crate::store::{DynRecordStore, StoreError};

#[derive(Debug, Clone)]
pub struct GetRecordQuery {
    pub id: String,
}

#[derive(Debug, thiserror::Error)]
pub enum GetRecordError {
    #[error("Record not found")]
    NotFound,

    /// Details stay in the logs; clients only see a generic message
    #[error("Server error")]
    Store(#[source] StoreError),
}

#[tracing::instrument(skip(store, urls))]
pub async fn handle(
    store: DynRecordStore,
    query: GetRecordQuery,
    urls: &ResourceUrls,
) -> Result<RecordView, GetRecordError> {
    let id = parse_record_id(&query.id).ok_or(GetRecordError::NotFound)?;

    let record = store
        .get(id)
        .await
        .map_err(GetRecordError::Store)?
        .ok_or(GetRecordError::NotFound)?;

    Ok(RecordView::new(record, urls))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::shared::test_helpers::{seeded_store, test_urls, FailingStore, TestRecord};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_get_existing() {
        let record = TestRecord::new("breaststroke", "100m").with_name("Peaty").build();
        let id = record.id;

        let view = handle(
            seeded_store(vec![record]),
            GetRecordQuery { id: id.to_string() },
            &test_urls(),
        )
        .await
        .unwrap();

        assert_eq!(view.id, id);
        assert_eq!(view.name, "Peaty");
    }

    #[tokio::test]
    async fn test_not_found_cases() {
        for id in ["garbage".to_string(), uuid::Uuid::new_v4().to_string()] {
            let err = handle(seeded_store(vec![]), GetRecordQuery { id }, &test_urls())
                .await
                .unwrap_err();
            assert!(matches!(err, GetRecordError::NotFound));
        }
    }

    #[tokio::test]
    async fn test_store_failure_is_generic() {
        let query = GetRecordQuery {
            id: uuid::Uuid::new_v4().to_string(),
        };
        let err = handle(Arc::new(FailingStore), query, &test_urls())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Server error");
    }
}
