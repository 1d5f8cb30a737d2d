//! PostgreSQL record store
//!
//! Records live in the `records` table created by the workspace migrations.
//! Queries are built at runtime (`sqlx::query_as`) so the crate builds
//! without a live database.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::{
    FindWindow, NewRecord, Record, RecordChanges, RecordFilter, RecordStore, StoreResult,
};

const RECORD_COLUMNS: &str =
    "id, stroke, distance, swim_time, name, gender, country, image_url, favorite, created_at";

/// `$1` is the stroke filter and `$2` the distance filter; NULL disables a constraint
const FILTER_CLAUSE: &str =
    "($1::TEXT IS NULL OR stroke = $1) AND ($2::TEXT IS NULL OR distance = $2)";

#[derive(Clone)]
pub struct PgRecordStore {
    pool: PgPool,
}

impl PgRecordStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn to_i64(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

#[async_trait]
impl RecordStore for PgRecordStore {
    #[tracing::instrument(skip(self))]
    async fn count(&self, filter: &RecordFilter) -> StoreResult<u64> {
        let sql = format!("SELECT COUNT(*) FROM records WHERE {}", FILTER_CLAUSE);

        let total = sqlx::query_scalar::<_, i64>(&sql)
            .bind(filter.stroke.as_deref())
            .bind(filter.distance.as_deref())
            .fetch_one(&self.pool)
            .await?;

        Ok(u64::try_from(total).unwrap_or(0))
    }

    #[tracing::instrument(skip(self))]
    async fn find(&self, filter: &RecordFilter, window: FindWindow) -> StoreResult<Vec<Record>> {
        // LIMIT NULL returns every row
        let (limit, offset) = match window {
            FindWindow::All => (None, 0),
            FindWindow::Slice { skip, limit } => (Some(to_i64(limit)), to_i64(skip)),
        };

        let sql = format!(
            "SELECT {} FROM records WHERE {} ORDER BY seq LIMIT $3 OFFSET $4",
            RECORD_COLUMNS, FILTER_CLAUSE
        );

        let records = sqlx::query_as::<_, Record>(&sql)
            .bind(filter.stroke.as_deref())
            .bind(filter.distance.as_deref())
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        Ok(records)
    }

    async fn get(&self, id: Uuid) -> StoreResult<Option<Record>> {
        let sql = format!("SELECT {} FROM records WHERE id = $1", RECORD_COLUMNS);

        let record = sqlx::query_as::<_, Record>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(record)
    }

    #[tracing::instrument(skip(self, record), fields(stroke = %record.stroke, name = %record.name))]
    async fn insert(&self, record: NewRecord) -> StoreResult<Record> {
        let sql = format!(
            r#"
            INSERT INTO records (id, stroke, distance, swim_time, name, gender, country, image_url)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {}
            "#,
            RECORD_COLUMNS
        );

        let created = sqlx::query_as::<_, Record>(&sql)
            .bind(Uuid::new_v4())
            .bind(&record.stroke)
            .bind(&record.distance)
            .bind(&record.time)
            .bind(&record.name)
            .bind(&record.gender)
            .bind(&record.country)
            .bind(&record.image_url)
            .fetch_one(&self.pool)
            .await?;

        Ok(created)
    }

    #[tracing::instrument(skip(self, changes))]
    async fn update(&self, id: Uuid, changes: RecordChanges) -> StoreResult<Option<Record>> {
        let sql = format!(
            r#"
            UPDATE records SET
                stroke     = COALESCE($2, stroke),
                distance   = COALESCE($3, distance),
                swim_time  = COALESCE($4, swim_time),
                name       = COALESCE($5, name),
                gender     = COALESCE($6, gender),
                country    = COALESCE($7, country),
                image_url  = COALESCE($8, image_url),
                favorite   = COALESCE($9, favorite),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            RECORD_COLUMNS
        );

        let updated = sqlx::query_as::<_, Record>(&sql)
            .bind(id)
            .bind(changes.stroke)
            .bind(changes.distance)
            .bind(changes.time)
            .bind(changes.name)
            .bind(changes.gender)
            .bind(changes.country)
            .bind(changes.image_url)
            .bind(changes.favorite)
            .fetch_optional(&self.pool)
            .await?;

        Ok(updated)
    }

    #[tracing::instrument(skip(self))]
    async fn toggle_favorite(&self, id: Uuid) -> StoreResult<Option<Record>> {
        let sql = format!(
            "UPDATE records SET favorite = NOT favorite, updated_at = NOW() WHERE id = $1 RETURNING {}",
            RECORD_COLUMNS
        );

        let toggled = sqlx::query_as::<_, Record>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(toggled)
    }

    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM records WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_record(stroke: &str, distance: &str, name: &str) -> NewRecord {
        NewRecord {
            stroke: stroke.to_string(),
            distance: distance.to_string(),
            time: "02:03.40".to_string(),
            name: name.to_string(),
            gender: "female".to_string(),
            country: "US".to_string(),
            image_url: "https://img.example.com/k.png".to_string(),
        }
    }

    #[test]
    fn test_to_i64_saturates() {
        assert_eq!(to_i64(10), 10);
        assert_eq!(to_i64(u64::MAX), i64::MAX);
    }

    #[sqlx::test(migrations = "../../migrations")]
    #[ignore = "requires PostgreSQL (DATABASE_URL)"]
    async fn test_crud_roundtrip(pool: PgPool) -> sqlx::Result<()> {
        let store = PgRecordStore::new(pool);

        let created = store
            .insert(new_record("freestyle", "800m", "Katie"))
            .await
            .unwrap();
        assert!(!created.favorite);

        let toggled = store.toggle_favorite(created.id).await.unwrap().unwrap();
        assert!(toggled.favorite);

        let updated = store
            .update(
                created.id,
                RecordChanges {
                    time: Some("08:04.79".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.time, "08:04.79");
        assert!(updated.favorite);

        assert!(store.delete(created.id).await.unwrap());
        assert_eq!(store.get(created.id).await.unwrap(), None);
        Ok(())
    }

    #[sqlx::test(migrations = "../../migrations")]
    #[ignore = "requires PostgreSQL (DATABASE_URL)"]
    async fn test_count_and_window(pool: PgPool) -> sqlx::Result<()> {
        let store = PgRecordStore::new(pool);
        for i in 0..25 {
            let stroke = if i % 5 == 0 { "butterfly" } else { "freestyle" };
            store
                .insert(new_record(stroke, "100m", &format!("Swimmer {}", i)))
                .await
                .unwrap();
        }

        assert_eq!(store.count(&RecordFilter::default()).await.unwrap(), 25);
        let butterfly = RecordFilter::new(Some("butterfly"), None);
        assert_eq!(store.count(&butterfly).await.unwrap(), 5);

        let third_page = store
            .find(&RecordFilter::default(), FindWindow::Slice { skip: 20, limit: 10 })
            .await
            .unwrap();
        assert_eq!(third_page.len(), 5);
        assert_eq!(third_page[0].name, "Swimmer 20");

        let all = store.find(&butterfly, FindWindow::All).await.unwrap();
        assert!(all.iter().all(|r| r.stroke == "butterfly"));
        Ok(())
    }
}
