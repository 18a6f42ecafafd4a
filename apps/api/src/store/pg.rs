use async_trait::async_trait;
use sqlx::PgPool;
use tracing::warn;

use crate::errors::AppError;
use crate::models::record::Record;
use crate::store::RecordStore;

/// Postgres-backed record store. Records live as JSONB payloads keyed by
/// conversation id — the relational layer is deliberately just a key-value
/// shape with a date column for visibility.
pub struct PgRecordStore {
    pool: PgPool,
}

impl PgRecordStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordStore for PgRecordStore {
    async fn get_all(&self) -> Result<Vec<Record>, AppError> {
        let rows: Vec<(serde_json::Value,)> =
            sqlx::query_as("SELECT data FROM records ORDER BY created_at ASC, id ASC")
                .fetch_all(&self.pool)
                .await?;

        // Rows that no longer deserialize are skipped, never fatal.
        Ok(rows
            .into_iter()
            .filter_map(|(data,)| match serde_json::from_value::<Record>(data) {
                Ok(record) => Some(record),
                Err(err) => {
                    warn!("skipping malformed record row: {err}");
                    None
                }
            })
            .collect())
    }

    async fn get(&self, id: &str) -> Result<Option<Record>, AppError> {
        let row: Option<(serde_json::Value,)> =
            sqlx::query_as("SELECT data FROM records WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        match row {
            None => Ok(None),
            Some((data,)) => match serde_json::from_value::<Record>(data) {
                Ok(record) => Ok(Some(record)),
                Err(err) => {
                    warn!("skipping malformed record row {id}: {err}");
                    Ok(None)
                }
            },
        }
    }

    async fn save(&self, record: &Record) -> Result<(), AppError> {
        let data = serde_json::to_value(record).map_err(anyhow::Error::from)?;

        sqlx::query(
            r#"
            INSERT INTO records (id, date, data, created_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (id) DO UPDATE SET date = EXCLUDED.date, data = EXCLUDED.data
            "#,
        )
        .bind(&record.id)
        .bind(&record.date)
        .bind(data)
        .bind(record.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn attach_illustration(&self, id: &str, image_url: &str) -> Result<bool, AppError> {
        let Some(mut record) = self.get(id).await? else {
            return Ok(false);
        };

        record.images.push(image_url.to_string());
        self.save(&record).await?;
        Ok(true)
    }
}
