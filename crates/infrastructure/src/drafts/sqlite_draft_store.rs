use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use sqlx::{Row, SqlitePool};
use votewatch_application::ports::DraftStore;
use votewatch_domain::DomainError;

pub struct SqliteDraftStore {
    pool: SqlitePool,
}

impl SqliteDraftStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn storage_error(e: sqlx::Error) -> DomainError {
    DomainError::Storage(format!("Database error: {}", e))
}

#[async_trait]
impl DraftStore for SqliteDraftStore {
    async fn save(&self, key: &str, payload: &Value) -> Result<(), DomainError> {
        let payload = serde_json::to_string(payload)
            .map_err(|e| DomainError::Storage(format!("Unserializable draft: {}", e)))?;

        sqlx::query(
            "INSERT INTO form_drafts (key, payload, updated_at)
             VALUES (?, ?, ?)
             ON CONFLICT(key) DO UPDATE SET
                payload = excluded.payload,
                updated_at = excluded.updated_at",
        )
        .bind(key)
        .bind(&payload)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(storage_error)?;

        Ok(())
    }

    async fn load(&self, key: &str) -> Result<Option<Value>, DomainError> {
        let row = sqlx::query("SELECT payload FROM form_drafts WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_error)?;

        match row {
            Some(row) => {
                let payload: String = row.get("payload");
                serde_json::from_str(&payload)
                    .map(Some)
                    .map_err(|e| DomainError::Storage(format!("Corrupt draft {}: {}", key, e)))
            }
            None => Ok(None),
        }
    }

    async fn clear(&self, key: &str) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM form_drafts WHERE key = ?")
            .bind(key)
            .execute(&self.pool)
            .await
            .map_err(storage_error)?;

        Ok(result.rows_affected() > 0)
    }
}
