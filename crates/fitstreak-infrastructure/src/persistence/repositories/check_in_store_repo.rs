use async_trait::async_trait;
use chrono::Utc;
use sqlx::{FromRow, QueryBuilder, Sqlite, SqlitePool};
use std::collections::HashMap;
use std::sync::Arc;

use crate::persistence::repository_base::repository_error;
use crate::persistence::SqliteRepositoryBase;
use fitstreak_domain::check_in::CheckInStore;
use fitstreak_domain::shared::DomainError;

// Stay well under SQLITE_MAX_VARIABLE_NUMBER on older builds
const MAX_BIND_PARAMS: usize = 500;

#[derive(FromRow)]
struct StoreRow {
    key: String,
    value: String,
}

pub struct SqliteCheckInStore {
    base: SqliteRepositoryBase,
}

impl SqliteCheckInStore {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self {
            base: SqliteRepositoryBase::new(pool),
        }
    }
}

#[async_trait]
impl CheckInStore for SqliteCheckInStore {
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        let query = "SELECT key, value FROM check_in_store WHERE key = ?1";

        let row: Option<StoreRow> = self
            .base
            .fetch_optional(sqlx::query_as(query).bind(key), "Get check-in key")
            .await?;

        Ok(row.map(|r| r.value))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), DomainError> {
        let query = r#"
            INSERT INTO check_in_store (key, value, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET
                value = ?2,
                updated_at = ?3
        "#;

        self.base
            .execute(
                sqlx::query(query)
                    .bind(key)
                    .bind(value)
                    .bind(Utc::now().to_rfc3339()),
                "Set check-in key",
            )
            .await?;

        Ok(())
    }

    async fn multi_get(
        &self,
        keys: &[String],
    ) -> Result<Vec<(String, Option<String>)>, DomainError> {
        let mut found: HashMap<String, String> = HashMap::new();

        for chunk in keys.chunks(MAX_BIND_PARAMS) {
            let mut builder: QueryBuilder<Sqlite> =
                QueryBuilder::new("SELECT key, value FROM check_in_store WHERE key IN (");
            let mut separated = builder.separated(", ");
            for key in chunk {
                separated.push_bind(key.as_str());
            }
            separated.push_unseparated(")");

            let rows: Vec<StoreRow> = builder
                .build_query_as()
                .fetch_all(self.base.pool())
                .await
                .map_err(|e| repository_error("Multi-get check-in keys", e))?;

            found.extend(rows.into_iter().map(|r| (r.key, r.value)));
        }

        Ok(keys
            .iter()
            .map(|key| (key.clone(), found.get(key).cloned()))
            .collect())
    }

    async fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, DomainError> {
        // LIKE would treat the '_' in "@Checkin_" as a wildcard
        let query = r#"
            SELECT key
            FROM check_in_store
            WHERE substr(key, 1, length(?1)) = ?1
            ORDER BY key ASC
        "#;

        sqlx::query_scalar(query)
            .bind(prefix)
            .fetch_all(self.base.pool())
            .await
            .map_err(|e| repository_error("List check-in keys by prefix", e))
    }

    async fn multi_remove(&self, keys: &[String]) -> Result<usize, DomainError> {
        let mut removed = 0u64;

        for chunk in keys.chunks(MAX_BIND_PARAMS) {
            let mut builder: QueryBuilder<Sqlite> =
                QueryBuilder::new("DELETE FROM check_in_store WHERE key IN (");
            let mut separated = builder.separated(", ");
            for key in chunk {
                separated.push_bind(key.as_str());
            }
            separated.push_unseparated(")");

            let result = builder
                .build()
                .execute(self.base.pool())
                .await
                .map_err(|e| repository_error("Remove check-in keys", e))?;
            removed += result.rows_affected();
        }

        Ok(removed as usize)
    }
}
