//! # Key-Value Repository
//!
//! String values by string key in the `kv_store` table.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;

/// Repository for raw key-value operations.
#[derive(Debug, Clone)]
pub struct KeyValueRepository {
    pool: SqlitePool,
}

impl KeyValueRepository {
    /// Creates a new KeyValueRepository.
    pub fn new(pool: SqlitePool) -> Self {
        KeyValueRepository { pool }
    }

    /// Reads the value stored under `key`.
    ///
    /// ## Returns
    /// * `Ok(Some(value))` - Key present
    /// * `Ok(None)` - Key absent
    pub async fn get(&self, key: &str) -> DbResult<Option<String>> {
        let value: Option<String> =
            sqlx::query_scalar("SELECT value FROM kv_store WHERE key = ?1")
                .bind(key)
                .fetch_optional(&self.pool)
                .await?;

        debug!(key = %key, found = value.is_some(), "Read key");
        Ok(value)
    }

    /// Writes `value` under `key`, replacing any previous value.
    pub async fn set(&self, key: &str, value: &str) -> DbResult<()> {
        let now = Utc::now();

        sqlx::query(
            r#"
            INSERT INTO kv_store (key, value, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(value)
        .bind(now)
        .execute(&self.pool)
        .await?;

        debug!(key = %key, bytes = value.len(), "Wrote key");
        Ok(())
    }

    /// Deletes `key`. Returns whether a row was removed.
    pub async fn remove(&self, key: &str) -> DbResult<bool> {
        let result = sqlx::query("DELETE FROM kv_store WHERE key = ?1")
            .bind(key)
            .execute(&self.pool)
            .await?;

        let removed = result.rows_affected() > 0;
        debug!(key = %key, removed, "Removed key");
        Ok(removed)
    }

    /// Whether `key` is present.
    pub async fn contains(&self, key: &str) -> DbResult<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM kv_store WHERE key = ?1")
            .bind(key)
            .fetch_one(&self.pool)
            .await?;

        Ok(count > 0)
    }

    /// All stored keys, sorted.
    pub async fn keys(&self) -> DbResult<Vec<String>> {
        let keys: Vec<String> = sqlx::query_scalar("SELECT key FROM kv_store ORDER BY key")
            .fetch_all(&self.pool)
            .await?;

        Ok(keys)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::{Database, DbConfig};

    async fn repo() -> super::KeyValueRepository {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.kv()
    }

    #[tokio::test]
    async fn test_get_missing_key() {
        let kv = repo().await;
        assert_eq!(kv.get("products").await.unwrap(), None);
        assert!(!kv.contains("products").await.unwrap());
    }

    #[tokio::test]
    async fn test_set_then_overwrite() {
        let kv = repo().await;

        kv.set("coupons", "[]").await.unwrap();
        assert_eq!(kv.get("coupons").await.unwrap().as_deref(), Some("[]"));

        kv.set("coupons", r#"[{"code":"X"}]"#).await.unwrap();
        assert_eq!(
            kv.get("coupons").await.unwrap().as_deref(),
            Some(r#"[{"code":"X"}]"#)
        );
        assert_eq!(kv.keys().await.unwrap(), vec!["coupons".to_string()]);
    }

    #[tokio::test]
    async fn test_remove() {
        let kv = repo().await;

        kv.set("cart", "[]").await.unwrap();
        assert!(kv.remove("cart").await.unwrap());
        assert!(!kv.remove("cart").await.unwrap());
        assert!(!kv.contains("cart").await.unwrap());
    }
}
