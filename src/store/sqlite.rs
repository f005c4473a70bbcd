//! SQLite record store using sqlx
//!
//! Every statement binds its inputs (`?N` placeholders); no user-provided
//! value is ever formatted into query text.
//!
//! # Connection Management
//!
//! Uses sqlx's `SqlitePool`, so handlers on different tokio tasks can run
//! queries concurrently without sharing a single handle. An in-memory
//! database lives only as long as its connection, so memory pools are pinned
//! to exactly one connection that is never recycled.

use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use tracing::debug;

use super::config::{DatabaseLocation, StoreConfig};
use super::errors::{StoreError, StoreResult};
use super::types::{Contact, ContactFilter, FilterField, NewContact};
use super::ContactStore;

const CREATE_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS contact (
    id    INTEGER PRIMARY KEY AUTOINCREMENT,
    name  TEXT NOT NULL,
    email TEXT NOT NULL UNIQUE
)
"#;

/// Contact store backed by a SQLite connection pool
#[derive(Debug, Clone)]
pub struct SqliteContactStore {
    pool: SqlitePool,
}

impl SqliteContactStore {
    /// Open a pool for the configured database
    ///
    /// The table is not created here; call [`ContactStore::initialize`].
    ///
    /// # Errors
    ///
    /// Returns `StoreError::InvalidArgument` for a bad configuration and
    /// `StoreError::Storage` if the pool cannot connect.
    pub async fn connect(config: &StoreConfig) -> StoreResult<Self> {
        config
            .validate()
            .map_err(|e| StoreError::InvalidArgument(e.to_string()))?;
        let location = config
            .location()
            .map_err(|e| StoreError::InvalidArgument(e.to_string()))?;

        let pool = match location {
            DatabaseLocation::Memory => {
                let options = SqliteConnectOptions::from_str("sqlite::memory:")
                    .map_err(|e| StoreError::storage("invalid SQLite URL", e))?;
                SqlitePoolOptions::new()
                    .min_connections(1)
                    .max_connections(1)
                    .idle_timeout(None)
                    .max_lifetime(None)
                    .connect_with(options)
                    .await
            }
            DatabaseLocation::File(path) => {
                let options = SqliteConnectOptions::new()
                    .filename(&path)
                    .create_if_missing(true)
                    .journal_mode(SqliteJournalMode::Wal)
                    .busy_timeout(Duration::from_secs(5));
                SqlitePoolOptions::new()
                    .max_connections(config.max_connections)
                    .acquire_timeout(Duration::from_secs(30))
                    .connect_with(options)
                    .await
            }
        }
        .map_err(|e| StoreError::storage("failed to open SQLite pool", e))?;

        debug!(url = %config.database_url, "contact store connected");
        Ok(Self { pool })
    }

    /// Open an initialized in-memory store
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Storage` if SQLite cannot be opened.
    pub async fn in_memory() -> StoreResult<Self> {
        let store = Self::connect(&StoreConfig::in_memory()).await?;
        store.initialize().await?;
        Ok(store)
    }

    /// Wrap an existing pool
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// The underlying pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close every pooled connection
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl ContactStore for SqliteContactStore {
    async fn initialize(&self) -> StoreResult<()> {
        sqlx::query(CREATE_TABLE)
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::storage("failed to create contact table", e))?;
        Ok(())
    }

    async fn create(&self, contact: NewContact) -> StoreResult<Contact> {
        let created = sqlx::query_as::<_, Contact>(
            "INSERT INTO contact (name, email) VALUES (?1, ?2) RETURNING id, name, email",
        )
        .bind(&contact.name)
        .bind(&contact.email)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| StoreError::from_write(e, &contact.email, "insert contact failed"))?;

        debug!(id = created.id, "contact created");
        Ok(created)
    }

    async fn fetch_by_id(&self, id: i64) -> StoreResult<Contact> {
        sqlx::query_as::<_, Contact>("SELECT id, name, email FROM contact WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StoreError::storage("fetch contact failed", e))?
            .ok_or(StoreError::NotFound { id })
    }

    async fn fetch_by_filter(&self, filter: ContactFilter) -> StoreResult<Vec<Contact>> {
        let query = match filter.field() {
            Some(FilterField::Name(name)) => sqlx::query_as::<_, Contact>(
                "SELECT id, name, email FROM contact WHERE name = ?1 ORDER BY id ASC",
            )
            .bind(name.to_string()),
            Some(FilterField::Email(email)) => sqlx::query_as::<_, Contact>(
                "SELECT id, name, email FROM contact WHERE email = ?1 ORDER BY id ASC",
            )
            .bind(email.to_string()),
            None => {
                return Err(StoreError::InvalidArgument(
                    "filter needs a name or an email".to_string(),
                ))
            }
        };

        query
            .fetch_all(&self.pool)
            .await
            .map_err(|e| StoreError::storage("filter contacts failed", e))
    }

    async fn list(&self, offset: i64, limit: i64) -> StoreResult<Vec<Contact>> {
        if offset < 0 {
            return Err(StoreError::InvalidArgument(format!(
                "offset must be >= 0, got {}",
                offset
            )));
        }
        if limit <= 0 {
            return Err(StoreError::InvalidArgument(format!(
                "limit must be > 0, got {}",
                limit
            )));
        }

        sqlx::query_as::<_, Contact>(
            "SELECT id, name, email FROM contact ORDER BY id ASC LIMIT ?1 OFFSET ?2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StoreError::storage("list contacts failed", e))
    }

    async fn update(&self, id: i64, contact: NewContact) -> StoreResult<Contact> {
        let updated = sqlx::query_as::<_, Contact>(
            "UPDATE contact SET name = ?1, email = ?2 WHERE id = ?3 RETURNING id, name, email",
        )
        .bind(&contact.name)
        .bind(&contact.email)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::from_write(e, &contact.email, "update contact failed"))?
        .ok_or(StoreError::NotFound { id })?;

        debug!(id, "contact updated");
        Ok(updated)
    }

    async fn delete(&self, id: i64) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM contact WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::storage("delete contact failed", e))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound { id });
        }

        debug!(id, "contact deleted");
        Ok(())
    }

    async fn count(&self) -> StoreResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM contact")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| StoreError::storage("count contacts failed", e))
    }
}
