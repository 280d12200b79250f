//! Message repository: persistence and queries for the message log.
//!
//! Uses SqlitePoolManager and the models (MessageRecord, MessageStatus, path stats).
//! External: SQLite via sqlx; callers go through the MessageStore trait.
//!
//! Timestamps are stored as RFC 3339 UTC text, so range predicates compare them as strings
//! and can use the `created_at` index.

use async_trait::async_trait;
use msglog_core::{DateRange, PathFilter};
use tracing::{debug, info, instrument};

use crate::error::StorageError;
use crate::models::{MessageRecord, MessageStatus, PathCountStat, PathSizeStat};
use crate::repository::MessageStore;
use crate::sqlite_pool::SqlitePoolManager;

#[derive(Clone)]
pub struct MessageRepository {
    pool_manager: SqlitePoolManager,
}

impl MessageRepository {
    pub async fn new(database_url: &str) -> Result<Self, StorageError> {
        let pool_manager = SqlitePoolManager::new(database_url).await?;
        Self::from_pool_manager(pool_manager).await
    }

    pub async fn with_max_connections(
        database_url: &str,
        max_connections: u32,
    ) -> Result<Self, StorageError> {
        let pool_manager =
            SqlitePoolManager::with_max_connections(database_url, max_connections).await?;
        Self::from_pool_manager(pool_manager).await
    }

    async fn from_pool_manager(pool_manager: SqlitePoolManager) -> Result<Self, StorageError> {
        let repo = Self { pool_manager };
        repo.init().await?;
        Ok(repo)
    }

    async fn init(&self) -> Result<(), StorageError> {
        info!("Creating database tables if not exist");

        let mut conn = self.pool_manager.pool().acquire().await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS messages (
                id TEXT PRIMARY KEY,
                path TEXT NOT NULL,
                size INTEGER NOT NULL CHECK (size >= 0),
                created_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&mut *conn)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_messages_created_at ON messages(created_at);
            CREATE INDEX IF NOT EXISTS idx_messages_path_created_at ON messages(path, created_at);
            "#,
        )
        .execute(&mut *conn)
        .await?;

        info!("Database tables created successfully");
        Ok(())
    }

    /// Persists a single message.
    pub async fn save(&self, message: &MessageRecord) -> Result<(), StorageError> {
        validate_record(message)?;
        let mut conn = self.pool_manager.pool().acquire().await?;

        insert_query(message).execute(&mut *conn).await?;

        debug!(id = %message.id, path = %message.path, "Saved message");
        Ok(())
    }
}

fn validate_record(message: &MessageRecord) -> Result<(), StorageError> {
    if !message.path.starts_with('/') {
        return Err(StorageError::InvalidRecord(format!(
            "path must start with '/': {}",
            message.path
        )));
    }
    if message.size < 0 {
        return Err(StorageError::InvalidRecord(format!(
            "size must not be negative: {}",
            message.size
        )));
    }
    Ok(())
}

fn insert_query(
    message: &MessageRecord,
) -> sqlx::query::Query<'_, sqlx::Sqlite, sqlx::sqlite::SqliteArguments<'_>> {
    sqlx::query("INSERT INTO messages (id, path, size, created_at) VALUES (?, ?, ?, ?)")
        .bind(&message.id)
        .bind(&message.path)
        .bind(message.size)
        .bind(message.created_at)
}

#[async_trait]
impl MessageStore for MessageRepository {
    #[instrument(skip(self, filter), fields(path = %filter.as_str()))]
    async fn list_messages(
        &self,
        filter: &PathFilter,
        range: &DateRange,
    ) -> Result<Vec<MessageRecord>, StorageError> {
        let mut conn = self.pool_manager.pool().acquire().await?;

        let messages = sqlx::query_as::<_, MessageRecord>(
            r#"
            SELECT id, path, size, created_at FROM messages
            WHERE substr(path, 1, length(?)) = ?
              AND created_at >= ? AND created_at <= ?
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(filter.as_str())
        .bind(filter.as_str())
        .bind(range.start())
        .bind(range.end())
        .fetch_all(&mut *conn)
        .await?;

        info!("Retrieved {} messages", messages.len());
        Ok(messages)
    }

    #[instrument(skip(self, filter), fields(path = %filter.as_str()))]
    async fn count_messages(
        &self,
        filter: &PathFilter,
        range: &DateRange,
    ) -> Result<MessageStatus, StorageError> {
        let mut conn = self.pool_manager.pool().acquire().await?;

        let (count, total_size): (i64, i64) = sqlx::query_as(
            r#"
            SELECT COUNT(*), COALESCE(SUM(size), 0) FROM messages
            WHERE substr(path, 1, length(?)) = ?
              AND created_at >= ? AND created_at <= ?
            "#,
        )
        .bind(filter.as_str())
        .bind(filter.as_str())
        .bind(range.start())
        .bind(range.end())
        .fetch_one(&mut *conn)
        .await?;

        info!(count, total_size, "Counted messages");
        Ok(MessageStatus {
            path: filter.as_str().to_string(),
            start_date: range.start(),
            end_date: range.end(),
            count,
            total_size,
        })
    }

    #[instrument(skip(self))]
    async fn sorted_by_size(&self, range: &DateRange) -> Result<Vec<PathSizeStat>, StorageError> {
        let mut conn = self.pool_manager.pool().acquire().await?;

        let stats = sqlx::query_as::<_, PathSizeStat>(
            r#"
            SELECT path, SUM(size) AS total_size, COUNT(*) AS count FROM messages
            WHERE created_at >= ? AND created_at <= ?
            GROUP BY path
            ORDER BY total_size DESC, path ASC
            "#,
        )
        .bind(range.start())
        .bind(range.end())
        .fetch_all(&mut *conn)
        .await?;

        info!("Aggregated size for {} paths", stats.len());
        Ok(stats)
    }

    #[instrument(skip(self))]
    async fn sorted_by_count(
        &self,
        range: &DateRange,
    ) -> Result<Vec<PathCountStat>, StorageError> {
        let mut conn = self.pool_manager.pool().acquire().await?;

        let stats = sqlx::query_as::<_, PathCountStat>(
            r#"
            SELECT path, COUNT(*) AS count FROM messages
            WHERE created_at >= ? AND created_at <= ?
            GROUP BY path
            ORDER BY count DESC, path ASC
            "#,
        )
        .bind(range.start())
        .bind(range.end())
        .fetch_all(&mut *conn)
        .await?;

        info!("Aggregated count for {} paths", stats.len());
        Ok(stats)
    }

    #[instrument(skip(self, records), fields(records = records.len()))]
    async fn insert_messages(&self, records: &[MessageRecord]) -> Result<u64, StorageError> {
        for record in records {
            validate_record(record)?;
        }

        let mut tx = self.pool_manager.pool().begin().await?;
        let mut inserted = 0;
        for record in records {
            inserted += insert_query(record).execute(&mut *tx).await?.rows_affected();
        }
        tx.commit().await?;

        info!(inserted, "Inserted messages");
        Ok(inserted)
    }
}
