//! Message record model for persistence.
//!
//! Maps to the `messages` table and is used by MessageRepository.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct MessageRecord {
    pub id: String,
    /// Route or identifier the message concerns; always starts with `/`.
    pub path: String,
    /// Payload length in bytes.
    pub size: i64,
    pub created_at: DateTime<Utc>,
}

impl MessageRecord {
    /// Creates a new record with a generated UUID and current timestamp.
    pub fn new(path: impl Into<String>, size: i64) -> Self {
        Self::with_timestamp(path, size, Utc::now())
    }

    /// Creates a new record with a generated UUID at the given time.
    pub fn with_timestamp(path: impl Into<String>, size: i64, created_at: DateTime<Utc>) -> Self {
        let path = path.into();
        let path = if path.starts_with('/') {
            path
        } else {
            format!("/{}", path)
        };

        Self {
            id: Uuid::new_v4().to_string(),
            path,
            size,
            created_at,
        }
    }
}
