//! Count summary for a filtered message query.
//!
//! Returned by MessageStore::count_messages; computed per request, never persisted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageStatus {
    pub path: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub count: i64,
    pub total_size: i64,
}
