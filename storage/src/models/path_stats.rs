use serde::{Deserialize, Serialize};

/// Total payload size of one path inside a date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct PathSizeStat {
    pub path: String,
    pub total_size: i64,
    pub count: i64,
}

/// Number of messages of one path inside a date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct PathCountStat {
    pub path: String,
    pub count: i64,
}
