use async_trait::async_trait;
use msglog_core::{DateRange, PathFilter};

use crate::error::StorageError;
use crate::models::{MessageRecord, MessageStatus, PathCountStat, PathSizeStat};

/// Read and insert operations over the message log.
///
/// Every call is independent: implementations acquire whatever connection they need on
/// entry and release it before returning, on success and on error.
#[async_trait]
pub trait MessageStore: Send + Sync {
    /// Messages whose path starts with `filter` and whose timestamp lies in `range`,
    /// oldest first.
    async fn list_messages(
        &self,
        filter: &PathFilter,
        range: &DateRange,
    ) -> Result<Vec<MessageRecord>, StorageError>;

    /// Count and total size of the messages `list_messages` would return.
    async fn count_messages(
        &self,
        filter: &PathFilter,
        range: &DateRange,
    ) -> Result<MessageStatus, StorageError>;

    /// Per-path total size inside `range`, largest first.
    async fn sorted_by_size(&self, range: &DateRange) -> Result<Vec<PathSizeStat>, StorageError>;

    /// Per-path message count inside `range`, most frequent first.
    async fn sorted_by_count(&self, range: &DateRange)
        -> Result<Vec<PathCountStat>, StorageError>;

    /// Inserts all records atomically and returns how many were written.
    async fn insert_messages(&self, records: &[MessageRecord]) -> Result<u64, StorageError>;
}
