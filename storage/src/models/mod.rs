mod message_record;
mod message_status;
mod path_stats;

pub use message_record::MessageRecord;
pub use message_status::MessageStatus;
pub use path_stats::{PathCountStat, PathSizeStat};
