//! Storage crate: persistence and read queries for the `messages` log table.
//!
//! ## Modules
//!
//! - [`error`] – Storage error types
//! - [`models`] – MessageRecord, MessageStatus, PathSizeStat, PathCountStat
//! - [`repository`] – MessageStore trait
//! - [`message_repo`] – MessageRepository (SQLite)
//! - [`sqlite_pool`] – SqlitePoolManager
//! - [`simulation`] – synthetic message generation

mod error;
mod message_repo;
mod models;
mod repository;
pub mod simulation;
mod sqlite_pool;


pub use error::StorageError;
pub use message_repo::MessageRepository;
pub use models::{MessageRecord, MessageStatus, PathCountStat, PathSizeStat};
pub use repository::MessageStore;
pub use simulation::{simulate, SimulationReport};
pub use sqlite_pool::SqlitePoolManager;
