//! Route handlers.

pub mod messages;

pub use messages::{
    count_messages, list_messages, simulate_messages, sorted_by_count, sorted_by_size,
    RangeParams, SimulateParams,
};
