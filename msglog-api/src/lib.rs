//! # Message log API
//!
//! Read-only, date-filtered queries over the `messages` table plus a simulation endpoint,
//! served with axum. Wires msglog-core validation, the storage repository and the secret key
//! middleware; configuration comes from the environment.

pub mod cli;
pub mod config;
pub mod error;
pub mod handlers;
pub mod router;
pub mod runner;

pub use cli::{Cli, Commands};
pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use router::{create_router, AppState, SimulationLimits};
pub use runner::{build_app, open_repository, run_server, run_simulation};
