use anyhow::{Context, Result};
use std::env;

/// Upper bound for MSGLOG_SIMULATE_WINDOW_DAYS (about a century).
pub const MAX_SIMULATE_WINDOW_DAYS: u32 = 36_500;

/// Message log API configuration, loaded from environment variables.
#[derive(Clone)]
pub struct ApiConfig {
    /// MSGLOG_SECRET_KEY: shared secret every request must present.
    pub secret_key: String,
    /// DATABASE_URL: SQLite file path or `sqlite:` URL.
    pub database_url: String,
    pub database_max_connections: u32,
    /// MSGLOG_BIND_ADDR
    pub bind_addr: String,
    pub log_file: String,
    /// MSGLOG_LOG_LEVEL: default tracing directives, used when RUST_LOG is unset.
    pub log_level: String,
    /// Upper bound for the `count` parameter of a simulation request.
    pub max_simulate_count: u32,
    /// Simulated messages are spread over this many trailing days.
    pub simulate_window_days: u32,
}

impl ApiConfig {
    /// Loads config from the environment. Only MSGLOG_SECRET_KEY is required.
    pub fn load() -> Result<Self> {
        let secret_key = env::var("MSGLOG_SECRET_KEY").context("MSGLOG_SECRET_KEY not set")?;
        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://./messages.db".to_string());
        let database_max_connections = parse_var("DATABASE_MAX_CONNECTIONS", 5)?;
        let bind_addr = env::var("MSGLOG_BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8000".to_string());
        let log_file = env::var("MSGLOG_LOG_FILE").unwrap_or_else(|_| "logs/msglog.log".to_string());
        let log_level = env::var("MSGLOG_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        let max_simulate_count = parse_var("MSGLOG_MAX_SIMULATE_COUNT", 10_000)?;
        let simulate_window_days = parse_var("MSGLOG_SIMULATE_WINDOW_DAYS", 30)?;

        Ok(Self {
            secret_key,
            database_url,
            database_max_connections,
            bind_addr,
            log_file,
            log_level,
            max_simulate_count,
            simulate_window_days,
        })
    }

    pub fn validate(&self) -> Result<()> {
        if self.secret_key.trim().is_empty() {
            anyhow::bail!("MSGLOG_SECRET_KEY must not be empty");
        }
        if self.database_max_connections == 0 {
            anyhow::bail!("DATABASE_MAX_CONNECTIONS must be at least 1");
        }
        if self.max_simulate_count == 0 {
            anyhow::bail!("MSGLOG_MAX_SIMULATE_COUNT must be at least 1");
        }
        if !(1..=MAX_SIMULATE_WINDOW_DAYS).contains(&self.simulate_window_days) {
            anyhow::bail!(
                "MSGLOG_SIMULATE_WINDOW_DAYS must be between 1 and {}",
                MAX_SIMULATE_WINDOW_DAYS
            );
        }
        Ok(())
    }

    pub fn simulate_window(&self) -> chrono::Duration {
        chrono::Duration::days(i64::from(self.simulate_window_days))
    }
}

fn parse_var(name: &str, default: u32) -> Result<u32> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} must be a non-negative integer, got {:?}", name, raw)),
        Err(_) => Ok(default),
    }
}
