//! CLI parser for the `msglog` binary.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "msglog")]
#[command(about = "Message log REST API", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Serve the HTTP API (config from env; --bind overrides MSGLOG_BIND_ADDR).
    Serve {
        #[arg(short, long)]
        bind: Option<String>,
    },
    /// Insert synthetic messages into the configured database and print the report.
    Simulate {
        #[arg(short, long, default_value = "100")]
        count: u32,
    },
}
