//! msglog CLI: serve the message log API or insert synthetic messages.

use anyhow::Result;
use clap::Parser;
use msglog_api::{run_server, run_simulation, ApiConfig, Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let mut config = ApiConfig::load()?;

    match cli.command {
        Commands::Serve { bind } => {
            if let Some(bind) = bind {
                config.bind_addr = bind;
            }
            run_server(config).await
        }
        Commands::Simulate { count } => {
            tracing_subscriber::fmt()
                .with_env_filter(
                    std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
                )
                .with_target(false)
                .init();

            let report = run_simulation(&config, count).await?;
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(())
        }
    }
}
