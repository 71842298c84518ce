mod auth;
mod cli;
mod config;
mod dora;
mod error;
mod insights;
mod models;
mod providers;
mod timestamps;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use log::info;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    info!("Starting DoraLens - DORA Metrics Tool");
    cli.execute().await?;

    Ok(())
}
