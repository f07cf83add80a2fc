//! Entrypoint.

use clap::Parser;
use config::Opts;
use dotenvy::dotenv;
use tracing::info;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    if let Ok(custom_env_file) = std::env::var("ENV_FILE") {
        dotenvy::from_filename(custom_env_file)?;
    } else {
        // Try the default .env file, and ignore if it doesn't exist.
        dotenv().ok();
    }

    let opts = Opts::parse();
    // Keep stdout clean for the tag list; diagnostics go to stderr.
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_writer(std::io::stderr)
        .init();
    info!(chain_id = %opts.chain.chain_id, "collecting silo tags");

    let tags = driver::return_tags(&opts.chain.chain_id, &opts.subgraph.api_key).await?;
    println!("{}", serde_json::to_string_pretty(&tags)?);
    Ok(())
}
