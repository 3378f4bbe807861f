use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod commands;

use cli::Cli;
use lifeos_store::config::{KEY_VAR, TIMEOUT_VAR, URL_VAR};
use lifeos_store::{LifeOsClient, StoreConfig};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lifeos=info,lifeos_store=info,lifeos_core=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment variables
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    // Blank credentials fail here, before any request goes out
    let config = StoreConfig::from_lookup(|key| match key {
        URL_VAR => Some(cli.store_url.clone()),
        KEY_VAR => Some(cli.store_key.clone()),
        TIMEOUT_VAR => Some(cli.timeout_secs.to_string()),
        _ => None,
    })?;
    tracing::debug!("Using store {:?}", config);

    let client = LifeOsClient::from_config(&config)?;

    commands::execute(cli.command, &client).await
}
