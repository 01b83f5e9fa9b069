use anyhow::Result;
use chirpy::config::Config;
use chirpy::server::Server;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    let config = Config::load()
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("chirpy={},tower_http=debug", config.log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting chirpy service");
    tracing::info!(
        "Configuration: host={}, port={}, database_path={}",
        config.host,
        config.port,
        config.database_path.display()
    );

    let server = Server::new(config)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to open database: {}", e))?;

    // A bind failure ends up here and terminates the process.
    server
        .run()
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    Ok(())
}
