use anyhow::Result;
use dashboard::config::AppConfig;
use dashboard::server::ServerBuilder;
use dashboard::storage::InMemoryStore;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::load()?;
    let builder = ServerBuilder::new(config.clone());

    #[cfg(feature = "postgres")]
    if config.database.url.is_some() {
        let store = dashboard::storage::PostgresStore::connect(&config.database).await?;
        tracing::info!("using PostgreSQL storage");
        return builder.with_database(store).serve().await;
    }

    tracing::warn!("no database configured, using in-memory storage");
    builder.with_database(InMemoryStore::new()).serve().await
}
