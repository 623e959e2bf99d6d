use tracing_subscriber::EnvFilter;

use golmok_api::api::{create_router, AppState};
use golmok_api::config::Config;
use golmok_api::db::sqlite;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("golmok_api=debug,tower_http=info")),
        )
        .init();

    let pool = sqlite::create_pool(&config.database_url).await?;

    let addr = format!("{}:{}", config.host, config.port);
    let state = AppState::new(pool, config);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server running on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
