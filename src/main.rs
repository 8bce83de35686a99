// src/main.rs
use anyhow::Context;
use dotenvy::dotenv;
use mockable::{Clock, DefaultClock};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use polls::config::AppConfig;
use polls::db::{self, PgPollRepository};
use polls::handlers::AppState;
use polls::memory::InMemoryPollRepository;
use polls::repository::PollRepository;
use polls::routes;
use polls::seed;
use polls::templates::Templates;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok(); // Load environment variables from .env file

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("polls=info,tower_http=info")),
        )
        .init();

    let config = AppConfig::from_env()?;

    let repo: Arc<dyn PollRepository> = match &config.database_url {
        Some(url) => {
            let pool = db::create_pool(url, config.max_connections)
                .await
                .context("failed to connect to the database")?;
            db::migrate(&pool).await.context("failed to run migrations")?;
            tracing::info!(max_connections = config.max_connections, "using postgres store");
            Arc::new(PgPollRepository::new(pool))
        }
        None => {
            tracing::warn!("DATABASE_URL not set, polls are kept in memory only");
            Arc::new(InMemoryPollRepository::new())
        }
    };

    let clock: Arc<dyn Clock + Send + Sync> = Arc::new(DefaultClock);
    if config.seed_demo_data {
        seed::seed_demo_data(repo.as_ref(), clock.utc()).await?;
    }

    let state = AppState::new(repo, Templates::new()?, clock);
    let app = routes::create_routes(state);

    let addr = config.socket_addr();
    tracing::info!(%addr, "listening");
    axum_server::bind(addr)
        .serve(app.into_make_service())
        .await
        .context("server error")?;
    Ok(())
}
