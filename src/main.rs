use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use projectboard::api::{self, AppState};
use projectboard::config::Config;
use projectboard::service::TicketService;
use projectboard::storage::sqlite::SqliteTicketRepository;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env().context("loading configuration")?;

    let repository = SqliteTicketRepository::open(&config.database_path)
        .with_context(|| format!("opening database {}", config.database_path.display()))?;
    let service = Arc::new(TicketService::new(Arc::new(repository)));

    let state = AppState {
        service,
        allowed_origin: config.allowed_origin.clone(),
    };
    let app = api::router(state);

    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("binding {}", config.listen_addr))?;
    tracing::info!(addr = %config.listen_addr, db = %config.database_path.display(), "projectboard listening");

    axum::serve(listener, app).await.context("serving")?;
    Ok(())
}
