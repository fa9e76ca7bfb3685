//! Server binary: loads settings, prepares the store, mounts common and entity routes.

use crud_service::{app, connect, ensure_database_exists, ensure_tables, AppState, Settings, StoreKind};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("crud_service=info,tower_http=info")),
        )
        .init();

    let settings = Settings::from_env()?;
    let state = match settings.store {
        StoreKind::Memory => {
            tracing::warn!("using in-memory store; data will not survive a restart");
            AppState::in_memory(settings.absent_policy)
        }
        StoreKind::Postgres => {
            ensure_database_exists(&settings.database_url).await?;
            let pool = connect(&settings).await?;
            if settings.auto_create_tables {
                ensure_tables(&pool, &settings.db_schema).await?;
            }
            AppState::postgres(pool, &settings.db_schema, settings.absent_policy)
        }
    };

    let router = app(state, &settings);
    let listener = TcpListener::bind(settings.bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, router).await?;
    Ok(())
}
