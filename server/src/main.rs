//! Warehouse server: loads settings, ensures the database and tables, and serves the API
//! until Ctrl-C or SIGTERM, then closes the pool.
//!
//! Run from repo root: `cargo run -p warehouse-server`

use std::sync::Arc;
use tokio::net::TcpListener;
use warehouse_api::{app_router, ensure_database_exists, AppState, Passwords, PgStore, Settings};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let settings = Settings::from_env()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new("warehouse_api=info,warehouse_server=info,tower_http=info")
            }),
        )
        .init();

    if settings.create_database {
        ensure_database_exists(&settings.database_url).await?;
    }
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .acquire_timeout(settings.acquire_timeout)
        .connect(&settings.database_url)
        .await?;

    let store = PgStore::new(pool, &settings.schema);
    store.ensure_schema().await?;

    let state = AppState::new(Arc::new(store.clone()), Passwords::with_defaults()?);
    let app = app_router(state, settings.max_body_bytes);

    let listener = TcpListener::bind(settings.bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    store.close().await;
    tracing::info!("shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("shutdown signal received");
}
