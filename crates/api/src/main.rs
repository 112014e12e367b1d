use std::net::SocketAddr;
use std::sync::Arc;

use notebook_db::store::{MemoryStore, NoteStore, SqliteStore};
use notebook_db::DbPool;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use notebook_api::config::{LogFormat, ServerConfig, StoreBackend};
use notebook_api::router::build_app_router;
use notebook_api::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Configuration ---
    let config = ServerConfig::from_env();

    // --- Tracing ---
    init_tracing(config.log_format);
    tracing::info!(
        host = %config.host,
        port = %config.port,
        store = ?config.store_backend,
        "Loaded server configuration"
    );

    // --- Store ---
    let (store, pool) = open_store(&config).await;

    if config.seed_data {
        let seeded = notebook_db::seed::seed_if_empty(store.as_ref())
            .await
            .expect("Failed to seed sample data");
        if seeded {
            tracing::info!("Sample data seeded");
        }
    }

    // --- App state ---
    let state = AppState { store };

    // --- Router ---
    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");

    if let Some(pool) = pool {
        pool.close().await;
        tracing::info!("Database pool closed");
    }

    tracing::info!("Graceful shutdown complete");
}

/// Install the global subscriber, honouring `RUST_LOG` when set.
fn init_tracing(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "notebook_api=debug,notebook_db=debug,tower_http=debug".into());
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
    }
}

/// Open the configured store. The SQLite pool is returned separately so it
/// can be closed after the server drains.
async fn open_store(config: &ServerConfig) -> (Arc<dyn NoteStore>, Option<DbPool>) {
    match config.store_backend {
        StoreBackend::Memory => {
            tracing::info!("Using in-memory store; data is lost on exit");
            let store: Arc<dyn NoteStore> = Arc::new(MemoryStore::new());
            (store, None)
        }
        StoreBackend::Sqlite => {
            let pool = notebook_db::create_pool(&config.database_url)
                .await
                .expect("Failed to connect to database");
            tracing::info!(url = %config.database_url, "Database connection pool created");

            notebook_db::health_check(&pool)
                .await
                .expect("Database health check failed");
            tracing::info!("Database health check passed");

            notebook_db::run_migrations(&pool)
                .await
                .expect("Failed to run database migrations");
            tracing::info!("Database migrations applied");

            let store: Arc<dyn NoteStore> = Arc::new(SqliteStore::new(pool.clone()));
            (store, Some(pool))
        }
    }
}

/// Wait for SIGINT or SIGTERM to initiate graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
