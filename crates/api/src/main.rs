use std::net::SocketAddr;
use std::sync::Arc;

use overlay_core::segments::SegmentDirectory;
use overlay_db::stores::{MemoryOverlayStore, OverlayStore, PgOverlayStore};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use overlay_api::config::{ServerConfig, StoreBackend};
use overlay_api::router::build_app_router;
use overlay_api::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    init_tracing();

    // --- Configuration ---
    let config = ServerConfig::from_env().expect("Invalid configuration");
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Overlay store ---
    let overlays = build_overlay_store(&config).await;

    // --- Segment directory ---
    let segments = SegmentDirectory::new(config.streams_dir.clone());
    let streams_root = segments.absolute_root().await;
    tracing::info!(streams_dir = %streams_root.display(), "Serving stream output");

    // --- App state ---
    let state = AppState {
        config: Arc::new(config.clone()),
        overlays,
        segments: Arc::new(segments),
    };

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

    tracing::info!("Graceful shutdown complete");
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` controls filtering; `LOG_FORMAT=json` switches to JSON lines.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "overlay_api=debug,overlay_core=debug,tower_http=debug".into());

    let json = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));
    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

/// Construct the configured overlay store.
///
/// For Postgres this connects, checks health, and applies migrations;
/// any failure aborts startup.
async fn build_overlay_store(config: &ServerConfig) -> Arc<dyn OverlayStore> {
    match config.store {
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory overlay store; overlays are lost on restart");
            Arc::new(MemoryOverlayStore::new())
        }
        StoreBackend::Postgres => {
            let pool =
                overlay_db::create_pool(&config.database_url, config.database_name.as_deref())
                    .await
                    .expect("Failed to connect to database");
            tracing::info!("Database connection pool created");

            overlay_db::health_check(&pool)
                .await
                .expect("Database health check failed");
            tracing::info!("Database health check passed");

            overlay_db::run_migrations(&pool)
                .await
                .expect("Failed to run database migrations");
            tracing::info!("Database migrations applied");

            Arc::new(PgOverlayStore::new(pool))
        }
    }
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
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
