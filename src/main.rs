//! Cachehub - cache management server
//!
//! Hosts the cache layer's management surface: per-namespace statistics,
//! health verdicts, and operator actions (clear, reload, preload).

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cachehub::api::{create_router, AppState};
use cachehub::tasks::spawn_sweeper_task;
use cachehub::{warmup, CacheManager, Config};

/// Main entry point for the cachehub management server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Construct the cache manager and register the standard namespaces
/// 4. Warm every namespace via `preload_all` (failures log and stay cold)
/// 5. Start the optional expired-entry sweeper
/// 6. Start the HTTP management server on the configured port
/// 7. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() {
    // Initialize tracing subscriber with env filter
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cachehub=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting cachehub management server");

    // Load configuration from environment variables
    let config = Config::from_env();
    info!(
        "Configuration loaded: port={}, sweep_interval={}s, healthy_hit_rate={}",
        config.server_port, config.sweep_interval, config.healthy_hit_rate
    );

    // Construct the manager and register the application's namespaces.
    // Misconfiguration here is a deployment error and must abort startup.
    let manager = Arc::new(CacheManager::new());
    let plans = warmup::standard_plans();
    warmup::register_all::<serde_json::Value>(&manager, &plans)
        .await
        .expect("cache namespace configuration is invalid");
    info!(namespaces = manager.cache_count().await, "cache namespaces registered");

    // Warm up all namespaces; per-namespace failures are logged and isolated
    manager.preload_all().await;

    // Start background sweeper unless disabled
    let sweeper_handle = if config.sweep_interval > 0 {
        Some(spawn_sweeper_task(manager.clone(), config.sweep_interval))
    } else {
        info!("expired-entry sweeper disabled");
        None
    };

    // Create router with all endpoints
    let state = AppState::new(manager, config.health_thresholds());
    let app = create_router(state);

    // Bind to configured port
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    info!("Server listening on http://{}", addr);

    // Start server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(sweeper_handle))
        .await
        .unwrap();

    info!("Server shutdown complete");
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// On shutdown signal, aborts the sweeper task and allows graceful shutdown.
async fn shutdown_signal(sweeper_handle: Option<tokio::task::JoinHandle<()>>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }

    if let Some(handle) = sweeper_handle {
        handle.abort();
        warn!("Sweeper task aborted");
    }
}
