//! Jurist marketplace server.
//!
//! Main entry point that wires all crates together and starts the server.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing;
use tracing_subscriber::{EnvFilter, fmt};

use jurist_api::{AppState, Backends};
use jurist_core::config::AppConfig;
use jurist_core::error::AppError;
use jurist_core::traits::{Clock, StorageProvider, SystemClock};
use jurist_database::DatabasePool;
use jurist_database::repositories::{
    AdminRepository, AuditLogRepository, JobRepository, LawyerRepository, RequestRepository,
};
use jurist_storage::{LocalStorageProvider, ProviderDocumentStore};
use jurist_worker::{
    JobExecutor, JobQueue, LogMailer, NotificationJobHandler, QueuedNotificationDispatcher,
    WorkerRunner,
};

#[tokio::main]
async fn main() {
    let env = std::env::var("JURIST_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);
    tracing::info!(env = %env, "Configuration loaded");

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Jurist v{}", env!("CARGO_PKG_VERSION"));

    // ── 1. Database ──────────────────────────────────────────
    let database = DatabasePool::connect(&config.database).await?;
    if config.database.run_migrations {
        jurist_database::migration::run_migrations(database.pool()).await?;
    } else {
        tracing::info!("Skipping migrations (database.run_migrations = false)");
    }
    let db_pool = database.handle();

    let requests = Arc::new(RequestRepository::new(db_pool.clone()));
    let lawyers = Arc::new(LawyerRepository::new(db_pool.clone()));
    let admins = Arc::new(AdminRepository::new(db_pool.clone()));
    let audits = Arc::new(AuditLogRepository::new(db_pool.clone()));
    let jobs = Arc::new(JobRepository::new(db_pool.clone()));

    // ── 2. Document storage ──────────────────────────────────
    tracing::info!(root = %config.storage.local_root, "Initializing document storage...");
    let provider: Arc<dyn StorageProvider> =
        Arc::new(LocalStorageProvider::new(&config.storage.local_root).await?);
    tracing::info!(provider = provider.provider_type(), "Document storage ready");
    let documents = Arc::new(ProviderDocumentStore::new(provider, &config.storage));

    // ── 3. Notifications ─────────────────────────────────────
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let job_queue = JobQueue::new(jobs, Arc::clone(&clock));
    let notifier = Arc::new(QueuedNotificationDispatcher::new(
        job_queue.clone(),
        config.worker.max_attempts,
    ));

    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    // ── 4. Background worker ─────────────────────────────────
    let worker_handle = if config.worker.enabled {
        tracing::info!("Starting background worker...");

        let worker_id = format!("worker-{}", &uuid::Uuid::new_v4().simple().to_string()[..8]);

        let mut executor = JobExecutor::new();
        executor.register(Arc::new(NotificationJobHandler::new(
            Arc::new(LogMailer),
            config.notifications.clone(),
        )));

        let runner = WorkerRunner::new(
            job_queue,
            Arc::new(executor),
            config.worker.clone(),
            worker_id,
        );

        let worker_cancel = shutdown_rx.clone();
        let handle = tokio::spawn(async move {
            runner.run(worker_cancel).await;
        });

        tracing::info!("Background worker started");
        Some(handle)
    } else {
        tracing::info!("Background worker disabled; notifications stay queued");
        None
    };

    // ── 5. HTTP server ───────────────────────────────────────
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let grace = Duration::from_secs(config.server.shutdown_grace_seconds);

    let state = AppState::new(
        config,
        Backends {
            requests,
            lawyers,
            admins,
            audits,
            documents,
            notifier,
            clock,
        },
    );
    let app = jurist_api::build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!(addr = %addr, "Jurist server listening");

    let server = axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(async move {
        shutdown_signal().await;
        tracing::info!("Shutdown signal received, starting graceful shutdown...");
        let _ = shutdown_tx.send(true);
    });

    server
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    tracing::info!("Waiting for background tasks to complete...");

    if let Some(handle) = worker_handle {
        if tokio::time::timeout(grace, handle).await.is_err() {
            tracing::warn!(grace_secs = grace.as_secs(), "Worker did not stop in time");
        }
    }

    database.close().await;
    tracing::info!("Jurist server shut down gracefully");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
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
}
