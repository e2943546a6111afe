//! Serve command - Starts the HTTP server.

use std::net::SocketAddr;
use std::sync::Arc;

use crate::api::{create_router, AppState};
use crate::cli::args::ServeArgs;
use crate::config::{Config, NotificationMode};
use crate::errors::{AppError, AppResult};
use crate::infra::{Cache, Database};
use crate::notifications::{LogNotifier, Notifier, QueueNotifier};

/// Execute the serve command
pub async fn execute(args: ServeArgs, config: Config) -> AppResult<()> {
    tracing::info!("Starting server...");

    let db = Arc::new(Database::connect(&config).await?);

    let cache = Cache::try_connect(&config)
        .await
        .map_err(|e| AppError::internal(format!("Failed to connect to Redis: {}", e)))?;
    let cache = Arc::new(cache);
    tracing::info!("Redis cache connected");

    let notifier = build_notifier(&config).await?;

    let addr = format!(
        "{}:{}",
        args.host.unwrap_or_else(|| config.server_host.clone()),
        args.port.unwrap_or(config.server_port)
    );

    let app_state = AppState::from_config(db, cache, config, notifier);
    let app = create_router(app_state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind to {}: {}", addr, e)))?;

    tracing::info!("Server running on http://{}", addr);

    // Peer addresses feed the rate limiter when no proxy header is present
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    Ok(())
}

async fn build_notifier(config: &Config) -> AppResult<Arc<dyn Notifier>> {
    match config.notification_mode {
        NotificationMode::Log => {
            tracing::info!("Customer notifications will be logged");
            Ok(Arc::new(LogNotifier))
        }
        NotificationMode::Queue => {
            let storage = super::jobs::email_storage(config).await?;
            tracing::info!("Customer notifications will be queued for the email worker");
            Ok(Arc::new(QueueNotifier::new(storage, config.mail_from.clone())))
        }
    }
}
