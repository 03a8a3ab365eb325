//! Fluxo API Server
//!
//! Main entry point for the Fluxo backend service.

use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fluxo_api::{AppState, create_router};
use fluxo_db::{TransactionRepository, connect};
use fluxo_shared::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fluxo=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load()?;

    // Connect to database
    let db = connect(&config.database).await?;
    info!("Connected to database");

    // Background overdue sweep
    if config.sweep.enabled {
        let repo = TransactionRepository::new(db.clone());
        let interval_secs = config.sweep.interval_secs;
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(Duration::from_secs(interval_secs));
            // Ticks that pile up while a sweep runs collapse into one.
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
            loop {
                ticker.tick().await;
                match repo.mark_overdue(chrono::Utc::now().date_naive()).await {
                    Ok(count) => {
                        if count > 0 {
                            info!(count, "Overdue sweep promoted transactions");
                        }
                    }
                    Err(e) => error!(error = %e, "Overdue sweep failed"),
                }
            }
        });
        info!(interval_secs, "Overdue sweep scheduled");
    }

    // Create application state and router
    let state = AppState { db: Arc::new(db) };
    let app = create_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
