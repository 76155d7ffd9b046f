use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use thumbnail_worker::health;
use thumbnail_worker::types::Environment;
use thumbnail_worker::worker::ThumbnailWorker;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let environment = Environment::from_env();

    // JSON logs for staging/production, regular format for development
    match environment {
        Environment::Production | Environment::Staging => {
            tracing_subscriber::fmt()
                .json()
                .with_env_filter(EnvFilter::from_default_env())
                .init();
        }
        Environment::Development => {
            tracing_subscriber::fmt()
                .with_env_filter(EnvFilter::from_default_env())
                .init();
        }
    }

    info!("Starting thumbnail worker in {:?} environment", environment);

    let worker = ThumbnailWorker::new(&environment).await?;
    let shutdown_token = worker.shutdown_token();

    // Start health check server
    let health_shutdown = shutdown_token.clone();
    tokio::spawn(async move {
        if let Err(e) = health::start_health_server(health_shutdown).await {
            error!("Health server error: {}", e);
        }
    });

    // Spawn signal handler
    let signal_shutdown = shutdown_token.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Received Ctrl+C, initiating graceful shutdown...");
                signal_shutdown.cancel();
            }
            Err(e) => {
                error!("Failed to listen for Ctrl+C: {}", e);
            }
        }
    });

    worker.run().await?;

    info!("Thumbnail worker stopped");
    Ok(())
}
