//! Coop Assembly service binary.
//!
//! Serves the REST API and runs the closer and publisher sweeps until
//! Ctrl+C or SIGTERM.

use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use coop_assembly::app::{AppError, Application};
use coop_assembly::config::AppConfig;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let config = AppConfig::load()?;
    config.validate()?;

    init_tracing(&config);

    let app = Application::build(&config).await?;
    let addr = config.server.socket_addr()?;

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let scheduler = app.scheduler();
    let sweeps = tokio::spawn(async move { scheduler.run(shutdown_rx).await });

    let listener = TcpListener::bind(addr).await?;
    tracing::info!(
        %addr,
        environment = ?config.server.environment,
        "Coop assembly listening"
    );

    axum::serve(listener, app.router())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shutting down sweeps");
    let _ = shutdown_tx.send(true);
    if let Err(e) = sweeps.await {
        tracing::error!(error = %e, "Sweep scheduler task failed");
    }

    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| config.server.log_level.clone().into());

    if config.server.log_json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
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
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received terminate signal, initiating graceful shutdown");
        }
    }
}
