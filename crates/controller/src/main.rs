//! Controller server.
//!
//! Loads the configuration, opens the database, serves HTTP until Ctrl+C
//! or SIGTERM and closes the database on the way out.

use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use controller::{
    app::App, cli::Args, db::PgPoolFactory, router::build_router, state::AppState, ResultExt,
};

/// Initialize tracing/logging.
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,controller=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let args = Args::parse();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting controller");

    let app = App::new_until(&args, &PgPoolFactory::default(), shutdown_signal())
        .await
        .log("Initializing app")?;

    let router = build_router(AppState::from_app(&app));

    let addr = app.conf().backend.bind_address();
    let listener = TcpListener::bind(&addr).await?;

    tracing::info!(
        address = %addr,
        host_url = %app.conf().backend.host_url,
        "Server listening"
    );

    let served = axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    // Close the database even if the server failed.
    let exited = app.exit().await.log("Closing database connection");
    served?;
    exited?;

    tracing::info!("Server shutdown complete");

    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
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
            tracing::info!("Received Ctrl+C, starting graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
