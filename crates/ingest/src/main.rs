use std::process::ExitCode;

use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use yakbot_db::DatabaseConfig;
use yakbot_ingest::config::IngestConfig;
use yakbot_ingest::feed::FeedClient;
use yakbot_ingest::schedule::run_periodic;
use yakbot_ingest::sync::run_full_sync;

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    let json_logs = std::env::var("LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json"));
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "yakbot_ingest=debug".into()),
        )
        .with(json_logs.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!json_logs).then(tracing_subscriber::fmt::layer))
        .init();

    // --- Configuration ---
    let config = IngestConfig::from_env().expect("Invalid ingest configuration");
    tracing::info!(
        feed_url = %config.feed_url,
        page_size = config.page_size,
        interval_secs = ?config.sync_interval_secs,
        "Loaded ingest configuration"
    );

    // --- Database ---
    let db_config = DatabaseConfig::from_env().expect("Invalid database configuration");
    let pool = yakbot_db::create_pool(&db_config)
        .await
        .expect("Failed to connect to database");
    yakbot_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database ready");

    // --- Feed ---
    let feed = FeedClient::new(
        config.feed_url.clone(),
        config.service_key.clone(),
        config.http_timeout(),
    )
    .expect("Failed to build feed HTTP client");
    let options = config.sync_options();

    let exit = match config.sync_interval() {
        Some(every) => {
            let cancel = CancellationToken::new();
            let signal_cancel = cancel.clone();
            tokio::spawn(async move {
                shutdown_signal().await;
                signal_cancel.cancel();
            });

            let runs = run_periodic(&feed, &pool, &options, every, cancel).await;
            tracing::info!(runs, "Periodic drug sync stopped");
            ExitCode::SUCCESS
        }
        None => {
            let report = run_full_sync(&feed, &pool, &options).await;
            if report.is_aborted() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            }
        }
    };

    pool.close().await;
    exit
}

/// Wait for SIGINT (Ctrl-C) or SIGTERM (on Unix).
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
            tracing::info!("Received SIGINT (Ctrl-C), stopping");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, stopping");
        }
    }
}
