//! Axum API server binary.

use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use ytaudio_api::{create_router, ApiConfig, AppState};
use ytaudio_media::YtDlpExtractor;

#[tokio::main]
async fn main() {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing with colored output for dev, JSON for production
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_ansi(true)
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false),
            )
            .with(env_filter)
            .init();
    }

    info!("Starting ytaudio-api");

    // External tools: yt-dlp is required per-job, ffmpeg is its
    // post-processor. Missing binaries at boot are a warning only.
    if ytaudio_media::check_ytdlp().is_err() {
        warn!("yt-dlp not found in PATH; downloads will fail until it is installed");
    }
    if ytaudio_media::check_ffmpeg().is_err() {
        warn!("ffmpeg not found in PATH; MP3 transcoding will fail until it is installed");
    }

    let config = ApiConfig::from_env();
    info!(
        host = %config.host,
        port = config.port,
        work_dir = %config.work_dir.display(),
        job_slots = config.job_slots,
        "API config loaded"
    );

    let state = match AppState::new(config.clone(), Arc::new(YtDlpExtractor)) {
        Ok(s) => s,
        Err(e) => {
            error!("Failed to create application state: {}", e);
            std::process::exit(1);
        }
    };

    // Sweep workspaces left behind by a previous run
    state.registry.clean_stale_on_boot();

    let registry = Arc::clone(&state.registry);
    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .expect("Invalid bind address");

    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // Same teardown path for normal exit and signals: reclaim every
    // workspace still tracked, even if jobs were mid-flight.
    registry.drain_all();

    info!("Server shutdown complete");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install CTRL+C handler");
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
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Received shutdown signal");
}
