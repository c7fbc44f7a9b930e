//! 주간 시세 시리즈 API 서버.
//!
//! 설정을 로드하고 시리즈 제공자를 구성한 뒤 Axum 서버를 시작합니다.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info};

use series_api::routes::create_router;
use series_api::state::AppState;
use series_core::{init_logging, AppConfig};
use series_data::SeriesProvider;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // .env 파일 로드 (없으면 무시)
    dotenvy::dotenv().ok();

    let config = AppConfig::load_default()?;
    init_logging(config.logging.to_log_config())?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        source = %config.data.source,
        "Starting series API server"
    );

    let addr: SocketAddr = match config.server.bind_address().parse() {
        Ok(addr) => addr,
        Err(e) => {
            error!(
                host = %config.server.host,
                port = config.server.port,
                error = %e,
                "Invalid bind address"
            );
            return Err(e.into());
        }
    };

    let provider = SeriesProvider::from_config(&config.data)?;
    let state = Arc::new(AppState::new(provider, &config.data));
    info!(
        data_source = %state.data_source(),
        default_months = state.default_months,
        max_months = state.max_months,
        "Application state initialized"
    );

    let app = create_router(
        state,
        Duration::from_secs(config.server.request_timeout_secs),
    );

    info!(%addr, "API server listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped gracefully");
    Ok(())
}

/// Ctrl+C 또는 SIGTERM 수신 대기.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
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
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, starting graceful shutdown"),
        _ = terminate => info!("Received SIGTERM, starting graceful shutdown"),
    }
}
