//! 보유 자산 대시보드 서버 및 CLI.
//!
//! `folio serve`로 대시보드 서버를 시작하고,
//! `folio export`로 같은 페이지를 정적 HTML 파일로 저장합니다.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use axum::http::StatusCode;
use clap::{Args, Parser, Subcommand};
use folio_core::{init_logging, AppConfig, DEFAULT_CONFIG_PATH};
use folio_web::services::export_dashboard;
use folio_web::{create_router, AppState, DashboardForm};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Investment valuation dashboard", long_about = None)]
#[command(version)]
struct Cli {
    /// 설정 파일 경로 (없으면 기본값과 환경 변수만 사용)
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// 대시보드 서버 시작 (기본)
    Serve,

    /// 대시보드 페이지를 HTML 파일로 저장
    Export(ExportArgs),
}

#[derive(Args)]
struct ExportArgs {
    /// 출력 파일
    #[arg(long, short)]
    output: PathBuf,

    /// 시작일 (YYYY-MM-DD)
    #[arg(long)]
    start_date: Option<String>,

    /// 종료일 (YYYY-MM-DD)
    #[arg(long)]
    end_date: Option<String>,

    /// 포함할 상품 이름 (여러 번 지정 가능)
    #[arg(long = "name")]
    names: Vec<String>,

    /// 추세선 표시
    #[arg(long)]
    trendline: bool,

    /// 합계 차트 표시
    #[arg(long)]
    aggregates: bool,
}

impl ExportArgs {
    fn form(&self) -> DashboardForm {
        let mut names = Vec::new();
        for name in &self.names {
            if !names.contains(name) {
                names.push(name.clone());
            }
        }
        DashboardForm {
            start_date: self.start_date.clone(),
            end_date: self.end_date.clone(),
            investment_names: names,
            trendline: self.trendline,
            aggregates: self.aggregates,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env 파일 로드 (있는 경우)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let config = AppConfig::load(&cli.config)
        .with_context(|| format!("failed to load configuration from {}", cli.config.display()))?;

    init_logging(&config.logging)
        .map_err(|e| anyhow::anyhow!("failed to initialize logging: {e}"))?;

    info!(
        database = %config.database.path.display(),
        allowed_years = ?config.dashboard.allowed_years,
        cash_name = %config.dashboard.cash_name,
        "Configuration loaded"
    );

    let state = AppState::new(config);

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve(state).await,
        Commands::Export(args) => {
            export_dashboard(&state, &args.form(), &args.output)
                .await
                .with_context(|| format!("failed to write {}", args.output.display()))?;
            state.store.close().await;
            Ok(())
        }
    }
}

async fn serve(state: AppState) -> anyhow::Result<()> {
    let addr = state.config.server.bind_address();
    let timeout = Duration::from_secs(state.config.server.request_timeout_secs);

    if !state.store.path().exists() {
        warn!(
            path = %state.store.path().display(),
            "Database file not found; the dashboard will show an error until it exists"
        );
    }

    let state = Arc::new(state);
    let app = create_router(state.clone())
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            timeout,
        ));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, version = %state.version, "Dashboard listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    state.store.close().await;
    info!("Server stopped gracefully");
    Ok(())
}

/// Ctrl+C 또는 SIGTERM 대기.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to install Ctrl+C handler");
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
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => warn!("Received Ctrl+C, initiating graceful shutdown..."),
        _ = terminate => warn!("Received SIGTERM, initiating graceful shutdown..."),
    }
}
