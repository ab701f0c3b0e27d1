//! 헬스 체크 endpoint.

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use folio_data::StoreStatus;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::state::AppState;

/// 헬스 체크 응답 구조체.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// 전체 서비스 상태 ("healthy" | "unhealthy")
    pub status: String,
    /// 버전
    pub version: String,
    /// 서버 업타임(초)
    pub uptime_secs: i64,
    /// 현재 시간 (ISO 8601)
    pub timestamp: String,
    /// 데이터베이스 상태
    pub database: ComponentStatus,
}

/// 컴포넌트 상태.
#[derive(Debug, Serialize, Deserialize)]
pub struct ComponentStatus {
    /// 상태 ("up" | "down" | "missing")
    pub status: String,
    /// 추가 정보 (선택적)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// 간단한 헬스 체크 (liveness 확인용).
///
/// GET /health
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

/// 상세 헬스 체크 (readiness 확인용).
///
/// GET /health/ready
pub async fn health_ready(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let store_status = state.store.status().await;
    let (status, status_code) = match store_status {
        StoreStatus::Up => ("healthy", StatusCode::OK),
        StoreStatus::Down | StoreStatus::Missing => ("unhealthy", StatusCode::SERVICE_UNAVAILABLE),
    };

    let database = ComponentStatus {
        status: store_status.as_str().to_string(),
        message: Some(state.store.path().display().to_string()),
    };

    let response = HealthResponse {
        status: status.to_string(),
        version: state.version.clone(),
        uptime_secs: state.uptime_secs(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        database,
    };

    (status_code, Json(response))
}

/// 헬스 체크 라우터.
pub fn health_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(health_check))
        .route("/ready", get(health_ready))
}
