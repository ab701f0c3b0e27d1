//! HTTP 라우트.
//!
//! # 라우트 구조
//!
//! - `/` - 대시보드 페이지 (GET, POST)
//! - `/health` - 헬스 체크 (liveness)
//! - `/health/ready` - 상세 헬스 체크 (readiness)
//! - `/api/v1/investments` - 상품 이름 목록
//! - `/api/v1/series` - 필터링된 시계열과 추세선

pub mod api;
pub mod dashboard;
pub mod health;

pub use api::{api_router, InvestmentsResponse, SeriesDto, SeriesResponse, TrendDto};
pub use dashboard::dashboard;
pub use health::{health_router, ComponentStatus, HealthResponse};

use axum::routing::get;
use axum::Router;
use std::sync::Arc;

use crate::state::AppState;

/// 전체 라우터 생성.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(dashboard).post(dashboard))
        .nest("/health", health_router())
        .nest("/api/v1", api_router())
        .with_state(state)
}
