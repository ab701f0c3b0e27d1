//! JSON API endpoint.
//!
//! - `GET /api/v1/investments` - 정렬된 상품 이름 목록
//! - `GET /api/v1/series` - 대시보드 폼과 같은 쿼리 파라미터로 시계열 조회

use axum::extract::{RawQuery, State};
use axum::routing::get;
use axum::{Json, Router};
use folio_analytics::Chart;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::{ApiErrorResponse, ApiResult};
use crate::form::DashboardForm;
use crate::services::load_dashboard;
use crate::state::AppState;

/// 상품 이름 목록 응답.
#[derive(Debug, Serialize, Deserialize)]
pub struct InvestmentsResponse {
    pub names: Vec<String>,
}

/// 시계열 조회 응답.
#[derive(Debug, Serialize, Deserialize)]
pub struct SeriesResponse {
    pub series: Vec<SeriesDto>,
    /// 필터를 통과한 행 수
    pub rows: usize,
    /// 타입 변환에 실패한 행 수
    pub dropped: usize,
}

/// 단일 시계열.
#[derive(Debug, Serialize, Deserialize)]
pub struct SeriesDto {
    pub name: String,
    pub title: String,
    /// 합계 시계열 여부
    pub aggregate: bool,
    /// `YYYY-MM-DD`
    pub dates: Vec<String>,
    pub values: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trend: Option<TrendDto>,
}

/// 추세선 계수와 날짜별 값.
#[derive(Debug, Serialize, Deserialize)]
pub struct TrendDto {
    pub slope: f64,
    pub intercept: f64,
    pub values: Vec<f64>,
}

impl From<&Chart> for SeriesDto {
    fn from(chart: &Chart) -> Self {
        Self {
            name: chart.series.name.clone(),
            title: chart.title.clone(),
            aggregate: chart.series.is_aggregate(),
            dates: chart.dates(),
            values: chart.values(),
            trend: chart.trend.as_ref().map(|t| TrendDto {
                slope: t.line.slope,
                intercept: t.line.intercept,
                values: t.values.clone(),
            }),
        }
    }
}

/// API v1 라우터.
pub fn api_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/investments", get(list_investments))
        .route("/series", get(get_series))
}

/// GET /api/v1/investments
pub async fn list_investments(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<InvestmentsResponse>> {
    let names = state
        .store
        .list_distinct_names()
        .await
        .map_err(|e| ApiErrorResponse::from_folio(&e))?;

    Ok(Json(InvestmentsResponse { names }))
}

/// GET /api/v1/series
pub async fn get_series(
    State(state): State<Arc<AppState>>,
    RawQuery(query): RawQuery,
) -> ApiResult<Json<SeriesResponse>> {
    let form = DashboardForm::parse(query.as_deref().unwrap_or_default().as_bytes());
    let data = load_dashboard(&state, &form)
        .await
        .map_err(|e| ApiErrorResponse::from_folio(&e))?;

    Ok(Json(SeriesResponse {
        series: data.charts.iter().map(SeriesDto::from).collect(),
        rows: data.summary.kept,
        dropped: data.summary.dropped,
    }))
}
