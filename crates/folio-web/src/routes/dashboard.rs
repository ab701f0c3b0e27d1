//! 대시보드 페이지 endpoint.

use axum::extract::rejection::RawFormRejection;
use axum::extract::{RawForm, State};
use axum::response::Html;
use std::sync::Arc;
use tracing::warn;

use crate::form::DashboardForm;
use crate::services::render_dashboard;
use crate::state::AppState;

/// 대시보드 페이지.
///
/// GET은 쿼리 문자열, POST는 폼 본문에서 필터를 읽습니다.
/// 실패는 항상 200 응답 본문 안의 에러 문단으로 표시됩니다.
pub async fn dashboard(
    State(state): State<Arc<AppState>>,
    form: Result<RawForm, RawFormRejection>,
) -> Html<String> {
    let form = match form {
        Ok(RawForm(body)) => DashboardForm::parse(&body),
        Err(rejection) => {
            warn!(error = %rejection, "Unreadable dashboard form, using defaults");
            DashboardForm::default()
        }
    };

    Html(render_dashboard(&state, &form).await)
}
