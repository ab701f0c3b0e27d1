//! 대시보드 파이프라인: 필터 → 행 조회 → 차트 생성 → 페이지 렌더링.

use std::path::Path;
use std::time::Instant;

use folio_analytics::{build_charts, Chart};
use folio_core::FolioResult;
use folio_data::LoadSummary;
use tracing::{info, warn};

use crate::form::DashboardForm;
use crate::page::DashboardPage;
use crate::state::AppState;

/// 필터 결과 차트와 조회 요약.
#[derive(Debug, Clone)]
pub struct DashboardData {
    pub charts: Vec<Chart>,
    pub summary: LoadSummary,
}

/// 폼 조건으로 행을 읽어 차트를 만듭니다.
pub async fn load_dashboard(state: &AppState, form: &DashboardForm) -> FolioResult<DashboardData> {
    let started = Instant::now();
    let dashboard = &state.config.dashboard;

    let filter = form.to_filter(&dashboard.allowed_years)?;
    let (rows, summary) = state.store.load_rows(&filter).await?;
    let charts = build_charts(&rows, form.chart_options(), dashboard)?;

    info!(
        rows = summary.kept,
        dropped = summary.dropped,
        series = charts.len(),
        elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
        "Dashboard data loaded"
    );

    Ok(DashboardData { charts, summary })
}

/// 전체 대시보드 페이지를 렌더링합니다.
///
/// 어떤 단계에서 실패하든 페이지는 만들어지고, 차트 영역에 에러 메시지가 표시됩니다.
pub async fn render_dashboard(state: &AppState, form: &DashboardForm) -> String {
    let (all_names, outcome) = match state.store.list_distinct_names().await {
        Ok(names) => {
            let outcome = load_dashboard(state, form).await.map(|data| data.charts);
            (names, outcome)
        }
        Err(e) => (Vec::new(), Err(e)),
    };

    let outcome = outcome.map_err(|e| {
        warn!(error = %e, "Dashboard rendering fell back to inline error");
        e.to_string()
    });

    DashboardPage {
        all_names: &all_names,
        form,
        charts: outcome
            .as_ref()
            .map(Vec::as_slice)
            .map_err(String::as_str),
    }
    .render()
}

/// 대시보드 페이지를 정적 HTML 파일로 저장합니다.
///
/// 조회 실패는 서버와 마찬가지로 페이지 안의 에러 문단으로 기록됩니다.
pub async fn export_dashboard(
    state: &AppState,
    form: &DashboardForm,
    output: &Path,
) -> std::io::Result<()> {
    let html = render_dashboard(state, form).await;
    tokio::fs::write(output, html).await?;
    info!(output = %output.display(), "Dashboard exported");
    Ok(())
}
