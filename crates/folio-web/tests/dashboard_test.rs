//! 라우터 통합 테스트.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use folio_core::{AppConfig, DatabaseConfig};
use folio_web::routes::{InvestmentsResponse, SeriesResponse};
use folio_web::services::export_dashboard;
use folio_web::{create_router, AppState, DashboardForm};
use sqlx::sqlite::SqliteConnectOptions;
use sqlx::{Connection, SqliteConnection};
use tower::ServiceExt;

const SAMPLE_ROWS: &[(&str, &str, &str)] = &[
    ("2024-01-31", "Index Fund", "1000"),
    ("2024-02-29", "Index Fund", "1100"),
    ("2024-03-31", "Index Fund", "1150"),
    ("2024-01-31", "Cash", "250"),
    ("2024-02-29", "Cash", "300"),
    ("2024-02-29", "Bonds", "500"),
    ("2023-12-31", "Old Fund", "10"),
    ("bad-date", "Index Fund", "1"),
];

async fn seed_database(path: &Path) {
    seed_rows(path, SAMPLE_ROWS).await;
}

async fn seed_rows(path: &Path, rows: &[(&str, &str, &str)]) {
    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true);
    let mut conn = SqliteConnection::connect_with(&options).await.unwrap();

    sqlx::query("CREATE TABLE investments (Date TEXT, Investment TEXT, Total)")
        .execute(&mut conn)
        .await
        .unwrap();

    for &(date, name, total) in rows {
        sqlx::query("INSERT INTO investments (Date, Investment, Total) VALUES (?, ?, ?)")
            .bind(date)
            .bind(name)
            .bind(total)
            .execute(&mut conn)
            .await
            .unwrap();
    }

    conn.close().await.unwrap();
}

fn config_for(path: PathBuf) -> AppConfig {
    AppConfig {
        database: DatabaseConfig {
            path,
            ..Default::default()
        },
        ..Default::default()
    }
}

fn app_for(path: PathBuf) -> Router {
    create_router(Arc::new(AppState::new(config_for(path))))
}

async fn seeded_app() -> (tempfile::TempDir, Router) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("investments.sqlite3");
    seed_database(&path).await;
    (dir, app_for(path))
}

async fn body_string(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_form(body: &'static str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body))
        .unwrap()
}

#[tokio::test]
async fn test_get_dashboard_renders_chart_per_investment() {
    let (_dir, app) = seeded_app().await;

    let response = app.oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_string(response).await;
    assert!(html.contains("Total Value Over Time: Index Fund"));
    assert!(html.contains("Total Value Over Time: Cash"));
    assert!(html.contains("Total Value Over Time: Bonds"));
    // 2023년 데이터는 허용 연도 밖
    assert!(!html.contains("Total Value Over Time: Old Fund"));
    assert!(!html.contains("Total Portfolio Value"));
    assert_eq!(html.matches("<svg").count(), 3);
    // 선택 목록에는 전체 이름이 정렬되어 표시
    let bonds = html.find(r#"<option value="Bonds""#).unwrap();
    let old = html.find(r#"<option value="Old Fund""#).unwrap();
    assert!(bonds < old);
}

#[tokio::test]
async fn test_post_filters_names_and_adds_aggregates() {
    let (_dir, app) = seeded_app().await;

    let response = app
        .oneshot(post_form(
            "investment_name=Cash&investment_name=Index+Fund&aggregates=on&trendline=on",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_string(response).await;
    assert!(html.contains("Total Value Over Time: Index Fund"));
    assert!(html.contains("Total Value Over Time: Cash"));
    assert!(!html.contains("Total Value Over Time: Bonds"));
    assert!(html.contains("Total Portfolio Value</figcaption>"));
    assert!(html.contains("Total Portfolio Value (excluding Cash)"));
    assert!(html.contains(">Trendline</text>"));
    assert!(html.contains(r#"<option value="Cash" selected>"#));
}

#[tokio::test]
async fn test_invalid_date_shows_inline_error() {
    let (_dir, app) = seeded_app().await;

    let response = app.oneshot(post_form("start_date=someday")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_string(response).await;
    assert!(html.contains("Error: Invalid input: start_date is not a valid date"));
    assert!(!html.contains("<svg"));
    assert!(html.contains(r#"<option value="Cash">"#));
}

#[tokio::test]
async fn test_missing_database_shows_inline_error() {
    let dir = tempfile::tempdir().unwrap();
    let app = app_for(dir.path().join("missing.sqlite3"));

    let response = app.oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_string(response).await;
    assert!(html.contains("Error: Database file not found at"));
    assert!(html.contains("<form"));
}

#[tokio::test]
async fn test_date_range_excludes_outside_points() {
    let (_dir, app) = seeded_app().await;

    let response = app
        .oneshot(get("/?start_date=2024-03-01&end_date=2024-12-31"))
        .await
        .unwrap();
    let html = body_string(response).await;
    assert!(html.contains("Total Value Over Time: Index Fund"));
    assert!(!html.contains("Total Value Over Time: Cash"));
    assert_eq!(html.matches("<circle").count(), 1);
}

#[tokio::test]
async fn test_api_investments() {
    let (_dir, app) = seeded_app().await;

    let response = app.oneshot(get("/api/v1/investments")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: InvestmentsResponse = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(body.names, vec!["Bonds", "Cash", "Index Fund", "Old Fund"]);
}

#[tokio::test]
async fn test_api_series_with_trend_and_totals() {
    let (_dir, app) = seeded_app().await;

    let response = app
        .oneshot(get("/api/v1/series?trendline=true&aggregates=true"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: SeriesResponse = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(body.rows, 6);
    assert_eq!(body.dropped, 1);

    let names: Vec<_> = body.series.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "Index Fund",
            "Cash",
            "Bonds",
            "Total Portfolio",
            "Total Portfolio (excluding Cash)"
        ]
    );

    let fund = &body.series[0];
    assert_eq!(fund.dates, vec!["2024-01-31", "2024-02-29", "2024-03-31"]);
    assert_eq!(fund.values, vec![1000.0, 1100.0, 1150.0]);
    let trend = fund.trend.as_ref().unwrap();
    assert_eq!(trend.values.len(), 3);
    assert!(trend.slope > 0.0);

    // Bonds는 포인트가 하나라 추세선 없음
    assert!(body.series[2].trend.is_none());

    let total = &body.series[3];
    assert!(total.aggregate);
    assert_eq!(total.values, vec![1250.0, 1900.0, 1150.0]);

    let ex_cash = &body.series[4];
    assert_eq!(ex_cash.values, vec![1000.0, 1600.0, 1150.0]);
}

#[tokio::test]
async fn test_api_series_errors() {
    let (_dir, app) = seeded_app().await;
    let response = app
        .oneshot(get("/api/v1/series?end_date=never"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_string(response).await;
    assert!(body.contains("INVALID_INPUT"));

    let dir = tempfile::tempdir().unwrap();
    let missing = app_for(dir.path().join("missing.sqlite3"));
    let response = missing.oneshot(get("/api/v1/series")).await.unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert!(body_string(response).await.contains("DB_NOT_FOUND"));
}

#[tokio::test]
async fn test_empty_allowed_years_shows_every_year() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("investments.sqlite3");
    seed_database(&path).await;

    let mut config = config_for(path);
    config.dashboard.allowed_years.clear();
    let app = create_router(Arc::new(AppState::new(config)));

    let response = app.oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_string(response).await;
    assert!(html.contains("Total Value Over Time: Old Fund"));
    assert!(html.contains("Total Value Over Time: Index Fund"));
    assert_eq!(html.matches("<svg").count(), 4);
}

#[tokio::test]
async fn test_aggregate_overflow_shows_inline_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("investments.sqlite3");
    let huge = "50000000000000000000000000000";
    seed_rows(
        &path,
        &[
            ("2024-01-31", "Index Fund", huge),
            ("2024-01-31", "Bonds", huge),
        ],
    )
    .await;

    let response = app_for(path.clone())
        .oneshot(get("/?aggregates=on"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.contains("<p>Error: Amount overflow: total for 2024-01-31"));
    assert!(!html.contains("<svg"));
    assert!(html.contains(r#"<option value="Bonds">"#));

    // 합계 없이 조회하면 이름별 차트는 그려짐
    let html = body_string(app_for(path.clone()).oneshot(get("/")).await.unwrap()).await;
    assert_eq!(html.matches("<svg").count(), 2);

    let response = app_for(path)
        .oneshot(get("/api/v1/series?aggregates=on"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body_string(response).await.contains("AMOUNT_OVERFLOW"));
}

#[tokio::test]
async fn test_export_writes_dashboard_page() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("investments.sqlite3");
    seed_database(&path).await;
    let state = AppState::new(config_for(path));

    let output = dir.path().join("dashboard.html");
    let form = DashboardForm {
        investment_names: vec!["Index Fund".to_string()],
        trendline: true,
        ..Default::default()
    };
    export_dashboard(&state, &form, &output).await.unwrap();

    let html = std::fs::read_to_string(&output).unwrap();
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("Total Value Over Time: Index Fund"));
    assert!(!html.contains("Total Value Over Time: Cash"));
    assert!(html.contains(">Trendline</text>"));
    assert!(html.contains(r#"<option value="Index Fund" selected>"#));
}

#[tokio::test]
async fn test_export_records_missing_database_inline() {
    let dir = tempfile::tempdir().unwrap();
    let state = AppState::new(config_for(dir.path().join("missing.sqlite3")));

    let output = dir.path().join("dashboard.html");
    export_dashboard(&state, &DashboardForm::default(), &output)
        .await
        .unwrap();

    let html = std::fs::read_to_string(&output).unwrap();
    assert!(html.contains("<p>Error: Database file not found at"));
}
