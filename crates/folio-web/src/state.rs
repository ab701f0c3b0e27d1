//! 모든 핸들러에서 공유되는 애플리케이션 상태.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use folio_core::AppConfig;
use folio_data::ValuationStore;

/// 애플리케이션 공유 상태.
///
/// Arc로 래핑되어 Axum의 State extractor를 통해 핸들러에 주입됩니다.
#[derive(Debug, Clone)]
pub struct AppState {
    /// 애플리케이션 설정
    pub config: Arc<AppConfig>,
    /// 평가액 저장소 (읽기 전용 SQLite)
    pub store: ValuationStore,
    /// 빌드 버전
    pub version: String,
    /// 서버 시작 시각
    pub started_at: DateTime<Utc>,
}

impl AppState {
    /// 설정으로 상태를 생성합니다. 저장소 연결은 첫 조회 시 열립니다.
    pub fn new(config: AppConfig) -> Self {
        let store = ValuationStore::open(&config.database);
        Self {
            config: Arc::new(config),
            store,
            version: env!("CARGO_PKG_VERSION").to_string(),
            started_at: Utc::now(),
        }
    }

    /// 서버 업타임(초).
    pub fn uptime_secs(&self) -> i64 {
        (Utc::now() - self.started_at).num_seconds()
    }
}
