//! 저장소 핸들.
//!
//! 연결 풀은 지연 생성되므로 파일이 없어도 서버는 시작됩니다.
//! 모든 조회 전에 파일 존재 여부를 확인합니다.

use std::path::{Path, PathBuf};
use std::time::Duration;

use folio_core::{DatabaseConfig, FolioError, FolioResult, Valuation};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tracing::warn;

use crate::filter::ValuationFilter;
use crate::repository::{InvestmentRepository, LoadSummary};

/// 저장소 상태.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreStatus {
    /// 조회 가능
    Up,
    /// 파일은 있으나 조회 실패
    Down,
    /// 파일 없음
    Missing,
}

impl StoreStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreStatus::Up => "up",
            StoreStatus::Down => "down",
            StoreStatus::Missing => "missing",
        }
    }
}

/// 읽기 전용 SQLite 평가액 저장소.
#[derive(Debug, Clone)]
pub struct ValuationStore {
    pool: SqlitePool,
    path: PathBuf,
}

impl ValuationStore {
    /// 설정으로 저장소를 엽니다. 실제 연결은 첫 조회 시 이루어집니다.
    pub fn open(config: &DatabaseConfig) -> Self {
        let options = SqliteConnectOptions::new()
            .filename(&config.path)
            .read_only(true)
            .create_if_missing(false);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout_secs))
            .connect_lazy_with(options);

        Self {
            pool,
            path: config.path.clone(),
        }
    }

    /// 파일 경로.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 파일이 존재하면 연결 풀을 반환합니다.
    pub fn pool(&self) -> FolioResult<&SqlitePool> {
        if !self.path.exists() {
            return Err(FolioError::DatabaseNotFound(self.path.clone()));
        }
        Ok(&self.pool)
    }

    /// 정렬된 고유 상품 이름 목록.
    pub async fn list_distinct_names(&self) -> FolioResult<Vec<String>> {
        let names = InvestmentRepository::list_distinct_names(self.pool()?).await?;
        Ok(names.into_iter().collect())
    }

    /// 필터를 적용한 평가액 행.
    pub async fn load_rows(
        &self,
        filter: &ValuationFilter,
    ) -> FolioResult<(Vec<Valuation>, LoadSummary)> {
        Ok(InvestmentRepository::load_rows(self.pool()?, filter).await?)
    }

    /// 상태 확인.
    pub async fn status(&self) -> StoreStatus {
        let Ok(pool) = self.pool() else {
            return StoreStatus::Missing;
        };
        match sqlx::query("SELECT 1 FROM investments LIMIT 1")
            .fetch_optional(pool)
            .await
        {
            Ok(_) => StoreStatus::Up,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Valuation store check failed");
                StoreStatus::Down
            }
        }
    }

    /// 연결 풀을 닫습니다.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
