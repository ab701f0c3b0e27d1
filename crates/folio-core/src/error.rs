//! 대시보드 에러 타입.
//!
//! 저장소 접근, 입력 검증, 렌더링 전반에서 사용되는 에러 타입을 정의합니다.

use std::path::PathBuf;

use thiserror::Error;

/// 대시보드 핵심 에러.
#[derive(Debug, Error)]
pub enum FolioError {
    /// 설정 에러
    #[error("Configuration error: {0}")]
    Config(String),

    /// 데이터베이스 파일 없음
    #[error("Database file not found at {}", .0.display())]
    DatabaseNotFound(PathBuf),

    /// 데이터베이스 에러
    #[error("Database error: {0}")]
    Database(String),

    /// 잘못된 입력
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// 금액 합계가 Decimal 범위를 넘음
    #[error("Amount overflow: {0}")]
    Overflow(String),
}

/// 대시보드 작업을 위한 Result 타입.
pub type FolioResult<T> = Result<T, FolioError>;

impl FolioError {
    /// 사용자 입력으로 인한 에러인지 확인합니다.
    pub fn is_client_error(&self) -> bool {
        matches!(self, FolioError::InvalidInput(_))
    }

    /// 저장소를 사용할 수 없는 상태인지 확인합니다.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, FolioError::DatabaseNotFound(_))
    }
}

impl From<config::ConfigError> for FolioError {
    fn from(err: config::ConfigError) -> Self {
        FolioError::Config(err.to_string())
    }
}

#[cfg(feature = "sqlx-support")]
impl From<sqlx::Error> for FolioError {
    fn from(err: sqlx::Error) -> Self {
        FolioError::Database(err.to_string())
    }
}
