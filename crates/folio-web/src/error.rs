//! API 에러 응답 타입.
//!
//! JSON 엔드포인트에서 일관된 에러 형식을 제공합니다.
//! 대시보드 페이지는 에러를 본문에 인라인으로 표시하므로 이 타입을 쓰지 않습니다.

use axum::http::StatusCode;
use axum::Json;
use folio_core::FolioError;
use serde::{Deserialize, Serialize};

/// API 에러 응답.
///
/// ```json
/// {
///   "code": "INVALID_INPUT",
///   "message": "Invalid input: start_date is not a valid date: 'soon'",
///   "timestamp": 1738300800
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// 에러 코드 (예: "INVALID_INPUT", "DB_NOT_FOUND", "DB_ERROR")
    pub code: String,
    /// 사람이 읽을 수 있는 에러 메시지
    pub message: String,
    /// 에러 발생 타임스탬프 (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
}

impl ApiErrorResponse {
    /// 타임스탬프를 포함한 에러 생성.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            timestamp: Some(chrono::Utc::now().timestamp()),
        }
    }

    /// 대시보드 에러를 상태 코드와 응답 본문으로 변환합니다.
    pub fn from_folio(err: &FolioError) -> (StatusCode, Json<Self>) {
        let status = if err.is_client_error() {
            StatusCode::BAD_REQUEST
        } else if err.is_unavailable() {
            StatusCode::SERVICE_UNAVAILABLE
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };
        (status, Json(Self::new(error_code(err), err.to_string())))
    }
}

fn error_code(err: &FolioError) -> &'static str {
    match err {
        FolioError::InvalidInput(_) => "INVALID_INPUT",
        FolioError::DatabaseNotFound(_) => "DB_NOT_FOUND",
        FolioError::Database(_) => "DB_ERROR",
        FolioError::Config(_) => "CONFIG_ERROR",
        FolioError::Overflow(_) => "AMOUNT_OVERFLOW",
    }
}

impl std::fmt::Display for ApiErrorResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiErrorResponse {}

/// API 핸들러 Result 타입 별칭.
pub type ApiResult<T> = Result<T, (StatusCode, Json<ApiErrorResponse>)>;
