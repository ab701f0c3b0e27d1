//! 보유 자산 대시보드 웹 서버.
//!
//! 이 크레이트는 다음을 제공합니다:
//! - 필터 폼과 차트를 그리는 대시보드 페이지 (`/`)
//! - JSON API (`/api/v1`)
//! - 헬스 체크 엔드포인트 (`/health`)
//!
//! # 모듈 구성
//!
//! - [`state`]: 애플리케이션 공유 상태 (AppState)
//! - [`form`]: 필터 폼 파싱
//! - [`page`]: HTML 페이지 렌더링
//! - [`services`]: 조회 → 차트 생성 파이프라인
//! - [`routes`]: HTTP 엔드포인트
//! - [`error`]: API 에러 응답

pub mod error;
pub mod form;
pub mod page;
pub mod routes;
pub mod services;
pub mod state;

pub use error::{ApiErrorResponse, ApiResult};
pub use form::DashboardForm;
pub use routes::create_router;
pub use state::AppState;
