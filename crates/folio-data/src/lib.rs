//! 평가액 데이터 접근 계층.
//!
//! 이 크레이트는 다음을 제공합니다:
//! - SQLite `investments` 테이블 조회 ([`repository`])
//! - 셀 단위 타입 변환 ([`coerce`])
//! - 기간/이름/연도 필터 ([`filter`])
//! - 연결 풀과 파일 존재 확인을 묶은 저장소 핸들 ([`store`])

pub mod coerce;
pub mod filter;
pub mod repository;
pub mod store;

pub use coerce::{
    coerce_row, parse_amount, parse_date, parse_date_str, parse_name, RawCell, RawValuationRow,
};
pub use filter::ValuationFilter;
pub use repository::{InvestmentRepository, LoadSummary};
pub use store::{StoreStatus, ValuationStore};
