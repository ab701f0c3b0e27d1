//! # Folio Core
//!
//! 보유 자산 대시보드의 핵심 도메인 모델 및 공통 인프라를 제공합니다.
//!
//! - 평가액 행, 시계열, 기간 타입
//! - 에러 타입
//! - 설정 관리
//! - 로깅 인프라

pub mod config;
pub mod domain;
pub mod error;
pub mod logging;

pub use config::*;
pub use domain::*;
pub use error::*;
pub use logging::*;
