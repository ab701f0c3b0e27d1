//! 대시보드 도메인 모델.

mod range;
mod series;
mod valuation;

pub use range::*;
pub use series::*;
pub use valuation::*;
