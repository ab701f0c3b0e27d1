//! 평가액 행.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 타입 변환을 통과한 단일 평가액 기록.
///
/// `investments` 테이블의 한 행(`Date`, `Investment`, `Total`)에 대응합니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Valuation {
    /// 평가 일자
    pub date: NaiveDate,
    /// 투자 상품 이름
    pub name: String,
    /// 평가 금액
    pub amount: Decimal,
}

impl Valuation {
    /// 새 평가액 기록을 생성합니다.
    pub fn new(date: NaiveDate, name: impl Into<String>, amount: Decimal) -> Self {
        Self {
            date,
            name: name.into(),
            amount,
        }
    }

    /// 평가 연도.
    pub fn year(&self) -> i32 {
        self.date.year()
    }
}
