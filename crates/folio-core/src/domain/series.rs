//! 시계열 타입.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 시계열의 한 점.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub amount: Decimal,
}

impl SeriesPoint {
    pub fn new(date: NaiveDate, amount: Decimal) -> Self {
        Self { date, amount }
    }
}

/// 시계열 종류.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "excluded", rename_all = "snake_case")]
pub enum SeriesKind {
    /// 단일 투자 상품
    Investment,
    /// 전체 상품 합계
    Total,
    /// 지정한 상품(현금)을 제외한 합계
    TotalExcluding(String),
}

/// 하나의 이름에 대한 날짜순 (일자, 금액) 시계열.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Series {
    /// 시계열 이름 (투자 상품명 또는 합계 레이블)
    pub name: String,
    /// 시계열 종류
    pub kind: SeriesKind,
    /// 날짜 오름차순으로 정렬된 데이터 포인트
    pub points: Vec<SeriesPoint>,
}

impl Series {
    pub fn new(name: impl Into<String>, kind: SeriesKind, points: Vec<SeriesPoint>) -> Self {
        Self {
            name: name.into(),
            kind,
            points,
        }
    }

    pub fn is_aggregate(&self) -> bool {
        !matches!(self.kind, SeriesKind::Investment)
    }

    /// 첫 번째와 마지막 날짜.
    pub fn date_span(&self) -> Option<(NaiveDate, NaiveDate)> {
        let first = self.points.first()?.date;
        let last = self.points.last()?.date;
        Some((first, last))
    }
}
