//! 조회 기간.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// 양 끝을 포함하는 날짜 구간. 비어 있는 경계는 제한 없음을 뜻합니다.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// 시작일 (포함)
    pub start: Option<NaiveDate>,
    /// 종료일 (포함)
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    /// 날짜가 구간 안에 있는지 확인합니다.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.map_or(true, |start| date >= start) && self.end.map_or(true, |end| date <= end)
    }
}
