//! 평가액 행 필터.

use std::collections::BTreeSet;

use folio_core::{DateRange, Valuation};

/// 조회 조건.
///
/// 비어 있는 이름 집합과 연도 목록은 제한 없음을 뜻합니다.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValuationFilter {
    /// 조회 기간 (양 끝 포함)
    pub range: DateRange,
    /// 선택된 상품 이름
    pub names: BTreeSet<String>,
    /// 허용 연도
    pub years: Vec<i32>,
}

impl ValuationFilter {
    pub fn new(range: DateRange) -> Self {
        Self {
            range,
            ..Default::default()
        }
    }

    /// 상품 이름 제한을 설정합니다.
    pub fn with_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.names = names.into_iter().map(Into::into).collect();
        self
    }

    /// 허용 연도를 설정합니다.
    pub fn with_years(mut self, years: impl Into<Vec<i32>>) -> Self {
        self.years = years.into();
        self
    }

    pub fn matches(&self, row: &Valuation) -> bool {
        (self.years.is_empty() || self.years.contains(&row.year()))
            && self.range.contains(row.date)
            && (self.names.is_empty() || self.names.contains(&row.name))
    }
}
