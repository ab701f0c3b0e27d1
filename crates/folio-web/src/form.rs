//! 대시보드 필터 폼.
//!
//! 같은 키(`investment_name`)가 여러 번 올 수 있으므로
//! `application/x-www-form-urlencoded` 본문/쿼리를 직접 파싱합니다.

use chrono::NaiveDate;
use folio_analytics::ChartOptions;
use folio_core::{DateRange, FolioError, FolioResult};
use folio_data::{parse_date_str, ValuationFilter};
use serde::{Deserialize, Serialize};

/// 제출된 필터 폼 값.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardForm {
    /// 시작일 원문 (비어 있으면 제한 없음)
    pub start_date: Option<String>,
    /// 종료일 원문 (비어 있으면 제한 없음)
    pub end_date: Option<String>,
    /// 선택된 상품 이름 (비어 있으면 전체)
    pub investment_names: Vec<String>,
    /// 추세선 표시
    pub trendline: bool,
    /// 합계 차트 표시
    pub aggregates: bool,
}

impl DashboardForm {
    /// URL 인코딩된 폼 데이터를 파싱합니다. 알 수 없는 키는 무시합니다.
    pub fn parse(input: &[u8]) -> Self {
        let mut form = Self::default();
        for (key, value) in form_urlencoded::parse(input) {
            match key.as_ref() {
                "start_date" => form.start_date = non_empty(&value),
                "end_date" => form.end_date = non_empty(&value),
                "investment_name" => {
                    if !value.is_empty() && !form.investment_names.contains(&value.to_string()) {
                        form.investment_names.push(value.into_owned());
                    }
                }
                "trendline" => form.trendline = is_checked(&value),
                "aggregates" => form.aggregates = is_checked(&value),
                _ => {}
            }
        }
        form
    }

    /// 시작일. 형식이 잘못되면 에러.
    pub fn start(&self) -> FolioResult<Option<NaiveDate>> {
        parse_bound("start_date", self.start_date.as_deref())
    }

    /// 종료일. 형식이 잘못되면 에러.
    pub fn end(&self) -> FolioResult<Option<NaiveDate>> {
        parse_bound("end_date", self.end_date.as_deref())
    }

    /// 조회 필터로 변환합니다.
    pub fn to_filter(&self, allowed_years: &[i32]) -> FolioResult<ValuationFilter> {
        let range = DateRange::new(self.start()?, self.end()?);
        Ok(ValuationFilter::new(range)
            .with_names(self.investment_names.iter().cloned())
            .with_years(allowed_years.to_vec()))
    }

    pub fn chart_options(&self) -> ChartOptions {
        ChartOptions {
            trendline: self.trendline,
            aggregates: self.aggregates,
        }
    }

    pub fn is_selected(&self, name: &str) -> bool {
        self.investment_names.iter().any(|n| n == name)
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn is_checked(value: &str) -> bool {
    !matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "" | "0" | "false" | "off" | "no"
    )
}

fn parse_bound(field: &str, value: Option<&str>) -> FolioResult<Option<NaiveDate>> {
    match value {
        None => Ok(None),
        Some(raw) => parse_date_str(raw)
            .map(Some)
            .ok_or_else(|| FolioError::InvalidInput(format!("{field} is not a valid date: '{raw}'"))),
    }
}
