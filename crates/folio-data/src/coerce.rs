//! 저장소 셀의 타입 변환.
//!
//! SQLite는 열 타입을 강제하지 않으므로 `Date`와 `Total` 열에는 텍스트,
//! 정수, 실수가 섞여 들어올 수 있습니다. 변환에 실패한 행은 버립니다.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use folio_core::Valuation;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use tracing::warn;

/// 동적 타입 셀 값.
#[derive(Debug, Clone, PartialEq)]
pub enum RawCell {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
}

/// 변환 전 `investments` 행.
#[derive(Debug, Clone, PartialEq)]
pub struct RawValuationRow {
    pub date: RawCell,
    pub investment: RawCell,
    pub total: RawCell,
}

const MAX_SCALE: u32 = 28;

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%m-%d-%Y"];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

/// 셀을 날짜로 변환합니다. 시각 정보는 버리고 달력 날짜만 남깁니다.
pub fn parse_date(cell: &RawCell) -> Option<NaiveDate> {
    match cell {
        RawCell::Text(text) => parse_date_str(text),
        _ => None,
    }
}

/// 문자열을 날짜로 변환합니다.
pub fn parse_date_str(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
                .map(|dt| dt.date())
        })
        .or_else(|| {
            DateTime::parse_from_rfc3339(text)
                .ok()
                .map(|dt| dt.date_naive())
        })
}

/// 셀을 금액으로 변환합니다. 유한하지 않은 값과 숫자가 아닌 텍스트는 실패합니다.
///
/// 소수 28자리보다 작은 단위는 반올림되고, `Decimal` 범위를 넘는 크기는
/// 경고를 남기고 버립니다.
pub fn parse_amount(cell: &RawCell) -> Option<Decimal> {
    match cell {
        RawCell::Null => None,
        RawCell::Integer(value) => Some(Decimal::from(*value)),
        RawCell::Real(value) => amount_from_f64(*value),
        RawCell::Text(text) => {
            let text = text.trim();
            if text.is_empty() {
                return None;
            }
            Decimal::from_str(text)
                .or_else(|_| Decimal::from_scientific(text))
                .ok()
                .or_else(|| amount_from_f64(text.parse::<f64>().ok()?))
        }
    }
}

fn amount_from_f64(value: f64) -> Option<Decimal> {
    if !value.is_finite() {
        return None;
    }
    let amount = Decimal::from_f64(value)
        .or_else(|| Decimal::from_f64_retain(value).map(|amount| amount.round_dp(MAX_SCALE)));
    match amount {
        Some(amount) => Some(amount),
        // 소수 28자리 아래의 크기
        None if value.abs() < 1.0 => Some(Decimal::ZERO),
        None => {
            warn!(value, "Amount exceeds the supported range, dropping row");
            None
        }
    }
}

/// 셀을 상품 이름으로 변환합니다. NULL만 실패합니다.
pub fn parse_name(cell: &RawCell) -> Option<String> {
    match cell {
        RawCell::Null => None,
        RawCell::Integer(value) => Some(value.to_string()),
        RawCell::Real(value) => Some(value.to_string()),
        RawCell::Text(text) => Some(text.clone()),
    }
}

/// 원시 행을 [`Valuation`]으로 변환합니다.
pub fn coerce_row(row: &RawValuationRow) -> Option<Valuation> {
    let date = parse_date(&row.date)?;
    let amount = parse_amount(&row.total)?;
    let name = parse_name(&row.investment)?;
    Some(Valuation::new(date, name, amount))
}
