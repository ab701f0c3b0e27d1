//! `investments` 테이블 Repository.
//!
//! 테이블 전체를 읽은 뒤 메모리에서 타입 변환과 필터링을 수행합니다.
//! SQLite 열은 타입이 섞여 있을 수 있으므로 셀마다 저장 타입을 확인해 읽습니다.

use std::collections::BTreeSet;

use folio_core::Valuation;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool, TypeInfo, ValueRef};
use tracing::debug;

use crate::coerce::{coerce_row, parse_name, RawCell, RawValuationRow};
use crate::filter::ValuationFilter;

/// 조회 결과 요약.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadSummary {
    /// 테이블에서 읽은 행 수
    pub scanned: usize,
    /// 타입 변환에 실패해 버린 행 수
    pub dropped: usize,
    /// 필터를 통과한 행 수
    pub kept: usize,
}

/// 평가액 Repository.
pub struct InvestmentRepository;

impl InvestmentRepository {
    /// `Investment` 열의 NULL이 아닌 고유값을 오름차순으로 반환합니다.
    pub async fn list_distinct_names(pool: &SqlitePool) -> Result<BTreeSet<String>, sqlx::Error> {
        let rows = sqlx::query("SELECT DISTINCT Investment FROM investments")
            .fetch_all(pool)
            .await?;

        let mut names = BTreeSet::new();
        for row in &rows {
            if let Some(name) = parse_name(&read_cell(row, 0)?) {
                names.insert(name);
            }
        }
        Ok(names)
    }

    /// 테이블 전체를 변환 전 상태로 읽습니다.
    pub async fn fetch_raw_rows(pool: &SqlitePool) -> Result<Vec<RawValuationRow>, sqlx::Error> {
        let rows = sqlx::query("SELECT Date, Investment, Total FROM investments")
            .fetch_all(pool)
            .await?;

        rows.iter()
            .map(|row| {
                Ok(RawValuationRow {
                    date: read_cell(row, 0)?,
                    investment: read_cell(row, 1)?,
                    total: read_cell(row, 2)?,
                })
            })
            .collect()
    }

    /// 전체 행을 읽어 변환하고 필터를 적용합니다. 행 순서는 테이블 순서를 따릅니다.
    pub async fn load_rows(
        pool: &SqlitePool,
        filter: &ValuationFilter,
    ) -> Result<(Vec<Valuation>, LoadSummary), sqlx::Error> {
        let raw = Self::fetch_raw_rows(pool).await?;

        let mut summary = LoadSummary {
            scanned: raw.len(),
            ..Default::default()
        };

        let rows: Vec<Valuation> = raw
            .iter()
            .filter_map(|row| {
                let coerced = coerce_row(row);
                if coerced.is_none() {
                    summary.dropped += 1;
                }
                coerced
            })
            .filter(|row| filter.matches(row))
            .collect();

        summary.kept = rows.len();
        debug!(
            scanned = summary.scanned,
            dropped = summary.dropped,
            kept = summary.kept,
            "Loaded valuation rows"
        );

        Ok((rows, summary))
    }
}

/// 저장 타입에 맞춰 셀을 읽습니다. BLOB은 NULL로 취급합니다.
fn read_cell(row: &SqliteRow, index: usize) -> Result<RawCell, sqlx::Error> {
    let value = row.try_get_raw(index)?;
    if value.is_null() {
        return Ok(RawCell::Null);
    }
    let storage = value.type_info().name().to_owned();

    let cell = match storage.as_str() {
        "INTEGER" | "BOOLEAN" => RawCell::Integer(row.try_get_unchecked::<i64, _>(index)?),
        "REAL" => RawCell::Real(row.try_get_unchecked::<f64, _>(index)?),
        "TEXT" => RawCell::Text(row.try_get_unchecked::<String, _>(index)?),
        _ => RawCell::Null,
    };
    Ok(cell)
}
