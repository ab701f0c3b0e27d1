//! 시계열 구성.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use folio_core::{FolioError, FolioResult, Series, SeriesKind, SeriesPoint, Valuation};
use rust_decimal::Decimal;

/// 전체 합계 시계열 이름.
pub const TOTAL_SERIES_NAME: &str = "Total Portfolio";

/// 상품 이름별 시계열을 만듭니다.
///
/// 시계열 순서는 행에서 이름이 처음 나타난 순서이고, 각 시계열의 포인트는
/// 날짜 오름차순입니다. 같은 날짜의 포인트는 입력 순서를 유지합니다.
pub fn group_by_name(rows: &[Valuation]) -> Vec<Series> {
    let mut order: Vec<&str> = Vec::new();
    let mut groups: HashMap<&str, Vec<SeriesPoint>> = HashMap::new();

    for row in rows {
        let points = groups.entry(row.name.as_str()).or_insert_with(|| {
            order.push(row.name.as_str());
            Vec::new()
        });
        points.push(SeriesPoint::new(row.date, row.amount));
    }

    order
        .into_iter()
        .filter_map(|name| {
            let mut points = groups.remove(name)?;
            points.sort_by_key(|p| p.date);
            Some(Series::new(name, SeriesKind::Investment, points))
        })
        .collect()
}

/// 날짜별 전체 합계 시계열. 행이 없으면 `None`.
///
/// 합계가 `Decimal` 범위를 넘으면 [`FolioError::Overflow`].
pub fn total_series(rows: &[Valuation]) -> FolioResult<Option<Series>> {
    let points = sum_by_date(rows.iter())?;
    if points.is_empty() {
        return Ok(None);
    }
    Ok(Some(Series::new(TOTAL_SERIES_NAME, SeriesKind::Total, points)))
}

/// 지정한 현금 상품을 제외한 날짜별 합계 시계열. 남는 행이 없으면 `None`.
pub fn total_excluding_series(rows: &[Valuation], cash_name: &str) -> FolioResult<Option<Series>> {
    let points = sum_by_date(rows.iter().filter(|row| row.name != cash_name))?;
    if points.is_empty() {
        return Ok(None);
    }
    Ok(Some(Series::new(
        format!("{TOTAL_SERIES_NAME} (excluding {cash_name})"),
        SeriesKind::TotalExcluding(cash_name.to_string()),
        points,
    )))
}

fn sum_by_date<'a>(rows: impl Iterator<Item = &'a Valuation>) -> FolioResult<Vec<SeriesPoint>> {
    let mut sums: BTreeMap<NaiveDate, Decimal> = BTreeMap::new();
    for row in rows {
        let sum = sums.entry(row.date).or_insert(Decimal::ZERO);
        *sum = sum.checked_add(row.amount).ok_or_else(|| {
            FolioError::Overflow(format!(
                "total for {} exceeds the supported range",
                row.date
            ))
        })?;
    }
    Ok(sums
        .into_iter()
        .map(|(date, amount)| SeriesPoint::new(date, amount))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn row(date: &str, name: &str, amount: Decimal) -> Valuation {
        Valuation::new(
            NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            name,
            amount,
        )
    }

    fn sample_rows() -> Vec<Valuation> {
        vec![
            row("2024-02-29", "Index Fund", dec!(1100)),
            row("2024-01-31", "Cash", dec!(250)),
            row("2024-01-31", "Index Fund", dec!(1000)),
            row("2024-02-29", "Cash", dec!(300)),
            row("2024-03-31", "Bonds", dec!(500)),
        ]
    }

    #[test]
    fn test_group_by_name_keeps_first_appearance_order() {
        let series = group_by_name(&sample_rows());
        let names: Vec<_> = series.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Index Fund", "Cash", "Bonds"]);
    }

    #[test]
    fn test_group_by_name_sorts_points_by_date() {
        let series = group_by_name(&sample_rows());
        let fund = &series[0];
        assert_eq!(fund.kind, SeriesKind::Investment);
        assert_eq!(fund.points[0].amount, dec!(1000));
        assert_eq!(fund.points[1].amount, dec!(1100));
    }

    #[test]
    fn test_total_series_sums_per_date() {
        let total = total_series(&sample_rows()).unwrap().unwrap();
        assert_eq!(total.kind, SeriesKind::Total);
        let amounts: Vec<_> = total.points.iter().map(|p| p.amount).collect();
        assert_eq!(amounts, vec![dec!(1250), dec!(1400), dec!(500)]);
    }

    #[test]
    fn test_total_excluding_cash() {
        let total = total_excluding_series(&sample_rows(), "Cash").unwrap().unwrap();
        assert_eq!(total.name, "Total Portfolio (excluding Cash)");
        let amounts: Vec<_> = total.points.iter().map(|p| p.amount).collect();
        assert_eq!(amounts, vec![dec!(1000), dec!(1100), dec!(500)]);
    }

    #[test]
    fn test_aggregates_of_empty_input() {
        assert!(total_series(&[]).unwrap().is_none());
        let only_cash = vec![row("2024-01-31", "Cash", dec!(10))];
        assert!(total_excluding_series(&only_cash, "Cash").unwrap().is_none());
        assert!(group_by_name(&[]).is_empty());
    }

    #[test]
    fn test_total_overflow_is_an_error() {
        let huge = Decimal::from_str_exact("50000000000000000000000000000").unwrap();
        let rows = vec![
            row("2024-01-31", "Index Fund", huge),
            row("2024-01-31", "Bonds", huge),
        ];

        let err = total_series(&rows).unwrap_err();
        assert!(matches!(err, FolioError::Overflow(_)));
        assert!(err.to_string().contains("2024-01-31"));
        assert!(matches!(
            total_excluding_series(&rows, "Cash"),
            Err(FolioError::Overflow(_))
        ));

        // 이름별 시계열은 합산하지 않으므로 그대로 만들어짐
        assert_eq!(group_by_name(&rows).len(), 2);
    }
}
