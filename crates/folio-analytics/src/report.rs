//! 대시보드 차트 묶음 생성.

use folio_core::{DashboardConfig, FolioResult, Valuation};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::chart::{Chart, ChartLayout};
use crate::series::{group_by_name, total_excluding_series, total_series};

/// 차트 표시 옵션.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartOptions {
    /// 시계열마다 추세선 표시
    pub trendline: bool,
    /// 전체 합계 / 현금 제외 합계 차트 추가
    pub aggregates: bool,
}

/// 필터링된 행으로 차트 목록을 만듭니다.
///
/// 상품별 차트가 먼저 오고, `aggregates`가 켜져 있으면 전체 합계와
/// 현금 제외 합계 차트가 뒤따릅니다. 데이터가 없는 합계 차트는 생략합니다.
/// 합계가 `Decimal` 범위를 넘으면 에러를 반환합니다.
pub fn build_charts(
    rows: &[Valuation],
    options: ChartOptions,
    config: &DashboardConfig,
) -> FolioResult<Vec<Chart>> {
    let layout = ChartLayout {
        width: config.chart_width,
        height: config.chart_height,
        ..Default::default()
    };

    let mut series = group_by_name(rows);
    if options.aggregates {
        series.extend(total_series(rows)?);
        series.extend(total_excluding_series(rows, &config.cash_name)?);
    }

    let charts: Vec<Chart> = series
        .into_iter()
        .map(|s| {
            let chart = Chart::new(s, layout);
            if options.trendline {
                chart.with_trendline()
            } else {
                chart
            }
        })
        .collect();

    debug!(
        rows = rows.len(),
        charts = charts.len(),
        trendline = options.trendline,
        aggregates = options.aggregates,
        "Built dashboard charts"
    );
    Ok(charts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use folio_core::SeriesKind;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn row(date: &str, name: &str, amount: Decimal) -> Valuation {
        Valuation::new(
            NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            name,
            amount,
        )
    }

    fn rows() -> Vec<Valuation> {
        vec![
            row("2024-01-31", "Index Fund", dec!(1000)),
            row("2024-01-31", "Cash", dec!(250)),
            row("2024-02-29", "Index Fund", dec!(1100)),
            row("2024-03-31", "Index Fund", dec!(1150)),
        ]
    }

    #[test]
    fn test_per_series_charts_only() {
        let charts =
            build_charts(&rows(), ChartOptions::default(), &DashboardConfig::default()).unwrap();
        assert_eq!(charts.len(), 2);
        assert!(charts.iter().all(|c| c.trend.is_none()));
        assert_eq!(charts[0].layout.height, 400);
    }

    #[test]
    fn test_trendline_only_where_fit_possible() {
        let options = ChartOptions {
            trendline: true,
            aggregates: false,
        };
        let charts = build_charts(&rows(), options, &DashboardConfig::default()).unwrap();
        // Index Fund: 3 points, Cash: 1 point
        assert!(charts[0].trend.is_some());
        assert!(charts[1].trend.is_none());
    }

    #[test]
    fn test_aggregates_appended_with_configured_cash_name() {
        let options = ChartOptions {
            trendline: true,
            aggregates: true,
        };
        let charts = build_charts(&rows(), options, &DashboardConfig::default()).unwrap();
        assert_eq!(charts.len(), 4);
        assert_eq!(charts[2].series.kind, SeriesKind::Total);
        assert_eq!(charts[2].series.points[0].amount, dec!(1250));
        assert_eq!(
            charts[3].series.kind,
            SeriesKind::TotalExcluding("Cash".to_string())
        );
        assert_eq!(charts[3].series.points[0].amount, dec!(1000));
        assert!(charts[2].trend.is_some());
        assert!(charts[3].trend.is_some());
    }

    #[test]
    fn test_aggregate_overflow_propagates() {
        let huge = Decimal::from_str_exact("50000000000000000000000000000").unwrap();
        let rows = vec![
            row("2024-01-31", "Index Fund", huge),
            row("2024-01-31", "Bonds", huge),
        ];
        let options = ChartOptions {
            trendline: false,
            aggregates: true,
        };
        assert!(build_charts(&rows, options, &DashboardConfig::default()).is_err());
        // 합계를 끄면 이름별 차트만 만들어짐
        assert_eq!(
            build_charts(&rows, ChartOptions::default(), &DashboardConfig::default())
                .unwrap()
                .len(),
            2
        );
    }

    #[test]
    fn test_empty_rows_produce_no_charts() {
        let options = ChartOptions {
            trendline: true,
            aggregates: true,
        };
        assert!(build_charts(&[], options, &DashboardConfig::default())
            .unwrap()
            .is_empty());
    }
}
