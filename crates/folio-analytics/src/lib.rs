//! 시계열 분석 및 차트 렌더링.
//!
//! 이 크레이트는 다음을 제공합니다:
//! - 상품별 시계열 구성과 합계 시계열 ([`series`])
//! - 최소제곱 추세선 ([`trend`])
//! - SVG 차트 ([`chart`])
//! - 대시보드 차트 묶음 생성 ([`report`])

pub mod chart;
pub mod report;
pub mod series;
pub mod trend;

pub use chart::{escape_xml, Chart, ChartLayout, TrendOverlay};
pub use report::{build_charts, ChartOptions};
pub use series::{group_by_name, total_excluding_series, total_series};
pub use trend::{date_ordinal, Trendline};
