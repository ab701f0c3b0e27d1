//! SVG 시계열 차트.
//!
//! 선+마커 형태의 데이터 트레이스와 점선 추세선을 하나의 SVG로 그립니다.
//! x축은 날짜에 비례하고 y축은 금액입니다.

use chrono::{Duration, NaiveDate};
use folio_core::{Series, SeriesKind};
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;

use crate::trend::{date_ordinal, Trendline};

const DATA_COLOR: &str = "#636efa";
const TREND_COLOR: &str = "#ef553b";
const GRID_COLOR: &str = "#e5ecf6";
const AXIS_COLOR: &str = "#444444";

const TITLE_HEIGHT: f64 = 24.0;
const Y_LABEL_GUTTER: f64 = 72.0;
const X_LABEL_GUTTER: f64 = 36.0;
const MAX_X_TICKS: i64 = 6;
const Y_TICKS: usize = 5;

/// 차트 크기와 여백.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartLayout {
    pub width: u32,
    pub height: u32,
    pub margin: u32,
}

impl Default for ChartLayout {
    fn default() -> Self {
        Self {
            width: 960,
            height: 400,
            margin: 40,
        }
    }
}

/// 차트에 겹쳐 그리는 추세선.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendOverlay {
    pub line: Trendline,
    /// 시계열 각 날짜에서의 추세값
    pub values: Vec<f64>,
}

/// 하나의 시계열 차트.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chart {
    pub title: String,
    pub series: Series,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trend: Option<TrendOverlay>,
    #[serde(skip)]
    pub layout: ChartLayout,
}

impl Chart {
    /// 시계열 종류에 맞는 제목으로 차트를 생성합니다.
    pub fn new(series: Series, layout: ChartLayout) -> Self {
        let title = match &series.kind {
            SeriesKind::Investment => format!("Total Value Over Time: {}", series.name),
            SeriesKind::Total => "Total Portfolio Value".to_string(),
            SeriesKind::TotalExcluding(excluded) => {
                format!("Total Portfolio Value (excluding {excluded})")
            }
        };
        Self {
            title,
            series,
            trend: None,
            layout,
        }
    }

    /// 추세선을 적합해 겹칩니다. 적합할 수 없으면 추세선 없이 둡니다.
    pub fn with_trendline(mut self) -> Self {
        self.trend = Trendline::fit(&self.series.points).map(|line| TrendOverlay {
            values: line.values_for(&self.series.points),
            line,
        });
        self
    }

    /// x축 레이블용 날짜 문자열 (`YYYY-MM-DD`).
    pub fn dates(&self) -> Vec<String> {
        self.series
            .points
            .iter()
            .map(|p| p.date.format("%Y-%m-%d").to_string())
            .collect()
    }

    /// y값.
    pub fn values(&self) -> Vec<f64> {
        self.series
            .points
            .iter()
            .map(|p| p.amount.to_f64().unwrap_or_default())
            .collect()
    }

    /// 제목을 포함한 HTML 조각.
    pub fn to_html(&self) -> String {
        format!(
            r#"<figure class="chart"><figcaption>{title}</figcaption>{svg}</figure>"#,
            title = escape_xml(&self.title),
            svg = self.to_svg()
        )
    }

    /// 독립 SVG 문서.
    pub fn to_svg(&self) -> String {
        let values = self.values();
        let mut svg = String::new();

        svg.push_str(&format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" role="img"><style>text{{font-family:Arial,sans-serif;font-size:11px;fill:{AXIS_COLOR}}}</style>"#,
            w = self.layout.width,
            h = self.layout.height,
        ));
        svg.push_str(&format!(
            r#"<text x="{x:.2}" y="{y:.2}" font-size="14">{title}</text>"#,
            x = f64::from(self.layout.margin) + Y_LABEL_GUTTER,
            y = f64::from(self.layout.margin) + 4.0,
            title = escape_xml(&self.title)
        ));

        let Some(span) = self.series.date_span() else {
            svg.push_str("</svg>");
            return svg;
        };
        let frame = Frame::new(self, span);

        self.draw_axes(&mut svg, &frame);

        let data: Vec<(f64, f64)> = self
            .series
            .points
            .iter()
            .zip(&values)
            .map(|(p, v)| (frame.x(p.date), frame.y(*v)))
            .collect();
        svg.push_str(&polyline(&data, DATA_COLOR, false));

        for (point, value) in self.series.points.iter().zip(&values) {
            svg.push_str(&format!(
                r#"<circle cx="{cx:.2}" cy="{cy:.2}" r="3.5" fill="{DATA_COLOR}"><title>{date}: {value}</title></circle>"#,
                cx = frame.x(point.date),
                cy = frame.y(*value),
                date = point.date.format("%Y-%m-%d"),
                value = format_amount(*value),
            ));
        }

        if let Some(trend) = &self.trend {
            let line: Vec<(f64, f64)> = self
                .series
                .points
                .iter()
                .zip(&trend.values)
                .map(|(p, v)| (frame.x(p.date), frame.y(*v)))
                .collect();
            svg.push_str(&polyline(&line, TREND_COLOR, true));
        }

        self.draw_legend(&mut svg, &frame);
        svg.push_str("</svg>");
        svg
    }

    fn draw_axes(&self, svg: &mut String, frame: &Frame) {
        for tick in y_ticks(frame.y_min, frame.y_max) {
            let y = frame.y(tick);
            svg.push_str(&format!(
                r#"<line x1="{x1:.2}" y1="{y:.2}" x2="{x2:.2}" y2="{y:.2}" stroke="{GRID_COLOR}" stroke-width="1" />"#,
                x1 = frame.left,
                x2 = frame.right,
            ));
            svg.push_str(&format!(
                r#"<text x="{x:.2}" y="{y:.2}" text-anchor="end" dominant-baseline="middle">{label}</text>"#,
                x = frame.left - 6.0,
                label = format_amount(tick),
            ));
        }

        svg.push_str(&format!(
            r#"<line x1="{x1:.2}" y1="{y:.2}" x2="{x2:.2}" y2="{y:.2}" stroke="{AXIS_COLOR}" stroke-width="1" />"#,
            x1 = frame.left,
            x2 = frame.right,
            y = frame.bottom,
        ));

        for date in x_ticks(frame.x_start, frame.x_end) {
            let x = frame.x(date);
            svg.push_str(&format!(
                r#"<line x1="{x:.2}" y1="{y1:.2}" x2="{x:.2}" y2="{y2:.2}" stroke="{AXIS_COLOR}" stroke-width="1" />"#,
                y1 = frame.bottom,
                y2 = frame.bottom + 4.0,
            ));
            svg.push_str(&format!(
                r#"<text x="{x:.2}" y="{y:.2}" text-anchor="middle">{label}</text>"#,
                y = frame.bottom + 16.0,
                label = date.format("%m-%d-%y"),
            ));
        }

        svg.push_str(&format!(
            r#"<text x="{x:.2}" y="{y:.2}" text-anchor="middle">Date</text>"#,
            x = (frame.left + frame.right) / 2.0,
            y = frame.bottom + 32.0,
        ));
        let mid_y = (frame.top + frame.bottom) / 2.0;
        svg.push_str(&format!(
            r#"<text x="{x:.2}" y="{mid_y:.2}" text-anchor="middle" transform="rotate(-90 {x:.2} {mid_y:.2})">Total Value</text>"#,
            x = f64::from(self.layout.margin) - 24.0,
        ));
    }

    fn draw_legend(&self, svg: &mut String, frame: &Frame) {
        let mut entries = vec![(self.series.name.as_str(), DATA_COLOR, false)];
        if self.trend.is_some() {
            entries.push(("Trendline", TREND_COLOR, true));
        }

        let mut y = frame.top + 4.0;
        for (label, color, dashed) in entries {
            let x = frame.right - 150.0;
            svg.push_str(&format!(
                r#"<line x1="{x:.2}" y1="{y:.2}" x2="{x2:.2}" y2="{y:.2}" stroke="{color}" stroke-width="2" stroke-dasharray="{dash}" />"#,
                x2 = x + 20.0,
                dash = if dashed { "6 4" } else { "0" },
            ));
            svg.push_str(&format!(
                r#"<text x="{x:.2}" y="{y:.2}" dominant-baseline="middle">{label}</text>"#,
                x = x + 26.0,
                label = escape_xml(label),
            ));
            y += 16.0;
        }
    }
}

/// 데이터 좌표 → 픽셀 좌표 변환.
struct Frame {
    left: f64,
    right: f64,
    top: f64,
    bottom: f64,
    x_start: NaiveDate,
    x_end: NaiveDate,
    y_min: f64,
    y_max: f64,
}

impl Frame {
    fn new(chart: &Chart, (mut x_start, mut x_end): (NaiveDate, NaiveDate)) -> Self {
        let layout = chart.layout;
        let margin = f64::from(layout.margin);

        if x_start == x_end {
            x_start -= Duration::days(1);
            x_end += Duration::days(1);
        }

        let mut values = chart.values();
        if let Some(trend) = &chart.trend {
            values.extend(trend.values.iter().copied());
        }
        let (y_min, y_max) = padded_extent(&values);

        Self {
            left: margin + Y_LABEL_GUTTER,
            right: f64::from(layout.width) - margin,
            top: margin + TITLE_HEIGHT,
            bottom: f64::from(layout.height) - margin - X_LABEL_GUTTER,
            x_start,
            x_end,
            y_min,
            y_max,
        }
    }

    fn x(&self, date: NaiveDate) -> f64 {
        let span = date_ordinal(self.x_end) - date_ordinal(self.x_start);
        let offset = date_ordinal(date) - date_ordinal(self.x_start);
        self.left + offset / span * (self.right - self.left)
    }

    fn y(&self, value: f64) -> f64 {
        let ratio = (value - self.y_min) / (self.y_max - self.y_min);
        self.bottom - ratio * (self.bottom - self.top)
    }
}

/// 5% 여백을 둔 값 범위. 값이 하나뿐이면 위아래로 넓힙니다.
fn padded_extent(values: &[f64]) -> (f64, f64) {
    let finite = values.iter().copied().filter(|v| v.is_finite());
    let (min, max) = finite.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if !min.is_finite() || !max.is_finite() {
        return (0.0, 1.0);
    }

    let span = max - min;
    if span == 0.0 {
        let pad = (min.abs() * 0.05).max(1.0);
        return (min - pad, max + pad);
    }
    (min - span * 0.05, max + span * 0.05)
}

fn y_ticks(min: f64, max: f64) -> Vec<f64> {
    let step = (max - min) / (Y_TICKS - 1) as f64;
    (0..Y_TICKS).map(|i| min + step * i as f64).collect()
}

/// 구간 양 끝을 포함해 최대 6개의 날짜 눈금.
fn x_ticks(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    let days = (end - start).num_days();
    if days <= 0 {
        return vec![start];
    }
    let count = days.min(MAX_X_TICKS - 1);
    let mut ticks: Vec<NaiveDate> = (0..=count)
        .map(|i| start + Duration::days(days * i / count))
        .collect();
    ticks.dedup();
    ticks
}

fn polyline(points: &[(f64, f64)], color: &str, dashed: bool) -> String {
    let coords = points
        .iter()
        .map(|(x, y)| format!("{x:.2},{y:.2}"))
        .collect::<Vec<_>>()
        .join(" ");
    format!(
        r#"<polyline fill="none" stroke="{color}" stroke-width="2" stroke-dasharray="{dash}" points="{coords}" />"#,
        dash = if dashed { "6 4" } else { "0" },
    )
}

/// 천 단위 구분 기호와 소수점 둘째 자리까지의 금액 표기.
pub fn format_amount(value: f64) -> String {
    let formatted = format!("{:.2}", value.abs());
    let (int_part, frac_part) = formatted
        .split_once('.')
        .unwrap_or((formatted.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && formatted != "0.00" { "-" } else { "" };
    format!("{sign}{grouped}.{frac_part}")
}

/// SVG/HTML 텍스트 이스케이프.
pub fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
