//! 최소제곱 추세선.
//!
//! x축은 날짜의 서수(0001-01-01 = 1), y축은 금액입니다.

use chrono::{Datelike, NaiveDate};
use folio_core::SeriesPoint;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

/// 날짜를 그레고리력 서수로 변환합니다.
pub fn date_ordinal(date: NaiveDate) -> f64 {
    f64::from(date.num_days_from_ce())
}

/// `amount = slope * ordinal + intercept` 형태의 선형 추세.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Trendline {
    /// 일당 변화량
    pub slope: f64,
    /// 서수 0에서의 절편
    pub intercept: f64,
}

impl Trendline {
    /// 포인트에 최소제곱 직선을 적합합니다.
    ///
    /// 포인트가 2개 미만이거나 모든 날짜가 같으면 `None`.
    pub fn fit(points: &[SeriesPoint]) -> Option<Self> {
        if points.len() < 2 {
            return None;
        }

        let xs: Vec<f64> = points.iter().map(|p| date_ordinal(p.date)).collect();
        let ys: Vec<f64> = points
            .iter()
            .map(|p| p.amount.to_f64())
            .collect::<Option<_>>()?;

        let n = xs.len() as f64;
        let x_mean = xs.iter().sum::<f64>() / n;
        let y_mean = ys.iter().sum::<f64>() / n;

        let (num, den) = xs
            .iter()
            .zip(&ys)
            .fold((0.0, 0.0), |(num, den), (x, y)| {
                let dx = x - x_mean;
                (num + dx * (y - y_mean), den + dx * dx)
            });

        if den <= 0.0 || !den.is_finite() {
            return None;
        }

        let slope = num / den;
        Some(Self {
            slope,
            intercept: y_mean - slope * x_mean,
        })
    }

    /// 날짜의 추세값.
    pub fn value_at(&self, date: NaiveDate) -> f64 {
        self.slope * date_ordinal(date) + self.intercept
    }

    /// 각 포인트 날짜의 추세값.
    pub fn values_for(&self, points: &[SeriesPoint]) -> Vec<f64> {
        points.iter().map(|p| self.value_at(p.date)).collect()
    }
}
