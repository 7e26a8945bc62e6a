use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The least-squares line fitted over a chart's points in chronological order.
///
/// The independent variable is the point's zero-based position after sorting
/// by date, not the date itself.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendResult {
    pub slope: f64,
    pub intercept: f64,
    /// Coefficient of determination in `[0, 1]`. Reported as 0 when the
    /// values have no variance.
    pub r_squared: f64,
}

impl TrendResult {
    /// The result for a series too short to carry a trend.
    pub const fn zero() -> Self {
        Self {
            slope: 0.0,
            intercept: 0.0,
            r_squared: 0.0,
        }
    }

    /// The fitted value at a given position.
    pub fn predict(&self, position: usize) -> f64 {
        self.slope * position as f64 + self.intercept
    }

    pub fn direction(&self) -> TrendDirection {
        if self.slope > 0.0 {
            TrendDirection::Up
        } else if self.slope < 0.0 {
            TrendDirection::Down
        } else {
            TrendDirection::Flat
        }
    }
}

impl Default for TrendResult {
    fn default() -> Self {
        Self::zero()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Up,
    Down,
    Flat,
}

/// Descriptive statistics over a chart's raw values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub average: f64,
    pub earliest: NaiveDate,
    pub latest: NaiveDate,
}

/// One point of the fitted line, aligned with the data point at the same position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendLinePoint {
    pub position: usize,
    pub date: NaiveDate,
    pub value: f64,
}

/// Everything a chart detail view renders besides the raw points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartReport {
    pub trend: TrendResult,
    pub direction: TrendDirection,
    pub statistics: Option<Statistics>,
    pub trend_line: Vec<TrendLinePoint>,
}
