use crate::report::{ChartReport, Statistics, TrendLinePoint, TrendResult};
use core_types::Observation;

/// A stateless calculator for deriving trend and summary metrics from a chart's points.
#[derive(Debug, Default, Clone, Copy)]
pub struct TrendEngine {}

impl TrendEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fits an ordinary least-squares line through the observations.
    ///
    /// The observations are ordered by date (ties keep their input order) and
    /// each one is placed at its zero-based rank on the x axis. Fewer than two
    /// observations yield an all-zero result.
    ///
    /// Values must be finite; non-finite input propagates as NaN.
    pub fn compute_trend<T: Observation>(&self, points: &[T]) -> TrendResult {
        if points.len() < 2 {
            return TrendResult::zero();
        }
        trend_of(&sort_by_date(points))
    }

    /// Summarizes the raw values and the date span of the observations.
    ///
    /// Returns `None` for an empty series.
    pub fn summarize<T: Observation>(&self, points: &[T]) -> Option<Statistics> {
        statistics_of(points, &sort_by_date(points))
    }

    /// The fitted value for every observation, in chronological order.
    ///
    /// Empty when the series is too short to carry a trend.
    pub fn trend_line<T: Observation>(&self, points: &[T]) -> Vec<TrendLinePoint> {
        let sorted = sort_by_date(points);
        line_of(&sorted, &trend_of(&sorted))
    }

    /// Computes the trend, the statistics and the trend line from a single
    /// date-ordered view of the data.
    pub fn report<T: Observation>(&self, points: &[T]) -> ChartReport {
        let sorted = sort_by_date(points);
        let trend = trend_of(&sorted);
        let statistics = statistics_of(points, &sorted);
        let trend_line = line_of(&sorted, &trend);

        tracing::trace!(
            points = points.len(),
            slope = trend.slope,
            r_squared = trend.r_squared,
            "Computed chart report."
        );

        ChartReport {
            trend,
            direction: trend.direction(),
            statistics,
            trend_line,
        }
    }
}

/// Orders observations by date. `sort_by_key` is stable, so equal dates keep
/// their input order.
fn sort_by_date<T: Observation>(points: &[T]) -> Vec<&T> {
    let mut sorted: Vec<&T> = points.iter().collect();
    sorted.sort_by_key(|p| p.date());
    sorted
}

fn trend_of<T: Observation>(sorted: &[&T]) -> TrendResult {
    if sorted.len() < 2 {
        return TrendResult::zero();
    }
    let values: Vec<f64> = sorted.iter().map(|p| p.value()).collect();
    fit(&values)
}

/// Min, max and average fold over `points` as given; the date span comes
/// from `sorted`.
fn statistics_of<T: Observation>(points: &[T], sorted: &[&T]) -> Option<Statistics> {
    let first = sorted.first()?;
    let last = sorted.last()?;

    let (min, max, sum) = points.iter().map(|p| p.value()).fold(
        (f64::INFINITY, f64::NEG_INFINITY, 0.0),
        |(min, max, sum), v| (min.min(v), max.max(v), sum + v),
    );

    Some(Statistics {
        count: points.len(),
        min,
        max,
        average: sum / points.len() as f64,
        earliest: first.date(),
        latest: last.date(),
    })
}

fn line_of<T: Observation>(sorted: &[&T], trend: &TrendResult) -> Vec<TrendLinePoint> {
    if sorted.len() < 2 {
        return Vec::new();
    }
    sorted
        .iter()
        .enumerate()
        .map(|(position, point)| TrendLinePoint {
            position,
            date: point.date(),
            value: trend.predict(position),
        })
        .collect()
}

/// Least-squares fit of `values` against their indices `0..n`.
fn fit(values: &[f64]) -> TrendResult {
    let n = values.len() as f64;
    let x_mean = (0..values.len()).map(|i| i as f64).sum::<f64>() / n;
    let y_mean = values.iter().sum::<f64>() / n;

    let mut numerator = 0.0;
    let mut denominator = 0.0;
    for (i, &y) in values.iter().enumerate() {
        let dx = i as f64 - x_mean;
        numerator += dx * (y - y_mean);
        denominator += dx * dx;
    }

    let slope = if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    };
    let intercept = y_mean - slope * x_mean;

    let mut total_sum_squares = 0.0;
    let mut residual_sum_squares = 0.0;
    for (i, &y) in values.iter().enumerate() {
        let predicted = slope * i as f64 + intercept;
        total_sum_squares += (y - y_mean) * (y - y_mean);
        residual_sum_squares += (y - predicted) * (y - predicted);
    }

    // Flat data has no variance to explain; report 0 rather than NaN.
    let r_squared = if total_sum_squares == 0.0 {
        0.0
    } else {
        (1.0 - residual_sum_squares / total_sum_squares).clamp(0.0, 1.0)
    };

    TrendResult {
        slope,
        intercept,
        r_squared,
    }
}
