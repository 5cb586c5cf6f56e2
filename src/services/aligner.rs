//! Multi-series alignment onto the price chart's time axis.
//!
//! Every output is keyed by epoch seconds, deduplicated (last value wins) and
//! sorted ascending. Optional overlays that cannot be placed are left empty.

use crate::config::EngineConfig;
use crate::services::normalizer::NormalizedSeries;
use crate::types::{
    CandlePoint, ChartOverlay, ForecastSeries, PortfolioMetricPoint, PredictionError, TimeValue,
    VolumeBar,
};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Default spacing between forecast steps (one hour).
pub const DEFAULT_FORECAST_STEP_SECONDS: i64 = 3600;

/// Places forecasts, errors and portfolio values on the price time axis.
#[derive(Debug, Clone, Copy)]
pub struct SeriesAligner {
    forecast_step_seconds: i64,
}

impl Default for SeriesAligner {
    fn default() -> Self {
        Self {
            forecast_step_seconds: DEFAULT_FORECAST_STEP_SECONDS,
        }
    }
}

impl SeriesAligner {
    pub fn new(forecast_step_seconds: i64) -> Self {
        Self {
            forecast_step_seconds,
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.forecast_step_seconds)
    }

    /// Synthetic time of forecast step `index` (0-based) after `last_time`.
    pub fn forecast_time(&self, last_time: i64, index: usize) -> i64 {
        let steps = i64::try_from(index).unwrap_or(i64::MAX).saturating_add(1);
        last_time.saturating_add(steps.saturating_mul(self.forecast_step_seconds))
    }

    /// Build all render-ready series.
    pub fn align(
        &self,
        series: &NormalizedSeries,
        forecast: Option<&ForecastSeries>,
        errors: &[PredictionError],
        portfolio: &[PortfolioMetricPoint],
    ) -> ChartOverlay {
        let (forecast_line, confidence_band) = match forecast {
            Some(forecast) => (
                self.forecast_line(series, forecast),
                self.confidence_band(series, forecast),
            ),
            None => (Vec::new(), Vec::new()),
        };

        let overlay = ChartOverlay {
            candles: candles(series),
            volume: volume_bars(series),
            forecast: forecast_line,
            confidence_band,
            errors: self.error_overlay(series, errors),
            portfolio: portfolio_line(series, portfolio),
        };

        debug!(
            "Aligned {} candles, {} forecast, {} band, {} error, {} portfolio points",
            overlay.candles.len(),
            overlay.forecast.len(),
            overlay.confidence_band.len(),
            overlay.errors.len(),
            overlay.portfolio.len()
        );

        overlay
    }

    /// Point forecasts placed after the last price bar.
    pub fn forecast_line(&self, series: &NormalizedSeries, forecast: &ForecastSeries) -> Vec<TimeValue> {
        let Some(last_time) = series.last_time() else {
            return Vec::new();
        };

        let steps = usable_steps(forecast);
        dedup_by_time(
            forecast.predictions[..steps]
                .iter()
                .enumerate()
                .map(|(i, &value)| TimeValue::new(self.forecast_time(last_time, i), value)),
        )
    }

    /// Closed band polygon: upper bound ascending, then lower bound descending.
    ///
    /// Each half is deduplicated on its own since upper and lower points
    /// share timestamps.
    pub fn confidence_band(&self, series: &NormalizedSeries, forecast: &ForecastSeries) -> Vec<TimeValue> {
        let Some(last_time) = series.last_time() else {
            return Vec::new();
        };

        let steps = usable_steps(forecast);
        let place = |bound: &[f64]| {
            dedup_by_time(
                bound[..steps]
                    .iter()
                    .enumerate()
                    .map(|(i, &value)| TimeValue::new(self.forecast_time(last_time, i), value)),
            )
        };

        let mut band = place(&forecast.confidence_intervals.upper);
        let lower = place(&forecast.confidence_intervals.lower);
        band.extend(lower.into_iter().rev());
        band
    }

    /// Prediction errors placed at their forecast step's time.
    pub fn error_overlay(&self, series: &NormalizedSeries, errors: &[PredictionError]) -> Vec<TimeValue> {
        let Some(last_time) = series.last_time() else {
            return Vec::new();
        };

        dedup_by_time(errors.iter().map(|e| {
            TimeValue::new(self.forecast_time(last_time, e.prediction_index), e.error_value)
        }))
    }
}

/// Candlesticks, one per price bar.
pub fn candles(series: &NormalizedSeries) -> Vec<CandlePoint> {
    series.points().iter().map(CandlePoint::from).collect()
}

/// Volume bars, one per price bar.
pub fn volume_bars(series: &NormalizedSeries) -> Vec<VolumeBar> {
    series.points().iter().map(VolumeBar::from).collect()
}

/// Portfolio values snapped to the nearest price bar.
///
/// Skipped entirely when there is no price series.
pub fn portfolio_line(series: &NormalizedSeries, portfolio: &[PortfolioMetricPoint]) -> Vec<TimeValue> {
    if series.is_empty() {
        return Vec::new();
    }

    dedup_by_time(portfolio.iter().filter_map(|metric| {
        series
            .nearest(metric.metric_date)
            .map(|point| TimeValue::new(point.time_key(), metric.total_value))
    }))
}

/// Sort by time and keep the last value seen for each time.
pub fn dedup_by_time<I>(points: I) -> Vec<TimeValue>
where
    I: IntoIterator<Item = TimeValue>,
{
    let mut by_time: BTreeMap<i64, f64> = BTreeMap::new();
    for point in points {
        by_time.insert(point.time, point.value);
    }
    by_time
        .into_iter()
        .map(|(time, value)| TimeValue::new(time, value))
        .collect()
}

fn usable_steps(forecast: &ForecastSeries) -> usize {
    if !forecast.is_consistent() {
        warn!(
            "Forecast lengths disagree (predictions {}, upper {}, lower {}); using first {}",
            forecast.predictions.len(),
            forecast.confidence_intervals.upper.len(),
            forecast.confidence_intervals.lower.len(),
            forecast.aligned_len()
        );
    }
    forecast.aligned_len()
}
