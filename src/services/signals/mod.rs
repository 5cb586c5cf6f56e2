//! Technical indicator engine.
//!
//! Each indicator computes over a normalized price series and returns samples
//! already paired with their timestamps, so callers never deal with lookback
//! offsets.

pub mod indicators;

use crate::config::EngineConfig;
use crate::services::normalizer::NormalizedSeries;
use crate::types::{IndicatorCategory, IndicatorKind, IndicatorPanel, IndicatorSeries};
use indicators::{BollingerBands, Macd, Rsi, Stochastic, VolumeBars};
use tracing::debug;

/// Trait for implementing technical indicators.
pub trait Indicator: Send + Sync {
    /// Which selectable indicator this is.
    fn kind(&self) -> IndicatorKind;

    /// Human-readable name.
    fn name(&self) -> String;

    /// Category this indicator belongs to.
    fn category(&self) -> IndicatorCategory {
        self.kind().category()
    }

    /// Minimum number of points before the first sample is produced.
    fn min_periods(&self) -> usize;

    /// Calculate timestamped samples. Short input yields an empty series.
    fn calculate(&self, series: &NormalizedSeries) -> IndicatorSeries;
}

/// Build the indicator for `kind` with periods taken from `config`.
pub fn build_indicator(kind: IndicatorKind, config: &EngineConfig) -> Box<dyn Indicator> {
    match kind {
        IndicatorKind::Rsi => Box::new(Rsi::new(config.rsi_period)),
        IndicatorKind::Macd => Box::new(Macd::new(
            config.macd_fast,
            config.macd_slow,
            config.macd_signal,
        )),
        IndicatorKind::Bollinger => Box::new(BollingerBands::new(
            config.bollinger_period,
            config.bollinger_std_dev,
        )),
        IndicatorKind::Stochastic => Box::new(Stochastic::new(config.stochastic_period)),
        IndicatorKind::Volume => Box::new(VolumeBars),
    }
}

/// Get all available indicators.
pub fn all_indicators(config: &EngineConfig) -> Vec<Box<dyn Indicator>> {
    IndicatorKind::ALL
        .iter()
        .map(|kind| build_indicator(*kind, config))
        .collect()
}

/// Compute the analysis panel for the selected indicator.
///
/// Series shorter than the configured display threshold (or the indicator's
/// own lookback, whichever is larger) report `InsufficientData`.
pub fn analyze(
    series: &NormalizedSeries,
    kind: IndicatorKind,
    config: &EngineConfig,
) -> IndicatorPanel {
    let indicator = build_indicator(kind, config);
    let required = config.min_indicator_points.max(indicator.min_periods());

    if series.len() < required {
        debug!(
            "Not enough data for {}: {} of {} points",
            indicator.name(),
            series.len(),
            required
        );
        return IndicatorPanel::InsufficientData {
            required,
            available: series.len(),
        };
    }

    let output = indicator.calculate(series);
    debug!("{} produced {} samples", indicator.name(), output.len());
    IndicatorPanel::Ready { series: output }
}

/// Pair tail-aligned indicator values with the timestamps they belong to.
pub(crate) fn tail_aligned<T, U>(times: &[i64], values: Vec<T>, sample: impl Fn(i64, T) -> U) -> Vec<U> {
    let offset = times.len().saturating_sub(values.len());
    times[offset..]
        .iter()
        .zip(values)
        .map(|(&time, value)| sample(time, value))
        .collect()
}
