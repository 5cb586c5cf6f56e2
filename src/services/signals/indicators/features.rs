//! Rolling price features used as forecasting model inputs.
//!
//! Windows may start partially filled: a value is emitted once `min_periods`
//! observations are available, matching how the training features were built.

use crate::services::normalizer::NormalizedSeries;
use crate::services::signals::tail_aligned;
use crate::types::{PriceFeatures, TimeValue};

/// Offset added to the volume standard deviation so flat volume stays finite.
const ZSCORE_EPSILON: f64 = 1e-9;

/// Apply `f` over trailing windows of at most `window` values.
///
/// The first output belongs to index `min_periods - 1`.
fn rolling(values: &[f64], window: usize, min_periods: usize, f: impl Fn(&[f64]) -> f64) -> Vec<f64> {
    let min_periods = min_periods.max(1);
    if window == 0 || values.len() < min_periods {
        return Vec::new();
    }

    (min_periods - 1..values.len())
        .map(|end| {
            let start = (end + 1).saturating_sub(window);
            f(&values[start..=end])
        })
        .collect()
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Standard deviation with `ddof` degrees of freedom removed.
fn std_dev(values: &[f64], ddof: usize) -> f64 {
    let m = mean(values);
    let divisor = values.len().saturating_sub(ddof).max(1) as f64;
    (values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / divisor).sqrt()
}

/// Close-to-close percentage change, one value per bar after the first.
///
/// A zero previous close yields 0.
pub fn calculate_daily_returns(closes: &[f64]) -> Vec<f64> {
    closes
        .windows(2)
        .map(|w| if w[0] != 0.0 { w[1] / w[0] - 1.0 } else { 0.0 })
        .collect()
}

/// Moving average over partially filled windows.
pub fn calculate_rolling_mean(values: &[f64], window: usize, min_periods: usize) -> Vec<f64> {
    rolling(values, window, min_periods, mean)
}

/// Sample standard deviation over partially filled windows.
pub fn calculate_rolling_std(values: &[f64], window: usize, min_periods: usize) -> Vec<f64> {
    rolling(values, window, min_periods.max(2), |w| std_dev(w, 1))
}

/// Distance of each volume from its trailing mean in population standard deviations.
pub fn calculate_volume_zscore(volumes: &[f64], window: usize, min_periods: usize) -> Vec<f64> {
    rolling(volumes, window, min_periods, |w| {
        let current = w[w.len() - 1];
        (current - mean(w)) / (std_dev(w, 0) + ZSCORE_EPSILON)
    })
}

/// Compute the model input features over a normalized series.
///
/// Every feature is tail-aligned to the bar it describes.
pub fn price_features(series: &NormalizedSeries) -> PriceFeatures {
    let times = series.times();
    let closes = series.closes();
    let returns = calculate_daily_returns(&closes);

    let timed = |values: Vec<f64>| tail_aligned(&times, values, TimeValue::new);

    PriceFeatures {
        volatility_5d: timed(calculate_rolling_std(&returns, 5, 3)),
        daily_return: timed(returns),
        ma_5: timed(calculate_rolling_mean(&closes, 5, 3)),
        ma_10: timed(calculate_rolling_mean(&closes, 10, 5)),
        volume_zscore_5d: timed(calculate_volume_zscore(&series.volumes(), 5, 3)),
    }
}
