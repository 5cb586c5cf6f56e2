//! Relative Strength Index (RSI) indicator.

use crate::services::normalizer::NormalizedSeries;
use crate::services::signals::{tail_aligned, Indicator};
use crate::types::{IndicatorKind, IndicatorSeries, TimeValue};

/// RSI (Relative Strength Index) indicator.
///
/// Measures momentum by comparing the magnitude of recent gains to recent losses.
/// Values range from 0-100. Each sample uses a simple average of the gains and
/// losses in its window (no Wilder smoothing).
pub struct Rsi {
    period: usize,
}

impl Default for Rsi {
    fn default() -> Self {
        Self { period: 14 }
    }
}

impl Rsi {
    pub fn new(period: usize) -> Self {
        Self { period }
    }
}

/// Calculate RSI values from closing prices.
///
/// Returns `closes.len() - period` values, the last one belonging to the
/// last close. Shorter input yields no values.
pub fn calculate_rsi(closes: &[f64], period: usize) -> Vec<f64> {
    if period == 0 || closes.len() <= period {
        return Vec::new();
    }

    let (gains, losses): (Vec<f64>, Vec<f64>) = closes
        .windows(2)
        .map(|w| {
            let change = w[1] - w[0];
            (change.max(0.0), (-change).max(0.0))
        })
        .unzip();

    gains
        .windows(period)
        .zip(losses.windows(period))
        .map(|(window_gains, window_losses)| {
            let avg_gain = window_gains.iter().sum::<f64>() / period as f64;
            let avg_loss = window_losses.iter().sum::<f64>() / period as f64;

            if avg_loss == 0.0 {
                return 100.0;
            }

            let rs = avg_gain / avg_loss;
            100.0 - (100.0 / (1.0 + rs))
        })
        .collect()
}

impl Indicator for Rsi {
    fn kind(&self) -> IndicatorKind {
        IndicatorKind::Rsi
    }

    fn name(&self) -> String {
        format!("RSI ({})", self.period)
    }

    fn min_periods(&self) -> usize {
        self.period + 1
    }

    fn calculate(&self, series: &NormalizedSeries) -> IndicatorSeries {
        let values = calculate_rsi(&series.closes(), self.period);
        IndicatorSeries::Rsi(tail_aligned(&series.times(), values, TimeValue::new))
    }
}
