//! Stochastic Oscillator indicator.

use crate::services::normalizer::NormalizedSeries;
use crate::services::signals::{tail_aligned, Indicator};
use crate::types::{IndicatorKind, IndicatorSeries, TimeValue};

/// Value reported when a window has no high-low range.
pub const FLAT_WINDOW_K: f64 = 50.0;

/// Stochastic Oscillator.
///
/// Compares closing price to price range over a period:
/// %K = (Current Close - Lowest Low) / (Highest High - Lowest Low) * 100
pub struct Stochastic {
    k_period: usize,
}

impl Default for Stochastic {
    fn default() -> Self {
        Self { k_period: 14 }
    }
}

impl Stochastic {
    pub fn new(k_period: usize) -> Self {
        Self { k_period }
    }
}

/// Calculate %K for every full window.
///
/// A window whose highest high equals its lowest low yields [`FLAT_WINDOW_K`].
pub fn calculate_stochastic(highs: &[f64], lows: &[f64], closes: &[f64], period: usize) -> Vec<f64> {
    let len = highs.len().min(lows.len()).min(closes.len());
    if period == 0 || len < period {
        return Vec::new();
    }

    ((period - 1)..len)
        .map(|i| {
            let start = i + 1 - period;
            let lowest_low = lows[start..=i].iter().copied().fold(f64::INFINITY, f64::min);
            let highest_high = highs[start..=i]
                .iter()
                .copied()
                .fold(f64::NEG_INFINITY, f64::max);

            if highest_high != lowest_low {
                ((closes[i] - lowest_low) / (highest_high - lowest_low)) * 100.0
            } else {
                FLAT_WINDOW_K
            }
        })
        .collect()
}

impl Indicator for Stochastic {
    fn kind(&self) -> IndicatorKind {
        IndicatorKind::Stochastic
    }

    fn name(&self) -> String {
        format!("Stochastic %K ({})", self.k_period)
    }

    fn min_periods(&self) -> usize {
        self.k_period
    }

    fn calculate(&self, series: &NormalizedSeries) -> IndicatorSeries {
        let values = calculate_stochastic(
            &series.highs(),
            &series.lows(),
            &series.closes(),
            self.k_period,
        );
        IndicatorSeries::Stochastic(tail_aligned(&series.times(), values, TimeValue::new))
    }
}
