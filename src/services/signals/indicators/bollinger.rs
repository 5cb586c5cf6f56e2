//! Bollinger Bands indicator.

use crate::services::normalizer::NormalizedSeries;
use crate::services::signals::{tail_aligned, Indicator};
use crate::types::{BollingerSample, IndicatorKind, IndicatorSeries};

/// Bollinger Bands indicator.
///
/// Consists of:
/// - Middle band: SMA(20)
/// - Upper band: SMA + 2 * StdDev
/// - Lower band: SMA - 2 * StdDev
///
/// Standard deviation is the population form (divisor = period).
pub struct BollingerBands {
    period: usize,
    std_dev_multiplier: f64,
}

impl Default for BollingerBands {
    fn default() -> Self {
        Self {
            period: 20,
            std_dev_multiplier: 2.0,
        }
    }
}

impl BollingerBands {
    pub fn new(period: usize, std_dev_multiplier: f64) -> Self {
        Self {
            period,
            std_dev_multiplier,
        }
    }
}

/// Band values for one window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandValues {
    pub lower: f64,
    pub middle: f64,
    pub upper: f64,
}

/// Calculate standard deviation.
fn std_dev(values: &[f64], mean: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }

    let variance: f64 =
        values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// Calculate bands for every full window of `period` closes.
///
/// The multiplier's sign is ignored so that `lower <= middle <= upper` holds.
pub fn calculate_bollinger(closes: &[f64], period: usize, std_dev_multiplier: f64) -> Vec<BandValues> {
    if period == 0 || closes.len() < period {
        return Vec::new();
    }

    let multiplier = std_dev_multiplier.abs();
    closes
        .windows(period)
        .map(|window| {
            let middle = window.iter().sum::<f64>() / period as f64;
            let width = std_dev(window, middle) * multiplier;
            BandValues {
                lower: middle - width,
                middle,
                upper: middle + width,
            }
        })
        .collect()
}

impl Indicator for BollingerBands {
    fn kind(&self) -> IndicatorKind {
        IndicatorKind::Bollinger
    }

    fn name(&self) -> String {
        format!("Bollinger Bands ({}, {})", self.period, self.std_dev_multiplier)
    }

    fn min_periods(&self) -> usize {
        self.period
    }

    fn calculate(&self, series: &NormalizedSeries) -> IndicatorSeries {
        let bands = calculate_bollinger(&series.closes(), self.period, self.std_dev_multiplier);
        IndicatorSeries::Bollinger(tail_aligned(&series.times(), bands, |time, band| {
            BollingerSample {
                time,
                lower: band.lower,
                middle: band.middle,
                upper: band.upper,
            }
        }))
    }
}
