//! MACD (Moving Average Convergence Divergence) indicator.

use super::ema::calculate_ema;
use crate::services::normalizer::NormalizedSeries;
use crate::services::signals::{tail_aligned, Indicator};
use crate::types::{IndicatorKind, IndicatorSeries, MacdSample};

/// MACD indicator.
///
/// Shows the relationship between two EMAs:
/// - MACD Line = EMA(12) - EMA(26)
/// - Signal Line = EMA(9) of MACD Line
/// - Histogram = MACD Line - Signal Line
pub struct Macd {
    fast_period: usize,
    slow_period: usize,
    signal_period: usize,
}

impl Default for Macd {
    fn default() -> Self {
        Self {
            fast_period: 12,
            slow_period: 26,
            signal_period: 9,
        }
    }
}

impl Macd {
    pub fn new(fast_period: usize, slow_period: usize, signal_period: usize) -> Self {
        Self {
            fast_period,
            slow_period,
            signal_period,
        }
    }
}

/// The three MACD lines, each as long as the input.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MacdLines {
    pub macd: Vec<f64>,
    pub signal: Vec<f64>,
    pub histogram: Vec<f64>,
}

/// Calculate MACD, signal and histogram lines.
///
/// Both EMAs are seeded from the first close, so no values are dropped.
pub fn calculate_macd(closes: &[f64], fast: usize, slow: usize, signal: usize) -> MacdLines {
    let fast_ema = calculate_ema(closes, fast);
    let slow_ema = calculate_ema(closes, slow);

    let macd: Vec<f64> = fast_ema
        .iter()
        .zip(slow_ema.iter())
        .map(|(f, s)| f - s)
        .collect();

    let signal_line = calculate_ema(&macd, signal);
    let histogram = macd
        .iter()
        .zip(signal_line.iter())
        .map(|(m, s)| m - s)
        .collect();

    MacdLines {
        macd,
        signal: signal_line,
        histogram,
    }
}

impl Indicator for Macd {
    fn kind(&self) -> IndicatorKind {
        IndicatorKind::Macd
    }

    fn name(&self) -> String {
        format!(
            "MACD ({}, {}, {})",
            self.fast_period, self.slow_period, self.signal_period
        )
    }

    fn min_periods(&self) -> usize {
        1
    }

    fn calculate(&self, series: &NormalizedSeries) -> IndicatorSeries {
        let lines = calculate_macd(
            &series.closes(),
            self.fast_period,
            self.slow_period,
            self.signal_period,
        );

        let triples: Vec<(f64, f64, f64)> = lines
            .macd
            .into_iter()
            .zip(lines.signal)
            .zip(lines.histogram)
            .map(|((m, s), h)| (m, s, h))
            .collect();

        IndicatorSeries::Macd(tail_aligned(
            &series.times(),
            triples,
            |time, (macd, signal, histogram)| MacdSample {
                time,
                macd,
                signal,
                histogram,
            },
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wave(count: usize) -> Vec<f64> {
        (0..count)
            .map(|i| 100.0 + (i as f64 * 0.3).sin() * 5.0 + i as f64 * 0.1)
            .collect()
    }

    #[test]
    fn test_macd_name() {
        assert_eq!(Macd::default().name(), "MACD (12, 26, 9)");
    }

    #[test]
    fn test_macd_lengths_match_input() {
        let closes = wave(60);
        let lines = calculate_macd(&closes, 12, 26, 9);
        assert_eq!(lines.macd.len(), 60);
        assert_eq!(lines.signal.len(), 60);
        assert_eq!(lines.histogram.len(), 60);
    }

    #[test]
    fn test_macd_histogram_is_difference() {
        let lines = calculate_macd(&wave(80), 12, 26, 9);
        for i in 0..lines.macd.len() {
            assert_eq!(lines.histogram[i], lines.macd[i] - lines.signal[i]);
        }
    }

    #[test]
    fn test_macd_starts_at_zero() {
        let lines = calculate_macd(&wave(10), 12, 26, 9);
        assert_eq!(lines.macd[0], 0.0);
        assert_eq!(lines.signal[0], 0.0);
        assert_eq!(lines.histogram[0], 0.0);
    }

    #[test]
    fn test_macd_empty_input() {
        let lines = calculate_macd(&[], 12, 26, 9);
        assert!(lines.macd.is_empty());
        assert!(lines.histogram.is_empty());
    }

    #[test]
    fn test_macd_positive_in_uptrend() {
        let closes: Vec<f64> = (0..60).map(|i| 100.0 + i as f64 * 2.0).collect();
        let lines = calculate_macd(&closes, 12, 26, 9);
        assert!(*lines.macd.last().unwrap() > 0.0);
    }
}
