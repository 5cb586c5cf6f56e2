//! Forecast evaluation against realised prices.

use crate::error::{ChartError, Result};
use crate::types::{
    Anomaly, DegradationStatus, ErrorStatistics, PerformanceMetrics, PredictionError,
};
use tracing::{debug, warn};

/// Trading days used to annualize daily figures.
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Number of most recent evaluations compared against the history.
pub const DEGRADATION_WINDOW: usize = 5;

/// Recent MAPE above this many times the historical MAPE counts as degraded.
pub const DEGRADATION_RATIO_LIMIT: f64 = 1.5;

/// Default absolute MAPE ceiling for `check_degradation`.
pub const DEFAULT_DEGRADATION_MAPE: f64 = 5.0;

/// Default sigma multiplier for `detect_anomalies`.
pub const DEFAULT_ANOMALY_SIGMA: f64 = 3.0;

/// Mean and population standard deviation. `None` for an empty slice.
pub(crate) fn mean_and_std(values: &[f64]) -> Option<(f64, f64)> {
    if values.is_empty() {
        return None;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    Some((mean, variance.sqrt()))
}

/// Annualized Sharpe ratio of periodic returns, 0 when they do not vary.
pub(crate) fn annualized_sharpe(returns: &[f64]) -> f64 {
    match mean_and_std(returns) {
        Some((mean, std)) if std > 0.0 => mean / std * TRADING_DAYS_PER_YEAR.sqrt(),
        _ => 0.0,
    }
}

/// Simple returns between consecutive values. Steps from a zero value are skipped.
pub(crate) fn simple_returns(values: &[f64]) -> Vec<f64> {
    values
        .windows(2)
        .filter(|w| w[0] != 0.0)
        .map(|w| (w[1] - w[0]) / w[0])
        .collect()
}

/// Percentile of sorted values with linear interpolation between ranks.
fn percentile(sorted: &[f64], pct: f64) -> f64 {
    let rank = pct / 100.0 * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    sorted[lower] + (sorted[upper] - sorted[lower]) * (rank - lower as f64)
}

/// Compute RMSE, MAE, MAPE, MSE, directional accuracy and the Sharpe ratio
/// of the predicted path.
///
/// Pairs where either side is NaN are dropped first. MAPE skips zero actuals.
/// Directional accuracy and Sharpe ratio need at least two pairs.
pub fn calculate_metrics(actual: &[f64], predicted: &[f64]) -> PerformanceMetrics {
    let pairs: Vec<(f64, f64)> = actual
        .iter()
        .zip(predicted)
        .filter(|(a, p)| !a.is_nan() && !p.is_nan())
        .map(|(&a, &p)| (a, p))
        .collect();

    if pairs.is_empty() {
        return PerformanceMetrics::default();
    }

    let n = pairs.len() as f64;
    let mse = pairs.iter().map(|(a, p)| (a - p).powi(2)).sum::<f64>() / n;
    let mae = pairs.iter().map(|(a, p)| (a - p).abs()).sum::<f64>() / n;

    let pct_errors: Vec<f64> = pairs
        .iter()
        .filter(|(a, _)| *a != 0.0)
        .map(|(a, p)| ((a - p) / a).abs())
        .collect();
    let mape = (!pct_errors.is_empty())
        .then(|| pct_errors.iter().sum::<f64>() / pct_errors.len() as f64 * 100.0);

    let directional_accuracy = (pairs.len() >= 2).then(|| {
        let hits = pairs
            .windows(2)
            .filter(|w| (w[1].0 - w[0].0 > 0.0) == (w[1].1 - w[0].1 > 0.0))
            .count();
        hits as f64 / (pairs.len() - 1) as f64 * 100.0
    });

    let sharpe_ratio = (pairs.len() >= 2).then(|| {
        let predicted: Vec<f64> = pairs.iter().map(|(_, p)| *p).collect();
        annualized_sharpe(&simple_returns(&predicted))
    });

    PerformanceMetrics {
        rmse: Some(mse.sqrt()),
        mae: Some(mae),
        mape,
        mse: Some(mse),
        directional_accuracy,
        sharpe_ratio,
    }
}

/// Per-step absolute errors of a forecast.
pub fn prediction_errors(predictions: &[f64], actuals: &[f64]) -> Result<Vec<PredictionError>> {
    if predictions.len() != actuals.len() {
        return Err(ChartError::LengthMismatch {
            expected: predictions.len(),
            actual: actuals.len(),
        });
    }

    Ok(predictions
        .iter()
        .zip(actuals)
        .enumerate()
        .map(|(index, (&predicted, &actual))| {
            let error = (predicted - actual).abs();
            let error_pct = if actual != 0.0 {
                error / actual * 100.0
            } else {
                0.0
            };
            PredictionError {
                prediction_index: index,
                error_value: error,
                predicted_value: Some(predicted),
                actual_value: Some(actual),
                error_percentage: Some(error_pct),
            }
        })
        .collect())
}

/// Summarise the last `window` errors (all of them when `None`).
pub fn error_statistics(errors: &[PredictionError], window: Option<usize>) -> ErrorStatistics {
    let recent = match window {
        Some(size) => &errors[errors.len().saturating_sub(size)..],
        None => errors,
    };

    if recent.is_empty() {
        return ErrorStatistics::default();
    }

    let mut values: Vec<f64> = recent.iter().map(|e| e.error_value).collect();
    let n = values.len() as f64;
    let (mean, std) = mean_and_std(&values).unwrap_or_default();
    let mean_pct = recent
        .iter()
        .map(|e| e.error_percentage.unwrap_or(0.0))
        .sum::<f64>()
        / n;

    values.sort_by(f64::total_cmp);
    let mid = values.len() / 2;
    let median = if values.len() % 2 == 0 {
        (values[mid - 1] + values[mid]) / 2.0
    } else {
        values[mid]
    };

    ErrorStatistics {
        mean_error: mean,
        std_error: std,
        mean_error_pct: mean_pct,
        max_error: values[values.len() - 1],
        min_error: values[0],
        median_error: median,
        q95_error: percentile(&values, 95.0),
    }
}

/// Compare the MAPE of the last few evaluations with the earlier ones.
///
/// `history` is ordered oldest first. Evaluations without a finite MAPE are
/// ignored. With exactly one window of evaluations the history is the window
/// itself, so only the absolute threshold can trip.
pub fn check_degradation(history: &[PerformanceMetrics], threshold_mape: f64) -> DegradationStatus {
    let mapes: Vec<f64> = history
        .iter()
        .filter_map(|m| m.mape)
        .filter(|m| m.is_finite())
        .collect();

    if mapes.len() < DEGRADATION_WINDOW {
        return DegradationStatus::InsufficientData {
            evaluations: mapes.len(),
        };
    }

    let split = mapes.len() - DEGRADATION_WINDOW;
    let recent = &mapes[split..];
    let historical = if split > 0 { &mapes[..split] } else { recent };

    let recent_mape = recent.iter().sum::<f64>() / recent.len() as f64;
    let historical_mape = historical.iter().sum::<f64>() / historical.len() as f64;
    let degradation_ratio = recent_mape / (historical_mape + 1e-6);
    let threshold_exceeded = recent_mape > threshold_mape;
    let degraded = threshold_exceeded || degradation_ratio > DEGRADATION_RATIO_LIMIT;

    if degraded {
        warn!(
            "Model degraded: recent MAPE {:.2} vs historical {:.2} (ratio {:.2})",
            recent_mape, historical_mape, degradation_ratio
        );
    }

    DegradationStatus::Assessed {
        degraded,
        recent_mape,
        historical_mape,
        degradation_ratio,
        threshold_exceeded,
    }
}

/// Flag a model whose errors look anomalous.
pub fn detect_anomalies(
    stats: &ErrorStatistics,
    degradation: &DegradationStatus,
    threshold_sigma: f64,
) -> Vec<Anomaly> {
    let mut anomalies = Vec::new();

    let threshold = threshold_sigma * stats.std_error;
    if stats.mean_error > threshold {
        anomalies.push(Anomaly::HighError {
            mean_error: stats.mean_error,
            threshold,
        });
    }

    if let DegradationStatus::Assessed {
        degraded: true,
        degradation_ratio,
        ..
    } = *degradation
    {
        anomalies.push(Anomaly::PerformanceDegradation { degradation_ratio });
    }

    debug!("Detected {} anomalies", anomalies.len());
    anomalies
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AnomalySeverity;

    #[test]
    fn test_metrics_perfect_forecast() {
        let actual = [100.0, 101.0, 99.0, 102.0];
        let metrics = calculate_metrics(&actual, &actual);
        assert_eq!(metrics.rmse, Some(0.0));
        assert_eq!(metrics.mae, Some(0.0));
        assert_eq!(metrics.mape, Some(0.0));
        assert_eq!(metrics.directional_accuracy, Some(100.0));
    }

    #[test]
    fn test_metrics_values() {
        let actual = [100.0, 110.0, 105.0];
        let predicted = [102.0, 108.0, 110.0];
        let metrics = calculate_metrics(&actual, &predicted);
        // errors 2, 2, 5
        assert!((metrics.mae.unwrap() - 3.0).abs() < 1e-12);
        assert!((metrics.mse.unwrap() - 11.0).abs() < 1e-12);
        assert!((metrics.rmse.unwrap() - 11.0f64.sqrt()).abs() < 1e-12);
        // up/up hit, down/up miss
        assert_eq!(metrics.directional_accuracy, Some(50.0));
    }

    #[test]
    fn test_metrics_drop_nan_pairs() {
        let metrics = calculate_metrics(&[1.0, f64::NAN, 3.0], &[1.0, 2.0, 3.0]);
        assert_eq!(metrics.mae, Some(0.0));
    }

    #[test]
    fn test_metrics_empty() {
        assert_eq!(calculate_metrics(&[], &[]), PerformanceMetrics::default());
    }

    #[test]
    fn test_metrics_single_pair_has_no_direction() {
        let metrics = calculate_metrics(&[10.0], &[11.0]);
        assert_eq!(metrics.directional_accuracy, None);
        assert_eq!(metrics.mae, Some(1.0));
    }

    #[test]
    fn test_prediction_errors() {
        let errors = prediction_errors(&[10.0, 12.0], &[11.0, 0.0]).unwrap();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].prediction_index, 0);
        assert_eq!(errors[0].error_value, 1.0);
        assert!((errors[0].error_percentage.unwrap() - 100.0 / 11.0).abs() < 1e-12);
        assert_eq!(errors[1].error_percentage, Some(0.0));
    }

    #[test]
    fn test_prediction_errors_length_mismatch() {
        let result = prediction_errors(&[1.0, 2.0], &[1.0]);
        assert!(matches!(
            result,
            Err(ChartError::LengthMismatch { expected: 2, actual: 1 })
        ));
    }

    #[test]
    fn test_error_statistics() {
        let errors = prediction_errors(&[1.0, 2.0, 3.0, 4.0], &[2.0, 4.0, 6.0, 8.0]).unwrap();
        let stats = error_statistics(&errors, None);
        assert_eq!(stats.min_error, 1.0);
        assert_eq!(stats.max_error, 4.0);
        assert_eq!(stats.mean_error, 2.5);
        assert_eq!(stats.median_error, 2.5);
        assert_eq!(stats.mean_error_pct, 50.0);

        let recent = error_statistics(&errors, Some(1));
        assert_eq!(recent.mean_error, 4.0);
        assert_eq!(recent.std_error, 0.0);
    }

    #[test]
    fn test_error_statistics_empty() {
        assert_eq!(error_statistics(&[], Some(5)), ErrorStatistics::default());
    }

    #[test]
    fn test_metrics_sharpe_ratio() {
        // predicted returns +10%, -10%: mean 0
        let metrics = calculate_metrics(&[1.0, 1.0, 1.0], &[100.0, 110.0, 99.0]);
        assert!(metrics.sharpe_ratio.unwrap().abs() < 1e-12);

        // constant growth has zero spread
        let metrics = calculate_metrics(&[1.0, 1.0, 1.0], &[100.0, 110.0, 121.0]);
        assert_eq!(metrics.sharpe_ratio, Some(0.0));

        // returns 0.1 and 0.3: mean 0.2, std 0.1
        let metrics = calculate_metrics(&[1.0, 1.0, 1.0], &[100.0, 110.0, 143.0]);
        let expected = 2.0 * TRADING_DAYS_PER_YEAR.sqrt();
        assert!((metrics.sharpe_ratio.unwrap() - expected).abs() < 1e-9);

        assert_eq!(calculate_metrics(&[1.0], &[1.0]).sharpe_ratio, None);
    }

    #[test]
    fn test_error_statistics_q95() {
        let predictions: Vec<f64> = (0..=10).map(|i| i as f64).collect();
        let actuals = vec![0.0; 11];
        let stats = error_statistics(&prediction_errors(&predictions, &actuals).unwrap(), None);
        // rank 9.5 between 9 and 10
        assert!((stats.q95_error - 9.5).abs() < 1e-12);

        let single = error_statistics(&[PredictionError::new(0, 3.0)], None);
        assert_eq!(single.q95_error, 3.0);
    }

    fn with_mape(mape: f64) -> PerformanceMetrics {
        PerformanceMetrics {
            mape: Some(mape),
            ..PerformanceMetrics::default()
        }
    }

    #[test]
    fn test_check_degradation_insufficient_data() {
        let history: Vec<PerformanceMetrics> = (0..4).map(|_| with_mape(1.0)).collect();
        assert_eq!(
            check_degradation(&history, DEFAULT_DEGRADATION_MAPE),
            DegradationStatus::InsufficientData { evaluations: 4 }
        );

        let mut missing = history.clone();
        missing.push(PerformanceMetrics::default());
        assert!(!check_degradation(&missing, DEFAULT_DEGRADATION_MAPE).is_degraded());
    }

    #[test]
    fn test_check_degradation_stable_model() {
        let history: Vec<PerformanceMetrics> = (0..10).map(|_| with_mape(2.0)).collect();
        let status = check_degradation(&history, DEFAULT_DEGRADATION_MAPE);
        assert!(!status.is_degraded());
        let DegradationStatus::Assessed { degradation_ratio, .. } = status else {
            panic!("expected assessment");
        };
        assert!((degradation_ratio - 1.0).abs() < 1e-3);
    }

    #[test]
    fn test_check_degradation_ratio() {
        let mut history: Vec<PerformanceMetrics> = (0..5).map(|_| with_mape(1.0)).collect();
        history.extend((0..5).map(|_| with_mape(2.0)));
        let status = check_degradation(&history, DEFAULT_DEGRADATION_MAPE);
        assert!(status.is_degraded());
        assert!(matches!(
            status,
            DegradationStatus::Assessed {
                threshold_exceeded: false,
                ..
            }
        ));
    }

    #[test]
    fn test_check_degradation_threshold() {
        let history: Vec<PerformanceMetrics> = (0..5).map(|_| with_mape(6.0)).collect();
        let status = check_degradation(&history, DEFAULT_DEGRADATION_MAPE);
        assert!(matches!(
            status,
            DegradationStatus::Assessed {
                degraded: true,
                threshold_exceeded: true,
                ..
            }
        ));
    }

    #[test]
    fn test_detect_anomalies() {
        let stats = ErrorStatistics {
            mean_error: 4.0,
            std_error: 1.0,
            ..ErrorStatistics::default()
        };
        let calm = DegradationStatus::InsufficientData { evaluations: 0 };
        let anomalies = detect_anomalies(&stats, &calm, DEFAULT_ANOMALY_SIGMA);
        assert_eq!(
            anomalies,
            vec![Anomaly::HighError {
                mean_error: 4.0,
                threshold: 3.0
            }]
        );
        assert_eq!(anomalies[0].severity(), AnomalySeverity::Warning);

        let steady = ErrorStatistics {
            mean_error: 2.0,
            std_error: 1.0,
            ..ErrorStatistics::default()
        };
        let degraded = DegradationStatus::Assessed {
            degraded: true,
            recent_mape: 6.0,
            historical_mape: 2.0,
            degradation_ratio: 3.0,
            threshold_exceeded: true,
        };
        let anomalies = detect_anomalies(&steady, &degraded, DEFAULT_ANOMALY_SIGMA);
        assert_eq!(
            anomalies,
            vec![Anomaly::PerformanceDegradation {
                degradation_ratio: 3.0
            }]
        );
        assert_eq!(anomalies[0].severity(), AnomalySeverity::Critical);
    }
}
