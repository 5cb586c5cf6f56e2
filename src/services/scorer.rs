//! Overall model performance score.

use crate::types::{OverallScore, PerformanceLabel, PerformanceMetrics};

/// Points for a metric in the best bucket.
const EXCELLENT_POINTS: u8 = 25;
/// Points for a metric in the middle bucket.
const GOOD_POINTS: u8 = 15;
/// Points for a metric in the worst bucket.
const POOR_POINTS: u8 = 5;

/// Bucket for a metric where lower is better.
fn lower_is_better(value: f64, excellent_below: f64, good_below: f64) -> u8 {
    if value < excellent_below {
        EXCELLENT_POINTS
    } else if value < good_below {
        GOOD_POINTS
    } else {
        POOR_POINTS
    }
}

/// Bucket for a metric where higher is better.
fn higher_is_better(value: f64, excellent_above: f64, good_above: f64) -> u8 {
    if value > excellent_above {
        EXCELLENT_POINTS
    } else if value > good_above {
        GOOD_POINTS
    } else {
        POOR_POINTS
    }
}

fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

/// Score the four metrics into 20..=100, in steps of 5.
///
/// Returns `None` unless RMSE, MAE, MAPE and directional accuracy are all
/// present and finite.
pub fn overall_score(metrics: &PerformanceMetrics) -> Option<u8> {
    let rmse = finite(metrics.rmse)?;
    let mae = finite(metrics.mae)?;
    let mape = finite(metrics.mape)?;
    let directional = finite(metrics.directional_accuracy)?;

    Some(
        lower_is_better(rmse, 2.0, 5.0)
            + lower_is_better(mae, 1.5, 3.0)
            + lower_is_better(mape, 2.0, 5.0)
            + higher_is_better(directional, 65.0, 55.0),
    )
}

/// Score plus its qualitative label.
pub fn evaluate(metrics: &PerformanceMetrics) -> Option<OverallScore> {
    overall_score(metrics).map(|score| OverallScore {
        score,
        label: PerformanceLabel::from_score(score),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_excellent() {
        let metrics = PerformanceMetrics::new(1.5, 1.0, 1.5, 70.0);
        let result = evaluate(&metrics).unwrap();
        assert_eq!(result.score, 100);
        assert_eq!(result.label, PerformanceLabel::Excellent);
    }

    #[test]
    fn test_all_poor() {
        let metrics = PerformanceMetrics::new(6.0, 4.0, 6.0, 50.0);
        let result = evaluate(&metrics).unwrap();
        assert_eq!(result.score, 20);
        assert_eq!(result.label.label(), "Needs Improvement");
    }

    #[test]
    fn test_all_good() {
        let metrics = PerformanceMetrics::new(3.0, 2.0, 3.0, 60.0);
        assert_eq!(overall_score(&metrics), Some(60));
        assert_eq!(PerformanceLabel::from_score(60), PerformanceLabel::Good);
    }

    #[test]
    fn test_thresholds_are_strict() {
        // Exactly on a threshold falls into the lower bucket
        let metrics = PerformanceMetrics::new(2.0, 1.5, 5.0, 65.0);
        assert_eq!(overall_score(&metrics), Some(15 + 15 + 5 + 15));
    }

    #[test]
    fn test_missing_metric_is_none() {
        let mut metrics = PerformanceMetrics::new(1.0, 1.0, 1.0, 70.0);
        metrics.mape = None;
        assert_eq!(overall_score(&metrics), None);
        assert_eq!(evaluate(&PerformanceMetrics::default()), None);
    }

    #[test]
    fn test_non_finite_metric_is_none() {
        let metrics = PerformanceMetrics::new(f64::NAN, 1.0, 1.0, 70.0);
        assert_eq!(overall_score(&metrics), None);
    }

    #[test]
    fn test_score_range() {
        let samples = [0.0, 1.0, 1.5, 2.0, 3.0, 4.9, 5.0, 55.0, 60.0, 65.0, 80.0, 1e6];
        for rmse in samples {
            for mae in samples {
                for mape in samples {
                    for da in samples {
                        let score = overall_score(&PerformanceMetrics::new(rmse, mae, mape, da)).unwrap();
                        assert!((20..=100).contains(&score));
                        assert_eq!(score % 5, 0);
                    }
                }
            }
        }
    }
}
