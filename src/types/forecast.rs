use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Upper and lower bounds parallel to a forecast's predictions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceIntervals {
    #[serde(default)]
    pub upper: Vec<f64>,
    #[serde(default)]
    pub lower: Vec<f64>,
}

/// Point forecasts with confidence bounds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForecastSeries {
    #[serde(default)]
    pub predictions: Vec<f64>,
    #[serde(default)]
    pub confidence_intervals: ConfidenceIntervals,
}

impl ForecastSeries {
    pub fn new(predictions: Vec<f64>, upper: Vec<f64>, lower: Vec<f64>) -> Self {
        Self {
            predictions,
            confidence_intervals: ConfidenceIntervals { upper, lower },
        }
    }

    /// Number of steps where prediction and both bounds are present.
    pub fn aligned_len(&self) -> usize {
        self.predictions
            .len()
            .min(self.confidence_intervals.upper.len())
            .min(self.confidence_intervals.lower.len())
    }

    /// Whether all three sequences have the same length.
    pub fn is_consistent(&self) -> bool {
        let n = self.predictions.len();
        self.confidence_intervals.upper.len() == n && self.confidence_intervals.lower.len() == n
    }

    pub fn is_empty(&self) -> bool {
        self.predictions.is_empty()
    }
}

/// Error of one forecast step against the realised value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionError {
    pub prediction_index: usize,
    pub error_value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub predicted_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_percentage: Option<f64>,
}

impl PredictionError {
    pub fn new(prediction_index: usize, error_value: f64) -> Self {
        Self {
            prediction_index,
            error_value,
            predicted_value: None,
            actual_value: None,
            error_percentage: None,
        }
    }
}

/// Portfolio value snapshot as supplied by the portfolio API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioMetricRecord {
    pub metric_date: String,
    pub total_value: f64,
}

/// Parsed portfolio value snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PortfolioMetricPoint {
    pub metric_date: DateTime<Utc>,
    pub total_value: f64,
}
