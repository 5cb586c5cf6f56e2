use serde::{Deserialize, Serialize};

/// Forecast evaluation metrics. Any field may be absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    #[serde(default)]
    pub rmse: Option<f64>,
    #[serde(default)]
    pub mae: Option<f64>,
    #[serde(default)]
    pub mape: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mse: Option<f64>,
    #[serde(default)]
    pub directional_accuracy: Option<f64>,
    /// Annualized Sharpe ratio of the predicted returns. Not scored.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sharpe_ratio: Option<f64>,
}

impl PerformanceMetrics {
    pub fn new(rmse: f64, mae: f64, mape: f64, directional_accuracy: f64) -> Self {
        Self {
            rmse: Some(rmse),
            mae: Some(mae),
            mape: Some(mape),
            mse: None,
            directional_accuracy: Some(directional_accuracy),
            sharpe_ratio: None,
        }
    }
}

/// Qualitative tier for an overall score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PerformanceLabel {
    Excellent,
    Good,
    NeedsImprovement,
}

impl PerformanceLabel {
    /// Create label from an overall score (0-100).
    pub fn from_score(score: u8) -> Self {
        match score {
            s if s >= 80 => PerformanceLabel::Excellent,
            s if s >= 60 => PerformanceLabel::Good,
            _ => PerformanceLabel::NeedsImprovement,
        }
    }

    /// Get display label.
    pub fn label(&self) -> &'static str {
        match self {
            PerformanceLabel::Excellent => "Excellent",
            PerformanceLabel::Good => "Good",
            PerformanceLabel::NeedsImprovement => "Needs Improvement",
        }
    }
}

/// Overall model score with its display tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverallScore {
    pub score: u8,
    pub label: PerformanceLabel,
}

/// Summary of per-step prediction errors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorStatistics {
    pub mean_error: f64,
    pub std_error: f64,
    pub mean_error_pct: f64,
    pub max_error: f64,
    pub min_error: f64,
    pub median_error: f64,
    pub q95_error: f64,
}

/// Outcome of comparing recent evaluations with the model's history.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DegradationStatus {
    InsufficientData {
        evaluations: usize,
    },
    Assessed {
        degraded: bool,
        recent_mape: f64,
        historical_mape: f64,
        degradation_ratio: f64,
        threshold_exceeded: bool,
    },
}

impl DegradationStatus {
    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Assessed { degraded: true, .. })
    }
}

/// How urgently an anomaly needs attention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnomalySeverity {
    Warning,
    Critical,
}

/// Model behaviour that warrants an alert.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Anomaly {
    /// Mean error sits above `sigma` standard deviations.
    HighError { mean_error: f64, threshold: f64 },
    PerformanceDegradation { degradation_ratio: f64 },
}

impl Anomaly {
    pub fn severity(&self) -> AnomalySeverity {
        match self {
            Self::HighError { .. } => AnomalySeverity::Warning,
            Self::PerformanceDegradation { .. } => AnomalySeverity::Critical,
        }
    }
}

/// Risk and return figures over a portfolio value history.
///
/// Percentages are in percent; `max_drawdown` is zero or negative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioStatistics {
    pub total_return: f64,
    pub sharpe_ratio: f64,
    pub volatility: f64,
    pub max_drawdown: f64,
}
