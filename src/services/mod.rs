pub mod aligner;
pub mod dashboard;
pub mod evaluation;
pub mod normalizer;
pub mod portfolio;
pub mod scorer;
pub mod signals;

pub use aligner::SeriesAligner;
pub use dashboard::{build_dashboard, DashboardInput, DashboardView};
pub use evaluation::{
    calculate_metrics, check_degradation, detect_anomalies, error_statistics, prediction_errors,
};
pub use normalizer::{parse_timestamp, NormalizedSeries};
pub use portfolio::portfolio_statistics;
pub use scorer::overall_score;
pub use signals::indicators::price_features;
pub use signals::{all_indicators, analyze, build_indicator, Indicator};
