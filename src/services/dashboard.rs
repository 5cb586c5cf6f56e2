//! One-shot pipeline from API payloads to render-ready dashboard data.

use crate::config::EngineConfig;
use crate::error::Result;
use crate::services::aligner::SeriesAligner;
use crate::services::normalizer::{parse_portfolio_metrics, NormalizedSeries};
use crate::services::{portfolio, scorer, signals};
use crate::types::{
    ChartOverlay, ForecastSeries, IndicatorKind, IndicatorPanel, OverallScore, PerformanceMetrics,
    PortfolioMetricRecord, PortfolioStatistics, PredictionError, PriceRecord,
};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::debug;

/// Everything the dashboard receives from upstream services.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardInput {
    #[serde(default)]
    pub prices: Vec<PriceRecord>,
    #[serde(default)]
    pub forecast: Option<ForecastSeries>,
    #[serde(default)]
    pub prediction_errors: Vec<PredictionError>,
    #[serde(default)]
    pub portfolio_metrics: Vec<PortfolioMetricRecord>,
    #[serde(default)]
    pub metrics: Option<PerformanceMetrics>,
    #[serde(default)]
    pub indicator: IndicatorKind,
}

impl DashboardInput {
    /// Parse a JSON payload from any reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Load a JSON payload from a file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }
}

/// Render-ready dashboard data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub chart: ChartOverlay,
    pub indicator: IndicatorPanel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub performance: Option<OverallScore>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub portfolio_stats: Option<PortfolioStatistics>,
}

/// Parse, normalize, align, analyze and score in one pass.
///
/// Only price records are parsed strictly. Unparseable portfolio snapshots are
/// dropped so the remaining overlays still render.
pub fn build_dashboard(input: &DashboardInput, config: &EngineConfig) -> Result<DashboardView> {
    let series = NormalizedSeries::from_records(&input.prices)?;
    let snapshots = parse_portfolio_metrics(&input.portfolio_metrics);

    let chart = SeriesAligner::from_config(config).align(
        &series,
        input.forecast.as_ref(),
        &input.prediction_errors,
        &snapshots,
    );
    let indicator = signals::analyze(&series, input.indicator, config);
    let performance = input.metrics.as_ref().and_then(scorer::evaluate);
    let portfolio_stats =
        (!snapshots.is_empty()).then(|| portfolio::portfolio_statistics(&snapshots));

    debug!(
        "Dashboard built from {} price records ({} unique bars)",
        input.prices.len(),
        series.len()
    );

    Ok(DashboardView {
        chart,
        indicator,
        performance,
        portfolio_stats,
    })
}
