//! Portfolio performance over a value history.

use crate::services::evaluation::{annualized_sharpe, mean_and_std, simple_returns, TRADING_DAYS_PER_YEAR};
use crate::types::{PortfolioMetricPoint, PortfolioStatistics};
use tracing::debug;

/// Compute return, Sharpe ratio, volatility and max drawdown.
///
/// Snapshots are ordered by date first. Fewer than two snapshots give all
/// zeros. Drawdown is measured on cumulative summed returns, so it is a
/// negative percentage (or zero).
pub fn portfolio_statistics(history: &[PortfolioMetricPoint]) -> PortfolioStatistics {
    let mut ordered = history.to_vec();
    ordered.sort_by_key(|p| p.metric_date);
    let values: Vec<f64> = ordered.iter().map(|p| p.total_value).collect();

    let returns = simple_returns(&values);
    if returns.is_empty() {
        return PortfolioStatistics::default();
    }

    let first = values[0];
    let last = values[values.len() - 1];
    let total_return = if first != 0.0 {
        (last - first) / first * 100.0
    } else {
        0.0
    };

    let (_, std) = mean_and_std(&returns).unwrap_or_default();

    let mut cumulative = 0.0;
    let mut peak = f64::NEG_INFINITY;
    let mut max_drawdown = 0.0_f64;
    for r in &returns {
        cumulative += r;
        peak = peak.max(cumulative);
        max_drawdown = max_drawdown.min(cumulative - peak);
    }

    let stats = PortfolioStatistics {
        total_return,
        sharpe_ratio: annualized_sharpe(&returns),
        volatility: std * TRADING_DAYS_PER_YEAR.sqrt() * 100.0,
        max_drawdown: max_drawdown * 100.0,
    };
    debug!("Portfolio statistics over {} snapshots: {:?}", values.len(), stats);
    stats
}
