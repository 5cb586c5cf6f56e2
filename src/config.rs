use std::env;

/// Indicator and overlay configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// RSI lookback period.
    pub rsi_period: usize,
    /// MACD fast EMA period.
    pub macd_fast: usize,
    /// MACD slow EMA period.
    pub macd_slow: usize,
    /// MACD signal EMA period.
    pub macd_signal: usize,
    /// Bollinger Bands window.
    pub bollinger_period: usize,
    /// Bollinger Bands standard deviation multiplier.
    pub bollinger_std_dev: f64,
    /// Stochastic %K window.
    pub stochastic_period: usize,
    /// Minimum number of price points before any indicator is shown.
    pub min_indicator_points: usize,
    /// Spacing between synthetic forecast timestamps (seconds).
    pub forecast_step_seconds: i64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            rsi_period: 14,
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
            bollinger_period: 20,
            bollinger_std_dev: 2.0,
            stochastic_period: 14,
            min_indicator_points: 20,
            forecast_step_seconds: 3600,
        }
    }
}

impl EngineConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            rsi_period: env_or("RSI_PERIOD", defaults.rsi_period),
            macd_fast: env_or("MACD_FAST", defaults.macd_fast),
            macd_slow: env_or("MACD_SLOW", defaults.macd_slow),
            macd_signal: env_or("MACD_SIGNAL", defaults.macd_signal),
            bollinger_period: env_or("BOLLINGER_PERIOD", defaults.bollinger_period),
            bollinger_std_dev: env_or("BOLLINGER_STD_DEV", defaults.bollinger_std_dev),
            stochastic_period: env_or("STOCHASTIC_PERIOD", defaults.stochastic_period),
            min_indicator_points: env_or("MIN_INDICATOR_POINTS", defaults.min_indicator_points),
            forecast_step_seconds: env_or("FORECAST_STEP_SECONDS", defaults.forecast_step_seconds),
        }
    }
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
