//! Technical indicator implementations.

pub mod bollinger;
pub mod ema;
pub mod features;
pub mod macd;
pub mod rsi;
pub mod stochastic;
pub mod volume;

pub use bollinger::{calculate_bollinger, BandValues, BollingerBands};
pub use ema::calculate_ema;
pub use features::{
    calculate_daily_returns, calculate_rolling_mean, calculate_rolling_std,
    calculate_volume_zscore, price_features,
};
pub use macd::{calculate_macd, Macd, MacdLines};
pub use rsi::{calculate_rsi, Rsi};
pub use stochastic::{calculate_stochastic, Stochastic};
pub use volume::VolumeBars;
