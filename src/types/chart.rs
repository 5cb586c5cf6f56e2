use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One OHLCV observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    #[serde(default)]
    pub volume: f64,
}

impl PricePoint {
    /// Canonical time key (whole epoch seconds, sub-second precision truncated).
    pub fn time_key(&self) -> i64 {
        self.timestamp.timestamp()
    }

    /// Whether the bar closed at or above its open.
    pub fn is_up(&self) -> bool {
        self.close >= self.open
    }
}

/// Price record as supplied by the data API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceRecord {
    pub date: String,
    pub open_price: f64,
    pub high_price: f64,
    pub low_price: f64,
    pub close_price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<f64>,
}

/// A single (time, value) sample on the shared chart axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeValue {
    pub time: i64,
    pub value: f64,
}

impl TimeValue {
    pub fn new(time: i64, value: f64) -> Self {
        Self { time, value }
    }
}

/// Candlestick sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CandlePoint {
    pub time: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl From<&PricePoint> for CandlePoint {
    fn from(point: &PricePoint) -> Self {
        Self {
            time: point.time_key(),
            open: point.open,
            high: point.high,
            low: point.low,
            close: point.close,
        }
    }
}

/// Color of a volume bar, following the candle direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VolumeColor {
    Up,
    Down,
}

/// Volume histogram sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VolumeBar {
    pub time: i64,
    pub value: f64,
    pub color: VolumeColor,
}

impl From<&PricePoint> for VolumeBar {
    fn from(point: &PricePoint) -> Self {
        Self {
            time: point.time_key(),
            value: point.volume,
            color: if point.is_up() {
                VolumeColor::Up
            } else {
                VolumeColor::Down
            },
        }
    }
}

/// Render-ready series for the price and forecast chart.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOverlay {
    pub candles: Vec<CandlePoint>,
    pub volume: Vec<VolumeBar>,
    pub forecast: Vec<TimeValue>,
    /// Upper bound ascending, then lower bound descending.
    pub confidence_band: Vec<TimeValue>,
    pub errors: Vec<TimeValue>,
    pub portfolio: Vec<TimeValue>,
}

impl ChartOverlay {
    /// True when there is nothing to draw.
    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
            && self.volume.is_empty()
            && self.forecast.is_empty()
            && self.confidence_band.is_empty()
            && self.errors.is_empty()
            && self.portfolio.is_empty()
    }
}
