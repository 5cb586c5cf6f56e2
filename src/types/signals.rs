use super::chart::{TimeValue, VolumeBar};
use serde::{Deserialize, Serialize};

/// Technical indicator selectable for the analysis panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorKind {
    #[default]
    Rsi,
    Macd,
    Bollinger,
    Stochastic,
    Volume,
}

impl IndicatorKind {
    /// All selectable indicators, in menu order.
    pub const ALL: [IndicatorKind; 5] = [
        IndicatorKind::Rsi,
        IndicatorKind::Macd,
        IndicatorKind::Bollinger,
        IndicatorKind::Stochastic,
        IndicatorKind::Volume,
    ];

    /// Parse from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "rsi" => Some(Self::Rsi),
            "macd" => Some(Self::Macd),
            "bollinger" | "bollinger_bands" | "bb" => Some(Self::Bollinger),
            "stochastic" | "stoch" => Some(Self::Stochastic),
            "volume" => Some(Self::Volume),
            _ => None,
        }
    }

    /// Get the identifier used on the wire.
    pub fn id(&self) -> &'static str {
        match self {
            Self::Rsi => "rsi",
            Self::Macd => "macd",
            Self::Bollinger => "bollinger",
            Self::Stochastic => "stochastic",
            Self::Volume => "volume",
        }
    }

    /// Get the category this indicator belongs to.
    pub fn category(&self) -> IndicatorCategory {
        match self {
            Self::Rsi | Self::Stochastic => IndicatorCategory::Momentum,
            Self::Macd => IndicatorCategory::Trend,
            Self::Bollinger => IndicatorCategory::Volatility,
            Self::Volume => IndicatorCategory::Volume,
        }
    }
}

/// Category of a technical indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorCategory {
    Trend,
    Momentum,
    Volatility,
    Volume,
}

impl IndicatorCategory {
    /// Get display name for this category.
    pub fn name(&self) -> &'static str {
        match self {
            IndicatorCategory::Trend => "Trend",
            IndicatorCategory::Momentum => "Momentum",
            IndicatorCategory::Volatility => "Volatility",
            IndicatorCategory::Volume => "Volume",
        }
    }
}

/// One MACD sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacdSample {
    pub time: i64,
    pub macd: f64,
    pub signal: f64,
    pub histogram: f64,
}

/// One Bollinger Bands sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BollingerSample {
    pub time: i64,
    pub lower: f64,
    pub middle: f64,
    pub upper: f64,
}

/// Timestamped output of one indicator over a price series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "samples", rename_all = "snake_case")]
pub enum IndicatorSeries {
    Rsi(Vec<TimeValue>),
    Macd(Vec<MacdSample>),
    Bollinger(Vec<BollingerSample>),
    Stochastic(Vec<TimeValue>),
    Volume(Vec<VolumeBar>),
}

impl IndicatorSeries {
    pub fn kind(&self) -> IndicatorKind {
        match self {
            Self::Rsi(_) => IndicatorKind::Rsi,
            Self::Macd(_) => IndicatorKind::Macd,
            Self::Bollinger(_) => IndicatorKind::Bollinger,
            Self::Stochastic(_) => IndicatorKind::Stochastic,
            Self::Volume(_) => IndicatorKind::Volume,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Rsi(s) | Self::Stochastic(s) => s.len(),
            Self::Macd(s) => s.len(),
            Self::Bollinger(s) => s.len(),
            Self::Volume(s) => s.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Rolling price features, each tail-aligned to the bars it describes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceFeatures {
    pub daily_return: Vec<TimeValue>,
    pub volatility_5d: Vec<TimeValue>,
    pub ma_5: Vec<TimeValue>,
    pub ma_10: Vec<TimeValue>,
    pub volume_zscore_5d: Vec<TimeValue>,
}

/// Indicator panel state handed to the rendering layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum IndicatorPanel {
    Ready { series: IndicatorSeries },
    InsufficientData { required: usize, available: usize },
}

impl IndicatorPanel {
    pub fn series(&self) -> Option<&IndicatorSeries> {
        match self {
            Self::Ready { series } => Some(series),
            Self::InsufficientData { .. } => None,
        }
    }
}
