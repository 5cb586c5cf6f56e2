//! Volume bars.

use crate::services::normalizer::NormalizedSeries;
use crate::services::signals::Indicator;
use crate::types::{IndicatorKind, IndicatorSeries, VolumeBar};

/// Per-bar volume colored by candle direction.
pub struct VolumeBars;

impl Indicator for VolumeBars {
    fn kind(&self) -> IndicatorKind {
        IndicatorKind::Volume
    }

    fn name(&self) -> String {
        "Volume".to_string()
    }

    fn min_periods(&self) -> usize {
        1
    }

    fn calculate(&self, series: &NormalizedSeries) -> IndicatorSeries {
        IndicatorSeries::Volume(series.points().iter().map(VolumeBar::from).collect())
    }
}
