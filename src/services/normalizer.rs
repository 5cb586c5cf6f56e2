//! Price series normalization.
//!
//! Turns raw, possibly unordered and duplicated OHLCV records into a strictly
//! time-ascending series keyed by whole epoch seconds.

use crate::error::{ChartError, Result};
use crate::types::{PortfolioMetricPoint, PortfolioMetricRecord, PricePoint, PriceRecord};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Price series with strictly increasing, unique time keys.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedSeries {
    points: Vec<PricePoint>,
}

impl NormalizedSeries {
    /// Sort, key by epoch second and collapse duplicates.
    ///
    /// Among points sharing a key, the one that sorts last wins. Points with
    /// identical timestamps keep their input order, so the later one wins.
    pub fn normalize<I>(points: I) -> Self
    where
        I: IntoIterator<Item = PricePoint>,
    {
        let mut sorted: Vec<PricePoint> = points.into_iter().collect();
        let input_len = sorted.len();
        sorted.sort_by_key(|p| p.timestamp);

        let mut by_key: BTreeMap<i64, PricePoint> = BTreeMap::new();
        for point in sorted {
            by_key.insert(point.time_key(), point);
        }

        let points: Vec<PricePoint> = by_key.into_values().collect();
        if points.len() < input_len {
            debug!(
                "Normalized {} price points into {} ({} duplicates collapsed)",
                input_len,
                points.len(),
                input_len - points.len()
            );
        }

        Self { points }
    }

    /// Parse API records and normalize them.
    pub fn from_records(records: &[PriceRecord]) -> Result<Self> {
        let points = records
            .iter()
            .map(PricePoint::try_from)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::normalize(points))
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Time keys in ascending order.
    pub fn times(&self) -> Vec<i64> {
        self.points.iter().map(PricePoint::time_key).collect()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.close).collect()
    }

    pub fn highs(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.high).collect()
    }

    pub fn lows(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.low).collect()
    }

    pub fn volumes(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.volume).collect()
    }

    /// Time key of the most recent point.
    pub fn last_time(&self) -> Option<i64> {
        self.points.last().map(PricePoint::time_key)
    }

    /// Point closest in time to `at`. Ties go to the earlier point.
    pub fn nearest(&self, at: DateTime<Utc>) -> Option<&PricePoint> {
        let mut best: Option<(&PricePoint, i64)> = None;
        for point in &self.points {
            let distance = (point.timestamp - at).num_milliseconds().abs();
            match best {
                Some((_, best_distance)) if distance >= best_distance => {}
                _ => best = Some((point, distance)),
            }
        }
        best.map(|(point, _)| point)
    }
}

impl TryFrom<&PriceRecord> for PricePoint {
    type Error = ChartError;

    fn try_from(record: &PriceRecord) -> Result<Self> {
        Ok(PricePoint {
            timestamp: parse_timestamp(&record.date)?,
            open: record.open_price,
            high: record.high_price,
            low: record.low_price,
            close: record.close_price,
            volume: record.volume.unwrap_or(0.0),
        })
    }
}

impl TryFrom<&PortfolioMetricRecord> for PortfolioMetricPoint {
    type Error = ChartError;

    fn try_from(record: &PortfolioMetricRecord) -> Result<Self> {
        Ok(PortfolioMetricPoint {
            metric_date: parse_timestamp(&record.metric_date)?,
            total_value: record.total_value,
        })
    }
}

/// Parse a list of portfolio snapshots.
///
/// Portfolio history only feeds an optional overlay, so a record with an
/// unparseable date is logged and dropped instead of failing the batch.
pub fn parse_portfolio_metrics(records: &[PortfolioMetricRecord]) -> Vec<PortfolioMetricPoint> {
    records
        .iter()
        .filter_map(|record| match PortfolioMetricPoint::try_from(record) {
            Ok(point) => Some(point),
            Err(e) => {
                warn!("Skipping portfolio snapshot: {}", e);
                None
            }
        })
        .collect()
}

/// Parse an API date string.
///
/// Accepts RFC 3339, RFC 2822, naive ISO-8601 date-times (taken as UTC) and
/// bare `YYYY-MM-DD` dates (midnight UTC).
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    let s = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Ok(naive.and_utc());
        }
    }

    if let Some(midnight) = NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
    {
        return Ok(midnight.and_utc());
    }

    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Ok(dt.with_timezone(&Utc));
    }

    Err(ChartError::InvalidTimestamp(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn point(secs: i64, close: f64) -> PricePoint {
        PricePoint {
            timestamp: Utc.timestamp_opt(secs, 0).unwrap(),
            open: close,
            high: close + 1.0,
            low: close - 1.0,
            close,
            volume: 100.0,
        }
    }

    #[test]
    fn test_normalize_empty() {
        let series = NormalizedSeries::normalize(Vec::new());
        assert!(series.is_empty());
        assert_eq!(series.last_time(), None);
    }

    #[test]
    fn test_normalize_sorts_ascending() {
        let series = NormalizedSeries::normalize(vec![point(300, 3.0), point(100, 1.0), point(200, 2.0)]);
        assert_eq!(series.times(), vec![100, 200, 300]);
        assert_eq!(series.closes(), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_normalize_last_duplicate_wins() {
        let series = NormalizedSeries::normalize(vec![point(100, 1.0), point(200, 2.0), point(100, 9.0)]);
        assert_eq!(series.len(), 2);
        assert_eq!(series.points()[0].close, 9.0);
    }

    #[test]
    fn test_normalize_same_second_keeps_later_instant() {
        let first_arrival = PricePoint {
            timestamp: Utc.timestamp_millis_opt(100_900).unwrap(),
            ..point(0, 5.0)
        };
        let second_arrival = PricePoint {
            timestamp: Utc.timestamp_millis_opt(100_100).unwrap(),
            ..point(0, 1.0)
        };
        // 100.9s sorts after 100.1s even though it arrived first
        let series = NormalizedSeries::normalize(vec![first_arrival, second_arrival]);
        assert_eq!(series.len(), 1);
        assert_eq!(series.points()[0].close, 5.0);
        assert_eq!(series.times(), vec![100]);
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let once = NormalizedSeries::normalize(vec![point(5, 1.0), point(1, 2.0), point(5, 3.0), point(3, 4.0)]);
        let twice = NormalizedSeries::normalize(once.points().to_vec());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_nearest_tie_goes_to_first() {
        let series = NormalizedSeries::normalize(vec![point(100, 1.0), point(200, 2.0)]);
        let nearest = series.nearest(Utc.timestamp_opt(150, 0).unwrap()).unwrap();
        assert_eq!(nearest.time_key(), 100);
    }

    #[test]
    fn test_parse_timestamp_formats() {
        let expected = Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap();
        assert_eq!(parse_timestamp("2024-03-01T12:30:00").unwrap(), expected);
        assert_eq!(parse_timestamp("2024-03-01 12:30:00").unwrap(), expected);
        assert_eq!(parse_timestamp("2024-03-01T12:30:00Z").unwrap(), expected);
        assert_eq!(parse_timestamp("2024-03-01T14:30:00+02:00").unwrap(), expected);
        assert_eq!(
            parse_timestamp("2024-03-01").unwrap(),
            Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_parse_timestamp_fractional_seconds_truncate() {
        let ts = parse_timestamp("2024-03-01T12:30:00.750").unwrap();
        let p = PricePoint { timestamp: ts, ..point(0, 1.0) };
        assert_eq!(p.time_key(), Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap().timestamp());
    }

    #[test]
    fn test_parse_timestamp_invalid() {
        assert!(matches!(
            parse_timestamp("yesterday"),
            Err(ChartError::InvalidTimestamp(_))
        ));
    }

    #[test]
    fn test_parse_portfolio_metrics_skips_bad_dates() {
        let records = vec![
            PortfolioMetricRecord {
                metric_date: "2024-01-01".to_string(),
                total_value: 100.0,
            },
            PortfolioMetricRecord {
                metric_date: "garbage".to_string(),
                total_value: 200.0,
            },
        ];
        let points = parse_portfolio_metrics(&records);
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].total_value, 100.0);
    }
}
