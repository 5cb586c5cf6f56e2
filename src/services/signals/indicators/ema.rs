//! Exponential Moving Average (EMA).

/// Calculate EMA for a series of values.
///
/// Seeded with the first raw value rather than an SMA, so the output has the
/// same length as the input. Multiplier is `2 / (period + 1)`.
pub fn calculate_ema(values: &[f64], period: usize) -> Vec<f64> {
    let Some(&first) = values.first() else {
        return Vec::new();
    };
    if period == 0 {
        return Vec::new();
    }

    let multiplier = 2.0 / (period as f64 + 1.0);
    let mut ema = Vec::with_capacity(values.len());
    let mut prev = first;
    ema.push(prev);

    for value in &values[1..] {
        prev = value * multiplier + prev * (1.0 - multiplier);
        ema.push(prev);
    }

    ema
}
