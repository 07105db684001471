//! Synthetic trend lines and offline price drift.

use super::entities::{AssetRecord, CHART_POINTS, ChartSeries};

/// Source of uniform values in `[0, 1)`.
pub trait NoiseSource {
    fn next_unit(&mut self) -> f64;

    /// Uniform value in `[min, max)`.
    fn next_in(&mut self, min: f64, max: f64) -> f64 {
        min + self.next_unit() * (max - min)
    }
}

/// Always returns the same value; `0.5` removes all randomness from the chart walk.
#[derive(Debug, Clone, Copy)]
pub struct FixedNoise(pub f64);

impl NoiseSource for FixedNoise {
    fn next_unit(&mut self) -> f64 {
        self.0
    }
}

/// Session extremes a synthetic series is built from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionRange {
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

/// Seven-point walk from `open` to `close`. Inner points follow a trend biased by the sign of
/// `change_24h`, jitter most at the midpoint and stay within `[low * 0.95, high * 1.05]`.
pub fn synthesize_chart_series(
    session: SessionRange,
    change_24h: f64,
    noise: &mut dyn NoiseSource,
) -> ChartSeries {
    let SessionRange { open, high, low, close } = session;
    let inner = CHART_POINTS - 2;
    let range = (close - open).abs();
    let bias = if change_24h >= 0.0 { 0.6 } else { -0.6 };
    let ceiling = high * 1.05;
    let floor = low * 0.95;

    let mut points = [0.0; CHART_POINTS];
    points[0] = open;
    for i in 0..inner {
        let volatility = range * if i == inner / 2 { 0.5 } else { 0.3 };
        let jitter = (noise.next_unit() - 0.5) * volatility;
        let trend = (range / inner as f64) * bias * (i + 1) as f64;
        points[i + 1] = (open + trend + jitter).min(ceiling).max(floor);
    }
    points[CHART_POINTS - 1] = close;
    ChartSeries::new(points)
}

/// Random-walk one record the way the offline demo ticker does: price +-2 %, volume +-5 %,
/// fresh 1h/24h/7d changes. Prices are rounded to cents and volume to whole units.
pub fn drift_asset(asset: &AssetRecord, noise: &mut dyn NoiseSource) -> AssetRecord {
    let price_pct = round2(noise.next_in(-2.0, 2.0));
    let volume_pct = round2(noise.next_in(-5.0, 5.0));

    let mut next = asset.clone();
    next.price = round2(asset.price * (1.0 + price_pct / 100.0));
    next.volume_24h = (asset.volume_24h * (1.0 + volume_pct / 100.0)).round();
    next.price_change_1h = round2(noise.next_in(-2.0, 2.0));
    next.price_change_24h = round2(noise.next_in(-5.0, 5.0));
    next.price_change_7d = round2(noise.next_in(-10.0, 10.0));
    next
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
