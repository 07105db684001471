use super::value_objects::SortField;
use derive_more::{Deref, From, Into};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Number of points in the mini trend line.
pub const CHART_POINTS: usize = 7;

/// Fixed-length trend line. The length invariant is carried by the type.
#[derive(Debug, Clone, Copy, PartialEq, Default, From, Into, Deref, Serialize, Deserialize)]
pub struct ChartSeries([f64; CHART_POINTS]);

impl ChartSeries {
    pub fn new(points: [f64; CHART_POINTS]) -> Self {
        Self(points)
    }

    /// Resamples an arbitrary-length series onto exactly seven points by linear
    /// interpolation. Empty input yields zeros, a single value is repeated.
    pub fn from_points(points: &[f64]) -> Self {
        let mut out = [0.0; CHART_POINTS];
        match points.len() {
            0 => {}
            1 => out = [points[0]; CHART_POINTS],
            n if n == CHART_POINTS => out.copy_from_slice(points),
            n => {
                let span = (n - 1) as f64;
                for (i, slot) in out.iter_mut().enumerate() {
                    let pos = i as f64 * span / (CHART_POINTS - 1) as f64;
                    let lo = pos.floor() as usize;
                    let hi = (lo + 1).min(n - 1);
                    let t = pos - lo as f64;
                    *slot = points[lo] + (points[hi] - points[lo]) * t;
                }
            }
        }
        Self(out)
    }

    pub fn first(&self) -> f64 {
        self.0[0]
    }

    pub fn last(&self) -> f64 {
        self.0[CHART_POINTS - 1]
    }
}

/// One tradable asset's current market snapshot.
///
/// `circulating_supply` is filled from the 24h base-asset volume when the record comes
/// from the ticker feed; it is an approximation, not on-chain supply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetRecord {
    pub id: String,
    pub rank: u32,
    pub name: String,
    pub symbol: String,
    pub logo_url: String,
    pub price: f64,
    pub price_change_1h: f64,
    pub price_change_24h: f64,
    pub price_change_7d: f64,
    pub market_cap: f64,
    pub volume_24h: f64,
    pub circulating_supply: f64,
    pub max_supply: Option<f64>,
    pub chart_series: ChartSeries,
}

/// Comparable projection of a record column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SortKey<'a> {
    Text(&'a str),
    Number(f64),
}

impl AssetRecord {
    pub fn sort_key(&self, field: SortField) -> SortKey<'_> {
        match field {
            SortField::Rank => SortKey::Number(f64::from(self.rank)),
            SortField::Name => SortKey::Text(&self.name),
            SortField::Price => SortKey::Number(self.price),
            SortField::PriceChange1h => SortKey::Number(self.price_change_1h),
            SortField::PriceChange24h => SortKey::Number(self.price_change_24h),
            SortField::PriceChange7d => SortKey::Number(self.price_change_7d),
            SortField::MarketCap => SortKey::Number(self.market_cap),
            SortField::Volume24h => SortKey::Number(self.volume_24h),
            SortField::CirculatingSupply => SortKey::Number(self.circulating_supply),
        }
    }

    pub fn is_gainer(&self) -> bool {
        self.price_change_24h > 0.0
    }

    pub fn is_loser(&self) -> bool {
        self.price_change_24h < 0.0
    }

    /// Case-insensitive substring match on name or symbol. `needle` must already be lowercase.
    pub fn matches_lowercase(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle) || self.symbol.to_lowercase().contains(needle)
    }

    /// Share of max supply in circulation, in percent.
    pub fn supply_ratio(&self) -> Option<f64> {
        match self.max_supply {
            Some(max) if max > 0.0 => Some(self.circulating_supply / max * 100.0),
            _ => None,
        }
    }
}

/// Orders two numeric keys; NaN sorts after every number.
pub fn compare_numbers(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or_else(|| a.is_nan().cmp(&b.is_nan()))
}
