use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display as StrumDisplay, EnumIter, EnumString};

/// Column the derived view is ordered by. String forms match the persisted preference values.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    StrumDisplay,
    EnumIter,
    EnumString,
    AsRefStr,
    Serialize,
    Deserialize,
)]
pub enum SortField {
    #[default]
    #[strum(serialize = "rank")]
    #[serde(rename = "rank")]
    Rank,

    #[strum(serialize = "name")]
    #[serde(rename = "name")]
    Name,

    #[strum(serialize = "price")]
    #[serde(rename = "price")]
    Price,

    #[strum(serialize = "priceChange1h")]
    #[serde(rename = "priceChange1h")]
    PriceChange1h,

    #[strum(serialize = "priceChange24h")]
    #[serde(rename = "priceChange24h")]
    PriceChange24h,

    #[strum(serialize = "priceChange7d")]
    #[serde(rename = "priceChange7d")]
    PriceChange7d,

    #[strum(serialize = "marketCap")]
    #[serde(rename = "marketCap")]
    MarketCap,

    #[strum(serialize = "volume24h")]
    #[serde(rename = "volume24h")]
    Volume24h,

    #[strum(serialize = "circulatingSupply")]
    #[serde(rename = "circulatingSupply")]
    CirculatingSupply,
}

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    StrumDisplay,
    EnumIter,
    EnumString,
    AsRefStr,
    Serialize,
    Deserialize,
)]
pub enum SortDirection {
    #[default]
    #[strum(serialize = "asc")]
    #[serde(rename = "asc")]
    Asc,

    #[strum(serialize = "desc")]
    #[serde(rename = "desc")]
    Desc,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

/// Field + direction pair, persisted together as `{"field":..,"direction":..}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortState {
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    /// Applies a sort request: same field without direction toggles, a new field without
    /// direction starts ascending, an explicit direction always wins.
    pub fn request(self, field: SortField, direction: Option<SortDirection>) -> Self {
        let direction = match direction {
            Some(direction) => direction,
            None if field == self.field => self.direction.toggled(),
            None => SortDirection::Asc,
        };
        Self { field, direction }
    }
}

/// Filter chip selected in the view.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    StrumDisplay,
    EnumIter,
    EnumString,
    AsRefStr,
    Serialize,
    Deserialize,
)]
pub enum FilterKind {
    #[default]
    #[strum(serialize = "all")]
    #[serde(rename = "all")]
    All,

    #[strum(serialize = "gainers")]
    #[serde(rename = "gainers")]
    Gainers,

    #[strum(serialize = "losers")]
    #[serde(rename = "losers")]
    Losers,

    #[strum(serialize = "volume")]
    #[serde(rename = "volume")]
    Volume,

    #[strum(serialize = "marketcap")]
    #[serde(rename = "marketcap")]
    MarketCap,
}

impl FilterKind {
    /// Column a sort-coupled filter orders by (descending), if any.
    pub fn implied_sort(&self) -> Option<SortField> {
        match self {
            Self::Volume => Some(SortField::Volume24h),
            Self::MarketCap => Some(SortField::MarketCap),
            _ => None,
        }
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    StrumDisplay,
    EnumString,
    AsRefStr,
    Serialize,
    Deserialize,
)]
pub enum ConnectionStatus {
    #[default]
    #[strum(serialize = "idle")]
    #[serde(rename = "idle")]
    Idle,

    #[strum(serialize = "loading")]
    #[serde(rename = "loading")]
    Loading,

    #[strum(serialize = "failed")]
    #[serde(rename = "failed")]
    Failed,
}

/// Trading pair split into base and quote, e.g. `BTCUSDT` -> (`BTC`, `USDT`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TradingPair {
    pub base: String,
    pub quote: String,
}

impl TradingPair {
    /// Splits `symbol` when it ends with `quote` and leaves a non-empty base.
    pub fn split(symbol: &str, quote: &str) -> Option<Self> {
        let upper = symbol.to_uppercase();
        let quote = quote.to_uppercase();
        let base = upper.strip_suffix(quote.as_str())?;
        if base.is_empty() {
            return None;
        }
        Some(Self { base: base.to_string(), quote })
    }

    /// Lowercase base symbol, used as the record id.
    pub fn asset_id(&self) -> String {
        self.base.to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn sort_field_parses_persisted_names() {
        assert_eq!(SortField::from_str("priceChange24h").unwrap(), SortField::PriceChange24h);
        assert_eq!(SortField::Volume24h.as_ref(), "volume24h");
        assert!(SortField::from_str("bogus").is_err());
    }

    #[test]
    fn request_without_direction_on_new_field_starts_ascending() {
        let state = SortState::new(SortField::Price, SortDirection::Desc);
        let next = state.request(SortField::Name, None);
        assert_eq!(next, SortState::new(SortField::Name, SortDirection::Asc));
    }

    #[test]
    fn request_same_field_toggles() {
        let state = SortState::new(SortField::Price, SortDirection::Asc);
        assert_eq!(state.request(SortField::Price, None).direction, SortDirection::Desc);
    }

    #[test]
    fn pair_split_requires_quote_suffix() {
        let pair = TradingPair::split("BTCUSDT", "USDT").unwrap();
        assert_eq!(pair.base, "BTC");
        assert_eq!(pair.asset_id(), "btc");
        assert!(TradingPair::split("BTCBUSD", "USDT").is_none());
        assert!(TradingPair::split("USDT", "USDT").is_none());
    }

    #[test]
    fn filter_names_round_trip_through_strum() {
        assert_eq!(FilterKind::from_str("marketcap").unwrap(), FilterKind::MarketCap);
        assert_eq!(FilterKind::Gainers.to_string(), "gainers");
    }
}
