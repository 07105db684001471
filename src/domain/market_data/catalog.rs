//! Static metadata for the tracked coins and the bootstrap sample snapshot.

use super::entities::{AssetRecord, ChartSeries};
use once_cell::sync::Lazy;
use std::collections::HashMap;

pub const DEFAULT_LOGO_URL: &str = "https://s2.coinmarketcap.com/static/img/coins/64x64/1.png";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackedAsset {
    pub base: &'static str,
    pub name: &'static str,
    pub logo_url: &'static str,
}

pub const TRACKED_ASSETS: [TrackedAsset; 10] = [
    TrackedAsset {
        base: "BTC",
        name: "Bitcoin",
        logo_url: "https://s2.coinmarketcap.com/static/img/coins/64x64/1.png",
    },
    TrackedAsset {
        base: "ETH",
        name: "Ethereum",
        logo_url: "https://s2.coinmarketcap.com/static/img/coins/64x64/1027.png",
    },
    TrackedAsset {
        base: "BNB",
        name: "Binance Coin",
        logo_url: "https://s2.coinmarketcap.com/static/img/coins/64x64/1839.png",
    },
    TrackedAsset {
        base: "SOL",
        name: "Solana",
        logo_url: "https://s2.coinmarketcap.com/static/img/coins/64x64/5426.png",
    },
    TrackedAsset {
        base: "XRP",
        name: "XRP",
        logo_url: "https://s2.coinmarketcap.com/static/img/coins/64x64/52.png",
    },
    TrackedAsset {
        base: "ADA",
        name: "Cardano",
        logo_url: "https://s2.coinmarketcap.com/static/img/coins/64x64/2010.png",
    },
    TrackedAsset {
        base: "AVAX",
        name: "Avalanche",
        logo_url: "https://s2.coinmarketcap.com/static/img/coins/64x64/5805.png",
    },
    TrackedAsset {
        base: "DOGE",
        name: "Dogecoin",
        logo_url: "https://s2.coinmarketcap.com/static/img/coins/64x64/74.png",
    },
    TrackedAsset {
        base: "DOT",
        name: "Polkadot",
        logo_url: "https://s2.coinmarketcap.com/static/img/coins/64x64/6636.png",
    },
    TrackedAsset {
        base: "SHIB",
        name: "Shiba Inu",
        logo_url: "https://s2.coinmarketcap.com/static/img/coins/64x64/5994.png",
    },
];

static CATALOG_INDEX: Lazy<HashMap<&'static str, &'static TrackedAsset>> =
    Lazy::new(|| TRACKED_ASSETS.iter().map(|asset| (asset.base, asset)).collect());

/// Looks up catalog metadata by base symbol (case-insensitive).
pub fn lookup(base: &str) -> Option<&'static TrackedAsset> {
    CATALOG_INDEX.get(base.to_uppercase().as_str()).copied()
}

/// Display name for `base`, falling back to the symbol itself.
pub fn display_name(base: &str) -> String {
    lookup(base).map(|asset| asset.name.to_string()).unwrap_or_else(|| base.to_uppercase())
}

pub fn logo_url(base: &str) -> String {
    lookup(base).map(|asset| asset.logo_url).unwrap_or(DEFAULT_LOGO_URL).to_string()
}

/// Lowercase base symbols of the default allow-list.
pub fn default_tracked_symbols() -> Vec<String> {
    TRACKED_ASSETS.iter().map(|asset| asset.base.to_lowercase()).collect()
}

#[allow(clippy::too_many_arguments)]
fn sample(
    id: &str,
    rank: u32,
    name: &str,
    symbol: &str,
    logo_url: &str,
    price: f64,
    changes: (f64, f64, f64),
    market_cap: f64,
    volume_24h: f64,
    circulating_supply: f64,
    max_supply: Option<f64>,
    chart: [f64; 7],
) -> AssetRecord {
    AssetRecord {
        id: id.to_string(),
        rank,
        name: name.to_string(),
        symbol: symbol.to_string(),
        logo_url: logo_url.to_string(),
        price,
        price_change_1h: changes.0,
        price_change_24h: changes.1,
        price_change_7d: changes.2,
        market_cap,
        volume_24h,
        circulating_supply,
        max_supply,
        chart_series: ChartSeries::new(chart),
    }
}

/// Sample snapshot shown before the first feed batch arrives.
pub fn bootstrap_assets() -> Vec<AssetRecord> {
    vec![
        sample(
            "bitcoin",
            1,
            "Bitcoin",
            "BTC",
            "https://cryptologos.cc/logos/bitcoin-btc-logo.png",
            65432.12,
            (0.5, 1.2, -2.3),
            1_236_789_456_123.0,
            32_165_498_712.0,
            19_456_789.0,
            Some(21_000_000.0),
            [45000.0, 46000.0, 47500.0, 48200.0, 47800.0, 49100.0, 50200.0],
        ),
        sample(
            "ethereum",
            2,
            "Ethereum",
            "ETH",
            "https://cryptologos.cc/logos/ethereum-eth-logo.png",
            3456.78,
            (-0.2, 2.1, 5.4),
            412_365_897_123.0,
            15_698_732_456.0,
            120_654_789.0,
            None,
            [3200.0, 3150.0, 3300.0, 3400.0, 3380.0, 3450.0, 3500.0],
        ),
        sample(
            "tether",
            3,
            "Tether",
            "USDT",
            "https://cryptologos.cc/logos/tether-usdt-logo.png",
            1.0,
            (0.01, -0.01, 0.02),
            83_654_123_789.0,
            65_432_178_965.0,
            83_654_123_789.0,
            None,
            [1.0, 1.0, 0.999, 1.001, 1.0, 1.0, 0.998],
        ),
        sample(
            "binancecoin",
            4,
            "Binance Coin",
            "BNB",
            "https://cryptologos.cc/logos/bnb-bnb-logo.png",
            567.89,
            (0.3, -1.5, -0.8),
            87_654_321_098.0,
            2_345_678_901.0,
            165_432_198.0,
            Some(200_000_000.0),
            [540.0, 545.0, 555.0, 560.0, 570.0, 565.0, 550.0],
        ),
        sample(
            "solana",
            5,
            "Solana",
            "SOL",
            "https://cryptologos.cc/logos/solana-sol-logo.png",
            123.45,
            (1.2, 3.5, 10.2),
            43_215_678_901.0,
            3_456_789_012.0,
            350_123_456.0,
            None,
            [100.0, 105.0, 110.0, 108.0, 115.0, 120.0, 125.0],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(lookup("btc").map(|a| a.name), Some("Bitcoin"));
        assert_eq!(lookup("Shib").map(|a| a.name), Some("Shiba Inu"));
        assert!(lookup("PEPE").is_none());
    }

    #[test]
    fn unknown_symbols_fall_back() {
        assert_eq!(display_name("pepe"), "PEPE");
        assert_eq!(logo_url("pepe"), DEFAULT_LOGO_URL);
    }

    #[test]
    fn default_allow_list_has_ten_lowercase_symbols() {
        let symbols = default_tracked_symbols();
        assert_eq!(symbols.len(), 10);
        assert!(symbols.iter().all(|s| s.chars().all(|c| c.is_ascii_lowercase())));
    }

    #[test]
    fn bootstrap_ids_are_unique() {
        let assets = bootstrap_assets();
        let mut ids: Vec<_> = assets.iter().map(|a| a.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), assets.len());
    }
}
