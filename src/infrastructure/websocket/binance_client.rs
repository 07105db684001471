use std::collections::HashSet;

use super::dto::BinanceTicker24hr;
use crate::application::config::FeedConfig;
use crate::application::feed_client::FeedNormalizer;
use crate::domain::errors::{AppError, FeedResult};
use crate::domain::logging::LogComponent;
use crate::domain::market_data::{
    AssetRecord, NoiseSource, SessionRange, TradingPair, catalog, synthesize_chart_series,
};
use crate::log_debug;

/// Maps `!ticker@arr` messages onto asset records for a fixed allow-list of base symbols.
#[derive(Debug, Clone)]
pub struct BinanceTickerNormalizer {
    quote_asset: String,
    tracked_symbols: Vec<String>,
}

impl BinanceTickerNormalizer {
    pub fn new(quote_asset: &str, tracked_symbols: &[String]) -> Self {
        Self {
            quote_asset: quote_asset.to_uppercase(),
            tracked_symbols: tracked_symbols.iter().map(|s| s.to_lowercase()).collect(),
        }
    }

    pub fn from_config(config: &FeedConfig) -> Self {
        Self::new(&config.quote_asset, &config.tracked_symbols)
    }

    pub fn parse_message(&self, payload: &str) -> FeedResult<Vec<BinanceTicker24hr>> {
        serde_json::from_str(payload)
            .map_err(|e| AppError::Parse(format!("Failed to parse ticker array: {e}")))
    }

    /// Tracked quote pairs in arrival order, first occurrence per base, at most one per tracked
    /// symbol.
    pub fn select<'a>(
        &self,
        tickers: &'a [BinanceTicker24hr],
    ) -> Vec<(TradingPair, &'a BinanceTicker24hr)> {
        let mut seen = HashSet::new();
        tickers
            .iter()
            .filter_map(|ticker| {
                TradingPair::split(&ticker.symbol, &self.quote_asset).map(|pair| (pair, ticker))
            })
            .filter(|(pair, _)| self.tracked_symbols.contains(&pair.asset_id()))
            .filter(|(pair, _)| seen.insert(pair.asset_id()))
            .take(self.tracked_symbols.len())
            .collect()
    }

    fn to_record(
        rank: u32,
        pair: &TradingPair,
        ticker: &BinanceTicker24hr,
        noise: &mut dyn NoiseSource,
    ) -> FeedResult<AssetRecord> {
        let figures = ticker.figures()?;
        let session = SessionRange {
            open: figures.open,
            high: figures.high,
            low: figures.low,
            close: figures.last,
        };
        Ok(AssetRecord {
            id: pair.asset_id(),
            rank,
            name: catalog::display_name(&pair.base),
            symbol: pair.base.clone(),
            logo_url: catalog::logo_url(&pair.base),
            price: figures.last,
            // The stream only carries a 24h window; the other horizons are scaled from it.
            price_change_1h: figures.change_percent / 3.0,
            price_change_24h: figures.change_percent,
            price_change_7d: figures.change_percent * 2.0,
            market_cap: figures.quote_volume * figures.last,
            volume_24h: figures.quote_volume,
            circulating_supply: figures.base_volume,
            max_supply: None,
            chart_series: synthesize_chart_series(session, figures.change_percent, noise),
        })
    }
}

impl FeedNormalizer for BinanceTickerNormalizer {
    fn normalize(
        &self,
        payload: &str,
        noise: &mut dyn NoiseSource,
    ) -> FeedResult<Vec<AssetRecord>> {
        let tickers = self.parse_message(payload)?;
        let selected = self.select(&tickers);
        log_debug!(
            LogComponent::Infrastructure("BinanceTicker"),
            "Filtered coins: {}",
            selected.iter().map(|(_, t)| t.symbol.as_str()).collect::<Vec<_>>().join(", ")
        );
        selected
            .iter()
            .enumerate()
            .map(|(index, (pair, ticker))| Self::to_record(index as u32 + 1, pair, ticker, noise))
            .collect()
    }
}
