use serde::Deserialize;

use crate::application::reconnect::ReconnectPolicy;
use crate::domain::errors::AppError;
use crate::domain::market_data::{PipelineOptions, catalog};

pub const BINANCE_TICKER_WS_URL: &str = "wss://stream.binance.com:9443/ws/!ticker@arr";
pub const DEFAULT_QUOTE_ASSET: &str = "USDT";

/// Dashboard settings. Every key is optional in JSON; missing keys take the defaults.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FeedConfig {
    pub endpoint: String,
    pub quote_asset: String,
    /// Lowercase base symbols to keep from the ticker array.
    pub tracked_symbols: Vec<String>,
    pub reconnect: ReconnectPolicy,
    /// Seed the collection with the sample snapshot until the first batch arrives.
    pub bootstrap_sample: bool,
    pub filter_sorts_view: bool,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            endpoint: BINANCE_TICKER_WS_URL.to_string(),
            quote_asset: DEFAULT_QUOTE_ASSET.to_string(),
            tracked_symbols: catalog::default_tracked_symbols(),
            reconnect: ReconnectPolicy::default(),
            bootstrap_sample: false,
            filter_sorts_view: false,
        }
    }
}

impl FeedConfig {
    pub fn from_json(json: &str) -> Result<Self, AppError> {
        let mut config: FeedConfig =
            serde_json::from_str(json).map_err(|e| AppError::Config(e.to_string()))?;
        config.tracked_symbols =
            config.tracked_symbols.iter().map(|s| s.trim().to_lowercase()).collect();
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.endpoint.trim().is_empty() {
            return Err(AppError::Config("endpoint must not be empty".into()));
        }
        if self.quote_asset.trim().is_empty() {
            return Err(AppError::Config("quoteAsset must not be empty".into()));
        }
        if self.tracked_symbols.is_empty() || self.tracked_symbols.iter().any(|s| s.is_empty()) {
            return Err(AppError::Config("trackedSymbols must list at least one symbol".into()));
        }
        if self.reconnect.max_attempts == 0 {
            return Err(AppError::Config("reconnect.maxAttempts must be at least 1".into()));
        }
        if self.reconnect.base_delay_ms > self.reconnect.max_delay_ms {
            return Err(AppError::Config("reconnect.baseDelayMs exceeds maxDelayMs".into()));
        }
        Ok(())
    }

    pub fn pipeline_options(&self) -> PipelineOptions {
        PipelineOptions { filter_sorts_view: self.filter_sorts_view }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let config = FeedConfig::from_json("{}").unwrap();
        assert_eq!(config, FeedConfig::default());
        assert_eq!(config.tracked_symbols.len(), 10);
    }

    #[test]
    fn partial_reconnect_section_keeps_other_defaults() {
        let config = FeedConfig::from_json(r#"{"reconnect":{"maxAttempts":2}}"#).unwrap();
        assert_eq!(config.reconnect.max_attempts, 2);
        assert_eq!(config.reconnect.max_delay_ms, 30_000);
    }

    #[test]
    fn symbols_are_normalised() {
        let config = FeedConfig::from_json(r#"{"trackedSymbols":[" BTC ","Eth"]}"#).unwrap();
        assert_eq!(config.tracked_symbols, ["btc", "eth"]);
    }

    #[test]
    fn rejects_empty_allow_list() {
        let err = FeedConfig::from_json(r#"{"trackedSymbols":[]}"#).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(FeedConfig::from_json("{").is_err());
    }
}
