mod common;

use common::{SeededNoise, ticker_array, ticker_json};
use crypto_ticker_wasm::application::{FeedConfig, FeedNormalizer};
use crypto_ticker_wasm::domain::market_data::{CHART_POINTS, FixedNoise, catalog::DEFAULT_LOGO_URL};
use crypto_ticker_wasm::infrastructure::websocket::BinanceTickerNormalizer;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn maps_ticker_fields_onto_record() {
    let normalizer = BinanceTickerNormalizer::from_config(&FeedConfig::default());
    let payload = ticker_array(&[ticker_json("BTCUSDT", "120", "6")]);
    let records = normalizer.normalize(&payload, &mut FixedNoise(0.5)).unwrap();
    let btc = &records[0];

    assert_eq!(btc.id, "btc");
    assert_eq!(btc.symbol, "BTC");
    assert_eq!(btc.name, "Bitcoin");
    assert_eq!(btc.rank, 1);
    assert!(btc.logo_url.ends_with("/1.png"));
    assert!(close(btc.price, 120.0));
    assert!(close(btc.price_change_24h, 6.0));
    assert!(close(btc.price_change_1h, 2.0));
    assert!(close(btc.price_change_7d, 12.0));
    assert!(close(btc.volume_24h, 300_000.0));
    assert!(close(btc.market_cap, 300_000.0 * 120.0));
    assert!(close(btc.circulating_supply, 2_500.0));
    assert_eq!(btc.max_supply, None);
}

#[test]
fn chart_series_is_pinned_and_bounded() {
    let normalizer = BinanceTickerNormalizer::from_config(&FeedConfig::default());
    let payload = ticker_array(&[
        ticker_json("BTCUSDT", "120", "6"),
        ticker_json("ETHUSDT", "95", "-5"),
    ]);
    let mut noise = SeededNoise::new(42);
    for record in normalizer.normalize(&payload, &mut noise).unwrap() {
        let series = record.chart_series;
        assert_eq!(series.len(), CHART_POINTS);
        assert!(close(series.first(), 100.0));
        assert!(close(series.last(), record.price));
        // low 90, high 130 in every fixture ticker
        assert!(series.iter().all(|&p| (90.0 * 0.95..=130.0 * 1.05).contains(&p)));
    }
}

#[test]
fn output_is_capped_to_allow_list_length() {
    let config = FeedConfig::from_json(r#"{"trackedSymbols":["btc","eth"]}"#).unwrap();
    let normalizer = BinanceTickerNormalizer::from_config(&config);
    let payload = ticker_array(&[
        ticker_json("BTCUSDT", "1", "1"),
        ticker_json("ETHUSDT", "1", "1"),
        ticker_json("BTCUSDT", "2", "1"),
        ticker_json("SOLUSDT", "1", "1"),
    ]);
    let records = normalizer.normalize(&payload, &mut FixedNoise(0.5)).unwrap();
    assert_eq!(records.len(), 2);
}

#[test]
fn unknown_symbols_fall_back_to_defaults() {
    let config = FeedConfig::from_json(r#"{"trackedSymbols":["pepe"]}"#).unwrap();
    let normalizer = BinanceTickerNormalizer::from_config(&config);
    let payload = ticker_array(&[ticker_json("PEPEUSDT", "0.00001", "12")]);
    let records = normalizer.normalize(&payload, &mut FixedNoise(0.5)).unwrap();
    assert_eq!(records[0].name, "PEPE");
    assert_eq!(records[0].logo_url, DEFAULT_LOGO_URL);
}

#[test]
fn custom_quote_asset_is_honoured() {
    let config = FeedConfig::from_json(r#"{"quoteAsset":"busd"}"#).unwrap();
    let normalizer = BinanceTickerNormalizer::from_config(&config);
    let payload = ticker_array(&[
        ticker_json("BTCUSDT", "1", "1"),
        ticker_json("BTCBUSD", "2", "1"),
    ]);
    let records = normalizer.normalize(&payload, &mut FixedNoise(0.5)).unwrap();
    assert_eq!(records.len(), 1);
    assert!(close(records[0].price, 2.0));
}

#[test]
fn empty_array_is_not_an_error() {
    let normalizer = BinanceTickerNormalizer::from_config(&FeedConfig::default());
    assert!(normalizer.normalize("[]", &mut FixedNoise(0.5)).unwrap().is_empty());
}
