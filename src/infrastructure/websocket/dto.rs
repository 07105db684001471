use serde::Deserialize;

use crate::domain::errors::{AppError, FeedResult};

/// One entry of the Binance `!ticker@arr` stream. Numeric fields arrive as decimal strings;
/// fields the dashboard does not use are skipped.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BinanceTicker24hr {
    #[serde(rename = "s")]
    pub symbol: String,
    #[serde(rename = "c")]
    pub last_price: String,
    #[serde(rename = "P")]
    pub price_change_percent: String,
    #[serde(rename = "o")]
    pub open_price: String,
    #[serde(rename = "h")]
    pub high_price: String,
    #[serde(rename = "l")]
    pub low_price: String,
    /// Total traded base asset volume.
    #[serde(rename = "v")]
    pub base_volume: String,
    /// Total traded quote asset volume.
    #[serde(rename = "q")]
    pub quote_volume: String,
}

/// Parsed numeric view of a ticker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickerFigures {
    pub last: f64,
    pub change_percent: f64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub base_volume: f64,
    pub quote_volume: f64,
}

impl BinanceTicker24hr {
    pub fn figures(&self) -> FeedResult<TickerFigures> {
        Ok(TickerFigures {
            last: parse_decimal(&self.symbol, "c", &self.last_price)?,
            change_percent: parse_decimal(&self.symbol, "P", &self.price_change_percent)?,
            open: parse_decimal(&self.symbol, "o", &self.open_price)?,
            high: parse_decimal(&self.symbol, "h", &self.high_price)?,
            low: parse_decimal(&self.symbol, "l", &self.low_price)?,
            base_volume: parse_decimal(&self.symbol, "v", &self.base_volume)?,
            quote_volume: parse_decimal(&self.symbol, "q", &self.quote_volume)?,
        })
    }
}

fn parse_decimal(symbol: &str, field: &str, raw: &str) -> FeedResult<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| AppError::Parse(format!("{symbol}: invalid '{field}' value '{raw}'")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ticker(last: &str) -> BinanceTicker24hr {
        BinanceTicker24hr {
            symbol: "BTCUSDT".into(),
            last_price: last.into(),
            price_change_percent: "-1.5".into(),
            open_price: "100".into(),
            high_price: "110".into(),
            low_price: "90".into(),
            base_volume: "12".into(),
            quote_volume: "1200".into(),
        }
    }

    #[test]
    fn figures_parse_decimal_strings() {
        let figures = ticker("101.25").figures().unwrap();
        assert_eq!(figures.last, 101.25);
        assert_eq!(figures.change_percent, -1.5);
        assert_eq!(figures.quote_volume, 1200.0);
    }

    #[test]
    fn bad_number_names_the_field() {
        let err = ticker("abc").figures().unwrap_err();
        assert_eq!(err, AppError::Parse("BTCUSDT: invalid 'c' value 'abc'".into()));
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let json = r#"{"e":"24hrTicker","E":1,"s":"ETHUSDT","p":"1","P":"2","w":"3","c":"4",
            "Q":"5","o":"6","h":"7","l":"8","v":"9","q":"10","O":0,"C":1,"F":0,"L":1,"n":2}"#;
        let parsed: BinanceTicker24hr = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.price_change_percent, "2");
        assert_eq!(parsed.symbol, "ETHUSDT");
    }
}
