use std::str::FromStr;

use wasm_bindgen::prelude::*;

use crate::application::{FeedConfig, FeedRuntime, MarketDashboard};
use crate::domain::errors::AppError;
use crate::domain::logging::LogComponent;
use crate::domain::market_data::{FilterKind, SortDirection, SortField};
use crate::global_state;
use crate::infrastructure::websocket::{BinanceTickerNormalizer, GlooWebSocketTransport};
use crate::infrastructure::{
    BrowserNoise, GlooTimeoutScheduler, LocalStoragePreferences,
};
use crate::log_info;

/// JavaScript entry point to the dashboard core. Reads are synchronous snapshots; writes run to
/// completion before returning.
#[wasm_bindgen]
pub struct CryptoDashboardApi {
    dashboard: MarketDashboard,
}

#[wasm_bindgen]
impl CryptoDashboardApi {
    /// `config` is an optional JSON document, e.g. `{"bootstrapSample":true}`.
    #[wasm_bindgen(constructor)]
    pub fn new(config: Option<String>) -> Result<CryptoDashboardApi, JsValue> {
        let config = match config {
            Some(json) => FeedConfig::from_json(&json).map_err(to_js)?,
            None => FeedConfig::default(),
        };
        let runtime = FeedRuntime {
            transport: Box::new(GlooWebSocketTransport::new()),
            scheduler: Box::new(GlooTimeoutScheduler::new()),
            normalizer: Box::new(BinanceTickerNormalizer::from_config(&config)),
            noise: Box::new(BrowserNoise),
        };
        let dashboard = MarketDashboard::new(
            config,
            Box::new(LocalStoragePreferences::new()),
            runtime,
            Box::new(BrowserNoise),
        );
        dashboard.subscribe(global_state::apply_market_event);
        global_state::sync_globals(dashboard.store().borrow().state());

        log_info!(LogComponent::Presentation("CryptoDashboardApi"), "🚀 Dashboard API created");
        Ok(Self { dashboard })
    }

    /// Derived view as a JSON array of asset records.
    #[wasm_bindgen(js_name = getDerivedAssets)]
    pub fn get_derived_assets(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.dashboard.get_derived_assets())
            .map_err(|e| to_js(AppError::from(e)))
    }

    #[wasm_bindgen(js_name = getConnectionStatus)]
    pub fn get_connection_status(&self) -> String {
        self.dashboard.connection_status().to_string()
    }

    #[wasm_bindgen(js_name = getError)]
    pub fn get_error(&self) -> Option<String> {
        self.dashboard.last_error()
    }

    /// `{"field":"price","direction":"asc"}`
    #[wasm_bindgen(js_name = getSortState)]
    pub fn get_sort_state(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.dashboard.sort_state()).map_err(|e| to_js(AppError::from(e)))
    }

    #[wasm_bindgen(js_name = getActiveFilter)]
    pub fn get_active_filter(&self) -> String {
        self.dashboard.active_filter().to_string()
    }

    #[wasm_bindgen(js_name = getSearchTerm)]
    pub fn get_search_term(&self) -> String {
        self.dashboard.search_term()
    }

    #[wasm_bindgen(js_name = isConnected)]
    pub fn is_connected(&self) -> bool {
        self.dashboard.is_connected()
    }

    #[wasm_bindgen(js_name = requestSort)]
    pub fn request_sort(&self, field: String, direction: Option<String>) -> Result<(), JsValue> {
        let (field, direction) = parse_sort_request(&field, direction.as_deref()).map_err(to_js)?;
        self.dashboard.request_sort(field, direction);
        Ok(())
    }

    #[wasm_bindgen(js_name = requestFilter)]
    pub fn request_filter(&self, kind: String) -> Result<(), JsValue> {
        let filter = parse_filter(&kind).map_err(to_js)?;
        self.dashboard.request_filter(filter);
        Ok(())
    }

    #[wasm_bindgen(js_name = requestSearch)]
    pub fn request_search(&self, term: String) {
        self.dashboard.request_search(&term);
    }

    #[wasm_bindgen(js_name = connectFeed)]
    pub fn connect_feed(&self) {
        self.dashboard.connect_feed();
    }

    #[wasm_bindgen(js_name = disconnectFeed)]
    pub fn disconnect_feed(&self) {
        self.dashboard.disconnect_feed();
    }

    /// Offline demo tick over the current collection.
    #[wasm_bindgen(js_name = simulateTick)]
    pub fn simulate_tick(&mut self) {
        self.dashboard.simulate_tick();
    }
}

/// Validates the string form of a sort request coming from JavaScript.
pub fn parse_sort_request(
    field: &str,
    direction: Option<&str>,
) -> Result<(SortField, Option<SortDirection>), AppError> {
    let field = SortField::from_str(field)
        .map_err(|_| AppError::Validation(format!("unknown sort field '{field}'")))?;
    let direction = direction
        .map(|raw| {
            SortDirection::from_str(raw)
                .map_err(|_| AppError::Validation(format!("unknown sort direction '{raw}'")))
        })
        .transpose()?;
    Ok((field, direction))
}

pub fn parse_filter(kind: &str) -> Result<FilterKind, AppError> {
    FilterKind::from_str(kind).map_err(|_| AppError::Validation(format!("unknown filter '{kind}'")))
}

fn to_js(error: AppError) -> JsValue {
    JsValue::from_str(&error.to_string())
}
