use crate::application::config::FeedConfig;
use crate::application::feed_client::{FeedClient, FeedHandle, FeedPhase, FeedRuntime};
use crate::application::preferences::ViewPreferences;
use crate::application::store::{MarketStore, SharedStore};
use crate::domain::events::MarketEvent;
use crate::domain::logging::LogComponent;
use crate::domain::market_data::{
    AssetRecord, ConnectionStatus, FilterKind, NoiseSource, PreferenceRepository, SortDirection,
    SortField, SortState, catalog,
};
use crate::domain::state::CollectionState;
use crate::log_info;

/// Composition root: one store, one feed client, the consumer read/write API on top.
pub struct MarketDashboard {
    store: SharedStore,
    feed: FeedHandle,
    tick_noise: Box<dyn NoiseSource>,
}

impl MarketDashboard {
    pub fn new(
        config: FeedConfig,
        preferences: Box<dyn PreferenceRepository>,
        runtime: FeedRuntime,
        tick_noise: Box<dyn NoiseSource>,
    ) -> Self {
        let seed = if config.bootstrap_sample { catalog::bootstrap_assets() } else { Vec::new() };
        let store = MarketStore::new(ViewPreferences::new(preferences), seed, config.pipeline_options())
            .into_shared();
        log_info!(
            LogComponent::Application("Dashboard"),
            "Dashboard ready, tracking {} symbols against {}",
            config.tracked_symbols.len(),
            config.quote_asset
        );
        let feed = FeedHandle::new(FeedClient::new(config, store.clone(), runtime));
        Self { store, feed, tick_noise }
    }

    pub fn store(&self) -> SharedStore {
        self.store.clone()
    }

    pub fn feed(&self) -> &FeedHandle {
        &self.feed
    }

    pub fn subscribe<F>(&self, handler: F)
    where
        F: Fn(&MarketEvent, &CollectionState) + 'static,
    {
        self.store.subscribe(handler);
    }

    pub fn get_derived_assets(&self) -> Vec<AssetRecord> {
        self.store.borrow().derived_assets().to_vec()
    }

    pub fn connection_status(&self) -> ConnectionStatus {
        self.store.borrow().connection_status()
    }

    pub fn last_error(&self) -> Option<String> {
        self.store.borrow().last_error().map(str::to_string)
    }

    pub fn sort_state(&self) -> SortState {
        self.store.borrow().sort_state()
    }

    pub fn active_filter(&self) -> FilterKind {
        self.store.borrow().active_filter()
    }

    pub fn search_term(&self) -> String {
        self.store.borrow().search_term().to_string()
    }

    pub fn is_connected(&self) -> bool {
        self.feed.is_connected()
    }

    pub fn feed_phase(&self) -> FeedPhase {
        self.feed.phase()
    }

    pub fn request_sort(&self, field: SortField, direction: Option<SortDirection>) {
        self.store.update(|store| store.set_sort(field, direction));
    }

    pub fn request_filter(&self, filter: FilterKind) {
        self.store.update(|store| store.set_filter(filter));
    }

    pub fn request_search(&self, term: &str) {
        self.store.update(|store| store.set_search_term(term));
    }

    pub fn connect_feed(&self) {
        self.feed.connect();
    }

    pub fn disconnect_feed(&self) {
        self.feed.disconnect();
    }

    pub fn simulate_tick(&mut self) {
        let noise = self.tick_noise.as_mut();
        self.store.update(|store| store.simulate_tick(noise));
    }
}
