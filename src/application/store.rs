use std::cell::{Cell, Ref, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use crate::application::preferences::ViewPreferences;
use crate::domain::events::{MarketEvent, MarketEventBus};
use crate::domain::logging::LogComponent;
use crate::domain::market_data::{
    AssetRecord, ConnectionStatus, FilterKind, NoiseSource, PipelineOptions, SortDirection,
    SortField, SortState, drift_asset,
};
use crate::domain::state::CollectionState;
use crate::{log_debug, log_warn};

/// Owner of the single [`CollectionState`]. Every operation runs to completion and leaves the
/// derived view consistent. Each change is queued together with a snapshot of the state it
/// produced; [`SharedStore`] hands the queue to subscribers once the store is released.
pub struct MarketStore {
    state: CollectionState,
    preferences: ViewPreferences,
    pending: VecDeque<(MarketEvent, CollectionState)>,
}

impl MarketStore {
    /// Restores filter, search and sort from `preferences` and derives the first view from `seed`.
    pub fn new(preferences: ViewPreferences, seed: Vec<AssetRecord>, options: PipelineOptions) -> Self {
        let state = CollectionState::new(
            seed,
            preferences.load_filter(),
            preferences.load_search(),
            preferences.load_sort(),
            options,
        );
        log_debug!(
            LogComponent::Application("Store"),
            "Store ready: {} assets, filter={}, sort={}/{}",
            state.original_assets().len(),
            state.active_filter(),
            state.sort().field,
            state.sort().direction
        );
        Self { state, preferences, pending: VecDeque::new() }
    }

    pub fn into_shared(self) -> SharedStore {
        SharedStore::new(self)
    }

    fn publish(&mut self, event: MarketEvent) {
        self.pending.push_back((event, self.state.clone()));
    }

    /// Oldest change not yet handed to subscribers.
    pub(crate) fn next_change(&mut self) -> Option<(MarketEvent, CollectionState)> {
        self.pending.pop_front()
    }

    pub fn replace_assets(&mut self, batch: Vec<AssetRecord>) {
        let duplicates = self.state.replace_assets(batch);
        if duplicates > 0 {
            log_warn!(
                LogComponent::Application("Store"),
                "Dropped {duplicates} duplicate asset ids from batch"
            );
        }
        let count = self.state.original_assets().len();
        self.publish(MarketEvent::AssetsReplaced { count, duplicates });
    }

    pub fn set_connection_status(&mut self, status: ConnectionStatus) {
        if self.state.connection_status() == status {
            return;
        }
        self.state.set_connection_status(status);
        self.publish(MarketEvent::ConnectionStatusChanged(status));
    }

    pub fn set_error(&mut self, message: Option<String>) {
        if self.state.last_error() == message.as_deref() {
            return;
        }
        self.state.set_error(message.clone());
        self.publish(MarketEvent::ErrorChanged(message));
    }

    /// See [`SortState::request`] for the toggle rules. The result is persisted.
    pub fn set_sort(&mut self, field: SortField, direction: Option<SortDirection>) {
        let sort = self.state.sort().request(field, direction);
        self.state.set_sort(sort);
        self.preferences.save_sort(sort);
        self.publish(MarketEvent::SortChanged(sort));
    }

    pub fn set_filter(&mut self, filter: FilterKind) {
        self.state.set_filter(filter);
        self.preferences.save_filter(filter);
        self.publish(MarketEvent::FilterChanged(filter));
    }

    pub fn set_search_term(&mut self, term: &str) {
        self.state.set_search_term(term.to_string());
        self.preferences.save_search(term);
        self.publish(MarketEvent::SearchChanged(term.to_string()));
    }

    /// Offline ticker: jitters every record and swaps the batch in atomically.
    pub fn simulate_tick(&mut self, noise: &mut dyn NoiseSource) {
        let batch: Vec<AssetRecord> =
            self.state.original_assets().iter().map(|asset| drift_asset(asset, noise)).collect();
        self.replace_assets(batch);
    }

    pub fn state(&self) -> &CollectionState {
        &self.state
    }

    pub fn derived_assets(&self) -> &[AssetRecord] {
        self.state.derived_assets()
    }

    pub fn original_assets(&self) -> &[AssetRecord] {
        self.state.original_assets()
    }

    pub fn connection_status(&self) -> ConnectionStatus {
        self.state.connection_status()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.state.last_error()
    }

    pub fn sort_state(&self) -> SortState {
        self.state.sort()
    }

    pub fn active_filter(&self) -> FilterKind {
        self.state.active_filter()
    }

    pub fn search_term(&self) -> &str {
        self.state.search_term()
    }
}

struct SharedInner {
    store: RefCell<MarketStore>,
    events: MarketEventBus,
    publishing: Cell<bool>,
}

/// Store shared between the feed client and the consumer API on the UI thread.
///
/// Writes go through [`SharedStore::update`]. Subscribers run only after the write has released
/// the store, so they may read it, write to it or drive the feed from inside a handler.
#[derive(Clone)]
pub struct SharedStore {
    inner: Rc<SharedInner>,
}

impl SharedStore {
    pub fn new(store: MarketStore) -> Self {
        Self {
            inner: Rc::new(SharedInner {
                store: RefCell::new(store),
                events: MarketEventBus::new(),
                publishing: Cell::new(false),
            }),
        }
    }

    pub fn borrow(&self) -> Ref<'_, MarketStore> {
        self.inner.store.borrow()
    }

    pub fn subscribe<F>(&self, handler: F)
    where
        F: Fn(&MarketEvent, &CollectionState) + 'static,
    {
        self.inner.events.subscribe(handler);
    }

    /// Applies `f` and then delivers every change it queued, in order.
    pub fn update<R>(&self, f: impl FnOnce(&mut MarketStore) -> R) -> R {
        let result = {
            let mut store = self.inner.store.borrow_mut();
            f(&mut *store)
        };
        self.flush();
        result
    }

    /// A nested flush (an update made from inside a handler) leaves its changes to the
    /// flush already running, which keeps delivery in order.
    fn flush(&self) {
        if self.inner.publishing.replace(true) {
            return;
        }
        loop {
            let next = self.inner.store.borrow_mut().next_change();
            let Some((event, snapshot)) = next else {
                break;
            };
            self.inner.events.publish(&event, &snapshot);
        }
        self.inner.publishing.set(false);
    }
}
