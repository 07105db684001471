//! Leptos signals mirroring the market store, for reactive consumers.

use leptos::SignalSet;

use crate::domain::events::MarketEvent;
use crate::domain::market_data::{AssetRecord, ConnectionStatus, FilterKind, SortState};
use crate::domain::state::CollectionState;

crate::global_signals! {
    pub derived_assets => derived_assets: Vec<AssetRecord> = Vec::new(),
    pub asset_count => asset_count: usize = 0,
    pub connection_status => connection_status: ConnectionStatus = ConnectionStatus::Idle,
    pub last_error => last_error: Option<String> = None,
    pub sort_state => sort_state: SortState = SortState::default(),
    pub active_filter => active_filter: FilterKind = FilterKind::All,
    pub search_term => search_term: String = String::new(),
}

/// Copies every mirrored field from `state`.
pub fn sync_globals(state: &CollectionState) {
    let g = globals();
    g.derived_assets.set(state.derived_assets().to_vec());
    g.asset_count.set(state.original_assets().len());
    g.connection_status.set(state.connection_status());
    g.last_error.set(state.last_error().map(str::to_string));
    g.sort_state.set(state.sort());
    g.active_filter.set(state.active_filter());
    g.search_term.set(state.search_term().to_string());
}

/// Store subscriber: touches only the signals the event can have changed.
pub fn apply_market_event(event: &MarketEvent, state: &CollectionState) {
    let g = globals();
    match event {
        MarketEvent::AssetsReplaced { count, .. } => {
            g.asset_count.set(*count);
            g.derived_assets.set(state.derived_assets().to_vec());
        }
        MarketEvent::SortChanged(sort) => {
            g.sort_state.set(*sort);
            g.derived_assets.set(state.derived_assets().to_vec());
        }
        MarketEvent::FilterChanged(filter) => {
            g.active_filter.set(*filter);
            g.derived_assets.set(state.derived_assets().to_vec());
        }
        MarketEvent::SearchChanged(term) => {
            g.search_term.set(term.clone());
            g.derived_assets.set(state.derived_assets().to_vec());
        }
        MarketEvent::ConnectionStatusChanged(status) => g.connection_status.set(*status),
        MarketEvent::ErrorChanged(message) => g.last_error.set(message.clone()),
    }
}
