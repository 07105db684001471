use std::collections::HashSet;

use crate::domain::market_data::{
    AssetRecord, ConnectionStatus, FilterKind, PipelineOptions, SortState, derive_view,
};

/// Authoritative collection plus the view inputs it is derived with.
///
/// Fields are private; every change goes through a method that re-derives the view before
/// returning, so `derived_assets` never lags the other inputs.
#[derive(Debug, Clone, Default)]
pub struct CollectionState {
    original_assets: Vec<AssetRecord>,
    derived_assets: Vec<AssetRecord>,
    connection_status: ConnectionStatus,
    last_error: Option<String>,
    sort: SortState,
    active_filter: FilterKind,
    search_term: String,
    options: PipelineOptions,
}

impl CollectionState {
    pub fn new(
        seed: Vec<AssetRecord>,
        active_filter: FilterKind,
        search_term: String,
        sort: SortState,
        options: PipelineOptions,
    ) -> Self {
        let mut state = Self {
            original_assets: Vec::new(),
            derived_assets: Vec::new(),
            connection_status: ConnectionStatus::Idle,
            last_error: None,
            sort,
            active_filter,
            search_term,
            options,
        };
        state.replace_assets(seed);
        state
    }

    /// Replaces the whole collection. Duplicate ids collapse to their first occurrence.
    /// Returns the number of records dropped as duplicates.
    pub fn replace_assets(&mut self, batch: Vec<AssetRecord>) -> usize {
        let incoming = batch.len();
        let mut seen = HashSet::with_capacity(incoming);
        self.original_assets = batch.into_iter().filter(|asset| seen.insert(asset.id.clone())).collect();
        self.rederive();
        incoming - self.original_assets.len()
    }

    pub fn set_sort(&mut self, sort: SortState) {
        self.sort = sort;
        self.rederive();
    }

    pub fn set_filter(&mut self, filter: FilterKind) {
        self.active_filter = filter;
        self.rederive();
    }

    pub fn set_search_term(&mut self, term: String) {
        self.search_term = term;
        self.rederive();
    }

    pub fn set_connection_status(&mut self, status: ConnectionStatus) {
        self.connection_status = status;
    }

    pub fn set_error(&mut self, message: Option<String>) {
        self.last_error = message;
    }

    fn rederive(&mut self) {
        self.derived_assets = derive_view(
            &self.original_assets,
            self.active_filter,
            &self.search_term,
            self.sort,
            self.options,
        );
    }

    pub fn original_assets(&self) -> &[AssetRecord] {
        &self.original_assets
    }

    pub fn derived_assets(&self) -> &[AssetRecord] {
        &self.derived_assets
    }

    pub fn connection_status(&self) -> ConnectionStatus {
        self.connection_status
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn sort(&self) -> SortState {
        self.sort
    }

    pub fn active_filter(&self) -> FilterKind {
        self.active_filter
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }
}
