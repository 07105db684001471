use super::entities::{AssetRecord, SortKey, compare_numbers};
use super::value_objects::{FilterKind, SortDirection, SortField, SortState};
use std::cmp::Ordering;

/// Switches that change how the pipeline treats filters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineOptions {
    /// `volume` / `marketcap` filters also order the view descending by their column.
    pub filter_sorts_view: bool,
}

/// Filter -> search -> stable sort. Pure: the input slice is never modified.
pub fn derive_view(
    original: &[AssetRecord],
    filter: FilterKind,
    search_term: &str,
    sort: SortState,
    options: PipelineOptions,
) -> Vec<AssetRecord> {
    let needle = search_term.trim().to_lowercase();

    let mut view: Vec<AssetRecord> = original
        .iter()
        .filter(|asset| passes_filter(asset, filter))
        .filter(|asset| needle.is_empty() || asset.matches_lowercase(&needle))
        .cloned()
        .collect();

    let effective = match filter.implied_sort() {
        Some(field) if options.filter_sorts_view => SortState::new(field, SortDirection::Desc),
        _ => sort,
    };
    sort_assets(&mut view, effective);
    view
}

fn passes_filter(asset: &AssetRecord, filter: FilterKind) -> bool {
    match filter {
        FilterKind::Gainers => asset.is_gainer(),
        FilterKind::Losers => asset.is_loser(),
        FilterKind::All | FilterKind::Volume | FilterKind::MarketCap => true,
    }
}

/// Stable in-place sort; ties keep their relative order in both directions.
pub fn sort_assets(assets: &mut [AssetRecord], sort: SortState) {
    assets.sort_by(|a, b| {
        let ordering = compare_by(a, b, sort.field);
        match sort.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
}

fn compare_by(a: &AssetRecord, b: &AssetRecord, field: SortField) -> Ordering {
    match (a.sort_key(field), b.sort_key(field)) {
        (SortKey::Number(x), SortKey::Number(y)) => compare_numbers(x, y),
        (SortKey::Text(x), SortKey::Text(y)) => locale_compare(x, y),
        (SortKey::Number(_), SortKey::Text(_)) => Ordering::Less,
        (SortKey::Text(_), SortKey::Number(_)) => Ordering::Greater,
    }
}

#[cfg(target_arch = "wasm32")]
fn locale_compare(a: &str, b: &str) -> Ordering {
    let result = js_sys::JsString::from(a).locale_compare(
        b,
        &js_sys::Array::new(),
        &js_sys::Object::new(),
    );
    result.cmp(&0)
}

/// Case-folded ordering; lowercase wins ties the way ICU collation does.
#[cfg(not(target_arch = "wasm32"))]
fn locale_compare(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase()).then_with(|| b.cmp(a))
}
