mod common;

use std::cell::RefCell;
use std::rc::Rc;

use common::{SeededNoise, asset, btc_eth, ids, store_with};
use crypto_ticker_wasm::application::{FILTER_KEY, SEARCH_KEY, SORT_KEY};
use crypto_ticker_wasm::domain::events::MarketEvent;
use crypto_ticker_wasm::domain::market_data::{
    ConnectionStatus, FilterKind, SortDirection, SortField, SortState,
};
use crypto_ticker_wasm::infrastructure::MemoryPreferences;

#[test]
fn losers_filter_keeps_negative_movers() {
    let mut store = store_with(Rc::new(MemoryPreferences::new()), Vec::new());
    store.replace_assets(btc_eth());
    store.set_filter(FilterKind::Losers);
    assert_eq!(ids(store.derived_assets()), ["eth"]);
    assert_eq!(ids(store.original_assets()), ["btc", "eth"]);
}

#[test]
fn sorting_by_price_from_default_is_ascending() {
    let mut store = store_with(Rc::new(MemoryPreferences::new()), btc_eth());
    store.set_sort(SortField::Price, None);
    assert_eq!(store.sort_state(), SortState::new(SortField::Price, SortDirection::Asc));
    assert_eq!(ids(store.derived_assets()), ["eth", "btc"]);
}

#[test]
fn same_field_toggles_and_explicit_direction_is_idempotent() {
    let mut store = store_with(Rc::new(MemoryPreferences::new()), btc_eth());
    store.set_sort(SortField::Price, None);
    store.set_sort(SortField::Price, None);
    assert_eq!(store.sort_state().direction, SortDirection::Desc);
    assert_eq!(ids(store.derived_assets()), ["btc", "eth"]);

    store.set_sort(SortField::Name, Some(SortDirection::Desc));
    let once = (store.sort_state(), ids(store.derived_assets()));
    store.set_sort(SortField::Name, Some(SortDirection::Desc));
    assert_eq!((store.sort_state(), ids(store.derived_assets())), once);
}

#[test]
fn duplicate_ids_collapse_to_first_occurrence() {
    let mut store = store_with(Rc::new(MemoryPreferences::new()), Vec::new());
    store.replace_assets(vec![
        asset("btc", 100.0, 1.0, 1),
        asset("btc", 999.0, 1.0, 2),
        asset("eth", 50.0, 1.0, 3),
    ]);
    assert_eq!(ids(store.original_assets()), ["btc", "eth"]);
    assert_eq!(store.original_assets()[0].price, 100.0);
}

#[test]
fn empty_batch_empties_the_view() {
    let mut store = store_with(Rc::new(MemoryPreferences::new()), btc_eth());
    store.replace_assets(Vec::new());
    assert!(store.derived_assets().is_empty());
}

#[test]
fn search_is_trimmed_and_case_insensitive() {
    let mut store = store_with(Rc::new(MemoryPreferences::new()), btc_eth());
    store.set_search_term("  ETh ");
    assert_eq!(ids(store.derived_assets()), ["eth"]);
    store.set_search_term("   ");
    assert_eq!(ids(store.derived_assets()), ["btc", "eth"]);
}

#[test]
fn view_choices_are_persisted() {
    let prefs = Rc::new(MemoryPreferences::new());
    let mut store = store_with(prefs.clone(), btc_eth());
    store.set_filter(FilterKind::Gainers);
    store.set_search_term("bt");
    store.set_sort(SortField::Price, Some(SortDirection::Desc));

    assert_eq!(prefs.get(FILTER_KEY).as_deref(), Some("gainers"));
    assert_eq!(prefs.get(SEARCH_KEY).as_deref(), Some("bt"));
    insta::assert_snapshot!(prefs.get(SORT_KEY).unwrap_or_default(), @r###"{"field":"price","direction":"desc"}"###);
}

#[test]
fn persisted_choices_are_restored() {
    let prefs = Rc::new(MemoryPreferences::with_entries([
        (FILTER_KEY, "losers"),
        (SEARCH_KEY, "e"),
        (SORT_KEY, r#"{"field":"priceChange24h","direction":"desc"}"#),
    ]));
    let store = store_with(prefs, btc_eth());
    assert_eq!(store.active_filter(), FilterKind::Losers);
    assert_eq!(store.search_term(), "e");
    assert_eq!(store.sort_state(), SortState::new(SortField::PriceChange24h, SortDirection::Desc));
    assert_eq!(ids(store.derived_assets()), ["eth"]);
}

#[test]
fn unreadable_preferences_fall_back_to_defaults() {
    let prefs = Rc::new(MemoryPreferences::with_entries([
        (FILTER_KEY, "sideways"),
        (SORT_KEY, "{not json"),
    ]));
    let store = store_with(prefs.clone(), btc_eth());
    assert_eq!(store.active_filter(), FilterKind::All);
    assert_eq!(store.sort_state(), SortState::default());

    prefs.fail_reads(true);
    let store = store_with(prefs, btc_eth());
    assert_eq!(store.search_term(), "");
    assert_eq!(ids(store.derived_assets()), ["btc", "eth"]);
}

#[test]
fn failed_writes_do_not_block_the_change() {
    let prefs = Rc::new(MemoryPreferences::new());
    prefs.fail_writes(true);
    let mut store = store_with(prefs.clone(), btc_eth());
    store.set_filter(FilterKind::Gainers);
    assert_eq!(ids(store.derived_assets()), ["btc"]);
    assert_eq!(prefs.get(FILTER_KEY), None);
}

#[test]
fn subscribers_see_the_state_after_each_change() {
    let store = store_with(Rc::new(MemoryPreferences::new()), Vec::new()).into_shared();
    let seen: Rc<RefCell<Vec<(MarketEvent, usize)>>> = Rc::default();
    let sink = seen.clone();
    store.subscribe(move |event, state| {
        sink.borrow_mut().push((event.clone(), state.derived_assets().len()));
    });

    store.update(|s| {
        s.replace_assets(btc_eth());
        s.set_filter(FilterKind::Gainers);
    });
    store.update(|s| s.set_connection_status(ConnectionStatus::Loading));
    store.update(|s| s.set_connection_status(ConnectionStatus::Loading));
    store.update(|s| s.set_error(Some("boom".into())));

    let seen = seen.borrow();
    assert_eq!(
        *seen,
        vec![
            (MarketEvent::AssetsReplaced { count: 2, duplicates: 0 }, 2),
            (MarketEvent::FilterChanged(FilterKind::Gainers), 1),
            (MarketEvent::ConnectionStatusChanged(ConnectionStatus::Loading), 1),
            (MarketEvent::ErrorChanged(Some("boom".into())), 1),
        ]
    );
}

#[test]
fn subscribers_can_read_and_write_the_store() {
    let store = store_with(Rc::new(MemoryPreferences::new()), btc_eth()).into_shared();
    let views: Rc<RefCell<Vec<Vec<String>>>> = Rc::default();
    let sink = views.clone();
    let handle = store.clone();
    store.subscribe(move |event, _| {
        sink.borrow_mut().push(ids(handle.borrow().derived_assets()));
        if let MarketEvent::SearchChanged(term) = event {
            if term == "b" {
                handle.update(|s| s.set_filter(FilterKind::Gainers));
            }
        }
    });

    store.update(|s| s.set_search_term("b"));

    assert_eq!(store.borrow().active_filter(), FilterKind::Gainers);
    assert_eq!(*views.borrow(), [vec!["btc".to_string()], vec!["btc".to_string()]]);
}

#[test]
fn simulated_tick_replaces_every_record() {
    let mut store = store_with(Rc::new(MemoryPreferences::new()), btc_eth());
    let before = store.original_assets().to_vec();
    store.simulate_tick(&mut SeededNoise::new(7));

    let after = store.original_assets();
    assert_eq!(ids(after), ids(&before));
    for (old, new) in before.iter().zip(after) {
        assert!((new.price / old.price - 1.0).abs() <= 0.0201);
        assert!(new.price_change_24h.abs() <= 5.0);
        assert!(new.price_change_7d.abs() <= 10.0);
    }
}
