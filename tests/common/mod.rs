#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use crypto_ticker_wasm::application::{
    FeedClient, FeedConfig, FeedDispatch, FeedEvent, FeedHandle, FeedRuntime, FeedTransport,
    MarketStore, ReconnectScheduler, SharedStore, ViewPreferences,
};
use crypto_ticker_wasm::domain::errors::{AppError, FeedResult};
use crypto_ticker_wasm::domain::market_data::{
    AssetRecord, ChartSeries, FixedNoise, NoiseSource, PipelineOptions,
};
use crypto_ticker_wasm::infrastructure::MemoryPreferences;
use crypto_ticker_wasm::infrastructure::websocket::BinanceTickerNormalizer;

/// Deterministic xorshift64* generator.
#[derive(Debug, Clone)]
pub struct SeededNoise {
    state: u64,
}

impl SeededNoise {
    pub fn new(seed: u64) -> Self {
        // xorshift state must be non-zero
        Self { state: seed.max(1) }
    }
}

impl NoiseSource for SeededNoise {
    fn next_unit(&mut self) -> f64 {
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        let bits = x.wrapping_mul(0x2545_F491_4F6C_DD1D) >> 11;
        bits as f64 / (1u64 << 53) as f64
    }
}

pub fn asset(id: &str, price: f64, change_24h: f64, rank: u32) -> AssetRecord {
    AssetRecord {
        id: id.to_string(),
        rank,
        name: id.to_string(),
        symbol: id.to_uppercase(),
        logo_url: String::new(),
        price,
        price_change_1h: change_24h / 3.0,
        price_change_24h: change_24h,
        price_change_7d: change_24h * 2.0,
        market_cap: price * 1_000.0,
        volume_24h: price * 10.0,
        circulating_supply: 1_000.0,
        max_supply: None,
        chart_series: ChartSeries::default(),
    }
}

pub fn btc_eth() -> Vec<AssetRecord> {
    vec![asset("btc", 100.0, 5.0, 1), asset("eth", 50.0, -3.0, 2)]
}

pub fn ids(assets: &[AssetRecord]) -> Vec<String> {
    assets.iter().map(|a| a.id.clone()).collect()
}

pub fn store_with(prefs: Rc<MemoryPreferences>, seed: Vec<AssetRecord>) -> MarketStore {
    MarketStore::new(ViewPreferences::new(Box::new(prefs)), seed, PipelineOptions::default())
}

#[derive(Debug, Default)]
pub struct TransportLog {
    pub opened: Vec<String>,
    pub closes: usize,
    pub fail_next_open: bool,
    /// Report `Opened` synchronously from inside `open`.
    pub open_immediately: bool,
}

pub struct FakeTransport(pub Rc<RefCell<TransportLog>>);

impl FeedTransport for FakeTransport {
    fn open(&mut self, url: &str, dispatch: FeedDispatch) -> FeedResult<()> {
        let immediate = {
            let mut log = self.0.borrow_mut();
            if log.fail_next_open {
                log.fail_next_open = false;
                return Err(AppError::Network("refused".into()));
            }
            log.opened.push(url.to_string());
            log.open_immediately
        };
        if immediate {
            dispatch(FeedEvent::Opened);
        }
        Ok(())
    }

    fn close(&mut self) {
        self.0.borrow_mut().closes += 1;
    }
}

#[derive(Default)]
pub struct SchedulerLog {
    pub delays: Vec<Duration>,
    pub cancels: usize,
    pub pending: Option<FeedDispatch>,
}

pub struct ManualScheduler(pub Rc<RefCell<SchedulerLog>>);

impl ReconnectScheduler for ManualScheduler {
    fn schedule(&mut self, delay: Duration, dispatch: FeedDispatch) {
        let mut log = self.0.borrow_mut();
        log.delays.push(delay);
        log.pending = Some(dispatch);
    }

    fn cancel(&mut self) {
        let mut log = self.0.borrow_mut();
        log.cancels += 1;
        log.pending = None;
    }
}

/// Fires the pending reconnect timer, if any. Returns whether one was pending.
pub fn fire_timer(scheduler: &Rc<RefCell<SchedulerLog>>) -> bool {
    let pending = scheduler.borrow_mut().pending.take();
    match pending {
        Some(dispatch) => {
            dispatch(FeedEvent::ReconnectDue);
            true
        }
        None => false,
    }
}

pub struct FeedRig {
    pub store: SharedStore,
    pub feed: FeedHandle,
    pub transport: Rc<RefCell<TransportLog>>,
    pub scheduler: Rc<RefCell<SchedulerLog>>,
}

pub fn fake_runtime(
    config: &FeedConfig,
    transport: &Rc<RefCell<TransportLog>>,
    scheduler: &Rc<RefCell<SchedulerLog>>,
) -> FeedRuntime {
    FeedRuntime {
        transport: Box::new(FakeTransport(transport.clone())),
        scheduler: Box::new(ManualScheduler(scheduler.clone())),
        normalizer: Box::new(BinanceTickerNormalizer::from_config(config)),
        noise: Box::new(FixedNoise(0.5)),
    }
}

pub fn feed_rig() -> FeedRig {
    let config = FeedConfig::default();
    let transport = Rc::new(RefCell::new(TransportLog::default()));
    let scheduler = Rc::new(RefCell::new(SchedulerLog::default()));
    let store = store_with(Rc::new(MemoryPreferences::new()), Vec::new()).into_shared();
    let runtime = fake_runtime(&config, &transport, &scheduler);
    let feed = FeedHandle::new(FeedClient::new(config, store.clone(), runtime));
    FeedRig { store, feed, transport, scheduler }
}

pub fn ticker_json(symbol: &str, last: &str, change: &str) -> String {
    format!(
        r#"{{"e":"24hrTicker","s":"{symbol}","c":"{last}","P":"{change}","o":"100","h":"130","l":"90","v":"2500","q":"300000"}}"#
    )
}

pub fn ticker_array(entries: &[String]) -> String {
    format!("[{}]", entries.join(","))
}
