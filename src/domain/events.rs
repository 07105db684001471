use std::cell::RefCell;
use std::fmt::Debug;
use std::rc::Rc;

use crate::domain::market_data::{ConnectionStatus, FilterKind, SortState};
use crate::domain::state::CollectionState;

/// Changes published by the market store after each mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum MarketEvent {
    AssetsReplaced { count: usize, duplicates: usize },
    SortChanged(SortState),
    FilterChanged(FilterKind),
    SearchChanged(String),
    ConnectionStatusChanged(ConnectionStatus),
    ErrorChanged(Option<String>),
}

type MarketHandler = Rc<dyn Fn(&MarketEvent, &CollectionState)>;

/// Synchronous fan-out; handlers see the state as it was right after the change.
///
/// The handler list is copied before each publish, so a handler may subscribe further
/// handlers. Those start with the next event.
#[derive(Default)]
pub struct MarketEventBus {
    handlers: RefCell<Vec<MarketHandler>>,
}

impl MarketEventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&self, handler: F)
    where
        F: Fn(&MarketEvent, &CollectionState) + 'static,
    {
        self.handlers.borrow_mut().push(Rc::new(handler));
    }

    pub fn publish(&self, event: &MarketEvent, state: &CollectionState) {
        let handlers = self.handlers.borrow().clone();
        for handler in handlers {
            handler(event, state);
        }
    }
}

impl Debug for MarketEventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MarketEventBus").field("handlers", &self.handlers.borrow().len()).finish()
    }
}
