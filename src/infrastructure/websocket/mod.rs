//! Binance ticker stream: wire DTOs, the message normalizer and the browser socket transport.

pub mod binance_client;
pub mod dto;
pub mod transport;

pub use binance_client::*;
pub use dto::*;
pub use transport::*;
