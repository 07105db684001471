pub mod config;
pub mod dashboard;
pub mod feed_client;
pub mod preferences;
pub mod reconnect;
pub mod store;

pub use config::*;
pub use dashboard::*;
pub use feed_client::*;
pub use preferences::*;
pub use reconnect::*;
pub use store::*;
