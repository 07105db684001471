pub mod services;
pub mod storage;
pub mod timers;
pub mod websocket;

pub use services::*;
pub use storage::*;
pub use timers::*;
