pub mod config;
pub mod error;
pub mod machine;
pub mod manager;
pub mod transport;
pub mod ws;

pub use config::Config;
pub use error::{Error, Result};
pub use machine::{ConnEvent, Effect};
pub use manager::ConnectionManager;
pub use transport::{SessionEvent, SessionHandle, Transport};
pub use ws::WsTransport;
