pub mod connection;
pub mod message;
pub mod view;

pub use connection::ConnectionState;
pub use message::LogMessage;
pub use view::{RenderedLine, ViewState};
