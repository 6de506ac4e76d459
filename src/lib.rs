pub mod common;
pub mod scene;
pub mod session;
pub mod transport;
pub mod ui;

pub use common::packet::PositionPacket;
pub use session::SyncSession;
