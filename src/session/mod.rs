//! # Session Components
//!
//! The session layer is split into two parts:
//!
//! ## Connection Manager ([`manager`])
//! Owns the local peer id and the table of peer connections, with their
//! `Pending -> Open -> Closed` lifecycle, fail-fast dialing and broadcast.
//!
//! ## Sync Session ([`sync`])
//! Ties the connection manager, the packet codec and the remote player
//! registry together: dispatches transport events and broadcasts the local
//! pose once per game tick.

pub mod manager;
pub mod sync;

pub use manager::{ConnectError, ConnectionManager, ConnectionState};
pub use sync::SyncSession;
