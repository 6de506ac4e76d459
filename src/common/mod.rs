//! # Common Components
//!
//! Shared data structures used by every other module.
//!
//! ## Modules
//!
//! - [`packet`]: The position packet wire format and its codec
//! - [`config`]: TOML configuration loading with defaults

pub mod config;
pub mod packet;

pub use config::SyncConfig;
pub use packet::{DecodeError, PositionPacket};
