//! # Position Packet Codec
//!
//! Defines the single wire message exchanged between peers and its JSON
//! codec.
//!
//! ## Wire Format
//!
//! One packet type, JSON text, no framing beyond what the transport
//! provides:
//! ```text
//! {"id":"<peer id>","x":1.0,"y":0.0,"z":-3.5,"ry":1.57}
//! ```
//!
//! No versioning, no checksum, no compression. A packet that fails to
//! decode is reported as a [`DecodeError`] so the caller can log it and
//! drop it — one corrupt packet never terminates a connection.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The per-tick pose report for one player.
///
/// One instance is built per outgoing tick from the local player's pose and
/// broadcast to every open connection. Field names are the wire format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionPacket {
    /// Peer id of the player this pose belongs to
    pub id: String,
    pub x: f32,
    pub y: f32,
    pub z: f32,
    /// Rotation around the vertical axis, radians
    pub ry: f32,
}

/// Why an inbound packet was rejected.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Not JSON, or JSON of the wrong shape (missing/mistyped fields)
    #[error("malformed position packet: {0}")]
    Malformed(#[from] serde_json::Error),

    /// Parsed fine but carries no peer id to key a proxy on
    #[error("position packet has an empty peer id")]
    EmptyId,
}

impl PositionPacket {
    /// Serialize this packet to its JSON wire text.
    ///
    /// # Returns
    /// - `Ok(String)`: The JSON encoding, stable field order
    /// - `Err`: Serialization failed (does not happen for finite floats)
    pub fn encode(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse wire text received from a peer back into a packet.
    ///
    /// # Returns
    /// - `Ok(PositionPacket)`: Successfully decoded
    /// - `Err(DecodeError)`: Malformed input or empty `id`; the caller logs
    ///   and discards the packet and carries on
    pub fn decode(text: &str) -> Result<Self, DecodeError> {
        let packet: PositionPacket = serde_json::from_str(text)?;
        if packet.id.is_empty() {
            return Err(DecodeError::EmptyId);
        }
        Ok(packet)
    }
}
