//! # Transport Seam
//!
//! The signaling/transport collaborator is external — NAT traversal,
//! signaling servers and connection negotiation all live behind it. This
//! module defines the narrow interface the rest of the crate consumes:
//!
//! - [`Transport`]: open an outbound link to a remote peer id
//! - [`PeerLink`]: send text on an established link, close it
//! - [`TransportEvent`]: the inbound event stream (ready, incoming link,
//!   link opened, data received, link closed, error), delivered over a
//!   tokio unbounded channel owned by whoever created the endpoint
//!
//! [`memory`] provides an in-process loopback implementation used by the
//! tests and the demo binary.

pub mod memory;

use thiserror::Error;

/// Opaque string naming one participant in the mesh, assigned by the
/// signaling collaborator.
pub type PeerId = String;

/// Errors surfaced by a transport implementation.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("unknown peer id: {0}")]
    UnknownPeer(String),

    #[error("link to {0} is closed")]
    LinkClosed(String),

    #[error("send to {0} failed")]
    SendFailed(String),
}

/// One established (or establishing) connection to a remote peer.
///
/// A link starts out pending; it may only be used for sending once the
/// event stream has reported [`TransportEvent::Opened`] for its peer.
pub trait PeerLink: Send {
    /// Id of the remote peer this link points at.
    fn peer_id(&self) -> &str;

    /// Send one text payload. No delivery confirmation, no retry.
    fn send(&self, text: &str) -> Result<(), TransportError>;

    /// Close the link. Both sides will observe [`TransportEvent::Closed`].
    fn close(&self);
}

impl std::fmt::Debug for dyn PeerLink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PeerLink")
            .field("peer_id", &self.peer_id())
            .finish()
    }
}

/// Outbound half of the collaborator: dial a remote peer.
pub trait Transport: Send {
    /// Request an outbound link to `remote_id`.
    ///
    /// The returned link is pending until the event stream reports
    /// `Opened` for that peer.
    fn connect(&mut self, remote_id: &str) -> Result<Box<dyn PeerLink>, TransportError>;
}

/// Inbound events pushed by the transport collaborator.
pub enum TransportEvent {
    /// The signaling layer assigned us a locally-unique peer id
    Ready { local_id: PeerId },
    /// A remote peer offered us a connection
    Incoming { link: Box<dyn PeerLink> },
    /// A pending link (either direction) is now open for traffic
    Opened { peer_id: PeerId },
    /// Text payload received from an open link
    Data { from: PeerId, text: String },
    /// A link was closed by either side
    Closed { peer_id: PeerId },
    /// Transport-level failure; logged by the consumer, nothing more
    Error { message: String },
}
