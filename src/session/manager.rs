//! # Connection Manager
//!
//! Owns the local peer handle and the table of peer connections. Every
//! mutation happens from the single event-dispatch context, so the table
//! needs no locking.
//!
//! ## Connection lifecycle
//!
//! ```text
//! connect_to / accept_incoming      transport Opened        transport Closed
//!            |                             |                       |
//!            v                             v                       v
//!         Pending  ----------------->    Open  ----------> removed from table
//! ```
//!
//! There is no distinct Error state: transport failures are logged and the
//! connection either keeps working or reports `Closed`.

use std::collections::HashMap;

use log::{error, info, warn};
use thiserror::Error;

use crate::transport::{PeerId, PeerLink, Transport, TransportError};

/// Lifecycle state of one tracked connection. Closed connections are
/// removed from the table outright, so only the live states are modeled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// Registered, waiting for the transport to report readiness
    Pending,
    /// Transport reported open; sending and receiving are enabled
    Open,
}

/// Why a dial attempt was refused before reaching the transport.
///
/// Every variant carries a message fit for showing to the user.
#[derive(Debug, Error)]
pub enum ConnectError {
    #[error("Not connected to the signaling network yet!")]
    NotReady,

    #[error("Enter a valid peer id!")]
    EmptyTargetId,

    #[error("Already connected (or connecting) to {0}!")]
    Duplicate(String),

    #[error("Connection failed: {0}")]
    Transport(#[from] TransportError),
}

struct ManagedConnection {
    link: Box<dyn PeerLink>,
    state: ConnectionState,
}

/// Owns the local peer id and all peer connections for one session.
pub struct ConnectionManager {
    transport: Box<dyn Transport>,
    local_id: Option<PeerId>,
    connections: HashMap<PeerId, ManagedConnection>,
}

impl ConnectionManager {
    pub fn new(transport: Box<dyn Transport>) -> Self {
        Self {
            transport,
            local_id: None,
            connections: HashMap::new(),
        }
    }

    /// The locally-unique id assigned by the signaling layer, once known.
    pub fn local_id(&self) -> Option<&str> {
        self.local_id.as_deref()
    }

    /// Record the id handed out by the signaling layer.
    pub fn handle_ready(&mut self, local_id: PeerId) {
        info!("🟢 Connected to the signaling network! Local id: {}", local_id);
        self.local_id = Some(local_id);
    }

    /// Register a connection offered by a remote peer.
    ///
    /// The connection starts Pending and becomes Open when the transport
    /// reports it via [`handle_opened`](Self::handle_opened).
    pub fn accept_incoming(&mut self, link: Box<dyn PeerLink>) {
        let peer_id = link.peer_id().to_string();
        info!("🔗 Incoming connection from {}", peer_id);
        if self
            .connections
            .insert(
                peer_id.clone(),
                ManagedConnection {
                    link,
                    state: ConnectionState::Pending,
                },
            )
            .is_some()
        {
            warn!("Replaced an existing connection entry for {}", peer_id);
        }
    }

    /// Dial a remote peer.
    ///
    /// Fails fast — with a user-visible [`ConnectError`] — when the local
    /// id is not assigned yet, when `remote_id` is empty, or when an entry
    /// for `remote_id` already exists (duplicate in-flight attempts are
    /// rejected, so a race can never create two table entries).
    pub fn connect_to(&mut self, remote_id: &str) -> Result<(), ConnectError> {
        if self.local_id.is_none() {
            return Err(ConnectError::NotReady);
        }
        if remote_id.is_empty() {
            return Err(ConnectError::EmptyTargetId);
        }
        if self.connections.contains_key(remote_id) {
            return Err(ConnectError::Duplicate(remote_id.to_string()));
        }

        info!("📞 Connecting to {}...", remote_id);
        let link = self.transport.connect(remote_id)?;
        self.connections.insert(
            remote_id.to_string(),
            ManagedConnection {
                link,
                state: ConnectionState::Pending,
            },
        );
        Ok(())
    }

    /// Move a pending connection to the active set.
    pub fn handle_opened(&mut self, peer_id: &str) {
        match self.connections.get_mut(peer_id) {
            Some(conn) if conn.state == ConnectionState::Pending => {
                conn.state = ConnectionState::Open;
                info!("✅ Connected to {}", peer_id);
            }
            Some(_) => {}
            None => warn!("Open event for untracked peer {}", peer_id),
        }
    }

    /// Drop a closed connection from the table.
    ///
    /// # Returns
    /// `true` if the peer was tracked; closing an untracked peer is a no-op.
    pub fn handle_closed(&mut self, peer_id: &str) -> bool {
        if self.connections.remove(peer_id).is_some() {
            warn!("🚫 Peer {} disconnected", peer_id);
            true
        } else {
            false
        }
    }

    /// Send `text` to every open connection.
    ///
    /// No delivery confirmation, no retry, no ordering guarantee across
    /// peers. Per-link send failures are logged and skipped.
    pub fn broadcast(&self, text: &str) {
        for (peer_id, conn) in &self.connections {
            if conn.state != ConnectionState::Open {
                continue;
            }
            if let Err(e) = conn.link.send(text) {
                error!("❌ Send to {} failed: {}", peer_id, e);
            }
        }
    }

    /// Close every link and clear the table (session teardown).
    pub fn close_all(&mut self) {
        for (_, conn) in self.connections.drain() {
            conn.link.close();
        }
    }

    pub fn state_of(&self, peer_id: &str) -> Option<ConnectionState> {
        self.connections.get(peer_id).map(|c| c.state)
    }

    pub fn open_count(&self) -> usize {
        self.connections
            .values()
            .filter(|c| c.state == ConnectionState::Open)
            .count()
    }

    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }
}
