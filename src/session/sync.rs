//! # Sync Session
//!
//! The glue object for one player's network session. It owns the
//! [`ConnectionManager`] and the [`RemotePlayerRegistry`] and is the single
//! entry point for the two external drivers:
//!
//! - the transport's event stream, fed through [`SyncSession::handle_event`]
//!   (or drained in a batch with [`SyncSession::drain_events`]);
//! - the game loop tick, which calls [`SyncSession::tick`] with a read-only
//!   snapshot of the local player's pose.
//!
//! Everything runs on the caller's single logical thread; nothing here
//! blocks or locks.

use log::{error, warn};
use tokio::sync::mpsc::UnboundedReceiver;

use crate::common::config::SyncConfig;
use crate::common::packet::PositionPacket;
use crate::scene::{PlayerPose, RemotePlayerRegistry, Scene};
use crate::session::manager::{ConnectError, ConnectionManager};
use crate::transport::{Transport, TransportEvent};

/// One player's position-sync session.
pub struct SyncSession {
    manager: ConnectionManager,
    registry: RemotePlayerRegistry,
}

impl SyncSession {
    /// Create a session with stock configuration.
    pub fn new(transport: Box<dyn Transport>) -> Self {
        Self::with_config(transport, &SyncConfig::default())
    }

    /// Create a session with explicit configuration.
    pub fn with_config(transport: Box<dyn Transport>, config: &SyncConfig) -> Self {
        Self {
            manager: ConnectionManager::new(transport),
            registry: RemotePlayerRegistry::with_lerp_factor(config.lerp_factor),
        }
    }

    /// The local peer id, once the signaling layer has assigned one.
    pub fn local_id(&self) -> Option<&str> {
        self.manager.local_id()
    }

    /// Dial a remote peer. See [`ConnectionManager::connect_to`].
    pub fn connect_to(&mut self, remote_id: &str) -> Result<(), ConnectError> {
        self.manager.connect_to(remote_id)
    }

    /// Dispatch one transport event.
    pub fn handle_event(&mut self, scene: &mut dyn Scene, event: TransportEvent) {
        match event {
            TransportEvent::Ready { local_id } => self.manager.handle_ready(local_id),
            TransportEvent::Incoming { link } => self.manager.accept_incoming(link),
            TransportEvent::Opened { peer_id } => self.manager.handle_opened(&peer_id),
            TransportEvent::Data { from, text } => match PositionPacket::decode(&text) {
                Ok(packet) => self.registry.apply_packet(scene, &packet),
                // one corrupt packet never takes the connection down
                Err(e) => warn!("⚠️ Dropping bad packet from {}: {}", from, e),
            },
            TransportEvent::Closed { peer_id } => {
                if self.manager.handle_closed(&peer_id) {
                    self.registry.remove_peer(scene, &peer_id);
                }
            }
            TransportEvent::Error { message } => error!("❌ Transport error: {}", message),
        }
    }

    /// Dispatch every event currently queued on `events`.
    pub fn drain_events(
        &mut self,
        scene: &mut dyn Scene,
        events: &mut UnboundedReceiver<TransportEvent>,
    ) {
        while let Ok(event) = events.try_recv() {
            self.handle_event(scene, event);
        }
    }

    /// Broadcast the local player's pose, called once per game tick.
    ///
    /// Skipped entirely while the local id is unknown or no connection is
    /// open, so an idle session costs nothing.
    pub fn tick(&mut self, pose: &PlayerPose) {
        let local_id = match self.manager.local_id() {
            Some(id) => id.to_string(),
            None => return,
        };
        if self.manager.open_count() == 0 {
            return;
        }

        let packet = PositionPacket {
            id: local_id,
            x: pose.position.x,
            y: pose.position.y,
            z: pose.position.z,
            ry: pose.rotation_y,
        };
        match packet.encode() {
            Ok(text) => self.manager.broadcast(&text),
            Err(e) => error!("❌ Failed to encode position packet: {}", e),
        }
    }

    /// Close every connection and clear the tables (session teardown).
    pub fn shutdown(&mut self) {
        self.manager.close_all();
    }

    pub fn manager(&self) -> &ConnectionManager {
        &self.manager
    }

    pub fn registry(&self) -> &RemotePlayerRegistry {
        &self.registry
    }
}
