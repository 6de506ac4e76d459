//! # Remote Player Registry
//!
//! Maps peer ids to renderable proxies and keeps them tracking the latest
//! reported pose.
//!
//! ## Behavior
//!
//! - First packet from an unseen peer creates exactly one proxy at the
//!   packet's raw position — no blending on first sight.
//! - Every later packet blends the proxy's position toward the reported one
//!   with a fixed lerp factor (0.3 by default), never a full teleport.
//!   Rotation is set directly, no smoothing.
//! - When a peer's connection closes its proxy is removed from the scene.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use log::info;

use crate::common::packet::PositionPacket;
use crate::transport::PeerId;

use super::{ProxyHandle, Scene, Vec3};

/// Stock blend coefficient per received update.
pub const DEFAULT_LERP_FACTOR: f32 = 0.3;

/// Tracked state for one remote player.
struct RemotePlayer {
    handle: ProxyHandle,
    position: Vec3,
    rotation_y: f32,
}

/// Registry of remote player proxies, at most one per peer id.
pub struct RemotePlayerRegistry {
    lerp_factor: f32,
    players: HashMap<PeerId, RemotePlayer>,
}

impl Default for RemotePlayerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl RemotePlayerRegistry {
    pub fn new() -> Self {
        Self::with_lerp_factor(DEFAULT_LERP_FACTOR)
    }

    pub fn with_lerp_factor(lerp_factor: f32) -> Self {
        Self {
            lerp_factor,
            players: HashMap::new(),
        }
    }

    /// Apply one decoded position packet to the scene.
    ///
    /// Creates the proxy on first sight of `packet.id`, blends it toward
    /// the reported position on every later packet. A packet with an empty
    /// id is ignored.
    pub fn apply_packet(&mut self, scene: &mut dyn Scene, packet: &PositionPacket) {
        if packet.id.is_empty() {
            return;
        }

        let target = Vec3::new(packet.x, packet.y, packet.z);
        match self.players.entry(packet.id.clone()) {
            Entry::Vacant(entry) => {
                let handle = scene.add_proxy(target, packet.ry);
                entry.insert(RemotePlayer {
                    handle,
                    position: target,
                    rotation_y: packet.ry,
                });
                info!("👤 New remote player {} added to the scene", packet.id);
            }
            Entry::Occupied(mut entry) => {
                let player = entry.get_mut();
                player.position = player.position.lerp(target, self.lerp_factor);
                player.rotation_y = packet.ry;
                scene.set_proxy_pose(player.handle, player.position, player.rotation_y);
            }
        }
    }

    /// Drop the proxy for a departed peer. No-op for unknown ids.
    pub fn remove_peer(&mut self, scene: &mut dyn Scene, peer_id: &str) {
        if let Some(player) = self.players.remove(peer_id) {
            scene.remove_proxy(player.handle);
            info!("🚫 Remote player {} removed from the scene", peer_id);
        }
    }

    /// Current blended position of a tracked peer, if any.
    pub fn position_of(&self, peer_id: &str) -> Option<Vec3> {
        self.players.get(peer_id).map(|p| p.position)
    }

    pub fn rotation_of(&self, peer_id: &str) -> Option<f32> {
        self.players.get(peer_id).map(|p| p.rotation_y)
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Scene double that records every call it receives.
    #[derive(Default)]
    struct RecordingScene {
        next_handle: u64,
        added: Vec<(ProxyHandle, Vec3, f32)>,
        moved: Vec<(ProxyHandle, Vec3, f32)>,
        removed: Vec<ProxyHandle>,
    }

    impl Scene for RecordingScene {
        fn add_proxy(&mut self, position: Vec3, rotation_y: f32) -> ProxyHandle {
            let handle = ProxyHandle(self.next_handle);
            self.next_handle += 1;
            self.added.push((handle, position, rotation_y));
            handle
        }

        fn set_proxy_pose(&mut self, handle: ProxyHandle, position: Vec3, rotation_y: f32) {
            self.moved.push((handle, position, rotation_y));
        }

        fn remove_proxy(&mut self, handle: ProxyHandle) {
            self.removed.push(handle);
        }
    }

    fn packet(id: &str, x: f32, y: f32, z: f32, ry: f32) -> PositionPacket {
        PositionPacket {
            id: id.to_string(),
            x,
            y,
            z,
            ry,
        }
    }

    #[test]
    fn test_first_sight_places_proxy_exactly() {
        let mut scene = RecordingScene::default();
        let mut registry = RemotePlayerRegistry::new();

        registry.apply_packet(&mut scene, &packet("A", 1.0, 2.0, 3.0, 0.5));

        assert_eq!(registry.len(), 1);
        assert_eq!(scene.added.len(), 1);
        assert_eq!(scene.added[0].1, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(scene.added[0].2, 0.5);
        assert!(scene.moved.is_empty());
    }

    #[test]
    fn test_second_packet_blends_by_lerp_factor() {
        let mut scene = RecordingScene::default();
        let mut registry = RemotePlayerRegistry::new();

        registry.apply_packet(&mut scene, &packet("A", 1.0, 0.0, 0.0, 0.0));
        registry.apply_packet(&mut scene, &packet("A", 11.0, 0.0, 0.0, 0.0));

        // 1 + 0.3 * (11 - 1) = 4, not 11
        let position = registry.position_of("A").unwrap();
        assert!((position.x - 4.0).abs() < 1e-5);
        assert_eq!(scene.added.len(), 1);
        assert_eq!(scene.moved.len(), 1);
    }

    #[test]
    fn test_rotation_is_set_directly() {
        let mut scene = RecordingScene::default();
        let mut registry = RemotePlayerRegistry::new();

        registry.apply_packet(&mut scene, &packet("A", 0.0, 0.0, 0.0, 0.0));
        registry.apply_packet(&mut scene, &packet("A", 0.0, 0.0, 0.0, 2.0));

        assert_eq!(registry.rotation_of("A"), Some(2.0));
    }

    #[test]
    fn test_one_proxy_per_peer() {
        let mut scene = RecordingScene::default();
        let mut registry = RemotePlayerRegistry::new();

        for _ in 0..5 {
            registry.apply_packet(&mut scene, &packet("A", 0.0, 0.0, 0.0, 0.0));
        }
        registry.apply_packet(&mut scene, &packet("B", 0.0, 0.0, 0.0, 0.0));

        assert_eq!(registry.len(), 2);
        assert_eq!(scene.added.len(), 2);
    }

    #[test]
    fn test_empty_id_is_ignored() {
        let mut scene = RecordingScene::default();
        let mut registry = RemotePlayerRegistry::new();

        registry.apply_packet(&mut scene, &packet("", 1.0, 1.0, 1.0, 0.0));

        assert!(registry.is_empty());
        assert!(scene.added.is_empty());
    }

    #[test]
    fn test_remove_peer_drops_proxy() {
        let mut scene = RecordingScene::default();
        let mut registry = RemotePlayerRegistry::new();

        registry.apply_packet(&mut scene, &packet("A", 0.0, 0.0, 0.0, 0.0));
        let handle = scene.added[0].0;

        registry.remove_peer(&mut scene, "A");
        assert!(registry.is_empty());
        assert_eq!(scene.removed, vec![handle]);

        // unknown peer is a no-op
        registry.remove_peer(&mut scene, "A");
        assert_eq!(scene.removed.len(), 1);
    }
}
