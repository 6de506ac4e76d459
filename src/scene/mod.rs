//! # Scene Seam
//!
//! The rendering engine is an external collaborator. The crate only needs
//! three capabilities from it — add a proxy, move a proxy, remove a proxy —
//! expressed by the [`Scene`] trait, plus a read-only [`PlayerPose`] for the
//! local player sampled once per tick by the caller.

pub mod registry;

pub use registry::RemotePlayerRegistry;

/// Plain 3-component vector, enough for pose plumbing.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Linear blend from `self` toward `target` by factor `t`.
    pub fn lerp(self, target: Vec3, t: f32) -> Vec3 {
        Vec3 {
            x: self.x + (target.x - self.x) * t,
            y: self.y + (target.y - self.y) * t,
            z: self.z + (target.z - self.z) * t,
        }
    }
}

/// Opaque handle to one renderable proxy owned by the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProxyHandle(pub u64);

/// The local player's pose as sampled by the game loop.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PlayerPose {
    pub position: Vec3,
    pub rotation_y: f32,
}

/// Capability-scoped handle into the rendering engine.
///
/// Implementations decide what a proxy looks like (the stock presentation
/// is a fixed box mesh, no animation).
pub trait Scene {
    /// Create a renderable proxy at `position` and return its handle.
    fn add_proxy(&mut self, position: Vec3, rotation_y: f32) -> ProxyHandle;

    /// Move an existing proxy.
    fn set_proxy_pose(&mut self, handle: ProxyHandle, position: Vec3, rotation_y: f32);

    /// Remove a proxy from the scene.
    fn remove_proxy(&mut self, handle: ProxyHandle);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp_endpoints() {
        let from = Vec3::new(1.0, 2.0, 3.0);
        let to = Vec3::new(5.0, 6.0, 7.0);
        assert_eq!(from.lerp(to, 0.0), from);
        assert_eq!(from.lerp(to, 1.0), to);
    }

    #[test]
    fn test_lerp_partial() {
        let from = Vec3::new(1.0, 0.0, 0.0);
        let to = Vec3::new(11.0, 0.0, 0.0);
        let blended = from.lerp(to, 0.3);
        assert!((blended.x - 4.0).abs() < 1e-5);
        assert_eq!(blended.y, 0.0);
        assert_eq!(blended.z, 0.0);
    }
}
