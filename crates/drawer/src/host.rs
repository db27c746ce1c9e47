//! Scene collaborators consumed by the drawer.
//!
//! The drawer never owns geometry or textures. Physics, network identity
//! lookup and the drawable-surface capability are reached through
//! [`SceneHost`], implemented by whatever holds the scene.

use std::fmt;

use glam::{Vec2, Vec3};
use painting::DrawableSurface;
use sharedraw_net::NetworkId;

/// Shape class of the collider a ray hit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColliderKind {
    /// Triangle mesh; the only kind that yields a texture coordinate
    Mesh,
    /// Box, sphere or other analytic shape
    Primitive,
}

/// Closest hit of a scene raycast
#[derive(Debug, Clone, Copy)]
pub struct RayHit<O> {
    pub collider: ColliderKind,
    pub object: O,
    /// Surface-local texture coordinate at the hit
    pub texture_coord: Vec2,
    pub distance: f32,
}

/// Everything a drawer needs from the scene it lives in.
pub trait SceneHost {
    /// Handle to a scene object
    type Object: Copy + fmt::Debug;

    /// Closest hit along `direction` from `origin` within `max_distance`
    fn raycast(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
    ) -> Option<RayHit<Self::Object>>;

    /// Network identity of an object, None if it is not replicated
    fn network_identity(&self, object: Self::Object) -> Option<NetworkId>;

    /// Local object registered under a network identity, if instantiated
    fn find_by_network_identity(&self, id: NetworkId) -> Option<Self::Object>;

    /// The object's drawable-surface capability, None if it has none
    fn drawable_mut(&mut self, object: Self::Object) -> Option<&mut dyn DrawableSurface>;
}
