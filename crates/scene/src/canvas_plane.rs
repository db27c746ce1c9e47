//! Canvas plane placement
//!
//! A canvas plane is a square, horizontal quad that drawers paint on from
//! above. Its UV origin sits at the -X/-Z corner, u grows along +X and v
//! along +Z, so texture coordinates map directly to canvas pixels.

use glam::{Vec2, Vec3};
use painting::TriangleMesh;
use sharedraw_config::CanvasConfig;

/// World placement of a canvas
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasPlane {
    /// Center of the quad in world space
    pub center: Vec3,
    /// Edge length in world units
    pub size: f32,
}

impl CanvasPlane {
    pub fn new(center: Vec3, size: f32) -> Self {
        Self { center, size }
    }

    pub fn from_config(center: Vec3, config: &CanvasConfig) -> Self {
        Self::new(center, config.world_size)
    }

    /// World position of the UV origin
    pub fn corner(&self) -> Vec3 {
        self.center - Vec3::new(self.size, 0.0, self.size) * 0.5
    }

    /// Collision mesh with UVs
    pub fn mesh(&self) -> TriangleMesh {
        TriangleMesh::quad(
            self.corner(),
            Vec3::X * self.size,
            Vec3::Z * self.size,
        )
    }

    /// World position above the plane at `height` whose downward ray lands on `uv`
    pub fn point_above(&self, uv: Vec2, height: f32) -> Vec3 {
        self.corner() + Vec3::new(uv.x * self.size, height, uv.y * self.size)
    }

    /// Texture coordinate under a world position, None outside the plane
    pub fn uv_at(&self, world: Vec3) -> Option<Vec2> {
        let local = world - self.corner();
        let uv = Vec2::new(local.x, local.z) / self.size;
        (uv.cmpge(Vec2::ZERO).all() && uv.cmple(Vec2::ONE).all()).then_some(uv)
    }
}
