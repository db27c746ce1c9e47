//! In-memory scene: objects, their colliders, and optional canvases
//!
//! Each peer owns its own [`SceneWorld`]. Replicated objects are registered
//! under their [`NetworkId`] so observers can resolve snapshot targets to the
//! local copy of a surface.

use std::collections::HashMap;

use glam::{Vec2, Vec3};
use painting::{DrawableCanvas, DrawableSurface, TriangleMesh, Rgba};
use sharedraw_config::CanvasConfig;
use sharedraw_drawer::{RayHit, SceneHost};
use sharedraw_net::NetworkId;
use tracing::{debug, info};

use crate::canvas_plane::CanvasPlane;
use crate::collider::Collider;
use crate::error::SceneError;

/// Handle to an object in a [`SceneWorld`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectHandle(usize);

impl ObjectHandle {
    pub fn index(self) -> usize {
        self.0
    }
}

/// One object in the scene
#[derive(Debug, Clone)]
pub struct SceneObject {
    pub name: String,
    pub collider: Collider,
    /// Drawable-surface capability, if the object has one
    pub canvas: Option<DrawableCanvas>,
    pub network_id: Option<NetworkId>,
}

/// Flat list of scene objects with a network identity index
#[derive(Debug, Default)]
pub struct SceneWorld {
    objects: Vec<SceneObject>,
    by_network_id: HashMap<NetworkId, ObjectHandle>,
}

impl SceneWorld {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an object. Network identities must be unique within a world.
    pub fn spawn(&mut self, object: SceneObject) -> Result<ObjectHandle, SceneError> {
        let handle = ObjectHandle(self.objects.len());
        if let Some(id) = object.network_id {
            if self.by_network_id.contains_key(&id) {
                return Err(SceneError::DuplicateNetworkId(id));
            }
            self.by_network_id.insert(id, handle);
        }
        debug!(
            "Spawned {:?} '{}' ({:?}, network id {:?})",
            handle,
            object.name,
            object.collider.kind(),
            object.network_id
        );
        self.objects.push(object);
        Ok(handle)
    }

    /// Add a drawable canvas plane as configured
    pub fn spawn_canvas(
        &mut self,
        name: impl Into<String>,
        plane: CanvasPlane,
        config: &CanvasConfig,
    ) -> Result<ObjectHandle, SceneError> {
        let network_id = match config.network_id {
            Some(raw) => Some(NetworkId::new(raw).ok_or(SceneError::InvalidNetworkId(raw))?),
            None => None,
        };
        let name = name.into();
        info!(
            "Creating canvas '{}' ({}x{} px, {} world units)",
            name, config.width, config.height, plane.size
        );
        self.spawn(SceneObject {
            name,
            collider: Collider::Mesh(plane.mesh()),
            canvas: Some(DrawableCanvas::new(
                config.width,
                config.height,
                Rgba::from_array(config.background),
            )),
            network_id,
        })
    }

    /// Add a mesh that blocks rays but cannot be painted
    pub fn spawn_mesh(
        &mut self,
        name: impl Into<String>,
        mesh: TriangleMesh,
        network_id: Option<NetworkId>,
    ) -> Result<ObjectHandle, SceneError> {
        self.spawn(SceneObject {
            name: name.into(),
            collider: Collider::Mesh(mesh),
            canvas: None,
            network_id,
        })
    }

    /// Add an axis-aligned box obstacle
    pub fn spawn_box(
        &mut self,
        name: impl Into<String>,
        center: Vec3,
        half_size: Vec3,
    ) -> Result<ObjectHandle, SceneError> {
        self.spawn(SceneObject {
            name: name.into(),
            collider: Collider::Box { center, half_size },
            canvas: None,
            network_id: None,
        })
    }

    pub fn object(&self, handle: ObjectHandle) -> Option<&SceneObject> {
        self.objects.get(handle.0)
    }

    pub fn canvas(&self, handle: ObjectHandle) -> Option<&DrawableCanvas> {
        self.object(handle)?.canvas.as_ref()
    }

    pub fn canvas_mut(&mut self, handle: ObjectHandle) -> Option<&mut DrawableCanvas> {
        self.objects.get_mut(handle.0)?.canvas.as_mut()
    }

    /// All objects carrying a canvas
    pub fn canvases(&self) -> impl Iterator<Item = (ObjectHandle, &SceneObject, &DrawableCanvas)> {
        self.objects
            .iter()
            .enumerate()
            .filter_map(|(i, o)| o.canvas.as_ref().map(|c| (ObjectHandle(i), o, c)))
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl SceneHost for SceneWorld {
    type Object = ObjectHandle;

    fn raycast(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
    ) -> Option<RayHit<ObjectHandle>> {
        let direction = direction.normalize_or_zero();
        if direction == Vec3::ZERO {
            return None;
        }

        let mut closest: Option<RayHit<ObjectHandle>> = None;
        for (i, object) in self.objects.iter().enumerate() {
            let Some(hit) = object.collider.raycast(origin, direction, max_distance) else {
                continue;
            };
            if closest.is_some_and(|c| hit.distance >= c.distance) {
                continue;
            }
            closest = Some(RayHit {
                collider: object.collider.kind(),
                object: ObjectHandle(i),
                texture_coord: hit.uv.unwrap_or(Vec2::ZERO),
                distance: hit.distance,
            });
        }
        closest
    }

    fn network_identity(&self, object: ObjectHandle) -> Option<NetworkId> {
        self.object(object)?.network_id
    }

    fn find_by_network_identity(&self, id: NetworkId) -> Option<ObjectHandle> {
        self.by_network_id.get(&id).copied()
    }

    fn drawable_mut(&mut self, object: ObjectHandle) -> Option<&mut dyn DrawableSurface> {
        self.canvas_mut(object).map(|c| c as &mut dyn DrawableSurface)
    }
}

#[cfg(test)]
mod tests {
    use sharedraw_drawer::ColliderKind;

    use super::*;

    fn config(network_id: Option<i32>) -> CanvasConfig {
        CanvasConfig {
            width: 64,
            height: 64,
            network_id,
            ..CanvasConfig::default()
        }
    }

    #[test]
    fn test_raycast_returns_closest() {
        let mut world = SceneWorld::new();
        let plane = CanvasPlane::new(Vec3::ZERO, 4.0);
        let canvas = world.spawn_canvas("floor", plane, &config(Some(1))).unwrap();
        let crate_box = world
            .spawn_box("crate", Vec3::new(1.0, 0.5, 1.0), Vec3::splat(0.5))
            .unwrap();

        let over_canvas = world.raycast(Vec3::new(-1.0, 3.0, -1.0), Vec3::NEG_Y, 5.0).unwrap();
        assert_eq!(over_canvas.object, canvas);
        assert_eq!(over_canvas.collider, ColliderKind::Mesh);
        assert!((over_canvas.texture_coord - Vec2::new(0.25, 0.25)).length() < 1e-4);

        let over_box = world.raycast(Vec3::new(1.1, 3.0, 0.9), Vec3::NEG_Y, 5.0).unwrap();
        assert_eq!(over_box.object, crate_box);
        assert_eq!(over_box.collider, ColliderKind::Primitive);
        assert!((over_box.distance - 2.0).abs() < 1e-4);
    }

    #[test]
    fn test_raycast_out_of_range() {
        let mut world = SceneWorld::new();
        world
            .spawn_canvas("floor", CanvasPlane::new(Vec3::ZERO, 4.0), &config(Some(1)))
            .unwrap();
        assert!(world.raycast(Vec3::new(0.3, 6.0, 0.1), Vec3::NEG_Y, 5.0).is_none());
        assert!(world.raycast(Vec3::new(0.3, 1.0, 0.1), Vec3::Y, 5.0).is_none());
        assert!(world.raycast(Vec3::new(0.3, 1.0, 0.1), Vec3::ZERO, 5.0).is_none());
    }

    #[test]
    fn test_network_identity_lookup() {
        let mut world = SceneWorld::new();
        let plane = CanvasPlane::new(Vec3::ZERO, 4.0);
        let shared = world.spawn_canvas("shared", plane, &config(Some(12))).unwrap();
        let local = world.spawn_canvas("local", plane, &config(None)).unwrap();

        let id = NetworkId::new(12).unwrap();
        assert_eq!(world.network_identity(shared), Some(id));
        assert_eq!(world.network_identity(local), None);
        assert_eq!(world.find_by_network_identity(id), Some(shared));
        assert_eq!(world.find_by_network_identity(NetworkId::new(13).unwrap()), None);
    }

    #[test]
    fn test_duplicate_and_invalid_ids_rejected() {
        let mut world = SceneWorld::new();
        let plane = CanvasPlane::new(Vec3::ZERO, 4.0);
        world.spawn_canvas("a", plane, &config(Some(3))).unwrap();

        let err = world.spawn_canvas("b", plane, &config(Some(3))).unwrap_err();
        assert!(matches!(err, SceneError::DuplicateNetworkId(_)));
        let err = world.spawn_canvas("c", plane, &config(Some(-4))).unwrap_err();
        assert!(matches!(err, SceneError::InvalidNetworkId(-4)));
        assert_eq!(world.len(), 1);
    }

    #[test]
    fn test_drawable_capability() {
        let mut world = SceneWorld::new();
        let plane = CanvasPlane::new(Vec3::ZERO, 4.0);
        let canvas = world.spawn_canvas("floor", plane, &config(Some(1))).unwrap();
        let wall = world
            .spawn_mesh("wall", plane.mesh(), NetworkId::new(2))
            .unwrap();

        assert!(world.drawable_mut(wall).is_none());
        let surface = world.drawable_mut(canvas).unwrap();
        surface.draw(Vec2::new(0.5, 0.5), Vec2::ZERO, 3, Rgba::BLACK);

        let pixel = world.canvas(canvas).unwrap().surface().get_pixel(32, 32);
        assert_eq!(pixel, Some(Rgba::BLACK));
        assert_eq!(world.canvases().count(), 1);
    }
}
