//! Scripted scene host for unit tests.

use std::cell::Cell;

use glam::{Vec2, Vec3};
use painting::{DrawableSurface, Rgba};
use sharedraw_net::NetworkId;

use crate::host::{ColliderKind, RayHit, SceneHost};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SurfaceCall {
    Draw {
        current: Vec2,
        previous: Vec2,
        width: i32,
        color: Rgba,
    },
    Erase {
        current: Vec2,
        previous: Vec2,
        width: i32,
    },
}

#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub calls: Vec<SurfaceCall>,
}

impl DrawableSurface for RecordingSurface {
    fn draw(&mut self, current: Vec2, previous: Vec2, width: i32, color: Rgba) {
        self.calls.push(SurfaceCall::Draw {
            current,
            previous,
            width,
            color,
        });
    }

    fn erase(&mut self, current: Vec2, previous: Vec2, width: i32) {
        self.calls.push(SurfaceCall::Erase {
            current,
            previous,
            width,
        });
    }
}

#[derive(Debug)]
pub struct FakeObject {
    pub network_id: Option<NetworkId>,
    pub surface: Option<RecordingSurface>,
}

/// Host whose raycast returns whatever the test aimed at last
#[derive(Debug, Default)]
pub struct FakeHost {
    pub objects: Vec<FakeObject>,
    pub next_hit: Option<RayHit<usize>>,
    pub last_ray: Cell<Option<(Vec3, Vec3, f32)>>,
}

impl FakeHost {
    pub fn add_object(&mut self, network_id: Option<i32>, drawable: bool) -> usize {
        self.objects.push(FakeObject {
            network_id: network_id.and_then(NetworkId::new),
            surface: drawable.then(RecordingSurface::default),
        });
        self.objects.len() - 1
    }

    pub fn aim_at(&mut self, object: usize, x: f32, y: f32) {
        self.next_hit = Some(RayHit {
            collider: ColliderKind::Mesh,
            object,
            texture_coord: Vec2::new(x, y),
            distance: 1.0,
        });
    }

    pub fn aim_at_primitive(&mut self, object: usize) {
        self.next_hit = Some(RayHit {
            collider: ColliderKind::Primitive,
            object,
            texture_coord: Vec2::ZERO,
            distance: 1.0,
        });
    }

    pub fn aim_at_nothing(&mut self) {
        self.next_hit = None;
    }

    pub fn calls(&self, object: usize) -> &[SurfaceCall] {
        self.objects[object]
            .surface
            .as_ref()
            .map(|s| s.calls.as_slice())
            .unwrap_or(&[])
    }
}

impl SceneHost for FakeHost {
    type Object = usize;

    fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<RayHit<usize>> {
        self.last_ray.set(Some((origin, direction, max_distance)));
        self.next_hit
    }

    fn network_identity(&self, object: usize) -> Option<NetworkId> {
        self.objects.get(object).and_then(|o| o.network_id)
    }

    fn find_by_network_identity(&self, id: NetworkId) -> Option<usize> {
        self.objects.iter().position(|o| o.network_id == Some(id))
    }

    fn drawable_mut(&mut self, object: usize) -> Option<&mut dyn DrawableSurface> {
        self.objects
            .get_mut(object)?
            .surface
            .as_mut()
            .map(|s| s as &mut dyn DrawableSurface)
    }
}

/// Shorthand for a draw call
pub fn drew(previous: (f32, f32), current: (f32, f32), width: i32, color: Rgba) -> SurfaceCall {
    SurfaceCall::Draw {
        current: Vec2::new(current.0, current.1),
        previous: Vec2::new(previous.0, previous.1),
        width,
        color,
    }
}
