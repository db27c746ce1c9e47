//! Collision shapes for scene raycasts
//!
//! Meshes are the only shape that report a texture coordinate, so they are
//! the only shape a drawer can paint through. Boxes and spheres still block
//! rays, which matters when they sit between an actor and a canvas.

use glam::{Vec2, Vec3};
use painting::TriangleMesh;
use sharedraw_drawer::ColliderKind;

const EPSILON: f32 = 1e-6;

/// Collision shape of a scene object, in world space
#[derive(Debug, Clone)]
pub enum Collider {
    Mesh(TriangleMesh),
    Box { center: Vec3, half_size: Vec3 },
    Sphere { center: Vec3, radius: f32 },
}

/// A ray hit against a single collider
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColliderHit {
    pub distance: f32,
    /// Interpolated UV for meshes that carry UVs
    pub uv: Option<Vec2>,
}

impl Collider {
    pub fn kind(&self) -> ColliderKind {
        match self {
            Collider::Mesh(_) => ColliderKind::Mesh,
            Collider::Box { .. } | Collider::Sphere { .. } => ColliderKind::Primitive,
        }
    }

    /// Closest hit within `max_distance`. `ray_dir` must be normalized.
    pub fn raycast(
        &self,
        ray_origin: Vec3,
        ray_dir: Vec3,
        max_distance: f32,
    ) -> Option<ColliderHit> {
        match self {
            Collider::Mesh(mesh) => {
                mesh.raycast(ray_origin, ray_dir, max_distance).map(|hit| ColliderHit {
                    distance: hit.distance,
                    uv: hit.uv,
                })
            }
            Collider::Box { center, half_size } => {
                ray_box_intersection(ray_origin, ray_dir, *center, *half_size)
                    .filter(|t| *t <= max_distance)
                    .map(|distance| ColliderHit { distance, uv: None })
            }
            Collider::Sphere { center, radius } => {
                ray_sphere_intersection(ray_origin, ray_dir, *center, *radius)
                    .filter(|t| *t <= max_distance)
                    .map(|distance| ColliderHit { distance, uv: None })
            }
        }
    }
}

/// Ray-sphere intersection test.
/// Returns the distance to the closest intersection point, or None if no hit.
pub fn ray_sphere_intersection(
    ray_origin: Vec3,
    ray_dir: Vec3,
    sphere_center: Vec3,
    sphere_radius: f32,
) -> Option<f32> {
    let oc = ray_origin - sphere_center;
    let a = ray_dir.dot(ray_dir);
    let b = 2.0 * oc.dot(ray_dir);
    let c = oc.dot(oc) - sphere_radius * sphere_radius;
    let discriminant = b * b - 4.0 * a * c;

    if discriminant < 0.0 {
        return None;
    }

    let sqrt_d = discriminant.sqrt();
    let t1 = (-b - sqrt_d) / (2.0 * a);
    let t2 = (-b + sqrt_d) / (2.0 * a);

    if t1 > EPSILON {
        Some(t1)
    } else if t2 > EPSILON {
        Some(t2)
    } else {
        None
    }
}

/// Ray-box intersection (axis-aligned box, slab method).
pub fn ray_box_intersection(
    ray_origin: Vec3,
    ray_dir: Vec3,
    box_center: Vec3,
    box_half_size: Vec3,
) -> Option<f32> {
    let min = box_center - box_half_size;
    let max = box_center + box_half_size;

    let inv = |d: f32| if d.abs() > EPSILON { 1.0 / d } else { f32::INFINITY };
    let inv_dir = Vec3::new(inv(ray_dir.x), inv(ray_dir.y), inv(ray_dir.z));

    let t_lo = (min - ray_origin) * inv_dir;
    let t_hi = (max - ray_origin) * inv_dir;

    let tmin = t_lo.min(t_hi).max_element();
    let tmax = t_lo.max(t_hi).min_element();

    if tmax < 0.0 || tmin > tmax {
        return None;
    }

    if tmin > EPSILON {
        Some(tmin)
    } else if tmax > EPSILON {
        Some(tmax)
    } else {
        None
    }
}
