//! Scene hosting for sharedraw
//!
//! This crate provides the in-memory scene each peer runs its drawers
//! against. It implements [`sharedraw_drawer::SceneHost`] over a flat list of
//! objects with mesh or primitive colliders and optional drawable canvases.

mod canvas_plane;
mod collider;
mod error;
mod world;

pub use canvas_plane::CanvasPlane;
pub use collider::{Collider, ColliderHit, ray_box_intersection, ray_sphere_intersection};
pub use error::SceneError;
pub use world::{ObjectHandle, SceneObject, SceneWorld};
