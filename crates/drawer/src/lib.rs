//! Shared ray-cast drawing
//!
//! One authoritative [`RayCastDrawer`] samples a ray against the scene every
//! tick and paints where it hits; observers of the same drawer rebuild the
//! stroke from per-tick snapshots and paint the same segments locally.
//!
//! - [`host`] - What the drawer needs from the surrounding scene
//! - [`pen`] - Pen settings and the commands that change them
//! - [`sampler`] - Authority-side ray sampling
//! - [`replicator`] - Observer-side snapshot reconstruction and apply
//! - [`drawer`] - The per-actor tick tying both together
//! - [`controller`] - Feeds a color picker into a drawer's pen

pub mod controller;
pub mod drawer;
pub mod host;
pub mod intent;
pub mod pen;
pub mod replicator;
pub mod role;
pub mod sampler;
pub mod transform;

#[cfg(test)]
mod testing;

pub use controller::{ColorSource, DrawerController};
pub use drawer::{RayCastDrawer, TickReport};
pub use host::{ColliderKind, RayHit, SceneHost};
pub use intent::{DrawIntent, StrokeMode, StrokeSegment};
pub use pen::{PenCommand, PenSettings};
pub use replicator::{ApplyOutcome, ReceiverState, Replicator};
pub use role::NetworkRole;
pub use sampler::{SampleOutcome, StrokeSampler};
pub use transform::ActorTransform;
