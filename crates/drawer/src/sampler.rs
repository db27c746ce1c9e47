//! Authority-side ray sampling.
//!
//! Each tick the sampler casts one ray along the configured local axis. A hit
//! on a drawable mesh advances the two-point stroke window and paints the
//! segment immediately; anything else breaks the stroke.

use sharedraw_config::{DrawerConfig, RayDirection};
use sharedraw_net::NetworkId;
use tracing::{debug, warn};

use crate::host::{ColliderKind, SceneHost};
use crate::intent::{DrawIntent, StrokeSegment};
use crate::pen::PenSettings;
use crate::transform::ActorTransform;

/// What a sampling tick did
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SampleOutcome {
    /// Ray casting is switched off
    Disabled,
    /// The ray hit nothing within range
    Miss,
    /// The ray hit a collider that is not a triangle mesh
    InvalidCollider,
    /// The ray hit an object with no drawable surface
    MissingCapability,
    /// A segment was painted locally
    Painted {
        target: Option<NetworkId>,
        segment: StrokeSegment,
    },
}

/// Ray sampler and owner of the authoritative [`DrawIntent`]
#[derive(Debug, Clone)]
pub struct StrokeSampler {
    direction: RayDirection,
    max_distance: f32,
    intent: DrawIntent,
}

impl StrokeSampler {
    pub fn new(config: &DrawerConfig) -> Self {
        Self {
            direction: config.ray_direction,
            max_distance: config.ray_distance,
            intent: DrawIntent::new(config.pen.into()),
        }
    }

    pub fn intent(&self) -> &DrawIntent {
        &self.intent
    }

    /// Adopt the pen settings latched for this tick
    pub fn set_pen(&mut self, pen: PenSettings) {
        self.intent.pen = pen;
    }

    /// Sample one tick and paint locally on a drawable hit
    pub fn sample_tick<H: SceneHost>(
        &mut self,
        transform: &ActorTransform,
        host: &mut H,
    ) -> SampleOutcome {
        if !self.intent.pen.ray_cast_enabled {
            self.intent.reset_stroke();
            return SampleOutcome::Disabled;
        }

        let origin = transform.position;
        let direction = transform.axis(self.direction);
        let Some(hit) = host.raycast(origin, direction, self.max_distance) else {
            self.intent.reset_stroke();
            return SampleOutcome::Miss;
        };

        if hit.collider != ColliderKind::Mesh {
            warn!(
                "Ray hit {:?} with a {:?} collider; drawing needs a mesh collider",
                hit.object, hit.collider
            );
            self.intent.reset_stroke();
            return SampleOutcome::InvalidCollider;
        }

        let target = host.network_identity(hit.object);
        let Some(surface) = host.drawable_mut(hit.object) else {
            warn!("Ray hit {:?}, which has no drawable surface", hit.object);
            self.intent.reset_stroke();
            return SampleOutcome::MissingCapability;
        };

        if target.is_none() {
            debug!("Drawing on {:?}, which has no network identity", hit.object);
        }
        self.intent.target_surface = target;
        self.intent.advance(hit.texture_coord);

        let segment = self.intent.segment();
        segment.apply_to(surface);
        SampleOutcome::Painted { target, segment }
    }
}
