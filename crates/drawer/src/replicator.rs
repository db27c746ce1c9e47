//! Observer-side snapshot reconstruction and apply.
//!
//! Snapshots carry only the current coordinate. The receiver pairs it with
//! the coordinate of the snapshot before, so a segment always spans two
//! consecutive snapshots rather than the sender's true previous sample. A
//! lost snapshot therefore yields one longer segment spanning the gap.
//!
//! Applying is level-triggered: the latest state is painted on every local
//! tick, independent of how often snapshots arrive. Surfaces overwrite
//! pixels, so repeating an identical segment is harmless.

use sharedraw_net::{CodecError, NetworkId, ReplicatedSnapshot};
use tracing::{debug, warn};

use crate::host::SceneHost;
use crate::intent::{DrawIntent, StrokeSegment};
use crate::pen::PenSettings;

/// What an apply tick did
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ApplyOutcome {
    /// Nothing received yet for this drawer
    AwaitingSnapshot,
    /// The authority has ray casting switched off
    Disabled,
    /// The authority is not over a replicated surface
    NoTarget,
    /// The target is not instantiated locally (yet); retried next tick
    Unresolved(NetworkId),
    /// The target exists but cannot be drawn on
    MissingCapability(NetworkId),
    /// The segment was applied to the target
    Applied {
        target: NetworkId,
        segment: StrokeSegment,
    },
}

/// Per-observer mirror of one remote drawer
#[derive(Debug, Clone)]
pub struct ReceiverState {
    mirror: DrawIntent,
    snapshots_received: u64,
    warned_missing: Option<NetworkId>,
}

impl ReceiverState {
    fn new() -> Self {
        // Pen fields are overwritten by the first snapshot; only the origin
        // coordinate matters before then.
        Self {
            mirror: DrawIntent::new(PenSettings::default()),
            snapshots_received: 0,
            warned_missing: None,
        }
    }

    /// The state rebuilt from snapshots, including the derived previous coordinate
    pub fn mirror(&self) -> &DrawIntent {
        &self.mirror
    }

    pub fn snapshots_received(&self) -> u64 {
        self.snapshots_received
    }
}

/// Receiving half of a drawer's replication
#[derive(Debug, Clone, Default)]
pub struct Replicator {
    receiver: Option<ReceiverState>,
}

impl Replicator {
    pub fn new() -> Self {
        Self::default()
    }

    /// None until the first snapshot arrives
    pub fn receiver(&self) -> Option<&ReceiverState> {
        self.receiver.as_ref()
    }

    /// Fold a snapshot into the mirror. Disabled and target-less snapshots
    /// still advance the coordinate history.
    pub fn receive(&mut self, snapshot: &ReplicatedSnapshot) {
        let state = self.receiver.get_or_insert_with(ReceiverState::new);
        state.mirror.absorb(snapshot);
        state.snapshots_received += 1;
    }

    /// Decode and fold a raw payload. A malformed payload leaves the mirror untouched.
    pub fn receive_bytes(&mut self, payload: &[u8]) -> Result<(), CodecError> {
        let snapshot = ReplicatedSnapshot::from_bytes(payload)?;
        self.receive(&snapshot);
        Ok(())
    }

    /// Paint the latest mirrored segment onto the local copy of the target
    pub fn apply_tick<H: SceneHost>(&mut self, host: &mut H) -> ApplyOutcome {
        let Some(state) = self.receiver.as_mut() else {
            return ApplyOutcome::AwaitingSnapshot;
        };
        let mirror = &state.mirror;

        if !mirror.pen.ray_cast_enabled {
            return ApplyOutcome::Disabled;
        }
        let Some(target) = mirror.target_surface else {
            return ApplyOutcome::NoTarget;
        };
        let Some(object) = host.find_by_network_identity(target) else {
            debug!("Target surface {} not found locally, skipping tick", target);
            return ApplyOutcome::Unresolved(target);
        };
        let Some(surface) = host.drawable_mut(object) else {
            if state.warned_missing != Some(target) {
                warn!("Target surface {} ({:?}) has no drawable surface", target, object);
                state.warned_missing = Some(target);
            }
            return ApplyOutcome::MissingCapability(target);
        };

        let segment = mirror.segment();
        segment.apply_to(surface);
        ApplyOutcome::Applied { target, segment }
    }

    /// Drop the mirror when the remote drawer goes away
    pub fn discard(&mut self) {
        self.receiver = None;
    }
}
