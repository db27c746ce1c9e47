//! The per-actor drawer.
//!
//! A [`RayCastDrawer`] is instantiated on every peer that sees the actor.
//! Its [`NetworkRole`] is fixed at construction: the authority samples and
//! publishes, observers receive and apply. Both halves run inside the same
//! [`RayCastDrawer::tick`] so the host only has one entry point to drive.

use sharedraw_config::DrawerConfig;
use sharedraw_net::{NetworkId, ReplicatedSnapshot, Transport, TransportError, ViewMessage};
use tracing::{debug, info, warn};

use crate::host::SceneHost;
use crate::intent::DrawIntent;
use crate::pen::{PenCommand, PenSettings};
use crate::replicator::{ApplyOutcome, ReceiverState, Replicator};
use crate::role::NetworkRole;
use crate::sampler::{SampleOutcome, StrokeSampler};
use crate::transform::ActorTransform;

/// Result of one [`RayCastDrawer::tick`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickReport {
    Sampled(SampleOutcome),
    Applied(ApplyOutcome),
}

/// Ray-cast drawer attached to one actor
#[derive(Debug)]
pub struct RayCastDrawer {
    view_id: NetworkId,
    role: NetworkRole,
    /// Pose of the actor, updated by the host before each tick
    pub transform: ActorTransform,
    /// Pen changes submitted since the last tick
    staged: PenSettings,
    sampler: StrokeSampler,
    replicator: Replicator,
}

impl RayCastDrawer {
    pub fn new(view_id: NetworkId, role: NetworkRole, config: &DrawerConfig) -> Self {
        info!("Creating drawer {} as {:?}", view_id, role);
        Self {
            view_id,
            role,
            transform: ActorTransform::default(),
            staged: config.pen.into(),
            sampler: StrokeSampler::new(config),
            replicator: Replicator::new(),
        }
    }

    /// Identity snapshots for this drawer are addressed to
    pub fn view_id(&self) -> NetworkId {
        self.view_id
    }

    pub fn role(&self) -> NetworkRole {
        self.role
    }

    /// Queue a pen change; it takes effect at the start of the next tick.
    /// Observers take their pen from snapshots, so commands there are dropped.
    pub fn submit(&mut self, command: PenCommand) {
        if !self.role.is_authoritative() {
            debug!("Drawer {}: ignoring {:?} on observer", self.view_id, command);
            return;
        }
        self.staged.apply(command);
    }

    /// Pen settings the next tick will latch
    pub fn pen(&self) -> PenSettings {
        self.staged
    }

    /// Run one tick in this drawer's role
    pub fn tick<H: SceneHost>(&mut self, host: &mut H) -> TickReport {
        match self.role {
            NetworkRole::Authority => {
                self.sampler.set_pen(self.staged);
                TickReport::Sampled(self.sampler.sample_tick(&self.transform, host))
            }
            NetworkRole::Observer => TickReport::Applied(self.replicator.apply_tick(host)),
        }
    }

    /// Snapshot of the latest sampled state, None on observers
    pub fn write_snapshot(&self) -> Option<ReplicatedSnapshot> {
        self.role
            .is_authoritative()
            .then(|| self.sampler.intent().to_snapshot())
    }

    /// Send this tick's snapshot to every other peer. No-op on observers.
    pub fn publish<T: Transport>(&self, transport: &T) -> Result<(), TransportError> {
        let Some(snapshot) = self.write_snapshot() else {
            return Ok(());
        };
        transport.send(self.view_id, snapshot.to_bytes())
    }

    /// Feed a replication message to this drawer. Returns true if it was
    /// addressed here and accepted.
    pub fn receive(&mut self, message: &ViewMessage) -> bool {
        if message.view_id != self.view_id {
            return false;
        }
        if self.role.is_authoritative() {
            warn!(
                "Drawer {}: authority received a snapshot from {}, ignoring",
                self.view_id, message.sender
            );
            return false;
        }
        match self.replicator.receive_bytes(&message.payload) {
            Ok(()) => true,
            Err(e) => {
                warn!(
                    "Drawer {}: dropping malformed snapshot from {}: {}",
                    self.view_id, message.sender, e
                );
                false
            }
        }
    }

    /// Tear down per-drawer state when the actor leaves the session.
    /// The next snapshot after a reconnect starts a fresh reconstruction.
    pub fn disconnect(&mut self) {
        info!("Drawer {} disconnected", self.view_id);
        self.replicator.discard();
    }

    /// Authoritative drawing state, as last sampled
    pub fn intent(&self) -> &DrawIntent {
        self.sampler.intent()
    }

    /// Observer mirror, None on the authority or before the first snapshot
    pub fn receiver(&self) -> Option<&ReceiverState> {
        self.replicator.receiver()
    }
}

#[cfg(test)]
mod tests {
    use painting::Rgba;
    use sharedraw_net::{LoopbackHub, PeerId};

    use super::*;
    use crate::testing::{FakeHost, drew};

    fn view() -> NetworkId {
        NetworkId::new(100).unwrap()
    }

    fn drawer(role: NetworkRole) -> RayCastDrawer {
        RayCastDrawer::new(view(), role, &DrawerConfig::default())
    }

    #[test]
    fn test_pen_latched_at_tick_start() {
        let mut host = FakeHost::default();
        let canvas = host.add_object(Some(1), true);
        let mut authority = drawer(NetworkRole::Authority);

        host.aim_at(canvas, 0.1, 0.1);
        authority.submit(PenCommand::SetColor(Rgba::BLACK));
        authority.submit(PenCommand::SetWidth(6));
        // Not applied until the tick runs
        assert_eq!(authority.intent().pen, PenSettings::default());

        authority.tick(&mut host);
        assert_eq!(host.calls(canvas), &[drew((0.0, 0.0), (0.1, 0.1), 6, Rgba::BLACK)]);
        assert_eq!(authority.write_snapshot().map(|s| s.width), Some(6));
    }

    #[test]
    fn test_observer_ignores_commands_and_never_samples() {
        let mut host = FakeHost::default();
        let canvas = host.add_object(Some(1), true);
        let mut observer = drawer(NetworkRole::Observer);

        observer.submit(PenCommand::SetWidth(20));
        assert_eq!(observer.pen().width, 3);

        host.aim_at(canvas, 0.5, 0.5);
        let report = observer.tick(&mut host);
        assert_eq!(report, TickReport::Applied(ApplyOutcome::AwaitingSnapshot));
        assert!(host.last_ray.get().is_none());
        assert!(host.calls(canvas).is_empty());
        assert!(observer.write_snapshot().is_none());
    }

    #[test]
    fn test_observer_mirrors_authority_segments() {
        let mut hub = LoopbackHub::new(16);
        let authority_link = hub.endpoint();
        let mut observer_link = hub.endpoint();

        let mut authority_host = FakeHost::default();
        let a_canvas = authority_host.add_object(Some(1), true);
        let mut observer_host = FakeHost::default();
        let o_canvas = observer_host.add_object(Some(1), true);

        let mut authority = drawer(NetworkRole::Authority);
        let mut observer = drawer(NetworkRole::Observer);

        for (x, y) in [(0.1, 0.1), (0.2, 0.1), (0.3, 0.2)] {
            authority_host.aim_at(a_canvas, x, y);
            authority.tick(&mut authority_host);
            authority.publish(&authority_link).unwrap();

            for message in observer_link.drain() {
                assert!(observer.receive(&message));
            }
            observer.tick(&mut observer_host);
        }

        assert_eq!(authority_host.calls(a_canvas), observer_host.calls(o_canvas));
        assert_eq!(observer.receiver().map(ReceiverState::snapshots_received), Some(3));
    }

    #[test]
    fn test_receive_filters_messages() {
        let mut authority = drawer(NetworkRole::Authority);
        let mut observer = drawer(NetworkRole::Observer);
        let payload = authority.intent().to_snapshot().to_bytes();

        let other_view = ViewMessage {
            view_id: NetworkId::new(7).unwrap(),
            sender: PeerId(0),
            payload: payload.clone(),
        };
        assert!(!observer.receive(&other_view));

        let addressed = ViewMessage {
            view_id: view(),
            sender: PeerId(0),
            payload,
        };
        assert!(!authority.receive(&addressed));
        assert!(authority.receiver().is_none());

        let garbage = ViewMessage {
            payload: vec![9; 4],
            ..addressed.clone()
        };
        assert!(!observer.receive(&garbage));
        assert!(observer.receiver().is_none());

        assert!(observer.receive(&addressed));
    }

    #[test]
    fn test_disconnect_discards_mirror() {
        let mut observer = drawer(NetworkRole::Observer);
        let authority = drawer(NetworkRole::Authority);
        let message = ViewMessage {
            view_id: view(),
            sender: PeerId(0),
            payload: authority.intent().to_snapshot().to_bytes(),
        };

        observer.receive(&message);
        assert!(observer.receiver().is_some());
        observer.disconnect();
        assert!(observer.receiver().is_none());
    }

    #[test]
    fn test_publish_is_noop_on_observer() {
        let mut hub = LoopbackHub::new(4);
        let observer_link = hub.endpoint();
        let mut listener = hub.endpoint();

        drawer(NetworkRole::Observer).publish(&observer_link).unwrap();
        assert!(listener.try_recv().is_none());
    }
}
