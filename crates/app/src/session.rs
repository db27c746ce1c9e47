//! Demo session: one authoritative drawer and its observer peers
//!
//! Every peer owns a full scene with its own copy of the shared canvas. The
//! authority samples and publishes once per tick; observers drain the hub,
//! then apply. At the end each observer canvas is compared with the
//! authority's.

use std::path::PathBuf;
use std::time::Duration;

use glam::Vec3;
use painting::DrawableCanvas;
use sharedraw_config::{ConfigError, SessionConfig};
use sharedraw_drawer::{
    ApplyOutcome, DrawerController, NetworkRole, RayCastDrawer, SampleOutcome, TickReport,
};
use sharedraw_net::{LoopbackEndpoint, LoopbackHub, NetworkId, Transport, TransportError};
use sharedraw_scene::{CanvasPlane, ObjectHandle, SceneError, SceneWorld};
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::export;
use crate::motion::{HueCycle, MotionPath, scheduled_commands};

/// Network identity of the demo drawer
const DRAWER_VIEW_ID: i32 = 1000;

/// Messages a slow observer may fall behind before the oldest are dropped
const HUB_CAPACITY: usize = 256;

/// Errors that end a session
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Scene(#[from] SceneError),

    #[error("Failed to publish snapshot: {0}")]
    Transport(#[from] TransportError),

    #[error("Failed to create {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to encode image: {0}")]
    Image(#[from] image::ImageError),

    #[error("Export failed: {0}")]
    Export(String),
}

/// One participant: a scene, its copy of the canvas, and its drawer instance
#[derive(Debug)]
struct Peer {
    name: String,
    world: SceneWorld,
    canvas: ObjectHandle,
    drawer: RayCastDrawer,
    link: LoopbackEndpoint,
}

impl Peer {
    fn new(
        name: String,
        role: NetworkRole,
        link: LoopbackEndpoint,
        plane: CanvasPlane,
        config: &SessionConfig,
    ) -> Result<Self, SessionError> {
        let mut world = SceneWorld::new();
        let canvas = world.spawn_canvas("canvas", plane, &config.canvas)?;
        // Obstacle sitting on the canvas; rays that hit it break the stroke
        world.spawn_box(
            "crate",
            plane.center + Vec3::new(0.0, 0.2, 0.0),
            Vec3::new(0.25, 0.2, 0.25),
        )?;

        let view_id = NetworkId::new(DRAWER_VIEW_ID)
            .ok_or_else(|| SceneError::InvalidNetworkId(DRAWER_VIEW_ID))?;
        let drawer = RayCastDrawer::new(view_id, role, &config.drawer);
        info!("{} joined as {:?} ({})", name, role, link.peer_id());

        Ok(Self {
            name,
            world,
            canvas,
            drawer,
            link,
        })
    }

    fn canvas(&self) -> Option<&DrawableCanvas> {
        self.world.canvas(self.canvas)
    }
}

/// Per-session tick counters
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SessionStats {
    pub ticks: u32,
    pub painted: u32,
    pub blocked: u32,
    pub applied: u32,
    pub unresolved: u32,
}

/// Pixel comparison of one observer against the authority
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanvasMatch {
    pub peer: String,
    pub mismatched: usize,
    pub total: usize,
}

#[derive(Debug)]
pub struct Session {
    config: SessionConfig,
    path: MotionPath,
    controller: DrawerController<HueCycle>,
    authority: Peer,
    observers: Vec<Peer>,
    stats: SessionStats,
}

impl Session {
    pub fn new(config: SessionConfig) -> Result<Self, SessionError> {
        config.validate()?;

        let plane = CanvasPlane::from_config(Vec3::ZERO, &config.canvas);
        let mut hub = LoopbackHub::new(HUB_CAPACITY);

        let authority = Peer::new(
            "authority".into(),
            NetworkRole::Authority,
            hub.endpoint(),
            plane,
            &config,
        )?;
        let observers = (0..config.observers)
            .map(|i| {
                Peer::new(
                    format!("observer-{i}"),
                    NetworkRole::Observer,
                    hub.endpoint(),
                    plane,
                    &config,
                )
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            path: MotionPath::new(plane),
            controller: DrawerController::new(HueCycle::new(0.002)),
            authority,
            observers,
            stats: SessionStats::default(),
            config,
        })
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    /// Run one tick on every peer: authority first, then each observer
    pub fn step(&mut self) -> Result<(), SessionError> {
        let tick = self.stats.ticks;

        self.controller.source_mut().advance();
        self.controller.update(&mut self.authority.drawer);
        for command in scheduled_commands(tick) {
            debug!("Tick {}: {:?}", tick, command);
            self.authority.drawer.submit(command);
        }
        self.authority.drawer.transform.position = self.path.position(tick);

        match self.authority.drawer.tick(&mut self.authority.world) {
            TickReport::Sampled(SampleOutcome::Painted { .. }) => self.stats.painted += 1,
            TickReport::Sampled(SampleOutcome::InvalidCollider) => self.stats.blocked += 1,
            _ => {}
        }
        self.authority.drawer.publish(&self.authority.link)?;

        for observer in &mut self.observers {
            for message in observer.link.drain() {
                observer.drawer.receive(&message);
            }
            match observer.drawer.tick(&mut observer.world) {
                TickReport::Applied(ApplyOutcome::Applied { .. }) => self.stats.applied += 1,
                TickReport::Applied(ApplyOutcome::Unresolved(_)) => self.stats.unresolved += 1,
                _ => {}
            }
        }

        self.stats.ticks += 1;
        Ok(())
    }

    /// Drive the configured number of ticks at the configured rate
    pub async fn run(&mut self) -> Result<(), SessionError> {
        let period = Duration::from_secs_f64(1.0 / f64::from(self.config.tick_hz));
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        info!(
            "Running {} ticks at {} Hz with {} observers",
            self.config.ticks, self.config.tick_hz, self.config.observers
        );
        for _ in 0..self.config.ticks {
            ticker.tick().await;
            self.step()?;
        }
        Ok(())
    }

    /// Compare every observer canvas with the authority's
    pub fn compare(&self) -> Vec<CanvasMatch> {
        let Some(expected) = self.authority.canvas() else {
            return Vec::new();
        };
        let expected = expected.surface().pixels();

        self.observers
            .iter()
            .map(|observer| {
                let mismatched = match observer.canvas() {
                    Some(canvas) => canvas
                        .surface()
                        .pixels()
                        .iter()
                        .zip(expected)
                        .filter(|(a, b)| a != b)
                        .count(),
                    None => expected.len(),
                };
                CanvasMatch {
                    peer: observer.name.clone(),
                    mismatched,
                    total: expected.len(),
                }
            })
            .collect()
    }

    /// Export every peer's canvas when an output directory is configured
    pub fn export(&self) -> Result<Vec<PathBuf>, SessionError> {
        let Some(dir) = self.config.output_dir.as_deref() else {
            return Ok(Vec::new());
        };
        std::iter::once(&self.authority)
            .chain(&self.observers)
            .filter_map(|peer| peer.canvas().map(|canvas| (peer, canvas)))
            .map(|(peer, canvas)| export::write_png(dir, &peer.name, canvas))
            .collect()
    }

    /// Observers leave the session and drop their mirrors
    pub fn shutdown(&mut self) {
        for observer in &mut self.observers {
            observer.drawer.disconnect();
        }
        let stats = self.stats;
        info!(
            "Session finished: {} ticks, {} painted, {} blocked",
            stats.ticks, stats.painted, stats.blocked
        );
        info!(
            "Observers applied {} ticks, {} unresolved",
            stats.applied, stats.unresolved
        );
        for result in self.compare() {
            if result.mismatched == 0 {
                info!("{} matches the authority canvas", result.peer);
            } else {
                warn!(
                    "{} differs from the authority in {}/{} pixels",
                    result.peer, result.mismatched, result.total
                );
            }
        }
    }
}
