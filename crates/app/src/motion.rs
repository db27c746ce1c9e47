//! Scripted input for the demo authority: where the actor is and what the
//! pen does on a given tick.

use glam::{Vec2, Vec3};
use painting::Rgba;
use sharedraw_drawer::{ColorSource, PenCommand};
use sharedraw_scene::CanvasPlane;

/// Height above the canvas the actor hovers at
const HOVER_HEIGHT: f32 = 1.5;

/// Lissajous path over the canvas. The amplitude overshoots the canvas
/// edges so the stroke regularly breaks and restarts.
#[derive(Debug, Clone, Copy)]
pub struct MotionPath {
    plane: CanvasPlane,
    /// Radians per tick on each axis
    rate: Vec2,
    amplitude: Vec2,
}

impl MotionPath {
    pub fn new(plane: CanvasPlane) -> Self {
        Self {
            plane,
            rate: Vec2::new(0.02, 0.03),
            amplitude: Vec2::new(0.58, 0.42),
        }
    }

    /// Texture coordinate the actor is above on `tick`
    pub fn uv(&self, tick: u32) -> Vec2 {
        let t = tick as f32;
        Vec2::new(
            0.5 + self.amplitude.x * (self.rate.x * t).sin(),
            0.5 + self.amplitude.y * (self.rate.y * t).cos(),
        )
    }

    pub fn position(&self, tick: u32) -> Vec3 {
        self.plane.point_above(self.uv(tick), HOVER_HEIGHT)
    }
}

/// Color picker stand-in that slowly walks the hue wheel
#[derive(Debug, Clone, Copy)]
pub struct HueCycle {
    hue: f32,
    step: f32,
}

impl HueCycle {
    pub fn new(step: f32) -> Self {
        Self { hue: 0.0, step }
    }

    pub fn advance(&mut self) {
        self.hue = (self.hue + self.step).rem_euclid(1.0);
    }
}

impl ColorSource for HueCycle {
    fn color(&self) -> Rgba {
        Rgba::from_hsv(self.hue, 0.8, 0.9)
    }
}

/// Pen changes scheduled on `tick`: periodic erase passes, a pause, and
/// a width change.
pub fn scheduled_commands(tick: u32) -> Vec<PenCommand> {
    let mut commands = Vec::new();
    match tick % 300 {
        200 => commands.push(PenCommand::SetErase(true)),
        230 => commands.push(PenCommand::SetErase(false)),
        260 => commands.push(PenCommand::SetRayCastEnabled(false)),
        275 => commands.push(PenCommand::SetRayCastEnabled(true)),
        _ => {}
    }
    if tick % 150 == 0 {
        let width = if (tick / 150) % 2 == 0 { 3 } else { 7 };
        commands.push(PenCommand::SetWidth(width));
    }
    commands
}
