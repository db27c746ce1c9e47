//! Per-tick drawing state and the segments it produces.

use glam::Vec2;
use painting::{DrawableSurface, Rgba};
use sharedraw_net::{NetworkId, ReplicatedSnapshot};

use crate::pen::PenSettings;

/// How a segment is applied to a surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StrokeMode {
    Draw(Rgba),
    Erase,
}

/// One `previous -> current` piece of a stroke
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeSegment {
    pub current: Vec2,
    pub previous: Vec2,
    pub width: i32,
    pub mode: StrokeMode,
}

impl StrokeSegment {
    /// Dispatch to the surface's draw or erase operation
    pub fn apply_to(&self, surface: &mut dyn DrawableSurface) {
        match self.mode {
            StrokeMode::Draw(color) => surface.draw(self.current, self.previous, self.width, color),
            StrokeMode::Erase => surface.erase(self.current, self.previous, self.width),
        }
    }
}

/// Drawing state of one drawer.
///
/// On the authority this is the sampler's output; on observers the same
/// shape holds the mirror rebuilt from snapshots.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawIntent {
    pub pen: PenSettings,
    /// Replicated surface under the pen, None when there is none
    pub target_surface: Option<NetworkId>,
    pub current_coord: Vec2,
    pub previous_coord: Vec2,
}

impl DrawIntent {
    pub fn new(pen: PenSettings) -> Self {
        Self {
            pen,
            target_surface: None,
            current_coord: Vec2::ZERO,
            previous_coord: Vec2::ZERO,
        }
    }

    /// Break the stroke: no target, and the window collapses to the origin
    /// so the next hit starts fresh instead of connecting to stale history.
    pub fn reset_stroke(&mut self) {
        self.target_surface = None;
        self.previous_coord = Vec2::ZERO;
        self.current_coord = Vec2::ZERO;
    }

    /// Slide the two-point window forward to `coord`
    pub fn advance(&mut self, coord: Vec2) {
        self.previous_coord = self.current_coord;
        self.current_coord = coord;
    }

    /// The segment this state paints
    pub fn segment(&self) -> StrokeSegment {
        StrokeSegment {
            current: self.current_coord,
            previous: self.previous_coord,
            width: self.pen.width,
            mode: if self.pen.erase {
                StrokeMode::Erase
            } else {
                StrokeMode::Draw(self.pen.color)
            },
        }
    }

    /// The fields sent to observers; `previous_coord` stays local
    pub fn to_snapshot(&self) -> ReplicatedSnapshot {
        ReplicatedSnapshot {
            enabled: self.pen.ray_cast_enabled,
            color: self.pen.color.to_array(),
            width: self.pen.width,
            erase: self.pen.erase,
            target_surface: self.target_surface,
            current_coord: self.current_coord.to_array(),
        }
    }

    /// Adopt a received snapshot. The held current coordinate becomes the
    /// previous one, so segments join consecutive snapshots.
    pub fn absorb(&mut self, snapshot: &ReplicatedSnapshot) {
        self.pen = PenSettings {
            ray_cast_enabled: snapshot.enabled,
            color: Rgba::from_array(snapshot.color),
            width: snapshot.width,
            erase: snapshot.erase,
        };
        self.target_surface = snapshot.target_surface;
        self.advance(Vec2::from_array(snapshot.current_coord));
    }
}
