//! Drawable canvas - segment stamping onto a CPU surface
//!
//! Segments arrive as pairs of normalized texture coordinates (0.0-1.0 on both
//! axes). A `previous` coordinate equal to the origin marks the first sample of
//! a stroke and stamps a single dot instead of a line from the corner.
//!
//! Pixels are overwritten rather than blended, so applying the same segment
//! any number of times leaves the surface in the same state.

use glam::Vec2;
use tracing::debug;

use crate::constants::{MAX_CANVAS_SIZE, MIN_PEN_WIDTH};
use crate::surface::CpuSurface;
use crate::types::{BlendMode, Rgba};

/// Smallest stamp radius that still covers the nearest pixel center.
const MIN_STAMP_RADIUS: f32 = std::f32::consts::FRAC_1_SQRT_2;

/// Capability exposed by objects that can be painted on.
pub trait DrawableSurface {
    /// Paint the segment `previous -> current` with the given pen width and color.
    fn draw(&mut self, current: Vec2, previous: Vec2, width: i32, color: Rgba);

    /// Restore the segment `previous -> current` to the surface's reset color.
    fn erase(&mut self, current: Vec2, previous: Vec2, width: i32);
}

/// Bounding box of pixels touched by an operation (x, y, width, height)
pub type Region = (u32, u32, u32, u32);

/// A paintable texture with a reset color used for erasing
#[derive(Debug, Clone)]
pub struct DrawableCanvas {
    surface: CpuSurface,
    reset_color: Rgba,
    dirty: bool,
    revision: u64,
}

impl DrawableCanvas {
    /// Create a canvas filled with `reset_color`. Dimensions are clamped to
    /// `1..=MAX_CANVAS_SIZE`.
    pub fn new(width: u32, height: u32, reset_color: Rgba) -> Self {
        let width = width.clamp(1, MAX_CANVAS_SIZE);
        let height = height.clamp(1, MAX_CANVAS_SIZE);
        Self {
            surface: CpuSurface::new(width, height, reset_color),
            reset_color,
            dirty: true,
            revision: 0,
        }
    }

    pub fn surface(&self) -> &CpuSurface {
        &self.surface
    }

    pub fn reset_color(&self) -> Rgba {
        self.reset_color
    }

    /// Number of paint operations that changed at least one pixel
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Whether the surface changed since the last [`Self::take_dirty`]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Clear and return the dirty flag
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Restore every pixel to the reset color
    pub fn reset(&mut self) {
        self.surface.clear(self.reset_color);
        self.mark_changed();
    }

    /// Convert a normalized texture coordinate to continuous pixel space
    pub fn uv_to_pixel(&self, uv: Vec2) -> Vec2 {
        Vec2::new(
            uv.x * self.surface.width as f32,
            uv.y * self.surface.height as f32,
        )
    }

    /// Stamp a segment with the given mode.
    ///
    /// Returns the bounding box of written pixels, or None when nothing
    /// landed on the surface.
    pub fn paint_segment(
        &mut self,
        current: Vec2,
        previous: Vec2,
        width: i32,
        color: Rgba,
        mode: BlendMode,
    ) -> Option<Region> {
        if width < MIN_PEN_WIDTH {
            debug!("paint_segment: width {} below minimum, skipped", width);
            return None;
        }
        if !(current.is_finite() && previous.is_finite()) {
            debug!(
                "paint_segment: non-finite segment {} -> {}, skipped",
                previous, current
            );
            return None;
        }

        let ink = match mode {
            BlendMode::Normal => color,
            BlendMode::Erase => self.reset_color,
        };
        let radius = (width as f32 / 2.0).max(MIN_STAMP_RADIUS);
        let end = self.uv_to_pixel(current);

        let mut region: Option<Region> = None;
        if previous == Vec2::ZERO {
            region = self.stamp_disc(end, radius, ink);
        } else {
            // Only the part that can touch the surface is stepped, so the
            // stamp count is bounded by the canvas size.
            let lo = Vec2::splat(-radius);
            let hi = Vec2::new(self.surface.width as f32, self.surface.height as f32) + radius;
            let (start, end) = clip_segment(self.uv_to_pixel(previous), end, lo, hi)?;
            let steps = start.distance(end).ceil().max(1.0) as u32;
            for i in 0..=steps {
                let center = start.lerp(end, i as f32 / steps as f32);
                if let Some(r) = self.stamp_disc(center, radius, ink) {
                    region = Some(match region {
                        Some(acc) => union(acc, r),
                        None => r,
                    });
                }
            }
        }

        if region.is_some() {
            self.mark_changed();
        }
        region
    }

    /// Overwrite every pixel whose center lies within `radius` of `center`
    fn stamp_disc(&mut self, center: Vec2, radius: f32, color: Rgba) -> Option<Region> {
        let x_min = ((center.x - radius).floor().max(0.0) as u32).min(self.surface.width);
        let y_min = ((center.y - radius).floor().max(0.0) as u32).min(self.surface.height);
        let x_max = ((center.x + radius).ceil().max(0.0) as u32).min(self.surface.width);
        let y_max = ((center.y + radius).ceil().max(0.0) as u32).min(self.surface.height);

        if x_min >= x_max || y_min >= y_max {
            return None;
        }

        let radius_sq = radius * radius;
        let mut touched = false;
        for py in y_min..y_max {
            for px in x_min..x_max {
                let dx = (px as f32 + 0.5) - center.x;
                let dy = (py as f32 + 0.5) - center.y;
                if dx * dx + dy * dy <= radius_sq {
                    self.surface.set_pixel(px, py, color);
                    touched = true;
                }
            }
        }

        touched.then_some((x_min, y_min, x_max - x_min, y_max - y_min))
    }

    fn mark_changed(&mut self) {
        self.dirty = true;
        self.revision += 1;
    }
}

impl DrawableSurface for DrawableCanvas {
    fn draw(&mut self, current: Vec2, previous: Vec2, width: i32, color: Rgba) {
        self.paint_segment(current, previous, width, color, BlendMode::Normal);
    }

    fn erase(&mut self, current: Vec2, previous: Vec2, width: i32) {
        self.paint_segment(current, previous, width, self.reset_color, BlendMode::Erase);
    }
}

/// Clip `a -> b` to the rectangle `lo..=hi` (Liang-Barsky)
fn clip_segment(a: Vec2, b: Vec2, lo: Vec2, hi: Vec2) -> Option<(Vec2, Vec2)> {
    let d = b - a;
    let mut t0 = 0.0f32;
    let mut t1 = 1.0f32;
    for (p, q) in [
        (-d.x, a.x - lo.x),
        (d.x, hi.x - a.x),
        (-d.y, a.y - lo.y),
        (d.y, hi.y - a.y),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }
    Some((a + d * t0, a + d * t1))
}

fn union(a: Region, b: Region) -> Region {
    let x0 = a.0.min(b.0);
    let y0 = a.1.min(b.1);
    let x1 = (a.0 + a.2).max(b.0 + b.2);
    let y1 = (a.1 + a.3).max(b.1 + b.3);
    (x0, y0, x1 - x0, y1 - y0)
}
