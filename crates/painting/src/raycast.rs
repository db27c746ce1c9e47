//! Ray-mesh intersection for locating paint targets.
//!
//! Hits are found per triangle with Moller-Trumbore; the texture coordinate
//! at the closest hit is blended from the triangle's vertex UVs.

use glam::{Vec2, Vec3};

/// Determinant and distance cutoff
const EPSILON: f32 = 1e-6;

/// Closest intersection of a ray with a [`TriangleMesh`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshHit {
    /// Distance along the (normalized) ray
    pub distance: f32,
    /// Interpolated texture coordinate, if the mesh carries UVs
    pub uv: Option<Vec2>,
}

/// Distance and barycentric weights `(u, v)` of the second and third vertex
/// where the ray crosses `tri`. Both faces count as hits.
pub fn intersect_triangle(origin: Vec3, dir: Vec3, tri: [Vec3; 3]) -> Option<(f32, Vec2)> {
    let [a, b, c] = tri;
    let ab = b - a;
    let ac = c - a;

    let p = dir.cross(ac);
    let det = ab.dot(p);
    if det.abs() < EPSILON {
        return None;
    }
    let inv_det = det.recip();

    let s = origin - a;
    let u = s.dot(p) * inv_det;
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(ab);
    let v = dir.dot(q) * inv_det;
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = ac.dot(q) * inv_det;
    (t >= EPSILON).then_some((t, Vec2::new(u, v)))
}

/// Indexed triangles used as a precise collider
#[derive(Debug, Clone, Default)]
pub struct TriangleMesh {
    /// World-space vertex positions
    pub positions: Vec<Vec3>,
    /// Three indices per triangle
    pub indices: Vec<u32>,
    /// One UV per position, or empty
    pub uvs: Vec<Vec2>,
}

impl TriangleMesh {
    /// Rectangle spanned by `right` and `down` from `corner`.
    ///
    /// UV (0,0) sits at `corner`, u grows along `right` and v along `down`.
    pub fn quad(corner: Vec3, right: Vec3, down: Vec3) -> Self {
        Self {
            positions: vec![corner, corner + right, corner + right + down, corner + down],
            indices: vec![0, 1, 2, 0, 2, 3],
            uvs: vec![Vec2::ZERO, Vec2::X, Vec2::ONE, Vec2::Y],
        }
    }

    /// Vertex index triples; a trailing partial triple is ignored
    fn triangles(&self) -> impl Iterator<Item = [usize; 3]> + '_ {
        self.indices
            .chunks_exact(3)
            .map(|tri| [tri[0] as usize, tri[1] as usize, tri[2] as usize])
    }

    /// UV at barycentric weights `w` inside triangle `tri`
    fn uv_at(&self, tri: [usize; 3], w: Vec2) -> Option<Vec2> {
        let [a, b, c] = tri.map(|i| self.uvs.get(i).copied());
        Some(a? * (1.0 - w.x - w.y) + b? * w.x + c? * w.y)
    }

    /// Closest hit within `max_distance`, tested against every triangle.
    pub fn raycast(&self, origin: Vec3, dir: Vec3, max_distance: f32) -> Option<MeshHit> {
        let (t, tri, w) = self
            .triangles()
            .filter_map(|tri| {
                let corners = tri.map(|i| self.positions.get(i).copied());
                let [Some(a), Some(b), Some(c)] = corners else {
                    return None;
                };
                let (t, w) = intersect_triangle(origin, dir, [a, b, c])?;
                (t <= max_distance).then_some((t, tri, w))
            })
            .min_by(|x, y| x.0.total_cmp(&y.0))?;

        Some(MeshHit {
            distance: t,
            uv: self.uv_at(tri, w),
        })
    }
}
