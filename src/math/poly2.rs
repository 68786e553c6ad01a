//! Convex quadrilaterals and polygons
//!
//! Vertices are wound "naturally" for their coordinate system: clockwise in
//! a left-handed frame (x right, y down), counter-clockwise in a right-handed
//! one. With that winding `perp_r` of every edge points into the shape.

use crate::error::MathError;
use crate::math::{basic, line_intersect, Line2, Mat3x2, Scalar, Vec2};

/// Bilinearly maps `norm_pos` in `[0, 1]^2` onto the quad.
///
/// `x` runs along edge 0 -> 1 (and 3 -> 2), `y` from that edge towards 3 -> 2.
pub fn quad_interp<T: Scalar>(quad: &[Vec2<T>; 4], norm_pos: &Vec2<T>) -> Vec2<T> {
    let top = quad[0].lerp(&quad[1], norm_pos.x);
    let bottom = quad[3].lerp(&quad[2], norm_pos.x);
    top.lerp(&bottom, norm_pos.y)
}

/// Vertex average
pub fn quad_center<T: Scalar>(quad: &[Vec2<T>; 4]) -> Vec2<T> {
    let sum = quad.iter().fold(Vec2::zero(), |acc, v| acc + *v);
    sum / T::from_f64(4.0)
}

/// Width and height of a loose oriented box: the mean lengths of opposite edge pairs
pub fn quad_approx_dims<T: Scalar>(quad: &[Vec2<T>; 4]) -> Vec2<T> {
    Vec2::new(
        T::HALF * ((quad[0] - quad[1]).length() + (quad[2] - quad[3]).length()),
        T::HALF * ((quad[0] - quad[3]).length() + (quad[1] - quad[2]).length()),
    )
}

fn offset_edges<T: Scalar>(quad: &[Vec2<T>; 4], amount: T) -> [Line2<T>; 4] {
    let mut edges = [Line2::default(); 4];
    for (i, edge) in edges.iter_mut().enumerate() {
        let a = quad[i];
        let b = quad[(i + 1) % 4];
        let offset = (b - a).perp_r().normalized_safe() * amount;
        *edge = Line2::new(a + offset, b + offset);
    }
    edges
}

/// Moves every edge `amount` along its `perp_r` normal and re-intersects
/// neighbouring edges to find the new corners.
///
/// Corner `i` is where offset edges `i - 1` and `i` meet. Fails with
/// [`MathError::DegenerateQuad`] naming the first edge whose intersection
/// with its predecessor does not exist.
pub fn try_quad_expand<T: Scalar>(quad: &[Vec2<T>; 4], amount: T) -> Result<[Vec2<T>; 4], MathError> {
    let edges = offset_edges(quad, amount);
    let mut out = [Vec2::zero(); 4];
    for (i, corner) in out.iter_mut().enumerate() {
        let prev = &edges[basic::modulo(i as i32 - 1, 4) as usize];
        let next = &edges[i];
        *corner = line_intersect(&prev.pos_a, &prev.pos_b, &next.pos_a, &next.pos_b, false)
            .ok_or(MathError::DegenerateQuad { edge: i })?;
    }
    Ok(out)
}

/// [`try_quad_expand`], falling back to a copy of the input quad.
///
/// The fallback trips a debug assertion; odd input or large amounts can
/// still produce self-intersecting output without failing.
pub fn quad_expand<T: Scalar>(quad: &[Vec2<T>; 4], amount: T) -> [Vec2<T>; 4] {
    match try_quad_expand(quad, amount) {
        Ok(out) => out,
        Err(err) => {
            log::warn!("quad_expand by {} fell back to input: {}", amount, err);
            debug_assert!(false, "lines in quad are parallel or coincident: {}", err);
            *quad
        }
    }
}

/// Signed depth of `p` inside a convex quad.
///
/// Inside, the distance to the nearest edge (positive). Outside a side, minus
/// the perpendicular distance to that side. Outside a corner region, minus
/// the distance to that corner.
pub fn quad_penetration_depth<T: Scalar>(quad: &[Vec2<T>; 4], p: &Vec2<T>) -> T {
    let mut edges = [Vec2::zero(); 4];
    for (i, edge) in edges.iter_mut().enumerate() {
        *edge = (quad[(i + 1) % 4] - quad[i]).normalized();
    }

    let mut least_depth = T::MAX;
    for i in 0..4 {
        let prev = (i + 3) % 4;
        let to_point = *p - quad[i];

        if to_point.dot(&edges[i]) < T::ZERO && to_point.dot(&edges[prev]) > T::ZERO {
            return -to_point.length();
        }

        let depth = edges[i].perp_r().dot(&to_point);
        if depth < least_depth {
            least_depth = depth;
        }
    }
    least_depth
}

/// True iff `p` is strictly inside a convex polygon with natural winding.
///
/// Needs at least three vertices; fewer trip a debug assertion.
pub fn convex_poly_contains_point<T: Scalar>(verts: &[Vec2<T>], p: &Vec2<T>) -> bool {
    debug_assert!(verts.len() >= 3, "polygon needs at least 3 vertices, got {}", verts.len());
    let n = verts.len();
    (0..n).all(|i| {
        let to_point = *p - verts[i];
        let edge = verts[(i + 1) % n] - verts[i];
        edge.perp_l().dot(&to_point) < T::ZERO
    })
}

/// Transforms each vertex of `verts` as a point into the matching slot of `out`
pub fn transform_points<T: Scalar>(m: &Mat3x2<T>, verts: &[Vec2<T>], out: &mut [Vec2<T>]) {
    debug_assert_eq!(verts.len(), out.len());
    for (dst, src) in out.iter_mut().zip(verts) {
        *dst = m.mul_point(src);
    }
}
