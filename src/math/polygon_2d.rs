use super::{lerp, Point2, TOLERANCE};

/// Computes the signed area of a ring (shoelace formula).
///
/// Positive for counter-clockwise, negative for clockwise.
#[must_use]
pub fn signed_area(points: &[Point2]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        sum += points[i].x * points[j].y - points[j].x * points[i].y;
    }
    sum * 0.5
}

/// Total boundary length of a closed ring.
#[must_use]
pub fn perimeter(points: &[Point2]) -> f64 {
    if points.len() < 2 {
        return 0.0;
    }
    ring_edges(points).map(|(a, b)| (b - a).norm()).sum()
}

/// Iterates the edges `(p[i], p[i + 1])` of a closed ring, including the
/// closing edge back to the first point.
pub fn ring_edges(points: &[Point2]) -> impl Iterator<Item = (&Point2, &Point2)> {
    let n = points.len();
    (0..n).map(move |i| (&points[i], &points[(i + 1) % n]))
}

/// Average of the ring's vertices.
#[must_use]
pub fn vertex_centroid(points: &[Point2]) -> Option<Point2> {
    if points.is_empty() {
        return None;
    }
    #[allow(clippy::cast_precision_loss)]
    let n = points.len() as f64;
    let sum = points
        .iter()
        .fold(super::Vector2::zeros(), |acc, p| acc + p.coords);
    Some(Point2::from(sum / n))
}

/// Crossing-number point-in-ring test.
///
/// Works for non-convex rings. Boundary points follow the half-open rule
/// (an edge counts when one endpoint is strictly above the ray and the other
/// is not), so the answer is deterministic but not symmetric across edges.
#[must_use]
pub fn point_in_ring(p: &Point2, points: &[Point2]) -> bool {
    let n = points.len();
    if n < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let pi = &points[i];
        let pj = &points[j];
        if (pi.y > p.y) != (pj.y > p.y) {
            let x_cross = (pj.x - pi.x) * (p.y - pi.y) / (pj.y - pi.y) + pi.x;
            if p.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Inserts collinear points along every edge so no gap exceeds `spacing`.
///
/// An edge of length `L` receives `floor(L / spacing)` interior points at
/// parameters `k / (n + 1)`. The output starts at the ring's first vertex and
/// keeps every input vertex. A non-positive or non-finite `spacing`
/// returns the ring unchanged.
#[must_use]
pub fn densify(points: &[Point2], spacing: f64) -> Vec<Point2> {
    if points.len() < 2 || !spacing.is_finite() || spacing <= 0.0 {
        return points.to_vec();
    }
    let mut out = Vec::with_capacity(points.len() * 2);
    for (a, b) in ring_edges(points) {
        out.push(*a);
        let length = (b - a).norm();
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let inserts = (length / spacing).floor() as usize;
        #[allow(clippy::cast_precision_loss)]
        let steps = (inserts + 1) as f64;
        for k in 1..=inserts {
            #[allow(clippy::cast_precision_loss)]
            let t = k as f64 / steps;
            out.push(lerp(a, b, t));
        }
    }
    out
}

/// Orientation sign of a signed area: `1.0` for counter-clockwise (or flat)
/// rings, `-1.0` for clockwise ones.
#[must_use]
pub fn winding_sign(area: f64) -> f64 {
    if area < 0.0 {
        -1.0
    } else {
        1.0
    }
}

/// A borrowed ring together with its signed area, computed once.
#[derive(Debug, Clone, Copy)]
pub struct OrientedRing<'a> {
    points: &'a [Point2],
    signed_area: f64,
}

impl<'a> OrientedRing<'a> {
    /// Wraps a ring, computing its signed area.
    #[must_use]
    pub fn new(points: &'a [Point2]) -> Self {
        Self {
            points,
            signed_area: signed_area(points),
        }
    }

    #[must_use]
    pub fn points(&self) -> &'a [Point2] {
        self.points
    }

    #[must_use]
    pub fn signed_area(&self) -> f64 {
        self.signed_area
    }

    /// `true` when the ring encloses no area.
    #[must_use]
    pub fn is_flat(&self) -> bool {
        self.signed_area.abs() < TOLERANCE
    }
}
