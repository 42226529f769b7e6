use super::{Point2, TOLERANCE};

/// Inward nudge applied to segment endpoints before measuring face depth.
pub const SEGMENT_NUDGE: f64 = 1e-8;

/// Returns the minimum distance from point `p` to the segment `a`→`b`.
#[must_use]
pub fn point_to_segment_dist(p: &Point2, a: &Point2, b: &Point2) -> f64 {
    let d = b - a;
    let len_sq = d.norm_squared();

    if len_sq < 1e-20 {
        // Degenerate segment (zero length).
        return (p - a).norm();
    }

    // Project point onto the infinite line, clamp to [0, 1].
    let t = ((p - a).dot(&d) / len_sq).clamp(0.0, 1.0);
    (p - (a + d * t)).norm()
}

/// Distance from `p` to the segment `a`→`b` after pulling both endpoints
/// towards each other by `nudge`.
///
/// Adjacent footprint edges share endpoints, so a viewpoint nearest to a
/// shared corner would otherwise measure the same distance to both edges.
#[must_use]
pub fn point_to_nudged_segment_dist(p: &Point2, a: &Point2, b: &Point2, nudge: f64) -> f64 {
    let d = b - a;
    let len = d.norm();
    if len < TOLERANCE {
        return (p - a).norm();
    }
    let step = d * (nudge.min(len * 0.5) / len);
    point_to_segment_dist(p, &(a + step), &(b - step))
}

/// Euclidean distance from `p` to the nearest point of `points`.
///
/// Returns `None` for an empty slice.
#[must_use]
pub fn nearest_vertex_dist(p: &Point2, points: &[Point2]) -> Option<f64> {
    points
        .iter()
        .map(|q| (q - p).norm())
        .min_by(f64::total_cmp)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-10;

    fn pt(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    // ── point_to_segment_dist tests ──

    #[test]
    fn segment_dist_perpendicular_projection() {
        // Point (1, 1) to segment (0,0)→(2,0). Closest at (1,0), dist = 1.
        let d = point_to_segment_dist(&pt(1.0, 1.0), &pt(0.0, 0.0), &pt(2.0, 0.0));
        assert!((d - 1.0).abs() < TOL, "d={d}");
    }

    #[test]
    fn segment_dist_endpoint_closest() {
        let d = point_to_segment_dist(&pt(-1.0, 0.0), &pt(0.0, 0.0), &pt(2.0, 0.0));
        assert!((d - 1.0).abs() < TOL, "d={d}");
    }

    #[test]
    fn segment_dist_on_segment() {
        let d = point_to_segment_dist(&pt(1.0, 0.0), &pt(0.0, 0.0), &pt(2.0, 0.0));
        assert!(d.abs() < TOL, "d={d}");
    }

    #[test]
    fn segment_dist_degenerate() {
        // Zero-length segment: distance is point-to-point.
        let d = point_to_segment_dist(&pt(3.0, 4.0), &pt(0.0, 0.0), &pt(0.0, 0.0));
        assert!((d - 5.0).abs() < TOL, "d={d}");
    }

    // ── nudged distance ──

    #[test]
    fn nudge_separates_edges_sharing_a_corner() {
        // Viewpoint beyond the shared corner (0,0) of two edges.
        let v = pt(-3.0, -1.0);
        let corner = pt(0.0, 0.0);
        let along_x = point_to_nudged_segment_dist(&v, &corner, &pt(10.0, 0.0), 1e-3);
        let along_y = point_to_nudged_segment_dist(&v, &corner, &pt(0.0, 10.0), 1e-3);
        assert!((along_x - along_y).abs() > 1e-6);
    }

    #[test]
    fn nudge_is_negligible_far_from_endpoints() {
        let d = point_to_nudged_segment_dist(&pt(5.0, 2.0), &pt(0.0, 0.0), &pt(10.0, 0.0), SEGMENT_NUDGE);
        assert!((d - 2.0).abs() < TOL, "d={d}");
    }

    #[test]
    fn nearest_vertex_picks_minimum() {
        let d = nearest_vertex_dist(&pt(0.0, 0.0), &[pt(3.0, 4.0), pt(1.0, 0.0), pt(-6.0, 8.0)]);
        assert_eq!(d, Some(1.0));
        assert_eq!(nearest_vertex_dist(&pt(0.0, 0.0), &[]), None);
    }
}
