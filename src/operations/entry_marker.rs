use std::f64::consts::FRAC_PI_2;

use crate::math::polygon_2d::{ring_edges, winding_sign, OrientedRing};
use crate::math::{lerp, Point2, Vector2, TOLERANCE};

/// Position and outward orientation of an entry on a footprint boundary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntryMarker {
    pub position: Point2,
    /// Direction the marker points, in radians; perpendicular to the boundary
    /// and away from the ring's interior.
    pub rotation: f64,
}

impl EntryMarker {
    /// Unit vector along [`EntryMarker::rotation`].
    #[must_use]
    pub fn direction(&self) -> Vector2 {
        Vector2::new(self.rotation.cos(), self.rotation.sin())
    }

    /// Tail and tip of an arrow of the given length ending at the marker.
    #[must_use]
    pub fn arrow(&self, length: f64) -> (Point2, Point2) {
        (self.position - self.direction() * length, self.position)
    }
}

/// Locates the point at a fraction of a ring's perimeter.
///
/// The fraction is clamped to `[0, 1]`. Each edge owns the half-open length
/// range `[start, start + len)`, so `0` lands on the first point and `1` on
/// the end of the last edge, which is the first point again.
pub struct PlaceEntryMarker<'a> {
    ring: OrientedRing<'a>,
    fraction: f64,
}

impl<'a> PlaceEntryMarker<'a> {
    #[must_use]
    pub fn new(ring: OrientedRing<'a>, fraction: f64) -> Self {
        Self { ring, fraction }
    }

    /// Executes the placement; `None` for rings without length or a
    /// non-finite fraction.
    #[must_use]
    pub fn execute(&self) -> Option<EntryMarker> {
        let points = self.ring.points();
        if points.len() < 2 || !self.fraction.is_finite() {
            return None;
        }
        let lengths: Vec<f64> = ring_edges(points).map(|(a, b)| (b - a).norm()).collect();
        let total: f64 = lengths.iter().sum();
        if total < TOLERANCE {
            return None;
        }

        let target = self.fraction.clamp(0.0, 1.0) * total;
        let mut start = 0.0;
        let mut last_edge = None;
        for ((a, b), len) in ring_edges(points).zip(&lengths) {
            if *len < TOLERANCE {
                continue;
            }
            if target < start + len {
                let t = ((target - start) / len).clamp(0.0, 1.0);
                return Some(self.marker(lerp(a, b, t), a, b));
            }
            start += len;
            last_edge = Some((a, b));
        }

        last_edge.map(|(a, b)| self.marker(*b, a, b))
    }

    fn marker(&self, position: Point2, a: &Point2, b: &Point2) -> EntryMarker {
        let tangent = b - a;
        let along = tangent.y.atan2(tangent.x);
        EntryMarker {
            position,
            rotation: along - winding_sign(self.ring.signed_area()) * FRAC_PI_2,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::polygon_2d::{point_in_ring, vertex_centroid};
    use approx::assert_relative_eq;

    fn square() -> Vec<Point2> {
        vec![
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(10.0, 10.0),
            Point2::new(0.0, 10.0),
        ]
    }

    fn place(points: &[Point2], t: f64) -> Option<EntryMarker> {
        PlaceEntryMarker::new(OrientedRing::new(points), t).execute()
    }

    #[test]
    fn zero_is_first_point() {
        let m = place(&square(), 0.0).unwrap();
        assert_eq!(m.position, Point2::new(0.0, 0.0));
    }

    #[test]
    fn interpolates_within_edge() {
        // 40 perimeter; 0.3 * 40 = 12 -> 2 units up the right edge.
        let m = place(&square(), 0.3).unwrap();
        assert_relative_eq!(m.position.x, 10.0, epsilon = 1e-9);
        assert_relative_eq!(m.position.y, 2.0, epsilon = 1e-9);
    }

    #[test]
    fn edge_boundary_belongs_to_next_edge() {
        let m = place(&square(), 0.25).unwrap();
        assert_eq!(m.position, Point2::new(10.0, 0.0));
        // Tangent of the right edge (pointing +y), outward is +x.
        assert_relative_eq!(m.rotation, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn one_resolves_to_end_of_final_edge() {
        let m = place(&square(), 1.0).unwrap();
        assert_eq!(m.position, Point2::new(0.0, 0.0));
        // Final edge runs (0,10) -> (0,0); outward is -x.
        assert_relative_eq!(m.direction().x, -1.0, epsilon = 1e-9);
    }

    #[test]
    fn out_of_range_fraction_is_clamped() {
        assert_eq!(place(&square(), 1.5), place(&square(), 1.0));
        assert_eq!(place(&square(), -0.2), place(&square(), 0.0));
        assert!(place(&square(), f64::NAN).is_none());
    }

    #[test]
    fn points_outward_for_both_windings() {
        let ccw = square();
        let mut cw = square();
        cw.reverse();
        let centroid = vertex_centroid(&ccw).unwrap();
        for ring in [ccw, cw] {
            for t in [0.1, 0.35, 0.6, 0.9] {
                let m = place(&ring, t).unwrap();
                let probe = m.position + m.direction() * 0.5;
                assert!(!point_in_ring(&probe, &ring), "t={t}");
                let inward = m.position - m.direction() * 0.5;
                assert!(point_in_ring(&inward, &ring), "t={t}");
                assert!((probe - centroid).norm() > (m.position - centroid).norm());
            }
        }
    }

    #[test]
    fn zero_perimeter_is_none() {
        let ring = [Point2::new(1.0, 1.0); 4];
        assert!(place(&ring, 0.5).is_none());
        assert!(place(&[Point2::new(1.0, 1.0)], 0.5).is_none());
    }

    #[test]
    fn skips_repeated_points() {
        let ring = vec![
            Point2::new(0.0, 0.0),
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(10.0, 10.0),
        ];
        let m = place(&ring, 0.0).unwrap();
        assert_eq!(m.position, Point2::new(0.0, 0.0));
        assert_relative_eq!(m.direction().y, -1.0, epsilon = 1e-9);
    }

    #[test]
    fn arrow_ends_at_marker() {
        let m = place(&square(), 0.125).unwrap();
        let (tail, tip) = m.arrow(4.0);
        assert_eq!(tip, m.position);
        assert_relative_eq!((tip - tail).norm(), 4.0, epsilon = 1e-9);
        assert!(point_in_ring(&tail, &square()));
    }
}
