//! False-3D extrusion of building footprints.

mod projection;
mod union;

pub use projection::{Projection, MAX_HEIGHT_RATIO};
pub use union::{GeoUnion, PolygonUnion};

use crate::config::FocalLength;
use crate::math::distance_2d::{point_to_nudged_segment_dist, SEGMENT_NUDGE};
use crate::math::polygon_2d::{densify, perimeter, signed_area, OrientedRing};
use crate::math::{cross, Point2, TOLERANCE};

/// Default maximum gap between footprint points before projection.
pub const DEFAULT_DENSIFY_SPACING: f64 = 10.0;

/// One wall of a prism, spanning a footprint edge and its roof edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SideFace {
    /// Index of the edge's start point in the densified footprint.
    pub edge: usize,
    /// Footprint start, footprint end, roof end, roof start.
    pub quad: [Point2; 4],
    /// Alternating stroke color index (`0` primary, `1` secondary).
    pub color_index: usize,
    /// Distance from the viewpoint to the footprint edge.
    pub depth: f64,
}

/// Renderable extrusion of one building.
#[derive(Debug, Clone, PartialEq)]
pub struct Prism {
    /// Densified footprint ring.
    pub footprint: Vec<Point2>,
    /// Projected roof ring, point-for-point with `footprint`.
    pub roof: Vec<Point2>,
    /// Visible walls, farthest first.
    pub faces: Vec<SideFace>,
    /// Outer outline of the whole prism; empty if the union failed.
    pub silhouette: Vec<Point2>,
}

/// Extrudes a footprint into a prism viewed from a viewpoint.
pub struct BuildPrism<'a> {
    footprint: &'a [Point2],
    height: f64,
    viewpoint: Point2,
    focal_length: FocalLength,
    densify_spacing: f64,
}

impl<'a> BuildPrism<'a> {
    /// Creates a new `BuildPrism` operation with the default densify spacing.
    #[must_use]
    pub fn new(
        footprint: &'a [Point2],
        height: f64,
        viewpoint: Point2,
        focal_length: FocalLength,
    ) -> Self {
        Self {
            footprint,
            height,
            viewpoint,
            focal_length,
            densify_spacing: DEFAULT_DENSIFY_SPACING,
        }
    }

    #[must_use]
    pub fn with_densify_spacing(mut self, spacing: f64) -> Self {
        self.densify_spacing = spacing;
        self
    }

    /// Executes the extrusion.
    ///
    /// Returns `None` when the footprint has fewer than three points or no
    /// perimeter. Rings enclosing no net area (collinear points, cancelling
    /// self-intersections) still get a roof but show no walls. A failing
    /// `union` only empties the silhouette.
    #[must_use]
    pub fn execute(&self, union: &impl PolygonUnion) -> Option<Prism> {
        if self.footprint.len() < 3 || perimeter(self.footprint) < TOLERANCE {
            return None;
        }
        let footprint = densify(self.footprint, self.densify_spacing);
        let ring = OrientedRing::new(&footprint);

        let projection = Projection::new(self.viewpoint, self.focal_length, self.height);
        let roof: Vec<Point2> = footprint.iter().map(|p| projection.project(p)).collect();

        let mut faces = self.visible_faces(ring, &roof);
        faces.sort_by(|a, b| b.depth.total_cmp(&a.depth));

        let silhouette = silhouette(&footprint, &roof, union);

        Some(Prism {
            footprint,
            roof,
            faces,
            silhouette,
        })
    }

    /// Walls whose outward side faces the viewpoint.
    ///
    /// An edge `(a, b)` is visible when the turn `a -> b` seen from the
    /// viewpoint runs against the ring's winding.
    /// A ring with no net area has no winding and shows no walls.
    fn visible_faces(&self, ring: OrientedRing<'_>, roof: &[Point2]) -> Vec<SideFace> {
        if ring.is_flat() {
            return Vec::new();
        }
        let points = ring.points();
        let n = points.len();
        let v = self.viewpoint;
        (0..n)
            .filter_map(|i| {
                let j = (i + 1) % n;
                let (a, b) = (&points[i], &points[j]);
                if (b - a).norm() < TOLERANCE {
                    return None;
                }
                let turn = cross(&(a - v), &(b - v));
                if turn * ring.signed_area() >= 0.0 {
                    return None;
                }
                Some(SideFace {
                    edge: i,
                    quad: [*a, *b, roof[j], roof[i]],
                    color_index: i % 2,
                    depth: point_to_nudged_segment_dist(&v, a, b, SEGMENT_NUDGE),
                })
            })
            .collect()
    }
}

/// Outer boundary of footprint, walls and roof together.
fn silhouette(footprint: &[Point2], roof: &[Point2], union: &impl PolygonUnion) -> Vec<Point2> {
    let n = footprint.len();
    let mut rings = Vec::with_capacity(n + 2);
    rings.push(footprint.to_vec());
    for i in 0..n {
        let j = (i + 1) % n;
        rings.push(vec![footprint[i], footprint[j], roof[j], roof[i]]);
    }
    rings.push(roof.to_vec());
    rings.retain(|ring| signed_area(ring).abs() > TOLERANCE);

    match union.union_all(&rings) {
        Ok(outline) => outline,
        Err(err) => {
            tracing::warn!(%err, "prism silhouette union failed");
            Vec::new()
        }
    }
}
