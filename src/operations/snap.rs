use crate::math::{Point2, TOLERANCE};
use crate::model::{Graph, NodeId, PolygonSet};

/// Default per-axis capture distance.
pub const DEFAULT_SNAP_THRESHOLD: f64 = 3.0;

/// A dashed alignment line from a reference point to the snapped cursor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapGuide {
    pub from: Point2,
    pub to: Point2,
}

/// Result of snapping a point: the adjusted point and up to one guide per axis.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapResult {
    pub point: Point2,
    pub guides: Vec<SnapGuide>,
}

impl SnapResult {
    fn passthrough(point: Point2) -> Self {
        Self {
            point,
            guides: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Axis {
    X,
    Y,
}

impl Axis {
    fn along(self, p: &Point2) -> f64 {
        match self {
            Self::X => p.x,
            Self::Y => p.y,
        }
    }

    fn across(self, p: &Point2) -> f64 {
        match self {
            Self::X => p.y,
            Self::Y => p.x,
        }
    }
}

/// What the best candidate on one axis does to the input coordinate.
enum AxisSnap<'a> {
    /// A candidate already shares the coordinate; keep it as is.
    Aligned(&'a Point2),
    /// Move the coordinate onto the candidate's.
    Captured(&'a Point2),
}

impl<'a> AxisSnap<'a> {
    fn source(&self) -> &'a Point2 {
        match self {
            Self::Aligned(c) | Self::Captured(c) => *c,
        }
    }

    fn coordinate(&self, axis: Axis, input: &Point2) -> f64 {
        match self {
            Self::Aligned(_) => axis.along(input),
            Self::Captured(c) => axis.along(c),
        }
    }
}

/// Snaps a point onto the X and Y coordinates of nearby reference points.
///
/// Each axis is handled independently. A candidate qualifies for an axis when
/// its coordinate on that axis is closer than the threshold; among qualifying
/// candidates the one nearest in the perpendicular direction wins. Candidates
/// that already share the input's coordinate take precedence, which makes
/// snapping idempotent for a fixed candidate set.
#[derive(Debug, Clone, Copy)]
pub struct Snap<'a> {
    point: Point2,
    candidates: &'a [Point2],
    enabled: bool,
    threshold: f64,
}

impl<'a> Snap<'a> {
    /// Creates an enabled `Snap` with the default threshold.
    #[must_use]
    pub fn new(point: Point2, candidates: &'a [Point2]) -> Self {
        Self {
            point,
            candidates,
            enabled: true,
            threshold: DEFAULT_SNAP_THRESHOLD,
        }
    }

    #[must_use]
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    #[must_use]
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Executes the snap.
    #[must_use]
    pub fn execute(&self) -> SnapResult {
        if !self.enabled || self.candidates.is_empty() {
            return SnapResult::passthrough(self.point);
        }

        let sx = self.best_on_axis(Axis::X);
        let sy = self.best_on_axis(Axis::Y);

        let point = Point2::new(
            sx.as_ref()
                .map_or(self.point.x, |s| s.coordinate(Axis::X, &self.point)),
            sy.as_ref()
                .map_or(self.point.y, |s| s.coordinate(Axis::Y, &self.point)),
        );

        let guides = [sx, sy]
            .iter()
            .flatten()
            .map(|s| SnapGuide {
                from: *s.source(),
                to: point,
            })
            .collect();

        SnapResult { point, guides }
    }

    fn best_on_axis(&self, axis: Axis) -> Option<AxisSnap<'a>> {
        let input = axis.along(&self.point);
        let gap = |c: &Point2| (axis.along(c) - input).abs();
        let perpendicular = |c: &&Point2| (axis.across(c) - axis.across(&self.point)).abs();

        let aligned = self
            .candidates
            .iter()
            .filter(|c| gap(*c) <= TOLERANCE)
            .min_by(|a, b| perpendicular(a).total_cmp(&perpendicular(b)));
        if let Some(c) = aligned {
            return Some(AxisSnap::Aligned(c));
        }

        self.candidates
            .iter()
            .filter(|c| gap(*c) < self.threshold)
            .min_by(|a, b| perpendicular(a).total_cmp(&perpendicular(b)))
            .map(AxisSnap::Captured)
    }
}

/// Which reference points a gesture snaps against.
///
/// Mirrors the active drawing tool: footprint tools see polygon vertices and
/// the ring being drawn, graph tools see graph nodes, and drags see everything
/// except the point being dragged.
#[derive(Debug, Clone, Copy)]
pub enum ReferenceSet<'a> {
    Footprint { in_progress: &'a [Point2] },
    Graph,
    DragPolygonVertex { polygon: usize, vertex: usize },
    DragNode(NodeId),
}

/// Collects the snapping candidates selected by `set`.
#[must_use]
pub fn reference_points(polygons: &PolygonSet, graph: &Graph, set: ReferenceSet<'_>) -> Vec<Point2> {
    let polygon_vertices = |skip: Option<(usize, usize)>| {
        polygons.iter().enumerate().flat_map(move |(pi, poly)| {
            poly.ring
                .points()
                .iter()
                .enumerate()
                .filter(move |(vi, _)| skip != Some((pi, *vi)))
                .map(|(_, p)| *p)
        })
    };
    let node_points = |skip: Option<NodeId>| {
        graph
            .nodes()
            .filter(move |(id, _)| skip != Some(*id))
            .map(|(_, n)| n.point)
    };

    match set {
        ReferenceSet::Footprint { in_progress } => polygon_vertices(None)
            .chain(in_progress.iter().copied())
            .collect(),
        ReferenceSet::Graph => node_points(None).collect(),
        ReferenceSet::DragPolygonVertex { polygon, vertex } => polygon_vertices(Some((polygon, vertex)))
            .chain(node_points(None))
            .collect(),
        ReferenceSet::DragNode(id) => polygon_vertices(None).chain(node_points(Some(id))).collect(),
    }
}
