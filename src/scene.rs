//! Owned campus state plus the gestures and render passes over it.

use crate::config::EngineConfig;
use crate::error::{ModelError, Result};
use crate::math::polygon_2d::OrientedRing;
use crate::math::Point2;
use crate::model::{EntryId, Graph, NodeId, PolygonKind, PolygonSet};
use crate::operations::description::offset_for_drag;
use crate::operations::{
    paint_order, pick, reference_points, BuildPrism, ComputeGraphOverlay, DescriptionLayout,
    DraftClick, DraftCursor, EntryMarker, GeoUnion, GraphOverlay, LayoutDescription,
    PlaceEntryMarker, PolygonUnion, Prism, Projection, ReferenceSet, RingDraft, Snap, SnapResult,
};

/// Everything drawn for one building.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildingView {
    pub index: usize,
    /// `None` when the footprint has no perimeter.
    pub prism: Option<Prism>,
    pub entries: Vec<(EntryId, EntryMarker)>,
    pub description: Option<DescriptionLayout>,
}

/// One polygon in paint order.
#[derive(Debug, Clone, PartialEq)]
pub enum PolygonView {
    Pavement { index: usize, ring: Vec<Point2> },
    Building(BuildingView),
}

impl PolygonView {
    #[must_use]
    pub fn index(&self) -> usize {
        match self {
            Self::Pavement { index, .. } => *index,
            Self::Building(view) => view.index,
        }
    }
}

/// Polygons, graph and viewpoint of one campus map.
pub struct Scene<U: PolygonUnion = GeoUnion> {
    pub polygons: PolygonSet,
    pub graph: Graph,
    viewpoint: Point2,
    config: EngineConfig,
    union: U,
}

impl Scene<GeoUnion> {
    /// Creates an empty scene using the `geo` backed union.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self::with_union(config, GeoUnion)
    }
}

impl<U: PolygonUnion> Scene<U> {
    /// Creates an empty scene with a custom polygon union.
    pub fn with_union(config: EngineConfig, union: U) -> Self {
        Self {
            polygons: PolygonSet::new(),
            graph: Graph::new(),
            viewpoint: Point2::origin(),
            config,
            union,
        }
    }

    #[must_use]
    pub fn viewpoint(&self) -> Point2 {
        self.viewpoint
    }

    pub fn set_viewpoint(&mut self, viewpoint: Point2) {
        self.viewpoint = viewpoint;
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Snaps a pointer position against the points selected by `set`.
    #[must_use]
    pub fn snap(&self, raw: Point2, enabled: bool, set: ReferenceSet<'_>) -> SnapResult {
        let candidates = reference_points(&self.polygons, &self.graph, set);
        Snap::new(raw, &candidates)
            .with_enabled(enabled)
            .with_threshold(self.config.snap_threshold)
            .execute()
    }

    /// Moves a footprint vertex to the snapped pointer position.
    ///
    /// # Errors
    ///
    /// Returns an error if the polygon or vertex does not exist.
    pub fn drag_polygon_vertex(
        &mut self,
        polygon: usize,
        vertex: usize,
        raw: Point2,
        enabled: bool,
    ) -> Result<SnapResult> {
        let snapped = self.snap(raw, enabled, ReferenceSet::DragPolygonVertex { polygon, vertex });
        self.polygons.set_vertex(polygon, vertex, snapped.point)?;
        Ok(snapped)
    }

    /// Moves a graph node to the snapped pointer position.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::NodeNotFound`] if the node does not exist.
    pub fn drag_node(&mut self, node: NodeId, raw: Point2, enabled: bool) -> Result<SnapResult> {
        let snapped = self.snap(raw, enabled, ReferenceSet::DragNode(node));
        self.graph.move_node(node, snapped.point)?;
        Ok(snapped)
    }

    /// Cursor for the next click of `draft`.
    #[must_use]
    pub fn draft_cursor(&self, draft: &RingDraft, raw: Point2, enabled: bool) -> DraftCursor {
        let reference = reference_points(
            &self.polygons,
            &self.graph,
            ReferenceSet::Footprint {
                in_progress: draft.points(),
            },
        );
        draft.cursor(raw, &reference, enabled, &self.config)
    }

    /// Applies a draft click; a closed ring is added to the polygons and its
    /// index returned.
    ///
    /// # Errors
    ///
    /// Propagates [`RingDraft::click`] errors.
    pub fn draft_click(&mut self, draft: &mut RingDraft, cursor: &DraftCursor) -> Result<Option<usize>> {
        match draft.click(cursor)? {
            DraftClick::Extended(_) => Ok(None),
            DraftClick::Closed(polygon) => Ok(Some(self.polygons.add(polygon))),
        }
    }

    /// Stores the description offset for a label dropped at `dragged`.
    ///
    /// # Errors
    ///
    /// Returns an error if the polygon is not a building with a description.
    pub fn drag_description(&mut self, index: usize, dragged: Point2) -> Result<()> {
        let polygon = self.polygons.get(index)?;
        let PolygonKind::Building(building) = &polygon.kind else {
            return Err(ModelError::NotABuilding(index).into());
        };
        let Some(mut description) = building.description.clone() else {
            return Err(ModelError::Inconsistent(format!("polygon {index} has no description")).into());
        };
        let projection = self.projection(building.height);
        let Some(offset) = offset_for_drag(polygon.ring.points(), &projection, &dragged) else {
            return Ok(());
        };
        description.offset = offset;
        self.polygons.set_description(index, Some(description))
    }

    fn projection(&self, height: f64) -> Projection {
        Projection::new(self.viewpoint, self.config.focal_length, height)
    }

    /// Views of all polygons in paint order.
    #[must_use]
    pub fn render_polygons(&self) -> Vec<PolygonView> {
        paint_order(&self.polygons, &self.viewpoint)
            .into_iter()
            .filter_map(|index| {
                let polygon = self.polygons.get(index).ok()?;
                let points = polygon.ring.points();
                let view = match &polygon.kind {
                    PolygonKind::Pavement => PolygonView::Pavement {
                        index,
                        ring: points.to_vec(),
                    },
                    PolygonKind::Building(building) => {
                        let prism = BuildPrism::new(
                            points,
                            building.height,
                            self.viewpoint,
                            self.config.focal_length,
                        )
                        .with_densify_spacing(self.config.densify_spacing)
                        .execute(&self.union);

                        let ring = OrientedRing::new(points);
                        let entries = building
                            .entries
                            .iter()
                            .filter_map(|entry| {
                                PlaceEntryMarker::new(ring, entry.position)
                                    .execute()
                                    .map(|marker| (entry.id, marker))
                            })
                            .collect();

                        let description = building.description.as_ref().and_then(|d| {
                            LayoutDescription::new(d, points, self.projection(building.height))
                                .execute()
                        });

                        PolygonView::Building(BuildingView {
                            index,
                            prism,
                            entries,
                            description,
                        })
                    }
                };
                Some(view)
            })
            .collect()
    }

    #[must_use]
    pub fn graph_overlay(&self) -> GraphOverlay {
        ComputeGraphOverlay::new(&self.graph).execute()
    }

    /// Topmost polygon under `point`.
    #[must_use]
    pub fn pick(&self, point: &Point2) -> Option<usize> {
        pick(&self.polygons, &self.viewpoint, point)
    }
}
