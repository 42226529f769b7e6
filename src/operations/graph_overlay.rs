use crate::math::intersect_2d::segment_segment_proper_intersect;
use crate::math::Point2;
use crate::model::{EdgeId, EdgeKind, Graph, NodeId};

/// A marker where a fence crosses another edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrossingMarker {
    pub point: Point2,
    pub fence: EdgeId,
    pub other: EdgeId,
}

/// A filled disc hiding the seam where exactly two roads meet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JointDisc {
    pub node: NodeId,
    pub center: Point2,
    pub radius: f64,
}

/// Everything drawn on top of (or beneath) the graph in one render pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GraphOverlay {
    /// Fence × road crossings.
    pub barriers: Vec<CrossingMarker>,
    /// Fence × pathwalk crossings.
    pub gates: Vec<CrossingMarker>,
    pub joints: Vec<JointDisc>,
    /// Edges in paint order: roads, then pathwalks, then fences.
    pub paint_order: Vec<EdgeId>,
}

/// Computes barrier and gate markers, road joint discs and edge paint order
/// for a graph snapshot.
pub struct ComputeGraphOverlay<'a> {
    graph: &'a Graph,
}

impl<'a> ComputeGraphOverlay<'a> {
    #[must_use]
    pub fn new(graph: &'a Graph) -> Self {
        Self { graph }
    }

    /// Executes the pass.
    #[must_use]
    pub fn execute(&self) -> GraphOverlay {
        GraphOverlay {
            barriers: self.fence_crossings(|k| matches!(k, EdgeKind::Road { .. })),
            gates: self.fence_crossings(|k| matches!(k, EdgeKind::Pathwalk)),
            joints: self.joint_discs(),
            paint_order: self.paint_order(),
        }
    }

    /// Proper crossings between every fence and every edge accepted by
    /// `other_kind` that shares no endpoint with it.
    fn fence_crossings(&self, other_kind: impl Fn(&EdgeKind) -> bool) -> Vec<CrossingMarker> {
        let fences = self
            .graph
            .edges()
            .filter(|(_, e)| matches!(e.kind, EdgeKind::Fence));
        let mut markers = Vec::new();
        for (fence_id, fence) in fences {
            let Ok((f0, f1)) = self.graph.edge_segment(fence_id) else {
                continue;
            };
            for (other_id, other) in self.graph.edges() {
                if !other_kind(&other.kind) || fence.shares_endpoint(other) {
                    continue;
                }
                let Ok((o0, o1)) = self.graph.edge_segment(other_id) else {
                    continue;
                };
                if let Some((point, _, _)) = segment_segment_proper_intersect(&f0, &f1, &o0, &o1) {
                    markers.push(CrossingMarker {
                        point,
                        fence: fence_id,
                        other: other_id,
                    });
                }
            }
        }
        markers
    }

    fn joint_discs(&self) -> Vec<JointDisc> {
        self.graph
            .nodes()
            .filter_map(|(id, node)| match self.graph.incident_roads(node) {
                (2, widest) => Some(JointDisc {
                    node: id,
                    center: node.point,
                    radius: widest / 2.0,
                }),
                _ => None,
            })
            .collect()
    }

    fn paint_order(&self) -> Vec<EdgeId> {
        let mut edges: Vec<(EdgeId, u8)> = self
            .graph
            .edges()
            .map(|(id, e)| (id, e.kind.paint_layer()))
            .collect();
        edges.sort_by_key(|(_, layer)| *layer);
        edges.into_iter().map(|(id, _)| id).collect()
    }
}
