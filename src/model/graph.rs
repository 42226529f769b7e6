use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use slotmap::SlotMap;

use crate::error::{ModelError, Result};
use crate::math::Point2;

slotmap::new_key_type! {
    /// Unique identifier for a node in the graph.
    pub struct NodeId;
}

slotmap::new_key_type! {
    /// Unique identifier for an edge in the graph.
    pub struct EdgeId;
}

/// A junction or end point of roads, paths and fences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    pub point: Point2,
    /// Exactly the edges that reference this node.
    edges: BTreeSet<EdgeId>,
}

impl GraphNode {
    #[must_use]
    pub fn edges(&self) -> &BTreeSet<EdgeId> {
        &self.edges
    }
}

/// What an edge represents on the map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum EdgeKind {
    Road { width: f64 },
    Pathwalk,
    Fence,
}

impl EdgeKind {
    /// Layer in which the edge is painted; lower layers are painted first.
    #[must_use]
    pub fn paint_layer(&self) -> u8 {
        match self {
            Self::Road { .. } => 0,
            Self::Pathwalk => 1,
            Self::Fence => 2,
        }
    }

    #[must_use]
    pub fn road_width(&self) -> Option<f64> {
        match self {
            Self::Road { width } => Some(*width),
            Self::Pathwalk | Self::Fence => None,
        }
    }
}

/// A straight connection between two distinct nodes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub from: NodeId,
    pub to: NodeId,
    pub kind: EdgeKind,
}

impl GraphEdge {
    /// `true` if both edges reference at least one common node.
    #[must_use]
    pub fn shares_endpoint(&self, other: &GraphEdge) -> bool {
        self.from == other.from
            || self.from == other.to
            || self.to == other.from
            || self.to == other.to
    }
}

/// Endpoint of a new edge: an existing node, or a position for a new one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EdgeEnd {
    Existing(NodeId),
    New(Point2),
}

/// Arena holding the road, path and fence network.
///
/// Nodes and edges reference each other via typed IDs. Every edit keeps two
/// invariants: each edge's endpoints exist, and each node's incident set
/// lists exactly the edges that reference it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Graph {
    nodes: SlotMap<NodeId, GraphNode>,
    edges: SlotMap<EdgeId, GraphEdge>,
}

impl Graph {
    /// Creates a new, empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Node operations ---

    /// Returns a reference to the node, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::NodeNotFound`] if the node does not exist.
    pub fn node(&self, id: NodeId) -> Result<&GraphNode> {
        Ok(self.nodes.get(id).ok_or(ModelError::NodeNotFound)?)
    }

    /// Moves a node; incident edges follow it.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::NodeNotFound`] if the node does not exist.
    pub fn move_node(&mut self, id: NodeId, point: Point2) -> Result<()> {
        self.nodes.get_mut(id).ok_or(ModelError::NodeNotFound)?.point = point;
        Ok(())
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &GraphNode)> {
        self.nodes.iter()
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    // --- Edge operations ---

    /// Connects two endpoints, creating nodes for [`EdgeEnd::New`] ends.
    ///
    /// Both endpoint incident sets are updated in the same call. Nothing is
    /// inserted when validation fails.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::NodeNotFound`] for a missing existing node and
    /// [`ModelError::SelfLoop`] when both ends are the same node.
    pub fn add_edge(&mut self, from: EdgeEnd, to: EdgeEnd, kind: EdgeKind) -> Result<EdgeId> {
        for end in [from, to] {
            if let EdgeEnd::Existing(id) = end {
                self.node(id)?;
            }
        }
        if let (EdgeEnd::Existing(a), EdgeEnd::Existing(b)) = (from, to) {
            if a == b {
                return Err(ModelError::SelfLoop.into());
            }
        }

        let from = self.resolve(from);
        let to = self.resolve(to);
        let id = self.edges.insert(GraphEdge { from, to, kind });
        for node in [from, to] {
            if let Some(n) = self.nodes.get_mut(node) {
                n.edges.insert(id);
            }
        }
        tracing::debug!(?id, ?from, ?to, ?kind, "graph edge added");
        Ok(id)
    }

    fn resolve(&mut self, end: EdgeEnd) -> NodeId {
        match end {
            EdgeEnd::Existing(id) => id,
            EdgeEnd::New(point) => {
                let id = self.nodes.insert(GraphNode {
                    point,
                    edges: BTreeSet::new(),
                });
                tracing::debug!(?id, x = point.x, y = point.y, "graph node added");
                id
            }
        }
    }

    /// Returns a reference to the edge, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::EdgeNotFound`] if the edge does not exist.
    pub fn edge(&self, id: EdgeId) -> Result<&GraphEdge> {
        Ok(self.edges.get(id).ok_or(ModelError::EdgeNotFound)?)
    }

    /// Returns both endpoint positions of an edge.
    ///
    /// # Errors
    ///
    /// Returns an error if the edge or one of its nodes does not exist.
    pub fn edge_segment(&self, id: EdgeId) -> Result<(Point2, Point2)> {
        let edge = self.edge(id)?;
        Ok((self.node(edge.from)?.point, self.node(edge.to)?.point))
    }

    pub fn edges(&self) -> impl Iterator<Item = (EdgeId, &GraphEdge)> {
        self.edges.iter()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Changes the width of a road edge.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::EdgeNotFound`] or [`ModelError::NotARoad`].
    pub fn set_road_width(&mut self, id: EdgeId, width: f64) -> Result<()> {
        match &mut self.edges.get_mut(id).ok_or(ModelError::EdgeNotFound)?.kind {
            EdgeKind::Road { width: w } => {
                *w = width;
                Ok(())
            }
            EdgeKind::Pathwalk | EdgeKind::Fence => Err(ModelError::NotARoad.into()),
        }
    }

    /// Deletes an edge and prunes endpoints left without edges.
    ///
    /// Returns the removed edge and the ids of the pruned nodes.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::EdgeNotFound`] if the edge does not exist.
    pub fn remove_edge(&mut self, id: EdgeId) -> Result<(GraphEdge, Vec<NodeId>)> {
        let edge = self.edges.remove(id).ok_or(ModelError::EdgeNotFound)?;
        let mut pruned = Vec::new();
        for node in [edge.from, edge.to] {
            let isolated = self.nodes.get_mut(node).is_some_and(|n| {
                n.edges.remove(&id);
                n.edges.is_empty()
            });
            if isolated {
                self.nodes.remove(node);
                pruned.push(node);
            }
        }
        tracing::debug!(?id, pruned = pruned.len(), "graph edge removed");
        Ok((edge, pruned))
    }

    /// Number of road edges incident to a node, and the widest of them.
    #[must_use]
    pub fn incident_roads(&self, node: &GraphNode) -> (usize, f64) {
        node.edges
            .iter()
            .filter_map(|e| self.edges.get(*e))
            .filter_map(|e| e.kind.road_width())
            .fold((0, f64::NEG_INFINITY), |(count, widest), w| {
                (count + 1, widest.max(w))
            })
    }

    /// Checks the graph invariants: edge endpoints exist, incident sets match
    /// the edges exactly, and no node is left without edges.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Inconsistent`] describing the first violation.
    pub fn validate(&self) -> Result<()> {
        for (id, edge) in &self.edges {
            for end in [edge.from, edge.to] {
                let node = self.nodes.get(end).ok_or_else(|| {
                    ModelError::Inconsistent(format!("edge {id:?} references missing node {end:?}"))
                })?;
                if !node.edges.contains(&id) {
                    return Err(ModelError::Inconsistent(format!(
                        "node {end:?} does not list incident edge {id:?}"
                    ))
                    .into());
                }
            }
        }
        for (id, node) in &self.nodes {
            if node.edges.is_empty() {
                return Err(ModelError::Inconsistent(format!("node {id:?} has no edges")).into());
            }
            for e in &node.edges {
                let referenced = self
                    .edges
                    .get(*e)
                    .is_some_and(|edge| edge.from == id || edge.to == id);
                if !referenced {
                    return Err(ModelError::Inconsistent(format!(
                        "node {id:?} lists edge {e:?} that does not reference it"
                    ))
                    .into());
                }
            }
        }
        Ok(())
    }
}
