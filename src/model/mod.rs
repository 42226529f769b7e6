//! Map data: polygon footprints and the road/path/fence graph.

pub mod graph;
pub mod polygon;
pub mod ring;

pub use graph::{EdgeEnd, EdgeId, EdgeKind, Graph, GraphEdge, GraphNode, NodeId};
pub use polygon::{
    Building, BuildingDescription, Entry, EntryId, Polygon, PolygonKind, PolygonSet,
    TextAlignment,
};
pub use ring::Ring;
