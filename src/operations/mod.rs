//! Geometry passes over the campus model.

pub mod depth_order;
pub mod description;
pub mod draft;
pub mod entry_marker;
pub mod graph_overlay;
pub mod prism;
pub mod snap;

pub use depth_order::{paint_order, pick};
pub use description::{offset_for_drag, DescriptionLayout, DescriptionLine, LayoutDescription};
pub use draft::{DraftClick, DraftCursor, DraftKind, RingDraft};
pub use entry_marker::{EntryMarker, PlaceEntryMarker};
pub use graph_overlay::{ComputeGraphOverlay, CrossingMarker, GraphOverlay, JointDisc};
pub use prism::{BuildPrism, GeoUnion, PolygonUnion, Prism, Projection, SideFace};
pub use snap::{reference_points, ReferenceSet, Snap, SnapGuide, SnapResult};
