use thiserror::Error;

/// Top-level error type for the campus geometry engine.
#[derive(Debug, Error)]
pub enum CampusError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Operation(#[from] OperationError),
}

/// Errors related to geometric inputs.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("{parameter} = {value} must be finite and positive")]
    NonPositive { parameter: &'static str, value: f64 },
}

/// Errors raised by edits on the polygon and graph aggregates.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("polygon {0} not found")]
    PolygonNotFound(usize),

    #[error("vertex {vertex} not found in polygon {polygon}")]
    VertexNotFound { polygon: usize, vertex: usize },

    #[error("polygon {0} is not a building")]
    NotABuilding(usize),

    #[error("entry {0} not found")]
    EntryNotFound(u64),

    #[error("graph node not found")]
    NodeNotFound,

    #[error("graph edge not found")]
    EdgeNotFound,

    #[error("edge endpoints must be distinct nodes")]
    SelfLoop,

    #[error("edge is not a road")]
    NotARoad,

    #[error("ring needs at least 3 points, got {0}")]
    DegenerateRing(usize),

    #[error("graph invariant violated: {0}")]
    Inconsistent(String),
}

/// Errors related to geometry operations.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("operation failed: {0}")]
    Failed(String),
}

/// Convenience type alias for results using [`CampusError`].
pub type Result<T> = std::result::Result<T, CampusError>;
