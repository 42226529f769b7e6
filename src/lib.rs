pub mod config;
pub mod error;
pub mod math;
pub mod model;
pub mod operations;
pub mod scene;

pub use config::{EngineConfig, FocalLength};
pub use error::{CampusError, Result};
pub use scene::{BuildingView, PolygonView, Scene};
