use serde::{Deserialize, Serialize};

use crate::error::GeometryError;
use crate::operations::draft::DEFAULT_CLOSE_DISTANCE;
use crate::operations::prism::DEFAULT_DENSIFY_SPACING;
use crate::operations::snap::DEFAULT_SNAP_THRESHOLD;

/// Perspective focal length of the building extrusion, in model units.
///
/// Always finite and strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct FocalLength(f64);

impl FocalLength {
    /// Creates a focal length.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::NonPositive`] for zero, negative or
    /// non-finite values.
    pub fn new(value: f64) -> Result<Self, GeometryError> {
        if value.is_finite() && value > 0.0 {
            Ok(Self(value))
        } else {
            Err(GeometryError::NonPositive {
                parameter: "focal_length",
                value,
            })
        }
    }

    /// Derives the focal length from the canvas extents: `max(width, height)`.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::NonPositive`] if both extents are non-positive.
    pub fn from_canvas(width: f64, height: f64) -> Result<Self, GeometryError> {
        Self::new(width.max(height))
    }

    #[must_use]
    pub fn get(self) -> f64 {
        self.0
    }
}

impl Default for FocalLength {
    fn default() -> Self {
        Self(1000.0)
    }
}

impl TryFrom<f64> for FocalLength {
    type Error = GeometryError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<FocalLength> for f64 {
    fn from(f: FocalLength) -> Self {
        f.0
    }
}

/// Tuning constants of the geometry engine.
///
/// Defaults reproduce the editor's visual behavior.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Per-axis distance under which a reference point captures the cursor.
    pub snap_threshold: f64,
    /// Maximum gap between footprint points before projection.
    pub densify_spacing: f64,
    /// Per-axis distance under which a drafted ring locks onto its first point.
    pub close_distance: f64,
    pub focal_length: FocalLength,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            snap_threshold: DEFAULT_SNAP_THRESHOLD,
            densify_spacing: DEFAULT_DENSIFY_SPACING,
            close_distance: DEFAULT_CLOSE_DISTANCE,
            focal_length: FocalLength::default(),
        }
    }
}

impl EngineConfig {
    /// Sets the focal length from canvas extents.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::NonPositive`] if both extents are non-positive.
    pub fn with_canvas_size(mut self, width: f64, height: f64) -> Result<Self, GeometryError> {
        self.focal_length = FocalLength::from_canvas(width, height)?;
        Ok(self)
    }

    #[must_use]
    pub fn with_snap_threshold(mut self, threshold: f64) -> Self {
        self.snap_threshold = threshold;
        self
    }

    #[must_use]
    pub fn with_densify_spacing(mut self, spacing: f64) -> Self {
        self.densify_spacing = spacing;
        self
    }
}
