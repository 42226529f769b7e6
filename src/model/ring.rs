use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::math::{Point2, Vector2};

/// A closed sequence of at least three points; the last point implicitly
/// connects back to the first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Point2>", into = "Vec<Point2>")]
pub struct Ring {
    points: Vec<Point2>,
}

impl Ring {
    /// Minimum number of points in a ring.
    pub const MIN_POINTS: usize = 3;

    /// Creates a ring from its points.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::DegenerateRing`] for fewer than three points.
    pub fn new(points: Vec<Point2>) -> Result<Self, ModelError> {
        if points.len() < Self::MIN_POINTS {
            return Err(ModelError::DegenerateRing(points.len()));
        }
        Ok(Self { points })
    }

    #[must_use]
    pub fn points(&self) -> &[Point2] {
        &self.points
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always `false`: a ring holds at least three points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Appends a point after the current last point.
    pub fn push(&mut self, point: Point2) {
        self.points.push(point);
    }

    /// Replaces the point at `index`, returning the previous one.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::VertexNotFound`] (with polygon index 0) if `index`
    /// is out of range; callers holding the polygon index remap it.
    pub fn set(&mut self, index: usize, point: Point2) -> Result<Point2, ModelError> {
        let slot = self
            .points
            .get_mut(index)
            .ok_or(ModelError::VertexNotFound {
                polygon: 0,
                vertex: index,
            })?;
        Ok(std::mem::replace(slot, point))
    }

    /// Moves every point by `delta`.
    pub fn translate(&mut self, delta: Vector2) {
        for p in &mut self.points {
            *p += delta;
        }
    }
}

impl TryFrom<Vec<Point2>> for Ring {
    type Error = ModelError;

    fn try_from(points: Vec<Point2>) -> Result<Self, Self::Error> {
        Self::new(points)
    }
}

impl From<Ring> for Vec<Point2> {
    fn from(ring: Ring) -> Self {
        ring.points
    }
}

impl AsRef<[Point2]> for Ring {
    fn as_ref(&self) -> &[Point2] {
        &self.points
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn tri() -> Ring {
        Ring::new(vec![
            Point2::new(0.0, 0.0),
            Point2::new(4.0, 0.0),
            Point2::new(0.0, 3.0),
        ])
        .unwrap()
    }

    #[test]
    fn rejects_two_points() {
        let err = Ring::new(vec![Point2::new(0.0, 0.0), Point2::new(1.0, 0.0)]);
        assert!(matches!(err, Err(ModelError::DegenerateRing(2))));
    }

    #[test]
    fn set_replaces_point() {
        let mut ring = tri();
        let old = ring.set(1, Point2::new(5.0, 0.0)).unwrap();
        assert_eq!(old, Point2::new(4.0, 0.0));
        assert_eq!(ring.points()[1], Point2::new(5.0, 0.0));
        assert!(ring.set(7, Point2::origin()).is_err());
    }

    #[test]
    fn translate_moves_all_points() {
        let mut ring = tri();
        ring.translate(Vector2::new(1.0, -1.0));
        assert_eq!(ring.points()[0], Point2::new(1.0, -1.0));
        assert_eq!(ring.points()[2], Point2::new(1.0, 2.0));
    }

    #[test]
    fn push_extends_ring() {
        let mut ring = tri();
        ring.push(Point2::new(-1.0, 1.0));
        assert_eq!(ring.len(), 4);
        assert!(!ring.is_empty());
    }
}
