use geo::{Area, BooleanOps, LineString, MultiPolygon, Polygon};

use crate::error::{OperationError, Result};
use crate::math::Point2;

/// Polygon boolean union, reduced to what the silhouette needs.
///
/// Implementations return the outer boundary of the union as an open ring
/// (the closing point is not repeated).
pub trait PolygonUnion {
    /// Unions two simple rings.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::Failed`] if the union cannot be resolved.
    fn union(&self, a: &[Point2], b: &[Point2]) -> Result<Vec<Point2>>;

    /// Unions any number of rings, left to right.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::InvalidInput`] for an empty list, or any
    /// error of [`PolygonUnion::union`].
    fn union_all(&self, rings: &[Vec<Point2>]) -> Result<Vec<Point2>> {
        let (first, rest) = rings
            .split_first()
            .ok_or_else(|| OperationError::InvalidInput("no rings to union".to_owned()))?;
        rest.iter()
            .try_fold(first.clone(), |acc, ring| self.union(&acc, ring))
    }
}

/// [`PolygonUnion`] backed by the `geo` crate's boolean operations.
#[derive(Debug, Clone, Copy, Default)]
pub struct GeoUnion;

impl GeoUnion {
    fn to_geo(ring: &[Point2]) -> Result<MultiPolygon<f64>> {
        if ring.iter().any(|p| !p.x.is_finite() || !p.y.is_finite()) {
            return Err(OperationError::InvalidInput("non-finite ring coordinate".to_owned()).into());
        }
        let exterior: LineString<f64> = ring.iter().map(|p| (p.x, p.y)).collect::<Vec<_>>().into();
        Ok(MultiPolygon::new(vec![Polygon::new(exterior, vec![])]))
    }

    /// Exterior of the largest polygon of a union result.
    fn outer_boundary(union: &MultiPolygon<f64>) -> Result<Vec<Point2>> {
        let largest = union
            .0
            .iter()
            .max_by(|a, b| a.unsigned_area().total_cmp(&b.unsigned_area()))
            .ok_or_else(|| OperationError::Failed("union produced no area".to_owned()))?;

        let mut points: Vec<Point2> = largest
            .exterior()
            .coords()
            .map(|c| Point2::new(c.x, c.y))
            .collect();
        if points.len() > 1 && points.first() == points.last() {
            points.pop();
        }
        if points.len() < 3 {
            return Err(OperationError::Failed(format!(
                "union boundary has {} points",
                points.len()
            ))
            .into());
        }
        Ok(points)
    }
}

impl PolygonUnion for GeoUnion {
    fn union(&self, a: &[Point2], b: &[Point2]) -> Result<Vec<Point2>> {
        let merged = Self::to_geo(a)?.union(&Self::to_geo(b)?);
        Self::outer_boundary(&merged)
    }

    fn union_all(&self, rings: &[Vec<Point2>]) -> Result<Vec<Point2>> {
        let (first, rest) = rings
            .split_first()
            .ok_or_else(|| OperationError::InvalidInput("no rings to union".to_owned()))?;
        let mut acc = Self::to_geo(first)?;
        for ring in rest {
            acc = acc.union(&Self::to_geo(ring)?);
        }
        Self::outer_boundary(&acc)
    }
}
