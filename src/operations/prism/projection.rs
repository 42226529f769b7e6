use crate::config::FocalLength;
use crate::math::Point2;

/// Largest usable height, as a fraction of the focal length.
pub const MAX_HEIGHT_RATIO: f64 = 1.0 - 1e-6;

/// Perspective divide lifting ground points to a given height.
///
/// A point `P` at height `h` maps to `V + (P - V) * F / (F - h)`, where `V` is
/// the viewpoint and `F` the focal length. Heights are clamped to
/// `[0, F * MAX_HEIGHT_RATIO]`.
#[derive(Debug, Clone, Copy)]
pub struct Projection {
    viewpoint: Point2,
    height: f64,
    scale: f64,
}

impl Projection {
    #[must_use]
    pub fn new(viewpoint: Point2, focal_length: FocalLength, height: f64) -> Self {
        let f = focal_length.get();
        let max_height = f * MAX_HEIGHT_RATIO;
        let clamped = if height.is_nan() {
            0.0
        } else {
            height.clamp(0.0, max_height)
        };
        if height > max_height {
            tracing::warn!(height, focal_length = f, "height clamped below focal length");
        }
        Self {
            viewpoint,
            height: clamped,
            scale: f / (f - clamped),
        }
    }

    /// Height actually used after clamping.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Radial magnification from the viewpoint, always `>= 1`.
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    #[must_use]
    pub fn project(&self, p: &Point2) -> Point2 {
        self.viewpoint + (p - self.viewpoint) * self.scale
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn focal(f: f64) -> FocalLength {
        FocalLength::new(f).unwrap()
    }

    #[test]
    fn zero_height_is_identity() {
        let proj = Projection::new(Point2::new(50.0, 50.0), focal(1000.0), 0.0);
        for p in [Point2::new(0.0, 0.0), Point2::new(-30.0, 220.5), Point2::new(50.0, 50.0)] {
            assert_eq!(proj.project(&p), p);
        }
    }

    #[test]
    fn reference_roof_corner() {
        let proj = Projection::new(Point2::new(50.0, 50.0), focal(1000.0), 50.0);
        let roof = proj.project(&Point2::new(0.0, 0.0));
        let expected = 50.0 - 50.0 * 1000.0 / 950.0;
        assert_relative_eq!(roof.x, expected, epsilon = 1e-9);
        assert_relative_eq!(roof.y, expected, epsilon = 1e-9);
        assert_relative_eq!(roof.x, -2.631_578_947, epsilon = 1e-6);
    }

    #[test]
    fn distance_grows_strictly_with_height() {
        let v = Point2::new(10.0, -4.0);
        let p = Point2::new(70.0, 33.0);
        let mut last = 0.0;
        for step in 0..100 {
            let h = f64::from(step) * 9.99;
            let d = (Projection::new(v, focal(1000.0), h).project(&p) - v).norm();
            assert!(d > last, "h={h} d={d} last={last}");
            last = d;
        }
    }

    #[test]
    fn height_at_or_above_focal_is_clamped() {
        let v = Point2::new(0.0, 0.0);
        let at = Projection::new(v, focal(500.0), 500.0);
        let above = Projection::new(v, focal(500.0), 9000.0);
        assert!(at.height() < 500.0);
        assert!(at.scale().is_finite());
        assert_relative_eq!(at.scale(), above.scale());
    }

    #[test]
    fn negative_and_nan_heights_are_ground_level() {
        let v = Point2::new(0.0, 0.0);
        assert_relative_eq!(Projection::new(v, focal(500.0), -20.0).scale(), 1.0);
        assert_relative_eq!(Projection::new(v, focal(500.0), f64::NAN).scale(), 1.0);
    }
}
