pub mod distance_2d;
pub mod intersect_2d;
pub mod polygon_2d;

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Z-component of the cross product of two planar vectors.
#[must_use]
pub fn cross(a: &Vector2, b: &Vector2) -> f64 {
    a.x * b.y - a.y * b.x
}

/// Linear interpolation between two points: `a + (b - a) * t`.
#[must_use]
pub fn lerp(a: &Point2, b: &Point2, t: f64) -> Point2 {
    a + (b - a) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cross_sign_follows_turn() {
        let x = Vector2::new(1.0, 0.0);
        let y = Vector2::new(0.0, 1.0);
        assert!((cross(&x, &y) - 1.0).abs() < TOLERANCE);
        assert!((cross(&y, &x) + 1.0).abs() < TOLERANCE);
        assert!(cross(&x, &x).abs() < TOLERANCE);
    }

    #[test]
    fn lerp_midpoint() {
        let m = lerp(&Point2::new(0.0, 0.0), &Point2::new(4.0, -2.0), 0.5);
        assert!((m.x - 2.0).abs() < TOLERANCE);
        assert!((m.y + 1.0).abs() < TOLERANCE);
    }
}
