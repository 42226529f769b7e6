use super::{cross, Point2, TOLERANCE};

/// Proper segment-segment intersection in 2D.
///
/// Solves `a0 + ua * (a1 - a0) = b0 + ub * (b1 - b0)` and reports a crossing
/// only when both `ua` and `ub` lie strictly inside `(0, 1)`. Parallel and
/// coincident segments, and segments that merely touch at an endpoint, do not
/// intersect.
///
/// Returns `(intersection_point, ua, ub)`.
#[must_use]
pub fn segment_segment_proper_intersect(
    a0: &Point2,
    a1: &Point2,
    b0: &Point2,
    b1: &Point2,
) -> Option<(Point2, f64, f64)> {
    let da = a1 - a0;
    let db = b1 - b0;

    let denom = cross(&da, &db);
    if denom.abs() < TOLERANCE {
        return None;
    }

    let offset = b0 - a0;
    let ua = cross(&offset, &db) / denom;
    let ub = cross(&offset, &da) / denom;

    let inside = |t: f64| t > 0.0 && t < 1.0;
    if inside(ua) && inside(ub) {
        Some((a0 + da * ua, ua, ub))
    } else {
        None
    }
}
