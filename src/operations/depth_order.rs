use crate::math::distance_2d::nearest_vertex_dist;
use crate::math::polygon_2d::point_in_ring;
use crate::math::Point2;
use crate::model::PolygonSet;

/// Indices of `polygons` in paint order.
///
/// Pavements come first in their stored order, then buildings from the one
/// whose nearest vertex is farthest from the viewpoint to the closest.
#[must_use]
pub fn paint_order(polygons: &PolygonSet, viewpoint: &Point2) -> Vec<usize> {
    let (pavements, buildings): (Vec<_>, Vec<_>) =
        polygons.iter().enumerate().partition(|(_, p)| p.is_pavement());

    let mut buildings: Vec<(usize, f64)> = buildings
        .into_iter()
        .map(|(i, p)| {
            let depth = nearest_vertex_dist(viewpoint, p.ring.points()).unwrap_or(0.0);
            (i, depth)
        })
        .collect();
    buildings.sort_by(|a, b| b.1.total_cmp(&a.1));

    pavements
        .into_iter()
        .map(|(i, _)| i)
        .chain(buildings.into_iter().map(|(i, _)| i))
        .collect()
}

/// Topmost polygon whose footprint contains `point`.
#[must_use]
pub fn pick(polygons: &PolygonSet, viewpoint: &Point2, point: &Point2) -> Option<usize> {
    let hit = paint_order(polygons, viewpoint)
        .into_iter()
        .rev()
        .find(|&i| {
            polygons
                .get(i)
                .is_ok_and(|p| point_in_ring(point, p.ring.points()))
        });
    tracing::trace!(x = point.x, y = point.y, ?hit, "pick");
    hit
}
