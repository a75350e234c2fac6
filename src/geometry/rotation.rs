// Rigid rotation of point sequences about a center

use super::types::Point2D;

/// Arithmetic mean of the x and y coordinates, or `None` for an empty trace
pub fn centroid(points: &[Point2D]) -> Option<Point2D> {
    if points.is_empty() {
        return None;
    }
    let n = points.len() as f64;
    let (sum_x, sum_y) = points
        .iter()
        .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
    Some(Point2D::new(sum_x / n, sum_y / n))
}

/// Rotate `points` by `angle_deg` degrees (counter-clockwise for positive angles)
/// about `center`, or about the points' own centroid when no center is given.
///
/// An empty input returns an empty sequence without computing a center.
pub fn rotate_points(points: &[Point2D], angle_deg: f64, center: Option<Point2D>) -> Vec<Point2D> {
    let Some(center) = center.or_else(|| centroid(points)) else {
        return Vec::new();
    };

    let (sin_a, cos_a) = angle_deg.to_radians().sin_cos();
    points
        .iter()
        .map(|p| {
            let dx = p.x - center.x;
            let dy = p.y - center.y;
            Point2D::new(
                center.x + dx * cos_a - dy * sin_a,
                center.y + dx * sin_a + dy * cos_a,
            )
        })
        .collect()
}
