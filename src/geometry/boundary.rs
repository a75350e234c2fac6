// Track outline synthesis from a single racing line
//
// The centerline is offset along its local normal by a constant half-width on
// both sides. No smoothing or resampling is applied, so jitter in the input
// line shows up directly in the normals.

use itertools::Itertools;
use log::debug;

use super::types::{Point2D, TrackBoundary};

/// Generic track half-width in session distance units
pub const DEFAULT_HALF_WIDTH: f64 = 6.0;

/// Per-sample derivative of an evenly spaced sequence.
///
/// Central differences on interior samples, one-sided differences on the first
/// and last. Sequences shorter than two samples have no defined derivative and
/// yield zeros.
pub fn gradient(values: &[f64]) -> Vec<f64> {
    let n = values.len();
    if n < 2 {
        return vec![0.0; n];
    }

    let mut result = Vec::with_capacity(n);
    result.push(values[1] - values[0]);
    result.extend(
        values
            .iter()
            .tuple_windows()
            .map(|(prev, _, next)| (next - prev) / 2.0),
    );
    result.push(values[n - 1] - values[n - 2]);
    result
}

/// Shoelace sum over consecutive points, without the closing edge.
///
/// Positive for counter-clockwise winding, negative for clockwise.
pub fn signed_area(points: &[Point2D]) -> f64 {
    points
        .iter()
        .tuple_windows()
        .map(|(a, b)| a.x * b.y - b.x * a.y)
        .sum()
}

/// Build the inner/outer edge pair for `centerline` at `half_width` on each side.
///
/// Returns `None` for centerlines with fewer than two samples. Samples with a
/// zero-length tangent (repeated positions) get a zero normal and therefore sit
/// on the centerline in both edges.
pub fn compute_track_boundary(centerline: &[Point2D], half_width: f64) -> Option<TrackBoundary> {
    if centerline.len() < 2 {
        debug!(
            "Centerline has {} samples, skipping boundary synthesis",
            centerline.len()
        );
        return None;
    }

    let xs: Vec<f64> = centerline.iter().map(|p| p.x).collect();
    let ys: Vec<f64> = centerline.iter().map(|p| p.y).collect();
    let dx = gradient(&xs);
    let dy = gradient(&ys);

    let mut degenerate_count = 0;
    let mut outer = Vec::with_capacity(centerline.len());
    let mut inner = Vec::with_capacity(centerline.len());

    for ((point, tx), ty) in centerline.iter().zip(&dx).zip(&dy) {
        let mut norm = (tx * tx + ty * ty).sqrt();
        if norm == 0.0 {
            degenerate_count += 1;
            norm = 1.0;
        }
        let nx = -ty / norm;
        let ny = tx / norm;

        outer.push(Point2D::new(
            point.x + nx * half_width,
            point.y + ny * half_width,
        ));
        inner.push(Point2D::new(
            point.x - nx * half_width,
            point.y - ny * half_width,
        ));
    }

    if degenerate_count > 0 {
        debug!(
            "{} centerline samples had a zero-length tangent",
            degenerate_count
        );
    }

    if signed_area(&outer) < 0.0 {
        std::mem::swap(&mut outer, &mut inner);
    }

    Some(TrackBoundary { inner, outer })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn circle(radius: f64, samples: usize, clockwise: bool) -> Vec<Point2D> {
        (0..samples)
            .map(|i| {
                let mut theta = 2.0 * std::f64::consts::PI * i as f64 / samples as f64;
                if clockwise {
                    theta = -theta;
                }
                Point2D::new(radius * theta.cos(), radius * theta.sin())
            })
            .collect()
    }

    #[test]
    fn test_gradient_matches_finite_differences() {
        assert_eq!(gradient(&[1.0, 2.0, 4.0, 7.0, 11.0]), vec![1.0, 1.5, 2.5, 3.5, 4.0]);
        assert_eq!(gradient(&[3.0, 5.0]), vec![2.0, 2.0]);
        assert_eq!(gradient(&[3.0]), vec![0.0]);
        assert!(gradient(&[]).is_empty());
    }

    #[test]
    fn test_signed_area_winding() {
        let ccw = vec![
            Point2D::new(0.0, 0.0),
            Point2D::new(1.0, 0.0),
            Point2D::new(1.0, 1.0),
            Point2D::new(0.0, 1.0),
        ];
        let cw: Vec<Point2D> = ccw.iter().rev().copied().collect();
        assert!(signed_area(&ccw) > 0.0);
        assert!(signed_area(&cw) < 0.0);
        assert_eq!(signed_area(&ccw[..1]), 0.0);
    }

    #[test]
    fn test_short_centerline_has_no_boundary() {
        assert!(compute_track_boundary(&[], DEFAULT_HALF_WIDTH).is_none());
        assert!(compute_track_boundary(&[Point2D::new(1.0, 1.0)], DEFAULT_HALF_WIDTH).is_none());
    }

    #[test]
    fn test_straight_segment_boundary() {
        let centerline: Vec<Point2D> = (0..5).map(|i| Point2D::new(i as f64 * 10.0, 0.0)).collect();
        let boundary = compute_track_boundary(&centerline, DEFAULT_HALF_WIDTH).unwrap();

        assert_eq!(boundary.len(), 5);
        assert_eq!(boundary.inner.len(), 5);
        // The left-hand candidate (y = +6) winds clockwise here, so the labels swap
        for (outer, inner) in boundary.outer.iter().zip(&boundary.inner) {
            assert!((outer.y + DEFAULT_HALF_WIDTH).abs() < 1e-9);
            assert!((inner.y - DEFAULT_HALF_WIDTH).abs() < 1e-9);
        }
        assert!(signed_area(&boundary.outer) > 0.0);
        assert!(signed_area(&boundary.inner) < 0.0);
    }

    #[test]
    fn test_boundary_offsets_by_half_width() {
        let centerline = circle(500.0, 200, false);
        let boundary = compute_track_boundary(&centerline, 10.0).unwrap();
        for ((c, o), i) in centerline.iter().zip(&boundary.outer).zip(&boundary.inner) {
            assert!((c.distance_to(o) - 10.0).abs() < 1e-6);
            assert!((c.distance_to(i) - 10.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_clockwise_loop_is_rewound() {
        for clockwise in [false, true] {
            let boundary = compute_track_boundary(&circle(300.0, 120, clockwise), 6.0).unwrap();
            assert!(signed_area(&boundary.outer) >= 0.0);
        }
    }

    #[test]
    fn test_repeated_samples_produce_zero_offset() {
        let centerline = vec![
            Point2D::new(5.0, 5.0),
            Point2D::new(5.0, 5.0),
            Point2D::new(5.0, 5.0),
        ];
        let boundary = compute_track_boundary(&centerline, 6.0).unwrap();
        assert_eq!(boundary.outer, centerline);
        assert_eq!(boundary.inner, centerline);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_outer_winds_counter_clockwise(
            coords in prop::collection::vec((-2000.0f64..2000.0, -2000.0f64..2000.0), 2..80),
            half_width in 0.5f64..50.0,
        ) {
            let centerline: Vec<Point2D> = coords.into_iter().map(|(x, y)| Point2D::new(x, y)).collect();
            let boundary = compute_track_boundary(&centerline, half_width).unwrap();
            prop_assert_eq!(boundary.outer.len(), centerline.len());
            prop_assert_eq!(boundary.inner.len(), centerline.len());
            prop_assert!(signed_area(&boundary.outer) >= 0.0);
        }
    }
}
