// Activation zone extraction
//
// Active-sample distances from several drivers are pooled, sorted and split
// wherever consecutive values are further apart than the configured gap
// (single-linkage clustering on one axis). Zone endpoints are then looked up
// on a reference trace to give them map coordinates.

use itertools::Itertools;
use log::debug;

use super::types::{Point2D, Zone, round_coordinate};
use crate::telemetry::DriverTrace;

/// Largest distance gap that still joins two active samples into one zone
pub const DEFAULT_ZONE_GAP: f64 = 200.0;
/// Number of driver traces sampled for activation distances
pub const MAX_ZONE_TRACES: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoneConfig {
    pub distance_gap: f64,
    pub max_traces: usize,
}

impl Default for ZoneConfig {
    fn default() -> Self {
        Self {
            distance_gap: DEFAULT_ZONE_GAP,
            max_traces: MAX_ZONE_TRACES,
        }
    }
}

/// Group `distances` into `(start, end)` intervals.
///
/// Input order does not matter. A new interval starts whenever the step to the
/// next sorted value exceeds `gap`; a step equal to `gap` stays joined.
pub fn cluster_distances(distances: &[f64], gap: f64) -> Vec<(f64, f64)> {
    let sorted: Vec<f64> = distances
        .iter()
        .copied()
        .sorted_by(|a, b| a.total_cmp(b))
        .collect();

    let Some((&first, rest)) = sorted.split_first() else {
        return Vec::new();
    };

    let mut intervals = Vec::new();
    let mut zone_start = first;
    let mut zone_end = first;
    for &distance in rest {
        if distance - zone_end > gap {
            intervals.push((zone_start, zone_end));
            zone_start = distance;
        }
        zone_end = distance;
    }
    intervals.push((zone_start, zone_end));
    intervals
}

/// Index of the sample whose distance is closest to `target`.
///
/// Ties resolve to the lowest index. `None` when `distances` is empty.
pub fn nearest_index(distances: &[f64], target: f64) -> Option<usize> {
    distances
        .iter()
        .map(|d| (d - target).abs())
        .enumerate()
        .fold(None, |best: Option<(usize, f64)>, (i, delta)| match best {
            Some((_, best_delta)) if best_delta <= delta => best,
            _ => Some((i, delta)),
        })
        .map(|(i, _)| i)
}

/// Position on `reference` closest (by distance along the lap) to `distance`
fn locate(reference: &DriverTrace, distance: f64) -> Option<Point2D> {
    if reference.points.is_empty() {
        return None;
    }
    nearest_index(&reference.distance, distance).map(|i| reference.points[i].rounded())
}

/// Extract activation zones from the first `config.max_traces` traces.
///
/// With a reference trace that carries positions, each zone gets rounded start
/// and end coordinates looked up independently on that trace, and its
/// distances are rounded to output precision. Otherwise the zones are bare
/// distance intervals.
pub fn extract_activation_zones(
    traces: &[DriverTrace],
    reference: Option<&DriverTrace>,
    config: &ZoneConfig,
) -> Vec<Zone> {
    let active_distances: Vec<f64> = traces
        .iter()
        .take(config.max_traces)
        .flat_map(|trace| trace.active_distances())
        .collect();

    if active_distances.is_empty() {
        debug!("No active samples found, no zones extracted");
        return Vec::new();
    }

    let intervals = cluster_distances(&active_distances, config.distance_gap);
    debug!(
        "Clustered {} active samples into {} zones",
        active_distances.len(),
        intervals.len()
    );

    intervals
        .into_iter()
        .map(|(start_distance, end_distance)| {
            let endpoints = reference
                .and_then(|r| Some((locate(r, start_distance)?, locate(r, end_distance)?)));
            match endpoints {
                Some((start, end)) => Zone {
                    start_distance: round_coordinate(start_distance),
                    end_distance: round_coordinate(end_distance),
                    start: Some(start),
                    end: Some(end),
                },
                None => Zone::interval(start_distance, end_distance),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn trace(driver_number: u32, distance: Vec<f64>, drs: Vec<bool>) -> DriverTrace {
        let points = distance.iter().map(|d| Point2D::new(*d, 0.0)).collect();
        DriverTrace::new(driver_number, 1, distance, points, drs).unwrap()
    }

    #[test]
    fn test_cluster_splits_on_large_gap() {
        let zones = cluster_distances(&[0.0, 50.0, 300.0, 320.0], DEFAULT_ZONE_GAP);
        assert_eq!(zones, vec![(0.0, 50.0), (300.0, 320.0)]);
    }

    #[test]
    fn test_cluster_gap_equal_to_threshold_stays_joined() {
        let zones = cluster_distances(&[100.0, 300.0, 500.1], 200.0);
        assert_eq!(zones, vec![(100.0, 300.0), (500.1, 500.1)]);
    }

    #[test]
    fn test_cluster_empty_and_single() {
        assert!(cluster_distances(&[], DEFAULT_ZONE_GAP).is_empty());
        assert_eq!(cluster_distances(&[42.0], DEFAULT_ZONE_GAP), vec![(42.0, 42.0)]);
    }

    #[test]
    fn test_nearest_index_prefers_first_tie() {
        let distances = [0.0, 10.0, 20.0, 30.0];
        assert_eq!(nearest_index(&distances, 15.0), Some(1));
        assert_eq!(nearest_index(&distances, 26.0), Some(3));
        assert_eq!(nearest_index(&distances, -100.0), Some(0));
        assert_eq!(nearest_index(&[5.0, 5.0, 5.0], 5.0), Some(0));
        assert_eq!(nearest_index(&[], 5.0), None);
    }

    #[test]
    fn test_no_active_samples_yields_no_zones() {
        let traces = vec![trace(1, vec![0.0, 100.0, 200.0], vec![false, false, false])];
        assert!(extract_activation_zones(&traces, traces.first(), &ZoneConfig::default()).is_empty());
        assert!(extract_activation_zones(&[], None, &ZoneConfig::default()).is_empty());
    }

    #[test]
    fn test_zones_without_reference_are_bare_intervals() {
        let traces = vec![trace(
            1,
            vec![0.0, 50.0, 300.0, 320.0],
            vec![true, true, true, true],
        )];
        let zones = extract_activation_zones(&traces, None, &ZoneConfig::default());
        assert_eq!(
            zones,
            vec![Zone::interval(0.0, 50.0), Zone::interval(300.0, 320.0)]
        );
    }

    #[test]
    fn test_zones_pool_drivers_and_map_to_reference() {
        let reference = DriverTrace::new(
            44,
            12,
            vec![0.0, 100.0, 200.0, 300.0, 400.0, 500.0, 600.0],
            (0..7)
                .map(|i| Point2D::new(i as f64 * 1.04, i as f64 * -2.06))
                .collect(),
            vec![false; 7],
        )
        .unwrap();
        let traces = vec![
            reference.clone(),
            trace(1, vec![95.0, 140.0, 180.0], vec![true, true, true]),
            trace(16, vec![210.0, 580.0, 610.0], vec![true, true, true]),
        ];

        let zones = extract_activation_zones(&traces, Some(&reference), &ZoneConfig::default());

        assert_eq!(zones.len(), 2);
        assert_eq!(zones[0].start_distance, 95.0);
        assert_eq!(zones[0].end_distance, 210.0);
        assert_eq!(zones[0].start, Some(Point2D::new(1.0, -2.1)));
        assert_eq!(zones[0].end, Some(Point2D::new(2.1, -4.1)));
        assert_eq!(zones[1].start_distance, 580.0);
        assert_eq!(zones[1].end_distance, 610.0);
        assert_eq!(zones[1].start, Some(Point2D::new(6.2, -12.4)));
        assert_eq!(zones[1].end, Some(Point2D::new(6.2, -12.4)));
    }

    #[test]
    fn test_only_capped_traces_contribute() {
        let mut traces: Vec<DriverTrace> = (0..5)
            .map(|n| trace(n, vec![0.0, 10.0], vec![false, false]))
            .collect();
        traces.push(trace(99, vec![1000.0], vec![true]));

        assert!(extract_activation_zones(&traces, None, &ZoneConfig::default()).is_empty());

        let config = ZoneConfig {
            max_traces: 6,
            ..ZoneConfig::default()
        };
        assert_eq!(
            extract_activation_zones(&traces, None, &config),
            vec![Zone::interval(1000.0, 1000.0)]
        );
    }

    #[test]
    fn test_reference_without_positions_gives_intervals() {
        let empty_reference = DriverTrace::new(1, 1, vec![], vec![], vec![]).unwrap();
        let traces = vec![trace(2, vec![10.0, 20.0], vec![true, true])];
        let zones = extract_activation_zones(&traces, Some(&empty_reference), &ZoneConfig::default());
        assert_eq!(zones, vec![Zone::interval(10.0, 20.0)]);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_clustering_ignores_input_order(
            (distances, shuffled) in prop::collection::vec(0.0f64..6000.0, 0..100)
                .prop_flat_map(|d| (Just(d.clone()), Just(d).prop_shuffle())),
        ) {
            prop_assert_eq!(
                cluster_distances(&distances, DEFAULT_ZONE_GAP),
                cluster_distances(&shuffled, DEFAULT_ZONE_GAP)
            );
        }

        #[test]
        fn prop_zones_are_ordered_and_separated(
            distances in prop::collection::vec(0.0f64..6000.0, 1..100),
            gap in 1.0f64..500.0,
        ) {
            let zones = cluster_distances(&distances, gap);
            for (start, end) in &zones {
                prop_assert!(start <= end);
            }
            for (a, b) in zones.iter().tuple_windows() {
                prop_assert!(b.0 - a.1 > gap);
            }
        }
    }
}
