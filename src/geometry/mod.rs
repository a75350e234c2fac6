// Pure geometry transforms over per-driver telemetry traces:
// rotation into a shared frame, track outline synthesis and activation zones

pub mod boundary;
pub mod rotation;
pub mod types;
pub mod zones;

// Re-export commonly used types
pub use boundary::{DEFAULT_HALF_WIDTH, compute_track_boundary, gradient, signed_area};
pub use rotation::{centroid, rotate_points};
pub use types::{Point2D, TrackBoundary, Zone, round_coordinate};
pub use zones::{
    DEFAULT_ZONE_GAP, MAX_ZONE_TRACES, ZoneConfig, cluster_distances, extract_activation_zones,
    nearest_index,
};
