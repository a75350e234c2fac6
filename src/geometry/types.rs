// Core value types shared by the geometry transforms

use serde::{Deserialize, Serialize};

/// Number of decimal places kept for serialized coordinates
pub const COORDINATE_DECIMALS: usize = 1;

/// Round a coordinate or distance to the precision used in serialized output.
///
/// Rounds the exact binary value, ties to even: `0.35` (stored just below) is
/// `0.3`, `2.45` (stored just above) is `2.5` and the exact tie `0.25` is `0.2`.
pub fn round_coordinate(value: f64) -> f64 {
    format!("{:.*}", COORDINATE_DECIMALS, value)
        .parse()
        .unwrap_or(value)
}

/// A planar position in the session's arbitrary distance unit
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance_to(&self, other: &Point2D) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    /// Copy of this point with both coordinates rounded to output precision
    pub fn rounded(&self) -> Self {
        Self::new(round_coordinate(self.x), round_coordinate(self.y))
    }
}

/// Inner and outer track edges flanking a centerline.
///
/// Both sequences have the centerline's length and index `i` of each is offset
/// from centerline sample `i`. `outer` always has a non-negative signed area.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackBoundary {
    pub inner: Vec<Point2D>,
    pub outer: Vec<Point2D>,
}

impl TrackBoundary {
    pub fn len(&self) -> usize {
        self.outer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outer.is_empty()
    }
}

/// A contiguous distance interval over which the activation channel is on
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Zone {
    pub start_distance: f64,
    pub end_distance: f64,
    /// Reference-trace position nearest to `start_distance`, if a reference was available
    pub start: Option<Point2D>,
    /// Reference-trace position nearest to `end_distance`, if a reference was available
    pub end: Option<Point2D>,
}

impl Zone {
    /// Zone without spatial endpoints
    pub fn interval(start_distance: f64, end_distance: f64) -> Self {
        Self {
            start_distance,
            end_distance,
            start: None,
            end: None,
        }
    }
}
