pub mod loader;

pub use loader::load_telemetry;
use serde::{Deserialize, Serialize};

use crate::TracklineError;
use crate::geometry::Point2D;

/// Raw DRS channel value at or above which the flap is considered open
pub const DRS_ACTIVE_THRESHOLD: f64 = 10.0;

/// One driver's fastest-lap telemetry as read from the session file.
///
/// All channels are indexed by sample; `x`, `y` and `drs` must line up with
/// `distance`. `x`/`y` may both be empty when the source had no position data.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DriverTelemetry {
    pub driver_number: u32,
    pub lap_number: u32,
    /// Meters traveled from S/F this lap
    pub distance: Vec<f64>,
    #[serde(default)]
    pub x: Vec<f64>,
    #[serde(default)]
    pub y: Vec<f64>,
    /// Raw DRS channel
    #[serde(default)]
    pub drs: Vec<f64>,
}

impl DriverTelemetry {
    /// Keep every `stride`-th sample of every channel, starting with the first.
    ///
    /// Channel lengths are checked first so that decimation cannot hide a
    /// mismatch. A stride of 0 is treated as 1.
    pub fn sampled(&self, stride: usize) -> Result<Self, TracklineError> {
        self.check_lengths()?;
        let stride = stride.max(1);
        let every = |values: &[f64]| values.iter().step_by(stride).copied().collect::<Vec<_>>();
        Ok(Self {
            driver_number: self.driver_number,
            lap_number: self.lap_number,
            distance: every(&self.distance),
            x: every(&self.x),
            y: every(&self.y),
            drs: every(&self.drs),
        })
    }

    /// Every present channel must line up with `distance`; `x`/`y` may both be
    /// absent and `drs` may be absent.
    fn check_lengths(&self) -> Result<(), TracklineError> {
        let expected = self.distance.len();
        if !(self.x.is_empty() && self.y.is_empty()) {
            ensure_length("x", expected, self.x.len())?;
            ensure_length("y", expected, self.y.len())?;
        }
        if !self.drs.is_empty() {
            ensure_length("drs", expected, self.drs.len())?;
        }
        Ok(())
    }

    /// Validate the channels and convert into a [`DriverTrace`].
    ///
    /// A DRS sample counts as active when it is at least `activation_threshold`.
    /// A missing DRS channel is read as never active.
    pub fn into_trace(self, activation_threshold: f64) -> Result<DriverTrace, TracklineError> {
        self.check_lengths()?;
        ensure_finite("distance", &self.distance)?;

        let points = if self.x.is_empty() && self.y.is_empty() {
            Vec::new()
        } else {
            ensure_finite("x", &self.x)?;
            ensure_finite("y", &self.y)?;
            self.x
                .iter()
                .zip(&self.y)
                .map(|(x, y)| Point2D::new(*x, *y))
                .collect()
        };

        let drs = if self.drs.is_empty() {
            vec![false; self.distance.len()]
        } else {
            self.drs.iter().map(|v| *v >= activation_threshold).collect()
        };

        DriverTrace::new(self.driver_number, self.lap_number, self.distance, points, drs)
    }
}

/// Validated per-driver trace consumed by the geometry transforms.
///
/// `drs` always has the length of `distance`. `points` either has that length
/// too or is empty when the driver had no position data.
#[derive(Clone, Debug, PartialEq)]
pub struct DriverTrace {
    pub driver_number: u32,
    pub lap_number: u32,
    pub distance: Vec<f64>,
    pub points: Vec<Point2D>,
    pub drs: Vec<bool>,
}

impl DriverTrace {
    pub fn new(
        driver_number: u32,
        lap_number: u32,
        distance: Vec<f64>,
        points: Vec<Point2D>,
        drs: Vec<bool>,
    ) -> Result<Self, TracklineError> {
        if !points.is_empty() {
            ensure_length("position", distance.len(), points.len())?;
        }
        ensure_length("drs", distance.len(), drs.len())?;
        Ok(Self {
            driver_number,
            lap_number,
            distance,
            points,
            drs,
        })
    }

    pub fn has_positions(&self) -> bool {
        !self.points.is_empty()
    }

    /// Same trace with its positions replaced, e.g. after rotation
    pub fn with_points(self, points: Vec<Point2D>) -> Result<Self, TracklineError> {
        Self::new(
            self.driver_number,
            self.lap_number,
            self.distance,
            points,
            self.drs,
        )
    }

    /// Distances of every sample where DRS is open
    pub fn active_distances(&self) -> impl Iterator<Item = f64> + '_ {
        self.distance
            .iter()
            .zip(&self.drs)
            .filter(|(_, active)| **active)
            .map(|(distance, _)| *distance)
    }
}

fn ensure_length(channel: &str, expected: usize, actual: usize) -> Result<(), TracklineError> {
    if expected != actual {
        return Err(TracklineError::LengthMismatch {
            channel: channel.to_string(),
            expected,
            actual,
        });
    }
    Ok(())
}

fn ensure_finite(channel: &str, values: &[f64]) -> Result<(), TracklineError> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(index) => Err(TracklineError::NonFiniteSample {
            channel: channel.to_string(),
            index,
        }),
        None => Ok(()),
    }
}
