// Session geometry orchestration
//
// All driver traces are brought into one frame (a single rotation center taken
// from the first driver with positions), then the boundary and the DRS zones
// are derived from an explicitly chosen reference trace so that both overlay
// the rotated traces.

use log::{debug, info, warn};

use crate::TracklineError;
use crate::config::GeometryConfig;
use crate::geometry::{
    Point2D, TrackBoundary, Zone, centroid, compute_track_boundary, extract_activation_zones,
    rotate_points,
};
use crate::telemetry::{DriverTelemetry, DriverTrace};

/// Session-wide circuit rotation in degrees
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SessionRotation {
    pub angle_deg: f64,
}

impl SessionRotation {
    pub fn degrees(angle_deg: f64) -> Self {
        Self { angle_deg }
    }

    /// A zero angle leaves coordinates untouched
    pub fn is_identity(&self) -> bool {
        self.angle_deg == 0.0
    }
}

/// Whether the shared rotation center has been fixed yet
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum RotationFrame {
    /// No trace with positions has been seen
    #[default]
    Unanchored,
    /// Center fixed from the raw positions of the first trace that had any
    Anchored { center: Point2D },
}

impl RotationFrame {
    pub fn center(&self) -> Option<Point2D> {
        match self {
            RotationFrame::Unanchored => None,
            RotationFrame::Anchored { center } => Some(*center),
        }
    }

    /// Fix the center on the centroid of `points` unless already anchored
    fn anchor_on(&mut self, points: &[Point2D]) {
        if let RotationFrame::Unanchored = self {
            if let Some(center) = centroid(points) {
                debug!("Shared rotation center: ({:.1}, {:.1})", center.x, center.y);
                *self = RotationFrame::Anchored { center };
            }
        }
    }
}

/// Which trace the boundary and zone endpoints are taken from
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ReferenceDriver {
    /// First trace in encounter order
    #[default]
    First,
    Number(u32),
}

/// Everything derived for one session, in the shared frame
#[derive(Debug, Clone, PartialEq)]
pub struct SessionGeometry {
    pub rotation: SessionRotation,
    pub frame: RotationFrame,
    pub traces: Vec<DriverTrace>,
    pub boundary: Option<TrackBoundary>,
    pub drs_zones: Vec<Zone>,
}

pub struct GeometryPipeline {
    config: GeometryConfig,
}

impl Default for GeometryPipeline {
    fn default() -> Self {
        Self::new(GeometryConfig::default())
    }
}

impl GeometryPipeline {
    pub fn new(config: GeometryConfig) -> Self {
        Self { config }
    }

    /// Decimate and validate raw telemetry records into traces
    pub fn prepare(
        &self,
        telemetry: Vec<DriverTelemetry>,
    ) -> Result<Vec<DriverTrace>, TracklineError> {
        telemetry
            .into_iter()
            .map(|record| {
                record
                    .sampled(self.config.sample_stride)?
                    .into_trace(self.config.activation_threshold)
            })
            .collect()
    }

    /// Rotate every trace about one shared center.
    ///
    /// The center is the centroid of the first trace that has positions, taken
    /// before any rotation. Traces without positions pass through unchanged.
    /// Output coordinates are rounded to one decimal place whether or not a
    /// rotation was applied.
    pub fn align_traces(
        &self,
        traces: Vec<DriverTrace>,
        rotation: SessionRotation,
    ) -> Result<(RotationFrame, Vec<DriverTrace>), TracklineError> {
        let mut frame = RotationFrame::Unanchored;
        let mut aligned = Vec::with_capacity(traces.len());

        for trace in traces {
            if !trace.has_positions() {
                debug!(
                    "Driver {} has no position data, leaving trace unrotated",
                    trace.driver_number
                );
                aligned.push(trace);
                continue;
            }

            frame.anchor_on(&trace.points);
            let points = if rotation.is_identity() {
                trace.points.iter().map(Point2D::rounded).collect()
            } else {
                rotate_points(&trace.points, rotation.angle_deg, frame.center())
                    .iter()
                    .map(Point2D::rounded)
                    .collect()
            };
            aligned.push(trace.with_points(points)?);
        }

        Ok((frame, aligned))
    }

    /// Run the full geometry pass for one session.
    pub fn build(
        &self,
        traces: Vec<DriverTrace>,
        rotation: SessionRotation,
        reference: ReferenceDriver,
    ) -> Result<SessionGeometry, TracklineError> {
        let reference_index = match reference {
            ReferenceDriver::First => 0,
            ReferenceDriver::Number(driver_number) => traces
                .iter()
                .position(|t| t.driver_number == driver_number)
                .ok_or(TracklineError::ReferenceDriverNotFound { driver_number })?,
        };

        let (frame, traces) = self.align_traces(traces, rotation)?;
        let reference_trace = traces.get(reference_index);

        let boundary = reference_trace
            .and_then(|r| compute_track_boundary(&r.points, self.config.half_width));
        match &boundary {
            Some(b) => info!("Track boundary computed ({} points)", b.len()),
            None => warn!("No track boundary: reference trace has too few positions"),
        }

        let drs_zones =
            extract_activation_zones(&traces, reference_trace, &self.config.zone_config());
        info!("Found {} DRS zone(s)", drs_zones.len());

        Ok(SessionGeometry {
            rotation,
            frame,
            traces,
            boundary,
            drs_zones,
        })
    }
}
