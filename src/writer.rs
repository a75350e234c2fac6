// JSON output for the web front end

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use serde::Serialize;

use crate::{
    TracklineError,
    geometry::{Point2D, TrackBoundary, Zone},
    session::SessionGeometry,
    telemetry::DriverTrace,
};

/// A point sequence serialized as parallel coordinate arrays
#[derive(Serialize, Debug, PartialEq)]
pub struct CoordinateArrays {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

impl From<&[Point2D]> for CoordinateArrays {
    fn from(points: &[Point2D]) -> Self {
        Self {
            x: points.iter().map(|p| p.x).collect(),
            y: points.iter().map(|p| p.y).collect(),
        }
    }
}

#[derive(Serialize, Debug, PartialEq)]
pub struct BoundaryDocument {
    pub inner: CoordinateArrays,
    pub outer: CoordinateArrays,
}

impl From<&TrackBoundary> for BoundaryDocument {
    fn from(boundary: &TrackBoundary) -> Self {
        Self {
            inner: boundary.inner.as_slice().into(),
            outer: boundary.outer.as_slice().into(),
        }
    }
}

#[derive(Serialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ZoneDocument {
    pub start_distance: f64,
    pub end_distance: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_y: Option<f64>,
}

impl From<&Zone> for ZoneDocument {
    fn from(zone: &Zone) -> Self {
        Self {
            start_distance: zone.start_distance,
            end_distance: zone.end_distance,
            start_x: zone.start.map(|p| p.x),
            start_y: zone.start.map(|p| p.y),
            end_x: zone.end.map(|p| p.x),
            end_y: zone.end.map(|p| p.y),
        }
    }
}

#[derive(Serialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TraceDocument {
    pub driver_number: u32,
    pub lap_number: u32,
    pub distance: Vec<f64>,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub drs: Vec<bool>,
}

impl From<&DriverTrace> for TraceDocument {
    fn from(trace: &DriverTrace) -> Self {
        let CoordinateArrays { x, y } = trace.points.as_slice().into();
        Self {
            driver_number: trace.driver_number,
            lap_number: trace.lap_number,
            distance: trace.distance.clone(),
            x,
            y,
            drs: trace.drs.clone(),
        }
    }
}

/// Serialized view of a [`SessionGeometry`]
#[derive(Serialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GeometryDocument {
    pub rotation: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub center: Option<Point2D>,
    pub telemetry_data: Vec<TraceDocument>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub track_boundary: Option<BoundaryDocument>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub drs_zones: Vec<ZoneDocument>,
}

impl From<&SessionGeometry> for GeometryDocument {
    fn from(geometry: &SessionGeometry) -> Self {
        Self {
            rotation: geometry.rotation.angle_deg,
            center: geometry.frame.center(),
            telemetry_data: geometry.traces.iter().map(TraceDocument::from).collect(),
            track_boundary: geometry.boundary.as_ref().map(BoundaryDocument::from),
            drs_zones: geometry.drs_zones.iter().map(ZoneDocument::from).collect(),
        }
    }
}

pub fn write_geometry(file: &Path, geometry: &SessionGeometry) -> Result<(), TracklineError> {
    let geometry_file = File::create(file).map_err(|e| TracklineError::WriterError { source: e })?;
    let mut geometry_file_writer = BufWriter::new(geometry_file);
    serde_json::to_writer_pretty(&mut geometry_file_writer, &GeometryDocument::from(geometry))
        .map_err(|e| TracklineError::OutputSerializeError { source: e })?;
    geometry_file_writer
        .flush()
        .map_err(|e| TracklineError::WriterError { source: e })?;
    Ok(())
}
