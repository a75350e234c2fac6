// Session telemetry loading from JSON-lines files, one driver per line

use std::path::Path;

use log::{debug, info};

use super::DriverTelemetry;
use crate::TracklineError;

/// Read every driver record from `path`, preserving file order.
pub fn load_telemetry(path: &Path) -> Result<Vec<DriverTelemetry>, TracklineError> {
    if !path.exists() {
        return Err(TracklineError::InvalidTelemetryFile {
            path: format!("{:?}", path),
        });
    }

    let records = serde_jsonlines::json_lines::<DriverTelemetry, _>(path)
        .map_err(|e| TracklineError::TelemetryLoaderError { source: e })?;

    let mut telemetry = Vec::new();
    for (i, record) in records.enumerate() {
        let record = record.map_err(|e| TracklineError::TelemetryParseError {
            record: i + 1,
            source: e,
        })?;
        debug!(
            "Loaded driver {} lap {} with {} samples",
            record.driver_number,
            record.lap_number,
            record.distance.len()
        );
        telemetry.push(record);
    }

    info!("Loaded {} driver traces from {:?}", telemetry.len(), path);
    Ok(telemetry)
}
