// Error types for trackline

use snafu::Snafu;
use std::io;

#[derive(Debug, Snafu)]
pub enum TracklineError {
    // Per-driver channel validation
    #[snafu(display(
        "Length mismatch in {channel} channel: expected {expected} samples, found {actual}"
    ))]
    LengthMismatch {
        channel: String,
        expected: usize,
        actual: usize,
    },
    #[snafu(display("Non-finite value in {channel} channel at sample {index}"))]
    NonFiniteSample { channel: String, index: usize },

    // Orchestration errors
    #[snafu(display("Reference driver {driver_number} not found in session telemetry"))]
    ReferenceDriverNotFound { driver_number: u32 },

    // Telemetry input errors
    #[snafu(display("Invalid telemetry file: {path}"))]
    InvalidTelemetryFile { path: String },
    #[snafu(display("Error loading telemetry file"))]
    TelemetryLoaderError { source: io::Error },
    #[snafu(display("Malformed telemetry record #{record}"))]
    TelemetryParseError { record: usize, source: io::Error },

    // Errors for the geometry writer
    #[snafu(display("Error writing geometry file"))]
    WriterError { source: io::Error },
    #[snafu(display("Error serializing geometry output"))]
    OutputSerializeError { source: serde_json::Error },

    // Config management errors
    #[snafu(display("Could not find application data directory to save config file"))]
    NoConfigDir,
    #[snafu(display("Error reading or writing config file"))]
    ConfigIOError { source: io::Error },
    #[snafu(display("Error serializing config file"))]
    ConfigSerializeError { source: serde_json::Error },
    #[snafu(display("Error parsing config file"))]
    ConfigParseError { source: serde_json::Error },
    #[snafu(display("Invalid configuration: {field} - {reason}"))]
    InvalidConfig { field: String, reason: String },
}
