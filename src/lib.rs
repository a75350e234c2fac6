// Library interface for trackline
// This allows integration tests and benchmarks to access internal modules

pub mod config;
pub mod errors;
pub mod geometry;
pub mod session;
pub mod telemetry;
pub mod writer;

// Re-export commonly used types
pub use config::GeometryConfig;
pub use errors::TracklineError;
pub use geometry::{Point2D, TrackBoundary, Zone, ZoneConfig};
pub use session::{
    GeometryPipeline, ReferenceDriver, RotationFrame, SessionGeometry, SessionRotation,
};
pub use telemetry::{DriverTelemetry, DriverTrace};
