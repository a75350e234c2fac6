use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::TracklineError;
use crate::geometry::{DEFAULT_HALF_WIDTH, DEFAULT_ZONE_GAP, MAX_ZONE_TRACES, ZoneConfig};
use crate::telemetry::DRS_ACTIVE_THRESHOLD;

const CONFIG_DIR_NAME: &str = "trackline";
const CONFIG_FILE_NAME: &str = "config.json";

/// Tunables for a geometry run, persisted as JSON in the user config directory
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct GeometryConfig {
    /// Lateral offset applied on each side of the centerline
    pub half_width: f64,
    /// Largest distance gap joining two active samples into one zone
    pub zone_gap: f64,
    /// Number of driver traces sampled for zone extraction
    pub max_zone_traces: usize,
    /// Raw DRS value at or above which a sample counts as active
    pub activation_threshold: f64,
    /// Keep every n-th input sample
    pub sample_stride: usize,
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self {
            half_width: DEFAULT_HALF_WIDTH,
            zone_gap: DEFAULT_ZONE_GAP,
            max_zone_traces: MAX_ZONE_TRACES,
            activation_threshold: DRS_ACTIVE_THRESHOLD,
            sample_stride: 1,
        }
    }
}

impl GeometryConfig {
    pub fn default_path() -> Result<PathBuf, TracklineError> {
        Ok(dirs::config_dir()
            .ok_or(TracklineError::NoConfigDir)?
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME))
    }

    /// Load the config saved in the user config directory, if there is one
    pub fn from_local_file() -> Result<Option<Self>, TracklineError> {
        let Some(config_dir) = dirs::config_dir() else {
            return Ok(None);
        };
        let config_path = config_dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME);
        if config_path.exists() {
            Self::from_path(&config_path).map(Some)
        } else {
            Ok(None)
        }
    }

    pub fn from_path(path: &Path) -> Result<Self, TracklineError> {
        let file =
            std::fs::File::open(path).map_err(|e| TracklineError::ConfigIOError { source: e })?;
        let config: Self = serde_json::from_reader(std::io::BufReader::new(file))
            .map_err(|e| TracklineError::ConfigParseError { source: e })?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<PathBuf, TracklineError> {
        let config_path = Self::default_path()?;
        self.save_to(&config_path)?;
        Ok(config_path)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), TracklineError> {
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| TracklineError::ConfigIOError { source: e })?;
            }
        }

        let file =
            std::fs::File::create(path).map_err(|e| TracklineError::ConfigIOError { source: e })?;
        serde_json::to_writer_pretty(file, self)
            .map_err(|e| TracklineError::ConfigSerializeError { source: e })
    }

    pub fn validate(&self) -> Result<(), TracklineError> {
        if !self.half_width.is_finite() || self.half_width <= 0.0 {
            return Err(invalid("half_width", "must be a positive finite number"));
        }
        if !self.zone_gap.is_finite() || self.zone_gap <= 0.0 {
            return Err(invalid("zone_gap", "must be a positive finite number"));
        }
        if self.max_zone_traces == 0 {
            return Err(invalid("max_zone_traces", "must be at least 1"));
        }
        if !self.activation_threshold.is_finite() {
            return Err(invalid("activation_threshold", "must be finite"));
        }
        if self.sample_stride == 0 {
            return Err(invalid("sample_stride", "must be at least 1"));
        }
        Ok(())
    }

    pub fn zone_config(&self) -> ZoneConfig {
        ZoneConfig {
            distance_gap: self.zone_gap,
            max_traces: self.max_zone_traces,
        }
    }
}

fn invalid(field: &str, reason: &str) -> TracklineError {
    TracklineError::InvalidConfig {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}
