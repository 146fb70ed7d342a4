use palletfill_3d::GeometryError;

use crate::config::ConfigError;

/// An error type for the sensor.
#[derive(thiserror::Error, Debug)]
pub enum SensorError {
    /// Error when the geometry pipeline cannot produce a volume.
    #[error("Geometry pipeline failed")]
    Geometry(#[from] GeometryError),

    /// Error when the empty and full reference volumes are equal.
    #[error("Fill rate is undefined: empty and full reference volumes are both {volume}")]
    UndefinedFillRate {
        /// The shared reference volume.
        volume: f64,
    },

    /// Error when a calibration is requested with no samples.
    #[error("Calibration needs at least one sample. Got: {0}")]
    InvalidSampleCount(usize),

    /// Error when the depth source fails to deliver a frame.
    #[error("Failed to capture a depth frame")]
    Capture(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Error when the configuration cannot be loaded or saved.
    #[error("Invalid sensor configuration")]
    Config(#[from] ConfigError),
}
