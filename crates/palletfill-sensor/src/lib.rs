#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Persisted sensor configuration.
pub mod config;

/// The calibration and fill rate engine.
pub mod engine;

/// Error types for the sensor.
pub mod error;

/// Presentation helpers for fill rate measurements.
pub mod report;

/// A sensor tying a depth source to the fill rate engine.
pub mod sensor;

/// Depth frame sources.
pub mod source;

/// Calibration state of a sensor.
pub mod state;

pub use config::SensorConfig;
pub use engine::{CalibrationSummary, FillRateEngine, Measurement};
pub use error::SensorError;
pub use report::{FillBand, FillReport};
pub use sensor::VolumeSensor;
pub use source::{DepthSource, FrameSequence, RawDirectorySource, SourceError};
pub use state::{CalibrationState, Reference};
