use std::io::{BufReader, BufWriter};
use std::path::Path;

use palletfill_3d::{
    depth::FieldOfView,
    ops::{Axis, RoiBox},
};
use serde::{Deserialize, Serialize};

use crate::state::CalibrationState;

/// Error types for the configuration module.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// Failed to read or write the configuration file
    #[error("Failed to access configuration file")]
    Io(#[from] std::io::Error),

    /// Failed to encode or decode the configuration
    #[error("Malformed configuration")]
    Json(#[from] serde_json::Error),

    /// A field holds a value JSON cannot represent
    #[error("Configuration field `{0}` is not a finite number")]
    NonFinite(&'static str),
}

/// Persisted configuration of a volume sensor.
///
/// Unbounded region of interest axes are stored as `null`, since JSON has no
/// representation for infinities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SensorConfig {
    /// Horizontal and vertical field of view in degrees.
    pub fov: [f64; 2],
    /// Euler angles in radians aligning the sensor frame with the container.
    pub rotation: [f64; 3],
    /// Translation applied after the rotation.
    pub shift: [f64; 3],
    /// Per-axis `[max, min]` bounds of the region of interest.
    pub borders: [Option<[f64; 2]>; 3],
    /// Calibrated empty volume.
    pub volume_empty: f64,
    /// Calibrated full volume.
    pub volume_full: f64,
    /// Number of articles a full container holds.
    pub max_articles: u32,
    /// Meters per raw depth unit.
    pub depth_scale: f64,
}

impl Default for SensorConfig {
    fn default() -> Self {
        let fov = FieldOfView::default();
        Self {
            fov: [fov.horizontal, fov.vertical],
            rotation: [0.0; 3],
            shift: [0.0; 3],
            borders: [None; 3],
            volume_empty: 0.0,
            volume_full: 0.0,
            max_articles: 0,
            depth_scale: 0.001,
        }
        .with_state(&CalibrationState::default())
    }
}

impl SensorConfig {
    /// Read a configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let file = std::fs::File::open(path.as_ref())?;
        let config = serde_json::from_reader(BufReader::new(file))?;
        log::debug!("loaded sensor configuration {}", path.as_ref().display());
        Ok(config)
    }

    /// Write the configuration to a JSON file.
    ///
    /// Fails with [`ConfigError::NonFinite`] before touching the file if a field
    /// is NaN or infinite, since it could not be read back.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        self.check_finite()?;
        let file = std::fs::File::create(path.as_ref())?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)?;
        log::debug!("saved sensor configuration {}", path.as_ref().display());
        Ok(())
    }

    fn check_finite(&self) -> Result<(), ConfigError> {
        let fields: [(&'static str, &[f64]); 6] = [
            ("fov", &self.fov[..]),
            ("rotation", &self.rotation[..]),
            ("shift", &self.shift[..]),
            ("volume_empty", std::slice::from_ref(&self.volume_empty)),
            ("volume_full", std::slice::from_ref(&self.volume_full)),
            ("depth_scale", std::slice::from_ref(&self.depth_scale)),
        ];
        if let Some((name, _)) = fields
            .iter()
            .find(|(_, values)| values.iter().any(|v| !v.is_finite()))
        {
            return Err(ConfigError::NonFinite(*name));
        }
        if self.borders.iter().flatten().flatten().any(|b| !b.is_finite()) {
            return Err(ConfigError::NonFinite("borders"));
        }
        Ok(())
    }

    /// The field of view of the sensor.
    pub fn field_of_view(&self) -> FieldOfView {
        FieldOfView::new(self.fov[0], self.fov[1])
    }

    /// The region of interest, with missing axes left unbounded.
    pub fn roi(&self) -> RoiBox {
        Axis::ALL.iter().fold(RoiBox::default(), |roi, &axis| {
            match self.borders[axis.index()] {
                Some(bounds) => roi.with_axis(axis, bounds),
                None => roi,
            }
        })
    }

    /// The calibration state described by this configuration.
    pub fn state(&self) -> CalibrationState {
        CalibrationState {
            volume_empty: self.volume_empty,
            volume_full: self.volume_full,
            max_articles: self.max_articles,
            rotation: self.rotation,
            shift: self.shift,
            roi: self.roi(),
        }
    }

    /// Copy a calibration state into the configuration, for persisting it.
    ///
    /// NaN bounds are copied as is and make [`SensorConfig::save`] fail.
    pub fn with_state(mut self, state: &CalibrationState) -> Self {
        self.volume_empty = state.volume_empty;
        self.volume_full = state.volume_full;
        self.max_articles = state.max_articles;
        self.rotation = state.rotation;
        self.shift = state.shift;
        for axis in Axis::ALL {
            let bounds = state.roi.axis(axis);
            let unbounded = bounds[0].max(bounds[1]) == f64::INFINITY
                && bounds[0].min(bounds[1]) == f64::NEG_INFINITY;
            // a single infinite side is kept as the largest finite value
            self.borders[axis.index()] =
                (!unbounded).then(|| bounds.map(|b| b.clamp(f64::MIN, f64::MAX)));
        }
        self
    }
}
