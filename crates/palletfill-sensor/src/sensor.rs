use palletfill_3d::{
    depth::{DepthFrame, FieldOfView},
    pointcloud::PointCloud,
};

use crate::{
    config::SensorConfig,
    engine::{FillRateEngine, Measurement},
    error::SensorError,
    report::FillReport,
    source::DepthSource,
    state::{CalibrationState, Reference},
};

fn capture<S: DepthSource>(source: &mut S) -> Result<DepthFrame, SensorError> {
    source
        .capture()
        .map_err(|e| SensorError::Capture(Box::new(e)))
}

/// A volume sensor pulling frames from a depth source.
///
/// Keeps the last captured frame and region of interest for inspection.
pub struct VolumeSensor<S: DepthSource> {
    source: S,
    engine: FillRateEngine,
    depth: Option<DepthFrame>,
    point_cloud: Option<PointCloud>,
}

impl<S: DepthSource> VolumeSensor<S> {
    /// Creates a sensor from a source, a calibration state and a field of view.
    pub fn new(source: S, state: CalibrationState, fov: FieldOfView) -> Self {
        Self {
            source,
            engine: FillRateEngine::new(state, fov),
            depth: None,
            point_cloud: None,
        }
    }

    /// Creates a sensor from a persisted configuration.
    pub fn from_config(source: S, config: &SensorConfig) -> Self {
        Self::new(source, config.state(), config.field_of_view())
    }

    /// Capture a frame and keep its region of interest.
    pub fn measure_depth(&mut self) -> Result<&PointCloud, SensorError> {
        let frame = capture(&mut self.source)?;
        let cloud = self.engine.pipeline().point_cloud(&frame)?;
        self.depth = Some(frame);
        Ok(&*self.point_cloud.insert(cloud))
    }

    /// Capture a frame and return the volume of its region of interest.
    pub fn measure_volume(&mut self) -> Result<f64, SensorError> {
        let cloud = self.measure_depth()?;
        Ok(palletfill_3d::volume::to_volume(cloud)?)
    }

    /// Capture a frame and derive its fill rate.
    pub fn measure_fill_rate(&mut self) -> Result<Measurement, SensorError> {
        let volume = self.measure_volume()?;
        self.engine.record(volume)
    }

    /// Calibrate the full reference from `num_samples` captured frames.
    pub fn calibrate_full(&mut self, num_samples: usize) -> Result<f64, SensorError> {
        let Self { source, engine, .. } = self;
        engine.calibrate_full(num_samples, || capture(&mut *source))
    }

    /// Calibrate the empty reference from `num_samples` captured frames.
    pub fn calibrate_empty(&mut self, num_samples: usize) -> Result<f64, SensorError> {
        let Self { source, engine, .. } = self;
        engine.calibrate_empty(num_samples, || capture(&mut *source))
    }

    /// Measure once more and return the distance to a reference volume.
    ///
    /// Used right after a calibration to check that the scene is stable.
    pub fn calibration_error(&mut self, reference: Reference) -> Result<f64, SensorError> {
        let current = self.measure_volume()?;
        Ok((self.engine.state().reference(reference) - current).abs())
    }

    /// Replace the empty reference volume.
    pub fn set_empty_volume(&mut self, volume_empty: f64) -> &mut Self {
        self.engine.set_reference(Reference::Empty, volume_empty);
        self
    }

    /// Replace the full reference volume.
    pub fn set_full_volume(&mut self, volume_full: f64) -> &mut Self {
        self.engine.set_reference(Reference::Full, volume_full);
        self
    }

    /// Adjust the article count by `delta`, clamped at zero.
    pub fn set_max_articles(&mut self, delta: i32) -> u32 {
        self.engine.set_max_articles(delta)
    }

    /// Report of the last measurement, if any.
    pub fn report(&self) -> Option<FillReport> {
        self.engine
            .last_measurement()
            .map(|m| FillReport::new(m, self.engine.state().max_articles))
    }

    /// Returns the fill rate engine.
    pub fn engine(&self) -> &FillRateEngine {
        &self.engine
    }

    /// Returns the calibration state.
    pub fn state(&self) -> &CalibrationState {
        self.engine.state()
    }

    /// Returns the region of interest of the last captured frame.
    pub fn point_cloud(&self) -> Option<&PointCloud> {
        self.point_cloud.as_ref()
    }

    /// Returns the last captured frame.
    pub fn depth(&self) -> Option<&DepthFrame> {
        self.depth.as_ref()
    }

    /// Returns the depth source.
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }
}
