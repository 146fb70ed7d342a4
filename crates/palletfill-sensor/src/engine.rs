use palletfill_3d::{
    depth::{DepthFrame, FieldOfView},
    pipeline::VolumePipeline,
};

use crate::{
    error::SensorError,
    state::{CalibrationState, Reference},
};

/// Number of samples averaged by a calibration when none is given.
pub const DEFAULT_CALIBRATION_SAMPLES: usize = 5;

/// Result of a single measurement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    /// Integrated volume of the region of interest.
    pub volume: f64,
    /// Fill rate derived from the volume, not clamped.
    pub fill_rate: f64,
}

/// Statistics of the volumes averaged by a calibration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalibrationSummary {
    /// The reference that was calibrated.
    pub reference: Reference,
    /// Arithmetic mean of the sampled volumes, stored as the new reference.
    pub mean: f64,
    /// Population variance of the sampled volumes.
    pub variance: f64,
    /// Number of sampled volumes.
    pub num_samples: usize,
}

impl CalibrationSummary {
    fn from_samples(reference: Reference, volumes: &[f64]) -> Self {
        let num_samples = volumes.len();
        let mean = volumes.iter().sum::<f64>() / num_samples as f64;
        let variance =
            volumes.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / num_samples as f64;
        Self {
            reference,
            mean,
            variance,
            num_samples,
        }
    }
}

/// Turns measured volumes into fill rates and re-estimates reference volumes.
///
/// The engine exclusively owns the [`CalibrationState`]; the state only changes
/// through calibration, explicit reference updates and article count updates.
#[derive(Debug, Clone)]
pub struct FillRateEngine {
    state: CalibrationState,
    fov: FieldOfView,
    last_measurement: Option<Measurement>,
    last_calibration: Option<CalibrationSummary>,
}

impl FillRateEngine {
    /// Creates an engine from a calibration state and the sensor field of view.
    pub fn new(state: CalibrationState, fov: FieldOfView) -> Self {
        Self {
            state,
            fov,
            last_measurement: None,
            last_calibration: None,
        }
    }

    /// Returns the calibration state.
    pub fn state(&self) -> &CalibrationState {
        &self.state
    }

    /// Returns the field of view used for projection.
    pub fn fov(&self) -> FieldOfView {
        self.fov
    }

    /// The geometry pipeline described by the current state.
    pub fn pipeline(&self) -> VolumePipeline {
        VolumePipeline::new(self.fov)
            .with_rotation(self.state.rotation)
            .with_shift(self.state.shift)
            .with_roi(self.state.roi)
    }

    /// Normalize a volume against the reference volumes.
    pub fn fill_rate(&self, volume: f64) -> Result<f64, SensorError> {
        self.state.fill_rate(volume)
    }

    /// Run the geometry pipeline on a frame and return the volume.
    pub fn measure_volume(&self, frame: &DepthFrame) -> Result<f64, SensorError> {
        Ok(self.pipeline().volume(frame)?)
    }

    /// Measure the volume of a frame and derive its fill rate.
    ///
    /// Only the last measurement is cached; the calibration state is untouched.
    pub fn measure(&mut self, frame: &DepthFrame) -> Result<Measurement, SensorError> {
        let volume = self.measure_volume(frame)?;
        self.record(volume)
    }

    /// Derive the fill rate of an already measured volume and cache the result.
    pub fn record(&mut self, volume: f64) -> Result<Measurement, SensorError> {
        let fill_rate = self.fill_rate(volume)?;
        let measurement = Measurement { volume, fill_rate };

        log::debug!("volume: {:.6} fill rate: {:.4}", volume, fill_rate);

        self.last_measurement = Some(measurement);
        Ok(measurement)
    }

    /// Re-estimate a reference volume as the mean of `num_samples` sampled volumes.
    ///
    /// Samples are drawn sequentially. The count is validated before `sample` is
    /// called, and any failing sample aborts the calibration without touching the
    /// state.
    ///
    /// # Arguments
    ///
    /// * `reference` - The reference volume to replace.
    /// * `num_samples` - Number of volumes to average.
    /// * `sample` - Produces one volume per call.
    ///
    /// # Returns
    ///
    /// The new reference volume.
    pub fn calibrate<F>(
        &mut self,
        reference: Reference,
        num_samples: usize,
        mut sample: F,
    ) -> Result<f64, SensorError>
    where
        F: FnMut() -> Result<f64, SensorError>,
    {
        if num_samples == 0 {
            return Err(SensorError::InvalidSampleCount(num_samples));
        }

        let volumes = (0..num_samples)
            .map(|_| sample())
            .collect::<Result<Vec<_>, _>>()?;

        let summary = CalibrationSummary::from_samples(reference, &volumes);
        log::info!(
            "calibrated {} volume: {:.6} (variance {:.3e} over {} samples)",
            reference,
            summary.mean,
            summary.variance,
            summary.num_samples
        );

        self.state.set_reference(reference, summary.mean);
        if self.state.volume_empty == self.state.volume_full {
            log::warn!(
                "empty and full volumes are both {}, fill rate is undefined",
                summary.mean
            );
        }

        self.last_calibration = Some(summary);
        Ok(summary.mean)
    }

    /// Calibrate the full reference from frames of a full container.
    pub fn calibrate_full<F>(
        &mut self,
        num_samples: usize,
        next_frame: F,
    ) -> Result<f64, SensorError>
    where
        F: FnMut() -> Result<DepthFrame, SensorError>,
    {
        self.calibrate_from_frames(Reference::Full, num_samples, next_frame)
    }

    /// Calibrate the empty reference from frames of an empty container.
    pub fn calibrate_empty<F>(
        &mut self,
        num_samples: usize,
        next_frame: F,
    ) -> Result<f64, SensorError>
    where
        F: FnMut() -> Result<DepthFrame, SensorError>,
    {
        self.calibrate_from_frames(Reference::Empty, num_samples, next_frame)
    }

    fn calibrate_from_frames<F>(
        &mut self,
        reference: Reference,
        num_samples: usize,
        mut next_frame: F,
    ) -> Result<f64, SensorError>
    where
        F: FnMut() -> Result<DepthFrame, SensorError>,
    {
        let pipeline = self.pipeline();
        self.calibrate(reference, num_samples, || {
            let frame = next_frame()?;
            Ok(pipeline.volume(&frame)?)
        })
    }

    /// Replace a reference volume with an externally known value.
    pub fn set_reference(&mut self, reference: Reference, volume: f64) {
        self.state.set_reference(reference, volume);
    }

    /// Adjust the article count by `delta`, clamped at zero.
    pub fn set_max_articles(&mut self, delta: i32) -> u32 {
        self.state.set_max_articles(delta)
    }

    /// Returns the last successful measurement.
    pub fn last_measurement(&self) -> Option<Measurement> {
        self.last_measurement
    }

    /// Returns the statistics of the last calibration.
    pub fn last_calibration(&self) -> Option<CalibrationSummary> {
        self.last_calibration
    }
}
