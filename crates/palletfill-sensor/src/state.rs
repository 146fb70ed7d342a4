use palletfill_3d::ops::{Axis, RoiBox};

use crate::error::SensorError;

/// One of the two calibrated reference volumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reference {
    /// The volume measured over an empty container.
    Empty,
    /// The volume measured over a full container.
    Full,
}

impl std::fmt::Display for Reference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Reference::Empty => write!(f, "empty"),
            Reference::Full => write!(f, "full"),
        }
    }
}

/// The learned reference volumes and the fixed alignment of a sensor.
#[derive(Debug, Clone, PartialEq)]
pub struct CalibrationState {
    /// Volume measured over the empty container.
    pub volume_empty: f64,
    /// Volume measured over the full container.
    pub volume_full: f64,
    /// Number of articles a full container holds.
    pub max_articles: u32,
    /// Euler angles, in radians, aligning the sensor frame with the container.
    pub rotation: [f64; 3],
    /// Translation applied after the rotation.
    pub shift: [f64; 3],
    /// Region of interest in the aligned frame.
    pub roi: RoiBox,
}

impl CalibrationState {
    /// Normalize a measured volume against the reference volumes.
    ///
    /// `fill_rate = 1 - (volume - volume_full) / (volume_empty - volume_full)`.
    /// The result is not clamped: volumes beyond the references give rates
    /// outside `[0, 1]`.
    ///
    /// # Errors
    ///
    /// Returns [`SensorError::UndefinedFillRate`] if both references are equal.
    pub fn fill_rate(&self, volume: f64) -> Result<f64, SensorError> {
        let span = self.volume_empty - self.volume_full;
        if span == 0.0 {
            return Err(SensorError::UndefinedFillRate {
                volume: self.volume_full,
            });
        }
        Ok(1.0 - (volume - self.volume_full) / span)
    }

    /// Returns a reference volume.
    pub fn reference(&self, reference: Reference) -> f64 {
        match reference {
            Reference::Empty => self.volume_empty,
            Reference::Full => self.volume_full,
        }
    }

    /// Replaces a reference volume.
    pub fn set_reference(&mut self, reference: Reference, volume: f64) {
        match reference {
            Reference::Empty => self.volume_empty = volume,
            Reference::Full => self.volume_full = volume,
        }
    }

    /// Adjust the article count by `delta`, never going below zero.
    ///
    /// Returns the new article count.
    pub fn set_max_articles(&mut self, delta: i32) -> u32 {
        self.max_articles = if delta >= 0 {
            self.max_articles.saturating_add(delta.unsigned_abs())
        } else {
            self.max_articles.saturating_sub(delta.unsigned_abs())
        };
        self.max_articles
    }
}

impl Default for CalibrationState {
    fn default() -> Self {
        Self {
            volume_empty: 0.0,
            volume_full: 0.0,
            max_articles: 0,
            rotation: [0.23554, 0.0, 0.0],
            shift: [0.0, 0.0, -0.75],
            roi: RoiBox::default().with_axis(Axis::Z, [1.1, 0.6]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn state(volume_empty: f64, volume_full: f64) -> CalibrationState {
        CalibrationState {
            volume_empty,
            volume_full,
            ..Default::default()
        }
    }

    #[test]
    fn test_fill_rate() -> Result<(), SensorError> {
        let state = state(1.0, 0.0);
        assert_relative_eq!(state.fill_rate(0.25)?, 0.75);
        assert_relative_eq!(state.fill_rate(1.0)?, 0.0);
        assert_relative_eq!(state.fill_rate(0.0)?, 1.0);
        Ok(())
    }

    #[test]
    fn test_fill_rate_is_unbounded() -> Result<(), SensorError> {
        let state = state(1.0, 0.0);
        assert_relative_eq!(state.fill_rate(-0.5)?, 1.5);
        assert_relative_eq!(state.fill_rate(3.0)?, -2.0);
        Ok(())
    }

    #[test]
    fn test_fill_rate_undefined() {
        let state = state(0.4, 0.4);
        assert!(matches!(
            state.fill_rate(0.1),
            Err(SensorError::UndefinedFillRate { volume }) if volume == 0.4
        ));
    }

    #[test]
    fn test_references() {
        let mut state = state(1.0, 0.0);
        state.set_reference(Reference::Full, 0.2);
        state.set_reference(Reference::Empty, 0.9);
        assert_eq!(state.reference(Reference::Full), 0.2);
        assert_eq!(state.reference(Reference::Empty), 0.9);
    }

    #[test]
    fn test_set_max_articles_clamps_at_zero() {
        let mut state = CalibrationState::default();
        assert_eq!(state.set_max_articles(-1), 0);
        assert_eq!(state.set_max_articles(1), 1);
        assert_eq!(state.set_max_articles(1), 2);
        assert_eq!(state.set_max_articles(-1), 1);
        assert_eq!(state.set_max_articles(-1), 0);
        assert_eq!(state.set_max_articles(-1), 0);
    }
}
