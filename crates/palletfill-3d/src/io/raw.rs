use std::io::{Read, Write};
use std::path::Path;

use crate::{depth::DepthFrame, error::GeometryError};

/// Error types for the raw depth module.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum RawDepthError {
    /// Failed to read or write the file
    #[error("Failed to access raw depth file")]
    Io(#[from] std::io::Error),

    /// The file does not hold exactly one frame of the expected size
    #[error("Raw depth file has {got} bytes, expected {expected}")]
    InvalidFileSize {
        /// Expected number of bytes.
        expected: usize,
        /// Number of bytes found.
        got: usize,
    },

    /// A sample cannot be stored as raw sensor units
    #[error("Depth sample {0} cannot be encoded with the given depth scale")]
    UnencodableSample(f64),

    /// The decoded frame is invalid
    #[error("Invalid depth frame")]
    Frame(#[from] GeometryError),
}

/// Read a depth frame stored as little-endian `u16` sensor units.
///
/// # Arguments
///
/// * `path` - The path to the raw file.
/// * `width` - The width of the frame in pixels.
/// * `height` - The height of the frame in pixels.
/// * `depth_scale` - Meters per raw unit.
pub fn read_depth_raw(
    path: impl AsRef<Path>,
    width: usize,
    height: usize,
    depth_scale: f64,
) -> Result<DepthFrame, RawDepthError> {
    let mut bytes = Vec::with_capacity(width * height * 2);
    std::fs::File::open(path.as_ref())?.read_to_end(&mut bytes)?;

    let expected = width * height * 2;
    if bytes.len() != expected {
        return Err(RawDepthError::InvalidFileSize {
            expected,
            got: bytes.len(),
        });
    }

    let raw = bytes
        .chunks_exact(2)
        .map(|b| u16::from_le_bytes([b[0], b[1]]))
        .collect::<Vec<_>>();

    log::debug!("read raw depth frame {}", path.as_ref().display());

    Ok(DepthFrame::from_raw_u16(width, height, &raw, depth_scale)?)
}

/// Write a depth frame as little-endian `u16` sensor units.
///
/// Samples are divided by `depth_scale` and rounded to the nearest unit.
pub fn write_depth_raw(
    path: impl AsRef<Path>,
    frame: &DepthFrame,
    depth_scale: f64,
) -> Result<(), RawDepthError> {
    let mut bytes = Vec::with_capacity(frame.as_slice().len() * 2);
    for &d in frame.as_slice() {
        let units = (d / depth_scale).round();
        if !(0.0..=u16::MAX as f64).contains(&units) {
            return Err(RawDepthError::UnencodableSample(d));
        }
        bytes.extend_from_slice(&(units as u16).to_le_bytes());
    }

    let mut file = std::fs::File::create(path)?;
    file.write_all(&bytes)?;

    Ok(())
}
