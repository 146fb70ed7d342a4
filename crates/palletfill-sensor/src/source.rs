use std::path::{Path, PathBuf};

use palletfill_3d::{
    depth::DepthFrame,
    io::{read_depth_raw, RawDepthError},
};

/// A capability that delivers depth frames, typically backed by a camera.
///
/// The sensor only borrows the source to pull frames; opening and closing the
/// device is left to whoever constructs the source.
pub trait DepthSource {
    /// The error produced when a frame cannot be captured.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Capture the next depth frame.
    fn capture(&mut self) -> Result<DepthFrame, Self::Error>;
}

impl<S: DepthSource + ?Sized> DepthSource for &mut S {
    type Error = S::Error;

    fn capture(&mut self) -> Result<DepthFrame, Self::Error> {
        (**self).capture()
    }
}

/// Error types for the replay sources.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum SourceError {
    /// The source holds no frames.
    #[error("No depth frames available")]
    NoFrames,

    /// Failed to list the frames directory.
    #[error("Failed to list depth frames")]
    Io(#[from] std::io::Error),

    /// Failed to decode a raw frame.
    #[error("Failed to read depth frame")]
    Raw(#[from] RawDepthError),
}

/// Replays frames held in memory, starting over after the last one.
#[derive(Debug, Clone)]
pub struct FrameSequence {
    frames: Vec<DepthFrame>,
    next: usize,
}

impl FrameSequence {
    /// Creates a sequence from frames.
    pub fn new(frames: Vec<DepthFrame>) -> Self {
        Self { frames, next: 0 }
    }

    /// Returns the number of frames in the sequence.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Checks if the sequence holds no frames.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

impl DepthSource for FrameSequence {
    type Error = SourceError;

    fn capture(&mut self) -> Result<DepthFrame, Self::Error> {
        let frame = self.frames.get(self.next).ok_or(SourceError::NoFrames)?;
        self.next = (self.next + 1) % self.frames.len();
        Ok(frame.clone())
    }
}

/// Replays the `*.raw` frames of a directory in file name order.
///
/// Frames are stored as little-endian `u16` sensor units and read lazily on
/// every capture; the sequence starts over after the last file.
#[derive(Debug, Clone)]
pub struct RawDirectorySource {
    paths: Vec<PathBuf>,
    width: usize,
    height: usize,
    depth_scale: f64,
    next: usize,
}

impl RawDirectorySource {
    /// Lists the raw frames of a directory.
    ///
    /// # Arguments
    ///
    /// * `dir` - The directory holding the `*.raw` files.
    /// * `width` - The width of the frames in pixels.
    /// * `height` - The height of the frames in pixels.
    /// * `depth_scale` - Meters per raw unit.
    pub fn open(
        dir: impl AsRef<Path>,
        width: usize,
        height: usize,
        depth_scale: f64,
    ) -> Result<Self, SourceError> {
        let mut paths = Vec::new();
        for entry in std::fs::read_dir(dir.as_ref())? {
            let path = entry?.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == "raw") {
                paths.push(path);
            }
        }

        if paths.is_empty() {
            return Err(SourceError::NoFrames);
        }
        paths.sort();

        log::info!(
            "found {} raw depth frames in {}",
            paths.len(),
            dir.as_ref().display()
        );

        Ok(Self {
            paths,
            width,
            height,
            depth_scale,
            next: 0,
        })
    }

    /// Returns the frame files in replay order.
    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }
}

impl DepthSource for RawDirectorySource {
    type Error = SourceError;

    fn capture(&mut self) -> Result<DepthFrame, Self::Error> {
        let path = &self.paths[self.next];
        let frame = read_depth_raw(path, self.width, self.height, self.depth_scale)?;
        self.next = (self.next + 1) % self.paths.len();
        Ok(frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use palletfill_3d::io::write_depth_raw;

    #[test]
    fn test_frame_sequence_cycles() -> Result<(), SourceError> {
        let frames = vec![
            DepthFrame::from_size_val(2, 2, 1.0),
            DepthFrame::from_size_val(2, 2, 2.0),
        ];
        let mut source = FrameSequence::new(frames);
        assert_eq!(source.capture()?.get(0, 0), 1.0);
        assert_eq!(source.capture()?.get(0, 0), 2.0);
        assert_eq!(source.capture()?.get(0, 0), 1.0);
        Ok(())
    }

    #[test]
    fn test_frame_sequence_empty() {
        let mut source = FrameSequence::new(vec![]);
        assert!(matches!(source.capture(), Err(SourceError::NoFrames)));
    }

    #[test]
    fn test_raw_directory_source() -> Result<(), Box<dyn std::error::Error>> {
        let tmp_dir = tempfile::tempdir()?;
        write_depth_raw(
            tmp_dir.path().join("000001.raw"),
            &DepthFrame::from_size_val(3, 2, 2.0),
            0.001,
        )?;
        write_depth_raw(
            tmp_dir.path().join("000000.raw"),
            &DepthFrame::from_size_val(3, 2, 1.0),
            0.001,
        )?;
        std::fs::write(tmp_dir.path().join("notes.txt"), "not a frame")?;

        let mut source = RawDirectorySource::open(tmp_dir.path(), 3, 2, 0.001)?;
        assert_eq!(source.paths().len(), 2);
        assert_eq!(source.capture()?.get(0, 0), 1.0);
        assert_eq!(source.capture()?.get(2, 1), 2.0);
        Ok(())
    }

    #[test]
    fn test_raw_directory_without_frames() -> Result<(), Box<dyn std::error::Error>> {
        let tmp_dir = tempfile::tempdir()?;
        let res = RawDirectorySource::open(tmp_dir.path(), 3, 2, 0.001);
        assert!(matches!(res, Err(SourceError::NoFrames)));
        Ok(())
    }
}
