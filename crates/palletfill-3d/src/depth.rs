use crate::{error::GeometryError, pointcloud::PointCloud};

/// A struct representing a single depth image.
///
/// Samples are stored row-major and expressed in metric units (typically meters).
/// A zero sample marks a pixel without a valid return from the sensor.
#[derive(Debug, Clone, PartialEq)]
pub struct DepthFrame {
    width: usize,
    height: usize,
    data: Vec<f64>,
}

impl DepthFrame {
    /// Creates a new depth frame from row-major samples.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::InvalidFrameShape`] if `data.len() != width * height`.
    pub fn new(width: usize, height: usize, data: Vec<f64>) -> Result<Self, GeometryError> {
        if data.len() != width * height {
            return Err(GeometryError::InvalidFrameShape(data.len(), width, height));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Creates a depth frame where every pixel holds the same sample.
    pub fn from_size_val(width: usize, height: usize, value: f64) -> Self {
        Self {
            width,
            height,
            data: vec![value; width * height],
        }
    }

    /// Creates a depth frame from raw sensor units and the device depth scale.
    ///
    /// Each raw sample is multiplied by `depth_scale` (meters per unit).
    pub fn from_raw_u16(
        width: usize,
        height: usize,
        raw: &[u16],
        depth_scale: f64,
    ) -> Result<Self, GeometryError> {
        let data = raw.iter().map(|&v| v as f64 * depth_scale).collect();
        Self::new(width, height, data)
    }

    /// Returns the width of the frame in pixels.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the height of the frame in pixels.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the dimensions of the frame (width, height).
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Returns the row-major samples.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Get the depth value at a specific pixel.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> f64 {
        self.data[y * self.width + x]
    }

    /// Checks that every sample is finite and non-negative.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::InvalidDepth`] for the first offending pixel in raster order.
    pub fn validate(&self) -> Result<(), GeometryError> {
        match self
            .data
            .iter()
            .position(|d| !d.is_finite() || *d < 0.0)
        {
            Some(idx) => Err(GeometryError::InvalidDepth {
                x: idx % self.width,
                y: idx / self.width,
                value: self.data[idx],
            }),
            None => Ok(()),
        }
    }
}

/// Horizontal and vertical field of view of the depth sensor, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldOfView {
    /// Horizontal field of view in degrees.
    pub horizontal: f64,
    /// Vertical field of view in degrees.
    pub vertical: f64,
}

impl FieldOfView {
    /// Creates a new field of view from degrees.
    pub fn new(horizontal: f64, vertical: f64) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }

    /// Meters per pixel offset at unit depth along an image axis of `size` pixels.
    fn scale(fov_deg: f64, size: usize) -> f64 {
        (fov_deg * std::f64::consts::PI / 360.0).tan() / (size as f64 / 2.0)
    }
}

impl Default for FieldOfView {
    // depth stream of the Intel RealSense D4xx family
    fn default() -> Self {
        Self::new(69.4, 42.5)
    }
}

/// Project a depth frame into a point cloud with a pinhole field of view model.
///
/// For pixel `(i, j)` the point is
/// `[sx * (i - W/2) * d, sy * (j - H/2) * d, d]` with `sx = tan(fov_x / 2) / (W / 2)`
/// and the pixel offsets computed with integer halves. The output holds exactly
/// `W * H` points in raster order; zero samples land at the origin.
///
/// # Arguments
///
/// * `frame` - The depth frame to project.
/// * `fov` - The field of view of the sensor.
///
/// # Errors
///
/// Returns [`GeometryError::InvalidDepth`] if any sample is NaN, infinite or negative.
///
/// Example:
///
/// ```
/// use palletfill_3d::depth::{depth_to_pointcloud, DepthFrame, FieldOfView};
///
/// let frame = DepthFrame::from_size_val(4, 2, 1.0);
/// let cloud = depth_to_pointcloud(&frame, &FieldOfView::default()).unwrap();
/// assert_eq!(cloud.len(), 8);
/// ```
pub fn depth_to_pointcloud(
    frame: &DepthFrame,
    fov: &FieldOfView,
) -> Result<PointCloud, GeometryError> {
    frame.validate()?;

    let (width, height) = frame.dimensions();
    let scale_x = FieldOfView::scale(fov.horizontal, width);
    let scale_y = FieldOfView::scale(fov.vertical, height);
    let center_x = (width / 2) as f64;
    let center_y = (height / 2) as f64;

    let mut points = Vec::with_capacity(width * height);
    for (j, row) in frame.as_slice().chunks_exact(width.max(1)).enumerate() {
        let cy = j as f64 - center_y;
        for (i, &d) in row.iter().enumerate() {
            let cx = i as f64 - center_x;
            points.push([scale_x * (cx * d), scale_y * (cy * d), d]);
        }
    }

    log::debug!(
        "projected {}x{} depth frame into {} points",
        width,
        height,
        points.len()
    );

    Ok(PointCloud::new(points))
}
