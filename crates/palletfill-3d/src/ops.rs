use crate::{
    pointcloud::PointCloud,
    transforms::{RigidTransform, IDENTITY},
};

/// A coordinate axis of a point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// The x axis.
    X = 0,
    /// The y axis.
    Y = 1,
    /// The z axis.
    Z = 2,
}

impl Axis {
    /// All axes in crop order.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Index of the axis into a point.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Per-axis exclusive bounds of a region of interest.
///
/// Each pair holds `[max, min]` as configured, but the order is not required:
/// the crop always takes the larger value as the upper bound.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoiBox {
    /// Bounds for the x, y and z axes.
    pub borders: [[f64; 2]; 3],
}

impl RoiBox {
    /// Bounds that keep every finite point.
    pub const UNBOUNDED: [f64; 2] = [f64::INFINITY, f64::NEG_INFINITY];

    /// Creates a region of interest from per-axis bounds.
    pub fn new(borders: [[f64; 2]; 3]) -> Self {
        Self { borders }
    }

    /// Replaces the bounds of a single axis.
    pub fn with_axis(mut self, axis: Axis, bounds: [f64; 2]) -> Self {
        self.borders[axis.index()] = bounds;
        self
    }

    /// Returns the bounds of an axis.
    pub fn axis(&self, axis: Axis) -> [f64; 2] {
        self.borders[axis.index()]
    }
}

impl Default for RoiBox {
    fn default() -> Self {
        Self::new([Self::UNBOUNDED; 3])
    }
}

/// Keep the points whose coordinate along `axis` lies strictly between the bounds.
///
/// A point survives when `min(b0, b1) < p[axis] < max(b0, b1)`. Plain IEEE
/// comparisons are used, so infinite bounds disable the filter while NaN or
/// infinite coordinates are always dropped.
///
/// Example:
///
/// ```
/// use palletfill_3d::{ops::{crop, Axis}, pointcloud::PointCloud};
///
/// let cloud = PointCloud::new(vec![[0.0, 0.0, 0.5], [0.0, 0.0, 1.0], [0.0, 0.0, 2.0]]);
/// let cropped = crop(&cloud, Axis::Z, [1.5, 0.5]);
/// assert_eq!(cropped.points(), &[[0.0, 0.0, 1.0]]);
/// ```
pub fn crop(cloud: &PointCloud, axis: Axis, bounds: [f64; 2]) -> PointCloud {
    let upper = bounds[0].max(bounds[1]);
    let lower = bounds[0].min(bounds[1]);
    let idx = axis.index();
    cloud
        .points()
        .iter()
        .filter(|p| p[idx] < upper && p[idx] > lower)
        .copied()
        .collect::<Vec<_>>()
        .into()
}

/// Align a sensor-frame cloud with the container frame and keep the region of interest.
///
/// The cloud is rotated by the Euler angles, then shifted, then cropped on the
/// x, y and z axes in that order.
///
/// # Arguments
///
/// * `cloud` - Points in the sensor frame.
/// * `shift` - The translation applied after the rotation.
/// * `rotation` - Euler angles in radians.
/// * `roi` - The per-axis bounds in the aligned frame.
pub fn select_roi(
    cloud: &PointCloud,
    shift: &[f64; 3],
    rotation: &[f64; 3],
    roi: &RoiBox,
) -> PointCloud {
    let rotated = RigidTransform::from_euler(rotation).apply(cloud);
    let shifted = RigidTransform {
        rotation: IDENTITY,
        shift: *shift,
    }
    .apply(&rotated);

    let num_aligned = shifted.len();
    let selected = Axis::ALL
        .iter()
        .fold(shifted, |acc, &axis| crop(&acc, axis, roi.axis(axis)));

    log::debug!(
        "region of interest kept {} of {} points",
        selected.len(),
        num_aligned
    );

    selected
}
