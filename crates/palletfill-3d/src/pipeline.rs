use crate::{
    depth::{depth_to_pointcloud, DepthFrame, FieldOfView},
    error::GeometryError,
    ops::{select_roi, RoiBox},
    pointcloud::PointCloud,
    volume::to_volume,
};

/// The measurement stages from a depth frame to a scalar volume.
///
/// A pipeline is a plain value: running it never mutates it, and every stage
/// produces a new point cloud.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct VolumePipeline {
    /// Field of view used to project depth samples.
    pub fov: FieldOfView,
    /// Euler angles, in radians, aligning the sensor frame with the container frame.
    pub rotation: [f64; 3],
    /// Translation applied after the rotation.
    pub shift: [f64; 3],
    /// Region of interest in the aligned frame.
    pub roi: RoiBox,
}

impl VolumePipeline {
    /// Creates a pipeline with no alignment and no region of interest.
    pub fn new(fov: FieldOfView) -> Self {
        Self {
            fov,
            ..Default::default()
        }
    }

    /// Sets the Euler angles of the alignment.
    pub fn with_rotation(mut self, rotation: [f64; 3]) -> Self {
        self.rotation = rotation;
        self
    }

    /// Sets the translation of the alignment.
    pub fn with_shift(mut self, shift: [f64; 3]) -> Self {
        self.shift = shift;
        self
    }

    /// Sets the region of interest.
    pub fn with_roi(mut self, roi: RoiBox) -> Self {
        self.roi = roi;
        self
    }

    /// Project, align and crop a depth frame.
    pub fn point_cloud(&self, frame: &DepthFrame) -> Result<PointCloud, GeometryError> {
        let cloud = depth_to_pointcloud(frame, &self.fov)?;
        Ok(select_roi(&cloud, &self.shift, &self.rotation, &self.roi))
    }

    /// Run every stage and return the integrated volume.
    pub fn volume(&self, frame: &DepthFrame) -> Result<f64, GeometryError> {
        to_volume(&self.point_cloud(frame)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::Axis;
    use approx::assert_relative_eq;

    #[test]
    fn test_flat_frame_volume() -> Result<(), Box<dyn std::error::Error>> {
        let (width, height, depth) = (16, 12, 1.5);
        let fov = FieldOfView::new(90.0, 60.0);
        let frame = DepthFrame::from_size_val(width, height, depth);
        let volume = VolumePipeline::new(fov).volume(&frame)?;

        // the footprint spans pixel offsets [-W/2, W/2 - 1] scaled by the depth
        let sx = (45.0f64).to_radians().tan() / (width as f64 / 2.0);
        let sy = (30.0f64).to_radians().tan() / (height as f64 / 2.0);
        let extent_x = sx * (width - 1) as f64 * depth;
        let extent_y = sy * (height - 1) as f64 * depth;
        assert_relative_eq!(volume, depth * extent_x * extent_y, max_relative = 1e-9);
        Ok(())
    }

    #[test]
    fn test_roi_removes_invalid_pixels() -> Result<(), Box<dyn std::error::Error>> {
        let mut data = vec![1.0; 8 * 8];
        data[0] = 0.0;
        data[9] = 0.0;
        let frame = DepthFrame::new(8, 8, data)?;

        let pipeline = VolumePipeline::new(FieldOfView::default())
            .with_roi(RoiBox::default().with_axis(Axis::Z, [0.5, 2.0]));
        let cloud = pipeline.point_cloud(&frame)?;
        assert_eq!(cloud.len(), 62);
        Ok(())
    }

    #[test]
    fn test_empty_roi_is_degenerate() {
        let frame = DepthFrame::from_size_val(8, 8, 1.0);
        let pipeline = VolumePipeline::new(FieldOfView::default())
            .with_roi(RoiBox::default().with_axis(Axis::Z, [5.0, 6.0]));
        assert!(matches!(
            pipeline.volume(&frame),
            Err(GeometryError::DegenerateGeometry { num_points: 0 })
        ));
    }

    #[test]
    fn test_shift_moves_reference_plane() -> Result<(), Box<dyn std::error::Error>> {
        let frame = DepthFrame::from_size_val(8, 8, 1.0);
        let base = VolumePipeline::new(FieldOfView::default());
        let above = base.volume(&frame)?;
        let below = base.with_shift([0.0, 0.0, -2.0]).volume(&frame)?;
        // z goes from 1 to -1 over the same footprint
        assert_relative_eq!(below, -above, max_relative = 1e-9);
        Ok(())
    }
}
