/// A point cloud in a metric frame.
///
/// Stages of the measurement pipeline never edit a cloud in place: transforms and
/// filters consume a cloud by reference and return a new one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointCloud {
    // The points in the point cloud.
    points: Vec<[f64; 3]>,
}

impl PointCloud {
    /// Create a new point cloud from points.
    pub fn new(points: Vec<[f64; 3]>) -> Self {
        Self { points }
    }

    /// Get the number of points in the point cloud.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the point cloud is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Get as reference the points in the point cloud.
    pub fn points(&self) -> &[[f64; 3]] {
        &self.points
    }

    /// Consume the point cloud and return the backing points.
    pub fn into_points(self) -> Vec<[f64; 3]> {
        self.points
    }

    /// Get the minimum bound of the point cloud, or `None` if it is empty.
    pub fn min_bound(&self) -> Option<[f64; 3]> {
        let first = *self.points.first()?;
        Some(self.points.iter().fold(first, |acc, p| {
            [acc[0].min(p[0]), acc[1].min(p[1]), acc[2].min(p[2])]
        }))
    }

    /// Get the maximum bound of the point cloud, or `None` if it is empty.
    pub fn max_bound(&self) -> Option<[f64; 3]> {
        let first = *self.points.first()?;
        Some(self.points.iter().fold(first, |acc, p| {
            [acc[0].max(p[0]), acc[1].max(p[1]), acc[2].max(p[2])]
        }))
    }
}

impl From<Vec<[f64; 3]>> for PointCloud {
    fn from(points: Vec<[f64; 3]>) -> Self {
        Self::new(points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pointcloud() {
        let pointcloud = PointCloud::new(vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0]]);

        assert_eq!(pointcloud.len(), 2);
        assert!(!pointcloud.is_empty());

        if let Some(p1) = pointcloud.points().last() {
            assert_eq!(p1[0], 1.0);
            assert_eq!(p1[1], 0.0);
            assert_eq!(p1[2], 0.0);
        }
    }

    #[test]
    fn test_pointcloud_bounds() {
        let pointcloud =
            PointCloud::new(vec![[0.5, -1.0, 2.0], [-0.5, 3.0, 1.0], [0.0, 0.0, -4.0]]);
        assert_eq!(pointcloud.min_bound(), Some([-0.5, -1.0, -4.0]));
        assert_eq!(pointcloud.max_bound(), Some([0.5, 3.0, 2.0]));

        let empty = PointCloud::default();
        assert_eq!(empty.min_bound(), None);
        assert_eq!(empty.max_bound(), None);
    }
}
