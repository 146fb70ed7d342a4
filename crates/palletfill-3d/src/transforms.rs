use crate::{
    linalg::{matmul33, transform_points},
    pointcloud::PointCloud,
};

/// The 3x3 identity matrix.
pub const IDENTITY: [[f64; 3]; 3] = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];

/// Elemental rotation about the x axis.
pub fn rotation_x(angle: f64) -> [[f64; 3]; 3] {
    let (s, c) = angle.sin_cos();
    [[1.0, 0.0, 0.0], [0.0, c, -s], [0.0, s, c]]
}

/// Elemental rotation about the y axis.
pub fn rotation_y(angle: f64) -> [[f64; 3]; 3] {
    let (s, c) = angle.sin_cos();
    [[c, 0.0, s], [0.0, 1.0, 0.0], [-s, 0.0, c]]
}

/// Elemental rotation about the z axis.
pub fn rotation_z(angle: f64) -> [[f64; 3]; 3] {
    let (s, c) = angle.sin_cos();
    [[c, -s, 0.0], [s, c, 0.0], [0.0, 0.0, 1.0]]
}

/// Compute the rotation matrix `Rx(ax) · Ry(ay) · Rz(az)` from Euler angles.
///
/// # Arguments
///
/// * `angles` - The rotation about the x, y and z axes in radians.
///
/// Example:
///
/// ```
/// use palletfill_3d::transforms::euler_to_rotation_matrix;
///
/// let rotation = euler_to_rotation_matrix(&[0.0, 0.0, 0.0]);
/// assert_eq!(rotation, palletfill_3d::transforms::IDENTITY);
/// ```
pub fn euler_to_rotation_matrix(angles: &[f64; 3]) -> [[f64; 3]; 3] {
    let rxy = matmul33(&rotation_x(angles[0]), &rotation_y(angles[1]));
    matmul33(&rxy, &rotation_z(angles[2]))
}

/// A rigid transform applied to row-vector points as `p · rotation + shift`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RigidTransform {
    /// Rotation matrix in row-major order.
    pub rotation: [[f64; 3]; 3],
    /// Translation added after the rotation.
    pub shift: [f64; 3],
}

impl RigidTransform {
    /// The transform that leaves every point untouched.
    pub fn identity() -> Self {
        Self {
            rotation: IDENTITY,
            shift: [0.0; 3],
        }
    }

    /// A pure rotation built from Euler angles in radians.
    pub fn from_euler(angles: &[f64; 3]) -> Self {
        Self {
            rotation: euler_to_rotation_matrix(angles),
            shift: [0.0; 3],
        }
    }

    /// A pure translation.
    pub fn from_shift(shift: [f64; 3]) -> Self {
        Self {
            rotation: IDENTITY,
            shift,
        }
    }

    /// Apply the transform and return a new point cloud.
    pub fn apply(&self, cloud: &PointCloud) -> PointCloud {
        let mut dst_points = vec![[0.0; 3]; cloud.len()];
        transform_points(cloud.points(), &self.rotation, &self.shift, &mut dst_points);
        PointCloud::new(dst_points)
    }
}

impl Default for RigidTransform {
    fn default() -> Self {
        Self::identity()
    }
}

/// Rotate a point cloud by Euler angles, composed as `Rx · Ry · Rz`.
pub fn rotate(cloud: &PointCloud, angles: &[f64; 3]) -> PointCloud {
    RigidTransform::from_euler(angles).apply(cloud)
}

/// Apply `p · rotation + shift` to every point of a cloud.
pub fn transform(cloud: &PointCloud, rotation: &[[f64; 3]; 3], shift: &[f64; 3]) -> PointCloud {
    RigidTransform {
        rotation: *rotation,
        shift: *shift,
    }
    .apply(cloud)
}
