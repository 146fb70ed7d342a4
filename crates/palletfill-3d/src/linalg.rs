use crate::utils;

/// Transform a set of row-vector points using a rotation and a shift.
///
/// Every point `p` is mapped to `p · R + s`, i.e. the point is treated as a row
/// vector right-multiplied by the rotation.
///
/// # Arguments
///
/// * `src_points` - A set of points to be transformed.
/// * `rotation` - A 3x3 rotation matrix in row-major order.
/// * `shift` - A translation vector added after the rotation.
/// * `dst_points` - A pre-allocated vector to store the transformed points.
///
/// PRECONDITION: dst_points is a pre-allocated vector of the same size as source.
///
/// Example:
///
/// ```
/// use palletfill_3d::linalg::transform_points;
///
/// let src_points = vec![[2.0, 2.0, 2.0], [3.0, 4.0, 5.0]];
/// let rotation = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];
/// let shift = [0.0, 0.0, 1.0];
/// let mut dst_points = vec![[0.0; 3]; src_points.len()];
/// transform_points(&src_points, &rotation, &shift, &mut dst_points);
/// assert_eq!(dst_points[1], [3.0, 4.0, 6.0]);
/// ```
pub fn transform_points(
    src_points: &[[f64; 3]],
    rotation: &[[f64; 3]; 3],
    shift: &[f64; 3],
    dst_points: &mut [[f64; 3]],
) {
    assert_eq!(src_points.len(), dst_points.len());

    if src_points.is_empty() {
        return;
    }

    // (P · R)^T = R^T · P^T, so the destination is filled column by column
    let rotation_t = utils::array33_to_faer_mat33(rotation).transpose();
    let shift_col = utils::array3_to_faer_col(shift);
    let points_in_src = utils::points_to_faer_mat(src_points);
    let mut points_in_dst = utils::points_to_faer_mat_mut(dst_points);

    faer::linalg::matmul::matmul(
        &mut points_in_dst,
        rotation_t,
        points_in_src.transpose(),
        None,
        1.0,
        faer::Parallelism::None,
    );

    let (sx, sy, sz) = (shift_col.read(0), shift_col.read(1), shift_col.read(2));

    for mut col in points_in_dst.col_iter_mut() {
        col.write(0, col.read(0) + sx);
        col.write(1, col.read(1) + sy);
        col.write(2, col.read(2) + sz);
    }
}

/// Multiply two 3x3 matrices, `a · b`.
pub fn matmul33(a: &[[f64; 3]; 3], b: &[[f64; 3]; 3]) -> [[f64; 3]; 3] {
    let mut m = [[0.0; 3]; 3];
    for (i, row) in m.iter_mut().enumerate() {
        for (j, v) in row.iter_mut().enumerate() {
            *v = a[i][0] * b[0][j] + a[i][1] * b[1][j] + a[i][2] * b[2][j];
        }
    }
    m
}

/// Transpose a 3x3 matrix.
pub fn transpose33(a: &[[f64; 3]; 3]) -> [[f64; 3]; 3] {
    [
        [a[0][0], a[1][0], a[2][0]],
        [a[0][1], a[1][1], a[2][1]],
        [a[0][2], a[1][2], a[2][2]],
    ]
}

/// Utility function to compute the Euclidean distance between two points.
pub fn euclidean_distance(a: &[f64; 3], b: &[f64; 3]) -> f64 {
    ((a[0] - b[0]).powi(2) + (a[1] - b[1]).powi(2) + (a[2] - b[2]).powi(2)).sqrt()
}
