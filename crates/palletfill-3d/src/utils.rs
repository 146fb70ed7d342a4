/// Utility function to convert a 3D array to a faer column vector.
/// # Arguments
///
/// * `array` - A 3D array.
///
/// # Returns
///
/// A faer column vector.
pub fn array3_to_faer_col(array: &[f64; 3]) -> faer::ColRef<'_, f64> {
    faer::col::from_slice(array.as_slice())
}

/// Utility function to convert a 3x3 array to a faer matrix 3x3.
///
/// # Arguments
///
/// * `array` - A 3x3 array in row-major order.
///
/// # Returns
///
/// A faer matrix 3x3.
pub fn array33_to_faer_mat33(array: &[[f64; 3]; 3]) -> faer::MatRef<'_, f64> {
    faer::mat::from_row_major_slice(array.as_flattened(), 3, 3)
}

/// Utility function to view a slice of 3D points as a faer N x 3 matrix.
///
/// Each row of the returned matrix is one point.
pub fn points_to_faer_mat(points: &[[f64; 3]]) -> faer::MatRef<'_, f64> {
    faer::mat::from_row_major_slice(points.as_flattened(), points.len(), 3)
}

/// Utility function to view a mutable slice of 3D points as a faer 3 x N matrix.
///
/// Each column of the returned matrix is one point.
pub fn points_to_faer_mat_mut(points: &mut [[f64; 3]]) -> faer::MatMut<'_, f64> {
    let num_points = points.len();
    faer::mat::from_column_major_slice_mut(points.as_flattened_mut(), 3, num_points)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_array3_to_col() {
        let array = [1.0, 2.0, 3.0];
        let col = array3_to_faer_col(&array);
        assert_eq!(col.read(0), 1.0);
        assert_eq!(col.read(1), 2.0);
        assert_eq!(col.read(2), 3.0);
    }

    #[test]
    fn test_array33_to_mat33() {
        let array = [[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]];
        let mat = array33_to_faer_mat33(&array);
        assert_eq!(mat.read(0, 1), 2.0);
        assert_eq!(mat.read(1, 0), 4.0);
        assert_eq!(mat.read(2, 2), 9.0);
    }

    #[test]
    fn test_points_views() {
        let mut points = vec![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]];

        let rows = points_to_faer_mat(&points);
        assert_eq!(rows.nrows(), 2);
        assert_eq!(rows.read(1, 2), 6.0);

        let cols = points_to_faer_mat_mut(&mut points);
        assert_eq!(cols.ncols(), 2);
        assert_eq!(cols.read(0, 1), 4.0);
    }
}
