use delaunator::{triangulate, Point};

use crate::{error::GeometryError, pointcloud::PointCloud};

/// Planar area below which a triangulation is treated as collinear, relative to
/// the squared diagonal of the xy bounding box.
const DEGENERATE_AREA_TOLERANCE: f64 = 1e-12;

/// Unsigned area of a triangle projected on the xy plane.
#[inline]
pub fn planar_area(p0: &[f64; 3], p1: &[f64; 3], p2: &[f64; 3]) -> f64 {
    (0.5 * ((p1[0] - p0[0]) * (p2[1] - p0[1]) - (p2[0] - p0[0]) * (p1[1] - p0[1]))).abs()
}

/// Signed volume of the prism below a single triangle of the surface.
///
/// The height is the mean z of the three vertices and the footprint is the
/// unsigned area of the triangle projected on the xy plane.
#[inline]
pub fn prism_volume(p0: &[f64; 3], p1: &[f64; 3], p2: &[f64; 3]) -> f64 {
    let height = (p0[2] + p1[2] + p2[2]) / 3.0;
    height * planar_area(p0, p1, p2)
}

/// Integrate the volume under the surface described by a point cloud.
///
/// The points are triangulated in the xy plane with a Delaunay triangulation and
/// the surface is interpreted as a piecewise linear height field over its convex
/// hull. Points below `z = 0` contribute negative volume.
///
/// # Arguments
///
/// * `cloud` - The aligned and cropped points.
///
/// # Errors
///
/// * [`GeometryError::NonFinitePoint`] if a coordinate is NaN or infinite.
/// * [`GeometryError::DegenerateGeometry`] if fewer than 3 points remain or the
///   points are all collinear or coincident in the xy plane. Near-collinear
///   input whose triangulated area vanishes against its extent counts as
///   collinear.
///
/// Example:
///
/// ```
/// use palletfill_3d::{pointcloud::PointCloud, volume::to_volume};
///
/// let cloud = PointCloud::new(vec![
///     [0.0, 0.0, 2.0],
///     [1.0, 0.0, 2.0],
///     [0.0, 1.0, 2.0],
///     [1.0, 1.0, 2.0],
/// ]);
/// let volume = to_volume(&cloud).unwrap();
/// assert!((volume - 2.0).abs() < 1e-12);
/// ```
pub fn to_volume(cloud: &PointCloud) -> Result<f64, GeometryError> {
    let points = cloud.points();

    if let Some(idx) = points
        .iter()
        .position(|p| !(p[0].is_finite() && p[1].is_finite() && p[2].is_finite()))
    {
        return Err(GeometryError::NonFinitePoint(idx));
    }

    if points.len() < 3 {
        return Err(GeometryError::DegenerateGeometry {
            num_points: points.len(),
        });
    }

    let now = std::time::Instant::now();

    let planar = points
        .iter()
        .map(|p| Point { x: p[0], y: p[1] })
        .collect::<Vec<_>>();
    let triangulation = triangulate(&planar);

    let (area, volume) = triangulation.triangles.chunks_exact(3).fold(
        (0.0, 0.0),
        |(area, volume), t| {
            let (p0, p1, p2) = (&points[t[0]], &points[t[1]], &points[t[2]]);
            (
                area + planar_area(p0, p1, p2),
                volume + prism_volume(p0, p1, p2),
            )
        },
    );

    // slivers left by rounding on collinear input
    if area <= DEGENERATE_AREA_TOLERANCE * planar_diagonal_squared(points) {
        return Err(GeometryError::DegenerateGeometry {
            num_points: points.len(),
        });
    }

    log::debug!(
        "integrated {} triangles over {} points in {:?}",
        triangulation.triangles.len() / 3,
        points.len(),
        now.elapsed()
    );

    Ok(volume)
}

fn planar_diagonal_squared(points: &[[f64; 3]]) -> f64 {
    let (min, max) = points.iter().fold(
        ([f64::INFINITY; 2], [f64::NEG_INFINITY; 2]),
        |(min, max), p| {
            (
                [min[0].min(p[0]), min[1].min(p[1])],
                [max[0].max(p[0]), max[1].max(p[1])],
            )
        },
    );
    (max[0] - min[0]).powi(2) + (max[1] - min[1]).powi(2)
}
