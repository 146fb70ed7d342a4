/// An error type for the geometry pipeline.
#[derive(thiserror::Error, Debug)]
pub enum GeometryError {
    /// Error when the depth buffer length does not match the frame size.
    #[error("Depth data length ({0}) does not match the frame size ({1}x{2})")]
    InvalidFrameShape(usize, usize, usize),

    /// Error when a depth sample is negative or not finite.
    #[error("Invalid depth sample {value} at pixel ({x}, {y})")]
    InvalidDepth {
        /// Column of the offending pixel.
        x: usize,
        /// Row of the offending pixel.
        y: usize,
        /// The rejected sample.
        value: f64,
    },

    /// Error when the points cannot span a surface in the xy plane.
    #[error("Cannot triangulate a surface from {num_points} points (fewer than 3, collinear or coincident)")]
    DegenerateGeometry {
        /// Number of points handed to the triangulation.
        num_points: usize,
    },

    /// Error when a point handed to the integrator has a NaN or infinite coordinate.
    #[error("Point {0} has a non-finite coordinate")]
    NonFinitePoint(usize),
}
