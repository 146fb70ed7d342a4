#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Depth frames and their projection into point clouds.
pub mod depth;

/// Error types for the geometry pipeline.
pub mod error;

/// I/O utilities for reading and writing depth frames.
pub mod io;

/// Linear algebra utilities.
pub mod linalg;

/// Region of interest operations on point clouds.
pub mod ops;

/// Composition of the measurement stages into a single pipeline.
pub mod pipeline;

/// Point cloud container.
pub mod pointcloud;

/// 3D transforms algorithms.
pub mod transforms;

/// Conversion helpers between arrays and faer views.
pub mod utils;

/// Surface volume integration.
pub mod volume;

pub use error::GeometryError;
