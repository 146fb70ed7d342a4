/// Raw depth frame files.
pub mod raw;

pub use raw::{read_depth_raw, write_depth_raw, RawDepthError};
