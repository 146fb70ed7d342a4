#![doc = env!("CARGO_PKG_DESCRIPTION")]

#[doc(inline)]
pub use palletfill_3d as k3d;

#[doc(inline)]
pub use palletfill_sensor as sensor;
