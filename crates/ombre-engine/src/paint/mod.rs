//! Paint model: premultiplied 8-bit colors and gradient descriptors.
//!
//! Geometry types remain in `coords`.

pub mod color;
pub mod gradient;

pub use color::Rgba8;
pub use gradient::{GradientDescriptor, GradientKind};
