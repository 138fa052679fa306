//! Coordinate and size types shared by the field evaluator and the rasterizer.
//!
//! Gradient points live in unit space (`[0, 1] × [0, 1]` of the target).
//! Pixel space is math-style: +X right, +Y up, origin at the bottom-left pixel.

mod vec2;
mod viewport;

pub use vec2::Vec2;
pub use viewport::{PixelSize, Viewport};
