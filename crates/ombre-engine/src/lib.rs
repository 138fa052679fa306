//! Ombre engine crate.
//!
//! CPU rasterizer for decorative gradient backgrounds. A render takes a
//! [`GradientDescriptor`](paint::GradientDescriptor) and a target size and
//! returns an owned [`Pixmap`](raster::Pixmap):
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`field`] | maps pixel positions to the gradient parameter `t` |
//! | [`ramp`] | resolves `t` to a color from a sequence of stops |
//! | [`raster`] | `Renderer`, `render`, `Pixmap` |
//! | [`paint`] | `Rgba8`, `GradientKind`, `GradientDescriptor` |
//! | [`coords`] | `Vec2`, `Viewport`, `PixelSize` |
//!
//! # Quick start
//!
//! ```rust
//! use ombre_engine::coords::{Vec2, Viewport};
//! use ombre_engine::paint::{GradientDescriptor, Rgba8};
//!
//! let gradient = GradientDescriptor::linear(vec![
//!     Rgba8::opaque(255, 0, 0),
//!     Rgba8::opaque(0, 0, 255),
//! ])
//! .with_points(Vec2::new(0.0, 0.5), Vec2::new(1.0, 0.5));
//!
//! let pixmap = ombre_engine::render(&gradient, Viewport::new(2.0, 1.0), Some(1.0))
//!     .unwrap()
//!     .unwrap();
//! assert_eq!(pixmap.pixel(1, 0), Some(Rgba8::opaque(0, 0, 255)));
//! ```

pub mod config;
pub mod coords;
pub mod error;
pub mod field;
pub mod logging;
pub mod paint;
pub mod ramp;
pub mod raster;

pub use config::{ProcessingMode, RenderConfig};
pub use error::GradientError;
pub use raster::{Pixmap, Renderer, render};
