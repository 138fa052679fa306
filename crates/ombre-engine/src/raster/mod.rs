//! CPU rasterization of gradient descriptors into owned pixel buffers.

mod pixmap;
mod renderer;

pub use pixmap::Pixmap;
pub use renderer::{CompiledGradient, Renderer, render};
