//! Render configuration.

/// How the pixel loop is scheduled.
///
/// Every pixel is independent, so rows can be shaded in any order; the output
/// is identical across modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProcessingMode {
    /// Shade rows on the calling thread.
    #[default]
    Sequential,
    /// Split rows across rayon's global pool.
    Parallel,
    /// Split rows across a dedicated pool with the given number of threads.
    ParallelWith(usize),
}

/// Settings that apply to every render issued through a [`Renderer`](crate::raster::Renderer).
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    /// Pixel density used when a render call does not pass its own scale.
    pub default_scale: f32,
    pub mode: ProcessingMode,
    /// Rasters with fewer pixels than this are always shaded sequentially.
    pub parallel_min_pixels: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            default_scale: 1.0,
            mode: ProcessingMode::Sequential,
            parallel_min_pixels: 64 * 64,
        }
    }
}

impl RenderConfig {
    pub fn with_default_scale(mut self, scale: f32) -> Self {
        self.default_scale = scale;
        self
    }

    pub fn with_mode(mut self, mode: ProcessingMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_parallel_min_pixels(mut self, pixels: usize) -> Self {
        self.parallel_min_pixels = pixels;
        self
    }

    /// Mode actually used for a raster of `pixels` pixels.
    pub(crate) fn mode_for(&self, pixels: usize) -> ProcessingMode {
        if pixels < self.parallel_min_pixels {
            ProcessingMode::Sequential
        } else {
            self.mode
        }
    }
}
