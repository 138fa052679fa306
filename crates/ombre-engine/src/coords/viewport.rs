/// Target size in logical units.
///
/// The raster that actually gets shaded is this size multiplied by a pixel
/// density (see [`Viewport::to_pixels`]).
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }

    /// Resolves the raster dimensions as `round(logical × scale)` per axis.
    ///
    /// Returns `None` when either dimension ends up `≤ 0` or is not finite.
    pub fn to_pixels(self, scale: f32) -> Option<PixelSize> {
        if !self.is_valid() {
            return None;
        }
        let w = (self.width * scale).round();
        let h = (self.height * scale).round();
        if !w.is_finite() || !h.is_finite() || w < 1.0 || h < 1.0 {
            return None;
        }
        if w > u32::MAX as f32 || h > u32::MAX as f32 {
            return None;
        }
        Some(PixelSize::new(w as u32, h as u32))
    }
}

/// Raster dimensions in physical pixels. Both sides are at least 1.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct PixelSize {
    pub width: u32,
    pub height: u32,
}

impl PixelSize {
    #[inline]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn area(self) -> usize {
        self.width as usize * self.height as usize
    }
}
