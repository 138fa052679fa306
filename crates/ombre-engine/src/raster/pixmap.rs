use crate::coords::PixelSize;
use crate::error::GradientError;
use crate::paint::Rgba8;

/// Owned RGBA raster produced by a render.
///
/// Layout:
/// - row-major, `width × height` premultiplied [`Rgba8`] values
/// - row 0 is the **bottom** edge (unit Y = 0), matching the math-style
///   coordinate space gradients are defined in
///
/// Consumers that expect top-down rows (image encoders, most windowing
/// toolkits) should use [`Pixmap::to_top_down_straight_bytes`] or flip rows
/// themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pixmap {
    width: u32,
    height: u32,
    pixels: Vec<Rgba8>,
}

impl Pixmap {
    /// Creates a transparent raster.
    ///
    /// Fails instead of aborting when the buffer cannot be allocated.
    pub fn try_new(size: PixelSize) -> Result<Self, GradientError> {
        let too_large = || GradientError::Allocation {
            width: size.width,
            height: size.height,
        };
        let len = (size.width as usize).checked_mul(size.height as usize).ok_or_else(too_large)?;

        let mut pixels = Vec::new();
        pixels.try_reserve_exact(len).map_err(|_| too_large())?;
        pixels.resize(len, Rgba8::transparent());

        Ok(Self {
            width: size.width,
            height: size.height,
            pixels,
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn size(&self) -> PixelSize {
        PixelSize::new(self.width, self.height)
    }

    /// Pixel at column `x` of row `y` (row 0 is the bottom edge).
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get(y as usize * self.width as usize + x as usize).copied()
    }

    #[inline]
    pub fn pixels(&self) -> &[Rgba8] {
        &self.pixels
    }

    #[inline]
    pub(crate) fn pixels_mut(&mut self) -> &mut [Rgba8] {
        &mut self.pixels
    }

    /// Iterator over rows, bottom row first.
    pub fn rows(&self) -> impl DoubleEndedIterator<Item = &[Rgba8]> {
        self.pixels.chunks_exact(self.width.max(1) as usize)
    }

    /// Raw premultiplied RGBA bytes, bottom row first. No copy.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    #[inline]
    pub fn into_pixels(self) -> Vec<Rgba8> {
        self.pixels
    }

    /// Straight-alpha RGBA bytes with the top row first.
    pub fn to_top_down_straight_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.pixels.len() * 4);
        for row in self.rows().rev() {
            for px in row {
                out.extend_from_slice(&px.to_straight());
            }
        }
        out
    }

    /// Composites the raster over a solid background, in place.
    pub fn composite_over(&mut self, background: Rgba8) {
        for px in &mut self.pixels {
            *px = px.over(background);
        }
    }
}
